use std::error::Error;

use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::domain::types::{ProblemInstance, RoutePlan};
use crate::evaluation::fitness::dist_between;

/// One visited stop of the exported plan.
#[derive(Debug, Serialize, PartialEq)]
pub struct StopRecord {
    pub vehicle: usize,
    pub stop: usize,
    pub location_index: usize,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub demand: u32,
    pub load: u64,
    pub distance_m: u64,
}

/// Flatten a plan into stop rows with running load and distance per vehicle.
/// Unused vehicles produce no rows.
pub fn stop_records(plan: &RoutePlan, pi: &ProblemInstance) -> Vec<StopRecord> {
    let mut records = vec![];
    for route in plan.routes.iter().filter(|r| !r.is_empty()) {
        let mut load = 0;
        let mut distance = 0;
        let mut prev = None;

        for (stop, &idx) in route.stops.iter().enumerate() {
            if let Some(from) = prev {
                distance += dist_between(from, idx, &pi.distance_matrix);
            }
            if idx != pi.depot {
                load += pi.locations[idx].demand as u64;
            }
            prev = Some(idx);

            let loc = &pi.locations[idx];
            records.push(StopRecord {
                vehicle: route.vehicle + 1,
                stop,
                location_index: idx,
                name: loc.name.clone(),
                latitude: loc.latitude,
                longitude: loc.longitude,
                demand: loc.demand,
                load,
                distance_m: distance,
            });
        }
    }
    records
}

pub fn save_to_csv(plan: &RoutePlan, pi: &ProblemInstance, filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    let records = stop_records(plan, pi);
    for record in &records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    info!("Wrote {} route stops to {}", records.len(), filename);
    Ok(())
}
