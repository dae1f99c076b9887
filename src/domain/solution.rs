use std::error::Error;

use crate::domain::types::{ProblemInstance, RoutePlan, VehicleRoute};
use crate::evaluation::capacity::{excess, route_load};
use crate::evaluation::fitness::total_distance;

/// Build a plan for the whole fleet from raw per-tour location sequences.
///
/// Each sequence is normalised to start and end at the depot, vehicles are
/// numbered in tour order and unused vehicles get an empty depot-to-depot route.
pub fn assemble_plan(tours: Vec<Vec<usize>>, pi: &ProblemInstance) -> Result<RoutePlan, Box<dyn Error>> {
    let used: Vec<Vec<usize>> = tours
        .into_iter()
        .map(|tour| {
            tour.into_iter()
                .filter(|&idx| idx != pi.depot)
                .collect::<Vec<_>>()
        })
        .filter(|customers| !customers.is_empty())
        .collect();

    if used.len() > pi.fleet.num_vehicles {
        return Err(format!(
            "Solver returned {} tours for a fleet of {} vehicles",
            used.len(),
            pi.fleet.num_vehicles
        )
        .into());
    }

    let mut routes: Vec<VehicleRoute> = used
        .into_iter()
        .enumerate()
        .map(|(vehicle, customers)| {
            let mut stops = Vec::with_capacity(customers.len() + 2);
            stops.push(pi.depot);
            stops.extend(customers);
            stops.push(pi.depot);
            VehicleRoute { vehicle, stops }
        })
        .collect();

    for vehicle in routes.len()..pi.fleet.num_vehicles {
        routes.push(VehicleRoute::empty(vehicle, pi.depot));
    }

    let total_distance = total_distance(&routes, &pi.distance_matrix);
    let plan = RoutePlan {
        routes,
        total_distance,
    };
    validate_plan(&plan, pi)?;

    Ok(plan)
}

/// Check every route invariant: depot at both ends, capacity respected and
/// each customer visited exactly once across the fleet.
pub fn validate_plan(plan: &RoutePlan, pi: &ProblemInstance) -> Result<(), Box<dyn Error>> {
    let n = pi.locations.len();
    let mut visits = vec![0usize; n];

    for route in &plan.routes {
        let (Some(&first), Some(&last)) = (route.stops.first(), route.stops.last()) else {
            return Err(format!("Vehicle {} has no stops", route.vehicle + 1).into());
        };
        if route.stops.len() < 2 || first != pi.depot || last != pi.depot {
            return Err(format!(
                "Vehicle {} route {:?} does not start and end at the depot",
                route.vehicle + 1,
                route.stops
            )
            .into());
        }

        let inner = &route.stops[1..route.stops.len() - 1];
        for &idx in inner {
            if idx >= n {
                return Err(format!("Vehicle {} visits unknown location {}", route.vehicle + 1, idx).into());
            }
            if idx == pi.depot {
                return Err(format!("Vehicle {} returns to the depot mid-route", route.vehicle + 1).into());
            }
            visits[idx] += 1;
        }

        let load = route_load(route, &pi.locations, pi.depot);
        let over = excess(load, pi.fleet.capacity);
        if over > 0 {
            return Err(format!(
                "Vehicle {} carries load {} exceeding capacity {} by {}",
                route.vehicle + 1,
                load,
                pi.fleet.capacity,
                over
            )
            .into());
        }
    }

    for idx in pi.customers() {
        match visits[idx] {
            1 => {}
            0 => return Err(format!("Location {} ({}) is not served", idx, pi.locations[idx].name).into()),
            k => {
                return Err(format!(
                    "Location {} ({}) is visited {} times",
                    idx, pi.locations[idx].name, k
                )
                .into())
            }
        }
    }

    Ok(())
}

/// Customers missing from the given tours.
pub fn unassigned_customers(tours: &[Vec<usize>], pi: &ProblemInstance) -> Vec<usize> {
    let mut seen = vec![false; pi.locations.len()];
    for &idx in tours.iter().flatten() {
        if let Some(flag) = seen.get_mut(idx) {
            *flag = true;
        }
    }
    pi.customers().filter(|&idx| !seen[idx]).collect()
}
