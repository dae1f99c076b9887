use std::error::Error;

use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::config::constant;
use crate::domain::types::Location;

/// The 25 built-in Singapore locations. Index 0 is the main depot.
pub fn singapore_locations() -> Vec<Location> {
    vec![
        // Depots & hubs
        Location::new("Jurong West DC (Main Depot)", 1.3404, 103.7090, 0),
        Location::new("Changi Airfreight Centre", 1.3644, 103.9915, 20),
        Location::new("Tuas Industrial Hub", 1.3200, 103.6368, 15),
        Location::new("PSA Pasir Panjang Terminal", 1.2800, 103.7850, 18),
        // North
        Location::new("Woodlands Checkpoint", 1.4360, 103.7860, 12),
        Location::new("Yishun Northpoint City", 1.4295, 103.8358, 8),
        Location::new("Sembawang Shopping Centre", 1.4417, 103.8286, 6),
        Location::new("Seletar Aerospace Park", 1.4177, 103.8687, 10),
        // North-east
        Location::new("Punggol Waterway Point", 1.4067, 103.9022, 9),
        Location::new("Sengkang Compass One", 1.3916, 103.8949, 7),
        Location::new("Serangoon Nex", 1.3506, 103.8718, 8),
        // East
        Location::new("Tampines Hub", 1.3524, 103.9443, 10),
        Location::new("Pasir Ris Interchange", 1.3732, 103.9493, 6),
        Location::new("Bedok Mall", 1.3241, 103.9295, 8),
        Location::new("Changi Business Park", 1.3340, 103.9644, 11),
        // Central / CBD
        Location::new("Marina Bay Sands (VIP)", 1.2834, 103.8607, 15).vip(),
        Location::new("Suntec City", 1.2935, 103.8572, 9),
        Location::new("Orchard Ion", 1.3040, 103.8318, 12),
        Location::new("Bishan Junction 8", 1.3500, 103.8485, 7),
        Location::new("Toa Payoh Hub", 1.3323, 103.8475, 6),
        Location::new("Ang Mo Kio Hub", 1.3695, 103.8483, 7),
        // West
        Location::new("NTU (Nanyang Tech)", 1.3483, 103.6831, 5),
        Location::new("Clementi Mall", 1.3150, 103.7651, 6),
        Location::new("NUS (National Univ)", 1.2966, 103.7764, 8),
        Location::new("Jurong East IMM", 1.3329, 103.7436, 10),
    ]
}

/// Reads locations from a CSV with a `name,lat,lon,demand[,vip]` header.
/// The first row is the depot; its demand is forced to zero.
pub fn read_locations_from_csv(csv_path: &str) -> Result<Vec<Location>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)?;

    let mut locations = Vec::new();
    for (row, record) in reader.deserialize::<Location>().enumerate() {
        let location = record?;
        if !(-90.0..=90.0).contains(&location.latitude)
            || !(-180.0..=180.0).contains(&location.longitude)
        {
            return Err(format!(
                "Row {}: coordinates out of range for '{}' ({}, {})",
                row + 1,
                location.name,
                location.latitude,
                location.longitude
            )
            .into());
        }
        if location.demand > constant::MAX_LOAD {
            return Err(format!(
                "Row {}: demand {} for '{}' exceeds {}",
                row + 1,
                location.demand,
                location.name,
                constant::MAX_LOAD
            )
            .into());
        }
        locations.push(location);
    }

    if locations.len() < 2 {
        return Err(format!(
            "{} needs a depot and at least one customer, found {} rows",
            csv_path,
            locations.len()
        )
        .into());
    }

    if locations[0].demand != 0 {
        warn!(
            "Depot '{}' has demand {} in CSV, treating it as 0",
            locations[0].name, locations[0].demand
        );
        locations[0].demand = 0;
    }

    Ok(locations)
}

/// Loads locations from CSV when configured, falling back to the built-in set.
pub fn load_locations(csv_path: Option<&str>) -> Vec<Location> {
    let Some(path) = csv_path else {
        return singapore_locations();
    };

    match read_locations_from_csv(path) {
        Ok(list) => {
            info!("Loaded {} locations from CSV {}", list.len(), path);
            list
        }
        Err(err) => {
            warn!(
                "Failed to read locations CSV at {}: {}. Falling back to built-in locations.",
                path, err
            );
            singapore_locations()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sg_vrp_{}_{}.csv", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn fixture_has_25_locations_with_depot_first() {
        let locations = singapore_locations();
        assert_eq!(locations.len(), 25);
        assert_eq!(locations[0].name, "Jurong West DC (Main Depot)");
        assert_eq!(locations[0].demand, 0);
        assert_eq!(locations.iter().map(|l| l.demand as u64).sum::<u64>(), 233);
    }

    #[test]
    fn only_marina_bay_is_vip() {
        let vips: Vec<_> = singapore_locations()
            .into_iter()
            .filter(|l| l.vip)
            .map(|l| l.name)
            .collect();
        assert_eq!(vips, vec!["Marina Bay Sands (VIP)".to_string()]);
    }

    #[test]
    fn csv_is_parsed_and_depot_demand_zeroed() {
        let path = temp_csv(
            "parsed",
            "name,lat,lon,demand,vip\nHub,1.30,103.80,4,false\nA,1.31,103.81,5,true\nB,1.32,103.82,6,false\n",
        );
        let locations = read_locations_from_csv(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(locations.len(), 3);
        assert_eq!(locations[0].demand, 0);
        assert!(locations[1].vip);
        assert!(!locations[2].vip);
        assert_eq!(locations[2].demand, 6);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let path = temp_csv("range", "name,lat,lon,demand\nHub,1.3,103.8,0\nBad,91.0,103.8,1\n");
        let err = read_locations_from_csv(path.to_str().unwrap()).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn demand_beyond_solver_range_is_rejected() {
        let path = temp_csv("demand", "name,lat,lon,demand\nHub,1.3,103.8,0\nBig,1.31,103.81,3000000000\n");
        let err = read_locations_from_csv(path.to_str().unwrap()).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(err.to_string().contains("Row 2: demand 3000000000"));
    }

    #[test]
    fn unreadable_csv_falls_back_to_fixture() {
        let locations = load_locations(Some("/nonexistent/sg_vrp_locations.csv"));
        assert_eq!(locations, singapore_locations());
        assert_eq!(load_locations(None).len(), 25);
    }
}
