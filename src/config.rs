use std::env;
use std::error::Error;
use std::str::FromStr;

use dotenv::dotenv;
use tracing::{debug, info};

pub mod constant {
    pub(crate) const DEPOT: usize = 0;
    pub(crate) const NUM_VEHICLES: usize = 5;
    pub(crate) const VEHICLE_CAPACITY: u32 = 40;
    pub(crate) const MAX_LOAD: u32 = i32::MAX as u32;
    pub(crate) const TIME_LIMIT_SECS: usize = 30;
    pub(crate) const EARTH_RADIUS_KM: f64 = 6371.0;
    pub(crate) const OUTPUT_PATH: &str = "Singapore_route_map.html";
    pub(crate) const VEHICLE_COLORS: [&str; 5] = ["red", "blue", "green", "purple", "orange"];
}

/// Runtime settings, defaults from [`constant`] overridden by `VRP_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub num_vehicles: usize,
    pub vehicle_capacity: u32,
    pub time_limit_secs: usize,
    pub max_generations: Option<usize>,
    pub output_path: String,
    pub locations_csv: Option<String>,
    pub routes_csv: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_vehicles: constant::NUM_VEHICLES,
            vehicle_capacity: constant::VEHICLE_CAPACITY,
            time_limit_secs: constant::TIME_LIMIT_SECS,
            max_generations: None,
            output_path: constant::OUTPUT_PATH.to_string(),
            locations_csv: None,
            routes_csv: None,
        }
    }
}

impl Settings {
    /// Load `.env` (if any) and read settings from the process environment.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        dotenv().ok();
        let settings = Self::from_lookup(|key| env::var(key).ok())?;
        info!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        let settings = Self {
            num_vehicles: parse_or(get("VRP_NUM_VEHICLES"), "VRP_NUM_VEHICLES", defaults.num_vehicles)?,
            vehicle_capacity: parse_or(
                get("VRP_VEHICLE_CAPACITY"),
                "VRP_VEHICLE_CAPACITY",
                defaults.vehicle_capacity,
            )?,
            time_limit_secs: parse_or(
                get("VRP_TIME_LIMIT_SECS"),
                "VRP_TIME_LIMIT_SECS",
                defaults.time_limit_secs,
            )?,
            max_generations: get("VRP_MAX_GENERATIONS")
                .map(|raw| parse_value(&raw, "VRP_MAX_GENERATIONS"))
                .transpose()?,
            output_path: get("VRP_OUTPUT_PATH").unwrap_or(defaults.output_path),
            locations_csv: get("VRP_LOCATIONS_CSV"),
            routes_csv: get("VRP_ROUTES_CSV"),
        };

        if settings.num_vehicles == 0 {
            return Err("VRP_NUM_VEHICLES must be at least 1".into());
        }
        if settings.time_limit_secs == 0 {
            return Err("VRP_TIME_LIMIT_SECS must be at least 1".into());
        }
        if settings.vehicle_capacity > constant::MAX_LOAD {
            return Err(format!("VRP_VEHICLE_CAPACITY must be at most {}", constant::MAX_LOAD).into());
        }

        Ok(settings)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T, Box<dyn Error>> {
    match raw {
        Some(raw) => parse_value(&raw, key),
        None => {
            debug!("{} not set, using default", key);
            Ok(default)
        }
    }
}

fn parse_value<T: FromStr>(raw: &str, key: &str) -> Result<T, Box<dyn Error>> {
    raw.parse::<T>()
        .map_err(|_| format!("Invalid value for {}: '{}'", key, raw).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.num_vehicles, 5);
        assert_eq!(settings.vehicle_capacity, 40);
        assert_eq!(settings.time_limit_secs, 30);
        assert_eq!(settings.output_path, "Singapore_route_map.html");
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_lookup(lookup(&[
            ("VRP_NUM_VEHICLES", "3"),
            ("VRP_VEHICLE_CAPACITY", " 55 "),
            ("VRP_MAX_GENERATIONS", "100"),
            ("VRP_ROUTES_CSV", "routes.csv"),
            ("VRP_LOCATIONS_CSV", ""),
        ]))
        .unwrap();

        assert_eq!(settings.num_vehicles, 3);
        assert_eq!(settings.vehicle_capacity, 55);
        assert_eq!(settings.max_generations, Some(100));
        assert_eq!(settings.routes_csv.as_deref(), Some("routes.csv"));
        assert_eq!(settings.locations_csv, None);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = Settings::from_lookup(lookup(&[("VRP_VEHICLE_CAPACITY", "forty")])).unwrap_err();
        assert!(err.to_string().contains("VRP_VEHICLE_CAPACITY"));

        assert!(Settings::from_lookup(lookup(&[("VRP_NUM_VEHICLES", "0")])).is_err());
    }

    #[test]
    fn capacity_beyond_solver_range_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("VRP_VEHICLE_CAPACITY", "2147483648")])).unwrap_err();
        assert!(err.to_string().contains("at most 2147483647"));

        let settings = Settings::from_lookup(lookup(&[("VRP_VEHICLE_CAPACITY", "2147483647")])).unwrap();
        assert_eq!(settings.vehicle_capacity, i32::MAX as u32);
    }
}
