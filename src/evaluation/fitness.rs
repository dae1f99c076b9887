use itertools::Itertools;

use crate::domain::types::{DistanceMatrix, VehicleRoute};

/// Length of a single vehicle route in meters, following its stops in order.
pub fn find_distance(route: &VehicleRoute, dm: &DistanceMatrix) -> u64 {
    route
        .stops
        .iter()
        .tuple_windows()
        .map(|(&from, &to)| dist_between(from, to, dm))
        .sum()
}

pub fn total_distance(routes: &[VehicleRoute], dm: &DistanceMatrix) -> u64 {
    routes.iter().map(|route| find_distance(route, dm)).sum()
}

pub fn dist_between(from_loc: usize, to_loc: usize, dm: &DistanceMatrix) -> u64 {
    dm[from_loc][to_loc]
}

/// Meters to kilometers for display.
pub fn to_km(meters: u64) -> f64 {
    meters as f64 / 1000.0
}
