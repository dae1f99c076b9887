use serde::Deserialize;

/// A named delivery point. Index 0 of an instance is the depot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    pub demand: u32,
    #[serde(default)]
    pub vip: bool,
}

impl Location {
    pub fn new(name: &str, latitude: f64, longitude: f64, demand: u32) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
            demand,
            vip: false,
        }
    }

    pub fn vip(mut self) -> Self {
        self.vip = true;
        self
    }
}

/// Dense distance matrix in whole meters.
pub type DistanceMatrix = Vec<Vec<u64>>;

/// Identical vehicles sharing one capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fleet {
    pub num_vehicles: usize,
    pub capacity: u32,
}

impl Fleet {
    pub fn total_capacity(&self) -> u64 {
        self.num_vehicles as u64 * self.capacity as u64
    }
}

#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub locations: Vec<Location>,
    pub distance_matrix: DistanceMatrix,
    pub fleet: Fleet,
    pub depot: usize,
}

impl ProblemInstance {
    pub fn total_demand(&self) -> u64 {
        self.locations
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != self.depot)
            .map(|(_, loc)| loc.demand as u64)
            .sum()
    }

    /// Indices of every location a vehicle must visit.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.locations.len()).filter(move |idx| *idx != self.depot)
    }
}

/// Stops of one vehicle, depot first and last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRoute {
    pub vehicle: usize,
    pub stops: Vec<usize>,
}

impl VehicleRoute {
    pub fn empty(vehicle: usize, depot: usize) -> Self {
        Self {
            vehicle,
            stops: vec![depot, depot],
        }
    }

    /// Number of customer visits, depot excluded.
    pub fn num_stops(&self) -> usize {
        self.stops.len().saturating_sub(2)
    }

    pub fn is_empty(&self) -> bool {
        self.num_stops() == 0
    }
}

/// Solved routes for the whole fleet.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub routes: Vec<VehicleRoute>,
    pub total_distance: u64,
}

#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Solved(RoutePlan),
    NoSolution { unassigned: Vec<usize> },
}
