use crate::domain::types::{Location, ProblemInstance, VehicleRoute};

/// Sum of demands served by a route. The depot contributes nothing.
pub fn route_load(route: &VehicleRoute, locations: &[Location], depot: usize) -> u64 {
    route
        .stops
        .iter()
        .filter(|&&idx| idx != depot)
        .map(|&idx| locations[idx].demand as u64)
        .sum()
}

/// Load above capacity, zero when the route fits.
pub fn excess(load: u64, capacity: u32) -> u64 {
    load.saturating_sub(capacity as u64)
}

/// Reasons the fleet can never serve every location, whatever the routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityShortfall {
    Fleet { total_demand: u64, total_capacity: u64 },
    Oversized { location: usize, demand: u32, capacity: u32 },
}

/// Cheap necessary conditions for a feasible assignment.
pub fn capacity_shortfall(pi: &ProblemInstance) -> Option<CapacityShortfall> {
    if let Some(location) = pi
        .customers()
        .find(|&idx| pi.locations[idx].demand > pi.fleet.capacity)
    {
        return Some(CapacityShortfall::Oversized {
            location,
            demand: pi.locations[location].demand,
            capacity: pi.fleet.capacity,
        });
    }

    let total_demand = pi.total_demand();
    let total_capacity = pi.fleet.total_capacity();
    if total_demand > total_capacity {
        return Some(CapacityShortfall::Fleet {
            total_demand,
            total_capacity,
        });
    }

    None
}
