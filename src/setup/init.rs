use tracing::{debug, info};

use crate::config::constant::DEPOT;
use crate::config::Settings;
use crate::distance::matrix::{create_dm, print_dist_matrix};
use crate::domain::types::{Fleet, Location, ProblemInstance};
use crate::fixtures::locations::load_locations;

/// Load locations and build the problem instance described by `settings`.
pub fn setup(settings: &Settings) -> ProblemInstance {
    let locations = load_locations(settings.locations_csv.as_deref());
    build_instance(locations, settings)
}

pub fn build_instance(locations: Vec<Location>, settings: &Settings) -> ProblemInstance {
    info!(
        "Starting setup with {} trucks (capacity {}), {} locations",
        settings.num_vehicles,
        settings.vehicle_capacity,
        locations.len()
    );

    let dm = create_dm(&locations);
    print_dist_matrix(&dm);

    let problem_instance = ProblemInstance {
        locations,
        distance_matrix: dm,
        fleet: Fleet {
            num_vehicles: settings.num_vehicles,
            capacity: settings.vehicle_capacity,
        },
        depot: DEPOT,
    };

    debug!(
        "Total demand {} against fleet capacity {}",
        problem_instance.total_demand(),
        problem_instance.fleet.total_capacity()
    );
    info!("Setup completed successfully");

    problem_instance
}
