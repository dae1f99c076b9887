use std::sync::Arc;

use tracing::{debug, info};
use vrp_core::prelude::*;

use crate::distance::matrix::flatten;
use crate::domain::types::ProblemInstance;

/// Search budget handed to the solver.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub max_time_secs: usize,
    pub max_generations: Option<usize>,
}

/// Raw solver answer: location sequences per used tour and how many jobs stayed unassigned.
#[derive(Debug, Clone)]
pub struct RawSolution {
    pub tours: Vec<Vec<usize>>,
    pub unassigned: usize,
    pub cost: f64,
}

/// Describe the instance to `vrp-core`, run the search and return its best solution.
pub fn run_solver(pi: &ProblemInstance, limits: SearchLimits) -> GenericResult<RawSolution> {
    let transport = Arc::new(define_routing_data(pi)?);
    let goal = define_goal(transport.clone())?;
    let problem = Arc::new(define_problem(pi, goal, transport)?);

    let environment = Arc::new(Environment {
        logger: Arc::new(|msg: &str| debug!(target: "vrp_core", "{}", msg)),
        ..Environment::new_with_time_quota(Some(limits.max_time_secs))
    });

    info!(
        "Running solver: max {}s, max generations {:?}",
        limits.max_time_secs, limits.max_generations
    );

    let config = VrpConfigBuilder::new(problem.clone())
        .set_environment(environment)
        .prebuild()?
        .with_max_time(Some(limits.max_time_secs))
        .with_max_generations(limits.max_generations)
        .build()?;

    let solution = Solver::new(problem, config).solve()?;

    let tours = solution
        .get_locations()
        .map(Iterator::collect::<Vec<_>>)
        .collect::<Vec<_>>();

    Ok(RawSolution {
        tours,
        unassigned: solution.unassigned.len(),
        cost: solution.cost,
    })
}

/// Same matrix for durations and distances; time is not constrained.
fn define_routing_data(pi: &ProblemInstance) -> GenericResult<impl TransportCost> {
    let distances = flatten(&pi.distance_matrix);
    let durations = distances.clone();

    SimpleTransportCost::new(durations, distances)
}

/// Minimise unassigned jobs first, then distance, under the capacity constraint.
fn define_goal(transport: Arc<dyn TransportCost + Send + Sync>) -> GenericResult<GoalContext> {
    let minimize_unassigned = MinimizeUnassignedBuilder::new("min-unassigned").build()?;
    let capacity_feature = CapacityFeatureBuilder::<SingleDimLoad>::new("capacity").build()?;
    let transport_feature = TransportFeatureBuilder::new("min-distance")
        .set_transport_cost(transport)
        .set_time_constrained(false)
        .build_minimize_distance()?;

    GoalContextBuilder::with_features(&[minimize_unassigned, transport_feature, capacity_feature])?.build()
}

/// One delivery job per customer and identical vehicles based at the depot.
fn define_problem(
    pi: &ProblemInstance,
    goal: GoalContext,
    transport: Arc<dyn TransportCost + Send + Sync>,
) -> GenericResult<Problem> {
    let capacity = load_units(pi.fleet.capacity, "vehicle capacity")?;

    let jobs = pi
        .customers()
        .map(|idx| {
            let location = &pi.locations[idx];
            SingleBuilder::default()
                .id(format!("loc{idx}").as_str())
                .demand(Demand::delivery(load_units(location.demand, &location.name)?))
                .location(idx)?
                .build_as_job()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let vehicles = (1..=pi.fleet.num_vehicles)
        .map(|idx| {
            VehicleBuilder::default()
                .id(format!("vehicle{idx}").as_str())
                .add_detail(
                    VehicleDetailBuilder::default()
                        .set_start_location(pi.depot)
                        .set_end_location(pi.depot)
                        .build()?,
                )
                .capacity(SingleDimLoad::new(capacity))
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Defined {} jobs and {} vehicles", jobs.len(), vehicles.len());

    ProblemBuilder::default()
        .add_jobs(jobs.into_iter())
        .add_vehicles(vehicles.into_iter())
        .with_goal(goal)
        .with_transport_cost(transport)
        .build()
}

/// Demands and capacities are `i32` inside the solver.
fn load_units(value: u32, what: &str) -> GenericResult<i32> {
    i32::try_from(value).map_err(|_| format!("Load {} for {} does not fit the solver's range", value, what).into())
}
