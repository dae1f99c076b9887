pub mod engine;

use std::error::Error;

use tracing::{info, span, warn, Level};

use crate::config::Settings;
use crate::domain::solution::{assemble_plan, unassigned_customers};
use crate::domain::types::{ProblemInstance, SolveOutcome};
use crate::evaluation::capacity::{capacity_shortfall, CapacityShortfall};
use engine::{run_solver, SearchLimits};

/// Solve the instance, or report that no feasible assignment exists.
///
/// Instances that cannot fit in the fleet are rejected before the solver
/// runs. A solver answer that leaves any location unserved is reported as
/// [`SolveOutcome::NoSolution`].
pub fn solve(pi: &ProblemInstance, settings: &Settings) -> Result<SolveOutcome, Box<dyn Error>> {
    let span = span!(Level::INFO, "solve");
    let _guard = span.enter();

    if let Some(shortfall) = capacity_shortfall(pi) {
        match shortfall {
            CapacityShortfall::Fleet {
                total_demand,
                total_capacity,
            } => warn!(
                "Total fleet capacity ({}) is less than total demand ({}), no feasible routing exists",
                total_capacity, total_demand
            ),
            CapacityShortfall::Oversized {
                location,
                demand,
                capacity,
            } => warn!(
                "Location {} ({}) demands {} which exceeds vehicle capacity {}",
                location, pi.locations[location].name, demand, capacity
            ),
        }
        return Ok(SolveOutcome::NoSolution {
            unassigned: pi.customers().collect(),
        });
    }

    let limits = SearchLimits {
        max_time_secs: settings.time_limit_secs,
        max_generations: settings.max_generations,
    };
    let raw = run_solver(pi, limits).map_err(|err| format!("Solver failed: {}", err))?;
    info!(
        "Solver finished: {} tours, {} unassigned, cost {:.0}",
        raw.tours.len(),
        raw.unassigned,
        raw.cost
    );

    let unassigned = unassigned_customers(&raw.tours, pi);
    if raw.unassigned > 0 || !unassigned.is_empty() {
        warn!("Solver left {} locations unassigned", unassigned.len().max(raw.unassigned));
        return Ok(SolveOutcome::NoSolution { unassigned });
    }

    let plan = assemble_plan(raw.tours, pi)?;
    Ok(SolveOutcome::Solved(plan))
}
