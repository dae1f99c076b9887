use std::error::Error;

use tracing::{info, span, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Settings;
use crate::domain::types::SolveOutcome;
use crate::render::map::create_map;
use crate::report::console::{print_banner, print_no_solution, print_solution, print_stage};
use crate::report::export::save_to_csv;
use crate::setup::init::setup;
use crate::solver::solve;

/// Initialize tracing and environment
fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE))
        .try_init()?;
    Ok(())
}

/// Entry point of the binary: settings from the environment, then the full pipeline.
pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;
    let settings = Settings::from_env()?;
    run_with_settings(&settings)?;
    Ok(())
}

/// Setup, solve, then render and report. A missing solution is reported on
/// the console and returned, not raised.
pub fn run_with_settings(settings: &Settings) -> Result<SolveOutcome, Box<dyn Error>> {
    let problem_instance = {
        let span = span!(Level::INFO, "setup");
        let _guard = span.enter();
        setup(settings)
    };
    print_banner(&problem_instance);

    print_stage(&format!(
        "Solving VRP (time limit {}s)...",
        settings.time_limit_secs
    ));
    let outcome = solve(&problem_instance, settings)?;

    match &outcome {
        SolveOutcome::Solved(plan) => {
            print_stage("Generating map...");
            create_map(&problem_instance, plan, &settings.output_path)?;

            if let Some(routes_csv) = &settings.routes_csv {
                save_to_csv(plan, &problem_instance, routes_csv)?;
                print_stage(&format!("Routes exported to {}", routes_csv));
            }

            print_solution(plan, &problem_instance, &settings.output_path);
        }
        SolveOutcome::NoSolution { unassigned } => {
            info!("No feasible solution, skipping map rendering");
            print_no_solution(unassigned, &problem_instance);
        }
    }

    Ok(outcome)
}
