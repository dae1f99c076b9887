use colored::*;

use crate::domain::types::{ProblemInstance, RoutePlan, VehicleRoute};
use crate::evaluation::capacity::route_load;
use crate::evaluation::fitness::{find_distance, to_km};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn print_banner(pi: &ProblemInstance) {
    println!("{}", rule());
    println!("{}", "Singapore logistics route optimisation (VRP)".bold());
    println!("{}", rule());
    println!("Locations:        {}", pi.locations.len());
    println!("Vehicles:         {}", pi.fleet.num_vehicles);
    println!("Vehicle capacity: {}", pi.fleet.capacity);
    println!("{}", rule());
}

pub fn print_stage(message: &str) {
    println!("{} {}", "->".cyan(), message);
}

/// One summary line per used vehicle, e.g. `Vehicle 2: 5 stops, 31.42 km`.
pub fn vehicle_line(route: &VehicleRoute, pi: &ProblemInstance) -> String {
    format!(
        "Vehicle {}: {} stops, {:.2} km (load {}/{})",
        route.vehicle + 1,
        route.num_stops(),
        to_km(find_distance(route, &pi.distance_matrix)),
        route_load(route, &pi.locations, pi.depot),
        pi.fleet.capacity
    )
}

pub fn print_solution(plan: &RoutePlan, pi: &ProblemInstance, output_path: &str) {
    println!();
    println!("{}", "Optimisation complete".green().bold());
    println!("{}", rule());

    for route in plan.routes.iter().filter(|r| !r.is_empty()) {
        println!("{}", vehicle_line(route, pi));
    }
    let unused = plan.routes.iter().filter(|r| r.is_empty()).count();
    if unused > 0 {
        println!("{}", format!("{} vehicle(s) unused", unused).bright_black());
    }

    println!("{}", rule());
    println!(
        "{}",
        format!("Total distance: {:.2} km", to_km(plan.total_distance)).green()
    );
    println!("Map file: {}", output_path);
    println!("Open {} in a browser to view the interactive map", output_path);
    println!("{}", rule());
}

pub fn print_no_solution(unassigned: &[usize], pi: &ProblemInstance) {
    println!();
    println!("{}", "No solution found".red().bold());
    println!(
        "{}",
        format!(
            "{} of {} locations could not be assigned (total demand {}, fleet capacity {})",
            unassigned.len(),
            pi.customers().count(),
            pi.total_demand(),
            pi.fleet.total_capacity()
        )
        .red()
    );
    println!("No map was written.");
}
