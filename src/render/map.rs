use std::error::Error;
use std::fs;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, span, Level};

use super::template::ROUTE_MAP_HTML;
use crate::config::constant::VEHICLE_COLORS;
use crate::domain::types::{Location, ProblemInstance, RoutePlan};

const ZOOM_START: u8 = 12;

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Depot,
    Vip,
    Standard,
}

#[derive(Debug, Serialize)]
pub struct MarkerData {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub demand: u32,
    pub kind: MarkerKind,
    pub stop: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteLine {
    pub vehicle: usize,
    pub color: &'static str,
    pub coords: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize)]
pub struct MapPayload {
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<MarkerData>,
    pub routes: Vec<RouteLine>,
}

/// Colour of a 0-based vehicle, cycling through the palette.
pub fn vehicle_color(vehicle: usize) -> &'static str {
    VEHICLE_COLORS[vehicle % VEHICLE_COLORS.len()]
}

/// Mean coordinate of all locations.
pub fn map_center(locations: &[Location]) -> [f64; 2] {
    if locations.is_empty() {
        return [0.0, 0.0];
    }
    let n = locations.len() as f64;
    let lat = locations.iter().map(|l| l.latitude).sum::<f64>() / n;
    let lon = locations.iter().map(|l| l.longitude).sum::<f64>() / n;
    [lat, lon]
}

pub fn build_payload(pi: &ProblemInstance, plan: &RoutePlan) -> MapPayload {
    let mut stop_labels: Vec<Option<String>> = vec![None; pi.locations.len()];
    stop_labels[pi.depot] = Some("Stop #0 (Depot)".to_string());
    for route in &plan.routes {
        let inner = route.stops.iter().skip(1).take(route.num_stops());
        for (order, &idx) in inner.enumerate() {
            stop_labels[idx] = Some(format!("Vehicle {}, stop #{}", route.vehicle + 1, order + 1));
        }
    }

    let markers = pi
        .locations
        .iter()
        .zip(stop_labels)
        .enumerate()
        .map(|(idx, (loc, stop))| MarkerData {
            name: loc.name.clone(),
            lat: loc.latitude,
            lon: loc.longitude,
            demand: loc.demand,
            kind: if idx == pi.depot {
                MarkerKind::Depot
            } else if loc.vip {
                MarkerKind::Vip
            } else {
                MarkerKind::Standard
            },
            stop,
        })
        .collect();

    // only vehicles that leave the depot get a line
    let routes = plan
        .routes
        .iter()
        .filter(|route| !route.is_empty())
        .map(|route| RouteLine {
            vehicle: route.vehicle + 1,
            color: vehicle_color(route.vehicle),
            coords: route
                .stops
                .iter()
                .map(|&idx| [pi.locations[idx].latitude, pi.locations[idx].longitude])
                .collect(),
        })
        .collect();

    MapPayload {
        center: map_center(&pi.locations),
        zoom: ZOOM_START,
        markers,
        routes,
    }
}

fn legend_html(pi: &ProblemInstance) -> String {
    let mut legend = String::new();
    for vehicle in 0..pi.fleet.num_vehicles {
        legend.push_str(&format!(
            "    <i class=\"fa fa-circle\" style=\"color:{}\"></i> Vehicle {}<br>\n",
            vehicle_color(vehicle),
            vehicle + 1
        ));
    }
    legend.push_str("    <hr>\n    <b>Markers</b><br>\n");
    legend.push_str(&format!(
        "    <i class=\"fa fa-home\" style=\"color:red\"></i> Depot ({})<br>\n",
        escape_html(&pi.locations[pi.depot].name)
    ));
    for vip in pi.locations.iter().filter(|l| l.vip) {
        legend.push_str(&format!(
            "    <i class=\"fa fa-star\" style=\"color:orange\"></i> VIP ({})<br>\n",
            escape_html(&vip.name)
        ));
    }
    legend
}

/// Fill the page template. `generated_at` is shown under the title.
pub fn render_html(pi: &ProblemInstance, plan: &RoutePlan, generated_at: &str) -> Result<String, Box<dyn Error>> {
    let payload = build_payload(pi, plan);
    // keep "</script>" inside string values from closing the script block
    let json = serde_json::to_string(&payload)?.replace("</", "<\\/");

    let subtitle = format!(
        "{} Locations | {} Vehicles | Capacity {}",
        pi.locations.len(),
        pi.fleet.num_vehicles,
        pi.fleet.capacity
    );

    Ok(ROUTE_MAP_HTML
        .replace("__TITLE__", "Singapore VRP Optimization")
        .replace("__SUBTITLE__", &escape_html(&subtitle))
        .replace("__GENERATED__", &escape_html(generated_at))
        .replace("__LEGEND__", &legend_html(pi))
        .replace("__PAYLOAD__", &json))
}

/// Render the plan and write it to `output_path`.
pub fn create_map(pi: &ProblemInstance, plan: &RoutePlan, output_path: &str) -> Result<(), Box<dyn Error>> {
    let span = span!(Level::INFO, "render");
    let _guard = span.enter();

    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let html = render_html(pi, plan, &generated_at)?;
    debug!("Rendered {} bytes of HTML", html.len());

    fs::write(output_path, html)?;
    info!("Map saved to {}", output_path);
    Ok(())
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::domain::types::VehicleRoute;
    use crate::setup::init::build_instance;

    fn small_instance() -> ProblemInstance {
        let locations = vec![
            Location::new("Depot", 1.30, 103.70, 0),
            Location::new("A & B <Mart>", 1.31, 103.80, 5),
            Location::new("Bay", 1.28, 103.86, 7).vip(),
        ];
        let settings = Settings {
            num_vehicles: 2,
            ..Settings::default()
        };
        build_instance(locations, &settings)
    }

    fn plan() -> RoutePlan {
        RoutePlan {
            routes: vec![
                VehicleRoute {
                    vehicle: 0,
                    stops: vec![0, 2, 1, 0],
                },
                VehicleRoute::empty(1, 0),
            ],
            total_distance: 0,
        }
    }

    #[test]
    fn colors_cycle_after_five_vehicles() {
        assert_eq!(vehicle_color(0), "red");
        assert_eq!(vehicle_color(4), "orange");
        assert_eq!(vehicle_color(5), "red");
    }

    #[test]
    fn center_is_mean_coordinate() {
        let [lat, lon] = map_center(&small_instance().locations);
        assert!((lat - 1.29666).abs() < 1e-4);
        assert!((lon - 103.78666).abs() < 1e-4);
    }

    #[test]
    fn payload_draws_only_used_vehicles() {
        let pi = small_instance();
        let payload = build_payload(&pi, &plan());

        assert_eq!(payload.routes.len(), 1);
        assert_eq!(payload.routes[0].vehicle, 1);
        assert_eq!(payload.routes[0].color, "red");
        assert_eq!(payload.routes[0].coords.len(), 4);
        assert_eq!(payload.routes[0].coords[0], payload.routes[0].coords[3]);

        assert!(matches!(payload.markers[0].kind, MarkerKind::Depot));
        assert!(matches!(payload.markers[1].kind, MarkerKind::Standard));
        assert!(matches!(payload.markers[2].kind, MarkerKind::Vip));
        assert_eq!(payload.markers[2].stop.as_deref(), Some("Vehicle 1, stop #1"));
        assert_eq!(payload.markers[1].stop.as_deref(), Some("Vehicle 1, stop #2"));
    }

    #[test]
    fn html_contains_title_legend_and_data() {
        let pi = small_instance();
        let html = render_html(&pi, &plan(), "2026-01-01 08:00:00").unwrap();

        assert!(html.contains("Singapore VRP Optimization"));
        assert!(html.contains("3 Locations | 2 Vehicles | Capacity 40"));
        assert!(html.contains("Generated 2026-01-01 08:00:00"));
        assert!(html.contains("Vehicle 2<br>"));
        assert!(html.contains("VIP (Bay)"));
        assert!(html.contains("\"kind\":\"vip\""));
        assert!(!html.contains("__PAYLOAD__"));
        assert!(!html.contains("__LEGEND__"));
    }

    #[test]
    fn names_are_escaped() {
        assert_eq!(escape_html("A & B <Mart>"), "A &amp; B &lt;Mart&gt;");

        let mut pi = small_instance();
        pi.locations[0].name = "Hub</script>".to_string();
        let html = render_html(&pi, &plan(), "now").unwrap();
        assert!(!html.contains("Hub</script>"));
        assert!(html.contains("Depot (Hub&lt;/script&gt;)"));
    }
}
