use crate::config::constant::EARTH_RADIUS_KM;

/// Great-circle distance in meters between two `(lat, lon)` points given in degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // rounding can push `a` just outside [0, 1] for near-antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn identical_points_are_zero_apart() {
        assert_eq!(haversine_distance(1.3404, 103.7090, 1.3404, 103.7090), 0.0);
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let expected = PI * EARTH_RADIUS_KM * 1000.0;
        let d = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!((d - expected).abs() < 1.0, "got {d}, expected {expected}");

        let d = haversine_distance(1.3, 103.8, -1.3, -76.2);
        assert!((d - expected).abs() < 1.0, "got {d}, expected {expected}");
    }

    #[test]
    fn depot_to_changi_is_about_31_km() {
        let d = haversine_distance(1.3404, 103.7090, 1.3644, 103.9915);
        assert!(d > 31_000.0 && d < 32_100.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric_in_magnitude() {
        let ab = haversine_distance(1.2834, 103.8607, 1.4360, 103.7860);
        let ba = haversine_distance(1.4360, 103.7860, 1.2834, 103.8607);
        assert!((ab - ba).abs() < 1e-6);
    }
}
