use rayon::prelude::*;
use tracing::{debug, info};

use super::haversine::haversine_distance;
use crate::domain::types::{DistanceMatrix, Location};

/// Create the distance matrix (whole meters, truncated) for the given locations.
///
/// Only the upper triangle is computed; the lower triangle mirrors it so the
/// result is exactly symmetric with a zero diagonal.
pub fn create_dm(locations: &[Location]) -> DistanceMatrix {
    let n = locations.len();
    info!("Creating haversine distance matrix for {} locations", n);

    let mut dm: DistanceMatrix = (0..n)
        .into_par_iter()
        .map(|i| {
            (0..n)
                .map(|j| {
                    if j <= i {
                        0
                    } else {
                        let (a, b) = (&locations[i], &locations[j]);
                        haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude) as u64
                    }
                })
                .collect::<Vec<u64>>()
        })
        .collect();

    for i in 0..n {
        for j in 0..i {
            dm[i][j] = dm[j][i];
        }
    }

    dm
}

/// Flatten row-major into the layout the solver's transport cost expects.
pub fn flatten(dm: &DistanceMatrix) -> Vec<f64> {
    dm.iter().flatten().map(|&d| d as f64).collect()
}

// Print distance matrix for debugging
pub fn print_dist_matrix(dm: &DistanceMatrix) {
    debug!("Distance matrix:");
    for row in dm {
        debug!("{:?}", row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::locations::singapore_locations;

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let locations = singapore_locations();
        let dm = create_dm(&locations);

        assert_eq!(dm.len(), locations.len());
        for i in 0..dm.len() {
            assert_eq!(dm[i].len(), locations.len());
            assert_eq!(dm[i][i], 0);
            for j in 0..dm.len() {
                assert_eq!(dm[i][j], dm[j][i], "asymmetry at ({i}, {j})");
            }
        }
    }

    #[test]
    fn entries_are_truncated_haversine_meters() {
        let locations = singapore_locations();
        let dm = create_dm(&locations);
        let (a, b) = (&locations[0], &locations[1]);
        let exact = haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude);

        assert_eq!(dm[0][1], exact.trunc() as u64);
        assert!(dm[0][1] > 0);
    }

    #[test]
    fn flatten_is_row_major() {
        let dm = vec![vec![0, 1], vec![2, 0]];
        assert_eq!(flatten(&dm), vec![0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn single_location_gives_one_by_one_zero() {
        let dm = create_dm(&[Location::new("only", 1.3, 103.8, 0)]);
        assert_eq!(dm, vec![vec![0]]);
    }
}
