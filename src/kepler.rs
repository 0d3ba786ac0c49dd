use super::constants::DPI;
use std::f64::consts::PI;

/// Principal value of an angle in radians, in [0, 2π).
pub(crate) fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Principal value of an angle in radians, in [−π, π).
fn signed_angle(a: f64) -> f64 {
    let a = principal_angle(a);
    if a >= PI {
        a - DPI
    } else {
        a
    }
}

/// Solve Kepler's equation `E − e·sin E = M` for an elliptic orbit.
///
/// Newton iteration started from `E₀ = M + e·sin M`, which converges in a handful of
/// steps for the small eccentricities of planetary orbits.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` in radians (any range).
/// * `eccentricity`: eccentricity `e`, with `0 ≤ e < 1`.
///
/// Return
/// ------
/// * `Some(E)` the eccentric anomaly in radians, in [−π, π), or `None` when the iteration
///   does not converge (only possible for `e` close to 1).
pub(crate) fn solve_kepler_equation(mean_anomaly: f64, eccentricity: f64) -> Option<f64> {
    const ITMAX: usize = 50;
    const CONTR: f64 = 1e-14;

    let m = signed_angle(mean_anomaly);
    let mut ecc_anomaly = m + eccentricity * m.sin();

    for _ in 0..ITMAX {
        let f = ecc_anomaly - eccentricity * ecc_anomaly.sin() - m;
        let fp = 1.0 - eccentricity * ecc_anomaly.cos();
        let delta = f / fp;
        ecc_anomaly -= delta;
        if delta.abs() < CONTR {
            return Some(ecc_anomaly);
        }
    }

    None
}
