//! Anomaly conversions and Kepler's equation for elliptic orbits.

use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::constants::{Radian, DPI};
use crate::mission_errors::MissionError;

/// Principal value of an angle, in [0, 2π).
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Solve Kepler's equation `E − e·sin(E) = M` for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M`, radians (any range)
/// * `eccentricity`: `0 ≤ e < 1`
///
/// Return
/// ------
/// * the eccentric anomaly in [0, 2π), or the Newton-Raphson failure
pub fn solve_kepler_equation(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, MissionError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(MissionError::InvalidOrbit(format!(
            "Kepler's equation requires 0 <= e < 1, got e = {eccentricity}"
        )));
    }

    let m = principal_angle(mean_anomaly);

    let f = |ecc_anom: f64| -> f64 { ecc_anom - eccentricity * ecc_anom.sin() - m };
    let df = |ecc_anom: f64| -> f64 { 1.0 - eccentricity * ecc_anom.cos() };

    // starting at π keeps Newton monotone for high eccentricities
    let x0 = if eccentricity < 0.8 {
        m + eccentricity * m.sin()
    } else {
        std::f64::consts::PI
    };

    let mut tol = SimpleConvergency {
        eps: f64::EPSILON * 1e2,
        max_iter: 50,
    };

    Ok(principal_angle(find_root_newton_raphson(x0, &f, &df, &mut tol)?))
}

/// Eccentric anomaly from the true anomaly.
pub fn true_to_eccentric_anomaly(true_anomaly: Radian, eccentricity: f64) -> Radian {
    let half = true_anomaly / 2.0;
    principal_angle(
        2.0 * ((1.0 - eccentricity).sqrt() * half.sin())
            .atan2((1.0 + eccentricity).sqrt() * half.cos()),
    )
}

/// True anomaly from the eccentric anomaly.
pub fn eccentric_to_true_anomaly(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let half = eccentric_anomaly / 2.0;
    principal_angle(
        2.0 * ((1.0 + eccentricity).sqrt() * half.sin())
            .atan2((1.0 - eccentricity).sqrt() * half.cos()),
    )
}

/// Mean anomaly from the true anomaly.
pub fn true_to_mean_anomaly(true_anomaly: Radian, eccentricity: f64) -> Radian {
    let ecc_anom = true_to_eccentric_anomaly(true_anomaly, eccentricity);
    principal_angle(ecc_anom - eccentricity * ecc_anom.sin())
}

/// True anomaly from the mean anomaly.
pub fn mean_to_true_anomaly(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, MissionError> {
    let ecc_anom = solve_kepler_equation(mean_anomaly, eccentricity)?;
    Ok(eccentric_to_true_anomaly(ecc_anom, eccentricity))
}
