//! # Sun-synchronous orbit design
//!
//! A Sun-synchronous orbit has its ascending node drifting eastward at the mean angular speed of
//! the Sun, so that the local time of the nodes stays constant. With the J2 secular theory of
//! [`j2_secular_rates`] the condition `Ω̇(a, e, i) = 2π / tropical year` links the semi-major
//! axis, the eccentricity and the inclination; the functions below solve it for the inclination
//! or for the semi-major axis with Newton-Raphson.
//!
//! The local time of the ascending node (LTAN) or of the descending node (LTDN) and the RAAN are
//! related through the right ascension of the mean Sun:
//!
//! ```text
//! Ω = α☉ + EoT + (LTAN − 12h) · 15°/h
//! ```

use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::constants::{
    JulianDate, Meter, Radian, DPI, EARTH_GRAV_PARAM, EARTH_GRAV_RADIUS, EARTH_J2, RADH,
    SECONDS_PER_DAY, SUN_SYNC_NODAL_RATE,
};
use crate::kepler::principal_angle;
use crate::mission_errors::MissionError;
use crate::propagator::j2_secular_rates;
use crate::sun::{equation_of_time, sun_position};

/// Right ascension of the mean Sun, radians.
fn mean_sun_right_ascension(jd: JulianDate) -> Radian {
    let s = sun_position(jd);
    s.y.atan2(s.x) + equation_of_time(jd)
}

/// RAAN giving the local time of the ascending node `ltan` (hours) at `jd`.
pub fn ltan_to_raan(ltan: f64, jd: JulianDate) -> Radian {
    principal_angle(mean_sun_right_ascension(jd) + (ltan - 12.0) * RADH)
}

/// RAAN giving the local time of the descending node `ltdn` (hours) at `jd`.
pub fn ltdn_to_raan(ltdn: f64, jd: JulianDate) -> Radian {
    ltan_to_raan((ltdn + 12.0).rem_euclid(24.0), jd)
}

/// Local time of the ascending node (hours, in [0, 24)) of an orbit with the given RAAN at `jd`.
pub fn raan_to_ltan(raan: Radian, jd: JulianDate) -> f64 {
    (12.0 + (raan - mean_sun_right_ascension(jd)) / RADH).rem_euclid(24.0)
}

/// J2 secular drift of the RAAN, rad/s.
pub fn nodal_precession_rate(semi_major_axis: Meter, eccentricity: f64, inclination: Radian) -> f64 {
    j2_secular_rates(semi_major_axis, eccentricity, inclination).1
}

/// Relative mismatch between the nodal drift and the Sun-synchronous drift.
fn sun_sync_residual(semi_major_axis: Meter, eccentricity: f64, inclination: Radian) -> f64 {
    nodal_precession_rate(semi_major_axis, eccentricity, inclination) / SUN_SYNC_NODAL_RATE - 1.0
}

fn check_eccentricity(eccentricity: f64) -> Result<(), MissionError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(MissionError::InvalidArgument(format!(
            "eccentricity must be in [0, 1), got {eccentricity}"
        )));
    }
    Ok(())
}

fn newton(x0: f64, f: impl Fn(f64) -> f64, step: f64) -> Result<f64, MissionError> {
    let df = |x: f64| (f(x + step) - f(x - step)) / (2.0 * step);
    let mut tol = SimpleConvergency {
        eps: 1e-12,
        max_iter: 50,
    };
    Ok(find_root_newton_raphson(x0, &f, &df, &mut tol)?)
}

/// Inclination of the Sun-synchronous orbit with the given semi-major axis and eccentricity.
///
/// Arguments
/// ---------
/// * `semi_major_axis`: meters
/// * `eccentricity`: `0 ≤ e < 1`
///
/// Return
/// ------
/// * the inclination in radians, or [`MissionError::NoSunSyncSolution`] when the orbit is too
///   high for J2 to drift the node fast enough
pub fn sun_sync_inclination(semi_major_axis: Meter, eccentricity: f64) -> Result<Radian, MissionError> {
    check_eccentricity(eccentricity)?;
    if semi_major_axis * (1.0 - eccentricity) <= EARTH_GRAV_RADIUS {
        return Err(MissionError::InvalidArgument(format!(
            "perigee below the Earth surface for a = {semi_major_axis} m, e = {eccentricity}"
        )));
    }

    // without the mean motion correction: Ω̇ = −3/2 n k cos i
    let p = semi_major_axis * (1.0 - eccentricity * eccentricity);
    let n0 = (EARTH_GRAV_PARAM / semi_major_axis.powi(3)).sqrt();
    let k = EARTH_J2 * (EARTH_GRAV_RADIUS / p).powi(2);
    let cos_i0 = -SUN_SYNC_NODAL_RATE / (1.5 * n0 * k);
    if cos_i0.abs() > 1.0 {
        return Err(MissionError::NoSunSyncSolution(format!(
            "a = {semi_major_axis} m is too high for a Sun-synchronous orbit"
        )));
    }

    let inclination = newton(
        cos_i0.acos(),
        |i| sun_sync_residual(semi_major_axis, eccentricity, i),
        1e-7,
    )?;

    if !(0.0..=std::f64::consts::PI).contains(&inclination) {
        return Err(MissionError::NoSunSyncSolution(format!(
            "inclination solution {inclination} rad out of range"
        )));
    }
    Ok(inclination)
}

/// Semi-major axis of the Sun-synchronous orbit with the given inclination and eccentricity.
///
/// Only retrograde orbits (`i > 90°`) can be Sun-synchronous.
pub fn sun_sync_semi_major_axis(inclination: Radian, eccentricity: f64) -> Result<Meter, MissionError> {
    check_eccentricity(eccentricity)?;
    let cos_i = inclination.cos();
    if cos_i >= 0.0 {
        return Err(MissionError::NoSunSyncSolution(format!(
            "inclination {:.3}° is not retrograde",
            inclination.to_degrees()
        )));
    }

    // Ω̇ ∝ a^(−7/2) without the mean motion correction
    let a0 = (-1.5 * EARTH_GRAV_PARAM.sqrt() * EARTH_J2 * EARTH_GRAV_RADIUS.powi(2) * cos_i
        / ((1.0 - eccentricity * eccentricity).powi(2) * SUN_SYNC_NODAL_RATE))
        .powf(2.0 / 7.0);

    let semi_major_axis = newton(
        a0,
        |a| sun_sync_residual(a, eccentricity, inclination),
        a0 * 1e-7,
    )?;

    if semi_major_axis * (1.0 - eccentricity) <= EARTH_GRAV_RADIUS {
        return Err(MissionError::NoSunSyncSolution(format!(
            "solution a = {semi_major_axis:.1} m has its perigee inside the Earth"
        )));
    }
    Ok(semi_major_axis)
}

/// Number of days for the RAAN to drift by a full turn with respect to the Sun-synchronous
/// condition, a measure of how far an orbit is from Sun-synchronism. Infinite for an exact
/// Sun-synchronous orbit.
pub fn local_time_drift_period(semi_major_axis: Meter, eccentricity: f64, inclination: Radian) -> f64 {
    let drift = nodal_precession_rate(semi_major_axis, eccentricity, inclination) - SUN_SYNC_NODAL_RATE;
    DPI / drift.abs() / SECONDS_PER_DAY
}

#[cfg(test)]
mod sun_sync_test {
    use super::*;
    use crate::constants::RADEG;
    use crate::time::date_to_jd;
    use approx::assert_relative_eq;

    #[test]
    fn test_ltdn_to_raan() {
        let jd = date_to_jd(2021, 1, 1, 0, 0, 0);
        assert_relative_eq!(ltdn_to_raan(10.5, jd) / RADEG, 78.369, epsilon = 0.01);
        assert_relative_eq!(ltdn_to_raan(10.5, jd), ltan_to_raan(22.5, jd), epsilon = 1e-15);
    }

    #[test]
    fn test_raan_ltan_round_trip() {
        let jd = date_to_jd(2021, 6, 15, 12, 0, 0);
        for ltan in [0.5, 6.0, 10.5, 13.25, 22.0] {
            assert_relative_eq!(raan_to_ltan(ltan_to_raan(ltan, jd), jd), ltan, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sun_sync_inclination() {
        let i = sun_sync_inclination(7130.982e3, 0.001111).unwrap();
        assert_relative_eq!(i / RADEG, 98.4106, epsilon = 1e-3);
        assert_relative_eq!(
            nodal_precession_rate(7130.982e3, 0.001111, i),
            SUN_SYNC_NODAL_RATE,
            max_relative = 1e-10
        );
    }

    #[test]
    fn test_sun_sync_semi_major_axis() {
        let a = sun_sync_semi_major_axis(98.405 * RADEG, 0.001111).unwrap();
        assert_relative_eq!(a, 7129.63e3, epsilon = 1.0);

        let i = sun_sync_inclination(a, 0.001111).unwrap();
        assert_relative_eq!(i, 98.405 * RADEG, epsilon = 1e-8);
    }

    #[test]
    fn test_no_solution() {
        assert!(matches!(
            sun_sync_semi_major_axis(60.0 * RADEG, 0.0),
            Err(MissionError::NoSunSyncSolution(_))
        ));
        assert!(matches!(
            sun_sync_inclination(15_000e3, 0.0),
            Err(MissionError::NoSunSyncSolution(_))
        ));
        assert!(matches!(
            sun_sync_inclination(6_000e3, 0.0),
            Err(MissionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_local_time_drift_period() {
        let i = sun_sync_inclination(7_000e3, 0.0).unwrap();
        assert!(local_time_drift_period(7_000e3, 0.0, i) > 1e6);
        // one degree off: a full turn of local time in about eight years
        let drift = local_time_drift_period(7_000e3, 0.0, i + RADEG);
        assert!(drift > 2000.0 && drift < 4000.0);
    }
}
