//! # Keplerian orbital elements
//!
//! This module defines [`KeplerianElements`], the element set consumed by the propagators and by
//! the orbit design routines of this crate.
//!
//! ## Units
//!
//! - Lengths: **meters**
//! - Angles: **radians**
//! - Epoch: **Julian Date**, UTC
//!
//! ## Degeneracies
//!
//! For circular orbits the argument of perigee is undefined and for equatorial orbits the right
//! ascension of the ascending node is undefined; both are then conventional and only their sum
//! with the true anomaly matters. The state vector computation below is insensitive to that
//! choice.

use nalgebra::Vector3;
use std::fmt;

use crate::constants::{JulianDate, Meter, Radian, Second, DPI, EARTH_GRAV_PARAM};
use crate::kepler::{principal_angle, true_to_mean_anomaly};
use crate::mission_errors::MissionError;
use crate::ref_system::{rotation, Axis};

/// Keplerian orbital elements around the Earth.
///
/// Units
/// -----
/// * `epoch`: Julian Date (UTC).
/// * `semi_major_axis`: meters.
/// * `eccentricity`: unitless.
/// * `inclination`: radians.
/// * `raan`: right ascension of the ascending node, radians (Ω).
/// * `arg_of_perigee`: radians (ω).
/// * `true_anomaly`: radians (f).
///
/// See also
/// --------
/// * [`SecularPropagator`](crate::propagator::SecularPropagator) – propagates these elements.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct KeplerianElements {
    pub epoch: JulianDate,
    pub semi_major_axis: Meter,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub raan: Radian,
    pub arg_of_perigee: Radian,
    pub true_anomaly: Radian,
}

impl KeplerianElements {
    /// Check that the elements describe a bound, non-degenerate orbit.
    ///
    /// Return
    /// ------
    /// * `Ok(())` when `a > 0`, `0 ≤ e < 1`, `0 ≤ i ≤ π` and every field is finite,
    ///   [`MissionError::InvalidOrbit`] otherwise.
    pub fn validate(&self) -> Result<(), MissionError> {
        let fields = [
            self.epoch,
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.raan,
            self.arg_of_perigee,
            self.true_anomaly,
        ];
        if fields.iter().any(|x| !x.is_finite()) {
            return Err(MissionError::InvalidOrbit(
                "orbital elements must be finite".into(),
            ));
        }
        if self.semi_major_axis <= 0.0 {
            return Err(MissionError::InvalidOrbit(format!(
                "semi-major axis must be positive, got {} m",
                self.semi_major_axis
            )));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(MissionError::InvalidOrbit(format!(
                "eccentricity must be in [0, 1), got {}",
                self.eccentricity
            )));
        }
        if !(0.0..=std::f64::consts::PI).contains(&self.inclination) {
            return Err(MissionError::InvalidOrbit(format!(
                "inclination must be in [0, π], got {} rad",
                self.inclination
            )));
        }
        Ok(())
    }

    /// Unperturbed mean motion `n = sqrt(μ / a³)`, rad/s.
    pub fn mean_motion(&self) -> f64 {
        (EARTH_GRAV_PARAM / self.semi_major_axis.powi(3)).sqrt()
    }

    /// Keplerian period, seconds.
    pub fn period(&self) -> Second {
        DPI / self.mean_motion()
    }

    /// Mean anomaly corresponding to the true anomaly, radians.
    pub fn mean_anomaly(&self) -> Radian {
        true_to_mean_anomaly(self.true_anomaly, self.eccentricity)
    }

    /// Semi-latus rectum `p = a (1 − e²)`, meters.
    pub fn semi_latus_rectum(&self) -> Meter {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
    }

    /// Unit vector along the orbital angular momentum, in the inertial frame of the elements.
    pub fn orbit_normal(&self) -> Vector3<f64> {
        let (sin_i, cos_i) = self.inclination.sin_cos();
        let (sin_raan, cos_raan) = self.raan.sin_cos();
        Vector3::new(sin_i * sin_raan, -sin_i * cos_raan, cos_i)
    }

    /// Inertial position (m) and velocity (m/s).
    ///
    /// The perifocal state is rotated by `Rz(Ω)·Rx(i)·Rz(ω)`.
    pub fn to_state_vector(&self) -> (Vector3<f64>, Vector3<f64>) {
        let e = self.eccentricity;
        let p = self.semi_latus_rectum();
        let (sin_f, cos_f) = self.true_anomaly.sin_cos();

        let radius = p / (1.0 + e * cos_f);
        let r_pqw = Vector3::new(radius * cos_f, radius * sin_f, 0.0);
        let v_pqw = (EARTH_GRAV_PARAM / p).sqrt() * Vector3::new(-sin_f, e + cos_f, 0.0);

        let pqw_to_inertial = rotation(Axis::Z, self.raan)
            * rotation(Axis::X, self.inclination)
            * rotation(Axis::Z, self.arg_of_perigee);

        (pqw_to_inertial * r_pqw, pqw_to_inertial * v_pqw)
    }

    /// Copy of the elements with every angle reduced to [0, 2π).
    pub fn normalized(&self) -> Self {
        KeplerianElements {
            raan: principal_angle(self.raan),
            arg_of_perigee: principal_angle(self.arg_of_perigee),
            true_anomaly: principal_angle(self.true_anomaly),
            ..*self
        }
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rad_to_deg = 180.0 / std::f64::consts::PI;
        writeln!(f, "Keplerian Elements @ epoch (JD): {:.6}", self.epoch)?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.3} km",
            self.semi_major_axis / 1000.0
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6} rad ({:.6}°)",
            self.inclination,
            self.inclination * rad_to_deg
        )?;
        writeln!(
            f,
            "  Ω   (RAAN)                  = {:.6} rad ({:.6}°)",
            self.raan,
            self.raan * rad_to_deg
        )?;
        writeln!(
            f,
            "  ω   (argument of perigee)   = {:.6} rad ({:.6}°)",
            self.arg_of_perigee,
            self.arg_of_perigee * rad_to_deg
        )?;
        writeln!(
            f,
            "  f   (true anomaly)          = {:.6} rad ({:.6}°)",
            self.true_anomaly,
            self.true_anomaly * rad_to_deg
        )
    }
}
