//! # Inertial to Earth-fixed frame conversions
//!
//! The access and ground track analyses need the satellite position in an Earth-fixed frame,
//! while propagators produce it in an inertial (true-of-date or TEME) frame. The conversion is
//! abstracted by the [`FrameConversion`] trait so that callers can plug their own, more accurate
//! transformation (polar motion, IERS EOP, …).
//!
//! Any `Fn(&Vector3<f64>, JulianDate) -> Result<Vector3<f64>, MissionError> + Sync` closure is a
//! [`FrameConversion`]. Implementations are called concurrently from several worker threads and
//! must therefore be pure functions of their arguments. Their errors reach the caller of the
//! analysis unchanged.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{JulianDate, Radian};
use crate::earth_orientation::gast;
use crate::mission_errors::MissionError;
use crate::time::gmst;

/// Principal axis of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// The matrix represents an **active rotation** of a vector by `alpha` around `axis`, counter-
/// clockwise when looking along the axis toward the origin. A change of basis by the same angle
/// is obtained with `rotation(axis, -alpha)`.
///
/// # Arguments
///
/// * `axis` - Axis of rotation.
/// * `alpha` - Rotation angle in **radians** (positive = direct/trigonometric sense).
///
/// # Returns
///
/// A 3×3 orthonormal matrix `R` such that the rotated vector is `x' = R · x`.
pub fn rotation(axis: Axis, alpha: Radian) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Conversion of a position vector from an inertial frame to an Earth-fixed frame.
pub trait FrameConversion: Sync {
    /// Express `r_inertial` (meters) in the Earth-fixed frame at the Julian Date `jd` (UTC).
    fn to_fixed(&self, r_inertial: &Vector3<f64>, jd: JulianDate) -> Result<Vector3<f64>, MissionError>;
}

impl<F> FrameConversion for F
where
    F: Fn(&Vector3<f64>, JulianDate) -> Result<Vector3<f64>, MissionError> + Sync,
{
    fn to_fixed(&self, r_inertial: &Vector3<f64>, jd: JulianDate) -> Result<Vector3<f64>, MissionError> {
        self(r_inertial, jd)
    }
}

/// True-of-date to pseudo-Earth-fixed conversion: rotation by the apparent sidereal time.
///
/// Polar motion is neglected and UT1 is approximated by UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodToPef;

impl FrameConversion for TodToPef {
    fn to_fixed(&self, r_inertial: &Vector3<f64>, jd: JulianDate) -> Result<Vector3<f64>, MissionError> {
        Ok(rotation(Axis::Z, -gast(jd)) * r_inertial)
    }
}

/// TEME to pseudo-Earth-fixed conversion: rotation by the mean sidereal time.
///
/// This is the frame pair of SGP4 outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemeToPef;

impl FrameConversion for TemeToPef {
    fn to_fixed(&self, r_inertial: &Vector3<f64>, jd: JulianDate) -> Result<Vector3<f64>, MissionError> {
        Ok(rotation(Axis::Z, -gmst(jd)) * r_inertial)
    }
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_is_active() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = rotation(Axis::Z, FRAC_PI_2) * x;
        assert_relative_eq!(y, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-15);

        let z = rotation(Axis::X, FRAC_PI_2) * Vector3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(z, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-15);
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let r = rotation(Axis::Y, 0.3);
        assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_teme_to_pef_is_gmst_rotation() {
        let jd = 2459215.5;
        let theta = gmst(jd);
        let r = Vector3::new(7.0e6, 0.0, 1.0e6);
        let fixed = TemeToPef.to_fixed(&r, jd).unwrap();

        assert_relative_eq!(fixed.z, r.z, epsilon = 1e-9);
        assert_relative_eq!(fixed.norm(), r.norm(), epsilon = 1e-6);
        // the fixed-frame longitude of a vector on the inertial X axis is −GMST
        assert_relative_eq!(
            fixed.y.atan2(fixed.x),
            (-theta + std::f64::consts::PI).rem_euclid(crate::constants::DPI)
                - std::f64::consts::PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_closure_is_a_frame_conversion() {
        let identity = |r: &Vector3<f64>, _jd: JulianDate| Ok::<_, MissionError>(*r);
        let r = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(identity.to_fixed(&r, 0.0), Ok(r));
    }
}
