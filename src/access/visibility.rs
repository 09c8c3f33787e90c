//! Elevation of a satellite above the local horizon of ground facilities, and the reduction of
//! the per-facility visibility flags into a single "is visible" value.

use std::fmt;
use std::sync::Arc;

use nalgebra::{Matrix3, Vector3};
use smallvec::SmallVec;

use crate::constants::Radian;
use crate::geodesy::{ecef_to_ned, GeodeticPosition};

/// A ground facility with its Earth-fixed position and local NED frame precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundFacility {
    position: GeodeticPosition,
    ecef: Vector3<f64>,
    ecef_to_ned: Matrix3<f64>,
}

impl GroundFacility {
    pub fn new(position: GeodeticPosition) -> Self {
        GroundFacility {
            position,
            ecef: position.to_ecef(),
            ecef_to_ned: ecef_to_ned(position.latitude, position.longitude),
        }
    }

    pub fn position(&self) -> &GeodeticPosition {
        &self.position
    }

    /// Earth-fixed position of the facility, meters.
    pub fn ecef(&self) -> &Vector3<f64> {
        &self.ecef
    }

    /// Elevation of an Earth-fixed position above the local horizon of the facility.
    ///
    /// The line of sight is expressed in the NED frame of the facility and the elevation is
    /// `π/2` minus its angle with the local vertical (the ellipsoid normal, `−D`).
    pub fn elevation(&self, r_fixed: &Vector3<f64>) -> Radian {
        let line_of_sight = self.ecef_to_ned * (r_fixed - self.ecef);
        let range = line_of_sight.norm();
        if range == 0.0 {
            return std::f64::consts::FRAC_PI_2;
        }

        let zenith_angle = (-line_of_sight.z / range).clamp(-1.0, 1.0).acos();
        std::f64::consts::FRAC_PI_2 - zenith_angle
    }

    /// Whether the facility sees `r_fixed` strictly above `minimum_elevation`.
    pub fn sees(&self, r_fixed: &Vector3<f64>, minimum_elevation: Radian) -> bool {
        self.elevation(r_fixed) > minimum_elevation
    }
}

impl From<GeodeticPosition> for GroundFacility {
    fn from(position: GeodeticPosition) -> Self {
        GroundFacility::new(position)
    }
}

/// Reduction of the per-facility visibility flags into a single value.
///
/// The same reduction is applied to every time sample of an analysis.
#[derive(Clone, Default)]
pub enum Reduction {
    /// Visible if at least one facility sees the satellite.
    #[default]
    Any,
    /// Visible only if every facility sees the satellite.
    All,
    /// Caller-supplied predicate over the flags, ordered as the facilities.
    Custom(Arc<dyn Fn(&[bool]) -> bool + Send + Sync>),
}

impl Reduction {
    /// Wrap a closure into a [`Reduction::Custom`].
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[bool]) -> bool + Send + Sync + 'static,
    {
        Reduction::Custom(Arc::new(f))
    }

    pub fn reduce(&self, flags: &[bool]) -> bool {
        match self {
            Reduction::Any => flags.iter().any(|&v| v),
            Reduction::All => flags.iter().all(|&v| v),
            Reduction::Custom(f) => f(flags),
        }
    }
}

impl fmt::Debug for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Any => write!(f, "Any"),
            Reduction::All => write!(f, "All"),
            Reduction::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

/// Whether the satellite at the Earth-fixed position `r_fixed` is visible from the facilities.
///
/// With no facility the satellite is never visible, whatever the reduction.
pub fn is_visible(
    r_fixed: &Vector3<f64>,
    facilities: &[GroundFacility],
    minimum_elevation: Radian,
    reduction: &Reduction,
) -> bool {
    if facilities.is_empty() {
        return false;
    }

    let flags: SmallVec<[bool; 8]> = facilities
        .iter()
        .map(|facility| facility.sees(r_fixed, minimum_elevation))
        .collect();

    reduction.reduce(&flags)
}
