use std::fmt;

use crate::constants::{Meter, Radian, EARTH_GRAV_RADIUS, EARTH_J2, EARTH_J3};
use crate::mission_errors::MissionError;

/// Eccentricity and argument of perigee cancelling the long-period J2/J3 drift of `(e, ω)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrozenOrbit {
    pub eccentricity: f64,
    pub arg_of_perigee: Radian,
}

/// Frozen eccentricity for the given semi-major axis and inclination.
///
/// First order in J3/J2: `e = −J3 R⊕ sin i / (2 J2 a)` with `ω = 90°`.
pub fn frozen_orbit(semi_major_axis: Meter, inclination: Radian) -> Result<FrozenOrbit, MissionError> {
    if semi_major_axis <= EARTH_GRAV_RADIUS {
        return Err(MissionError::InvalidArgument(format!(
            "semi-major axis {semi_major_axis} m is below the Earth radius"
        )));
    }

    Ok(FrozenOrbit {
        eccentricity: -EARTH_J3 * EARTH_GRAV_RADIUS * inclination.sin()
            / (2.0 * EARTH_J2 * semi_major_axis),
        arg_of_perigee: std::f64::consts::FRAC_PI_2,
    })
}

impl fmt::Display for FrozenOrbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frozen orbit: e = {:.6e}, ω = {:.1}°",
            self.eccentricity,
            self.arg_of_perigee.to_degrees()
        )
    }
}
