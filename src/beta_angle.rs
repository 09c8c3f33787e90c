//! Beta angle: elevation of the Sun above the orbital plane.

use hifitime::Epoch;
use tracing::debug;

use crate::constants::{JulianDate, Radian, Second, SECONDS_PER_DAY};
use crate::mission_errors::MissionError;
use crate::orbit_type::keplerian_element::KeplerianElements;
use crate::propagator::Propagator;
use crate::sun::sun_position;
use crate::time::{check_window, jd_to_epoch, time_samples};

/// Beta angle of an orbit at `jd`, radians in [−π/2, π/2].
///
/// Positive when the Sun lies on the side of the orbital angular momentum.
pub fn beta_angle(elements: &KeplerianElements, jd: JulianDate) -> Radian {
    let sun_dir = sun_position(jd).normalize();
    elements.orbit_normal().dot(&sun_dir).clamp(-1.0, 1.0).asin()
}

/// Beta angle sampled every `step` seconds over `[initial_time, initial_time + duration]`.
///
/// The propagator is cloned, the caller's instance is left untouched.
pub fn beta_angle_history<P: Propagator>(
    propagator: &P,
    initial_time: Second,
    duration: Second,
    step: Second,
) -> Result<Vec<(Epoch, Radian)>, MissionError> {
    check_window(initial_time, duration, step)?;

    let mut propagator = propagator.clone();
    let epoch_jd = propagator.epoch();

    let history = time_samples(initial_time, duration, step)
        .into_iter()
        .map(|t| {
            propagator.propagate(t)?;
            let jd = epoch_jd + t / SECONDS_PER_DAY;
            Ok((jd_to_epoch(jd), beta_angle(propagator.elements(), jd)))
        })
        .collect::<Result<Vec<_>, MissionError>>()?;

    debug!(samples = history.len(), "beta angle history computed");
    Ok(history)
}
