//! Sub-satellite point history.

use hifitime::Epoch;
use tracing::debug;

use crate::constants::{Meter, Radian, Second, SECONDS_PER_DAY};
use crate::geodesy::ecef_to_geodetic;
use crate::mission_errors::MissionError;
use crate::propagator::Propagator;
use crate::ref_system::FrameConversion;
use crate::time::{check_window, jd_to_epoch, time_samples};

/// Geodetic coordinates of the satellite at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundTrackPoint {
    pub epoch: Epoch,
    /// Geodetic latitude, radians
    pub latitude: Radian,
    /// Longitude in (−π, π], radians
    pub longitude: Radian,
    /// Height above the WGS84 ellipsoid, meters
    pub altitude: Meter,
}

/// Ground track sampled every `step` seconds over `[initial_time, initial_time + duration]`.
///
/// Arguments
/// ---------
/// * `propagator`: orbit propagator, cloned and never mutated
/// * `frame`: inertial to Earth-fixed conversion
/// * `initial_time`, `duration`, `step`: sampling window, seconds
pub fn ground_track<P, C>(
    propagator: &P,
    frame: &C,
    initial_time: Second,
    duration: Second,
    step: Second,
) -> Result<Vec<GroundTrackPoint>, MissionError>
where
    P: Propagator,
    C: FrameConversion,
{
    check_window(initial_time, duration, step)?;

    let mut propagator = propagator.clone();
    let epoch_jd = propagator.epoch();

    let track = time_samples(initial_time, duration, step)
        .into_iter()
        .map(|t| {
            let (r_inertial, _) = propagator.propagate(t)?;
            let jd = epoch_jd + t / SECONDS_PER_DAY;
            let position = ecef_to_geodetic(&frame.to_fixed(&r_inertial, jd)?);
            Ok(GroundTrackPoint {
                epoch: jd_to_epoch(jd),
                latitude: position.latitude,
                longitude: position.longitude,
                altitude: position.altitude,
            })
        })
        .collect::<Result<Vec<_>, MissionError>>()?;

    debug!(points = track.len(), "ground track computed");
    Ok(track)
}
