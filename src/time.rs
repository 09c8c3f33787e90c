//! # Time scales, Julian dates and analysis time grids
//!
//! Every analysis in this crate expresses instants as an offset in seconds from the
//! propagator epoch, the epoch itself being a Julian Date in UTC. This module holds the
//! conversions between these representations and [`hifitime::Epoch`], the sidereal time
//! used by the Earth-fixed frame conversions, and the sampling grid shared by the
//! access, eclipse, beta angle and ground track computations.

use hifitime::{Epoch, TimeScale, Unit};

use crate::constants::{JulianDate, Radian, Second, DPI, SECONDS_PER_DAY};
use crate::mission_errors::MissionError;

/// Offset between Julian Date and Modified Julian Date
const JD_TO_MJD: f64 = 2_400_000.5;

/// MJD of J2000.0
const MJD_J2000: f64 = 51_544.5;

/// Largest number of samples of an analysis grid.
pub const MAX_TIME_SAMPLES: usize = 100_000_000;

/// Julian Date (UTC) of an [`Epoch`].
pub fn epoch_to_jd(epoch: &Epoch) -> JulianDate {
    epoch.to_jde_utc_days()
}

/// [`Epoch`] of a Julian Date expressed in UTC.
pub fn jd_to_epoch(jd: JulianDate) -> Epoch {
    Epoch::from_jde_utc(jd)
}

/// Julian Date (UTC) of a Gregorian calendar date.
///
/// Arguments
/// ---------
/// * `year`, `month`, `day`: calendar date
/// * `hour`, `minute`, `second`: time of day, UTC
///
/// Return
/// ------
/// * the Julian Date of the instant
pub fn date_to_jd(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> JulianDate {
    Epoch::from_gregorian(year, month, day, hour, minute, second, 0, TimeScale::UTC)
        .to_jde_utc_days()
}

/// Convert a UTC Julian Date to a Terrestrial Time Julian Date.
///
/// The leap second table of hifitime is used, so the result is exact for any date covered by it.
pub fn jd_utc_to_tt(jd_utc: JulianDate) -> JulianDate {
    Epoch::from_jde_utc(jd_utc).to_jde_tt_days()
}

/// Shift an epoch by a number of seconds.
pub fn offset_epoch(epoch: Epoch, seconds: Second) -> Epoch {
    epoch + Unit::Second * seconds
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `jd_ut1` - Julian Date (UT1 time scale). UTC may be used when the
///   sub-second UT1 − UTC offset is irrelevant.
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, IERS Conventions 1996.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(jd_ut1: JulianDate) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let tjm = jd_ut1 - JD_TO_MJD;
    let t = (tjm.floor() - MJD_J2000) / 36525.0;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / SECONDS_PER_DAY;

    // Earth rotation during the elapsed fraction of the day
    let h = tjm.fract() * DPI;
    (gmst0 + h * RAP).rem_euclid(DPI)
}

/// Check the parameters of an analysis window: finite values, `duration ≥ 0` and `step > 0`.
pub fn check_window(initial_time: Second, duration: Second, step: Second) -> Result<(), MissionError> {
    if !initial_time.is_finite() {
        return Err(MissionError::InvalidArgument(format!(
            "initial time must be finite, got {initial_time}"
        )));
    }
    if !(duration.is_finite() && duration >= 0.0) {
        return Err(MissionError::InvalidArgument(format!(
            "duration must be non-negative, got {duration}"
        )));
    }
    if !(step.is_finite() && step > 0.0) {
        return Err(MissionError::InvalidArgument(format!(
            "step must be strictly positive, got {step}"
        )));
    }
    if !fits_sample_limit(duration, step) {
        return Err(MissionError::InvalidArgument(format!(
            "a {duration} s window sampled every {step} s exceeds {MAX_TIME_SAMPLES} samples"
        )));
    }
    Ok(())
}

/// Whether the grid of `duration / step` steps stays within [`MAX_TIME_SAMPLES`].
pub fn fits_sample_limit(duration: Second, step: Second) -> bool {
    (duration / step).floor() < MAX_TIME_SAMPLES as f64
}

/// Sampling grid of an analysis window.
///
/// The grid starts at `initial_time`, advances by `step` and always ends with the exact window
/// end `initial_time + duration`, even when `duration` is not a multiple of `step`. A zero-length
/// window yields a single sample.
///
/// Arguments
/// ---------
/// * `initial_time`: first sample, seconds from the propagator epoch
/// * `duration`: window length in seconds, non-negative
/// * `step`: sampling step in seconds, strictly positive
///
/// Return
/// ------
/// * the ordered sample offsets, in seconds
pub fn time_samples(initial_time: Second, duration: Second, step: Second) -> Vec<Second> {
    let end = initial_time + duration;
    let num_steps = (duration / step).floor() as usize;

    let mut samples: Vec<Second> = (0..=num_steps)
        .map(|k| initial_time + k as f64 * step)
        .take_while(|&t| t <= end)
        .collect();

    match samples.last() {
        Some(&last) if last < end => samples.push(end),
        None => samples.push(end),
        _ => {}
    }

    samples
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_date_to_jd() {
        assert_eq!(date_to_jd(2021, 1, 1, 0, 0, 0), 2459215.5);
        assert_eq!(date_to_jd(2021, 1, 2, 12, 0, 0), 2459217.0);
    }

    #[test]
    fn test_epoch_round_trip() {
        let epoch = jd_to_epoch(2459215.5);
        assert_eq!(epoch_to_jd(&epoch), 2459215.5);

        let later = offset_epoch(epoch, 3600.0);
        assert_relative_eq!(epoch_to_jd(&later), 2459215.5 + 1.0 / 24.0, epsilon = 1e-10);
    }

    #[test]
    fn test_jd_utc_to_tt() {
        // 37 leap seconds + 32.184 s in 2021
        let offset = (jd_utc_to_tt(2459215.5) - 2459215.5) * SECONDS_PER_DAY;
        assert_relative_eq!(offset, 69.184, epsilon = 1e-4);
    }

    #[test]
    fn test_gmst() {
        let res_gmst = gmst(57028.478514610404 + JD_TO_MJD);
        assert_relative_eq!(res_gmst, 4.851925725092499, epsilon = 1e-8);

        let res_gmst = gmst(2451545.0);
        assert_relative_eq!(res_gmst, 4.894961212789145, epsilon = 1e-12);
    }

    #[test]
    fn test_time_samples_exact_multiple() {
        let samples = time_samples(0.0, 300.0, 60.0);
        assert_eq!(samples, vec![0.0, 60.0, 120.0, 180.0, 240.0, 300.0]);
    }

    #[test]
    fn test_time_samples_appends_window_end() {
        let samples = time_samples(10.0, 130.0, 60.0);
        assert_eq!(samples, vec![10.0, 70.0, 130.0, 140.0]);
    }

    #[test]
    fn test_time_samples_zero_duration() {
        assert_eq!(time_samples(42.0, 0.0, 60.0), vec![42.0]);
    }

    #[test]
    fn test_check_window() {
        assert!(check_window(0.0, 0.0, 60.0).is_ok());
        assert!(check_window(0.0, -1.0, 60.0).is_err());
        assert!(check_window(0.0, 100.0, 0.0).is_err());
        assert!(check_window(f64::NAN, 100.0, 1.0).is_err());

        assert!(check_window(0.0, 86400.0 * 365.0, 1.0).is_ok());
        assert!(matches!(
            check_window(0.0, 1e12, 1e-9),
            Err(MissionError::InvalidArgument(msg)) if msg.contains("samples")
        ));
        assert!(!fits_sample_limit(1e8, 1.0));
        assert!(fits_sample_limit(1e8 - 2.0, 1.0));
    }
}
