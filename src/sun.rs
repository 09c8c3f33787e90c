//! # Low-precision Sun ephemeris
//!
//! Analytical Sun position (Astronomical Almanac low-precision formulae, ~0.01° accuracy between
//! 1950 and 2050) and equation of time. Sufficient for eclipse and beta angle analyses and for
//! converting a local time of the ascending node into a RAAN.

use nalgebra::Vector3;

use crate::constants::{
    JulianDate, Radian, AU_METERS, DAYS_PER_JULIAN_CENTURY, JD_J2000, RADEG,
};

/// Mean longitude, mean anomaly and ecliptic longitude of the Sun, radians.
fn solar_arguments(jd: JulianDate) -> (Radian, Radian, Radian) {
    let t = (jd - JD_J2000) / DAYS_PER_JULIAN_CENTURY;

    let mean_longitude = (280.460 + 36000.771 * t) * RADEG;
    let mean_anomaly = (357.529_109_2 + 35999.050_34 * t) * RADEG;
    let ecliptic_longitude = mean_longitude
        + (1.914_666_471 * mean_anomaly.sin() + 0.019_994_643 * (2.0 * mean_anomaly).sin())
            * RADEG;

    (mean_longitude, mean_anomaly, ecliptic_longitude)
}

/// Sun position in the mean-of-date equatorial frame, meters.
///
/// # Arguments
/// * `jd` - Julian Date (UT1 ≈ UTC).
pub fn sun_position(jd: JulianDate) -> Vector3<f64> {
    let t = (jd - JD_J2000) / DAYS_PER_JULIAN_CENTURY;
    let (_, mean_anomaly, lambda) = solar_arguments(jd);

    let distance_au = 1.000_140_612
        - 0.016_708_617 * mean_anomaly.cos()
        - 0.000_139_589 * (2.0 * mean_anomaly).cos();
    let obliquity = (23.439_291 - 0.013_004_2 * t) * RADEG;

    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    distance_au
        * AU_METERS
        * Vector3::new(
            cos_lambda,
            obliquity.cos() * sin_lambda,
            obliquity.sin() * sin_lambda,
        )
}

/// Equation of time (apparent minus mean solar time) expressed as an angle, radians.
///
/// One hour of time is 15°; the value stays within ±17 minutes (±4.3°) over the year.
pub fn equation_of_time(jd: JulianDate) -> Radian {
    let (_, mean_anomaly, lambda) = solar_arguments(jd);

    (-1.914_666_471 * mean_anomaly.sin() - 0.019_994_643 * (2.0 * mean_anomaly).sin()
        + 2.466 * (2.0 * lambda).sin()
        - 0.053 * (4.0 * lambda).sin())
        * RADEG
}
