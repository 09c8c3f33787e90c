use crate::constants::{
    JulianDate, Radian, DAYS_PER_JULIAN_CENTURY, DPI, JD_J2000, RADEG, RADSEC,
};
use crate::time::{gmst, jd_utc_to_tt};

/// Julian centuries elapsed since J2000.0.
fn julian_centuries(jd: JulianDate) -> f64 {
    (jd - JD_J2000) / DAYS_PER_JULIAN_CENTURY
}

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1980 model).
///
/// The mean obliquity ε is the angle between the mean equator and the ecliptic plane.
///
/// Arguments
/// ---------
/// * `jd_tt`: Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// ```text
/// ε(T) = 23°26'21.448" − 46.8150"·T − 0.00059"·T² + 0.001813"·T³
/// ```
/// with `T` in Julian centuries from J2000.0, evaluated with Horner's method.
pub fn obleq(jd_tt: JulianDate) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.00059 * RADSEC;
    let ob3 = 0.001813 * RADSEC;

    let t = julian_centuries(jd_tt);

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Nutation in longitude and obliquity, truncated IAU 1980 series.
///
/// Only the four dominant periodic terms are kept (Moon node, twice the Sun and Moon mean
/// longitudes, twice the node). The truncation error is below 0.5" in Δψ and 0.1" in Δε, which
/// is about 15 m at the Earth surface, far below what the sidereal-time based frame conversion
/// needs.
///
/// Arguments
/// ---------
/// * `jd_tt`: Julian Date (TT scale).
///
/// Returns
/// --------
/// * `(Δψ, Δε)` in arcseconds.
pub fn nutation(jd_tt: JulianDate) -> (f64, f64) {
    let t = julian_centuries(jd_tt);

    // longitude of the Moon ascending node
    let omega = ((125.04452 - 1934.136261 * t) * RADEG).rem_euclid(DPI);
    // mean longitudes of the Sun and of the Moon
    let l_sun = ((280.4665 + 36000.7698 * t) * RADEG).rem_euclid(DPI);
    let l_moon = ((218.3165 + 481267.8813 * t) * RADEG).rem_euclid(DPI);

    let dpsi = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps = 9.20 * omega.cos() + 0.57 * (2.0 * l_sun).cos() + 0.10 * (2.0 * l_moon).cos()
        - 0.09 * (2.0 * omega).cos();

    (dpsi, deps)
}

/// Equation of the equinoxes, `Δψ·cos(ε)`, in radians.
///
/// This is the difference between apparent and mean sidereal time.
pub fn equequ(jd_tt: JulianDate) -> Radian {
    let (dpsi, _deps) = nutation(jd_tt);
    RADSEC * dpsi * obleq(jd_tt).cos()
}

/// Greenwich Apparent Sidereal Time in radians, in [0, 2π).
///
/// UT1 is approximated by UTC; the equation of the equinoxes is evaluated in TT.
///
/// # See also
/// * [`gmst`] – mean sidereal time
/// * [`equequ`] – equation of the equinoxes
pub fn gast(jd_utc: JulianDate) -> Radian {
    (gmst(jd_utc) + equequ(jd_utc_to_tt(jd_utc))).rem_euclid(DPI)
}
