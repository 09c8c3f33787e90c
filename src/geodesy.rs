//! # WGS84 geodesy
//!
//! Geodetic ↔ Earth-fixed Cartesian conversions on the WGS84 ellipsoid and the local
//! North-East-Down (NED) tangent frame used to measure elevation angles.

use nalgebra::{Matrix3, Vector3};

use crate::constants::{
    Meter, Radian, WGS84_ECCENTRICITY_SQUARED, WGS84_SEMI_MAJOR_AXIS, WGS84_SEMI_MINOR_AXIS,
};

/// Geodetic coordinates on the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPosition {
    /// Geodetic latitude, radians
    pub latitude: Radian,
    /// Longitude, radians, positive east
    pub longitude: Radian,
    /// Height above the ellipsoid, meters
    pub altitude: Meter,
}

impl GeodeticPosition {
    pub fn new(latitude: Radian, longitude: Radian, altitude: Meter) -> Self {
        GeodeticPosition {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Earth-fixed Cartesian position of this point, meters.
    pub fn to_ecef(&self) -> Vector3<f64> {
        geodetic_to_ecef(self.latitude, self.longitude, self.altitude)
    }
}

impl From<(Radian, Radian, Meter)> for GeodeticPosition {
    fn from((latitude, longitude, altitude): (Radian, Radian, Meter)) -> Self {
        GeodeticPosition::new(latitude, longitude, altitude)
    }
}

/// Convert geodetic coordinates to an Earth-fixed Cartesian position.
///
/// Arguments
/// ---------
/// * `lat`: geodetic latitude, radians
/// * `lon`: longitude, radians
/// * `height`: height above the ellipsoid, meters
///
/// Returns
/// -------
/// * the Earth-fixed position in meters
///
/// Details
/// -------
/// The computation goes through the parametric latitude `u`:
///
/// ```text
/// u = atan( (b/a) tan φ )
/// ρ cos φ' = a cos u + h cos φ
/// ρ sin φ' = b sin u + h sin φ
/// ```
///
/// where `a` and `b` are the semi-major and semi-minor axes of the ellipsoid.
pub fn geodetic_to_ecef(lat: Radian, lon: Radian, height: Meter) -> Vector3<f64> {
    let axis_ratio = WGS84_SEMI_MINOR_AXIS / WGS84_SEMI_MAJOR_AXIS;
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_cos_phi = WGS84_SEMI_MAJOR_AXIS * u.cos() + height * lat.cos();
    let rho_sin_phi = WGS84_SEMI_MINOR_AXIS * u.sin() + height * lat.sin();

    Vector3::new(
        rho_cos_phi * lon.cos(),
        rho_cos_phi * lon.sin(),
        rho_sin_phi,
    )
}

/// Convert an Earth-fixed Cartesian position to geodetic coordinates.
///
/// Fixed-point iteration on the latitude, converged to well below a millimeter after a handful
/// of iterations for any point outside the Earth core. Points on the polar axis are handled
/// separately.
pub fn ecef_to_geodetic(r: &Vector3<f64>) -> GeodeticPosition {
    const MAX_ITERATIONS: usize = 20;
    const TOLERANCE: f64 = 1e-12;

    let e2 = WGS84_ECCENTRICITY_SQUARED;
    let p = r.x.hypot(r.y);
    let lon = r.y.atan2(r.x);

    if p < 1e-9 {
        let lat = std::f64::consts::FRAC_PI_2.copysign(r.z);
        return GeodeticPosition::new(lat, 0.0, r.z.abs() - WGS84_SEMI_MINOR_AXIS);
    }

    let mut lat = r.z.atan2(p * (1.0 - e2));
    let mut height = 0.0;
    for _ in 0..MAX_ITERATIONS {
        let sin_lat = lat.sin();
        let n = WGS84_SEMI_MAJOR_AXIS / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        height = p / lat.cos() - n;
        let next = r.z.atan2(p * (1.0 - e2 * n / (n + height)));
        let done = (next - lat).abs() < TOLERANCE;
        lat = next;
        if done {
            break;
        }
    }

    GeodeticPosition::new(lat, lon, height)
}

/// Rotation matrix from the Earth-fixed frame to the local North-East-Down frame at the given
/// geodetic latitude and longitude.
pub fn ecef_to_ned(lat: Radian, lon: Radian) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    Matrix3::new(
        -sin_lat * cos_lon,
        -sin_lat * sin_lon,
        cos_lat,
        -sin_lon,
        cos_lon,
        0.0,
        -cos_lat * cos_lon,
        -cos_lat * sin_lon,
        -sin_lat,
    )
}

#[cfg(test)]
mod geodesy_test {
    use super::*;
    use crate::constants::RADEG;
    use approx::assert_relative_eq;

    #[test]
    fn test_equator_prime_meridian() {
        let r = geodetic_to_ecef(0.0, 0.0, 0.0);
        assert_relative_eq!(r, Vector3::new(WGS84_SEMI_MAJOR_AXIS, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_north_pole() {
        let r = geodetic_to_ecef(90.0 * RADEG, 0.0, 100.0);
        assert_relative_eq!(r.z, WGS84_SEMI_MINOR_AXIS + 100.0, epsilon = 1e-6);
        assert!(r.x.abs() < 1e-6);

        let geo = ecef_to_geodetic(&r);
        assert_relative_eq!(geo.latitude, 90.0 * RADEG, epsilon = 1e-12);
        assert_relative_eq!(geo.altitude, 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_geodetic_round_trip() {
        let cases = [
            (-23.5 * RADEG, -46.6 * RADEG, 760.0),
            (48.85 * RADEG, 2.35 * RADEG, 35.0),
            (-70.0 * RADEG, 170.0 * RADEG, 700_000.0),
        ];
        for (lat, lon, h) in cases {
            let geo = ecef_to_geodetic(&geodetic_to_ecef(lat, lon, h));
            assert_relative_eq!(geo.latitude, lat, epsilon = 1e-11);
            assert_relative_eq!(geo.longitude, lon, epsilon = 1e-12);
            assert_relative_eq!(geo.altitude, h, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_ned_down_points_to_the_ellipsoid_normal() {
        let lat = 45.0 * RADEG;
        let lon = 10.0 * RADEG;
        let ned = ecef_to_ned(lat, lon);

        // the geodetic normal at the point is the "up" direction
        let up_ecef = Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin());
        assert_relative_eq!(ned * up_ecef, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-15);
        assert_relative_eq!(ned * ned.transpose(), Matrix3::identity(), epsilon = 1e-15);
    }
}
