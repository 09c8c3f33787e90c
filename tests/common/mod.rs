#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use satmission::access::TimeInterval;
use satmission::constants::JulianDate;
use satmission::orbit_type::keplerian_element::KeplerianElements;
use satmission::propagator::SecularPropagator;
use satmission::sun_sync::ltdn_to_raan;
use satmission::time::date_to_jd;

/// 2021-01-01T00:00:00 UTC
pub fn epoch() -> JulianDate {
    date_to_jd(2021, 1, 1, 0, 0, 0)
}

/// Sun-synchronous orbit at about 750 km with a 10:30 descending node.
pub fn sso_elements() -> KeplerianElements {
    KeplerianElements {
        epoch: epoch(),
        semi_major_axis: 7130.982e3,
        eccentricity: 0.001111,
        inclination: 98.405_f64.to_radians(),
        raan: ltdn_to_raan(10.5, epoch()),
        arg_of_perigee: std::f64::consts::FRAC_PI_2,
        true_anomaly: 0.0,
    }
}

pub fn sso_propagator() -> SecularPropagator {
    SecularPropagator::j2(sso_elements()).unwrap()
}

/// Seconds since midnight of an `hh:mm:ss.sss` time of day.
pub fn time_of_day(hour: u32, minute: u32, second: f64) -> f64 {
    f64::from(hour) * 3600.0 + f64::from(minute) * 60.0 + second
}

pub fn assert_interval_close(actual: &TimeInterval, expected: &TimeInterval, epsilon: f64) {
    assert_abs_diff_eq!(actual.begin, expected.begin, epsilon = epsilon);
    assert_abs_diff_eq!(actual.end, expected.end, epsilon = epsilon);
}

/// Accesses and gaps, merged and sorted, cover `window` without overlap nor hole.
pub fn assert_tiles(accesses: &[TimeInterval], gaps: &[TimeInterval], window: TimeInterval) {
    let mut all: Vec<TimeInterval> = accesses.iter().chain(gaps).copied().collect();
    all.sort_by(|a, b| a.begin.total_cmp(&b.begin));

    assert_eq!(all.first().map(|i| i.begin), Some(window.begin));
    assert_eq!(all.last().map(|i| i.end), Some(window.end));
    for pair in all.windows(2) {
        assert_eq!(pair[0].end, pair[1].begin);
    }
}
