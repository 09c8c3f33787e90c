mod common;

use approx::assert_relative_eq;
use hifitime::{Epoch, TimeScale};
use satmission::access::{
    compute_accesses, ground_facility_accesses, ground_facility_gaps, AccessConfig, IntervalKind,
    Reduction, TimeInterval, TimeUnit,
};
use nalgebra::Vector3;
use satmission::constants::JulianDate;
use satmission::geodesy::GeodeticPosition;
use satmission::mission_errors::MissionError;
use satmission::ref_system::{FrameConversion, TodToPef};

use crate::common::{assert_interval_close, assert_tiles, epoch, sso_propagator, time_of_day};

fn equator() -> GeodeticPosition {
    GeodeticPosition::new(0.0, 0.0, 0.0)
}

fn svalbard() -> GeodeticPosition {
    GeodeticPosition::new(78.23_f64.to_radians(), 15.39_f64.to_radians(), 500.0)
}

fn total(intervals: &[TimeInterval]) -> f64 {
    intervals.iter().map(TimeInterval::duration).sum()
}

fn accesses_with(facilities: &[GeodeticPosition], reduction: Reduction) -> Vec<TimeInterval> {
    let config = AccessConfig::builder().reduction(reduction).build().unwrap();
    compute_accesses(&sso_propagator(), facilities, &TodToPef, &config)
        .unwrap()
        .accesses()
        .to_vec()
}

#[test]
fn test_equatorial_facility_one_day() {
    let config = AccessConfig::default();
    let report = compute_accesses(&sso_propagator(), &[equator()], &TodToPef, &config).unwrap();

    let accesses = report.accesses();
    assert_eq!(accesses.len(), 2);
    assert_interval_close(
        &accesses[0],
        &TimeInterval::new(time_of_day(10, 20, 3.015), time_of_day(10, 20, 3.015) + 599.9),
        5.0,
    );
    assert_interval_close(
        &accesses[1],
        &TimeInterval::new(time_of_day(22, 49, 55.964), time_of_day(22, 49, 55.964) + 567.3),
        5.0,
    );

    let gaps = report.gaps();
    assert_eq!(gaps.len(), 3);
    assert_eq!(gaps[0].begin, 0.0);
    assert_eq!(gaps[2].end, 86400.0);
    assert_tiles(accesses, &gaps, report.window());
}

#[test]
fn test_tables_are_calendar_dated() {
    let config = AccessConfig::builder().unit(":m").build().unwrap();
    let accesses =
        ground_facility_accesses(&sso_propagator(), &[equator()], &TodToPef, &config).unwrap();

    assert_eq!(accesses.kind(), IntervalKind::Access);
    assert_eq!(accesses.unit(), TimeUnit::Minutes);
    assert_eq!(accesses.len(), 2);

    let expected = Epoch::from_gregorian(2021, 1, 1, 10, 20, 3, 15_000_000, TimeScale::UTC);
    let first = accesses.rows()[0];
    assert!((first.begin - expected).to_seconds().abs() < 5.0);
    assert_relative_eq!(first.duration, 599.9 / 60.0, epsilon = 0.1);
    assert_relative_eq!(
        (first.end - first.begin).to_seconds() / 60.0,
        first.duration,
        epsilon = 1e-6
    );

    let gaps = ground_facility_gaps(&sso_propagator(), &[equator()], &TodToPef, &config).unwrap();
    assert_eq!(gaps.kind(), IntervalKind::Gap);
    assert_relative_eq!(
        accesses.total_duration() + gaps.total_duration(),
        24.0 * 60.0,
        epsilon = 1e-6
    );
    assert!(gaps.to_string().starts_with("Gaps to the ground facilities."));
}

#[test]
fn test_result_does_not_depend_on_chunking() {
    let propagator = sso_propagator();
    let facilities = [equator(), svalbard()];

    let reference = compute_accesses(
        &propagator,
        &facilities,
        &TodToPef,
        &AccessConfig::builder().num_chunks(1).build().unwrap(),
    )
    .unwrap();
    assert!(reference.accesses().len() > 5);

    for num_chunks in [2, 4, 8, 7, 1441, 5000] {
        let config = AccessConfig::builder().num_chunks(num_chunks).build().unwrap();
        let report = compute_accesses(&propagator, &facilities, &TodToPef, &config).unwrap();
        assert_eq!(report.accesses(), reference.accesses(), "num_chunks = {num_chunks}");
    }

    let config = AccessConfig::builder().num_workers(3).build().unwrap();
    let report = compute_accesses(&propagator, &facilities, &TodToPef, &config).unwrap();
    assert_eq!(report.accesses(), reference.accesses());
}

#[test]
fn test_accesses_and_gaps_tile_the_window() {
    let config = AccessConfig::builder()
        .initial_time(3600.0)
        .duration(43_210.0)
        .step(45.0)
        .num_chunks(5)
        .build()
        .unwrap();
    let report =
        compute_accesses(&sso_propagator(), &[equator(), svalbard()], &TodToPef, &config).unwrap();

    let window = report.window();
    assert_eq!(window, TimeInterval::new(3600.0, 46_810.0));

    for access in report.accesses() {
        assert!(access.begin >= window.begin && access.end <= window.end);
        assert!(access.duration() > 0.0);
    }
    for pair in report.accesses().windows(2) {
        assert!(pair[0].end < pair[1].begin);
    }
    assert_tiles(report.accesses(), &report.gaps(), window);
}

#[test]
fn test_any_and_all_reductions() {
    // with a single facility both reductions agree
    assert_eq!(
        accesses_with(&[svalbard()], Reduction::Any),
        accesses_with(&[svalbard()], Reduction::All)
    );

    let equator_only = accesses_with(&[equator()], Reduction::Any);
    let svalbard_only = accesses_with(&[svalbard()], Reduction::Any);
    let either = accesses_with(&[equator(), svalbard()], Reduction::Any);
    let both = accesses_with(&[equator(), svalbard()], Reduction::All);

    // the two visibility circles are far apart: never both, and either is the union
    assert!(both.is_empty());
    assert_eq!(either.len(), equator_only.len() + svalbard_only.len());
    assert_relative_eq!(
        total(&either),
        total(&equator_only) + total(&svalbard_only),
        epsilon = 0.1
    );
    assert!(total(&svalbard_only) > total(&equator_only));
}

#[test]
fn test_all_reduction_with_overlapping_coverage() {
    let east = GeodeticPosition::new(0.0, 3.0_f64.to_radians(), 0.0);
    let facilities = [equator(), east];

    let either = accesses_with(&facilities, Reduction::Any);
    let both = accesses_with(&facilities, Reduction::All);

    assert!(!both.is_empty());
    assert!(total(&both) < total(&either));

    let contained = |inner: &TimeInterval, outer: &[TimeInterval]| {
        outer
            .iter()
            .any(|o| o.begin <= inner.begin && inner.end <= o.end)
    };
    let equator_only = accesses_with(&[equator()], Reduction::Any);
    let east_only = accesses_with(&[east], Reduction::Any);
    for access in &both {
        assert!(access.duration() > 0.0);
        assert!(contained(access, &either));
        assert!(contained(access, &equator_only));
        assert!(contained(access, &east_only));
    }
}

#[test]
fn test_custom_reduction() {
    let propagator = sso_propagator();
    let facilities = [equator(), svalbard()];

    let never = AccessConfig::builder()
        .reduction(Reduction::custom(|_| false))
        .build()
        .unwrap();
    let report = compute_accesses(&propagator, &facilities, &TodToPef, &never).unwrap();
    assert!(report.accesses().is_empty());
    assert_eq!(report.gaps(), vec![report.window()]);

    // first facility only
    let first = AccessConfig::builder()
        .reduction(Reduction::custom(|flags| flags[0]))
        .build()
        .unwrap();
    let report = compute_accesses(&propagator, &facilities, &TodToPef, &first).unwrap();
    let equator_only =
        compute_accesses(&propagator, &[equator()], &TodToPef, &AccessConfig::default()).unwrap();
    assert_eq!(report.accesses(), equator_only.accesses());
}

#[test]
fn test_duration_units() {
    let propagator = sso_propagator();
    let report =
        compute_accesses(&propagator, &[svalbard()], &TodToPef, &AccessConfig::default()).unwrap();

    let seconds = report.access_table_in(TimeUnit::Seconds);
    let minutes = report.access_table_in(TimeUnit::Minutes);
    let hours = report.access_table_in(TimeUnit::Hours);

    assert_eq!(seconds.len(), minutes.len());
    for ((s, m), h) in seconds.rows().iter().zip(minutes.rows()).zip(hours.rows()) {
        assert_eq!(s.begin, m.begin);
        assert_relative_eq!(s.duration / 60.0, m.duration, max_relative = 1e-12);
        assert_relative_eq!(s.duration / 3600.0, h.duration, max_relative = 1e-12);
    }
    assert!(minutes.to_string().contains("duration [min]"));
    assert!(hours.to_string().contains("duration [h]"));
}

#[test]
fn test_no_facility() {
    let report =
        compute_accesses(&sso_propagator(), &[], &TodToPef, &AccessConfig::default()).unwrap();
    assert!(report.accesses().is_empty());
    assert_eq!(report.gaps(), vec![TimeInterval::new(0.0, 86400.0)]);
    assert_eq!(report.gap_table().len(), 1);
}

#[test]
fn test_zero_duration_window() {
    let config = AccessConfig::builder().duration(0.0).build().unwrap();
    let report = compute_accesses(&sso_propagator(), &[equator()], &TodToPef, &config).unwrap();
    assert!(report.accesses().is_empty());
    assert_eq!(report.gaps(), vec![TimeInterval::new(0.0, 0.0)]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = AccessConfig {
        step: -60.0,
        ..AccessConfig::default()
    };
    let result = compute_accesses(&sso_propagator(), &[equator()], &TodToPef, &config);
    assert!(matches!(result, Err(MissionError::InvalidAccessParameter(_))));

    assert!(AccessConfig::builder().num_chunks(0).build().is_err());
    assert!(AccessConfig::builder().duration(f64::NAN).build().is_err());
}

#[test]
fn test_frame_conversion_error_is_returned() {
    // orientation data available for the first twelve hours only
    let table_end = epoch() + 0.5;
    let frame = |r: &Vector3<f64>, jd: JulianDate| {
        if jd > table_end {
            Err(MissionError::FrameConversionError(format!("no orientation data after {table_end}")))
        } else {
            TodToPef.to_fixed(r, jd)
        }
    };
    let expected = MissionError::FrameConversionError(format!("no orientation data after {table_end}"));

    for num_chunks in [1, 3, 8] {
        let config = AccessConfig::builder().num_chunks(num_chunks).build().unwrap();
        let result = compute_accesses(&sso_propagator(), &[equator()], &frame, &config);
        assert_eq!(result.unwrap_err(), expected, "num_chunks = {num_chunks}");
    }

    let config = AccessConfig::builder().duration(43_200.0).build().unwrap();
    let within = compute_accesses(&sso_propagator(), &[equator()], &frame, &config).unwrap();
    let reference = compute_accesses(&sso_propagator(), &[equator()], &TodToPef, &config).unwrap();
    assert_eq!(within.accesses(), reference.accesses());
}

#[test]
fn test_config_from_json() {
    let config: AccessConfig =
        serde_json::from_str(r#"{"duration": 43200.0, "step": 30.0, "unit": ":h"}"#).unwrap();
    assert_eq!(config.duration, 43200.0);
    assert_eq!(config.step, 30.0);
    assert_eq!(config.unit, TimeUnit::Hours);
    assert!(matches!(config.reduction, Reduction::Any));

    let report = compute_accesses(&sso_propagator(), &[equator()], &TodToPef, &config).unwrap();
    assert_eq!(report.accesses().len(), 1);
}
