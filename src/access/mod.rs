//! # Ground facility access and gap analysis
//!
//! Computes the time windows during which a satellite is seen from a set of ground facilities
//! above a minimum elevation, and their complement, the gaps.
//!
//! ## Pipeline
//!
//! 1. The analysis window `[initial_time, initial_time + duration]` is sampled every `step`
//!    seconds ([`time_samples`](crate::time::time_samples)).
//! 2. The samples are split into `num_chunks` contiguous chunks ([`chunks::partition`]).
//! 3. Every chunk is scanned on the rayon pool with its **own clone** of the propagator
//!    ([`scanner::scan_chunk`]): the satellite is propagated, converted to the Earth-fixed frame
//!    and tested against the facilities ([`visibility::is_visible`]). Visibility transitions are
//!    refined by bisection ([`crossing::find_crossing`]).
//! 4. Once every chunk is done, the per-chunk accesses are concatenated in chunk order and the
//!    accesses split by a chunk boundary are fused back ([`chunks::merge_chunk_accesses`]).
//! 5. The accesses and the gaps are exposed as [`IntervalTable`]s.
//!
//! The result does not depend on the number of chunks nor on the thread scheduling.
//!
//! ## Example
//!
//! ```rust, no_run
//! use satmission::access::{ground_facility_accesses, AccessConfig};
//! use satmission::geodesy::GeodeticPosition;
//! use satmission::orbit_type::keplerian_element::KeplerianElements;
//! use satmission::propagator::SecularPropagator;
//! use satmission::ref_system::TodToPef;
//!
//! let elements = KeplerianElements {
//!     epoch: 2459215.5,
//!     semi_major_axis: 7130.982e3,
//!     eccentricity: 0.001111,
//!     inclination: 98.405_f64.to_radians(),
//!     raan: 1.36,
//!     arg_of_perigee: std::f64::consts::FRAC_PI_2,
//!     true_anomaly: 0.0,
//! };
//! let propagator = SecularPropagator::j2(elements)?;
//! let facilities = [GeodeticPosition::new(0.0, 0.0, 0.0)];
//! let config = AccessConfig::builder().unit(":m").build()?;
//!
//! let accesses = ground_facility_accesses(&propagator, &facilities, &TodToPef, &config)?;
//! println!("{accesses}");
//! # Ok::<(), satmission::mission_errors::MissionError>(())
//! ```

use std::cmp::Ordering::{Equal, Greater};
use std::fmt;
use std::ops::Range;

use hifitime::Epoch;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{Radian, Second, RADEG, SECONDS_PER_DAY};
use crate::geodesy::GeodeticPosition;
use crate::mission_errors::MissionError;
use crate::propagator::Propagator;
use crate::ref_system::FrameConversion;
use crate::time::{fits_sample_limit, jd_to_epoch, time_samples, MAX_TIME_SAMPLES};

pub mod chunks;
pub mod crossing;
pub mod scanner;
pub mod tables;
pub mod visibility;

use chunks::{complement_intervals, merge_chunk_accesses, partition, scan_range};
use scanner::{scan_chunk, CrossingSettings};
pub use tables::{IntervalKind, IntervalTable, TimeInterval, TimeUnit};
use visibility::{is_visible, GroundFacility};
pub use visibility::Reduction;

/// Configuration of an access analysis.
///
/// Times are offsets in seconds from the propagator epoch. Build it with
/// [`AccessConfig::builder`] to get the parameters validated, or fill the public fields directly:
/// the analysis entry points validate them again before scanning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Length of the analysis window, seconds.
    pub duration: Second,
    /// Start of the analysis window, seconds after the propagator epoch.
    pub initial_time: Second,
    /// Minimum elevation for a facility to see the satellite (strict), radians.
    pub minimum_elevation: Radian,
    /// Sampling step, seconds. Accesses shorter than the step may be missed.
    pub step: Second,
    /// Number of chunks the samples are split into. `None` uses one chunk per worker thread.
    pub num_chunks: Option<usize>,
    /// Size of a dedicated thread pool. `None` runs on the global rayon pool.
    pub num_workers: Option<usize>,
    /// Unit of the duration column of the tables.
    pub unit: TimeUnit,
    /// Width of the bisection bracket at which a crossing is accepted, seconds.
    pub crossing_tolerance: Second,
    /// Maximum number of bisection steps per crossing.
    pub crossing_max_iterations: usize,
    /// Reduction of the per-facility visibility flags.
    #[serde(skip)]
    pub reduction: Reduction,
}

impl Default for AccessConfig {
    fn default() -> Self {
        AccessConfig {
            duration: SECONDS_PER_DAY,
            initial_time: 0.0,
            minimum_elevation: 10.0 * RADEG,
            step: 60.0,
            num_chunks: None,
            num_workers: None,
            unit: TimeUnit::Seconds,
            crossing_tolerance: 1e-3,
            crossing_max_iterations: crossing::DEFAULT_MAX_ITERATIONS,
            reduction: Reduction::Any,
        }
    }
}

/// Return true iff x > 0.0 and comparable (i.e., not NaN).
#[inline]
fn gt0(x: f64) -> bool {
    x.partial_cmp(&0.0) == Some(Greater)
}

/// Return true iff x >= 0.0 and comparable (i.e., not NaN).
#[inline]
fn ge0(x: f64) -> bool {
    matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
}

impl AccessConfig {
    pub fn builder() -> AccessConfigBuilder {
        AccessConfigBuilder::new()
    }

    /// Check the consistency of the parameters.
    ///
    /// Return
    /// ------
    /// * [`MissionError::InvalidAccessParameter`] naming the first offending parameter
    pub fn validate(&self) -> Result<(), MissionError> {
        if !ge0(self.duration) || !self.duration.is_finite() {
            return Err(MissionError::InvalidAccessParameter(format!(
                "duration must be a non-negative number of seconds, got {}",
                self.duration
            )));
        }
        if !self.initial_time.is_finite() {
            return Err(MissionError::InvalidAccessParameter(
                "initial_time must be finite".into(),
            ));
        }
        if !gt0(self.step) || !self.step.is_finite() {
            return Err(MissionError::InvalidAccessParameter(format!(
                "step must be a positive number of seconds, got {}",
                self.step
            )));
        }
        if !fits_sample_limit(self.duration, self.step) {
            return Err(MissionError::InvalidAccessParameter(format!(
                "duration / step must stay below {MAX_TIME_SAMPLES} samples, got {} s / {} s",
                self.duration, self.step
            )));
        }
        if !(-90.0 * RADEG..=90.0 * RADEG).contains(&self.minimum_elevation) {
            return Err(MissionError::InvalidAccessParameter(format!(
                "minimum_elevation must be in [-π/2, π/2], got {} rad",
                self.minimum_elevation
            )));
        }
        if self.num_chunks == Some(0) {
            return Err(MissionError::InvalidAccessParameter(
                "num_chunks must be at least 1".into(),
            ));
        }
        if self.num_workers == Some(0) {
            return Err(MissionError::InvalidAccessParameter(
                "num_workers must be at least 1".into(),
            ));
        }
        if !gt0(self.crossing_tolerance) {
            return Err(MissionError::InvalidAccessParameter(format!(
                "crossing_tolerance must be positive, got {}",
                self.crossing_tolerance
            )));
        }
        if self.crossing_max_iterations == 0 {
            return Err(MissionError::InvalidAccessParameter(
                "crossing_max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Number of chunks requested: `num_chunks`, else one per worker thread.
    fn effective_num_chunks(&self) -> usize {
        self.num_chunks
            .or(self.num_workers)
            .unwrap_or_else(rayon::current_num_threads)
    }
}

impl fmt::Display for AccessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chunks = self
            .num_chunks
            .map_or_else(|| "auto".to_string(), |n| n.to_string());
        let workers = self
            .num_workers
            .map_or_else(|| "global".to_string(), |n| n.to_string());

        if f.alternate() {
            writeln!(f, "Access Analysis Parameters")?;
            writeln!(f, "--------------------------")?;
            writeln!(f, "  duration                = {:.3} s", self.duration)?;
            writeln!(f, "  initial_time            = {:.3} s", self.initial_time)?;
            writeln!(
                f,
                "  minimum_elevation       = {:.6} rad ({:.3}°)",
                self.minimum_elevation,
                self.minimum_elevation / RADEG
            )?;
            writeln!(f, "  step                    = {:.3} s", self.step)?;
            writeln!(f, "  reduction               = {:?}", self.reduction)?;
            writeln!(f, "  num_chunks              = {chunks}")?;
            writeln!(f, "  num_workers             = {workers}")?;
            writeln!(f, "  unit                    = {}", self.unit)?;
            writeln!(f, "  crossing_tolerance      = {:.1e} s", self.crossing_tolerance)?;
            write!(
                f,
                "  crossing_max_iterations = {}",
                self.crossing_max_iterations
            )
        } else {
            write!(
                f,
                "AccessConfig(duration={} s, initial_time={} s, min_elev={:.3}°, step={} s, reduction={:?}, chunks={}, unit={})",
                self.duration,
                self.initial_time,
                self.minimum_elevation / RADEG,
                self.step,
                self.reduction,
                chunks,
                self.unit,
            )
        }
    }
}

/// Builder for [`AccessConfig`], with validation.
#[derive(Debug, Clone, Default)]
pub struct AccessConfigBuilder {
    config: AccessConfig,
}

impl AccessConfigBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            config: AccessConfig::default(),
        }
    }

    pub fn duration(mut self, v: Second) -> Self {
        self.config.duration = v;
        self
    }
    pub fn initial_time(mut self, v: Second) -> Self {
        self.config.initial_time = v;
        self
    }
    pub fn minimum_elevation(mut self, v: Radian) -> Self {
        self.config.minimum_elevation = v;
        self
    }
    pub fn step(mut self, v: Second) -> Self {
        self.config.step = v;
        self
    }
    pub fn reduction(mut self, v: Reduction) -> Self {
        self.config.reduction = v;
        self
    }
    pub fn num_chunks(mut self, v: usize) -> Self {
        self.config.num_chunks = Some(v);
        self
    }
    pub fn num_workers(mut self, v: usize) -> Self {
        self.config.num_workers = Some(v);
        self
    }
    pub fn unit(mut self, v: impl Into<TimeUnit>) -> Self {
        self.config.unit = v.into();
        self
    }
    pub fn crossing_tolerance(mut self, v: Second) -> Self {
        self.config.crossing_tolerance = v;
        self
    }
    pub fn crossing_max_iterations(mut self, v: usize) -> Self {
        self.config.crossing_max_iterations = v;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<AccessConfig, MissionError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Merged accesses of an analysis, from which the access and gap tables are built.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessReport {
    epoch: Epoch,
    window: TimeInterval,
    unit: TimeUnit,
    accesses: Vec<TimeInterval>,
}

impl AccessReport {
    /// Epoch of the propagator; every interval is an offset from it.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Analysis window.
    pub fn window(&self) -> TimeInterval {
        self.window
    }

    /// Ordered, disjoint accesses.
    pub fn accesses(&self) -> &[TimeInterval] {
        &self.accesses
    }

    /// Ordered gaps; together with the accesses they tile the window.
    pub fn gaps(&self) -> Vec<TimeInterval> {
        complement_intervals(&self.accesses, self.window)
    }

    /// Access table with durations in the configured unit.
    pub fn access_table(&self) -> IntervalTable {
        self.access_table_in(self.unit)
    }

    pub fn access_table_in(&self, unit: TimeUnit) -> IntervalTable {
        IntervalTable::from_intervals(IntervalKind::Access, self.epoch, &self.accesses, unit)
    }

    /// Gap table with durations in the configured unit.
    pub fn gap_table(&self) -> IntervalTable {
        self.gap_table_in(self.unit)
    }

    pub fn gap_table_in(&self, unit: TimeUnit) -> IntervalTable {
        IntervalTable::from_intervals(IntervalKind::Gap, self.epoch, &self.gaps(), unit)
    }
}

/// Compute the accesses of a satellite to a set of ground facilities.
///
/// Arguments
/// ---------
/// * `propagator`: orbit propagator, cloned once per chunk and never mutated
/// * `facilities`: WGS84 geodetic positions of the facilities
/// * `frame`: inertial to Earth-fixed conversion, e.g. [`TodToPef`](crate::ref_system::TodToPef)
/// * `config`: analysis parameters
///
/// Return
/// ------
/// * the merged accesses, or the first configuration, propagation or thread pool error
pub fn compute_accesses<P, C>(
    propagator: &P,
    facilities: &[GeodeticPosition],
    frame: &C,
    config: &AccessConfig,
) -> Result<AccessReport, MissionError>
where
    P: Propagator,
    C: FrameConversion,
{
    config.validate()?;

    let epoch_jd = propagator.epoch();
    let window = TimeInterval::new(config.initial_time, config.initial_time + config.duration);
    let report = |accesses| AccessReport {
        epoch: jd_to_epoch(epoch_jd),
        window,
        unit: config.unit,
        accesses,
    };

    if facilities.is_empty() {
        debug!("no ground facility, no access");
        return Ok(report(Vec::new()));
    }

    let stations: Vec<GroundFacility> = facilities.iter().copied().map(GroundFacility::new).collect();
    let samples = time_samples(config.initial_time, config.duration, config.step);
    let chunks = partition(samples.len(), config.effective_num_chunks());
    let settings = CrossingSettings {
        tolerance: config.crossing_tolerance,
        max_iterations: config.crossing_max_iterations,
    };

    debug!(
        samples = samples.len(),
        chunks = chunks.len(),
        facilities = stations.len(),
        "scanning ground facility accesses"
    );

    // each chunk owns its propagator
    let jobs: Vec<(Range<usize>, P)> = chunks
        .iter()
        .map(|chunk| (scan_range(chunk, samples.len()), propagator.clone()))
        .collect();

    let scan = |(range, mut propagator): (Range<usize>, P)| -> Result<Vec<TimeInterval>, MissionError> {
        let visible = |t: Second| -> Result<bool, MissionError> {
            let (r_inertial, _) = propagator.propagate(t)?;
            let r_fixed = frame.to_fixed(&r_inertial, epoch_jd + t / SECONDS_PER_DAY)?;
            Ok(is_visible(
                &r_fixed,
                &stations,
                config.minimum_elevation,
                &config.reduction,
            ))
        };
        let accesses = scan_chunk(&samples[range.clone()], visible, settings)?;
        debug!(?range, accesses = accesses.len(), "chunk done");
        Ok(accesses)
    };

    let per_chunk: Vec<Vec<TimeInterval>> = match config.num_workers {
        Some(num_workers) => ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .build()?
            .install(|| jobs.into_par_iter().map(scan).collect::<Result<Vec<_>, _>>())?,
        None => jobs
            .into_par_iter()
            .map(scan)
            .collect::<Result<Vec<_>, _>>()?,
    };

    let accesses = merge_chunk_accesses(per_chunk);
    info!(accesses = accesses.len(), "ground facility accesses computed");

    Ok(report(accesses))
}

/// Access table of a satellite to a set of ground facilities.
///
/// See [`compute_accesses`] for the arguments.
pub fn ground_facility_accesses<P, C>(
    propagator: &P,
    facilities: &[GeodeticPosition],
    frame: &C,
    config: &AccessConfig,
) -> Result<IntervalTable, MissionError>
where
    P: Propagator,
    C: FrameConversion,
{
    Ok(compute_accesses(propagator, facilities, frame, config)?.access_table())
}

/// Gap table of a satellite to a set of ground facilities: the complement of the accesses
/// inside the analysis window.
///
/// See [`compute_accesses`] for the arguments.
pub fn ground_facility_gaps<P, C>(
    propagator: &P,
    facilities: &[GeodeticPosition],
    frame: &C,
    config: &AccessConfig,
) -> Result<IntervalTable, MissionError>
where
    P: Propagator,
    C: FrameConversion,
{
    Ok(compute_accesses(propagator, facilities, frame, config)?.gap_table())
}
