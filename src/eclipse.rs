//! # Eclipse analysis
//!
//! Lighting condition of the satellite under a conical Earth shadow model, and per-orbit
//! durations of sunlight, penumbra and umbra.
//!
//! The shadow cones are built from the apparent radii of the Sun and of a spherical Earth. At a
//! distance `x` behind the Earth, along the anti-Sun direction, the umbra and penumbra radii are
//!
//! ```text
//! α_u = asin((R☉ − R⊕) / d☉)      r_u = R⊕ / cos α_u − x tan α_u
//! α_p = asin((R☉ + R⊕) / d☉)      r_p = R⊕ / cos α_p + x tan α_p
//! ```
//!
//! Orbits are analysed in parallel, one task per orbit, each on its own clone of the propagator.

use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};
use hifitime::Epoch;
use nalgebra::Vector3;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::access::crossing::{find_crossing, DEFAULT_MAX_ITERATIONS};
use crate::constants::{Second, EARTH_GRAV_RADIUS, SECONDS_PER_DAY, SUN_RADIUS};
use crate::mission_errors::MissionError;
use crate::propagator::Propagator;
use crate::sun::sun_position;
use crate::time::{check_window, jd_to_epoch, offset_epoch, time_samples};

/// Bisection tolerance on the shadow entry and exit instants, seconds.
const ECLIPSE_TOLERANCE: Second = 1e-3;

/// Lighting condition of a satellite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightingCondition {
    Sunlight,
    Penumbra,
    Umbra,
}

/// Lighting condition of a satellite at `r_sat` with the Sun at `r_sun`, both geocentric and
/// in the same frame, meters.
pub fn lighting_condition(r_sat: &Vector3<f64>, r_sun: &Vector3<f64>) -> LightingCondition {
    let sun_distance = r_sun.norm();
    let sun_dir = r_sun / sun_distance;

    let along = r_sat.dot(&sun_dir);
    if along >= 0.0 {
        return LightingCondition::Sunlight;
    }

    let x = -along;
    let off_axis = (r_sat + x * sun_dir).norm();

    let alpha_u = ((SUN_RADIUS - EARTH_GRAV_RADIUS) / sun_distance).asin();
    let alpha_p = ((SUN_RADIUS + EARTH_GRAV_RADIUS) / sun_distance).asin();

    let umbra_radius = EARTH_GRAV_RADIUS / alpha_u.cos() - x * alpha_u.tan();
    let penumbra_radius = EARTH_GRAV_RADIUS / alpha_p.cos() + x * alpha_p.tan();

    if off_axis < umbra_radius {
        LightingCondition::Umbra
    } else if off_axis < penumbra_radius {
        LightingCondition::Penumbra
    } else {
        LightingCondition::Sunlight
    }
}

/// Time spent in each lighting condition during one orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLighting {
    pub orbit_start: Epoch,
    pub sunlight: Second,
    pub penumbra: Second,
    pub umbra: Second,
}

impl OrbitLighting {
    fn new(orbit_start: Epoch) -> Self {
        OrbitLighting {
            orbit_start,
            sunlight: 0.0,
            penumbra: 0.0,
            umbra: 0.0,
        }
    }

    fn add(&mut self, condition: LightingCondition, seconds: Second) {
        match condition {
            LightingCondition::Sunlight => self.sunlight += seconds,
            LightingCondition::Penumbra => self.penumbra += seconds,
            LightingCondition::Umbra => self.umbra += seconds,
        }
    }

    /// Duration of the analysed orbit segment.
    pub fn duration(&self) -> Second {
        self.sunlight + self.penumbra + self.umbra
    }

    /// Penumbra plus umbra.
    pub fn eclipse(&self) -> Second {
        self.penumbra + self.umbra
    }
}

/// Per-orbit lighting durations over an analysis window.
#[derive(Debug, Clone, PartialEq)]
pub struct EclipseSummary {
    rows: Vec<OrbitLighting>,
}

impl EclipseSummary {
    pub fn rows(&self) -> &[OrbitLighting] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Longest umbra over the window, seconds.
    pub fn max_umbra(&self) -> Second {
        self.rows.iter().map(|row| row.umbra).fold(0.0, f64::max)
    }
}

impl fmt::Display for EclipseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("orbit_start (UTC)"),
                Cell::new("sunlight [min]"),
                Cell::new("penumbra [min]"),
                Cell::new("umbra [min]"),
            ]);

        for row in &self.rows {
            table.add_row(Row::from(vec![
                Cell::new(row.orbit_start).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", row.sunlight / 60.0)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", row.penumbra / 60.0)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", row.umbra / 60.0)).set_alignment(CellAlignment::Right),
            ]));
        }

        writeln!(f, "Eclipse times per orbit.")?;
        write!(f, "{table}")
    }
}

/// Lighting durations over `[start, end]`, sampled every `step` seconds.
///
/// A change of condition between two samples is located by bisection. When the condition jumps
/// over an intermediate one (sunlight straight to umbra with a coarse step), the exit of the
/// previous condition and the entry into the new one are refined separately.
fn orbit_lighting<P: Propagator>(
    propagator: &mut P,
    start: Second,
    end: Second,
    step: Second,
) -> Result<OrbitLighting, MissionError> {
    let epoch_jd = propagator.epoch();
    let mut condition_at = |t: Second| -> Result<LightingCondition, MissionError> {
        let (r, _) = propagator.propagate(t)?;
        Ok(lighting_condition(&r, &sun_position(epoch_jd + t / SECONDS_PER_DAY)))
    };

    let mut lighting = OrbitLighting::new(offset_epoch(jd_to_epoch(epoch_jd), start));
    let samples = time_samples(start, end - start, step);

    let mut previous_t = start;
    let mut current = condition_at(start)?;
    let mut since = start;

    for &t in samples.iter().skip(1) {
        let condition = condition_at(t)?;
        if condition == current {
            previous_t = t;
            continue;
        }

        let left = current;
        let exit = find_crossing(
            |x| -> Result<bool, MissionError> { Ok(condition_at(x)? == left) },
            previous_t,
            t,
            true,
            false,
            ECLIPSE_TOLERANCE,
            DEFAULT_MAX_ITERATIONS,
        )?;
        lighting.add(left, exit - since);
        since = exit;

        let between = condition_at(exit)?;
        if between != condition {
            let entry = find_crossing(
                |x| -> Result<bool, MissionError> { Ok(condition_at(x)? == condition) },
                exit,
                t,
                false,
                true,
                ECLIPSE_TOLERANCE,
                DEFAULT_MAX_ITERATIONS,
            )?;
            lighting.add(between, entry - exit);
            since = entry;
        }

        current = condition;
        previous_t = t;
    }

    lighting.add(current, end - since);
    Ok(lighting)
}

/// Per-orbit sunlight, penumbra and umbra durations over `[initial_time, initial_time + duration]`.
///
/// The window is cut into consecutive segments of one Keplerian period, the last one possibly
/// shorter. Each segment is sampled every `step` seconds.
///
/// Arguments
/// ---------
/// * `propagator`: orbit propagator, cloned once per orbit
/// * `initial_time`: start of the window, seconds from the propagator epoch
/// * `duration`: length of the window, seconds
/// * `step`: sampling step, seconds
pub fn eclipse_time_summary<P: Propagator>(
    propagator: &P,
    initial_time: Second,
    duration: Second,
    step: Second,
) -> Result<EclipseSummary, MissionError> {
    check_window(initial_time, duration, step)?;

    let period = propagator.elements().period();
    let end = initial_time + duration;
    let num_orbits = ((duration / period).ceil() as usize).max(1);

    // each orbit owns its propagator
    let jobs: Vec<(Second, Second, P)> = (0..num_orbits)
        .map(|k| {
            let start = initial_time + k as f64 * period;
            (start, (start + period).min(end))
        })
        .filter(|(start, stop)| stop > start || duration == 0.0)
        .map(|(start, stop)| (start, stop, propagator.clone()))
        .collect();

    debug!(orbits = jobs.len(), period, "scanning eclipses");

    let rows = jobs
        .into_par_iter()
        .map(|(start, stop, mut propagator)| orbit_lighting(&mut propagator, start, stop, step))
        .collect::<Result<Vec<_>, MissionError>>()?;

    info!(orbits = rows.len(), "eclipse summary computed");
    Ok(EclipseSummary { rows })
}
