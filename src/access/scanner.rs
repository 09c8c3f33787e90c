//! Visibility state machine over the time samples of one chunk.

use tracing::trace;

use crate::constants::Second;
use crate::mission_errors::MissionError;

use super::crossing::find_crossing;
use super::tables::TimeInterval;

/// State of a scan pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    /// No sample evaluated yet.
    Initial,
    NotVisible,
    Visible,
}

/// Refinement settings of the crossings found during a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingSettings {
    pub tolerance: Second,
    pub max_iterations: usize,
}

/// Scan ordered time samples and return the access intervals they contain.
///
/// An access open at the first sample starts exactly at that sample, an access still open at the
/// last sample ends exactly at it; every other boundary is refined by bisection between the two
/// samples that bracket it. Accesses of zero length (a single visible sample at the end of the
/// slice) are not reported.
///
/// Arguments
/// ---------
/// * `samples`: strictly increasing time offsets, seconds
/// * `visible`: visibility at a time offset
/// * `settings`: crossing refinement tolerance and iteration budget
///
/// Return
/// ------
/// * the ordered, disjoint access intervals, or the first error raised by `visible`
pub fn scan_chunk<V>(
    samples: &[Second],
    mut visible: V,
    settings: CrossingSettings,
) -> Result<Vec<TimeInterval>, MissionError>
where
    V: FnMut(Second) -> Result<bool, MissionError>,
{
    let mut accesses = Vec::new();
    let mut state = VisibilityState::Initial;
    let mut access_begin: Option<Second> = None;
    let mut previous: Option<Second> = None;

    for &t in samples {
        let visible_now = visible(t)?;

        state = match (state, visible_now, previous) {
            (VisibilityState::Initial, true, _) => {
                access_begin = Some(t);
                VisibilityState::Visible
            }
            (VisibilityState::Initial, false, _) => VisibilityState::NotVisible,
            (VisibilityState::NotVisible, true, Some(t_prev)) => {
                let begin = find_crossing(
                    &mut visible,
                    t_prev,
                    t,
                    false,
                    true,
                    settings.tolerance,
                    settings.max_iterations,
                )?;
                access_begin = Some(begin);
                VisibilityState::Visible
            }
            (VisibilityState::Visible, false, Some(t_prev)) => {
                let end = find_crossing(
                    &mut visible,
                    t_prev,
                    t,
                    true,
                    false,
                    settings.tolerance,
                    settings.max_iterations,
                )?;
                if let Some(begin) = access_begin.take() {
                    accesses.push(TimeInterval::new(begin, end));
                }
                VisibilityState::NotVisible
            }
            (current, _, _) => current,
        };

        previous = Some(t);
    }

    if let (VisibilityState::Visible, Some(begin), Some(last)) = (state, access_begin, previous) {
        if last > begin {
            accesses.push(TimeInterval::new(begin, last));
        }
    }

    trace!(
        first = samples.first().copied(),
        last = samples.last().copied(),
        accesses = accesses.len(),
        "chunk scanned"
    );

    Ok(accesses)
}
