//! Bisection refinement of the instant at which a discrete-valued function of time changes state.

use std::fmt::Debug;

use tracing::trace;

use crate::constants::Second;
use crate::mission_errors::MissionError;

/// Default iteration budget of [`find_crossing`].
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Locate the transition of `f` from `state0` to `state1` inside `[t0, t1]`.
///
/// The bracket is halved until its width drops below `tolerance` or `max_iterations` midpoints
/// have been evaluated. Running out of iterations is not an error: the current estimate is
/// returned.
///
/// Arguments
/// ---------
/// * `f`: the state function, `f(t0) == state0` and `f(t1) == state1` are assumed
/// * `t0`, `t1`: bracket, `t0 < t1`
/// * `state0`, `state1`: the two distinct states around the transition
/// * `tolerance`: bracket width at which the search stops, seconds
/// * `max_iterations`: maximum number of evaluations of `f`
///
/// Return
/// ------
/// * the upper bound of the final bracket, which always evaluates to `state1`
/// * [`MissionError::UnexpectedState`] when `f` returns a value equal to neither state at a
///   midpoint; errors of `f` itself are propagated
pub fn find_crossing<S, F>(
    mut f: F,
    t0: Second,
    t1: Second,
    state0: S,
    state1: S,
    tolerance: Second,
    max_iterations: usize,
) -> Result<Second, MissionError>
where
    S: PartialEq + Debug,
    F: FnMut(Second) -> Result<S, MissionError>,
{
    let mut lower = t0;
    let mut upper = t1;

    for _ in 0..max_iterations {
        if upper - lower < tolerance {
            break;
        }

        let middle = (lower + upper) / 2.0;
        let state = f(middle)?;

        if state == state0 {
            lower = middle;
        } else if state == state1 {
            upper = middle;
        } else {
            return Err(MissionError::UnexpectedState(format!(
                "{state:?} at t = {middle} s, expected {state0:?} or {state1:?}"
            )));
        }
    }

    trace!(lower, upper, "crossing refined");
    Ok(upper)
}
