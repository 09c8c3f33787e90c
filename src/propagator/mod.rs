//! # Orbit propagation
//!
//! The analyses of this crate only need a propagator able to answer "where is the satellite
//! `t` seconds after the epoch". This contract is the [`Propagator`] trait.
//!
//! Propagation mutates the propagator (it caches the last propagated elements), so a propagator
//! can never be shared between threads. Parallel analyses clone it once per worker task instead,
//! which is why the trait requires `Clone + Send`.
//!
//! [`SecularPropagator`] is the built-in implementation: a two-body or a J2 secular analytical
//! model.

use nalgebra::Vector3;

use crate::constants::{JulianDate, Second};
use crate::mission_errors::MissionError;
use crate::orbit_type::keplerian_element::KeplerianElements;

mod secular;

pub use secular::{j2_secular_rates, PerturbationModel, SecularPropagator};

/// Orbit propagator contract.
pub trait Propagator: Clone + Send {
    /// Epoch of the propagator, Julian Date (UTC). Time offsets are counted from it.
    fn epoch(&self) -> JulianDate;

    /// Propagate to `t` seconds after the epoch.
    ///
    /// Return
    /// ------
    /// * the inertial position (m) and velocity (m/s)
    fn propagate(&mut self, t: Second) -> Result<(Vector3<f64>, Vector3<f64>), MissionError>;

    /// Orbital elements at the last propagated instant (the initial elements before the first call).
    fn elements(&self) -> &KeplerianElements;
}
