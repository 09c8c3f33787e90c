//! Satellite mission analysis: ground facility accesses and gaps, Sun-synchronous and frozen
//! orbit design, beta angle, eclipse times and ground track.
//!
//! The main entry points are [`access::ground_facility_accesses`] and
//! [`access::ground_facility_gaps`].

pub mod access;
pub mod beta_angle;
pub mod constants;
pub mod earth_orientation;
pub mod eclipse;
pub mod frozen_orbit;
pub mod geodesy;
pub mod ground_track;
pub mod kepler;
pub mod mission_errors;
pub mod orbit_type;
pub mod propagator;
pub mod ref_system;
pub mod sun;
pub mod sun_sync;
pub mod time;
