//! # Orbital element representations
//!
//! - [`keplerian_element`](crate::orbit_type::keplerian_element): classical Keplerian elements
//!   `(a, e, i, Ω, ω, f)` of a bound Earth orbit, with the conversion to an inertial state vector.
//!
//! Anomaly conversions and Kepler's equation live in [`crate::kepler`].

pub mod keplerian_element;
