use nalgebra::Vector3;

use crate::constants::{
    JulianDate, Meter, Radian, Second, EARTH_GRAV_PARAM, EARTH_GRAV_RADIUS, EARTH_J2,
    SECONDS_PER_DAY,
};
use crate::kepler::{mean_to_true_anomaly, principal_angle};
use crate::mission_errors::MissionError;
use crate::orbit_type::keplerian_element::KeplerianElements;

use super::Propagator;

/// Force model of a [`SecularPropagator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerturbationModel {
    /// Unperturbed Keplerian motion.
    TwoBody,
    /// First-order secular effects of the J2 zonal harmonic on Ω, ω and M.
    J2,
}

/// First-order J2 secular rates `(n̄, Ω̇, ω̇)` in rad/s.
///
/// Arguments
/// ---------
/// * `semi_major_axis`: meters
/// * `eccentricity`: `0 ≤ e < 1`
/// * `inclination`: radians
pub fn j2_secular_rates(semi_major_axis: Meter, eccentricity: f64, inclination: Radian) -> (f64, f64, f64) {
    let e2 = eccentricity * eccentricity;
    let p = semi_major_axis * (1.0 - e2);
    let k = EARTH_J2 * (EARTH_GRAV_RADIUS / p).powi(2);
    let sin2_i = inclination.sin().powi(2);

    let n0 = (EARTH_GRAV_PARAM / semi_major_axis.powi(3)).sqrt();
    let n_bar = n0 * (1.0 + 0.75 * k * (1.0 - e2).sqrt() * (2.0 - 3.0 * sin2_i));

    (
        n_bar,
        -1.5 * n_bar * k * inclination.cos(),
        0.75 * n_bar * k * (4.0 - 5.0 * sin2_i),
    )
}

/// Analytical propagator applying linear secular rates to the mean elements.
///
/// With [`PerturbationModel::J2`] the rates are
///
/// ```text
/// k   = J2 (R⊕ / p)²
/// n̄   = n0 [1 + ¾ k √(1 − e²) (2 − 3 sin² i)]
/// Ω̇   = −³⁄₂ n̄ k cos i
/// ω̇   =  ¾ n̄ k (4 − 5 sin² i)
/// ```
///
/// where `p` is the semi-latus rectum. Semi-major axis, eccentricity and inclination are constant.
#[derive(Debug, Clone)]
pub struct SecularPropagator {
    model: PerturbationModel,
    initial: KeplerianElements,
    mean_anomaly_at_epoch: f64,
    mean_motion: f64,
    raan_rate: f64,
    arg_of_perigee_rate: f64,
    current: KeplerianElements,
}

impl SecularPropagator {
    /// Build a propagator of the given model, validating the elements.
    pub fn new(
        elements: KeplerianElements,
        model: PerturbationModel,
    ) -> Result<Self, MissionError> {
        elements.validate()?;

        let (mean_motion, raan_rate, arg_of_perigee_rate) = match model {
            PerturbationModel::TwoBody => (elements.mean_motion(), 0.0, 0.0),
            PerturbationModel::J2 => j2_secular_rates(
                elements.semi_major_axis,
                elements.eccentricity,
                elements.inclination,
            ),
        };

        Ok(SecularPropagator {
            model,
            initial: elements,
            mean_anomaly_at_epoch: elements.mean_anomaly(),
            mean_motion,
            raan_rate,
            arg_of_perigee_rate,
            current: elements,
        })
    }

    /// Two-body propagator.
    pub fn two_body(elements: KeplerianElements) -> Result<Self, MissionError> {
        Self::new(elements, PerturbationModel::TwoBody)
    }

    /// J2 secular propagator.
    pub fn j2(elements: KeplerianElements) -> Result<Self, MissionError> {
        Self::new(elements, PerturbationModel::J2)
    }

    pub fn model(&self) -> PerturbationModel {
        self.model
    }

    /// Perturbed mean motion, rad/s.
    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    /// Secular drift of the RAAN, rad/s.
    pub fn raan_rate(&self) -> f64 {
        self.raan_rate
    }

    /// Secular drift of the argument of perigee, rad/s.
    pub fn arg_of_perigee_rate(&self) -> f64 {
        self.arg_of_perigee_rate
    }

    /// Elements at `t` seconds after the epoch, without touching the cached state.
    pub fn elements_at(&self, t: Second) -> Result<KeplerianElements, MissionError> {
        let mean_anomaly = self.mean_anomaly_at_epoch + self.mean_motion * t;
        let true_anomaly = mean_to_true_anomaly(mean_anomaly, self.initial.eccentricity)?;

        Ok(KeplerianElements {
            epoch: self.initial.epoch + t / SECONDS_PER_DAY,
            raan: principal_angle(self.initial.raan + self.raan_rate * t),
            arg_of_perigee: principal_angle(self.initial.arg_of_perigee + self.arg_of_perigee_rate * t),
            true_anomaly,
            ..self.initial
        })
    }
}

impl Propagator for SecularPropagator {
    fn epoch(&self) -> JulianDate {
        self.initial.epoch
    }

    fn propagate(&mut self, t: Second) -> Result<(Vector3<f64>, Vector3<f64>), MissionError> {
        self.current = self.elements_at(t)?;
        Ok(self.current.to_state_vector())
    }

    fn elements(&self) -> &KeplerianElements {
        &self.current
    }
}
