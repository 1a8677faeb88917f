//! Lorentz boost of the final-state particles into a moving frame.

use crate::particle::FourMomentum;
use crate::stats::{direction_from_polar, sample_polar, uniform};
use nalgebra::Vector3;
use rand::Rng;
use serde::Serialize;

/// Boost velocity `beta` (in units of c) and its Lorentz factor.
///
/// `gamma` is stored rather than recomputed from `beta`, which rounds to a
/// unit vector for ultra-relativistic boosts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Boost {
    pub beta: Vector3<f64>,
    pub gamma: f64,
}

impl Boost {
    pub fn new(bx: f64, by: f64, bz: f64) -> Self {
        let beta = Vector3::new(bx, by, bz);
        Self {
            beta,
            gamma: 1.0 / (1.0 - beta.norm_squared()).sqrt(),
        }
    }

    /// Boost of the given `gamma * beta` magnitude along unit `direction`.
    pub fn from_gamma_beta(gamma_beta: f64, direction: [f64; 3]) -> Self {
        let gamma = gamma_beta.hypot(1.0);
        let beta = gamma_beta / gamma;
        Self {
            beta: Vector3::new(direction[0], direction[1], direction[2]) * beta,
            gamma,
        }
    }

    pub fn inverse(&self) -> Self {
        Self {
            beta: -self.beta,
            gamma: self.gamma,
        }
    }

    /// Transform `p` into the frame moving with `-beta`, i.e. give it
    /// velocity `beta` if it was at rest.
    pub fn apply(&self, p: &FourMomentum) -> FourMomentum {
        if self.beta.norm_squared() == 0.0 {
            return *p;
        }
        let gamma = self.gamma;
        let bp = self.beta.dot(&p.momentum);
        // (gamma - 1) / beta^2, written without the beta^2 division
        let gamma2 = gamma / (1.0 + 1.0 / gamma);

        FourMomentum {
            momentum: p.momentum + self.beta * (gamma2 * bp + gamma * p.energy),
            energy: gamma * (p.energy + bp),
        }
    }

    pub fn apply_in_place(&self, p: &mut FourMomentum) {
        *p = self.apply(p);
    }
}

/// Draws the per-event boost from a `gamma * beta` range.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostSampler {
    pub gamma_beta_min: f64,
    pub gamma_beta_max: f64,
}

impl BoostSampler {
    pub fn new(gamma_beta_min: f64, gamma_beta_max: f64) -> Self {
        Self {
            gamma_beta_min,
            gamma_beta_max,
        }
    }

    /// Magnitude is flat in `gamma * beta` (fixed at the lower bound for a
    /// degenerate range), direction is isotropic.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Boost {
        let gamma_beta = if self.gamma_beta_max > self.gamma_beta_min {
            uniform(rng, self.gamma_beta_min, self.gamma_beta_max)
        } else {
            self.gamma_beta_min
        };
        let (mu, phi) = sample_polar(rng);
        let boost = Boost::from_gamma_beta(gamma_beta, direction_from_polar(mu, phi));

        tracing::debug!(gamma_beta, cos_theta = mu, phi, beta = ?boost.beta, "sampled boost");
        boost
    }
}
