//! Energy-budget reconciliation of the raw per-particle samples.
//!
//! Under the independent policy every raw sample is final. Under the
//! normalized policy the raw kinetic energies are rescaled, either by the
//! per-group fraction cap alone (when the event already carries more than
//! the budget threshold) or by a shared, randomly drawn event budget.

use crate::error::GeneratorError;
use crate::particle::ParticleSample;
use crate::species::SpeciesGroup;
use crate::stats::uniform;
use rand::Rng;
use serde::Serialize;

/// Momenta at or below this (relative to the mass, or absolute for massless
/// particles) are treated as zero by [`momentum_scale_factor`].
pub const DEGENERATE_MOMENTUM: f64 = 1e-12;

/// Multiplicative momentum scale `k` that takes a particle of mass `m` and
/// momentum `p` to kinetic energy `sf * KE`, keeping the mass fixed:
///
/// `k = sqrt(sf * (2(sf-1) m^2 - 2(sf-1) m sqrt(m^2+p^2) + sf p^2)) / p`
///
/// The `m - sqrt(m^2+p^2)` difference is evaluated as `-p^2 / (m + E)` to
/// avoid cancellation for slow heavy particles. Below
/// [`DEGENERATE_MOMENTUM`] the `p -> 0` limit is returned (`sqrt(sf)` for
/// massive, `sf` for massless particles).
pub fn momentum_scale_factor(sf: f64, m: f64, p: f64) -> f64 {
    if p <= DEGENERATE_MOMENTUM * m.max(1.0) {
        return if m > 0.0 { sf.max(0.0).sqrt() } else { sf };
    }
    let energy = (m * m + p * p).sqrt();
    let kinetic = p * p / (m + energy);
    let radicand = sf * (2.0 * (1.0 - sf) * m * kinetic + sf * p * p);
    radicand.max(0.0).sqrt() / p
}

/// Rescale `particle` so its kinetic energy becomes `sf` times the current
/// one. Direction and mass are preserved.
pub fn scale_kinetic_energy(particle: &mut ParticleSample, sf: f64) {
    let k = momentum_scale_factor(sf, particle.mass, particle.p());
    let kinetic = particle.kinetic_energy();
    particle.four_momentum.momentum *= k;
    particle.four_momentum.energy = particle.mass + sf * kinetic;
}

/// Thresholds of the normalized policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub budget_threshold: f64,
    pub unscaled_cap: f64,
    pub budget_ceiling: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnergyPolicy {
    Independent,
    Normalized(Normalization),
}

/// Which reconciliation branch an event took.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "branch", rename_all = "snake_case")]
pub enum Reconciliation {
    /// Raw samples kept as drawn
    Independent,
    /// Normalized policy on an event with no particles
    NoParticles,
    /// Total raw kinetic energy exceeded the threshold; per-group caps
    /// were applied as absolute fractions
    Capped { total_kinetic_energy: f64 },
    /// A shared budget was drawn and every particle scaled by
    /// `scale * cap` with `scale = budget / total_kinetic_energy`
    Budget {
        total_kinetic_energy: f64,
        budget: f64,
        scale: f64,
    },
}

impl EnergyPolicy {
    /// Turn raw samples into final four-momenta, in place.
    ///
    /// `groups` is the table the particles' `group` indices refer to.
    pub fn reconcile<R: Rng + ?Sized>(
        &self,
        particles: &mut [ParticleSample],
        groups: &[SpeciesGroup],
        rng: &mut R,
    ) -> Result<Reconciliation, GeneratorError> {
        let norm = match self {
            EnergyPolicy::Independent => return Ok(Reconciliation::Independent),
            EnergyPolicy::Normalized(norm) => norm,
        };
        if particles.is_empty() {
            return Ok(Reconciliation::NoParticles);
        }

        let total_kinetic_energy: f64 = particles.iter().map(|p| p.kinetic_energy()).sum();
        tracing::debug!(total_kinetic_energy, "reconciling raw kinetic energy");

        let outcome = if total_kinetic_energy > norm.budget_threshold {
            for particle in particles.iter_mut() {
                let cap = groups[particle.group].fraction_cap;
                if cap != norm.unscaled_cap {
                    scale_kinetic_energy(particle, cap);
                }
            }
            Reconciliation::Capped {
                total_kinetic_energy,
            }
        } else {
            if !(total_kinetic_energy > 0.0) {
                return Err(GeneratorError::NumericDegeneracy(format!(
                    "total raw kinetic energy {} leaves nothing to rescale",
                    total_kinetic_energy
                )));
            }
            let budget = uniform(rng, 0.0, norm.budget_ceiling);
            let scale = budget / total_kinetic_energy;
            for particle in particles.iter_mut() {
                let cap = groups[particle.group].fraction_cap;
                scale_kinetic_energy(particle, scale * cap);
            }
            tracing::debug!(budget, scale, "applied shared kinetic energy budget");
            Reconciliation::Budget {
                total_kinetic_energy,
                budget,
                scale,
            }
        };

        if let Some(bad) = particles.iter().find(|p| !p.four_momentum.is_finite()) {
            return Err(GeneratorError::NumericDegeneracy(format!(
                "non-finite four-momentum for PDG {} after reconciliation",
                bad.pdg
            )));
        }
        Ok(outcome)
    }
}
