//! Validated species groups and the per-group species selector.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which physical quantity a group's `[lo, hi]` range is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeQuantity {
    #[default]
    KineticEnergy,
    Momentum,
}

/// A bundle of candidate species sharing multiplicity, kinematic range and
/// selection weight. Built once from configuration and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesGroup {
    pub pdg: Vec<i32>,
    /// Rest masses, parallel to `pdg`
    pub masses: Vec<f64>,
    pub min_multi: usize,
    pub max_multi: usize,
    pub quantity: RangeQuantity,
    /// Lower bound of the raw draw
    pub raw_lower: f64,
    /// Upper bound of the raw draw. Under the normalized policy this is the
    /// normalized ceiling, not the configured range upper bound.
    pub raw_upper: f64,
    /// Target kinetic-energy fraction used by the normalized policy
    pub fraction_cap: f64,
    pub weight: f64,
}

impl SpeciesGroup {
    pub fn len(&self) -> usize {
        self.pdg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pdg.is_empty()
    }

    /// Uniformly pick one candidate species, returning `(pdg, mass)`.
    pub fn select_species<R: Rng + ?Sized>(&self, rng: &mut R) -> (i32, f64) {
        let index = if self.pdg.len() > 1 {
            rng.gen_range(0..self.pdg.len())
        } else {
            0
        };
        (self.pdg[index], self.masses[index])
    }
}

/// The validated group table together with the overall multiplicity bounds.
///
/// `multi_min` already includes the sum of the per-group minima.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesTable {
    pub groups: Vec<SpeciesGroup>,
    pub multi_min: usize,
    pub multi_max: usize,
}

#[cfg(test)]
pub(crate) fn test_group(pdg: Vec<i32>, masses: Vec<f64>, min: usize, max: usize, weight: f64) -> SpeciesGroup {
    SpeciesGroup {
        pdg,
        masses,
        min_multi: min,
        max_multi: max,
        quantity: RangeQuantity::KineticEnergy,
        raw_lower: 0.0,
        raw_upper: 100.0,
        fraction_cap: 1.0,
        weight,
    }
}
