// Generator configuration: the raw parameter set as read from JSON and its
// validation into the immutable run parameters used by the generator.
use crate::boost::BoostSampler;
use crate::bounding_box::BoundingBox;
use crate::data::{particle_mass, MassUnit};
use crate::error::{ConfigError, GeneratorError};
use crate::reconcile::{EnergyPolicy, Normalization};
use crate::species::{RangeQuantity, SpeciesGroup, SpeciesTable};
use crate::stats::{JitterShape, TimeDistribution};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted `multi_max`. Keeps every event's draws, retries
/// included, well inside its [`EVENT_STRIDE`](crate::fast_rng::EVENT_STRIDE)
/// window.
pub const MAX_MULTIPLICITY: usize = 1_000_000;

/// Which energy-generation policy the run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPolicy {
    /// Every particle keeps its own raw energy draw
    #[default]
    Independent,
    /// Raw draws are rescaled against a shared kinetic-energy budget
    Normalized,
}

/// Thresholds of the normalized policy, in the units of the configured ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Total raw kinetic energy above which per-particle caps are applied
    /// directly instead of drawing a shared budget
    pub budget_threshold: f64,
    /// Upper bound of the raw per-particle draw
    pub raw_ceiling: f64,
    /// Fraction cap that marks a group as "leave unscaled" above threshold
    pub unscaled_cap: f64,
    /// Upper end of the shared budget draw `[0, budget_ceiling)`
    pub budget_ceiling: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            budget_threshold: 1.0,
            raw_ceiling: 1.0,
            unscaled_cap: 1.0,
            budget_ceiling: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub mean: f64,
    pub jitter: f64,
    pub shape: JitterShape,
}

/// One species group as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub pdg: Vec<i32>,
    /// Explicit rest masses; resolved from the mass table when absent
    #[serde(default)]
    pub masses: Option<Vec<f64>>,
    pub min_multi: usize,
    pub max_multi: usize,
    pub range: [f64; 2],
    #[serde(default)]
    pub quantity: RangeQuantity,
    pub weight: f64,
    /// Kinetic-energy fraction cap for the normalized policy. Falls back to
    /// `range[1]` when absent.
    #[serde(default)]
    pub fraction_cap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub multi_min: usize,
    pub multi_max: usize,
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub x_margin: Vec<f64>,
    #[serde(default)]
    pub y_margin: Vec<f64>,
    #[serde(default)]
    pub z_margin: Vec<f64>,
    #[serde(default)]
    pub gamma_beta_range: [f64; 2],
    #[serde(default)]
    pub use_boost: bool,
    #[serde(default)]
    pub policy: GenerationPolicy,
    #[serde(default)]
    pub normalization: NormalizationConfig,
    #[serde(default)]
    pub mass_unit: MassUnit,
    pub groups: Vec<GroupConfig>,
}

/// Everything the generator needs per event, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct RunParameters {
    pub table: SpeciesTable,
    pub vertex_volume: BoundingBox,
    pub time: TimeDistribution,
    /// `None` when boosting is disabled
    pub boost: Option<BoostSampler>,
    pub policy: EnergyPolicy,
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, GeneratorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, GeneratorError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Check every parameter and resolve masses and the vertex volume.
    ///
    /// `detector` is the volume reported by the geometry service; the
    /// configured margins are inset from it.
    pub fn validate(&self, detector: &BoundingBox) -> Result<RunParameters, ConfigError> {
        if self.groups.is_empty() {
            return Err(ConfigError::NoGroups);
        }
        if self.multi_max > MAX_MULTIPLICITY {
            return Err(ConfigError::MultiplicityLimit {
                max: self.multi_max,
                limit: MAX_MULTIPLICITY,
            });
        }

        let groups = self
            .groups
            .iter()
            .enumerate()
            .map(|(index, group)| self.build_group(index, group))
            .collect::<Result<Vec<_>, _>>()?;

        let mut forced = 0usize;
        for (index, group) in groups.iter().enumerate() {
            if group.min_multi > group.max_multi {
                return Err(ConfigError::GroupMultiplicity {
                    group: index,
                    min: group.min_multi,
                    max: group.max_multi,
                });
            }
            if group.min_multi > self.multi_max {
                return Err(ConfigError::GroupMinAboveOverallMax {
                    group: index,
                    min: group.min_multi,
                    overall_max: self.multi_max,
                });
            }
            forced = forced.saturating_add(group.min_multi);
        }

        let multi_min = self.multi_min.max(forced);
        if self.multi_max < multi_min {
            return Err(ConfigError::OverallMultiplicity {
                min: multi_min,
                max: self.multi_max,
            });
        }

        let capacity = groups
            .iter()
            .filter(|g| g.weight > 0.0)
            .fold(0usize, |acc, g| acc.saturating_add(g.max_multi - g.min_multi));
        let required = self.multi_max - forced;
        if capacity < required {
            return Err(ConfigError::InsufficientCapacity { capacity, required });
        }

        if !(self.time.jitter >= 0.0) {
            return Err(ConfigError::NegativeJitter(self.time.jitter));
        }

        let margins = [
            parse_margin('x', &self.x_margin)?,
            parse_margin('y', &self.y_margin)?,
            parse_margin('z', &self.z_margin)?,
        ];
        let vertex_volume = detector.inset(margins)?;

        let [gb_lo, gb_hi] = self.gamma_beta_range;
        if !(gb_lo >= 0.0) || !(gb_lo <= gb_hi) || !gb_hi.is_finite() {
            return Err(ConfigError::BoostRange {
                lo: gb_lo,
                hi: gb_hi,
            });
        }
        let boost = self.use_boost.then(|| BoostSampler::new(gb_lo, gb_hi));

        let ceiling = self.normalization.budget_ceiling;
        if self.policy == GenerationPolicy::Normalized && !(ceiling >= 0.0 && ceiling.is_finite()) {
            return Err(ConfigError::BudgetCeiling(ceiling));
        }

        let policy = match self.policy {
            GenerationPolicy::Independent => EnergyPolicy::Independent,
            GenerationPolicy::Normalized => EnergyPolicy::Normalized(Normalization {
                budget_threshold: self.normalization.budget_threshold,
                unscaled_cap: self.normalization.unscaled_cap,
                budget_ceiling: self.normalization.budget_ceiling,
            }),
        };

        Ok(RunParameters {
            table: SpeciesTable {
                groups,
                multi_min,
                multi_max: self.multi_max,
            },
            vertex_volume,
            time: TimeDistribution {
                mean: self.time.mean,
                jitter: self.time.jitter,
                shape: self.time.shape,
            },
            boost,
            policy,
        })
    }

    fn build_group(&self, index: usize, group: &GroupConfig) -> Result<SpeciesGroup, ConfigError> {
        if group.pdg.is_empty() {
            return Err(ConfigError::EmptySpecies { group: index });
        }

        let masses = match &group.masses {
            Some(masses) => {
                if masses.len() != group.pdg.len() {
                    return Err(ConfigError::MassCountMismatch {
                        group: index,
                        species: group.pdg.len(),
                        masses: masses.len(),
                    });
                }
                masses.clone()
            }
            None => group
                .pdg
                .iter()
                .map(|&pdg| {
                    particle_mass(pdg, self.mass_unit)
                        .ok_or(ConfigError::UnknownSpecies { group: index, pdg })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };
        for (&pdg, &mass) in group.pdg.iter().zip(&masses) {
            if !(mass >= 0.0) || !mass.is_finite() {
                return Err(ConfigError::InvalidMass {
                    group: index,
                    pdg,
                    mass,
                });
            }
        }

        let [lo, hi] = group.range;
        if !(lo >= 0.0) || !(hi >= 0.0) || !hi.is_finite() {
            return Err(ConfigError::NegativeRange { group: index, lo, hi });
        }
        if lo > hi {
            return Err(ConfigError::InvertedRange { group: index, lo, hi });
        }

        if !(group.weight >= 0.0) || !group.weight.is_finite() {
            return Err(ConfigError::InvalidWeight {
                group: index,
                weight: group.weight,
            });
        }

        let (raw_upper, fraction_cap) = match self.policy {
            GenerationPolicy::Independent => (hi, group.fraction_cap.unwrap_or(1.0)),
            GenerationPolicy::Normalized => {
                let ceiling = self.normalization.raw_ceiling;
                if !(lo <= ceiling) || !ceiling.is_finite() {
                    return Err(ConfigError::AboveNormalizedCeiling {
                        group: index,
                        lo,
                        ceiling,
                    });
                }
                (ceiling, group.fraction_cap.unwrap_or(hi))
            }
        };
        if !(fraction_cap >= 0.0) || !fraction_cap.is_finite() {
            return Err(ConfigError::InvalidFractionCap {
                group: index,
                cap: fraction_cap,
            });
        }

        Ok(SpeciesGroup {
            pdg: group.pdg.clone(),
            masses,
            min_multi: group.min_multi,
            max_multi: group.max_multi,
            quantity: group.quantity,
            raw_lower: lo,
            raw_upper,
            fraction_cap,
            weight: group.weight,
        })
    }
}

/// Empty: no inset. One value: same inset on both faces. Two: lower, upper.
fn parse_margin(axis: char, values: &[f64]) -> Result<[f64; 2], ConfigError> {
    match values {
        [] => Ok([0.0, 0.0]),
        [both] => Ok([*both, *both]),
        [lower, upper] => Ok([*lower, *upper]),
        _ => Err(ConfigError::MarginLength {
            axis,
            len: values.len(),
        }),
    }
}
