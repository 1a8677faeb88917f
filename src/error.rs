//! Error types for vertex generation

use thiserror::Error;

/// Fatal problems found while validating a [`crate::config::GeneratorConfig`].
///
/// These are raised once, before any event is generated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("no particle groups configured")]
    NoGroups,

    #[error("group {group}: PDG code list is empty")]
    EmptySpecies { group: usize },

    #[error("group {group}: {masses} masses given for {species} species")]
    MassCountMismatch {
        group: usize,
        species: usize,
        masses: usize,
    },

    #[error("group {group}: no mass known for PDG code {pdg}")]
    UnknownSpecies { group: usize, pdg: i32 },

    #[error("group {group}: invalid mass {mass} for PDG code {pdg}")]
    InvalidMass { group: usize, pdg: i32, mass: f64 },

    #[error("group {group}: negative energy/momentum bound in [{lo}, {hi}]")]
    NegativeRange { group: usize, lo: f64, hi: f64 },

    #[error("group {group}: range [{lo}, {hi}] has no phase space")]
    InvertedRange { group: usize, lo: f64, hi: f64 },

    #[error("group {group}: lower bound {lo} exceeds normalized ceiling {ceiling}")]
    AboveNormalizedCeiling { group: usize, lo: f64, ceiling: f64 },

    #[error("group {group}: invalid fraction cap {cap}")]
    InvalidFractionCap { group: usize, cap: f64 },

    #[error("group {group}: invalid selection weight {weight}")]
    InvalidWeight { group: usize, weight: f64 },

    #[error("group {group}: min multiplicity {min} > max multiplicity {max}")]
    GroupMultiplicity { group: usize, min: usize, max: usize },

    #[error("group {group}: min multiplicity {min} > overall max multiplicity {overall_max}")]
    GroupMinAboveOverallMax {
        group: usize,
        min: usize,
        overall_max: usize,
    },

    #[error("overall max multiplicity {max} exceeds the per-event limit {limit}")]
    MultiplicityLimit { max: usize, limit: usize },

    #[error("overall max multiplicity {max} < overall min multiplicity {min}")]
    OverallMultiplicity { min: usize, max: usize },

    #[error("weighted groups can hold {capacity} extra particles but up to {required} may be requested")]
    InsufficientCapacity { capacity: usize, required: usize },

    #[error("negative time jitter {0}")]
    NegativeJitter(f64),

    #[error("{axis} margin has {len} values, expected at most 2")]
    MarginLength { axis: char, len: usize },

    #[error("vertex volume is empty along {axis}: [{lo}, {hi}]")]
    EmptyVolume { axis: char, lo: f64, hi: f64 },

    #[error("invalid kinetic energy budget ceiling {0}")]
    BudgetCeiling(f64),

    #[error("invalid gamma*beta range [{lo}, {hi}]")]
    BoostRange { lo: f64, hi: f64 },
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
