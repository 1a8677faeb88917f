//! Multi-particle truth vertex generator.
//!
//! Each event gets one vertex inside a detector volume, a configurable mix
//! of outgoing particles with sampled species, directions and energies, and
//! a summary pseudo-particle carrying their total four-momentum. Energies
//! are either drawn independently per particle or reconciled against a
//! shared kinetic-energy budget, and the whole system can be boosted into a
//! moving frame.

pub mod boost;
pub mod bounding_box;
pub mod config;
pub mod data;
pub mod error;
pub mod fast_rng;
pub mod generator;
pub mod kinematics;
pub mod multiplicity;
pub mod particle;
pub mod reconcile;
pub mod settings;
pub mod species;
pub mod stats;
pub mod vertex;

pub use boost::{Boost, BoostSampler};
pub use bounding_box::BoundingBox;
pub use config::{GenerationPolicy, GeneratorConfig, GroupConfig, RunParameters};
pub use data::{particle_mass, MassUnit};
pub use error::{ConfigError, GeneratorError};
pub use fast_rng::FastRng;
pub use generator::Generator;
pub use multiplicity::EventPlan;
pub use particle::{FourMomentum, ParticleSample};
pub use reconcile::{momentum_scale_factor, EnergyPolicy, Reconciliation};
pub use settings::Settings;
pub use species::{RangeQuantity, SpeciesGroup, SpeciesTable};
pub use vertex::{FinalParticle, VertexRecord};
