// Per-event pipeline:
// time/vertex/boost -> multiplicity plan -> species + raw kinematics per
// slot -> energy reconciliation -> optional boost -> vertex record.

use crate::bounding_box::BoundingBox;
use crate::config::{GeneratorConfig, RunParameters};
use crate::error::GeneratorError;
use crate::fast_rng::FastRng;
use crate::kinematics::{sample_particle, sample_position};
use crate::multiplicity::EventPlan;
use crate::particle::ParticleSample;
use crate::settings::Settings;
use crate::vertex::VertexRecord;
use rand::Rng;
use rayon::prelude::*;

/// Attempts at redrawing an event's raw kinematics after a degenerate draw.
pub const MAX_DEGENERATE_ATTEMPTS: usize = 16;

#[derive(Debug, Clone)]
pub struct Generator {
    params: RunParameters,
}

impl Generator {
    /// Validate `config` against the detector volume and build a generator.
    pub fn new(config: &GeneratorConfig, detector: &BoundingBox) -> Result<Self, GeneratorError> {
        let params = config.validate(detector)?;
        Ok(Self::from_parameters(params))
    }

    pub fn from_parameters(params: RunParameters) -> Self {
        let volume = &params.vertex_volume;
        tracing::info!(
            lower_left = ?volume.lower_left,
            upper_right = ?volume.upper_right,
            multi_min = params.table.multi_min,
            multi_max = params.table.multi_max,
            policy = ?params.policy,
            boost = params.boost.is_some(),
            "particle generation volume"
        );
        for (index, group) in params.table.groups.iter().enumerate() {
            tracing::info!(
                group = index,
                pdg = ?group.pdg,
                quantity = ?group.quantity,
                range = ?[group.raw_lower, group.raw_upper],
                fraction_cap = group.fraction_cap,
                multiplicity = ?[group.min_multi, group.max_multi],
                weight = group.weight,
                "species group"
            );
        }
        Self { params }
    }

    pub fn parameters(&self) -> &RunParameters {
        &self.params
    }

    /// Generate one event from `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<VertexRecord, GeneratorError> {
        let time = self.params.time.sample(rng);
        let position = sample_position(&self.params.vertex_volume, rng);
        let boost = self.params.boost.as_ref().map(|sampler| sampler.sample(rng));
        let plan = self.params.table.sample_plan(rng);

        tracing::debug!(?position, time, particles = plan.len(), "event vertex");

        let groups = &self.params.table.groups;
        let mut attempt = 1;
        let (mut particles, reconciliation) = loop {
            let mut particles = self.sample_raw(&plan, rng);
            match self.params.policy.reconcile(&mut particles, groups, rng) {
                Ok(outcome) => break (particles, outcome),
                Err(GeneratorError::NumericDegeneracy(reason))
                    if attempt < MAX_DEGENERATE_ATTEMPTS =>
                {
                    tracing::warn!(attempt, %reason, "degenerate raw sample, redrawing kinematics");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        };

        if let Some(boost) = boost {
            for particle in particles.iter_mut() {
                boost.apply_in_place(&mut particle.four_momentum);
            }
            if let Some(bad) = particles.iter().find(|p| !p.four_momentum.is_finite()) {
                return Err(GeneratorError::NumericDegeneracy(format!(
                    "non-finite four-momentum for PDG {} after boost with gamma {}",
                    bad.pdg, boost.gamma
                )));
            }
        }

        Ok(VertexRecord::assemble(position, time, particles, reconciliation))
    }

    /// Regenerate event `event` of a run seeded with `run_seed`.
    pub fn generate_event(&self, run_seed: u64, event: u64) -> Result<VertexRecord, GeneratorError> {
        let mut rng = FastRng::for_event(run_seed, event);
        self.generate(&mut rng)
    }

    /// Generate `settings.events` events sequentially.
    pub fn run(&self, settings: &Settings) -> Result<Vec<VertexRecord>, GeneratorError> {
        let seed = settings.resolved_seed();
        tracing::info!(seed, events = settings.events, "starting run");
        (0..settings.events as u64)
            .map(|event| self.generate_event(seed, event))
            .collect()
    }

    /// Same output as [`Generator::run`], with events spread over the rayon
    /// thread pool.
    pub fn run_parallel(&self, settings: &Settings) -> Result<Vec<VertexRecord>, GeneratorError> {
        let seed = settings.resolved_seed();
        tracing::info!(seed, events = settings.events, "starting parallel run");
        (0..settings.events)
            .into_par_iter()
            .map(|event| self.generate_event(seed, event as u64))
            .collect()
    }

    fn sample_raw<R: Rng + ?Sized>(&self, plan: &EventPlan, rng: &mut R) -> Vec<ParticleSample> {
        let groups = &self.params.table.groups;
        plan.slots
            .iter()
            .map(|&index| {
                let group = &groups[index];
                let (pdg, mass) = group.select_species(rng);
                sample_particle(group, index, pdg, mass, rng)
            })
            .collect()
    }
}
