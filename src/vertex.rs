use crate::data::PARENT_PDG;
use crate::particle::{FourMomentum, ParticleSample};
use crate::reconcile::Reconciliation;
use serde::Serialize;

/// A final-state particle (or the summary pseudo-particle) as handed to
/// the event framework.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalParticle {
    pub track_id: usize,
    pub pdg: i32,
    pub mass: f64,
    pub four_momentum: FourMomentum,
    /// Originating species group; `None` for the summary pseudo-particle
    pub group: Option<usize>,
}

/// Truth record for one event: a single creation point shared by all
/// particles, preceded by a pseudo-particle carrying their summed
/// four-momentum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexRecord {
    pub position: [f64; 3],
    pub time: f64,
    pub parent: FinalParticle,
    pub particles: Vec<FinalParticle>,
    pub reconciliation: Reconciliation,
}

impl VertexRecord {
    /// Fold the final samples into a record. The parent's momentum and
    /// energy are the exact sums over `samples`.
    ///
    /// Track ids follow [`VertexRecord::iter`] order: the parent is track 0
    /// and the final particles are numbered from 1.
    pub fn assemble(
        position: [f64; 3],
        time: f64,
        samples: Vec<ParticleSample>,
        reconciliation: Reconciliation,
    ) -> Self {
        let total: FourMomentum = samples.iter().map(|s| s.four_momentum).sum();
        let parent = FinalParticle {
            track_id: 0,
            pdg: PARENT_PDG,
            mass: 0.0,
            four_momentum: total,
            group: None,
        };
        let particles = samples
            .into_iter()
            .enumerate()
            .map(|(slot, s)| FinalParticle {
                track_id: slot + 1,
                pdg: s.pdg,
                mass: s.mass,
                four_momentum: s.four_momentum,
                group: Some(s.group),
            })
            .collect();

        VertexRecord {
            position,
            time,
            parent,
            particles,
            reconciliation,
        }
    }

    /// Total kinetic energy of the final particles.
    pub fn kinetic_energy(&self) -> f64 {
        self.particles
            .iter()
            .map(|p| p.four_momentum.energy - p.mass)
            .sum()
    }

    pub fn multiplicity(&self) -> usize {
        self.particles.len()
    }

    /// Parent first, then the final particles in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &FinalParticle> {
        std::iter::once(&self.parent).chain(self.particles.iter())
    }
}
