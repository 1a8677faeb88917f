use nalgebra::Vector3;
use serde::Serialize;

/// Momentum three-vector plus total energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FourMomentum {
    pub momentum: Vector3<f64>,
    pub energy: f64,
}

impl FourMomentum {
    pub fn new(px: f64, py: f64, pz: f64, energy: f64) -> Self {
        Self {
            momentum: Vector3::new(px, py, pz),
            energy,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn p(&self) -> f64 {
        self.momentum.norm()
    }

    /// Invariant mass, clamped at zero against rounding.
    pub fn mass(&self) -> f64 {
        (self.energy * self.energy - self.momentum.norm_squared())
            .max(0.0)
            .sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.energy.is_finite() && self.momentum.iter().all(|c| c.is_finite())
    }
}

impl std::ops::Add for FourMomentum {
    type Output = FourMomentum;

    fn add(self, rhs: FourMomentum) -> FourMomentum {
        FourMomentum {
            momentum: self.momentum + rhs.momentum,
            energy: self.energy + rhs.energy,
        }
    }
}

impl std::iter::Sum for FourMomentum {
    fn sum<I: Iterator<Item = FourMomentum>>(iter: I) -> Self {
        iter.fold(FourMomentum::zero(), |acc, p| acc + p)
    }
}

/// One generated particle while the event is being built.
///
/// The four-momentum is rewritten in place by the energy reconciler and
/// the boost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleSample {
    pub pdg: i32,
    pub mass: f64,
    pub four_momentum: FourMomentum,
    /// Index of the species group this particle was drawn from
    pub group: usize,
}

impl ParticleSample {
    /// Build a particle from a unit direction and a momentum magnitude.
    pub fn new(pdg: i32, mass: f64, group: usize, direction: [f64; 3], p: f64) -> Self {
        let momentum = Vector3::new(direction[0], direction[1], direction[2]) * p;
        let energy = (p * p + mass * mass).sqrt();
        Self {
            pdg,
            mass,
            four_momentum: FourMomentum { momentum, energy },
            group,
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.four_momentum.energy - self.mass
    }

    pub fn p(&self) -> f64 {
        self.four_momentum.p()
    }
}
