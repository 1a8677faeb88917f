use crate::bounding_box::BoundingBox;
use crate::particle::ParticleSample;
use crate::species::{RangeQuantity, SpeciesGroup};
use crate::stats::{sample_isotropic, uniform};
use rand::Rng;

/// Uniform vertex position inside `volume`, one independent draw per axis.
pub fn sample_position<R: Rng + ?Sized>(volume: &BoundingBox, rng: &mut R) -> [f64; 3] {
    [
        uniform(rng, volume.lower_left[0], volume.upper_right[0]),
        uniform(rng, volume.lower_left[1], volume.upper_right[1]),
        uniform(rng, volume.lower_left[2], volume.upper_right[2]),
    ]
}

/// Total energy from one draw over the group's raw range.
///
/// For momentum ranges `E = sqrt(p^2 + m^2)`, for kinetic-energy ranges
/// `E = KE + m`.
pub fn sample_total_energy<R: Rng + ?Sized>(group: &SpeciesGroup, mass: f64, rng: &mut R) -> f64 {
    let x = uniform(rng, group.raw_lower, group.raw_upper);
    match group.quantity {
        RangeQuantity::Momentum => (x * x + mass * mass).sqrt(),
        RangeQuantity::KineticEnergy => x + mass,
    }
}

/// Raw sample for one particle: isotropic direction and a momentum
/// magnitude recovered from the sampled total energy.
pub fn sample_particle<R: Rng + ?Sized>(
    group: &SpeciesGroup,
    group_index: usize,
    pdg: i32,
    mass: f64,
    rng: &mut R,
) -> ParticleSample {
    let energy = sample_total_energy(group, mass, rng);
    let p = (energy * energy - mass * mass).max(0.0).sqrt();
    let direction = sample_isotropic(rng);

    tracing::trace!(pdg, ?direction, momentum = p, energy, "raw particle sample");

    ParticleSample::new(pdg, mass, group_index, direction, p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::test_group;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_position_inside_volume() {
        let mut rng = StdRng::seed_from_u64(1);
        let volume = BoundingBox::new([-10.0, 0.0, 100.0], [10.0, 5.0, 400.0]);
        for _ in 0..1000 {
            assert!(volume.contains(sample_position(&volume, &mut rng)));
        }
    }

    #[test]
    fn test_flat_volume_axis() {
        let mut rng = StdRng::seed_from_u64(1);
        let volume = BoundingBox::new([0.0, 2.0, 0.0], [1.0, 2.0, 1.0]);
        for _ in 0..100 {
            assert_eq!(sample_position(&volume, &mut rng)[1], 2.0);
        }
    }

    #[test]
    fn test_kinetic_energy_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut group = test_group(vec![2212], vec![938.27], 1, 1, 1.0);
        group.raw_lower = 10.0;
        group.raw_upper = 50.0;
        for _ in 0..1000 {
            let p = sample_particle(&group, 0, 2212, 938.27, &mut rng);
            let e = p.four_momentum.energy;
            assert!(e >= 948.27 - 1e-9 && e <= 988.27 + 1e-9);
            assert!((p.four_momentum.mass() - 938.27).abs() < 1e-6);
        }
    }

    #[test]
    fn test_momentum_range() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut group = test_group(vec![13], vec![105.66], 1, 1, 1.0);
        group.quantity = RangeQuantity::Momentum;
        group.raw_lower = 200.0;
        group.raw_upper = 300.0;
        for _ in 0..1000 {
            let p = sample_particle(&group, 0, 13, 105.66, &mut rng);
            let mag = p.p();
            assert!(mag >= 200.0 - 1e-9 && mag <= 300.0 + 1e-9);
        }
    }

    #[test]
    fn test_massless_momentum_equals_energy() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut group = test_group(vec![22], vec![0.0], 1, 1, 1.0);
        group.raw_lower = 1.0;
        group.raw_upper = 2.0;
        let p = sample_particle(&group, 0, 22, 0.0, &mut rng);
        assert!((p.p() - p.four_momentum.energy).abs() < 1e-12);
    }
}
