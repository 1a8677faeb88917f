// End-to-end generation scenarios

use multipart_vertex::bounding_box::BoundingBox;
use multipart_vertex::config::{GenerationPolicy, GeneratorConfig, GroupConfig, NormalizationConfig, TimeConfig};
use multipart_vertex::data::MassUnit;
use multipart_vertex::generator::Generator;
use multipart_vertex::kinematics::sample_particle;
use multipart_vertex::reconcile::{scale_kinetic_energy, Reconciliation};
use multipart_vertex::species::RangeQuantity;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn detector() -> BoundingBox {
    BoundingBox::new([-200.0, -200.0, 0.0], [200.0, 200.0, 500.0])
}

fn two_group_normalized() -> GeneratorConfig {
    let group = |pdg: i32| GroupConfig {
        pdg: vec![pdg],
        masses: None,
        min_multi: 1,
        max_multi: 1,
        range: [0.0, 1.0],
        quantity: RangeQuantity::KineticEnergy,
        weight: 1.0,
        fraction_cap: Some(1.0),
    };
    GeneratorConfig {
        multi_min: 2,
        multi_max: 2,
        time: TimeConfig::default(),
        x_margin: vec![],
        y_margin: vec![],
        z_margin: vec![],
        gamma_beta_range: [0.0, 0.0],
        use_boost: false,
        policy: GenerationPolicy::Normalized,
        // raw draws of at most 0.45 each keep the two-particle total below 1
        normalization: NormalizationConfig {
            raw_ceiling: 0.45,
            ..NormalizationConfig::default()
        },
        mass_unit: MassUnit::MeV,
        groups: vec![group(13), group(2212)],
    }
}

#[test]
fn test_single_proton_scenario() {
    let config = GeneratorConfig::from_json_file("tests/proton_vertex.json").unwrap();
    let generator = Generator::new(&config, &detector()).unwrap();
    let volume = BoundingBox::new([-190.0, -190.0, 10.0], [190.0, 190.0, 470.0]);
    assert_eq!(&generator.parameters().vertex_volume, &volume);

    let mut rng = StdRng::seed_from_u64(2212);
    for _ in 0..500 {
        let record = generator.generate(&mut rng).unwrap();
        assert_eq!(record.multiplicity(), 1);
        let proton = &record.particles[0];
        assert_eq!(proton.pdg, 2212);
        assert_eq!(proton.mass, 938.27);
        let e = proton.four_momentum.energy;
        assert!(e >= 948.27 - 1e-9 && e <= 988.27 + 1e-9, "energy {}", e);
        assert!(volume.contains(record.position));
        assert_eq!(record.time, 0.0);
        assert_eq!(record.reconciliation, Reconciliation::Independent);

        // the summary pseudo-particle carries exactly the proton's momentum
        assert_eq!(record.parent.four_momentum, proton.four_momentum);
    }
}

#[test]
fn test_normalized_budget_scenario() {
    let generator = Generator::new(&two_group_normalized(), &detector()).unwrap();
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..500 {
        let record = generator.generate(&mut rng).unwrap();
        assert_eq!(record.multiplicity(), 2);
        let Reconciliation::Budget {
            total_kinetic_energy,
            budget,
            scale,
        } = record.reconciliation
        else {
            panic!("expected the budget branch, got {:?}", record.reconciliation);
        };
        assert!(total_kinetic_energy <= 0.9 + 1e-12);
        assert!((scale * total_kinetic_energy - budget).abs() < 1e-12);
        // unit caps: the final total is exactly the drawn budget
        assert!((record.kinetic_energy() - budget).abs() < 1e-9);
    }
}

#[test]
fn test_budget_transform_replays_on_raw_values() {
    let params = two_group_normalized()
        .validate(&detector())
        .unwrap();
    let groups = &params.table.groups;
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..100 {
        let raw: Vec<_> = groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let (pdg, mass) = group.select_species(&mut rng);
                sample_particle(group, index, pdg, mass, &mut rng)
            })
            .collect();

        let mut reconciled = raw.clone();
        let outcome = params
            .policy
            .reconcile(&mut reconciled, groups, &mut rng)
            .unwrap();
        let Reconciliation::Budget { scale, budget, total_kinetic_energy } = outcome else {
            panic!("expected the budget branch");
        };

        let raw_total: f64 = raw.iter().map(|p| p.kinetic_energy()).sum();
        assert!((raw_total - total_kinetic_energy).abs() < 1e-15);

        let mut replayed = raw.clone();
        for p in replayed.iter_mut() {
            scale_kinetic_energy(p, scale * groups[p.group].fraction_cap);
        }
        assert_eq!(replayed, reconciled);

        let final_total: f64 = reconciled.iter().map(|p| p.kinetic_energy()).sum();
        assert!((final_total / raw_total - budget / raw_total).abs() < 1e-9);
    }
}

#[test]
fn test_capped_scenario_scales_only_capped_groups() {
    let mut config = two_group_normalized();
    config.normalization.raw_ceiling = 1.0;
    config.normalization.budget_threshold = 0.0;
    config.groups[0].fraction_cap = Some(0.5);
    let generator = Generator::new(&config, &detector()).unwrap();

    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..200 {
        let record = generator.generate(&mut rng).unwrap();
        assert!(matches!(record.reconciliation, Reconciliation::Capped { .. }));
        let muon = &record.particles[0];
        let proton = &record.particles[1];
        assert_eq!(muon.pdg, 13);
        // muon kinetic energy halved from a raw draw of at most 1
        assert!(muon.four_momentum.energy - muon.mass <= 0.5 + 1e-9);
        assert!(proton.four_momentum.energy - proton.mass <= 1.0 + 1e-9);
    }
}

#[test]
fn test_boosted_records_conserve_summary_momentum() {
    let mut config = two_group_normalized();
    config.use_boost = true;
    config.gamma_beta_range = [0.1, 3.0];
    let generator = Generator::new(&config, &detector()).unwrap();

    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..200 {
        let record = generator.generate(&mut rng).unwrap();
        let px: f64 = record.particles.iter().map(|p| p.four_momentum.momentum.x).sum();
        let py: f64 = record.particles.iter().map(|p| p.four_momentum.momentum.y).sum();
        let pz: f64 = record.particles.iter().map(|p| p.four_momentum.momentum.z).sum();
        let parent = record.parent.four_momentum.momentum;
        assert!((parent.x - px).abs() < 1e-9);
        assert!((parent.y - py).abs() < 1e-9);
        assert!((parent.z - pz).abs() < 1e-9);
        for p in &record.particles {
            assert!((p.four_momentum.mass() - p.mass).abs() < 1e-4 * (1.0 + p.mass));
        }
    }
}
