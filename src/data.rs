// src/data.rs
// Static physical-constant tables used when resolving species masses.
// Values follow the PDG review (rounded to the precision quoted there).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// PDG code used for the summary pseudo-particle prepended to each vertex.
pub const PARENT_PDG: i32 = 16;

/// Rest masses in MeV keyed by PDG Monte Carlo particle code.
///
/// Only particle codes are stored; antiparticles share the mass of their
/// partner and are resolved through the absolute value of the code by
/// [`particle_mass`].
pub static PARTICLE_MASSES: Lazy<HashMap<i32, f64>> = Lazy::new(|| {
    let mut m = HashMap::new();

    // Leptons
    m.insert(11, 0.51099895);
    m.insert(13, 105.6583755);
    m.insert(15, 1776.86);
    m.insert(12, 0.0);
    m.insert(14, 0.0);
    m.insert(16, 0.0);

    // Gauge bosons
    m.insert(22, 0.0);

    // Light mesons
    m.insert(111, 134.9768);
    m.insert(211, 139.57039);
    m.insert(221, 547.862);
    m.insert(130, 497.611);
    m.insert(310, 497.611);
    m.insert(311, 497.611);
    m.insert(321, 493.677);

    // Nucleons
    m.insert(2212, 938.27208816);
    m.insert(2112, 939.56542052);

    // Hyperons
    m.insert(3122, 1115.683);
    m.insert(3222, 1189.37);
    m.insert(3212, 1192.642);
    m.insert(3112, 1197.449);

    // Light nuclei (10LZZZAAAI)
    m.insert(1000010020, 1875.612942);
    m.insert(1000010030, 2808.921132);
    m.insert(1000020030, 2808.391607);
    m.insert(1000020040, 3727.379378);

    m
});

/// Energy unit the configured ranges (and therefore masses) are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MassUnit {
    #[default]
    MeV,
    GeV,
}

impl MassUnit {
    fn per_mev(self) -> f64 {
        match self {
            MassUnit::MeV => 1.0,
            MassUnit::GeV => 1.0e-3,
        }
    }
}

/// Look up the rest mass of a PDG code, converted to `unit`.
pub fn particle_mass(pdg: i32, unit: MassUnit) -> Option<f64> {
    PARTICLE_MASSES
        .get(&pdg.abs())
        .map(|mass| mass * unit.per_mev())
}
