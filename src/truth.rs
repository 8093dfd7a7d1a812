use particle_id::ParticleID;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::four_vector::FourVector;
use crate::kinematics::Vec3;

/// How a simulated particle was produced
#[derive(
    Deserialize,
    Serialize,
    Display,
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Origin {
    /// Not classified
    #[default]
    Other,
    /// Physical primary
    Primary,
    /// Secondary from a weak decay
    WeakDecay,
    /// Secondary from an interaction with the detector material
    Material,
}

impl Origin {
    /// Numeric status code as stored in candidate records
    ///
    /// `0` means unknown.
    pub fn code(self) -> i32 {
        match self {
            Origin::Other => 0,
            Origin::Primary => 1,
            Origin::WeakDecay => 2,
            Origin::Material => 3,
        }
    }
}

/// A simulated particle
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct TruthParticle {
    pub pdg: ParticleID,
    pub momentum: FourVector,
    #[serde(default)]
    pub production_vertex: Vec3,
    /// Position of the mother in the [McEvent] particle list
    #[serde(default)]
    pub mother: Option<usize>,
    #[serde(default)]
    pub origin: Origin,
}

impl TruthParticle {
    pub fn pt(&self) -> f64 {
        self.momentum.pt().raw()
    }

    pub fn rapidity(&self) -> f64 {
        self.momentum.rapidity()
    }

    pub fn is_physical_primary(&self) -> bool {
        self.origin == Origin::Primary
    }
}

/// Participant information from a diffractive event generator
#[derive(Deserialize, Serialize, Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DiffractionInfo {
    pub participants: u32,
    pub single_diffractive_1: u32,
    pub single_diffractive_2: u32,
    pub double_diffractive: u32,
}

impl DiffractionInfo {
    /// Whether all participants are single diffractive
    pub fn is_single_diffractive(&self) -> bool {
        self.single_diffractive_1 + self.single_diffractive_2 == self.participants
    }
}

/// Simulated truth of one event
///
/// Particles are stored in an arena. Mothers are referenced by their
/// position in the arena, the first [McEvent::n_primary] entries are
/// the primaries of the event generator.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct McEvent {
    pub primary_vertex: Vec3,
    pub n_primary: usize,
    pub particles: Vec<TruthParticle>,
    #[serde(default)]
    pub diffraction: Option<DiffractionInfo>,
}

impl McEvent {
    pub fn particle(&self, label: usize) -> Option<&TruthParticle> {
        self.particles.get(label)
    }

    /// The mother of the particle at position `label`, with its position
    pub fn mother(&self, label: usize) -> Option<(usize, &TruthParticle)> {
        let mother = self.particle(label)?.mother?;
        self.particle(mother).map(|p| (mother, p))
    }

    /// Primaries from the event generator
    pub fn primaries(&self) -> &[TruthParticle] {
        let n = self.n_primary.min(self.particles.len());
        &self.particles[..n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT: &str = r#"
primary_vertex: [0.0, 0.0, 1.0]
n_primary: 1
particles:
  - pdg: 3122
    momentum: [1.5, 1.0, 0.0, 0.0]
    origin: primary
  - pdg: 2212
    momentum: [1.0, 0.8, 0.1, 0.0]
    production_vertex: [2.0, 0.0, 0.0]
    mother: 0
    origin: weak_decay
  - pdg: -211
    momentum: [0.3, 0.2, -0.1, 0.0]
    mother: 7
"#;

    #[test]
    fn arena_lookup() {
        let mc: McEvent = serde_yaml::from_str(EVENT).unwrap();
        assert_eq!(mc.primaries().len(), 1);
        assert_eq!(mc.particle(0).unwrap().pdg, ParticleID::new(3122));
        assert!(mc.particle(0).unwrap().is_physical_primary());
        let (label, mother) = mc.mother(1).unwrap();
        assert_eq!(label, 0);
        assert_eq!(mother.pdg.id(), 3122);
        assert_eq!(mc.particle(1).unwrap().origin.code(), 2);
        // dangling and absent mothers
        assert!(mc.mother(2).is_none());
        assert!(mc.mother(0).is_none());
        assert!(mc.particle(3).is_none());
        assert_eq!(mc.particle(2).unwrap().origin, Origin::Other);
    }

    #[test]
    fn diffraction() {
        let info = DiffractionInfo {
            participants: 2,
            single_diffractive_1: 1,
            single_diffractive_2: 1,
            double_diffractive: 0,
        };
        assert!(info.is_single_diffractive());
        assert!(!DiffractionInfo { participants: 3, ..info }.is_single_diffractive());
        assert!(DiffractionInfo::default().is_single_diffractive());
    }
}
