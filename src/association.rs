use log::warn;
use serde::{Deserialize, Serialize};

use crate::event::Track;
use crate::kinematics::{self, RAPIDITY_UNDEFINED};
use crate::truth::McEvent;

/// Simulated truth associated with a V0 candidate
///
/// Fields keep their default "unknown" values when the candidate could
/// not be matched.
#[derive(Deserialize, Serialize, Copy, Clone, Debug, PartialEq)]
pub struct McMatch {
    /// Whether both daughters come from the same simulated mother
    #[serde(default)]
    pub matched: bool,
    /// PDG id of the particle behind the positive daughter track
    pub pid_positive: i32,
    /// PDG id of the particle behind the negative daughter track
    pub pid_negative: i32,
    pub pt_positive: f64,
    pub pt_negative: f64,
    /// PDG id of the common mother
    pub pid: i32,
    pub pt: f64,
    /// Only set for Λ, Λ̄, and K0S mothers
    pub rapidity: f64,
    /// [Origin code](crate::truth::Origin::code) of the common mother
    pub primary_status: i32,
    /// Distance between the simulated primary vertex and the production
    /// vertex of the common mother
    pub creation_radius: f64,
    /// PDG id of the grandmother
    pub pid_mother: i32,
    pub pt_mother: f64,
    pub primary_status_mother: i32,
}

impl Default for McMatch {
    fn default() -> Self {
        Self {
            matched: false,
            pid_positive: 0,
            pid_negative: 0,
            pt_positive: -1.,
            pt_negative: -1.,
            pid: -1,
            pt: -1.,
            rapidity: RAPIDITY_UNDEFINED,
            primary_status: 0,
            creation_radius: -1.,
            pid_mother: -1,
            pt_mother: -1.,
            primary_status_mother: 0,
        }
    }
}

impl McMatch {
    /// Whether both daughters come from the same mother
    pub fn is_matched(&self) -> bool {
        self.matched
    }
}

/// Associate the daughter tracks of a V0 candidate with simulated truth
pub fn associate(mc: &McEvent, pos: &Track, neg: &Track) -> McMatch {
    let mut res = McMatch::default();
    let pos_label = pos.truth_label();
    let neg_label = neg.truth_label();
    let (Some(pos_part), Some(neg_part)) =
        (mc.particle(pos_label), mc.particle(neg_label))
    else {
        warn!("No truth particle for labels {pos_label}, {neg_label}");
        return res;
    };
    res.pid_positive = pos_part.pdg.id();
    res.pid_negative = neg_part.pdg.id();
    res.pt_positive = pos_part.pt();
    res.pt_negative = neg_part.pt();

    let (Some(pos_mother), Some(neg_mother)) = (pos_part.mother, neg_part.mother)
    else {
        return res;
    };
    if pos_mother != neg_mother {
        return res;
    }
    let Some(mother) = mc.particle(pos_mother) else {
        return res;
    };
    let pdg = mother.pdg.id();
    res.matched = true;
    res.pid = pdg;
    res.pt = mother.pt();
    if pdg.abs() == 3122 || pdg == 310 {
        res.rapidity = mother.rapidity();
    }
    res.primary_status = mother.origin.code();
    res.creation_radius =
        kinematics::distance(&mc.primary_vertex, &mother.production_vertex);

    if let Some((_, grandmother)) = mc.mother(pos_mother) {
        res.pid_mother = grandmother.pdg.id();
        res.pt_mother = grandmother.pt();
        res.primary_status_mother = grandmother.origin.code();
    }
    res
}
