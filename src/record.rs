use std::convert::Infallible;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::association::McMatch;
use crate::traits::RecordSink;

/// Snapshot of an accepted V0 candidate
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct CandidateRecord {
    pub event_id: usize,
    pub centrality: f32,
    /// z position of the best primary vertex
    pub vertex_z: f64,
    pub on_fly: bool,
    pub pt: f64,
    pub rapidity_k0_short: f64,
    pub rapidity_lambda: f64,
    pub mass_k0_short: f64,
    pub mass_lambda: f64,
    pub mass_anti_lambda: f64,
    /// Armenteros-Podolanski momentum asymmetry
    pub alpha: f64,
    /// Armenteros-Podolanski transverse momentum
    pub qt: f64,
    pub least_crossed_rows: i32,
    pub least_crossed_rows_over_findable: f32,
    pub chi2: f64,
    pub dca_daughters: f64,
    pub dca_pos_to_pv: f64,
    pub dca_neg_to_pv: f64,
    pub dca_v0_to_pv: f64,
    pub cos_pointing_angle: f64,
    pub decay_radius: f64,
    /// Decay length over total momentum
    pub dist_over_total_momentum: f64,
    pub eta_pos: f64,
    pub eta_neg: f64,
    pub pt_pos: f64,
    pub pt_neg: f64,
    pub n_sigma_pos_proton: f32,
    pub n_sigma_pos_pion: f32,
    pub n_sigma_neg_proton: f32,
    pub n_sigma_neg_pion: f32,
    pub mc: McMatch,
}

impl CandidateRecord {
    /// Column names in the order of the [Display] output
    pub const COLUMNS: [&'static str; 43] = [
        "event_id",
        "centrality",
        "vertex_z",
        "on_fly",
        "pt",
        "rapidity_k0_short",
        "rapidity_lambda",
        "mass_k0_short",
        "mass_lambda",
        "mass_anti_lambda",
        "alpha",
        "qt",
        "least_crossed_rows",
        "least_crossed_rows_over_findable",
        "chi2",
        "dca_daughters",
        "dca_pos_to_pv",
        "dca_neg_to_pv",
        "dca_v0_to_pv",
        "cos_pointing_angle",
        "decay_radius",
        "dist_over_total_momentum",
        "eta_pos",
        "eta_neg",
        "pt_pos",
        "pt_neg",
        "n_sigma_pos_proton",
        "n_sigma_pos_pion",
        "n_sigma_neg_proton",
        "n_sigma_neg_pion",
        "mc_pid_positive",
        "mc_pid_negative",
        "mc_pt_positive",
        "mc_pt_negative",
        "mc_matched",
        "mc_pid",
        "mc_pt",
        "mc_rapidity",
        "mc_primary_status",
        "mc_creation_radius",
        "mc_pid_mother",
        "mc_pt_mother",
        "mc_primary_status_mother",
    ];

    /// Table header line
    pub fn header() -> String {
        format!("# {}", Self::COLUMNS.join(" "))
    }
}

impl Display for CandidateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {} {} {} {} {} {} ",
            self.event_id,
            self.centrality,
            self.vertex_z,
            u8::from(self.on_fly),
            self.pt,
            self.rapidity_k0_short,
            self.rapidity_lambda,
            self.mass_k0_short,
            self.mass_lambda,
            self.mass_anti_lambda,
            self.alpha,
            self.qt,
            self.least_crossed_rows,
            self.least_crossed_rows_over_findable,
        )?;
        write!(
            f,
            "{} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} ",
            self.chi2,
            self.dca_daughters,
            self.dca_pos_to_pv,
            self.dca_neg_to_pv,
            self.dca_v0_to_pv,
            self.cos_pointing_angle,
            self.decay_radius,
            self.dist_over_total_momentum,
            self.eta_pos,
            self.eta_neg,
            self.pt_pos,
            self.pt_neg,
            self.n_sigma_pos_proton,
            self.n_sigma_pos_pion,
            self.n_sigma_neg_proton,
            self.n_sigma_neg_pion,
        )?;
        let mc = &self.mc;
        write!(
            f,
            "{} {} {} {} {} {} {} {} {} {} {} {} {}",
            mc.pid_positive,
            mc.pid_negative,
            mc.pt_positive,
            mc.pt_negative,
            u8::from(mc.matched),
            mc.pid,
            mc.pt,
            mc.rapidity,
            mc.primary_status,
            mc.creation_radius,
            mc.pid_mother,
            mc.pt_mother,
            mc.primary_status_mother,
        )
    }
}

impl RecordSink for Vec<CandidateRecord> {
    type Error = Infallible;

    fn push(&mut self, record: CandidateRecord) -> Result<(), Self::Error> {
        Vec::push(self, record);
        Ok(())
    }
}
