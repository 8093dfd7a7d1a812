use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trigger bit of the minimum-bias INT7 trigger
pub const TRIGGER_INT7: u32 = 1 << 1;

/// Rapidity shift between laboratory and nucleon-nucleon centre-of-mass
/// frame in asymmetric p-Pb collisions
pub const PPB_RAPIDITY_SHIFT: f64 = 0.465;

/// Event-level selection criteria
#[derive(Builder, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[builder(default)]
#[serde(default)]
pub struct EventCuts {
    /// Reject events with a worse centrality quality flag
    pub max_centrality_quality: i32,
    /// All of these trigger bits must be set
    pub trigger_mask: u32,
    /// Maximum |z| of the best primary vertex in cm
    pub max_vertex_z: f64,
    /// Maximum z resolution in cm for vertices from the z-only vertexer
    pub max_spd_z_resolution: f64,
    #[builder(setter(into))]
    pub centrality_estimator: String,
    /// Only keep single-diffractive simulated events
    pub diffractive_only: bool,
}

impl Default for EventCuts {
    fn default() -> Self {
        Self {
            max_centrality_quality: 1,
            trigger_mask: TRIGGER_INT7,
            max_vertex_z: 10.,
            max_spd_z_resolution: 0.25,
            centrality_estimator: "V0A".to_owned(),
            diffractive_only: false,
        }
    }
}

/// Candidate-level selection criteria
#[derive(Builder, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[builder(default)]
#[serde(default)]
pub struct CandidateCuts {
    pub min_pt: f64,
    pub max_pt: f64,
    /// Minimum number of crossed TPC rows for each daughter
    pub min_crossed_rows: f32,
    /// Maximum |η| for each daughter
    pub max_daughter_eta: f64,
    /// Reject candidates from the on-the-fly vertexer
    pub reject_on_fly: bool,
}

impl Default for CandidateCuts {
    fn default() -> Self {
        Self {
            min_pt: 0.,
            max_pt: 100.,
            min_crossed_rows: 70.,
            max_daughter_eta: 0.8,
            reject_on_fly: true,
        }
    }
}

/// Full analysis configuration
#[derive(Builder, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[builder(default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub event: EventCuts,
    pub candidate: CandidateCuts,
    /// Added to the laboratory rapidity to obtain the CMS rapidity
    pub rapidity_shift: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            event: Default::default(),
            candidate: Default::default(),
            rapidity_shift: PPB_RAPIDITY_SHIFT,
        }
    }
}

impl AnalysisConfig {
    /// Read the configuration from a YAML file
    ///
    /// Missing settings take their default values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| ConfigError::Open(path.to_owned(), err))?;
        serde_yaml::from_reader(BufReader::new(file))
            .map_err(|err| ConfigError::Parse(path.to_owned(), err))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open configuration file {0:?}: {1}")]
    Open(PathBuf, std::io::Error),
    #[error("Failed to parse configuration file {0:?}: {1}")]
    Parse(PathBuf, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_yaml() {
        let cfg: AnalysisConfig = serde_yaml::from_str(
            "event:\n  max_vertex_z: 7.5\ncandidate:\n  min_crossed_rows: 80\n",
        )
        .unwrap();
        assert_eq!(cfg.event.max_vertex_z, 7.5);
        assert_eq!(cfg.event.trigger_mask, TRIGGER_INT7);
        assert_eq!(cfg.candidate.min_crossed_rows, 80.);
        assert_eq!(cfg.candidate.max_daughter_eta, 0.8);
        assert_eq!(cfg.rapidity_shift, PPB_RAPIDITY_SHIFT);
    }

    #[test]
    fn builder_defaults() {
        let cuts = CandidateCutsBuilder::default()
            .min_pt(0.5)
            .build()
            .unwrap();
        assert_eq!(cuts.min_pt, 0.5);
        assert_eq!(cuts.min_crossed_rows, 70.);
        let cuts = EventCutsBuilder::default()
            .centrality_estimator("CL1")
            .build()
            .unwrap();
        assert_eq!(cuts.centrality_estimator, "CL1");
        assert_eq!(cuts.max_spd_z_resolution, 0.25);
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rapidity_shift: 0.0").unwrap();
        let cfg = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.rapidity_shift, 0.);
        assert_eq!(cfg.event, EventCuts::default());

        assert!(matches!(
            AnalysisConfig::from_file("/nonexistent/v0perf.yaml"),
            Err(ConfigError::Open(..))
        ));
    }
}
