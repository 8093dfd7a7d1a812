use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::kinematics::{self, Vec3};
use crate::truth::McEvent;

/// Sentinel percentile for unknown centrality estimators
pub const CENTRALITY_UNDEFINED: f32 = -100.;

/// A reconstructed primary vertex
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    /// Lower triangle of the covariance matrix, `zz` is the last entry
    #[serde(default)]
    pub covariance: [f64; 6],
    #[serde(default)]
    pub n_contributors: i32,
    /// Whether the vertex was found by the z-only vertexer
    #[serde(default)]
    pub from_vertexer_z: bool,
}

impl Vertex {
    pub fn z(&self) -> f64 {
        self.position[2]
    }

    pub fn z_resolution(&self) -> f64 {
        self.covariance[5].sqrt()
    }
}

/// Centrality estimate
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Centrality {
    /// `0` is good, larger values indicate problems
    #[serde(default)]
    pub quality: i32,
    /// Percentile per estimator
    #[serde(default)]
    pub percentiles: BTreeMap<String, f32>,
}

impl Centrality {
    pub fn percentile(&self, estimator: &str) -> f32 {
        match self.percentiles.get(estimator) {
            Some(p) => *p,
            None => {
                warn!("No centrality estimate for {estimator}");
                CENTRALITY_UNDEFINED
            }
        }
    }
}

/// TPC response in units of the expected resolution
#[derive(Deserialize, Serialize, Copy, Clone, Debug, Default, PartialEq)]
pub struct NSigmaTpc {
    pub pion: f32,
    pub proton: f32,
}

/// A reconstructed charged track
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Track {
    pub charge: i32,
    /// Point where `momentum` is defined
    #[serde(default)]
    pub position: Vec3,
    pub momentum: Vec3,
    pub tpc_crossed_rows: f32,
    pub tpc_findable_clusters: i32,
    #[serde(default)]
    pub status: u64,
    #[serde(default)]
    pub kink_index: i32,
    /// Label of the simulated particle, the sign encodes fake tracks
    #[serde(default)]
    pub label: i32,
    #[serde(default)]
    pub n_sigma_tpc: Option<NSigmaTpc>,
}

impl Track {
    /// Status bit set by a successful TPC refit
    pub const TPC_REFIT: u64 = 0x40;

    pub fn has_tpc_refit(&self) -> bool {
        self.status & Self::TPC_REFIT != 0
    }

    pub fn eta(&self) -> f64 {
        kinematics::pseudorapidity(&self.momentum)
    }

    pub fn pt(&self) -> f64 {
        kinematics::pt(&self.momentum)
    }

    /// Position of the simulated particle in [McEvent::particles]
    pub fn truth_label(&self) -> usize {
        self.label.unsigned_abs() as usize
    }

    /// Transverse distance of closest approach to `vertex`
    pub fn dca_xy(&self, vertex: &Vec3, b: f64) -> f64 {
        kinematics::impact_parameter_xy(
            self.charge,
            &self.position,
            &self.momentum,
            b,
            vertex,
        )
    }
}

/// A reconstructed V0 candidate
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct V0 {
    /// Index of the positive daughter in [Event::tracks]
    pub pos_index: usize,
    /// Index of the negative daughter in [Event::tracks]
    pub neg_index: usize,
    /// Found by the on-the-fly instead of the offline vertexer
    #[serde(default)]
    pub on_fly: bool,
    pub chi2: f64,
    pub dca_daughters: f64,
    pub decay_vertex: Vec3,
    /// Positive daughter momentum at the decay vertex
    pub pos_momentum: Vec3,
    /// Negative daughter momentum at the decay vertex
    pub neg_momentum: Vec3,
}

impl V0 {
    pub fn momentum(&self) -> Vec3 {
        kinematics::add(&self.pos_momentum, &self.neg_momentum)
    }

    pub fn pt(&self) -> f64 {
        kinematics::pt(&self.momentum())
    }
}

/// A reconstructed event, with optional simulated truth
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Event {
    #[serde(default)]
    pub id: usize,
    pub vertex_tracks: Vertex,
    #[serde(default)]
    pub vertex_spd: Vertex,
    pub magnetic_field: f64,
    pub centrality: Centrality,
    pub trigger_mask: u32,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub v0s: Vec<V0>,
    #[serde(default)]
    pub mc: Option<McEvent>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// The best available primary vertex
    ///
    /// This is the vertex from tracks if it has any contributors and the
    /// SPD vertex otherwise.
    pub fn best_vertex(&self) -> &Vertex {
        if self.vertex_tracks.n_contributors > 0 {
            &self.vertex_tracks
        } else {
            &self.vertex_spd
        }
    }

    pub fn track(&self, idx: usize) -> Option<&Track> {
        self.tracks.get(idx)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new(id: usize) -> Self {
        let mut event = Event::new();
        event.id = id;
        Self { event }
    }

    pub fn vertex_tracks(&mut self, vertex: Vertex) -> &mut Self {
        self.event.vertex_tracks = vertex;
        self
    }

    pub fn vertex_spd(&mut self, vertex: Vertex) -> &mut Self {
        self.event.vertex_spd = vertex;
        self
    }

    pub fn magnetic_field(&mut self, b: f64) -> &mut Self {
        self.event.magnetic_field = b;
        self
    }

    pub fn centrality(&mut self, estimator: &str, percentile: f32, quality: i32) -> &mut Self {
        self.event.centrality.quality = quality;
        self.event
            .centrality
            .percentiles
            .insert(estimator.to_owned(), percentile);
        self
    }

    pub fn trigger_mask(&mut self, mask: u32) -> &mut Self {
        self.event.trigger_mask = mask;
        self
    }

    /// Add a track and return its index
    pub fn add_track(&mut self, track: Track) -> usize {
        self.event.tracks.push(track);
        self.event.tracks.len() - 1
    }

    pub fn add_v0(&mut self, v0: V0) -> &mut Self {
        self.event.v0s.push(v0);
        self
    }

    pub fn mc(&mut self, mc: McEvent) -> &mut Self {
        self.event.mc = Some(mc);
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

impl From<EventBuilder> for Event {
    fn from(b: EventBuilder) -> Self {
        b.build()
    }
}
