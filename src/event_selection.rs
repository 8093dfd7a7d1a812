use log::{debug, warn};
use strum::Display;

use crate::accumulator::{Accumulator, Level};
use crate::config::EventCuts;
use crate::event::{Event, Vertex};
use crate::kinematics::Vec3;

/// Why an event was not analysed
#[derive(Display, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum EventRejection {
    /// Not a single-diffractive simulated event
    NotDiffractive,
    BadCentralityQuality,
    /// Simulated event without generator primaries
    NoPrimaries,
    NotTriggered,
    NoVertex,
    VertexZ,
}

/// Event quantities needed by the candidate selection
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelectedEvent {
    /// Best primary vertex
    pub primary_vertex: Vec3,
    pub magnetic_field: f64,
    pub centrality: f32,
}

/// Event-level selection
///
/// Counters in the accumulator are filled for each passed stage and the
/// generated truth spectra are filled before the trigger selection.
#[derive(Clone, Debug, PartialEq)]
pub struct EventSelection {
    cuts: EventCuts,
    rapidity_shift: f64,
}

impl EventSelection {
    pub fn new(cuts: EventCuts, rapidity_shift: f64) -> Self {
        Self {
            cuts,
            rapidity_shift,
        }
    }

    pub fn cuts(&self) -> &EventCuts {
        &self.cuts
    }

    pub fn select(
        &self,
        event: &Event,
        acc: &mut Accumulator,
    ) -> Result<SelectedEvent, EventRejection> {
        use EventRejection::*;

        if self.cuts.diffractive_only {
            let diffraction = event
                .mc
                .as_ref()
                .and_then(|mc| mc.diffraction)
                .unwrap_or_default();
            if !diffraction.is_single_diffractive() {
                return Err(NotDiffractive);
            }
        }

        if event.centrality.quality > self.cuts.max_centrality_quality {
            return Err(BadCentralityQuality);
        }
        let centrality = event
            .centrality
            .percentile(&self.cuts.centrality_estimator);
        acc.counters.processed.fill(centrality.into());

        if let Some(mc) = &event.mc {
            if mc.n_primary < 1 {
                return Err(NoPrimaries);
            }
            acc.fill_truth(Level::Generated, mc, centrality, self.rapidity_shift);
        }

        if event.trigger_mask & self.cuts.trigger_mask != self.cuts.trigger_mask {
            return Err(NotTriggered);
        }
        acc.counters.triggered.fill(centrality.into());

        if !self.has_vertex(event) {
            warn!("Event {}: primary vertex fails selection", event.id);
            return Err(NoVertex);
        }
        acc.counters.has_vertex.fill(centrality.into());

        let best = event.best_vertex();
        if best.z().abs() > self.cuts.max_vertex_z {
            debug!("Event {}: |z| of best primary vertex is {}", event.id, best.z().abs());
            return Err(VertexZ);
        }
        acc.counters.vertex_z.fill(centrality.into());

        acc.add_selected_event(centrality);
        if let Some(mc) = &event.mc {
            acc.fill_truth(Level::Analysis, mc, centrality, self.rapidity_shift);
        }

        Ok(SelectedEvent {
            primary_vertex: best.position,
            magnetic_field: event.magnetic_field,
            centrality,
        })
    }

    /// Whether the event has a usable primary vertex
    ///
    /// A tracking vertex with contributors is always accepted. Otherwise
    /// the SPD vertex needs contributors and, if it comes from the z-only
    /// vertexer, a sufficient z resolution.
    pub fn has_vertex(&self, event: &Event) -> bool {
        if event.vertex_tracks.n_contributors >= 1 {
            return true;
        }
        let spd: &Vertex = &event.vertex_spd;
        let mut valid = spd.n_contributors >= 1;
        if spd.from_vertexer_z && spd.z_resolution() > self.cuts.max_spd_z_resolution {
            valid = false;
        }
        valid
    }
}
