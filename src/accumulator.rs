use std::collections::BTreeMap;

use particle_id::ParticleID;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::histogram::{Axis, Hist1D, Hist3D};
use crate::truth::McEvent;

const CENTRALITY_COUNTER_AXIS: Axis = Axis::new(200, 0., 100.);
const PT_AXIS: Axis = Axis::new(200, 0., 20.);
const RAPIDITY_AXIS: Axis = Axis::new(48, -1.2, 1.2);
const CENTRALITY_AXIS: Axis = Axis::new(100, 0., 100.);

/// Species with generated spectra
#[derive(
    Deserialize, Serialize, Display, EnumIter, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
pub enum Species {
    Lambda,
    AntiLambda,
    K0Short,
    KPlus,
    KMinus,
    XiMinus,
    XiPlus,
}

impl Species {
    pub fn pdg(self) -> ParticleID {
        use Species::*;
        ParticleID::new(match self {
            Lambda => 3122,
            AntiLambda => -3122,
            K0Short => 310,
            KPlus => 321,
            KMinus => -321,
            XiMinus => 3312,
            XiPlus => -3312,
        })
    }

    pub fn from_pdg(pdg: ParticleID) -> Option<Self> {
        Self::iter().find(|s| s.pdg() == pdg)
    }

    pub fn is_cascade(self) -> bool {
        matches!(self, Species::XiMinus | Species::XiPlus)
    }
}

/// Rapidity reference frame
#[derive(
    Deserialize, Serialize, Display, EnumIter, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
pub enum Frame {
    Lab,
    Cms,
}

/// Stage of the event selection at which truth spectra are filled
#[derive(
    Deserialize, Serialize, Display, EnumIter, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
pub enum Level {
    /// Before the trigger selection, for efficiency denominators
    Generated,
    /// After the full event selection
    Analysis,
}

/// Transverse momentum vs rapidity vs centrality for one species
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Spectrum {
    pub level: Level,
    pub species: Species,
    pub frame: Frame,
    pub hist: Hist3D,
}

/// Event counters at the successive selection stages
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct EventCounters {
    pub processed: Hist1D,
    pub triggered: Hist1D,
    pub has_vertex: Hist1D,
    pub vertex_z: Hist1D,
}

impl Default for EventCounters {
    fn default() -> Self {
        Self {
            processed: Hist1D::new(CENTRALITY_COUNTER_AXIS),
            triggered: Hist1D::new(CENTRALITY_COUNTER_AXIS),
            has_vertex: Hist1D::new(CENTRALITY_COUNTER_AXIS),
            vertex_z: Hist1D::new(CENTRALITY_COUNTER_AXIS),
        }
    }
}

/// Accumulated output of an analysis run
///
/// Passed explicitly into the processing of each event and turned into
/// the final [Histograms] with [Accumulator::finalize].
#[derive(Clone, Debug, PartialEq)]
pub struct Accumulator {
    pub counters: EventCounters,
    spectra: Vec<Spectrum>,
    selected_events: Vec<f32>,
    rejections: BTreeMap<String, u64>,
    nrecords: u64,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    pub fn new() -> Self {
        let mut spectra = Vec::new();
        for level in Level::iter() {
            for species in Species::iter() {
                for frame in Frame::iter() {
                    spectra.push(Spectrum {
                        level,
                        species,
                        frame,
                        hist: Hist3D::new([PT_AXIS, RAPIDITY_AXIS, CENTRALITY_AXIS]),
                    });
                }
            }
        }
        Self {
            counters: Default::default(),
            spectra,
            selected_events: Vec::new(),
            rejections: BTreeMap::new(),
            nrecords: 0,
        }
    }

    pub fn spectrum(&self, level: Level, species: Species, frame: Frame) -> &Hist3D {
        &self.spectra[spectrum_idx(level, species, frame)].hist
    }

    fn fill_spectrum(
        &mut self,
        level: Level,
        species: Species,
        pt: f64,
        y: f64,
        centrality: f32,
        rapidity_shift: f64,
    ) {
        let centrality = centrality.into();
        self.spectra[spectrum_idx(level, species, Frame::Lab)]
            .hist
            .fill(pt, y, centrality);
        self.spectra[spectrum_idx(level, species, Frame::Cms)]
            .hist
            .fill(pt, y + rapidity_shift, centrality);
    }

    /// Fill the truth spectra for one simulated event
    ///
    /// Single-strange hadrons and charged kaons are taken from all
    /// particles, but only physical primaries are counted. Cascades are
    /// taken from the generator primaries without further selection.
    pub fn fill_truth(
        &mut self,
        level: Level,
        mc: &McEvent,
        centrality: f32,
        rapidity_shift: f64,
    ) {
        for particle in mc.primaries() {
            match Species::from_pdg(particle.pdg) {
                Some(species) if species.is_cascade() => self.fill_spectrum(
                    level,
                    species,
                    particle.pt(),
                    particle.rapidity(),
                    centrality,
                    rapidity_shift,
                ),
                _ => {}
            }
        }
        for particle in &mc.particles {
            let Some(species) = Species::from_pdg(particle.pdg) else {
                continue;
            };
            if species.is_cascade() || !particle.is_physical_primary() {
                continue;
            }
            self.fill_spectrum(
                level,
                species,
                particle.pt(),
                particle.rapidity(),
                centrality,
                rapidity_shift,
            );
        }
    }

    /// Record an event that passed the full event selection
    pub fn add_selected_event(&mut self, centrality: f32) {
        self.selected_events.push(centrality);
    }

    pub fn selected_events(&self) -> &[f32] {
        &self.selected_events
    }

    /// Count a rejected event or candidate
    pub fn add_rejection(&mut self, reason: impl ToString) {
        *self.rejections.entry(reason.to_string()).or_default() += 1;
    }

    pub fn rejections(&self, reason: impl ToString) -> u64 {
        self.rejections.get(&reason.to_string()).copied().unwrap_or_default()
    }

    pub fn add_record(&mut self) {
        self.nrecords += 1;
    }

    pub fn nrecords(&self) -> u64 {
        self.nrecords
    }

    /// Export the accumulated histograms
    pub fn finalize(self) -> Histograms {
        Histograms {
            counters: self.counters,
            spectra: self.spectra,
            selected_events: self.selected_events,
            rejections: self.rejections,
            nrecords: self.nrecords,
        }
    }
}

fn spectrum_idx(level: Level, species: Species, frame: Frame) -> usize {
    let nspecies = Species::iter().len();
    let nframes = Frame::iter().len();
    (level as usize * nspecies + species as usize) * nframes + frame as usize
}

/// Final analysis histograms
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Histograms {
    pub counters: EventCounters,
    pub spectra: Vec<Spectrum>,
    /// Centrality of each event passing the event selection
    pub selected_events: Vec<f32>,
    /// Number of rejected events and candidates per reason
    pub rejections: BTreeMap<String, u64>,
    /// Number of written candidate records
    pub nrecords: u64,
}

impl Histograms {
    pub fn spectrum(&self, level: Level, species: Species, frame: Frame) -> Option<&Hist3D> {
        self.spectra
            .iter()
            .find(|s| s.level == level && s.species == species && s.frame == frame)
            .map(|s| &s.hist)
    }
}
