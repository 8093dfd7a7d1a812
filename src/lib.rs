//! `v0perf` extracts V0 candidates from reconstructed and simulated
//! collision events for reconstruction performance studies.
//!
//! For each event passing the event selection, V0 candidates (neutral
//! decays into two charged daughter tracks) are subjected to track
//! quality and invariant-mass cuts. Accepted candidates are written as
//! flat records together with their association to simulated truth.
//! Generated spectra of strange hadrons and event counters are
//! accumulated for efficiency normalisation.
//!
//! # How to use
//!
//! Read events with a [reader::CombinedReader], set up an
//! [processor::EventProcessor] from an [config::AnalysisConfig], and
//! run a [analysis::V0Analysis] writing to a [writer::FileWriter] or
//! any other [traits::RecordSink].
//!
//! ## Most relevant modules
//!
//! - [prelude] exports a list of the most relevant classes and objects
//! - [event] and [truth] for the input event format
//! - [event_selection] and [selector] for the event and candidate cuts
//! - [association] for matching candidates to simulated truth
//! - [accumulator] for histograms and counters
//!

/// Histograms of generated spectra and event counters
pub mod accumulator;
/// Full analysis over a sequence of events
pub mod analysis;
/// Matching of candidates to simulated particles
pub mod association;
/// Input decompression and output compression
pub mod compression;
/// Analysis settings
pub mod config;
/// Reconstructed event class
pub mod event;
/// Event-level selection
pub mod event_selection;
/// Four-vector class
pub mod four_vector;
/// Fixed-binning histograms
pub mod histogram;
/// Kinematic and geometric helpers
pub mod kinematics;
/// Invariant-mass windows
pub mod mass_window;
/// Particle identification
pub mod pid;
/// Most important exports
pub mod prelude;
/// Per-event processing
pub mod processor;
/// Progress bar
pub mod progress_bar;
/// Event readers
pub mod reader;
/// Output record of accepted candidates
pub mod record;
/// Candidate selection
pub mod selector;
/// Common traits
pub mod traits;
/// Simulated truth
pub mod truth;
/// Candidate and histogram writers
pub mod writer;

use lazy_static::lazy_static;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
lazy_static! {
    pub static ref VERSION_MAJOR: u32 =
        env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap();
    pub static ref VERSION_MINOR: u32 =
        env!("CARGO_PKG_VERSION_MINOR").parse().unwrap();
    pub static ref VERSION_PATCH: u32 =
        env!("CARGO_PKG_VERSION_PATCH").parse().unwrap();
}
pub const GIT_REV: Option<&str> = option_env!("VERGEN_GIT_SHA");
pub const GIT_BRANCH: Option<&str> = option_env!("VERGEN_GIT_BRANCH");
