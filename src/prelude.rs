pub use crate::{
    accumulator::{Accumulator, Frame, Histograms, Level, Species},
    analysis::{V0Analysis, V0AnalysisBuilder},
    config::{AnalysisConfig, CandidateCuts, EventCuts},
    event::{Event, EventBuilder, Track, Vertex, V0},
    pid::{NoPid, PidResponse, StoredPid},
    processor::{EventOutcome, EventProcessor},
    reader::CombinedReader,
    record::CandidateRecord,
    traits::RecordSink,
    truth::{McEvent, Origin, TruthParticle},
    writer::{FileWriter, OutputFormat},
};
