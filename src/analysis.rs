use log::info;
use thiserror::Error;

use crate::accumulator::{Accumulator, Histograms};
use crate::event::Event;
use crate::pid::PidResponse;
use crate::processor::EventProcessor;
use crate::progress_bar::{Progress, ProgressBar};
use crate::traits::RecordSink;

#[derive(Clone, Debug, PartialEq)]
pub struct V0AnalysisBuilder<R, P, W> {
    pub reader: R,
    pub processor: EventProcessor<P>,
    pub writer: W,
}

impl<R, P, W> V0AnalysisBuilder<R, P, W> {
    pub fn build(self) -> V0Analysis<R, P, W> {
        V0Analysis {
            reader: self.reader,
            processor: self.processor,
            writer: self.writer,
        }
    }
}

/// Analysis of a sequence of events
///
/// Events are taken from the reader one at a time, accepted candidates
/// are written and the histograms are returned at the end.
#[derive(Clone, Debug, PartialEq)]
pub struct V0Analysis<R, P, W> {
    reader: R,
    processor: EventProcessor<P>,
    writer: W,
}

#[derive(Debug, Error)]
pub enum AnalysisError<E1, E2> {
    #[error("Failed to read event: {0}")]
    ReadErr(E1),
    #[error("Failed to write candidates: {0}")]
    WriteErr(E2),
}

impl<R, P, W, E> V0Analysis<R, P, W>
where
    R: Iterator<Item = Result<Event, E>>,
    P: PidResponse,
    W: RecordSink,
{
    pub fn run(&mut self) -> Result<Histograms, AnalysisError<E, W::Error>> {
        use AnalysisError::*;

        let mut acc = Accumulator::new();
        let len = match self.reader.size_hint() {
            (min, Some(max)) if min == max => Some(min as u64),
            _ => None,
        };
        let progress = ProgressBar::new(len, "events analysed:");
        let mut nevents = 0;
        for event in &mut self.reader {
            let event = event.map_err(ReadErr)?;
            self.processor
                .process(&event, &mut acc, &mut self.writer)
                .map_err(WriteErr)?;
            nevents += 1;
            progress.inc(1);
        }
        progress.finish();
        self.writer.finish().map_err(WriteErr)?;
        info!(
            "Analysed {nevents} events, {} passed the event selection, {} candidates written",
            acc.selected_events().len(),
            acc.nrecords()
        );
        Ok(acc.finalize())
    }
}
