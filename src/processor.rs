use log::{debug, trace};

use crate::accumulator::Accumulator;
use crate::config::AnalysisConfig;
use crate::event::Event;
use crate::event_selection::{EventRejection, EventSelection};
use crate::pid::PidResponse;
use crate::selector::CandidateSelector;
use crate::traits::RecordSink;

/// Result of processing a single event
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EventOutcome {
    Rejected(EventRejection),
    Analysed { accepted: usize, rejected: usize },
}

/// Event-by-event analysis
#[derive(Clone, Debug, PartialEq)]
pub struct EventProcessor<P> {
    selection: EventSelection,
    selector: CandidateSelector<P>,
}

impl<P: PidResponse> EventProcessor<P> {
    pub fn new(config: AnalysisConfig, pid: P) -> Self {
        let AnalysisConfig {
            event,
            candidate,
            rapidity_shift,
        } = config;
        Self {
            selection: EventSelection::new(event, rapidity_shift),
            selector: CandidateSelector::new(candidate, pid),
        }
    }

    /// Process one event
    ///
    /// Histograms and counters are filled into `acc` and every accepted
    /// candidate is pushed to `sink`. Only errors from the sink are
    /// propagated, rejected events and candidates are not errors.
    pub fn process<S: RecordSink>(
        &self,
        event: &Event,
        acc: &mut Accumulator,
        sink: &mut S,
    ) -> Result<EventOutcome, S::Error> {
        let selected = match self.selection.select(event, acc) {
            Ok(selected) => selected,
            Err(reason) => {
                debug!("Event {} rejected: {reason}", event.id);
                acc.add_rejection(reason);
                return Ok(EventOutcome::Rejected(reason));
            }
        };
        let mut accepted = 0;
        let mut rejected = 0;
        for (n, v0) in event.v0s.iter().enumerate() {
            match self.selector.select(event, &selected, v0) {
                Ok(record) => {
                    sink.push(record)?;
                    acc.add_record();
                    accepted += 1;
                }
                Err(reason) => {
                    trace!("Event {} V0 {n} rejected: {reason}", event.id);
                    acc.add_rejection(reason);
                    rejected += 1;
                }
            }
        }
        Ok(EventOutcome::Analysed { accepted, rejected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TRIGGER_INT7;
    use crate::event::{EventBuilder, Vertex, V0};
    use crate::pid::NoPid;
    use crate::record::CandidateRecord;
    use crate::selector::CandidateRejection;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn rejected_event_and_candidates() {
        log_init();
        let mut builder = EventBuilder::new(0);
        builder
            .vertex_tracks(Vertex {
                n_contributors: 1,
                ..Default::default()
            })
            .centrality("V0A", 10., 0)
            .trigger_mask(TRIGGER_INT7)
            .add_v0(V0 {
                pos_index: 0,
                neg_index: 1,
                pos_momentum: [1., 0., 0.],
                ..Default::default()
            });
        let mut event = builder.build();
        let processor = EventProcessor::new(AnalysisConfig::default(), NoPid {});
        let mut acc = Accumulator::new();
        let mut records: Vec<CandidateRecord> = Vec::new();

        let outcome = processor.process(&event, &mut acc, &mut records).unwrap();
        assert_eq!(outcome, EventOutcome::Analysed { accepted: 0, rejected: 1 });
        assert_eq!(acc.rejections(CandidateRejection::MissingTrack), 1);

        event.trigger_mask = 0;
        let outcome = processor.process(&event, &mut acc, &mut records).unwrap();
        assert_eq!(outcome, EventOutcome::Rejected(EventRejection::NotTriggered));
        assert_eq!(acc.rejections("not_triggered"), 1);
        assert!(records.is_empty());
        assert_eq!(acc.nrecords(), 0);
    }
}
