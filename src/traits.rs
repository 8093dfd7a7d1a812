use crate::record::CandidateRecord;

/// Append-only destination for accepted candidates
pub trait RecordSink {
    type Error;

    fn push(&mut self, record: CandidateRecord) -> Result<(), Self::Error>;

    /// Called once after the last record
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    type Error = S::Error;

    fn push(&mut self, record: CandidateRecord) -> Result<(), Self::Error> {
        (**self).push(record)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (**self).finish()
    }
}

/// Progress indicator
pub trait Progress {
    fn inc(&self, i: u64);

    fn finish(&self);
}
