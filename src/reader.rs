use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use audec::auto_decompress;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::event::Event;

/// Reader for a stream of YAML event documents
///
/// The input may be compressed with any of the formats in
/// [Compression](crate::compression::Compression).
pub struct FileReader {
    path: PathBuf,
    documents: serde_yaml::Deserializer<'static>,
}

impl FileReader {
    /// Returns an event reader for the file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CreateError> {
        let path = path.as_ref().to_owned();
        let file = File::open(&path)
            .map_err(|err| CreateError::IoError(path.clone(), err))?;
        let input = auto_decompress(BufReader::new(file));
        debug!("Reading events from {path:?}");
        Ok(Self::from_input(path, input))
    }

    fn from_input<R: std::io::Read + 'static>(path: PathBuf, input: R) -> Self {
        Self {
            path,
            documents: serde_yaml::Deserializer::from_reader(input),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for FileReader {
    type Item = Result<Event, EventReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.documents.next()?;
        let event = Event::deserialize(document)
            .map_err(|err| EventReadError::YamlError(self.path.clone(), err));
        Some(event)
    }
}

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("Failed to open {0:?}: {1}")]
    IoError(PathBuf, std::io::Error),
}

#[derive(Debug, Error)]
pub enum EventReadError {
    #[error("Error reading event from {0:?}: {1}")]
    YamlError(PathBuf, serde_yaml::Error),
}

/// Reader chaining the events from several sources
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CombinedReader<R> {
    readers: Vec<R>,
    current: usize,
}

impl<R> CombinedReader<R> {
    pub fn new(readers: Vec<R>) -> Self {
        Self {
            readers,
            current: 0,
        }
    }
}

impl<R: Iterator> Iterator for CombinedReader<R> {
    type Item = <R as Iterator>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let reader = self.readers.get_mut(self.current)?;
            let next = reader.next();
            if next.is_some() {
                return next;
            }
            self.current += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.readers[self.current.min(self.readers.len())..]
            .iter()
            .map(|r| r.size_hint())
            .reduce(|(accmin, accmax), (min, max)| {
                let accmax = match (accmax, max) {
                    (Some(accmax), Some(max)) => Some(accmax + max),
                    _ => None,
                };
                (accmin + min, accmax)
            })
            .unwrap_or((0, Some(0)))
    }
}

impl CombinedReader<FileReader> {
    /// Construct a new reader reading from the files with the given names
    pub fn from_files<I, P>(files: I) -> Result<Self, CreateError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let readers: Result<_, _> = files.into_iter().map(FileReader::new).collect();
        Ok(Self::new(readers?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::compression::{compress_writer, Compression};

    const EVENTS: &str = r#"---
id: 1
vertex_tracks:
  position: [0.0, 0.0, 2.0]
  n_contributors: 3
magnetic_field: 5.0
centrality:
  percentiles:
    V0A: 42.0
trigger_mask: 2
---
id: 2
vertex_tracks:
  position: [0.0, 0.0, 15.0]
  n_contributors: 3
magnetic_field: 5.0
centrality:
  percentiles:
    V0A: 12.0
trigger_mask: 2
"#;

    #[test]
    fn read_stream() {
        let events: Vec<_> = FileReader::from_input(PathBuf::new(), EVENTS.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, 1);
        assert_eq!(events[1].best_vertex().z(), 15.);
    }

    #[test]
    fn combined_compressed_files() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("events.yaml");
        std::fs::write(&plain, EVENTS).unwrap();
        let compressed = dir.path().join("events.yaml.zst");
        {
            let file = File::create(&compressed).unwrap();
            let mut w = compress_writer(file, Some(Compression::Zstd(3))).unwrap();
            w.write_all(EVENTS.as_bytes()).unwrap();
        }
        let reader = CombinedReader::from_files([&plain, &compressed]).unwrap();
        let ids: Vec<_> = reader.map(|ev| ev.unwrap().id).collect();
        assert_eq!(ids, [1, 2, 1, 2]);

        assert!(matches!(
            CombinedReader::from_files([dir.path().join("missing.yaml")]),
            Err(CreateError::IoError(..))
        ));
    }

    #[test]
    fn nan_momentum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nan.yaml");
        let event = r#"
vertex_tracks:
  position: [0.0, 0.0, 2.0]
magnetic_field: 5.0
centrality:
  percentiles:
    V0A: 42.0
trigger_mask: 2
mc:
  primary_vertex: [0.0, 0.0, 2.0]
  n_primary: 1
  particles:
    - pdg: 3122
      momentum: [.nan, 1.0, 0.0, 0.0]
"#;
        std::fs::write(&path, event).unwrap();
        let mut reader = FileReader::new(&path).unwrap();
        assert!(matches!(reader.next(), Some(Err(EventReadError::YamlError(..)))));
    }

    #[test]
    fn malformed_event() {
        let mut reader =
            FileReader::from_input(PathBuf::new(), "trigger_mask: [1, 2]\n".as_bytes());
        assert!(matches!(reader.next(), Some(Err(EventReadError::YamlError(..)))));
    }
}
