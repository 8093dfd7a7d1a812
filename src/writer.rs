use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use strum::{Display, EnumString};
use thiserror::Error;
use typed_builder::TypedBuilder;

use crate::accumulator::Histograms;
use crate::compression::{compress_writer, Compression};
use crate::record::CandidateRecord;
use crate::traits::RecordSink;

/// Supported output formats for candidate records
#[derive(
    Copy, Clone, Debug, Default, Display, EnumString, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Whitespace-separated columns with a `#` header line
    #[default]
    Table,
    /// One YAML document per record
    Yaml,
}

/// Writer of candidate records to a file
///
/// The file is created on the first record or on [RecordSink::finish],
/// whichever comes first.
#[derive(TypedBuilder)]
pub struct FileWriter {
    #[builder(setter(into))]
    filename: PathBuf,
    #[builder(default)]
    format: OutputFormat,
    #[builder(default)]
    compression: Option<Compression>,
    #[builder(default, setter(skip))]
    out: Option<Box<dyn Write>>,
    #[builder(default, setter(skip))]
    finished: bool,
}

impl FileWriter {
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    fn out(&mut self) -> Result<&mut Box<dyn Write>, WriteError> {
        if self.finished {
            return Err(WriteError::Finished);
        }
        if self.out.is_none() {
            debug!("Writing candidates to {:?}", self.filename);
            let mut out = create(&self.filename, self.compression)?;
            if self.format == OutputFormat::Table {
                writeln!(out, "{}", CandidateRecord::header())?;
            }
            self.out = Some(out);
        }
        self.out.as_mut().ok_or(WriteError::Finished)
    }
}

impl RecordSink for FileWriter {
    type Error = WriteError;

    fn push(&mut self, record: CandidateRecord) -> Result<(), Self::Error> {
        let format = self.format;
        let out = self.out()?;
        match format {
            OutputFormat::Table => writeln!(out, "{record}")?,
            OutputFormat::Yaml => {
                let doc = serde_yaml::to_string(&record)?;
                write!(out, "---\n{doc}")?;
            }
        }
        Ok(())
    }

    /// Flush and close the output
    fn finish(&mut self) -> Result<(), Self::Error> {
        self.out()?.flush()?;
        // dropping finishes compressed streams
        self.out = None;
        self.finished = true;
        Ok(())
    }
}

fn create(
    path: &Path,
    compression: Option<Compression>,
) -> Result<Box<dyn Write>, WriteError> {
    let file =
        File::create(path).map_err(|err| WriteError::CreateErr(path.to_owned(), err))?;
    compress_writer(BufWriter::new(file), compression)
        .map_err(|err| WriteError::CreateErr(path.to_owned(), err))
}

/// Export histograms and counters as YAML
pub fn write_histograms<P: AsRef<Path>>(
    path: P,
    histograms: &Histograms,
    compression: Option<Compression>,
) -> Result<(), WriteError> {
    let path = path.as_ref();
    debug!("Writing histograms to {path:?}");
    let mut out = create(path, compression)?;
    serde_yaml::to_writer(&mut out, histograms)?;
    out.flush()?;
    Ok(())
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to create {0:?}: {1}")]
    CreateErr(PathBuf, std::io::Error),
    #[error("Failed to write: {0}")]
    IoErr(#[from] std::io::Error),
    #[error("Failed to serialise: {0}")]
    YamlErr(#[from] serde_yaml::Error),
    #[error("Output already closed")]
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::Accumulator;
    use crate::reader::FileReader;

    fn record(event_id: usize) -> CandidateRecord {
        CandidateRecord {
            event_id,
            mass_lambda: 1.1157,
            ..Default::default()
        }
    }

    #[test]
    fn table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.dat");
        let mut writer = FileWriter::builder().filename(&path).build();
        writer.push(record(3)).unwrap();
        writer.push(record(4)).unwrap();
        writer.finish().unwrap();
        assert!(matches!(writer.push(record(5)), Err(WriteError::Finished)));
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CandidateRecord::header());
        assert!(lines[2].starts_with("4 "));
    }

    #[test]
    fn empty_table_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.dat");
        let mut writer = FileWriter::builder().filename(&path).build();
        writer.finish().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn compressed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.yaml.gz");
        let mut writer = FileWriter::builder()
            .filename(&path)
            .format(OutputFormat::Yaml)
            .compression(Some(Compression::Gzip(6)))
            .build();
        writer.push(record(3)).unwrap();
        writer.push(record(5)).unwrap();
        writer.finish().unwrap();

        let file = File::open(&path).unwrap();
        let input = audec::auto_decompress(std::io::BufReader::new(file));
        let records: Vec<CandidateRecord> = serde_yaml::Deserializer::from_reader(input)
            .map(|doc| serde::Deserialize::deserialize(doc).unwrap())
            .collect();
        assert_eq!(records, vec![record(3), record(5)]);
    }

    #[test]
    fn histograms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("histograms.yaml");
        let mut acc = Accumulator::new();
        acc.add_selected_event(42.);
        let hists = acc.finalize();
        write_histograms(&path, &hists, None).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let back: Histograms = serde_yaml::from_str(&content).unwrap();
        assert_eq!(back, hists);
        // not an event file
        assert!(FileReader::new(&path).unwrap().next().unwrap().is_err());
    }

    #[test]
    fn format_names() {
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
    }
}
