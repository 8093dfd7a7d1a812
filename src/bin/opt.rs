use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use v0perf::compression::Compression;
use v0perf::writer::OutputFormat;

/// Source of particle identification information
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, ValueEnum)]
pub(crate) enum PidSource {
    /// Use the TPC response stored with each track
    #[default]
    Stored,
    /// No particle identification
    None,
}

#[derive(Debug, Parser)]
#[clap(about, author, version)]
pub(crate) struct Opt {
    /// Output file for accepted candidates.
    #[clap(long, short, value_parser)]
    pub(crate) outfile: PathBuf,

    /// Output file for histograms and event counters.
    #[clap(long, value_parser)]
    pub(crate) histograms: Option<PathBuf>,

    #[clap(
        long,
        default_value = "table",
        help = "Format of the candidate output.
Possible settings are 'table' for whitespace-separated columns
and 'yaml' for a stream of YAML documents."
    )]
    pub(crate) outformat: OutputFormat,

    #[clap(long,
                help = "Compress output files.
Possible settings are 'bzip2', 'gzip', 'zstd', 'lz4'.
Compression levels can be set with algorithm_level e.g. 'zstd_5'.
Maximum levels are 'gzip_9', 'zstd_19', 'lz4_16'.")]
    pub(crate) compression: Option<Compression>,

    /// Analysis configuration file in YAML format.
    ///
    /// Settings that are not given take their default values.
    #[clap(long, short, value_parser)]
    pub(crate) config: Option<PathBuf>,

    /// Only analyse single-diffractive simulated events.
    #[clap(long)]
    pub(crate) diffractive_only: bool,

    /// Source of particle identification.
    #[clap(value_enum, long, default_value = "stored")]
    pub(crate) pid: PidSource,

    /// Verbosity level
    #[clap(
        short,
        long,
        default_value = "Info",
        help = "Verbosity level.
Possible values with increasing amount of output are
'off', 'error', 'warn', 'info', 'debug', 'trace'.\n"
    )]
    pub(crate) loglevel: String,

    /// Input event files
    #[clap(name = "INFILES", value_parser, required = true)]
    pub(crate) infiles: Vec<PathBuf>,
}
