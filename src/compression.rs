use std::io::Write;
use std::str::FromStr;

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;
use lazy_static::lazy_static;
use log::error;
use regex::Regex;
use thiserror::Error;

const GZIP_DEFAULT_LEVEL: u8 = 6;
const LZ4_DEFAULT_LEVEL: u8 = 0;
const ZSTD_DEFAULT_LEVEL: u8 = 0;

lazy_static! {
    static ref COMPRESSION_RE: Regex =
        Regex::new(r"^(?P<algo>[[:alnum:]]+)(?P<lvl>_\d+)?$").unwrap();
}

/// Compression format
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Compression {
    /// The bzip2 format
    Bzip2,
    /// The gzip format with compression level as associated value
    Gzip(u8),
    /// The lz4 format with compression level as associated value
    Lz4(u8),
    /// The zstd format with compression level as associated value
    Zstd(u8),
}

impl FromStr for Compression {
    type Err = ParseCompressionErr;

    /// Parse `algorithm` or `algorithm_level`, e.g. `zstd_5`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Compression::*;
        use ParseCompressionErr::*;

        let lower_case = s.to_ascii_lowercase();
        let Some(captures) = COMPRESSION_RE.captures(&lower_case) else {
            return Err(UnknownAlgorithm(s.to_owned()));
        };
        let algo = &captures["algo"];
        let lvl_str = captures.name("lvl").map(|l| l.as_str());
        let parse_lvl = |max: u8, default: u8| match lvl_str {
            Some(lvl_str) => match lvl_str[1..].parse::<u8>() {
                Ok(lvl) if lvl <= max => Ok(lvl),
                _ => Err(UnsupportedLevel(lvl_str[1..].to_owned(), algo.to_owned())),
            },
            None => Ok(default),
        };
        match algo {
            "bzip2" | "bz2" => match lvl_str {
                Some(lvl_str) => {
                    Err(UnsupportedLevel(lvl_str[1..].to_owned(), algo.to_owned()))
                }
                None => Ok(Bzip2),
            },
            "gzip" | "gz" => parse_lvl(9, GZIP_DEFAULT_LEVEL).map(Gzip),
            "lz4" => parse_lvl(16, LZ4_DEFAULT_LEVEL).map(Lz4),
            "zstd" | "zstandard" => parse_lvl(19, ZSTD_DEFAULT_LEVEL).map(Zstd),
            _ => Err(UnknownAlgorithm(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseCompressionErr {
    #[error("Unknown compression algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("Level {0} not supported for {1} compression")]
    UnsupportedLevel(String, String),
}

/// Convert into a writer that compresses to the given format
pub fn compress_writer<'a, W: 'a + Write>(
    writer: W,
    compression: Option<Compression>,
) -> Result<Box<dyn Write + 'a>, std::io::Error> {
    match compression {
        Some(Compression::Bzip2) => {
            let encoder = BzEncoder::new(writer, bzip2::Compression::best());
            Ok(Box::new(encoder))
        }
        Some(Compression::Gzip(lvl)) => {
            let encoder =
                GzEncoder::new(writer, flate2::Compression::new(lvl.into()));
            Ok(Box::new(encoder))
        }
        Some(Compression::Lz4(lvl)) => {
            let encoder = lz4::EncoderBuilder::new()
                .auto_flush(true)
                .level(lvl.into())
                .build(writer)?;
            Ok(Box::new(Lz4Writer(Some(encoder))))
        }
        Some(Compression::Zstd(lvl)) => {
            let encoder = zstd::Encoder::new(writer, lvl.into())?;
            Ok(Box::new(encoder.auto_finish()))
        }
        None => Ok(Box::new(writer)),
    }
}

/// lz4 encoder that writes the end of frame when dropped
struct Lz4Writer<W: Write>(Option<lz4::Encoder<W>>);

impl<W: Write> Write for Lz4Writer<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.0.as_mut() {
            Some(encoder) => encoder.write(buf),
            None => Ok(0),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.0.as_mut() {
            Some(encoder) => encoder.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for Lz4Writer<W> {
    fn drop(&mut self) {
        if let Some(encoder) = self.0.take() {
            let (_, res) = encoder.finish();
            if let Err(err) = res {
                error!("Failed to finish lz4 stream: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use audec::auto_decompress;

    #[test]
    fn parse() {
        use Compression::*;
        assert_eq!("bzip2".parse(), Ok(Bzip2));
        assert_eq!("GZ".parse(), Ok(Gzip(GZIP_DEFAULT_LEVEL)));
        assert_eq!("zstd_19".parse(), Ok(Zstd(19)));
        assert_eq!("lz4_3".parse(), Ok(Lz4(3)));
        assert!(matches!(
            "zstd_20".parse::<Compression>(),
            Err(ParseCompressionErr::UnsupportedLevel(..))
        ));
        assert!(matches!(
            "bzip2_3".parse::<Compression>(),
            Err(ParseCompressionErr::UnsupportedLevel(..))
        ));
        assert!(matches!(
            "xz".parse::<Compression>(),
            Err(ParseCompressionErr::UnknownAlgorithm(..))
        ));
    }

    #[test]
    fn compress_then_detect() {
        const TEXT: &str = "trigger_mask: 2\nmagnetic_field: 5.0\n";
        for compression in [
            None,
            Some(Compression::Bzip2),
            Some(Compression::Gzip(6)),
            Some(Compression::Lz4(0)),
            Some(Compression::Zstd(3)),
        ] {
            let mut buf = Vec::new();
            {
                let mut w = compress_writer(&mut buf, compression).unwrap();
                w.write_all(TEXT.as_bytes()).unwrap();
            }
            let mut r = auto_decompress(buf.as_slice());
            let mut out = String::new();
            r.read_to_string(&mut out).unwrap();
            assert_eq!(out, TEXT, "{compression:?}");
        }
    }
}
