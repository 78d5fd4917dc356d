//! `sylva-datasets` reads the datasets the sylva regression trees are evaluated on and generates
//! synthetic datasets for tests and benchmarks.
//!
//! ## The Big Picture
//!
//! Readers turn a textual dataset into a [`sylva::Dataset`], tagging every value with the kind
//! of its attribute. Two formats are supported:
//!
//! * [`Format::AutoMpg`]: whitespace separated fields followed by a quoted name, `?` marks a
//!   missing value
//! * [`Format::WineQuality`]: delimited values with a header line, the last column is the target
//!
//! ## Using a dataset
//!
//! ```no_run
//! use sylva_datasets::{load, Format};
//!
//! let dataset = load("winequality-red.csv.gz", Format::WineQuality { delimiter: b';' })?;
//! let (train, test) = dataset.split_with_ratio(0.8);
//! # Ok::<(), sylva_datasets::DatasetError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

mod error;
pub mod generate;
mod readers;

pub use error::{DatasetError, Result};
pub use readers::{auto_mpg_from_reader, auto_mpg_schema, winequality_from_reader};

/// Textual formats of the datasets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Whitespace separated fields, see [`auto_mpg_from_reader`]
    AutoMpg,
    /// Delimited fields with a header, see [`winequality_from_reader`]
    WineQuality { delimiter: u8 },
}

/// Read a dataset from any buffered reader
pub fn from_reader<R: BufRead>(reader: R, format: Format) -> Result<sylva::Dataset<f64>> {
    match format {
        Format::AutoMpg => auto_mpg_from_reader(reader),
        Format::WineQuality { delimiter } => winequality_from_reader(reader, delimiter),
    }
}

/// Read a dataset from a file, files ending in `.gz` are decompressed
pub fn load<P: AsRef<Path>>(path: P, format: Format) -> Result<sylva::Dataset<f64>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    if path.extension().map_or(false, |ext| ext == "gz") {
        from_reader(BufReader::new(GzDecoder::new(file)), format)
    } else {
        from_reader(BufReader::new(file), format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;
    use sylva::dataset::Records;

    #[test]
    fn load_gzipped_file() {
        let path = std::env::temp_dir().join(format!("sylva-auto-mpg-{}.data.gz", std::process::id()));
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(b"18.0 8 307.0 130.0 3504. 12.0 70 1 \"chevrolet\"\n")
            .unwrap();
        encoder.finish().unwrap();

        let dataset = load(&path, Format::AutoMpg).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(dataset.nsamples(), 1);
        assert_eq!(dataset.nfeatures(), 7);
    }

    #[test]
    fn missing_file() {
        let err = load("/nonexistent/sylva.data", Format::AutoMpg).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
