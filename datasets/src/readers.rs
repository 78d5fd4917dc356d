use std::io::BufRead;
use std::io::Read;

use csv::ReaderBuilder;
use log::debug;
use sylva::{Attribute, Dataset, Schema};

use crate::error::{DatasetError, Result};

/// Marker of a missing value
const MISSING: &str = "?";

/// Parse a numeric field, `?` and empty fields are missing
fn parse_field(field: &str, line: usize) -> Result<Option<f64>> {
    let field = field.trim();
    if field.is_empty() || field == MISSING {
        return Ok(None);
    }

    field
        .parse()
        .map(Some)
        .map_err(|_| DatasetError::Parse {
            line,
            field: field.to_string(),
        })
}

/// Parse the target of a sample, which must not be missing
fn parse_target(field: &str, line: usize) -> Result<f64> {
    parse_field(field, line)?.ok_or_else(|| DatasetError::Parse {
        line,
        field: field.to_string(),
    })
}

/// Schema of the auto-mpg dataset, the fuel consumption is the target
pub fn auto_mpg_schema() -> Schema {
    Schema::new(
        vec![
            Attribute::discrete("cylinders"),
            Attribute::continuous("displacement"),
            Attribute::continuous("horsepower"),
            Attribute::continuous("weight"),
            Attribute::continuous("acceleration"),
            Attribute::discrete("model year"),
            Attribute::discrete("origin"),
        ],
        "mpg",
    )
}

/// Read the auto-mpg dataset
///
/// Every line holds the fuel consumption followed by the seven attributes of
/// [`auto_mpg_schema`], separated by whitespace, and ends with the quoted name of the car,
/// which is ignored. Missing values are written as `?`, empty lines are skipped.
pub fn auto_mpg_from_reader<R: BufRead>(reader: R) -> Result<Dataset<f64>> {
    let schema = auto_mpg_schema();
    let expected = schema.len() + 1;

    let mut rows = Vec::new();
    let mut targets = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = idx + 1;

        let numeric = line.split('"').next().unwrap_or_default();
        let fields: Vec<&str> = numeric.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != expected {
            return Err(DatasetError::FieldCount {
                line: line_number,
                expected,
                found: fields.len(),
            });
        }

        targets.push(parse_target(fields[0], line_number)?);
        rows.push(
            fields[1..]
                .iter()
                .map(|field| parse_field(field, line_number))
                .collect::<Result<Vec<_>>>()?,
        );
    }

    debug!("read {} auto-mpg samples", targets.len());

    Ok(Dataset::from_raw(schema, rows, targets)?)
}

/// Read the wine quality dataset
///
/// The first line names the columns, the last column is the quality of the wine and becomes
/// the target. All other columns are continuous attributes.
pub fn winequality_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Dataset<f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let expected = headers.len();
    if expected < 2 {
        return Err(DatasetError::FieldCount {
            line: 1,
            expected: 2,
            found: expected,
        });
    }

    let attributes = headers
        .iter()
        .take(expected - 1)
        .map(|name| Attribute::continuous(name.trim()))
        .collect();
    let target = headers.get(expected - 1).unwrap_or_default().trim();
    let schema = Schema::new(attributes, target);

    let mut rows = Vec::new();
    let mut targets = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        // the header is the first line
        let line_number = idx + 2;
        if record.len() != expected {
            return Err(DatasetError::FieldCount {
                line: line_number,
                expected,
                found: record.len(),
            });
        }

        rows.push(
            record
                .iter()
                .take(expected - 1)
                .map(|field| parse_field(field, line_number))
                .collect::<Result<Vec<_>>>()?,
        );
        targets.push(parse_target(&record[expected - 1], line_number)?);
    }

    debug!(
        "read {} samples with {} attributes and target `{}`",
        targets.len(),
        schema.len(),
        schema.target()
    );

    Ok(Dataset::from_raw(schema, rows, targets)?)
}
