//! Trial records and the series they form.
//!
//! A series file holds one record per line in the form
//! `index,duration,accumulator`, with every field rendered as decimal text.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use num_bigint::BigInt;
use thiserror::Error;

/// Errors produced while parsing a single record line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The line did not split into exactly three comma-separated fields.
    #[error("expected 3 comma-separated fields, found {found}")]
    FieldCount { found: usize },

    /// A field was not a decimal integer, or was negative where only
    /// non-negative values are allowed.
    #[error("invalid {field} '{value}'")]
    InvalidField { field: &'static str, value: String },
}

/// Errors produced while parsing a whole series.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    /// The series contains no records.
    #[error("series is empty")]
    Empty,

    /// A line could not be parsed as a record.
    #[error("line {line}: {source}")]
    Line {
        /// 1-based line number within the series text.
        line: usize,
        #[source]
        source: RecordError,
    },
}

/// The outcome of one timed trial, as persisted in a series file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialRecord {
    /// 1-based position of the trial within its run.
    pub index: u64,
    /// Elapsed wall-clock time of the trial in nanoseconds.
    pub duration_ns: u64,
    /// Accumulator value carried forward after the trial.
    pub accumulator: BigInt,
}

impl TrialRecord {
    /// Create a new trial record.
    pub fn new(index: u64, duration_ns: u64, accumulator: BigInt) -> Self {
        Self {
            index,
            duration_ns,
            accumulator,
        }
    }

    /// Get the trial duration as a `Duration`.
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.duration_ns)
    }
}

impl fmt::Display for TrialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.index, self.duration_ns, self.accumulator)
    }
}

impl FromStr for TrialRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [index, duration, accumulator] = fields.as_slice() else {
            return Err(RecordError::FieldCount {
                found: fields.len(),
            });
        };

        Ok(Self {
            index: parse_field("index", index)?,
            duration_ns: parse_field("duration", duration)?,
            accumulator: parse_field("accumulator", accumulator)?,
        })
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// An ordered, non-empty sequence of trial records read back from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    records: Vec<TrialRecord>,
}

impl Series {
    /// Build a series from records, rejecting an empty list.
    pub fn new(records: Vec<TrialRecord>) -> Result<Self, SeriesError> {
        if records.is_empty() {
            return Err(SeriesError::Empty);
        }
        Ok(Self { records })
    }

    /// Parse the text of a series file.
    ///
    /// Leading and trailing whitespace around the whole text is ignored, so
    /// the trailing newline after the last record is accepted. Any other
    /// blank line is malformed.
    pub fn parse(text: &str) -> Result<Self, SeriesError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SeriesError::Empty);
        }

        let records = text
            .lines()
            .enumerate()
            .map(|(i, line)| {
                line.parse::<TrialRecord>()
                    .map_err(|source| SeriesError::Line { line: i + 1, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    /// Number of trials in the series.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in file order.
    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    /// Iterate over the records in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, TrialRecord> {
        self.records.iter()
    }

    /// Durations of every trial in nanoseconds, in file order.
    pub fn durations_ns(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.duration_ns).collect()
    }

    /// Consume the series and return its records.
    pub fn into_records(self) -> Vec<TrialRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a TrialRecord;
    type IntoIter = std::slice::Iter<'a, TrialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display() {
        let record = TrialRecord::new(1, 5, BigInt::from(1u32));
        assert_eq!(record.to_string(), "1,5,1");
    }

    #[test]
    fn test_record_parse() {
        let record: TrialRecord = "3,1500,42".parse().unwrap();
        assert_eq!(record.index, 3);
        assert_eq!(record.duration_ns, 1500);
        assert_eq!(record.accumulator, BigInt::from(42u32));
        assert_eq!(record.duration(), Duration::from_nanos(1500));
    }

    #[test]
    fn test_record_parse_large_accumulator() {
        // Larger than u128::MAX
        let digits = "1000000000000000000000000000000000000000000";
        let record: TrialRecord = format!("1,10,{digits}").parse().unwrap();
        assert_eq!(record.accumulator.to_string(), digits);
        assert_eq!(record.to_string(), format!("1,10,{digits}"));
    }

    #[test]
    fn test_record_negative_accumulator() {
        let record: TrialRecord = "1,3000,-3".parse().unwrap();
        assert_eq!(record.accumulator, BigInt::from(-3));
        assert_eq!(record.to_string(), "1,3000,-3");
    }

    #[test]
    fn test_record_parse_wrong_field_count() {
        assert_eq!(
            "1,2".parse::<TrialRecord>(),
            Err(RecordError::FieldCount { found: 2 })
        );
        assert_eq!(
            "1,2,3,4".parse::<TrialRecord>(),
            Err(RecordError::FieldCount { found: 4 })
        );
        assert_eq!(
            "".parse::<TrialRecord>(),
            Err(RecordError::FieldCount { found: 1 })
        );
    }

    #[test]
    fn test_record_parse_non_numeric_duration() {
        assert_eq!(
            "1,abc,5".parse::<TrialRecord>(),
            Err(RecordError::InvalidField {
                field: "duration",
                value: "abc".to_string(),
            })
        );
    }

    #[test]
    fn test_record_parse_negative_duration() {
        assert!(matches!(
            "1,-5,5".parse::<TrialRecord>(),
            Err(RecordError::InvalidField {
                field: "duration",
                ..
            })
        ));
    }

    #[test]
    fn test_series_parse() {
        let series = Series::parse("1,5,1\n2,5,2\n3,5,3\n").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.durations_ns(), vec![5, 5, 5]);
        assert_eq!(series.records()[2].accumulator, BigInt::from(3u32));
    }

    #[test]
    fn test_series_parse_empty() {
        assert_eq!(Series::parse(""), Err(SeriesError::Empty));
        assert_eq!(Series::parse("\n\n"), Err(SeriesError::Empty));
        assert_eq!(Series::new(Vec::new()), Err(SeriesError::Empty));
    }

    #[test]
    fn test_series_parse_reports_line_number() {
        let err = Series::parse("1,5,1\n2,abc,2\n").unwrap_err();
        match err {
            SeriesError::Line { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(source, RecordError::InvalidField { .. }));
            }
            other => panic!("Expected line error, got {other:?}"),
        }
    }

    #[test]
    fn test_series_parse_blank_line_in_middle() {
        let err = Series::parse("1,5,1\n\n3,5,3\n").unwrap_err();
        assert!(matches!(err, SeriesError::Line { line: 2, .. }));
    }

    #[test]
    fn test_series_parse_crlf() {
        let series = Series::parse("1,5,1\r\n2,6,2\r\n").unwrap();
        assert_eq!(series.durations_ns(), vec![5, 6]);
    }
}
