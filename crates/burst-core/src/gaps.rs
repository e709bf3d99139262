//! Gap sequence loading.
//!
//! A gap file holds one line of whitespace-separated numbers, each the
//! duration between two consecutive events, in chronological order.

use crate::error::{BurstError, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// Ordered, immutable sequence of inter-event gaps.
///
/// Every gap is finite and non-negative, and the sequence is never empty.
/// Zero gaps are allowed (simultaneous events).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GapSequence {
    values: Vec<f64>,
}

impl GapSequence {
    /// Build a sequence, rejecting empty input and negative or non-finite gaps.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(BurstError::invalid("gap sequence is empty"));
        }
        if let Some((idx, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(BurstError::invalid(format!(
                "gap {} is {}, expected a finite non-negative duration",
                idx, v
            )));
        }
        Ok(Self { values })
    }

    /// Number of gaps.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Total duration, summed front to back.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Smallest strictly positive gap, if any.
    pub fn min_positive(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|&v| v > 0.0)
            .fold(None, |acc: Option<f64>, v| match acc {
                Some(m) if m <= v => Some(m),
                _ => Some(v),
            })
    }
}

impl<'a> IntoIterator for &'a GapSequence {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Parse gap file content.
///
/// Only the first line is read. Further non-empty lines are ignored with a
/// warning.
pub fn parse_gaps(content: &str) -> Result<GapSequence> {
    let mut lines = content.lines();
    let first = lines.next().unwrap_or("");

    let ignored = lines.filter(|l| !l.trim().is_empty()).count();
    if ignored > 0 {
        warn!(ignored_lines = ignored, "gap source has extra lines; only the first is used");
    }

    let mut values = Vec::new();
    for (index, token) in first.split_whitespace().enumerate() {
        let value = token.parse::<f64>().map_err(|source| BurstError::Parse {
            index,
            token: token.to_string(),
            source,
        })?;
        values.push(value);
    }

    debug!(gaps = values.len(), "parsed gap sequence");
    GapSequence::new(values)
}

/// Read and parse a gap file.
pub fn read_gaps(path: &Path) -> Result<GapSequence> {
    let content = std::fs::read_to_string(path).map_err(|source| BurstError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_gaps(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_single_line() {
        let gaps = parse_gaps("1 1 1 1 10 1 1 1 1\n").unwrap();
        assert_eq!(gaps.len(), 9);
        assert_eq!(gaps.as_slice()[4], 10.0);
        assert_eq!(gaps.total(), 18.0);
    }

    #[test]
    fn parse_mixed_whitespace_and_notation() {
        let gaps = parse_gaps("  0.5\t2e1   3.25 ").unwrap();
        assert_eq!(gaps.as_slice(), &[0.5, 20.0, 3.25]);
    }

    #[test]
    fn parse_uses_first_line_only() {
        let gaps = parse_gaps("1 2\n3 4\n").unwrap();
        assert_eq!(gaps.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn parse_rejects_non_numeric_token() {
        let err = parse_gaps("1 2 x3 4").unwrap_err();
        match err {
            BurstError::Parse { index, token, .. } => {
                assert_eq!(index, 2);
                assert_eq!(token, "x3");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn parse_empty_is_invalid_input() {
        assert!(matches!(parse_gaps(""), Err(BurstError::InvalidInput(_))));
        assert!(matches!(parse_gaps("   \n1 2"), Err(BurstError::InvalidInput(_))));
    }

    #[test]
    fn negative_gap_is_invalid_input() {
        let err = parse_gaps("1 -2 3").unwrap_err();
        assert!(matches!(err, BurstError::InvalidInput(_)));
        assert!(err.to_string().contains("gap 1"));
    }

    #[test]
    fn non_finite_gap_is_invalid_input() {
        assert!(matches!(parse_gaps("1 inf"), Err(BurstError::InvalidInput(_))));
        assert!(matches!(parse_gaps("NaN 1"), Err(BurstError::InvalidInput(_))));
    }

    #[test]
    fn all_zero_gaps_load() {
        // Degenerate sequences load; the state space builder rejects them.
        let gaps = parse_gaps("0 0 0").unwrap();
        assert_eq!(gaps.min_positive(), None);
        assert_eq!(gaps.total(), 0.0);
    }

    #[test]
    fn min_positive_skips_zeros() {
        let gaps = GapSequence::new(vec![0.0, 2.0, 0.0, 0.5, 4.0]).unwrap();
        assert_eq!(gaps.min_positive(), Some(0.5));
    }

    #[test]
    fn read_gaps_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10 10 0.5 0.5 10").unwrap();
        let gaps = read_gaps(file.path()).unwrap();
        assert_eq!(gaps.len(), 5);
    }

    #[test]
    fn read_gaps_missing_file_is_io_error() {
        let err = read_gaps(Path::new("/nonexistent/burst/gaps.txt")).unwrap_err();
        assert!(matches!(err, BurstError::Io { .. }));
    }

    #[test]
    fn gap_sequence_serializes_as_array() {
        let gaps = GapSequence::new(vec![1.0, 2.5]).unwrap();
        assert_eq!(serde_json::to_string(&gaps).unwrap(), "[1.0,2.5]");
    }
}
