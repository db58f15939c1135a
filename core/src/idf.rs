use crate::dictfile::{for_each_line, parse_entry};
use crate::error::{AnalyseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Inverse document frequencies with the median used for unseen terms.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    values: HashMap<String, f64>,
    median: f64,
}

/// Result of [`crate::TagExtractor::get_idf`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdfLookup {
    /// Stored IDF, or 0.0 when the term is unknown.
    pub frequency: f64,
    pub median: f64,
    pub found: bool,
}

impl IdfTable {
    /// Builds the table and computes the median once. The median counts every
    /// entry, repeats included; the last value for a repeated term wins.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut values = HashMap::new();
        let mut sorted = Vec::new();
        for (term, value) in entries {
            let term: String = term.into();
            if !valid(value) {
                return Err(AnalyseError::InvalidIdf { term, value });
            }
            sorted.push(value);
            values.insert(term, value);
        }
        sorted.sort_unstable_by(f64::total_cmp);
        let median = sorted.get(sorted.len() / 2).copied().unwrap_or(0.0);
        Ok(Self { values, median })
    }

    /// Reads `term idf` lines. Values must be finite and non-negative.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut entries = Vec::new();
        for_each_line(path, |line_no, line| {
            let entry = parse_entry(path, line_no, line)?;
            if !valid(entry.frequency) {
                return Err(AnalyseError::malformed(
                    path,
                    line_no,
                    format!("idf for {:?} must be finite and non-negative", entry.word),
                ));
            }
            entries.push((entry.word, entry.frequency));
            Ok(())
        })?;
        let table = Self::from_entries(entries)?;
        tracing::debug!(path = %path.display(), terms = table.len(), median = table.median, "loaded idf table");
        Ok(table)
    }

    pub fn frequency(&self, term: &str) -> Option<f64> { self.values.get(term).copied() }

    pub fn median(&self) -> f64 { self.median }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn lookup(&self, term: &str) -> IdfLookup {
        match self.frequency(term) {
            Some(frequency) => IdfLookup { frequency, median: self.median, found: true },
            None => IdfLookup { frequency: 0.0, median: self.median, found: false },
        }
    }
}

fn valid(value: f64) -> bool { value.is_finite() && value >= 0.0 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_is_upper_middle() {
        let t = IdfTable::from_entries([("a", 1.0), ("b", 4.0), ("c", 2.0), ("d", 3.0)]).unwrap();
        assert_eq!(t.median(), 3.0);
        let t = IdfTable::from_entries([("a", 5.0), ("b", 1.0), ("c", 9.0)]).unwrap();
        assert_eq!(t.median(), 5.0);
    }

    #[test]
    fn empty_table_has_zero_median() {
        let t = IdfTable::default();
        assert_eq!(t.lookup("x"), IdfLookup { frequency: 0.0, median: 0.0, found: false });
    }

    #[test]
    fn lookup_reports_found_values() {
        let t = IdfTable::from_entries([("foo", 2.5)]).unwrap();
        assert_eq!(t.lookup("foo"), IdfLookup { frequency: 2.5, median: 2.5, found: true });
    }

    #[test]
    fn repeated_terms_count_toward_median() {
        let t = IdfTable::from_entries([("a", 1.0), ("a", 1.0), ("a", 1.0), ("b", 5.0), ("c", 9.0)]).unwrap();
        assert_eq!(t.median(), 1.0);
        assert_eq!(t.len(), 3);

        let t = IdfTable::from_entries([("a", 1.0), ("b", 5.0), ("a", 7.0)]).unwrap();
        assert_eq!(t.frequency("a"), Some(7.0));
        assert_eq!(t.median(), 5.0);
    }

    #[test]
    fn repeated_lines_in_file_count_toward_median() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idf.txt");
        std::fs::write(&path, "a 1.0\na 1.0\na 1.0\nb 5.0\nc 9.0\n").unwrap();
        let t = IdfTable::from_path(&path).unwrap();
        assert_eq!(t.median(), 1.0);
        assert_eq!(t.lookup("zzz").median, 1.0);
    }

    #[test]
    fn rejects_nan_and_negative_values() {
        let err = IdfTable::from_entries([("rust", f64::NAN)]).unwrap_err();
        assert!(matches!(err, AnalyseError::InvalidIdf { ref term, .. } if term == "rust"));
        let err = IdfTable::from_entries([("golang", -3.0)]).unwrap_err();
        assert!(err.to_string().contains("golang"));
        assert!(IdfTable::from_entries([("zig", f64::INFINITY)]).is_err());
        assert!(IdfTable::from_entries([("cargo", 0.0)]).is_ok());
    }
}
