//! Line-oriented dictionary files.
//!
//! Every dictionary shipped with the extractors is plain text with one entry
//! per line and whitespace-separated fields. Blank lines are skipped and line
//! numbers in errors are 1-based.

use crate::error::{AnalyseError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One `word frequency [pos]` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub word: String,
    pub frequency: f64,
    pub pos: Option<String>,
}

/// Calls `f` with the line number and trimmed text of each non-blank line.
pub fn for_each_line<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(usize, &str) -> Result<()>,
{
    let file = File::open(path).map_err(|e| AnalyseError::io(path, e))?;
    let reader = BufReader::new(file);
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| AnalyseError::io(path, e))?;
        let line = line.trim();
        if line.is_empty() { continue; }
        f(idx + 1, line)?;
    }
    Ok(())
}

/// Parse `word frequency [pos]`.
pub fn parse_entry(path: &Path, line_no: usize, line: &str) -> Result<Entry> {
    let mut fields = line.split_whitespace();
    let word = fields
        .next()
        .ok_or_else(|| AnalyseError::malformed(path, line_no, "empty entry"))?;
    let raw = fields
        .next()
        .ok_or_else(|| AnalyseError::malformed(path, line_no, format!("missing value for {word:?}")))?;
    let frequency: f64 = raw
        .parse()
        .map_err(|_| AnalyseError::malformed(path, line_no, format!("invalid number {raw:?}")))?;
    let pos = fields.next().map(str::to_string);
    Ok(Entry { word: word.to_string(), frequency, pos })
}

/// Read every entry of a `word frequency [pos]` file.
pub fn read_entries(path: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for_each_line(path, |line_no, line| {
        entries.push(parse_entry(path, line_no, line)?);
        Ok(())
    })?;
    Ok(entries)
}
