use crate::dictfile::for_each_line;
use crate::error::Result;
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::path::Path;

lazy_static! {
    static ref DEFAULT_STOP_WORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "the", "of", "is", "and", "to", "in", "that", "we", "for", "an", "are",
            "by", "be", "as", "on", "with", "can", "if", "from", "which", "you", "it",
            "this", "then", "at", "have", "all", "not", "one", "has", "or",
        ];
        words.iter().copied().collect()
    };
}

/// Terms never offered as TF-IDF candidates.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self { words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect() }
    }
}

impl StopWords {
    /// The default list plus one term per line of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut stop = Self::default();
        for_each_line(path, |_, line| {
            stop.words.insert(line.to_string());
            Ok(())
        })?;
        tracing::debug!(path = %path.display(), words = stop.words.len(), "loaded stop words");
        Ok(stop)
    }

    pub fn contains(&self, term: &str) -> bool { self.words.contains(term) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}
