use crate::error::{AnalyseError, Result};
use crate::textrank::TextRanker;
use crate::tfidf::TagExtractor;
use crate::tokenizer::Segmenter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the dictionaries live. Every path is optional; missing ones leave
/// the corresponding resource at its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyseConfig {
    pub dictionary: Option<PathBuf>,
    pub user_dictionary: Option<PathBuf>,
    pub idf: Option<PathBuf>,
    pub stop_words: Option<PathBuf>,
}

/// Both extractors over one shared segmenter.
pub struct Extractors {
    pub tags: TagExtractor,
    pub ranker: TextRanker,
}

impl AnalyseConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| AnalyseError::io(path, e))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|source| AnalyseError::Config { path: path.to_path_buf(), source })
    }

    /// Values set in `other` win.
    pub fn merge(mut self, other: Self) -> Self {
        self.dictionary = other.dictionary.or(self.dictionary);
        self.user_dictionary = other.user_dictionary.or(self.user_dictionary);
        self.idf = other.idf.or(self.idf);
        self.stop_words = other.stop_words.or(self.stop_words);
        self
    }

    /// Loads every configured dictionary.
    pub fn build(&self) -> Result<Extractors> {
        let segmenter = Arc::new(Segmenter::new());
        if let Some(path) = &self.dictionary {
            segmenter.load_dictionary(path)?;
        }
        if let Some(path) = &self.user_dictionary {
            segmenter.load_user_dictionary(path)?;
        }
        let tags = TagExtractor::with_segmenter(Arc::clone(&segmenter));
        if let Some(path) = &self.idf {
            tags.load_idf(path)?;
        }
        if let Some(path) = &self.stop_words {
            tags.load_stop_words(path)?;
        }
        let ranker = TextRanker::with_segmenter(segmenter);
        tracing::info!(config = ?self, "dictionaries loaded");
        Ok(Extractors { tags, ranker })
    }
}
