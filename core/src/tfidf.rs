use crate::error::Result;
use crate::idf::{IdfLookup, IdfTable};
use crate::resource::Resource;
use crate::stopwords::StopWords;
use crate::tokenizer::Segmenter;
use crate::weighted::{sort_canonical, WeightedTerm};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// TF-IDF keyword extraction.
///
/// Term frequency comes from the segmenter's full-mode stream; terms missing
/// from the IDF table are weighted with its median.
pub struct TagExtractor {
    segmenter: Arc<Segmenter>,
    idf: Resource<IdfTable>,
    stop_words: Resource<StopWords>,
}

impl Default for TagExtractor {
    fn default() -> Self { Self::new() }
}

impl TagExtractor {
    pub fn new() -> Self { Self::with_segmenter(Arc::new(Segmenter::new())) }

    /// Shares an existing segmenter (and whatever it has loaded).
    pub fn with_segmenter(segmenter: Arc<Segmenter>) -> Self {
        Self {
            segmenter,
            idf: Resource::new(IdfTable::default()),
            stop_words: Resource::new(StopWords::default()),
        }
    }

    pub fn segmenter(&self) -> &Arc<Segmenter> { &self.segmenter }

    pub fn load_dictionary(&self, path: impl AsRef<Path>) -> Result<()> {
        self.segmenter.load_dictionary(path)
    }

    pub fn load_idf(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.idf.load_with(|| IdfTable::from_path(path))?;
        Ok(())
    }

    /// Installs an in-memory table, replacing any loaded one.
    pub fn set_idf(&self, table: IdfTable) { self.idf.replace(table); }

    pub fn load_stop_words(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.stop_words.load_with(|| StopWords::from_path(path))?;
        Ok(())
    }

    pub fn get_idf(&self, term: &str) -> IdfLookup { self.idf.snapshot().lookup(term) }

    /// Top `top_k` terms by `tf * idf`. `top_k == 0` returns nothing.
    pub fn extract_tags(&self, sentence: &str, top_k: usize) -> Vec<WeightedTerm> {
        if !self.idf.is_loaded() {
            tracing::debug!("extracting tags without an idf table");
        }
        let idf = self.idf.snapshot();
        let stop_words = self.stop_words.snapshot();

        let mut counts: HashMap<&str, f64> = HashMap::new();
        for token in self.segmenter.cut(sentence, true) {
            let token = token.trim();
            if token.chars().count() < 2 || stop_words.contains(token) {
                continue;
            }
            *counts.entry(token).or_insert(0.0) += 1.0;
        }
        let total: f64 = counts.values().sum();
        if total == 0.0 {
            return Vec::new();
        }

        let mut tags: Vec<WeightedTerm> = counts
            .into_iter()
            .map(|(term, count)| {
                let tf = count / total;
                let weight = idf.frequency(term).unwrap_or_else(|| idf.median());
                WeightedTerm::new(term, weight * tf)
            })
            .collect();
        sort_canonical(&mut tags);
        tags.truncate(top_k);
        tracing::debug!(candidates = total, returned = tags.len(), "extracted tags");
        tags
    }
}
