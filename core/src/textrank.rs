use crate::error::Result;
use crate::graph::{CooccurrenceGraph, WINDOW_SPAN};
use crate::tokenizer::{Segmenter, Tagged};
use crate::weighted::WeightedTerm;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Place names, nouns, verbal nouns and verbs.
pub const DEFAULT_ALLOW_POS: &[&str] = &["ns", "n", "vn", "v"];

/// Keyword extraction by TextRank over a co-occurrence graph.
pub struct TextRanker {
    segmenter: Arc<Segmenter>,
}

impl Default for TextRanker {
    fn default() -> Self { Self::new() }
}

impl TextRanker {
    pub fn new() -> Self { Self::with_segmenter(Arc::new(Segmenter::new())) }

    pub fn with_segmenter(segmenter: Arc<Segmenter>) -> Self { Self { segmenter } }

    pub fn segmenter(&self) -> &Arc<Segmenter> { &self.segmenter }

    pub fn load_dictionary(&self, path: impl AsRef<Path>) -> Result<()> {
        self.segmenter.load_dictionary(path)
    }

    pub fn load_user_dictionary(&self, path: impl AsRef<Path>) -> Result<()> {
        self.segmenter.load_user_dictionary(path)
    }

    pub fn frequency(&self, word: &str) -> Option<f64> { self.segmenter.frequency(word) }

    pub fn pos(&self, word: &str) -> Option<String> { self.segmenter.pos(word) }

    pub fn add_word(&self, word: &str, frequency: f64, pos: &str) {
        self.segmenter.add_word(word, frequency, pos);
    }

    pub fn delete_word(&self, word: &str) { self.segmenter.delete_word(word); }

    /// Default POS set, tokens of three bytes or fewer dropped.
    pub fn text_rank(&self, sentence: &str, top_k: usize) -> Vec<WeightedTerm> {
        self.text_rank_with_pos(sentence, top_k, DEFAULT_ALLOW_POS, false)
    }

    /// `top_k == 0` returns every ranked term.
    ///
    /// With `allow_single_word` false, tokens whose UTF-8 length is at most
    /// three bytes are removed before windowing. That drops one CJK char or
    /// up to three ASCII letters.
    pub fn text_rank_with_pos<P: AsRef<str>>(
        &self,
        sentence: &str,
        top_k: usize,
        allowed_pos: &[P],
        allow_single_word: bool,
    ) -> Vec<WeightedTerm> {
        let allowed: HashSet<&str> = allowed_pos.iter().map(|p| p.as_ref()).collect();
        let pairs: Vec<Tagged> = self
            .segmenter
            .cut_tagged(sentence, true)
            .filter(|t| allow_single_word || t.word.len() > 3)
            .collect();
        let mut graph = CooccurrenceGraph::from_tagged(&pairs, &allowed, WINDOW_SPAN);
        tracing::debug!(tokens = pairs.len(), vertices = graph.vertex_count(), "built co-occurrence graph");
        let mut tags = graph.rank();
        if top_k > 0 {
            tags.truncate(top_k);
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranker() -> TextRanker {
        let r = TextRanker::new();
        for (word, pos) in [("apple", "n"), ("banana", "n"), ("cherry", "n"), ("eat", "v"), ("quickly", "d")] {
            r.add_word(word, 10.0, pos);
        }
        r
    }

    #[test]
    fn two_nouns_make_a_pair() {
        let tags = ranker().text_rank("apple banana", 10);
        let words: Vec<&str> = tags.iter().map(WeightedTerm::text).collect();
        assert_eq!(words, vec!["banana", "apple"]);
        assert_eq!(tags[0].weight(), 1.0);
    }

    #[test]
    fn short_words_need_allow_single_word() {
        let r = ranker();
        assert!(r.text_rank("eat apple", 0).is_empty());
        let tags = r.text_rank_with_pos("eat apple", 0, DEFAULT_ALLOW_POS, true);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn disallowed_pos_is_skipped() {
        let tags = ranker().text_rank_with_pos("apple quickly banana", 0, &["n"], false);
        let mut words: Vec<&str> = tags.iter().map(WeightedTerm::text).collect();
        words.sort_unstable();
        assert_eq!(words, vec!["apple", "banana"]);
    }

    #[test]
    fn top_k_zero_returns_all() {
        let r = ranker();
        assert_eq!(r.text_rank("apple banana cherry", 0).len(), 3);
        assert_eq!(r.text_rank("apple banana cherry", 2).len(), 2);
    }

    #[test]
    fn nothing_qualifies_on_empty_input() {
        assert!(ranker().text_rank("", 5).is_empty());
    }

    #[test]
    fn word_edits_pass_through() {
        let r = ranker();
        assert_eq!(r.frequency("apple"), Some(10.0));
        r.delete_word("apple");
        assert_eq!(r.frequency("apple"), Some(0.0));
        assert_eq!(r.pos("apple").as_deref(), Some("n"));
    }
}
