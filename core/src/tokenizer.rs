use crate::dictfile::{for_each_line, parse_entry, read_entries, Entry};
use crate::error::Result;
use crate::resource::Resource;
use lazy_static::lazy_static;
use regex::{Matches, Regex};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::Arc;

lazy_static! {
    // Ideograph runs, ASCII word runs, whitespace runs, then any other single char.
    static ref BLOCKS: Regex =
        Regex::new(r"(?s)[\x{4E00}-\x{9FD5}]+|[a-zA-Z0-9+#]+|\s+|.").expect("valid regex");
    static ref HAN: Regex = Regex::new(r"^[\x{4E00}-\x{9FD5}]+$").expect("valid regex");
}

#[derive(Debug, Clone)]
struct Word {
    frequency: f64,
    pos: Option<String>,
}

/// Prefix dictionary backing the segmenter.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashMap<String, Word>,
    prefixes: HashSet<String>,
    total: f64,
}

impl Dictionary {
    pub fn new() -> Self { Self::default() }

    pub fn from_path(path: &Path) -> Result<Self> {
        let mut dict = Self::new();
        for entry in read_entries(path)? {
            dict.insert(entry);
        }
        tracing::debug!(path = %path.display(), words = dict.len(), total = dict.total, "loaded dictionary");
        Ok(dict)
    }

    /// Applies entries one line at a time; lines before a bad one stay applied.
    pub fn extend_from_path(&mut self, path: &Path) -> Result<()> {
        for_each_line(path, |line_no, line| {
            self.insert(parse_entry(path, line_no, line)?);
            Ok(())
        })
    }

    pub fn insert(&mut self, entry: Entry) {
        let Entry { word, frequency, pos } = entry;
        let mut end = 0;
        for ch in word.chars() {
            end += ch.len_utf8();
            if !self.prefixes.contains(&word[..end]) {
                self.prefixes.insert(word[..end].to_string());
            }
        }
        if let Some(old) = self.words.insert(word, Word { frequency, pos }) {
            self.total -= old.frequency;
        }
        self.total += frequency;
    }

    pub fn frequency(&self, word: &str) -> Option<f64> { self.words.get(word).map(|w| w.frequency) }

    pub fn pos(&self, word: &str) -> Option<&str> { self.words.get(word).and_then(|w| w.pos.as_deref()) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    /// For each char of `block`, the char indices where a usable word starting
    /// there ends (inclusive). Positions with no word map to themselves.
    fn dag(&self, block: &str, bounds: &[usize]) -> Vec<Vec<usize>> {
        let n = bounds.len() - 1;
        (0..n)
            .map(|k| {
                let mut ends = Vec::new();
                let mut i = k;
                while i < n {
                    let frag = &block[bounds[k]..bounds[i + 1]];
                    if !self.prefixes.contains(frag) { break; }
                    if self.frequency(frag).is_some_and(|f| f > 0.0) {
                        ends.push(i);
                    }
                    i += 1;
                }
                if ends.is_empty() { ends.push(k); }
                ends
            })
            .collect()
    }

    /// Every word found in the block, plus single chars not covered by an
    /// earlier word.
    fn cut_all<'s>(&self, block: &'s str) -> Vec<&'s str> {
        let bounds = char_bounds(block);
        let dag = self.dag(block, &bounds);
        let mut out = Vec::new();
        let mut last_end: Option<usize> = None;
        for (k, ends) in dag.iter().enumerate() {
            if ends.len() == 1 && last_end.map_or(true, |j| k > j) {
                out.push(&block[bounds[k]..bounds[ends[0] + 1]]);
                last_end = Some(ends[0]);
            } else {
                for &j in ends.iter().filter(|&&j| j > k) {
                    out.push(&block[bounds[k]..bounds[j + 1]]);
                    last_end = Some(j);
                }
            }
        }
        out
    }

    /// Maximum-probability route through the DAG.
    fn cut_best<'s>(&self, block: &'s str) -> Vec<&'s str> {
        let bounds = char_bounds(block);
        let dag = self.dag(block, &bounds);
        let n = dag.len();
        let log_total = self.total.max(1.0).ln();
        let mut route = vec![(0.0f64, 0usize); n + 1];
        for idx in (0..n).rev() {
            let mut best = (f64::NEG_INFINITY, idx);
            for &x in &dag[idx] {
                let freq = self
                    .frequency(&block[bounds[idx]..bounds[x + 1]])
                    .filter(|&f| f > 0.0)
                    .unwrap_or(1.0);
                let score = freq.ln() - log_total + route[x + 1].0;
                if score > best.0 || (score == best.0 && x > best.1) {
                    best = (score, x);
                }
            }
            route[idx] = best;
        }
        let mut out = Vec::new();
        let mut x = 0;
        while x < n {
            let y = route[x].1 + 1;
            out.push(&block[bounds[x]..bounds[y]]);
            x = y;
        }
        out
    }
}

fn char_bounds(block: &str) -> Vec<usize> {
    block.char_indices().map(|(i, _)| i).chain(std::iter::once(block.len())).collect()
}

/// POS for tokens the dictionary does not know.
fn fallback_pos(word: &str) -> &'static str {
    if word.chars().any(|c| c.is_ascii_alphabetic()) {
        "eng"
    } else if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        "m"
    } else {
        "x"
    }
}

/// A token with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged<'s> {
    pub word: &'s str,
    pub pos: String,
}

/// Lazy token stream over a sentence. Holds its own dictionary snapshot.
pub struct Cut<'s> {
    dict: Arc<Dictionary>,
    full: bool,
    blocks: Matches<'static, 's>,
    pending: VecDeque<&'s str>,
}

impl<'s> Iterator for Cut<'s> {
    type Item = &'s str;

    fn next(&mut self) -> Option<&'s str> {
        loop {
            if let Some(word) = self.pending.pop_front() {
                return Some(word);
            }
            let block = self.blocks.next()?.as_str();
            if !HAN.is_match(block) {
                return Some(block);
            }
            let words = if self.full { self.dict.cut_all(block) } else { self.dict.cut_best(block) };
            self.pending.extend(words);
        }
    }
}

/// [`Cut`] with each token tagged from the same dictionary snapshot.
pub struct TaggedCut<'s> {
    inner: Cut<'s>,
}

impl<'s> Iterator for TaggedCut<'s> {
    type Item = Tagged<'s>;

    fn next(&mut self) -> Option<Tagged<'s>> {
        let word = self.inner.next()?;
        let pos = self.inner.dict.pos(word).unwrap_or_else(|| fallback_pos(word)).to_string();
        Some(Tagged { word, pos })
    }
}

/// Dictionary-driven segmenter.
///
/// Starts with an empty dictionary; `load_dictionary` fills it once.
pub struct Segmenter {
    dict: Resource<Dictionary>,
}

impl Default for Segmenter {
    fn default() -> Self { Self::new() }
}

impl Segmenter {
    pub fn new() -> Self { Self { dict: Resource::new(Dictionary::new()) } }

    /// Loads the main dictionary. No-op once a load has succeeded.
    pub fn load_dictionary(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.dict.load_with(|| Dictionary::from_path(path))?;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool { self.dict.is_loaded() }

    /// Adds the entries of a user dictionary on top of the current one.
    pub fn load_user_dictionary(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.dict.update(|dict| dict.extend_from_path(path))?;
        tracing::debug!(path = %path.display(), "loaded user dictionary");
        Ok(())
    }

    pub fn add_word(&self, word: &str, frequency: f64, pos: &str) {
        let pos = (!pos.is_empty()).then(|| pos.to_string());
        self.dict.update(|dict| dict.insert(Entry { word: word.to_string(), frequency, pos }));
    }

    /// Keeps the word's POS but drops its frequency to zero, so segmentation
    /// no longer produces it.
    pub fn delete_word(&self, word: &str) {
        self.dict.update(|dict| {
            let pos = dict.pos(word).map(str::to_string);
            dict.insert(Entry { word: word.to_string(), frequency: 0.0, pos });
        });
    }

    pub fn frequency(&self, word: &str) -> Option<f64> { self.dict.snapshot().frequency(word) }

    pub fn pos(&self, word: &str) -> Option<String> { self.dict.snapshot().pos(word).map(str::to_string) }

    /// Full mode yields every dictionary word found (overlapping); accurate
    /// mode yields one segmentation.
    pub fn cut<'s>(&self, sentence: &'s str, full_mode: bool) -> Cut<'s> {
        Cut {
            dict: self.dict.snapshot(),
            full: full_mode,
            blocks: BLOCKS.find_iter(sentence),
            pending: VecDeque::new(),
        }
    }

    pub fn cut_tagged<'s>(&self, sentence: &'s str, full_mode: bool) -> TaggedCut<'s> {
        TaggedCut { inner: self.cut(sentence, full_mode) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> Segmenter {
        let seg = Segmenter::new();
        seg.add_word("机器", 100.0, "n");
        seg.add_word("学习", 100.0, "v");
        seg.add_word("机器学习", 50.0, "n");
        seg
    }

    #[test]
    fn full_mode_emits_overlapping_words() {
        let seg = segmenter();
        let words: Vec<&str> = seg.cut("机器学习", true).collect();
        assert_eq!(words, vec!["机器", "机器学习", "学习"]);
    }

    #[test]
    fn accurate_mode_picks_one_route() {
        let seg = segmenter();
        let words: Vec<&str> = seg.cut("机器学习", false).collect();
        assert_eq!(words.concat(), "机器学习");
        assert!(words.len() <= 2);
    }

    #[test]
    fn ascii_runs_and_separators_pass_through() {
        let seg = Segmenter::new();
        let words: Vec<&str> = seg.cut("rust, go", true).collect();
        assert_eq!(words, vec!["rust", ",", " ", "go"]);
    }

    #[test]
    fn unknown_ideographs_come_out_one_by_one() {
        let seg = Segmenter::new();
        let words: Vec<&str> = seg.cut("你好", true).collect();
        assert_eq!(words, vec!["你", "好"]);
    }

    #[test]
    fn tags_from_dictionary_or_shape() {
        let seg = segmenter();
        let tagged: Vec<Tagged> = seg.cut_tagged("学习 rust 42", true).collect();
        let pos: Vec<&str> = tagged.iter().map(|t| t.pos.as_str()).collect();
        assert_eq!(pos, vec!["v", "x", "eng", "x", "m"]);
    }

    #[test]
    fn deleted_words_keep_pos_but_stop_matching() {
        let seg = segmenter();
        seg.delete_word("机器学习");
        assert_eq!(seg.frequency("机器学习"), Some(0.0));
        assert_eq!(seg.pos("机器学习").as_deref(), Some("n"));
        let words: Vec<&str> = seg.cut("机器学习", true).collect();
        assert_eq!(words, vec!["机器", "学习"]);
    }

    #[test]
    fn reinserting_adjusts_total() {
        let mut dict = Dictionary::new();
        dict.insert(Entry { word: "ab".into(), frequency: 3.0, pos: None });
        dict.insert(Entry { word: "ab".into(), frequency: 1.0, pos: None });
        assert_eq!(dict.total, 1.0);
        assert_eq!(dict.len(), 1);
    }
}
