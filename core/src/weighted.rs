use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A term with its score. Both extractors return these in canonical order:
/// weight descending, then text ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedTerm {
    text: String,
    weight: f64,
}

impl WeightedTerm {
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self { text: text.into(), weight }
    }

    pub fn text(&self) -> &str { &self.text }

    pub fn weight(&self) -> f64 { self.weight }
}

impl PartialEq for WeightedTerm {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for WeightedTerm {}

impl PartialOrd for WeightedTerm {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for WeightedTerm {
    /// `Less` means "ranks first".
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| self.text.cmp(&other.text))
    }
}

/// Sort into canonical order.
pub fn sort_canonical(terms: &mut [WeightedTerm]) {
    terms.sort_unstable();
}
