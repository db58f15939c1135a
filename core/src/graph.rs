//! Word co-occurrence graph and its TextRank scoring.
//!
//! Adjacency lives in a hash map; ranking walks an explicitly sorted key
//! list so scores are reproducible.

use crate::tokenizer::Tagged;
use crate::weighted::{sort_canonical, WeightedTerm};
use std::collections::{BTreeMap, HashMap, HashSet};

pub const WINDOW_SPAN: usize = 5;
pub const DAMPING: f64 = 0.85;
pub const ROUNDS: usize = 10;

/// One endpoint's view of an undirected connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

#[derive(Debug, Default)]
pub struct CooccurrenceGraph {
    adjacency: HashMap<String, Vec<Edge>>,
    keys: Vec<String>,
}

impl CooccurrenceGraph {
    pub fn new() -> Self { Self::default() }

    /// Counts ordered `(head, tail)` pairs of allowed tokens that sit within
    /// `span - 1` positions of each other, then adds one edge per pair.
    pub fn from_tagged(pairs: &[Tagged<'_>], allowed: &HashSet<&str>, span: usize) -> Self {
        let mut counts: BTreeMap<(&str, &str), f64> = BTreeMap::new();
        for (i, head) in pairs.iter().enumerate() {
            if !allowed.contains(head.pos.as_str()) {
                continue;
            }
            for tail in pairs.iter().take(i + span).skip(i + 1) {
                if !allowed.contains(tail.pos.as_str()) {
                    continue;
                }
                *counts.entry((head.word, tail.word)).or_insert(0.0) += 1.0;
            }
        }
        let mut graph = Self::new();
        for ((start, end), weight) in counts {
            graph.add_edge(start, end, weight);
        }
        graph
    }

    /// Stores the connection under both endpoints.
    pub fn add_edge(&mut self, start: &str, end: &str, weight: f64) {
        self.push(start, end, weight);
        self.push(end, start, weight);
    }

    fn push(&mut self, from: &str, to: &str, weight: f64) {
        let edge = Edge { from: from.to_string(), to: to.to_string(), weight };
        match self.adjacency.get_mut(from) {
            Some(edges) => edges.push(edge),
            None => {
                self.keys.push(from.to_string());
                self.adjacency.insert(from.to_string(), vec![edge]);
            }
        }
    }

    pub fn vertex_count(&self) -> usize { self.adjacency.len() }

    pub fn is_empty(&self) -> bool { self.adjacency.is_empty() }

    pub fn edges(&self, vertex: &str) -> &[Edge] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Scores every vertex and returns them in canonical order.
    ///
    /// Rounds update scores in place in sorted-key order, so later vertices
    /// see values already updated in the same round. Final scores are
    /// rescaled as `(s - min/10) / (max - min/10)`.
    pub fn rank(&mut self) -> Vec<WeightedTerm> {
        if self.adjacency.is_empty() {
            return Vec::new();
        }
        self.keys.sort_unstable();

        let index: HashMap<&str, usize> =
            self.keys.iter().enumerate().map(|(i, k)| (k.as_str(), i)).collect();
        let neighbours: Vec<Vec<(usize, f64)>> = self
            .keys
            .iter()
            .map(|key| {
                self.edges(key)
                    .iter()
                    .filter_map(|e| index.get(e.to.as_str()).map(|&u| (u, e.weight)))
                    .collect()
            })
            .collect();
        let out_sums: Vec<f64> =
            neighbours.iter().map(|edges| edges.iter().map(|&(_, w)| w).sum()).collect();

        let mut scores = vec![1.0 / self.keys.len() as f64; self.keys.len()];
        for _ in 0..ROUNDS {
            for v in 0..scores.len() {
                let s: f64 = neighbours[v]
                    .iter()
                    .filter(|&&(u, _)| out_sums[u] > 0.0)
                    .map(|&(u, w)| w / out_sums[u] * scores[u])
                    .sum();
                scores[v] = (1.0 - DAMPING) + DAMPING * s;
            }
        }

        let (min, max) = scores
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
        let floor = min / 10.0;
        let range = max - floor;

        let mut ranked: Vec<WeightedTerm> = self
            .keys
            .iter()
            .zip(&scores)
            .map(|(key, &s)| {
                let weight = if range > 0.0 { (s - floor) / range } else { 0.0 };
                WeightedTerm::new(key.as_str(), weight)
            })
            .collect();
        sort_canonical(&mut ranked);
        ranked
    }
}
