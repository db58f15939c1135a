pub mod config;
pub mod dictfile;
pub mod error;
pub mod graph;
pub mod idf;
mod resource;
pub mod stopwords;
pub mod textrank;
pub mod tfidf;
pub mod tokenizer;
pub mod weighted;

pub use config::{AnalyseConfig, Extractors};
pub use error::{AnalyseError, Result};
pub use idf::{IdfLookup, IdfTable};
pub use stopwords::StopWords;
pub use textrank::{TextRanker, DEFAULT_ALLOW_POS};
pub use tfidf::TagExtractor;
pub use tokenizer::{Segmenter, Tagged};
pub use weighted::WeightedTerm;
