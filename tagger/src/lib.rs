use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use keytags::{AnalyseConfig, Extractors, WeightedTerm, DEFAULT_ALLOW_POS};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tagger")]
#[command(about = "Extract keywords with TF-IDF or TextRank", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub dicts: DictArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Dictionary locations. Flags override the JSON config file.
#[derive(Args, Debug, Default)]
pub struct DictArgs {
    /// JSON file with `dictionary`, `user_dictionary`, `idf`, `stop_words`
    #[arg(long, env = "KEYTAGS_CONFIG", global = true)]
    pub config: Option<PathBuf>,
    /// Segmenter dictionary (`word freq [pos]` per line)
    #[arg(long, env = "KEYTAGS_DICT", global = true)]
    pub dict: Option<PathBuf>,
    /// Extra words applied on top of the dictionary
    #[arg(long, env = "KEYTAGS_USER_DICT", global = true)]
    pub user_dict: Option<PathBuf>,
    /// IDF table (`term idf` per line)
    #[arg(long, env = "KEYTAGS_IDF", global = true)]
    pub idf: Option<PathBuf>,
    /// Stop words, one per line
    #[arg(long, env = "KEYTAGS_STOP_WORDS", global = true)]
    pub stop_words: Option<PathBuf>,
}

impl DictArgs {
    pub fn resolve(&self) -> Result<AnalyseConfig> {
        let base = match &self.config {
            Some(path) => AnalyseConfig::from_json_file(path)?,
            None => AnalyseConfig::default(),
        };
        Ok(base.merge(AnalyseConfig {
            dictionary: self.dict.clone(),
            user_dictionary: self.user_dict.clone(),
            idf: self.idf.clone(),
            stop_words: self.stop_words.clone(),
        }))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// TF-IDF keywords
    Tags {
        /// Number of keywords to print (0 prints none)
        #[arg(long, short = 'k', default_value_t = 20)]
        top_k: usize,
        /// Print a JSON array instead of tab-separated lines
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Text to analyse; read from stdin when absent
        text: Option<String>,
    },
    /// TextRank keywords
    Textrank {
        /// Number of keywords to print (0 prints all)
        #[arg(long, short = 'k', default_value_t = 20)]
        top_k: usize,
        /// Allowed part-of-speech tags
        #[arg(long, value_delimiter = ',')]
        pos: Vec<String>,
        /// Keep tokens of three bytes or fewer
        #[arg(long, default_value_t = false)]
        single_words: bool,
        /// Print a JSON array instead of tab-separated lines
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Text to analyse; read from stdin when absent
        text: Option<String>,
    },
    /// Look up a term in the IDF table
    Idf { term: String },
}

pub fn run(cli: &Cli) -> Result<String> {
    let config = cli.dicts.resolve()?;
    let extractors = config.build().context("loading dictionaries")?;
    execute(&extractors, &cli.command)
}

pub fn execute(ex: &Extractors, command: &Commands) -> Result<String> {
    match command {
        Commands::Tags { top_k, json, text } => {
            let text = input(text.as_deref())?;
            render(&ex.tags.extract_tags(&text, *top_k), *json)
        }
        Commands::Textrank { top_k, pos, single_words, json, text } => {
            let text = input(text.as_deref())?;
            let tags = if pos.is_empty() {
                ex.ranker.text_rank_with_pos(&text, *top_k, DEFAULT_ALLOW_POS, *single_words)
            } else {
                ex.ranker.text_rank_with_pos(&text, *top_k, pos.as_slice(), *single_words)
            };
            render(&tags, *json)
        }
        Commands::Idf { term } => {
            let lookup = ex.tags.get_idf(term);
            Ok(serde_json::to_string(&lookup)?)
        }
    }
}

fn input(text: Option<&str>) -> Result<String> {
    match text {
        Some(t) => Ok(t.to_string()),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn render(tags: &[WeightedTerm], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(tags)?);
    }
    Ok(tags
        .iter()
        .map(|t| format!("{}\t{:.6}", t.text(), t.weight()))
        .collect::<Vec<_>>()
        .join("\n"))
}
