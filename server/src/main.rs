use anyhow::Result;
use clap::Parser;
use keytags::AnalyseConfig;
use server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// JSON dictionary config
    #[arg(long, env = "KEYTAGS_CONFIG")]
    config: Option<PathBuf>,
    /// Segmenter dictionary
    #[arg(long, env = "KEYTAGS_DICT")]
    dict: Option<PathBuf>,
    /// User dictionary applied after the main one
    #[arg(long, env = "KEYTAGS_USER_DICT")]
    user_dict: Option<PathBuf>,
    /// IDF table
    #[arg(long, env = "KEYTAGS_IDF")]
    idf: Option<PathBuf>,
    /// Stop-word list
    #[arg(long, env = "KEYTAGS_STOP_WORDS")]
    stop_words: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let base = match &args.config {
        Some(path) => AnalyseConfig::from_json_file(path)?,
        None => AnalyseConfig::default(),
    };
    let config = base.merge(AnalyseConfig {
        dictionary: args.dict,
        user_dictionary: args.user_dict,
        idf: args.idf,
        stop_words: args.stop_words,
    });
    let app = build_app(&config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
