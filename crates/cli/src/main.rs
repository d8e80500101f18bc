mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wortschatz_core::AppConfig;
use wortschatz_core::config::ENV_CONFIG;
use wortschatz_core::env_config::env_string;

#[derive(Parser)]
#[command(name = "wortschatz")]
#[command(about = "German vocabulary tables in dictionary order", long_about = None)]
struct Cli {
    /// Config file; defaults to `<config dir>/wortschatz/config.toml`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(short = 'H', long)]
        host: Option<String>,
    },
    /// List topics with their labels as JSON
    Topics,
    /// Print one topic in sorted order as JSON
    Show { topic: String },
    /// Add or rebuild the sort_value column of a topic
    Backfill { topic: String },
    /// Write CSV dumps of one topic, or of all topics
    Dump { topic: Option<String> },
    /// Print the sort key of a word or phrase
    SortKey { text: String },
}

fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let path = path.or_else(|| env_string(ENV_CONFIG).map(PathBuf::from));
    Ok(AppConfig::load(path.as_deref())?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;
    let config = || load_config(config_path.clone());

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(config()?, port, host).await,
        Commands::Topics => commands::tables::run_topics(&config()?),
        Commands::Show { topic } => commands::tables::run_show(&config()?, &topic),
        Commands::Backfill { topic } => commands::tables::run_backfill(&config()?, &topic),
        Commands::Dump { topic } => commands::tables::run_dump(&config()?, topic.as_deref()),
        Commands::SortKey { text } => commands::tables::run_sort_key(&text),
    }
}
