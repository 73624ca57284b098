//! Argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "beacon",
    version,
    about = "Hybrid dense + lexical retrieval over a markdown corpus"
)]
pub struct Cli {
    /// TOML configuration file. Missing sections take their defaults.
    #[arg(long, global = true, env = "BEACON_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database path, overriding `storage.db_path`.
    #[arg(long, global = true, env = "BEACON_DB")]
    pub db: Option<PathBuf>,

    /// Embedding provider (`api` or `tfidf`), overriding `embedding.provider`.
    #[arg(long, global = true, env = "BEACON_EMBEDDING_PROVIDER")]
    pub provider: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chunk, embed and store one markdown document.
    Ingest(IngestArgs),
    /// Retrieve passages for a query and print them as JSON.
    Query(QueryArgs),
    /// Run gold-labelled cases and print a metrics report as JSON.
    Eval(EvalArgs),
}

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Markdown file to ingest.
    pub file: PathBuf,

    /// Canonical URL identifying the document.
    #[arg(long)]
    pub url: String,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub campus: Option<String>,

    #[arg(long)]
    pub building: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub lab: Option<String>,

    /// Repeatable.
    #[arg(long = "professor")]
    pub professors: Vec<String>,

    /// Repeatable.
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Re-ingest even if the content hash is unchanged.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    pub text: String,

    /// dense, lexical or hybrid. Defaults to `retrieval.default_strategy`.
    #[arg(long)]
    pub strategy: Option<String>,

    #[arg(long)]
    pub top_k: Option<usize>,

    /// Dense weight for hybrid fusion.
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Lexical weight for hybrid fusion.
    #[arg(long)]
    pub beta: Option<f64>,

    /// `field=value` constraint; repeatable. Fields: campus, department, lab,
    /// professor, tag.
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// JSON array of cases: `{id, query, category?, relevant, filter?}`.
    pub cases: PathBuf,

    #[arg(long)]
    pub strategy: Option<String>,

    /// Metric cutoff; repeatable.
    #[arg(long = "k", default_values_t = [5usize, 10])]
    pub ks: Vec<usize>,
}
