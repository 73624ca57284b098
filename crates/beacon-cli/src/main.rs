//! `beacon`: ingest markdown, query, evaluate.

mod cli;
mod commands;
mod context;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};
use context::AppContext;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = context::load_config(&cli)?;
    beacon_observability::init_tracing(&config.observability);

    let ctx = AppContext::open(config)?;
    match cli.command {
        Command::Ingest(args) => commands::ingest::run(&ctx, args),
        Command::Query(args) => commands::query::run(&ctx, args),
        Command::Eval(args) => commands::eval::run(&ctx, args),
    }
}
