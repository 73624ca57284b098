use anyhow::Result;
use beacon_core::models::{MetadataFilter, Query};

use super::{print_json, resolve_strategy};
use crate::cli::QueryArgs;
use crate::context::{runtime, AppContext};

/// Apply command-line overrides on top of the configured query defaults.
pub fn build_query(ctx: &AppContext, args: &QueryArgs) -> Result<Query> {
    let retrieval = &ctx.config.retrieval;
    let strategy = resolve_strategy(args.strategy.as_deref(), &retrieval.default_strategy)?;
    let filter = args
        .filters
        .iter()
        .map(|pair| MetadataFilter::parse_pair(pair))
        .collect::<Result<MetadataFilter, _>>()?;

    Ok(Query::with_config(args.text.as_str(), retrieval)
        .strategy(strategy)
        .top_k(args.top_k.unwrap_or(retrieval.top_k))
        .weights(
            args.alpha.unwrap_or(retrieval.alpha),
            args.beta.unwrap_or(retrieval.beta),
        )
        .filter(filter))
}

pub fn run(ctx: &AppContext, args: QueryArgs) -> Result<()> {
    let query = build_query(ctx, &args)?;
    let engine = ctx.retrieval_engine()?;
    let rt = runtime()?;
    let outcome = rt.block_on(engine.retrieve(&query))?;
    print_json(&outcome)
}
