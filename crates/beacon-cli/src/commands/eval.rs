use anyhow::{Context, Result};
use beacon_retrieval::evaluation::load_cases;
use beacon_retrieval::Evaluator;

use super::{print_json, resolve_strategy};
use crate::cli::EvalArgs;
use crate::context::{runtime, AppContext};

pub fn run(ctx: &AppContext, args: EvalArgs) -> Result<()> {
    let cases = load_cases(&args.cases)
        .with_context(|| format!("loading cases {}", args.cases.display()))?;
    let strategy = resolve_strategy(
        args.strategy.as_deref(),
        &ctx.config.retrieval.default_strategy,
    )?;
    let evaluator = Evaluator::new(args.ks);
    let engine = ctx.retrieval_engine()?;
    let rt = runtime()?;
    let report = rt.block_on(evaluator.run(&engine, &cases, strategy))?;
    print_json(&report)
}
