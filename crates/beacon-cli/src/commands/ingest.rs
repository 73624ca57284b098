use anyhow::{Context, Result};
use beacon_core::models::DocumentMetadata;
use beacon_ingest::IngestPipeline;

use super::print_json;
use crate::cli::IngestArgs;
use crate::context::AppContext;

pub fn run(ctx: &AppContext, args: IngestArgs) -> Result<()> {
    let markdown = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let metadata = DocumentMetadata {
        campus: args.campus,
        building: args.building,
        department: args.department,
        lab: args.lab,
        professors: args.professors,
        tags: args.tags,
    };

    let pipeline = IngestPipeline::new(
        ctx.chunker()?,
        ctx.embedder.clone(),
        ctx.store.clone(),
        ctx.config.embedding.batch_size,
    )
    .with_force(args.force);
    let report = pipeline.ingest_markdown(&args.url, &args.title, &markdown, metadata)?;
    print_json(&report)
}
