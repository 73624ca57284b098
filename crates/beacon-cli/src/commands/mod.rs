pub mod eval;
pub mod ingest;
pub mod query;

use anyhow::Result;
use serde::Serialize;

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Strategy name from the command line, else the configured default.
pub fn resolve_strategy(
    requested: Option<&str>,
    configured: &str,
) -> beacon_core::BeaconResult<beacon_core::models::Strategy> {
    requested.unwrap_or(configured).parse()
}
