//! Config parsing, resolution, and ignore-rule filtering.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration
//! provided as strings. Reading `.monodeprc.json` off disk is the CLI's job.

#![forbid(unsafe_code)]

mod filter;
mod model;
mod resolve;

pub use filter::filter;
pub use model::{ConfigFile, IgnoreTable};
pub use resolve::{Config, Overrides, default_concurrency, resolve_config};

/// Parse `.monodeprc.json` contents into the typed config model.
///
/// Unknown keys are rejected: the recognized option set is enumerated
/// explicitly rather than merged structurally.
pub fn parse_config_json(input: &str) -> anyhow::Result<ConfigFile> {
    let cfg: ConfigFile = serde_json::from_str(input)?;
    Ok(cfg)
}
