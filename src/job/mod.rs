//! Declarative job files.
//!
//! A job lists named inputs, filter chains and outputs. It is read from TOML
//! or JSON and turned into an [`ffcompose_args::Command`] by
//! [`build_command`].

mod convert;
mod types;

pub use convert::{build_command, parse_size, resolve_ref};
pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Job file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFormat {
    Toml,
    Json,
}

impl JobFormat {
    /// Pick a format from a file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => JobFormat::Json,
            _ => JobFormat::Toml,
        }
    }
}

/// Parse a job from text.
pub fn parse_job(content: &str, format: JobFormat) -> Result<Job> {
    let job: Job = match format {
        JobFormat::Toml => toml::from_str(content).context("Invalid TOML job")?,
        JobFormat::Json => serde_json::from_str(content).context("Invalid JSON job")?,
    };
    validate_job(&job)?;
    Ok(job)
}

/// Load a job file, choosing the format by extension.
pub fn load_job(path: &Path) -> Result<Job> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file: {:?}", path))?;

    parse_job(&content, JobFormat::from_path(path))
        .with_context(|| format!("Failed to load job file: {:?}", path))
}

fn validate_job(job: &Job) -> Result<()> {
    if job.outputs.is_empty() {
        anyhow::bail!("Job must declare at least one output");
    }

    let mut seen = std::collections::HashSet::new();
    for input in &job.inputs {
        if input.name.trim().is_empty() {
            anyhow::bail!("Input name cannot be empty");
        }
        if input.name.contains([':', '[', ']']) {
            anyhow::bail!("Input name '{}' cannot contain ':', '[' or ']'", input.name);
        }
        if !seen.insert(input.name.as_str()) {
            anyhow::bail!("Duplicate input name '{}'", input.name);
        }
    }

    for (i, chain) in job.chains.iter().enumerate() {
        if chain.filters.is_empty() {
            anyhow::bail!("Chain {} has no filters", i);
        }
    }

    Ok(())
}
