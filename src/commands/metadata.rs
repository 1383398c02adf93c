use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::io::Write;

use super::config::Config;

/// Prints `owner/repo` for a GitHub URL, or nothing when the URL is not a GitHub project.
pub fn project<W: Write>(config: &Config, source_url: &str, out: &mut W) -> Result<()> {
    let project = config.client().project_for_url(source_url);
    if project.is_empty() {
        debug!("{} is not a GitHub project URL", source_url);
        return Ok(());
    }
    writeln!(out, "{}", project)?;
    Ok(())
}

#[tracing::instrument(skip(config, out))]
pub async fn repo<W: Write>(config: &Config, repo: &str, out: &mut W) -> Result<()> {
    let info = config
        .client()
        .repo(repo)
        .await
        .with_context(|| format!("Failed to fetch repository info for {}", repo))?;
    print_json(&info, out)
}

#[tracing::instrument(skip(config, out))]
pub async fn latest<W: Write>(config: &Config, repo: &str, out: &mut W) -> Result<()> {
    let release = config
        .client()
        .latest_release(repo)
        .await
        .with_context(|| format!("Failed to fetch latest release for {}", repo))?;
    print_json(&release, out)
}

#[tracing::instrument(skip(config, out))]
pub async fn releases<W: Write>(config: &Config, repo: &str, out: &mut W) -> Result<()> {
    let releases = config
        .client()
        .releases(repo)
        .await
        .with_context(|| format!("Failed to fetch releases for {}", repo))?;
    print_json(&releases, out)
}

fn print_json<T: Serialize, W: Write>(value: &T, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}
