use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use reqwest::Response;

use crate::github::{Client, Release};

use super::config::Config;

/// Downloads a named asset from a release of `repo` into `output`
/// (default: the asset name in the current directory).
#[tracing::instrument(skip(config, output))]
pub async fn download(
    config: &Config,
    repo: &str,
    asset_name: &str,
    tag: Option<&str>,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let client = config.client();
    let release = find_release(&client, repo, tag).await?;

    let asset = release.asset(asset_name).ok_or_else(|| {
        let available: Vec<&str> = release.assets.iter().map(|a| a.name.as_str()).collect();
        anyhow!(
            "Asset '{}' not found in release {} of {}. Available assets: {}",
            asset_name,
            release.tag_name,
            repo,
            if available.is_empty() {
                "(none)".to_string()
            } else {
                available.join(", ")
            }
        )
    })?;

    let target = output.unwrap_or_else(|| PathBuf::from(&asset.name));
    info!("Downloading {} from {}...", asset.name, release.tag_name);

    let response = client
        .download(asset)
        .await
        .with_context(|| format!("Failed to start download of {}", asset.name))?;
    let mut response = response
        .error_for_status()
        .with_context(|| format!("Download of {} was rejected", asset.name))?;

    let mut file =
        File::create(&target).with_context(|| format!("Failed to create file at {:?}", target))?;

    let downloaded_bytes = match write_body(&mut response, &mut file).await {
        Ok(bytes) => bytes,
        Err(e) => {
            drop(file);
            discard_partial(&target);
            return Err(e);
        }
    };

    debug!(
        "Downloaded {:.2} MB to {}",
        downloaded_bytes as f64 / (1024.0 * 1024.0),
        target.display()
    );
    info!("Download complete.");
    Ok(target)
}

async fn write_body(response: &mut Response, file: &mut File) -> Result<u64> {
    let mut downloaded_bytes: u64 = 0;

    while let Some(chunk) = response
        .chunk()
        .await
        .context("Failed to read chunk from download stream")?
    {
        file.write_all(&chunk)
            .context("Failed to write chunk to file")?;
        downloaded_bytes += chunk.len() as u64;
    }
    file.flush().context("Failed to flush downloaded file")?;

    Ok(downloaded_bytes)
}

async fn find_release(client: &Client, repo: &str, tag: Option<&str>) -> Result<Release> {
    match tag {
        None => client
            .latest_release(repo)
            .await
            .with_context(|| format!("Failed to fetch latest release for {}", repo)),
        Some(tag) => {
            let releases = client
                .releases(repo)
                .await
                .with_context(|| format!("Failed to fetch releases for {}", repo))?;
            releases
                .into_iter()
                .find(|r| r.tag_name == tag)
                .ok_or_else(|| anyhow!("Release {} not found for {}", tag, repo))
        }
    }
}

fn discard_partial(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            debug!("Failed to remove partial download {:?}: {}", path, e);
        }
    }
}
