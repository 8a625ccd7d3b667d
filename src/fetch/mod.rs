// src/fetch/mod.rs
use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::path::Path;
use tokio::fs;
use tracing::debug;
use url::Url;

fn http_url(source: &str) -> Option<Url> {
    Url::parse(source)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}

/// Resolve `source` against `base`, which is either a directory or an
/// http(s) URL. Absolute URLs and absolute paths are returned unchanged.
pub fn resolve_source(base: Option<&str>, source: &str) -> Result<String> {
    if http_url(source).is_some() || Path::new(source).is_absolute() {
        return Ok(source.to_string());
    }
    match base {
        None => Ok(source.to_string()),
        Some(base) => match http_url(base) {
            Some(base_url) => Ok(base_url
                .join(source)
                .with_context(|| format!("joining {} onto {}", source, base))?
                .to_string()),
            None => Ok(Path::new(base).join(source).to_string_lossy().into_owned()),
        },
    }
}

/// GET a CSV over HTTP. Any non-2xx status counts as a failed fetch.
async fn download_csv(client: &Client, url: Url) -> Result<String> {
    debug!(%url, "downloading CSV");
    let resp = client
        .get(url.as_str())
        .send()
        .await
        .with_context(|| format!("requesting {}", url))?;
    let status = resp.status();
    if !status.is_success() {
        bail!("{} answered {}", url, status);
    }
    let body = resp
        .text()
        .await
        .with_context(|| format!("decoding CSV body of {}", url))?;
    debug!(%url, bytes = body.len(), "downloaded CSV");
    Ok(body)
}

/// Read `source` as text: over HTTP for http(s) URLs, from disk otherwise.
pub async fn fetch_text(client: &Client, source: &str) -> Result<String> {
    match http_url(source) {
        Some(url) => download_csv(client, url).await,
        None => {
            debug!(path = %source, "reading CSV from disk");
            fs::read_to_string(source)
                .await
                .with_context(|| format!("reading {}", source))
        }
    }
}
