//! Resolves a `url` query parameter to resume bytes: bundled files under the
//! public directory, or a remote http(s) download.

use std::path::{Component, Path};

use bytes::Bytes;
use reqwest::Url;
use tracing::warn;

use crate::errors::AppError;

const PUBLIC_PREFIX: &str = "public";

/// Resume bytes plus where they came from.
#[derive(Debug)]
pub struct FetchedResume {
    pub bytes: Bytes,
    /// Set for bundled public files, which are safe to cache.
    pub public_path: Option<String>,
}

pub async fn fetch_resume(
    http: &reqwest::Client,
    public_dir: &Path,
    url: &str,
    max_bytes: usize,
) -> Result<FetchedResume, AppError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::Validation(
            "You must provide a PDF file or URL".to_string(),
        ));
    }

    if let Some(relative) = public_relative_path(url) {
        let bytes = read_public_file(public_dir, relative).await?;
        return Ok(FetchedResume {
            bytes,
            public_path: Some(url.to_string()),
        });
    }

    let bytes = download(http, url, max_bytes).await?;
    Ok(FetchedResume {
        bytes,
        public_path: None,
    })
}

/// `public/x.pdf` -> `x.pdf`; anything not under the public prefix -> None.
fn public_relative_path(url: &str) -> Option<&str> {
    let rest = url.strip_prefix(PUBLIC_PREFIX)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix('/')
}

async fn read_public_file(public_dir: &Path, relative: &str) -> Result<Bytes, AppError> {
    let relative = Path::new(relative);
    let is_plain = relative.components().next().is_some()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if !is_plain {
        warn!("Rejected public path {}", relative.display());
        return Err(AppError::Validation("Invalid public resume path".to_string()));
    }

    match tokio::fs::read(public_dir.join(relative)).await {
        Ok(data) => Ok(Bytes::from(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(format!(
            "Resume {} not found",
            relative.display()
        ))),
        Err(e) => Err(AppError::Internal(e.into())),
    }
}

async fn download(http: &reqwest::Client, url: &str, max_bytes: usize) -> Result<Bytes, AppError> {
    let parsed =
        Url::parse(url).map_err(|_| AppError::Validation(format!("Invalid resume URL: {url}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Validation(format!(
            "Unsupported URL scheme: {}",
            parsed.scheme()
        )));
    }

    let response = http
        .get(parsed)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AppError::Fetch(format!("Failed to download resume: {e}")))?;

    let too_large = || AppError::Validation(format!("Resume exceeds {max_bytes} bytes"));
    if response.content_length().is_some_and(|len| len as usize > max_bytes) {
        return Err(too_large());
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Fetch(format!("Failed to download resume: {e}")))?;
    if bytes.len() > max_bytes {
        return Err(too_large());
    }
    Ok(bytes)
}
