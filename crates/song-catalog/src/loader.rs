use std::fmt;
use std::path::PathBuf;

use eyre::WrapErr;
use models::Catalog;
use tracing::info;

/// Where the catalog JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Reads the artist -> titles JSON object once.
pub async fn load_catalog(source: &CatalogSource) -> eyre::Result<Catalog> {
    let bytes = match source {
        CatalogSource::Path(path) => std::fs::read(path)
            .wrap_err_with(|| format!("read catalog: {}", path.display()))?,
        CatalogSource::Url(url) => fetch_bytes(url)
            .await
            .wrap_err_with(|| format!("fetch catalog: {url}"))?,
    };

    let catalog = parse_catalog(&bytes).wrap_err_with(|| format!("parse catalog: {source}"))?;
    info!(
        artists = catalog.len(),
        songs = catalog.song_count(),
        "catalog loaded from {source}"
    );
    Ok(catalog)
}

pub fn parse_catalog(bytes: &[u8]) -> eyre::Result<Catalog> {
    serde_json::from_slice(bytes).wrap_err("catalog is not a JSON object of string arrays")
}

async fn fetch_bytes(url: &str) -> eyre::Result<Vec<u8>> {
    let resp = reqwest::get(url).await.wrap_err("send request")?;
    let status = resp.status();
    if !status.is_success() {
        return Err(eyre::eyre!("HTTP {status}"));
    }
    let bytes = resp.bytes().await.wrap_err("read response body")?;
    Ok(bytes.to_vec())
}
