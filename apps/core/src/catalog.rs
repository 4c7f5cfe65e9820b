use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::model::{DocumentIndex, IndexEntry};

const BUILTIN_CATALOG: &str = include_str!("../assets/learn_catalog.json5");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported catalog format '{0}'; use .json, .json5, or .toml")]
    UnsupportedFormat(String),
    #[error("invalid catalog {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Json5,
    Toml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "json5" => Ok(Self::Json5),
            "toml" => Ok(Self::Toml),
            _ => Err(CatalogError::UnsupportedFormat(extension)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    entry: Vec<IndexEntry>,
}

pub fn load_catalog(path: &Path) -> Result<DocumentIndex, CatalogError> {
    let format = CatalogFormat::from_path(path)?;
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_catalog(&raw, format).map_err(|message| CatalogError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    if entries.is_empty() {
        warn!(path = %path.display(), "catalog has no entries; palette will show no results");
    } else {
        info!(path = %path.display(), entries = entries.len(), "catalog loaded");
    }
    Ok(DocumentIndex::new(entries))
}

pub fn parse_catalog(raw: &str, format: CatalogFormat) -> Result<Vec<IndexEntry>, String> {
    match format {
        CatalogFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        CatalogFormat::Json5 => json5::from_str(raw).map_err(|e| e.to_string()),
        CatalogFormat::Toml => toml::from_str::<TomlCatalog>(raw)
            .map(|catalog| catalog.entry)
            .map_err(|e| e.to_string()),
    }
}

/// The learn portal's bundled corpus.
pub fn builtin_catalog() -> Result<DocumentIndex, CatalogError> {
    let entries =
        parse_catalog(BUILTIN_CATALOG, CatalogFormat::Json5).map_err(|message| {
            CatalogError::Parse {
                path: PathBuf::from("assets/learn_catalog.json5"),
                message,
            }
        })?;
    Ok(DocumentIndex::new(entries))
}
