use rootsetup_core::{CatalogError, CatalogLoader, ExpansionCatalog};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileCatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Reads the expansion catalog from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    path: PathBuf,
}

impl FileCatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogLoader for FileCatalogLoader {
    type Error = FileCatalogError;

    fn load_catalog(&self) -> Result<ExpansionCatalog, Self::Error> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| FileCatalogError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(ExpansionCatalog::from_json(&json)?)
    }
}
