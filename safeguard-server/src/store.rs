//! Document-store boundary for points of interest and hazard reports.
//!
//! The upstream store is exposed to the engine as plain JSON document
//! lists. They are re-read on every planning request, matching the store's
//! semantics: operators update reports and the next request sees them, no
//! restart involved.

use std::path::{Path, PathBuf};

use safeguard_core::Error;
use safeguard_core::loading::{HazardRecord, PointRecord};

#[derive(Debug, Clone)]
pub struct DocumentStore {
    points_path: PathBuf,
    reports_path: PathBuf,
}

impl DocumentStore {
    pub fn new(points_path: PathBuf, reports_path: PathBuf) -> Self {
        Self {
            points_path,
            reports_path,
        }
    }

    /// Current list of raw point-of-interest documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the document list cannot be read or parsed.
    pub fn points(&self) -> Result<Vec<PointRecord>, Error> {
        read_documents(&self.points_path)
    }

    /// Current list of raw hazard report documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the document list cannot be read or parsed.
    pub fn reports(&self) -> Result<Vec<HazardRecord>, Error> {
        read_documents(&self.reports_path)
    }
}

fn read_documents<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, Error> {
    let file = std::fs::File::open(path)?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| Error::InvalidData(format!("malformed document list {}: {e}", path.display())))
}
