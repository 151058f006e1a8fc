//! Catalog Storage Module
//!
//! This module holds the process-wide catalog: an immutable map from
//! identifier to analytics record. It is built once at startup, either from a
//! built-in variant or from a JSON file, and is only ever read afterwards.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use analytics_protocol::AnalyticsRecord;
use thiserror::Error;
use tracing::{debug, info};

use crate::fixtures::CatalogVariant;

/// Catalog-related errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid catalog file {}: {source}", .path.display())]
    InvalidCatalog {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unknown catalog variant '{name}' (expected one of: full, reduced)")]
    UnknownVariant { name: String },
}

/// Where a catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// One of the tables compiled into the binary
    Builtin(CatalogVariant),
    /// A JSON object of identifier -> record
    File(PathBuf),
}

impl Default for CatalogSource {
    fn default() -> Self {
        CatalogSource::Builtin(CatalogVariant::default())
    }
}

impl CatalogSource {
    /// Build the catalog this source describes.
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        match self {
            CatalogSource::Builtin(variant) => Ok(Catalog::builtin(*variant)),
            CatalogSource::File(path) => Catalog::from_path(path),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Builtin(variant) => write!(f, "builtin:{}", variant),
            CatalogSource::File(path) => write!(f, "file:{}", path.display()),
        }
    }
}

/// Immutable identifier -> record table.
///
/// Entries cannot be added or removed once built. Share it behind an `Arc`
/// for concurrent readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: HashMap<String, AnalyticsRecord>,
}

impl Catalog {
    /// Build a catalog from arbitrary records. Later duplicates win.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, AnalyticsRecord)>,
    {
        Catalog {
            records: records.into_iter().collect(),
        }
    }

    /// Build one of the compiled-in catalogs.
    pub fn builtin(variant: CatalogVariant) -> Self {
        let catalog = Self::from_records(variant.records());
        debug!(%variant, entries = catalog.len(), "Built catalog");
        catalog
    }

    /// Load a catalog from a JSON file holding an object of records.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let records: HashMap<String, AnalyticsRecord> =
            serde_json::from_str(&contents).map_err(|e| CatalogError::InvalidCatalog {
                path: path.to_path_buf(),
                source: e,
            })?;

        info!(path = %path.display(), entries = records.len(), "Loaded catalog file");
        Ok(Catalog { records })
    }

    /// Return the entries whose identifiers appear in `ids`.
    ///
    /// Unknown identifiers are skipped. Duplicates and ordering in `ids` have
    /// no effect on the result.
    pub fn get_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> BTreeMap<String, AnalyticsRecord> {
        let wanted: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();

        let found: BTreeMap<String, AnalyticsRecord> = wanted
            .into_iter()
            .filter_map(|id| {
                self.records
                    .get_key_value(id)
                    .map(|(key, record)| (key.clone(), record.clone()))
            })
            .collect();

        debug!(requested = ids.len(), matched = found.len(), "Catalog lookup");
        found
    }

    pub fn get(&self, id: &str) -> Option<&AnalyticsRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// All identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.records.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// The whole catalog in key order.
    pub fn snapshot(&self) -> BTreeMap<String, AnalyticsRecord> {
        self.records
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
