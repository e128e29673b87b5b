//! Filesystem-based catalog loader.
//!
//! Parses catalog manifests into domain [`Service`] objects ready for the
//! in-memory store.
//!
//! # Directory layout expected
//!
//! ```text
//! catalog/
//! ├── strategy.toml          ← one manifest per file
//! ├── engineering.toml
//! └── partners/
//!     └── cloud.json         ← nested directories are walked too
//! ```
//!
//! # Manifest format
//!
//! ```toml
//! [catalog]
//! name = "Default consulting catalog"   # optional
//!
//! [[services]]
//! id                  = "analysis-workshop"
//! title               = "Analysis Workshop"
//! description         = "..."            # optional
//! category            = "Strategy"       # optional
//! price               = 1500
//! phase               = 1                # 1-based
//! process_category    = "ideate"         # optional: ideate | innovate | operate
//! technology_category = "Cloud"          # optional
//! dependencies        = ["kickoff"]      # optional
//! ```
//!
//! JSON manifests use the same shape.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use svcplan_core::{
    application::ApplicationError,
    domain::{DomainValidator, Service, ServiceRecord},
    error::SvcplanResult,
};

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a catalog manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogSection>,
    #[serde(default)]
    pub services: Vec<ServiceRecord>,
}

/// `[catalog]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    pub name: Option<String>,
}

/// On-disk manifest encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// `None` for anything that is not `.toml` or `.json`.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl CatalogManifest {
    /// Parse manifest text.
    pub fn parse(raw: &str, format: ManifestFormat) -> Result<Self, String> {
        match format {
            ManifestFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
            ManifestFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        }
    }

    /// Convert every record, skipping invalid ones and repeated ids.
    ///
    /// `origin` only labels the log lines.
    pub fn into_services(self, origin: &str) -> Vec<Service> {
        let mut seen = HashSet::new();
        let mut services = Vec::with_capacity(self.services.len());

        for record in self.services {
            let id = record.id.clone();
            match DomainValidator::validate_record(record) {
                Ok(service) => {
                    if seen.insert(service.id.clone()) {
                        services.push(service);
                    } else {
                        warn!(origin, id = %service.id, "duplicate service id, keeping first");
                    }
                }
                Err(e) => warn!(origin, id, error = %e, "skipping invalid service record"),
            }
        }

        services
    }
}

// ── Single-file loader ────────────────────────────────────────────────────────

/// Loads one `.toml` or `.json` manifest.
///
/// # Example
///
/// ```no_run
/// use svcplan_adapters::CatalogFileLoader;
///
/// let services = CatalogFileLoader::new("./catalog/default.toml").load()?;
/// println!("Loaded {} services", services.len());
/// # Ok::<(), svcplan_core::error::SvcplanError>(())
/// ```
pub struct CatalogFileLoader {
    path: PathBuf,
}

impl CatalogFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the manifest.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::CatalogLoad`] if the file is missing, unreadable,
    /// has an unsupported extension, or does not parse. Individual records
    /// that fail validation are skipped with a `WARN` log.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> SvcplanResult<Vec<Service>> {
        let format = ManifestFormat::from_path(&self.path)
            .ok_or_else(|| self.error("unsupported extension, expected .toml or .json"))?;

        let raw = fs::read_to_string(&self.path).map_err(|e| self.error(e))?;
        let manifest = CatalogManifest::parse(&raw, format).map_err(|e| self.error(e))?;

        let origin = self.path.display().to_string();
        let services = manifest.into_services(&origin);
        debug!(count = services.len(), "loaded catalog manifest");
        Ok(services)
    }

    fn error(&self, reason: impl ToString) -> ApplicationError {
        ApplicationError::CatalogLoad {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

// ── Directory loader ──────────────────────────────────────────────────────────

/// Loads every manifest found under a directory tree.
///
/// Files are visited in sorted path order so stored order is reproducible.
/// A file that fails to load emits a `WARN` log and is skipped; it does not
/// prevent the others from loading. When two files define the same id, the
/// first one visited wins.
pub struct CatalogDirLoader {
    catalog_dir: PathBuf,
}

impl CatalogDirLoader {
    pub fn new(catalog_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog_dir: catalog_dir.into(),
        }
    }

    /// Manifest paths under the directory, sorted.
    pub fn manifest_paths(&self) -> SvcplanResult<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(&self.catalog_dir)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ApplicationError::CatalogLoad {
                path: self.catalog_dir.clone(),
                reason: format!("directory walk error: {e}"),
            })?;

            if entry.file_type().is_file() && ManifestFormat::from_path(entry.path()).is_some() {
                paths.push(entry.into_path());
            }
        }

        Ok(paths)
    }

    /// # Errors
    ///
    /// [`ApplicationError::CatalogLoad`] if the directory does not exist or
    /// cannot be walked.
    #[instrument(skip(self), fields(dir = %self.catalog_dir.display()))]
    pub fn load_all(&self) -> SvcplanResult<Vec<Service>> {
        if !self.catalog_dir.is_dir() {
            return Err(ApplicationError::CatalogLoad {
                path: self.catalog_dir.clone(),
                reason: "catalog directory not found".into(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        let mut services = Vec::new();

        for path in self.manifest_paths()? {
            match CatalogFileLoader::new(&path).load() {
                Ok(loaded) => {
                    for service in loaded {
                        if seen.insert(service.id.clone()) {
                            services.push(service);
                        } else {
                            warn!(
                                file = %path.display(),
                                id   = %service.id,
                                "service id already defined by an earlier file, skipping"
                            );
                        }
                    }
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping catalog file");
                }
            }
        }

        debug!(count = services.len(), "finished loading catalog directory");
        Ok(services)
    }
}
