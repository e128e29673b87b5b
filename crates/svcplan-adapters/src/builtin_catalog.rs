//! Built-in catalog discovery.
//!
//! [`load`] is the single entry-point for obtaining the catalog svcplan works
//! with. It abstracts over the discovery strategy so callers do not need to
//! know where catalog files live.
//!
//! # Catalog resolution order
//!
//! 1. **`$SVCPLAN_CATALOG`**: a manifest file or a directory of manifests.
//! 2. **`./catalog`**: relative to the current working directory.
//! 3. **Embedded default**: the catalog compiled into the binary.
//!
//! A candidate that does not exist, or that yields no valid services, is
//! skipped with a log line. The embedded default always exists, so [`load`]
//! only fails if it was built from a broken manifest.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use svcplan_core::{application::ApplicationError, domain::Service, error::SvcplanResult};

use crate::catalog_loader::{CatalogDirLoader, CatalogFileLoader, CatalogManifest, ManifestFormat};

/// Environment variable naming a catalog file or directory.
pub const CATALOG_ENV: &str = "SVCPLAN_CATALOG";

/// Manifest shipped with svcplan.
pub const DEFAULT_CATALOG: &str = include_str!("../catalog/default.toml");

/// Where a loaded catalog came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Embedded,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Embedded => f.write_str("<embedded default>"),
        }
    }
}

/// Load the catalog using the resolution order described in the module docs.
#[instrument]
pub fn load() -> SvcplanResult<(Vec<Service>, CatalogSource)> {
    for candidate in candidate_paths() {
        debug!(path = %candidate.display(), "checking candidate catalog path");

        if !candidate.exists() {
            debug!(path = %candidate.display(), "path does not exist, skipping");
            continue;
        }

        match load_path(&candidate) {
            Ok(services) if !services.is_empty() => {
                info!(
                    path  = %candidate.display(),
                    count = services.len(),
                    "catalog loaded"
                );
                return Ok((services, CatalogSource::Path(candidate)));
            }
            Ok(_) => {
                debug!(path = %candidate.display(), "no services found, trying next");
            }
            Err(e) => {
                warn!(path = %candidate.display(), error = %e, "catalog candidate unusable");
            }
        }
    }

    let services = embedded()?;
    debug!(count = services.len(), "using embedded default catalog");
    Ok((services, CatalogSource::Embedded))
}

/// Load an explicit catalog path: a manifest file or a directory.
pub fn load_path(path: &Path) -> SvcplanResult<Vec<Service>> {
    if path.is_dir() {
        CatalogDirLoader::new(path).load_all()
    } else {
        CatalogFileLoader::new(path).load()
    }
}

/// The embedded default catalog.
pub fn embedded() -> SvcplanResult<Vec<Service>> {
    let manifest = CatalogManifest::parse(DEFAULT_CATALOG, ManifestFormat::Toml).map_err(
        |reason| ApplicationError::CatalogLoad {
            path: PathBuf::from("<embedded>"),
            reason,
        },
    )?;
    Ok(manifest.into_services("embedded"))
}

// ── Resolution helpers ────────────────────────────────────────────────────────

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);

    if let Ok(env_path) = std::env::var(CATALOG_ENV) {
        if !env_path.trim().is_empty() {
            let p = PathBuf::from(env_path);
            debug!(path = %p.display(), "candidate from ${}", CATALOG_ENV);
            paths.push(p);
        }
    }

    paths.push(PathBuf::from("catalog"));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use svcplan_core::domain::{Catalog, Phase};
    use tempfile::TempDir;

    #[test]
    fn embedded_catalog_is_valid() {
        let services = embedded().unwrap();
        assert!(services.len() >= 10);

        let catalog = Catalog::new(services).unwrap();
        assert!(
            catalog.dangling_dependencies().is_empty(),
            "default catalog must be closed under dependencies"
        );
    }

    #[test]
    fn embedded_catalog_spans_all_phases() {
        let services = embedded().unwrap();
        for phase in [
            Phase::ANALYSIS,
            Phase::DESIGN,
            Phase::IMPLEMENTATION,
            Phase::TESTING,
            Phase::GO_LIVE,
        ] {
            assert!(services.iter().any(|s| s.phase == phase), "missing {phase}");
        }
    }

    #[test]
    fn load_path_dispatches_on_kind() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("one.toml");
        fs::write(
            &file,
            "[[services]]\nid = \"x\"\ntitle = \"X\"\nprice = 1\nphase = 1\n",
        )
        .unwrap();

        assert_eq!(load_path(&file).unwrap().len(), 1);
        assert_eq!(load_path(temp.path()).unwrap().len(), 1);
    }

    #[test]
    fn source_display() {
        assert_eq!(CatalogSource::Embedded.to_string(), "<embedded default>");
        assert_eq!(
            CatalogSource::Path(PathBuf::from("catalog")).to_string(),
            "catalog"
        );
    }
}
