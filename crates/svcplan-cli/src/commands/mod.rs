//! Command handlers, one module per subcommand.
//!
//! Helpers shared by the catalog-reading commands live here.

pub mod catalog;
pub mod completions;
pub mod config;
pub mod init;
pub mod interactive;
pub mod plan;
pub mod recommend;

use std::path::PathBuf;

use tracing::{debug, info};

use svcplan_adapters::{InMemoryCatalogStore, builtin_catalog::CatalogSource};
use svcplan_core::domain::{Catalog, RecommendationDirection, Selection};

use crate::{
    cli::{DirectionArg, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Open the catalog store.
///
/// `--catalog` (or `$SVCPLAN_CATALOG`) wins, then `catalog.path` from
/// config, then built-in resolution (`./catalog`, embedded default).
pub fn open_store(
    global: &GlobalArgs,
    config: &AppConfig,
) -> CliResult<(InMemoryCatalogStore, CatalogSource)> {
    let explicit: Option<PathBuf> = global.catalog.clone().or_else(|| config.catalog.path.clone());

    let (store, source) = match explicit {
        Some(path) => {
            debug!(path = %path.display(), "using explicit catalog path");
            (InMemoryCatalogStore::from_path(&path)?, CatalogSource::Path(path))
        }
        None => InMemoryCatalogStore::with_builtin()?,
    };

    info!(source = %source, services = store.len(), "catalog opened");
    Ok((store, source))
}

/// Flag value, else the configured default.
pub fn resolve_direction(
    flag: Option<DirectionArg>,
    config: &AppConfig,
) -> CliResult<RecommendationDirection> {
    match flag {
        Some(arg) => Ok(arg.into()),
        None => config.direction().map_err(|e| CliError::ConfigError {
            message: format!("recommendations.direction: {e}"),
            source: Some(Box::new(e)),
        }),
    }
}

/// Build a selection from command-line ids.
///
/// Unknown ids are not an error: each is reported as a warning and skipped.
/// Returns the selection and the ids that were skipped.
pub fn select(
    catalog: &Catalog,
    ids: &[String],
    output: &OutputManager,
) -> CliResult<(Selection, Vec<String>)> {
    let mut selection = Selection::new();
    let mut unknown = Vec::new();

    for id in ids {
        let id = id.trim();
        if selection.contains(id) {
            continue;
        }
        if !selection.add(catalog, id) {
            output.warning(&format!("Unknown service '{id}' ignored"))?;
            unknown.push(id.to_string());
        }
    }

    Ok((selection, unknown))
}
