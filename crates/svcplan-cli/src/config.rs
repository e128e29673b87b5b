//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SVCPLAN__<SECTION>__<KEY>`,
//!    e.g. `SVCPLAN__OUTPUT__FORMAT=json`
//! 3. Config file (`--config` or the platform config directory)
//! 4. Built-in defaults (always present)

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use svcplan_core::domain::{DomainError, RecommendationDirection};

use crate::cli::OutputFormat;

const ENV_PREFIX: &str = "SVCPLAN";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog location.
    pub catalog: CatalogConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Recommendation settings.
    pub recommendations: RecommendationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Manifest file or directory. Unset means built-in resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// `prerequisites` or `dependents`.
    pub direction: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            recommendations: RecommendationConfig {
                direction: RecommendationDirection::default().to_string(),
            },
        }
    }
}

/// Keys accepted by `config get` / `config set`.
pub const KEYS: [&str; 4] = [
    "catalog.path",
    "output.no_color",
    "output.format",
    "recommendations.direction",
];

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// A missing config file is not an error.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("failed to build default configuration")?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        let loaded: Self = config
            .try_deserialize()
            .context("configuration has an unexpected shape")?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values that would only fail later, at use.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.direction()?;
        self.output_format()?;
        Ok(())
    }

    /// Configured default recommendation direction.
    pub fn direction(&self) -> Result<RecommendationDirection, DomainError> {
        self.recommendations.direction.parse()
    }

    /// Configured output format.
    pub fn output_format(&self) -> anyhow::Result<OutputFormat> {
        <OutputFormat as clap::ValueEnum>::from_str(&self.output.format, true)
            .map_err(|e| anyhow::anyhow!("invalid output.format '{}': {e}", self.output.format))
    }

    /// Read a single key as a display string.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalog.path" => Some(
                self.catalog
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(self.output.format.clone()),
            "recommendations.direction" => Some(self.recommendations.direction.clone()),
            _ => None,
        }
    }

    /// Set a single key from its string form, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "catalog.path" => {
                self.catalog.path = (!value.trim().is_empty()).then(|| PathBuf::from(value));
            }
            "output.no_color" => {
                self.output.no_color = value
                    .trim()
                    .parse()
                    .with_context(|| format!("'{value}' is not true or false"))?;
            }
            "output.format" => {
                let mut candidate = self.clone();
                candidate.output.format = value.trim().to_ascii_lowercase();
                candidate.output_format()?;
                *self = candidate;
            }
            "recommendations.direction" => {
                let direction: RecommendationDirection = value.parse()?;
                self.recommendations.direction = direction.to_string();
            }
            _ => anyhow::bail!("unknown config key '{key}'"),
        }
        Ok(())
    }

    /// Write as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml = toml::to_string_pretty(self).context("failed to serialise config")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.svcplan.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "svcplan", "svcplan")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".svcplan.toml"))
    }
}
