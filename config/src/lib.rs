//! Configuration for the lemma throttle.
//!
//! Raw TOML structs stay `Option`-heavy and permissive about absence; they
//! are resolved into an immutable [`ThrottlePolicy`] at this boundary, where
//! unknown kind names and zero thresholds are rejected.
//!
//! ```toml
//! [throttle]
//! permanent_bans = true
//!
//! [throttle.thresholds]
//! grobner = 8
//! factor_zero = 1
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use throttle_core::{PromotionMode, ThresholdError, ThresholdTable, ThrottlePolicy};
use throttle_types::ThrottleKind;

const fn default_true() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unknown lemma kind `{0}` in [throttle.thresholds]")]
    UnknownKind(String),
    #[error(transparent)]
    Threshold(#[from] ThresholdError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config at {}: {source}", path.display())]
    Invalid { path: PathBuf, source: ResolveError },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleConfig {
    pub throttle: Option<ThrottleSection>,
}

/// The `[throttle]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleSection {
    /// Allow repeats to escalate to permanent bans. Default: true.
    #[serde(default = "default_true")]
    pub permanent_bans: bool,
    /// Per-kind overrides keyed by snake_case kind name.
    #[serde(default)]
    pub thresholds: BTreeMap<String, u32>,
}

impl Default for ThrottleSection {
    fn default() -> Self {
        Self {
            permanent_bans: true,
            thresholds: BTreeMap::new(),
        }
    }
}

impl ThrottleConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse `path`. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match Self::from_toml_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// Validate overrides and build the policy.
    pub fn resolve(&self) -> Result<ThrottlePolicy, ResolveError> {
        let Some(section) = &self.throttle else {
            return Ok(ThrottlePolicy::default());
        };

        let mut thresholds = ThresholdTable::reference();
        for (name, &threshold) in &section.thresholds {
            let kind = ThrottleKind::parse(name)
                .ok_or_else(|| ResolveError::UnknownKind(name.clone()))?;
            thresholds = thresholds.with(kind, threshold)?;
        }

        let promotion = if section.permanent_bans {
            PromotionMode::Enabled
        } else {
            PromotionMode::Disabled
        };
        Ok(ThrottlePolicy::new(thresholds, promotion))
    }
}

/// Load the policy from `path`, falling back to defaults when the file is absent.
pub fn load_policy(path: &Path) -> Result<ThrottlePolicy, ConfigError> {
    let Some(config) = ThrottleConfig::load_from(path)? else {
        tracing::debug!(path = %path.display(), "No throttle config; using defaults");
        return Ok(ThrottlePolicy::default());
    };
    config.resolve().map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// `<config dir>/lemma-throttle/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lemma-throttle").join("config.toml"))
}
