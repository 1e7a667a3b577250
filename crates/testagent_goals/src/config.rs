//! Solver configuration (RON, fallback на defaults)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid solver config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Параметры solver'а
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Сколько тиков leaf goal может оставаться активным до провала (`None` = без лимита)
    pub max_ticks_per_goal: Option<u32>,
    /// Логировать каждый выбранный action (debug level)
    pub log_tactic_selection: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_ticks_per_goal: Some(500),
            log_tactic_selection: true,
        }
    }
}

impl SolverConfig {
    pub fn unbounded() -> Self {
        Self {
            max_ticks_per_goal: None,
            ..Default::default()
        }
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                crate::log_warning(&format!("SolverConfig: {}, using defaults", err));
                Self::default()
            }
        }
    }
}
