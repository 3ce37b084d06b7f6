use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const SHORT_TERM_WINDOW: usize = 20;
pub const BALANCE_ATTEMPTS: usize = 200;

/// Poids globaux appliqués aux trois signaux normalisés.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub short_term: f64,
    pub long_term: f64,
    pub hotness: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            short_term: 0.35,
            long_term: 0.25,
            hotness: 0.20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub short_term_window: usize,
    /// `None` : tout l'historique.
    pub long_term_window: Option<usize>,
    pub weights: SignalWeights,
    pub balance_attempts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            short_term_window: SHORT_TERM_WINDOW,
            long_term_window: None,
            weights: SignalWeights::default(),
            balance_attempts: BALANCE_ATTEMPTS,
        }
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let config: EngineConfig = serde_json::from_str(&json)
        .with_context(|| format!("JSON invalide dans {:?}", path))?;
    log::debug!("configuration chargée depuis {:?} : {:?}", path, config);
    Ok(config)
}
