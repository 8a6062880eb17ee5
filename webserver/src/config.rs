//! Chaos configuration resolution for the demo server
//!
//! A JSON file provides the base configuration; command line values
//! override individual fields.

use std::path::PathBuf;

use shared::ChaosConfig;

use crate::error::WebServerResult;

/// Operator-supplied sources for the chaos configuration
#[derive(Debug, Clone, Default)]
pub struct ChaosSettings {
    pub config_path: Option<PathBuf>,
    pub probability: Option<f64>,
    pub seed: Option<u64>,
}

impl ChaosSettings {
    /// Merge the file (if any) with the overrides and validate the result
    pub fn resolve(&self) -> WebServerResult<ChaosConfig> {
        let mut config = match &self.config_path {
            Some(path) => ChaosConfig::load(path)?,
            None => ChaosConfig::default(),
        };

        if let Some(probability) = self.probability {
            config.probability = probability;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }
}
