//! Configuration data model for the chaos layer
//!
//! These types describe what an operator writes in a configuration file. They
//! carry no behaviour beyond shape validation; the `chaos` crate turns them
//! into ready-to-run rules.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{SharedError, SharedResult};

/// Default chance that a request is intercepted
pub const DEFAULT_PROBABILITY: f64 = 0.1;

fn default_probability() -> f64 {
    DEFAULT_PROBABILITY
}

/// A single disruption candidate as written in configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RuleConfig {
    /// Name of the action in the registry (e.g. `httpStatus`, `delay`)
    pub event: String,

    /// Absent, a single value, or a positional list of values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Relative likelihood; absent or zero means 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl RuleConfig {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            params: None,
            weight: None,
        }
    }

    pub fn with_params(mut self, params: impl Into<Value>) -> Self {
        self.params = Some(params.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Weight with falsy values (absent, zero, NaN) coerced to 1
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(weight) if weight != 0.0 && !weight.is_nan() => weight,
            _ => 1.0,
        }
    }

    /// Parameters as a positional argument list
    pub fn positional_params(&self) -> Vec<&Value> {
        match &self.params {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(values)) => values.iter().collect(),
            Some(value) => vec![value],
        }
    }

    /// First positional parameter, treating `null` as absent
    pub fn first_param(&self) -> Option<&Value> {
        self.positional_params()
            .into_iter()
            .next()
            .filter(|value| !value.is_null())
    }
}

/// Process-wide chaos configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChaosConfig {
    /// Chance in [0, 1] that a request activates fault injection
    #[serde(default = "default_probability")]
    pub probability: f64,

    /// Ordered list of rules; order decides ties
    #[serde(default)]
    pub rules: Vec<RuleConfig>,

    /// Seed for a deterministic random source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self {
            probability: DEFAULT_PROBABILITY,
            rules: Vec::new(),
            seed: None,
        }
    }
}

impl ChaosConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> SharedResult<Self> {
        let config: ChaosConfig = serde_json::from_str(json).map_err(|e| SharedError::ConfigParse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> SharedResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| SharedError::ConfigRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&contents)
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_rule(mut self, rule: RuleConfig) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the shape of the configuration.
    ///
    /// Probabilities outside [0, 1] are accepted; only non-finite values are
    /// rejected since they cannot be compared meaningfully.
    pub fn validate(&self) -> SharedResult<()> {
        if !self.probability.is_finite() {
            return Err(SharedError::InvalidConfig {
                field: "probability".to_string(),
                value: self.probability.to_string(),
            });
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if rule.event.trim().is_empty() {
                return Err(SharedError::InvalidConfig {
                    field: format!("rules[{index}].event"),
                    value: format!("{:?}", rule.event),
                });
            }
        }

        Ok(())
    }
}
