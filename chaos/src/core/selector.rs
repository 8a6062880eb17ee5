//! Weighted rule selection

use shared::RuleConfig;

use crate::actions::ChaosAction;
use crate::error::{ChaosError, ChaosResult};

/// A configured disruption candidate with its effective weight
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    action: ChaosAction,
    weight: f64,
}

impl Rule {
    /// Rule with the default weight of 1
    pub fn new(action: ChaosAction) -> Self {
        Self { action, weight: 1.0 }
    }

    /// Zero and NaN fall back to 1; negative weights are rejected at build time
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = if weight == 0.0 || weight.is_nan() { 1.0 } else { weight };
        self
    }

    /// Derive the action from configuration once
    pub fn from_config(config: &RuleConfig) -> ChaosResult<Self> {
        let rule = Rule::new(ChaosAction::from_rule(config)?).with_weight(config.effective_weight());
        rule.validate()?;
        Ok(rule)
    }

    pub fn action(&self) -> &ChaosAction {
        &self.action
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub(crate) fn validate(&self) -> ChaosResult<()> {
        if self.weight.is_finite() && self.weight > 0.0 {
            Ok(())
        } else {
            Err(ChaosError::InvalidWeight {
                event: self.action.kind().to_string(),
                weight: self.weight,
            })
        }
    }
}

/// Picks one rule per activation by cumulative weight
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSelector {
    rules: Vec<Rule>,
    total_weight: f64,
}

impl RuleSelector {
    /// Rules from [`Rule::from_config`] are already checked; rules built with
    /// `Rule::new(..).with_weight(..)` are only checked here.
    pub fn new(rules: Vec<Rule>) -> ChaosResult<Self> {
        for rule in &rules {
            rule.validate()?;
        }
        let total_weight = rules.iter().map(Rule::weight).sum();
        Ok(Self { rules, total_weight })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Map a draw in [0, 1) onto a rule.
    ///
    /// The scaled draw is floored and compared with `<=` against the running
    /// cumulative weight; the first rule that reaches it wins. Returns `None`
    /// only when there are no rules.
    pub fn select(&self, draw: f64) -> Option<(usize, &Rule)> {
        let rand = (draw * self.total_weight).floor();
        let mut acc = 0.0;

        for (index, rule) in self.rules.iter().enumerate() {
            acc += rule.weight;
            if rand <= acc {
                return Some((index, rule));
            }
        }

        None
    }
}
