//! Chaos engine: gate, selector and collaborators behind one `process` call

use std::fmt;
use std::sync::Arc;

use axum::http::Request;
use axum::response::Response;
use tower::{BoxError, Service};
use shared::{ChaosConfig, chaos_debug, chaos_warn};

use crate::COMPONENT;
use crate::actions::{Effects, proceed};
use crate::core::gate::Gate;
use crate::core::selector::{Rule, RuleSelector};
use crate::error::ChaosResult;
use crate::services::{LoggingFailureReporter, RealProcessControl, SeededRandomSource, ThreadRandomSource};
use crate::traits::{FailureReporter, ProcessControl, RandomSource};

/// Outcome of the per-request decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision<'a> {
    /// Let the request through untouched
    Pass,
    /// Run this rule's action
    Inject { index: usize, rule: &'a Rule },
}

/// Probabilistic fault injector for one pipeline stage.
///
/// Rules are fixed at construction and shared read-only; the random source is
/// the only collaborator with mutable state.
pub struct ChaosEngine {
    gate: Gate,
    selector: RuleSelector,
    random_source: Arc<dyn RandomSource>,
    process_control: Arc<dyn ProcessControl>,
    failure_reporter: Arc<dyn FailureReporter>,
}

impl ChaosEngine {
    pub fn builder() -> ChaosEngineBuilder {
        ChaosEngineBuilder::new()
    }

    /// Build an engine with default collaborators from configuration
    pub fn from_config(config: &ChaosConfig) -> ChaosResult<Self> {
        ChaosEngineBuilder::from_config(config)?.build()
    }

    pub fn probability(&self) -> f64 {
        self.gate.probability()
    }

    pub fn rules(&self) -> &[Rule] {
        self.selector.rules()
    }

    /// Draw from the random source and decide what happens to one request.
    ///
    /// The gate always consumes one draw; the selector consumes a second one
    /// only when the gate activates.
    pub fn decide(&self) -> Decision<'_> {
        if !self.gate.admits(self.random_source.next_f64()) {
            return Decision::Pass;
        }

        match self.selector.select(self.random_source.next_f64()) {
            Some((index, rule)) => Decision::Inject { index, rule },
            None => Decision::Pass,
        }
    }

    /// Run one request through the stage.
    ///
    /// Either invokes `next` (possibly late, or after a side effect) or ends
    /// the request itself. A synchronous injected failure comes back as `Err`.
    pub async fn process<S, B>(&self, request: Request<B>, next: S) -> Result<Response, BoxError>
    where
        S: Service<Request<B>, Response = Response>,
        S::Error: Into<BoxError>,
    {
        match self.decide() {
            Decision::Pass => {
                chaos_debug!(COMPONENT, uri = %request.uri(), "Request passed through");
                proceed(request, next).await
            }
            Decision::Inject { index, rule } => {
                chaos_warn!(
                    COMPONENT,
                    rule = index,
                    action = %rule.action().kind(),
                    uri = %request.uri(),
                    "💥 Injecting fault"
                );
                let effects = Effects {
                    process_control: self.process_control.as_ref(),
                    failure_reporter: self.failure_reporter.as_ref(),
                };
                rule.action().execute(effects, request, next).await
            }
        }
    }
}

impl fmt::Debug for ChaosEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaosEngine")
            .field("probability", &self.gate.probability())
            .field("rules", &self.selector.rules())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ChaosEngine`]
pub struct ChaosEngineBuilder {
    probability: f64,
    rules: Vec<Rule>,
    random_source: Option<Arc<dyn RandomSource>>,
    process_control: Option<Arc<dyn ProcessControl>>,
    failure_reporter: Option<Arc<dyn FailureReporter>>,
}

impl Default for ChaosEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChaosEngineBuilder {
    pub fn new() -> Self {
        Self {
            probability: shared::DEFAULT_PROBABILITY,
            rules: Vec::new(),
            random_source: None,
            process_control: None,
            failure_reporter: None,
        }
    }

    /// Start from configuration; every rule's action is derived here
    pub fn from_config(config: &ChaosConfig) -> ChaosResult<Self> {
        config.validate()?;

        let rules = config
            .rules
            .iter()
            .map(Rule::from_config)
            .collect::<ChaosResult<Vec<_>>>()?;

        let mut builder = Self::new().probability(config.probability).rules(rules);
        if let Some(seed) = config.seed {
            builder = builder.random_source(SeededRandomSource::new(seed));
        }
        Ok(builder)
    }

    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn random_source(self, source: impl RandomSource + 'static) -> Self {
        self.shared_random_source(Arc::new(source))
    }

    /// Use a source the caller keeps a handle to (e.g. a scripted sequence)
    pub fn shared_random_source(mut self, source: Arc<dyn RandomSource>) -> Self {
        self.random_source = Some(source);
        self
    }

    pub fn process_control(self, control: impl ProcessControl + 'static) -> Self {
        self.shared_process_control(Arc::new(control))
    }

    pub fn shared_process_control(mut self, control: Arc<dyn ProcessControl>) -> Self {
        self.process_control = Some(control);
        self
    }

    pub fn failure_reporter(self, reporter: impl FailureReporter + 'static) -> Self {
        self.shared_failure_reporter(Arc::new(reporter))
    }

    pub fn shared_failure_reporter(mut self, reporter: Arc<dyn FailureReporter>) -> Self {
        self.failure_reporter = Some(reporter);
        self
    }

    pub fn build(self) -> ChaosResult<ChaosEngine> {
        Ok(ChaosEngine {
            gate: Gate::new(self.probability),
            selector: RuleSelector::new(self.rules)?,
            random_source: self
                .random_source
                .unwrap_or_else(|| Arc::new(ThreadRandomSource::new())),
            process_control: self
                .process_control
                .unwrap_or_else(|| Arc::new(RealProcessControl::new())),
            failure_reporter: self
                .failure_reporter
                .unwrap_or_else(|| Arc::new(LoggingFailureReporter::new())),
        })
    }
}
