//! Decision core: gate, weighted rule selection and the engine tying them together

pub mod gate;
pub mod selector;
pub mod engine;

pub use gate::Gate;
pub use selector::{Rule, RuleSelector};
pub use engine::{ChaosEngine, ChaosEngineBuilder, Decision};
