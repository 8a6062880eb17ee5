//! Activation gate

/// Decides whether fault injection activates for one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    probability: f64,
}

impl Gate {
    /// Probabilities outside [0, 1] are kept as given; comparison does the clamping.
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// A draw activates when it does not exceed the probability
    pub fn admits(&self, draw: f64) -> bool {
        draw <= self.probability
    }
}
