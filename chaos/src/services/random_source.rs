//! Random source implementations

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::traits::RandomSource;

/// System randomness from the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomSource;

impl ThreadRandomSource {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRandomSource {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

/// Deterministic generator seeded once, for replayable runs
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_f64(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .r#gen::<f64>()
    }
}

/// Queue of predetermined draws, consumed one per call.
///
/// Once the queue is exhausted every draw returns `0.0`.
#[derive(Debug, Default)]
pub struct SequenceRandomSource {
    values: Mutex<VecDeque<f64>>,
}

impl SequenceRandomSource {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }

    /// Replace the queued draws
    pub fn set(&self, values: impl IntoIterator<Item = f64>) {
        let mut queue = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        queue.clear();
        queue.extend(values);
    }

    /// Append draws to the queue
    pub fn push(&self, values: impl IntoIterator<Item = f64>) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(values);
    }

    /// Number of draws still queued
    pub fn remaining(&self) -> usize {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl RandomSource for SequenceRandomSource {
    fn next_f64(&self) -> f64 {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(0.0)
    }
}
