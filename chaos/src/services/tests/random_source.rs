//! Tests for RandomSource implementations

use crate::services::random_source::{SeededRandomSource, SequenceRandomSource, ThreadRandomSource};
use crate::traits::RandomSource;

#[test]
fn test_thread_source_stays_in_unit_interval() {
    let source = ThreadRandomSource::new();
    for _ in 0..1_000 {
        let draw = source.next_f64();
        assert!((0.0..1.0).contains(&draw), "draw out of range: {draw}");
    }
}

#[test]
fn test_seeded_sources_replay_identically() {
    let first = SeededRandomSource::new(1234);
    let second = SeededRandomSource::new(1234);

    let a: Vec<f64> = (0..20).map(|_| first.next_f64()).collect();
    let b: Vec<f64> = (0..20).map(|_| second.next_f64()).collect();
    assert_eq!(a, b);
    assert!(a.iter().all(|draw| (0.0..1.0).contains(draw)));
}

#[test]
fn test_different_seeds_diverge() {
    let first = SeededRandomSource::new(1);
    let second = SeededRandomSource::new(2);

    let a: Vec<f64> = (0..5).map(|_| first.next_f64()).collect();
    let b: Vec<f64> = (0..5).map(|_| second.next_f64()).collect();
    assert_ne!(a, b);
}

#[test]
fn test_sequence_consumes_in_order() {
    let source = SequenceRandomSource::new([0.3, 0.7]);
    assert_eq!(source.remaining(), 2);
    assert_eq!(source.next_f64(), 0.3);
    assert_eq!(source.next_f64(), 0.7);
    assert_eq!(source.remaining(), 0);
}

#[test]
fn test_sequence_exhausted_returns_zero() {
    let source = SequenceRandomSource::new([]);
    assert_eq!(source.next_f64(), 0.0);
    assert_eq!(source.next_f64(), 0.0);
}

#[test]
fn test_sequence_set_and_push() {
    let source = SequenceRandomSource::new([0.9, 0.9, 0.9]);
    source.set([0.1]);
    source.push([0.2, 0.4]);

    assert_eq!(source.remaining(), 3);
    assert_eq!(source.next_f64(), 0.1);
    assert_eq!(source.next_f64(), 0.2);
    assert_eq!(source.next_f64(), 0.4);
}
