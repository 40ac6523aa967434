#![allow(dead_code)]

use approx::assert_relative_eq;
use sweph_batch::engine::stub::{CallCounter, StubEngine};
use sweph_batch::{BatchResult, Sweph};

pub const J2000: f64 = 2451545.0;

/// A façade over a fresh stub engine, with a handle on its call counter.
pub fn counted_sweph() -> (Sweph<StubEngine>, CallCounter) {
    let engine = StubEngine::new();
    let counter = engine.counter();
    (Sweph::new(engine), counter)
}

/// Check the parallel-collection invariant of a batch of `n` elements.
pub fn assert_batch_shape(result: &BatchResult, n: usize, width: usize) {
    assert_eq!(result.status.len(), n);
    assert_eq!(result.serr.len(), n);
    assert_eq!(result.values.shape(), (n, width));
}

pub fn assert_rows_close(actual: &BatchResult, expected: &BatchResult, epsilon: f64) {
    assert_eq!(actual.values.shape(), expected.values.shape());
    for (a, e) in actual.values.iter().zip(expected.values.iter()) {
        assert_relative_eq!(*a, *e, epsilon = epsilon);
    }
}
