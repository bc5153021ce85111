//! Statistical timing test for tag comparison.
//!
//! Run with `cargo test --release -- --ignored`.

use std::{hint::black_box, time::Instant};

use rand::{Rng, RngCore, thread_rng};
use sparkle_crypto::ct::ct_eq;
use test_log::test;

/// Running mean and variance (Welford).
#[derive(Default)]
struct Stats {
    n: f64,
    mean: f64,
    m2: f64,
}

impl Stats {
    fn push(&mut self, x: f64) {
        self.n += 1.0;
        let delta = x - self.mean;
        self.mean += delta / self.n;
        self.m2 += delta * (x - self.mean);
    }

    fn variance(&self) -> f64 {
        self.m2 / (self.n - 1.0)
    }
}

/// Welch's t statistic for two independent samples.
fn welch_t(a: &Stats, b: &Stats) -> f64 {
    (a.mean - b.mean) / (a.variance() / a.n + b.variance() / b.n).sqrt()
}

/// Times a batch of comparisons, in nanoseconds.
#[allow(clippy::cast_precision_loss)]
fn time_batch(a: &[u8], b: &[u8]) -> f64 {
    const BATCH: usize = 64;

    let start = Instant::now();
    for _ in 0..BATCH {
        black_box(ct_eq(black_box(a), black_box(b)));
    }
    start.elapsed().as_nanos() as f64
}

/// The time taken to compare two tags must not depend on
/// where they first differ.
#[test]
#[ignore = "statistical and slow; run in release mode"]
fn test_ct_eq_timing() {
    const SAMPLES: usize = 200_000;
    // The usual dudect threshold is 4.5.
    const THRESHOLD: f64 = 10.0;

    let mut rng = thread_rng();
    let mut tag = [0u8; 32];
    rng.fill_bytes(&mut tag);

    let mut first = tag;
    first[0] ^= 1;
    let mut last = tag;
    last[31] ^= 1;

    let mut early = Stats::default();
    let mut late = Stats::default();
    for _ in 0..SAMPLES {
        // Interleave the two classes randomly.
        if rng.r#gen::<bool>() {
            early.push(time_batch(&tag, &first));
        } else {
            late.push(time_batch(&tag, &last));
        }
    }

    let t = welch_t(&early, &late);
    tracing::info!(
        t,
        early_ns = early.mean,
        late_ns = late.mean,
        "ct_eq timing"
    );
    assert!(
        t.abs() < THRESHOLD,
        "timing depends on the mismatch position: t = {t}"
    );
}
