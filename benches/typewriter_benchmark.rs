//! Typewriter benchmark: Measure unit segmentation and reveal polling.
//!
//! Target: segmentation well under a frame (16ms) for a full response

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use showreel::typewriter::{unit_ends, RevealUnit, Typewriter};
use std::time::{Duration, Instant};

const RESPONSE: &str = "Joining orders with customers and summing totals for Q3. \
The top five customers account for 41% of revenue; Acme Corp leads with \
$1.2M, followed by Globex at $980K. Shall I chart the trend by month? ";

fn segmentation(c: &mut Criterion) {
    let text = RESPONSE.repeat(8);
    let mut group = c.benchmark_group("unit_ends");

    for (name, unit) in [
        ("char", RevealUnit::Char),
        ("grapheme", RevealUnit::Grapheme),
        ("word", RevealUnit::Word),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &unit, |b, &unit| {
            b.iter(|| unit_ends(black_box(&text), unit));
        });
    }

    group.finish();
}

fn full_reveal(c: &mut Criterion) {
    let typewriter = Typewriter::new(RevealUnit::Grapheme, Duration::from_millis(10));

    c.bench_function("reveal_poll_all", |b| {
        b.iter(|| {
            let t0 = Instant::now();
            let mut reveal = typewriter.reveal(RESPONSE, t0);
            let mut bytes = 0;
            reveal.poll(t0 + Duration::from_secs(60), |p| bytes += p.len());
            black_box(bytes)
        });
    });
}

criterion_group!(benches, segmentation, full_reveal);
criterion_main!(benches);
