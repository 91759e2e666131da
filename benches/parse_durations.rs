//! This bench test measures parsing and formatting throughput of the
//! ISO-8601 duration codec over a representative mix of server-supplied
//! strings.

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use cookbook::DurationComponents;

const SAMPLES: &[&str] = &[
    "PT11H",
    "P2D",
    "P1DT2H",
    "P2Y4M3DT8H30M3S",
    "P8W",
    "PT0H25M",
    "PT",
    "00:40:00",
];

fn parse_durations(c: &mut Criterion) {
    c.bench_function("parse durations", |b| {
        b.iter(|| {
            for sample in SAMPLES {
                let _ = black_box(sample).parse::<DurationComponents>();
            }
        });
    });

    c.bench_function("format durations", |b| {
        let durations: Vec<DurationComponents> = SAMPLES
            .iter()
            .filter_map(|sample| sample.parse().ok())
            .collect();
        b.iter(|| {
            for duration in &durations {
                let _ = black_box(duration).to_string();
            }
        });
    });
}

criterion_group!(benches, parse_durations);
criterion_main!(benches);
