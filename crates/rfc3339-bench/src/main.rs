//! Throughput benchmark for RFC 3339 parsing and generation.
//!
//! Synthesizes a deterministic set of timestamps spread over several
//! centuries and offsets, then times generate and parse passes over it.

use std::env;
use std::hint::black_box;
use std::time::Instant;

use chrono::{FixedOffset, TimeDelta, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rfc3339::{generate_with_options, parse, GenerateOptions, Timestamp};

const DEFAULT_COUNT: usize = 200_000;
const SEED: u64 = 0x5eed;

/// Roughly two centuries, in microseconds.
const SPAN_MICROS: u64 = 200 * 365 * 86_400 * 1_000_000;

/// Offsets seen in real data, in minutes.
const OFFSETS: [i32; 8] = [0, 60, -300, 330, 345, -210, 540, -480];

/// Synthesizes `count` timestamps from a seeded generator, so the same
/// seed always yields the same set.
fn make_timestamps(count: usize, seed: u64) -> Vec<Timestamp> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|_| {
            let micros = rng.random_range(0..SPAN_MICROS);
            let offset_min = OFFSETS[rng.random_range(0..OFFSETS.len())];
            let offset = FixedOffset::east_opt(offset_min * 60).unwrap();
            let dt = (base + TimeDelta::microseconds(micros as i64)).with_timezone(&offset);
            Timestamp::Aware(dt)
        })
        .collect()
}

fn main() {
    let count = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_COUNT);

    println!("=== RFC 3339 Benchmark ===");
    println!("Timestamps: {}", count);
    println!();

    let start = Instant::now();
    let timestamps = make_timestamps(count, SEED);
    println!("Synthesized in {:?}", start.elapsed());

    for (label, options) in [
        ("utc", GenerateOptions::new()),
        (
            "utc+us",
            GenerateOptions {
                microseconds: true,
                ..GenerateOptions::new()
            },
        ),
        (
            "local+us",
            GenerateOptions {
                utc: false,
                accept_naive: false,
                microseconds: true,
            },
        ),
    ] {
        let start = Instant::now();
        let texts: Vec<String> = timestamps
            .iter()
            .map(|ts| generate_with_options(*ts, options).unwrap())
            .collect();
        let generate_time = start.elapsed();

        let start = Instant::now();
        let mut mismatches = 0usize;
        for (text, ts) in texts.iter().zip(&timestamps) {
            let parsed = black_box(parse(text).unwrap());
            if options.microseconds && parsed != *ts {
                mismatches += 1;
            }
        }
        let parse_time = start.elapsed();

        let bytes: usize = texts.iter().map(String::len).sum();
        println!();
        println!("--- {} ---", label);
        println!("Sample:   {}", texts.first().map(String::as_str).unwrap_or("-"));
        println!(
            "Generate: {:?} ({:.0} ns/op)",
            generate_time,
            generate_time.as_nanos() as f64 / count as f64
        );
        println!(
            "Parse:    {:?} ({:.0} ns/op, {:.1} MB/s)",
            parse_time,
            parse_time.as_nanos() as f64 / count as f64,
            bytes as f64 / parse_time.as_secs_f64() / 1_000_000.0
        );
        if mismatches > 0 {
            println!("Round-trip mismatches: {}", mismatches);
        }
    }
}
