//! Simple inspector for RFC 3339 timestamps.
//!
//! Usage: cargo run --example inspect -- 2009-01-01T14:01:02-04:00 ...

use std::env;

use chrono::{Datelike, Timelike};
use rfc3339::{generate_with_options, parse, GenerateOptions, Timestamp};

fn describe(ts: &Timestamp) -> String {
    let local = ts.local();
    let offset = match ts.offset_seconds() {
        Some(0) => "UTC".to_string(),
        Some(seconds) => rfc3339::format_offset(seconds),
        None => "naive".to_string(),
    };
    format!(
        "year={} month={} day={} hour={} minute={} second={} us={} offset={}",
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute(),
        local.second(),
        ts.microsecond(),
        offset
    )
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: inspect <timestamp>...");
        std::process::exit(2);
    }

    let mut failed = false;
    for arg in &args {
        println!("{}", arg);
        match parse(arg) {
            Ok(ts) => {
                println!("  fields: {}", describe(&ts));
                let options = GenerateOptions {
                    microseconds: true,
                    ..GenerateOptions::default()
                };
                match generate_with_options(ts, options) {
                    Ok(utc) => println!("  utc:    {}", utc),
                    Err(e) => println!("  utc:    error: {}", e),
                }
                let local = GenerateOptions {
                    utc: false,
                    ..options
                };
                match generate_with_options(ts, local) {
                    Ok(text) => println!("  local:  {}", text),
                    Err(e) => println!("  local:  error: {}", e),
                }
            }
            Err(e) => {
                failed = true;
                println!("  error ({:?}): {}", e.kind(), e);
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
