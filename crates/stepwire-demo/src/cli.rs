#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `STEPWIRE_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
StepWire Demo — an orbiting body driving distance, proximity, and
intersection signals through one scene ticker

USAGE:
    stepwire-demo [OPTIONS]

OPTIONS:
    --steps=N        Number of frames to simulate (default: 240)
    --epsilon=F      Distance comparator tolerance; 0 means exact (default: 0)
    --threshold=F    Proximity distance threshold (default: 1.2)
    --help, -h       Show this help message
    --version, -V    Show version

ENVIRONMENT VARIABLES:
    STEPWIRE_DEMO_STEPS      Override --steps
    STEPWIRE_DEMO_EPSILON    Override --epsilon
    STEPWIRE_DEMO_THRESHOLD  Override --threshold
    RUST_LOG                 Log filter (e.g. 'stepwire=trace')";

/// Parsed command-line options.
pub struct Opts {
    /// Frames to simulate.
    pub steps: u64,
    /// Distance comparator tolerance; 0 means exact inequality.
    pub epsilon: f32,
    /// Proximity threshold.
    pub threshold: f32,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            steps: 240,
            epsilon: 0.0,
            threshold: 1.2,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(val) = env::var("STEPWIRE_DEMO_STEPS")
            && let Ok(n) = val.parse()
        {
            opts.steps = n;
        }
        if let Ok(val) = env::var("STEPWIRE_DEMO_EPSILON")
            && let Ok(n) = val.parse()
        {
            opts.epsilon = n;
        }
        if let Ok(val) = env::var("STEPWIRE_DEMO_THRESHOLD")
            && let Ok(n) = val.parse()
        {
            opts.threshold = n;
        }

        for arg in env::args().skip(1) {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("stepwire-demo {VERSION}");
                    process::exit(0);
                }
                other => {
                    if let Some(val) = other.strip_prefix("--steps=") {
                        match val.parse() {
                            Ok(n) => opts.steps = n,
                            Err(_) => {
                                eprintln!("Invalid --steps value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--epsilon=") {
                        match val.parse() {
                            Ok(n) => opts.epsilon = n,
                            Err(_) => {
                                eprintln!("Invalid --epsilon value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--threshold=") {
                        match val.parse() {
                            Ok(n) => opts.threshold = n,
                            Err(_) => {
                                eprintln!("Invalid --threshold value: {val}");
                                process::exit(1);
                            }
                        }
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Try --help for usage.");
                        process::exit(1);
                    }
                }
            }
        }

        opts
    }
}
