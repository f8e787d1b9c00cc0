//! Window border color animation utility.
//!
//! Pulses the colors of [JankyBorders](https://github.com/FelixKratz/JankyBorders)
//! window borders by running the `borders` command with interpolated colors,
//! a few times per second, until interrupted.
//!
//! # Usage
//!
//! ```text
//! border-shimmer --colors '#FF0000FF,#0000FFFF' --secs 2 --fps 10
//! ```
//!
//! Exit codes:
//! - 0: Stopped by SIGINT, SIGTERM or SIGHUP
//! - 1: Invalid configuration or startup failure
//!
//! # Environment Variables
//!
//! - `DEBUG`: When set, enables debug output to stderr showing the resolved
//!   configuration and every frame drawn.
//! - `BORDER_SHIMMER_BIN`: Border drawing executable, `borders` by default.
//! - `XDG_CONFIG_HOME`: Base directory of the config file.

use std::io;
use std::process;

use anyhow::Result;
use clap::Parser;

use border_shimmer::cli::Args;
use border_shimmer::sink::{BordersCommand, DryRun, FrameSink};
use border_shimmer::{animate, debug, resolve_settings, shutdown};

/// Resolve settings, then draw frames until a termination signal arrives.
fn run(args: &Args) -> Result<u64> {
    let settings = resolve_settings(args)?;
    let running = shutdown::install()?;

    let mut sink: Box<dyn FrameSink> = if args.dry_run {
        Box::new(DryRun::new(io::stdout()))
    } else {
        Box::new(BordersCommand::new(args.bin.as_str()))
    };

    Ok(animate(&settings, sink.as_mut(), &running))
}

/// Main entry point for the border-shimmer utility.
fn main() {
    let args = Args::parse();

    match run(&args) {
        Ok(frames) => {
            debug!("stopped after {frames} frames");
            process::exit(0);
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}
