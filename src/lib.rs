//! Window border color animation library.
//!
//! Cycles the border colors drawn by
//! [JankyBorders](https://github.com/FelixKratz/JankyBorders) through a list
//! of colors, one `borders` invocation per frame.

pub mod animator;
pub mod cli;
pub mod color;
pub mod config;
pub mod logs;
pub mod shutdown;
pub mod sink;

use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};

use animator::{Animator, SleepClock};
use cli::Args;
use config::Settings;
use sink::FrameSink;

/// Resolve the animation settings from the config file and flags.
///
/// This function orchestrates the configuration phase:
/// 1. Load defaults and the config file
/// 2. Apply command-line overrides
/// 3. Parse every color and validate tracks and timing
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed, if a color
/// is malformed, if the active and inactive tracks differ in length, or if
/// the timing leaves no frame per transition.
pub fn resolve_settings(args: &Args) -> Result<Settings> {
    let config = args.load_config()?;
    debug!("config={config:?}");

    let settings = config.resolve().context("Invalid configuration")?;
    debug!(
        "colors={} steps={} delay={:?}",
        settings.tracks().len(),
        settings.steps_per_transition(),
        settings.frame_delay()
    );

    Ok(settings)
}

/// Animate borders in real time until `running` is cleared.
///
/// Returns the number of frames drawn.
pub fn animate<S>(settings: &Settings, sink: &mut S, running: &AtomicBool) -> u64
where
    S: FrameSink + ?Sized,
{
    Animator::new(settings).run(sink, &mut SleepClock, running)
}
