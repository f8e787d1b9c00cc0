//! Stop the animation cleanly on termination signals.
//!
//! Termination signals are blocked for the whole process and picked up
//! synchronously by a dedicated thread with `sigwait`, so no signal handler
//! runs. That thread only flips the flag the animation loop checks between
//! frames. Child processes start with an empty signal mask, so the `borders`
//! command still reacts to signals normally.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result};
use nix::sys::signal::{SigSet, Signal};

use crate::{debug, warn};

/// Signals that stop the animation.
pub const TERMINATION_SIGNALS: [Signal; 3] = [Signal::SIGINT, Signal::SIGTERM, Signal::SIGHUP];

/// Set of [`TERMINATION_SIGNALS`].
#[must_use]
pub fn termination_signals() -> SigSet {
    let mut mask = SigSet::empty();
    for signal in TERMINATION_SIGNALS {
        mask.add(signal);
    }
    mask
}

/// Block termination signals and watch for them in the background.
///
/// Must be called before any other thread is spawned, so that every thread
/// inherits the blocked mask.
///
/// # Returns
///
/// A flag that stays `true` until one of [`TERMINATION_SIGNALS`] arrives.
///
/// # Errors
///
/// Returns an error if the signal mask cannot be changed or the watcher
/// thread cannot be spawned.
pub fn install() -> Result<Arc<AtomicBool>> {
    let mask = termination_signals();
    mask.thread_block()
        .context("Failed to block termination signals")?;

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);

    thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            match mask.wait() {
                Ok(signal) => debug!("received {signal:?}, stopping"),
                Err(err) => warn!("waiting for signals failed, stopping: {err}"),
            }
            flag.store(false, Ordering::SeqCst);
        })
        .context("Failed to spawn signal watcher thread")?;

    Ok(running)
}
