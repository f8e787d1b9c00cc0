//! Cyclic color animation.
//!
//! The [`Animator`] walks both color tracks in lockstep. For every pair of
//! consecutive waypoints it emits `steps + 1` frames with `t` going from
//! `0.0` to `1.0` inclusive, then moves on to the next pair, wrapping around
//! after the last one. The end of one transition and the start of the next
//! show the same color, so each waypoint is drawn twice in a row.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::color::Color;
use crate::config::Settings;
use crate::sink::{FrameCommand, FrameSink};
use crate::{debug, warn};

/// One fully interpolated frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Color of the focused window border
    pub active: Color,
    /// Color of unfocused window borders
    pub inactive: Color,
    /// Progress through the current transition, `0.0..=1.0`
    pub t: f64,
    /// Index of the waypoint the transition starts from
    pub track_index: usize,
    /// Frame number within the transition, `0..=steps`
    pub sub_step: usize,
}

/// Waits between two frames.
pub trait FrameClock {
    /// Block for `delay`.
    fn wait(&mut self, delay: Duration);
}

/// [`FrameClock`] backed by [`thread::sleep`].
///
/// Time spent drawing a frame is not subtracted from the delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepClock;

impl FrameClock for SleepClock {
    fn wait(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

/// Endless iterator over the frames of an animation.
#[derive(Debug, Clone)]
pub struct Animator<'a> {
    settings: &'a Settings,
    steps: usize,
    track_index: usize,
    sub_step: usize,
}

impl<'a> Animator<'a> {
    /// Start at the first waypoint of both tracks.
    #[must_use]
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            steps: settings.steps_per_transition().max(1),
            track_index: 0,
            sub_step: 0,
        }
    }

    /// Position of the next frame as `(track_index, sub_step)`.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.track_index, self.sub_step)
    }

    /// Compute the frame at the current position without advancing.
    #[must_use]
    pub fn current(&self) -> Frame {
        let tracks = self.settings.tracks();
        let next = (self.track_index + 1) % tracks.len();

        #[allow(clippy::cast_precision_loss)]
        let t = self.sub_step as f64 / self.steps as f64;

        let active = tracks.active();
        let inactive = tracks.inactive();
        Frame {
            active: active[self.track_index].interpolate(active[next], t),
            inactive: inactive[self.track_index].interpolate(inactive[next], t),
            t,
            track_index: self.track_index,
            sub_step: self.sub_step,
        }
    }

    fn advance(&mut self) {
        if self.sub_step < self.steps {
            self.sub_step += 1;
        } else {
            self.sub_step = 0;
            self.track_index = (self.track_index + 1) % self.settings.tracks().len();
        }
    }

    /// Draw frames until `running` is cleared.
    ///
    /// Each frame is handed to `sink`, then `clock` waits for the frame
    /// delay. Sink failures are logged and the next frame is drawn anyway.
    /// `running` is checked before every frame, so a stop request takes
    /// effect at most one frame delay (plus one sink call) later.
    ///
    /// Returns the number of frames drawn.
    pub fn run<S, C>(&mut self, sink: &mut S, clock: &mut C, running: &AtomicBool) -> u64
    where
        S: FrameSink + ?Sized,
        C: FrameClock + ?Sized,
    {
        let delay = self.settings.frame_delay();
        let mut drawn = 0;

        while running.load(Ordering::SeqCst) {
            let frame = self.current();
            self.advance();

            let command = FrameCommand::new(&frame, self.settings);
            debug!(
                "frame={drawn} index={} step={} t={:.3} active={} inactive={}",
                frame.track_index,
                frame.sub_step,
                frame.t,
                command.active_color,
                command.inactive_color
            );

            if let Err(err) = sink.show(&command) {
                warn!("failed to draw frame {drawn}: {err:#}");
            }
            drawn += 1;

            clock.wait(delay);
        }

        drawn
    }
}

impl Iterator for Animator<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let frame = self.current();
        self.advance();
        Some(frame)
    }
}
