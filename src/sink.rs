//! Frame sinks: where computed frames end up.
//!
//! The real sink is the `borders` command from
//! [JankyBorders](https://github.com/FelixKratz/JankyBorders), run once per
//! frame. [`DryRun`] prints frames instead, which is handy to preview a
//! configuration.

use std::io::Write;
use std::process::Command;

use anyhow::{Context, Result, bail};

use crate::animator::Frame;
use crate::config::Settings;

/// Default name of the border drawing executable.
pub const DEFAULT_BIN: &str = "borders";

/// Arguments for drawing one frame, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCommand {
    /// Active color as `0xAARRGGBB`, or `glow(0xAARRGGBB)`
    pub active_color: String,
    /// Inactive color as `0xAARRGGBB`, or `glow(0xAARRGGBB)`
    pub inactive_color: String,
    /// Border width with 6 decimals
    pub width: String,
}

impl FrameCommand {
    /// Format `frame` using the glow flags and width from `settings`.
    #[must_use]
    pub fn new(frame: &Frame, settings: &Settings) -> Self {
        Self {
            active_color: wrap_glow(frame.active.to_hex(), settings.active_glow()),
            inactive_color: wrap_glow(frame.inactive.to_hex(), settings.inactive_glow()),
            width: format!("{:.6}", settings.width()),
        }
    }

    /// `key=value` arguments understood by `borders`.
    #[must_use]
    pub fn args(&self) -> [String; 3] {
        [
            format!("active_color={}", self.active_color),
            format!("inactive_color={}", self.inactive_color),
            format!("width={}", self.width),
        ]
    }
}

fn wrap_glow(hex: String, glow: bool) -> String {
    if glow { format!("glow({hex})") } else { hex }
}

/// Something that can draw a frame.
pub trait FrameSink {
    /// Draw one frame, blocking until done.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame could not be drawn. Callers log it and
    /// carry on with the next frame.
    fn show(&mut self, command: &FrameCommand) -> Result<()>;
}

/// Runs the `borders` executable once per frame.
#[derive(Debug, Clone)]
pub struct BordersCommand {
    bin: String,
}

impl BordersCommand {
    /// Use `bin` (looked up in `PATH` unless it contains a slash).
    #[must_use]
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Default for BordersCommand {
    fn default() -> Self {
        Self::new(DEFAULT_BIN)
    }
}

impl FrameSink for BordersCommand {
    fn show(&mut self, command: &FrameCommand) -> Result<()> {
        let output = Command::new(&self.bin)
            .args(command.args())
            .output()
            .with_context(|| format!("Failed to run {}", self.bin))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                bail!("{} exited with {}", self.bin, output.status);
            }
            bail!("{} exited with {}: {stderr}", self.bin, output.status);
        }

        Ok(())
    }
}

/// Writes one `active inactive width` line per frame.
#[derive(Debug)]
pub struct DryRun<W: Write> {
    out: W,
}

impl<W: Write> DryRun<W> {
    /// Print frames to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for DryRun<W> {
    fn show(&mut self, command: &FrameCommand) -> Result<()> {
        writeln!(
            self.out,
            "{} {} {}",
            command.active_color, command.inactive_color, command.width
        )
        .context("Failed to write frame")?;
        self.out.flush().context("Failed to flush frame")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::Tracks;

    fn settings(width: f64) -> Result<Settings> {
        let tracks = Tracks::new(vec![Color::new(255, 0, 0, 255)], Vec::new())?;
        Ok(Settings::new(tracks, 1.0, 1.0, width)?)
    }

    fn frame() -> Frame {
        Frame {
            active: Color::new(255, 0, 0, 255),
            inactive: Color::new(0, 0, 255, 128),
            t: 0.0,
            track_index: 0,
            sub_step: 0,
        }
    }

    #[test]
    fn test_command_format() -> Result<()> {
        let command = FrameCommand::new(&frame(), &settings(5.0)?);
        assert_eq!(command.active_color, "0xFFFF0000");
        assert_eq!(command.inactive_color, "0x800000FF");
        assert_eq!(command.width, "5.000000");
        assert_eq!(
            command.args(),
            [
                "active_color=0xFFFF0000",
                "inactive_color=0x800000FF",
                "width=5.000000"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_command_glow() -> Result<()> {
        let settings = settings(2.5)?.with_glow(true, false);
        let command = FrameCommand::new(&frame(), &settings);
        assert_eq!(command.active_color, "glow(0xFFFF0000)");
        assert_eq!(command.inactive_color, "0x800000FF");
        assert_eq!(command.width, "2.500000");

        let settings = settings.with_glow(false, true);
        let command = FrameCommand::new(&frame(), &settings);
        assert_eq!(command.active_color, "0xFFFF0000");
        assert_eq!(command.inactive_color, "glow(0x800000FF)");
        Ok(())
    }

    #[test]
    fn test_command_negative_width() -> Result<()> {
        let command = FrameCommand::new(&frame(), &settings(-1.25)?);
        assert_eq!(command.width, "-1.250000");
        Ok(())
    }

    #[test]
    fn test_dry_run_output() -> Result<()> {
        let command = FrameCommand::new(&frame(), &settings(5.0)?);
        let mut sink = DryRun::new(Vec::new());
        sink.show(&command)?;
        sink.show(&command)?;
        let out = String::from_utf8(sink.into_inner())?;
        assert_eq!(
            out,
            "0xFFFF0000 0x800000FF 5.000000\n0xFFFF0000 0x800000FF 5.000000\n"
        );
        Ok(())
    }

    #[test]
    fn test_borders_missing_binary() -> Result<()> {
        let command = FrameCommand::new(&frame(), &settings(5.0)?);
        let mut sink = BordersCommand::new("border-shimmer-test-no-such-binary");
        assert!(sink.show(&command).is_err());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_borders_exit_status() -> Result<()> {
        let command = FrameCommand::new(&frame(), &settings(5.0)?);
        BordersCommand::new("true").show(&command)?;

        let err = BordersCommand::new("false")
            .show(&command)
            .expect_err("false exits non-zero");
        assert!(err.to_string().starts_with("false exited with"));
        Ok(())
    }
}
