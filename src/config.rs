//! Configuration loading and validation.
//!
//! Settings are resolved in three layers, later ones winning:
//! 1. Built-in defaults ([`Config::default`])
//! 2. The TOML config file (`$XDG_CONFIG_HOME/border-shimmer/config.toml`)
//! 3. Command-line flags (see [`crate::cli`])
//!
//! The merged [`Config`] is then turned into immutable [`Settings`] by
//! [`Config::resolve`], which parses every color up front so that no
//! configuration error can surface once the animation has started.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::color::{Color, ColorError, parse_colors};
use crate::debug;

/// Colors cycled through when nothing else is configured.
pub const DEFAULT_COLORS: [&str; 6] = [
    "#FF0000FF", // Red
    "#FFA500FF", // Orange
    "#FFFF00FF", // Yellow
    "#008000FF", // Green
    "#0000FFFF", // Blue
    "#4B0082FF", // Indigo
];

/// Default number of seconds spent moving from one color to the next.
pub const DEFAULT_SECS: f64 = 3.0;

/// Default number of frames drawn per second.
pub const DEFAULT_FPS: f64 = 3.0;

/// Default border width.
pub const DEFAULT_WIDTH: f64 = 5.0;

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("error reading config file {}", .path.display())]
    Read {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The config file is not valid TOML or does not match the schema.
    #[error("error parsing config file {}", .path.display())]
    Parse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying TOML error
        source: Box<toml::de::Error>,
    },
    /// A configured color could not be parsed.
    #[error("error parsing {track} colors")]
    Color {
        /// Which track the color belongs to (`active` or `inactive`)
        track: &'static str,
        /// Underlying color error
        source: ColorError,
    },
    /// The active color list is empty.
    #[error("at least one active color is required")]
    NoColors,
    /// Active and inactive tracks do not have the same number of colors.
    #[error(
        "the number of inactive colors ({inactive}) must match the number of active colors ({active})"
    )]
    TrackLengthMismatch {
        /// Number of active colors
        active: usize,
        /// Number of inactive colors
        inactive: usize,
    },
    /// A timing value is zero, negative or not finite.
    #[error("{name} must be a positive number, got {value}")]
    NotPositive {
        /// Name of the setting
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// `fps` is so low that `1 / fps` seconds does not fit in a [`Duration`].
    #[error("fps is too low, 1 / {fps} seconds is not a valid frame delay")]
    FrameDelayTooLong {
        /// Frames per second
        fps: f64,
    },
    /// `secs * fps` is below one, leaving no frame per transition.
    #[error("secs * fps must be at least 1, got {secs} * {fps}")]
    TooFewSteps {
        /// Seconds per transition
        secs: f64,
        /// Frames per second
        fps: f64,
    },
}

/// `[active]` table of the config file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActiveSection {
    /// Colors in `#RRGGBBAA` format
    pub colors: Vec<String>,
    /// Seconds per transition
    pub secs: Option<f64>,
    /// Frames per second
    pub fps: Option<f64>,
    /// Border width
    pub width: Option<f64>,
    /// Wrap active colors in `glow(...)`
    pub glow: Option<bool>,
}

/// `[inactive]` table of the config file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InactiveSection {
    /// Colors in `#RRGGBBAA` format, derived from the active ones when empty
    pub colors: Vec<String>,
    /// Wrap inactive colors in `glow(...)`
    pub glow: Option<bool>,
}

/// Contents of the TOML config file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Settings for focused windows, plus the shared timing and width
    pub active: ActiveSection,
    /// Settings for unfocused windows
    pub inactive: InactiveSection,
}

impl FileConfig {
    /// Parse the contents of a config file.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed, has unknown keys or
    /// values of the wrong type.
    pub fn parse(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Read`] if the file cannot be read
    /// - [`ConfigError::Parse`] if its contents are invalid
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }
}

/// Location of the default config file.
///
/// `$XDG_CONFIG_HOME/border-shimmer/config.toml`, falling back to
/// `$HOME/.config/border-shimmer/config.toml`. Returns `None` when neither
/// variable is set.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("border-shimmer").join("config.toml"))
}

/// Unvalidated configuration, as merged from defaults, file and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Active colors in `#RRGGBBAA` format
    pub active_colors: Vec<String>,
    /// Inactive colors in `#RRGGBBAA` format, may be empty
    pub inactive_colors: Vec<String>,
    /// Seconds per transition
    pub secs: f64,
    /// Frames per second
    pub fps: f64,
    /// Border width
    pub width: f64,
    /// Wrap active colors in `glow(...)`
    pub active_glow: bool,
    /// Wrap inactive colors in `glow(...)`
    pub inactive_glow: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_colors: DEFAULT_COLORS.iter().map(ToString::to_string).collect(),
            inactive_colors: Vec::new(),
            secs: DEFAULT_SECS,
            fps: DEFAULT_FPS,
            width: DEFAULT_WIDTH,
            active_glow: false,
            inactive_glow: false,
        }
    }
}

impl Config {
    /// Build the configuration from defaults and a config file.
    ///
    /// With an explicit `path` the file must exist. Otherwise the
    /// [`default_path`] is used if a file is present there, and defaults are
    /// kept as they are if not.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_path().filter(|path| path.is_file()),
        };

        match path {
            Some(path) => {
                debug!("config={}", path.display());
                config.merge(FileConfig::read(&path)?);
            }
            None => debug!("config=<defaults>"),
        }

        Ok(config)
    }

    /// Apply the values set in a config file on top of this configuration.
    ///
    /// Empty color lists and missing keys leave the current values alone.
    /// Any value that is present is applied, zero and negative numbers
    /// included: a zero `width` draws no border rather than meaning "unset",
    /// and a non-positive `secs` or `fps` is reported by [`Config::resolve`]
    /// instead of being silently skipped.
    pub fn merge(&mut self, file: FileConfig) {
        let FileConfig { active, inactive } = file;

        if !active.colors.is_empty() {
            self.active_colors = active.colors;
        }
        if !inactive.colors.is_empty() {
            self.inactive_colors = inactive.colors;
        }
        if let Some(secs) = active.secs {
            self.secs = secs;
        }
        if let Some(fps) = active.fps {
            self.fps = fps;
        }
        if let Some(width) = active.width {
            self.width = width;
        }
        if let Some(glow) = active.glow {
            self.active_glow = glow;
        }
        if let Some(glow) = inactive.glow {
            self.inactive_glow = glow;
        }
    }

    /// Validate the configuration and parse its colors.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a color is malformed, the active list is
    /// empty, the tracks differ in length, or the timing is unusable.
    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let active = parse_colors(&self.active_colors).map_err(|source| ConfigError::Color {
            track: "active",
            source,
        })?;
        let inactive =
            parse_colors(&self.inactive_colors).map_err(|source| ConfigError::Color {
                track: "inactive",
                source,
            })?;

        let tracks = Tracks::new(active, inactive)?;
        Ok(Settings::new(tracks, self.secs, self.fps, self.width)?
            .with_glow(self.active_glow, self.inactive_glow))
    }
}

/// Rotate colors left by half their length.
///
/// `[c0, c1, c2, c3]` becomes `[c2, c3, c0, c1]`, so that the inactive border
/// runs half a cycle out of phase with the active one.
#[must_use]
pub fn rotate_half(colors: &[Color]) -> Vec<Color> {
    let mut rotated = colors.to_vec();
    rotated.rotate_left(colors.len() / 2);
    rotated
}

/// Active and inactive color tracks of equal, non-zero length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracks {
    active: Vec<Color>,
    inactive: Vec<Color>,
}

impl Tracks {
    /// Pair up both tracks, deriving the inactive one when it is empty.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoColors`] if `active` is empty
    /// - [`ConfigError::TrackLengthMismatch`] if the lengths differ
    pub fn new(active: Vec<Color>, inactive: Vec<Color>) -> Result<Self, ConfigError> {
        if active.is_empty() {
            return Err(ConfigError::NoColors);
        }

        let inactive = if inactive.is_empty() {
            rotate_half(&active)
        } else {
            inactive
        };

        if inactive.len() != active.len() {
            return Err(ConfigError::TrackLengthMismatch {
                active: active.len(),
                inactive: inactive.len(),
            });
        }

        Ok(Self { active, inactive })
    }

    /// Colors shown on the focused window.
    #[must_use]
    pub fn active(&self) -> &[Color] {
        &self.active
    }

    /// Colors shown on unfocused windows.
    #[must_use]
    pub fn inactive(&self) -> &[Color] {
        &self.inactive
    }

    /// Number of waypoints in each track.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Always `false`, tracks hold at least one color.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Validated, immutable animation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    tracks: Tracks,
    secs: f64,
    fps: f64,
    frame_delay: Duration,
    width: f64,
    active_glow: bool,
    inactive_glow: bool,
}

impl Settings {
    /// Create settings without glow.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotPositive`] if `secs` or `fps` is not a positive
    ///   finite number
    /// - [`ConfigError::FrameDelayTooLong`] if `1 / fps` seconds overflows a
    ///   [`Duration`]
    /// - [`ConfigError::TooFewSteps`] if `secs * fps < 1`
    pub fn new(tracks: Tracks, secs: f64, fps: f64, width: f64) -> Result<Self, ConfigError> {
        for (name, value) in [("secs", secs), ("fps", fps)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        let frame_delay = Duration::try_from_secs_f64(1.0 / fps)
            .map_err(|_| ConfigError::FrameDelayTooLong { fps })?;
        if secs * fps < 1.0 {
            return Err(ConfigError::TooFewSteps { secs, fps });
        }

        Ok(Self {
            tracks,
            secs,
            fps,
            frame_delay,
            width,
            active_glow: false,
            inactive_glow: false,
        })
    }

    /// Set the glow flag of each track.
    #[must_use]
    pub fn with_glow(mut self, active: bool, inactive: bool) -> Self {
        self.active_glow = active;
        self.inactive_glow = inactive;
        self
    }

    /// Color tracks to animate.
    #[must_use]
    pub fn tracks(&self) -> &Tracks {
        &self.tracks
    }

    /// Seconds per transition.
    #[must_use]
    pub fn secs(&self) -> f64 {
        self.secs
    }

    /// Frames per second.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Border width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Whether active colors are wrapped in `glow(...)`.
    #[must_use]
    pub fn active_glow(&self) -> bool {
        self.active_glow
    }

    /// Whether inactive colors are wrapped in `glow(...)`.
    #[must_use]
    pub fn inactive_glow(&self) -> bool {
        self.inactive_glow
    }

    /// Number of frames in each transition, `floor(secs * fps)`, at least 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn steps_per_transition(&self) -> usize {
        (self.secs * self.fps).floor() as usize
    }

    /// Time between two frames, `1 / fps`.
    #[must_use]
    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }
}
