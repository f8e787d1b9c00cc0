//! Command-line interface.

use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use regex::Regex;

use crate::config::Config;
use crate::sink::DEFAULT_BIN;

/// Comma with optional surrounding whitespace, compiled on first use.
static LIST_SEPARATOR: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\s*,\s*"));

/// Pulse window border colors through a cycle of colors.
///
/// Runs the JankyBorders `borders` command once per frame. Settings are read
/// from `$XDG_CONFIG_HOME/border-shimmer/config.toml` (or
/// `~/.config/border-shimmer/config.toml`) and can be overridden by flags.
/// Set `DEBUG` to trace every frame on stderr.
#[derive(Debug, Clone, Parser)]
#[command(name = "border-shimmer", version)]
pub struct Args {
    /// Comma-separated list of colors in #RRGGBBAA format
    #[arg(long, value_name = "LIST")]
    pub colors: Option<String>,

    /// Comma-separated list of inactive colors in #RRGGBBAA format
    #[arg(long, alias = "inactive_colors", value_name = "LIST")]
    pub inactive_colors: Option<String>,

    /// Number of seconds between each color
    #[arg(long)]
    pub secs: Option<f64>,

    /// Frames per second (number of intervening colors per second)
    #[arg(long)]
    pub fps: Option<f64>,

    /// Width of the border
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<f64>,

    /// Wrap active colors in glow()
    #[arg(long)]
    pub glow: bool,

    /// Wrap inactive colors in glow()
    #[arg(long)]
    pub inactive_glow: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Border drawing executable
    #[arg(long, env = "BORDER_SHIMMER_BIN", default_value = DEFAULT_BIN)]
    pub bin: String,

    /// Print frames to stdout instead of running the border command
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Load the config file selected by these arguments and apply the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid or a color list cannot
    /// be split.
    pub fn load_config(&self) -> Result<Config> {
        let mut config =
            Config::load(self.config.as_deref()).context("Failed to load configuration")?;
        self.apply(&mut config)?;
        Ok(config)
    }

    /// Override `config` with the flags that were given.
    ///
    /// Empty color lists are treated as absent. Glow flags can only turn glow
    /// on. Numbers are applied as given, zero and negative ones included;
    /// [`Config::resolve`] rejects unusable timings.
    ///
    /// # Errors
    ///
    /// Returns an error if the list separator regex fails to compile.
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(colors) = self.colors.as_deref() {
            let colors = split_list(colors)?;
            if !colors.is_empty() {
                config.active_colors = colors;
            }
        }
        if let Some(colors) = self.inactive_colors.as_deref() {
            let colors = split_list(colors)?;
            if !colors.is_empty() {
                config.inactive_colors = colors;
            }
        }
        if let Some(secs) = self.secs {
            config.secs = secs;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        config.active_glow |= self.glow;
        config.inactive_glow |= self.inactive_glow;
        Ok(())
    }
}

/// Split a comma-separated list, trimming whitespace around items.
///
/// # Errors
///
/// Returns an error if the separator regex fails to compile.
pub fn split_list(list: &str) -> Result<Vec<String>> {
    Ok(list_separator()?
        .split(list.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect())
}

fn list_separator() -> Result<&'static Regex> {
    LIST_SEPARATOR
        .as_ref()
        .map_err(|err| anyhow!("Failed to compile list separator regex: {err}"))
}
