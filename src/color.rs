//! RGBA color parsing, interpolation and encoding.
//!
//! This module provides:
//! - Parsing `#RRGGBBAA` hex strings into [`Color`]
//! - Linear interpolation between two colors, channel by channel
//! - Encoding colors in the `0xAARRGGBB` form the `borders` command expects

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of hex digits in a color, once the optional `#` is stripped.
const HEX_DIGITS: usize = 8;

/// Errors raised while parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string does not hold exactly 8 hex digits.
    #[error("invalid color format: {0}")]
    InvalidFormat(String),
    /// The string has the right length but is not hexadecimal.
    #[error("invalid color value: {0}")]
    InvalidValue(String),
}

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color {
    /// Create a new color from individual components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a color in `RRGGBBAA` order, with an optional leading `#`.
    ///
    /// Hex digits are case-insensitive and surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// - [`ColorError::InvalidFormat`] if there are not exactly 8 characters
    ///   after the prefix
    /// - [`ColorError::InvalidValue`] if any of them is not a hex digit
    ///
    /// # Examples
    ///
    /// ```
    /// # use border_shimmer::color::Color;
    /// assert_eq!(Color::parse("#FF800080").unwrap(), Color::new(255, 128, 0, 128));
    /// assert_eq!(Color::parse("ff800080").unwrap(), Color::new(255, 128, 0, 128));
    /// ```
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);

        if digits.chars().count() != HEX_DIGITS {
            return Err(ColorError::InvalidFormat(digits.to_string()));
        }
        // from_str_radix tolerates a leading sign, the format does not
        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidValue(digits.to_string()));
        }
        let val = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorError::InvalidValue(digits.to_string()))?;

        let [r, g, b, a] = val.to_be_bytes();
        Ok(Self::new(r, g, b, a))
    }

    /// Linearly interpolate towards `other`.
    ///
    /// Each channel is computed as `self * (1 - t) + other * t` and the
    /// fractional part is dropped, not rounded. A channel equal on both sides
    /// is kept as is, since the float sum can land just below it: `29` at
    /// `t = 3/7` stays `29` where the bare formula gives `28`. Only such
    /// channels differ from the plain truncating formula. `t` is
    /// expected in `0.0..=1.0` but is not checked; out of range results
    /// saturate at the channel bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use border_shimmer::color::Color;
    /// let red = Color::new(255, 0, 0, 255);
    /// let blue = Color::new(0, 0, 255, 255);
    /// assert_eq!(red.interpolate(blue, 0.5), Color::new(127, 0, 127, 255));
    /// ```
    #[must_use]
    pub fn interpolate(self, other: Self, t: f64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mix = |from: u8, to: u8| {
            if from == to {
                return from;
            }
            (f64::from(from) * (1.0 - t) + f64::from(to) * t) as u8
        };

        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Encode as `0xAARRGGBB`, uppercase, alpha first.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse a list of color strings, stopping at the first invalid one.
///
/// # Errors
///
/// Returns the [`ColorError`] of the first color that fails to parse.
pub fn parse_colors<S: AsRef<str>>(colors: &[S]) -> Result<Vec<Color>, ColorError> {
    colors.iter().map(|c| Color::parse(c.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RED: Color = Color::new(255, 0, 0, 255);
    const BLUE: Color = Color::new(0, 0, 255, 255);

    #[test]
    fn test_parse_hex() -> Result<(), ColorError> {
        assert_eq!(Color::parse("#000000FF")?, Color::new(0, 0, 0, 255));
        assert_eq!(Color::parse("#FF0000FF")?, RED);
        assert_eq!(Color::parse("#0000ffff")?, BLUE);
        assert_eq!(Color::parse("AbC12380")?, Color::new(171, 193, 35, 128));
        assert_eq!(Color::parse("#00112233")?, Color::new(0, 17, 34, 51));
        assert_eq!(Color::parse("  #FF0000FF  ")?, RED);
        Ok(())
    }

    #[rstest]
    #[case("#FF0000")]
    #[case("FF0000FF00")]
    #[case("")]
    #[case("#")]
    #[case("##FF0000FF")]
    fn test_parse_invalid_format(#[case] input: &str) {
        assert!(matches!(
            Color::parse(input),
            Err(ColorError::InvalidFormat(_))
        ));
    }

    #[rstest]
    #[case("#GG0000FF")]
    #[case("+FF0000F")]
    #[case("0x00FF00")]
    #[case("FF 000FF")]
    fn test_parse_invalid_value(#[case] input: &str) {
        assert!(matches!(
            Color::parse(input),
            Err(ColorError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_encode_alpha_first() {
        assert_eq!(RED.to_hex(), "0xFFFF0000");
        assert_eq!(BLUE.to_hex(), "0xFF0000FF");
        assert_eq!(Color::new(1, 2, 3, 4).to_hex(), "0x04010203");
        assert_eq!(Color::new(0xab, 0xcd, 0xef, 0x00).to_string(), "0x00ABCDEF");
    }

    #[test]
    fn test_parse_then_encode_is_canonical() -> Result<(), ColorError> {
        for (input, expected) in [
            ("#ff8000c0", "0xC0FF8000"),
            ("4B0082FF", "0xFF4B0082"),
            ("#00000000", "0x00000000"),
            ("#FFFFFFFF", "0xFFFFFFFF"),
        ] {
            assert_eq!(input.parse::<Color>()?.to_hex(), expected);
        }
        Ok(())
    }

    #[test]
    fn test_interpolate_bounds() {
        assert_eq!(RED.interpolate(BLUE, 0.0), RED);
        assert_eq!(RED.interpolate(BLUE, 1.0), BLUE);
        let odd = Color::new(3, 77, 129, 201);
        let other = Color::new(250, 1, 64, 17);
        assert_eq!(odd.interpolate(other, 0.0), odd);
        assert_eq!(odd.interpolate(other, 1.0), other);
    }

    #[test]
    fn test_interpolate_identity() {
        let c = Color::new(17, 128, 254, 99);
        for step in 0..=10 {
            let t = f64::from(step) / 10.0;
            assert_eq!(c.interpolate(c, t), c);
        }
        // 29 * 4/7 + 29 * 3/7 sums to 28.999...
        let c = Color::new(29, 31, 58, 225);
        assert_eq!(c.interpolate(c, 3.0 / 7.0), c);
    }

    #[test]
    fn test_interpolate_truncates() {
        // 255 * 0.5 = 127.5, dropped to 127
        assert_eq!(RED.interpolate(BLUE, 0.5), Color::new(127, 0, 127, 255));
        assert_eq!(RED.interpolate(BLUE, 0.5).to_hex(), "0xFF7F007F");
        // 10 * 2/3 = 6.67 -> 6, 10 * 1/3 = 3.33 -> 3
        let c1 = Color::new(10, 0, 0, 0);
        let c2 = Color::new(0, 10, 0, 0);
        assert_eq!(c1.interpolate(c2, 1.0 / 3.0), Color::new(6, 3, 0, 0));
    }

    #[test]
    fn test_parse_colors() -> Result<(), ColorError> {
        assert_eq!(parse_colors(&["#FF0000FF", "#0000FFFF"])?, vec![RED, BLUE]);
        assert_eq!(
            parse_colors(&["#FF0000FF", "nope"]),
            Err(ColorError::InvalidFormat("nope".to_string()))
        );
        assert!(parse_colors::<&str>(&[])?.is_empty());
        Ok(())
    }
}
