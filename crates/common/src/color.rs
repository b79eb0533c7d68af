//! Color representation used by the scratchpad themes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color with 8-bit components.
///
/// Serialized as a hex string (`"#rrggbb"` or `"#rrggbbaa"`), the form used
/// by severity color overrides in configuration files and on the command
/// line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    // Palette of the scratchpad's dark look.
    pub const GRAY_100: Color = Color::rgb(243, 244, 246);
    pub const GRAY_200: Color = Color::rgb(229, 231, 235);
    pub const GRAY_300: Color = Color::rgb(209, 213, 219);
    pub const GRAY_500: Color = Color::rgb(107, 114, 128);
    pub const GRAY_700: Color = Color::rgb(55, 65, 81);
    pub const GRAY_800: Color = Color::rgb(31, 41, 55);
    pub const GRAY_900: Color = Color::rgb(17, 24, 39);
    pub const RED_400: Color = Color::rgb(248, 113, 113);
    pub const RED_600: Color = Color::rgb(220, 38, 38);
    pub const YELLOW_400: Color = Color::rgb(250, 204, 21);
    pub const BLUE_400: Color = Color::rgb(96, 165, 250);
    pub const GREEN_600: Color = Color::rgb(22, 163, 74);
    pub const CYAN_400: Color = Color::rgb(34, 211, 238);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse color from hex string (e.g., "#ff0000", "#f00", "#ff000080").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Hex form, omitting the alpha byte when the color is opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Lighten or darken the color.
    pub fn adjust_lightness(&self, factor: f32) -> Color {
        let adjust = |c: u8| -> u8 {
            if factor > 0.0 {
                (c as f32 + (255.0 - c as f32) * factor).min(255.0) as u8
            } else {
                (c as f32 * (1.0 + factor)).max(0.0) as u8
            }
        };

        Color::rgba(adjust(self.r), adjust(self.g), adjust(self.b), self.a)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid hex color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
