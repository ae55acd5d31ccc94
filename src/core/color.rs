use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// RGBA pixel value, 8 bits per channel
#[repr(C)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Fully transparent black
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from hue, saturation and value, each in [0, 1].
    /// Hue wraps, so 1.0 and -1.0 are both red.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let sector = h * 6.0;
        // Channel n sits n sectors ahead of red's peak
        let channel = |n: f32| {
            let k = (n + sector).rem_euclid(6.0);
            v - v * s * k.min(4.0 - k).clamp(0.0, 1.0)
        };
        Self::from_f32([channel(5.0), channel(3.0), channel(1.0), 1.0])
    }

    /// Build from normalized channels; values are clamped to [0, 1]
    pub fn from_f32(channels: [f32; 4]) -> Self {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(
            to_u8(channels[0]),
            to_u8(channels[1]),
            to_u8(channels[2]),
            to_u8(channels[3]),
        )
    }

    /// Normalized channels in [0, 1]
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{0}': expected #RRGGBB or #RRGGBBAA")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let err = || ParseColorError(s.to_string());

        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(err());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };

        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::RED);
        assert_eq!(Color::from_hsv(1.0 / 3.0, 1.0, 1.0), Color::GREEN);
        assert_eq!(Color::from_hsv(2.0 / 3.0, 1.0, 1.0), Color::BLUE);
        assert_eq!(Color::from_hsv(0.5, 0.0, 0.0), Color::BLACK);
    }

    #[test]
    fn test_from_hsv_secondaries() {
        assert_eq!(Color::from_hsv(1.0 / 6.0, 1.0, 1.0), Color::rgb(255, 255, 0));
        assert_eq!(Color::from_hsv(0.5, 1.0, 1.0), Color::rgb(0, 255, 255));
        assert_eq!(Color::from_hsv(5.0 / 6.0, 1.0, 1.0), Color::rgb(255, 0, 255));
    }

    #[test]
    fn test_from_hsv_grey_and_wrap() {
        assert_eq!(Color::from_hsv(0.7, 0.0, 0.5), Color::rgb(128, 128, 128));
        assert_eq!(Color::from_hsv(1.0, 1.0, 1.0), Color::RED);
        assert_eq!(Color::from_hsv(-1.0 / 3.0, 1.0, 1.0), Color::BLUE);
        assert_eq!(Color::from_hsv(0.0, 1.0, 0.5), Color::rgb(128, 0, 0));
    }

    #[test]
    fn test_default_is_opaque_black() {
        assert_eq!(Color::default(), Color::rgba(0, 0, 0, 255));
    }

    #[test]
    fn test_f32_clamps() {
        let color = Color::from_f32([2.0, -1.0, 0.5, 1.0]);
        assert_eq!(color, Color::rgba(255, 0, 128, 255));
        assert_eq!(Color::WHITE.to_f32(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#FF8000".parse::<Color>(), Ok(Color::rgb(255, 128, 0)));
        assert_eq!("10203040".parse::<Color>(), Ok(Color::rgba(0x10, 0x20, 0x30, 0x40)));
        assert!("#GG0000".parse::<Color>().is_err());
        assert!("#FFF".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        let color = Color::rgba(1, 2, 254, 100);
        assert_eq!(color.to_string().parse::<Color>(), Ok(color));
    }
}
