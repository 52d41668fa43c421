// Color values and continuous color scales shared by the shaper and the chart backends

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LaptraceError;

/// An opaque RGB color. Serialized as a `#rrggbb` string, parsed from either a
/// hex string or one of a handful of CSS color names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("white", Color::rgb(255, 255, 255)),
    ("black", Color::rgb(0, 0, 0)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("orange", Color::rgb(255, 165, 0)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("lightgray", Color::rgb(211, 211, 211)),
    ("cornflowerblue", Color::rgb(100, 149, 237)),
];

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const CORNFLOWER_BLUE: Color = Color::rgb(100, 149, 237);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors, `t` is clamped to 0..=1
    pub fn lerp(self, end: Color, t: f64) -> Color {
        let t = t.clamp(0., 1.);
        let channel =
            |start: u8, end: u8| (start as f64 + t * (end as f64 - start as f64)).round() as u8;
        Color::rgb(
            channel(self.r, end.r),
            channel(self.g, end.g),
            channel(self.b, end.b),
        )
    }
}

impl FromStr for Color {
    type Err = LaptraceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || LaptraceError::InvalidColor {
            value: value.to_string(),
        };

        if let Some(hex) = trimmed.strip_prefix('#') {
            let expanded: String = match hex.len() {
                3 => hex.chars().flat_map(|c| [c, c]).collect(),
                6 => hex.to_string(),
                _ => return Err(invalid()),
            };
            let channel = |range: std::ops::Range<usize>| {
                expanded
                    .get(range)
                    .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                    .ok_or_else(invalid)
            };
            return Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }

        let lower = trimmed.to_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, color)| *color)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Color {
    type Error = LaptraceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<Color> for egui::Color32 {
    fn from(value: Color) -> Self {
        egui::Color32::from_rgb(value.r, value.g, value.b)
    }
}

const VIRIDIS_STOPS: [Color; 10] = [
    Color::rgb(0x44, 0x01, 0x54),
    Color::rgb(0x48, 0x28, 0x78),
    Color::rgb(0x3e, 0x49, 0x89),
    Color::rgb(0x31, 0x68, 0x8e),
    Color::rgb(0x26, 0x82, 0x8e),
    Color::rgb(0x1f, 0x9e, 0x89),
    Color::rgb(0x35, 0xb7, 0x79),
    Color::rgb(0x6e, 0xce, 0x58),
    Color::rgb(0xb5, 0xde, 0x2b),
    Color::rgb(0xfd, 0xe7, 0x25),
];

const PLASMA_STOPS: [Color; 10] = [
    Color::rgb(0x0d, 0x08, 0x87),
    Color::rgb(0x46, 0x03, 0x9f),
    Color::rgb(0x72, 0x01, 0xa8),
    Color::rgb(0x9c, 0x17, 0x9e),
    Color::rgb(0xbd, 0x37, 0x86),
    Color::rgb(0xd8, 0x57, 0x6b),
    Color::rgb(0xed, 0x79, 0x53),
    Color::rgb(0xfb, 0x9f, 0x3a),
    Color::rgb(0xfd, 0xca, 0x26),
    Color::rgb(0xf0, 0xf9, 0x21),
];

/// Continuous color scales used to paint track maps by a numeric channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
pub enum ColorScale {
    Viridis,
    #[default]
    Plasma,
}

impl ColorScale {
    fn stops(&self) -> &'static [Color] {
        match self {
            Self::Viridis => &VIRIDIS_STOPS,
            Self::Plasma => &PLASMA_STOPS,
        }
    }

    /// Color at position `t` in 0..=1, interpolated between the scale stops
    pub fn sample(&self, t: f64) -> Color {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0., 1.) } else { 0. };
        let position = t * (stops.len() - 1) as f64;
        let lower = position.floor() as usize;
        if lower >= stops.len() - 1 {
            return stops[stops.len() - 1];
        }
        stops[lower].lerp(stops[lower + 1], position - lower as f64)
    }

    /// Color for `value` mapped linearly from `min..=max` onto the scale
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> Color {
        let span = max - min;
        if span <= 0. || !span.is_finite() {
            return self.sample(0.5);
        }
        self.sample((value - min) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!("#fc4432".parse::<Color>().unwrap(), Color::rgb(252, 68, 50));
        assert_eq!("#FFF".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!(" #1788ff ".parse::<Color>().unwrap(), Color::rgb(23, 136, 255));
    }

    #[test]
    fn test_parse_named_colors() {
        assert_eq!("white".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!(
            "CornflowerBlue".parse::<Color>().unwrap(),
            Color::CORNFLOWER_BLUE
        );
    }

    #[test]
    fn test_parse_invalid_colors() {
        for value in ["", "#12345", "#gg0000", "not-a-color"] {
            match value.parse::<Color>() {
                Err(LaptraceError::InvalidColor { value: v }) => assert_eq!(v, value),
                other => panic!("Expected InvalidColor for {value:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_color_serializes_as_hex() {
        let json = serde_json::to_string(&Color::rgb(54, 113, 198)).unwrap();
        assert_eq!(json, "\"#3671c6\"");
        let parsed: Color = serde_json::from_str("\"#3671C6\"").unwrap();
        assert_eq!(parsed, Color::rgb(54, 113, 198));
    }

    #[test]
    fn test_lerp() {
        let black = Color::rgb(0, 0, 0);
        assert_eq!(black.lerp(Color::WHITE, 0.), black);
        assert_eq!(black.lerp(Color::WHITE, 1.), Color::WHITE);
        assert_eq!(black.lerp(Color::WHITE, 0.5), Color::rgb(128, 128, 128));
        assert_eq!(black.lerp(Color::WHITE, 7.), Color::WHITE);
    }

    #[test]
    fn test_color_scale_endpoints() {
        assert_eq!(ColorScale::Viridis.sample(0.), VIRIDIS_STOPS[0]);
        assert_eq!(ColorScale::Viridis.sample(1.), VIRIDIS_STOPS[9]);
        assert_eq!(ColorScale::Plasma.sample(-3.), PLASMA_STOPS[0]);
        assert_eq!(ColorScale::Plasma.sample(f64::NAN), PLASMA_STOPS[0]);
    }

    #[test]
    fn test_color_for_maps_range() {
        let scale = ColorScale::Plasma;
        assert_eq!(scale.color_for(100., 100., 300.), PLASMA_STOPS[0]);
        assert_eq!(scale.color_for(300., 100., 300.), PLASMA_STOPS[9]);
        // flat range falls back to the middle of the scale
        assert_eq!(scale.color_for(5., 5., 5.), scale.sample(0.5));
    }
}
