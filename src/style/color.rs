//! Colors and paints
//!
//! Colors arrive from the UI layer either as typed values or as CSS-like
//! strings; both end up as straight-alpha RGBA with `f32` channels.

use std::str::FromStr;

use crate::error::DrawError;

// =============================================================================
// Color
// =============================================================================

/// Straight-alpha RGBA color, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from float channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Convert to 8-bit channels (rounded).
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Same color with alpha multiplied by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: (self.a * opacity).clamp(0.0, 1.0),
            ..self
        }
    }

    fn named(name: &str) -> Option<Self> {
        let rgb = match name {
            "transparent" => return Some(Self::TRANSPARENT),
            "black" => (0, 0, 0),
            "white" => (255, 255, 255),
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "lime" => (0, 255, 0),
            "blue" => (0, 0, 255),
            "yellow" => (255, 255, 0),
            "cyan" | "aqua" => (0, 255, 255),
            "magenta" | "fuchsia" => (255, 0, 255),
            "gray" | "grey" => (128, 128, 128),
            "silver" => (192, 192, 192),
            "orange" => (255, 165, 0),
            "purple" => (128, 0, 128),
            "navy" => (0, 0, 128),
            "teal" => (0, 128, 128),
            "maroon" => (128, 0, 0),
            "olive" => (128, 128, 0),
            "pink" => (255, 192, 203),
            _ => return None,
        };
        Some(Self::from_rgba8(rgb.0, rgb.1, rgb.2, 255))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
            4 => Some(Self::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// `rgb(r, g, b)` / `rgba(r, g, b, a)` with 0–255 channels and 0–1 alpha.
    fn parse_functional(s: &str) -> Option<Self> {
        let (args, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else {
            (s.strip_prefix("rgb(")?.strip_suffix(')')?, false)
        };
        let parts: Vec<f32> = args
            .split(',')
            .map(|p| p.trim().parse::<f32>())
            .collect::<Result<_, _>>()
            .ok()?;
        let channel = |v: f32| (v.clamp(0.0, 255.0)) / 255.0;
        match (parts.as_slice(), has_alpha) {
            ([r, g, b], false) => Some(Self::new(channel(*r), channel(*g), channel(*b), 1.0)),
            ([r, g, b, a], true) => Some(Self::new(
                channel(*r),
                channel(*g),
                channel(*b),
                a.clamp(0.0, 1.0),
            )),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let parsed = match lower.strip_prefix('#') {
            Some(hex) => Self::parse_hex(hex),
            None => Self::named(&lower).or_else(|| Self::parse_functional(&lower)),
        };
        parsed.ok_or_else(|| DrawError::InvalidColor(s.to_string()))
    }
}

// =============================================================================
// Paint
// =============================================================================

/// Fill or stroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

/// Paint handed to the drawing backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub anti_alias: bool,
}

impl Paint {
    /// Anti-aliased fill paint of the given color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            anti_alias: true,
        }
    }

    /// Stroke paint of the given color and width.
    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            style: PaintStyle::Stroke,
            stroke_width: width,
            ..Self::new(color)
        }
    }

    /// Replace the color.
    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    /// Multiply the paint alpha by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            color: self.color.with_opacity(opacity),
            ..self
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#ff0000".parse::<Color>().unwrap().to_rgba8(), [255, 0, 0, 255]);
        assert_eq!("#0f08".parse::<Color>().unwrap().to_rgba8(), [0, 255, 0, 136]);
        assert_eq!("#12345678".parse::<Color>().unwrap().to_rgba8(), [0x12, 0x34, 0x56, 0x78]);
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_hex_rejects_signs() {
        for input in ["#+f+f+f", "#+fff", "#+1+2+3+4"] {
            let err = input.parse::<Color>().unwrap_err();
            assert!(matches!(err, DrawError::InvalidColor(ref s) if s == input));
        }
    }

    #[test]
    fn test_parse_named_and_functional() {
        assert_eq!("Red".parse::<Color>().unwrap().to_rgba8(), [255, 0, 0, 255]);
        assert_eq!("transparent".parse::<Color>().unwrap(), Color::TRANSPARENT);
        assert_eq!(
            "rgba(0, 0, 255, 0.5)".parse::<Color>().unwrap().to_rgba8(),
            [0, 0, 255, 128]
        );
        assert_eq!("rgb(10,20,30)".parse::<Color>().unwrap().to_rgba8(), [10, 20, 30, 255]);
        assert!("rgb(1,2)".parse::<Color>().is_err());
        assert!("notacolor".parse::<Color>().is_err());
    }

    #[test]
    fn test_paint_opacity() {
        let paint = Paint::new(Color::WHITE).with_opacity(0.25);
        assert_eq!(paint.color.a, 0.25);
        assert_eq!(paint.style, PaintStyle::Fill);
        let stroke = Paint::stroke(Color::BLACK, 2.0);
        assert_eq!(stroke.stroke_width, 2.0);
    }
}
