//! Sparse text style
//!
//! Only fields that were explicitly provided are set. Composition is additive:
//! a nested style overlays the inherited one field by field via
//! [`TextStyle::merge`], never as a full overwrite.

use std::ops::{BitOr, BitOrAssign};

use compact_str::CompactString;
use smallvec::SmallVec;

use super::color::Color;

// =============================================================================
// Decoration
// =============================================================================

/// Set of text decoration lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextDecoration(u8);

impl TextDecoration {
    pub const NONE: Self = Self(0);
    pub const UNDERLINE: Self = Self(1);
    pub const OVERLINE: Self = Self(2);
    pub const LINE_THROUGH: Self = Self(4);

    /// Raw bit representation
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every line in `other` is set
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TextDecoration {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TextDecoration {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Line style of text decorations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecorationStyle {
    #[default]
    Solid,
    Double,
    Dotted,
    Dashed,
    Wavy,
}

impl_str_enum!(DecorationStyle, "decorationStyle" {
    Solid => "solid",
    Double => "double",
    Dotted => "dotted",
    Dashed => "dashed",
    Wavy => "wavy",
});

/// Baseline used to align runs of different fonts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Ideographic,
}

impl_str_enum!(TextBaseline, "textBaseline" {
    Alphabetic => "alphabetic",
    Ideographic => "ideographic",
});

// =============================================================================
// Font selection
// =============================================================================

/// Upright / italic / oblique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontSlant {
    #[default]
    Upright,
    Italic,
    Oblique,
}

impl_str_enum!(FontSlant, "fontSlant" {
    Upright => "upright",
    Italic => "italic",
    Oblique => "oblique",
});

/// Weight, width and slant of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontStyle {
    /// CSS weight, 100–900
    pub weight: u16,
    /// Width class, 1 (ultra condensed) – 9 (ultra expanded)
    pub width: u8,
    pub slant: FontSlant,
}

impl FontStyle {
    pub const NORMAL: Self = Self::new(400, 5, FontSlant::Upright);
    pub const BOLD: Self = Self::new(700, 5, FontSlant::Upright);
    pub const ITALIC: Self = Self::new(400, 5, FontSlant::Italic);
    pub const BOLD_ITALIC: Self = Self::new(700, 5, FontSlant::Italic);

    pub const fn new(weight: u16, width: u8, slant: FontSlant) -> Self {
        Self { weight, width, slant }
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// OpenType feature setting, e.g. `("smcp", 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFeature {
    pub name: CompactString,
    pub value: i32,
}

impl FontFeature {
    pub fn new(name: impl Into<CompactString>, value: i32) -> Self {
        Self { name: name.into(), value }
    }
}

/// Variable-font axis setting, e.g. `("wght", 550.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontVariation {
    pub axis: CompactString,
    pub value: f32,
}

impl FontVariation {
    pub fn new(axis: impl Into<CompactString>, value: f32) -> Self {
        Self { axis: axis.into(), value }
    }
}

/// Text shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub dx: f32,
    pub dy: f32,
    pub blur_radius: f32,
}

/// Ordered list of font family names.
pub type FontFamilies = SmallVec<[CompactString; 2]>;

// =============================================================================
// TextStyle
// =============================================================================

sparse_style! {
    /// Sparse text style; unset fields inherit from the enclosing scope.
    pub struct TextStyle {
        color: Color,
        decoration: TextDecoration,
        decoration_color: Color,
        decoration_thickness: f32,
        decoration_style: DecorationStyle,
        font_families: FontFamilies,
        font_features: Vec<FontFeature>,
        font_size: f32,
        font_style: FontStyle,
        font_variations: Vec<FontVariation>,
        height_multiplier: f32,
        half_leading: bool,
        letter_spacing: f32,
        locale: CompactString,
        shadows: Vec<Shadow>,
        word_spacing: f32,
        background_color: Color,
        foreground_color: Color,
        text_baseline: TextBaseline,
    }
}

impl TextStyle {
    /// Set the font family list from names.
    pub fn with_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.font_families = Some(families.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoration_bits() {
        let deco = TextDecoration::UNDERLINE | TextDecoration::LINE_THROUGH;
        assert!(deco.contains(TextDecoration::UNDERLINE));
        assert!(!deco.contains(TextDecoration::OVERLINE));
        assert_eq!(deco.bits(), 5);
        assert!(TextDecoration::NONE.is_none());
    }

    #[test]
    fn test_merge_is_additive() {
        let inherited = TextStyle::new()
            .with_font_size(16.0)
            .with_color(Color::BLACK)
            .with_families(["Roboto"]);
        let span = TextStyle::new().with_color(Color::WHITE);

        let effective = inherited.merged(&span);
        assert_eq!(effective.color, Some(Color::WHITE));
        assert_eq!(effective.font_size, Some(16.0));
        assert_eq!(effective.font_families.as_ref().map(|f| f.len()), Some(1));

        // merging an empty style is the identity
        assert_eq!(inherited.merged(&TextStyle::new()), inherited);
    }

    #[test]
    fn test_enum_keys() {
        assert_eq!("wavy".parse::<DecorationStyle>().unwrap(), DecorationStyle::Wavy);
        assert_eq!(TextBaseline::Ideographic.to_string(), "ideographic");
        assert!("bold".parse::<FontSlant>().is_err());
    }
}
