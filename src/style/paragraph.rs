//! Paragraph-level layout configuration

use compact_str::CompactString;

use super::text::{FontFamilies, FontStyle, TextStyle};

// =============================================================================
// Enums
// =============================================================================

/// Horizontal alignment of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
    Center,
    Justify,
    #[default]
    Start,
    End,
}

impl_str_enum!(TextAlign, "textAlign" {
    Left => "left",
    Right => "right",
    Center => "center",
    Justify => "justify",
    Start => "start",
    End => "end",
});

/// Base direction of the paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextDirection {
    Rtl,
    #[default]
    Ltr,
}

impl_str_enum!(TextDirection, "textDirection" {
    Rtl => "rtl",
    Ltr => "ltr",
});

/// Whether the height multiplier applies to the first ascent / last descent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextHeightBehavior {
    #[default]
    All,
    DisableFirstAscent,
    DisableLastDescent,
    DisableAll,
}

impl_str_enum!(TextHeightBehavior, "textHeightBehavior" {
    All => "all",
    DisableFirstAscent => "disableFirstAscent",
    DisableLastDescent => "disableLastDescent",
    DisableAll => "disableAll",
});

// =============================================================================
// StrutStyle
// =============================================================================

sparse_style! {
    /// Minimum line metrics applied to every line of a paragraph.
    pub struct StrutStyle {
        font_families: FontFamilies,
        font_style: FontStyle,
        font_size: f32,
        height_multiplier: f32,
        leading: f32,
        half_leading: bool,
        strut_enabled: bool,
        force_strut_height: bool,
    }
}

// =============================================================================
// ParagraphStyle
// =============================================================================

/// Paragraph layout configuration plus the root text style.
///
/// Unset fields are left to the backend's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphStyle {
    pub disable_hinting: Option<bool>,
    pub ellipsis: Option<CompactString>,
    pub height_multiplier: Option<f32>,
    pub max_lines: Option<u32>,
    pub strut_style: Option<StrutStyle>,
    pub text_align: Option<TextAlign>,
    pub text_direction: Option<TextDirection>,
    pub text_height_behavior: Option<TextHeightBehavior>,
    /// Root style every span inherits from
    pub text_style: TextStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_keys_roundtrip_all_variants() {
        for align in TextAlign::ALL {
            assert_eq!(align.key().parse::<TextAlign>().unwrap(), *align);
        }
        for behavior in TextHeightBehavior::ALL {
            assert_eq!(behavior.key().parse::<TextHeightBehavior>().unwrap(), *behavior);
        }
        assert_eq!("rtl".parse::<TextDirection>().unwrap(), TextDirection::Rtl);
    }

    #[test]
    fn test_unknown_key() {
        let err = "middle".parse::<TextAlign>().unwrap_err();
        assert_eq!(err.to_string(), "unknown textAlign value: \"middle\"");
    }
}
