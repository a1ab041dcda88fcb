//! Style model: colors, paints, sparse text styles and paragraph styles.

mod color;
mod paragraph;
mod text;

pub use color::{Color, Paint, PaintStyle};
pub use paragraph::{ParagraphStyle, StrutStyle, TextAlign, TextDirection, TextHeightBehavior};
pub use text::{
    DecorationStyle, FontFamilies, FontFeature, FontSlant, FontStyle, FontVariation, Shadow,
    TextBaseline, TextDecoration, TextStyle,
};
