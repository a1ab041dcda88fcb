//! Prelude module for common imports.
//!
//! ```ignore
//! use canvas_dom::prelude::*;
//! ```

// Backend traits
pub use crate::backend::{
    Backend, Canvas, ContourMeasure, Font, GlyphId, Paragraph, ParagraphBuilder, RsxForm,
};

// Scene
pub use crate::scene::{DrawingContext, Scene};

// Nodes
pub use crate::node::{
    DeclarationKind, GroupProps, Node, NodeType, PathSource, Props, SpanProps, TextPathProps,
    TextProps,
};

// Identity
pub use crate::id::NodeId;

// Algorithms
pub use crate::paragraph::{ScopeStats, compose_spans};
pub use crate::placement::{Placement, place_glyphs};
pub use crate::span::Span;

// Styles
pub use crate::style::{
    Color, FontStyle, Paint, ParagraphStyle, StrutStyle, TextAlign, TextDecoration,
    TextDirection, TextStyle,
};

// Config
pub use crate::config::{RenderConfig, SpanScopePolicy};

// Error
pub use crate::error::{DrawError, DrawResult};
