//! canvas-dom - Declarative scene nodes that compile props into draw calls
//!
//! ## Core Concepts
//!
//! **Drawing vs. declaration nodes**: drawing nodes (`Group`, `Text`,
//! `TextPath`) issue backend calls; declaration nodes (`Span`) are pulled by a
//! drawing ancestor into plain values.
//!
//! **Derived-state cache**: every drawing node derives an expensive value from
//! its props (a paragraph style, a placed glyph run) once per props version.
//! The version moves only when replacement props differ by value.
//!
//! ## Modules
//! - `scene`: node arena, tree wiring, derive/draw/render passes
//! - `node`: node kinds, props and the drawing-node base
//! - `paragraph`: span tree to paragraph-builder composition
//! - `placement`: glyph placement along path contours
//! - `measure`: kurbo-based contour measurement
//! - `backend`: drawing backend capability traits
//! - `style`: colors, paints, sparse text and paragraph styles
//!
//! ## Usage
//!
//! ```ignore
//! use canvas_dom::prelude::*;
//! use canvas_dom::backend::recording::RecordingBackend;
//!
//! let mut scene = Scene::with_backend(RecordingBackend::new());
//! let text = scene.create(TextProps::new(200.0).at(10.0, 20.0));
//! let span = scene.create(SpanProps::text("Hi"));
//! scene.append_child(text, span)?;
//!
//! let mut canvas = scene.backend().canvas();
//! let mut ctx = DrawingContext::new(&mut canvas, &());
//! scene.render(text, &mut ctx)?;
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Modules
// =============================================================================

/// Drawing backend capability traits
pub mod backend;

/// Scene-wide configuration
pub mod config;

/// Error types
pub mod error;

/// Node identity
pub mod id;

/// Contour measurement on kurbo paths
pub mod measure;

/// Node kinds and the drawing-node base
pub mod node;

/// Span tree composition
pub mod paragraph;

/// Glyph placement along a path
pub mod placement;

/// Prelude for common imports
pub mod prelude;

/// Node arena and draw passes
pub mod scene;

/// Materialized span values
pub mod span;

/// Colors, paints and text styles
pub mod style;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{Backend, Canvas, ContourMeasure, Font, Paragraph, ParagraphBuilder, RsxForm};
pub use config::{RenderConfig, SpanScopePolicy};
pub use error::{DrawError, DrawResult};
pub use id::NodeId;
pub use node::{DeclarationKind, Node, NodeType, Props};
pub use paragraph::{ScopeStats, compose_spans};
pub use placement::{GlyphPlacement, Placement, place_glyphs};
pub use scene::{DrawingContext, Scene};
pub use span::{Span, SpanContent};
