//! Paragraph composition from span trees
//!
//! Spans are walked depth-first. A span with a paint override opens a paint
//! scope, a span with only a style override opens a style scope, anything else
//! opens nothing. Scopes are [`Scope`] guards that pop on drop, so every push is
//! paired with exactly one pop regardless of how the walk exits.
//!
//! Each pushed style is the *effective* style: the inherited chain with the
//! span's sparse style overlaid. Unset fields therefore never clobber what an
//! outer span or the paragraph's root style set.

use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;

use crate::backend::ParagraphBuilder;
use crate::config::SpanScopePolicy;
use crate::span::{Span, SpanContent};
use crate::style::TextStyle;

// =============================================================================
// ScopeStats
// =============================================================================

/// Counters from one composition pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeStats {
    pub pushed: usize,
    pub popped: usize,
    pub max_depth: usize,
    pub text_runs: usize,
}

impl ScopeStats {
    /// Every push has been popped.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.pushed == self.popped
    }
}

// =============================================================================
// ScopeStack
// =============================================================================

/// Explicit style stack over a paragraph builder.
pub struct ScopeStack<'b, Bd: ParagraphBuilder> {
    builder: &'b mut Bd,
    /// Effective styles; bottom is the paragraph root style
    styles: SmallVec<[TextStyle; 8]>,
    policy: SpanScopePolicy,
    stats: ScopeStats,
}

impl<'b, Bd: ParagraphBuilder> ScopeStack<'b, Bd> {
    pub fn new(builder: &'b mut Bd, root: &TextStyle, policy: SpanScopePolicy) -> Self {
        let mut styles = SmallVec::new();
        styles.push(root.clone());
        Self {
            builder,
            styles,
            policy,
            stats: ScopeStats::default(),
        }
    }

    /// Style in effect at the current depth.
    pub fn current_style(&self) -> &TextStyle {
        // The root entry is never popped.
        &self.styles[self.styles.len() - 1]
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.styles.len() - 1
    }

    pub fn stats(&self) -> ScopeStats {
        self.stats
    }

    /// Open the scope `span` asks for, if any.
    pub fn enter<'s>(&'s mut self, span: &Span) -> Scope<'s, 'b, Bd> {
        let effective = |stack: &Self, drop_style: bool| match &span.style {
            Some(style) if !drop_style => stack.current_style().merged(style),
            _ => stack.current_style().clone(),
        };

        let pushed = if span.has_paint() {
            let style = effective(&*self, self.policy == SpanScopePolicy::PaintOnly);
            self.builder
                .push_paint_style(&style, span.foreground.as_ref(), span.background.as_ref());
            self.styles.push(style);
            true
        } else if span.style.is_some() {
            let style = effective(&*self, false);
            self.builder.push_style(&style);
            self.styles.push(style);
            true
        } else {
            false
        };

        if pushed {
            self.stats.pushed += 1;
            self.stats.max_depth = self.stats.max_depth.max(self.depth());
        }
        Scope { stack: self, pushed }
    }

    /// Append a text run in the current scope.
    pub fn add_text(&mut self, text: &str) {
        self.builder.add_text(text);
        self.stats.text_runs += 1;
    }

    fn pop(&mut self) {
        self.builder.pop();
        self.styles.pop();
        self.stats.popped += 1;
    }
}

// =============================================================================
// Scope guard
// =============================================================================

/// Guard for one span's scope; pops on drop when it pushed.
pub struct Scope<'s, 'b, Bd: ParagraphBuilder> {
    stack: &'s mut ScopeStack<'b, Bd>,
    pushed: bool,
}

impl<Bd: ParagraphBuilder> Scope<'_, '_, Bd> {
    /// Whether this guard opened a builder scope.
    pub fn is_pushed(&self) -> bool {
        self.pushed
    }
}

impl<'b, Bd: ParagraphBuilder> Deref for Scope<'_, 'b, Bd> {
    type Target = ScopeStack<'b, Bd>;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl<Bd: ParagraphBuilder> DerefMut for Scope<'_, '_, Bd> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl<Bd: ParagraphBuilder> Drop for Scope<'_, '_, Bd> {
    fn drop(&mut self) {
        if self.pushed {
            self.stack.pop();
        }
    }
}

// =============================================================================
// compose_spans
// =============================================================================

/// Feed `spans` into `builder` under the paragraph's root style.
pub fn compose_spans<Bd: ParagraphBuilder>(
    builder: &mut Bd,
    root: &TextStyle,
    spans: &[Span],
    policy: SpanScopePolicy,
) -> ScopeStats {
    let mut stack = ScopeStack::new(builder, root, policy);
    walk(&mut stack, spans);
    stack.stats()
}

fn walk<Bd: ParagraphBuilder>(stack: &mut ScopeStack<'_, Bd>, spans: &[Span]) {
    for span in spans {
        let mut scope = stack.enter(span);
        match span.content() {
            SpanContent::Text(text) => scope.add_text(text),
            SpanContent::Children(children) => walk(&mut scope, children),
            SpanContent::Empty => {}
        }
    }
}
