//! Scene arena
//!
//! A [`Scene`] owns every node, keyed by [`NodeId`], together with the
//! backend factory and the render configuration. The UI layer creates nodes
//! from props, wires them into trees, replaces props between frames and asks
//! the scene to render a root.
//!
//! # Frame flow
//!
//! ```text
//! set_props ──▶ version bump (only on value change)
//!                 │
//! render(root) ──▶ derive(root)   refresh every stale drawing node
//!               └▶ draw(root)     materialize spans, issue backend calls
//! ```

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::backend::{Backend, Canvas};
use crate::config::RenderConfig;
use crate::error::{DrawError, DrawResult};
use crate::id::{IdAllocator, NodeId};
use crate::node::{DeclarationKind, Node, NodeType, Props};
use crate::span::Span;
use crate::style::Paint;

// =============================================================================
// DrawingContext
// =============================================================================

/// Resources shared by every node of one draw pass.
pub struct DrawingContext<'a, B: Backend> {
    pub canvas: &'a mut B::Canvas,
    /// Ambient paint
    pub paint: Paint,
    pub fonts: &'a B::FontProvider,
}

impl<'a, B: Backend> DrawingContext<'a, B> {
    /// Context with the default (opaque black fill) ambient paint.
    pub fn new(canvas: &'a mut B::Canvas, fonts: &'a B::FontProvider) -> Self {
        Self {
            canvas,
            paint: Paint::default(),
            fonts,
        }
    }

    pub fn with_paint(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }

    /// Reborrow with a different ambient paint.
    pub fn scoped(&mut self, paint: Paint) -> DrawingContext<'_, B> {
        DrawingContext {
            canvas: &mut *self.canvas,
            paint,
            fonts: self.fonts,
        }
    }
}

// =============================================================================
// Scene
// =============================================================================

/// Children list; most nodes have few children.
pub type ChildIds = SmallVec<[NodeId; 4]>;

struct NodeEntry<B: Backend> {
    node: Node<B>,
    parent: Option<NodeId>,
    children: ChildIds,
}

/// Arena of nodes drawn through backend `B`.
pub struct Scene<B: Backend> {
    backend: B,
    config: RenderConfig,
    nodes: FxHashMap<NodeId, NodeEntry<B>>,
    ids: IdAllocator,
}

impl<B: Backend> Scene<B> {
    pub fn new(backend: B, config: RenderConfig) -> Self {
        Self {
            backend,
            config,
            nodes: FxHashMap::default(),
            ids: IdAllocator::default(),
        }
    }

    /// Scene with the default config.
    pub fn with_backend(backend: B) -> Self {
        Self::new(backend, RenderConfig::default())
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Node lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a detached node from props.
    pub fn create(&mut self, props: impl Into<Props<B::Font>>) -> NodeId {
        let node = Node::new(props.into());
        let id = self.ids.next_id();
        log::debug!("created {} node {id}", node.node_type());
        self.nodes.insert(
            id,
            NodeEntry {
                node,
                parent: None,
                children: ChildIds::new(),
            },
        );
        id
    }

    pub fn node(&self, id: NodeId) -> DrawResult<&Node<B>> {
        self.entry(id).map(|e| &e.node)
    }

    /// Replace the props of `id`. Returns whether they changed by value.
    pub fn set_props(&mut self, id: NodeId, props: impl Into<Props<B::Font>>) -> DrawResult<bool> {
        let props = props.into();
        let entry = self.entry_mut(id)?;
        let text_span = matches!(&props, Props::Span(span) if span.has_text());
        if text_span && !entry.children.is_empty() {
            return Err(DrawError::SpanConflict(id));
        }
        entry.node.set_props(id, props)
    }

    /// Destroy `id` and its whole subtree, detaching it from its parent.
    pub fn destroy(&mut self, id: NodeId) -> DrawResult<()> {
        let parent = self.entry(id)?.parent;
        if let Some(parent) = parent {
            self.entry_mut(parent)?.children.retain(|c| *c != id);
        }
        let mut stack = vec![id];
        let mut removed = 0usize;
        while let Some(next) = stack.pop() {
            if let Some(entry) = self.nodes.remove(&next) {
                stack.extend(entry.children);
                removed += 1;
            }
        }
        log::debug!("destroyed node {id} ({removed} nodes)");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tree structure
    // ─────────────────────────────────────────────────────────────────────────

    pub fn children(&self, id: NodeId) -> DrawResult<&[NodeId]> {
        self.entry(id).map(|e| e.children.as_slice())
    }

    pub fn parent(&self, id: NodeId) -> DrawResult<Option<NodeId>> {
        self.entry(id).map(|e| e.parent)
    }

    /// Attach `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DrawResult<()> {
        let index = self.entry(parent)?.children.len();
        self.insert_child(parent, index, child)
    }

    /// Attach `child` at `index` under `parent` (clamped to the child count).
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> DrawResult<()> {
        self.check_attach(parent, child)?;
        let entry = self.entry_mut(parent)?;
        let index = index.min(entry.children.len());
        entry.children.insert(index, child);
        self.entry_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detach `child` from `parent` and destroy its subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DrawResult<()> {
        if self.entry(child)?.parent != Some(parent) {
            self.entry(parent)?;
            return Err(DrawError::NotAChild { parent, child });
        }
        self.destroy(child)
    }

    fn check_attach(&self, parent: NodeId, child: NodeId) -> DrawResult<()> {
        let parent_entry = self.entry(parent)?;
        let child_entry = self.entry(child)?;
        if child_entry.parent.is_some() {
            return Err(DrawError::AlreadyAttached(child));
        }

        let (parent_kind, child_kind) = (parent_entry.node.node_type(), child_entry.node.node_type());
        if !parent_kind.accepts_child(child_kind) {
            return Err(DrawError::InvalidChild {
                parent: parent_kind,
                child: child_kind,
            });
        }
        if parent_entry.node.is_text_span() {
            return Err(DrawError::SpanConflict(parent));
        }

        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(DrawError::Cycle { parent, child });
            }
            cursor = self.entry(ancestor)?.parent;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derivation
    // ─────────────────────────────────────────────────────────────────────────

    /// Refresh the derived value of every node in the subtree of `id`.
    ///
    /// Returns how many nodes recomputed.
    pub fn derive(&mut self, id: NodeId) -> DrawResult<usize> {
        self.entry(id)?;
        let mut stack = vec![id];
        let mut recomputed = 0;
        while let Some(next) = stack.pop() {
            let Some(entry) = self.nodes.get_mut(&next) else {
                continue;
            };
            if entry.node.refresh(&self.backend, &self.config)? {
                recomputed += 1;
            }
            stack.extend(entry.children.iter().rev().copied());
        }
        Ok(recomputed)
    }

    /// Number of derivations node `id` has run.
    pub fn derivation_count(&self, id: NodeId) -> DrawResult<u64> {
        self.node(id).map(Node::derivation_count)
    }

    /// Pull the span value of declaration node `id` and its span children.
    pub fn materialize_span(&self, id: NodeId) -> DrawResult<Span> {
        let entry = self.entry(id)?;
        let Some(span) = entry.node.as_span() else {
            return Err(DrawError::KindMismatch {
                node: id,
                expected: NodeType::Span,
                found: entry.node.node_type(),
            });
        };
        let children = self.collect_spans(&entry.children)?;
        Ok(span.materialize(children))
    }

    fn collect_spans(&self, ids: &[NodeId]) -> DrawResult<Vec<Span>> {
        let mut spans = Vec::with_capacity(ids.len());
        for &id in ids {
            if self.entry(id)?.node.declaration_kind() == Some(DeclarationKind::Span) {
                spans.push(self.materialize_span(id)?);
            }
        }
        Ok(spans)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw the subtree of `id` without deriving.
    ///
    /// Fails with `NotDerived` on the first drawing node whose derived value
    /// is missing or stale. Declaration nodes draw nothing.
    pub fn draw(&self, id: NodeId, ctx: &mut DrawingContext<'_, B>) -> DrawResult<()> {
        let entry = self.entry(id)?;
        match &entry.node {
            Node::Group(group) => {
                let state = *group.require("group state")?;
                if let Some(transform) = state.transform {
                    ctx.canvas.save();
                    ctx.canvas.concat(transform);
                }
                let paint = state.child_paint(ctx.paint);
                let result = self.draw_children(&entry.children, &mut ctx.scoped(paint));
                if state.transform.is_some() {
                    ctx.canvas.restore();
                }
                result
            }
            Node::Text(text) => {
                let spans = self.collect_spans(&entry.children)?;
                text.draw(&self.backend, ctx, &spans, self.config.span_scope)
                    .map(|_| ())
            }
            Node::TextPath(text_path) => text_path.draw(ctx),
            Node::Span(_) => Ok(()),
        }
    }

    fn draw_children(&self, ids: &[NodeId], ctx: &mut DrawingContext<'_, B>) -> DrawResult<()> {
        for &id in ids {
            if self.entry(id)?.node.node_type().is_drawing() {
                self.draw(id, ctx)?;
            }
        }
        Ok(())
    }

    /// Derive then draw the subtree of `id`: one full frame.
    ///
    /// A failure aborts the pass and is returned to the caller.
    pub fn render(&mut self, id: NodeId, ctx: &mut DrawingContext<'_, B>) -> DrawResult<()> {
        let result = self.derive(id).and_then(|_| self.draw(id, ctx));
        match &result {
            Err(err) if err.is_contract_violation() => {
                log::error!("draw pass for node {id} aborted: {err}");
            }
            Err(err) => log::warn!("draw pass for node {id} skipped malformed props: {err}"),
            Ok(()) => {}
        }
        result
    }

    // ─────────────────────────────────────────────────────────────────────────

    fn entry(&self, id: NodeId) -> DrawResult<&NodeEntry<B>> {
        self.nodes.get(&id).ok_or(DrawError::UnknownNode(id))
    }

    fn entry_mut(&mut self, id: NodeId) -> DrawResult<&mut NodeEntry<B>> {
        self.nodes.get_mut(&id).ok_or(DrawError::UnknownNode(id))
    }
}
