//! Derived-state cache and the drawing-node base.
//!
//! A drawing node keeps its props, a version bumped only when replacement
//! props differ by value, and the value derived from the props at some
//! version. The derived value is served only while its version matches the
//! props version, so a stale value can never be drawn.

use std::fmt::Debug;

use crate::backend::Backend;
use crate::config::RenderConfig;
use crate::error::{DrawError, DrawResult};

use super::NodeType;

// =============================================================================
// Traits
// =============================================================================

/// Props of a node kind.
pub trait NodeProps: PartialEq + Debug {
    /// Node kind these props construct
    const KIND: NodeType;

    /// Whether `other` is the same snapshot as `self`.
    ///
    /// Props holding a NaN are never `==` to themselves; those fall back to
    /// comparing their `Debug` rendering, where every NaN prints alike.
    fn same_snapshot(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        !self.eq(self) && format!("{self:?}") == format!("{other:?}")
    }
}

/// Props that derive an expensive value once per distinct snapshot.
///
/// `derive_props` must be a pure function of `self` (plus the stateless
/// backend factory and scene config): the cache assumes that calling it twice
/// on equal props yields equal results.
pub trait DeriveProps<B: Backend>: NodeProps {
    type Derived;

    /// Name of the derived value, used in diagnostics
    const DERIVED: &'static str;

    fn derive_props(&self, backend: &B, config: &RenderConfig) -> DrawResult<Self::Derived>;
}

// =============================================================================
// Derived
// =============================================================================

/// A cached value tagged with the props version it was computed from.
#[derive(Debug, Clone)]
pub struct Derived<T> {
    value: Option<T>,
    version: u64,
    computations: u64,
}

impl<T> Default for Derived<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Derived<T> {
    /// Empty cache.
    pub const fn new() -> Self {
        Self {
            value: None,
            version: 0,
            computations: 0,
        }
    }

    /// Recompute with `f` unless a value for `version` is cached.
    ///
    /// Returns whether `f` ran. A failed computation leaves the cache empty.
    pub fn refresh(&mut self, version: u64, f: impl FnOnce() -> DrawResult<T>) -> DrawResult<bool> {
        if self.current(version).is_some() {
            return Ok(false);
        }
        self.invalidate();
        self.computations += 1;
        self.value = Some(f()?);
        self.version = version;
        Ok(true)
    }

    /// Cached value, if it was computed for `version`.
    #[inline]
    pub fn current(&self, version: u64) -> Option<&T> {
        self.value.as_ref().filter(|_| self.version == version)
    }

    /// Whether any value is held, fresh or stale.
    #[inline]
    pub fn is_populated(&self) -> bool {
        self.value.is_some()
    }

    /// Number of times a computation was started.
    #[inline]
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Drop the cached value.
    pub fn invalidate(&mut self) {
        self.value = None;
    }
}

// =============================================================================
// DrawingNode
// =============================================================================

/// Base of every drawing node: props snapshot, version and derived cache.
#[derive(Debug, Clone)]
pub struct DrawingNode<P, D> {
    props: P,
    version: u64,
    derived: Derived<D>,
}

impl<P: NodeProps, D> DrawingNode<P, D> {
    /// New node at version 0 with nothing derived yet.
    pub fn new(props: P) -> Self {
        Self {
            props,
            version: 0,
            derived: Derived::new(),
        }
    }

    #[inline]
    pub fn props(&self) -> &P {
        &self.props
    }

    /// Props version; bumped only by value-changing updates.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the props wholesale. Returns whether they differed.
    pub fn set_props(&mut self, props: P) -> bool {
        if self.props.same_snapshot(&props) {
            return false;
        }
        self.props = props;
        self.version += 1;
        true
    }

    /// Derive for the current props unless already cached.
    pub fn refresh<B>(&mut self, backend: &B, config: &RenderConfig) -> DrawResult<bool>
    where
        B: Backend,
        P: DeriveProps<B, Derived = D>,
    {
        let props = &self.props;
        let recomputed = self
            .derived
            .refresh(self.version, || props.derive_props(backend, config))?;
        if recomputed {
            log::trace!("{}: derived {} at v{}", P::KIND, P::DERIVED, self.version);
        } else {
            log::trace!("{}: cached {} hit at v{}", P::KIND, P::DERIVED, self.version);
        }
        Ok(recomputed)
    }

    /// Derived value for the current props.
    #[inline]
    pub fn derived(&self) -> Option<&D> {
        self.derived.current(self.version)
    }

    /// Derived value, or the contract violation naming what is missing.
    pub fn require(&self, what: &'static str) -> DrawResult<&D> {
        self.derived().ok_or(DrawError::NotDerived { kind: P::KIND, what })
    }

    /// Number of derivations run so far.
    #[inline]
    pub fn derivation_count(&self) -> u64 {
        self.derived.computations()
    }
}
