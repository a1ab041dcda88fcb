//! Scene-wide rendering configuration.

// =============================================================================
// SpanScopePolicy
// =============================================================================

/// How a span that overrides both paint and text style is pushed onto the
/// paragraph builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpanScopePolicy {
    /// The paint scope carries the span's style merged over the inherited one.
    #[default]
    PaintCarriesStyle,
    /// The paint scope carries the inherited style only; the span's own
    /// style override is dropped.
    PaintOnly,
}

// =============================================================================
// RenderConfig
// =============================================================================

/// Default resolution scale used when measuring path contours.
pub const DEFAULT_CONTOUR_RES_SCALE: f64 = 1.0;

/// Configuration shared by every node of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Resolution scale for contour measurement (1.0 = one path unit).
    pub contour_res_scale: f64,
    /// Measure every contour as if it were closed.
    pub force_closed_contours: bool,
    /// Scope resolution for spans with both paint and style overrides.
    pub span_scope: SpanScopePolicy,
}

impl RenderConfig {
    /// Default config.
    pub const DEFAULT: Self = Self {
        contour_res_scale: DEFAULT_CONTOUR_RES_SCALE,
        force_closed_contours: false,
        span_scope: SpanScopePolicy::PaintCarriesStyle,
    };

    /// Paint overrides win outright and drop a simultaneous style override.
    pub const LEGACY: Self = Self {
        contour_res_scale: DEFAULT_CONTOUR_RES_SCALE,
        force_closed_contours: false,
        span_scope: SpanScopePolicy::PaintOnly,
    };

    /// Create a new config.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the contour resolution scale. Non-positive or non-finite values
    /// fall back to the default.
    pub fn with_res_scale(mut self, res_scale: f64) -> Self {
        self.contour_res_scale = if res_scale.is_finite() && res_scale > 0.0 {
            res_scale
        } else {
            DEFAULT_CONTOUR_RES_SCALE
        };
        self
    }

    /// Measure open contours as closed.
    pub fn with_force_closed(mut self, force_closed: bool) -> Self {
        self.force_closed_contours = force_closed;
        self
    }

    /// Set the paint/style span scope policy.
    pub fn with_span_scope(mut self, policy: SpanScopePolicy) -> Self {
        self.span_scope = policy;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(RenderConfig::default(), RenderConfig::DEFAULT);
        assert_eq!(RenderConfig::LEGACY.span_scope, SpanScopePolicy::PaintOnly);
        assert_eq!(RenderConfig::DEFAULT.contour_res_scale, 1.0);
    }

    #[test]
    fn test_res_scale_guard() {
        assert_eq!(RenderConfig::new().with_res_scale(4.0).contour_res_scale, 4.0);
        assert_eq!(RenderConfig::new().with_res_scale(0.0).contour_res_scale, 1.0);
        assert_eq!(RenderConfig::new().with_res_scale(f64::NAN).contour_res_scale, 1.0);
    }
}
