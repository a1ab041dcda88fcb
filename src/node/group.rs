//! Group node: transform and paint scope for its drawing children.

use kurbo::Affine;

use crate::backend::Backend;
use crate::config::RenderConfig;
use crate::error::DrawResult;
use crate::style::{Color, Paint};

use super::derived::{DeriveProps, DrawingNode, NodeProps};
use super::NodeType;

/// Drawing node grouping other drawing nodes.
pub type GroupNode = DrawingNode<GroupProps, GroupState>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupProps {
    /// Transform concatenated onto the canvas around the children
    pub transform: Option<Affine>,
    /// Replaces the ambient paint color
    pub color: Option<Color>,
    /// Multiplies the ambient paint alpha
    pub opacity: Option<f32>,
}

impl GroupProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// Normalized group state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupState {
    /// `None` for an absent or identity transform
    pub transform: Option<Affine>,
    pub color: Option<Color>,
    /// Clamped to `[0, 1]`
    pub opacity: f32,
}

impl GroupState {
    /// Ambient paint for the group's children.
    pub fn child_paint(&self, ambient: Paint) -> Paint {
        let paint = match self.color {
            Some(color) => ambient.with_color(color),
            None => ambient,
        };
        if self.opacity < 1.0 {
            paint.with_opacity(self.opacity)
        } else {
            paint
        }
    }
}

impl NodeProps for GroupProps {
    const KIND: NodeType = NodeType::Group;
}

impl<B: Backend> DeriveProps<B> for GroupProps {
    type Derived = GroupState;

    const DERIVED: &'static str = "group state";

    fn derive_props(&self, _backend: &B, _config: &RenderConfig) -> DrawResult<GroupState> {
        let opacity = match self.opacity {
            Some(opacity) if opacity.is_nan() => 1.0,
            Some(opacity) => opacity.clamp(0.0, 1.0),
            None => 1.0,
        };
        Ok(GroupState {
            transform: self.transform.filter(|t| *t != Affine::IDENTITY),
            color: self.color,
            opacity,
        })
    }
}

#[cfg(all(test, feature = "recording"))]
mod tests {
    use super::*;
    use crate::backend::recording::RecordingBackend;

    fn derive(props: GroupProps) -> GroupState {
        let mut node = GroupNode::new(props);
        node.refresh(&RecordingBackend::new(), &RenderConfig::default())
            .unwrap();
        *node.derived().unwrap()
    }

    #[test]
    fn test_identity_transform_is_dropped() {
        let state = derive(GroupProps::new().with_transform(Affine::IDENTITY));
        assert_eq!(state.transform, None);
        let state = derive(GroupProps::new().with_transform(Affine::translate((5.0, 0.0))));
        assert!(state.transform.is_some());
    }

    #[test]
    fn test_child_paint() {
        let state = derive(GroupProps::new().with_color(Color::WHITE).with_opacity(2.0));
        assert_eq!(state.opacity, 1.0);
        assert_eq!(state.child_paint(Paint::default()).color, Color::WHITE);

        let state = derive(GroupProps::new().with_opacity(0.5));
        let paint = state.child_paint(Paint::default());
        assert_eq!(paint.color.a, 0.5);
        assert_eq!(paint.color.r, 0.0);
    }

    #[test]
    fn test_unchanged_props_keep_version() {
        let mut node = GroupNode::new(GroupProps::new().with_opacity(0.5));
        assert!(!node.set_props(GroupProps::new().with_opacity(0.5)));
        assert!(node.set_props(GroupProps::new()));
        assert_eq!(node.version(), 1);
    }
}
