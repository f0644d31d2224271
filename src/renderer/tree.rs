//! Render tree data structures and flattening.

use crate::transform::Transform;
use crate::widgets::Rect;

use super::commands::DrawCommand;

/// Clip region for a render node (in local coordinates).
///
/// When set on a node, this clips the node's commands and all its children
/// to the given rectangle with optional rounded corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRegion {
    /// The clip rectangle in local coordinates (0,0 = node origin).
    pub rect: Rect,
    /// Corner radius for rounded clipping.
    pub corner_radius: f32,
}

/// Identifier for a render node, stable across frames.
pub type NodeId = &'static str;

/// A node in the render tree representing one view's visual output.
///
/// The node sits at `bounds.x, bounds.y` inside its parent; `local_transform`
/// is applied after that offset, in the node's own coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub id: NodeId,

    /// Position and size inside the parent
    pub bounds: Rect,

    /// Transform relative to the node origin (identity by default)
    pub local_transform: Transform,

    /// Clip applied to this node's commands and its children
    pub clip: Option<ClipRegion>,

    /// Draw commands in local coordinates
    pub commands: Vec<DrawCommand>,

    /// Child nodes, painted in order after this node's commands
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    /// Create a new render node with bounds.
    pub fn with_bounds(id: NodeId, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            local_transform: Transform::IDENTITY,
            clip: None,
            commands: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.local_transform = transform;
        self
    }

    pub fn clip(mut self, clip: ClipRegion) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn command(mut self, command: DrawCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn child(mut self, child: RenderNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for a node by id
    pub fn find(&self, id: NodeId) -> Option<&RenderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Flatten the tree into paint order with world transforms.
    pub fn flatten(&self) -> Vec<FlattenedCommand<'_>> {
        let mut out = Vec::new();
        flatten_node(self, Transform::IDENTITY, None, &mut out);
        out
    }
}

/// Clip region together with the world transform of the node that owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldClip {
    pub region: ClipRegion,
    pub transform: Transform,
}

/// A draw command with its computed world transform.
#[derive(Debug, Clone)]
pub struct FlattenedCommand<'a> {
    pub command: &'a DrawCommand,
    /// World transform (composed from all ancestors)
    pub world_transform: Transform,
    /// Nearest clipping ancestor (or the node itself)
    pub clip: Option<WorldClip>,
}

fn flatten_node<'a>(
    node: &'a RenderNode,
    parent_world_transform: Transform,
    parent_clip: Option<WorldClip>,
    out: &mut Vec<FlattenedCommand<'a>>,
) {
    let world_transform = parent_world_transform
        .then(&Transform::translate(node.bounds.x, node.bounds.y))
        .then(&node.local_transform);

    let clip = match node.clip {
        Some(region) => Some(WorldClip {
            region,
            transform: world_transform,
        }),
        None => parent_clip,
    };

    out.extend(node.commands.iter().map(|command| FlattenedCommand {
        command,
        world_transform,
        clip,
    }));

    for child in &node.children {
        flatten_node(child, world_transform, clip, out);
    }
}
