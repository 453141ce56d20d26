use crate::hierarchy::NodeId;
use crate::ir::{EdgeKind, TreeNode};

/// A node placed on the final canvas. `x`/`y` are the center of its
/// footprint; the primary shape occupies the top `shape_height` of it.
#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: NodeId,
    pub node: TreeNode,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub shape_height: f32,
    pub depth: usize,
    pub highlighted: bool,
}

impl NodeLayout {
    pub fn uid(&self) -> &str {
        self.node.uid()
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn shape_bottom(&self) -> f32 {
        self.top() + self.shape_height
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    pub highlighted: bool,
    /// Bottom center of the parent's shape.
    pub start: (f32, f32),
    /// Top center of the child's footprint.
    pub end: (f32, f32),
}

impl EdgeLayout {
    pub fn midpoint(&self) -> (f32, f32) {
        (
            (self.start.0 + self.end.0) / 2.0,
            (self.start.1 + self.end.1) / 2.0,
        )
    }
}

/// The header box showing the classified input, joined to the root by a
/// dashed connector.
#[derive(Debug, Clone)]
pub struct InputLayout {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub connector: ((f32, f32), (f32, f32)),
}

#[derive(Debug, Clone)]
pub struct Layout {
    /// Reachable nodes in pre-order.
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub input: Option<InputLayout>,
    pub width: f32,
    pub height: f32,
    /// Grid cell every node was placed on: widest and tallest footprint
    /// scaled by the spacing multipliers.
    pub node_size: (f32, f32),
    /// True whenever the highlight set is non-empty.
    pub highlight_active: bool,
}

impl Layout {
    pub fn node(&self, uid: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.uid() == uid)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&EdgeLayout> {
        self.edges
            .iter()
            .find(|edge| edge.from == from && edge.to == to)
    }
}
