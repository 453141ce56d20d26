use crate::config::LayoutConfig;
use crate::hierarchy::Hierarchy;
use crate::ir::{BranchNode, LeafNode, OutputValue, TreeNode};
use crate::parser::parse_output;

use super::text::{estimate_width, truncate_middle};

/// Horizontal padding inside each `type(value)` segment.
pub const SEGMENT_PADDING: f32 = 12.0;

/// Space reserved for a node, including the boxes stacked under a leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

fn clamp_width(content: f32, config: &LayoutConfig) -> f32 {
    let base = config.node_base_width;
    content.min(base * 2.0).max(base)
}

/// Geometry of a `type(value)` output drawn as two segments with a
/// parenthesis after each.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSegments {
    pub typ: String,
    pub value: String,
    pub type_width: f32,
    pub value_width: f32,
    pub paren_width: f32,
}

impl OutputSegments {
    pub fn width(&self) -> f32 {
        self.type_width + self.paren_width + self.value_width + self.paren_width
    }
}

/// Fits a structured output into `available` pixels. The value is capped at
/// `output_value_max_width` and shrunk first; the type is only cut once the
/// value is down to its ellipsis.
pub fn output_segments(
    typ: &str,
    value: &str,
    available: f32,
    config: &LayoutConfig,
) -> OutputSegments {
    let cw = config.char_width;
    let paren_width = cw;
    let fixed = 2.0 * paren_width + 2.0 * SEGMENT_PADDING;

    let type_text = estimate_width(typ, cw);
    let value_budget = config
        .output_value_max_width
        .min(available - fixed - type_text);
    let value = truncate_middle(value, value_budget, cw);
    let value_width = estimate_width(&value, cw) + SEGMENT_PADDING;

    let type_budget = available - fixed - estimate_width(&value, cw);
    let typ = truncate_middle(typ, type_budget, cw);
    let type_width = estimate_width(&typ, cw) + SEGMENT_PADDING;

    OutputSegments {
        typ,
        value,
        type_width,
        value_width,
        paren_width,
    }
}

/// Width the output annotation wants before the node width constrains it.
pub fn output_width(output: &str, config: &LayoutConfig) -> f32 {
    match parse_output(output) {
        OutputValue::Typed { typ, value } => {
            output_segments(&typ, &value, f32::INFINITY, config).width()
        }
        OutputValue::Plain(text) => estimate_width(&text, config.char_width) + config.label_padding,
    }
}

pub fn branch_footprint(branch: &BranchNode, config: &LayoutConfig) -> Footprint {
    let label = estimate_width(&branch.label, config.char_width) + config.label_padding;
    Footprint {
        width: clamp_width(label, config),
        height: config.branch_height,
    }
}

// Leaf text widths carry `label_padding` like branch labels do, and the
// output annotation joins the type and parser text in the width maximum. The
// renderer truncates against `width - label_padding`, so anything that sized
// the node is drawn whole.
pub fn leaf_footprint(leaf: &LeafNode, config: &LayoutConfig) -> Footprint {
    let typ = estimate_width(&leaf.typ, config.char_width) + config.label_padding;
    let parser = leaf
        .parser
        .as_deref()
        .map(|parser| estimate_width(parser, config.parser_char_width) + config.label_padding)
        .unwrap_or(0.0);
    let output = leaf
        .output
        .as_deref()
        .map(|output| output_width(output, config))
        .unwrap_or(0.0);

    let mut height = config.node_base_height;
    if leaf.parser.is_some() {
        height += config.parser_band_height;
    }
    height += leaf.examples.len() as f32 * config.example_box_height;
    if leaf.output.is_some() {
        height += config.output_band_height;
    }

    Footprint {
        width: clamp_width(typ.max(parser).max(output), config),
        height,
    }
}

pub fn node_footprint(node: &TreeNode, config: &LayoutConfig) -> Footprint {
    match node {
        TreeNode::Branch(branch) => branch_footprint(branch, config),
        TreeNode::Leaf(leaf) => leaf_footprint(leaf, config),
    }
}

/// One footprint per arena slot, indexed by `NodeId`.
pub fn compute_footprints(hierarchy: &Hierarchy, config: &LayoutConfig) -> Vec<Footprint> {
    hierarchy
        .nodes()
        .iter()
        .map(|node| node_footprint(&node.node, config))
        .collect()
}
