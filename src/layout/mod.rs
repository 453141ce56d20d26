pub mod canvas;
pub mod sizing;
pub mod text;
pub mod tidy;
pub(crate) mod types;
pub use types::*;

use crate::config::LayoutConfig;
use crate::hierarchy::Hierarchy;
use crate::ir::{EdgeKind, Payload};
use canvas::{InputBand, NodeBox};
use sizing::{Footprint, compute_footprints};
use tidy::{TidyConfig, TidyLayout};

/// Text shown in the input box; the raw value is quoted.
pub fn quoted(text: &str) -> String {
    format!("\"{text}\"")
}

pub fn input_box_width(input: &str, config: &LayoutConfig) -> f32 {
    let content = text::estimate_width(&quoted(input), config.char_width) + config.label_padding;
    content
        .min(config.node_base_width * 2.0)
        .max(config.node_base_width)
}

pub fn compute_layout(hierarchy: &Hierarchy, payload: &Payload, config: &LayoutConfig) -> Layout {
    let footprints = compute_footprints(hierarchy, config);
    let reachable = hierarchy.descendants(hierarchy.root());

    let (max_width, max_height) = reachable.iter().fold((0.0f32, 0.0f32), |(w, h), &id| {
        let Footprint { width, height } = footprints[id];
        (w.max(width), h.max(height))
    });
    // Not a bare 1.0x multiplier: the vertical step also adds `level_gap`,
    // which holds the edge labels between levels.
    let node_size = (
        max_width * config.horizontal_spacing,
        max_height * config.vertical_spacing + config.level_gap,
    );
    log::debug!(
        "largest footprint {max_width:.1}x{max_height:.1}, grid cell {:.1}x{:.1}",
        node_size.0,
        node_size.1
    );

    let units = TidyLayout::new(
        hierarchy,
        TidyConfig {
            sibling_separation: config.sibling_separation,
            subtree_separation: config.subtree_separation,
        },
    )
    .compute();

    let mut centers = vec![(0.0f32, 0.0f32); hierarchy.len()];
    let mut depths = vec![0usize; hierarchy.len()];
    let mut boxes = Vec::with_capacity(reachable.len());
    for &id in &reachable {
        let Some(unit) = units[id] else {
            continue;
        };
        let center = (unit.x * node_size.0, unit.depth as f32 * node_size.1);
        centers[id] = center;
        depths[id] = unit.depth;
        boxes.push(NodeBox {
            x: center.0,
            y: center.1,
            width: footprints[id].width,
            height: footprints[id].height,
        });
    }

    let root = hierarchy.root();
    let input = payload.input.as_deref().map(|text| InputBand {
        center_x: centers[root].0,
        width: input_box_width(text, config),
    });
    let frame = canvas::normalize(&boxes, input, config);

    for uid in &payload.highlights {
        if !hierarchy.nodes().iter().any(|node| node.uid() == *uid) {
            log::warn!("highlight {uid} does not name any node");
        }
    }

    let nodes: Vec<NodeLayout> = reachable
        .iter()
        .map(|&id| {
            let entry = hierarchy.node(id);
            let (x, y) = frame.apply(centers[id]);
            NodeLayout {
                id,
                node: entry.node.clone(),
                x,
                y,
                width: footprints[id].width,
                height: footprints[id].height,
                shape_height: if entry.is_leaf() {
                    config.leaf_box_height
                } else {
                    config.branch_height
                },
                depth: depths[id],
                highlighted: payload.is_highlighted(entry.uid()),
            }
        })
        .collect();

    let position: Vec<Option<usize>> = {
        let mut slots = vec![None; hierarchy.len()];
        for (idx, node) in nodes.iter().enumerate() {
            slots[node.id] = Some(idx);
        }
        slots
    };

    let mut edges = Vec::new();
    for node in &nodes {
        for child_id in hierarchy.ordered_children(node.id) {
            let Some(child_idx) = position[child_id] else {
                continue;
            };
            let child = &nodes[child_idx];
            edges.push(EdgeLayout {
                from: node.uid().to_string(),
                to: child.uid().to_string(),
                kind: hierarchy
                    .node(child_id)
                    .edge
                    .clone()
                    .unwrap_or(EdgeKind::Unlabeled),
                highlighted: node.highlighted && child.highlighted,
                start: (node.x, node.shape_bottom()),
                end: (child.x, child.top()),
            });
        }
    }

    let input = match (payload.input.as_deref(), input) {
        (Some(text), Some(band)) => {
            let root_node = &nodes[0];
            let top = root_node.top() - frame.band;
            let x = band.center_x + frame.offset_x;
            Some(InputLayout {
                text: text.to_string(),
                x,
                y: top,
                width: band.width,
                height: config.input_box_height,
                connector: ((x, top + config.input_box_height), (x, root_node.top())),
            })
        }
        _ => None,
    };

    log::debug!(
        "laid out {} nodes and {} edges on a {:.1}x{:.1} canvas",
        nodes.len(),
        edges.len(),
        frame.width,
        frame.height
    );

    Layout {
        nodes,
        edges,
        input,
        width: frame.width,
        height: frame.height,
        node_size,
        highlight_active: !payload.highlights.is_empty(),
    }
}
