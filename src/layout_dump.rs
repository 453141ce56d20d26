use crate::ir::TreeNode;
use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub node_size: [f32; 2],
    pub highlight_active: bool,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub input: Option<InputDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub uid: String,
    pub kind: &'static str,
    pub label: String,
    pub depth: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub highlighted: bool,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub highlighted: bool,
    pub points: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
pub struct InputDump {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| {
                let (kind, label) = match &node.node {
                    TreeNode::Branch(branch) => ("branch", branch.label.clone()),
                    TreeNode::Leaf(leaf) => ("leaf", leaf.typ.clone()),
                };
                NodeDump {
                    uid: node.uid().to_string(),
                    kind,
                    label,
                    depth: node.depth,
                    x: node.x,
                    y: node.y,
                    width: node.width,
                    height: node.height,
                    highlighted: node.highlighted,
                }
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.from.clone(),
                to: edge.to.clone(),
                label: edge.kind.display_label().map(str::to_string),
                highlighted: edge.highlighted,
                points: vec![
                    [edge.start.0, edge.start.1],
                    [edge.end.0, edge.end.1],
                ],
            })
            .collect();

        let input = layout.input.as_ref().map(|input| InputDump {
            text: input.text.clone(),
            x: input.x,
            y: input.y,
            width: input.width,
            height: input.height,
        });

        LayoutDump {
            width: layout.width,
            height: layout.height,
            node_size: [layout.node_size.0, layout.node_size.1],
            highlight_active: layout.highlight_active,
            nodes,
            edges,
            input,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
