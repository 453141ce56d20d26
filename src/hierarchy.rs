//! Rebuilds a single-rooted tree from the flat node and edge lists.
//!
//! Nodes live in an arena indexed by [`NodeId`]; every later stage reads the
//! hierarchy immutably and keeps its own per-node results in parallel vectors.

use crate::error::{RenderError, Result};
use crate::ir::{Edge, EdgeKind, Payload, TreeNode};
use std::collections::{HashMap, HashSet};

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct HierarchyNode {
    pub node: TreeNode,
    pub parent: Option<NodeId>,
    /// Children in edge order.
    pub children: Vec<NodeId>,
    /// Interpretation of the edge leading into this node (`None` for the root).
    pub edge: Option<EdgeKind>,
}

impl HierarchyNode {
    pub fn uid(&self) -> &str {
        self.node.uid()
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }
}

#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    root: NodeId,
}

pub fn build_hierarchy(payload: &Payload) -> Result<Hierarchy> {
    Hierarchy::build(payload.nodes(), &payload.edges)
}

impl Hierarchy {
    pub fn build(nodes: Vec<TreeNode>, edges: &[Edge]) -> Result<Self> {
        if nodes.is_empty() {
            return Err(RenderError::EmptyInput);
        }

        let mut arena: Vec<HierarchyNode> = Vec::with_capacity(nodes.len());
        let mut lookup: HashMap<String, NodeId> = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if lookup.contains_key(node.uid()) {
                log::warn!("duplicate node uid {}; keeping the first occurrence", node.uid());
                continue;
            }
            lookup.insert(node.uid().to_string(), arena.len());
            arena.push(HierarchyNode {
                node,
                parent: None,
                children: Vec::new(),
                edge: None,
            });
        }

        let mut has_incoming: HashSet<NodeId> = HashSet::new();
        for edge in edges {
            let (Some(&source), Some(&target)) =
                (lookup.get(&edge.source), lookup.get(&edge.target))
            else {
                log::warn!(
                    "ignoring edge {} -> {}: unknown endpoint",
                    edge.source,
                    edge.target
                );
                continue;
            };
            has_incoming.insert(target);
            if source == target || arena[target].parent.is_some() {
                log::warn!(
                    "ignoring edge {} -> {}: target already attached",
                    edge.source,
                    edge.target
                );
                continue;
            }
            arena[target].parent = Some(source);
            arena[target].edge = Some(EdgeKind::from_label(edge.label.as_deref()));
            arena[source].children.push(target);
        }

        let roots: Vec<NodeId> = (0..arena.len())
            .filter(|id| !has_incoming.contains(id))
            .collect();
        if roots.len() != 1 {
            return Err(RenderError::MultipleOrNoRoot { count: roots.len() });
        }

        let hierarchy = Self {
            nodes: arena,
            root: roots[0],
        };
        let reachable = hierarchy.descendants(hierarchy.root).len();
        if reachable < hierarchy.nodes.len() {
            log::warn!(
                "{} nodes are not reachable from root {}",
                hierarchy.nodes.len() - reachable,
                hierarchy.root_node().uid()
            );
        }
        log::debug!(
            "built hierarchy rooted at {} with {} reachable nodes",
            hierarchy.root_node().uid(),
            reachable
        );
        Ok(hierarchy)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &HierarchyNode {
        &self.nodes[self.root]
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order walk starting at `id`, including `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            out.push(current);
            for &child in self.nodes[current].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Children in drawing order: `true` branches go last, everything else
    /// keeps edge order.
    pub fn ordered_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.nodes[id].children.clone();
        children.sort_by_key(|&child| {
            self.nodes[child]
                .edge
                .as_ref()
                .is_some_and(EdgeKind::is_true)
        });
        children
    }
}
