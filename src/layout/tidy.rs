//! Tidy tree placement over a uniform node grid.
//!
//! Every node occupies one horizontal unit. Subtrees are laid out bottom-up:
//! each child subtree is pushed right until its left contour clears the right
//! contour of the siblings placed before it, then the parent is centered over
//! its first and last child. A second pass turns relative offsets into
//! absolute unit positions.

use crate::hierarchy::{Hierarchy, NodeId};

#[derive(Debug, Clone, Copy)]
pub struct TidyConfig {
    /// Minimum distance between adjacent siblings, in node units.
    pub sibling_separation: f32,
    /// Minimum distance between adjacent cousins, in node units.
    pub subtree_separation: f32,
}

/// Per-level extent of a subtree relative to its root.
#[derive(Debug, Clone, Default)]
struct Contour {
    left: Vec<f32>,
    right: Vec<f32>,
}

impl Contour {
    fn single() -> Self {
        Self {
            left: vec![0.0],
            right: vec![0.0],
        }
    }

    fn depth(&self) -> usize {
        self.left.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPosition {
    /// Horizontal position in node units; the root sits at 0.
    pub x: f32,
    pub depth: usize,
}

pub struct TidyLayout<'a> {
    hierarchy: &'a Hierarchy,
    config: TidyConfig,
    offsets: Vec<f32>,
    order: Vec<Vec<NodeId>>,
}

impl<'a> TidyLayout<'a> {
    pub fn new(hierarchy: &'a Hierarchy, config: TidyConfig) -> Self {
        let order = (0..hierarchy.len())
            .map(|id| hierarchy.ordered_children(id))
            .collect();
        Self {
            hierarchy,
            config,
            offsets: vec![0.0; hierarchy.len()],
            order,
        }
    }

    /// Positions for every node reachable from the root; `None` elsewhere.
    pub fn compute(mut self) -> Vec<Option<UnitPosition>> {
        let root = self.hierarchy.root();
        self.first_walk(root);
        let mut positions = vec![None; self.hierarchy.len()];
        self.second_walk(root, 0.0, 0, &mut positions);
        positions
    }

    fn first_walk(&mut self, id: NodeId) -> Contour {
        let children = self.order[id].clone();
        if children.is_empty() {
            return Contour::single();
        }

        let mut placed: Vec<f32> = Vec::with_capacity(children.len());
        let mut merged = Contour::default();
        for &child in &children {
            let contour = self.first_walk(child);
            let shift = if placed.is_empty() {
                0.0
            } else {
                self.required_shift(&merged, &contour)
            };
            merge_into(&mut merged, &contour, shift);
            placed.push(shift);
        }

        let first = placed[0];
        let last = placed[placed.len() - 1];
        let center = (first + last) / 2.0;
        for (&child, &x) in children.iter().zip(&placed) {
            self.offsets[child] = x - center;
        }

        let mut contour = Contour::single();
        contour.left.extend(merged.left.iter().map(|x| x - center));
        contour.right.extend(merged.right.iter().map(|x| x - center));
        contour
    }

    fn required_shift(&self, placed: &Contour, next: &Contour) -> f32 {
        let shared = placed.depth().min(next.depth());
        let mut shift = f32::NEG_INFINITY;
        for level in 0..shared {
            let gap = if level == 0 {
                self.config.sibling_separation
            } else {
                self.config.subtree_separation
            };
            shift = shift.max(placed.right[level] - next.left[level] + gap);
        }
        shift
    }

    fn second_walk(
        &self,
        id: NodeId,
        parent_x: f32,
        depth: usize,
        positions: &mut [Option<UnitPosition>],
    ) {
        if positions[id].is_some() {
            return;
        }
        let x = parent_x + self.offsets[id];
        positions[id] = Some(UnitPosition { x, depth });
        for &child in &self.order[id] {
            self.second_walk(child, x, depth + 1, positions);
        }
    }
}

fn merge_into(merged: &mut Contour, contour: &Contour, shift: f32) {
    for level in 0..contour.depth() {
        let left = contour.left[level] + shift;
        let right = contour.right[level] + shift;
        if level < merged.depth() {
            merged.left[level] = merged.left[level].min(left);
            merged.right[level] = merged.right[level].max(right);
        } else {
            merged.left.push(left);
            merged.right.push(right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BranchNode, Edge, LeafNode, TreeNode};

    const CONFIG: TidyConfig = TidyConfig {
        sibling_separation: 1.0,
        subtree_separation: 2.0,
    };

    fn build(branches: &[&str], leaves: &[&str], edges: &[(&str, &str, &str)]) -> Hierarchy {
        let mut nodes: Vec<TreeNode> = branches
            .iter()
            .map(|uid| {
                TreeNode::Branch(BranchNode {
                    uid: uid.to_string(),
                    label: uid.to_string(),
                })
            })
            .collect();
        nodes.extend(leaves.iter().map(|uid| {
            TreeNode::Leaf(LeafNode {
                uid: uid.to_string(),
                typ: "text".to_string(),
                parser: None,
                examples: Vec::new(),
                output: None,
            })
        }));
        let edges: Vec<Edge> = edges
            .iter()
            .map(|(s, t, l)| Edge {
                source: s.to_string(),
                target: t.to_string(),
                label: Some(l.to_string()),
            })
            .collect();
        Hierarchy::build(nodes, &edges).unwrap()
    }

    fn position(h: &Hierarchy, positions: &[Option<UnitPosition>], uid: &str) -> UnitPosition {
        let id = h.nodes().iter().position(|n| n.uid() == uid).unwrap();
        positions[id].unwrap()
    }

    #[test]
    fn single_node_sits_at_origin() {
        let h = build(&[], &["only"], &[]);
        let positions = TidyLayout::new(&h, CONFIG).compute();
        assert_eq!(
            positions[0],
            Some(UnitPosition { x: 0.0, depth: 0 })
        );
    }

    #[test]
    fn parent_is_centered_and_false_goes_left() {
        let h = build(&["r"], &["t", "f"], &[("r", "t", "true"), ("r", "f", "false")]);
        let positions = TidyLayout::new(&h, CONFIG).compute();
        let r = position(&h, &positions, "r");
        let t = position(&h, &positions, "t");
        let f = position(&h, &positions, "f");
        assert_eq!(r.depth, 0);
        assert_eq!(t.depth, 1);
        assert!(f.x < t.x);
        assert!((r.x - (f.x + t.x) / 2.0).abs() < 1e-5);
        assert!((t.x - f.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn cousins_keep_subtree_separation() {
        let h = build(
            &["r", "a", "b"],
            &["a1", "a2", "b1", "b2"],
            &[
                ("r", "a", "false"),
                ("r", "b", "true"),
                ("a", "a1", "false"),
                ("a", "a2", "true"),
                ("b", "b1", "false"),
                ("b", "b2", "true"),
            ],
        );
        let positions = TidyLayout::new(&h, CONFIG).compute();
        let a2 = position(&h, &positions, "a2");
        let b1 = position(&h, &positions, "b1");
        assert!(b1.x - a2.x >= 2.0 - 1e-5);
    }

    #[test]
    fn deep_false_chain_does_not_collide() {
        // A false-chain: every branch keeps a true leaf on its right.
        let branches = ["b0", "b1", "b2", "b3"];
        let leaves = ["t0", "t1", "t2", "t3", "end"];
        let edges = [
            ("b0", "t0", "true"),
            ("b0", "b1", "false"),
            ("b1", "t1", "true"),
            ("b1", "b2", "false"),
            ("b2", "t2", "true"),
            ("b2", "b3", "false"),
            ("b3", "t3", "true"),
            ("b3", "end", "false"),
        ];
        let h = build(&branches, &leaves, &edges);
        let positions = TidyLayout::new(&h, CONFIG).compute();
        let mut by_depth: Vec<Vec<f32>> = Vec::new();
        for pos in positions.iter().flatten() {
            if by_depth.len() <= pos.depth {
                by_depth.resize(pos.depth + 1, Vec::new());
            }
            by_depth[pos.depth].push(pos.x);
        }
        for row in &mut by_depth {
            row.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in row.windows(2) {
                assert!(pair[1] - pair[0] >= 1.0 - 1e-5, "row {row:?}");
            }
        }
    }
}
