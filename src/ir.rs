use serde::{Deserialize, Serialize};

/// A decision point. The label is the name of the feature being tested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchNode {
    pub uid: String,
    #[serde(rename = "name")]
    pub label: String,
}

/// A terminal classification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    pub uid: String,
    pub typ: String,
    #[serde(default)]
    pub parser: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    /// Textual form of the parsed value, usually `type(value)`.
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// The whole input of one render invocation.
///
/// `branches`, `leaves`, `edges` and `highlights` are required; a payload
/// missing any of them is rejected at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub branches: Vec<BranchNode>,
    pub leaves: Vec<LeafNode>,
    pub edges: Vec<Edge>,
    pub highlights: Vec<String>,
    #[serde(default)]
    pub input: Option<String>,
}

impl Payload {
    /// Branches followed by leaves, each tagged with its kind.
    pub fn nodes(&self) -> Vec<TreeNode> {
        self.branches
            .iter()
            .cloned()
            .map(TreeNode::Branch)
            .chain(self.leaves.iter().cloned().map(TreeNode::Leaf))
            .collect()
    }

    pub fn is_highlighted(&self, uid: &str) -> bool {
        self.highlights.iter().any(|h| h == uid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Branch(BranchNode),
    Leaf(LeafNode),
}

impl TreeNode {
    pub fn uid(&self) -> &str {
        match self {
            TreeNode::Branch(branch) => &branch.uid,
            TreeNode::Leaf(leaf) => &leaf.uid,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }
}

/// How the edge leading into a node was labeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EdgeKind {
    True,
    False,
    Custom(String),
    Unlabeled,
}

impl EdgeKind {
    /// Only a literal, case-insensitive `true`/`false` is binary; any other
    /// non-empty label is a routing key kept verbatim.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(raw) = label else {
            return EdgeKind::Unlabeled;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            EdgeKind::Unlabeled
        } else if trimmed.eq_ignore_ascii_case("true") {
            EdgeKind::True
        } else if trimmed.eq_ignore_ascii_case("false") {
            EdgeKind::False
        } else {
            EdgeKind::Custom(raw.to_string())
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, EdgeKind::True)
    }

    pub fn is_false(&self) -> bool {
        matches!(self, EdgeKind::False)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, EdgeKind::Custom(_))
    }

    /// Text drawn next to the edge, if any.
    pub fn display_label(&self) -> Option<&str> {
        match self {
            EdgeKind::True => Some("True"),
            EdgeKind::False => Some("False"),
            EdgeKind::Custom(label) => Some(label.as_str()),
            EdgeKind::Unlabeled => None,
        }
    }
}

/// A leaf output split by the `type(value)` convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OutputValue {
    Typed { typ: String, value: String },
    Plain(String),
}
