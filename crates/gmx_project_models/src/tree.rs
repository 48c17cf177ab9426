use serde::Serialize;
use smol_str::SmolStr;

use crate::registry::{ResourceKind, ResourceRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Root,
    Primary(ResourceKind), // fixed folder of a category, always present
    Group(ResourceKind),   // folder created by the user
    Leaf(ResourceRef),
}

/// Navigation tree of a project, mirrors the folders of the manifest in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResNode {
    pub label: SmolStr,
    pub kind: NodeKind,
    pub children: Vec<ResNode>,
}

impl Default for ResNode {
    fn default() -> Self {
        Self::root()
    }
}

impl ResNode {
    pub fn new(label: impl Into<SmolStr>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            kind,
            children: Vec::new(),
        }
    }
    pub fn root() -> Self {
        Self::new("Root", NodeKind::Root)
    }
    pub fn primary(kind: ResourceKind) -> Self {
        Self::new(kind.folder_name(), NodeKind::Primary(kind))
    }
    pub fn leaf(label: impl Into<SmolStr>, reference: ResourceRef) -> Self {
        Self::new(label, NodeKind::Leaf(reference))
    }

    pub fn push(&mut self, node: ResNode) -> &mut ResNode {
        let index = self.children.len();
        self.children.push(node);
        &mut self.children[index]
    }
    pub fn add_group(&mut self, label: impl Into<SmolStr>, kind: ResourceKind) -> &mut ResNode {
        self.push(ResNode::new(label, NodeKind::Group(kind)))
    }
    pub fn add_leaf(&mut self, label: impl Into<SmolStr>, reference: ResourceRef) -> &mut ResNode {
        self.push(ResNode::leaf(label, reference))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }
    pub fn reference(&self) -> Option<ResourceRef> {
        match self.kind {
            NodeKind::Leaf(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn primary_folder(&self, kind: ResourceKind) -> Option<&ResNode> {
        self.children
            .iter()
            .find(|child| child.kind == NodeKind::Primary(kind))
    }
    pub fn child(&self, label: &str) -> Option<&ResNode> {
        self.children.iter().find(|child| child.label == label)
    }

    /// Every leaf below this node, depth first in document order.
    pub fn leaves(&self) -> Vec<&ResNode> {
        let mut found = Vec::new();
        self.collect_leaves(&mut found);
        found
    }
    fn collect_leaves<'a>(&'a self, found: &mut Vec<&'a ResNode>) {
        for child in &self.children {
            if child.is_leaf() {
                found.push(child);
            } else {
                child.collect_leaves(found);
            }
        }
    }
}
