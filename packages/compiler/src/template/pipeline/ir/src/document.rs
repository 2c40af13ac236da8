//! IR Document
//!
//! Arena holding every node of one parsed document, the descriptors bound to
//! its tag usages, and the diagnostics reported against its nodes.

use crate::descriptor::Descriptor;
use crate::diagnostics::DiagnosticSink;
use crate::error::{LoweringError, Result};
use crate::parse_util::ParseSourceSpan;
use crate::template::pipeline::ir::handle::{DescriptorId, NodeId};
use crate::template::pipeline::ir::node::{IrNode, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    root: NodeId,
    nodes: Vec<IrNode>,
    #[serde(default)]
    descriptors: Vec<Descriptor>,
    #[serde(default)]
    pub diagnostics: DiagnosticSink,
}

impl Document {
    /// Create a document containing only its root node.
    pub fn new(file_path: Option<String>) -> Self {
        Document {
            file_path,
            root: NodeId(0),
            nodes: vec![IrNode::new(NodeKind::Document, None)],
            descriptors: Vec::new(),
            diagnostics: DiagnosticSink::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: Document = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of arena slots, including detached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node. Attach it with [`push_child`](Self::push_child) or
    /// [`insert_child`](Self::insert_child).
    pub fn alloc(&mut self, kind: NodeKind, source_span: Option<ParseSourceSpan>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(IrNode::new(kind, source_span));
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&IrNode> {
        self.nodes.get(id.0)
    }

    /// Panics if `id` does not belong to this document.
    pub fn node(&self, id: NodeId) -> &IrNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut IrNode {
        &mut self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children.as_slice()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn source_span(&self, id: NodeId) -> Option<&ParseSourceSpan> {
        self.node(id).source_span.as_ref()
    }

    pub fn add_descriptor(&mut self, descriptor: Descriptor) -> DescriptorId {
        let id = DescriptorId(self.descriptors.len());
        self.descriptors.push(descriptor);
        id
    }

    /// Panics if `id` does not belong to this document.
    pub fn descriptor(&self, id: DescriptorId) -> &Descriptor {
        &self.descriptors[id.0]
    }

    pub fn try_descriptor(&self, id: DescriptorId) -> Result<&Descriptor> {
        self.descriptors
            .get(id.0)
            .ok_or(LoweringError::UnknownDescriptor(id))
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn push_child(&mut self, parent: NodeId, child: NodeId) {
        self.adopt(parent, child);
        self.node_mut(parent).children.push(child);
    }

    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.adopt(parent, child);
        self.node_mut(parent).children.insert_at(index, child);
    }

    /// Detach and return the child at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> NodeId {
        let removed = self
            .node_mut(parent)
            .children
            .remove_at(index)
            .unwrap_or_else(|| panic!("no child at index {} of {}", index, parent));
        self.node_mut(removed).parent = None;
        removed
    }

    /// Put `child` where the child at `index` was, detaching and returning the old one.
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace_child_at(&mut self, parent: NodeId, index: usize, child: NodeId) -> NodeId {
        self.adopt(parent, child);
        let replaced = self
            .node_mut(parent)
            .children
            .replace_at(index, child)
            .unwrap_or_else(|| panic!("no child at index {} of {}", index, parent));
        self.node_mut(replaced).parent = None;
        replaced
    }

    /// Move every child of `from` to the end of `to`, keeping their order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let moved = self.node_mut(from).children.take();
        for child in moved {
            self.node_mut(child).parent = None;
            self.push_child(to, child);
        }
    }

    fn adopt(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.node(child).parent.is_none(),
            "{} is already attached to {:?}",
            child,
            self.node(child).parent
        );
        self.node_mut(child).parent = Some(parent);
    }

    /// Every node under the root matching `predicate`, depth first in source order.
    /// The root itself is not included.
    pub fn find_descendants<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&NodeKind) -> bool,
    {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(self.root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if predicate(&node.kind) {
                found.push(id);
            }
            stack.extend(node.children.reversed());
        }
        found
    }

    fn find_first<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&NodeKind) -> bool,
    {
        let mut stack: Vec<NodeId> = self.children(self.root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if predicate(&node.kind) {
                return Some(id);
            }
            stack.extend(node.children.reversed());
        }
        None
    }

    pub fn find_primary_namespace(&self) -> Option<NodeId> {
        self.find_first(|kind| matches!(kind, NodeKind::Namespace { .. }))
    }

    pub fn find_primary_class(&self) -> Option<NodeId> {
        self.find_first(|kind| matches!(kind, NodeKind::Class { .. }))
    }

    pub fn find_primary_method(&self) -> Option<NodeId> {
        self.find_first(|kind| matches!(kind, NodeKind::Method { .. }))
    }

    /// Concatenated literal text of the subtree rooted at `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current);
            if let Some(content) = node.kind.token_content() {
                text.push_str(content);
            }
            stack.extend(node.children.reversed());
        }
        text
    }

    /// Check that the tree reachable from the root is well formed: every child id
    /// exists, parent links agree with child lists, no node is reachable twice,
    /// and every referenced descriptor is registered.
    pub fn validate(&self) -> Result<()> {
        if self.get(self.root).is_none() {
            return Err(LoweringError::UnknownNode(self.root));
        }

        let mut seen = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(LoweringError::SharedNode(id));
            }
            let node = self.node(id);
            self.validate_descriptors(&node.kind)?;
            for child in &node.children {
                let child_node = self.get(child).ok_or(LoweringError::UnknownNode(child))?;
                if child_node.parent != Some(id) {
                    return Err(LoweringError::ParentMismatch {
                        parent: id,
                        child,
                        actual: child_node.parent,
                    });
                }
                stack.push(child);
            }
        }
        Ok(())
    }

    fn validate_descriptors(&self, kind: &NodeKind) -> Result<()> {
        match kind {
            NodeKind::TagUsage(usage) => {
                for descriptor in &usage.descriptors {
                    self.try_descriptor(*descriptor)?;
                }
            }
            NodeKind::TagAttribute(attribute) => {
                self.try_descriptor(attribute.descriptor)?;
            }
            _ => {}
        }
        Ok(())
    }
}
