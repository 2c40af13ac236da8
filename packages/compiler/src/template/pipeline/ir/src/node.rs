//! IR Nodes
//!
//! The closed set of node variants that make up a document's intermediate
//! representation. Passes dispatch on [`NodeKind`] with exhaustive matches.

use crate::parse_util::ParseSourceSpan;
use crate::template::pipeline::ir::handle::{DescriptorId, NodeId};
use crate::template::pipeline::ir::node_list::NodeList;
use serde::{Deserialize, Serialize};

/// How a tag usage was written in source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagMode {
    /// `<Tag></Tag>`
    #[default]
    StartTagAndEndTag,
    /// `<Tag />`
    SelfClosing,
    /// `<Tag>`
    StartTagOnly,
}

/// Quoting used for an attribute value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeStructure {
    #[default]
    DoubleQuotes,
    SingleQuotes,
    NoQuotes,
    Minimized,
}

/// A usage of a custom tag, bound upstream to zero or more descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagUsage {
    pub tag_name: String,
    #[serde(default)]
    pub tag_mode: TagMode,
    /// Candidate descriptors in the order the binder supplied them.
    #[serde(default)]
    pub descriptors: Vec<DescriptorId>,
}

/// An attribute of a tag usage bound to a property of one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAttribute {
    pub attribute_name: String,
    /// Key into the descriptor's bound attributes.
    pub bound_attribute: String,
    pub descriptor: DescriptorId,
    #[serde(default)]
    pub attribute_structure: AttributeStructure,
}

/// An attribute of a tag usage that no descriptor binds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlAttribute {
    pub attribute_name: String,
    #[serde(default)]
    pub attribute_structure: AttributeStructure,
}

/// A markup attribute value; each child is one literal or code segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericHtmlAttribute {
    pub attribute_name: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

/// Sets one component property. Children hold the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentAttribute {
    pub attribute_name: String,
    pub property_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub attribute_structure: AttributeStructure,
}

/// Child content of a component. Always the last child before the close node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentBody {
    pub tag_name: String,
    #[serde(default)]
    pub tag_mode: TagMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NodeKind {
    Document,
    Namespace { content: String },
    Class { class_name: String },
    Method { method_name: String },
    HtmlContent { content: String },
    CodeToken { content: String },
    TagUsage(TagUsage),
    TagBody,
    TagAttribute(TagAttribute),
    HtmlAttribute(HtmlAttribute),
    GenericHtmlAttribute(GenericHtmlAttribute),
    CodeExpression,
    ComponentOpen { type_name: String },
    ComponentAttribute(ComponentAttribute),
    ComponentBody(ComponentBody),
    ComponentClose,
}

impl NodeKind {
    /// Variant name, for logs and dumps.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Namespace { .. } => "Namespace",
            NodeKind::Class { .. } => "Class",
            NodeKind::Method { .. } => "Method",
            NodeKind::HtmlContent { .. } => "HtmlContent",
            NodeKind::CodeToken { .. } => "CodeToken",
            NodeKind::TagUsage(_) => "TagUsage",
            NodeKind::TagBody => "TagBody",
            NodeKind::TagAttribute(_) => "TagAttribute",
            NodeKind::HtmlAttribute(_) => "HtmlAttribute",
            NodeKind::GenericHtmlAttribute(_) => "GenericHtmlAttribute",
            NodeKind::CodeExpression => "CodeExpression",
            NodeKind::ComponentOpen { .. } => "ComponentOpen",
            NodeKind::ComponentAttribute(_) => "ComponentAttribute",
            NodeKind::ComponentBody(_) => "ComponentBody",
            NodeKind::ComponentClose => "ComponentClose",
        }
    }

    /// Literal text carried by leaf tokens; `None` for structural nodes.
    pub fn token_content(&self) -> Option<&str> {
        match self {
            NodeKind::HtmlContent { content } | NodeKind::CodeToken { content } => {
                Some(content.as_str())
            }
            NodeKind::Document
            | NodeKind::Namespace { .. }
            | NodeKind::Class { .. }
            | NodeKind::Method { .. }
            | NodeKind::TagUsage(_)
            | NodeKind::TagBody
            | NodeKind::TagAttribute(_)
            | NodeKind::HtmlAttribute(_)
            | NodeKind::GenericHtmlAttribute(_)
            | NodeKind::CodeExpression
            | NodeKind::ComponentOpen { .. }
            | NodeKind::ComponentAttribute(_)
            | NodeKind::ComponentBody(_)
            | NodeKind::ComponentClose => None,
        }
    }

    /// True for the four node kinds produced by component lowering.
    pub fn is_component_structure(&self) -> bool {
        matches!(
            self,
            NodeKind::ComponentOpen { .. }
                | NodeKind::ComponentAttribute(_)
                | NodeKind::ComponentBody(_)
                | NodeKind::ComponentClose
        )
    }
}

/// A node slot in the document arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub children: NodeList,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_span: Option<ParseSourceSpan>,
}

impl IrNode {
    pub fn new(kind: NodeKind, source_span: Option<ParseSourceSpan>) -> Self {
        IrNode {
            kind,
            children: NodeList::new(),
            parent: None,
            source_span,
        }
    }
}
