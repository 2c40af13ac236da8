//! Document Builder
//!
//! Convenience API for producing IR the way the markup parser and descriptor
//! binder do: a document root, a namespace, a class and a render method, with
//! tag usages and their attributes underneath.

use crate::descriptor::Descriptor;
use crate::parse_util::{ParseLocation, ParseSourceSpan};
use crate::template::pipeline::ir::document::Document;
use crate::template::pipeline::ir::handle::{DescriptorId, NodeId};
use crate::template::pipeline::ir::node::{
    AttributeStructure, GenericHtmlAttribute, HtmlAttribute, NodeKind, TagAttribute, TagMode,
    TagUsage,
};

/// One segment of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Html(&'a str),
    Code(&'a str),
}

pub const DEFAULT_NAMESPACE: &str = "__GeneratedComponent";
pub const DEFAULT_CLASS: &str = "AspNetCore_Generated_Document";
pub const RENDER_METHOD: &str = "BuildRenderTree";

/// Builds a [`Document`], assigning every node a synthetic single-line span so
/// diagnostics carry distinct locations.
pub struct DocumentBuilder {
    document: Document,
    method: Option<NodeId>,
    cursor: usize,
}

impl DocumentBuilder {
    /// A document with the standard namespace / class / method skeleton.
    pub fn new(file_path: impl Into<String>) -> Self {
        let mut builder = DocumentBuilder::bare(file_path);
        let root = builder.document.root();
        let namespace = builder.node(
            root,
            NodeKind::Namespace {
                content: DEFAULT_NAMESPACE.to_string(),
            },
            0,
        );
        let class = builder.node(
            namespace,
            NodeKind::Class {
                class_name: DEFAULT_CLASS.to_string(),
            },
            0,
        );
        let method = builder.node(
            class,
            NodeKind::Method {
                method_name: RENDER_METHOD.to_string(),
            },
            0,
        );
        builder.method = Some(method);
        builder
    }

    /// A document with only a root node.
    pub fn bare(file_path: impl Into<String>) -> Self {
        DocumentBuilder {
            document: Document::new(Some(file_path.into())),
            method: None,
            cursor: 0,
        }
    }

    /// Where markup content goes by default: the render method, or the root when
    /// the document has no skeleton.
    pub fn content_root(&self) -> NodeId {
        self.method.unwrap_or_else(|| self.document.root())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn finish(self) -> Document {
        self.document
    }

    pub fn descriptor(&mut self, descriptor: Descriptor) -> DescriptorId {
        self.document.add_descriptor(descriptor)
    }

    /// Append a node of any kind under `parent`, spanning `length` characters.
    pub fn node(&mut self, parent: NodeId, kind: NodeKind, length: usize) -> NodeId {
        let span = self.next_span(length);
        let id = self.document.alloc(kind, Some(span));
        self.document.push_child(parent, id);
        id
    }

    pub fn html(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.node(
            parent,
            NodeKind::HtmlContent {
                content: text.to_string(),
            },
            text.len(),
        )
    }

    pub fn code(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.node(
            parent,
            NodeKind::CodeToken {
                content: text.to_string(),
            },
            text.len(),
        )
    }

    pub fn tag_usage(
        &mut self,
        parent: NodeId,
        tag_name: &str,
        tag_mode: TagMode,
        descriptors: &[DescriptorId],
    ) -> NodeId {
        self.node(
            parent,
            NodeKind::TagUsage(TagUsage {
                tag_name: tag_name.to_string(),
                tag_mode,
                descriptors: descriptors.to_vec(),
            }),
            tag_name.len() + 2,
        )
    }

    /// A body holding `text`; an empty string gives an empty body.
    pub fn body(&mut self, usage: NodeId, text: &str) -> NodeId {
        let body = self.node(usage, NodeKind::TagBody, text.len());
        if !text.is_empty() {
            self.html(body, text);
        }
        body
    }

    /// A bound attribute whose value is a single literal.
    pub fn bound_attribute(
        &mut self,
        usage: NodeId,
        name: &str,
        descriptor: DescriptorId,
        value: &str,
    ) -> NodeId {
        let attribute = self.tag_attribute(usage, name, descriptor, value.len());
        self.html(attribute, value);
        attribute
    }

    /// A bound attribute whose value is an explicit code expression made of `tokens`.
    pub fn bound_expression(
        &mut self,
        usage: NodeId,
        name: &str,
        descriptor: DescriptorId,
        tokens: &[&str],
    ) -> NodeId {
        let length = tokens.iter().map(|token| token.len()).sum();
        let attribute = self.tag_attribute(usage, name, descriptor, length);
        let expression = self.node(attribute, NodeKind::CodeExpression, length);
        for token in tokens {
            self.code(expression, token);
        }
        attribute
    }

    /// A bound attribute whose value is a markup attribute of several segments.
    pub fn bound_markup(
        &mut self,
        usage: NodeId,
        name: &str,
        descriptor: DescriptorId,
        segments: &[Segment<'_>],
    ) -> NodeId {
        let length = segments.iter().map(segment_len).sum();
        let attribute = self.tag_attribute(usage, name, descriptor, length);
        let value = self.node(
            attribute,
            NodeKind::GenericHtmlAttribute(GenericHtmlAttribute {
                attribute_name: name.to_string(),
                prefix: format!(" {}=\"", name),
                suffix: "\"".to_string(),
            }),
            length,
        );
        self.segments(value, segments);
        attribute
    }

    /// A bound attribute with one child per segment.
    pub fn bound_segments(
        &mut self,
        usage: NodeId,
        name: &str,
        descriptor: DescriptorId,
        segments: &[Segment<'_>],
    ) -> NodeId {
        let length = segments.iter().map(segment_len).sum();
        let attribute = self.tag_attribute(usage, name, descriptor, length);
        self.segments(attribute, segments);
        attribute
    }

    /// An attribute on a usage that the binder did not map to any property.
    pub fn html_attribute(&mut self, usage: NodeId, name: &str, value: &str) -> NodeId {
        let attribute = self.node(
            usage,
            NodeKind::HtmlAttribute(HtmlAttribute {
                attribute_name: name.to_string(),
                attribute_structure: AttributeStructure::DoubleQuotes,
            }),
            name.len() + value.len() + 3,
        );
        self.html(attribute, value);
        attribute
    }

    fn tag_attribute(
        &mut self,
        usage: NodeId,
        name: &str,
        descriptor: DescriptorId,
        value_length: usize,
    ) -> NodeId {
        self.node(
            usage,
            NodeKind::TagAttribute(TagAttribute {
                attribute_name: name.to_string(),
                bound_attribute: name.to_string(),
                descriptor,
                attribute_structure: AttributeStructure::DoubleQuotes,
            }),
            name.len() + value_length + 3,
        )
    }

    fn segments(&mut self, parent: NodeId, segments: &[Segment<'_>]) {
        for segment in segments {
            match segment {
                Segment::Html(text) => {
                    self.html(parent, text);
                }
                Segment::Code(text) => {
                    let expression = self.node(parent, NodeKind::CodeExpression, text.len());
                    self.code(expression, text);
                }
            }
        }
    }

    fn next_span(&mut self, length: usize) -> ParseSourceSpan {
        let start = ParseLocation::new(self.document.file_path.clone(), self.cursor, 0, self.cursor);
        self.cursor += length.max(1);
        ParseSourceSpan::single_line(start, length)
    }
}

fn segment_len(segment: &Segment<'_>) -> usize {
    match segment {
        Segment::Html(text) | Segment::Code(text) => text.len(),
    }
}
