//! Component Lowering Phase
//!
//! Rewrites every tag usage bound to a component descriptor into the shape the
//! code generator expects:
//!
//! ```text
//! ComponentOpen, ComponentAttribute*, ComponentBody, ComponentClose
//! ```
//!
//! Usages bound to other descriptor kinds are left alone. Unsupported
//! attributes are reported on the usage and removed; they never abort the pass.

use crate::config::CompilerConfig;
use crate::descriptor::{
    BoundDescriptorResolver, Descriptor, DescriptorResolver, COMPONENT_KIND,
};
use crate::diagnostics::Diagnostic;
use crate::logging::{Logger, NullLogger};
use crate::template::pipeline::ir::{
    ComponentAttribute, ComponentBody, DescriptorId, Document, NodeId, NodeKind, TagMode,
};
use crate::template::pipeline::src::compilation::DocumentPass;
use std::sync::Arc;

/// Runs after the document skeleton is complete and before code generation.
pub const COMPONENT_LOWERING_ORDER: i32 = 100;

pub struct ComponentLoweringPass {
    component_kind: String,
    resolver: Box<dyn DescriptorResolver>,
    logger: Arc<dyn Logger>,
}

impl Default for ComponentLoweringPass {
    fn default() -> Self {
        ComponentLoweringPass::new()
    }
}

impl ComponentLoweringPass {
    pub fn new() -> Self {
        ComponentLoweringPass {
            component_kind: COMPONENT_KIND.to_string(),
            resolver: Box::new(BoundDescriptorResolver),
            logger: Arc::new(NullLogger::new()),
        }
    }

    pub fn from_config(config: &CompilerConfig, logger: Arc<dyn Logger>) -> Self {
        ComponentLoweringPass::new()
            .with_component_kind(config.component_kind.clone())
            .with_logger(logger)
    }

    pub fn with_component_kind(mut self, kind: impl Into<String>) -> Self {
        self.component_kind = kind.into();
        self
    }

    pub fn with_resolver(mut self, resolver: impl DescriptorResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn component_kind(&self) -> &str {
        &self.component_kind
    }

    pub fn execute(&self, document: &mut Document) {
        if document.find_primary_namespace().is_none() || document.find_primary_class().is_none() {
            // Without the standard skeleton there is nothing to attach components to.
            self.logger.debug(&format!(
                "component lowering skipped for {}: no primary namespace or class",
                file_label(document)
            ));
            return;
        }

        let usages = document.find_descendants(|kind| matches!(kind, NodeKind::TagUsage(_)));
        self.logger.debug(&format!(
            "lowering {} tag usage(s) in {}",
            usages.len(),
            file_label(document)
        ));

        for usage in usages {
            if is_lowered(document, usage) {
                continue;
            }

            let candidates = self.resolver.resolve(document, usage);
            let Some(&descriptor) = candidates.first() else {
                self.logger.debug(&format!(
                    "tag usage {} has no bound descriptor, leaving it untouched",
                    usage
                ));
                continue;
            };

            if candidates.len() > 1 {
                let type_names: Vec<&str> = candidates
                    .iter()
                    .map(|id| document.descriptor(*id).type_name.as_str())
                    .collect();
                let diagnostic = Diagnostic::multiple_components(
                    document.source_span(usage).cloned(),
                    tag_usage_name(document, usage),
                    &type_names,
                );
                self.report(document, usage, diagnostic);
            }

            self.rewrite_usage(document, usage, descriptor);
        }
    }

    fn rewrite_usage(&self, document: &mut Document, usage: NodeId, descriptor_id: DescriptorId) {
        let descriptor = document.descriptor(descriptor_id).clone();
        if !descriptor.is_kind(&self.component_kind) {
            return;
        }

        let (tag_name, tag_mode) = match document.kind(usage) {
            NodeKind::TagUsage(tag) => (tag.tag_name.clone(), tag.tag_mode),
            other => unreachable!("expected a tag usage at {}, found {}", usage, other.name()),
        };

        // Open and close scope the component.
        let open = document.alloc(
            NodeKind::ComponentOpen {
                type_name: descriptor.type_name.clone(),
            },
            None,
        );
        document.insert_child(usage, 0, open);

        self.relocate_body(document, usage, &tag_name, tag_mode);

        let close = document.alloc(NodeKind::ComponentClose, None);
        document.push_child(usage, close);

        self.rewrite_attributes(document, usage, descriptor_id, &descriptor);
        self.reject_unbound_attributes(document, usage, &descriptor);
    }

    /// The body renders after every attribute is set, wherever it appeared in source.
    /// A usage written without content still gets an empty body.
    fn relocate_body(&self, document: &mut Document, usage: NodeId, tag_name: &str, tag_mode: TagMode) {
        let mut relocated = false;
        for index in (0..document.children(usage).len()).rev() {
            let child = document.children(usage)[index];
            if !matches!(document.kind(child), NodeKind::TagBody) {
                continue;
            }

            document.remove_child_at(usage, index);
            let body = document.alloc(
                NodeKind::ComponentBody(ComponentBody {
                    tag_name: tag_name.to_string(),
                    tag_mode,
                }),
                document.source_span(child).cloned(),
            );
            document.move_children(child, body);
            document.push_child(usage, body);
            relocated = true;
        }

        if !relocated {
            let body = document.alloc(
                NodeKind::ComponentBody(ComponentBody {
                    tag_name: tag_name.to_string(),
                    tag_mode,
                }),
                None,
            );
            document.push_child(usage, body);
        }
    }

    fn rewrite_attributes(
        &self,
        document: &mut Document,
        usage: NodeId,
        descriptor_id: DescriptorId,
        descriptor: &Descriptor,
    ) {
        for index in (0..document.children(usage).len()).rev() {
            let child = document.children(usage)[index];
            let attribute = match document.kind(child) {
                NodeKind::TagAttribute(attribute) if attribute.descriptor == descriptor_id => {
                    attribute.clone()
                }
                _ => continue,
            };

            if let Some(segments) = complex_content(document, child) {
                let text: String = segments
                    .iter()
                    .map(|segment| document.text_content(*segment))
                    .collect();
                let diagnostic = Diagnostic::unsupported_complex_content(
                    document.source_span(child).cloned(),
                    &attribute.attribute_name,
                    &text,
                );
                self.report(document, usage, diagnostic);
                document.remove_child_at(usage, index);
                continue;
            }

            let bound = descriptor.bound_attribute(&attribute.bound_attribute);
            if bound.is_none() {
                self.logger.warn(&format!(
                    "attribute '{}' is bound to {} but the descriptor does not declare it",
                    attribute.bound_attribute, descriptor.type_name
                ));
            }
            let lowered = document.alloc(
                NodeKind::ComponentAttribute(ComponentAttribute {
                    attribute_name: attribute.attribute_name.clone(),
                    property_name: bound
                        .map(|bound| bound.property_name.clone())
                        .unwrap_or_else(|| attribute.bound_attribute.clone()),
                    type_name: bound.and_then(|bound| bound.type_name.clone()),
                    attribute_structure: attribute.attribute_structure,
                }),
                document.source_span(child).cloned(),
            );
            document.move_children(child, lowered);
            document.replace_child_at(usage, index, lowered);
        }
    }

    fn reject_unbound_attributes(&self, document: &mut Document, usage: NodeId, descriptor: &Descriptor) {
        for index in (0..document.children(usage).len()).rev() {
            let child = document.children(usage)[index];
            let NodeKind::HtmlAttribute(attribute) = document.kind(child) else {
                continue;
            };

            let diagnostic = Diagnostic::unbound_component_attribute(
                document.source_span(child).cloned(),
                &descriptor.type_name,
                &attribute.attribute_name,
            );
            self.report(document, usage, diagnostic);
            document.remove_child_at(usage, index);
        }
    }

    fn report(&self, document: &mut Document, node: NodeId, diagnostic: Diagnostic) {
        self.logger.warn(&diagnostic.to_string());
        document.diagnostics.add(node, diagnostic);
    }
}

impl DocumentPass for ComponentLoweringPass {
    fn name(&self) -> &'static str {
        "ComponentLowering"
    }

    fn order(&self) -> i32 {
        COMPONENT_LOWERING_ORDER
    }

    fn execute(&self, document: &mut Document) {
        ComponentLoweringPass::execute(self, document);
    }
}

/// The children that make an attribute value impossible to map onto a single
/// property assignment, or `None` when the value is simple.
fn complex_content(document: &Document, attribute: NodeId) -> Option<Vec<NodeId>> {
    let children = document.children(attribute);
    match children {
        [single] => match document.kind(*single) {
            // Mixed literal and expression segments in a markup value.
            NodeKind::GenericHtmlAttribute(_) if document.children(*single).len() > 1 => {
                Some(document.children(*single).to_vec())
            }
            // An explicit `@` inside the value escapes the single-expression form.
            NodeKind::CodeExpression if document.children(*single).len() > 1 => {
                Some(document.children(*single).to_vec())
            }
            _ => None,
        },
        [_, _, ..] => Some(children.to_vec()),
        [] => None,
    }
}

/// A usage whose first child is a component open node has already been lowered.
fn is_lowered(document: &Document, usage: NodeId) -> bool {
    document
        .children(usage)
        .first()
        .is_some_and(|first| matches!(document.kind(*first), NodeKind::ComponentOpen { .. }))
}

fn tag_usage_name(document: &Document, usage: NodeId) -> &str {
    match document.kind(usage) {
        NodeKind::TagUsage(tag) => &tag.tag_name,
        other => unreachable!("expected a tag usage at {}, found {}", usage, other.name()),
    }
}

fn file_label(document: &Document) -> &str {
    document.file_path.as_deref().unwrap_or("<anonymous document>")
}
