//! Descriptors
//!
//! Metadata describing the types a tag usage can bind to. Descriptors are
//! discovered and bound upstream; the compiler only reads them.

use crate::template::pipeline::ir::{DescriptorId, Document, NodeId, NodeKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Descriptor kind recognized as a component.
pub const COMPONENT_KIND: &str = "Components.Component";

/// Descriptor kind of classic tag helpers, which component lowering leaves alone.
pub const TAG_HELPER_KIND: &str = "ITagHelper";

/// A bindable attribute and the property it projects onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundAttribute {
    pub name: String,
    pub property_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub kind: String,
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_name: Option<String>,
    /// Keyed by attribute name, in declaration order.
    #[serde(default)]
    pub bound_attributes: IndexMap<String, BoundAttribute>,
}

impl Descriptor {
    pub fn new(kind: impl Into<String>, type_name: impl Into<String>) -> Self {
        Descriptor {
            kind: kind.into(),
            type_name: type_name.into(),
            assembly_name: None,
            bound_attributes: IndexMap::new(),
        }
    }

    pub fn component(type_name: impl Into<String>) -> Self {
        Descriptor::new(COMPONENT_KIND, type_name)
    }

    pub fn tag_helper(type_name: impl Into<String>) -> Self {
        Descriptor::new(TAG_HELPER_KIND, type_name)
    }

    pub fn with_assembly(mut self, assembly_name: impl Into<String>) -> Self {
        self.assembly_name = Some(assembly_name.into());
        self
    }

    pub fn with_bound_attribute(
        mut self,
        name: impl Into<String>,
        property_name: impl Into<String>,
        type_name: Option<&str>,
    ) -> Self {
        let name = name.into();
        self.bound_attributes.insert(
            name.clone(),
            BoundAttribute {
                name,
                property_name: property_name.into(),
                type_name: type_name.map(str::to_string),
            },
        );
        self
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn bound_attribute(&self, name: &str) -> Option<&BoundAttribute> {
        self.bound_attributes.get(name)
    }

    /// Property a bound attribute writes to.
    pub fn property_name(&self, attribute: &str) -> Option<&str> {
        self.bound_attribute(attribute)
            .map(|bound| bound.property_name.as_str())
    }
}

/// Candidate descriptors for a single tag usage.
pub type Candidates = SmallVec<[DescriptorId; 2]>;

/// Supplies the descriptors bound to a tag usage.
///
/// Implementations must return candidates in a stable order; the first one is
/// used when several match.
pub trait DescriptorResolver: Send + Sync {
    fn resolve(&self, document: &Document, usage: NodeId) -> Candidates;
}

/// Returns the descriptors recorded on the usage by the binder, in the order
/// the binder supplied them.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundDescriptorResolver;

impl DescriptorResolver for BoundDescriptorResolver {
    fn resolve(&self, document: &Document, usage: NodeId) -> Candidates {
        match &document.node(usage).kind {
            NodeKind::TagUsage(tag) => tag.descriptors.iter().copied().collect(),
            _ => Candidates::new(),
        }
    }
}
