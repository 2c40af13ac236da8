use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable identifiers for the problems component lowering reports.
///
/// The discriminant is the numeric part of the user-facing id (see [`diagnostic_id`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// More than one component descriptor matched the same tag. The first one is used.
    AmbiguousComponentMatch = 9985,

    /// A component attribute mixes markup and code, or has more than one value segment.
    UnsupportedComplexContent = 9986,

    /// An attribute on a component usage does not correspond to any component property.
    UnboundComponentAttribute = 9987,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticSeverity {
    Warning,
    Error,
}

const DIAGNOSTIC_PREFIX: &str = "RZ";

static KINDS_BY_ID: Lazy<HashMap<String, DiagnosticKind>> = Lazy::new(|| {
    DiagnosticKind::ALL
        .iter()
        .map(|kind| (diagnostic_id(*kind), *kind))
        .collect()
});

impl DiagnosticKind {
    pub const ALL: [DiagnosticKind; 3] = [
        DiagnosticKind::AmbiguousComponentMatch,
        DiagnosticKind::UnsupportedComplexContent,
        DiagnosticKind::UnboundComponentAttribute,
    ];

    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            DiagnosticKind::AmbiguousComponentMatch
            | DiagnosticKind::UnsupportedComplexContent
            | DiagnosticKind::UnboundComponentAttribute => DiagnosticSeverity::Error,
        }
    }

    /// Message template; `{n}` is replaced by the n-th message argument.
    pub fn message_format(&self) -> &'static str {
        match self {
            DiagnosticKind::AmbiguousComponentMatch => "Multiple components use the tag '{0}': {1}",
            DiagnosticKind::UnsupportedComplexContent => {
                "Component attributes do not support complex content (mixed code and markup). \
                 Attribute: '{0}', text '{1}'"
            }
            DiagnosticKind::UnboundComponentAttribute => {
                "The component '{0}' does not have an attribute named '{1}'."
            }
        }
    }

    /// Inverse of [`diagnostic_id`].
    pub fn from_id(id: &str) -> Option<DiagnosticKind> {
        KINDS_BY_ID.get(id).copied()
    }
}

/// User-facing id of a diagnostic kind, e.g. `RZ9985`.
pub fn diagnostic_id(kind: DiagnosticKind) -> String {
    format!("{}{}", DIAGNOSTIC_PREFIX, kind as u32)
}
