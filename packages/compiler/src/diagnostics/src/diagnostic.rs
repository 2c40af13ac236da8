use super::diagnostic_kind::{diagnostic_id, DiagnosticKind, DiagnosticSeverity};
use crate::parse_util::ParseSourceSpan;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

pub type MessageArgs = SmallVec<[String; 2]>;

/// A problem found in the markup. Diagnostics never stop compilation; they are
/// collected and reported when compilation finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_span: Option<ParseSourceSpan>,
    #[serde(default)]
    pub message_args: MessageArgs,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        source_span: Option<ParseSourceSpan>,
        message_args: impl IntoIterator<Item = String>,
    ) -> Self {
        Diagnostic {
            kind,
            source_span,
            message_args: message_args.into_iter().collect(),
        }
    }

    pub fn multiple_components(
        source_span: Option<ParseSourceSpan>,
        tag_name: &str,
        type_names: &[&str],
    ) -> Self {
        Diagnostic::new(
            DiagnosticKind::AmbiguousComponentMatch,
            source_span,
            [tag_name.to_string(), type_names.join(", ")],
        )
    }

    /// `text` is the concatenated source of the offending value segments.
    pub fn unsupported_complex_content(
        source_span: Option<ParseSourceSpan>,
        attribute_name: &str,
        text: &str,
    ) -> Self {
        Diagnostic::new(
            DiagnosticKind::UnsupportedComplexContent,
            source_span,
            [attribute_name.to_string(), text.to_string()],
        )
    }

    pub fn unbound_component_attribute(
        source_span: Option<ParseSourceSpan>,
        type_name: &str,
        attribute_name: &str,
    ) -> Self {
        Diagnostic::new(
            DiagnosticKind::UnboundComponentAttribute,
            source_span,
            [type_name.to_string(), attribute_name.to_string()],
        )
    }

    pub fn id(&self) -> String {
        diagnostic_id(self.kind)
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        self.kind.severity()
    }

    pub fn message(&self) -> String {
        format_message(self.kind.message_format(), &self.message_args)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id(), self.message())?;
        if let Some(span) = &self.source_span {
            write!(f, " ({})", span)?;
        }
        Ok(())
    }
}

/// Substitutes `{n}` placeholders from the template only; argument text is
/// copied verbatim even when it contains placeholder syntax.
fn format_message(template: &str, args: &[String]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        message.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let argument = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            args.get(index).map(|arg| (arg, close))
        });
        match argument {
            Some((arg, close)) => {
                message.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                message.push('{');
                rest = after;
            }
        }
    }
    message.push_str(rest);
    message
}
