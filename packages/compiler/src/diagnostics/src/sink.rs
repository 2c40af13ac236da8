use super::diagnostic::Diagnostic;
use super::diagnostic_kind::{DiagnosticKind, DiagnosticSeverity};
use crate::template::pipeline::ir::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub node: NodeId,
    pub diagnostic: Diagnostic,
}

/// Append-only store of diagnostics, keyed by the node they were reported on.
///
/// Entries keep the order in which they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticSink {
    entries: Vec<DiagnosticEntry>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        DiagnosticSink {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, node: NodeId, diagnostic: Diagnostic) {
        self.entries.push(DiagnosticEntry { node, diagnostic });
    }

    pub fn for_node(&self, node: NodeId) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.node == node)
            .map(|entry| &entry.diagnostic)
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &DiagnosticEntry> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.diagnostic.kind == kind)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.diagnostic.severity() == DiagnosticSeverity::Error)
    }
}

impl<'a> IntoIterator for &'a DiagnosticSink {
    type Item = &'a DiagnosticEntry;
    type IntoIter = std::slice::Iter<'a, DiagnosticEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
