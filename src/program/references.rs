//! Whole-program reference resolution.
//!
//! Name-based: a reference to a declaration is any identifier-kind node
//! anywhere in the program whose text equals the declaration's name. This
//! includes the identifier at the declaration site itself, so a named
//! declaration always has at least one occurrence.

use tracing::debug;

use super::{NodeRef, Program};

/// Identifier node kinds that can refer to a declaration.
const IDENTIFIER_KINDS: &[&str] = &[
    "Identifier",
    "TypeIdentifier",
    "PropertyIdentifier",
    "ShorthandPropertyIdentifier",
    "ShorthandPropertyIdentifierPattern",
];

impl Program {
    /// Every syntactic occurrence in the program that refers to the given
    /// declaration, in file-then-position order.
    ///
    /// Declarations without a name (import/export statements, anonymous
    /// nodes) resolve to zero occurrences.
    pub fn find_references(&self, decl: NodeRef) -> Vec<NodeRef> {
        let name = match self.record(decl).name.as_deref() {
            Some(name) => name,
            None => return Vec::new(),
        };

        let mut occurrences = Vec::new();
        for (file_idx, file) in self.files().iter().enumerate() {
            for (node_idx, record) in file.nodes().iter().enumerate() {
                if !IDENTIFIER_KINDS.contains(&record.kind.as_str()) {
                    continue;
                }
                if &file.source()[record.start_byte..record.end_byte] == name {
                    occurrences.push(NodeRef {
                        file: file_idx,
                        node: node_idx,
                    });
                }
            }
        }

        debug!(name, count = occurrences.len(), "resolved references");
        occurrences
    }
}
