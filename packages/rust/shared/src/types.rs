//! Domain types for the OEIS annotation metadata.
//!
//! The metadata producer emits one JSON object per module:
//! `{tag: {declName: {theoremName: {"value": ...}, ...}, ...}, ...}`.
//! JSON object order carries meaning (it determines rendered list order), so
//! every level is an [`IndexMap`], which preserves insertion order through
//! serde.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A reference to a theorem about a declaration/tag pair.
///
/// `value` is the human-readable link label. The producer usually emits a
/// string, but numeric labels occur in the wild, so any scalar is accepted
/// and coerced on display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TheoremRef {
    /// Display label for the theorem link.
    pub value: serde_json::Value,
}

impl TheoremRef {
    /// The label rendered as link text.
    pub fn label(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Ordered theorem references keyed by theorem name (the in-page anchor).
/// May be empty: a declaration can formalize a sequence with no supporting
/// theorems listed.
pub type TheoremSet = IndexMap<String, TheoremRef>;

/// Ordered declarations keyed by declaration name (the in-page anchor).
pub type DeclMap = IndexMap<String, TheoremSet>;

/// Per-module annotation record: tag → declarations formalizing that tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleAnnotation {
    /// Ordered mapping from OEIS tag (e.g. `A000045`) to its declarations.
    pub tags: IndexMap<String, DeclMap>,
}

impl ModuleAnnotation {
    /// Whether this module has no tagged declarations at all.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// The producer's full output: module name → annotation record.
pub type AnnotationIndex = IndexMap<String, ModuleAnnotation>;
