//! Annotation block construction and document patching.
//!
//! This is the heart of seqdoc: build a small HTML subtree listing the OEIS
//! sequences a module formalizes ([`build_annotation`]), then splice it into
//! the module's generated documentation page ([`patch_document`]).
//!
//! All DOM manipulation goes through the [`dom`] module, so the rest of the
//! code never touches `html5ever`/`ego-tree` types directly beyond node ids.

pub mod builder;
pub mod dom;
pub mod patcher;

pub use builder::{LEAD_IN_TEXT, MARKER_CLASS, build_annotation};
pub use patcher::patch_document;
