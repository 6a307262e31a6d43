//! Batch orchestration: fetch the annotation index, then patch every
//! module's documentation page.

pub mod paths;
pub mod pipeline;

pub use paths::module_doc_path;
pub use pipeline::{AnnotateConfig, BatchResult, ModuleFailure, annotate_module, run_batch};
