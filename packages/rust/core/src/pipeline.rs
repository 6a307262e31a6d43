//! The annotate batch: index fetch → per-module read/patch/write.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use scraper::Html;
use tracing::{info, instrument, warn};

use seqdoc_annotate::{build_annotation, patch_document};
use seqdoc_metadata::MetadataSource;
use seqdoc_shared::{AppConfig, ModuleAnnotation, Result, SeqDocError};

use crate::paths::module_doc_path;

/// Runtime configuration for one batch run.
#[derive(Debug, Clone)]
pub struct AnnotateConfig {
    /// Root of the generated documentation tree.
    pub doc_root: PathBuf,
    /// Catalogue base URL that tags are appended to.
    pub catalogue_base: String,
    /// Abort on the first per-module failure instead of collecting it.
    pub fail_fast: bool,
}

impl From<&AppConfig> for AnnotateConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            doc_root: PathBuf::from(&config.docs.root),
            catalogue_base: config.catalogue.base_url.clone(),
            fail_fast: config.batch.fail_fast,
        }
    }
}

/// A per-module failure recorded under the report-and-continue policy.
#[derive(Debug)]
pub struct ModuleFailure {
    /// Module whose document could not be annotated.
    pub module: String,
    /// Underlying cause.
    pub error: SeqDocError,
}

/// Outcome of a batch run.
#[derive(Debug)]
pub struct BatchResult {
    /// Modules whose documents were patched and written.
    pub patched: Vec<String>,
    /// Modules that failed (empty when `fail_fast` is set, since the first
    /// failure aborts the run instead).
    pub failures: Vec<ModuleFailure>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl BatchResult {
    /// True when every module was annotated.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the full batch.
///
/// The producer is invoked exactly once, up front; a producer failure aborts
/// before any file is touched. Per-module failures are logged and collected
/// (report-and-continue), or returned immediately when `fail_fast` is set.
/// Each module is one atomic read-parse-patch-serialize-write sequence.
#[instrument(skip_all, fields(doc_root = %config.doc_root.display()))]
pub fn run_batch(source: &dyn MetadataSource, config: &AnnotateConfig) -> Result<BatchResult> {
    let start = Instant::now();

    let index = source.fetch()?;
    info!(modules = index.len(), "annotation index fetched");

    let mut patched = Vec::new();
    let mut failures = Vec::new();

    for (module, annotation) in &index {
        match annotate_module(module, annotation, config) {
            Ok(path) => {
                info!(%module, path = %path.display(), "document annotated");
                patched.push(module.clone());
            }
            Err(error) if config.fail_fast => return Err(error),
            Err(error) => {
                warn!(%module, %error, "failed to annotate module, continuing");
                failures.push(ModuleFailure {
                    module: module.clone(),
                    error,
                });
            }
        }
    }

    let result = BatchResult {
        patched,
        failures,
        elapsed: start.elapsed(),
    };

    info!(
        patched = result.patched.len(),
        failed = result.failures.len(),
        elapsed_ms = result.elapsed.as_millis(),
        "batch complete"
    );

    Ok(result)
}

/// Annotate a single module's document in place.
///
/// Reads the whole file, patches the parse tree, and overwrites the file
/// with the serialized result. Nothing is written if any earlier step fails.
pub fn annotate_module(
    module: &str,
    annotation: &ModuleAnnotation,
    config: &AnnotateConfig,
) -> Result<PathBuf> {
    let path = module_doc_path(&config.doc_root, module);

    let html = std::fs::read_to_string(&path).map_err(|e| SeqDocError::read(&path, e))?;
    let mut doc = Html::parse_document(&html);

    let block = build_annotation(&mut doc.tree, &config.catalogue_base, annotation);
    patch_document(&mut doc, module, block)?;

    std::fs::write(&path, doc.html()).map_err(|e| SeqDocError::write(&path, e))?;
    Ok(path)
}
