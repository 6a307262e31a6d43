//! Metadata acquisition: who formalized what, per module.
//!
//! The annotation index comes from an external producer command (typically a
//! build-system script that introspects the compiled library) which prints
//! the whole index as JSON on stdout. That subprocess boundary is hidden
//! behind [`MetadataSource`], so the pipeline and its tests can run against
//! in-memory fixtures instead.

use std::process::Command;

use tracing::{debug, instrument};

use seqdoc_shared::{AnnotationIndex, Result, SeqDocError};

/// A source of the module → annotation index.
///
/// Any failure maps to [`SeqDocError::Producer`], which aborts the whole
/// batch before any document is touched.
pub trait MetadataSource {
    /// Fetch and decode the full annotation index. Called once per batch;
    /// the output is fully buffered, never streamed.
    fn fetch(&self) -> Result<AnnotationIndex>;
}

// ---------------------------------------------------------------------------
// Subprocess-backed source
// ---------------------------------------------------------------------------

/// Runs an external command and parses its stdout as the annotation index.
#[derive(Debug, Clone)]
pub struct CommandMetadataSource {
    program: String,
    args: Vec<String>,
}

impl CommandMetadataSource {
    /// Create a source that runs `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl MetadataSource for CommandMetadataSource {
    #[instrument(skip(self), fields(program = %self.program))]
    fn fetch(&self) -> Result<AnnotationIndex> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| {
                SeqDocError::producer(format!("failed to run {}: {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SeqDocError::producer(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        debug!(bytes = output.stdout.len(), "producer output captured");
        parse_index(&output.stdout)
    }
}

/// Decode producer output bytes into the annotation index.
fn parse_index(bytes: &[u8]) -> Result<AnnotationIndex> {
    serde_json::from_slice(bytes)
        .map_err(|e| SeqDocError::producer(format!("malformed producer output: {e}")))
}

// ---------------------------------------------------------------------------
// In-memory source for tests and embedding
// ---------------------------------------------------------------------------

/// A fixed, pre-parsed annotation index.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataSource {
    index: AnnotationIndex,
}

impl StaticMetadataSource {
    /// Wrap an already-built index.
    pub fn new(index: AnnotationIndex) -> Self {
        Self { index }
    }
}

impl MetadataSource for StaticMetadataSource {
    fn fetch(&self) -> Result<AnnotationIndex> {
        Ok(self.index.clone())
    }
}
