//! Module name → documentation file path mapping.

use std::path::{Path, PathBuf};

/// Resolve the HTML file for a module: `a.b.c` → `<doc_root>/a/b/c.html`.
///
/// Pure function; no filesystem access and no existence check.
pub fn module_doc_path(doc_root: &Path, module: &str) -> PathBuf {
    let mut path = doc_root.to_path_buf();
    for part in module.split('.') {
        path.push(part);
    }
    path.set_extension("html");
    path
}
