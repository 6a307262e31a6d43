//! Application configuration for seqdoc.
//!
//! Config lives in an optional `seqdoc.toml` next to the project being
//! documented. CLI flags override config file values, which override
//! defaults. Defaults match the upstream doc-gen layout this tool was built
//! against (`.lake/build/doc`, `./run_meta.sh`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqDocError};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "seqdoc.toml";

// ---------------------------------------------------------------------------
// Config structs (matching seqdoc.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// `[docs]` section.
    #[serde(default)]
    pub docs: DocsConfig,

    /// `[producer]` section.
    #[serde(default)]
    pub producer: ProducerConfig,

    /// `[catalogue]` section.
    #[serde(default)]
    pub catalogue: CatalogueConfig,

    /// `[batch]` section.
    #[serde(default)]
    pub batch: BatchConfig,
}

/// `[docs]` section — where the generated HTML lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Root directory of the generated documentation tree.
    #[serde(default = "default_doc_root")]
    pub root: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            root: default_doc_root(),
        }
    }
}

fn default_doc_root() -> String {
    ".lake/build/doc".into()
}

/// `[producer]` section — the external metadata command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerConfig {
    /// Command that prints the annotation index as JSON on stdout.
    #[serde(default = "default_producer_command")]
    pub command: String,

    /// Arguments passed to the command.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            command: default_producer_command(),
            args: Vec::new(),
        }
    }
}

fn default_producer_command() -> String {
    "./run_meta.sh".into()
}

/// `[catalogue]` section — the external sequence catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueConfig {
    /// Base URL that tags are appended to as a path segment.
    #[serde(default = "default_catalogue_base")]
    pub base_url: String,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalogue_base(),
        }
    }
}

fn default_catalogue_base() -> String {
    "https://oeis.org".into()
}

/// `[batch]` section — per-module failure policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Abort on the first per-module failure instead of the default
    /// report-and-continue behavior.
    #[serde(default)]
    pub fail_fast: bool,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the application config from the working directory.
/// Returns defaults if `seqdoc.toml` does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = Path::new(CONFIG_FILE_NAME);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SeqDocError::read(path, e))?;

    toml::from_str(&content)
        .map_err(|e| SeqDocError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file at `path`. Returns the path written.
pub fn init_config(path: &Path) -> Result<PathBuf> {
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SeqDocError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| SeqDocError::write(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains(".lake/build/doc"));
        assert!(toml_str.contains("run_meta.sh"));
        assert!(toml_str.contains("https://oeis.org"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.docs.root, ".lake/build/doc");
        assert_eq!(parsed.catalogue.base_url, "https://oeis.org");
        assert!(!parsed.batch.fail_fast);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[docs]
root = "build/doc"

[batch]
fail_fast = true
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.docs.root, "build/doc");
        assert!(config.batch.fail_fast);
        assert_eq!(config.producer.command, "./run_meta.sh");
        assert_eq!(config.catalogue.base_url, "https://oeis.org");
    }

    #[test]
    fn producer_args_parse() {
        let toml_str = r#"
[producer]
command = "lake"
args = ["exe", "meta"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.producer.command, "lake");
        assert_eq!(config.producer.args, ["exe", "meta"]);
    }
}
