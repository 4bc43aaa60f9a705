//! Configuration for the documentation service.
//!
//! Configuration is stored in TOML and resolved from, in order: an explicit
//! path, the `MMDOCS_CONFIG` environment variable, `XDG_CONFIG_HOME`, or a
//! `~/.mmdocs/` fallback. A missing file yields defaults; a malformed file
//! degrades to defaults with a warning so that a broken extras list never
//! takes the whole service down.
//!
//! ## Example configuration file
//!
//! ```toml
//! [paths]
//! docs_dir = "mermaid/docs/syntax"
//! guides_dir = "guides"
//! reference_file = "reference.md"
//!
//! [oracle]
//! enabled = false
//! command = "mmdc"
//!
//! [[extras]]
//! name = "style-guide"
//! uri = "mmdocs://guides/style-guide"
//! file = "style-guide.md"
//! description = "House style rules for diagrams"
//!
//! [[prompts]]
//! name = "diagram-workflow"
//! title = "Diagram authoring workflow"
//! file = "workflow.md"
//! description = "Read before working with any diagram"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

/// Name of the configuration file inside the config directory.
const CONFIG_FILE_NAME: &str = "mmdocs.toml";

/// Service configuration.
///
/// All fields have defaults; an absent config file is not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File system paths for the corpus and supplementary documents.
    pub paths: PathsConfig,
    /// External parser oracle settings.
    pub oracle: OracleConfig,
    /// Supplementary read-only documents to expose alongside the corpus.
    pub extras: Vec<ExtraDoc>,
    /// Prompt texts to expose to callers.
    pub prompts: Vec<PromptEntry>,
}

/// File system paths configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory containing the syntax documentation corpus (`*.md`).
    pub docs_dir: PathBuf,
    /// Directory containing guides, prompt files, and the examples reference.
    pub guides_dir: PathBuf,
    /// Examples reference file, relative to `guides_dir`.
    pub reference_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("mermaid/docs/syntax"),
            guides_dir: PathBuf::from("guides"),
            reference_file: "reference.md".to_string(),
        }
    }
}

/// Settings for the external full-grammar parser oracle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Whether to consult the oracle after the structural checks pass.
    pub enabled: bool,
    /// Executable to invoke (looked up on `PATH` unless absolute).
    pub command: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: "mmdc".to_string(),
        }
    }
}

/// A supplementary document declared in configuration.
///
/// These are advisory, read-only resources; a missing backing file is served
/// as a placeholder payload rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraDoc {
    /// Short identifier for the resource.
    pub name: String,
    /// URI the resource is exposed under.
    pub uri: String,
    /// Backing file, relative to `guides_dir`.
    pub file: String,
    /// Human-readable description.
    pub description: String,
}

/// A prompt text declared in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptEntry {
    /// Short identifier for the prompt.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Backing file, relative to `guides_dir`.
    pub file: String,
    /// Human-readable description.
    pub description: String,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Honors the `MMDOCS_CONFIG` environment variable (path to a TOML file),
    /// then `XDG_CONFIG_HOME/mmdocs/mmdocs.toml`, then `~/.mmdocs/mmdocs.toml`.
    /// A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if no candidate config directory can be
    /// determined at all.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var("MMDOCS_CONFIG") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(Self::load_from(Path::new(trimmed)));
            }
        }

        Ok(Self::load_from(&Self::default_config_path()?))
    }

    /// Load configuration from an explicit file path.
    ///
    /// A missing file yields defaults. A file that exists but cannot be read
    /// or parsed also yields defaults, with a warning, so that one bad config
    /// never prevents the service from starting (the corpus itself is
    /// unaffected by config damage).
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                return Self::default();
            },
        };

        match toml::from_str::<Self>(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                Self::default()
            },
        }
    }

    /// Determine the default configuration file path honoring overrides.
    fn default_config_path() -> Result<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            let trimmed = xdg.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed).join("mmdocs").join(CONFIG_FILE_NAME));
            }
        }

        if let Some(base_dirs) = BaseDirs::new() {
            return Ok(base_dirs.home_dir().join(".mmdocs").join(CONFIG_FILE_NAME));
        }

        Err(Error::Config(
            "Failed to determine configuration directory".into(),
        ))
    }

    /// Resolve the docs directory, honoring the `MMDOCS_DOCS_DIR` override.
    #[must_use]
    pub fn docs_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var("MMDOCS_DOCS_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        self.paths.docs_dir.clone()
    }

    /// Resolve the guides directory, honoring the `MMDOCS_GUIDES_DIR` override.
    #[must_use]
    pub fn guides_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var("MMDOCS_GUIDES_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        self.paths.guides_dir.clone()
    }

    /// Full path to the examples reference file.
    #[must_use]
    pub fn reference_path(&self) -> PathBuf {
        self.guides_dir().join(&self.paths.reference_file)
    }

    /// Full path to a file declared relative to the guides directory.
    #[must_use]
    pub fn guide_path(&self, file: &str) -> PathBuf {
        self.guides_dir().join(file)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.docs_dir, PathBuf::from("mermaid/docs/syntax"));
        assert_eq!(config.paths.reference_file, "reference.md");
        assert!(!config.oracle.enabled);
        assert_eq!(config.oracle.command, "mmdc");
        assert!(config.extras.is_empty());
        assert!(config.prompts.is_empty());
    }

    #[test]
    fn test_load_from_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml"));
        assert!(config.extras.is_empty());
    }

    #[test]
    fn test_load_from_parses_extras_and_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mmdocs.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[paths]
docs_dir = "docs"
guides_dir = "extra"
reference_file = "ref.md"

[oracle]
enabled = true
command = "custom-mmdc"

[[extras]]
name = "cheatsheet"
uri = "mmdocs://guides/cheatsheet"
file = "cheatsheet.md"
description = "Quick syntax reference"

[[prompts]]
name = "workflow"
title = "Workflow"
file = "workflow.md"
description = "Authoring workflow"
"#
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.paths.docs_dir, PathBuf::from("docs"));
        assert!(config.oracle.enabled);
        assert_eq!(config.oracle.command, "custom-mmdc");
        assert_eq!(config.extras.len(), 1);
        assert_eq!(config.extras[0].name, "cheatsheet");
        assert_eq!(config.prompts.len(), 1);
        assert_eq!(config.reference_path(), PathBuf::from("extra/ref.md"));
    }

    #[test]
    fn test_load_from_malformed_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mmdocs.toml");
        fs::write(&path, "this is [not toml").unwrap();

        let config = Config::load_from(&path);
        assert!(config.extras.is_empty());
        assert_eq!(config.oracle.command, "mmdc");
    }

    #[test]
    fn test_guide_path_joins_guides_dir() {
        let config = Config::default();
        assert_eq!(
            config.guide_path("workflow.md"),
            PathBuf::from("guides/workflow.md")
        );
    }
}
