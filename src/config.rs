//! Optional JSON configuration file.
//!
//! ```json
//! { "optimize": true, "rootName": "root",
//!   "imports": { "superstruct": "superstruct", "std": "@schema-to-superstruct/std" } }
//! ```
//!
//! Every field is optional; unknown fields are rejected.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::emit::EmitOptions;
use crate::path_de::{from_str_with_path, PathError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Config {
    /// Run the single-arm collapse pass.
    pub optimize: bool,
    /// Export name (before PascalCase) when the root has no `$anchor`.
    pub root_name: String,
    pub imports: Imports,
}

/// Module specifiers written into the import preamble.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Imports {
    pub superstruct: String,
    pub std: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: PathError,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self { optimize: true, root_name: "root".to_string(), imports: Imports::default() }
    }
}

impl Default for Imports {
    fn default() -> Self {
        let emit = EmitOptions::default();
        Self { superstruct: emit.superstruct_module, std: emit.std_module }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = from_str_with_path::<Config>(&source)
            .map_err(|source| ConfigError::Invalid { path: path.to_path_buf(), source })?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            superstruct_module: self.imports.superstruct.clone(),
            std_module: self.imports.std.clone(),
        }
    }
}
