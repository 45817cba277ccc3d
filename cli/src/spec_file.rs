//! Loading parser schemas from disk.
//!
//! Schemas are plain [`CliSpec`] documents in JSON or YAML; the format is
//! picked from the file extension.
//!
//! # Example YAML
//!
//! ```yaml
//! name: app
//! global_flags:
//!   - { full_name: value, short_name: v, type: uint32 }
//!   - { full_name: switch, short_name: s, type: bool }
//! commands:
//!   - name: download
//!     description: Fetch a resource
//!     flags:
//!       - { full_name: url, short_name: u, type: string }
//! ```

use std::fs;
use std::path::Path;

use optly_core::{CliSpec, validate_spec};
use tracing::debug;

use crate::error::{CliError, Result};

/// On-disk schema encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Self::Yaml)
            }
            _ => Err(CliError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Reads and deserializes a schema without validating it.
pub fn load_spec(path: &Path) -> Result<CliSpec> {
    let format = SpecFormat::from_path(path)?;
    let contents = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let spec = match format {
        SpecFormat::Json => serde_json::from_str(&contents)?,
        SpecFormat::Yaml => serde_yaml::from_str(&contents)?,
    };
    debug!(path = %path.display(), ?format, "loaded schema");
    Ok(spec)
}

/// Reads a schema and rejects it if validation finds any problem.
pub fn load_validated_spec(path: &Path) -> Result<CliSpec> {
    let spec = load_spec(path)?;
    let errors = validate_spec(&spec);
    if errors.is_empty() {
        Ok(spec)
    } else {
        Err(CliError::InvalidSpec {
            path: path.to_path_buf(),
            errors,
        })
    }
}
