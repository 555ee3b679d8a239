//! Configuration for gotypes.
//!
//! Loaded from an explicit path or from `.gotypes/config.toml` under the
//! working directory. Missing tables and keys fall back to defaults.
//!
//! Example config.toml:
//! ```toml
//! [extract]
//! camel_case_fields = true
//!
//! [typescript]
//! element_nullability = "null-or-undefined"
//! nullable_map_values = false
//! nullable_fields = true
//! eslint_disable = true
//! ```

use crate::error::Error;
use crate::input::ExtractOptions;
use crate::output::TypeScriptOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractOptions,
    pub typescript: TypeScriptOptions,
}

impl Config {
    /// Config path relative to a project directory.
    pub fn project_path(dir: &Path) -> PathBuf {
        dir.join(".gotypes").join("config.toml")
    }

    /// Load configuration for a project directory.
    ///
    /// Returns defaults when `.gotypes/config.toml` does not exist. A file
    /// that exists but cannot be read or parsed is an error.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let path = Self::project_path(dir);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Load config from a file path that must exist.
    pub fn load_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::parse(&content).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Nullability;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.extract.camel_case_fields);
        assert_eq!(
            config.typescript.element_nullability,
            Nullability::NullOrUndefined
        );
        assert!(!config.typescript.nullable_map_values);
        assert!(config.typescript.nullable_fields);
        assert!(config.typescript.eslint_disable);
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(".gotypes");
        std::fs::create_dir_all(&config_dir).unwrap();

        let mut file = std::fs::File::create(config_dir.join("config.toml")).unwrap();
        writeln!(
            file,
            r#"
[extract]
camel_case_fields = false

[typescript]
element_nullability = "null"
nullable_map_values = true
"#
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert!(!config.extract.camel_case_fields);
        assert_eq!(config.typescript.element_nullability, Nullability::Null);
        assert!(config.typescript.nullable_map_values);
        assert!(config.typescript.eslint_disable); // default
    }

    #[test]
    fn test_missing_project_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.extract.camel_case_fields);
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[typescript]\nelement_nullability = \"sometimes\"\n").unwrap();
        let err = Config::load_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
