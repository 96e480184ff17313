//! # Configuration Loader
//!
//! Reads the TOML configuration file and maps it into the [`AppConfig`] DTO.
//! Pure data loading: no validation, no default values.

use std::path::{Path, PathBuf};

use anyhow::Context;
use kc_core::config::AppConfig;

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Load configuration, treating a missing file as an empty configuration.
///
/// A file that exists but cannot be parsed is still an error.
pub fn load_config_or_empty(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        return Ok(AppConfig::empty());
    }
    load_config(config_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [store]
            bundle_namespace = "com.kontax.cam"

            [[collections]]
            id = "filmA"
            name = "Film A"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.bundle_namespace, "com.kontax.cam");
        assert_eq!(config.collections.len(), 1);
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let result = load_config(PathBuf::from("/this/path/does/not/exist/config.toml"));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_returns_parse_error_on_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[store\nbundle_namespace = ").unwrap();

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let config =
            load_config_or_empty(Path::new("/this/path/does/not/exist/config.toml")).unwrap();
        assert_eq!(config, AppConfig::empty());
    }
}
