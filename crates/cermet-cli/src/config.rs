//! Configuration file loading for the CLI
//!
//! Finds the TOML file holding the `[parser]`, `[registry]` and `[cache]`
//! sections and checks its values before any row is parsed, so a bad
//! threshold or molar mass is reported against the file rather than
//! surfacing as odd results.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info, warn};
use thiserror::Error;

use cermet::{
    CermetError,
    config::{AppConfig, ConfigError},
};

/// Configuration file errors for CLI
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid [{section}] section in {path}: {source}")]
    Invalid {
        path: PathBuf,
        section: &'static str,
        source: ConfigError,
    },
}

impl ConfigFileError {
    fn invalid(path: &Path, source: ConfigError) -> Self {
        let section = match &source {
            ConfigError::Parser(_) => "parser",
            ConfigError::Registry(_) => "registry",
        };
        Self::Invalid {
            path: path.to_path_buf(),
            section,
            source,
        }
    }
}

impl From<ConfigFileError> for CermetError {
    fn from(err: ConfigFileError) -> Self {
        match err {
            ConfigFileError::Invalid { source, .. } => CermetError::Config(source),
            err => CermetError::Io(io::Error::other(err.to_string())),
        }
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (cermet/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CermetError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("cermet/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "cermet", "cermet") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file is missing, unreadable, not valid TOML for
/// [`AppConfig`], or holds out-of-range parser thresholds or registry
/// values.
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CermetError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigFileError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))?;

    if let Err(source) = config.validate() {
        let err = ConfigFileError::invalid(path, source);
        warn!("{err}");
        return Err(err.into());
    }

    debug!(
        extends_registry = !config.registry.is_empty(),
        cache_capacity = config.cache.capacity(),
        implicit_quantity:? = config.parser.implicit_quantity();
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use cermet::ParserConfig;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_explicit_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[parser]\nhea_min_elements = 5").unwrap();

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.parser.hea_min_elements(), 5);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();

        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[parser]\nunknown_setting = 1").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();

        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }

    #[test]
    fn test_out_of_range_threshold() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[parser]\nsum_tolerance = -1.0").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();

        assert!(matches!(err, CermetError::Config(ConfigError::Parser(_))));
    }

    #[test]
    fn test_invalid_registry_entry() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[registry]\nmolar_masses = {{ Sc = -1.0 }}").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();

        assert!(matches!(err, CermetError::Config(ConfigError::Registry(_))));
    }

    #[test]
    fn test_invalid_section_is_named() {
        let path = Path::new("cermet.toml");
        let source = ConfigError::Parser(
            ParserConfig::default()
                .with_sum_tolerance(0.0)
                .validate()
                .unwrap_err(),
        );

        let err = ConfigFileError::invalid(path, source);

        assert!(
            err.to_string()
                .starts_with("Invalid [parser] section in cermet.toml: ")
        );
    }

    #[test]
    fn test_registry_extension() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[registry]\nceramic_phases = [\"TiAlN\"]").unwrap();

        let config = load_config(Some(file.path())).unwrap();

        assert!(!config.registry.is_empty());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.parser, ParserConfig::default());
    }
}
