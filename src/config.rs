//! Optional TOML configuration.
//!
//! ```toml
//! precision = 2          # decimal places in output
//! policy = "formatted"   # or "strict"
//! ```
//!
//! Read from `--config <FILE>` or `config.toml` in the user's config
//! directory. A bad or missing file never stops a run; it only produces
//! warnings. Command-line flags win over the file.

use cassava_engine::engine::{DEFAULT_PRECISION, ReadPolicy};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub precision: Option<usize>,
    pub policy: Option<ReadPolicy>,
}

/// Effective output settings for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub precision: usize,
    pub policy: ReadPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            precision: DEFAULT_PRECISION,
            policy: ReadPolicy::default(),
        }
    }
}

impl Settings {
    /// Flags override the file, the file overrides the defaults.
    pub fn resolve(file: &ConfigFile, precision: Option<usize>, policy: Option<ReadPolicy>) -> Self {
        let defaults = Settings::default();
        let settings = Settings {
            precision: precision.or(file.precision).unwrap_or(defaults.precision),
            policy: policy.or(file.policy).unwrap_or(defaults.policy),
        };
        log::debug!("resolved settings: {:?}", settings);
        settings
    }
}

/// Load the config file, collecting warnings instead of failing.
///
/// `config_file` is an explicit path; without one the user config path is
/// tried, and its absence is not worth a warning.
pub fn load_config(config_file: Option<&PathBuf>) -> (ConfigFile, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (ConfigFile::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (ConfigFile::default(), warnings);
    }

    let config = match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<ConfigFile>(&content) {
            Ok(parsed) => parsed,
            Err(err) => {
                warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                ConfigFile::default()
            }
        },
        Err(err) => {
            warnings.push(format!("Failed to read {}: {}", path.display(), err));
            ConfigFile::default()
        }
    };

    (config, warnings)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cassava")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_explicit_config() {
        let file = write_config("precision = 3\npolicy = \"strict\"\n");
        let (config, warnings) = load_config(Some(&file.path().to_path_buf()));
        assert!(warnings.is_empty());
        assert_eq!(
            config,
            ConfigFile {
                precision: Some(3),
                policy: Some(ReadPolicy::Strict),
            }
        );
    }

    #[test]
    fn test_bad_config_warns_and_falls_back() {
        let file = write_config("precision = \"lots\"\n");
        let (config, warnings) = load_config(Some(&file.path().to_path_buf()));
        assert_eq!(config, ConfigFile::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to parse"));

        let file = write_config("colour = \"red\"\n");
        let (_, warnings) = load_config(Some(&file.path().to_path_buf()));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_missing_explicit_config_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, ConfigFile::default());
        assert!(warnings[0].starts_with("Config file not found"));
    }

    #[test]
    fn test_resolve_precedence() {
        let file = ConfigFile {
            precision: Some(4),
            policy: Some(ReadPolicy::Strict),
        };
        assert_eq!(
            Settings::resolve(&file, None, None),
            Settings {
                precision: 4,
                policy: ReadPolicy::Strict
            }
        );
        assert_eq!(
            Settings::resolve(&file, Some(1), Some(ReadPolicy::Formatted)),
            Settings {
                precision: 1,
                policy: ReadPolicy::Formatted
            }
        );
        assert_eq!(
            Settings::resolve(&ConfigFile::default(), None, None),
            Settings::default()
        );
    }
}
