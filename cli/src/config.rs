use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use adt::Variant;
use pseudo::render::TextOptions;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "adt.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderSection,
    pub preview: PreviewSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    /// Columns per nesting level.
    pub indent: usize,
    pub guides: bool,
    pub trim: bool,
}

impl Default for RenderSection {
    fn default() -> Self {
        let defaults = TextOptions::default();
        RenderSection {
            indent: defaults.indent,
            guides: defaults.guides,
            trim: defaults.trim,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewSection {
    pub variant: Variant,
}

/// Render flags given on the command line. Flags only ever switch a
/// setting on; `indent` replaces the configured width.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderOverrides {
    pub indent: Option<usize>,
    pub guides: bool,
    pub trim: bool,
}

impl Config {
    /// Load `explicit` if given (it must exist), else `adt.toml` in the
    /// working directory if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_path(path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn text_options(&self, overrides: RenderOverrides) -> TextOptions {
        TextOptions {
            indent: overrides.indent.unwrap_or(self.render.indent),
            guides: self.render.guides || overrides.guides,
            trim: self.render.trim || overrides.trim,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("[render]\nguides = true\n").unwrap();
        assert!(config.render.guides);
        assert_eq!(config.render.indent, 4);
        assert_eq!(config.preview.variant, Variant::Contiguous);
    }

    #[test]
    fn flags_override_file_values() {
        let config: Config =
            toml::from_str("[render]\nindent = 2\n\n[preview]\nvariant = \"chained\"\n").unwrap();
        let options = config.text_options(RenderOverrides {
            indent: Some(8),
            trim: true,
            ..RenderOverrides::default()
        });
        assert_eq!(options.indent, 8);
        assert!(options.trim);
        assert!(!options.guides);
        assert_eq!(config.preview.variant, Variant::Chained);
    }

    #[test]
    fn variant_name_ignores_case() {
        let config: Config = toml::from_str("[preview]\nvariant = \"Chained\"\n").unwrap();
        assert_eq!(config.preview.variant, Variant::Chained);
        assert!(toml::from_str::<Config>("[preview]\nvariant = \"linked\"\n").is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adt.toml");
        std::fs::write(&path, "[render]\ncolour = true\n").unwrap();
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
