//! Optional `config.toml` holding defaults for the notes directory and site.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::export::BrokenLinkHandling;

/// Settings read from `config.toml`. Every field is optional and a flag on
/// the command line always wins.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default notes directory
    pub dir: Option<PathBuf>,

    /// Site title for `build`
    pub site_title: Option<String>,

    /// URL prefix for the search index
    pub base_url: Option<String>,

    /// Theme name or path to a CSS file
    pub theme: Option<String>,

    /// How to draw links to missing notes
    pub broken_links: Option<BrokenLinkHandling>,
}

impl Config {
    /// Reads the config at [`Config::config_path`], or empty settings if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, defaulting when it is absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// `<config dir>/notegraph/config.toml`, honoring `XDG_CONFIG_HOME`.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notegraph")
            .join("config.toml")
    }

    /// Picks `--dir`, then the configured `dir`, then the working directory.
    pub fn notes_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_no_dir() {
        let config = Config::default();
        assert!(config.dir.is_none());
        assert!(config.broken_links.is_none());
    }

    #[test]
    fn notes_dir_prefers_cli_arg() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            ..Config::default()
        };
        let cli_dir = PathBuf::from("/cli/notes");
        assert_eq!(
            config.notes_dir(Some(&cli_dir)),
            PathBuf::from("/cli/notes")
        );
    }

    #[test]
    fn notes_dir_falls_back_to_config() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            ..Config::default()
        };
        assert_eq!(config.notes_dir(None), PathBuf::from("/config/notes"));
    }

    #[test]
    fn notes_dir_falls_back_to_cwd() {
        let config = Config::default();
        assert_eq!(config.notes_dir(None), PathBuf::from("."));
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("notegraph/config.toml"));
    }

    #[test]
    fn load_from_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.site_title.is_none());
    }

    #[test]
    fn load_from_reads_site_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "dir = \"/notes\"\nsite_title = \"Wiki\"\nbase_url = \"/kb\"\ntheme = \"dark\"\nbroken_links = \"preserve\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.dir, Some(PathBuf::from("/notes")));
        assert_eq!(config.site_title.as_deref(), Some("Wiki"));
        assert_eq!(config.base_url.as_deref(), Some("/kb"));
        assert_eq!(config.theme.as_deref(), Some("dark"));
        assert_eq!(config.broken_links, Some(BrokenLinkHandling::Preserve));
    }

    #[test]
    fn load_from_rejects_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "site_title = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }
}
