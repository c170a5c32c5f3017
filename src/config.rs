//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/projroot/projroot.toml`
//! 3. Local config: `<project_dir>/.projroot.toml`
//! 4. Environment variables: `PROJROOT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, Root};

/// Raw settings for intermediate parsing.
///
/// Fields are `Option` to tell "not specified" apart from an explicit value.
/// Strategy names stay strings so unknown names surface as config errors.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub strategies: Option<Vec<String>>,
    pub git_command: Option<String>,
    pub go_command: Option<String>,
}

/// Unified configuration for projroot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Strategies tried in order by `projroot root` (default: git, go-module)
    pub strategies: Vec<Root>,
    /// Git executable (default: "git")
    pub git_command: String,
    /// Go executable (default: "go")
    pub go_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strategies: Root::ALL.to_vec(),
            git_command: "git".into(),
            go_command: "go".into(),
        }
    }
}

/// Get the XDG config directory for projroot.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "projroot").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("projroot.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".projroot.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn parse_strategies<S: AsRef<str>>(names: &[S]) -> Result<Vec<Root>, ApplicationError> {
    names
        .iter()
        .map(|name| {
            name.as_ref()
                .parse::<Root>()
                .map_err(|e| ApplicationError::Config {
                    message: e.to_string(),
                })
        })
        .collect()
}

impl Settings {
    /// Expand shell variables and tilde in command paths.
    fn expand_paths(&mut self) {
        self.git_command = expand_env_vars(&self.git_command);
        self.go_command = expand_env_vars(&self.go_command);
    }

    /// Overlay a raw config layer onto self. Specified values replace.
    fn merge_with(&self, overlay: &RawSettings) -> Result<Self, ApplicationError> {
        let strategies = match &overlay.strategies {
            Some(names) => parse_strategies(names)?,
            None => self.strategies.clone(),
        };
        Ok(Self {
            strategies,
            git_command: overlay
                .git_command
                .clone()
                .unwrap_or_else(|| self.git_command.clone()),
            go_command: overlay
                .go_command
                .clone()
                .unwrap_or_else(|| self.go_command.clone()),
        })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory holding `.projroot.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw)?;
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw)?;
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Load defaults overlaid with a single config file; no env vars.
    pub fn load_from(path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        let mut settings = Self::default().merge_with(&raw)?;
        settings.expand_paths();
        Ok(settings)
    }

    /// Apply PROJROOT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("PROJROOT")
                .prefix_separator("_")
                .separator("__")
                .list_separator(","),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get::<Vec<String>>("strategies") {
            settings.strategies = parse_strategies(&val)?;
        } else if let Ok(val) = config.get_string("strategies") {
            let names: Vec<&str> = val.split(',').filter(|s| !s.trim().is_empty()).collect();
            settings.strategies = parse_strategies(&names)?;
        }
        if let Ok(val) = config.get_string("git_command") {
            settings.git_command = val;
        }
        if let Ok(val) = config.get_string("go_command") {
            settings.go_command = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# projroot configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/projroot/projroot.toml
#   Local:  <project_dir>/.projroot.toml
#   Env:    PROJROOT_* environment variables (e.g. PROJROOT_STRATEGIES=go-module,git)

# Strategies tried in order by `projroot root`
# strategies = ["git", "go-module"]

# Executables (~ and $VAR are expanded)
# git_command = "git"
# go_command = "go"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
