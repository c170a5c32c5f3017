//! Project root strategies and the parsers for their tool output.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, GoEnvError};

/// Strategy used to find the root directory of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Root {
    /// Top-level directory of the enclosing git working tree
    Git,
    /// Directory containing the active `go.mod` (from `GOMOD`)
    #[serde(alias = "gomod")]
    GoModule,
}

impl Root {
    /// All strategies in declaration order.
    pub const ALL: [Root; 2] = [Root::Git, Root::GoModule];

    pub fn name(self) -> &'static str {
        match self {
            Root::Git => "git",
            Root::GoModule => "go-module",
        }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for Root {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Root::Git),
            1 => Ok(Root::GoModule),
            other => Err(DomainError::InvalidRoot(other)),
        }
    }
}

impl FromStr for Root {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "git" => Ok(Root::Git),
            "go-module" | "gomod" => Ok(Root::GoModule),
            _ => Err(DomainError::UnknownRoot(s.to_string())),
        }
    }
}

/// Path printed by `git rev-parse --show-toplevel`.
pub fn parse_git_toplevel(stdout: &str) -> PathBuf {
    PathBuf::from(stdout.trim())
}

#[derive(Debug, Deserialize)]
struct GoEnv {
    #[serde(rename = "GOMOD", default)]
    gomod: String,
}

/// Directory of the module file named by `GOMOD` in `go env -json` output.
///
/// An empty `GOMOD` (modules disabled) and the null device (module mode
/// outside any module) are both reported as [`GoEnvError::NotInModule`].
pub fn parse_go_env(stdout: &str) -> Result<PathBuf, GoEnvError> {
    let env: GoEnv = serde_json::from_str(stdout)?;
    let gomod = env.gomod.trim();
    if gomod.is_empty() || is_null_device(gomod) {
        return Err(GoEnvError::NotInModule);
    }

    let path = Path::new(gomod);
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => Err(GoEnvError::NoParent(path.to_path_buf())),
    }
}

fn is_null_device(path: &str) -> bool {
    path == "/dev/null" || path.eq_ignore_ascii_case("NUL")
}

/// Expand shell variables and tilde.
///
/// Supports `$VAR`, `${VAR}` and `~`. Unresolvable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
