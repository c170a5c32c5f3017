//! Project root discovery service
//!
//! Each strategy shells out to one external tool, buffers its stdout and
//! derives a directory from it. Nothing is cached: every call re-runs the
//! tool, so the answer always reflects the current working tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{parse_git_toplevel, parse_go_env, BoxError, ErrorChain, Root};
use crate::infrastructure::traits::CommandRunner;
use crate::infrastructure::InfraError;

const GIT_ARGS: [&str; 2] = ["rev-parse", "--show-toplevel"];
const GO_ENV_ARGS: [&str; 2] = ["env", "-json"];

/// Resolves project roots by running `git` or `go`.
pub struct RootService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
    work_dir: Option<PathBuf>,
}

impl RootService {
    /// Create a service that runs tools in the current process directory.
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self {
            cmd,
            settings,
            work_dir: None,
        }
    }

    /// Run tools in `dir` instead of the process working directory.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// Resolve the project root with a single strategy.
    #[instrument(skip(self))]
    pub fn root_dir(&self, root: Root) -> ApplicationResult<PathBuf> {
        match root {
            Root::Git => self.git_root_dir(),
            Root::GoModule => self.go_module_dir(),
        }
    }

    /// Resolve the project root from an untyped strategy discriminant.
    ///
    /// Values other than 0 (git) and 1 (go module) fail with
    /// [`DomainError::InvalidRoot`](crate::domain::DomainError::InvalidRoot).
    pub fn root_dir_raw(&self, discriminant: i32) -> ApplicationResult<PathBuf> {
        let root = Root::try_from(discriminant)?;
        self.root_dir(root)
    }

    /// Try strategies in order and return the first root found.
    ///
    /// When every strategy fails, all failures are returned together in
    /// [`ApplicationError::NoRoot`], in the order they were tried.
    pub fn first_root_dir(&self, roots: &[Root]) -> ApplicationResult<(Root, PathBuf)> {
        let mut failures: Vec<BoxError> = Vec::with_capacity(roots.len());
        for &root in roots {
            match self.root_dir(root) {
                Ok(dir) => return Ok((root, dir)),
                Err(e) => {
                    debug!("first_root_dir: {} failed: {}", root, e);
                    failures.push(Box::new(e));
                }
            }
        }
        Err(ApplicationError::NoRoot(ErrorChain::new(failures)))
    }

    /// Try the configured strategies in order.
    pub fn configured_root_dir(&self) -> ApplicationResult<(Root, PathBuf)> {
        self.first_root_dir(&self.settings.strategies)
    }

    /// Resolve every strategy independently.
    pub fn all_root_dirs(&self, roots: &[Root]) -> Vec<(Root, ApplicationResult<PathBuf>)> {
        roots.iter().map(|&root| (root, self.root_dir(root))).collect()
    }

    fn git_root_dir(&self) -> ApplicationResult<PathBuf> {
        let stdout = self
            .capture(&self.settings.git_command, &GIT_ARGS)
            .map_err(|source| ApplicationError::GitRoot { source })?;

        let dir = parse_git_toplevel(&stdout);
        debug!("git_root_dir: {}", dir.display());
        Ok(dir)
    }

    fn go_module_dir(&self) -> ApplicationResult<PathBuf> {
        let stdout = self
            .capture(&self.settings.go_command, &GO_ENV_ARGS)
            .map_err(|source| ApplicationError::GoModuleRoot { source })?;

        let dir = parse_go_env(&stdout).map_err(|source| ApplicationError::GoEnv { source })?;
        debug!("go_module_dir: {}", dir.display());
        Ok(dir)
    }

    /// Run a tool and return its stdout; non-zero exit is an error.
    fn capture(&self, program: &str, args: &[&str]) -> Result<String, BoxError> {
        debug!("capture: {} {:?} in {:?}", program, args, self.work_dir);
        let output = match &self.work_dir {
            Some(dir) => self.cmd.run_in(dir, program, args)?,
            None => self.cmd.run(program, args)?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Box::new(InfraError::Command {
                program: program.to_string(),
                status: output.status.to_string(),
                exit_code: output.status.code(),
                stderr: stderr.trim().to_string(),
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
