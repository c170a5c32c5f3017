//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::RootService;
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, RealCommandRunner};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Directory tools run in (default: process cwd)
    pub work_dir: Option<PathBuf>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, work_dir: Option<PathBuf>) -> Self {
        Self::with_deps(settings, work_dir, Arc::new(RealCommandRunner))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        work_dir: Option<PathBuf>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            cmd,
            work_dir,
        }
    }

    /// Root discovery service bound to this container's runner and settings.
    pub fn root_service(&self) -> RootService {
        let service = RootService::new(Arc::clone(&self.cmd), Arc::clone(&self.settings));
        match &self.work_dir {
            Some(dir) => service.with_work_dir(dir.clone()),
            None => service,
        }
    }
}
