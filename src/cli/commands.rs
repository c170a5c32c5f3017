//! Command dispatch and execution

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{BoxError, ErrorChain, Root};
use crate::infrastructure::di::ServiceContainer;

/// Execute the parsed CLI command.
pub fn execute(cli: &Cli) -> CliResult<()> {
    let project_dir = cli.project_dir.as_deref();
    if let Some(dir) = project_dir {
        if !dir.is_dir() {
            return Err(CliError::InvalidArgs(format!(
                "not a directory: {}",
                dir.display()
            )));
        }
    }

    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(command) => {
            let settings = Settings::load(project_dir)?;
            let container = ServiceContainer::new(settings, project_dir.map(Path::to_path_buf));
            dispatch(command, &container, project_dir)
        }
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()
                .map_err(|e| CliError::InvalidArgs(e.to_string()))?;
            Ok(())
        }
    }
}

fn dispatch(
    command: &Commands,
    container: &ServiceContainer,
    project_dir: Option<&Path>,
) -> CliResult<()> {
    match command {
        Commands::Root { strategies } => cmd_root(container, strategies),
        Commands::All => cmd_all(container),
        Commands::Strategies => cmd_strategies(container),
        Commands::Config { command } => cmd_config(container, command, project_dir),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(skip(container))]
fn cmd_root(container: &ServiceContainer, strategies: &[Root]) -> CliResult<()> {
    let service = container.root_service();
    let (root, dir) = if strategies.is_empty() {
        service.configured_root_dir()?
    } else {
        service.first_root_dir(strategies)?
    };
    debug!("cmd_root: resolved via {}", root);
    output::info(&dir.display());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_all(container: &ServiceContainer) -> CliResult<()> {
    let service = container.root_service();
    let mut resolved = false;
    let mut failures: Vec<BoxError> = Vec::new();
    for (root, result) in service.all_root_dirs(&Root::ALL) {
        match result {
            Ok(dir) => {
                resolved = true;
                output::success_detail(&format!("{}: {}", root, dir.display()));
            }
            Err(e) => {
                output::failure(&format!("{}: {}", root, e));
                failures.push(Box::new(e));
            }
        }
    }
    if !resolved {
        return Err(ApplicationError::NoRoot(ErrorChain::new(failures)).into());
    }
    Ok(())
}

fn cmd_strategies(container: &ServiceContainer) -> CliResult<()> {
    output::header("Strategies (configured order first):");
    let configured = &container.settings.strategies;
    for root in configured {
        output::detail(&format!("{root} (enabled)"));
    }
    for root in Root::ALL.iter().filter(|r| !configured.contains(r)) {
        output::detail(root);
    }
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    project_dir: Option<&Path>,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::info("global: (no config directory)"),
            }
            let dir = project_dir.unwrap_or_else(|| Path::new("."));
            output::info(&format!("local:  {}", local_config_path(dir).display()));
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
    }
    Ok(())
}
