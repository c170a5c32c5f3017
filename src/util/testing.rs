//! Test support: one-time tracing setup and canned command runners.

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::{Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::infrastructure::traits::CommandRunner;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Exit status with the given code.
pub fn exit_status(code: i32) -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }
}

/// Output of a command that exited with `code`.
pub fn output(code: i32, stdout: &str, stderr: &str) -> Output {
    Output {
        status: exit_status(code),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// One recorded invocation of [`FakeCommandRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub dir: Option<PathBuf>,
    pub cmd: String,
    pub args: Vec<String>,
}

/// Command runner that replays canned responses in order and records calls.
///
/// Runs out of responses with an `io::ErrorKind::NotFound` error, which is
/// what a missing executable looks like to callers.
#[derive(Debug, Default)]
pub struct FakeCommandRunner {
    responses: Mutex<VecDeque<io::Result<Output>>>,
    calls: Mutex<Vec<Invocation>>,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next call.
    pub fn respond(self, response: io::Result<Output>) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(response);
        self
    }

    /// Queue a successful call printing `stdout`.
    pub fn stdout(self, stdout: &str) -> Self {
        self.respond(Ok(output(0, stdout, "")))
    }

    /// Queue a call exiting with `code` and printing `stderr`.
    pub fn fails(self, code: i32, stderr: &str) -> Self {
        self.respond(Ok(output(code, "", stderr)))
    }

    /// Queue a spawn failure, as for a missing executable.
    pub fn missing(self) -> Self {
        self.respond(Err(io::Error::new(
            io::ErrorKind::NotFound,
            "No such file or directory (os error 2)",
        )))
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn next(&self, dir: Option<&Path>, cmd: &str, args: &[&str]) -> io::Result<Output> {
        self.calls.lock().expect("calls lock").push(Invocation {
            dir: dir.map(Path::to_path_buf),
            cmd: cmd.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no canned response for {cmd}"),
                ))
            })
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        self.next(None, cmd, args)
    }

    fn run_in(&self, dir: &Path, cmd: &str, args: &[&str]) -> io::Result<Output> {
        self.next(Some(dir), cmd, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn given_queued_responses_when_run_then_replayed_in_order() {
        let runner = FakeCommandRunner::new().stdout("first").fails(3, "second");

        let a = runner.run("git", &["status"]).unwrap();
        let b = runner.run_in(Path::new("/tmp"), "go", &["env"]).unwrap();
        let c = runner.run("git", &[]);

        assert!(a.status.success());
        assert_eq!(a.stdout, b"first");
        assert_eq!(b.status.code(), Some(3));
        assert_eq!(c.unwrap_err().kind(), io::ErrorKind::NotFound);
        assert_eq!(runner.calls().len(), 3);
        assert_eq!(runner.calls()[1].dir, Some(PathBuf::from("/tmp")));
    }
}
