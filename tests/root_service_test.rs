//! Tests for RootService with a canned command runner

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::rstest;

use projroot::application::services::RootService;
use projroot::application::ApplicationError;
use projroot::config::Settings;
use projroot::domain::{DomainError, GoEnvError, Root};
use projroot::infrastructure::InfraError;
use projroot::util::testing::{init_test_setup, FakeCommandRunner};

fn service(runner: &Arc<FakeCommandRunner>) -> RootService {
    init_test_setup();
    RootService::new(runner.clone(), Arc::new(Settings::default()))
}

// ============================================================
// Git strategy
// ============================================================

#[test]
fn given_git_prints_toplevel_when_resolve_git_then_returns_trimmed_path() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().stdout("/home/dev/project\n"));
    let service = service(&runner);

    // Act
    let dir = service.root_dir(Root::Git).unwrap();

    // Assert
    assert_eq!(dir, PathBuf::from("/home/dev/project"));
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].cmd, "git");
    assert_eq!(calls[0].args, vec!["rev-parse", "--show-toplevel"]);
    assert_eq!(calls[0].dir, None);
}

#[test]
fn given_not_a_repository_when_resolve_git_then_wraps_non_zero_exit() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().fails(
        128,
        "fatal: not a git repository (or any of the parent directories): .git\n",
    ));
    let service = service(&runner);

    // Act
    let err = service.root_dir(Root::Git).unwrap_err();

    // Assert
    assert!(err.to_string().starts_with("failed to find git root path"));
    match &err {
        ApplicationError::GitRoot { source } => {
            let infra = source
                .downcast_ref::<InfraError>()
                .expect("non-zero exit reported as InfraError");
            match infra {
                InfraError::Command {
                    program,
                    exit_code,
                    stderr,
                    ..
                } => {
                    assert_eq!(program, "git");
                    assert_eq!(*exit_code, Some(128));
                    assert!(stderr.contains("not a git repository"));
                }
                other => panic!("unexpected infra error: {other:?}"),
            }
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_git_missing_when_resolve_git_then_wraps_io_error() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().missing());
    let service = service(&runner);

    // Act
    let err = service.root_dir(Root::Git).unwrap_err();

    // Assert
    match err {
        ApplicationError::GitRoot { source } => {
            let io = source
                .downcast_ref::<std::io::Error>()
                .expect("spawn failure reported as io::Error");
            assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_work_dir_when_resolve_then_runs_tool_there() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().stdout("/repo\n"));
    let service = service(&runner).with_work_dir("/repo/sub/dir");

    // Act
    service.root_dir(Root::Git).unwrap();

    // Assert
    assert_eq!(runner.calls()[0].dir, Some(PathBuf::from("/repo/sub/dir")));
    assert_eq!(service.work_dir(), Some(Path::new("/repo/sub/dir")));
}

#[test]
fn given_custom_git_command_when_resolve_then_uses_it() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().stdout("/repo\n"));
    let settings = Settings {
        git_command: "/usr/local/bin/git".into(),
        ..Settings::default()
    };
    let service = RootService::new(runner.clone(), Arc::new(settings));

    // Act
    service.root_dir(Root::Git).unwrap();

    // Assert
    assert_eq!(runner.calls()[0].cmd, "/usr/local/bin/git");
}

// ============================================================
// Go module strategy
// ============================================================

#[test]
fn given_gomod_in_env_when_resolve_go_module_then_returns_parent_dir() {
    // Arrange
    let env = r#"{
        "GO111MODULE": "",
        "GOMOD": "/home/dev/svc/go.mod",
        "GOPATH": "/home/dev/go"
    }"#;
    let runner = Arc::new(FakeCommandRunner::new().stdout(env));
    let service = service(&runner);

    // Act
    let dir = service.root_dir(Root::GoModule).unwrap();

    // Assert
    assert_eq!(dir, PathBuf::from("/home/dev/svc"));
    let calls = runner.calls();
    assert_eq!(calls[0].cmd, "go");
    assert_eq!(calls[0].args, vec!["env", "-json"]);
}

#[test]
fn given_malformed_json_when_resolve_go_module_then_parse_failure() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().stdout("GOMOD=/x/go.mod\n"));
    let service = service(&runner);

    // Act
    let err = service.root_dir(Root::GoModule).unwrap_err();

    // Assert
    assert!(err
        .to_string()
        .starts_with("failed to get GOMOD environment variable"));
    assert!(matches!(
        err,
        ApplicationError::GoEnv {
            source: GoEnvError::Json(_)
        }
    ));
}

#[rstest]
#[case::missing_field(r#"{"GOOS": "linux"}"#)]
#[case::modules_off(r#"{"GOMOD": ""}"#)]
#[case::outside_module(r#"{"GOMOD": "/dev/null"}"#)]
fn given_no_active_module_when_resolve_go_module_then_not_in_module(#[case] env: &str) {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().stdout(env));
    let service = service(&runner);

    // Act
    let err = service.root_dir(Root::GoModule).unwrap_err();

    // Assert
    assert!(matches!(
        err,
        ApplicationError::GoEnv {
            source: GoEnvError::NotInModule
        }
    ));
}

#[test]
fn given_go_fails_when_resolve_go_module_then_invocation_failure() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().fails(2, "go: unknown flag"));
    let service = service(&runner);

    // Act
    let err = service.root_dir(Root::GoModule).unwrap_err();

    // Assert
    assert!(err.to_string().starts_with("failed to find go mod root path"));
    assert!(matches!(err, ApplicationError::GoModuleRoot { .. }));
}

// ============================================================
// Raw discriminants
// ============================================================

#[rstest]
#[case(-1)]
#[case(2)]
#[case(42)]
fn given_out_of_range_discriminant_when_resolve_raw_then_invalid_root(#[case] value: i32) {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new());
    let service = service(&runner);

    // Act
    let err = service.root_dir_raw(value).unwrap_err();

    // Assert
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidRoot(v)) if v == value
    ));
    assert!(runner.calls().is_empty(), "no tool should run");
}

#[test]
fn given_valid_discriminant_when_resolve_raw_then_dispatches() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().stdout(r#"{"GOMOD":"/m/go.mod"}"#));
    let service = service(&runner);

    // Act
    let dir = service.root_dir_raw(1).unwrap();

    // Assert
    assert_eq!(dir, PathBuf::from("/m"));
}

// ============================================================
// Fallback across strategies
// ============================================================

#[test]
fn given_first_strategy_fails_when_first_root_dir_then_uses_next() {
    // Arrange
    let runner = Arc::new(
        FakeCommandRunner::new()
            .fails(128, "fatal: not a git repository")
            .stdout(r#"{"GOMOD":"/src/mod/go.mod"}"#),
    );
    let service = service(&runner);

    // Act
    let (root, dir) = service
        .first_root_dir(&[Root::Git, Root::GoModule])
        .unwrap();

    // Assert
    assert_eq!(root, Root::GoModule);
    assert_eq!(dir, PathBuf::from("/src/mod"));
    assert_eq!(runner.calls().len(), 2);
}

#[test]
fn given_first_strategy_succeeds_when_first_root_dir_then_stops() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().stdout("/repo\n"));
    let service = service(&runner);

    // Act
    let (root, _) = service
        .first_root_dir(&[Root::Git, Root::GoModule])
        .unwrap();

    // Assert
    assert_eq!(root, Root::Git);
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn given_all_strategies_fail_when_first_root_dir_then_chains_failures_in_order() {
    // Arrange
    let runner = Arc::new(
        FakeCommandRunner::new()
            .fails(128, "fatal: not a git repository")
            .stdout(r#"{"GOMOD":""}"#),
    );
    let service = service(&runner);

    // Act
    let err = service
        .first_root_dir(&[Root::Git, Root::GoModule])
        .unwrap_err();

    // Assert
    let chain = match &err {
        ApplicationError::NoRoot(chain) => chain,
        other => panic!("unexpected error: {other:?}"),
    };
    assert_eq!(chain.len(), 2);
    assert!(chain.errors()[0]
        .to_string()
        .starts_with("failed to find git root path"));
    assert!(chain.errors()[1]
        .to_string()
        .starts_with("failed to get GOMOD environment variable"));

    let first = chain.find::<ApplicationError>().expect("typed cause");
    assert!(matches!(first, ApplicationError::GitRoot { .. }));
    let exit = chain.find::<InfraError>().expect("exit status cause");
    assert!(matches!(
        exit,
        InfraError::Command {
            exit_code: Some(128),
            ..
        }
    ));
}

#[test]
fn given_no_strategies_when_first_root_dir_then_empty_chain() {
    let runner = Arc::new(FakeCommandRunner::new());
    let service = service(&runner);

    let err = service.first_root_dir(&[]).unwrap_err();

    assert!(matches!(&err, ApplicationError::NoRoot(chain) if chain.is_empty()));
    assert_eq!(err.to_string(), "no project root found: ");
}

#[test]
fn given_configured_order_when_configured_root_dir_then_follows_settings() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().stdout(r#"{"GOMOD":"/g/go.mod"}"#));
    let settings = Settings {
        strategies: vec![Root::GoModule],
        ..Settings::default()
    };
    let service = RootService::new(runner.clone(), Arc::new(settings));

    // Act
    let (root, dir) = service.configured_root_dir().unwrap();

    // Assert
    assert_eq!(root, Root::GoModule);
    assert_eq!(dir, PathBuf::from("/g"));
    assert_eq!(runner.calls()[0].cmd, "go");
}

#[test]
fn given_mixed_results_when_all_root_dirs_then_reports_each() {
    // Arrange
    let runner = Arc::new(FakeCommandRunner::new().stdout("/repo\n").missing());
    let service = service(&runner);

    // Act
    let results = service.all_root_dirs(&Root::ALL);

    // Assert
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, Root::Git);
    assert_eq!(results[0].1.as_ref().unwrap(), &PathBuf::from("/repo"));
    assert_eq!(results[1].0, Root::GoModule);
    assert!(matches!(
        results[1].1,
        Err(ApplicationError::GoModuleRoot { .. })
    ));
}

#[test]
fn given_repeated_calls_when_resolve_then_tool_runs_each_time() {
    let runner = Arc::new(FakeCommandRunner::new().stdout("/a\n").stdout("/b\n"));
    let service = service(&runner);

    assert_eq!(service.root_dir(Root::Git).unwrap(), PathBuf::from("/a"));
    assert_eq!(service.root_dir(Root::Git).unwrap(), PathBuf::from("/b"));
    assert_eq!(runner.calls().len(), 2);
}
