//! Updater behavior against a recording docker-compose runner.

mod helpers;

use std::fs;
use std::path::{Path, PathBuf};

use ado_deploy::update::{UpdateOutcome, Updater};
use ado_deploy::{Capabilities, Error};
use helpers::{full_caps, make_archive, RecordingRunner};
use tempfile::TempDir;

/// A host with an installed stack at `<tmp>/ado_container`.
struct Host {
    _temp_dir: TempDir,
    install_dir: PathBuf,
    archive: PathBuf,
}

impl Host {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let install_dir = temp_dir.path().join("ado_container");
        fs::create_dir_all(install_dir.join("www")).unwrap();
        fs::write(install_dir.join("docker-compose.yml"), "services: {}\n").unwrap();
        fs::write(install_dir.join("www/index.html"), "old\n").unwrap();
        fs::write(install_dir.join("local.env"), "KEEP=1\n").unwrap();

        let archive = temp_dir.path().join("container.tgz");
        Self {
            _temp_dir: temp_dir,
            install_dir,
            archive,
        }
    }

    fn deliver(&self) {
        make_archive(
            &self.archive,
            "ado_container",
            &[
                ("docker-compose.yml", "services:\n  nginx: {}\n"),
                ("www/index.html", "new\n"),
                ("www/pkg/adolib_bg.wasm", "wasm"),
            ],
        );
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.install_dir.join(rel)).unwrap()
    }
}

#[test]
fn test_no_archive_is_a_no_op() {
    let host = Host::new();
    let runner = RecordingRunner::new();

    let updater = Updater::new(&full_caps(), &host.install_dir, &runner).unwrap();
    let outcome = updater.update(&host.archive).unwrap();

    assert_eq!(outcome, UpdateOutcome::NotUpdated);
    assert!(!outcome.updated());
    assert!(runner.lines().is_empty());
    assert_eq!(host.read("www/index.html"), "old\n");
}

#[test]
fn test_update_applies_archive() {
    let host = Host::new();
    host.deliver();
    let runner = RecordingRunner::new();

    let updater = Updater::new(&full_caps(), &host.install_dir, &runner).unwrap();
    assert_eq!(updater.update(&host.archive).unwrap(), UpdateOutcome::Updated);

    assert_eq!(runner.lines(), vec!["docker-compose stop", "docker-compose up -d"]);
    for call in runner.calls() {
        assert_eq!(call.dir.as_deref(), Some(host.install_dir.as_path()));
    }

    // Archive contents overwrite, everything else stays
    assert_eq!(host.read("www/index.html"), "new\n");
    assert_eq!(host.read("docker-compose.yml"), "services:\n  nginx: {}\n");
    assert_eq!(host.read("www/pkg/adolib_bg.wasm"), "wasm");
    assert_eq!(host.read("local.env"), "KEEP=1\n");

    assert!(!host.archive.exists(), "consumed archive must be removed");
}

#[test]
fn test_update_with_stack_already_stopped() {
    let host = Host::new();
    host.deliver();
    let runner = RecordingRunner::replying("stop", "No stopped containers\n");

    let updater = Updater::new(&full_caps(), &host.install_dir, &runner).unwrap();
    assert_eq!(updater.update(&host.archive).unwrap(), UpdateOutcome::Updated);

    assert_eq!(runner.lines(), vec!["docker-compose stop", "docker-compose up -d"]);
    assert_eq!(host.read("www/index.html"), "new\n");
    assert!(!host.archive.exists());
}

#[test]
fn test_relative_install_dir_is_resolved() {
    let updater = Updater::new(&full_caps(), Path::new("ado_container"), RecordingRunner::new())
        .unwrap();
    assert!(updater.install_dir().is_absolute());
    assert!(updater.install_dir().ends_with("ado_container"));
}

#[test]
fn test_second_run_after_update_does_nothing() {
    let host = Host::new();
    host.deliver();
    let runner = RecordingRunner::new();
    let updater = Updater::new(&full_caps(), &host.install_dir, &runner).unwrap();

    assert!(updater.update(&host.archive).unwrap().updated());
    assert!(!updater.update(&host.archive).unwrap().updated());
    assert_eq!(runner.lines().len(), 2);
}

#[test]
fn test_foreign_archive_rejected_before_stop() {
    let host = Host::new();
    make_archive(&host.archive, "something_else", &[("www/index.html", "evil\n")]);
    let runner = RecordingRunner::new();

    let err = Updater::new(&full_caps(), &host.install_dir, &runner)
        .unwrap()
        .update(&host.archive)
        .unwrap_err();

    assert!(err.to_string().contains("is not under 'ado_container'"));
    assert!(runner.lines().is_empty(), "stack must keep running");
    assert!(host.archive.exists());
    assert_eq!(host.read("www/index.html"), "old\n");
}

#[test]
fn test_missing_compose_file() {
    let host = Host::new();
    fs::remove_file(host.install_dir.join("docker-compose.yml")).unwrap();
    host.deliver();
    let runner = RecordingRunner::new();

    let err = Updater::new(&full_caps(), &host.install_dir, &runner)
        .unwrap()
        .update(&host.archive)
        .unwrap_err();

    assert!(matches!(err, Error::FileSystem { .. }));
    assert!(err.to_string().contains("compose file is missing"));
    assert!(runner.lines().is_empty());
    assert!(host.archive.exists());
}

#[test]
fn test_stop_failure_keeps_archive_and_tree() {
    let host = Host::new();
    host.deliver();
    let runner = RecordingRunner::failing_on("stop");

    let err = Updater::new(&full_caps(), &host.install_dir, &runner)
        .unwrap()
        .update(&host.archive)
        .unwrap_err();

    assert!(matches!(err, Error::Subprocess { .. }));
    assert_eq!(runner.lines(), vec!["docker-compose stop"]);
    assert!(host.archive.exists());
    assert_eq!(host.read("www/index.html"), "old\n");
}

#[test]
fn test_start_failure_leaves_stack_stopped() {
    let host = Host::new();
    host.deliver();
    let runner = RecordingRunner::failing_on("up");

    let err = Updater::new(&full_caps(), &host.install_dir, &runner)
        .unwrap()
        .update(&host.archive)
        .unwrap_err();

    assert!(matches!(err, Error::Subprocess { .. }));
    // Extracted, but the archive is only removed after a successful start
    assert_eq!(host.read("www/index.html"), "new\n");
    assert!(host.archive.exists());
}

#[test]
fn test_refuses_superuser() {
    let host = Host::new();
    let caps = Capabilities {
        superuser: true,
        ..full_caps()
    };

    let result = Updater::new(&caps, &host.install_dir, RecordingRunner::new());
    match result {
        Err(Error::Precondition(msg)) => assert_eq!(msg, "shouldn't run as root"),
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("updater accepted a superuser"),
    }
}

#[test]
fn test_requires_docker_compose() {
    let host = Host::new();
    let caps = Capabilities {
        docker_compose: None,
        ..full_caps()
    };

    let result = Updater::new(&caps, &host.install_dir, RecordingRunner::new());
    assert!(matches!(result, Err(Error::Precondition(_))));
}
