//! Binary-level tests. No test touches the network: the update check is
//! skipped or pointed at a closed local port, and the template URL points at
//! a directory that does not exist.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BIN: &str = "create-next-supabase";

/// A scratch working directory with a config file inside it.
struct Sandbox {
    dir: TempDir,
    config: PathBuf,
}

impl Sandbox {
    fn new(extra_config: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let missing_template = dir.path().join("no-such-template");
        let config = dir.path().join("config.toml");
        fs::write(
            &config,
            format!(
                "[template]\nurl = \"{}\"\n\n{extra_config}",
                missing_template.display()
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("create-next-supabase");
        cmd.current_dir(self.path())
            .arg("--config")
            .arg(&self.config)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("CREATE_NEXT_SUPABASE_RELAUNCHED");
        cmd
    }

    fn entries(&self) -> Vec<String> {
        fs::read_dir(self.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }
}

// ── arguments ─────────────────────────────────────────────────────────────────

#[test]
fn help_describes_the_tool() {
    assert_cmd::cargo::cargo_bin_cmd!("create-next-supabase")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next.js + Supabase"))
        .stdout(predicate::str::contains("--skip-update-check"));
}

#[test]
fn quiet_and_verbose_conflict() {
    assert_cmd::cargo::cargo_bin_cmd!("create-next-supabase")
        .args(["--quiet", "--verbose", "--skip-update-check"])
        .assert()
        .code(2);
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let sandbox = Sandbox::new("");
    assert_cmd::cargo::cargo_bin_cmd!("create-next-supabase")
        .current_dir(sandbox.path())
        .args(["--config", "absent.toml", "--skip-update-check", "--version"])
        .env("NO_COLOR", "1")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

// ── --version ─────────────────────────────────────────────────────────────────

#[test]
fn version_prints_and_creates_nothing() {
    let sandbox = Sandbox::new("");
    sandbox
        .cmd()
        .args(["--version", "--skip-update-check"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    assert_eq!(sandbox.entries(), vec!["config.toml"]);
}

#[test]
fn short_v_is_version() {
    let sandbox = Sandbox::new("");
    sandbox
        .cmd()
        .args(["-v", "--skip-update-check"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn update_check_can_be_disabled_in_config() {
    let sandbox = Sandbox::new("[update]\ncheck = false\nregistry_url = \"http://127.0.0.1:9\"\n");
    sandbox
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not check for updates").not());
}

// ── update check ──────────────────────────────────────────────────────────────

#[test]
fn unreachable_registry_warns_and_continues() {
    let sandbox =
        Sandbox::new("[update]\nregistry_url = \"http://127.0.0.1:9\"\ntimeout_secs = 5\n");
    sandbox
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not check for updates"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn relaunched_child_does_not_check_again() {
    let sandbox = Sandbox::new("[update]\nregistry_url = \"http://127.0.0.1:9\"\n");
    sandbox
        .cmd()
        .arg("--version")
        .env("CREATE_NEXT_SUPABASE_RELAUNCHED", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not check for updates").not());
}

// ── provisioning ──────────────────────────────────────────────────────────────

#[test]
fn clone_failure_exits_one_without_completion() {
    let sandbox = Sandbox::new("");
    sandbox
        .cmd()
        .args(["demo-app", "--skip-update-check"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Setup complete").not())
        .stderr(predicate::str::contains("cloning the starter template"));
    assert!(!sandbox.path().join("demo-app").join("package.json").exists());
}

#[test]
fn missing_name_without_terminal_uses_default() {
    let sandbox = Sandbox::new("");
    sandbox
        .cmd()
        .arg("--skip-update-check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Creating next-supabase-starter"));
}

#[test]
fn configured_default_name_is_used() {
    let sandbox = Sandbox::new("[project]\ndefault_name = \"my-starter\"\n");
    sandbox
        .cmd()
        .arg("--skip-update-check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Creating my-starter"));
}

#[test]
fn existing_project_is_kept_without_force() {
    let sandbox = Sandbox::new("");
    let existing = sandbox.path().join("demo-app");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("keep.txt"), "mine").unwrap();

    sandbox
        .cmd()
        .args(["demo-app", "--skip-update-check"])
        .env("SUPASTART_TEMPLATE__FORCE", "false")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    assert!(existing.join("keep.txt").exists());
}

#[test]
fn existing_project_is_moved_aside_with_force() {
    let sandbox = Sandbox::new("");
    let existing = sandbox.path().join("demo-app");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("keep.txt"), "mine").unwrap();

    sandbox
        .cmd()
        .args(["demo-app", "--skip-update-check"])
        .assert()
        .code(1);
    assert_eq!(
        fs::read_to_string(sandbox.path().join("demo-app.backup/keep.txt")).unwrap(),
        "mine"
    );
}

#[test]
fn dot_name_never_touches_the_working_directory() {
    let sandbox = Sandbox::new("");
    fs::write(sandbox.path().join("precious.txt"), "mine").unwrap();

    sandbox
        .cmd()
        .args([".", "--skip-update-check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("inside the current one"));
    assert!(sandbox.path().join("precious.txt").exists());
    assert!(sandbox.path().join("config.toml").exists());
}

#[test]
fn quiet_failure_still_reports_the_error() {
    let sandbox = Sandbox::new("");
    sandbox
        .cmd()
        .args(["demo-app", "--skip-update-check", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("✗ Error:"));
}
