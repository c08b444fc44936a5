//! Common test utilities for CLI integration tests.
//!
//! Each [`TestEnv`] owns a temporary home directory and a repository work
//! tree. Commands run inside the work tree with an environment that hides
//! the real user's and system's git configuration.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables cleared so the host environment cannot leak into a test.
const SCRUBBED_VARS: &[&str] = &[
    "GIT_CONFIG_GLOBAL",
    "GIT_CONFIG_SYSTEM",
    "GIT_CONFIG_COUNT",
    "GIT_EXEC_PATH",
    "GIT_DIR",
    "GITCFG_FILE",
    "GITCFG_LOG_MODE",
];

/// Isolated home directory plus a repository to run commands in.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Home directory seen by the binary
    pub home: PathBuf,
    /// Work tree of the test repository
    pub repo: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an environment with an empty repository config.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let home = temp_dir.path().join("home");
        fs::create_dir_all(&home).expect("Failed to create home dir");

        let repo = temp_dir.path().join("repo");
        let git_dir = repo.join(".git");
        fs::create_dir_all(git_dir.join("objects")).expect("Failed to create objects dir");
        fs::create_dir_all(git_dir.join("refs").join("heads")).expect("Failed to create refs");
        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").expect("Failed to write HEAD");
        fs::write(git_dir.join("config"), "").expect("Failed to write config");

        Self {
            temp_dir,
            home,
            repo,
        }
    }

    /// Temporary directory outside the repository.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A command running in the repository with the sandboxed environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("gitcfg").expect("Failed to find gitcfg binary");
        cmd.current_dir(&self.repo)
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .env("GIT_CONFIG_NOSYSTEM", "1");
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Path of the repository config.
    pub fn repo_config(&self) -> PathBuf {
        self.repo.join(".git").join("config")
    }

    /// Path of the per-user config.
    pub fn global_config(&self) -> PathBuf {
        self.home.join(".gitconfig")
    }

    pub fn write_repo_config(&self, contents: &str) {
        fs::write(self.repo_config(), contents).expect("Failed to write repo config");
    }

    pub fn write_global_config(&self, contents: &str) {
        fs::write(self.global_config(), contents).expect("Failed to write global config");
    }

    pub fn read_repo_config(&self) -> String {
        fs::read_to_string(self.repo_config()).expect("Failed to read repo config")
    }

    /// Run `get` and return trimmed stdout, asserting success.
    pub fn get(&self, name: &str) -> String {
        let output = self
            .command()
            .args(["get", name])
            .output()
            .expect("Failed to run get");
        assert!(
            output.status.success(),
            "get {name} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim_end().to_string()
    }

    /// Run `set`, asserting success.
    pub fn set(&self, name: &str, value: &str) {
        self.command().args(["set", name, value]).assert().success();
    }
}
