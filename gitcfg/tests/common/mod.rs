//! Common test utilities for integration tests.
//!
//! Every test builds its own sandbox: a temporary home directory, an
//! optional system config and optional repositories, tied together by a
//! hermetic [`GitEnvironment`].

use std::fs;
use std::path::{Path, PathBuf};

use gitcfg::GitEnvironment;
use tempfile::TempDir;

/// Writes `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Creates the smallest git directory layout that repository discovery
/// accepts, with `config` as the repository config.
///
/// Returns the path of the repository config file.
pub fn init_repo(work_tree: &Path, config: &str) -> PathBuf {
    let git_dir = work_tree.join(".git");
    fs::create_dir_all(git_dir.join("objects")).unwrap();
    fs::create_dir_all(git_dir.join("refs").join("heads")).unwrap();
    write_file(&git_dir.join("HEAD"), "ref: refs/heads/main\n");
    let config_path = git_dir.join("config");
    write_file(&config_path, config);
    config_path
}

/// A sandboxed home directory and system config location.
#[allow(dead_code)]
pub struct Sandbox {
    pub temp: TempDir,
    pub home: PathBuf,
    pub system: PathBuf,
}

#[allow(dead_code)]
impl Sandbox {
    /// Creates an empty sandbox. No config file exists yet.
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        fs::create_dir_all(&home).unwrap();
        let system = temp.path().join("etc").join("gitconfig");
        Self { temp, home, system }
    }

    /// The environment git would see inside this sandbox.
    pub fn env(&self) -> GitEnvironment {
        GitEnvironment::empty()
            .with_home(&self.home)
            .with_system_config(&self.system)
    }

    pub fn write_system(&self, contents: &str) -> &Self {
        write_file(&self.system, contents);
        self
    }

    pub fn write_global(&self, contents: &str) -> &Self {
        write_file(&self.home.join(".gitconfig"), contents);
        self
    }

    pub fn write_xdg(&self, contents: &str) -> &Self {
        write_file(
            &self.home.join(".config").join("git").join("config"),
            contents,
        );
        self
    }

    /// Creates a repository under the sandbox and returns its work tree.
    pub fn repo(&self, name: &str, config: &str) -> PathBuf {
        let work_tree = self.temp.path().join(name);
        init_repo(&work_tree, config);
        work_tree
    }
}
