//! Integration tests for locating git configuration files.
//!
//! Repository discovery runs against real directory layouts. Linked
//! worktrees are created with the `git` binary when it is installed.
//!
//! Tests that read the process environment are marked `#[serial]` since
//! environment variables are process-global.

mod common;

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

use common::{init_repo, write_file, Sandbox};
use gitcfg::{
    find_repository_config, find_system_config, ConfigLevel, ConfigStore, ErrorKind,
    GitEnvironment,
};
use serial_test::serial;

fn git(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .is_ok_and(|out| out.status.success())
}

// ============================================================================
// Repository config
// ============================================================================

#[test]
fn test_repository_config_at_root() {
    let sandbox = Sandbox::new();
    let work_tree = sandbox.temp.path().join("repo");
    let config = init_repo(&work_tree, "[core]\n\tbare = false\n");

    let found = find_repository_config(&work_tree).unwrap();
    assert_eq!(
        found.canonicalize().unwrap(),
        config.canonicalize().unwrap()
    );
}

#[test]
fn test_repository_config_from_nested_directory() {
    let sandbox = Sandbox::new();
    let work_tree = sandbox.temp.path().join("repo");
    let config = init_repo(&work_tree, "");
    let nested = work_tree.join("a").join("b").join("c");
    fs::create_dir_all(&nested).unwrap();

    let found = find_repository_config(&nested).unwrap();
    assert_eq!(
        found.canonicalize().unwrap(),
        config.canonicalize().unwrap()
    );
}

#[test]
fn test_nested_repository_wins() {
    let sandbox = Sandbox::new();
    let outer = sandbox.temp.path().join("outer");
    init_repo(&outer, "[x]\n\twho = outer\n");
    let inner = outer.join("vendor").join("inner");
    init_repo(&inner, "[x]\n\twho = inner\n");

    let store = ConfigStore::builder(sandbox.env())
        .with_repository(&inner)
        .build()
        .unwrap();
    assert_eq!(store.get_string("x.who").unwrap(), "inner");
}

#[test]
fn test_linked_worktree_uses_common_config() {
    let sandbox = Sandbox::new();
    let main = sandbox.temp.path().join("main");
    fs::create_dir_all(&main).unwrap();

    let ready = git(&main, &["init", "-q", "-b", "main"])
        && git(&main, &["config", "user.name", "Test User"])
        && git(&main, &["config", "user.email", "test@example.com"])
        && git(&main, &["commit", "-q", "--allow-empty", "-m", "init"]);
    if !ready {
        eprintln!("git is not available; skipping worktree discovery");
        return;
    }
    let linked = sandbox.temp.path().join("feature");
    assert!(git(
        &main,
        &["worktree", "add", "-q", "-b", "feature", linked.to_str().unwrap()]
    ));

    let from_linked = find_repository_config(&linked).unwrap();
    let from_main = find_repository_config(&main).unwrap();
    assert_eq!(
        from_linked.canonicalize().unwrap(),
        from_main.canonicalize().unwrap()
    );

    let store = ConfigStore::builder(sandbox.env())
        .with_repository(&linked)
        .build()
        .unwrap();
    assert_eq!(store.get_string("user.name").unwrap(), "Test User");
}

// ============================================================================
// Well-known files
// ============================================================================

#[test]
fn test_system_config_from_exec_path() {
    let sandbox = Sandbox::new();
    let prefix = sandbox.temp.path().join("opt").join("git");
    let exec = prefix.join("libexec").join("git-core");
    fs::create_dir_all(&exec).unwrap();
    write_file(
        &prefix.join("etc").join("gitconfig"),
        "[init]\n\tdefaultBranch = trunk\n",
    );

    let env = sandbox
        .env()
        .with_var("GIT_EXEC_PATH", exec.to_string_lossy());
    let store = ConfigStore::get_system_config(&env).unwrap();
    let entry = store.get_entry("init.defaultbranch").unwrap();
    assert_eq!(entry.value(), "trunk");
    assert_eq!(entry.level(), ConfigLevel::System);
}

#[test]
fn test_not_found_is_distinct_from_io_errors() {
    let sandbox = Sandbox::new();
    let env = sandbox.env();

    let system = ConfigStore::get_system_config(&env).unwrap_err();
    assert_eq!(system.kind(), ErrorKind::NotFound);
    assert_eq!(system.to_string(), "system config file not found");

    let global = ConfigStore::get_global_config(&env).unwrap_err();
    assert_eq!(global.kind(), ErrorKind::NotFound);

    let xdg = ConfigStore::get_xdg_config(&env).unwrap_err();
    assert_eq!(xdg.kind(), ErrorKind::NotFound);
}

#[cfg(unix)]
#[test]
fn test_unreadable_global_is_io_error() {
    use std::os::unix::fs::PermissionsExt;

    let sandbox = Sandbox::new();
    sandbox.write_global("[a]\n\tb = c\n");
    let path = sandbox.home.join(".gitconfig");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    // privileged users can read the file regardless of its mode
    if fs::read_to_string(&path).is_ok() {
        return;
    }
    let err = ConfigStore::get_global_config(&sandbox.env()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoError);
}

#[test]
fn test_invalid_nosystem_flag() {
    let env = GitEnvironment::empty().with_var("GIT_CONFIG_NOSYSTEM", "sometimes");
    assert_eq!(
        find_system_config(&env).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
}

// ============================================================================
// Process environment
// ============================================================================

struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        let saved = vars
            .iter()
            .map(|(name, value)| {
                let old = env::var(name).ok();
                env::set_var(name, value);
                (*name, old)
            })
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, old) in &self.saved {
            match old {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
}

#[test]
#[serial]
fn test_from_process_reads_git_variables() {
    let sandbox = Sandbox::new();
    sandbox.write_global("[user]\n\tname = From Home\n");
    let home = sandbox.home.to_string_lossy().into_owned();
    let global = sandbox.home.join(".gitconfig").to_string_lossy().into_owned();

    let _guard = EnvGuard::set(&[
        ("HOME", &home),
        ("GIT_CONFIG_GLOBAL", &global),
        ("GIT_CONFIG_NOSYSTEM", "1"),
        ("GIT_CONFIG_COUNT", "1"),
        ("GIT_CONFIG_KEY_0", "color.ui"),
        ("GIT_CONFIG_VALUE_0", "never"),
    ]);

    let env = GitEnvironment::from_process();
    assert_eq!(env.var("GIT_CONFIG_NOSYSTEM"), Some("1"));

    let store = ConfigStore::open_default(&env, None).unwrap();
    assert_eq!(store.get_string("color.ui").unwrap(), "never");
    assert_eq!(store.get_string("user.name").unwrap(), "From Home");
}
