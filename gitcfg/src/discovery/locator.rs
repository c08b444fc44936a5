//! Locating the well-known configuration files.
//!
//! Each function is a pure lookup against a [`GitEnvironment`] and the
//! filesystem. A file that should be used but does not exist is reported
//! as [`Error::NotFound`] so callers can tell "absent" apart from an I/O
//! failure.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::environment::GitEnvironment;
use crate::error::{Error, Result};

/// Locates the system-wide configuration file.
///
/// Checked in order: `GIT_CONFIG_NOSYSTEM` disables the lookup,
/// `GIT_CONFIG_SYSTEM` names the file explicitly, then the installation
/// prefix derived from `GIT_EXEC_PATH`, then the platform defaults.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the system config is disabled or no
/// candidate exists, and [`Error::InvalidEnvironment`] if
/// `GIT_CONFIG_NOSYSTEM` is not a boolean.
pub fn find_system_config(env: &GitEnvironment) -> Result<PathBuf> {
    if env.flag("GIT_CONFIG_NOSYSTEM")? {
        log::debug!("system config disabled by GIT_CONFIG_NOSYSTEM");
        return Err(Error::config_not_found("system"));
    }
    if let Some(explicit) = env.var("GIT_CONFIG_SYSTEM") {
        return Ok(PathBuf::from(explicit));
    }

    let from_exec_path = env
        .var("GIT_EXEC_PATH")
        .and_then(|exec| installation_prefix(Path::new(exec)))
        .map(|prefix| prefix.join("etc").join("gitconfig"));

    from_exec_path
        .into_iter()
        .chain(env.system_defaults().iter().cloned())
        .find(|candidate| candidate.is_file())
        .inspect(|found| log::debug!("system config: {}", found.display()))
        .ok_or_else(|| Error::config_not_found("system"))
}

/// `<prefix>/libexec/git-core` → `<prefix>`.
fn installation_prefix(exec_path: &Path) -> Option<&Path> {
    if exec_path.file_name()? != "git-core" {
        return None;
    }
    let libexec = exec_path.parent()?;
    if libexec.file_name()? != "libexec" {
        return None;
    }
    libexec.parent()
}

/// Locates the per-user configuration file.
///
/// `GIT_CONFIG_GLOBAL` names it explicitly; otherwise `~/.gitconfig` is
/// used if it exists.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if there is no global config.
pub fn find_global_config(env: &GitEnvironment) -> Result<PathBuf> {
    if let Some(explicit) = env.var("GIT_CONFIG_GLOBAL") {
        return Ok(PathBuf::from(explicit));
    }
    env.home()
        .map(|home| home.join(".gitconfig"))
        .filter(|path| path.is_file())
        .ok_or_else(|| Error::config_not_found("global"))
}

/// Locates the XDG configuration file.
///
/// `$XDG_CONFIG_HOME/git/config`, or `~/.config/git/config` when
/// `XDG_CONFIG_HOME` is unset.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file does not exist.
pub fn find_xdg_config(env: &GitEnvironment) -> Result<PathBuf> {
    let base = match env.var("XDG_CONFIG_HOME") {
        Some(xdg) => Some(PathBuf::from(xdg)),
        None => env.home().map(|home| home.join(".config")),
    };
    base.map(|dir| dir.join("git").join("config"))
        .filter(|path| path.is_file())
        .ok_or_else(|| Error::config_not_found("xdg"))
}

/// Finds the config file of the repository containing `start`.
///
/// The git directory is discovered upwards from `start`. For a linked
/// worktree the shared repository config in the common directory is
/// returned. The returned file may not exist yet.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `start` is not inside a repository.
pub fn find_repository_config(start: &Path) -> Result<PathBuf> {
    let (location, _trust) = gix::discover::upwards(start).map_err(|e| {
        log::debug!("no repository above {}: {e}", start.display());
        Error::NotFound {
            resource: format!("git repository at {}", start.display()),
        }
    })?;
    let (git_dir, _work_tree) = location.into_repository_and_work_tree_directories();

    let config = common_dir(&git_dir).join("config");
    log::debug!("repository config: {}", config.display());
    Ok(config)
}

/// Resolves the directory shared by all worktrees of a repository.
///
/// Linked worktrees record it in a `commondir` file, usually relative.
fn common_dir(git_dir: &Path) -> PathBuf {
    let Ok(contents) = fs::read_to_string(git_dir.join("commondir")) else {
        return git_dir.to_path_buf();
    };
    let target = Path::new(contents.trim());
    let joined = if target.is_absolute() {
        target.to_path_buf()
    } else {
        git_dir.join(target)
    };
    // resolve `..` components left by relative entries
    joined.canonicalize().unwrap_or(joined)
}
