//! Discovery of the configuration files git reads.
//!
//! Git layers configuration from several well-known places, lowest
//! precedence first:
//!
//! 1. System: `GIT_CONFIG_SYSTEM`, the installation's `etc/gitconfig`
//! 2. XDG: `$XDG_CONFIG_HOME/git/config` or `~/.config/git/config`
//! 3. Global: `GIT_CONFIG_GLOBAL` or `~/.gitconfig`
//! 4. Local: `config` in the repository's common git directory
//! 5. Override: `GIT_CONFIG_COUNT` / `GIT_CONFIG_KEY_<n>` / `GIT_CONFIG_VALUE_<n>`
//!
//! All lookups take a [`GitEnvironment`] rather than reading the process
//! environment, so they can be tested hermetically.

mod environment;
mod locator;

pub use environment::{environment_overrides, GitEnvironment, CONFIG_COUNT_VAR};
pub use locator::{find_global_config, find_repository_config, find_system_config, find_xdg_config};
