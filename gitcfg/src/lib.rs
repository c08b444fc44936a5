#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # gitcfg
//!
//! A library for reading and writing git configuration.
//!
//! Git reads configuration from several files with increasing precedence:
//! the system file, the per-user files and the repository's own config,
//! plus overrides from the environment. This crate parses and writes the
//! git config text format and resolves keys across those layers the way
//! git does.
//!
//! ## Core Types
//!
//! - [`ConfigStore`]: typed get/set/delete/iterate over layered config
//! - [`ConfigLayerStack`]: precedence-ordered layers and their lookup rules
//! - [`ConfigFile`]: a single parsed file that round-trips to disk
//! - [`ConfigKey`] and [`ConfigEntry`]: normalized keys and their values
//! - [`GitEnvironment`]: the environment snapshot used for discovery
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use gitcfg::ConfigStore;
//!
//! let mut store = ConfigStore::new();
//! store.set_string("user.name", "Ada").unwrap();
//! store.add_string("remote.origin.fetch", "+refs/heads/*:refs/remotes/origin/*").unwrap();
//!
//! assert_eq!(store.get_string("user.name").unwrap(), "Ada");
//! for (name, value) in store.iter() {
//!     println!("{name}={value}");
//! }
//! ```

pub mod discovery;
pub mod entry;
pub mod error;
pub mod file;
pub mod key;
pub mod logging;
pub mod stack;
pub mod store;
pub mod value;

// Re-export key types at crate root for convenience
pub use discovery::{
    environment_overrides, find_global_config, find_repository_config, find_system_config,
    find_xdg_config, GitEnvironment,
};
pub use entry::{ConfigEntry, ConfigLevel};
pub use error::{Error, ErrorKind, Result};
pub use file::ConfigFile;
pub use key::{ConfigKey, SectionHeader};
pub use logging::{init_logger, LogLevel, Logger};
pub use stack::ConfigLayerStack;
pub use store::{ConfigStore, ConfigStoreBuilder};
