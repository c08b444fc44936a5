//! Build script for gitcfg-cli.
//!
//! Generates the gitcfg(1) man page into OUT_DIR with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is described again here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Command structure for the man page. Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("gitcfg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read and write layered git configuration")
        .long_about(
            "Reads the system, XDG, global and repository config files the way git does \
             and writes changes to a single file",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("system")
                .long("system")
                .help("Use the system-wide config file")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("global")
                .long("global")
                .help("Use the per-user config file")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("local")
                .long("local")
                .help("Use the repository config file")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .help("Use the given config file")
                .value_name("PATH")
                .global(true)
                .env("GITCFG_FILE"),
        )
        .subcommands(vec![
            Command::new("get")
                .about("Print the value of a key")
                .long_about("Print the effective value of a key, optionally as a typed value"),
            Command::new("set")
                .about("Set the value of a key")
                .long_about("Set, add, or replace values of a key in a single config file"),
            Command::new("unset")
                .about("Remove a key")
                .long_about("Remove a key, or the values of it matching a pattern"),
            Command::new("list")
                .about("List effective settings")
                .long_about("Print every effective setting as name=value lines or JSON"),
            Command::new("show-paths")
                .about("Show where each config layer is read from")
                .long_about("Print the file each configuration layer would be loaded from"),
            Command::new("validate")
                .about("Check that a config file parses")
                .long_about("Parse a config file and report the first syntax error"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("gitcfg.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
