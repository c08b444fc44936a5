//! Command to show where each configuration layer is read from.

use crate::error::CliError;
use crate::utils::{shorten_path, working_dir, GlobalOptions};
use clap::Args;
use gitcfg::discovery::CONFIG_COUNT_VAR;
use gitcfg::{
    find_global_config, find_repository_config, find_system_config, find_xdg_config,
    ConfigLevel, GitEnvironment,
};
use std::io::Write;
use std::path::Path;

/// Show where each config layer is read from.
#[derive(Args)]
pub struct ShowPathsCommand {
    /// Show full paths instead of shortened forms
    #[arg(long)]
    pub show_full_paths: bool,
}

impl ShowPathsCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let env = GitEnvironment::from_process();
        let cwd = working_dir()?;

        let layers = [
            (ConfigLevel::System, find_system_config(&env)),
            (ConfigLevel::Xdg, find_xdg_config(&env)),
            (ConfigLevel::Global, find_global_config(&env)),
            (ConfigLevel::Local, find_repository_config(&cwd)),
        ];

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        for (level, located) in layers {
            let shown = match located {
                Ok(path) => self.display(&path),
                Err(e) if e.is_not_found() => "(none)".to_string(),
                Err(e) => return Err(e.into()),
            };
            writeln!(handle, "{level}\t{shown}")?;
        }

        let overrides = env
            .var(CONFIG_COUNT_VAR)
            .map_or_else(|| "(none)".to_string(), |n| format!("{CONFIG_COUNT_VAR}={n}"));
        writeln!(handle, "{}\t{overrides}", ConfigLevel::Override)?;

        Ok(())
    }

    fn display(&self, path: &Path) -> String {
        if self.show_full_paths {
            path.display().to_string()
        } else {
            shorten_path(path)
        }
    }
}
