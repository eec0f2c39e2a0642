pub mod check;
pub mod verify;

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Command};

/// Dispatch to the selected command, returning the process exit code.
pub fn dispatch(cli: Cli) -> i32 {
    match cli.command {
        Command::Check(args) => check::cmd_check(args),
        Command::Verify(args) => verify::cmd_verify(args),
    }
}

/// Base directory for relative key paths: explicit flag or `SITEKEY_BASE_DIR`
/// first, then the settings file's parent directory.
pub(crate) fn base_dir_for(explicit: Option<PathBuf>, settings: &Path) -> PathBuf {
    explicit.unwrap_or_else(|| {
        settings
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    })
}
