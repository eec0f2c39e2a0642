//! Command-line arguments.

use clap::{Parser, Subcommand};

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::verify::VerifyArgs;

#[derive(Parser, Debug)]
#[command(
    name = "sitekey",
    version,
    about = "Resolve and exercise site token-verification keys"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a settings document and report the configured sites
    Check(CheckArgs),
    /// Verify a detached signature with a resolved site verifier
    Verify(VerifyArgs),
}
