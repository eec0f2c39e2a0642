//! `sitekey verify` - Verify a detached signature with a resolved site key.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use clap::Args;

use sitekey_core::{resolve_document, SiteDocument};

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Sites settings document (XML)
    pub settings: PathBuf,

    /// File holding the signed message bytes
    #[arg(long)]
    pub message: PathBuf,

    /// Detached signature, base64url without padding
    #[arg(long)]
    pub signature: String,

    /// Site origin URL; omit to use the default site
    #[arg(long)]
    pub site: Option<String>,

    /// Base directory for relative key paths
    #[arg(long, env = "SITEKEY_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Quiet mode - only exit code, no output
    #[arg(long, short)]
    pub quiet: bool,
}

pub fn cmd_verify(args: VerifyArgs) -> i32 {
    match run_verify(&args) {
        Ok(true) => {
            if !args.quiet {
                println!("signature valid");
            }
            0
        }
        Ok(false) => {
            if !args.quiet {
                eprintln!("signature invalid");
            }
            4
        }
        Err(e) => {
            if !args.quiet {
                eprintln!("error: {e:#}");
            }
            2
        }
    }
}

fn run_verify(args: &VerifyArgs) -> Result<bool> {
    let file = File::open(&args.settings)
        .with_context(|| format!("failed to open settings file: {}", args.settings.display()))?;
    let document = SiteDocument::from_reader(BufReader::new(file))?;

    let base_dir = super::base_dir_for(args.base_dir.clone(), &args.settings);
    let map = resolve_document(&document, &base_dir)?;

    let verifier = match &args.site {
        Some(origin) => map.lookup(origin),
        None => map.default_verifier(),
    }
    .ok_or_else(|| match &args.site {
        Some(origin) => anyhow::anyhow!("no verifier resolved for site: {origin}"),
        None => anyhow::anyhow!("no default site resolved"),
    })?;

    let message = fs::read(&args.message)
        .with_context(|| format!("failed to read message file: {}", args.message.display()))?;
    let signature = URL_SAFE_NO_PAD
        .decode(args.signature.trim())
        .context("signature is not valid base64url")?;

    Ok(verifier.verify(&message, &signature))
}
