//! `sitekey check` - Resolve a settings document and report the sites.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sitekey_core::{resolve_document, SiteDocument};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Sites settings document (XML)
    pub settings: PathBuf,

    /// Base directory for relative key paths
    #[arg(long, env = "SITEKEY_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Quiet mode - only exit code, no output
    #[arg(long, short)]
    pub quiet: bool,
}

pub fn cmd_check(args: CheckArgs) -> i32 {
    match run_check(&args) {
        Ok(code) => code,
        Err(e) => {
            if !args.quiet {
                eprintln!("error: {e:#}");
            }
            2
        }
    }
}

fn run_check(args: &CheckArgs) -> Result<i32> {
    let file = File::open(&args.settings)
        .with_context(|| format!("failed to open settings file: {}", args.settings.display()))?;
    let document = SiteDocument::from_reader(BufReader::new(file))?;
    let declared = document.sites.len();

    let base_dir = super::base_dir_for(args.base_dir.clone(), &args.settings);
    let map = resolve_document(&document, &base_dir)?;

    if !args.quiet {
        let mut rows: Vec<_> = map.iter().collect();
        rows.sort_by_key(|(key, _)| key.to_string());
        for (key, verifier) in rows {
            println!(
                "{}  {}  {}",
                key,
                verifier.algorithm(),
                verifier.key_id().unwrap_or("-")
            );
        }
        println!("resolved {}/{} sites", map.len(), declared);
    }

    Ok(if map.len() == declared { 0 } else { 1 })
}
