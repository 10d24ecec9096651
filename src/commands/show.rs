//! Show command - displays information.

use anyhow::Result;
use std::path::PathBuf;

use ado_deploy::artifact::{list_tarball, printkv, size_fmt, ArtifactReport, DigestAlgorithm};
use ado_deploy::Config;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// Show the members, size and digest of an archive
    Archive { path: PathBuf, json: bool },
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config => {
            config.print();
        }
        ShowTarget::Archive { path, json } => {
            let entries = list_tarball(&path)?;
            let report = ArtifactReport::from_file(&path, DigestAlgorithm::Sha256)?;

            if json {
                let doc = serde_json::json!({
                    "artifact": report,
                    "entries": entries,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
                return Ok(());
            }

            println!("Contents of {}:", path.display());
            for entry in &entries {
                println!("  {:>10}  {}", size_fmt(entry.size as f64), entry.path.display());
            }
            println!();
            printkv(24, "Files", entries.len());
            printkv(24, "Archive Size", report.size_display());
            printkv(24, "Archive Hash (sha256)", &report.digest);
        }
    }
    Ok(())
}
