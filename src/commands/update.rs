//! Update command - applies a delivered config archive to the running stack.

use anyhow::{Context, Result};
use std::path::PathBuf;

use ado_deploy::artifact::printkv;
use ado_deploy::common::absolute;
use ado_deploy::config::{CONTAINER_DIR_NAME, DEFAULT_ARCHIVE_NAME};
use ado_deploy::process::SystemRunner;
use ado_deploy::update::Updater;
use ado_deploy::Capabilities;

const W: usize = 35;

/// Options for the update command, as given on the command line.
pub struct UpdateOptions {
    pub archive_file: Option<PathBuf>,
    pub install_directory: Option<PathBuf>,
}

/// `~/container.tgz`
pub fn default_archive() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine the home directory")?;
    Ok(home.join(DEFAULT_ARCHIVE_NAME))
}

/// Execute the update command.
pub fn cmd_update(opts: UpdateOptions, caps: &Capabilities) -> Result<()> {
    let archive = match opts.archive_file {
        Some(path) => absolute(&path)?,
        None => default_archive()?,
    };
    let install_dir = opts
        .install_directory
        .unwrap_or_else(|| PathBuf::from(CONTAINER_DIR_NAME));

    // Refuses root and a missing docker-compose before anything is printed
    let updater = Updater::new(caps, &install_dir, SystemRunner)?;

    println!("Container Updater:");
    printkv(W, "Archive File", archive.display());
    printkv(W, "Install Directory", updater.install_dir().display());

    let outcome = updater.update(&archive)?;

    printkv(W, "Updated", outcome.updated());
    Ok(())
}
