//! Archive command - builds the container config archive.

use anyhow::Result;
use std::path::PathBuf;

use ado_deploy::artifact::{printkv, ArtifactReport, DigestAlgorithm};
use ado_deploy::build::{ArchiveBuilder, ArchiveConfig};
use ado_deploy::config::DEFAULT_ARCHIVE_NAME;
use ado_deploy::process::SystemRunner;
use ado_deploy::timing::Timer;
use ado_deploy::{Capabilities, Config};

use super::{require_input, BUILDER_KEY_WIDTH as W};

/// Options for the archive command, as given on the command line.
pub struct ArchiveOptions {
    pub domain_name: String,
    pub debug: bool,
    pub cert_file: Option<PathBuf>,
    pub cert_key: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub www_root: String,
}

/// Execute the archive command.
pub fn cmd_archive(opts: ArchiveOptions, config: &Config, caps: &Capabilities) -> Result<()> {
    let cert_file = opts.cert_file.unwrap_or_else(|| config.default_cert_file());
    let cert_key = opts.cert_key.unwrap_or_else(|| config.default_cert_key());
    let output = opts
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_NAME));

    let archive = ArchiveConfig::new(
        opts.domain_name,
        &cert_file,
        &cert_key,
        &output,
        opts.debug,
        opts.www_root,
    )?;

    println!("Docker Builder:");
    printkv(W, "Domain Name", &archive.domain_name);
    printkv(W, "Certificate File", archive.cert_file.display());
    printkv(W, "Certificate Private Key", archive.cert_key.display());
    printkv(W, "WWW Root", &archive.www_root);
    printkv(W, "Debug Build", archive.debug);

    require_input(&archive.cert_file, "certificate file")?;
    require_input(&archive.cert_key, "certificate private key")?;

    let builder = ArchiveBuilder::new(archive, config, caps, SystemRunner)?;

    let timer = Timer::start("Archive build");
    let output = builder.build()?;
    timer.finish();

    ArtifactReport::from_file(&output, DigestAlgorithm::Sha256)?.print(W);
    Ok(())
}
