//! Image command - builds the docker image and saves it to a tarball.

use anyhow::Result;
use std::path::PathBuf;

use ado_deploy::artifact::{printkv, ArtifactReport, DigestAlgorithm};
use ado_deploy::build::{ImageBuilder, ImageConfig};
use ado_deploy::process::SystemRunner;
use ado_deploy::timing::Timer;
use ado_deploy::{Capabilities, Config};

use super::{require_input, BUILDER_KEY_WIDTH as W};

/// Options for the image command, as given on the command line.
pub struct ImageOptions {
    pub image_name: String,
    pub domain_name: String,
    pub cert_file: Option<PathBuf>,
    pub cert_key: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub remove_image: bool,
}

/// Execute the image command.
pub fn cmd_image(opts: ImageOptions, config: &Config, caps: &Capabilities) -> Result<()> {
    let cert_file = opts.cert_file.unwrap_or_else(|| config.default_cert_file());
    let cert_key = opts.cert_key.unwrap_or_else(|| config.default_cert_key());
    let output = opts
        .output
        .unwrap_or_else(|| config.deploy_root.join(format!("{}.tar", opts.image_name)));

    let image = ImageConfig::new(
        opts.image_name,
        opts.domain_name,
        &cert_file,
        &cert_key,
        &output,
    )?
    .with_remove_image(opts.remove_image);

    println!("Docker Builder:");
    printkv(W, "Image Name", &image.image_name);
    printkv(W, "Domain Name", &image.domain_name);
    printkv(W, "Certificate File", image.cert_file.display());
    printkv(W, "Certificate Private Key", image.cert_key.display());
    printkv(W, "Remove Image", image.remove_image);

    require_input(&image.cert_file, "certificate file")?;
    require_input(&image.cert_key, "certificate private key")?;

    let builder = ImageBuilder::new(image, config, caps, SystemRunner)?;

    let timer = Timer::start("Image build");
    let output = builder.build()?;
    timer.finish();

    ArtifactReport::from_file(&output, DigestAlgorithm::Sha512)?.print(W);
    Ok(())
}
