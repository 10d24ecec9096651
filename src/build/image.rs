//! Docker image builder.
//!
//! Stages the web root, certificates, nginx config and Dockerfile in a
//! temporary tree, runs `docker build` there and exports the image with
//! `docker save`.
//!
//! ```text
//! docker_root_XXXX/
//! ├── www/              static assets + opensearch.xml + pkg/
//! ├── nginx.conf
//! ├── Dockerfile
//! ├── fullchain.pem
//! └── privkey.pem
//! ```

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::context::BuildContext;
use crate::capabilities::{Capabilities, Tool};
use crate::common::{absolute, StagingTree};
use crate::config::Config;
use crate::error::Result;
use crate::interrupt;
use crate::process::{Cmd, CommandRunner};
use crate::template;

/// Inputs of an image build. Paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub image_name: String,
    pub domain_name: String,
    pub cert_file: PathBuf,
    pub cert_key: PathBuf,
    pub output: PathBuf,
    /// Run `docker rmi` after saving so built images don't pile up.
    pub remove_image: bool,
}

impl ImageConfig {
    pub fn new(
        image_name: impl Into<String>,
        domain_name: impl Into<String>,
        cert_file: &Path,
        cert_key: &Path,
        output: &Path,
    ) -> Result<Self> {
        Ok(Self {
            image_name: image_name.into(),
            domain_name: domain_name.into(),
            cert_file: absolute(cert_file)?,
            cert_key: absolute(cert_key)?,
            output: absolute(output)?,
            remove_image: false,
        })
    }

    pub fn with_remove_image(mut self, remove: bool) -> Self {
        self.remove_image = remove;
        self
    }
}

pub struct ImageBuilder<R> {
    config: ImageConfig,
    ctx: BuildContext<R>,
    docker: PathBuf,
}

impl<R: CommandRunner> ImageBuilder<R> {
    /// Create an image builder.
    ///
    /// Both `docker` and `wasm-pack` must be available; nothing is written
    /// to disk if either is missing.
    pub fn new(
        config: ImageConfig,
        settings: &Config,
        caps: &Capabilities,
        runner: R,
    ) -> Result<Self> {
        let docker = caps.require(Tool::Docker)?;
        let ctx = BuildContext::new(settings, caps, runner)?;
        Ok(Self {
            config,
            ctx,
            docker,
        })
    }

    /// Stage everything and produce the image tarball at `config.output`.
    pub fn build(&self) -> Result<PathBuf> {
        let staging = StagingTree::new()?;
        self.stage(staging.path())?;
        interrupt::check()?;
        self.build_image(staging.path())?;
        Ok(self.config.output.clone())
    }

    /// Populate `root` with the docker build context.
    pub fn stage(&self, root: &Path) -> Result<()> {
        let www_root = root.join("www");
        self.ctx.build_www(&www_root, &self.config.domain_name, false)?;
        interrupt::check()?;

        self.ctx
            .copy_cert_files(&self.config.cert_file, &self.config.cert_key, root)?;
        self.ctx
            .write_nginx_conf(&self.config.domain_name, &root.join(template::NGINX_CONF))?;
        self.ctx.templates.render_to(
            template::DOCKERFILE,
            &[],
            &root.join(template::DOCKERFILE),
        )?;
        Ok(())
    }

    fn docker(&self) -> Cmd {
        Cmd::for_path(&self.docker)
    }

    fn build_image(&self, root: &Path) -> Result<()> {
        info!("Building image {}", self.config.image_name);
        self.ctx.runner.run(
            &self
                .docker()
                .args(["build", "-t", self.config.image_name.as_str(), "."])
                .dir(root),
        )?;

        info!("Saving image to {}", self.config.output.display());
        let saved = self
            .ctx
            .runner
            .run(
                &self
                    .docker()
                    .args(["save", "-o"])
                    .arg_path(&self.config.output)
                    .arg(&self.config.image_name)
                    .dir(root),
            )
            .map(|_| ());

        // Runs whether or not the save succeeded
        if self.config.remove_image {
            self.remove_image();
        }

        saved
    }

    /// Best-effort `docker rmi`; failures are logged and ignored.
    fn remove_image(&self) {
        let cmd = self
            .docker()
            .args(["rmi", self.config.image_name.as_str()])
            .allow_fail();
        match self.ctx.runner.run(&cmd) {
            Ok(result) if result.success() => info!("Removed image {}", self.config.image_name),
            Ok(result) => warn!(
                "Failed to remove image {} (exit code {}): {}",
                self.config.image_name,
                result.code,
                result.stderr_trimmed()
            ),
            Err(e) => warn!("Failed to remove image {}: {}", self.config.image_name, e),
        }
    }
}
