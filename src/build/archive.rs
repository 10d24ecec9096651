//! Config archive builder.
//!
//! Assembles the tree a target host needs to run the stack with
//! docker-compose and packs it into a gzip tarball:
//!
//! ```text
//! ado_container/
//! ├── www/                      static assets + opensearch.xml + pkg/
//! ├── certs/                    fullchain.pem, privkey.pem
//! ├── conf.d/default.conf       nginx server config
//! ├── webdis/webdis.prod.json
//! └── docker-compose.yml
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use super::context::BuildContext;
use crate::artifact::create_tarball;
use crate::capabilities::Capabilities;
use crate::common::{absolute, copy_file_into, ensure_dir_exists, StagingTree};
use crate::config::{Config, CONTAINER_DIR_NAME};
use crate::error::Result;
use crate::interrupt;
use crate::process::CommandRunner;
use crate::template::{self, WWW_ROOT};

/// Inputs of an archive build. Paths are absolute except `www_root`, which
/// is substituted verbatim into the compose file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    pub domain_name: String,
    pub cert_file: PathBuf,
    pub cert_key: PathBuf,
    pub output: PathBuf,
    /// Unoptimized WASM build with debug info.
    pub debug: bool,
    pub www_root: String,
}

impl ArchiveConfig {
    pub fn new(
        domain_name: impl Into<String>,
        cert_file: &Path,
        cert_key: &Path,
        output: &Path,
        debug: bool,
        www_root: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            domain_name: domain_name.into(),
            cert_file: absolute(cert_file)?,
            cert_key: absolute(cert_key)?,
            output: absolute(output)?,
            debug,
            www_root: www_root.into(),
        })
    }
}

pub struct ArchiveBuilder<R> {
    config: ArchiveConfig,
    ctx: BuildContext<R>,
}

impl<R: CommandRunner> ArchiveBuilder<R> {
    /// Create an archive builder. Fails before touching the filesystem if
    /// `wasm-pack` is missing.
    pub fn new(
        config: ArchiveConfig,
        settings: &Config,
        caps: &Capabilities,
        runner: R,
    ) -> Result<Self> {
        let ctx = BuildContext::new(settings, caps, runner)?;
        Ok(Self { config, ctx })
    }

    /// Stage the container tree and write the archive to `config.output`.
    pub fn build(&self) -> Result<PathBuf> {
        let staging = StagingTree::new()?;
        let container_root = staging.join(CONTAINER_DIR_NAME);
        self.stage(&container_root)?;
        interrupt::check()?;

        let files = create_tarball(&container_root, &self.config.output, true)?;
        info!("Archived {} files", files);
        Ok(self.config.output.clone())
    }

    /// Populate `container_root` (created here) with the container tree.
    pub fn stage(&self, container_root: &Path) -> Result<()> {
        std::fs::create_dir(container_root)?;

        // www
        self.ctx.build_www(
            &container_root.join("www"),
            &self.config.domain_name,
            self.config.debug,
        )?;
        interrupt::check()?;

        // /etc/certs
        self.ctx.copy_cert_files(
            &self.config.cert_file,
            &self.config.cert_key,
            &container_root.join("certs"),
        )?;

        // /etc/nginx/conf.d
        let conf_d = container_root.join("conf.d");
        ensure_dir_exists(&conf_d)?;
        self.ctx
            .write_nginx_conf(&self.config.domain_name, &conf_d.join("default.conf"))?;

        // webdis + redis
        let webdis = container_root.join("webdis");
        ensure_dir_exists(&webdis)?;
        copy_file_into(&self.ctx.config.webdis_config(), &webdis)?;

        self.ctx.templates.render_to(
            template::DOCKER_COMPOSE,
            &[(WWW_ROOT, self.config.www_root.as_str())],
            &container_root.join(template::DOCKER_COMPOSE),
        )?;
        Ok(())
    }
}
