//! Asset assembly: web root, WASM bundle, certificates and rendered configs.

use std::path::Path;

use tracing::info;

use super::context::BuildContext;
use crate::common::{copy_file_into, copy_tree, ensure_dir_exists};
use crate::error::Result;
use crate::process::{Cmd, CommandRunner};
use crate::template::{self, DOMAIN_NAME};

/// Subdirectory of the web root that receives the wasm-pack output.
pub const WASM_PKG_DIR: &str = "pkg";

impl<R: CommandRunner> BuildContext<R> {
    /// Copy the static web assets to `out_dir`, which must not exist yet.
    pub fn copy_static_content(&self, out_dir: &Path) -> Result<()> {
        let count = copy_tree(&self.config.www_source, out_dir)?;
        info!(
            "Copied {} static files from {}",
            count,
            self.config.www_source.display()
        );
        Ok(())
    }

    /// Render the OpenSearch descriptor for `domain_name` into `out_file`.
    pub fn write_open_search(&self, domain_name: &str, out_file: &Path) -> Result<()> {
        self.templates
            .render_to(template::OPEN_SEARCH, &[(DOMAIN_NAME, domain_name)], out_file)
    }

    /// Render the nginx server config for `domain_name` into `out_file`.
    pub fn write_nginx_conf(&self, domain_name: &str, out_file: &Path) -> Result<()> {
        self.templates
            .render_to(template::NGINX_CONF, &[(DOMAIN_NAME, domain_name)], out_file)
    }

    /// The wasm-pack invocation that writes the web bundle to `pkg_dir`.
    pub fn wasm_command(&self, pkg_dir: &Path, debug_build: bool) -> Cmd {
        let mut cmd = Cmd::for_path(&self.wasm_pack)
            .arg("build")
            .arg(&self.config.wasm_crate)
            .args(["--target", "web", "-d"])
            .arg_path(pkg_dir)
            .dir(&self.config.project_root);

        if debug_build {
            cmd = cmd.args(["--no-opt", "--debug"]);
        }
        cmd
    }

    /// Compile the WASM crate into `pkg_dir`.
    pub fn build_wasm(&self, pkg_dir: &Path, debug_build: bool) -> Result<()> {
        info!(debug_build, "Building WASM bundle");
        self.runner.run(&self.wasm_command(pkg_dir, debug_build))?;
        Ok(())
    }

    /// Assemble a complete web root: static assets, OpenSearch descriptor and
    /// the WASM bundle under `pkg/`.
    pub fn build_www(&self, www_root: &Path, domain_name: &str, debug_build: bool) -> Result<()> {
        self.copy_static_content(www_root)?;
        self.write_open_search(domain_name, &www_root.join(template::OPEN_SEARCH))?;
        self.build_wasm(&www_root.join(WASM_PKG_DIR), debug_build)
    }

    /// Copy the certificate chain and private key into `out_dir`.
    pub fn copy_cert_files(&self, cert_file: &Path, cert_key: &Path, out_dir: &Path) -> Result<()> {
        ensure_dir_exists(out_dir)?;
        copy_file_into(cert_file, out_dir)?;
        copy_file_into(cert_key, out_dir)?;
        Ok(())
    }
}
