//! Configuration management for ado-deploy.
//!
//! Reads configuration from a .env file and environment variables.
//! Environment variables take precedence over the .env file.

use std::env;
use std::path::{Path, PathBuf};

/// Default key-value store used by `add-user`.
pub const DEFAULT_STORAGE_SERVER: &str = "http://localhost:7379";

/// Default WASM crate location, relative to the project root.
pub const DEFAULT_WASM_CRATE: &str = "src/lib/adolib/";

/// Leaf name of the container tree inside config archives.
pub const CONTAINER_DIR_NAME: &str = "ado_container";

/// Default archive file name produced by `archive` and consumed by `update`.
pub const DEFAULT_ARCHIVE_NAME: &str = "container.tgz";

/// Default image name for `image`.
pub const DEFAULT_IMAGE_NAME: &str = "webapp";

/// ado-deploy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `templates/`, `certs/` and `webdis/`.
    pub deploy_root: PathBuf,
    /// Application project root; the WASM build runs from here.
    pub project_root: PathBuf,
    /// Static web assets copied into every web root.
    pub www_source: PathBuf,
    /// WASM crate passed to wasm-pack, relative to `project_root`.
    pub wasm_crate: String,
    /// Key-value store for `add-user`.
    pub storage_server: String,
}

impl Config {
    /// Load configuration from `<base_dir>/.env` and the environment.
    pub fn load(base_dir: &Path) -> Self {
        let env_path = base_dir.join(".env");
        if env_path.exists() {
            // dotenvy never overrides variables that are already set
            if let Err(e) = dotenvy::from_path(&env_path) {
                tracing::warn!("Failed to read {}: {}", env_path.display(), e);
            }
        }

        Self::from_lookup(base_dir, |key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(base_dir: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |value: String, relative_to: &Path| {
            let path = PathBuf::from(value);
            if path.is_absolute() {
                path
            } else {
                relative_to.join(path)
            }
        };

        let deploy_root = lookup("ADO_DEPLOY_ROOT")
            .map(|s| resolve(s, base_dir))
            .unwrap_or_else(|| base_dir.to_path_buf());

        // Default: the deploy tooling lives one level below the project
        let project_root = lookup("ADO_PROJECT_ROOT")
            .map(|s| resolve(s, base_dir))
            .unwrap_or_else(|| {
                deploy_root
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| deploy_root.clone())
            });

        let wasm_crate = lookup("ADO_WASM_CRATE").unwrap_or_else(|| DEFAULT_WASM_CRATE.to_string());

        let www_source = lookup("ADO_WWW_SOURCE")
            .map(|s| resolve(s, &project_root))
            .unwrap_or_else(|| project_root.join(&wasm_crate).join("www"));

        let storage_server = lookup("ADO_STORAGE_SERVER")
            .unwrap_or_else(|| DEFAULT_STORAGE_SERVER.to_string());

        Self {
            deploy_root,
            project_root,
            www_source,
            wasm_crate,
            storage_server,
        }
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.deploy_root.join("templates")
    }

    pub fn certs_dir(&self) -> PathBuf {
        self.deploy_root.join("certs")
    }

    pub fn default_cert_file(&self) -> PathBuf {
        self.certs_dir().join("fullchain.pem")
    }

    pub fn default_cert_key(&self) -> PathBuf {
        self.certs_dir().join("privkey.pem")
    }

    /// Static webdis config shipped verbatim in config archives.
    pub fn webdis_config(&self) -> PathBuf {
        self.deploy_root.join("webdis").join("webdis.prod.json")
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  ADO_DEPLOY_ROOT: {}", self.deploy_root.display());
        println!("  ADO_PROJECT_ROOT: {}", self.project_root.display());
        println!("  ADO_WWW_SOURCE: {}", self.www_source.display());
        println!("  ADO_WASM_CRATE: {}", self.wasm_crate);
        println!("  ADO_STORAGE_SERVER: {}", self.storage_server);
    }
}
