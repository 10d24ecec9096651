//! Build context shared by the image and archive builders.

use std::path::PathBuf;

use crate::capabilities::{Capabilities, Tool};
use crate::config::Config;
use crate::error::Result;
use crate::process::CommandRunner;
use crate::template::TemplateStore;

/// Everything a builder needs besides its own configuration.
pub struct BuildContext<R> {
    /// Resolved paths for templates, web assets and the WASM crate
    pub config: Config,
    pub templates: TemplateStore,
    /// Absolute path of `wasm-pack`
    pub wasm_pack: PathBuf,
    pub runner: R,
}

impl<R: CommandRunner> BuildContext<R> {
    /// Create a build context.
    ///
    /// Fails before touching the filesystem if `wasm-pack` is missing.
    pub fn new(config: &Config, caps: &Capabilities, runner: R) -> Result<Self> {
        let wasm_pack = caps.require(Tool::WasmPack)?;
        Ok(Self {
            templates: TemplateStore::new(config.templates_dir()),
            config: config.clone(),
            wasm_pack,
            runner,
        })
    }
}
