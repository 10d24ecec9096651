//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `image` - Build and save the docker image
//! - `archive` - Build the config archive
//! - `update` - Apply a delivered archive to a running stack
//! - `add_user` - Upload a user config to the key-value store
//! - `preflight` - Run preflight checks
//! - `show` - Display configuration or archive contents

pub mod add_user;
pub mod archive;
pub mod image;
mod preflight;
pub mod show;
pub mod update;

pub use add_user::cmd_add_user;
pub use archive::cmd_archive;
pub use image::cmd_image;
pub use preflight::cmd_preflight;
pub use show::cmd_show;
pub use update::cmd_update;

use std::path::Path;

use ado_deploy::Error;

/// Key column width of the builder banners.
pub const BUILDER_KEY_WIDTH: usize = 28;

/// Fail unless a required input file exists.
fn require_input(path: &Path, what: &str) -> ado_deploy::Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::precondition(format!(
            "{} not found: {}",
            what,
            path.display()
        )))
    }
}
