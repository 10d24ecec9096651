//! Shared filesystem utilities across ado-deploy modules.

pub mod files;
pub mod paths;
pub mod temp;

pub use files::{copy_file_into, write_file_with_dirs};
pub use paths::{absolute, copy_tree, ensure_dir_exists, require_dir};
pub use temp::{StagingTree, STAGING_PREFIX};
