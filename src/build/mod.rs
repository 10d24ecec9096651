//! Builders that stage the web application and package it.
//!
//! - `context`: BuildContext shared by both builders
//! - `assets`: web root, WASM bundle, certificates and rendered configs
//! - `image`: docker image builder, exports a `docker save` tarball
//! - `archive`: config archive builder, writes `ado_container/` as a tgz

pub mod archive;
pub mod assets;
pub mod context;
pub mod image;

pub use archive::{ArchiveBuilder, ArchiveConfig};
pub use context::BuildContext;
pub use image::{ImageBuilder, ImageConfig};
