//! ado-deploy library.
//!
//! Builds and ships the ADO web application: a self-contained docker image
//! (`image`), a docker-compose config archive (`archive`), the on-host
//! updater that applies such an archive (`update`), and the key-value store
//! client used to register users (`store`).

pub mod artifact;
pub mod build;
pub mod capabilities;
pub mod common;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod preflight;
pub mod process;
pub mod store;
pub mod template;
pub mod timing;
pub mod update;

pub use capabilities::{Capabilities, Tool};
pub use config::Config;
pub use error::{Error, Result};
