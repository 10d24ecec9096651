//! Text templates with literal placeholder substitution.
//!
//! Placeholders are plain `__NAME__` tokens replaced verbatim: no escaping,
//! no conditionals. Templates are read from disk on every call.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::common::write_file_with_dirs;
use crate::error::{Error, Result};

/// Replaced with the server's domain name.
pub const DOMAIN_NAME: &str = "__DOMAIN_NAME__";

/// Replaced with the web root mounted by docker-compose.
pub const WWW_ROOT: &str = "__WWW_ROOT__";

pub const NGINX_CONF: &str = "nginx.conf";
pub const OPEN_SEARCH: &str = "opensearch.xml";
pub const DOCKERFILE: &str = "Dockerfile";
pub const DOCKER_COMPOSE: &str = "docker-compose.yml";

/// Apply every `(token, value)` pair in order.
pub fn substitute(text: &str, subs: &[(&str, &str)]) -> String {
    let mut out = text.to_string();
    for (token, value) in subs {
        out = out.replace(token, value);
    }
    out
}

/// A directory of named templates.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Raw template text.
    pub fn load(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::fs(&path, "template not found"),
            _ => Error::fs(&path, e.to_string()),
        })
    }

    /// Template text with placeholders substituted.
    pub fn render(&self, name: &str, subs: &[(&str, &str)]) -> Result<String> {
        Ok(substitute(&self.load(name)?, subs))
    }

    /// Render `name` and write it to `out_file`.
    pub fn render_to(&self, name: &str, subs: &[(&str, &str)], out_file: &Path) -> Result<()> {
        let text = self.render(name, subs)?;
        write_file_with_dirs(out_file, text)
    }
}
