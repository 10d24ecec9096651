//! Client for the webdis key-value store that holds per-user config.
//!
//! Two endpoints are used: `PUT {server}/SET/{key}` stores a document and
//! `GET {server}/SAVE` forces the store to persist to disk.

use std::fs;
use std::path::Path;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::interrupt;

pub struct StoreClient {
    server: String,
    client: Client,
}

impl StoreClient {
    /// Create a client for `server` (e.g. `http://localhost:7379`).
    ///
    /// With `allow_self_signed`, TLS certificates are not verified.
    pub fn new(server: &str, allow_self_signed: bool) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(allow_self_signed)
            .build()?;
        Ok(Self {
            server: server.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn expect_ok(url: &str, status: StatusCode) -> Result<()> {
        if status != StatusCode::OK {
            return Err(Error::Protocol {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Store `body` as a JSON document under `key`.
    pub fn set(&self, key: &str, body: Vec<u8>) -> Result<()> {
        let url = format!("{}/SET/{}", self.server, key);
        debug!("PUT {} ({} bytes)", url, body.len());
        let res = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        Self::expect_ok(&url, res.status())
    }

    /// Ask the store to persist its data set.
    pub fn save(&self) -> Result<()> {
        let url = format!("{}/SAVE", self.server);
        debug!("GET {}", url);
        let res = self.client.get(&url).send()?;
        Self::expect_ok(&url, res.status())
    }

    /// Upload the config document at `config_file` for `user_id`, then force
    /// a save.
    pub fn add_user(&self, user_id: &str, config_file: &Path) -> Result<()> {
        let body = fs::read(config_file).map_err(|e| Error::fs(config_file, e.to_string()))?;

        // Sent as-is either way; the store does not validate
        if serde_json::from_slice::<serde_json::Value>(&body).is_err() {
            warn!("{} is not valid JSON", config_file.display());
        }

        interrupt::check()?;
        self.set(user_id, body)?;
        interrupt::check()?;
        self.save()?;
        info!("Stored config for {}", user_id);
        Ok(())
    }
}
