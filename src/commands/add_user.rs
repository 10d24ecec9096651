//! Add-user command - uploads a user's config to the key-value store.

use anyhow::Result;
use std::path::PathBuf;

use ado_deploy::artifact::printkv;
use ado_deploy::common::absolute;
use ado_deploy::store::StoreClient;
use ado_deploy::Config;

use super::require_input;

const W: usize = 20;

/// Options for the add-user command, as given on the command line.
pub struct AddUserOptions {
    pub user_id: String,
    pub config_file: PathBuf,
    pub storage_server: Option<String>,
    pub allow_self_signed: bool,
}

/// Execute the add-user command.
pub fn cmd_add_user(opts: AddUserOptions, config: &Config) -> Result<()> {
    let config_file = absolute(&opts.config_file)?;
    let server = opts
        .storage_server
        .unwrap_or_else(|| config.storage_server.clone());

    println!("Add User:");
    printkv(W, "User Id", &opts.user_id);
    printkv(W, "Config File", config_file.display());
    printkv(W, "Storage Server", &server);
    if opts.allow_self_signed {
        printkv(W, "Allow Self Signed", true);
    }

    require_input(&config_file, "config file")?;

    let client = StoreClient::new(&server, opts.allow_self_signed)?;
    client.add_user(&opts.user_id, &config_file)?;
    Ok(())
}
