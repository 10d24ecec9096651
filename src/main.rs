//! ado-deploy - build and deploy the ADO web application.
//!
//! Two delivery paths:
//! - `image`: a self-contained nginx docker image saved as a tarball
//! - `archive` + `update`: a docker-compose tree shipped as a tgz and
//!   applied on the target host

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ado_deploy::config::DEFAULT_IMAGE_NAME;
use ado_deploy::preflight::Workflow;
use ado_deploy::{interrupt, Capabilities, Config};

use commands::add_user::AddUserOptions;
use commands::archive::ArchiveOptions;
use commands::image::ImageOptions;
use commands::show::ShowTarget as ShowCommand;
use commands::update::UpdateOptions;

#[derive(Parser)]
#[command(name = "ado-deploy")]
#[command(about = "Build and deploy the ADO web application")]
#[command(
    after_help = "QUICK START:\n  ado-deploy preflight                  Check host tools and inputs\n  ado-deploy image -d example.com       Build the docker image tarball\n  ado-deploy archive -n example.com     Build the config archive\n  ado-deploy update                     Apply ~/container.tgz on the host"
)]
struct Cli {
    /// Verbose logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the docker image and save it to a tarball
    Image {
        /// Name of the docker image
        #[arg(short, long, default_value = DEFAULT_IMAGE_NAME)]
        image_name: String,

        /// Domain name served by nginx
        #[arg(short, long)]
        domain_name: String,

        /// Certificate chain (default: certs/fullchain.pem)
        #[arg(short = 'c', long)]
        cert_file: Option<PathBuf>,

        /// Certificate private key (default: certs/privkey.pem)
        #[arg(short = 'k', long)]
        cert_key: Option<PathBuf>,

        /// Output tarball (default: <image-name>.tar next to the templates)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remove the local image after saving it
        #[arg(long)]
        remove_image: bool,
    },

    /// Build the docker-compose config archive
    Archive {
        /// Domain name served by nginx
        #[arg(short = 'n', long)]
        domain_name: String,

        /// Unoptimized WASM build with debug info
        #[arg(short, long)]
        debug: bool,

        /// Certificate chain (default: certs/fullchain.pem)
        #[arg(short = 'c', long)]
        cert_file: Option<PathBuf>,

        /// Certificate private key (default: certs/privkey.pem)
        #[arg(short = 'k', long)]
        cert_key: Option<PathBuf>,

        /// Output archive (default: ./container.tgz)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Web root mounted into nginx, as written in docker-compose.yml
        #[arg(short, long, default_value = "./www")]
        www_root: String,
    },

    /// Apply a config archive to the running stack (run on the target host)
    Update {
        /// Archive to apply (default: ~/container.tgz)
        #[arg(short, long)]
        archive_file: Option<PathBuf>,

        /// Installed container tree (default: ./ado_container)
        #[arg(short, long)]
        install_directory: Option<PathBuf>,
    },

    /// Upload a user's config document to the key-value store
    AddUser {
        /// Key the config is stored under
        #[arg(short, long)]
        user_id: String,

        /// JSON config document
        #[arg(short = 'f', long)]
        config_file: PathBuf,

        /// Store URL (default: ADO_STORAGE_SERVER or http://localhost:7379)
        #[arg(short, long)]
        storage_server: Option<String>,

        /// Skip TLS certificate verification
        #[arg(long)]
        allow_self_signed: bool,
    },

    /// Run preflight checks (verify host tools and inputs)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,

        /// Only check what this workflow needs
        #[arg(long, value_enum, default_value_t = Workflow::All)]
        workflow: Workflow,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// List an archive's members with its size and digest
    Archive {
        path: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "ado_deploy=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let base_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let config = Config::load(&base_dir);
    let caps = Capabilities::detect();

    match cli.command {
        Commands::Image {
            image_name,
            domain_name,
            cert_file,
            cert_key,
            output,
            remove_image,
        } => {
            let opts = ImageOptions {
                image_name,
                domain_name,
                cert_file,
                cert_key,
                output,
                remove_image,
            };
            commands::cmd_image(opts, &config, &caps)?;
        }

        Commands::Archive {
            domain_name,
            debug,
            cert_file,
            cert_key,
            output,
            www_root,
        } => {
            let opts = ArchiveOptions {
                domain_name,
                debug,
                cert_file,
                cert_key,
                output,
                www_root,
            };
            commands::cmd_archive(opts, &config, &caps)?;
        }

        Commands::Update {
            archive_file,
            install_directory,
        } => {
            let opts = UpdateOptions {
                archive_file,
                install_directory,
            };
            commands::cmd_update(opts, &caps)?;
        }

        Commands::AddUser {
            user_id,
            config_file,
            storage_server,
            allow_self_signed,
        } => {
            let opts = AddUserOptions {
                user_id,
                config_file,
                storage_server,
                allow_self_signed,
            };
            commands::cmd_add_user(opts, &config)?;
        }

        Commands::Preflight { strict, workflow } => {
            commands::cmd_preflight(&config, &caps, workflow, strict)?;
        }

        Commands::Show { what } => {
            let target = match what {
                ShowTarget::Config => ShowCommand::Config,
                ShowTarget::Archive { path, json } => ShowCommand::Archive { path, json },
            };
            commands::cmd_show(target, &config)?;
        }
    }

    Ok(())
}

/// Message to print for a finished run, if any, and whether it succeeded.
///
/// A Ctrl-C always fails the run silently, even when the work in flight
/// happened to complete.
fn outcome(result: anyhow::Result<()>, interrupted: bool) -> Result<(), Option<String>> {
    let interrupted = interrupted
        || result.as_ref().err().is_some_and(|e| {
            e.downcast_ref::<ado_deploy::Error>()
                .is_some_and(ado_deploy::Error::is_interrupt)
        });
    match result {
        _ if interrupted => Err(None),
        Ok(()) => Ok(()),
        Err(e) => Err(Some(format!("{:#}", e))),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = interrupt::install() {
        tracing::warn!("{}", e);
    }

    let result = run(cli);
    match outcome(result, interrupt::interrupted()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            if let Some(message) = message {
                println!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}
