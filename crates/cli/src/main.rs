//! BorzFuel CLI - catalog, customer account, and cart tools.
//!
//! # Usage
//!
//! ```bash
//! # List published products
//! bz-cli products
//!
//! # Sign in and show the customer profile
//! BORZFUEL_PASSWORD=... bz-cli login -e ola@example.no
//!
//! # Create a customer account
//! BORZFUEL_PASSWORD=... bz-cli register -e ny@example.no --first-name Ny --last-name Kunde
//!
//! # Price a cart
//! bz-cli quote savage-formula=2 calm-formula
//! ```
//!
//! # Environment Variables
//!
//! - `BORZFUEL_CMS_URL` - CMS base URL (default `http://localhost:3000`)
//! - `BORZFUEL_PASSWORD` - password for `login`, `register` and `update-profile`
//! - `SENTRY_DSN` - enables error reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use borzfuel_storefront::config::StorefrontConfig;
use borzfuel_storefront::{Storefront, telemetry};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "bz-cli")]
#[command(author, version, about = "BorzFuel storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published products
    Products,
    /// List product benefits
    Benefits,
    /// List formula ingredients
    Ingredients,
    /// Sign in and show the customer profile
    Login {
        /// Customer email address
        #[arg(short, long)]
        email: String,

        #[arg(long, env = "BORZFUEL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a customer account
    Register {
        /// Email address for the new account
        #[arg(short, long)]
        email: String,

        #[arg(long, env = "BORZFUEL_PASSWORD", hide_env_values = true)]
        password: String,

        /// Repeat of the password; defaults to `--password`
        #[arg(long)]
        confirm_password: Option<String>,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        /// Opt in to marketing email
        #[arg(long)]
        marketing: bool,
    },
    /// Sign in and update the customer profile
    UpdateProfile {
        #[arg(short, long)]
        email: String,

        #[arg(long, env = "BORZFUEL_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        marketing_consent: Option<bool>,
    },
    /// Price a cart of `slug[=quantity]` items
    Quote {
        #[arg(required = true)]
        items: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init_tracing(telemetry::DEFAULT_FILTER);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let _sentry_guard = telemetry::init_sentry(&config.sentry);
    telemetry::init_tracing(telemetry::DEFAULT_FILTER);

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CliError> {
    let storefront = Storefront::new(config)?;

    match cli.command {
        Commands::Products => commands::catalog::products(&storefront).await?,
        Commands::Benefits => commands::catalog::benefits(&storefront).await?,
        Commands::Ingredients => commands::catalog::ingredients(&storefront).await?,
        Commands::Login { email, password } => {
            commands::account::login(&storefront, &email, password).await?;
        }
        Commands::Register {
            email,
            password,
            confirm_password,
            first_name,
            last_name,
            marketing,
        } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            commands::account::register(
                &storefront,
                commands::account::Registration {
                    email,
                    password,
                    confirm_password,
                    first_name,
                    last_name,
                    marketing_consent: marketing,
                },
            )
            .await?;
        }
        Commands::UpdateProfile {
            email,
            password,
            first_name,
            last_name,
            marketing_consent,
        } => {
            let update = borzfuel_core::ProfileUpdate {
                first_name,
                last_name,
                marketing_consent,
            };
            commands::account::update_profile(&storefront, &email, password, update).await?;
        }
        Commands::Quote { items } => commands::quote::quote(&storefront, &items).await?,
    }
    Ok(())
}
