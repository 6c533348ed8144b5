pub mod api;
pub mod cli;
pub mod core;
pub mod store;

use crate::core::ApiError;
use crate::core::config::AppConfig;
use crate::core::source::ListParams;
use crate::store::{DiskTokenStore, TokenStore};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Login {
        username: String,
        password: Option<String>,
    },
    Register {
        username: String,
        password: Option<String>,
        currency: Option<String>,
    },
    Logout,
    Dashboard,
    Transactions(ListParams),
    Upload {
        file: PathBuf,
        account_id: Option<i64>,
    },
    Accounts,
    Holdings,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("finboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = DiskTokenStore::open(&config.session_path()?)?;
    run_command_with_store(command, &config, Arc::new(store)).await
}

/// Runs a command against an explicit token store.
pub async fn run_command_with_store(
    command: AppCommand,
    config: &AppConfig,
    store: Arc<dyn TokenStore>,
) -> Result<()> {
    let ctx = cli::Context::new(config, store)?;

    let result = match command {
        AppCommand::Login { username, password } => {
            cli::session::login(&ctx, &username, password).await
        }
        AppCommand::Register {
            username,
            password,
            currency,
        } => cli::session::register(&ctx, &username, password, currency.as_deref()).await,
        AppCommand::Logout => cli::session::logout(&ctx),
        AppCommand::Dashboard => cli::dashboard::run(&ctx).await,
        AppCommand::Transactions(params) => cli::transactions::list(&ctx, params).await,
        AppCommand::Upload { file, account_id } => {
            cli::transactions::upload(&ctx, &file, account_id).await
        }
        AppCommand::Accounts => cli::accounts::run(&ctx).await,
        AppCommand::Holdings => cli::holdings::run(&ctx).await,
    };

    result.map_err(|e| {
        let invalidated = e.chain().any(|cause| {
            cause
                .downcast_ref::<ApiError>()
                .is_some_and(ApiError::is_session_invalidated)
        });
        if invalidated {
            e.context("Not logged in or session expired. Run `finboard login` to sign in.")
        } else {
            e
        }
    })
}
