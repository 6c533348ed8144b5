use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use finboard::core::ListParams;
use finboard::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Sign in and remember the session
    Login {
        username: String,
        /// Password; prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create a new user
    Register {
        username: String,
        #[arg(short, long)]
        password: Option<String>,
        /// Preferred currency code, e.g. USD
        #[arg(long)]
        currency: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Display the financial dashboard
    Dashboard,
    /// List recent transactions
    Transactions {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Import transactions from a CSV file
    Upload {
        file: PathBuf,
        /// Account to book the rows against
        #[arg(long)]
        account_id: Option<i64>,
    },
    /// List accounts and balances
    Accounts,
    /// Display holdings and investment performance
    Holdings,
}

impl From<Commands> for finboard::AppCommand {
    fn from(cmd: Commands) -> finboard::AppCommand {
        match cmd {
            Commands::Login { username, password } => {
                finboard::AppCommand::Login { username, password }
            }
            Commands::Register {
                username,
                password,
                currency,
            } => finboard::AppCommand::Register {
                username,
                password,
                currency,
            },
            Commands::Logout => finboard::AppCommand::Logout,
            Commands::Dashboard => finboard::AppCommand::Dashboard,
            Commands::Transactions { skip, limit } => {
                finboard::AppCommand::Transactions(ListParams { skip, limit })
            }
            Commands::Upload { file, account_id } => {
                finboard::AppCommand::Upload { file, account_id }
            }
            Commands::Accounts => finboard::AppCommand::Accounts,
            Commands::Holdings => finboard::AppCommand::Holdings,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => finboard::cli::setup::setup(),
        Some(cmd) => finboard::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
