use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use repbook::OutputFormat;
use repbook::commands;
use repbook::config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "repbook")]
#[command(about = "Workout log: exercise library, workout logging and history")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show workout history for the signed-in user
    History {
        #[arg(long, help = "Only show the N most recent workouts")]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        #[arg(long, help = "Show every set as a tree")]
        tree: bool,
    },

    /// Browse the exercise library
    Exercises {
        #[arg(long, help = "Filter by name (case-insensitive)")]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show exercise details
    Exercise {
        #[arg(help = "Exercise document ID")]
        id: String,
    },

    /// Log a workout from a JSON file
    Log {
        #[arg(long, help = "Workout draft file")]
        file: PathBuf,
        #[arg(long, help = "Validate without saving")]
        dry_run: bool,
    },

    /// Sign in, sign out, session status
    Auth(AuthArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct AuthArgs {
    #[command(subcommand)]
    action: AuthAction,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in as a user
    SignIn {
        #[arg(help = "Identity service user ID")]
        user_id: String,
    },
    /// Forget the current session
    SignOut,
    /// Show current session
    Status,
}

#[derive(Parser)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Set { key: String, value: String },
    Get { key: String },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load()?;

    match &cli.command {
        Commands::History {
            limit,
            format,
            tree,
        } => {
            commands::history::history(&config, *limit, *format, *tree)?;
        }
        Commands::Exercises { search, format } => {
            commands::exercises::list(&config, search.clone(), *format)?;
        }
        Commands::Exercise { id } => {
            commands::exercises::show(&config, id)?;
        }
        Commands::Log { file, dry_run } => {
            commands::log::log_workout(&config, file, *dry_run)?;
        }
        Commands::Auth(auth_args) => match &auth_args.action {
            AuthAction::SignIn { user_id } => commands::auth::sign_in(&config, user_id)?,
            AuthAction::SignOut => commands::auth::sign_out(&config)?,
            AuthAction::Status => commands::auth::status(&config)?,
        },
        Commands::Config(args) => match &args.action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Get { key } => commands::config::get(key, &config)?,
            ConfigAction::Set { key, value } => commands::config::set(key, value)?,
        },
    }

    Ok(())
}
