use clap::{ArgAction, Parser, Subcommand};
use commands::{auth, config, items, movies, profile, watchlists};
use reelbox_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod navigator;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "reelbox")]
#[command(about = "Reelbox - Browse movies and curate your watchlists")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a file (rotated daily). Without a PATH, logs go under the config directory
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Username (if not provided, will prompt)
        #[arg(long)]
        username: Option<String>,
    },
    /// Create an account and sign in
    Register {
        /// Username (if not provided, will prompt)
        #[arg(long)]
        username: Option<String>,

        /// Email address (if not provided, will prompt)
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout {
        /// Skip the confirmation prompt
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// View or change your account
    Profile {
        #[command(subcommand)]
        cmd: Option<ProfileCommands>,
    },
    /// Browse the movie catalogue
    Movies {
        #[command(subcommand)]
        cmd: MovieCommands,
    },
    /// Manage your watchlists
    Watchlists {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Manage the movies inside a watchlist
    Items {
        #[command(subcommand)]
        cmd: ItemCommands,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the signed-in account
    Show,
    /// Change username, email or password
    Update {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Prompt for a new password
        #[arg(long, action = ArgAction::SetTrue)]
        password: bool,
    },
    /// Delete the signed-in account
    Delete {
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum MovieCommands {
    /// List the newest movies, one page at a time
    #[command(long_about = "List movies sorted by release date. Use --page to start at a later page and --all to keep fetching until the last page.")]
    List {
        /// Page to start from (0-based)
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Fetch every remaining page
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,
    },
    /// Show one movie, and whether it is on any of your watchlists
    Show { id: i64 },
    /// Search titles by free text
    Search { query: String },
    /// Movies in a genre
    Genre { name: String },
    /// List every genre in the catalogue
    Genres,
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// List your watchlists
    List,
    /// Show a watchlist and its movies
    Show { id: i64 },
    /// Create a watchlist
    Create {
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Rename or redescribe a watchlist
    Update {
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a watchlist
    Delete {
        id: i64,

        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// List the movies in a watchlist
    List {
        watchlist_id: i64,

        /// Only items with this status (active, watching, watched, dropped)
        #[arg(long)]
        status: Option<reelbox_models::ItemStatus>,
    },
    /// Add a movie to a watchlist
    Add { watchlist_id: i64, movie_id: i64 },
    /// Change an item's status
    Status {
        item_id: i64,
        status: reelbox_models::ItemStatus,
    },
    /// Remove an item from its watchlist
    Remove {
        item_id: i64,

        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and session state (masks the token)
    Show {
        /// Show the full token
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Point the client at a different backend
    SetUrl { url: String },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .map(|path| path.unwrap_or_else(|| PathManager::default().default_log_file()));
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Login { username } => auth::run_login(username, &output).await,
        Commands::Register { username, email } => auth::run_register(username, email, &output).await,
        Commands::Logout { yes } => auth::run_logout(yes, &output).await,
        Commands::Profile { cmd } => profile::run_profile(cmd.unwrap_or(ProfileCommands::Show), &output).await,
        Commands::Movies { cmd } => movies::run_movies(cmd, &output).await,
        Commands::Watchlists { cmd } => watchlists::run_watchlists(cmd.unwrap_or(WatchlistCommands::List), &output).await,
        Commands::Items { cmd } => items::run_items(cmd, &output).await,
        Commands::Config { cmd } => config::run_config(cmd.unwrap_or(ConfigCommands::Show { full: false }), &output),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "Command failed");
        output.error(e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
