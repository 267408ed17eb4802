//! schoolmark CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod logging;

#[derive(Parser)]
#[command(name = "schoolmark", version, about = "School review and ranking platform")]
struct Cli {
    /// Data file path (overrides config and SCHOOLMARK_DATA)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session log file path
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Acting user for commands that need one
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and an empty data file
    Init,

    /// Register a user account
    AddUser {
        username: String,
        password: String,

        /// Account role: admin or student
        #[arg(long, default_value = "student")]
        role: String,
    },

    /// Remove a user account (admin only)
    DeleteUser { user_id: u32 },

    /// Add a school
    AddSchool {
        name: String,

        /// School level: primary, secondary, or combined
        #[arg(long)]
        level: String,

        #[arg(long)]
        location: String,
    },

    /// Rate a school from 1 to 5
    Rate { school_id: String, value: u8 },

    /// Manage comments
    #[command(subcommand)]
    Comment(CommentCommands),

    /// Manage favourites
    #[command(subcommand)]
    Favourite(FavouriteCommands),

    /// Show per-level school rankings
    Rankings,

    /// Show the top schools per level
    Top {
        /// Entries per level (defaults to the configured top_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show schools by activity
    Trending,

    /// Show the most active users
    Contributors {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one school in detail
    School { school_id: String },

    /// Show system statistics
    Stats,

    /// Export the top-schools report to a text file
    Export {
        /// Output file (defaults to a timestamped file in report_dir)
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand)]
enum CommentCommands {
    /// Comment on a school
    Add { school_id: String, text: String },

    /// Rewrite a comment (owner or admin)
    Edit { index: usize, text: String },

    /// Delete a comment (owner or admin)
    Delete { index: usize },

    /// List comments for a school
    List { school_id: String },
}

#[derive(Subcommand)]
enum FavouriteCommands {
    /// Bookmark a school
    Add { school_id: String },

    /// List your favourites
    List,
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let data_path = cli.data.clone().unwrap_or_else(|| config.data_path.clone());
    let log_path = cli.log.clone().unwrap_or_else(|| config.log_path.clone());
    logging::init(&log_path);

    let user = cli.user.as_deref();
    let result = match cli.command {
        Commands::Init => commands::init::execute(&data_path),
        Commands::AddUser {
            username,
            password,
            role,
        } => commands::users::add(&data_path, &username, &password, &role),
        Commands::DeleteUser { user_id } => commands::users::delete(&data_path, user_id, user),
        Commands::AddSchool {
            name,
            level,
            location,
        } => commands::schools::add(&data_path, &name, &level, &location),
        Commands::Rate { school_id, value } => {
            commands::review::rate(&data_path, &school_id, value, user)
        }
        Commands::Comment(command) => match command {
            CommentCommands::Add { school_id, text } => {
                commands::review::comment_add(&data_path, &school_id, &text, user)
            }
            CommentCommands::Edit { index, text } => {
                commands::review::comment_edit(&data_path, index, &text, user)
            }
            CommentCommands::Delete { index } => {
                commands::review::comment_delete(&data_path, index, user)
            }
            CommentCommands::List { school_id } => {
                commands::review::comment_list(&data_path, &school_id)
            }
        },
        Commands::Favourite(command) => match command {
            FavouriteCommands::Add { school_id } => {
                commands::review::favourite_add(&data_path, &school_id, user)
            }
            FavouriteCommands::List => commands::review::favourite_list(&data_path, user),
        },
        Commands::Rankings => commands::view::rankings(&data_path),
        Commands::Top { limit } => {
            commands::view::top(&data_path, limit.unwrap_or(config.top_limit))
        }
        Commands::Trending => commands::view::trending(&data_path),
        Commands::Contributors { limit } => {
            commands::view::contributors(&data_path, limit.unwrap_or(5))
        }
        Commands::School { school_id } => commands::schools::profile(&data_path, &school_id),
        Commands::Stats => commands::view::stats(&data_path),
        Commands::Export { out, limit } => commands::export::execute(
            &data_path,
            out,
            &config.report_dir,
            limit.unwrap_or(config.top_limit),
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
