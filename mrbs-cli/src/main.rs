mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mrbs_core::config::MrbsConfig;
use mrbs_core::constants::DEFAULT_DURATION_SLOTS;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mrbs")]
#[command(about = "Browse meeting room availability and manage your bookings")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the booking grid for a day
    Grid {
        /// Day to show (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List the bookable start times for a day
    Slots {
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show which durations are allowed from a start time
    Durations {
        /// Start time (e.g. "14:30" or "01:30 AM")
        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        date: Option<String>,

        /// A previously chosen duration (in 30-minute slots) to check against the new start
        #[arg(long)]
        duration: Option<u32>,

        /// Also mark durations that clash with this room's bookings
        #[arg(short, long)]
        room: Option<u32>,
    },
    /// List the rooms
    Rooms,
    /// Book a room
    Book {
        /// Room id (see `mrbs rooms`)
        #[arg(short, long)]
        room: u32,

        #[arg(short, long)]
        start: String,

        /// Length in 30-minute slots (1-6)
        #[arg(long, default_value_t = DEFAULT_DURATION_SLOTS)]
        duration: u32,

        #[arg(short, long)]
        title: String,

        /// People involved
        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        date: Option<String>,
    },
    /// Change an existing booking
    Edit {
        booking_id: String,

        #[arg(short, long)]
        room: u32,

        #[arg(short, long)]
        start: String,

        #[arg(long, default_value_t = DEFAULT_DURATION_SLOTS)]
        duration: u32,

        #[arg(short, long)]
        title: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a booking
    Delete { booking_id: String },
    /// Log in to the booking server
    Login { username: String },
    /// Log out and forget the stored session
    Logout,
    /// Change your password
    Passwd,
    /// Manage user accounts (admins only)
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Show config paths and effective settings
    Config,
}

#[derive(Subcommand)]
enum UsersCommand {
    /// List all accounts
    List,
    /// Create accounts from "#Display Name# email" lines
    Add {
        /// File with one entry per line (reads stdin if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Delete an account
    Delete { username: String },
    /// Make an account an admin
    Promote { username: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = MrbsConfig::load()?;

    match cli.command {
        Commands::Grid { date } => commands::grid::run(&config, date.as_deref()).await,
        Commands::Slots { date } => commands::slots::run(&config, date.as_deref()),
        Commands::Durations {
            start,
            date,
            duration,
            room,
        } => commands::durations::run(&config, &start, date.as_deref(), duration, room).await,
        Commands::Rooms => commands::rooms::run(&config),
        Commands::Book {
            room,
            start,
            duration,
            title,
            description,
            date,
        } => {
            let form = commands::book::BookingForm {
                room,
                start,
                duration,
                title,
                description,
                date,
            };
            commands::book::create(&config, form).await
        }
        Commands::Edit {
            booking_id,
            room,
            start,
            duration,
            title,
            description,
            date,
        } => {
            let form = commands::book::BookingForm {
                room,
                start,
                duration,
                title,
                description,
                date,
            };
            commands::book::edit(&config, &booking_id, form).await
        }
        Commands::Delete { booking_id } => commands::delete::run(&config, &booking_id).await,
        Commands::Login { username } => commands::login::login(&config, &username).await,
        Commands::Logout => commands::login::logout(&config).await,
        Commands::Passwd => commands::passwd::run(&config).await,
        Commands::Users { command } => match command {
            UsersCommand::List => commands::users::list(&config).await,
            UsersCommand::Add { file } => commands::users::add(&config, file.as_deref()).await,
            UsersCommand::Delete { username } => commands::users::delete(&config, &username).await,
            UsersCommand::Promote { username } => commands::users::promote(&config, &username).await,
        },
        Commands::Config => commands::config::run(&config),
    }
}

/// Logs go to stderr so they never interleave with a rendered grid.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("mrbs_core=debug,mrbs_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
