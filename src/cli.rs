use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::directory::{Category, Status};

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "plates",
    about = "Personal restaurant directory and Resy availability checker",
    version,
    after_help = "Logs are written to: ~/.local/share/plates/logs/plates.log\n\nResy credentials are read from RESY_API_KEY and RESY_AUTH_TOKEN."
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to plates.yaml config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a restaurant to the directory
    Add {
        /// Restaurant name
        name: String,

        /// Which list it goes on: love or try
        status: Status,

        /// Meal category
        category: Category,

        /// Neighborhood or address
        #[arg(long, default_value = "")]
        location: String,

        /// Cuisine type
        #[arg(long, default_value = "")]
        cuisine: String,

        /// Resy venue ID (enables availability checks)
        #[arg(long)]
        venue_id: Option<String>,

        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,

        /// Price range
        #[arg(long, default_value = "")]
        price: String,

        /// Rating
        #[arg(long, default_value = "")]
        rating: String,
    },

    /// List restaurants
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<Status>,

        /// Filter by category
        #[arg(long)]
        category: Option<Category>,

        /// Names only, no details
        #[arg(long)]
        simple: bool,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Search restaurants by name, location, cuisine, or notes
    Search {
        /// Search query (case-insensitive substring)
        query: String,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Move a restaurant between the love and try lists
    Move {
        /// Restaurant name
        name: String,

        /// Current status
        from: Status,

        /// New status
        to: Status,
    },

    /// Remove a restaurant from the directory
    Remove {
        /// Restaurant name
        name: String,
    },

    /// Show directory statistics
    Stats {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Check Resy availability for restaurants with venue IDs
    Check {
        /// Date in natural language (tomorrow, next tuesday) or YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Restrict to one list
        #[arg(long)]
        status: Option<Status>,

        /// Restrict to one category
        #[arg(long)]
        category: Option<Category>,

        /// Number of people
        #[arg(long, default_value = "2")]
        party_size: u32,

        /// Filter out times after this (HH:MM, 24-hour)
        #[arg(long, default_value = "20:30")]
        max_time: String,

        /// Check a CSV batch file instead of the directory
        #[arg(long)]
        file: Option<PathBuf>,

        /// Pause between venue queries (milliseconds)
        #[arg(long, default_value = "0")]
        delay_ms: u64,

        /// Concise output (show time ranges instead of all slots)
        #[arg(long)]
        concise: bool,
    },

    /// Search Resy venues and manage CSV batch lists
    Venue {
        #[command(subcommand)]
        action: VenueAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum VenueAction {
    /// Search Resy for venues matching a name
    Search {
        /// Restaurant name to search
        query: String,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Append a venue to a CSV batch list (deduplicated by venue ID)
    Add {
        /// Resy venue ID
        #[arg(long)]
        venue_id: String,

        /// Restaurant name
        #[arg(long)]
        name: String,

        /// Neighborhood or address
        #[arg(long)]
        location: String,

        /// Cuisine type
        #[arg(long)]
        cuisine: String,

        /// Which list it goes on: love or try
        #[arg(long)]
        list: Status,

        /// Meal category
        #[arg(long)]
        category: Category,

        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },
}
