use clap::{Parser, Subcommand};

/// Command-line interface definition for Shiftlog
/// CLI application to track attendance and queue tickets with SQLite
#[derive(Parser)]
#[command(
    name = "shiftlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Business-day aware attendance and queue tracking on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// View or edit the store time configuration
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Set the daily rollover time (HH:MM)
        #[arg(long = "rollover", value_name = "HH:MM")]
        rollover: Option<String>,

        /// Set the rounding method: floor, ceil or nearest
        #[arg(long = "rounding", value_name = "METHOD")]
        rounding: Option<String>,

        /// Set the rounding granularity in minutes
        #[arg(long = "granularity", value_name = "MINUTES")]
        granularity: Option<i64>,

        /// Enable rounding of the scheduled start/end display times
        #[arg(long = "enable-rounding", conflicts_with = "disable_rounding")]
        enable_rounding: bool,

        /// Disable rounding of the scheduled start/end display times
        #[arg(long = "disable-rounding")]
        disable_rounding: bool,
    },

    /// Clock in (start or resume the current business day's shift)
    In {
        /// Profile identity clocking in (defaults to config default_owner)
        #[arg(long = "owner")]
        owner: Option<String>,

        /// Store the shift belongs to (defaults to config default_store)
        #[arg(long = "store")]
        store: Option<String>,

        /// Free-form pickup note attached to the record
        #[arg(long = "pickup")]
        pickup: Option<String>,

        /// Clock-in questionnaire answers as a JSON object
        #[arg(long = "answers", value_name = "JSON")]
        answers: Option<String>,
    },

    /// Clock out of a work record
    Out {
        /// Work record id (as printed by `in`)
        record: i64,

        #[arg(long = "owner")]
        owner: Option<String>,
    },

    /// Start or end a break on a work record
    Break {
        #[command(subcommand)]
        action: BreakAction,
    },

    /// Guest queue: daily ticket numbers per store
    Queue {
        #[command(subcommand)]
        action: QueueAction,
    },

    /// List work records for a business day
    List {
        #[arg(long = "store")]
        store: Option<String>,

        /// Only this profile's records
        #[arg(long = "owner")]
        owner: Option<String>,

        /// Business day (YYYY-MM-DD); defaults to the current one
        #[arg(long = "day", value_name = "YYYY-MM-DD")]
        day: Option<String>,
    },

    /// Print the internal audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum BreakAction {
    /// Open a break on the record
    Start {
        record: i64,

        #[arg(long = "owner")]
        owner: Option<String>,
    },

    /// Close the record's open break
    End {
        record: i64,

        #[arg(long = "owner")]
        owner: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum QueueAction {
    /// Take the next ticket number for the store's current business day
    Join {
        #[arg(long = "store")]
        store: Option<String>,
    },

    /// Show waiting tickets for the current business day
    List {
        #[arg(long = "store")]
        store: Option<String>,
    },
}
