use clap::{Parser, Subcommand};

/// `syncfm-discord` - Detect music links and convert them with SyncFM.
#[derive(Parser, Debug)]
#[command(name = "syncfm-discord")]
#[command(version)]
#[command(
    about = "Convert Spotify, Apple Music and YouTube Music links through SyncFM.",
    long_about = None
)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the first music link in TEXT and convert it
    Convert {
        /// Message text; multiple words are joined with spaces
        #[arg(required = true)]
        text: Vec<String>,

        /// Also accept youtube.com and youtu.be links
        #[arg(long)]
        enable_youtube: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Per-request timeout in seconds (defaults to syncfm.timeout_secs)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Report which service a URL belongs to
    Classify {
        url: String,

        /// Also accept youtube.com and youtu.be links
        #[arg(long)]
        enable_youtube: bool,
    },

    /// Manage the bot's Discord application commands
    Commands {
        #[command(subcommand)]
        action: DiscordCommandAction,
    },

    /// Check credentials, Discord API access and the SyncFM API
    Doctor,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscordCommandAction {
    /// Register "Convert to SyncFM" and /share globally
    Register,
    /// List registered commands
    List,
    /// Remove every registered command
    Clear,
}
