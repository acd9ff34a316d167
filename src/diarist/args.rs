use clap::{Parser, Subcommand};
use once_cell::sync::Lazy;
use std::path::PathBuf;

/// "0.3.2" without git metadata, "0.3.2@abc1234 2024-01-15" for dev builds
static VERSION: Lazy<String> = Lazy::new(|| {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("DIARIST_GIT_HASH");
    const COMMIT_DATE: &str = env!("DIARIST_COMMIT_DATE");

    if GIT_HASH.is_empty() {
        VERSION.to_string()
    } else {
        format!("{}@{} {}", VERSION, GIT_HASH, COMMIT_DATE)
    }
});

#[derive(Parser, Debug)]
#[command(name = "diarist", version = VERSION.as_str())]
#[command(about = "PIN-protected diaries for text, drawings, photos and audio", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// More log output (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new diary
    #[command(alias = "n")]
    Create {
        /// Title of the diary (unique, case-insensitive)
        title: String,

        /// 4-digit PIN (prompted if omitted)
        #[arg(long)]
        pin: Option<String>,

        /// Display color, e.g. #ff0000
        #[arg(long)]
        color: Option<String>,
    },

    /// List diaries
    #[command(alias = "ls")]
    List,

    /// Unlock a diary and show its entries
    #[command(alias = "o", alias = "view")]
    Open {
        /// Diary id, list position or title
        diary: String,

        #[arg(long)]
        pin: Option<String>,

        /// Print the entries as an HTML fragment
        #[arg(long)]
        html: bool,

        /// Show the newest entries first
        #[arg(long)]
        newest_first: bool,
    },

    /// Add a text entry ("-" reads stdin)
    #[command(alias = "w")]
    Write {
        diary: String,

        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        #[arg(long)]
        pin: Option<String>,
    },

    /// Add a drawing from a stroke script ("-" reads stdin)
    Draw {
        diary: String,

        script: String,

        /// On-screen size the script coordinates refer to, e.g. 300x200
        #[arg(long)]
        display: Option<String>,

        #[arg(long)]
        pin: Option<String>,
    },

    /// Add one image entry per file
    Image {
        diary: String,

        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        #[arg(long)]
        pin: Option<String>,
    },

    /// Add one audio entry per file
    Audio {
        diary: String,

        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        #[arg(long)]
        pin: Option<String>,
    },

    /// Show or change the theme (toggle, dark, light)
    Theme { action: Option<String> },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., canvas-width)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
