// src/cli/mod.rs
// CLI module for NextMove commands

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use nextmove::config::{EnvConfig, FileConfig};
use nextmove::{Catalog, PreferenceStore, ReplyClient};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

pub mod analyze;
pub mod check;
pub mod prefs;
pub mod reply;

pub use analyze::{run_analyze, run_suggest};
pub use check::run_config_check;
pub use prefs::{run_character, run_style};
pub use reply::{run_history, run_regenerate, run_reply};

#[derive(Parser)]
#[command(name = "nextmove")]
#[command(about = "Reply suggestions for the message you just got")]
#[command(version)]
pub struct Cli {
    /// Log progress to stderr (repeat for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest replies to an incoming message
    Reply {
        /// The message you received (read from stdin when omitted)
        #[arg(index = 1)]
        message: Option<String>,

        /// What you want out of the conversation
        #[arg(short, long)]
        goal: Option<String>,

        /// Reply style (saved as your preference)
        #[arg(short, long)]
        style: Option<String>,

        /// Print the history entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the last reply again in another style
    Regenerate {
        /// Style to use
        #[arg(short, long)]
        style: String,

        /// History entry to regenerate (default: most recent)
        #[arg(long)]
        id: Option<String>,

        /// Print the history entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recent replies, newest first
    History {
        /// Forget all recent replies
        #[arg(long)]
        clear: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the preferred reply style
    Style {
        #[command(subcommand)]
        action: StyleAction,
    },

    /// Show or change the character profile of the other person
    Character {
        #[command(subcommand)]
        action: CharacterAction,
    },

    /// Read a whole conversation and estimate interest
    Analyze {
        /// Conversation transcript (read from stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Character profile (default: saved preference)
        #[arg(short, long)]
        character: Option<String>,
    },

    /// Suggest a single next message for a conversation
    Suggest {
        /// Conversation transcript (read from stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Character profile (default: saved preference)
        #[arg(short, long)]
        character: Option<String>,

        /// Tone: Dengeli, Daha Mesafeli or Daha Net
        #[arg(short, long)]
        tone: Option<String>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum StyleAction {
    /// Print the current style
    Get,
    /// Save a new style
    Set { label: String },
    /// List the offered styles
    List,
}

#[derive(Subcommand)]
pub enum CharacterAction {
    /// Print the current character profile
    Get,
    /// Save a character profile by name
    Set { name: String },
    /// List the offered profiles
    List,
    /// Forget the saved profile
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate environment and config file
    Check,
}

/// Everything a command needs, resolved once at startup
pub struct AppContext {
    pub env: EnvConfig,
    pub catalog: Catalog,
    pub store: PreferenceStore,
}

impl AppContext {
    pub fn load() -> Self {
        let env = EnvConfig::load();
        let catalog = FileConfig::load(&env.data_dir).catalog();
        let store = PreferenceStore::new(env.data_dir.clone());
        Self { env, catalog, store }
    }

    pub fn client(&self) -> Result<ReplyClient> {
        Ok(ReplyClient::new(&self.env.client_config())?)
    }

    pub fn style_labels(&self) -> String {
        self.catalog
            .styles()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Explicit name, or the saved profile
    pub async fn resolve_character(&self, name: Option<&str>) -> Result<String> {
        match name {
            Some(name) => match self.catalog.character(name) {
                Some(profile) => Ok(profile.name.clone()),
                None => bail!("Unknown character '{}'. See `nextmove character list`.", name.trim()),
            },
            None => match self.store.load_character(&self.catalog).await {
                Some(profile) => Ok(profile.name),
                None => bail!("Önce bir karakter seç: `nextmove character set <isim>`"),
            },
        }
    }
}

/// Text from a file, an argument, or stdin
pub async fn read_input(file: Option<&PathBuf>) -> Result<String> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };
    Ok(text)
}
