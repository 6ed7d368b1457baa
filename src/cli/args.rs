// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the notes service, overrides the config file
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// User whose feed is shown, overrides the config file
    #[arg(short, long, value_name = "USER_ID", global = true)]
    pub user: Option<i64>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Browse the feed interactively
    Feed,

    /// Print the feed
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,

        /// Open the feed in the browser
        #[arg(long, conflicts_with = "json")]
        open: bool,
    },

    /// Show a single note
    View {
        /// Note ID or a /view/<id> path
        #[arg(value_name = "NOTE")]
        target: String,

        /// Output note as JSON
        #[arg(long)]
        json: bool,

        /// Open the note in the browser
        #[arg(long, conflicts_with = "json")]
        open: bool,
    },

    /// Post a new note; write tags inline as #tag
    Add {
        /// Note text
        #[arg(value_name = "TEXT", required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Edit a note; without --text prints the text the editor starts from
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Replacement text, stored verbatim
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },

    /// Print the effective configuration
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,
    },
}
