//! CLI 模块

pub mod config;
pub mod tasks;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "task-tracker")]
#[command(version)]
#[command(about = "Track tasks against a remote task API")]
pub struct Cli {
    /// Backend base URL (overrides TASK_TRACKER_BACKEND_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive terminal UI (default)
    Tui,
    /// Print all tasks in server order
    List {
        /// Print the raw task list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new task
    Add {
        /// Task title (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Mark a task as completed
    Complete {
        /// Task ID as shown by `list`
        id: String,
    },
    /// Show the resolved configuration, or update it
    Config {
        /// Persist a new backend base URL to the config file
        #[arg(long, value_name = "URL")]
        set_url: Option<String>,
    },
}
