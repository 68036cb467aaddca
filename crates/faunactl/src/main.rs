//! Fauna Control - CLI client for the fauna daemon.
//!
//! Thin HTTP frontend over a running faunad instance.

mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "faunactl")]
#[command(about = "Fauna Atlas - animal knowledge service client", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon base URL (overrides FAUNAD_URL)
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe an animal
    Animal {
        /// Animal name, e.g. "lion" or "chat"
        name: String,
    },

    /// Send a free-text prompt to the completion endpoint
    Ask {
        prompt: String,

        /// Override the completion model
        #[arg(long)]
        model: Option<String>,
    },

    /// Send a raw knowledge query and print the JSON response
    Query { query: String },

    /// Show daemon health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = client::DaemonClient::new(cli.url);

    match cli.command {
        Commands::Animal { name } => commands::animal(&client, &name).await,
        Commands::Ask { prompt, model } => commands::ask(&client, &prompt, model.as_deref()).await,
        Commands::Query { query } => commands::query(&client, &query).await,
        Commands::Health => commands::health(&client).await,
    }
}
