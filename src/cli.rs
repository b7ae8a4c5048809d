use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::usecases::bootstrap::Overrides;

#[derive(Debug, Parser)]
#[command(name = "seachat", about = "Terminal client for a SeaChat room")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// WebSocket URL of the chat server, overriding the config file
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Join immediately under this display name
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start TUI shell
    Run,
    /// Print the effective configuration as TOML and exit
    ShowConfig,
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            server_url: self.server.clone(),
            display_name: self.name.clone(),
        }
    }
}
