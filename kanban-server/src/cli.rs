use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(version)]
#[command(about = "Kanban board state server and client")]
#[command(long_about = "
Serves the kanban state document over HTTP and talks to a running server
from the command line.

Settings come from kanban.toml / kanban.yaml / kanban.json in the current
directory (or --config), then PORT and KANBAN_* environment variables,
then command-line flags.

Example usage:
  kanban serve --port 3000 --static-dir public
  kanban export --output backup.json
  kanban import backup.json
  kanban health
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Read settings from this file instead of discovering one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Server used by export, import and health
    #[arg(long, global = true, value_name = "URL")]
    pub server_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the state API (default)
    Serve(ServeArgs),
    /// Write the current document to a file
    Export {
        /// Destination file, or `-` for stdout [default: kanban-export.json]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the whole document with the content of a file
    Import {
        /// Previously exported document
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Check that the server is up
    Health,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Serve(ServeArgs::default())
    }
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on; 0 picks a free port
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Directory holding state.json
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Directory of static files served at /
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

impl Cli {
    /// Flag values that take precedence over files and environment
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            server_url: self.server_url.clone(),
            ..ConfigOverrides::default()
        };
        if let Some(Commands::Serve(args)) = &self.command {
            overrides.host = args.host.clone();
            overrides.port = args.port;
            overrides.data_dir = args.data_dir.clone();
            overrides.static_dir = args.static_dir.clone();
        }
        overrides
    }
}
