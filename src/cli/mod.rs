//! CLI module for Bookgraph.
//!
//! Subcommands:
//! - `serve`: Run the REST API
//! - `init`: Create the identifier uniqueness constraints
//! - `ping`: Check connectivity to Neo4j

mod init;
mod ping;
mod serve;

use clap::{Parser, Subcommand};

/// Bookgraph - REST API over a Neo4j graph
#[derive(Parser)]
#[command(name = "bookgraph")]
#[command(about = "REST service for companies, users, authors, books and schools in Neo4j")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Host address to bind to (overrides `server.host`)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `server.port`)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create uniqueness constraints on every identifier
    Init,

    /// Check that Neo4j is reachable
    Ping,
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Serve { ref host, port } => self.run_serve(host.as_deref(), port).await,
            Command::Init => self.run_init().await,
            Command::Ping => self.run_ping().await,
        }
    }
}
