use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use crate::config::{DEFAULT_BIND_ADDRESS, DEFAULT_DATABASE_URL};
use commands::{clear_database, init_database, serve};

#[derive(Parser)]
#[command(name = "gastos")]
#[command(about = "Expense and income tracker with a JSON API and spreadsheet export")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    ///
    /// Missing tables are created and default categories and rules are seeded
    /// before the server starts listening.
    Serve {
        /// Database URL
        ///
        /// Examples:
        ///   sqlite://gastos.db?mode=rwc (relative file, created if missing)
        ///   sqlite:///absolute/path/to/gastos.db
        #[arg(short, long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
        bind_address: String,
    },
    /// Create the tables and seed default categories and rules, then exit
    InitDb {
        /// Database URL
        #[arg(short, long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },
    /// Delete every row of every table and reset id sequences
    ///
    /// The schema is kept. Default data is seeded again on the next start.
    ClearDb {
        /// Database URL
        #[arg(short, long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { database_url, bind_address } => {
                serve(&database_url, &bind_address).await?;
            }
            Commands::InitDb { database_url } => {
                init_database(&database_url).await?;
            }
            Commands::ClearDb { database_url } => {
                clear_database(&database_url).await?;
            }
        }
        Ok(())
    }
}
