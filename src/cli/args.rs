//! CLI argument definitions using clap
//!
//! Commands:
//! - querydeck serve --data-file <path> [--port <port>] [--planner-url <url>]
//! - querydeck import <file> [--record-type <name>] --data-file <path>
//! - querydeck export <record-type> [--out <path>] --data-file <path>
//! - querydeck tables --data-file <path>
//! - querydeck sql <query> --data-file <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// querydeck - a defensive query engine for dashboards over hosted
/// record stores
#[derive(Parser, Debug)]
#[command(name = "querydeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the JSON data file backing the store
    #[arg(long, global = true, default_value = "./querydeck.json")]
    pub data_file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port
        #[arg(long, default_value_t = 8900)]
        port: u16,

        /// Endpoint of the external query planner
        #[arg(long)]
        planner_url: Option<String>,

        /// Bearer token for the planner endpoint
        #[arg(long)]
        planner_key: Option<String>,
    },

    /// Import a JSON array of rows
    Import {
        /// File containing a JSON array of objects
        file: PathBuf,

        /// Record type to store the rows under (detected if omitted)
        #[arg(long)]
        record_type: Option<String>,
    },

    /// Export one collection as JSON
    Export {
        /// Record type to export
        record_type: String,

        /// Output file; stdout if omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List collections and their record counts
    Tables,

    /// Run one pseudo-SQL statement
    Sql {
        /// The statement, e.g. "SELECT * FROM students LIMIT 10"
        query: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
