//! CLI module for querydeck
//!
//! Provides the command-line interface for:
//! - serve: start the HTTP API over a data file
//! - import: load a JSON array of rows into the data file
//! - export: write one collection back out as JSON
//! - tables: list collections and counts
//! - sql: run one pseudo-SQL statement and print the result

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::run;
pub use errors::{CliError, CliResult};
pub use io::{load_store, read_rows, save_store};
