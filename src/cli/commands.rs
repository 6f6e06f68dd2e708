//! CLI command implementations
//!
//! Each command loads the data file, does its work, and writes the
//! file back if it mutated the store. `serve` hands the store to the
//! HTTP surface and blocks until shutdown.

use std::fs;
use std::sync::Arc;

use crate::history::{QueryHistory, SavedAnalyses};
use crate::observability::{Logger, Severity};
use crate::planner::{HttpPlanner, QueryPlanner, UnconfiguredPlanner};
use crate::server::{serve, AppState, ServerConfig};
use crate::sql::{execute, SqlOutcome, SqlStatement};
use crate::store::{export_json, import_rows, RecordStore};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{load_store, read_rows, save_store};

/// Parses arguments and runs the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let data_file = cli.data_file.clone();

    match cli.command {
        Command::Serve {
            bind,
            port,
            planner_url,
            planner_key,
        } => {
            let store = load_store(&data_file)?;
            let planner: Arc<dyn QueryPlanner> = match planner_url {
                Some(url) => {
                    let mut http = HttpPlanner::new(url);
                    if let Some(key) = planner_key {
                        http = http.with_api_key(key);
                    }
                    Arc::new(http)
                }
                None => {
                    Logger::log(
                        Severity::Warn,
                        "planner_not_configured",
                        &[("hint", "natural-language queries will fail")],
                    );
                    Arc::new(UnconfiguredPlanner)
                }
            };

            let state = AppState {
                store: Arc::new(store),
                planner,
                history: Arc::new(QueryHistory::new()),
                saved: Arc::new(SavedAnalyses::new()),
                relationships: Vec::new(),
            };
            let config = ServerConfig {
                bind_address: bind,
                port,
            };

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve(config, state))?;
            Ok(())
        }

        Command::Import { file, record_type } => {
            let store = load_store(&data_file)?;
            let rows = read_rows(&file)?;
            let outcome = import_rows(&store, rows, record_type.as_deref())?;
            save_store(&data_file, &store)?;
            println!(
                "Imported {} {} records ({} fields)",
                outcome.count,
                outcome.record_type,
                outcome.schema.len()
            );
            Ok(())
        }

        Command::Export { record_type, out } => {
            let store = load_store(&data_file)?;
            let exported = export_json(&store, &record_type)?;
            match out {
                Some(path) => {
                    fs::write(&path, exported)?;
                    println!("Exported {} to {}", record_type, path.display());
                }
                None => println!("{}", exported),
            }
            Ok(())
        }

        Command::Tables => {
            let store = load_store(&data_file)?;
            let types = store.record_types()?;
            if types.is_empty() {
                println!("No records imported yet");
                return Ok(());
            }
            for name in types {
                let count = store.fetch(&name)?.len();
                println!("{}  ({} records)", name, count);
            }
            Ok(())
        }

        Command::Sql { query } => {
            let store = load_store(&data_file)?;
            let statement = SqlStatement::parse(&query)?;
            let outcome = execute(&store, &statement)?;
            match outcome {
                SqlOutcome::Rows(rows) => {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                    println!("{} row(s)", rows.len());
                }
                SqlOutcome::Affected {
                    operation,
                    rows,
                    message,
                } => {
                    save_store(&data_file, &store)?;
                    println!("{}: {} row(s) affected. {}", operation, rows, message);
                }
            }
            Ok(())
        }
    }
}
