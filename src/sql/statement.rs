//! Pseudo-SQL statement parsing
//!
//! Clause extraction is regex-based, matching the lightweight dialect
//! users actually type: one table, optional ORDER BY and LIMIT for
//! SELECT, a mandatory quoted-ID WHERE guard for UPDATE and DELETE.

use std::sync::OnceLock;

use regex::Regex;

use super::errors::{SqlError, SqlResult};

/// Default row cap when a SELECT has no LIMIT
pub const DEFAULT_LIMIT: usize = 100;

/// Table queried when a SELECT names none
pub const DEFAULT_TABLE: &str = "data_records";

fn from_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)FROM\s+(\w+)").expect("static pattern"))
}

fn order_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)ORDER\s+BY\s+(\w+)\s*(ASC|DESC)?").expect("static pattern"))
}

fn limit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)LIMIT\s+(\d+)").expect("static pattern"))
}

fn id_clause_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)WHERE\s+id\s*=\s*'([^']+)'").expect("static pattern"))
}

fn values_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)VALUES\s*\((.+)\)").expect("static pattern"))
}

fn dangerous_res() -> &'static [Regex; 4] {
    static RES: OnceLock<[Regex; 4]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            Regex::new(r"(?i)DROP\s+").expect("static pattern"),
            Regex::new(r"(?i)TRUNCATE\s+").expect("static pattern"),
            Regex::new(r"(?i)ALTER\s+").expect("static pattern"),
            Regex::new(r"(?i)CREATE\s+").expect("static pattern"),
        ]
    })
}

/// ORDER BY clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub ascending: bool,
}

/// Parsed SELECT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStatement {
    pub table: String,
    pub order: Option<OrderBy>,
    pub limit: usize,
}

/// A parsed, admission-checked statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlStatement {
    Select(SelectStatement),
    /// Raw text is stored as-is under a marker record type
    Insert { raw: String },
    Update { id: String },
    Delete { id: String },
}

impl SqlStatement {
    /// Parses a statement, enforcing the verb whitelist and the
    /// dangerous-pattern rejection before any clause extraction.
    pub fn parse(query: &str) -> SqlResult<Self> {
        let trimmed = query.trim();
        let upper = trimmed.to_uppercase();

        let verb = ["SELECT", "INSERT", "UPDATE", "DELETE"]
            .into_iter()
            .find(|verb| upper.starts_with(verb))
            .ok_or(SqlError::UnsupportedOperation)?;

        if dangerous_res().iter().any(|re| re.is_match(trimmed)) {
            return Err(SqlError::DangerousPattern);
        }

        match verb {
            "SELECT" => {
                let table = from_re()
                    .captures(trimmed)
                    .map(|c| c[1].to_lowercase())
                    .unwrap_or_else(|| DEFAULT_TABLE.to_string());
                let order = order_re().captures(trimmed).map(|c| OrderBy {
                    field: c[1].to_lowercase(),
                    ascending: c
                        .get(2)
                        .map(|d| !d.as_str().eq_ignore_ascii_case("DESC"))
                        .unwrap_or(true),
                });
                let limit = limit_re()
                    .captures(trimmed)
                    .and_then(|c| c[1].parse::<usize>().ok())
                    .unwrap_or(DEFAULT_LIMIT);
                Ok(SqlStatement::Select(SelectStatement { table, order, limit }))
            }
            "INSERT" => {
                if values_re().captures(trimmed).is_none() {
                    return Err(SqlError::InvalidSyntax("INSERT"));
                }
                Ok(SqlStatement::Insert {
                    raw: trimmed.to_string(),
                })
            }
            "UPDATE" => {
                let id = id_clause_re()
                    .captures(trimmed)
                    .map(|c| c[1].to_string())
                    .ok_or(SqlError::MissingIdClause("UPDATE"))?;
                Ok(SqlStatement::Update { id })
            }
            _ => {
                let id = id_clause_re()
                    .captures(trimmed)
                    .map(|c| c[1].to_string())
                    .ok_or(SqlError::MissingIdClause("DELETE"))?;
                Ok(SqlStatement::Delete { id })
            }
        }
    }
}
