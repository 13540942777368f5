// src/db/schema.rs
// DOCUMENTATION: Idempotent schema initializer
// PURPOSE: Bring a freshly provisioned database up to the expected schema,
// safely re-runnable on every boot

use crate::errors::ApiError;
use sqlx::PgPool;

/// Schema script shipped with the binary
pub const SCHEMA_SCRIPT: &str = include_str!("../../sql/schema.sql");

/// PostgreSQL error codes meaning "the object is already there".
/// 42P04 database, 42P06 schema, 42P07 table, 42701 column, 42710 object.
const ALREADY_EXISTS_CODES: [&str; 5] = ["42P04", "42P06", "42P07", "42701", "42710"];

/// Result of executing one schema statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementOutcome {
    /// Statement executed and changed the database
    Applied,
    /// Object already present; treated as success
    AlreadyExists,
    /// Statement failed for another reason; logged and skipped
    Warning(String),
}

/// Per-statement outcomes collected across one initializer run
#[derive(Debug, Default)]
pub struct SchemaReport {
    pub outcomes: Vec<(String, StatementOutcome)>,
}

impl SchemaReport {
    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == StatementOutcome::Applied)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == StatementOutcome::AlreadyExists)
            .count()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|(stmt, o)| match o {
                StatementOutcome::Warning(_) => Some(stmt.as_str()),
                _ => None,
            })
            .collect()
    }

    /// True when every statement either applied or was a benign skip
    pub fn fully_applied(&self) -> bool {
        self.outcomes
            .iter()
            .all(|(_, o)| !matches!(o, StatementOutcome::Warning(_)))
    }
}

/// Split a schema script into individual statements
/// DOCUMENTATION: Splits on the `;` end-of-line terminator convention,
/// normalizing CRLF and dropping empty or comment-only fragments
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .replace("\r\n", "\n")
        .split(";\n")
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .filter(|fragment| {
            fragment
                .lines()
                .any(|line| !line.trim().is_empty() && !line.trim_start().starts_with("--"))
        })
        .map(|fragment| fragment.trim_end_matches(';').trim().to_string())
        .collect()
}

/// Classify a statement-level database error
/// DOCUMENTATION: "already exists" codes are benign; anything else is a
/// warning that does not stop the run
fn classify_failure(code: Option<&str>, message: &str) -> StatementOutcome {
    match code {
        Some(code) if ALREADY_EXISTS_CODES.contains(&code) => StatementOutcome::AlreadyExists,
        // Fallback for drivers that surface no SQLSTATE
        _ if message.contains("already exists") => StatementOutcome::AlreadyExists,
        _ => StatementOutcome::Warning(message.to_string()),
    }
}

fn outcome_for(err: &sqlx::Error) -> StatementOutcome {
    match err {
        sqlx::Error::Database(db_err) => {
            classify_failure(db_err.code().as_deref(), db_err.message())
        }
        other => StatementOutcome::Warning(other.to_string()),
    }
}

/// Execute a schema script against the pool, statement by statement
/// DOCUMENTATION: Statements run strictly in script order because later ones
/// depend on tables created by earlier ones. Statement failures never abort
/// the run; the initializer only fails when a connection cannot be borrowed
/// at all.
pub async fn apply_schema(pool: &PgPool, script: &str) -> Result<SchemaReport, ApiError> {
    // One connection for the whole run, so execution stays sequential
    let mut conn = pool.acquire().await.map_err(|e| {
        log::error!("Could not borrow a connection for schema init: {}", e);
        ApiError::InitializationFailed(e.to_string())
    })?;

    let statements = split_statements(script);
    log::info!("Applying schema script ({} statements)", statements.len());

    let mut report = SchemaReport::default();

    for statement in statements {
        let preview: String = statement.chars().take(50).collect();

        let outcome = match sqlx::query(&statement).execute(&mut *conn).await {
            Ok(_) => {
                log::info!("Applied: {}...", preview);
                StatementOutcome::Applied
            }
            Err(err) => match outcome_for(&err) {
                StatementOutcome::AlreadyExists => {
                    log::info!("Already present, skipping: {}...", preview);
                    StatementOutcome::AlreadyExists
                }
                StatementOutcome::Warning(msg) => {
                    log::warn!("Statement failed, continuing: {}... ({})", preview, msg);
                    StatementOutcome::Warning(msg)
                }
                StatementOutcome::Applied => unreachable!(),
            },
        };

        report.outcomes.push((statement, outcome));
    }

    log::info!(
        "Schema initialization finished: {} applied, {} skipped, {} warnings",
        report.applied(),
        report.skipped(),
        report.warnings().len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_statement_terminator() {
        let script = "CREATE TABLE a (id INT);\nCREATE TABLE b (id INT);\n";
        let statements = split_statements(script);
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0], "CREATE TABLE a (id INT)");
        assert_eq!(statements[1], "CREATE TABLE b (id INT)");
    }

    #[test]
    fn normalizes_crlf() {
        let script = "CREATE TABLE a (id INT);\r\nCREATE TABLE b (id INT);\r\n";
        assert_eq!(split_statements(script).len(), 2);
    }

    #[test]
    fn drops_comment_only_fragments() {
        let script = "-- header comment\n\nCREATE TABLE a (id INT);\n-- trailing note\n";
        let statements = split_statements(script);
        assert_eq!(statements.len(), 1);
        assert!(statements[0].contains("CREATE TABLE a"));
    }

    #[test]
    fn keeps_multiline_statements_together() {
        let script = "INSERT INTO rutas (origen, destino)\nVALUES\n ('Lima', 'Cusco'),\n ('Lima', 'Ica');\n";
        let statements = split_statements(script);
        assert_eq!(statements.len(), 1);
        assert!(statements[0].contains("('Lima', 'Ica')"));
    }

    #[test]
    fn shipped_script_parses() {
        let statements = split_statements(SCHEMA_SCRIPT);
        assert!(statements.len() >= 4);
        assert!(statements.iter().all(|s| !s.trim().is_empty()));
        assert!(statements
            .iter()
            .any(|s| s.contains("CREATE TABLE IF NOT EXISTS usuarios")));
    }

    #[test]
    fn duplicate_table_is_benign() {
        let outcome = classify_failure(Some("42P07"), "relation \"usuarios\" already exists");
        assert_eq!(outcome, StatementOutcome::AlreadyExists);
    }

    #[test]
    fn duplicate_database_is_benign() {
        let outcome = classify_failure(Some("42P04"), "database already exists");
        assert_eq!(outcome, StatementOutcome::AlreadyExists);
    }

    #[test]
    fn message_fallback_detects_existing_objects() {
        let outcome = classify_failure(None, "index \"idx_registros_usuario\" already exists");
        assert_eq!(outcome, StatementOutcome::AlreadyExists);
    }

    #[test]
    fn other_failures_become_warnings() {
        let outcome = classify_failure(Some("42601"), "syntax error at or near \"TABEL\"");
        assert!(matches!(outcome, StatementOutcome::Warning(_)));
    }

    #[test]
    fn report_counters() {
        let report = SchemaReport {
            outcomes: vec![
                ("a".into(), StatementOutcome::Applied),
                ("b".into(), StatementOutcome::AlreadyExists),
                ("c".into(), StatementOutcome::Warning("boom".into())),
            ],
        };
        assert_eq!(report.applied(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.warnings(), vec!["c"]);
        assert!(!report.fully_applied());
    }

    #[test]
    fn rerun_of_same_script_is_all_skips() {
        // Simulates the second boot: every CREATE reports "already exists"
        let statements = vec!["CREATE TABLE usuarios (id INT)".to_string(); 2];
        let mut report = SchemaReport::default();
        report
            .outcomes
            .push((statements[0].clone(), StatementOutcome::Applied));
        report.outcomes.push((
            statements[1].clone(),
            classify_failure(Some("42P07"), "relation \"usuarios\" already exists"),
        ));
        assert_eq!(report.applied(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(report.fully_applied());
    }
}
