//! Input guards applied before any database round-trip.
//!
//! Two pure checks protect the query surface: an allowlist on identifiers
//! that get interpolated into SQL text, and a statement classifier that
//! restricts the `/query` endpoint to SELECT text. The driver binds values
//! as parameters, so identifiers are the only strings that ever reach SQL
//! text directly — the allowlist is their sole injection defense.

use crate::error::{GatewayError, GatewayResult};
use sqlparser::ast::Statement;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

/// Validate a caller-supplied identifier (table, column, or field name).
///
/// Accepts exactly the pattern `^[A-Za-z0-9_]+$`; empty strings and any
/// other character are rejected. `subject` names the identifier in the
/// resulting error, e.g. "table name" or "field name". Purely syntactic —
/// no catalog lookup is involved.
pub fn validate_identifier(name: &str, subject: &'static str) -> GatewayResult<()> {
    if name.is_empty() {
        return Err(GatewayError::invalid_identifier(subject));
    }
    if name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        Ok(())
    } else {
        Err(GatewayError::invalid_identifier(subject))
    }
}

/// Class of a caller-supplied SQL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementClass {
    /// Text that begins with `select` after trimming and lowercasing.
    ReadOnly,
    /// Everything else.
    Other,
}

/// Classify a SQL string for the restricted query endpoint.
///
/// The contract is a prefix test: trim, lowercase, check for a leading
/// `select`. Statements that merely contain a SELECT (e.g. `INSERT ...
/// SELECT`) are classified as `Other`.
pub fn classify_statement(sql: &str) -> StatementClass {
    if sql.trim().to_lowercase().starts_with("select") {
        StatementClass::ReadOnly
    } else {
        StatementClass::Other
    }
}

/// Reject non-SELECT text with a permission error.
pub fn ensure_read_only(sql: &str) -> GatewayResult<()> {
    match classify_statement(sql) {
        StatementClass::ReadOnly => Ok(()),
        StatementClass::Other => Err(GatewayError::forbidden("Only SELECT queries are allowed")),
    }
}

/// Name the statement kind for the trusted execute response.
///
/// The driver does not expose the server's command tag, so the tag is
/// derived by parsing the first statement. SQL the parser cannot handle
/// reports "UNKNOWN".
pub fn command_tag(sql: &str) -> &'static str {
    match Parser::parse_sql(&PostgreSqlDialect {}, sql) {
        Ok(statements) => statements.first().map(statement_name).unwrap_or("UNKNOWN"),
        Err(_) => "UNKNOWN",
    }
}

fn statement_name(stmt: &Statement) -> &'static str {
    match stmt {
        Statement::Query(_) => "SELECT",
        Statement::Insert(_) => "INSERT",
        Statement::Update { .. } => "UPDATE",
        Statement::Delete(_) => "DELETE",
        Statement::Merge { .. } => "MERGE",
        Statement::Copy { .. } => "COPY",
        Statement::CreateTable { .. } => "CREATE TABLE",
        Statement::CreateView { .. } => "CREATE VIEW",
        Statement::CreateIndex(_) => "CREATE INDEX",
        Statement::CreateSchema { .. } => "CREATE SCHEMA",
        Statement::AlterTable { .. } => "ALTER TABLE",
        Statement::AlterView { .. } => "ALTER VIEW",
        Statement::Drop { .. } => "DROP",
        Statement::Truncate { .. } => "TRUNCATE",
        Statement::StartTransaction { .. } => "BEGIN",
        Statement::Commit { .. } => "COMMIT",
        Statement::Rollback { .. } => "ROLLBACK",
        Statement::Savepoint { .. } => "SAVEPOINT",
        Statement::Grant { .. } => "GRANT",
        Statement::Revoke { .. } => "REVOKE",
        Statement::Explain { .. } => "EXPLAIN",
        Statement::Vacuum { .. } => "VACUUM",
        Statement::Analyze { .. } => "ANALYZE",
        Statement::Call { .. } => "CALL",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_allowlisted_names() {
        assert!(validate_identifier("users", "table name").is_ok());
        assert!(validate_identifier("user_accounts", "table name").is_ok());
        assert!(validate_identifier("T2", "table name").is_ok());
        assert!(validate_identifier("_private", "table name").is_ok());
        assert!(validate_identifier("1bad", "table name").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_identifier("", "table name").is_err());
    }

    #[test]
    fn test_validate_rejects_injection_attempts() {
        assert!(validate_identifier("users; drop table x", "table name").is_err());
        assert!(validate_identifier("users--", "table name").is_err());
        assert!(validate_identifier("\"users\"", "table name").is_err());
        assert!(validate_identifier("users.accounts", "table name").is_err());
        assert!(validate_identifier("us ers", "field name").is_err());
        assert!(validate_identifier("名前", "field name").is_err());
    }

    #[test]
    fn test_validate_error_names_the_subject() {
        let err = validate_identifier("a-b", "field name").unwrap_err();
        assert_eq!(err.to_string(), "Invalid field name");
    }

    #[test]
    fn test_classify_select_prefix() {
        assert_eq!(classify_statement("SELECT 1"), StatementClass::ReadOnly);
        assert_eq!(classify_statement("  select * from t"), StatementClass::ReadOnly);
        assert_eq!(
            classify_statement("\n\tSeLeCt name FROM users"),
            StatementClass::ReadOnly
        );
    }

    #[test]
    fn test_classify_rejects_other_leading_tokens() {
        assert_eq!(classify_statement("DELETE FROM t"), StatementClass::Other);
        assert_eq!(classify_statement("DROP TABLE users"), StatementClass::Other);
        assert_eq!(
            classify_statement("INSERT INTO archive SELECT * FROM users"),
            StatementClass::Other
        );
        assert_eq!(classify_statement("WITH x AS (SELECT 1) SELECT * FROM x"), StatementClass::Other);
        assert_eq!(classify_statement(""), StatementClass::Other);
    }

    #[test]
    fn test_ensure_read_only_error_message() {
        let err = ensure_read_only("UPDATE users SET a = 1").unwrap_err();
        assert_eq!(err.to_string(), "Only SELECT queries are allowed");
    }

    #[test]
    fn test_command_tag_common_statements() {
        assert_eq!(command_tag("SELECT 1"), "SELECT");
        assert_eq!(command_tag("INSERT INTO t VALUES (1)"), "INSERT");
        assert_eq!(command_tag("UPDATE t SET a = 1"), "UPDATE");
        assert_eq!(command_tag("DELETE FROM t"), "DELETE");
        assert_eq!(command_tag("DROP TABLE t"), "DROP");
        assert_eq!(command_tag("CREATE TABLE t (id INT)"), "CREATE TABLE");
        assert_eq!(command_tag("TRUNCATE t"), "TRUNCATE");
    }

    #[test]
    fn test_command_tag_unparseable() {
        assert_eq!(command_tag("NOT REAL SQL AT ALL"), "UNKNOWN");
        assert_eq!(command_tag(""), "UNKNOWN");
    }
}
