//! Identifier validation.
//!
//! Database, table, and column names arrive as free-form strings from the
//! client and end up inside backtick-quoted SQL, so they are checked against
//! a strict allow-list before any statement is assembled. Anything that
//! could terminate the quoting or smuggle in a second statement (quotes,
//! backticks, semicolons, whitespace) is rejected up front. MySQL caps
//! identifiers at 64 characters.

use crate::error::{ServerError, ServerResult};

const MAX_IDENTIFIER_LEN: usize = 64;

/// Validate a client-supplied identifier, returning it unchanged on success.
/// `kind` names the argument in error messages (for example "database").
pub fn validate<'a>(kind: &str, name: &'a str) -> ServerResult<&'a str> {
    if name.is_empty() {
        return Err(ServerError::argument(format!("{} name is required", kind)));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(ServerError::argument(format!(
            "{} name exceeds {} characters",
            kind, MAX_IDENTIFIER_LEN
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        return Err(ServerError::argument(format!(
            "Invalid {} name '{}': only letters, digits, '_' and '$' are allowed",
            kind, name
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_names() {
        assert!(validate("table", "users").is_ok());
        assert!(validate("table", "order_items_2024").is_ok());
        assert!(validate("column", "_id").is_ok());
        assert!(validate("column", "total$usd").is_ok());
    }

    #[test]
    fn test_rejects_quoting_and_statement_breaks() {
        for bad in ["users;", "users`", "users'", "users\"", "a;DROP TABLE b"] {
            assert!(validate("table", bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_rejects_injection_probe() {
        assert!(validate("column", "name' OR '1'='1").is_err());
    }

    #[test]
    fn test_rejects_whitespace_and_empty() {
        assert!(validate("database", "").is_err());
        assert!(validate("database", "my db").is_err());
        assert!(validate("database", "db\n").is_err());
    }

    #[test]
    fn test_rejects_overlong_name() {
        let name = "a".repeat(MAX_IDENTIFIER_LEN + 1);
        assert!(validate("table", &name).is_err());
        let max = "a".repeat(MAX_IDENTIFIER_LEN);
        assert!(validate("table", &max).is_ok());
    }

    #[test]
    fn test_error_is_caller_error() {
        let err = validate("table", "bad name").unwrap_err();
        assert!(err.is_caller_error());
    }
}
