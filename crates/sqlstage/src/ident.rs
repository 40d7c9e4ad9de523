//! Identifier and alias handling.
//!
//! Names are emitted verbatim (they may be expressions such as `COUNT(*)` or
//! qualified names such as `T_1.COL_1`), so validation is limited to rejecting
//! empty names, NUL characters and `?` outside quotes, which would otherwise
//! become an unbound placeholder. Aliases are quoted when they contain
//! whitespace so they can follow `AS` unambiguously.

use crate::error::{SqlError, SqlResult};

/// Validate a table or column name.
pub(crate) fn validate_name(name: &str, what: &str) -> SqlResult<()> {
    if name.trim().is_empty() {
        return Err(SqlError::invalid_argument(format!("{what} name cannot be empty")));
    }
    if name.contains('\0') {
        return Err(SqlError::invalid_argument(format!(
            "{what} name cannot contain NUL character"
        )));
    }
    if count_placeholders(name) != 0 {
        return Err(SqlError::invalid_argument(format!(
            "{what} name cannot contain a `?` placeholder: {name}"
        )));
    }
    Ok(())
}

/// Prepare an alias for embedding after `AS`.
///
/// - `C_1` stays `C_1`
/// - `My Alias` becomes `"My Alias"`
/// - `Say "hi" now` becomes `"Say ""hi"" now"`
/// - an alias that is already double-quoted is kept as-is
pub(crate) fn quote_alias(alias: &str) -> SqlResult<String> {
    if alias.trim().is_empty() {
        return Err(SqlError::invalid_argument("alias cannot be empty"));
    }
    if alias.contains('\0') {
        return Err(SqlError::invalid_argument(
            "alias cannot contain NUL character",
        ));
    }
    let quoted = if is_quoted(alias) || !alias.chars().any(char::is_whitespace) {
        alias.to_string()
    } else {
        format!("\"{}\"", alias.replace('"', "\"\""))
    };
    if count_placeholders(&quoted) != 0 {
        return Err(SqlError::invalid_argument(format!(
            "alias cannot contain a `?` placeholder: {alias}"
        )));
    }
    Ok(quoted)
}

/// A double-quoted identifier whose inner quotes are all doubled.
fn is_quoted(s: &str) -> bool {
    let Some(inner) = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };
    !inner.replace("\"\"", "").contains('"')
}

/// Number of `?` placeholders outside single- or double-quoted sections.
pub(crate) const fn count_placeholders(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut count = 0;
    let mut quote = 0u8;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if quote != 0 {
            if b == quote {
                quote = 0;
            }
        } else if b == b'\'' || b == b'"' {
            quote = b;
        } else if b == b'?' {
            count += 1;
        }
        i += 1;
    }
    count
}
