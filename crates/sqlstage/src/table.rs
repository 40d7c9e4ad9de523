//! Table references.

use crate::error::SqlResult;
use crate::ident::{count_placeholders, quote_alias, validate_name};
use std::borrow::Cow;
use std::fmt;

/// A named table, optionally aliased.
///
/// Tables are immutable: [`Table::as_`] returns an aliased copy.
///
/// # Example
///
/// ```rust
/// use sqlstage::Table;
///
/// const USERS: Table = Table::new("USERS");
///
/// let u = USERS.as_("U").unwrap();
/// assert_eq!(u.qualifier(), "U");
/// assert_eq!(u.to_string(), "USERS AS U");
/// assert_eq!(USERS.to_string(), "USERS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    name: Cow<'static, str>,
    alias: Option<String>,
}

impl Table {
    /// Create a table reference usable in `const` items.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const context) if `name` is empty or
    /// contains a `?` outside quotes.
    pub const fn new(name: &'static str) -> Self {
        assert!(!name.is_empty(), "table name cannot be empty");
        assert!(
            count_placeholders(name) == 0,
            "table name cannot contain a `?` placeholder"
        );
        Self {
            name: Cow::Borrowed(name),
            alias: None,
        }
    }

    /// Create a table reference from a runtime name.
    pub fn try_new(name: impl Into<String>) -> SqlResult<Self> {
        let name = name.into();
        validate_name(&name, "table")?;
        Ok(Self {
            name: Cow::Owned(name),
            alias: None,
        })
    }

    /// Return a copy of this table with the given alias.
    pub fn as_(&self, alias: &str) -> SqlResult<Self> {
        Ok(Self {
            name: self.name.clone(),
            alias: Some(quote_alias(alias)?),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Prefix used to qualify column names: the alias if set, else the name.
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Renders the FROM-list form: `name` or `name AS alias`.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} AS {}", self.name, alias),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&Table> for Table {
    fn from(table: &Table) -> Self {
        table.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_1: Table = Table::new("TABLE_1");

    #[test]
    fn alias_does_not_touch_original() {
        let t1 = TABLE_1.as_("T_1").unwrap();
        assert_eq!(t1.to_string(), "TABLE_1 AS T_1");
        assert_eq!(TABLE_1.to_string(), "TABLE_1");
        assert_eq!(TABLE_1.alias(), None);
    }

    #[test]
    fn qualifier_prefers_alias() {
        assert_eq!(TABLE_1.qualifier(), "TABLE_1");
        assert_eq!(TABLE_1.as_("T_1").unwrap().qualifier(), "T_1");
    }

    #[test]
    fn spaced_alias_is_quoted() {
        let t = TABLE_1.as_("First Table").unwrap();
        assert_eq!(t.to_string(), "TABLE_1 AS \"First Table\"");
    }

    #[test]
    fn runtime_name_validated() {
        assert!(Table::try_new("").unwrap_err().is_invalid_argument());
        assert_eq!(Table::try_new("T").unwrap().name(), "T");
        assert!(Table::try_new("T?").unwrap_err().is_invalid_argument());
        assert!(TABLE_1.as_("T?").unwrap_err().is_invalid_argument());
    }

    #[test]
    #[should_panic(expected = "placeholder")]
    fn const_table_with_placeholder_panics() {
        let _ = Table::new("T?");
    }
}
