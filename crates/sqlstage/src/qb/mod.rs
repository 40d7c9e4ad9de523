//! Staged statement builders.
//!
//! Each statement kind is a chain of distinct stage types. A stage exposes only
//! the clauses that may legally follow it, so an out-of-order call (WHERE
//! before FROM, VALUES before INTO) does not compile. Every transition consumes
//! the current stage, appends its clause and parameters to one shared context,
//! and returns the next stage wrapping that same context.
//!
//! ```text
//! select(cols) -> SelectQuery -from-> SelectFrom -where_-> SelectWhere
//!                                        |  -group_by-> SelectGroupBy
//!                                        '- -order_by-> SelectOrderBy
//! insert()     -> InsertQuery -into-> InsertInto -values-> InsertValues
//! update(t)    -> UpdateQuery -set->  UpdateSet  -where_-> UpdateWhere
//! delete()     -> DeleteQuery -from-> DeleteFrom -where_-> DeleteWhere
//! ```
//!
//! # Usage
//!
//! ```rust
//! use sqlstage::prelude::*;
//! use sqlstage::qb;
//!
//! const USERS: Table = Table::new("USERS");
//! const ID: Column<i64> = Column::new("ID");
//! const NAME: Column<String> = Column::with_type("NAME", SqlType::Varchar);
//!
//! let q = qb::select((&ID, &NAME))?
//!     .from(&USERS)?
//!     .where_(NAME.like("a%"))
//!     .order_by(ID.desc())?;
//! assert_eq!(
//!     q.sql(),
//!     "SELECT\n    ID,\n    NAME\nFROM\n    USERS\nWHERE\n    NAME LIKE ?\nORDER BY\n    ID DESC\n"
//! );
//!
//! let q = qb::update(&USERS)
//!     .set([NAME.value("bob")])?
//!     .where_(ID.equal_to(7));
//! assert_eq!(q.params().len(), 2);
//! # Ok::<(), sqlstage::SqlError>(())
//! ```

mod args;
mod delete;
mod insert;
mod param;
mod select;
pub(crate) mod traits;
mod update;


pub use args::{IntoColumnValues, IntoColumns, IntoTables};
pub use delete::{DeleteFrom, DeleteQuery, DeleteWhere};
pub use insert::{InsertInto, InsertQuery, InsertValues};
pub use param::Param;
pub use select::{SelectFrom, SelectGroupBy, SelectOrderBy, SelectQuery, SelectWhere};
pub use traits::{FetchQb, MutationQb, SqlQb};
pub use update::{UpdateQuery, UpdateSet, UpdateWhere};

use crate::error::{SqlError, SqlResult};
use crate::filter::Filter;
use crate::table::Table;

/// Indentation of clause bodies.
const INDENT: &str = "    ";
/// Separator between items of one clause body.
const ITEM_SEP: &str = ",\n    ";

/// Start a SELECT of the given columns.
///
/// Fails with `InvalidArgument` if the column list is empty.
pub fn select(columns: impl IntoColumns) -> SqlResult<SelectQuery> {
    SelectQuery::new(columns)
}

/// Start an INSERT; the target table follows with [`InsertQuery::into`].
pub fn insert() -> InsertQuery {
    InsertQuery::new()
}

/// Start an UPDATE of `table`.
pub fn update(table: &Table) -> UpdateQuery {
    UpdateQuery::new(table)
}

/// Start a DELETE; the target table follows with [`DeleteQuery::from`].
pub fn delete() -> DeleteQuery {
    DeleteQuery::new()
}

/// Namespace form of the entry functions, for callers that prefer
/// `SqlQuery::select(..)` over `qb::select(..)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlQuery;

impl SqlQuery {
    pub fn select(columns: impl IntoColumns) -> SqlResult<SelectQuery> {
        select(columns)
    }

    pub fn insert() -> InsertQuery {
        insert()
    }

    pub fn update(table: &Table) -> UpdateQuery {
        update(table)
    }

    pub fn delete() -> DeleteQuery {
        delete()
    }
}

/// SQL text and parameters accumulated across the stages of one statement.
///
/// Owned by exactly one stage at a time and moved on every transition.
#[derive(Debug, Clone, Default)]
pub(crate) struct Context {
    sql: String,
    params: Vec<Param>,
}

impl Context {
    pub(crate) fn sql(&self) -> &str {
        &self.sql
    }

    pub(crate) fn params(&self) -> &[Param] {
        &self.params
    }

    /// Append a keyword on its own line.
    pub(crate) fn push_keyword(&mut self, keyword: &str) {
        self.sql.push_str(keyword);
        self.sql.push('\n');
    }

    /// Append one indented body line.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.sql.push_str(INDENT);
        self.sql.push_str(line);
        self.sql.push('\n');
    }

    /// Append `keyword` followed by `items`, one per indented line.
    pub(crate) fn push_clause<I>(&mut self, keyword: &str, items: I)
    where
        I: IntoIterator<Item: AsRef<str>>,
    {
        self.push_keyword(keyword);
        self.sql.push_str(INDENT);
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.sql.push_str(ITEM_SEP);
            }
            self.sql.push_str(item.as_ref());
        }
        self.sql.push('\n');
    }

    /// Append `WHERE <condition>` and the filter's values.
    pub(crate) fn push_where(&mut self, filter: &Filter) {
        self.push_clause("WHERE", [filter.condition()]);
        self.params
            .extend(filter.params().iter().cloned().map(Param::Value));
    }

    pub(crate) fn push_params(&mut self, params: impl IntoIterator<Item = Param>) {
        self.params.extend(params);
    }
}

/// Reject an empty list argument of `clause`.
pub(crate) fn non_empty<T>(items: Vec<T>, clause: &str, what: &str) -> SqlResult<Vec<T>> {
    if items.is_empty() {
        return Err(SqlError::invalid_argument(format!(
            "{clause} requires at least one {what}"
        )));
    }
    Ok(items)
}
