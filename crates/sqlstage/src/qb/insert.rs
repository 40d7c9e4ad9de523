//! INSERT stages.

use crate::column::ColumnValue;
use crate::error::SqlResult;
use crate::monitor::QueryType;
use crate::qb::args::IntoColumnValues;
use crate::qb::traits::impl_stage;
use crate::qb::{Context, non_empty};
use crate::table::Table;

/// `INSERT`; only INTO may follow.
#[derive(Debug, Clone)]
#[must_use = "an INSERT needs INTO and VALUES"]
pub struct InsertQuery {
    ctx: Context,
}

impl InsertQuery {
    pub(crate) fn new() -> Self {
        let mut ctx = Context::default();
        ctx.push_keyword("INSERT");
        Self { ctx }
    }

    /// Add `INTO <table>`. Only the table name is emitted, never its alias.
    pub fn into(mut self, table: &Table) -> InsertInto {
        self.ctx.push_clause("INTO", [table.name()]);
        InsertInto { ctx: self.ctx }
    }
}

/// After INTO; only VALUES may follow.
#[derive(Debug, Clone)]
#[must_use = "an INSERT needs VALUES"]
pub struct InsertInto {
    ctx: Context,
}

impl InsertInto {
    /// Add the column list and `VALUES (?, ...)`, one placeholder per value.
    ///
    /// Values written with [`Column::null`](crate::Column::null) bind as a
    /// null typed with the column's declared type.
    pub fn values(mut self, values: impl IntoColumnValues) -> SqlResult<InsertValues> {
        let values = non_empty(values.into_column_values(), "VALUES", "column value")?;
        let names: Vec<&str> = values.iter().map(ColumnValue::name).collect();
        self.ctx.push_line(&format!("({})", names.join(", ")));
        let placeholders = vec!["?"; values.len()].join(", ");
        self.ctx.push_clause("VALUES", [format!("({placeholders})")]);
        self.ctx
            .push_params(values.into_iter().map(ColumnValue::into_param));
        Ok(InsertValues { ctx: self.ctx })
    }
}

/// A complete INSERT.
#[derive(Debug, Clone)]
pub struct InsertValues {
    ctx: Context,
}

impl_stage!(MutationQb, QueryType::Insert => InsertValues);
