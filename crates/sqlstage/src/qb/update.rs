//! UPDATE stages.

use crate::column::ColumnValue;
use crate::error::SqlResult;
use crate::filter::Filter;
use crate::monitor::QueryType;
use crate::qb::args::IntoColumnValues;
use crate::qb::traits::impl_stage;
use crate::qb::{Context, non_empty};
use crate::table::Table;
use std::borrow::Borrow;

/// `UPDATE <table>`; only SET may follow.
#[derive(Debug, Clone)]
#[must_use = "an UPDATE needs a SET clause"]
pub struct UpdateQuery {
    ctx: Context,
}

impl UpdateQuery {
    pub(crate) fn new(table: &Table) -> Self {
        let mut ctx = Context::default();
        ctx.push_clause("UPDATE", [table.name()]);
        Self { ctx }
    }

    /// Add `SET col = ?, ...`. Its values bind before any WHERE values.
    pub fn set(mut self, values: impl IntoColumnValues) -> SqlResult<UpdateSet> {
        let values = non_empty(values.into_column_values(), "SET", "column value")?;
        self.ctx
            .push_clause("SET", values.iter().map(|v| format!("{} = ?", v.name())));
        self.ctx
            .push_params(values.into_iter().map(ColumnValue::into_param));
        Ok(UpdateSet { ctx: self.ctx })
    }
}

/// After SET. Executable as is, which updates every row.
#[derive(Debug, Clone)]
pub struct UpdateSet {
    ctx: Context,
}

impl UpdateSet {
    /// Add `WHERE <filter>`.
    pub fn where_(mut self, filter: impl Borrow<Filter>) -> UpdateWhere {
        self.ctx.push_where(filter.borrow());
        UpdateWhere { ctx: self.ctx }
    }
}

/// After WHERE.
#[derive(Debug, Clone)]
pub struct UpdateWhere {
    ctx: Context,
}

impl_stage!(MutationQb, QueryType::Update => UpdateSet, UpdateWhere);
