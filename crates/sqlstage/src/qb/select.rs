//! SELECT stages.

use crate::column::ColumnRef;
use crate::error::SqlResult;
use crate::filter::Filter;
use crate::monitor::QueryType;
use crate::qb::args::{IntoColumns, IntoTables};
use crate::qb::traits::impl_stage;
use crate::qb::{Context, non_empty};
use std::borrow::Borrow;

/// `SELECT <columns>`; only FROM may follow.
#[derive(Debug, Clone)]
#[must_use = "a SELECT needs a FROM clause"]
pub struct SelectQuery {
    ctx: Context,
}

impl SelectQuery {
    pub(crate) fn new(columns: impl IntoColumns) -> SqlResult<Self> {
        let columns = non_empty(columns.into_columns(), "SELECT", "column")?;
        let mut ctx = Context::default();
        ctx.push_clause("SELECT", columns.iter().map(ColumnRef::select_item));
        Ok(Self { ctx })
    }

    /// Add `FROM <tables>`; aliased tables render as `name AS alias`.
    pub fn from(mut self, tables: impl IntoTables) -> SqlResult<SelectFrom> {
        let tables = non_empty(tables.into_tables(), "FROM", "table")?;
        self.ctx
            .push_clause("FROM", tables.iter().map(ToString::to_string));
        Ok(SelectFrom { ctx: self.ctx })
    }
}

/// After FROM: WHERE, GROUP BY and ORDER BY are all still available.
#[derive(Debug, Clone)]
pub struct SelectFrom {
    ctx: Context,
}

impl SelectFrom {
    /// Add `WHERE <filter>`.
    pub fn where_(mut self, filter: impl Borrow<Filter>) -> SelectWhere {
        self.ctx.push_where(filter.borrow());
        SelectWhere { ctx: self.ctx }
    }

    /// Add `GROUP BY <columns>`.
    pub fn group_by(self, columns: impl IntoColumns) -> SqlResult<SelectGroupBy> {
        group_by(self.ctx, columns)
    }

    /// Add `ORDER BY <columns>`.
    pub fn order_by(self, columns: impl IntoColumns) -> SqlResult<SelectOrderBy> {
        order_by(self.ctx, columns)
    }
}

/// After WHERE.
#[derive(Debug, Clone)]
pub struct SelectWhere {
    ctx: Context,
}

impl SelectWhere {
    pub fn group_by(self, columns: impl IntoColumns) -> SqlResult<SelectGroupBy> {
        group_by(self.ctx, columns)
    }

    pub fn order_by(self, columns: impl IntoColumns) -> SqlResult<SelectOrderBy> {
        order_by(self.ctx, columns)
    }
}

/// After GROUP BY.
#[derive(Debug, Clone)]
pub struct SelectGroupBy {
    ctx: Context,
}

impl SelectGroupBy {
    pub fn order_by(self, columns: impl IntoColumns) -> SqlResult<SelectOrderBy> {
        order_by(self.ctx, columns)
    }
}

/// After ORDER BY; nothing but execution remains.
#[derive(Debug, Clone)]
pub struct SelectOrderBy {
    ctx: Context,
}

fn group_by(mut ctx: Context, columns: impl IntoColumns) -> SqlResult<SelectGroupBy> {
    let columns = non_empty(columns.into_columns(), "GROUP BY", "column")?;
    ctx.push_clause("GROUP BY", columns.iter().map(ColumnRef::name));
    Ok(SelectGroupBy { ctx })
}

fn order_by(mut ctx: Context, columns: impl IntoColumns) -> SqlResult<SelectOrderBy> {
    let columns = non_empty(columns.into_columns(), "ORDER BY", "column")?;
    ctx.push_clause("ORDER BY", columns.iter().map(ColumnRef::order_item));
    Ok(SelectOrderBy { ctx })
}

impl_stage!(FetchQb, QueryType::Select => SelectFrom, SelectWhere, SelectGroupBy, SelectOrderBy);
