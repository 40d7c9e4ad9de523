//! DELETE stages.

use crate::filter::Filter;
use crate::monitor::QueryType;
use crate::qb::Context;
use crate::qb::traits::impl_stage;
use crate::table::Table;
use std::borrow::Borrow;

/// `DELETE`; only FROM may follow.
#[derive(Debug, Clone)]
#[must_use = "a DELETE needs a FROM clause"]
pub struct DeleteQuery {
    ctx: Context,
}

impl DeleteQuery {
    pub(crate) fn new() -> Self {
        let mut ctx = Context::default();
        ctx.push_keyword("DELETE");
        Self { ctx }
    }

    /// Add `FROM <table>`. Only the table name is emitted.
    pub fn from(mut self, table: &Table) -> DeleteFrom {
        self.ctx.push_clause("FROM", [table.name()]);
        DeleteFrom { ctx: self.ctx }
    }
}

/// After FROM. Executable as is, which deletes every row.
#[derive(Debug, Clone)]
pub struct DeleteFrom {
    ctx: Context,
}

impl DeleteFrom {
    /// Add `WHERE <filter>`.
    pub fn where_(mut self, filter: impl Borrow<Filter>) -> DeleteWhere {
        self.ctx.push_where(filter.borrow());
        DeleteWhere { ctx: self.ctx }
    }
}

/// After WHERE.
#[derive(Debug, Clone)]
pub struct DeleteWhere {
    ctx: Context,
}

impl_stage!(MutationQb, QueryType::Delete => DeleteFrom, DeleteWhere);
