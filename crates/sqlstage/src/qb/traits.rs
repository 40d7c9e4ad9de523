//! Trait definitions for executable builder stages.

use crate::client::{Connection, PreparedStatement, Row};
use crate::error::SqlResult;
use crate::monitor::QueryType;
use crate::qb::param::Param;

/// Log target for statement execution events.
pub(crate) const SQL_TARGET: &str = "sqlstage.sql";

/// A stage whose statement text is complete enough to run.
///
/// `sql()` and `params()` are pure: calling them repeatedly returns the same
/// text and the same values.
pub trait SqlQb {
    /// The accumulated SQL text.
    fn sql(&self) -> &str;

    /// Bound parameters, in placeholder order.
    fn params(&self) -> &[Param];

    /// Statement kind, used for logging and monitoring.
    fn query_type(&self) -> QueryType;
}

/// Executable SELECT stages.
pub trait FetchQb: SqlQb {
    /// Prepare the statement on `conn`, bind every parameter, run it and map
    /// each result row with `map`.
    ///
    /// Rows are mapped while the cursor is open; the first mapper error stops
    /// iteration and is returned.
    fn execute<C, T, F>(&self, conn: &C, map: F) -> SqlResult<Vec<T>>
    where
        C: Connection + ?Sized,
        F: FnMut(&dyn Row) -> SqlResult<T>,
    {
        tracing::debug!(
            target: SQL_TARGET,
            query_type = %self.query_type(),
            param_count = self.params().len(),
            sql = self.sql(),
            "executing query"
        );
        let result = fetch_rows(conn, self.sql(), self.params(), map);
        match &result {
            Ok(rows) => tracing::debug!(target: SQL_TARGET, rows = rows.len(), "query finished"),
            Err(e) => tracing::warn!(target: SQL_TARGET, error = %e, sql = self.sql(), "query failed"),
        }
        result
    }
}

/// Executable INSERT/UPDATE/DELETE stages.
pub trait MutationQb: SqlQb {
    /// Prepare the statement on `conn`, bind every parameter and run it.
    /// Returns the affected-row count reported by the connection.
    fn execute<C>(&self, conn: &C) -> SqlResult<u64>
    where
        C: Connection + ?Sized,
    {
        tracing::debug!(
            target: SQL_TARGET,
            query_type = %self.query_type(),
            param_count = self.params().len(),
            sql = self.sql(),
            "executing statement"
        );
        let result = update_rows(conn, self.sql(), self.params());
        match &result {
            Ok(affected) => tracing::debug!(target: SQL_TARGET, affected, "statement finished"),
            Err(e) => tracing::warn!(target: SQL_TARGET, error = %e, sql = self.sql(), "statement failed"),
        }
        result
    }
}

fn fetch_rows<C, T, F>(conn: &C, sql: &str, params: &[Param], mut map: F) -> SqlResult<Vec<T>>
where
    C: Connection + ?Sized,
    F: FnMut(&dyn Row) -> SqlResult<T>,
{
    let mut stmt = conn.prepare(sql)?;
    bind_params(&mut stmt, params)?;
    let mut rows = Vec::new();
    stmt.execute_query(&mut |row: &dyn Row| -> SqlResult<()> {
        rows.push(map(row)?);
        Ok(())
    })?;
    Ok(rows)
}

fn update_rows<C>(conn: &C, sql: &str, params: &[Param]) -> SqlResult<u64>
where
    C: Connection + ?Sized,
{
    let mut stmt = conn.prepare(sql)?;
    bind_params(&mut stmt, params)?;
    stmt.execute_update()
}

/// Bind `params` to 1-based positions. Nulls are bound with their declared
/// type.
pub(crate) fn bind_params<S>(stmt: &mut S, params: &[Param]) -> SqlResult<()>
where
    S: PreparedStatement + ?Sized,
{
    for (i, param) in params.iter().enumerate() {
        let index = i + 1;
        match param {
            Param::Value(value) => stmt.bind(index, value)?,
            Param::Null(sql_type) => {
                tracing::trace!(target: SQL_TARGET, index, sql_type = %sql_type, "binding typed null");
                stmt.bind_null(index, *sql_type)?;
            }
        }
    }
    Ok(())
}

/// Implement [`SqlQb`] plus one execution trait for stage types holding a
/// `ctx: Context` field.
macro_rules! impl_stage {
    ($exec:ident, $kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::qb::traits::SqlQb for $ty {
                fn sql(&self) -> &str {
                    self.ctx.sql()
                }

                fn params(&self) -> &[$crate::qb::param::Param] {
                    self.ctx.params()
                }

                fn query_type(&self) -> $crate::monitor::QueryType {
                    $kind
                }
            }

            impl $crate::qb::traits::$exec for $ty {}
        )+
    };
}

pub(crate) use impl_stage;
