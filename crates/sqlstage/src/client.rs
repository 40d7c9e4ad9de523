//! Database connection collaborator.
//!
//! Builders never talk to a driver directly. Execution goes through
//! [`Connection`] and [`PreparedStatement`], which any backend can implement.
//! The `sqlite` feature (on by default) implements both for
//! [`rusqlite::Connection`].

use crate::error::SqlResult;
use crate::value::{FromValue, SqlType, Value};

#[cfg(feature = "sqlite")]
mod sqlite;

/// A source of prepared statements.
pub trait Connection {
    /// Statement type, borrowing from the connection.
    type Statement<'c>: PreparedStatement
    where
        Self: 'c;

    /// Prepare `sql` for execution.
    fn prepare(&self, sql: &str) -> SqlResult<Self::Statement<'_>>;
}

/// A prepared statement with 1-based positional parameters.
pub trait PreparedStatement {
    /// Bind a value at `index` (1-based).
    fn bind(&mut self, index: usize, value: &Value) -> SqlResult<()>;

    /// Bind a null at `index` (1-based), typed with `sql_type`.
    /// `SqlType::Null` means no type is known.
    fn bind_null(&mut self, index: usize, sql_type: SqlType) -> SqlResult<()>;

    /// Run the statement and return the affected-row count.
    fn execute_update(&mut self) -> SqlResult<u64>;

    /// Run the statement and hand every result row to `visit`, in order.
    ///
    /// Iteration stops at the first error returned by `visit`.
    fn execute_query(
        &mut self,
        visit: &mut dyn FnMut(&dyn Row) -> SqlResult<()>,
    ) -> SqlResult<()>;
}

/// One result row, valid only for the duration of the visit callback.
pub trait Row {
    /// Raw value of the named column; `None` for SQL NULL.
    fn get_value(&self, column: &str) -> SqlResult<Option<Value>>;
}

impl dyn Row + '_ {
    /// Decode the named column into `T`.
    ///
    /// ```rust
    /// # #[cfg(feature = "sqlite")]
    /// # fn main() -> sqlstage::SqlResult<()> {
    /// use sqlstage::prelude::*;
    /// use sqlstage::qb;
    ///
    /// let conn = rusqlite::Connection::open_in_memory()?;
    /// conn.execute_batch("CREATE TABLE T (N INTEGER, S TEXT); INSERT INTO T VALUES (1, NULL);")?;
    ///
    /// const T: Table = Table::new("T");
    /// const N: Column<i64> = Column::new("N");
    /// const S: Column<String> = Column::new("S");
    ///
    /// let rows = qb::select((&N, &S))?
    ///     .from(&T)?
    ///     .execute(&conn, |row| Ok((row.get::<i64>("N")?, row.get::<Option<String>>("S")?)))?;
    /// assert_eq!(rows, vec![(1, None)]);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "sqlite"))]
    /// # fn main() {}
    /// ```
    pub fn get<T: FromValue>(&self, column: &str) -> SqlResult<T> {
        T::from_value(column, self.get_value(column)?)
    }
}
