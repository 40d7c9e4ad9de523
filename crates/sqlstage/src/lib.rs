//! # sqlstage
//!
//! A typed, staged SQL statement builder.
//!
//! ## Features
//!
//! - **Clause order checked at compile time**: each builder stage exposes only the clauses that may follow it
//! - **Typed columns**: `Column<T>` only accepts values convertible to `T`
//! - **Filter algebra**: AND/OR/NOT compose by call nesting, with parentheses added only where needed
//! - **Positional placeholders**: `?` order in the SQL always matches the parameter order
//! - **Typed nulls**: columns carry a declared `SqlType` used when binding a null
//! - **Pluggable execution**: any `Connection` implementation; SQLite via `rusqlite` out of the box
//! - **Query monitoring**: timing, logging and statistics through `InstrumentedConnection`
//!
//! ## Example
//!
//! ```rust
//! use sqlstage::prelude::*;
//! use sqlstage::qb;
//!
//! const ORDERS: Table = Table::new("ORDERS");
//! const ID: Column<i64> = Column::new("ID");
//! const STATUS: Column<String> = Column::with_type("STATUS", SqlType::Varchar);
//! const TOTAL: Column<f64> = Column::new("TOTAL");
//!
//! // SELECT
//! let q = qb::select((&ID, TOTAL.as_("Order Total")?))?
//!     .from(&ORDERS)?
//!     .where_(STATUS.equal_to("open").and(TOTAL.greater_than(10.0).or(TOTAL.is_null())))
//!     .order_by(ID.desc())?;
//! assert_eq!(
//!     q.sql(),
//!     "SELECT\n    ID,\n    TOTAL AS \"Order Total\"\nFROM\n    ORDERS\nWHERE\n    STATUS = ?\n    AND (TOTAL > ?\n     OR TOTAL IS NULL)\nORDER BY\n    ID DESC\n"
//! );
//! assert_eq!(q.params().len(), 2);
//!
//! // INSERT with a typed null
//! let q = qb::insert().into(&ORDERS).values([ID.value(1), STATUS.null()])?;
//! assert_eq!(q.params()[1], Param::Null(SqlType::Varchar));
//!
//! // UPDATE binds SET values before WHERE values
//! let q = qb::update(&ORDERS).set(STATUS.value("closed"))?.where_(ID.equal_to(1));
//! assert_eq!(q.params(), &[Param::Value("closed".into()), Param::Value(1.into())]);
//!
//! // DELETE
//! let q = qb::delete().from(&ORDERS).where_(!STATUS.is_in(["open", "held"])?);
//! assert_eq!(q.sql(), "DELETE\nFROM\n    ORDERS\nWHERE\n    NOT STATUS IN (?, ?)\n");
//! # Ok::<(), sqlstage::SqlError>(())
//! ```

pub mod client;
pub mod column;
pub mod error;
pub mod filter;
mod ident;
pub mod monitor;
pub mod prelude;
pub mod qb;
pub mod table;
pub mod value;

pub use client::{Connection, PreparedStatement, Row};
pub use column::{ALL, Column, ColumnRef, ColumnValue, Order};
pub use error::{SqlError, SqlResult};
pub use filter::Filter;
pub use monitor::{
    CompositeMonitor, InstrumentedConnection, LoggingMonitor, MonitorConfig, NoopMonitor,
    QueryContext, QueryMonitor, QueryResult, QueryStats, QueryType, StatsMonitor,
};
pub use qb::{
    FetchQb, IntoColumnValues, IntoColumns, IntoTables, MutationQb, Param, SqlQb, SqlQuery,
    delete, insert, select, update,
};
pub use table::Table;
pub use value::{FromValue, SqlType, Value};
