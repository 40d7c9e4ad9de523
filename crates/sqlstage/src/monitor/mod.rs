//! Statement monitoring.
//!
//! [`InstrumentedConnection`] wraps any [`Connection`](crate::Connection) and
//! reports each statement's text, parameter count, duration and outcome to a
//! [`QueryMonitor`]. Built-in monitors cover logging through `tracing`,
//! aggregate statistics, and fan-out to several monitors.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "sqlite")]
//! # fn main() -> sqlstage::SqlResult<()> {
//! use sqlstage::monitor::{InstrumentedConnection, MonitorConfig, StatsMonitor};
//! use sqlstage::prelude::*;
//! use sqlstage::qb;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let stats = Arc::new(StatsMonitor::new());
//! let conn = InstrumentedConnection::new(rusqlite::Connection::open_in_memory()?)
//!     .with_config(
//!         MonitorConfig::new()
//!             .with_slow_query_threshold(Duration::from_millis(50))
//!             .enable_monitoring(),
//!     )
//!     .with_monitor_arc(stats.clone());
//! conn.inner().execute_batch("CREATE TABLE T (A INTEGER)")?;
//!
//! const T: Table = Table::new("T");
//! const A: Column<i64> = Column::new("A");
//! qb::insert().into(&T).values([A.value(1)])?.execute(&conn)?;
//!
//! assert_eq!(stats.stats().insert_count, 1);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "sqlite"))]
//! # fn main() {}
//! ```

mod config;
mod instrumented;
mod monitors;
mod types;


pub use config::MonitorConfig;
pub use instrumented::{InstrumentedConnection, InstrumentedStatement};
pub use monitors::{CompositeMonitor, LoggingMonitor, NoopMonitor, QueryStats, StatsMonitor};
pub use types::{QueryContext, QueryMonitor, QueryResult, QueryType};

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
