use super::config::MonitorConfig;
use super::monitors::NoopMonitor;
use super::truncate_sql_bytes;
use super::types::{QueryContext, QueryMonitor, QueryResult};
use crate::client::{Connection, PreparedStatement, Row};
use crate::error::SqlResult;
use crate::value::{SqlType, Value};
use std::sync::Arc;
use std::time::Instant;

/// A [`Connection`] wrapper that reports every executed statement to a
/// [`QueryMonitor`].
///
/// Builders execute against it exactly as against the wrapped connection.
/// Monitoring must be explicitly enabled via
/// [`MonitorConfig::enable_monitoring`]; until then statements pass straight
/// through.
pub struct InstrumentedConnection<C> {
    conn: C,
    monitor: Arc<dyn QueryMonitor>,
    config: MonitorConfig,
}

impl<C: Connection> InstrumentedConnection<C> {
    /// Wrap `conn` with monitoring disabled and a [`NoopMonitor`].
    pub fn new(conn: C) -> Self {
        Self {
            conn,
            monitor: Arc::new(NoopMonitor),
            config: MonitorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_monitor<M: QueryMonitor + 'static>(mut self, monitor: M) -> Self {
        self.monitor = Arc::new(monitor);
        self
    }

    /// Set a shared monitor, so the caller can keep reading it.
    pub fn with_monitor_arc(mut self, monitor: Arc<dyn QueryMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn enable_monitoring(mut self) -> Self {
        self.config.monitoring_enabled = true;
        self
    }

    pub fn is_monitoring_enabled(&self) -> bool {
        self.config.monitoring_enabled
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn inner(&self) -> &C {
        &self.conn
    }

    pub fn into_inner(self) -> C {
        self.conn
    }
}

impl<C: Connection> Connection for InstrumentedConnection<C> {
    type Statement<'c>
        = InstrumentedStatement<'c, C::Statement<'c>>
    where
        Self: 'c;

    fn prepare(&self, sql: &str) -> SqlResult<Self::Statement<'_>> {
        let logged_sql = truncate_sql_bytes(sql, self.config.max_sql_length);
        let start = Instant::now();
        let inner = match self.conn.prepare(sql) {
            Ok(inner) => inner,
            Err(e) => {
                // Never reaches `observe`, so report the failure from here.
                if self.config.monitoring_enabled {
                    let ctx = QueryContext::new(logged_sql, 0);
                    self.monitor.on_query_start(&ctx);
                    let result = QueryResult::error(e.to_string());
                    self.monitor.on_query_complete(&ctx, start.elapsed(), &result);
                }
                return Err(e);
            }
        };
        Ok(InstrumentedStatement {
            inner,
            sql: logged_sql.to_string(),
            bound: 0,
            monitor: &*self.monitor,
            config: &self.config,
        })
    }
}

/// Statement handed out by [`InstrumentedConnection`].
pub struct InstrumentedStatement<'c, S> {
    inner: S,
    sql: String,
    bound: usize,
    monitor: &'c dyn QueryMonitor,
    config: &'c MonitorConfig,
}

impl<S: PreparedStatement> InstrumentedStatement<'_, S> {
    fn observe<T>(
        &mut self,
        run: impl FnOnce(&mut S) -> SqlResult<T>,
        outcome: impl FnOnce(&T) -> QueryResult,
    ) -> SqlResult<T> {
        if !self.config.monitoring_enabled {
            return run(&mut self.inner);
        }

        let ctx = QueryContext::new(&self.sql, self.bound);
        self.monitor.on_query_start(&ctx);
        let start = Instant::now();
        let result = run(&mut self.inner);
        let duration = start.elapsed();

        let query_result = match &result {
            Ok(value) => outcome(value),
            Err(e) => QueryResult::error(e.to_string()),
        };
        self.monitor.on_query_complete(&ctx, duration, &query_result);

        if let Some(threshold) = self.config.slow_query_threshold {
            if duration > threshold {
                self.monitor.on_slow_query(&ctx, duration);
            }
        }
        result
    }
}

impl<S: PreparedStatement> PreparedStatement for InstrumentedStatement<'_, S> {
    fn bind(&mut self, index: usize, value: &Value) -> SqlResult<()> {
        self.inner.bind(index, value)?;
        self.bound = self.bound.max(index);
        Ok(())
    }

    fn bind_null(&mut self, index: usize, sql_type: SqlType) -> SqlResult<()> {
        self.inner.bind_null(index, sql_type)?;
        self.bound = self.bound.max(index);
        Ok(())
    }

    fn execute_update(&mut self) -> SqlResult<u64> {
        self.observe(|inner| inner.execute_update(), |n| QueryResult::Affected(*n))
    }

    fn execute_query(
        &mut self,
        visit: &mut dyn FnMut(&dyn Row) -> SqlResult<()>,
    ) -> SqlResult<()> {
        self.observe(
            |inner| {
                let mut rows = 0usize;
                inner.execute_query(&mut |row: &dyn Row| -> SqlResult<()> {
                    rows += 1;
                    visit(row)
                })?;
                Ok(rows)
            },
            |rows| QueryResult::Rows(*rows),
        )?;
        Ok(())
    }
}
