use std::fmt;
use std::time::Duration;

/// The kind of statement being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    /// DDL, pragmas and anything else.
    Other,
}

impl QueryType {
    /// Detect the statement kind from its leading keyword.
    ///
    /// Leading whitespace and SQL comments are skipped; the match is
    /// case-insensitive.
    pub fn from_sql(sql: &str) -> Self {
        let head = strip_leading_comments(sql);
        if starts_with_keyword(head, "SELECT") {
            QueryType::Select
        } else if starts_with_keyword(head, "INSERT") {
            QueryType::Insert
        } else if starts_with_keyword(head, "UPDATE") {
            QueryType::Update
        } else if starts_with_keyword(head, "DELETE") {
            QueryType::Delete
        } else {
            QueryType::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QueryType::Select => "SELECT",
            QueryType::Insert => "INSERT",
            QueryType::Update => "UPDATE",
            QueryType::Delete => "DELETE",
            QueryType::Other => "OTHER",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn strip_leading_comments(mut sql: &str) -> &str {
    loop {
        sql = sql.trim_start();
        if let Some(rest) = sql.strip_prefix("--") {
            sql = rest.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(rest) = sql.strip_prefix("/*") {
            sql = rest.split_once("*/").map_or("", |(_, tail)| tail);
        } else {
            return sql;
        }
    }
}

fn starts_with_keyword(sql: &str, keyword: &str) -> bool {
    sql.get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
        && sql[keyword.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '_')
}

/// What a monitor learns about a statement before it runs.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// The statement text as sent to the connection.
    pub sql: String,
    /// Number of bound parameters.
    pub param_count: usize,
    /// Detected statement kind.
    pub query_type: QueryType,
    /// Optional caller-supplied label.
    pub tag: Option<String>,
}

impl QueryContext {
    pub fn new(sql: &str, param_count: usize) -> Self {
        Self {
            sql: sql.to_string(),
            param_count,
            query_type: QueryType::from_sql(sql),
            tag: None,
        }
    }

    /// Attach a label identifying the statement.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Longest error message kept in a [`QueryResult::Error`].
const MAX_ERROR_LEN: usize = 512;

/// Outcome of a statement, as reported to monitors.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// A query produced this many rows.
    Rows(usize),
    /// A mutation affected this many rows.
    Affected(u64),
    /// The statement failed; message truncated to 512 bytes.
    Error(String),
}

impl QueryResult {
    pub fn error(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if msg.len() > MAX_ERROR_LEN {
            let truncated = super::truncate_sql_bytes(&msg, MAX_ERROR_LEN);
            Self::Error(format!("{truncated}..."))
        } else {
            Self::Error(msg)
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryResult::Error(_))
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Rows(n) => write!(f, "{n} rows"),
            QueryResult::Affected(n) => write!(f, "{n} affected"),
            QueryResult::Error(e) => write!(f, "error: {e}"),
        }
    }
}

/// Observer of statement execution.
///
/// Implement this to collect metrics or feed an observability system.
/// Monitors are shared across threads, so implementations use interior
/// mutability.
pub trait QueryMonitor: Send + Sync {
    /// Called before a statement runs.
    fn on_query_start(&self, _ctx: &QueryContext) {}

    /// Called after a statement finishes, successfully or not.
    fn on_query_complete(&self, ctx: &QueryContext, duration: Duration, result: &QueryResult);

    /// Called when a statement took longer than the configured threshold.
    fn on_slow_query(&self, _ctx: &QueryContext, _duration: Duration) {}
}
