//! Convenient imports for typical `sqlstage` usage.
//!
//! Brings the builder traits into scope so `sql()`, `params()` and `execute()`
//! resolve on every stage:
//!
//! ```rust
//! use sqlstage::prelude::*;
//! ```

pub use crate::{
    ALL, Column, ColumnValue, Connection, FetchQb, Filter, FromValue, MutationQb, Param, Row,
    SqlError, SqlQb, SqlQuery, SqlResult, SqlType, Table, Value,
};
