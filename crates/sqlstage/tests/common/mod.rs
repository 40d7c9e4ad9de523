//! Shared fixtures for the SQLite integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlstage::prelude::*;
use sqlstage::qb;

pub const TABLE_1: Table = Table::new("TABLE_1");
pub const COL_1: Column<String> = Column::with_type("COL_1", SqlType::Varchar);
pub const COL_2: Column<i32> = Column::with_type("COL_2", SqlType::Integer);
pub const COL_3: Column<f64> = Column::with_type("COL_3", SqlType::Double);
pub const COL_4: Column<NaiveDate> = Column::with_type("COL_4", SqlType::Date);
pub const COL_5: Column<NaiveTime> = Column::with_type("COL_5", SqlType::Time);
pub const COL_6: Column<NaiveDateTime> = Column::with_type("COL_6", SqlType::Timestamp);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table1Row {
    pub col1: String,
    pub col2: i32,
    pub col3: Option<f64>,
    pub col4: Option<NaiveDate>,
    pub col5: Option<NaiveTime>,
    pub col6: Option<NaiveDateTime>,
}

impl Table1Row {
    pub fn new(col1: &str, col2: i32) -> Self {
        Self {
            col1: col1.to_string(),
            col2,
            ..Self::default()
        }
    }

    pub fn from_row(row: &dyn Row) -> SqlResult<Self> {
        Ok(Self {
            col1: row.get(COL_1.name())?,
            col2: row.get(COL_2.name())?,
            col3: row.get(COL_3.name())?,
            col4: row.get(COL_4.name())?,
            col5: row.get(COL_5.name())?,
            col6: row.get(COL_6.name())?,
        })
    }

    pub fn insert<C: Connection>(&self, conn: &C) -> SqlResult<u64> {
        qb::insert()
            .into(&TABLE_1)
            .values([
                COL_1.value(self.col1.as_str()),
                COL_2.value(self.col2),
                COL_3.value_opt(self.col3),
                COL_4.value_opt(self.col4),
                COL_5.value_opt(self.col5),
                COL_6.value_opt(self.col6),
            ])?
            .execute(conn)
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
}

pub fn timestamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Five rows with progressively more columns filled in.
pub fn records() -> Vec<Table1Row> {
    vec![
        Table1Row::new("test1", 10),
        Table1Row {
            col3: Some(1.3),
            ..Table1Row::new("test2", 10)
        },
        Table1Row {
            col3: Some(1.4),
            col4: Some(date("2025-01-04")),
            ..Table1Row::new("test3", 30)
        },
        Table1Row {
            col3: Some(1.5),
            col4: Some(date("2025-01-05")),
            col5: Some(time("01:01:05")),
            ..Table1Row::new("test4", 40)
        },
        Table1Row {
            col3: Some(1.6),
            col4: Some(date("2025-01-06")),
            col5: Some(time("01:01:06")),
            col6: Some(timestamp("2025-01-06 01:01:06")),
            ..Table1Row::new("test5", 50)
        },
    ]
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An in-memory database with an empty `TABLE_1`.
pub fn open() -> rusqlite::Connection {
    init_tracing();
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE TABLE_1 (
            COL_1 VARCHAR(255) PRIMARY KEY,
            COL_2 INT NOT NULL,
            COL_3 DOUBLE,
            COL_4 DATE,
            COL_5 TIME,
            COL_6 TIMESTAMP
        )",
    )
    .unwrap();
    conn
}

/// An in-memory database with [`records`] loaded.
pub fn seeded() -> rusqlite::Connection {
    let conn = open();
    for record in records() {
        assert_eq!(record.insert(&conn).unwrap(), 1);
    }
    conn
}

pub fn select_all<C: Connection>(conn: &C) -> Vec<Table1Row> {
    qb::select([ALL])
        .unwrap()
        .from(&TABLE_1)
        .unwrap()
        .order_by(&COL_1)
        .unwrap()
        .execute(conn, Table1Row::from_row)
        .unwrap()
}
