//! rusqlite backend.

use super::{Connection, PreparedStatement, Row};
use crate::error::{SqlError, SqlResult};
use crate::value::{DATE_FORMAT, SqlType, TIME_FORMAT, TIMESTAMP_FORMAT, Value};
use rusqlite::types::{Null, ToSqlOutput, ValueRef};
use rusqlite::ToSql;

impl Connection for rusqlite::Connection {
    type Statement<'c> = rusqlite::Statement<'c>;

    fn prepare(&self, sql: &str) -> SqlResult<Self::Statement<'_>> {
        Ok(rusqlite::Connection::prepare(self, sql)?)
    }
}

impl PreparedStatement for rusqlite::Statement<'_> {
    fn bind(&mut self, index: usize, value: &Value) -> SqlResult<()> {
        self.raw_bind_parameter(index, value)?;
        Ok(())
    }

    // SQLite columns are dynamically typed, so the declared type is not needed.
    fn bind_null(&mut self, index: usize, _sql_type: SqlType) -> SqlResult<()> {
        self.raw_bind_parameter(index, Null)?;
        Ok(())
    }

    fn execute_update(&mut self) -> SqlResult<u64> {
        let affected = self.raw_execute()?;
        Ok(affected as u64)
    }

    fn execute_query(
        &mut self,
        visit: &mut dyn FnMut(&dyn Row) -> SqlResult<()>,
    ) -> SqlResult<()> {
        let mut rows = self.raw_query();
        while let Some(row) = rows.next()? {
            visit(&SqliteRow(row))?;
        }
        Ok(())
    }
}

struct SqliteRow<'r, 's>(&'r rusqlite::Row<'s>);

impl Row for SqliteRow<'_, '_> {
    fn get_value(&self, column: &str) -> SqlResult<Option<Value>> {
        let value = match self.0.get_ref(column)? {
            ValueRef::Null => None,
            ValueRef::Integer(i) => Some(Value::Int(i)),
            ValueRef::Real(f) => Some(Value::Real(f)),
            ValueRef::Text(bytes) => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| SqlError::decode(column, e.to_string()))?;
                Some(Value::Text(text.to_owned()))
            }
            ValueRef::Blob(bytes) => Some(Value::Blob(bytes.to_vec())),
        };
        Ok(value)
    }
}

/// Dates and times are stored as ISO-8601 text, UUIDs as hyphenated text and
/// JSON as its serialized text.
impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let out = match self {
            Value::Bool(b) => ToSqlOutput::from(*b),
            Value::Int(i) => ToSqlOutput::from(*i),
            Value::Real(f) => ToSqlOutput::from(*f),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
            Value::Date(d) => ToSqlOutput::from(d.format(DATE_FORMAT).to_string()),
            Value::Time(t) => ToSqlOutput::from(t.format(TIME_FORMAT).to_string()),
            Value::Timestamp(ts) => ToSqlOutput::from(ts.format(TIMESTAMP_FORMAT).to_string()),
            Value::Uuid(u) => ToSqlOutput::from(u.hyphenated().to_string()),
            Value::Json(j) => ToSqlOutput::from(j.to_string()),
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> rusqlite::Connection {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE T (A INTEGER, B TEXT, C BLOB, D REAL)")
            .unwrap();
        conn
    }

    #[test]
    fn binds_values_and_typed_nulls() {
        let conn = conn();
        let mut stmt = Connection::prepare(&conn, "INSERT INTO T (A, B, C, D) VALUES (?, ?, ?, ?)").unwrap();
        stmt.bind(1, &Value::Int(7)).unwrap();
        stmt.bind(2, &Value::from("seven")).unwrap();
        stmt.bind(3, &Value::Blob(vec![1, 2])).unwrap();
        stmt.bind_null(4, SqlType::Double).unwrap();
        assert_eq!(stmt.execute_update().unwrap(), 1);

        let mut stmt = Connection::prepare(&conn, "SELECT A, B, C, D FROM T").unwrap();
        let mut seen = Vec::new();
        stmt.execute_query(&mut |row: &dyn Row| -> SqlResult<()> {
            seen.push((
                row.get_value("A")?,
                row.get_value("B")?,
                row.get_value("C")?,
                row.get_value("D")?,
            ));
            Ok(())
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![(
                Some(Value::Int(7)),
                Some(Value::from("seven")),
                Some(Value::Blob(vec![1, 2])),
                None
            )]
        );
    }

    #[test]
    fn unknown_column_is_a_database_error() {
        let conn = conn();
        conn.execute_batch("INSERT INTO T (A) VALUES (1)").unwrap();
        let mut stmt = Connection::prepare(&conn, "SELECT A FROM T").unwrap();
        let err = stmt
            .execute_query(&mut |row: &dyn Row| -> SqlResult<()> {
                row.get_value("NOPE")?;
                Ok(())
            })
            .unwrap_err();
        assert!(err.is_database_error());
    }

    #[test]
    fn dates_are_stored_as_iso_text() {
        let d = chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let v = Value::Date(d);
        let out = v.to_sql().unwrap();
        assert_eq!(out, ToSqlOutput::from("2024-02-29".to_string()));
    }
}
