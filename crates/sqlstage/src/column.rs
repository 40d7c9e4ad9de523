//! Typed column references.
//!
//! `Column<T>` ties a column name to a Rust type `T`. The type is a
//! compile-time marker only: it decides which values the comparison methods
//! accept, so `Column<String>::equal_to(1)` does not compile.
//!
//! Every transformation (`as_`, `asc`, `of`, `count`, ...) returns a new column.

use crate::error::{SqlError, SqlResult};
use crate::filter::Filter;
use crate::ident::{count_placeholders, quote_alias, validate_name};
use crate::qb::Param;
use crate::table::Table;
use crate::value::{SqlType, Value};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Sort direction used in `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column with its type marker erased.
///
/// Builder stages take lists of these so that columns of different Rust types
/// can share one `SELECT`, `GROUP BY` or `ORDER BY` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    name: Cow<'static, str>,
    sql_type: SqlType,
    alias: Option<String>,
    order: Option<Order>,
}

impl ColumnRef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn order(&self) -> Option<Order> {
        self.order
    }

    /// `name` or `name AS alias`, as used in a SELECT list.
    pub(crate) fn select_item(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {}", self.name, alias),
            None => self.name.to_string(),
        }
    }

    /// `name`, `name ASC` or `name DESC`, as used in ORDER BY.
    pub(crate) fn order_item(&self) -> String {
        match self.order {
            Some(order) => format!("{} {}", self.name, order),
            None => self.name.to_string(),
        }
    }

    fn renamed(&self, name: String) -> Self {
        Self {
            name: Cow::Owned(name),
            sql_type: self.sql_type,
            alias: self.alias.clone(),
            order: self.order,
        }
    }
}

/// A typed reference to a table column or a computed column expression.
///
/// # Example
///
/// ```rust
/// use sqlstage::{Column, SqlType, Table};
///
/// const USERS: Table = Table::new("USERS");
/// const NAME: Column<String> = Column::new("NAME");
/// const SCORE: Column<f64> = Column::with_type("SCORE", SqlType::Double);
///
/// let f = NAME.equal_to("alice").and(SCORE.greater_than(1.5));
/// assert_eq!(f.condition(), "NAME = ?\n    AND SCORE > ?");
///
/// let u = USERS.as_("U").unwrap();
/// assert_eq!(NAME.of(&u).name(), "U.NAME");
/// assert_eq!(SCORE.max().name(), "MAX(SCORE)");
/// ```
pub struct Column<T> {
    inner: ColumnRef,
    _marker: PhantomData<fn() -> T>,
}

/// Selects every column (`*`). Combine with [`Column::count`] for `COUNT(*)`.
pub const ALL: Column<String> = Column::new("*");

impl<T> Column<T> {
    /// Create an untyped column usable in `const` items.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const context) if `name` is empty or
    /// contains a `?` outside quotes.
    pub const fn new(name: &'static str) -> Self {
        Self::with_type(name, SqlType::Null)
    }

    /// Create a column with a declared SQL type.
    ///
    /// The type is used to bind a typed null when this column is written with
    /// no value; prefer this constructor for nullable INSERT/UPDATE columns.
    pub const fn with_type(name: &'static str, sql_type: SqlType) -> Self {
        assert!(!name.is_empty(), "column name cannot be empty");
        assert!(
            count_placeholders(name) == 0,
            "column name cannot contain a `?` placeholder"
        );
        Self {
            inner: ColumnRef {
                name: Cow::Borrowed(name),
                sql_type,
                alias: None,
                order: None,
            },
            _marker: PhantomData,
        }
    }

    /// Create a column from a runtime name.
    pub fn try_new(name: impl Into<String>, sql_type: SqlType) -> SqlResult<Self> {
        let name = name.into();
        validate_name(&name, "column")?;
        Ok(Self::from_ref(ColumnRef {
            name: Cow::Owned(name),
            sql_type,
            alias: None,
            order: None,
        }))
    }

    fn from_ref(inner: ColumnRef) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn sql_type(&self) -> SqlType {
        self.inner.sql_type
    }

    pub fn alias(&self) -> Option<&str> {
        self.inner.alias()
    }

    pub fn order(&self) -> Option<Order> {
        self.inner.order
    }

    /// The column with its type marker erased.
    pub fn erased(&self) -> &ColumnRef {
        &self.inner
    }

    /// Return a copy with the given alias (`SELECT COL AS alias`).
    pub fn as_(&self, alias: &str) -> SqlResult<Self> {
        let mut inner = self.inner.clone();
        inner.alias = Some(quote_alias(alias)?);
        Ok(Self::from_ref(inner))
    }

    /// Return a copy sorted ascending in `ORDER BY`.
    pub fn asc(&self) -> Self {
        self.with_order(Order::Asc)
    }

    /// Return a copy sorted descending in `ORDER BY`.
    pub fn desc(&self) -> Self {
        self.with_order(Order::Desc)
    }

    fn with_order(&self, order: Order) -> Self {
        let mut inner = self.inner.clone();
        inner.order = Some(order);
        Self::from_ref(inner)
    }

    /// Return a copy qualified by `table` (its alias if set, else its name).
    pub fn of(&self, table: &Table) -> Self {
        self.wrap(format!("{}.{}", table.qualifier(), self.name()))
    }

    /// `MIN(col)`
    pub fn min(&self) -> Self {
        self.wrap(format!("MIN({})", self.name()))
    }

    /// `MAX(col)`
    pub fn max(&self) -> Self {
        self.wrap(format!("MAX({})", self.name()))
    }

    /// `SUM(col)`
    pub fn sum(&self) -> Self {
        self.wrap(format!("SUM({})", self.name()))
    }

    /// `AVG(col)`
    pub fn avg(&self) -> Self {
        self.wrap(format!("AVG({})", self.name()))
    }

    /// `COUNT(col)`
    pub fn count(&self) -> Self {
        self.wrap(format!("COUNT({})", self.name()))
    }

    /// `DISTINCT col`
    pub fn distinct(&self) -> Self {
        self.wrap(format!("DISTINCT {}", self.name()))
    }

    /// `COUNT(DISTINCT col)`
    pub fn count_distinct(&self) -> Self {
        self.wrap(format!("COUNT(DISTINCT {})", self.name()))
    }

    fn wrap(&self, name: String) -> Self {
        Self::from_ref(self.inner.renamed(name))
    }
}

impl<T: Into<Value>> Column<T> {
    /// Pair this column with a value for INSERT/UPDATE.
    pub fn value(&self, value: impl Into<T>) -> ColumnValue {
        self.value_opt(Some(value))
    }

    /// Pair this column with an optional value; `None` writes a null typed
    /// with this column's declared [`SqlType`].
    pub fn value_opt<V: Into<T>>(&self, value: Option<V>) -> ColumnValue {
        ColumnValue {
            name: self.inner.name.clone(),
            sql_type: self.inner.sql_type,
            value: value.map(to_value::<T, V>),
        }
    }

    /// Pair this column with a typed null.
    pub fn null(&self) -> ColumnValue {
        self.value_opt(None::<T>)
    }

    fn compare(&self, op: &str, value: impl Into<T>) -> Filter {
        Filter::leaf(
            format!("{} {} ?", self.name(), op),
            vec![to_value::<T, _>(value)],
        )
    }

    /// `col = ?`
    pub fn equal_to(&self, value: impl Into<T>) -> Filter {
        self.compare("=", value)
    }

    /// `col != ?`
    pub fn not_equal_to(&self, value: impl Into<T>) -> Filter {
        self.compare("!=", value)
    }

    /// `col > ?`
    pub fn greater_than(&self, value: impl Into<T>) -> Filter {
        self.compare(">", value)
    }

    /// `col >= ?`
    pub fn greater_than_or_equal_to(&self, value: impl Into<T>) -> Filter {
        self.compare(">=", value)
    }

    /// `col < ?`
    pub fn less_than(&self, value: impl Into<T>) -> Filter {
        self.compare("<", value)
    }

    /// `col <= ?`
    pub fn less_than_or_equal_to(&self, value: impl Into<T>) -> Filter {
        self.compare("<=", value)
    }

    /// `col LIKE ?`
    pub fn like(&self, pattern: impl Into<T>) -> Filter {
        self.compare("LIKE", pattern)
    }

    /// `col NOT LIKE ?`
    pub fn not_like(&self, pattern: impl Into<T>) -> Filter {
        self.compare("NOT LIKE", pattern)
    }

    /// `col BETWEEN ? AND ?`
    pub fn between(&self, low: impl Into<T>, high: impl Into<T>) -> Filter {
        self.range("BETWEEN", low, high)
    }

    /// `col NOT BETWEEN ? AND ?`
    pub fn not_between(&self, low: impl Into<T>, high: impl Into<T>) -> Filter {
        self.range("NOT BETWEEN", low, high)
    }

    fn range(&self, op: &str, low: impl Into<T>, high: impl Into<T>) -> Filter {
        Filter::leaf(
            format!("{} {} ? AND ?", self.name(), op),
            vec![to_value::<T, _>(low), to_value::<T, _>(high)],
        )
    }

    /// `col IN (?, ?, ...)`; fails on an empty list.
    pub fn is_in<I, V>(&self, values: I) -> SqlResult<Filter>
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        self.list("IN", values)
    }

    /// `col NOT IN (?, ?, ...)`; fails on an empty list.
    pub fn not_in<I, V>(&self, values: I) -> SqlResult<Filter>
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        self.list("NOT IN", values)
    }

    fn list<I, V>(&self, op: &str, values: I) -> SqlResult<Filter>
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        let params: Vec<Value> = values.into_iter().map(to_value::<T, V>).collect();
        if params.is_empty() {
            return Err(SqlError::invalid_argument(format!(
                "{op} on {} requires at least one value",
                self.name()
            )));
        }
        let placeholders = vec!["?"; params.len()].join(", ");
        Ok(Filter::leaf(
            format!("{} {} ({})", self.name(), op, placeholders),
            params,
        ))
    }
}

impl<T> Column<T> {
    /// `col IS NULL`
    pub fn is_null(&self) -> Filter {
        Filter::leaf(format!("{} IS NULL", self.name()), Vec::new())
    }

    /// `col IS NOT NULL`
    pub fn is_not_null(&self) -> Filter {
        Filter::leaf(format!("{} IS NOT NULL", self.name()), Vec::new())
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self::from_ref(self.inner.clone())
    }
}

impl<T> PartialEq for Column<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.inner.name)
            .field("sql_type", &self.inner.sql_type)
            .field("alias", &self.inner.alias)
            .field("order", &self.inner.order)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> From<&Column<T>> for ColumnRef {
    fn from(column: &Column<T>) -> Self {
        column.inner.clone()
    }
}

impl<T> From<Column<T>> for ColumnRef {
    fn from(column: Column<T>) -> Self {
        column.inner
    }
}

impl From<&ColumnRef> for ColumnRef {
    fn from(column: &ColumnRef) -> Self {
        column.clone()
    }
}

fn to_value<T: Into<Value>, V: Into<T>>(value: V) -> Value {
    let typed: T = value.into();
    typed.into()
}

/// A column paired with the value to write to it.
///
/// Created by [`Column::value`], [`Column::value_opt`] and [`Column::null`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValue {
    name: Cow<'static, str>,
    sql_type: SqlType,
    value: Option<Value>,
}

impl ColumnValue {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }

    /// The value, or `None` for a null.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Convert into the bind form: the value, or a null typed with the
    /// column's declared type.
    pub(crate) fn into_param(self) -> Param {
        match self.value {
            Some(v) => Param::Value(v),
            None => Param::Null(self.sql_type),
        }
    }
}

impl From<&ColumnValue> for ColumnValue {
    fn from(cv: &ColumnValue) -> Self {
        cv.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const TABLE_1: Table = Table::new("TABLE_1");
    const COL_1: Column<String> = Column::new("COL_1");
    const COL_2: Column<i64> = Column::new("COL_2");
    const COL_3: Column<f64> = Column::with_type("COL_3", SqlType::Double);
    const COL_4: Column<NaiveDate> = Column::new("COL_4");

    #[test]
    fn comparison_operators() {
        assert_eq!(COL_1.equal_to("a").condition(), "COL_1 = ?");
        assert_eq!(COL_1.not_equal_to("a").condition(), "COL_1 != ?");
        assert_eq!(COL_2.greater_than(1).condition(), "COL_2 > ?");
        assert_eq!(COL_2.greater_than_or_equal_to(1).condition(), "COL_2 >= ?");
        assert_eq!(COL_2.less_than(1).condition(), "COL_2 < ?");
        assert_eq!(COL_2.less_than_or_equal_to(1).condition(), "COL_2 <= ?");
        assert_eq!(COL_1.like("%a%").condition(), "COL_1 LIKE ?");
        assert_eq!(COL_1.not_like("%a").condition(), "COL_1 NOT LIKE ?");
        assert_eq!(COL_1.is_null().condition(), "COL_1 IS NULL");
        assert_eq!(COL_1.is_not_null().condition(), "COL_1 IS NOT NULL");
        assert!(COL_1.is_null().params().is_empty());
    }

    #[test]
    fn between_binds_both_bounds_in_order() {
        let d1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let f = COL_4.between(d1, d2);
        assert_eq!(f.condition(), "COL_4 BETWEEN ? AND ?");
        assert_eq!(f.params(), &[Value::Date(d1), Value::Date(d2)]);
        assert_eq!(COL_4.not_between(d1, d2).condition(), "COL_4 NOT BETWEEN ? AND ?");
    }

    #[test]
    fn in_lists() {
        let f = COL_1.is_in(["a"]).unwrap();
        assert_eq!(f.condition(), "COL_1 IN (?)");
        let f = COL_1.not_in(["a", "b", "c"]).unwrap();
        assert_eq!(f.condition(), "COL_1 NOT IN (?, ?, ?)");
        assert_eq!(f.params().len(), 3);
    }

    #[test]
    fn empty_in_list_is_rejected() {
        let err = COL_2.is_in(Vec::<i64>::new()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(COL_2.not_in(Vec::<i64>::new()).is_err());
    }

    #[test]
    fn transformations_return_new_columns() {
        let t1 = TABLE_1.as_("T_1").unwrap();
        let c1 = COL_1.of(&t1).as_("C_1").unwrap();
        assert_eq!(c1.name(), "T_1.COL_1");
        assert_eq!(c1.alias(), Some("C_1"));
        assert_eq!(COL_1.name(), "COL_1");
        assert_eq!(COL_1.alias(), None);
        assert_eq!(COL_1.of(&TABLE_1).name(), "TABLE_1.COL_1");

        let sorted = COL_3.desc();
        assert_eq!(sorted.order(), Some(Order::Desc));
        assert_eq!(COL_3.order(), None);
    }

    #[test]
    fn aggregates_keep_alias_and_type() {
        let c = COL_3.as_("S").unwrap().sum();
        assert_eq!(c.name(), "SUM(COL_3)");
        assert_eq!(c.alias(), Some("S"));
        assert_eq!(c.sql_type(), SqlType::Double);
        assert_eq!(ALL.count().name(), "COUNT(*)");
        assert_eq!(COL_2.count_distinct().name(), "COUNT(DISTINCT COL_2)");
        assert_eq!(COL_2.distinct().name(), "DISTINCT COL_2");
        assert_eq!(COL_2.min().name(), "MIN(COL_2)");
        assert_eq!(COL_2.avg().name(), "AVG(COL_2)");
    }

    #[test]
    fn column_values_carry_declared_type() {
        let v = COL_3.value(1.5);
        assert_eq!(v.name(), "COL_3");
        assert_eq!(v.value(), Some(&Value::Real(1.5)));

        let n = COL_3.null();
        assert_eq!(n.value(), None);
        assert_eq!(n.into_param(), Param::Null(SqlType::Double));

        let untyped = COL_1.value_opt(None::<String>);
        assert_eq!(untyped.into_param(), Param::Null(SqlType::Null));
    }

    #[test]
    fn runtime_columns_validated() {
        assert!(Column::<i64>::try_new("", SqlType::BigInt).is_err());
        let c = Column::<i64>::try_new("ID", SqlType::BigInt).unwrap();
        assert_eq!(c.equal_to(3).params(), &[Value::Int(3)]);
    }

    #[test]
    fn placeholder_names_and_aliases_rejected() {
        let err = Column::<i64>::try_new("A?", SqlType::BigInt).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(COL_1.as_("X?").unwrap_err().is_invalid_argument());

        let quoted = Column::<i64>::try_new("\"A?\"", SqlType::BigInt).unwrap();
        let f = quoted.equal_to(1);
        assert_eq!(f.condition(), "\"A?\" = ?");
        assert_eq!(f.params().len(), 1);
    }

    #[test]
    #[should_panic(expected = "placeholder")]
    fn const_column_with_placeholder_panics() {
        let _ = Column::<i64>::new("A?");
    }
}
