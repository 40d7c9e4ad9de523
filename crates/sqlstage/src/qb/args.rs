//! List arguments accepted by builder stages.
//!
//! A single column/table/value, a tuple of differently-typed columns, an array,
//! a `Vec` or a slice all work. Stages reject an empty list.

use crate::column::{Column, ColumnRef, ColumnValue};
use crate::table::Table;

/// Anything that can stand for a non-empty list of columns.
pub trait IntoColumns {
    fn into_columns(self) -> Vec<ColumnRef>;
}

impl<T> IntoColumns for &Column<T> {
    fn into_columns(self) -> Vec<ColumnRef> {
        vec![self.into()]
    }
}

impl<T> IntoColumns for Column<T> {
    fn into_columns(self) -> Vec<ColumnRef> {
        vec![self.into()]
    }
}

impl IntoColumns for ColumnRef {
    fn into_columns(self) -> Vec<ColumnRef> {
        vec![self]
    }
}

impl IntoColumns for &ColumnRef {
    fn into_columns(self) -> Vec<ColumnRef> {
        vec![self.clone()]
    }
}

impl<C: Into<ColumnRef>, const N: usize> IntoColumns for [C; N] {
    fn into_columns(self) -> Vec<ColumnRef> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<C: Into<ColumnRef>> IntoColumns for Vec<C> {
    fn into_columns(self) -> Vec<ColumnRef> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<C: Into<ColumnRef> + Clone> IntoColumns for &[C] {
    fn into_columns(self) -> Vec<ColumnRef> {
        self.iter().cloned().map(Into::into).collect()
    }
}

macro_rules! impl_into_columns_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<ColumnRef>),+> IntoColumns for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_columns(self) -> Vec<ColumnRef> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_into_columns_for_tuple!(A);
impl_into_columns_for_tuple!(A, B);
impl_into_columns_for_tuple!(A, B, C);
impl_into_columns_for_tuple!(A, B, C, D);
impl_into_columns_for_tuple!(A, B, C, D, E);
impl_into_columns_for_tuple!(A, B, C, D, E, F);
impl_into_columns_for_tuple!(A, B, C, D, E, F, G);
impl_into_columns_for_tuple!(A, B, C, D, E, F, G, H);
impl_into_columns_for_tuple!(A, B, C, D, E, F, G, H, I);
impl_into_columns_for_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_into_columns_for_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_into_columns_for_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Anything that can stand for a non-empty list of tables.
pub trait IntoTables {
    fn into_tables(self) -> Vec<Table>;
}

impl IntoTables for &Table {
    fn into_tables(self) -> Vec<Table> {
        vec![self.clone()]
    }
}

impl IntoTables for Table {
    fn into_tables(self) -> Vec<Table> {
        vec![self]
    }
}

impl<T: Into<Table>, const N: usize> IntoTables for [T; N] {
    fn into_tables(self) -> Vec<Table> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Table>> IntoTables for Vec<T> {
    fn into_tables(self) -> Vec<Table> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Table> + Clone> IntoTables for &[T] {
    fn into_tables(self) -> Vec<Table> {
        self.iter().cloned().map(Into::into).collect()
    }
}

/// Anything that can stand for a non-empty list of column values.
pub trait IntoColumnValues {
    fn into_column_values(self) -> Vec<ColumnValue>;
}

impl IntoColumnValues for ColumnValue {
    fn into_column_values(self) -> Vec<ColumnValue> {
        vec![self]
    }
}

impl IntoColumnValues for &ColumnValue {
    fn into_column_values(self) -> Vec<ColumnValue> {
        vec![self.clone()]
    }
}

impl<V: Into<ColumnValue>, const N: usize> IntoColumnValues for [V; N] {
    fn into_column_values(self) -> Vec<ColumnValue> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<V: Into<ColumnValue>> IntoColumnValues for Vec<V> {
    fn into_column_values(self) -> Vec<ColumnValue> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<V: Into<ColumnValue> + Clone> IntoColumnValues for &[V] {
    fn into_column_values(self) -> Vec<ColumnValue> {
        self.iter().cloned().map(Into::into).collect()
    }
}
