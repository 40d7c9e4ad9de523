//! Boolean conditions for WHERE clauses.
//!
//! A [`Filter`] is an immutable SQL fragment with `?` placeholders plus the
//! values for those placeholders, in order. Leaf filters come from
//! [`Column`](crate::Column) comparisons; [`Filter::and`], [`Filter::or`] and
//! [`Filter::negate`] combine them into new filters.
//!
//! Grouping follows call nesting, not SQL precedence. The result of an AND/OR
//! is marked composite and gets wrapped in parentheses whenever it is used as
//! the right operand of another AND/OR or as the operand of NOT:
//!
//! ```rust
//! use sqlstage::Column;
//!
//! const A: Column<i64> = Column::new("A");
//! const B: Column<i64> = Column::new("B");
//! const C: Column<i64> = Column::new("C");
//!
//! let f = A.equal_to(1).and(B.equal_to(2).or(C.equal_to(3)));
//! assert_eq!(f.condition(), "A = ?\n    AND (B = ?\n     OR C = ?)");
//!
//! let g = A.equal_to(1).and(B.equal_to(2)).or(C.equal_to(3));
//! assert_eq!(g.condition(), "A = ?\n    AND B = ?\n     OR C = ?");
//! ```

use crate::error::{SqlError, SqlResult};
use crate::ident::count_placeholders;
use crate::value::Value;
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::ops::Not;

/// Separator placed before a right-hand AND operand.
const AND_SEP: &str = "\n    AND ";
/// OR is indented one column further so the keywords right-align with AND.
const OR_SEP: &str = "\n     OR ";

/// An immutable WHERE condition with its bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    condition: String,
    params: Vec<Value>,
    composite: bool,
}

impl Filter {
    /// A leaf condition; `params` must match the `?` count of `condition`.
    pub(crate) fn leaf(condition: String, params: Vec<Value>) -> Self {
        debug_assert_eq!(count_placeholders(&condition), params.len());
        Self {
            condition,
            params,
            composite: false,
        }
    }

    /// Build a leaf condition from a hand-written fragment.
    ///
    /// The number of `?` placeholders outside quoted literals must equal the
    /// number of values.
    ///
    /// ```rust
    /// use sqlstage::Filter;
    ///
    /// let f = Filter::template("LOWER(NAME) = LOWER(?)", ["Alice"]).unwrap();
    /// assert_eq!(f.params().len(), 1);
    /// assert!(Filter::template("A = ? AND B = ?", [1]).is_err());
    /// ```
    pub fn template<I, V>(condition: impl Into<String>, params: I) -> SqlResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let condition = condition.into();
        if condition.trim().is_empty() {
            return Err(SqlError::invalid_argument("filter condition cannot be empty"));
        }
        let params: Vec<Value> = params.into_iter().map(Into::into).collect();
        let placeholders = count_placeholders(&condition);
        if placeholders != params.len() {
            return Err(SqlError::invalid_argument(format!(
                "filter has {placeholders} placeholders but {} values",
                params.len()
            )));
        }
        Ok(Self::leaf(condition, params))
    }

    /// The SQL fragment.
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Bound values, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Whether this filter is the direct result of an AND/OR.
    pub fn is_composite(&self) -> bool {
        self.composite
    }

    /// Logical AND of `self` and `other`.
    pub fn and(&self, other: impl Borrow<Filter>) -> Filter {
        self.combine(AND_SEP, other.borrow())
    }

    /// Logical OR of `self` and `other`.
    pub fn or(&self, other: impl Borrow<Filter>) -> Filter {
        self.combine(OR_SEP, other.borrow())
    }

    /// Logical NOT of `self`.
    ///
    /// The result is not composite: `NOT (...)` or `NOT leaf` is already a
    /// single operand.
    pub fn negate(&self) -> Filter {
        Filter {
            condition: format!("NOT {}", self.grouped()),
            params: self.params.clone(),
            composite: false,
        }
    }

    fn combine(&self, sep: &str, other: &Filter) -> Filter {
        let rhs = other.grouped();
        let mut condition = String::with_capacity(self.condition.len() + sep.len() + rhs.len());
        condition.push_str(&self.condition);
        condition.push_str(sep);
        condition.push_str(&rhs);

        let mut params = Vec::with_capacity(self.params.len() + other.params.len());
        params.extend(self.params.iter().cloned());
        params.extend(other.params.iter().cloned());

        Filter {
            condition,
            params,
            composite: true,
        }
    }

    fn grouped(&self) -> Cow<'_, str> {
        if self.composite {
            Cow::Owned(format!("({})", self.condition))
        } else {
            Cow::Borrowed(&self.condition)
        }
    }
}

impl Not for Filter {
    type Output = Filter;

    fn not(self) -> Filter {
        self.negate()
    }
}

impl Not for &Filter {
    type Output = Filter;

    fn not(self) -> Filter {
        self.negate()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.condition)
    }
}
