
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, mem::discriminant};

///
/// TextMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextMode {
    Cs, // case-sensitive
    Ci, // case-insensitive
}

///
/// Value
///
/// The value universe for record fields and predicate operands.
///
/// Null → the field's value is Option::None.
/// List → predicate right-hand side for membership tests.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    List(Vec<Self>),
}

impl Value {
    // --- Accessors ---

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Widen a numeric variant into a `Decimal`.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Int(v) => Some(Decimal::from(*v)),
            Self::Uint(v) => Some(Decimal::from(*v)),
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn supports_numeric_coercion(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Uint(_) | Self::Decimal(_))
    }

    // --- Text operations ---

    /// Check whether `self` contains `needle` as a substring under the given text mode.
    #[must_use]
    pub fn text_contains(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(needle, mode, |a, b| a.contains(b))
    }

    /// Check whether `self` starts with `needle` under the given text mode.
    #[must_use]
    pub fn text_starts_with(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(needle, mode, |a, b| a.starts_with(b))
    }

    fn text_op(&self, needle: &Self, mode: TextMode, op: fn(&str, &str) -> bool) -> Option<bool> {
        let (Self::Text(haystack), Self::Text(needle)) = (self, needle) else {
            return None;
        };

        match mode {
            TextMode::Cs => Some(op(haystack, needle)),
            TextMode::Ci => Some(op(&casefold(haystack), &casefold(needle))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{v}"),
            Self::List(xs) => {
                write!(f, "[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, "]")
            }
        }
    }
}

///
/// Comparison semantics
///
/// Equality and ordering are defined only where a comparison is meaningful:
/// same-variant comparisons, and numeric comparisons widened through Decimal.
/// Everything else yields None, which predicate evaluation treats as false.
///

/// Equality under value-comparison semantics.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    if same_variant(left, right) {
        return Some(left == right);
    }

    if left.supports_numeric_coercion() && right.supports_numeric_coercion() {
        return cmp_numeric(left, right).map(|ord| ord == Ordering::Equal);
    }

    None
}

/// Ordering under value-comparison semantics.
#[must_use]
pub fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    if same_variant(left, right) {
        return strict_order_cmp(left, right);
    }

    if left.supports_numeric_coercion() && right.supports_numeric_coercion() {
        return cmp_numeric(left, right);
    }

    None
}

/// Same-variant ordering for orderable variants.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Time(a), Value::Time(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn cmp_numeric(left: &Value, right: &Value) -> Option<Ordering> {
    let left = left.to_decimal()?;
    let right = right.to_decimal()?;

    Some(left.cmp(&right))
}

fn same_variant(left: &Value, right: &Value) -> bool {
    discriminant(left) == discriminant(right)
}

fn casefold(input: &str) -> String {
    if input.is_ascii() {
        return input.to_ascii_lowercase();
    }

    input.to_lowercase()
}
