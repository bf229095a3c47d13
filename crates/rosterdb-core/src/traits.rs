use crate::{db::store::Key, value::Value};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

///
/// Record
///
/// Declared schema facts for a record type plus its key projection.
/// `FIELDS` is the full set of predicate-addressable field names;
/// clause field names are resolved against it once per query.
///

pub trait Record: Clone + Debug + DeserializeOwned + FieldValues + Serialize + Sized + 'static {
    const ENTITY_NAME: &'static str;
    const PRIMARY_KEY: &'static str;
    const FIELDS: &'static [&'static str];

    fn key(&self) -> Key;
}

/// Resolve a field name to its slot in a record's declared field list.
#[must_use]
pub fn field_slot(fields: &[&str], name: &str) -> Option<usize> {
    fields.iter().position(|field| *field == name)
}

///
/// FieldValues
///
/// Field-name → value projection for one record instance.
/// Returns None for names outside the record's schema.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// FieldValue
///
/// Conversion boundary for values on the right-hand side of predicates.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }

    fn from_value(_value: &Value) -> Option<Self> {
        None
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(ToString::to_string)
    }
}

impl FieldValue for Decimal {
    fn to_value(&self) -> Value {
        Value::Decimal(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for NaiveTime {
    fn to_value(&self) -> Value {
        Value::Time(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Time(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

// impl_field_value
#[macro_export]
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    bool => Bool,
);

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_slot_resolves_declared_names() {
        let fields = ["id", "name", "age"];

        assert_eq!(field_slot(&fields, "name"), Some(1));
        assert_eq!(field_slot(&fields, "missing"), None);
    }

    #[test]
    fn primitive_conversions_round_trip() {
        assert_eq!(42u32.to_value(), Value::Uint(42));
        assert_eq!(u32::from_value(&Value::Uint(42)), Some(42));
        assert_eq!((-3i64).to_value(), Value::Int(-3));
        assert_eq!(i64::from_value(&Value::Uint(1)), None);
    }

    #[test]
    fn option_absence_maps_to_null() {
        let absent: Option<u64> = None;

        assert_eq!(absent.to_value(), Value::Null);
        assert_eq!(Option::<u64>::from_value(&Value::Null), Some(None));
        assert_eq!(Option::<u64>::from_value(&Value::Uint(9)), Some(Some(9)));
    }

    #[test]
    fn narrowing_conversion_failure_is_none() {
        assert_eq!(u8::from_value(&Value::Uint(300)), None);
    }
}
