use crate::{
    db::filter::Filter,
    traits::FieldValue,
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// Criterion
///
/// One present search input. Absent inputs never become criteria: the
/// builder drops `None` and blank text before anything reaches this type.
///
/// `AnyContains` is a single criterion that substring-matches one value
/// across several text fields (an OR group); between criteria the
/// combination is always AND.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Criterion {
    Exact { field: String, value: Value },
    Contains { field: String, value: String },
    AnyContains { fields: Vec<String>, value: String },
}

impl Criterion {
    fn to_filter(&self) -> Filter {
        match self {
            Self::Exact { field, value } => Filter::eq(field.clone(), value.clone()),
            Self::Contains { field, value } => Filter::contains(field.clone(), value.as_str()),
            Self::AnyContains { fields, value } => fields
                .iter()
                .map(|field| Filter::contains(field.clone(), value.as_str()))
                .reduce(Filter::or)
                .unwrap_or(Filter::False),
        }
    }
}

///
/// Criteria
///
/// Ordered set of optional search inputs for one record type.
///
/// Every setter takes an `Option`; `None` and blank text contribute
/// nothing. `compose` AND-folds whatever is present, and an empty set
/// composes to `Filter::True`: no filters means every record, not none.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Criteria {
    terms: Vec<Criterion>,
}

impl Criteria {
    #[must_use]
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an equality criterion when a value is supplied.
    ///
    /// Text values that are blank after trimming count as absent, matching
    /// the store collation's treatment of empty search boxes upstream.
    #[must_use]
    pub fn exact<V: FieldValue>(mut self, field: impl Into<String>, value: Option<V>) -> Self {
        let Some(value) = value else {
            return self;
        };

        let value = value.to_value();
        if is_blank(&value) {
            return self;
        }

        self.terms.push(Criterion::Exact {
            field: field.into(),
            value,
        });
        self
    }

    /// Add a substring criterion when a non-blank value is supplied.
    #[must_use]
    pub fn contains(mut self, field: impl Into<String>, value: Option<&str>) -> Self {
        let Some(value) = present_text(value) else {
            return self;
        };

        self.terms.push(Criterion::Contains {
            field: field.into(),
            value,
        });
        self
    }

    /// Add one keyword criterion substring-matched across several fields.
    #[must_use]
    pub fn any_contains(mut self, fields: &[&str], value: Option<&str>) -> Self {
        let Some(value) = present_text(value) else {
            return self;
        };

        self.terms.push(Criterion::AnyContains {
            fields: fields.iter().map(ToString::to_string).collect(),
            value,
        });
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn terms(&self) -> &[Criterion] {
        &self.terms
    }

    /// AND-fold the present criteria into one filter.
    #[must_use]
    pub fn compose(&self) -> Filter {
        self.terms
            .iter()
            .map(Criterion::to_filter)
            .reduce(Filter::and)
            .unwrap_or(Filter::True)
    }
}

fn present_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(s) => s.trim().is_empty(),
        _ => false,
    }
}

///
/// TESTS
///
