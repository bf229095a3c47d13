use crate::{
    db::{
        filter::{Filter, FilterProgram},
        response::Response,
        store::{Key, Store},
    },
    error::Error,
    metrics,
    traits::{FieldValues, Record, field_slot},
    value::{Value, compare_order},
};
use rust_decimal::Decimal;
use std::cmp::Ordering;

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

///
/// LoadQuery
///
/// Store-bound fluent load query.
///
/// Without `order_by`, results keep store (key) order. Explicit ordering
/// sorts by the named field's projected value with a key-ascending
/// tie-break; rows with no value for the field sort first.
///

pub struct LoadQuery<'a, E: Record> {
    store: &'a Store<E>,
    filter: Option<Filter>,
    order: Option<(String, Direction)>,
    limit: Option<u32>,
    offset: u32,
}

impl<'a, E: Record> LoadQuery<'a, E> {
    #[must_use]
    pub(crate) const fn new(store: &'a Store<E>) -> Self {
        Self {
            store,
            filter: None,
            order: None,
            limit: None,
            offset: 0,
        }
    }

    // ------------------------------------------------------------------
    // Query refinement
    // ------------------------------------------------------------------

    /// Add a filter; repeated calls AND-combine.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(filter),
            None => filter,
        });
        self
    }

    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order = Some((field.into(), Direction::Asc));
        self
    }

    #[must_use]
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order = Some((field.into(), Direction::Desc));
        self
    }

    /// Bound the number of returned rows.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip a number of rows in the ordered result stream.
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Execute and materialize matching rows.
    pub fn execute(&self) -> Result<Response<E>, Error> {
        self.validate_order_field()?;

        let mut rows = self.scan();

        if let Some((field, direction)) = &self.order {
            sort_rows(&mut rows, field, *direction);
        }

        let rows: Vec<_> = rows
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit.map_or(usize::MAX, |l| l as usize))
            .collect();

        Ok(Response(rows))
    }

    /// Execute and return the number of matching rows.
    #[allow(clippy::cast_possible_truncation)]
    pub fn count(&self) -> Result<u32, Error> {
        self.validate_order_field()?;

        Ok(self.scan().len() as u32)
    }

    /// Execute and return whether at least one matching row exists.
    pub fn exists(&self) -> Result<bool, Error> {
        self.validate_order_field()?;

        let program = self.program();
        let exists = self.store.records().any(|record| program.eval(record));
        metrics::record_query(self.store.len() as u64);

        Ok(exists)
    }

    /// Execute and return the mean of `field` over matching rows that
    /// project a numeric value. `None` when no such row exists.
    pub fn avg_by(&self, field: impl AsRef<str>) -> Result<Option<Decimal>, Error> {
        let field = field.as_ref();
        self.validate_order_field()?;
        ensure_known_field::<E>(field)?;

        let values: Vec<Decimal> = self
            .scan()
            .iter()
            .filter_map(|(_, record)| record.get_value(field))
            .filter_map(|value| value.to_decimal())
            .collect();

        if values.is_empty() {
            return Ok(None);
        }

        let sum: Decimal = values.iter().sum();
        Ok(Some(sum / Decimal::from(values.len() as u64)))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn program(&self) -> FilterProgram {
        FilterProgram::compile::<E>(self.filter.as_ref().unwrap_or(&Filter::True))
    }

    fn scan(&self) -> Vec<(Key, E)> {
        let program = self.program();
        let rows: Vec<_> = self
            .store
            .iter()
            .filter(|(_, record)| program.eval(*record))
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect();

        metrics::record_query(self.store.len() as u64);

        rows
    }

    fn validate_order_field(&self) -> Result<(), Error> {
        match &self.order {
            Some((field, _)) => ensure_known_field::<E>(field),
            None => Ok(()),
        }
    }
}

fn ensure_known_field<E: Record>(field: &str) -> Result<(), Error> {
    if field_slot(E::FIELDS, field).is_none() {
        return Err(Error::query_invariant(format!(
            "unknown field '{field}' for entity {}",
            E::ENTITY_NAME
        )));
    }

    Ok(())
}

fn sort_rows<E: Record>(rows: &mut [(Key, E)], field: &str, direction: Direction) {
    rows.sort_by(|(a_key, a), (b_key, b)| {
        let ord = cmp_projected(a.get_value(field), b.get_value(field));
        let ord = match direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        };

        ord.then_with(|| a_key.cmp(b_key))
    });
}

// Missing/Null values sort before present ones; incomparable pairs fall
// through to the key tie-break.
fn cmp_projected(a: Option<Value>, b: Option<Value>) -> Ordering {
    match (present(a), present(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_order(&a, &b).unwrap_or(Ordering::Equal),
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::people_store;

    #[test]
    fn no_filter_returns_every_row_in_key_order() {
        let store = people_store();
        let response = store.load().execute().unwrap();

        assert_eq!(response.count(), 5);
        let ids: Vec<u64> = response.records_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn filter_narrows_rows() {
        let store = people_store();
        let response = store
            .load()
            .filter(Filter::eq("department_id", 3u64))
            .execute()
            .unwrap();

        assert_eq!(response.count(), 2);
    }

    #[test]
    fn repeated_filter_calls_and_combine() {
        let store = people_store();
        let response = store
            .load()
            .filter(Filter::contains("name", "Li"))
            .filter(Filter::eq("department_id", 3u64))
            .execute()
            .unwrap();

        assert_eq!(response.count(), 1);
        assert_eq!(response.first().unwrap().name, "Li Wei");
    }

    #[test]
    fn order_by_sorts_by_field_value() {
        let store = people_store();
        let response = store.load().order_by("age").execute().unwrap();

        let ages: Vec<u32> = response.records_iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![29, 34, 38, 44, 51]);
    }

    #[test]
    fn order_by_desc_reverses() {
        let store = people_store();
        let response = store.load().order_by_desc("age").execute().unwrap();

        let ages: Vec<u32> = response.records_iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![51, 44, 38, 34, 29]);
    }

    #[test]
    fn null_values_sort_first_ascending() {
        let store = people_store();
        let response = store.load().order_by("department_id").execute().unwrap();

        assert_eq!(response.first().unwrap().id, 4); // department_id: None
    }

    #[test]
    fn limit_and_offset_window_the_rows() {
        let store = people_store();
        let response = store
            .load()
            .order_by("id")
            .offset(1)
            .limit(2)
            .execute()
            .unwrap();

        let ids: Vec<u64> = response.records_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn unknown_order_field_is_a_query_error() {
        let store = people_store();
        let err = store.load().order_by("no_such_field").execute().unwrap_err();

        assert!(err.message.contains("unknown field"));
    }

    #[test]
    fn count_and_exists_agree_with_execute() {
        let store = people_store();
        let filter = Filter::contains("name", "Zhang");

        assert_eq!(store.load().filter(filter.clone()).count().unwrap(), 2);
        assert!(store.load().filter(filter).exists().unwrap());
        assert!(
            !store
                .load()
                .filter(Filter::contains("name", "Nonexistent"))
                .exists()
                .unwrap()
        );
    }

    #[test]
    fn avg_by_means_numeric_projections() {
        let store = people_store();
        let avg = store.load().avg_by("age").unwrap().unwrap();

        assert_eq!(avg, Decimal::from(196u64) / Decimal::from(5u64));
    }

    #[test]
    fn avg_by_on_empty_match_is_none() {
        let store = people_store();
        let avg = store
            .load()
            .filter(Filter::False)
            .avg_by("age")
            .unwrap();

        assert!(avg.is_none());
    }

    #[test]
    fn identical_queries_return_identical_ordered_results() {
        let store = people_store();
        let filter = Filter::contains("name", "a").and(Filter::gte("age", 30u32));

        let first: Vec<u64> = store
            .load()
            .filter(filter.clone())
            .execute()
            .unwrap()
            .records_iter()
            .map(|p| p.id)
            .collect();
        let second: Vec<u64> = store
            .load()
            .filter(filter)
            .execute()
            .unwrap()
            .records_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(first, second);
    }
}
