use crate::{
    db::filter::{Clause, Cmp, Filter},
    traits::{FieldValues, Record, field_slot},
    value::{TextMode, Value, compare_eq, compare_order},
};
use std::cmp::Ordering;

///
/// FilterProgram
///
/// Slot-resolved filter for runtime row evaluation.
/// Clause field names are resolved against the record's declared fields
/// once at compile; evaluation walks the resolved tree per record.
///

#[derive(Clone, Debug)]
pub struct FilterProgram {
    resolved: Resolved,
    fields: &'static [&'static str],
}

impl FilterProgram {
    /// Compile a filter against a record type's field list.
    #[must_use]
    pub fn compile<E: Record>(filter: &Filter) -> Self {
        Self {
            resolved: resolve::<E>(filter),
            fields: E::FIELDS,
        }
    }

    /// Evaluate the compiled filter against one record.
    #[must_use]
    pub fn eval<E: FieldValues>(&self, record: &E) -> bool {
        eval_resolved(record, self.fields, &self.resolved)
    }
}

///
/// Resolved
///

#[derive(Clone, Debug)]
enum Resolved {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Clause {
        slot: Option<usize>,
        cmp: Cmp,
        value: Value,
    },
}

fn resolve<E: Record>(filter: &Filter) -> Resolved {
    match filter {
        Filter::True => Resolved::True,
        Filter::False => Resolved::False,
        Filter::And(children) => Resolved::And(children.iter().map(resolve::<E>).collect()),
        Filter::Or(children) => Resolved::Or(children.iter().map(resolve::<E>).collect()),
        Filter::Not(inner) => Resolved::Not(Box::new(resolve::<E>(inner))),
        Filter::Clause(Clause { field, cmp, value }) => Resolved::Clause {
            slot: field_slot(E::FIELDS, field),
            cmp: *cmp,
            value: value.clone(),
        },
    }
}

fn eval_resolved<E: FieldValues>(record: &E, fields: &[&str], resolved: &Resolved) -> bool {
    match resolved {
        Resolved::True => true,
        Resolved::False => false,
        Resolved::And(children) => children
            .iter()
            .all(|child| eval_resolved(record, fields, child)),
        Resolved::Or(children) => children
            .iter()
            .any(|child| eval_resolved(record, fields, child)),
        Resolved::Not(inner) => !eval_resolved(record, fields, inner),
        Resolved::Clause { slot, cmp, value } => {
            let Some(actual) = slot.and_then(|s| record.get_value(fields[s])) else {
                return false;
            };

            eval_cmp(&actual, *cmp, value)
        }
    }
}

// Invalid comparisons evaluate to false, never to an error.
fn eval_cmp(actual: &Value, cmp: Cmp, value: &Value) -> bool {
    match cmp {
        Cmp::Eq => compare_eq(actual, value).unwrap_or(false),
        Cmp::Ne => compare_eq(actual, value).is_some_and(|v| !v),

        Cmp::Lt => compare_order(actual, value).is_some_and(Ordering::is_lt),
        Cmp::Lte => compare_order(actual, value).is_some_and(Ordering::is_le),
        Cmp::Gt => compare_order(actual, value).is_some_and(Ordering::is_gt),
        Cmp::Gte => compare_order(actual, value).is_some_and(Ordering::is_ge),

        Cmp::Contains => actual.text_contains(value, TextMode::Cs).unwrap_or(false),
        Cmp::ContainsCi => actual.text_contains(value, TextMode::Ci).unwrap_or(false),
        Cmp::StartsWith => actual
            .text_starts_with(value, TextMode::Cs)
            .unwrap_or(false),

        Cmp::In => in_list(actual, value),
    }
}

fn in_list(actual: &Value, list: &Value) -> bool {
    let Some(items) = list.as_list() else {
        return false;
    };

    items
        .iter()
        .any(|item| compare_eq(actual, item).unwrap_or(false))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{Person, people};

    fn eval_on(filter: &Filter, person: &Person) -> bool {
        FilterProgram::compile::<Person>(filter).eval(person)
    }

    #[test]
    fn true_matches_every_record() {
        let program = FilterProgram::compile::<Person>(&Filter::True);
        for person in people() {
            assert!(program.eval(&person));
        }
    }

    #[test]
    fn false_matches_no_record() {
        let program = FilterProgram::compile::<Person>(&Filter::False);
        for person in people() {
            assert!(!program.eval(&person));
        }
    }

    #[test]
    fn eq_on_uint_field() {
        let filter = Filter::eq("department_id", 3u64);
        let matched: Vec<_> = people().into_iter().filter(|p| eval_on(&filter, p)).collect();

        assert!(matched.iter().all(|p| p.department_id == Some(3)));
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn contains_matches_substring_anywhere() {
        let roster = people();
        let filter = Filter::contains("name", "ang");

        assert!(eval_on(&filter, &roster[0])); // "Zhang San"
        assert!(!eval_on(&filter, &roster[2])); // "Li Wei"
    }

    #[test]
    fn contains_is_case_sensitive_and_ci_variant_is_not() {
        let roster = people();
        let person = &roster[0];

        assert!(!eval_on(&Filter::contains("name", "zhang"), person));
        assert!(eval_on(&Filter::contains_ci("name", "zhang"), person));
    }

    #[test]
    fn and_is_intersection() {
        let filter = Filter::contains("name", "Li").and(Filter::eq("department_id", 3u64));
        let matched: Vec<_> = people().into_iter().filter(|p| eval_on(&filter, p)).collect();

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Li Wei");
    }

    #[test]
    fn unknown_field_clause_is_false() {
        let filter = Filter::eq("no_such_field", 1u64);

        for person in people() {
            assert!(!eval_on(&filter, &person));
        }
    }

    #[test]
    fn type_mismatched_clause_is_false_not_an_error() {
        let filter = Filter::contains("department_id", "3");

        for person in people() {
            assert!(!eval_on(&filter, &person));
        }
    }

    #[test]
    fn null_field_never_matches_eq() {
        let roster = people();
        let filter = Filter::eq("department_id", 1u64);
        let unassigned = &roster[3]; // department_id: None

        assert!(!eval_on(&filter, unassigned));
    }

    #[test]
    fn in_list_membership() {
        let filter = Filter::in_iter("department_id", [1u64, 3u64]);
        let matched = people().into_iter().filter(|p| eval_on(&filter, p)).count();

        assert_eq!(matched, 3);
    }

    #[test]
    fn not_inverts_clause_matches() {
        let inner = Filter::contains("name", "Zhang");
        let filter = inner.clone().not();

        for person in people() {
            assert_ne!(eval_on(&filter, &person), eval_on(&inner, &person));
        }
    }

    #[test]
    fn gte_lte_bound_numeric_fields() {
        let filter = Filter::gte("age", 30u32).and(Filter::lte("age", 40u32));
        let matched: Vec<_> = people().into_iter().filter(|p| eval_on(&filter, p)).collect();

        assert!(matched.iter().all(|p| (30..=40).contains(&p.age)));
        assert!(!matched.is_empty());
    }
}
