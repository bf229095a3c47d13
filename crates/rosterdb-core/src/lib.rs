//! Core runtime for rosterdb: record traits, the value universe, filter
//! composition and evaluation, in-memory stores, the fluent load-query
//! surface, and the exact-then-fuzzy resolution protocol.

pub mod db;
pub mod error;
pub mod metrics;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Domain vocabulary only; errors and internals are imported from their
/// own modules.
///

pub mod prelude {
    pub use crate::{
        db::{Criteria, Filter, Key, Resolution, Store, resolve},
        traits::{FieldValue, FieldValues, Record},
        value::Value,
    };
}
