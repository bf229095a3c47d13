use crate::{
    db::store::Key,
    error::{Error, ErrorClass, ErrorOrigin},
    traits::Record,
};
use thiserror::Error as ThisError;

///
/// ResponseError
/// Errors related to interpreting a materialized response.
///

#[derive(Debug, ThisError)]
pub enum ResponseError {
    #[error("expected exactly one row, found 0 (entity {entity})")]
    NotFound { entity: &'static str },

    #[error("expected exactly one row, found {count} (entity {entity})")]
    NotUnique { entity: &'static str, count: u32 },
}

impl From<ResponseError> for Error {
    fn from(err: ResponseError) -> Self {
        let class = match err {
            ResponseError::NotFound { .. } => ErrorClass::NotFound,
            ResponseError::NotUnique { .. } => ErrorClass::InvariantViolation,
        };

        Self::new(class, ErrorOrigin::Response, err.to_string())
    }
}

///
/// Response
/// Materialized query result: ordered `(Key, Record)` pairs.
///

#[derive(Debug)]
pub struct Response<E: Record>(pub Vec<(Key, E)>);

impl<E: Record> Response<E> {
    //
    // Cardinality
    //

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn count(&self) -> u32 {
        self.0.len() as u32
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Require exactly one row.
    pub fn one(self) -> Result<(Key, E), Error> {
        let count = self.count();

        match count {
            0 => Err(ResponseError::NotFound {
                entity: E::ENTITY_NAME,
            }
            .into()),
            1 => Ok(self.0.into_iter().next().unwrap()),
            _ => Err(ResponseError::NotUnique {
                entity: E::ENTITY_NAME,
                count,
            }
            .into()),
        }
    }

    /// Require exactly one record.
    pub fn one_record(self) -> Result<E, Error> {
        self.one().map(|(_, e)| e)
    }

    /// Require at most one row.
    pub fn one_opt(self) -> Result<Option<(Key, E)>, Error> {
        let count = self.count();

        match count {
            0 => Ok(None),
            1 => Ok(Some(self.0.into_iter().next().unwrap())),
            _ => Err(ResponseError::NotUnique {
                entity: E::ENTITY_NAME,
                count,
            }
            .into()),
        }
    }

    /// Require at most one record.
    pub fn one_opt_record(self) -> Result<Option<E>, Error> {
        Ok(self.one_opt()?.map(|(_, e)| e))
    }

    //
    // Projection
    //

    #[must_use]
    pub fn first(&self) -> Option<&E> {
        self.0.first().map(|(_, e)| e)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        self.0.iter().map(|(key, _)| key.clone()).collect()
    }

    #[must_use]
    pub fn records(self) -> Vec<E> {
        self.0.into_iter().map(|(_, e)| e).collect()
    }

    pub fn records_iter(self) -> impl Iterator<Item = E> {
        self.0.into_iter().map(|(_, e)| e)
    }
}

impl<E: Record> IntoIterator for Response<E> {
    type Item = (Key, E);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

///
/// TESTS
///
