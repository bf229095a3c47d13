use crate::{error::Error, metrics};

///
/// Resolution
///
/// Terminal outcome of an exact-then-fuzzy lookup. Exactly one variant
/// per call; `Missing` is a normal outcome, not an error, and carries the
/// exact lookup's original message so callers surface the root cause.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution<T> {
    Exact(T),
    Fuzzy(Vec<T>),
    Missing { message: String },
}

impl<T> Resolution<T> {
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }

    #[must_use]
    pub const fn is_fuzzy(&self) -> bool {
        matches!(self, Self::Fuzzy(_))
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// Flatten into the matched records, in match order.
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        match self {
            Self::Exact(record) => vec![record],
            Self::Fuzzy(records) => records,
            Self::Missing { .. } => Vec::new(),
        }
    }
}

/// Resolve a human-facing key, preferring precision over recall.
///
/// Runs `exact(key)` first and stops there on a hit. Only a not-found
/// error falls through to `fuzzy(key)`; any other error from either
/// lookup propagates unchanged. An empty fuzzy result yields `Missing`
/// with the exact lookup's message verbatim.
pub fn resolve<T, X, F>(key: &str, exact: X, fuzzy: F) -> Result<Resolution<T>, Error>
where
    X: FnOnce(&str) -> Result<T, Error>,
    F: FnOnce(&str) -> Result<Vec<T>, Error>,
{
    let miss = match exact(key) {
        Ok(record) => {
            metrics::record_resolution(metrics::ResolveOutcome::Exact);
            return Ok(Resolution::Exact(record));
        }
        Err(err) if err.is_not_found() => err,
        Err(err) => return Err(err),
    };

    let matches = fuzzy(key)?;
    if matches.is_empty() {
        metrics::record_resolution(metrics::ResolveOutcome::Missing);
        Ok(Resolution::Missing {
            message: miss.message,
        })
    } else {
        metrics::record_resolution(metrics::ResolveOutcome::Fuzzy);
        Ok(Resolution::Fuzzy(matches))
    }
}

///
/// TESTS
///
