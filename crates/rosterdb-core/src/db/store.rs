use crate::{db::query::LoadQuery, error::Error, traits::Record};
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// Key
///
/// Primary-key material for stored records. Roster schemas use both
/// numeric identities and string identities (class ids), so the key is a
/// small closed union rather than a single primitive.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Key {
    Uint(u64),
    Text(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<u64> for Key {
    fn from(key: u64) -> Self {
        Self::Uint(key)
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self::Text(key.to_string())
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self::Text(key)
    }
}

///
/// Store
///
/// In-memory record store for one record type. Rows are held in key
/// order; scans and query results preserve that order unless an explicit
/// sort is requested.
///

#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Store<E: Record> {
    rows: BTreeMap<Key, E>,
}

impl<E: Record> Default for Store<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Record> Store<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// Begin a fluent load query over this store.
    #[must_use]
    pub const fn load(&self) -> LoadQuery<'_, E> {
        LoadQuery::new(self)
    }

    /// Fetch one record by key, with a store-origin not-found error on miss.
    pub fn try_get(&self, key: &Key) -> Result<E, Error> {
        self.rows
            .get(key)
            .cloned()
            .ok_or_else(|| Error::store_not_found(format!("{}/{key}", E::ENTITY_NAME)))
    }

    /// Insert a record under its own key, replacing any previous row.
    pub fn insert(&mut self, record: E) -> Option<E> {
        self.rows.insert(record.key(), record)
    }

    pub fn remove(&mut self, key: &Key) -> Option<E> {
        self.rows.remove(key)
    }

    pub fn records(&self) -> impl Iterator<Item = &E> {
        self.rows.values()
    }
}

///
/// TESTS
///
