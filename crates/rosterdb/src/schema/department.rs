use rosterdb_core::{
    db::Key,
    traits::{FieldValues, Record},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// Department
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Department {
    pub id: u64,
    pub name: String,
}

impl Department {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Record for Department {
    const ENTITY_NAME: &'static str = "department";
    const PRIMARY_KEY: &'static str = "id";
    const FIELDS: &'static [&'static str] = &["id", "name"];

    fn key(&self) -> Key {
        Key::Uint(self.id)
    }
}

impl FieldValues for Department {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "name" => Some(Value::Text(self.name.clone())),
            _ => None,
        }
    }
}
