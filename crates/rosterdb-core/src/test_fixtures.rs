//! Shared test records for engine-level suites.

use crate::{
    db::store::{Key, Store},
    traits::{FieldValues, Record},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// Person
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub position: Option<String>,
    pub department_id: Option<u64>,
    pub age: u32,
}

impl Record for Person {
    const ENTITY_NAME: &'static str = "person";
    const PRIMARY_KEY: &'static str = "id";
    const FIELDS: &'static [&'static str] = &["id", "name", "position", "department_id", "age"];

    fn key(&self) -> Key {
        Key::Uint(self.id)
    }
}

impl FieldValues for Person {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "name" => Some(Value::Text(self.name.clone())),
            "position" => Some(
                self.position
                    .as_ref()
                    .map_or(Value::Null, |v| Value::Text(v.clone())),
            ),
            "department_id" => Some(self.department_id.map_or(Value::Null, Value::Uint)),
            "age" => Some(Value::Uint(u64::from(self.age))),
            _ => None,
        }
    }
}

fn person(id: u64, name: &str, position: Option<&str>, department_id: Option<u64>, age: u32) -> Person {
    Person {
        id,
        name: name.to_string(),
        position: position.map(ToString::to_string),
        department_id,
        age,
    }
}

/// Five-person roster: two in department 3, one of those with "Li" in the name.
pub fn people() -> Vec<Person> {
    vec![
        person(1, "Zhang San", Some("Lecturer"), Some(1), 34),
        person(2, "Zhang Wei", Some("Professor"), Some(3), 51),
        person(3, "Li Wei", Some("Lecturer"), Some(3), 29),
        person(4, "Wang Fang", None, None, 44),
        person(5, "Li Na", Some("Registrar"), Some(2), 38),
    ]
}

pub fn people_store() -> Store<Person> {
    let mut store = Store::new();
    for person in people() {
        store.insert(person);
    }

    store
}
