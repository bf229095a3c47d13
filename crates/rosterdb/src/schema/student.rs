use crate::schema::{Gender, STATUS_ACTIVE};
use chrono::NaiveDate;
use rosterdb_core::{
    db::Key,
    traits::{FieldValue, FieldValues, Record},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// Student
///
/// `student_number` is the human-facing identity; `id` is the storage
/// key. `status` defaults to active.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Student {
    pub id: u64,
    pub student_number: String,
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub phone_number: String,
    pub id_card: Option<String>,
    pub address: Option<String>,
    pub education: Option<String>,
    pub graduation_date: Option<NaiveDate>,
    pub class_id: Option<String>,
    pub status: u8,
}

impl Default for Student {
    fn default() -> Self {
        Self {
            id: 0,
            student_number: String::new(),
            name: String::new(),
            gender: Gender::default(),
            age: 0,
            phone_number: String::new(),
            id_card: None,
            address: None,
            education: None,
            graduation_date: None,
            class_id: None,
            status: STATUS_ACTIVE,
        }
    }
}

impl Record for Student {
    const ENTITY_NAME: &'static str = "student";
    const PRIMARY_KEY: &'static str = "id";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "student_number",
        "name",
        "gender",
        "age",
        "phone_number",
        "id_card",
        "address",
        "education",
        "graduation_date",
        "class_id",
        "status",
    ];

    fn key(&self) -> Key {
        Key::Uint(self.id)
    }
}

impl FieldValues for Student {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "student_number" => Some(Value::Text(self.student_number.clone())),
            "name" => Some(Value::Text(self.name.clone())),
            "gender" => Some(self.gender.to_value()),
            "age" => Some(Value::Uint(u64::from(self.age))),
            "phone_number" => Some(Value::Text(self.phone_number.clone())),
            "id_card" => Some(text_or_null(self.id_card.as_deref())),
            "address" => Some(text_or_null(self.address.as_deref())),
            "education" => Some(text_or_null(self.education.as_deref())),
            "graduation_date" => Some(self.graduation_date.map_or(Value::Null, Value::Date)),
            "class_id" => Some(text_or_null(self.class_id.as_deref())),
            "status" => Some(Value::Uint(u64::from(self.status))),
            _ => None,
        }
    }
}

fn text_or_null(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::Text(v.to_string()))
}
