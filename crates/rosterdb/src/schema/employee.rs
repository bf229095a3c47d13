use chrono::NaiveDate;
use rosterdb_core::{
    db::Key,
    traits::{FieldValue, FieldValues, Record},
    value::Value,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Gender
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FieldValue for Gender {
    fn to_value(&self) -> Value {
        Value::Text(self.as_str().to_string())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value.as_text()? {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

///
/// Employee
///
/// `username` and `employee_number` are unique identities enforced by the
/// directory, not by the store.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub employee_number: String,
    pub gender: Gender,
    pub age: u32,
    pub department_id: Option<u64>,
    pub position: Option<String>,
    pub salary: Option<Decimal>,
    pub hire_date: Option<NaiveDate>,
}

impl Record for Employee {
    const ENTITY_NAME: &'static str = "employee";
    const PRIMARY_KEY: &'static str = "id";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "username",
        "employee_number",
        "gender",
        "age",
        "department_id",
        "position",
        "salary",
        "hire_date",
    ];

    fn key(&self) -> Key {
        Key::Uint(self.id)
    }
}

impl FieldValues for Employee {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "name" => Some(Value::Text(self.name.clone())),
            "username" => Some(Value::Text(self.username.clone())),
            "employee_number" => Some(Value::Text(self.employee_number.clone())),
            "gender" => Some(self.gender.to_value()),
            "age" => Some(Value::Uint(u64::from(self.age))),
            "department_id" => Some(self.department_id.map_or(Value::Null, Value::Uint)),
            "position" => Some(
                self.position
                    .as_ref()
                    .map_or(Value::Null, |v| Value::Text(v.clone())),
            ),
            "salary" => Some(self.salary.map_or(Value::Null, Value::Decimal)),
            "hire_date" => Some(self.hire_date.map_or(Value::Null, Value::Date)),
            _ => None,
        }
    }
}
