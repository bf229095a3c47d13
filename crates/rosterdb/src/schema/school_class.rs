use chrono::NaiveDate;
use rosterdb_core::{
    db::Key,
    traits::{FieldValue, FieldValues, Record},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ClassStatus
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum ClassStatus {
    #[default]
    Pending,
    Active,
    Finished,
    Cancelled,
}

impl ClassStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Finished => "FINISHED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FieldValue for ClassStatus {
    fn to_value(&self) -> Value {
        Value::Text(self.as_str().to_string())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value.as_text()? {
            "PENDING" => Some(Self::Pending),
            "ACTIVE" => Some(Self::Active),
            "FINISHED" => Some(Self::Finished),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

///
/// SchoolClass
///
/// Keyed by a string class id; the directory generates one when a class
/// is created without it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SchoolClass {
    pub class_id: String,
    pub name: String,
    pub classroom: Option<String>,
    pub grade: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ClassStatus,
    pub head_teacher_id: Option<u64>,
    pub description: Option<String>,
}

impl Record for SchoolClass {
    const ENTITY_NAME: &'static str = "class";
    const PRIMARY_KEY: &'static str = "class_id";
    const FIELDS: &'static [&'static str] = &[
        "class_id",
        "name",
        "classroom",
        "grade",
        "start_date",
        "end_date",
        "status",
        "head_teacher_id",
        "description",
    ];

    fn key(&self) -> Key {
        Key::Text(self.class_id.clone())
    }
}

impl FieldValues for SchoolClass {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "class_id" => Some(Value::Text(self.class_id.clone())),
            "name" => Some(Value::Text(self.name.clone())),
            "classroom" => Some(
                self.classroom
                    .as_ref()
                    .map_or(Value::Null, |v| Value::Text(v.clone())),
            ),
            "grade" => Some(Value::Text(self.grade.clone())),
            "start_date" => Some(self.start_date.map_or(Value::Null, Value::Date)),
            "end_date" => Some(self.end_date.map_or(Value::Null, Value::Date)),
            "status" => Some(self.status.to_value()),
            "head_teacher_id" => Some(self.head_teacher_id.map_or(Value::Null, Value::Uint)),
            "description" => Some(
                self.description
                    .as_ref()
                    .map_or(Value::Null, |v| Value::Text(v.clone())),
            ),
            _ => None,
        }
    }
}
