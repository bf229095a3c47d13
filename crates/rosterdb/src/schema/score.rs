use crate::schema::STATUS_ACTIVE;
use rosterdb_core::{
    db::Key,
    traits::{FieldValues, Record},
    value::Value,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

///
/// Score
///
/// One exam result. `(student_id, course_id, exam_type, semester)` is
/// unique among active rows; the score book enforces it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Score {
    pub id: u64,
    pub student_id: u64,
    pub course_id: u64,
    pub exam_type: String,
    pub score: Decimal,
    pub semester: String,
    pub status: u8,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            id: 0,
            student_id: 0,
            course_id: 0,
            exam_type: String::new(),
            score: Decimal::ZERO,
            semester: String::new(),
            status: STATUS_ACTIVE,
        }
    }
}

impl Record for Score {
    const ENTITY_NAME: &'static str = "score";
    const PRIMARY_KEY: &'static str = "id";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "student_id",
        "course_id",
        "exam_type",
        "score",
        "semester",
        "status",
    ];

    fn key(&self) -> Key {
        Key::Uint(self.id)
    }
}

impl FieldValues for Score {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "student_id" => Some(Value::Uint(self.student_id)),
            "course_id" => Some(Value::Uint(self.course_id)),
            "exam_type" => Some(Value::Text(self.exam_type.clone())),
            "score" => Some(Value::Decimal(self.score)),
            "semester" => Some(Value::Text(self.semester.clone())),
            "status" => Some(Value::Uint(u64::from(self.status))),
            _ => None,
        }
    }
}
