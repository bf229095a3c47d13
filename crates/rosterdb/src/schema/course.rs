use chrono::NaiveTime;
use rosterdb_core::{
    db::Key,
    traits::{FieldValues, Record},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// Course
///
/// `week_day` is 1–7 (Monday-first), validated by the directory on add.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub class_id: Option<String>,
    pub teacher_id: u64,
    pub week_day: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Record for Course {
    const ENTITY_NAME: &'static str = "course";
    const PRIMARY_KEY: &'static str = "id";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "class_id",
        "teacher_id",
        "week_day",
        "start_time",
        "end_time",
    ];

    fn key(&self) -> Key {
        Key::Uint(self.id)
    }
}

impl FieldValues for Course {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "name" => Some(Value::Text(self.name.clone())),
            "class_id" => Some(
                self.class_id
                    .as_ref()
                    .map_or(Value::Null, |v| Value::Text(v.clone())),
            ),
            "teacher_id" => Some(Value::Uint(self.teacher_id)),
            "week_day" => Some(Value::Uint(u64::from(self.week_day))),
            "start_time" => Some(Value::Time(self.start_time)),
            "end_time" => Some(Value::Time(self.end_time)),
            _ => None,
        }
    }
}
