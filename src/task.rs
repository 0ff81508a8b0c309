//! Task data structure and its serialized layout.
//!
//! This module defines the `Task` struct, the sole persisted entity. Tasks
//! serialize as camelCase JSON objects matching the on-disk `tasks.json`
//! layout, with optional fields omitted entirely when absent.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::fields::Category;

/// A dated to-do item.
///
/// `completed` is the only field that changes after creation; everything
/// else stays fixed until the task is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub category: Category,
    pub due_date: NaiveDate,
    #[serde(default, with = "clock_time", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Task {
    /// Schedule key used by the derived views. Tasks without a time sort as
    /// if scheduled at midnight on their due date.
    pub fn schedule_key(&self) -> (NaiveDate, NaiveTime) {
        (self.due_date, self.time.unwrap_or(NaiveTime::MIN))
    }
}

/// Serde adapter for optional `HH:MM` clock times.
///
/// Chrono's default `NaiveTime` format carries seconds; the stored layout
/// does not. Deserialization also accepts `HH:MM:SS` input.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
                .map(Some)
                .map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_camel_case_without_absent_fields() {
        let task = Task {
            id: 1722945600000,
            text: "Buy groceries".into(),
            completed: false,
            category: Category::Shopping,
            due_date: NaiveDate::from_ymd_opt(2024, 8, 6).unwrap(),
            time: None,
            location: None,
        };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"id":1722945600000,"text":"Buy groceries","completed":false,"category":"shopping","dueDate":"2024-08-06"}"#
        );
    }

    #[test]
    fn time_round_trips_as_hours_and_minutes() {
        let task = Task {
            id: 7,
            text: "Dentist".into(),
            completed: false,
            category: Category::Health,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            time: NaiveTime::from_hms_opt(9, 30, 0),
            location: None,
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains(r#""time":"09:30""#));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn deserializes_seconds_bearing_times() {
        let json = r#"{"id":1,"text":"Stand-up","completed":false,"category":"work","dueDate":"2024-03-01","time":"10:15:00"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.time, NaiveTime::from_hms_opt(10, 15, 0));
    }

    #[test]
    fn event_location_round_trips() {
        let json = r#"{"id":2,"text":"Concert","completed":true,"category":"event","dueDate":"2024-05-20","location":"Main St"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.location.as_deref(), Some("Main St"));
        let back = serde_json::to_string(&task).unwrap();
        assert!(back.contains(r#""location":"Main St""#));
    }
}
