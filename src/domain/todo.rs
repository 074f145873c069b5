use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValidationError;

/// Opaque record identifier. New ids are random v4 UUIDs, but any string read back
/// from storage is accepted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoId(pub String);

impl TodoId {
    pub fn new() -> Self { Self(Uuid::new_v4().to_string()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for TodoId {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    #[default]
    Specific,
    Duration,
}

impl TimeMode {
    pub fn toggled(self) -> Self {
        match self { TimeMode::Specific => TimeMode::Duration, TimeMode::Duration => TimeMode::Specific }
    }

    pub fn label(self) -> &'static str {
        match self { TimeMode::Specific => "Specific time", TimeMode::Duration => "Duration" }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self { Priority::Low => "Low", Priority::Medium => "Medium", Priority::High => "High" }
    }

    /// Next priority in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self { Priority::Low => Priority::Medium, Priority::Medium => Priority::High, Priority::High => Priority::Low }
    }

    pub fn prev(self) -> Self {
        match self { Priority::Low => Priority::High, Priority::Medium => Priority::Low, Priority::High => Priority::Medium }
    }
}

fn default_clock() -> String { "00:00".to_string() }
fn default_part() -> String { "00".to_string() }

/// One task record, laid out exactly as it is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub time_mode: TimeMode,
    #[serde(default = "default_clock")]
    pub start_time: String,
    #[serde(default = "default_clock")]
    pub end_time: String,
    #[serde(default = "default_part")]
    pub duration_hours: String,
    #[serde(default = "default_part")]
    pub duration_minutes: String,
    #[serde(default)]
    pub priority: Priority,
}

pub type TodoCollection = Vec<Todo>;

impl Todo {
    pub fn from_fields(id: TodoId, fields: TodoFields) -> Self {
        Self {
            id,
            text: fields.text,
            completed: false,
            time_mode: fields.time_mode,
            start_time: fields.start_time,
            end_time: fields.end_time,
            duration_hours: fields.duration_hours,
            duration_minutes: fields.duration_minutes,
            priority: fields.priority,
        }
    }

    /// Overwrites everything except `id` and `completed`.
    pub fn apply(&mut self, fields: TodoFields) {
        self.text = fields.text;
        self.time_mode = fields.time_mode;
        self.start_time = fields.start_time;
        self.end_time = fields.end_time;
        self.duration_hours = fields.duration_hours;
        self.duration_minutes = fields.duration_minutes;
        self.priority = fields.priority;
    }

    pub fn fields(&self) -> TodoFields {
        TodoFields {
            text: self.text.clone(),
            time_mode: self.time_mode,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            duration_hours: self.duration_hours.clone(),
            duration_minutes: self.duration_minutes.clone(),
            priority: self.priority,
        }
    }

    /// Human-readable schedule for whichever representation is active.
    pub fn schedule(&self) -> String {
        match self.time_mode {
            TimeMode::Specific => format!("{} – {}", self.start_time, self.end_time),
            TimeMode::Duration => {
                let h = self.duration_hours.parse::<u32>().unwrap_or(0);
                let m = self.duration_minutes.parse::<u32>().unwrap_or(0);
                match (h, m) {
                    (0, m) => format!("{m}m"),
                    (h, 0) => format!("{h}h"),
                    (h, m) => format!("{h}h {m}m"),
                }
            }
        }
    }
}

/// Caller-supplied part of a record, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    pub text: String,
    pub time_mode: TimeMode,
    pub start_time: String,
    pub end_time: String,
    pub duration_hours: String,
    pub duration_minutes: String,
    pub priority: Priority,
}

impl Default for TodoFields {
    fn default() -> Self {
        Self {
            text: String::new(),
            time_mode: TimeMode::Specific,
            start_time: default_clock(),
            end_time: default_clock(),
            duration_hours: default_part(),
            duration_minutes: default_part(),
            priority: Priority::Medium,
        }
    }
}

impl TodoFields {
    pub fn specific(text: impl Into<String>, start: &str, end: &str, priority: Priority) -> Self {
        Self { text: text.into(), time_mode: TimeMode::Specific, start_time: start.into(), end_time: end.into(), priority, ..Self::default() }
    }

    pub fn duration(text: impl Into<String>, hours: &str, minutes: &str, priority: Priority) -> Self {
        Self { text: text.into(), time_mode: TimeMode::Duration, duration_hours: hours.into(), duration_minutes: minutes.into(), priority, ..Self::default() }
    }

    /// Caller-side checks run before handing fields to the store. Only the active time
    /// representation is checked; the inactive one is carried through untouched.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        self.text = text.to_string();

        match self.time_mode {
            TimeMode::Specific => {
                self.start_time = normalize_clock(&self.start_time)?;
                self.end_time = normalize_clock(&self.end_time)?;
            }
            TimeMode::Duration => {
                let hours = parse_part(&self.duration_hours, 23)?;
                let minutes = parse_part(&self.duration_minutes, 59)?;
                self.duration_hours = pad2(hours);
                self.duration_minutes = pad2(minutes);
            }
        }
        Ok(self)
    }
}

fn parse_part(raw: &str, max: u32) -> Result<u32, ValidationError> {
    match raw.trim().parse::<u32>() {
        Ok(v) if v <= max => Ok(v),
        _ => Err(ValidationError::InvalidDuration(raw.to_string())),
    }
}

/// Parses a time of day and re-renders it zero-padded, so `9:5` becomes `09:05`.
fn normalize_clock(raw: &str) -> Result<String, ValidationError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| ValidationError::InvalidTime(raw.to_string()))
}

pub fn pad2(n: u32) -> String { format!("{n:02}") }
