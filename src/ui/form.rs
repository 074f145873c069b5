use crate::domain::todo::{pad2, Priority, TimeMode, Todo, TodoFields, TodoId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    TimeMode,
    StartHour,
    StartMinute,
    EndHour,
    EndMinute,
    DurationHours,
    DurationMinutes,
    Priority,
}

const SPECIFIC_ORDER: [FormField; 7] = [
    FormField::Text,
    FormField::TimeMode,
    FormField::StartHour,
    FormField::StartMinute,
    FormField::EndHour,
    FormField::EndMinute,
    FormField::Priority,
];

const DURATION_ORDER: [FormField; 5] = [
    FormField::Text,
    FormField::TimeMode,
    FormField::DurationHours,
    FormField::DurationMinutes,
    FormField::Priority,
];

/// Draft state for the create and edit screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoForm {
    pub editing: Option<TodoId>,
    pub text: String,
    pub time_mode: TimeMode,
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
    pub duration_hours: u32,
    pub duration_minutes: u32,
    pub priority: Priority,
    pub focus: FormField,
}

impl Default for TodoForm {
    fn default() -> Self {
        Self {
            editing: None,
            text: String::new(),
            time_mode: TimeMode::Specific,
            start_hour: 0,
            start_minute: 0,
            end_hour: 0,
            end_minute: 0,
            duration_hours: 0,
            duration_minutes: 0,
            priority: Priority::Medium,
            focus: FormField::Text,
        }
    }
}

impl TodoForm {
    pub fn create() -> Self { Self::default() }

    /// Pre-fills from an existing record. Unparseable parts fall back to zero.
    pub fn edit(todo: &Todo) -> Self {
        let (start_hour, start_minute) = split_clock(&todo.start_time);
        let (end_hour, end_minute) = split_clock(&todo.end_time);
        Self {
            editing: Some(todo.id.clone()),
            text: todo.text.clone(),
            time_mode: todo.time_mode,
            start_hour,
            start_minute,
            end_hour,
            end_minute,
            duration_hours: parse_or_zero(&todo.duration_hours, 23),
            duration_minutes: parse_or_zero(&todo.duration_minutes, 59),
            priority: todo.priority,
            focus: FormField::Text,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() { "Edit Todo" } else { "Create New Todo" }
    }

    pub fn fields(&self) -> TodoFields {
        TodoFields {
            text: self.text.clone(),
            time_mode: self.time_mode,
            start_time: format!("{}:{}", pad2(self.start_hour), pad2(self.start_minute)),
            end_time: format!("{}:{}", pad2(self.end_hour), pad2(self.end_minute)),
            duration_hours: pad2(self.duration_hours),
            duration_minutes: pad2(self.duration_minutes),
            priority: self.priority,
        }
    }

    /// Fields reachable with Tab for the current time mode.
    pub fn order(&self) -> &'static [FormField] {
        match self.time_mode {
            TimeMode::Specific => &SPECIFIC_ORDER,
            TimeMode::Duration => &DURATION_ORDER,
        }
    }

    pub fn focus_next(&mut self) { self.step_focus(1) }

    pub fn focus_prev(&mut self) { self.step_focus(-1) }

    fn step_focus(&mut self, delta: isize) {
        let order = self.order();
        let len = order.len() as isize;
        let at = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        self.focus = order[(at + delta).rem_euclid(len) as usize];
    }

    /// Left/right on a selector. Numeric selectors wrap around their range.
    pub fn adjust(&mut self, delta: i32) {
        match self.focus {
            FormField::Text => {}
            FormField::TimeMode => self.time_mode = self.time_mode.toggled(),
            FormField::StartHour => self.start_hour = wrap(self.start_hour, delta, 24),
            FormField::StartMinute => self.start_minute = wrap(self.start_minute, delta, 60),
            FormField::EndHour => self.end_hour = wrap(self.end_hour, delta, 24),
            FormField::EndMinute => self.end_minute = wrap(self.end_minute, delta, 60),
            FormField::DurationHours => self.duration_hours = wrap(self.duration_hours, delta, 24),
            FormField::DurationMinutes => self.duration_minutes = wrap(self.duration_minutes, delta, 60),
            FormField::Priority => {
                self.priority = if delta >= 0 { self.priority.next() } else { self.priority.prev() };
            }
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.focus == FormField::Text {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.focus == FormField::Text {
            self.text.pop();
        }
    }
}

fn wrap(value: u32, delta: i32, modulo: u32) -> u32 {
    (value as i64 + delta as i64).rem_euclid(modulo as i64) as u32
}

fn parse_or_zero(raw: &str, max: u32) -> u32 {
    raw.trim().parse::<u32>().ok().filter(|v| *v <= max).unwrap_or(0)
}

fn split_clock(raw: &str) -> (u32, u32) {
    let mut parts = raw.splitn(2, ':');
    let hour = parts.next().map(|h| parse_or_zero(h, 23)).unwrap_or(0);
    let minute = parts.next().map(|m| parse_or_zero(m, 59)).unwrap_or(0);
    (hour, minute)
}
