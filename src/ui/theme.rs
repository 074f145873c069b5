use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{error::StorageError, persistence::PersistenceSink, todo::Priority};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Falls back to the default theme on any read or decode problem.
    pub fn load<S: PersistenceSink>(sink: &S) -> Self {
        match sink.get(THEME_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!(error = %err, "could not read theme");
                Theme::default()
            }
        }
    }

    pub fn save<S: PersistenceSink>(self, sink: &S) -> Result<(), StorageError> {
        sink.put(THEME_KEY, &serde_json::to_string(&self)?)
    }

    pub fn toggled(self) -> Self {
        match self { Theme::Light => Theme::Dark, Theme::Dark => Theme::Light }
    }

    pub fn name(self) -> &'static str {
        match self { Theme::Light => "light", Theme::Dark => "dark" }
    }

    pub fn base(self) -> Style {
        match self {
            Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
            Theme::Dark => Style::default().fg(Color::Gray).bg(Color::Black),
        }
    }

    pub fn muted(self) -> Style {
        match self {
            Theme::Light => Style::default().fg(Color::Gray),
            Theme::Dark => Style::default().fg(Color::DarkGray),
        }
    }

    pub fn accent(self) -> Style {
        match self {
            Theme::Light => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            Theme::Dark => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        }
    }

    pub fn highlight(self) -> Style { self.accent().add_modifier(Modifier::REVERSED) }

    pub fn completed(self) -> Style { self.muted().add_modifier(Modifier::CROSSED_OUT) }

    pub fn badge(self, priority: Priority) -> Style {
        let color = match priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
