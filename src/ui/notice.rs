use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};

pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind { Success, Removal, Error }

/// Transient status line shown after an operation.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into(), shown_at: Instant::now() }
    }

    pub fn success(text: impl Into<String>) -> Self { Self::new(NoticeKind::Success, text) }

    pub fn error(text: impl Into<String>) -> Self { Self::new(NoticeKind::Error, text) }

    pub fn is_expired(&self, now: Instant) -> bool { now.saturating_duration_since(self.shown_at) >= NOTICE_TTL }

    pub fn style(&self) -> Style {
        match self.kind {
            NoticeKind::Success => Style::default().fg(Color::Green),
            NoticeKind::Removal => Style::default().fg(Color::Yellow),
            NoticeKind::Error => Style::default().fg(Color::Red),
        }
    }
}
