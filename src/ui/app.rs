use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use tracing::warn;

use crate::application::todo_store::TodoStore;
use crate::domain::{error::StorageError, persistence::PersistenceSink, todo::TodoId};

use super::{form::TodoForm, notice::{Notice, NoticeKind}, theme::Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List,
    Form(TodoForm),
}

/// Presentation state. Owns the store and turns key presses into store intents.
pub struct App<S: PersistenceSink> {
    pub store: TodoStore<S>,
    pub mode: Mode,
    pub selected: usize,
    pub list_state: ListState,
    pub theme: Theme,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl<S: PersistenceSink> App<S> {
    pub fn new(sink: S) -> Self {
        let theme = Theme::load(&sink);
        let store = TodoStore::hydrate(sink);
        let mut app = Self {
            store,
            mode: Mode::List,
            selected: 0,
            list_state: ListState::default(),
            theme,
            notice: None,
            should_quit: false,
        };
        app.clamp_selection();
        app
    }

    pub fn selected_id(&self) -> Option<TodoId> {
        self.store.todos().get(self.selected).map(|t| t.id.clone())
    }

    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // ignore repeats and releases so one press is one intent
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.mode == Mode::List {
            self.handle_list_key(key);
        } else {
            self.handle_form_key(key);
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 { self.selected -= 1; }
                self.clamp_selection();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.store.todos().len() { self.selected += 1; }
                self.clamp_selection();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('n') => self.mode = Mode::Form(TodoForm::create()),
            KeyCode::Char('e') => {
                if let Some(todo) = self.store.todos().get(self.selected) {
                    self.mode = Mode::Form(TodoForm::edit(todo));
                }
            }
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('u') => self.uncheck_all(),
            KeyCode::Char('t') => self.toggle_theme(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Mode::Form(form) = &mut self.mode else { return };
        match key.code {
            KeyCode::Esc => self.mode = Mode::List,
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Left => form.adjust(-1),
            KeyCode::Right => form.adjust(1),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => form.push_char(c),
            _ => {}
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        match self.store.toggle(&id) {
            Ok(true) => {
                let completed = self.store.get(&id).is_some_and(|t| t.completed);
                let text = if completed { "Todo marked as completed" } else { "Todo marked as not completed" };
                self.notify(Notice::success(text));
            }
            Ok(false) => {}
            Err(err) => self.storage_failed(err),
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        match self.store.delete(&id) {
            Ok(true) => self.notify(Notice::new(NoticeKind::Removal, "Todo deleted")),
            Ok(false) => {}
            Err(err) => self.storage_failed(err),
        }
        self.clamp_selection();
    }

    fn uncheck_all(&mut self) {
        // the list only offers this while something is checked
        if !self.store.has_completed() {
            return;
        }
        match self.store.uncheck_all() {
            Ok(()) => self.notify(Notice::success("All todos have been unchecked")),
            Err(err) => self.storage_failed(err),
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(err) = self.theme.save(self.store.sink()) {
            warn!(error = %err, "could not persist theme");
        }
    }

    fn submit_form(&mut self) {
        let Mode::Form(form) = &self.mode else { return };
        let fields = match form.fields().validated() {
            Ok(fields) => fields,
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                return;
            }
        };
        let editing = form.editing.clone();
        self.mode = Mode::List;

        match editing {
            None => match self.store.create(fields) {
                Ok(_) => {
                    self.selected = self.store.todos().len().saturating_sub(1);
                    self.notify(Notice::success("Todo added successfully!"));
                }
                Err(err) => self.storage_failed(err),
            },
            Some(id) => match self.store.update(&id, fields) {
                Ok(true) => self.notify(Notice::success("Todo updated successfully")),
                Ok(false) => self.notify(Notice::error("Todo no longer exists")),
                Err(err) => self.storage_failed(err),
            },
        }
        self.clamp_selection();
    }

    fn storage_failed(&mut self, err: StorageError) {
        self.notify(Notice::error(format!("Could not save todos: {err}")));
    }

    fn notify(&mut self, notice: Notice) { self.notice = Some(notice); }

    fn clamp_selection(&mut self) {
        let len = self.store.todos().len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            if self.selected >= len { self.selected = len - 1; }
            self.list_state.select(Some(self.selected));
        }
    }
}
