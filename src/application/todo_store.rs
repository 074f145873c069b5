use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::error::StorageError;
use crate::domain::persistence::{PersistenceSink, TODOS_KEY};
use crate::domain::todo::{Todo, TodoCollection, TodoFields, TodoId};

/// Authoritative in-memory todo collection, written through to a [`PersistenceSink`]
/// after every applied mutation.
///
/// A failed write leaves the mutation applied in memory and returns the error; the
/// next successful write brings storage back in line.
pub struct TodoStore<S: PersistenceSink> {
    sink: S,
    todos: TodoCollection,
}

impl<S: PersistenceSink> TodoStore<S> {
    /// Reads the `todos` slot once. Missing, unreadable or malformed content yields an
    /// empty collection.
    pub fn hydrate(sink: S) -> Self {
        let todos = match sink.get(TODOS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<TodoCollection>(&raw) {
                Ok(todos) => todos,
                Err(err) => {
                    warn!(error = %err, "stored todos are malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "could not read stored todos, starting empty");
                Vec::new()
            }
        };
        let todos = dedupe_ids(todos);
        debug!(count = todos.len(), "hydrated todo store");
        Self { sink, todos }
    }

    pub fn todos(&self) -> &[Todo] { &self.todos }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> { self.todos.iter().find(|t| &t.id == id) }

    pub fn has_completed(&self) -> bool { self.todos.iter().any(|t| t.completed) }

    pub fn sink(&self) -> &S { &self.sink }

    pub fn create(&mut self, fields: TodoFields) -> Result<Todo, StorageError> {
        let mut id = TodoId::new();
        while self.get(&id).is_some() {
            id = TodoId::new();
        }
        let todo = Todo::from_fields(id, fields);
        debug!(id = %todo.id, "create todo");
        self.todos.push(todo.clone());
        self.persist()?;
        Ok(todo)
    }

    /// Returns `false` without writing when `id` is unknown.
    pub fn toggle(&mut self, id: &TodoId) -> Result<bool, StorageError> {
        let Some(todo) = self.todos.iter_mut().find(|t| &t.id == id) else { return Ok(false) };
        todo.completed = !todo.completed;
        debug!(%id, completed = todo.completed, "toggle todo");
        self.persist()?;
        Ok(true)
    }

    /// Overwrites every field but `id` and `completed`. Returns `false` without writing
    /// when `id` is unknown.
    pub fn update(&mut self, id: &TodoId, fields: TodoFields) -> Result<bool, StorageError> {
        let Some(todo) = self.todos.iter_mut().find(|t| &t.id == id) else { return Ok(false) };
        todo.apply(fields);
        debug!(%id, "update todo");
        self.persist()?;
        Ok(true)
    }

    /// Returns `false` without writing when `id` is unknown.
    pub fn delete(&mut self, id: &TodoId) -> Result<bool, StorageError> {
        let Some(pos) = self.todos.iter().position(|t| &t.id == id) else { return Ok(false) };
        self.todos.remove(pos);
        debug!(%id, "delete todo");
        self.persist()?;
        Ok(true)
    }

    /// Always writes, even when nothing was completed.
    pub fn uncheck_all(&mut self) -> Result<(), StorageError> {
        for todo in &mut self.todos {
            todo.completed = false;
        }
        debug!(count = self.todos.len(), "uncheck all todos");
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.todos)?;
        self.sink.put(TODOS_KEY, &encoded).inspect_err(|err| {
            warn!(error = %err, "failed to persist todos");
        })
    }
}

/// Keeps the first record for each id; ids are the lookup key, so later copies would be
/// unreachable by toggle/update/delete.
fn dedupe_ids(todos: TodoCollection) -> TodoCollection {
    let mut seen = HashSet::new();
    todos
        .into_iter()
        .filter(|t| {
            let fresh = seen.insert(t.id.clone());
            if !fresh {
                warn!(id = %t.id, "dropping stored todo with duplicate id");
            }
            fresh
        })
        .collect()
}
