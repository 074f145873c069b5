#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::super::todo_store::TodoStore;
    use crate::domain::{
        error::StorageError,
        persistence::{PersistenceSink, TODOS_KEY},
        todo::{Priority, Todo, TodoFields, TodoId},
    };
    use crate::infrastructure::memory_sink::MemorySink;

    struct BrokenSink;

    impl PersistenceSink for BrokenSink {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("unavailable").into())
        }
        fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("quota exceeded").into())
        }
    }

    fn buy_milk() -> TodoFields { TodoFields::specific("Buy milk", "09:00", "09:30", Priority::High) }

    fn stored(sink: &MemorySink) -> Vec<Todo> {
        serde_json::from_str(&sink.peek(TODOS_KEY).expect("slot written")).unwrap()
    }

    #[test]
    fn unit_create_buy_milk() {
        let sink = MemorySink::new();
        let mut store = TodoStore::hydrate(sink.clone());
        let created = store.create(buy_milk()).unwrap();

        assert_eq!(store.todos().len(), 1);
        let todo = &store.todos()[0];
        assert_eq!(todo, &created);
        assert!(!todo.completed);
        assert_eq!(todo.text, "Buy milk");
        assert_eq!(todo.start_time, "09:00");
        assert_eq!(todo.end_time, "09:30");
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(stored(&sink), store.todos());
    }

    #[test]
    fn unit_toggle_then_uncheck_all() {
        let mut store = TodoStore::hydrate(MemorySink::new());
        let id = store.create(buy_milk()).unwrap().id;

        assert!(store.toggle(&id).unwrap());
        assert!(store.todos()[0].completed);
        assert!(store.has_completed());

        store.uncheck_all().unwrap();
        assert!(!store.todos()[0].completed);
        assert!(!store.has_completed());
    }

    #[test]
    fn unit_delete_first_keeps_second_unchanged() {
        let mut store = TodoStore::hydrate(MemorySink::new());
        let first = store.create(buy_milk()).unwrap();
        let second = store.create(TodoFields::duration("Read", "01", "30", Priority::Low)).unwrap();

        assert!(store.delete(&first.id).unwrap());
        assert_eq!(store.todos(), &[second]);
    }

    #[test]
    fn unit_misses_are_silent_and_do_not_write() {
        let sink = MemorySink::new();
        let mut store = TodoStore::hydrate(sink.clone());
        store.create(buy_milk()).unwrap();
        let before = store.todos().to_vec();
        let writes = sink.writes();

        let ghost = TodoId("missing".into());
        assert!(!store.update(&ghost, TodoFields::specific("x", "01:00", "02:00", Priority::Low)).unwrap());
        assert!(!store.toggle(&ghost).unwrap());
        assert!(!store.delete(&ghost).unwrap());

        assert_eq!(store.todos(), before.as_slice());
        assert_eq!(sink.writes(), writes);
    }

    #[test]
    fn unit_each_applied_mutation_writes_once() {
        let sink = MemorySink::new();
        let mut store = TodoStore::hydrate(sink.clone());
        assert_eq!(sink.reads(), 1);
        assert_eq!(sink.writes(), 0);

        let id = store.create(buy_milk()).unwrap().id;
        assert_eq!(sink.writes(), 1);
        store.toggle(&id).unwrap();
        assert_eq!(sink.writes(), 2);
        store.update(&id, TodoFields::duration("Buy oat milk", "00", "15", Priority::Medium)).unwrap();
        assert_eq!(sink.writes(), 3);
        store.uncheck_all().unwrap();
        assert_eq!(sink.writes(), 4);
        store.delete(&id).unwrap();
        assert_eq!(sink.writes(), 5);
        assert_eq!(sink.reads(), 1);
        assert!(stored(&sink).is_empty());
    }

    #[test]
    fn unit_uncheck_all_writes_even_when_nothing_completed() {
        let sink = MemorySink::new();
        let mut store = TodoStore::hydrate(sink.clone());
        store.uncheck_all().unwrap();
        assert_eq!(sink.writes(), 1);
        assert_eq!(sink.peek(TODOS_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn unit_update_keeps_id_and_completion() {
        let mut store = TodoStore::hydrate(MemorySink::new());
        let id = store.create(buy_milk()).unwrap().id;
        store.toggle(&id).unwrap();

        let fields = TodoFields::duration("Buy oat milk", "00", "45", Priority::Low);
        assert!(store.update(&id, fields.clone()).unwrap());

        let todo = store.get(&id).unwrap();
        assert_eq!(todo.id, id);
        assert!(todo.completed);
        assert_eq!(todo.fields(), fields);
        // the inactive representation is retained as supplied
        assert_eq!(todo.start_time, "00:00");
    }

    #[test]
    fn unit_ids_are_unique_and_order_is_insertion_order() {
        let mut store = TodoStore::hydrate(MemorySink::new());
        for i in 0..200 {
            store.create(TodoFields::specific(format!("task {i}"), "10:00", "11:00", Priority::Medium)).unwrap();
        }
        let ids: HashSet<_> = store.todos().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 200);
        let texts: Vec<_> = store.todos().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts.first(), Some(&"task 0"));
        assert_eq!(texts.last(), Some(&"task 199"));

        let removed = store.todos()[50].id.clone();
        store.delete(&removed).unwrap();
        let after: Vec<_> = store.todos().iter().map(|t| t.text.clone()).collect();
        let expected: Vec<_> = (0..200).filter(|i| *i != 50).map(|i| format!("task {i}")).collect();
        assert_eq!(after, expected);
    }

    #[test]
    fn unit_toggle_twice_restores_record() {
        let mut store = TodoStore::hydrate(MemorySink::new());
        let original = store.create(buy_milk()).unwrap();
        store.toggle(&original.id).unwrap();
        store.toggle(&original.id).unwrap();
        assert_eq!(store.get(&original.id), Some(&original));
    }

    #[test]
    fn unit_uncheck_all_is_idempotent() {
        let mut store = TodoStore::hydrate(MemorySink::new());
        let a = store.create(buy_milk()).unwrap().id;
        store.create(buy_milk()).unwrap();
        store.toggle(&a).unwrap();

        store.uncheck_all().unwrap();
        let once = store.todos().to_vec();
        store.uncheck_all().unwrap();
        assert_eq!(store.todos(), once.as_slice());
    }

    #[test]
    fn unit_rehydrate_reproduces_collection() {
        let sink = MemorySink::new();
        let mut store = TodoStore::hydrate(sink.clone());
        let a = store.create(buy_milk()).unwrap().id;
        store.create(TodoFields::duration("Stretch", "00", "20", Priority::Low)).unwrap();
        store.toggle(&a).unwrap();

        let reloaded = TodoStore::hydrate(sink.clone());
        assert_eq!(reloaded.todos(), store.todos());
    }

    #[test]
    fn unit_malformed_storage_hydrates_empty() {
        let sink = MemorySink::with_value(TODOS_KEY, "{not json");
        let mut store = TodoStore::hydrate(sink.clone());
        assert!(store.todos().is_empty());

        // the next mutation replaces the bad blob
        store.create(buy_milk()).unwrap();
        assert_eq!(stored(&sink).len(), 1);
    }

    #[test]
    fn unit_hydrates_records_from_older_writers() {
        let raw = r#"[{"id":"1712345678901","text":"legacy","completed":false,"startTime":"08:00","endTime":"08:30"}]"#;
        let store = TodoStore::hydrate(MemorySink::with_value(TODOS_KEY, raw));
        let todo = &store.todos()[0];
        assert_eq!(todo.id.as_str(), "1712345678901");
        assert_eq!(todo.priority, Priority::Medium);
    }

    #[test]
    fn unit_write_failure_keeps_memory_and_surfaces_error() {
        let mut store = TodoStore::hydrate(BrokenSink);
        assert!(store.todos().is_empty());

        let err = store.create(buy_milk()).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
        assert_eq!(store.todos().len(), 1);
    }

    #[test]
    fn unit_duplicate_stored_ids_keep_first_record() {
        let raw = r#"[{"id":"1","text":"a"},{"id":"2","text":"c"},{"id":"1","text":"b"}]"#;
        let mut store = TodoStore::hydrate(MemorySink::with_value(TODOS_KEY, raw));
        let texts: Vec<_> = store.todos().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);

        assert!(store.delete(&TodoId("1".into())).unwrap());
        assert!(store.get(&TodoId("1".into())).is_none());
        assert_eq!(store.todos().len(), 1);
    }

    /// Reads what a working sink stored but refuses every write.
    struct ReadOnlySink(MemorySink);

    impl PersistenceSink for ReadOnlySink {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> { self.0.get(key) }
        fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("read-only").into())
        }
    }

    fn seeded_broken_store() -> (TodoStore<ReadOnlySink>, TodoId, TodoId) {
        let sink = MemorySink::new();
        let mut seed = TodoStore::hydrate(sink.clone());
        let a = seed.create(buy_milk()).unwrap().id;
        let b = seed.create(TodoFields::duration("Read", "00", "30", Priority::Low)).unwrap().id;
        seed.toggle(&b).unwrap();

        let store = TodoStore::hydrate(ReadOnlySink(sink));
        assert_eq!(store.todos(), seed.todos());
        (store, a, b)
    }

    #[test]
    fn unit_failed_toggle_stays_applied() {
        let (mut store, a, _) = seeded_broken_store();
        assert!(matches!(store.toggle(&a), Err(StorageError::Io(_))));
        assert!(store.get(&a).unwrap().completed);
    }

    #[test]
    fn unit_failed_update_stays_applied() {
        let (mut store, a, _) = seeded_broken_store();
        let fields = TodoFields::duration("Buy oat milk", "00", "10", Priority::Low);
        assert!(matches!(store.update(&a, fields.clone()), Err(StorageError::Io(_))));
        assert_eq!(store.get(&a).unwrap().fields(), fields);
    }

    #[test]
    fn unit_failed_delete_stays_applied() {
        let (mut store, a, b) = seeded_broken_store();
        assert!(matches!(store.delete(&a), Err(StorageError::Io(_))));
        assert!(store.get(&a).is_none());
        assert_eq!(store.todos().len(), 1);
        assert_eq!(store.todos()[0].id, b);
    }

    #[test]
    fn unit_failed_uncheck_all_stays_applied() {
        let (mut store, _, b) = seeded_broken_store();
        assert!(store.get(&b).unwrap().completed);
        assert!(matches!(store.uncheck_all(), Err(StorageError::Io(_))));
        assert!(!store.has_completed());
    }
}
