use super::error::StorageError;

/// Slot holding the serialized todo collection.
pub const TODOS_KEY: &str = "todos";

/// Narrow get/put-by-key capability backing the store.
///
/// Values are whole blobs; a `put` replaces whatever was stored under the key.
pub trait PersistenceSink {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
