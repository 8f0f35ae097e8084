//! Utility traits for configuration documents

/// A document holding records addressed by a unique key
pub trait RecordContainer<R> {
    fn records(&self) -> &[R];

    fn key(record: &R) -> &str;

    fn find(&self, key: &str) -> Option<&R> {
        self.records().iter().find(|r| Self::key(r) == key)
    }

    fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }
}
