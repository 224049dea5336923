//! In-memory record store using DashMap

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use log::debug;
use log::warn;

use super::RecordSource;
use super::StoreConfig;
use crate::error::Error;
use crate::error::SourceError;
use crate::model::EntityKind;
use crate::model::Record;
use crate::model::Value;

/// A record store held in process memory.
///
/// Each store instance owns its collections; nothing is shared between
/// instances. Drop the store (or call [`clear`](Self::clear)) to tear it down.
///
/// # Example
///
/// ```
/// use policydesk_lib::store::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let loaded = store
///     .seed_json(r#"{ "clients": [ { "Id": 1, "name": "Jane Doe" } ] }"#)
///     .unwrap();
/// assert_eq!(loaded, 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: DashMap<EntityKind, Vec<Record>>,
    config: StoreConfig,
}

impl InMemoryStore {
    /// Creates a new empty store with no simulated latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            collections: DashMap::new(),
            config,
        }
    }

    /// Replaces a collection with the given records.
    pub fn seed(&self, kind: EntityKind, records: Vec<Record>) {
        debug!("store: seeded {} {}", records.len(), kind.collection());
        self.collections.insert(kind, records);
    }

    /// Loads fixture JSON shaped as `{ "<collection>": [ {record}, ... ], ... }`.
    ///
    /// Unknown collection names are skipped. Returns the number of records loaded.
    pub fn seed_json(&self, json: &str) -> Result<usize, Error> {
        let fixtures: HashMap<String, Vec<Record>> = serde_json::from_str(json)?;
        let mut loaded = 0;
        for (name, records) in fixtures {
            match EntityKind::from_collection(&name) {
                Some(kind) => {
                    loaded += records.len();
                    self.seed(kind, records);
                }
                None => warn!("store: skipping unknown collection '{}'", name),
            }
        }
        Ok(loaded)
    }

    /// Number of records of a kind.
    pub fn len(&self, kind: EntityKind) -> usize {
        self.collections.get(&kind).map_or(0, |c| c.len())
    }

    /// Returns `true` if no collection holds any record.
    pub fn is_empty(&self) -> bool {
        self.collections.iter().all(|c| c.is_empty())
    }

    /// Drops every collection.
    pub fn clear(&self) {
        self.collections.clear();
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    async fn pause(latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl RecordSource for InMemoryStore {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Record>, SourceError> {
        Self::pause(self.config.read_latency()).await;
        Ok(self
            .collections
            .get(&kind)
            .map(|c| c.value().clone())
            .unwrap_or_default())
    }

    async fn get(&self, kind: EntityKind, id: u64) -> Result<Record, SourceError> {
        Self::pause(self.config.read_latency()).await;
        self.collections
            .get(&kind)
            .and_then(|c| c.iter().find(|r| r.id() == Some(id)).cloned())
            .ok_or(SourceError::not_found(kind, id))
    }

    async fn create(&self, kind: EntityKind, mut record: Record) -> Result<Record, SourceError> {
        Self::pause(self.config.write_latency()).await;

        match kind {
            EntityKind::Task => record.insert("completed", false),
            EntityKind::Client => record.insert("createdAt", Value::DateTime(Utc::now())),
            _ => {}
        }

        let mut collection = self.collections.entry(kind).or_default();
        let next_id = collection.iter().filter_map(Record::id).max().unwrap_or(0) + 1;
        record.set_id(next_id);
        collection.push(record.clone());

        debug!("store: created {} {}", kind, next_id);
        Ok(record)
    }

    async fn update(&self, kind: EntityKind, id: u64, patch: Record) -> Result<Record, SourceError> {
        Self::pause(self.config.write_latency()).await;

        let mut collection = self
            .collections
            .get_mut(&kind)
            .ok_or(SourceError::not_found(kind, id))?;
        let record = collection
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or(SourceError::not_found(kind, id))?;
        record.merge(&patch);

        debug!("store: updated {} {}", kind, id);
        Ok(record.clone())
    }

    async fn delete(&self, kind: EntityKind, id: u64) -> Result<(), SourceError> {
        Self::pause(self.config.write_latency()).await;

        let mut collection = self
            .collections
            .get_mut(&kind)
            .ok_or(SourceError::not_found(kind, id))?;
        let index = collection
            .iter()
            .position(|r| r.id() == Some(id))
            .ok_or(SourceError::not_found(kind, id))?;
        collection.remove(index);

        debug!("store: deleted {} {}", kind, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leads() -> Vec<Record> {
        vec![
            Record::with_id(1).set("name", "Acme").set("stage", "prospect"),
            Record::with_id(4).set("name", "Globex").set("stage", "quoted"),
        ]
    }

    #[tokio::test]
    async fn test_list_returns_copies() {
        let store = InMemoryStore::new();
        store.seed(EntityKind::Lead, leads());

        let mut listed = store.list(EntityKind::Lead).await.unwrap();
        listed[0].insert("stage", "closed");

        let again = store.get(EntityKind::Lead, 1).await.unwrap();
        assert_eq!(again.get_string("stage").unwrap(), Some("prospect"));
        assert!(store.list(EntityKind::Task).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let store = InMemoryStore::new();
        store.seed(EntityKind::Lead, leads());

        let created = store
            .create(EntityKind::Lead, Record::with_id(1).set("name", "Initech"))
            .await
            .unwrap();
        assert_eq!(created.id(), Some(5));
        assert_eq!(store.len(EntityKind::Lead), 3);

        let first = store.create(EntityKind::Policy, Record::new()).await.unwrap();
        assert_eq!(first.id(), Some(1));
    }

    #[tokio::test]
    async fn test_create_defaults_per_kind() {
        let store = InMemoryStore::new();

        let task = store
            .create(EntityKind::Task, Record::new().set("completed", true))
            .await
            .unwrap();
        assert_eq!(task.get_bool("completed").unwrap(), Some(false));

        let client = store.create(EntityKind::Client, Record::new()).await.unwrap();
        assert!(matches!(client.get("createdAt"), Some(Value::DateTime(_))));
    }

    #[tokio::test]
    async fn test_update_merges() {
        let store = InMemoryStore::new();
        store.seed(EntityKind::Lead, leads());

        let updated = store
            .update(EntityKind::Lead, 4, Record::new().set("stage", "negotiating"))
            .await
            .unwrap();
        assert_eq!(updated.get_string("name").unwrap(), Some("Globex"));
        assert_eq!(updated.get_string("stage").unwrap(), Some("negotiating"));
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = InMemoryStore::new();
        store.seed(EntityKind::Lead, leads());

        let expected = SourceError::not_found(EntityKind::Lead, 9);
        assert_eq!(store.get(EntityKind::Lead, 9).await.unwrap_err(), expected);
        assert_eq!(
            store.update(EntityKind::Lead, 9, Record::new()).await.unwrap_err(),
            expected
        );
        assert_eq!(store.delete(EntityKind::Lead, 9).await.unwrap_err(), expected);
        assert_eq!(
            store.delete(EntityKind::Task, 1).await.unwrap_err(),
            SourceError::not_found(EntityKind::Task, 1)
        );
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let store = InMemoryStore::new();
        store.seed(EntityKind::Lead, leads());

        store.delete(EntityKind::Lead, 1).await.unwrap();
        assert_eq!(store.len(EntityKind::Lead), 1);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_seed_json() {
        let store = InMemoryStore::new();
        let json = r#"{
            "policies": [
                { "Id": 1, "policyNumber": "POL-001", "premium": 1200, "renewalDate": "2025-06-01" },
                { "Id": 2, "policyNumber": "POL-002", "premium": 850.5, "renewalDate": "2025-01-15" }
            ],
            "widgets": [ { "Id": 1 } ]
        }"#;

        assert_eq!(store.seed_json(json).unwrap(), 2);
        assert_eq!(store.len(EntityKind::Policy), 2);
        assert!(matches!(store.seed_json("[1, 2]"), Err(Error::Json(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_latency() {
        let store = InMemoryStore::with_config(
            StoreConfig::default().with_read_latency(Duration::from_millis(300)),
        );
        let started = tokio::time::Instant::now();
        store.list(EntityKind::Client).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
