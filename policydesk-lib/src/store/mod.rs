//! Record sources
//!
//! Provides the `RecordSource` trait that every data-backed screen reads and
//! writes through, and an in-memory implementation seeded from fixture data.
//! A hosted backend client implements the same trait; the CRM logic does not
//! care which one it is handed.

mod config;
mod memory;

pub use config::*;
pub use memory::*;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::EntityKind;
use crate::model::Record;

/// Trait for record sources.
///
/// Implementations store records in named collections keyed by
/// [`EntityKind`]. The source is responsible for:
/// - Assigning ids on `create` (one more than the highest id in use)
/// - Returning copies, so callers can never alias stored records
/// - Reporting unknown ids as [`SourceError::NotFound`]
///
/// # Example
///
/// ```ignore
/// use policydesk_lib::model::{EntityKind, Record};
/// use policydesk_lib::store::{InMemoryStore, RecordSource};
///
/// let store = InMemoryStore::new();
/// let created = store
///     .create(EntityKind::Lead, Record::new().set("name", "Acme").set("stage", "prospect"))
///     .await?;
/// assert_eq!(created.id(), Some(1));
///
/// let leads = store.list(EntityKind::Lead).await?;
/// assert_eq!(leads.len(), 1);
/// ```
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// All records of a kind, in stored order.
    async fn list(&self, kind: EntityKind) -> Result<Vec<Record>, SourceError>;

    /// One record by id.
    async fn get(&self, kind: EntityKind, id: u64) -> Result<Record, SourceError>;

    /// Stores a new record and returns it with its assigned id.
    async fn create(&self, kind: EntityKind, record: Record) -> Result<Record, SourceError>;

    /// Overlays `patch` onto an existing record and returns the result.
    async fn update(&self, kind: EntityKind, id: u64, patch: Record) -> Result<Record, SourceError>;

    /// Removes a record.
    async fn delete(&self, kind: EntityKind, id: u64) -> Result<(), SourceError>;
}

#[async_trait]
impl<S: RecordSource + ?Sized> RecordSource for Arc<S> {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Record>, SourceError> {
        (**self).list(kind).await
    }

    async fn get(&self, kind: EntityKind, id: u64) -> Result<Record, SourceError> {
        (**self).get(kind, id).await
    }

    async fn create(&self, kind: EntityKind, record: Record) -> Result<Record, SourceError> {
        (**self).create(kind, record).await
    }

    async fn update(&self, kind: EntityKind, id: u64, patch: Record) -> Result<Record, SourceError> {
        (**self).update(kind, id, patch).await
    }

    async fn delete(&self, kind: EntityKind, id: u64) -> Result<(), SourceError> {
        (**self).delete(kind, id).await
    }
}
