//! Fetch and mutate with user-facing reporting.
//!
//! Every data-backed screen follows the same policy: load a collection, keep
//! the previous rows if that fails, and tell the user through a toast. Batched
//! mutations run concurrently; each failure gets its own toast.

mod retry;

pub use retry::RetryConfig;

use futures::future::join_all;
use log::debug;
use log::warn;

use crate::error::SourceError;
use crate::model::EntityKind;
use crate::model::Record;
use crate::notify::Notifier;
use crate::notify::Toast;
use crate::store::RecordSource;

/// A single write against a record source.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { kind: EntityKind, record: Record },
    Update { kind: EntityKind, id: u64, patch: Record },
    Delete { kind: EntityKind, id: u64 },
}

impl Mutation {
    pub fn create(kind: EntityKind, record: Record) -> Self {
        Self::Create { kind, record }
    }

    pub fn update(kind: EntityKind, id: u64, patch: Record) -> Self {
        Self::Update { kind, id, patch }
    }

    pub fn delete(kind: EntityKind, id: u64) -> Self {
        Self::Delete { kind, id }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Create { kind, .. } | Self::Update { kind, .. } | Self::Delete { kind, .. } => {
                *kind
            }
        }
    }
}

/// Toast text for a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub success: Option<String>,
    pub failure: String,
}

impl Messages {
    /// Messages that only report failures.
    pub fn on_failure(failure: impl Into<String>) -> Self {
        Self {
            success: None,
            failure: failure.into(),
        }
    }

    /// Adds a success message.
    pub fn with_success(mut self, success: impl Into<String>) -> Self {
        self.success = Some(success.into());
        self
    }
}

/// Outcome of [`Reporter::mutate_all`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Results of the mutations that succeeded, in submission order.
    pub applied: Vec<Option<Record>>,
    /// Index into the submitted batch and the error, for each failure.
    pub failures: Vec<(usize, SourceError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Loads and mutates records, reporting failures through a [`Notifier`].
#[derive(Debug)]
pub struct Reporter<S, N> {
    source: S,
    notifier: N,
    retry: RetryConfig,
}

impl<S: RecordSource, N: Notifier> Reporter<S, N> {
    pub fn new(source: S, notifier: N) -> Self {
        Self {
            source,
            notifier,
            retry: RetryConfig::default(),
        }
    }

    /// Sets the retry policy for loads.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Loads every record of `kind`.
    ///
    /// Retryable failures are retried per the [`RetryConfig`]; once retries are
    /// exhausted the user gets a single error toast and the error is returned,
    /// so the caller can keep showing the rows it already has.
    pub async fn load(&self, kind: EntityKind) -> Result<Vec<Record>, SourceError> {
        self.fetch(kind).await.inspect_err(|_| {
            self.notifier.notify(Toast::error(load_failure_message(kind)));
        })
    }

    /// Like [`load`](Self::load) but leaves reporting the final failure to
    /// the caller. Used when several loads share one failure message.
    pub async fn fetch(&self, kind: EntityKind) -> Result<Vec<Record>, SourceError> {
        let mut attempts = 0;

        loop {
            match self.source.list(kind).await {
                Ok(records) => {
                    debug!("Loaded {} {}", records.len(), kind.collection());
                    return Ok(records);
                }
                Err(e) if e.is_retryable() && attempts < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempts);
                    warn!("Loading {} failed ({e}), retrying in {delay:?}", kind.collection());
                    tokio::time::sleep(delay).await;
                    attempts += 1;
                }
                Err(e) => {
                    warn!("Loading {} failed: {e}", kind.collection());
                    return Err(e);
                }
            }
        }
    }

    /// Shows an error toast.
    pub fn report_failure(&self, message: impl Into<String>) {
        self.notifier.notify(Toast::error(message));
    }

    /// Applies one mutation and reports its outcome.
    ///
    /// Returns the stored record for creates and updates, `None` for deletes.
    pub async fn mutate(
        &self,
        mutation: Mutation,
        messages: &Messages,
    ) -> Result<Option<Record>, SourceError> {
        let result = self.apply(mutation).await;
        self.report(result, messages)
    }

    /// Patches one record and reports the outcome.
    pub async fn update(
        &self,
        kind: EntityKind,
        id: u64,
        patch: Record,
        messages: &Messages,
    ) -> Result<Record, SourceError> {
        let result = self.source.update(kind, id, patch).await;
        self.report(result, messages)
    }

    /// Deletes one record and reports the outcome.
    pub async fn delete(
        &self,
        kind: EntityKind,
        id: u64,
        messages: &Messages,
    ) -> Result<(), SourceError> {
        let result = self.source.delete(kind, id).await;
        self.report(result, messages)
    }

    /// Applies several mutations concurrently.
    ///
    /// Failures are collected rather than short-circuiting, and each one is
    /// reported with its own toast. The success message is sent once, only if
    /// nothing failed.
    pub async fn mutate_all(&self, mutations: Vec<Mutation>, messages: &Messages) -> BatchReport {
        let results = join_all(mutations.into_iter().map(|m| self.apply(m))).await;

        let mut report = BatchReport::default();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(record) => report.applied.push(record),
                Err(e) => {
                    warn!("{} (mutation {index}): {e}", messages.failure);
                    self.notifier.notify(Toast::error(messages.failure.clone()));
                    report.failures.push((index, e));
                }
            }
        }

        if let Some(success) = &messages.success {
            if report.is_success() {
                self.notifier.notify(Toast::success(success.clone()));
            }
        }
        report
    }

    fn report<T>(
        &self,
        result: Result<T, SourceError>,
        messages: &Messages,
    ) -> Result<T, SourceError> {
        match &result {
            Ok(_) => {
                if let Some(success) = &messages.success {
                    self.notifier.notify(Toast::success(success.clone()));
                }
            }
            Err(e) => {
                warn!("{}: {e}", messages.failure);
                self.notifier.notify(Toast::error(messages.failure.clone()));
            }
        }
        result
    }

    async fn apply(&self, mutation: Mutation) -> Result<Option<Record>, SourceError> {
        match mutation {
            Mutation::Create { kind, record } => self.source.create(kind, record).await.map(Some),
            Mutation::Update { kind, id, patch } => {
                self.source.update(kind, id, patch).await.map(Some)
            }
            Mutation::Delete { kind, id } => self.source.delete(kind, id).await.map(|()| None),
        }
    }
}

/// Toast text shown when a collection cannot be loaded.
pub fn load_failure_message(kind: EntityKind) -> String {
    format!("Failed to load {}. Please try again.", kind.collection())
}
