//! # Audit Client
use crate::audit_actor::AuditError;
use crate::model::{AuditFilter, AuditId, AuditRecord};
use async_trait::async_trait;
use keyed_actor::{ActorClient, FrameworkError, ResourceClient};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for the Audit actor. Clones share one id sequence.
#[derive(Clone)]
pub struct AuditClient {
    inner: ResourceClient<AuditRecord>,
    next_id: Arc<AtomicU64>,
    limit: usize,
}

impl AuditClient {
    pub fn new(inner: ResourceClient<AuditRecord>, limit: usize) -> Self {
        Self {
            inner,
            next_id: Arc::new(AtomicU64::new(1)),
            limit,
        }
    }

    /// Appends one record.
    #[instrument(skip(self, record), fields(action = record.action.as_str()))]
    pub async fn record(&self, record: AuditRecord) -> Result<AuditId, AuditError> {
        let id = AuditId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.inner
            .create(id, record)
            .await
            .map_err(Self::map_error)?;
        Ok(id)
    }

    /// The newest records first, capped at the configured limit, then narrowed by
    /// `filter`.
    #[instrument(skip(self))]
    pub async fn recent(&self, filter: &AuditFilter) -> Result<Vec<AuditRecord>, AuditError> {
        let mut records: Vec<(AuditId, AuditRecord)> = self
            .list()
            .await?
            .into_iter()
            .map(|(id, record)| (id, record.value))
            .collect();
        records.sort_by(|(a_id, a), (b_id, b)| {
            b.timestamp.cmp(&a.timestamp).then_with(|| b_id.cmp(a_id))
        });

        let matched: Vec<AuditRecord> = records
            .into_iter()
            .take(self.limit)
            .map(|(_, record)| record)
            .filter(|record| filter.matches(record))
            .collect();
        debug!(matched = matched.len(), "Audit query");
        Ok(matched)
    }
}

#[async_trait]
impl ActorClient<AuditRecord> for AuditClient {
    type Error = AuditError;

    fn inner(&self) -> &ResourceClient<AuditRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<AuditError>() {
                Ok(audit_error) => *audit_error,
                Err(other) => AuditError::ActorCommunicationError(other.to_string()),
            },
            other => AuditError::ActorCommunicationError(other.to_string()),
        }
    }
}
