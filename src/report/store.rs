use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::synthesizer::FinalReport;
use crate::session::SessionId;

/// A completed session as handed to durable storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub candidate_id: String,
    pub questions: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub report: FinalReport,
}

impl SessionRecord {
    pub fn duration_secs(&self) -> f64 {
        self.ended_at
            .signed_duration_since(self.started_at)
            .num_milliseconds() as f64
            / 1000.0
    }
}

/// Persistence collaborator for finalized sessions
///
/// Implementations:
/// - `MemoryReportStore`: keeps records in process (tests, local runs)
/// - `NatsClient`: publishes records for a downstream storage service
#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    /// Durably store a completed session
    async fn persist(&self, record: &SessionRecord) -> Result<()>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    records: Mutex<Vec<SessionRecord>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<SessionRecord> {
        self.records.lock().await.clone()
    }

    pub async fn get(&self, session_id: &SessionId) -> Option<SessionRecord> {
        let records = self.records.lock().await;
        records.iter().find(|r| &r.session_id == session_id).cloned()
    }
}

#[async_trait::async_trait]
impl ReportStore for MemoryReportStore {
    async fn persist(&self, record: &SessionRecord) -> Result<()> {
        let mut records = self.records.lock().await;
        records.push(record.clone());
        Ok(())
    }
}
