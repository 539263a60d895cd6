use anyhow::{Context, Result};
use async_nats::Client;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::messages::{MetricsMessage, ReportMessage};
use crate::report::{ReportStore, SessionRecord};
use crate::session::MetricsUpdate;

pub struct NatsClient {
    client: Client,
    subject_prefix: String,
}

impl NatsClient {
    /// Connect to NATS server
    pub async fn connect(url: &str, subject_prefix: String) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self {
            client,
            subject_prefix,
        })
    }

    /// Subject for live metrics of one session
    pub fn metrics_subject(&self, session_id: &str) -> String {
        format!("{}.metrics.{}", self.subject_prefix, session_id)
    }

    /// Subject for finalized reports
    pub fn report_subject(&self) -> String {
        format!("{}.report", self.subject_prefix)
    }

    /// Publish a live metrics update
    pub async fn publish_metrics(&self, update: &MetricsUpdate) -> Result<()> {
        let subject = self.metrics_subject(update.session_id.as_str());
        let payload = serde_json::to_vec(&MetricsMessage::from(update))?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish metrics")?;

        debug!("Published metrics to {}", subject);
        Ok(())
    }

    /// Publish a finalized session report
    pub async fn publish_report(&self, record: &SessionRecord) -> Result<()> {
        let subject = self.report_subject();
        let payload = serde_json::to_vec(&ReportMessage::from(record))?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish report")?;

        info!(
            "Published report for session {} to {}",
            record.session_id, subject
        );
        Ok(())
    }

    /// Forward engine metric updates to NATS until the engine goes away
    pub fn forward_updates(
        self: Arc<Self>,
        mut updates: broadcast::Receiver<MetricsUpdate>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Metrics forwarding task started");

            loop {
                match updates.recv().await {
                    Ok(update) => {
                        if let Err(e) = self.publish_metrics(&update).await {
                            warn!("Failed to forward metrics: {:#}", e);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Metrics forwarder lagged, skipped {} updates", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            info!("Metrics forwarding task stopped");
        })
    }
}

#[async_trait::async_trait]
impl ReportStore for NatsClient {
    async fn persist(&self, record: &SessionRecord) -> Result<()> {
        self.publish_report(record).await
    }
}
