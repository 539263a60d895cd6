use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, error, info, warn};

use super::aggregator::Snapshot;
use super::config::{AggregatorConfig, RegistryConfig};
use super::state::{SessionId, SessionState, SessionStatus};
use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::face::{FrameScore, GeometricScorer, LandmarkFrame};
use crate::report::{FinalReport, ReportStore, ReportSynthesizer, SessionRecord};
use crate::speech::{AudioScore, AudioScorer, AudioUtterance};

/// Pushed to observers after every successful dispatch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsUpdate {
    pub session_id: SessionId,
    pub question_index: usize,
    pub snapshot: Snapshot,
    pub timestamp: DateTime<Utc>,
}

/// Raw frame score plus the smoothed state it produced
#[derive(Debug, Clone, Serialize)]
pub struct FrameDispatch {
    pub score: FrameScore,
    pub snapshot: Snapshot,
}

/// Raw utterance score plus the smoothed state it produced
#[derive(Debug, Clone, Serialize)]
pub struct AudioDispatch {
    pub score: AudioScore,
    pub snapshot: Snapshot,
}

/// Read-only view of one active session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub candidate_id: String,
    pub question_index: usize,
    pub current_question: Option<String>,
    pub started_at: DateTime<Utc>,
    pub metrics: Snapshot,
}

type SharedSession = Arc<Mutex<SessionState>>;

/// Live sessions plus a bounded memory of recently closed ids
struct Registry {
    live: HashMap<SessionId, SharedSession>,
    closed: HashMap<SessionId, SessionStatus>,
    closed_order: VecDeque<SessionId>,
    tombstone_capacity: usize,
}

impl Registry {
    fn new(tombstone_capacity: usize) -> Self {
        Self {
            live: HashMap::new(),
            closed: HashMap::new(),
            closed_order: VecDeque::new(),
            tombstone_capacity,
        }
    }

    /// Drop the session from the live map and remember that it was closed
    fn evict(&mut self, id: &SessionId, status: SessionStatus) {
        self.live.remove(id);
        if self.tombstone_capacity == 0 {
            return;
        }
        if self.closed.insert(id.clone(), status).is_none() {
            self.closed_order.push_back(id.clone());
        }
        while self.closed_order.len() > self.tombstone_capacity {
            if let Some(oldest) = self.closed_order.pop_front() {
                self.closed.remove(&oldest);
            }
        }
    }
}

/// Owns every active interview session
///
/// Scoring runs outside any lock. The registry lock is held only for
/// lookups, inserts and evictions; each session has its own mutex so that
/// concurrent frame and audio events for the same session serialize on that
/// session alone. A dispatch that reaches a session after it was finalized
/// fails with `AlreadyFinalized` from the state check, never partially
/// applying.
pub struct SessionManager {
    registry: RwLock<Registry>,
    geometric: Arc<GeometricScorer>,
    audio: Arc<AudioScorer>,
    synthesizer: ReportSynthesizer,
    aggregator_config: AggregatorConfig,
    updates: broadcast::Sender<MetricsUpdate>,
    store: Option<Arc<dyn ReportStore>>,
}

impl SessionManager {
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            GeometricScorer::new(config.face.clone()),
            AudioScorer::new(config.speech.clone()),
            ReportSynthesizer::new(config.report.clone()),
            config.aggregator.clone(),
            &config.registry,
        )
    }

    pub fn from_parts(
        geometric: GeometricScorer,
        audio: AudioScorer,
        synthesizer: ReportSynthesizer,
        aggregator_config: AggregatorConfig,
        registry: &RegistryConfig,
    ) -> Self {
        let (updates, _) = broadcast::channel(registry.observer_capacity.max(1));
        Self {
            registry: RwLock::new(Registry::new(registry.tombstone_capacity)),
            geometric: Arc::new(geometric),
            audio: Arc::new(audio),
            synthesizer,
            aggregator_config,
            updates,
            store: None,
        }
    }

    /// Attach the persistence collaborator that receives finalized sessions
    pub fn with_store(mut self, store: Arc<dyn ReportStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Observe snapshots pushed after each dispatch
    pub fn subscribe(&self) -> broadcast::Receiver<MetricsUpdate> {
        self.updates.subscribe()
    }

    pub async fn active_sessions(&self) -> Vec<SessionId> {
        let registry = self.registry.read().await;
        let mut ids: Vec<SessionId> = registry.live.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Start a new session in the `Active` state
    pub async fn create(&self, candidate_id: impl Into<String>, questions: Vec<String>) -> SessionId {
        let id = SessionId::generate();
        let candidate_id = candidate_id.into();
        let question_count = questions.len();
        let state = SessionState::new(
            id.clone(),
            candidate_id.clone(),
            questions,
            self.aggregator_config.clone(),
        );

        {
            let mut registry = self.registry.write().await;
            registry.live.insert(id.clone(), Arc::new(Mutex::new(state)));
        }

        info!(
            "Created session {} for candidate {} ({} questions)",
            id, candidate_id, question_count
        );
        id
    }

    /// Score one landmark frame and fold it into the session's window
    pub async fn dispatch_frame(&self, id: &SessionId, frame: LandmarkFrame) -> Result<FrameDispatch> {
        // Fail fast before spending time on scoring
        let session = self.live(id).await?;

        let score = self.geometric.score(&frame);
        if !score.face_detected {
            debug!("Session {}: frame without a usable face", id);
        }

        let (snapshot, question_index) = {
            let mut state = session.lock().await;
            let snapshot = state.apply_frame(&score)?;
            (snapshot, state.question_index())
        };

        self.publish(id, question_index, snapshot);
        Ok(FrameDispatch { score, snapshot })
    }

    /// Score one utterance off the async runtime and record it as the latest speech state
    pub async fn dispatch_audio(
        &self,
        id: &SessionId,
        utterance: AudioUtterance,
    ) -> Result<AudioDispatch> {
        let session = self.live(id).await?;

        let scorer = Arc::clone(&self.audio);
        let score = match tokio::task::spawn_blocking(move || scorer.score(&utterance)).await {
            Ok(score) => score,
            Err(e) => {
                error!("Session {}: audio scoring task failed: {}", id, e);
                AudioScore::default()
            }
        };

        let (snapshot, question_index) = {
            let mut state = session.lock().await;
            let snapshot = state.apply_audio(&score)?;
            (snapshot, state.question_index())
        };

        self.publish(id, question_index, snapshot);
        Ok(AudioDispatch { score, snapshot })
    }

    pub async fn snapshot(&self, id: &SessionId) -> Result<SessionSnapshot> {
        let session = self.live(id).await?;
        let state = session.lock().await;
        let metrics = state.snapshot()?;

        Ok(SessionSnapshot {
            session_id: id.clone(),
            candidate_id: state.candidate_id().to_string(),
            question_index: state.question_index(),
            current_question: state.current_question().map(str::to_string),
            started_at: state.started_at(),
            metrics,
        })
    }

    pub async fn advance_question(&self, id: &SessionId) -> Result<Option<String>> {
        let session = self.live(id).await?;
        let mut state = session.lock().await;
        let next = state.advance_question()?;
        debug!("Session {} advanced to question {}", id, state.question_index());
        Ok(next)
    }

    /// Complete the session, synthesize its report and hand it to the store
    pub async fn finalize(&self, id: &SessionId) -> Result<FinalReport> {
        let session = self.closable(id).await?;

        let record = {
            let mut state = session.lock().await;
            let finalized = state.complete()?;
            let report = self.synthesizer.synthesize(&finalized);
            SessionRecord {
                session_id: id.clone(),
                candidate_id: state.candidate_id().to_string(),
                questions: state.questions().to_vec(),
                started_at: state.started_at(),
                ended_at: Utc::now(),
                report,
            }
        };

        {
            let mut registry = self.registry.write().await;
            registry.evict(id, SessionStatus::Completed);
        }

        info!(
            "Finalized session {}: overall score {:.2} over {} frames",
            id, record.report.overall_score, record.report.frames_processed
        );

        if let Some(store) = &self.store {
            if let Err(e) = store.persist(&record).await {
                warn!("Failed to persist report for session {}: {:#}", id, e);
            }
        }

        Ok(record.report)
    }

    /// Discard the session without producing a report
    pub async fn cancel(&self, id: &SessionId) -> Result<()> {
        let session = self.closable(id).await?;

        {
            let mut state = session.lock().await;
            state.cancel()?;
        }

        {
            let mut registry = self.registry.write().await;
            registry.evict(id, SessionStatus::Cancelled);
        }

        info!("Cancelled session {}", id);
        Ok(())
    }

    async fn live(&self, id: &SessionId) -> Result<SharedSession> {
        let registry = self.registry.read().await;
        registry
            .live
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownSession(id.clone()))
    }

    /// Like `live`, but a recently closed id reports `AlreadyFinalized`
    async fn closable(&self, id: &SessionId) -> Result<SharedSession> {
        let registry = self.registry.read().await;
        if let Some(session) = registry.live.get(id) {
            return Ok(Arc::clone(session));
        }
        if registry.closed.contains_key(id) {
            return Err(EngineError::AlreadyFinalized(id.clone()));
        }
        Err(EngineError::UnknownSession(id.clone()))
    }

    fn publish(&self, id: &SessionId, question_index: usize, snapshot: Snapshot) {
        // No receivers is not an error
        let _ = self.updates.send(MetricsUpdate {
            session_id: id.clone(),
            question_index,
            snapshot,
            timestamp: Utc::now(),
        });
    }
}
