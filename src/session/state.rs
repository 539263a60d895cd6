use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::aggregator::{FinalizedSnapshot, RollingAggregator, Snapshot};
use super::config::AggregatorConfig;
use crate::error::{EngineError, Result};
use crate::face::FrameScore;
use crate::speech::AudioScore;

/// Engine-generated session identifier (e.g., "interview-<uuid>")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(format!("interview-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Lifecycle status. `Active` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Active,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionStatus::Active)
    }
}

/// Everything the engine keeps for one live interview
#[derive(Debug)]
pub struct SessionState {
    id: SessionId,
    candidate_id: String,
    questions: Vec<String>,
    question_index: usize,
    status: SessionStatus,
    started_at: DateTime<Utc>,
    aggregator: RollingAggregator,
}

impl SessionState {
    pub fn new(
        id: SessionId,
        candidate_id: String,
        questions: Vec<String>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            id,
            candidate_id,
            questions,
            question_index: 0,
            status: SessionStatus::Active,
            started_at: Utc::now(),
            aggregator: RollingAggregator::new(config),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn candidate_id(&self) -> &str {
        &self.candidate_id
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    fn ensure_active(&self) -> Result<()> {
        if self.status.is_terminal() {
            return Err(EngineError::AlreadyFinalized(self.id.clone()));
        }
        Ok(())
    }

    pub fn apply_frame(&mut self, score: &FrameScore) -> Result<Snapshot> {
        self.ensure_active()?;
        self.aggregator
            .update_frame(score)
            .map_err(|_| EngineError::AlreadyFinalized(self.id.clone()))?;
        Ok(self.aggregator.snapshot())
    }

    pub fn apply_audio(&mut self, score: &AudioScore) -> Result<Snapshot> {
        self.ensure_active()?;
        self.aggregator
            .update_audio(score)
            .map_err(|_| EngineError::AlreadyFinalized(self.id.clone()))?;
        Ok(self.aggregator.snapshot())
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        self.ensure_active()?;
        Ok(self.aggregator.snapshot())
    }

    /// The question currently being asked, if any remain
    pub fn current_question(&self) -> Option<&str> {
        self.questions.get(self.question_index).map(String::as_str)
    }

    /// Move to the next question and return it (`None` once exhausted)
    pub fn advance_question(&mut self) -> Result<Option<String>> {
        self.ensure_active()?;
        if self.question_index < self.questions.len() {
            self.question_index += 1;
        }
        Ok(self.current_question().map(str::to_string))
    }

    /// Active → Completed, freezing the aggregator
    pub fn complete(&mut self) -> Result<FinalizedSnapshot> {
        self.ensure_active()?;
        let finalized = self
            .aggregator
            .finalize()
            .map_err(|_| EngineError::AlreadyFinalized(self.id.clone()))?;
        self.status = SessionStatus::Completed;
        Ok(finalized)
    }

    /// Active → Cancelled, discarding the aggregate
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_active()?;
        // The frozen aggregate is dropped with the state; only the status matters here.
        let _ = self.aggregator.finalize();
        self.status = SessionStatus::Cancelled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(questions: &[&str]) -> SessionState {
        SessionState::new(
            SessionId::from("interview-test"),
            "candidate-1".to_string(),
            questions.iter().map(|q| q.to_string()).collect(),
            AggregatorConfig::default(),
        )
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("interview-"));
    }

    #[test]
    fn test_transitions_are_one_way() {
        let mut session = state(&[]);
        session.complete().unwrap();
        assert_eq!(session.status(), SessionStatus::Completed);

        let id = SessionId::from("interview-test");
        assert_eq!(session.cancel(), Err(EngineError::AlreadyFinalized(id.clone())));
        assert_eq!(session.complete().unwrap_err(), EngineError::AlreadyFinalized(id.clone()));
        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(
            session.apply_frame(&FrameScore::no_face()).unwrap_err(),
            EngineError::AlreadyFinalized(id)
        );
    }

    #[test]
    fn test_cancelled_session_rejects_updates() {
        let mut session = state(&[]);
        session.cancel().unwrap();
        assert_eq!(session.status(), SessionStatus::Cancelled);
        assert!(session.apply_audio(&AudioScore::default()).is_err());
        assert!(session.snapshot().is_err());
    }

    #[test]
    fn test_question_progression() {
        let mut session = state(&["Tell me about yourself", "Why this role?"]);
        assert_eq!(session.current_question(), Some("Tell me about yourself"));
        assert_eq!(session.advance_question().unwrap().as_deref(), Some("Why this role?"));
        assert_eq!(session.advance_question().unwrap(), None);
        assert_eq!(session.advance_question().unwrap(), None);
        assert_eq!(session.question_index(), 2);
    }
}
