use serde::{Deserialize, Serialize};

use crate::report::SessionRecord;
use crate::session::MetricsUpdate;

/// Live metrics published after every dispatch
#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsMessage {
    pub session_id: String,
    pub question_index: usize,
    pub eye_contact: f64,
    pub confidence: f64,
    pub speech_clarity: Option<f64>,
    pub speech_fluency: Option<f64>,
    pub frames_seen: u64,
    pub warnings: Vec<String>,
    pub timestamp: String, // RFC3339 timestamp
}

impl From<&MetricsUpdate> for MetricsMessage {
    fn from(update: &MetricsUpdate) -> Self {
        let snapshot = &update.snapshot;
        Self {
            session_id: update.session_id.to_string(),
            question_index: update.question_index,
            eye_contact: snapshot.eye_contact_mean,
            confidence: snapshot.confidence_mean,
            speech_clarity: snapshot.speech.map(|s| s.clarity),
            speech_fluency: snapshot.speech.map(|s| s.fluency),
            frames_seen: snapshot.frames_seen,
            warnings: snapshot
                .warnings
                .messages()
                .into_iter()
                .map(String::from)
                .collect(),
            timestamp: update.timestamp.to_rfc3339(),
        }
    }
}

/// Completed session handed to the downstream storage service
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportMessage {
    pub session_id: String,
    pub candidate_id: String,
    pub questions: Vec<String>,
    pub started_at: String,
    pub ended_at: String,
    pub duration_secs: f64,
    pub overall_score: f64,
    pub eye_contact: f64,
    pub confidence: f64,
    pub speech_clarity: f64,
    pub feedback: Vec<String>,
    pub speech_feedback: Vec<String>,
}

impl From<&SessionRecord> for ReportMessage {
    fn from(record: &SessionRecord) -> Self {
        let report = &record.report;
        Self {
            session_id: record.session_id.to_string(),
            candidate_id: record.candidate_id.clone(),
            questions: record.questions.clone(),
            started_at: record.started_at.to_rfc3339(),
            ended_at: record.ended_at.to_rfc3339(),
            duration_secs: record.duration_secs(),
            overall_score: report.overall_score,
            eye_contact: report.eye_contact_percentage,
            confidence: report.confidence_score,
            speech_clarity: report.speech_clarity,
            feedback: report.feedback.clone(),
            speech_feedback: report.speech_feedback.clone(),
        }
    }
}
