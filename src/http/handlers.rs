use super::state::AppState;
use crate::error::EngineError;
use crate::face::{FrameScore, LandmarkFrame, Point};
use crate::session::{SessionId, Snapshot};
use crate::speech::{AudioScore, AudioUtterance};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub candidate_id: String,

    /// Interview questions, in the order they will be asked
    #[serde(default)]
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct FrameRequest {
    pub width: u32,
    pub height: u32,

    /// Normalized `[x, y]` pairs in landmark-index order; empty when no face was found
    #[serde(default)]
    pub landmarks: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize)]
pub struct FrameResponse {
    pub score: FrameScore,
    pub snapshot: Snapshot,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRequest {
    /// Base64 WAV bytes, optionally as a data URL
    pub audio_data: String,

    /// Transcript from the speech-to-text service, if any
    pub transcript: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AudioResponse {
    pub score: AudioScore,
    pub snapshot: Snapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionResponse {
    pub session_id: SessionId,
    pub question: Option<String>,
    pub finished: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    pub session_id: SessionId,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = match &self {
            EngineError::UnknownSession(_) => StatusCode::NOT_FOUND,
            EngineError::AlreadyFinalized(_) => StatusCode::CONFLICT,
            EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions
/// Start a new interview session
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    let session_id = state.engine.create(req.candidate_id, req.questions).await;

    (
        StatusCode::OK,
        Json(CreateSessionResponse {
            session_id,
            status: "active".to_string(),
        }),
    )
}

/// POST /sessions/:session_id/frame
/// Score one frame of already-extracted landmarks
pub async fn submit_frame(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<FrameRequest>,
) -> Result<Json<FrameResponse>, EngineError> {
    let landmarks = req
        .landmarks
        .iter()
        .map(|[x, y]| Point::new(*x, *y))
        .collect();
    let frame = LandmarkFrame::new(landmarks, req.width, req.height);

    let dispatch = state
        .engine
        .dispatch_frame(&SessionId::from(session_id), frame)
        .await?;

    Ok(Json(FrameResponse {
        score: dispatch.score,
        snapshot: dispatch.snapshot,
    }))
}

/// POST /sessions/:session_id/audio
/// Score one utterance; undecodable audio is scored as silence
pub async fn submit_audio(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<AudioRequest>,
) -> Result<Json<AudioResponse>, EngineError> {
    let session_id = SessionId::from(session_id);
    let utterance = match decode_audio(&req.audio_data, req.transcript) {
        Ok(utterance) => utterance,
        Err(e) => {
            warn!("Session {}: {}", session_id, e);
            AudioUtterance::empty()
        }
    };

    let dispatch = state.engine.dispatch_audio(&session_id, utterance).await?;

    Ok(Json(AudioResponse {
        score: dispatch.score,
        snapshot: dispatch.snapshot,
    }))
}

/// GET /sessions/:session_id/snapshot
/// Current smoothed metrics and warnings
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    let snapshot = state.engine.snapshot(&SessionId::from(session_id)).await?;
    Ok(Json(snapshot))
}

/// POST /sessions/:session_id/next-question
pub async fn next_question(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<NextQuestionResponse>, EngineError> {
    let session_id = SessionId::from(session_id);
    let question = state.engine.advance_question(&session_id).await?;

    Ok(Json(NextQuestionResponse {
        session_id,
        finished: question.is_none(),
        question,
    }))
}

/// POST /sessions/:session_id/finalize
/// Complete the session and return its report
pub async fn finalize_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    let session_id = SessionId::from(session_id);
    info!("Finalizing session: {}", session_id);

    let report = state.engine.finalize(&session_id).await?;
    Ok(Json(report))
}

/// POST /sessions/:session_id/cancel
pub async fn cancel_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CancelResponse>, EngineError> {
    let session_id = SessionId::from(session_id);
    state.engine.cancel(&session_id).await?;

    Ok(Json(CancelResponse {
        session_id,
        status: "cancelled".to_string(),
    }))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn decode_audio(data: &str, transcript: Option<String>) -> Result<AudioUtterance, EngineError> {
    // Strip a "data:audio/wav;base64," prefix
    let encoded = data.split_once(',').map_or(data, |(_, rest)| rest);

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| EngineError::InvalidInput(format!("Invalid base64 audio: {}", e)))?;

    AudioUtterance::from_wav_bytes(&bytes, transcript)
}
