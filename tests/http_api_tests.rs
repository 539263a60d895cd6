mod common;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::Engine;
use common::{speech_with_pauses, synthetic_face, wav_bytes};
use interview_engine::{create_router, AppState, Config, SessionManager};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::new(Arc::new(SessionManager::new(&Config::default()))))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(serde_json::to_vec(&body)?))?,
        None => request.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    Ok((status, value))
}

async fn create_session(app: &Router) -> Result<String> {
    let (status, body) = send(
        app,
        "POST",
        "/sessions",
        Some(json!({ "candidateId": "candidate-1", "questions": ["Q1", "Q2"] })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["sessionId"].as_str().unwrap().to_string())
}

fn landmarks_json() -> Value {
    let frame = synthetic_face(0.01, true, 640);
    let points: Vec<[f64; 2]> = frame.landmarks.iter().map(|p| [p.x, p.y]).collect();
    json!({ "width": frame.width, "height": frame.height, "landmarks": points })
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let (status, body) = send(&app(), "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
    Ok(())
}

#[tokio::test]
async fn test_full_interview_flow() -> Result<()> {
    let app = app();
    let id = create_session(&app).await?;
    assert!(id.starts_with("interview-"));

    let (status, body) = send(&app, "POST", &format!("/sessions/{}/frame", id), Some(landmarks_json())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"]["faceDetected"], true);
    assert_eq!(body["snapshot"]["framesSeen"], 1);

    let wav = wav_bytes(&speech_with_pauses(8, &[1]), 1)?;
    let audio = format!(
        "data:audio/wav;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(wav)
    );
    let (status, body) = send(
        &app,
        "POST",
        &format!("/sessions/{}/audio", id),
        Some(json!({ "audioData": audio, "transcript": "I enjoy hard problems" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"]["wordCount"], 4);
    assert!(body["snapshot"]["speech"].is_object());

    let (status, body) = send(&app, "POST", &format!("/sessions/{}/next-question", id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], "Q2");
    assert_eq!(body["finished"], false);

    let (status, body) = send(&app, "GET", &format!("/sessions/{}/snapshot", id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questionIndex"], 1);
    assert_eq!(body["currentQuestion"], "Q2");

    let (status, body) = send(&app, "POST", &format!("/sessions/{}/finalize", id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["overallScore"].is_number());
    assert_eq!(body["framesProcessed"], 1);
    assert_eq!(body["utterancesProcessed"], 1);

    let (status, body) = send(&app, "POST", &format!("/sessions/{}/finalize", id), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already been finalized"));
    Ok(())
}

#[tokio::test]
async fn test_undecodable_audio_scores_zero() -> Result<()> {
    let app = app();
    let id = create_session(&app).await?;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/sessions/{}/audio", id),
        Some(json!({ "audioData": "definitely not audio" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"]["clarityScore"], 0.0);
    assert_eq!(body["score"]["fluencyScore"], 0.0);
    Ok(())
}

#[tokio::test]
async fn test_empty_landmarks_are_no_face() -> Result<()> {
    let app = app();
    let id = create_session(&app).await?;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/sessions/{}/frame", id),
        Some(json!({ "width": 640, "height": 480, "landmarks": [] })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"]["faceDetected"], false);
    assert_eq!(body["snapshot"]["framesSeen"], 1);
    assert_eq!(body["snapshot"]["windowLen"], 0);
    assert_eq!(body["snapshot"]["warnings"]["lowEyeContact"], false);
    Ok(())
}

#[tokio::test]
async fn test_unknown_session_is_not_found() -> Result<()> {
    let app = app();
    for (method, path) in [
        ("POST", "/sessions/interview-nope/frame"),
        ("GET", "/sessions/interview-nope/snapshot"),
        ("POST", "/sessions/interview-nope/finalize"),
        ("POST", "/sessions/interview-nope/cancel"),
    ] {
        let body = (method == "POST" && path.ends_with("frame")).then(landmarks_json);
        let (status, body) = send(&app, method, path, body).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, path);
        assert!(body["error"].as_str().unwrap().contains("interview-nope"));
    }
    Ok(())
}

#[tokio::test]
async fn test_cancel_then_dispatch() -> Result<()> {
    let app = app();
    let id = create_session(&app).await?;

    let (status, body) = send(&app, "POST", &format!("/sessions/{}/cancel", id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    let (status, _) = send(&app, "POST", &format!("/sessions/{}/frame", id), Some(landmarks_json())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", &format!("/sessions/{}/cancel", id), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}
