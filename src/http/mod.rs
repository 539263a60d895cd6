//! HTTP API over the scoring engine
//!
//! Landmark detection and speech-to-text happen upstream; these routes accept
//! their output:
//! - POST /sessions - Start a new interview session
//! - POST /sessions/:id/frame - Score a landmark frame
//! - POST /sessions/:id/audio - Score a base64 WAV utterance
//! - GET /sessions/:id/snapshot - Current smoothed metrics
//! - POST /sessions/:id/next-question - Advance to the next question
//! - POST /sessions/:id/finalize - Complete and return the report
//! - POST /sessions/:id/cancel - Discard the session
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::ErrorResponse;
pub use routes::create_router;
pub use state::AppState;
