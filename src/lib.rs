pub mod config;
pub mod error;
pub mod face;
pub mod http;
pub mod nats;
pub mod report;
pub mod session;
pub mod speech;

pub use config::Config;
pub use error::{EngineError, Result};
pub use face::{FrameScore, GeometricScorer, LandmarkFrame, Point};
pub use http::{create_router, AppState};
pub use nats::{MetricsMessage, NatsClient, ReportMessage};
pub use report::{FinalReport, MemoryReportStore, ReportStore, ReportSynthesizer, SessionRecord};
pub use session::{
    MetricsUpdate, RollingAggregator, SessionId, SessionManager, SessionStatus, Snapshot,
};
pub use speech::{AudioScore, AudioScorer, AudioUtterance};
