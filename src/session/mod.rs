//! Interview session lifecycle
//!
//! This module owns per-session state and the registry that serializes access to it:
//! - `RollingHistory`: fixed-capacity FIFO with a running mean
//! - `RollingAggregator`: windowed eye-contact/confidence means, latest speech metrics, warnings
//! - `SessionState`: one interview's status, questions and aggregator
//! - `SessionManager`: create, dispatch, snapshot, finalize and cancel

mod aggregator;
mod config;
mod history;
mod manager;
mod state;

pub use aggregator::{
    Finalized, FinalizedSnapshot, RollingAggregator, Snapshot, SpeechMetrics, Warnings,
};
pub use config::{AggregatorConfig, RegistryConfig};
pub use history::RollingHistory;
pub use manager::{AudioDispatch, FrameDispatch, MetricsUpdate, SessionManager, SessionSnapshot};
pub use state::{SessionId, SessionState, SessionStatus};
