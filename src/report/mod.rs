//! Final report synthesis and hand-off to persistence
//!
//! - `ReportSynthesizer` turns a finalized aggregate into a weighted overall
//!   score plus ordered feedback lines
//! - `ReportStore` is the seam to durable storage

mod store;
mod synthesizer;

pub use store::{MemoryReportStore, ReportStore, SessionRecord};
pub use synthesizer::{
    FinalReport, ReportConfig, ReportSynthesizer, ReportWeights, CLARITY_FEEDBACK,
    CONFIDENCE_FEEDBACK, EYE_CONTACT_FEEDBACK, POSITIVE_FEEDBACK, POSITIVE_SPEECH_FEEDBACK,
};
