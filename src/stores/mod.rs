pub mod alerts;
pub mod feedback;
pub mod flags;

pub use alerts::{
    AlertDraft, AlertNote, AlertPatch, AlertQuery, AlertRepository, AlertSeverity,
    MemoryAlertStore, SystemAlert,
};
pub use feedback::{
    FeedbackRepository, FeedbackStats, HelpfulnessRecord, IssueRecord, MemoryFeedbackStore,
};
pub use flags::{FlagRepository, MemoryFlagStore};
