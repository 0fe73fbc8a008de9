pub mod portal;
pub mod requests;

use thiserror::Error;

pub use portal::Portal;
pub use requests::{
    AlertList, ContentListing, FeedbackAck, FeedbackSubmission, HomepageRequest,
    ListContentRequest, ListContentResponse, NewAlert, OutOfDateStatus, SearchRequest,
    SetOutOfDateRequest,
};

/// Request-surface failure classes. Everything else degrades in place:
/// bucket failures empty their bucket and persistence failures are logged
/// and ignored, so neither ever reaches the caller as an error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
}
