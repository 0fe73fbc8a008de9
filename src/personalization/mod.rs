pub mod digest;
pub mod filter;
pub mod ranking;

pub use digest::{
    empty_digest, Classifier, ClassifyError, DigestBuilder, TermClassifier,
    DEFAULT_BILLING_IMAGE, DEFAULT_BULLETINS_IMAGE, DEFAULT_OFFERS_IMAGE,
};
pub use filter::{
    is_eligible, Dimension, BILLING_DIMENSIONS, BULLETIN_DIMENSIONS, FEED_DIMENSIONS,
    OFFER_DIMENSIONS,
};
pub use ranking::{rank_billing, rank_bulletins, rank_by_recency, rank_offers};
