pub mod digest;
pub mod identifiers;

pub use digest::{
    AppliedFilters, BillingItem, Bucket, BulletinItem, DigestDebug, FeedItem, HomepageDigest,
    HomepageSource, OfferItem, OfferSection, ResultCounts, SectionArt,
};
pub use identifiers::{CatalogVersion, ContentId, ContentIdError};
