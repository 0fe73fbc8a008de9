//! Deterministic personalization engine for a corporate knowledge portal.
//!
//! `portal-core` provides the content catalog, viewer-preference model,
//! eligibility filtering, relevance ranking, homepage-digest aggregation,
//! and field-weighted search behind the portal's surfaces. All operations
//! are deterministic — identical catalog snapshots and preference records
//! always produce identical results.

pub mod api;
pub mod content;
pub mod personalization;
pub mod preference;
pub mod search;
pub mod stores;
pub mod types;
