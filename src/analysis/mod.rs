//! Scoring for the catfish odds logger.
//!
//! Submodules:
//! - `stability` — barometric stability from logged pressure history.
//! - `odds`      — per-factor scoring and the weighted 0–100 score.

pub mod odds;
pub mod stability;
