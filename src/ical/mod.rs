//! This module handles conversion from the ICS feed to [`crate::Event`]s
//!
//! Line unfolding and property splitting are done by the `ical` crate, the rest (rank codes, color markers, names) is specific to the feed.

mod parser;
pub use parser::parse;
mod translation;
pub use translation::TranslationTable;
