//! This crate provides a liturgical calendar, built from yearly ICS feeds.
//!
//! The [`ical`] module parses a feed into [`Event`]s, that carry their rank, their liturgical color and the lectionary
//! cycles ([`cycles`]) that apply to them. Parsed years are stored as JSON files by a [`LocalStore`](store::LocalStore).
//!
//! The feed only lists celebrations: [`augment`] fills the remaining days with weekdays named after their [`season`],
//! and tells which liturgical year applies to a month. Among the events of a day, [`resolver`] finds the one that
//! takes precedence.
//!
//! A [`Provider`](provider::Provider) ties all of these together. It downloads the missing years from an
//! [`IcsSource`](traits::IcsSource) (usually a [`HttpIcsSource`](client::HttpIcsSource)), and keeps the years it has
//! read in memory.

pub mod traits;
pub mod error;
pub use error::{CalendarError, Result};

pub mod event;
pub use event::Event;
pub mod cycles;
pub mod season;
pub mod ical;
pub mod resolver;
pub mod year;
pub use year::YearEventSet;
pub mod augment;

pub mod provider;
pub use provider::Provider;

pub mod client;
pub mod store;
pub mod cache;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
