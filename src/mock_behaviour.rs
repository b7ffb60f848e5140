//! This module provides a mocked ICS source, whose behaviour can be tweaked so that it returns errors on some tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::error::{CalendarError, Result};
use crate::traits::IcsSource;

/// Status code returned by a [`MockIcsSource`] when its behaviour requires a failure
pub const MOCK_FAILURE_CODE: u16 = 503;
/// Status code returned by a [`MockIcsSource`] for a year it has no feed for
pub const MOCK_NOT_FOUND_CODE: u16 = 404;

/// This stores some behaviour tweaks, that describe how a mocked instance will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    // From the IcsSource trait
    pub fetch_year_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetch will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            fetch_year_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_fetch_year(&mut self) -> std::result::Result<(), String> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.fetch_year_behaviour, "fetch_year")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> std::result::Result<(), String> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 -= 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 -= 1;
        log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
        Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value))
    } else {
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}


/// An [`IcsSource`] that serves canned feeds, and counts how many times it has been asked for one
#[derive(Debug, Default)]
pub struct MockIcsSource {
    feeds: HashMap<i32, String>,
    behaviour: Arc<Mutex<MockBehaviour>>,
    n_fetches: AtomicU32,
}

impl MockIcsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `content` as the feed of `year`
    pub fn with_year<S: ToString>(mut self, year: i32, content: S) -> Self {
        self.feeds.insert(year, content.to_string());
        self
    }

    /// Share a behaviour, so that a test can change it while the source is owned by a provider
    pub fn with_behaviour(mut self, behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        self.behaviour = behaviour;
        self
    }

    /// How many times [`IcsSource::fetch_year`] has been called
    pub fn n_fetches(&self) -> u32 {
        self.n_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IcsSource for MockIcsSource {
    async fn fetch_year(&self, year: i32) -> Result<String> {
        self.n_fetches.fetch_add(1, Ordering::SeqCst);

        let allowed = match self.behaviour.lock() {
            Ok(mut behaviour) => behaviour.can_fetch_year(),
            Err(poisoned) => poisoned.into_inner().can_fetch_year(),
        };
        if let Err(reason) = allowed {
            log::debug!("{}", reason);
            return Err(CalendarError::ServerError { year, code: MOCK_FAILURE_CODE });
        }

        self.feeds.get(&year)
            .cloned()
            .ok_or(CalendarError::ServerError { year, code: MOCK_NOT_FOUND_CODE })
    }
}
