//! This modules combines the ICS source, the local store and the in-memory cache in a single entry point
//!
//! It is also responsible for downloading the years that are missing locally

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::augment::{augment_years, year_info_for_month, YearTransitionInfo};
use crate::cache::YearCache;
use crate::error::{CalendarError, Result};
use crate::event::Event;
use crate::ical::{self, TranslationTable};
use crate::resolver::dominant;
use crate::store::LocalStore;
use crate::traits::{ConnectivityProbe, IcsSource};
use crate::year::YearEventSet;

pub mod download_progress;
use download_progress::DownloadProgress;
use download_progress::{DownloadEvent, FeedbackSender};


/// The outcome of [`Provider::download_missing_years_only`]
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Years that have just been downloaded
    pub downloaded: Vec<i32>,
    /// Years that were already available locally, and have not been downloaded again
    pub already_available: Vec<i32>,
    /// Years whose download failed
    pub failed: Vec<(i32, CalendarError)>,
}

impl DownloadReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Display for DownloadReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} downloaded, {} already available, {} failed",
            self.downloaded.len(), self.already_available.len(), self.failed.len())
    }
}


/// The entry point of this crate.
///
/// A provider downloads yearly ICS feeds from `remote`, stores their parsed events in `local`, and answers queries
/// about them. Years that have already been read from the disk are kept in memory.
///
/// Usually, `remote` is an [`HttpIcsSource`](crate::client::HttpIcsSource). Tests use a [`MockIcsSource`](crate::mock_behaviour::MockIcsSource) instead.
///
/// Downloading the same year twice at the same time is not prevented: callers should not do that.
pub struct Provider<S, C>
where
    S: IcsSource,
    C: ConnectivityProbe,
{
    /// The remote source (usually a server)
    remote: S,
    /// Tells whether `remote` can be reached at all
    connectivity: C,
    /// The local files
    local: LocalStore,

    cache: YearCache,
    translations: TranslationTable,
}

impl<S, C> Provider<S, C>
where
    S: IcsSource + Sync,
    C: ConnectivityProbe + Sync,
{
    /// Create a provider, that uses the default (Polish) translation table
    pub fn new(remote: S, connectivity: C, local: LocalStore) -> Self {
        Self {
            remote, connectivity, local,
            cache: YearCache::new(),
            translations: TranslationTable::polish(),
        }
    }

    /// Use another translation table for the events downloaded from now on
    pub fn with_translations(mut self, translations: TranslationTable) -> Self {
        self.translations = translations;
        self
    }

    /// Returns the local store
    pub fn local(&self) -> &LocalStore { &self.local }
    /// Returns the remote source.
    ///
    /// Apart from tests, there are very few (if any) reasons to access `remote` directly.
    pub fn remote(&self) -> &S { &self.remote }
    /// Returns the in-memory cache
    pub fn cache(&self) -> &YearCache { &self.cache }


    /// Returns the events of a year, as they are stored locally.
    ///
    /// `Ok(None)` means this year has not been downloaded yet.
    pub async fn get_liturgical_year(&mut self, year: i32) -> Result<Option<Arc<YearEventSet>>> {
        if let Some(events) = self.cache.get(year) {
            return Ok(Some(events));
        }

        match self.local.load_year(year).await? {
            None => Ok(None),
            Some(events) => Ok(Some(self.cache.put(year, events))),
        }
    }

    /// Returns the events of a year, with weekday placeholders added on the days that have no celebration of their own.
    ///
    /// The previous and the next years are loaded as well (when available), so that the end of December and the
    /// start of January can be told apart.
    /// `Ok(None)` means this year has not been downloaded yet.
    pub async fn get_augmented_liturgical_year(&mut self, year: i32) -> Result<Option<YearEventSet>> {
        let local = &self.local;
        let cache = &self.cache;
        let load = |y: i32| async move {
            match cache.get(y) {
                Some(events) => Ok(Some(events)),
                None => local.load_year(y).await.map(|o| o.map(Arc::new)),
            }
        };
        let (previous, current, next) = tokio::join!(load(year - 1), load(year), load(year + 1));

        let current = match current? {
            Some(events) => events,
            None => {
                log::info!("No local data for year {}", year);
                return Ok(None);
            },
        };
        self.cache.put_shared(year, Arc::clone(&current));

        let mut events: Vec<Event> = current.iter().cloned().collect();
        for (y, result) in vec![(year - 1, previous), (year + 1, next)] {
            match result {
                Ok(Some(adjacent)) => {
                    events.extend(adjacent.iter().cloned());
                    self.cache.put_shared(y, adjacent);
                },
                Ok(None) => log::warn!("No local data for year {}, the turn of year {} may be incomplete", y, year),
                Err(err) => log::warn!("Unable to load year {}: {}", y, err),
            }
        }

        Ok(Some(YearEventSet::from(augment_years(events))))
    }

    pub fn is_year_available(&self, year: i32) -> bool {
        self.local.is_year_available(year)
    }

    /// Returns the years that are available locally, ascending
    pub fn get_available_years(&self) -> Vec<i32> {
        self.local.available_years()
    }

    /// Download a year, parse it and store it locally, replacing any previous version.
    pub async fn download_year(&mut self, year: i32) -> Result<()> {
        if self.connectivity.active_transports().await.is_online() == false {
            return Err(CalendarError::NoConnectivity);
        }

        let content = self.remote.fetch_year(year).await?;
        let events = ical::parse(&content, &self.translations);
        if events.is_empty() {
            log::warn!("The feed of year {} has no usable event", year);
        }

        self.local.save_year(year, &events).await?;
        self.cache.invalidate(year);
        log::info!("Year {} downloaded ({} events)", year, events.len());
        Ok(())
    }

    /// Download a year, unless it is already available locally.
    ///
    /// Returns whether a download happened.
    pub async fn download_and_save_year_if_needed(&mut self, year: i32) -> Result<bool> {
        if self.is_year_available(year) {
            return Ok(false);
        }
        self.download_year(year).await?;
        Ok(true)
    }

    /// Download the years that are not available locally, and provide feeedback to the user about the progress.
    ///
    /// A failure does not prevent the next years from being downloaded.
    pub async fn download_missing_years_with_feedback(&mut self, years: &[i32], feedback_sender: FeedbackSender) -> DownloadReport {
        let mut progress = DownloadProgress::new_with_feedback_channel(feedback_sender);
        self.run_downloads(years, &mut progress).await
    }

    /// Download the years that are not available locally, without giving any feedback.
    ///
    /// See [`Self::download_missing_years_with_feedback`]
    pub async fn download_missing_years_only(&mut self, years: &[i32]) -> DownloadReport {
        let mut progress = DownloadProgress::new();
        self.run_downloads(years, &mut progress).await
    }

    async fn run_downloads(&mut self, years: &[i32], progress: &mut DownloadProgress) -> DownloadReport {
        let mut report = DownloadReport::default();
        progress.feedback(DownloadEvent::Started{ n_years: years.len() });

        for &year in years {
            if self.is_year_available(year) {
                progress.debug(&format!("Year {} is already available", year));
                report.already_available.push(year);
                continue;
            }

            progress.feedback(DownloadEvent::InProgress{ year, details: "downloading".to_string() });
            match self.download_year(year).await {
                Ok(()) => {
                    progress.info(&format!("Year {} downloaded", year));
                    report.downloaded.push(year);
                },
                Err(err) => {
                    progress.error(&format!("Unable to download year {}: {}", year, err));
                    report.failed.push((year, err));
                },
            }
        }

        progress.feedback(DownloadEvent::Finished{ success: progress.is_success() });
        report
    }

    /// Returns the event that takes precedence among the events of a day
    pub fn get_dominant_event<'a>(&self, events: &'a [Event]) -> Option<&'a Event> {
        dominant(events)
    }

    /// Tell which liturgical year applies to the month of `date`
    pub fn get_liturgical_year_info(&self, year_data: Option<&YearEventSet>, date: NaiveDate) -> YearTransitionInfo {
        match year_data {
            None => YearTransitionInfo::no_data(),
            Some(data) => year_info_for_month(date.year(), date.month(), data),
        }
    }

    pub fn get_liturgical_year_info_for_month(&self, year: i32, month: u32, year_data: &YearEventSet) -> YearTransitionInfo {
        year_info_for_month(year, month, year_data)
    }

    /// Delete every local year file, and forget every cached year
    pub async fn delete_all_calendar_files(&mut self) -> Result<()> {
        self.cache.clear();
        self.local.delete_all_years().await
    }
}
