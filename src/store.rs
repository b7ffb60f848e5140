//! This module stores the parsed calendar years as local JSON files, one file per year

use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::CALENDAR_FOLDER;
use crate::error::{CalendarError, Result};
use crate::event::{Event, StoredEvent};
use crate::year::YearEventSet;


/// The layouts a year file can have
#[derive(Deserialize)]
#[serde(untagged)]
enum YearFile {
    /// A list of records
    List(Vec<serde_json::Value>),
    /// An object that maps the name of each event to its record (older files)
    Legacy(BTreeMap<String, serde_json::Value>),
}

/// A folder that contains one `<year>.json` file per downloaded year
#[derive(Clone, Debug, PartialEq)]
pub struct LocalStore {
    folder: PathBuf,
}

impl LocalStore {
    /// Use (and create if needed) a given folder
    pub fn new<P: Into<PathBuf>>(folder: P) -> Result<Self> {
        let folder = folder.into();
        std::fs::create_dir_all(&folder)
            .map_err(|err| CalendarError::io(&folder, err))?;
        Ok(Self { folder })
    }

    /// Use the calendar folder inside an application data folder
    pub fn in_data_dir(data_dir: &Path) -> Result<Self> {
        Self::new(data_dir.join(CALENDAR_FOLDER))
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Get the path to the file of a year
    pub fn year_path(&self, year: i32) -> PathBuf {
        self.folder.join(format!("{}.json", year))
    }

    pub fn is_year_available(&self, year: i32) -> bool {
        self.year_path(year).is_file()
    }

    /// The years that have a file in this store, ascending
    pub fn available_years(&self) -> Vec<i32> {
        let entries = match std::fs::read_dir(&self.folder) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Unable to list {:?}: {}", self.folder, err);
                return Vec::new();
            },
        };

        let mut years: Vec<i32> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let file_name = entry.file_name();
                let stem = file_name.to_str()?.strip_suffix(".json")?.to_string();
                stem.parse().ok()
            })
            .collect();
        years.sort_unstable();
        years
    }

    /// Load a year from its file.
    ///
    /// Returns `Ok(None)` if this year has no file. Records that cannot be understood are skipped.
    pub async fn load_year(&self, year: i32) -> Result<Option<YearEventSet>> {
        let path = self.year_path(year);
        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(CalendarError::io(path, err)),
        };

        let file: YearFile = serde_json::from_slice(&content)
            .map_err(|err| CalendarError::json(&path, err))?;

        let records: Vec<(Option<String>, serde_json::Value)> = match file {
            YearFile::List(values) => values.into_iter().map(|v| (None, v)).collect(),
            YearFile::Legacy(map) => map.into_iter().map(|(name, v)| (Some(name), v)).collect(),
        };

        let mut n_invalid = 0;
        let mut set = YearEventSet::new();
        for (key, value) in records {
            match record_to_event(key, value) {
                Some(event) => { set.insert(event); },
                None => n_invalid += 1,
            }
        }
        if n_invalid > 0 {
            log::warn!("Skipped {} invalid records in {:?}", n_invalid, path);
        }

        log::debug!("Loaded {} events from {:?}", set.len(), path);
        Ok(Some(set))
    }

    /// Write the whole file of a year, replacing any previous one
    pub async fn save_year(&self, year: i32, events: &[Event]) -> Result<()> {
        let path = self.year_path(year);
        let records: Vec<StoredEvent> = events.iter().cloned().map(StoredEvent::from).collect();
        let content = serde_json::to_vec_pretty(&records)
            .map_err(|err| CalendarError::json(&path, err))?;

        tokio::fs::write(&path, content).await
            .map_err(|err| CalendarError::io(&path, err))?;
        log::debug!("Saved {} events to {:?}", events.len(), path);
        Ok(())
    }

    /// Delete the file of a year. Deleting a missing year is not an error
    pub async fn delete_year(&self, year: i32) -> Result<()> {
        let path = self.year_path(year);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CalendarError::io(path, err)),
        }
    }

    /// Delete the files of every year
    pub async fn delete_all_years(&self) -> Result<()> {
        for year in self.available_years() {
            self.delete_year(year).await?;
        }
        Ok(())
    }
}

fn record_to_event(key: Option<String>, value: serde_json::Value) -> Option<Event> {
    let mut stored: StoredEvent = match serde_json::from_value(value) {
        Ok(s) => s,
        Err(err) => {
            log::debug!("Invalid record: {}", err);
            return None;
        },
    };
    if let Some(name) = key {
        stored.name = name;
    }
    Event::try_from(stored).ok()
}
