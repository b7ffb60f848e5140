//! Utilities to track the progression of a batch of downloads

use std::fmt::{Display, Error, Formatter};

/// An event that happens while missing years are downloaded
#[derive(Clone, Debug, PartialEq)]
pub enum DownloadEvent {
    /// Nothing has started
    NotStarted,
    /// Downloads have just started
    Started{ n_years: usize },
    /// A year is being handled
    InProgress{ year: i32, details: String },
    /// Every year has been handled
    Finished{ success: bool },
}

impl Display for DownloadEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            DownloadEvent::NotStarted => write!(f, "Not started"),
            DownloadEvent::Started{n_years} => write!(f, "Downloading {} years...", n_years),
            DownloadEvent::InProgress{year, details} => write!(f, "[{}] {}...", year, details),
            DownloadEvent::Finished{success} => match success {
                true => write!(f, "Downloads successfully finished"),
                false => write!(f, "Downloads finished with errors"),
            }
        }
    }
}

impl Default for DownloadEvent {
    fn default() -> Self {
        Self::NotStarted
    }
}


/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<DownloadEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<DownloadEvent>;

/// Create a feeback channel, that can be used to retrieve the current progress of the downloads
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(DownloadEvent::default())
}


/// A structure that tracks the progression and the errors of a batch of downloads
pub struct DownloadProgress {
    n_errors: u32,
    feedback_channel: Option<FeedbackSender>,
}

impl DownloadProgress {
    pub fn new() -> Self {
        Self { n_errors: 0, feedback_channel: None }
    }
    pub fn new_with_feedback_channel(channel: FeedbackSender) -> Self {
        Self { n_errors: 0, feedback_channel: Some(channel) }
    }

    pub fn is_success(&self) -> bool {
        self.n_errors == 0
    }

    /// Log an error
    pub fn error(&mut self, text: &str) {
        log::error!("{}", text);
        self.n_errors += 1;
    }
    /// Log an info
    pub fn info(&mut self, text: &str) {
        log::info!("{}", text);
    }
    /// Log a debug message
    pub fn debug(&mut self, text: &str) {
        log::debug!("{}", text);
    }
    /// Send an event as a feedback to the listener (if any).
    pub fn feedback(&mut self, event: DownloadEvent) {
        if let Some(sender) = self.feedback_channel.as_ref() {
            // Nobody listening is fine
            let _ = sender.send(event);
        }
    }
}
