//! Message types for UI/worker communication.
//!
//! ```text
//! +------------------+     Command      +------------------+
//! |    UI Thread     | --------------> |   FetchWorker    |
//! |    (ratatui)     |                 |  (tokio runtime) |
//! |                  | <-------------- |                  |
//! +------------------+   LoaderEvent   +------------------+
//! ```
//!
//! - [`Command`]: sent from the UI thread to the background worker
//! - [`LoaderEvent`]: sent from the worker back to the UI thread

use weatherdash_types::Reading;

use crate::dashboard::Msg;

/// Commands sent from the UI thread to the background worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the full reading history, replacing whatever is loaded.
    Fetch,
    /// Stop the worker.
    Shutdown,
}

/// Events sent from the background worker to the UI thread.
#[derive(Debug, Clone)]
pub enum LoaderEvent {
    /// A fetch has been sent.
    FetchStarted {
        /// Endpoint being fetched.
        url: String,
    },
    /// The history was fetched and decoded.
    ReadingsLoaded(Vec<Reading>),
    /// The fetch failed; the message is ready for display.
    FetchFailed(String),
}

impl LoaderEvent {
    /// The dashboard message this event corresponds to, if any.
    ///
    /// `FetchStarted` carries no state change: the dashboard already moved
    /// to loading when the fetch was requested.
    pub fn into_msg(self) -> Option<Msg> {
        match self {
            LoaderEvent::FetchStarted { .. } => None,
            LoaderEvent::ReadingsLoaded(readings) => Some(Msg::Loaded(readings)),
            LoaderEvent::FetchFailed(error) => Some(Msg::LoadFailed(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_into_msg() {
        assert!(
            LoaderEvent::FetchStarted {
                url: "http://localhost/data".to_string()
            }
            .into_msg()
            .is_none()
        );
        assert!(matches!(
            LoaderEvent::ReadingsLoaded(Vec::new()).into_msg(),
            Some(Msg::Loaded(v)) if v.is_empty()
        ));
        assert!(matches!(
            LoaderEvent::FetchFailed("boom".to_string()).into_msg(),
            Some(Msg::LoadFailed(e)) if e == "boom"
        ));
    }
}
