//! Application state for the TUI.
//!
//! [`App`] wraps the pure [`DashboardState`] with the bits that only matter
//! to a terminal: theme, help overlay, spinner and transient status messages.
//! Every change to the dashboard itself goes through [`App::dispatch`].

use std::time::Instant;

use ratatui::layout::Rect;
use time::UtcOffset;
use tokio::sync::mpsc;

use weatherdash_core::{
    DashboardState, DashboardView, LoaderEvent, Msg, TileOptions, TimeRange, ViewContext, update,
};

use super::ui::theme::AppTheme;

/// Maximum number of queued status messages.
const MAX_STATUS_MESSAGES: usize = 5;

/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Background color for this theme.
    pub fn bg(self) -> ratatui::style::Color {
        match self {
            Self::Dark => ratatui::style::Color::Reset,
            Self::Light => ratatui::style::Color::White,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Main application state for the TUI.
pub struct App {
    /// Dashboard state; replaced by [`update`] on every message.
    pub state: DashboardState,
    /// Receiver for events from the fetch worker.
    pub event_rx: mpsc::Receiver<LoaderEvent>,
    /// Station base URL, shown in the header.
    pub url: String,
    /// Show temperature and heat index in °F.
    pub fahrenheit: bool,
    /// Offset used for labels and the "last updated" tile.
    pub offset: UtcOffset,
    pub theme: Theme,
    pub show_help: bool,
    /// Area of the last drawn frame, used to hit-test mouse clicks.
    pub frame_area: Rect,
    /// Endpoint of the in-flight fetch, if any.
    pub fetching: Option<String>,
    /// Seconds before a status message expires.
    pub status_message_timeout: u64,
    should_quit: bool,
    spinner_frame: usize,
    status_messages: Vec<(String, Instant)>,
}

impl App {
    /// Create a new application in the loading state.
    pub fn new(
        event_rx: mpsc::Receiver<LoaderEvent>,
        url: String,
        range: TimeRange,
        fahrenheit: bool,
        offset: UtcOffset,
        theme: Theme,
    ) -> Self {
        Self {
            state: DashboardState::new(range),
            event_rx,
            url,
            fahrenheit,
            offset,
            theme,
            show_help: false,
            frame_area: Rect::default(),
            fetching: None,
            status_message_timeout: 4,
            should_quit: false,
            spinner_frame: 0,
            status_messages: Vec::new(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Apply a dashboard message.
    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        self.state = update(state, msg);
    }

    /// Handle an event from the fetch worker.
    pub fn handle_loader_event(&mut self, event: LoaderEvent) {
        match &event {
            LoaderEvent::FetchStarted { url } => {
                self.fetching = Some(url.clone());
            }
            LoaderEvent::ReadingsLoaded(readings) => {
                self.fetching = None;
                self.push_status_message(format!("Loaded {} readings", readings.len()));
            }
            LoaderEvent::FetchFailed(_) => {
                self.fetching = None;
            }
        }

        if let Some(msg) = event.into_msg() {
            self.dispatch(msg);
        }
    }

    /// Tile display options for the current settings.
    pub fn tile_options(&self) -> TileOptions {
        TileOptions {
            fahrenheit: self.fahrenheit,
            offset: self.offset,
        }
    }

    /// Derive the render view against the current clock.
    pub fn view(&self) -> DashboardView<'_> {
        let ctx = ViewContext::now_with_offset(self.offset);
        self.state.view(&ctx, &self.tile_options())
    }

    pub fn app_theme(&self) -> AppTheme {
        match self.theme {
            Theme::Dark => AppTheme::dark(),
            Theme::Light => AppTheme::light(),
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 10;
    }

    /// Get the current spinner character.
    pub fn spinner_char(&self) -> &'static str {
        const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        SPINNER[self.spinner_frame]
    }

    pub fn push_status_message(&mut self, message: String) {
        self.status_messages.push((message, Instant::now()));
        while self.status_messages.len() > MAX_STATUS_MESSAGES {
            self.status_messages.remove(0);
        }
    }

    /// Remove expired status messages.
    pub fn clean_expired_messages(&mut self) {
        let timeout = std::time::Duration::from_secs(self.status_message_timeout);
        self.status_messages
            .retain(|(_, created)| created.elapsed() < timeout);
    }

    pub fn current_status_message(&self) -> Option<&str> {
        self.status_messages.last().map(|(msg, _)| msg.as_str())
    }
}
