//! Dashboard state and its single update function.
//!
//! The state is an immutable record: [`update`] consumes the current state
//! and a [`Msg`] and returns the next state. Readings are held in an
//! `Arc<[Reading]>` so a state is cheap to clone and the sequence is never
//! mutated in place; a reload replaces it wholesale.
//!
//! ```
//! use weatherdash_core::dashboard::{DashboardState, Msg, update};
//! use weatherdash_types::{Field, TimeRange};
//!
//! let state = DashboardState::default();
//! let state = update(state, Msg::SelectField(Field::Humidity));
//! let state = update(state, Msg::SelectRange(TimeRange::LastWeek));
//!
//! assert!(state.is_loading());
//! assert_eq!(state.selection.field, Some(Field::Humidity));
//! assert_eq!(state.selection.range, TimeRange::LastWeek);
//! ```

use std::sync::Arc;

use tracing::debug;

use weatherdash_types::{Field, Reading, TimeRange};

use crate::chart::{ChartStyle, SeriesStats};
use crate::select::{self, Selection, Series, ViewContext};
use crate::tiles::{self, Tile, TileOptions};

/// Where the reading sequence stands.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// A fetch is in flight. `previous` holds the data from an earlier
    /// successful fetch, if any, so a reload doesn't blank the screen.
    Loading { previous: Option<Arc<[Reading]>> },
    /// The sequence from the most recent successful fetch.
    Loaded(Arc<[Reading]>),
    /// The most recent fetch failed.
    Failed {
        error: String,
        previous: Option<Arc<[Reading]>>,
    },
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Loading { previous: None }
    }
}

impl LoadState {
    /// Readings available for display, including stale ones kept across a
    /// reload or failure.
    pub fn readings(&self) -> Option<&Arc<[Reading]>> {
        match self {
            LoadState::Loaded(readings) => Some(readings),
            LoadState::Loading { previous } | LoadState::Failed { previous, .. } => {
                previous.as_ref()
            }
        }
    }
}

/// Inputs to [`update`].
#[derive(Debug, Clone)]
pub enum Msg {
    /// A fetch completed with this sequence.
    Loaded(Vec<Reading>),
    /// A fetch failed.
    LoadFailed(String),
    /// Start a new fetch.
    Reload,
    SelectField(Field),
    ClearField,
    SelectRange(TimeRange),
}

/// Full dashboard state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub load: LoadState,
    pub selection: Selection,
}

impl DashboardState {
    /// Fresh state, loading, with the given starting range and no field.
    pub fn new(range: TimeRange) -> Self {
        Self {
            load: LoadState::default(),
            selection: Selection { field: None, range },
        }
    }

    /// Loaded readings, or an empty slice before the first successful fetch.
    pub fn readings(&self) -> &[Reading] {
        self.load.readings().map(|r| &**r).unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading { .. })
    }

    /// Error from the most recent fetch, if it failed.
    pub fn error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Derive everything the renderer needs.
    pub fn view(&self, ctx: &ViewContext, opts: &TileOptions) -> DashboardView<'_> {
        let readings = self.readings();
        let latest = select::latest(readings);
        let tiles = latest
            .map(|r| tiles::build_tiles(r, self.selection.field, opts))
            .unwrap_or_default();
        let series = select::derive_series(readings, &self.selection, ctx);
        let stats = SeriesStats::from_series(&series);
        let style = self.selection.field.map(ChartStyle::for_field);

        DashboardView {
            latest,
            tiles,
            series,
            stats,
            style,
            selection: self.selection,
        }
    }
}

/// Derived, render-ready view of a [`DashboardState`].
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    /// Most recent reading, `None` when nothing is loaded.
    pub latest: Option<&'a Reading>,
    /// Tiles for `latest`; empty when there is no reading.
    pub tiles: Vec<Tile>,
    /// Filtered, projected series for the selected field.
    pub series: Series,
    pub stats: Option<SeriesStats>,
    /// Style for the selected field's line.
    pub style: Option<ChartStyle>,
    pub selection: Selection,
}

/// Apply one message.
pub fn update(state: DashboardState, msg: Msg) -> DashboardState {
    let DashboardState { load, selection } = state;

    match msg {
        Msg::Loaded(readings) => {
            debug!(count = readings.len(), "Replacing reading sequence");
            DashboardState {
                load: LoadState::Loaded(Arc::from(readings)),
                selection,
            }
        }
        Msg::LoadFailed(error) => DashboardState {
            load: LoadState::Failed {
                error,
                previous: load.readings().cloned(),
            },
            selection,
        },
        Msg::Reload => DashboardState {
            load: LoadState::Loading {
                previous: load.readings().cloned(),
            },
            selection,
        },
        Msg::SelectField(field) => DashboardState {
            load,
            selection: Selection {
                field: Some(field),
                ..selection
            },
        },
        Msg::ClearField => DashboardState {
            load,
            selection: Selection {
                field: None,
                ..selection
            },
        },
        Msg::SelectRange(range) => DashboardState {
            load,
            selection: Selection { range, ..selection },
        },
    }
}
