//! Range filtering and field projection over the loaded readings.
//!
//! Everything here is pure: derived views are recomputed from the full
//! reading sequence and the current [`Selection`] on every call, never
//! patched incrementally.
//!
//! ```
//! use time::macros::datetime;
//! use time::UtcOffset;
//! use weatherdash_core::select::{Selection, ViewContext, derive_series};
//! use weatherdash_types::{Field, TimeRange};
//!
//! let ctx = ViewContext::new(datetime!(2024-05-01 12:00 UTC), UtcOffset::UTC);
//! let selection = Selection { field: None, range: TimeRange::AllTime };
//!
//! // No field selected means nothing to chart.
//! assert!(derive_series(&[], &selection, &ctx).is_empty());
//! ```

use serde::Serialize;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing::debug;

use weatherdash_types::{Field, FieldValue, Reading, TimeRange};

/// The user's current field and range choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Field to chart, if any.
    pub field: Option<Field>,
    /// Recency window.
    pub range: TimeRange,
}

/// Clock and display offset used when deriving views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContext {
    /// End of every recency window.
    pub now: OffsetDateTime,
    /// Offset used to render human-readable labels.
    pub offset: UtcOffset,
}

impl ViewContext {
    /// Create a context from an explicit clock and offset.
    pub fn new(now: OffsetDateTime, offset: UtcOffset) -> Self {
        Self { now, offset }
    }

    /// Current time, labels in UTC.
    pub fn now_utc() -> Self {
        Self::new(OffsetDateTime::now_utc(), UtcOffset::UTC)
    }

    /// Current time, labels in the given offset.
    pub fn now_with_offset(offset: UtcOffset) -> Self {
        Self::new(OffsetDateTime::now_utc(), offset)
    }
}

/// One charted point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Reading timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Human-readable x-axis label.
    pub label: String,
    /// y value.
    pub value: FieldValue,
}

/// A filtered, field-projected series ready for charting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    /// Projected field, `None` for the empty series.
    pub field: Option<Field>,
    /// Legend label.
    pub label: String,
    /// Points in reading order.
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Series with nothing to draw.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// x-axis labels, positionally paired with [`Series::values`].
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// y values in order.
    pub fn values(&self) -> Vec<&FieldValue> {
        self.points.iter().map(|p| &p.value).collect()
    }

    /// Points with a numeric y value, as `(unix seconds, value)`.
    ///
    /// Text values that don't parse as numbers are skipped.
    pub fn numeric_points(&self) -> Vec<(f64, f64)> {
        self.numeric()
            .map(|(p, v)| (p.time.unix_timestamp() as f64, v))
            .collect()
    }

    /// Labels of the points kept by [`Series::numeric_points`], in the same order.
    pub fn numeric_labels(&self) -> Vec<&str> {
        self.numeric().map(|(p, _)| p.label.as_str()).collect()
    }

    fn numeric(&self) -> impl Iterator<Item = (&SeriesPoint, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.value.as_f64().map(|v| (p, v)))
    }
}

/// Most recent reading: the last element of the sequence.
///
/// Readings are assumed to arrive in non-decreasing time order; no sort is
/// performed. Returns `None` for an empty sequence.
#[must_use]
pub fn latest(readings: &[Reading]) -> Option<&Reading> {
    readings.last()
}

/// Readings whose time falls within `range` ending at `now`.
///
/// The window start is inclusive. [`TimeRange::AllTime`] returns every
/// reading. Order is preserved.
#[must_use]
pub fn filter_by_range(readings: &[Reading], range: TimeRange, now: OffsetDateTime) -> Vec<&Reading> {
    match range.cutoff(now) {
        None => readings.iter().collect(),
        Some(cutoff) => readings.iter().filter(|r| r.time >= cutoff).collect(),
    }
}

/// Like [`filter_by_range`], taking the range by wire name.
///
/// An unrecognized name yields an empty result.
#[must_use]
pub fn filter_by_range_name<'a>(
    readings: &'a [Reading],
    name: &str,
    now: OffsetDateTime,
) -> Vec<&'a Reading> {
    match name.parse::<TimeRange>() {
        Ok(range) => filter_by_range(readings, range, now),
        Err(e) => {
            debug!(error = %e, "Unrecognized range, nothing selected");
            Vec::new()
        }
    }
}

/// Encode the rain state as 1 ("Yes") or 0 (anything else).
fn rain_value(reading: &Reading) -> FieldValue {
    FieldValue::Number(if reading.raining.is_raining() { 1.0 } else { 0.0 })
}

/// Human-readable time label in the given offset.
pub fn time_label(time: OffsetDateTime, offset: UtcOffset) -> String {
    time.to_offset(offset)
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default()
}

/// Project already-filtered readings onto one field.
///
/// `raining` becomes 1/0; every other field keeps its raw value.
#[must_use]
pub fn project(filtered: &[&Reading], field: Field, offset: UtcOffset) -> Series {
    let points = filtered
        .iter()
        .map(|r| SeriesPoint {
            time: r.time,
            label: time_label(r.time, offset),
            value: match field {
                Field::Raining => rain_value(r),
                other => other.value_of(r),
            },
        })
        .collect();

    let label = match field {
        Field::Raining => "Raining".to_string(),
        other => other.name().to_string(),
    };

    Series {
        field: Some(field),
        label,
        points,
    }
}

/// Filter by the selected range and project the selected field.
///
/// With no field selected the series is empty regardless of range.
#[must_use]
pub fn derive_series(readings: &[Reading], selection: &Selection, ctx: &ViewContext) -> Series {
    let Some(field) = selection.field else {
        return Series::empty();
    };
    let filtered = filter_by_range(readings, selection.range, ctx.now);
    project(&filtered, field, ctx.offset)
}
