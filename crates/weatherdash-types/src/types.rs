//! Core types for weather station telemetry.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

use crate::error::{ParseError, ParseResult};

/// Rain sensor state as reported by the station.
///
/// Stations report `"Yes"` or `"No"`. Anything else is kept verbatim in
/// [`RainState::Other`] so that it can still be displayed, but it never
/// counts as rain.
///
/// ```
/// use weatherdash_types::RainState;
///
/// assert!(RainState::from("Yes").is_raining());
/// assert!(!RainState::from("yes").is_raining());
/// assert_eq!(RainState::from("maybe").as_str(), "maybe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum RainState {
    /// It is raining.
    Yes,
    /// It is not raining.
    No,
    /// Unrecognized value, preserved as sent.
    Other(String),
}

impl RainState {
    /// Returns `true` only for an exact `"Yes"`.
    #[must_use]
    pub fn is_raining(&self) -> bool {
        matches!(self, RainState::Yes)
    }

    /// The value as the station sent it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            RainState::Yes => "Yes",
            RainState::No => "No",
            RainState::Other(s) => s,
        }
    }
}

impl From<String> for RainState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Yes" => RainState::Yes,
            "No" => RainState::No,
            _ => RainState::Other(value),
        }
    }
}

impl From<&str> for RainState {
    fn from(value: &str) -> Self {
        RainState::from(value.to_string())
    }
}

impl From<RainState> for String {
    fn from(value: RainState) -> Self {
        match value {
            RainState::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for RainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WiFi signal indicator. Some firmwares send dBm, others a label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum WifiStrength {
    /// Numeric signal value (typically RSSI in dBm).
    Numeric(f64),
    /// Free-form signal description.
    Text(String),
}

impl fmt::Display for WifiStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WifiStrength::Numeric(n) => write!(f, "{}", n),
            WifiStrength::Text(s) => f.write_str(s),
        }
    }
}

/// One timestamped sample from the weather station.
///
/// The wire format uses camelCase keys (`wifiStrength`) and `hi` for the
/// heat index. Numeric fields accept JSON numbers as well as numeric strings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Reading {
    /// When the sample was taken.
    #[cfg_attr(feature = "serde", serde(with = "timestamp"))]
    pub time: OffsetDateTime,
    /// Air temperature in °C.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "number::deserialize"))]
    pub temperature: f64,
    /// Relative humidity in percent.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "number::deserialize"))]
    pub humidity: f64,
    /// Air quality index.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "number::deserialize"))]
    pub aqi: f64,
    /// WiFi signal indicator.
    pub wifi_strength: WifiStrength,
    /// Heat index ("feels like") in °C.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "hi", deserialize_with = "number::deserialize")
    )]
    pub heat_index: f64,
    /// Rain sensor state.
    pub raining: RainState,
}

/// A single field value extracted from a [`Reading`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// Numeric value.
    Number(f64),
    /// Textual value.
    Text(String),
}

impl FieldValue {
    /// Numeric interpretation of the value, if it has one.
    ///
    /// Text that parses as a number (e.g. `"-67"`) is accepted.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Reading attribute that can be selected for charting.
///
/// This is a closed set; each variant knows how to extract its own value
/// from a [`Reading`] via [`Field::value_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Field {
    /// Sample timestamp.
    Time,
    /// Air temperature.
    Temperature,
    /// Relative humidity.
    Humidity,
    /// Air quality index.
    Aqi,
    /// WiFi signal indicator.
    WifiStrength,
    /// Heat index.
    #[cfg_attr(feature = "serde", serde(rename = "hi"))]
    HeatIndex,
    /// Rain state.
    Raining,
}

impl Field {
    /// All fields in tile order.
    pub const ALL: [Field; 7] = [
        Field::Temperature,
        Field::Humidity,
        Field::Aqi,
        Field::Time,
        Field::WifiStrength,
        Field::HeatIndex,
        Field::Raining,
    ];

    /// Wire name of the field (the JSON key).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::Aqi => "aqi",
            Field::WifiStrength => "wifiStrength",
            Field::HeatIndex => "hi",
            Field::Raining => "raining",
        }
    }

    /// Human-readable title used on tiles and chart legends.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Field::Time => "Time (Last Updated)",
            Field::Temperature => "Temperature",
            Field::Humidity => "Humidity",
            Field::Aqi => "AQI",
            Field::WifiStrength => "Wifi Strength",
            Field::HeatIndex => "Heat Index (Feels Like)",
            Field::Raining => "Raining",
        }
    }

    /// Extract this field's raw value from a reading.
    ///
    /// `Time` yields RFC 3339 text in UTC whatever form the station sent
    /// (epoch millis, offset-less); `Raining` yields the string as sent.
    #[must_use]
    pub fn value_of(self, reading: &Reading) -> FieldValue {
        match self {
            Field::Time => FieldValue::Text(
                reading
                    .time
                    .format(&Rfc3339)
                    .unwrap_or_else(|_| reading.time.to_string()),
            ),
            Field::Temperature => FieldValue::Number(reading.temperature),
            Field::Humidity => FieldValue::Number(reading.humidity),
            Field::Aqi => FieldValue::Number(reading.aqi),
            Field::WifiStrength => match &reading.wifi_strength {
                WifiStrength::Numeric(n) => FieldValue::Number(*n),
                WifiStrength::Text(s) => FieldValue::Text(s.clone()),
            },
            Field::HeatIndex => FieldValue::Number(reading.heat_index),
            Field::Raining => FieldValue::Text(reading.raining.as_str().to_string()),
        }
    }

    /// Position of this field in [`Field::ALL`].
    fn index(self) -> usize {
        Field::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field in tile order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    /// Previous field in tile order, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let len = Field::ALL.len();
        Field::ALL[(self.index() + len - 1) % len]
    }
}

impl FromStr for Field {
    type Err = ParseError;

    /// Parse a field from its wire name (case-insensitive).
    ///
    /// ```
    /// use weatherdash_types::Field;
    ///
    /// assert_eq!("wifiStrength".parse::<Field>(), Ok(Field::WifiStrength));
    /// assert_eq!("hi".parse::<Field>(), Ok(Field::HeatIndex));
    /// assert!("pressure".parse::<Field>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(Field::Time),
            "temperature" => Ok(Field::Temperature),
            "humidity" => Ok(Field::Humidity),
            "aqi" => Ok(Field::Aqi),
            "wifistrength" => Ok(Field::WifiStrength),
            "hi" | "heatindex" => Ok(Field::HeatIndex),
            "raining" => Ok(Field::Raining),
            _ => Err(ParseError::UnknownField(s.to_string())),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recency window used to filter readings for charting.
///
/// # Display vs Serialization
///
/// `Display` returns the wire name (`"lastHour"`), which is also what serde
/// uses. [`TimeRange::label`] gives the button caption (`"Last Hour"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TimeRange {
    /// Last 60 minutes.
    #[default]
    LastHour,
    /// Last 6 hours.
    Last6Hours,
    /// Last 24 hours.
    Last24Hours,
    /// Last 7 days.
    LastWeek,
    /// Last 30 days.
    LastMonth,
    /// Last 365 days.
    LastYear,
    /// Every reading.
    AllTime,
}

impl TimeRange {
    /// All ranges in button order.
    pub const ALL: [TimeRange; 7] = [
        TimeRange::LastHour,
        TimeRange::Last6Hours,
        TimeRange::Last24Hours,
        TimeRange::LastWeek,
        TimeRange::LastMonth,
        TimeRange::LastYear,
        TimeRange::AllTime,
    ];

    /// Wire name of the range.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TimeRange::LastHour => "lastHour",
            TimeRange::Last6Hours => "last6Hours",
            TimeRange::Last24Hours => "last24Hours",
            TimeRange::LastWeek => "lastWeek",
            TimeRange::LastMonth => "lastMonth",
            TimeRange::LastYear => "lastYear",
            TimeRange::AllTime => "allTime",
        }
    }

    /// Button caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TimeRange::LastHour => "Last Hour",
            TimeRange::Last6Hours => "Last 6 Hours",
            TimeRange::Last24Hours => "Last 24 Hours",
            TimeRange::LastWeek => "Last Week",
            TimeRange::LastMonth => "Last Month",
            TimeRange::LastYear => "Last Year",
            TimeRange::AllTime => "All Time",
        }
    }

    /// Length of the window, or `None` for [`TimeRange::AllTime`].
    ///
    /// ```
    /// use time::Duration;
    /// use weatherdash_types::TimeRange;
    ///
    /// assert_eq!(TimeRange::LastWeek.window(), Some(Duration::days(7)));
    /// assert_eq!(TimeRange::AllTime.window(), None);
    /// ```
    #[must_use]
    pub fn window(self) -> Option<Duration> {
        match self {
            TimeRange::LastHour => Some(Duration::hours(1)),
            TimeRange::Last6Hours => Some(Duration::hours(6)),
            TimeRange::Last24Hours => Some(Duration::hours(24)),
            TimeRange::LastWeek => Some(Duration::days(7)),
            TimeRange::LastMonth => Some(Duration::days(30)),
            TimeRange::LastYear => Some(Duration::days(365)),
            TimeRange::AllTime => None,
        }
    }

    /// Earliest included instant for a window ending at `now`.
    #[must_use]
    pub fn cutoff(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        self.window().map(|w| now - w)
    }
}

impl FromStr for TimeRange {
    type Err = ParseError;

    /// Parse a range from its exact wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| ParseError::UnknownRange(s.to_string()))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a station timestamp.
///
/// Accepts RFC 3339 (with any offset) and the offset-less forms
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` (optionally with fractional
/// seconds), which are taken as UTC.
///
/// ```
/// use weatherdash_types::parse_timestamp;
///
/// let a = parse_timestamp("2024-05-01T10:00:00Z").unwrap();
/// let b = parse_timestamp("2024-05-01 10:00:00").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_timestamp("yesterday").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> ParseResult<OffsetDateTime> {
    let trimmed = s.trim();
    if let Ok(dt) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(dt);
    }

    PrimitiveDateTime::parse(
        trimmed,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            trimmed,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            trimmed,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            trimmed,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        )
    })
    .map(PrimitiveDateTime::assume_utc)
    .map_err(|_| ParseError::InvalidTimestamp(s.to_string()))
}

/// Convert Unix epoch milliseconds to a UTC timestamp.
pub fn timestamp_from_millis(millis: i64) -> ParseResult<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|e| ParseError::InvalidTimestamp(format!("{}: {}", millis, e)))
}

/// Parse a numeric field sent as text.
pub fn parse_number(s: &str) -> ParseResult<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(s.to_string()))
}

#[cfg(feature = "serde")]
mod timestamp {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time::serde::rfc3339::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Millis(ms) => {
                super::timestamp_from_millis(ms).map_err(serde::de::Error::custom)
            }
            RawTimestamp::Text(s) => super::parse_timestamp(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(feature = "serde")]
mod number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match RawNumber::deserialize(deserializer)? {
            RawNumber::Number(n) => Ok(n),
            RawNumber::Text(s) => super::parse_number(&s).map_err(serde::de::Error::custom),
        }
    }
}
