//! Platform-agnostic types for weather station telemetry.
//!
//! This crate provides the shared data model used by the HTTP loader
//! (weatherdash-core) and the terminal front-ends (weatherdash-cli).
//!
//! # Features
//!
//! - [`Reading`]: one timestamped telemetry sample, deserializable from the
//!   station's JSON format
//! - [`Field`]: closed set of selectable reading attributes with typed accessors
//! - [`TimeRange`]: named recency windows used for chart filtering
//! - Error types for data parsing
//!
//! # Example
//!
//! ```
//! use weatherdash_types::{Field, Reading, TimeRange};
//!
//! let json = r#"{"time":"2024-05-01T10:00:00Z","temperature":21.5,"humidity":40,
//!     "aqi":12,"wifiStrength":-61,"hi":21.1,"raining":"No"}"#;
//! let reading: Reading = serde_json::from_str(json).unwrap();
//!
//! assert_eq!(Field::Temperature.value_of(&reading).as_f64(), Some(21.5));
//! assert_eq!("lastWeek".parse::<TimeRange>(), Ok(TimeRange::LastWeek));
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    Field, FieldValue, RainState, Reading, TimeRange, WifiStrength, parse_number,
    parse_timestamp, timestamp_from_millis,
};

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_json() -> &'static str {
        r#"{
            "time": "2024-05-01T10:00:00Z",
            "temperature": 21.5,
            "humidity": 40.25,
            "aqi": 12,
            "wifiStrength": -61,
            "hi": 21.1,
            "raining": "No"
        }"#
    }

    // --- Reading deserialization tests ---

    #[test]
    fn test_reading_from_station_json() {
        let reading: Reading = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(reading.time, datetime!(2024-05-01 10:00:00 UTC));
        assert!((reading.temperature - 21.5).abs() < f64::EPSILON);
        assert!((reading.humidity - 40.25).abs() < f64::EPSILON);
        assert!((reading.aqi - 12.0).abs() < f64::EPSILON);
        assert_eq!(reading.wifi_strength, WifiStrength::Numeric(-61.0));
        assert!((reading.heat_index - 21.1).abs() < f64::EPSILON);
        assert_eq!(reading.raining, RainState::No);
    }

    #[test]
    fn test_reading_accepts_numeric_strings() {
        let json = r#"{"time":"2024-05-01 10:00:00","temperature":"23.125","humidity":" 55 ",
            "aqi":"7","wifiStrength":"Strong","hi":"24.0","raining":"Yes"}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();

        assert!((reading.temperature - 23.125).abs() < f64::EPSILON);
        assert!((reading.humidity - 55.0).abs() < f64::EPSILON);
        assert_eq!(reading.wifi_strength, WifiStrength::Text("Strong".to_string()));
        assert!(reading.raining.is_raining());
    }

    #[test]
    fn test_reading_rejects_non_numeric_temperature() {
        let json = r#"{"time":"2024-05-01T10:00:00Z","temperature":"warm","humidity":40,
            "aqi":12,"wifiStrength":-61,"hi":21.1,"raining":"No"}"#;
        let result: Result<Reading, _> = serde_json::from_str(json);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("Invalid number"), "unexpected error: {}", err);
    }

    #[test]
    fn test_reading_epoch_millis_timestamp() {
        let json = r#"{"time":1714557600000,"temperature":1,"humidity":1,
            "aqi":1,"wifiStrength":1,"hi":1,"raining":"No"}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();

        assert_eq!(reading.time, datetime!(2024-05-01 10:00:00 UTC));
    }

    #[test]
    fn test_time_field_is_normalized_to_rfc3339() {
        let json = r#"{"time":1714557600000,"temperature":1,"humidity":1,
            "aqi":1,"wifiStrength":1,"hi":1,"raining":"No"}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();

        assert_eq!(
            Field::Time.value_of(&reading),
            FieldValue::Text("2024-05-01T10:00:00Z".to_string())
        );
    }

    #[test]
    fn test_reading_array_keeps_order() {
        let json = r#"[
            {"time":"2024-05-01T10:00:00Z","temperature":1,"humidity":1,"aqi":1,"wifiStrength":1,"hi":1,"raining":"No"},
            {"time":"2024-05-01T11:00:00Z","temperature":2,"humidity":1,"aqi":1,"wifiStrength":1,"hi":1,"raining":"Yes"}
        ]"#;
        let readings: Vec<Reading> = serde_json::from_str(json).unwrap();

        assert_eq!(readings.len(), 2);
        assert!((readings[1].temperature - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reading_serializes_wire_keys() {
        let reading: Reading = serde_json::from_str(sample_json()).unwrap();
        let json = serde_json::to_string(&reading).unwrap();

        assert!(json.contains("\"wifiStrength\":-61"));
        assert!(json.contains("\"hi\":21.1"));
        assert!(json.contains("\"raining\":\"No\""));
        assert!(json.contains("\"time\":\"2024-05-01T10:00:00Z\""));
    }

    // --- Timestamp parsing tests ---

    #[test]
    fn test_parse_timestamp_with_offset() {
        let dt = parse_timestamp("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(dt, datetime!(2024-05-01 10:00:00 UTC));
    }

    #[test]
    fn test_parse_timestamp_fractional_seconds() {
        let dt = parse_timestamp("2024-05-01T10:00:00.250").unwrap();
        assert_eq!(dt.millisecond(), 250);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        let err = parse_timestamp("01/05/2024").unwrap_err();
        assert_eq!(err, ParseError::InvalidTimestamp("01/05/2024".to_string()));
    }

    // --- RainState tests ---

    #[test]
    fn test_rain_state_exact_match_only() {
        assert_eq!(RainState::from("Yes"), RainState::Yes);
        assert_eq!(RainState::from("No"), RainState::No);
        assert_eq!(RainState::from("YES"), RainState::Other("YES".to_string()));
        assert!(!RainState::from("YES").is_raining());
    }

    #[test]
    fn test_rain_state_roundtrips_unknown_value() {
        let state: RainState = serde_json::from_str("\"drizzle\"").unwrap();
        assert_eq!(serde_json::to_string(&state).unwrap(), "\"drizzle\"");
    }

    // --- Field tests ---

    #[test]
    fn test_field_value_of_each_field() {
        let reading: Reading = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(
            Field::Time.value_of(&reading),
            FieldValue::Text("2024-05-01T10:00:00Z".to_string())
        );
        assert_eq!(Field::Humidity.value_of(&reading), FieldValue::Number(40.25));
        assert_eq!(Field::Aqi.value_of(&reading), FieldValue::Number(12.0));
        assert_eq!(Field::WifiStrength.value_of(&reading), FieldValue::Number(-61.0));
        assert_eq!(Field::HeatIndex.value_of(&reading), FieldValue::Number(21.1));
        assert_eq!(
            Field::Raining.value_of(&reading),
            FieldValue::Text("No".to_string())
        );
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("temperature".parse::<Field>(), Ok(Field::Temperature));
        assert_eq!("WIFISTRENGTH".parse::<Field>(), Ok(Field::WifiStrength));
        assert_eq!("heatIndex".parse::<Field>(), Ok(Field::HeatIndex));
        assert_eq!(
            "pressure".parse::<Field>(),
            Err(ParseError::UnknownField("pressure".to_string()))
        );
    }

    #[test]
    fn test_field_name_roundtrip() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn test_field_cycle_wraps() {
        assert_eq!(Field::Raining.next(), Field::Temperature);
        assert_eq!(Field::Temperature.previous(), Field::Raining);
        let mut field = Field::Temperature;
        for _ in 0..Field::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, Field::Temperature);
    }

    #[test]
    fn test_field_serialization() {
        assert_eq!(serde_json::to_string(&Field::HeatIndex).unwrap(), "\"hi\"");
        assert_eq!(
            serde_json::to_string(&Field::WifiStrength).unwrap(),
            "\"wifiStrength\""
        );
    }

    #[test]
    fn test_field_value_as_f64() {
        assert_eq!(FieldValue::Number(3.5).as_f64(), Some(3.5));
        assert_eq!(FieldValue::Text("-67".to_string()).as_f64(), Some(-67.0));
        assert_eq!(FieldValue::Text("Strong".to_string()).as_f64(), None);
    }

    // --- TimeRange tests ---

    #[test]
    fn test_time_range_names_roundtrip() {
        for range in TimeRange::ALL {
            assert_eq!(range.name().parse::<TimeRange>(), Ok(range));
            assert_eq!(
                serde_json::to_string(&range).unwrap(),
                format!("\"{}\"", range.name())
            );
        }
    }

    #[test]
    fn test_time_range_is_case_sensitive() {
        assert!("lasthour".parse::<TimeRange>().is_err());
        assert!("".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_time_range_windows() {
        use time::Duration;

        assert_eq!(TimeRange::LastHour.window(), Some(Duration::hours(1)));
        assert_eq!(TimeRange::Last6Hours.window(), Some(Duration::hours(6)));
        assert_eq!(TimeRange::Last24Hours.window(), Some(Duration::hours(24)));
        assert_eq!(TimeRange::LastMonth.window(), Some(Duration::days(30)));
        assert_eq!(TimeRange::LastYear.window(), Some(Duration::days(365)));
    }

    #[test]
    fn test_time_range_default_is_last_hour() {
        assert_eq!(TimeRange::default(), TimeRange::LastHour);
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::UnknownRange("fortnight".to_string());
        assert!(err.to_string().starts_with("Unknown range 'fortnight'"));
    }
}
