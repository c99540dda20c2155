//! Presentation hints and summary statistics for charted series.
//!
//! Nothing in here affects which points are charted; it only describes how
//! a renderer should draw them.

use serde::Serialize;

use weatherdash_types::Field;

use crate::select::Series;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Line styling for a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartStyle {
    /// Line color.
    pub border: Rgb,
    /// Fill color.
    pub fill: Rgb,
    /// Fill alpha, 0.0-1.0.
    pub fill_alpha: f32,
    pub border_width: u8,
    pub point_radius: u8,
    pub point_hover_radius: u8,
    /// Curve smoothing.
    pub tension: f32,
}

/// Amber used for the rain series.
pub const RAIN_COLOR: Rgb = Rgb(0xff, 0xce, 0x56);

/// Green used for every other series.
pub const DEFAULT_COLOR: Rgb = Rgb(0x2e, 0x7d, 0x32);

impl ChartStyle {
    /// Style for a field's series.
    pub fn for_field(field: Field) -> Self {
        let color = match field {
            Field::Raining => RAIN_COLOR,
            _ => DEFAULT_COLOR,
        };
        Self {
            border: color,
            fill: color,
            fill_alpha: 0.2,
            border_width: 2,
            point_radius: 4,
            point_hover_radius: 6,
            tension: 0.4,
        }
    }
}

/// Summary statistics over the numeric points of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Number of numeric points.
    pub count: usize,
}

impl SeriesStats {
    /// Compute stats, or `None` if the series has no numeric points.
    pub fn from_series(series: &Series) -> Option<Self> {
        let values: Vec<f64> = series
            .values()
            .iter()
            .filter_map(|v| v.as_f64())
            .collect();
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        Some(Self {
            min,
            max,
            mean,
            count: values.len(),
        })
    }

    /// y-axis bounds starting at zero, padded so the line never touches the frame.
    pub fn y_bounds(&self) -> [f64; 2] {
        let lower = self.min.min(0.0);
        let upper = self.max.max(0.0);
        let pad = ((upper - lower) * 0.1).max(1.0);
        [if lower < 0.0 { lower - pad } else { 0.0 }, upper + pad]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::SeriesPoint;
    use time::macros::datetime;
    use weatherdash_types::FieldValue;

    fn series(values: Vec<FieldValue>) -> Series {
        Series {
            field: Some(Field::Temperature),
            label: "temperature".to_string(),
            points: values
                .into_iter()
                .map(|value| SeriesPoint {
                    time: datetime!(2024-05-01 10:00 UTC),
                    label: "10:00:00".to_string(),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_style_colors() {
        assert_eq!(ChartStyle::for_field(Field::Raining).border.hex(), "#ffce56");
        assert_eq!(ChartStyle::for_field(Field::Humidity).border.hex(), "#2e7d32");
        assert_eq!(ChartStyle::for_field(Field::Aqi).point_radius, 4);
    }

    #[test]
    fn test_stats_skip_text_values() {
        let stats = SeriesStats::from_series(&series(vec![
            FieldValue::Number(10.0),
            FieldValue::Text("n/a".to_string()),
            FieldValue::Number(20.0),
        ]))
        .unwrap();

        assert_eq!(stats.count, 2);
        assert!((stats.min - 10.0).abs() < f64::EPSILON);
        assert!((stats.max - 20.0).abs() < f64::EPSILON);
        assert!((stats.mean - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_empty_series() {
        assert!(SeriesStats::from_series(&Series::empty()).is_none());
    }

    #[test]
    fn test_y_bounds_begin_at_zero() {
        let stats = SeriesStats {
            min: 5.0,
            max: 25.0,
            mean: 15.0,
            count: 2,
        };
        let [lo, hi] = stats.y_bounds();
        assert_eq!(lo, 0.0);
        assert!(hi > 25.0);
    }

    #[test]
    fn test_y_bounds_negative_values() {
        let stats = SeriesStats {
            min: -70.0,
            max: -40.0,
            mean: -55.0,
            count: 2,
        };
        let [lo, hi] = stats.y_bounds();
        assert!(lo < -70.0);
        assert!(hi >= 0.0);
    }
}
