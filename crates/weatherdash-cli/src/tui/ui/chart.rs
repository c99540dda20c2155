//! Chart panel.

use ratatui::layout::Alignment;
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};

use weatherdash_core::{DashboardView, LoadState, Series};

use super::theme::{AppTheme, BORDER_TYPE, rgb_color};
use crate::tui::app::App;

/// How many labels to list for series without numeric values.
const MAX_TEXT_ROWS: usize = 200;

pub(super) fn draw_content(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    view: &DashboardView<'_>,
    theme: &AppTheme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_inactive_style());

    if app.state.readings().is_empty() {
        let lines = match &app.state.load {
            LoadState::Loading { .. } => vec![Line::from(Span::styled(
                format!("{} Loading readings from {}...", app.spinner_char(), app.url),
                Style::default().fg(theme.text_secondary),
            ))],
            LoadState::Failed { error, .. } => vec![
                Line::from(Span::styled(
                    "Could not load readings",
                    Style::default()
                        .fg(theme.danger)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    error.as_str(),
                    Style::default().fg(theme.text_secondary),
                )),
                Line::from(""),
                hint_line("R", "to retry", theme),
            ],
            LoadState::Loaded(_) => vec![Line::from(Span::styled(
                "The station returned no readings.",
                Style::default().fg(theme.text_secondary),
            ))],
        };
        draw_message(frame, area, lines, block);
        return;
    }

    let Some(field) = view.selection.field else {
        draw_message(
            frame,
            area,
            vec![
                Line::from(Span::styled(
                    "Select a tile to chart a field",
                    Style::default().fg(theme.text_secondary),
                )),
                Line::from(""),
                hint_line("t h a m w i r", "or click a tile", theme),
            ],
            block,
        );
        return;
    };

    let title = format!(" {} - {} ", field.title(), view.selection.range.label());
    let block = block
        .title(Span::styled(title, theme.title_style()))
        .border_style(theme.border_active_style());

    if view.series.is_empty() {
        draw_message(
            frame,
            area,
            vec![Line::from(Span::styled(
                format!("No readings in {}", view.selection.range.label()),
                Style::default().fg(theme.text_secondary),
            ))],
            block,
        );
        return;
    }

    let points = view.series.numeric_points();
    if points.is_empty() {
        draw_text_series(frame, area, &view.series, block, theme);
        return;
    }

    let [chart_area, legend_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    let color = view
        .style
        .map(|s| rgb_color(s.border))
        .unwrap_or(theme.primary);
    let dataset = Dataset::default()
        .name(view.series.label.clone())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let x_bounds = x_bounds(&points);
    let x_labels = x_labels(&view.series);
    let y_bounds = view.stats.map(|s| s.y_bounds()).unwrap_or([0.0, 1.0]);
    let y_labels = [
        format!("{:.1}", y_bounds[0]),
        format!("{:.1}", (y_bounds[0] + y_bounds[1]) / 2.0),
        format!("{:.1}", y_bounds[1]),
    ];

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.text_muted))
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.text_muted))
                .bounds(y_bounds)
                .labels(y_labels),
        );
    frame.render_widget(chart, chart_area);

    if let Some(stats) = view.stats {
        let legend = Line::from(vec![
            Span::styled(
                format!(" Min: {:.2} ", stats.min),
                Style::default().fg(theme.success),
            ),
            Span::styled(
                format!(" Max: {:.2} ", stats.max),
                Style::default().fg(theme.danger),
            ),
            Span::styled(
                format!(" Mean: {:.2} ", stats.mean),
                Style::default().fg(theme.text_secondary),
            ),
            Span::styled(
                format!(" Points: {} ", view.series.len()),
                Style::default().fg(theme.text_muted),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(legend).alignment(Alignment::Center),
            legend_area,
        );
    }
}

fn hint_line<'a>(key: &'a str, desc: &'a str, theme: &AppTheme) -> Line<'a> {
    Line::from(vec![
        Span::styled("Press ", Style::default().fg(theme.text_muted)),
        Span::styled(key, theme.key_style()),
        Span::styled(format!(" {}", desc), Style::default().fg(theme.text_muted)),
    ])
}

fn draw_message(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>, block: Block<'_>) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = lines.len() as u16;
    let top = inner.y + inner.height.saturating_sub(height) / 2;
    let centered = Rect::new(inner.x, top, inner.width, height.min(inner.height));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered,
    );
}

/// List the most recent labels and values, newest first.
fn draw_text_series(frame: &mut Frame, area: Rect, series: &Series, block: Block<'_>, theme: &AppTheme) {
    let lines: Vec<Line> = series
        .points
        .iter()
        .rev()
        .take(MAX_TEXT_ROWS)
        .map(|p| {
            Line::from(vec![
                Span::styled(
                    format!(" {:>20}  ", p.label),
                    Style::default().fg(theme.text_muted),
                ),
                Span::styled(p.value.to_string(), Style::default().fg(theme.text_primary)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn x_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    if max > min {
        [min, max]
    } else {
        [min - 30.0, max + 30.0]
    }
}

/// First, middle and last labels of the plotted points.
fn x_labels(series: &Series) -> Vec<String> {
    let labels = series.numeric_labels();
    match labels.len() {
        0 => Vec::new(),
        1 => vec![labels[0].to_string()],
        2 => vec![labels[0].to_string(), labels[1].to_string()],
        n => vec![
            labels[0].to_string(),
            labels[n / 2].to_string(),
            labels[n - 1].to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use weatherdash_core::select::time_label;
    use weatherdash_core::{Field, FieldValue, SeriesPoint};

    #[test]
    fn test_x_bounds_pads_single_point() {
        assert_eq!(x_bounds(&[(100.0, 1.0)]), [70.0, 130.0]);
        assert_eq!(x_bounds(&[(100.0, 1.0), (160.0, 2.0)]), [100.0, 160.0]);
    }

    fn point(time: time::OffsetDateTime, value: FieldValue) -> SeriesPoint {
        SeriesPoint {
            time,
            label: time_label(time, time::UtcOffset::UTC),
            value,
        }
    }

    #[test]
    fn test_x_labels_skip_text_points() {
        let series = Series {
            field: Some(Field::WifiStrength),
            label: "wifiStrength".to_string(),
            points: vec![
                point(datetime!(2024-05-01 10:00 UTC), FieldValue::Text("Weak".to_string())),
                point(datetime!(2024-05-01 10:30 UTC), FieldValue::Number(-50.0)),
                point(datetime!(2024-05-01 11:00 UTC), FieldValue::Number(-48.0)),
            ],
        };

        let points = series.numeric_points();
        assert_eq!(
            x_bounds(&points),
            [
                datetime!(2024-05-01 10:30 UTC).unix_timestamp() as f64,
                datetime!(2024-05-01 11:00 UTC).unix_timestamp() as f64,
            ]
        );
        assert_eq!(x_labels(&series), vec!["10:30:00", "11:00:00"]);
    }
}
