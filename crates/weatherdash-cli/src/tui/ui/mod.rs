//! Layout and rendering for the dashboard.
//!
//! The screen is split top to bottom into:
//!
//! - **Header**: title, station URL and reading count
//! - **Tiles**: one per field of the most recent reading; clicking charts it
//! - **Range bar**: the seven recency windows; clicking selects one
//! - **Chart**: the selected field over the selected range
//! - **Status bar**: spinner, errors, hints and the clock
//!
//! Layout is a pure function of the frame area so mouse clicks can be
//! hit-tested with [`hit_test`] without keeping widget state around.

mod chart;
mod overlays;
pub mod theme;

use chrono::Local;
use ratatui::layout::{Alignment, Position};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use weatherdash_core::{Field, Tile, TimeRange};

use super::app::{App, Theme};
use super::input::field_key;
use theme::{AppTheme, BORDER_TYPE};

/// Something clickable on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Tile(Field),
    Range(TimeRange),
}

/// Split the frame into header, tiles, range bar, chart and status bar.
fn main_layout(area: Rect) -> [Rect; 5] {
    Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(4), // Tiles
        Constraint::Length(3), // Range bar
        Constraint::Min(5),    // Chart
        Constraint::Length(1), // Status bar
    ])
    .areas(area)
}

fn split_even(area: Rect, count: u32) -> Vec<Rect> {
    Layout::horizontal((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
        .to_vec()
}

/// Screen rectangle of each tile, in tile order.
pub fn tile_rects(area: Rect) -> Vec<(Field, Rect)> {
    let [_, tiles, _, _, _] = main_layout(area);
    Field::ALL
        .iter()
        .copied()
        .zip(split_even(tiles, Field::ALL.len() as u32))
        .collect()
}

/// Screen rectangle of each range button.
pub fn range_rects(area: Rect) -> Vec<(TimeRange, Rect)> {
    let [_, _, ranges, _, _] = main_layout(area);
    TimeRange::ALL
        .iter()
        .copied()
        .zip(split_even(ranges, TimeRange::ALL.len() as u32))
        .collect()
}

/// Find what, if anything, sits at `(x, y)`.
pub fn hit_test(area: Rect, x: u16, y: u16) -> Option<Hit> {
    let pos = Position::new(x, y);
    tile_rects(area)
        .into_iter()
        .find(|(_, rect)| rect.contains(pos))
        .map(|(field, _)| Hit::Tile(field))
        .or_else(|| {
            range_rects(area)
                .into_iter()
                .find(|(_, rect)| rect.contains(pos))
                .map(|(range, _)| Hit::Range(range))
        })
}

/// Draw the complete interface.
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = app.app_theme();
    let area = frame.area();

    if matches!(app.theme, Theme::Light) {
        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.bg())),
            area,
        );
    }

    let view = app.view();
    let [header, _, _, content, status] = main_layout(area);

    draw_header(frame, header, app, &theme);
    draw_tiles(frame, area, &view.tiles, &theme);
    draw_range_bar(frame, area, view.selection.range, &theme);
    chart::draw_content(frame, content, app, &view, &theme);
    draw_status_bar(frame, status, app, &theme);

    if app.show_help {
        overlays::draw_help_overlay(frame, &theme);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let count = app.state.readings().len();
    let left = Line::from(vec![
        Span::styled(" weatherdash ", theme.title_style()),
        Span::styled(app.url.as_str(), Style::default().fg(theme.text_secondary)),
    ]);
    let right = Line::from(Span::styled(
        format!("{} readings ", count),
        Style::default().fg(theme.text_muted),
    ));

    frame.render_widget(Paragraph::new(left).style(theme.header_style()), area);
    frame.render_widget(
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .style(theme.header_style()),
        area,
    );
}

fn draw_tiles(frame: &mut Frame, area: Rect, tiles: &[Tile], theme: &AppTheme) {
    for (field, rect) in tile_rects(area) {
        let tile = tiles.iter().find(|t| t.field == field);
        let selected = tile.is_some_and(|t| t.selected);
        let value = tile.map(|t| t.value.as_str()).unwrap_or("--");

        let border_style = if selected {
            theme.border_active_style()
        } else {
            theme.border_inactive_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(border_style)
            .title(Line::from(vec![
                Span::styled(format!("[{}] ", field_key(field)), theme.key_style()),
                Span::styled(field.title(), Style::default().fg(theme.text_secondary)),
            ]));

        let value_style = if selected {
            theme.selected_style()
        } else {
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD)
        };
        let paragraph = Paragraph::new(Span::styled(value.to_string(), value_style))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, rect);
    }
}

fn draw_range_bar(frame: &mut Frame, area: Rect, active: TimeRange, theme: &AppTheme) {
    for (i, (range, rect)) in range_rects(area).into_iter().enumerate() {
        let is_active = range == active;
        let label_style = if is_active {
            theme.selected_style()
        } else {
            Style::default().fg(theme.text_secondary)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(if is_active {
                theme.border_active_style()
            } else {
                theme.border_inactive_style()
            });
        let line = Line::from(vec![
            Span::styled(format!("{} ", i + 1), theme.key_style()),
            Span::styled(range.label(), label_style),
        ]);
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center).block(block),
            rect,
        );
    }
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let time_str = Local::now().format("%H:%M:%S").to_string();

    let left_spans = if let Some(url) = &app.fetching {
        vec![
            Span::styled(
                format!(" {} ", app.spinner_char()),
                Style::default().fg(theme.primary),
            ),
            Span::styled(
                format!("Fetching {}...", url),
                Style::default().fg(theme.text_secondary),
            ),
        ]
    } else if let Some(error) = app.state.error() {
        vec![
            Span::styled(" Error: ", Style::default().fg(theme.danger)),
            Span::styled(error.to_string(), Style::default().fg(theme.text_secondary)),
        ]
    } else if let Some(msg) = app.current_status_message() {
        vec![Span::styled(
            format!(" {}", msg),
            Style::default().fg(theme.text_secondary),
        )]
    } else {
        let hints = [("1-7", "range"), ("←/→", "field"), ("R", "reload"), ("?", "help"), ("q", "quit")];
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(theme.text_muted)));
            }
            spans.push(Span::styled(*key, theme.key_style()));
            spans.push(Span::styled(
                format!(" {}", desc),
                Style::default().fg(theme.text_muted),
            ));
        }
        spans
    };

    let [left, right] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(10)]).areas(area);
    frame.render_widget(Paragraph::new(Line::from(left_spans)), left);
    frame.render_widget(
        Paragraph::new(Span::styled(time_str, Style::default().fg(theme.text_muted)))
            .alignment(Alignment::Right),
        right,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use time::UtcOffset;
    use time::macros::datetime;
    use tokio::sync::mpsc;
    use weatherdash_core::{LoaderEvent, Msg, RainState, Reading, WifiStrength};

    fn app() -> App {
        let (_tx, rx) = mpsc::channel(1);
        App::new(
            rx,
            "http://station.local:3000".to_string(),
            TimeRange::AllTime,
            false,
            UtcOffset::UTC,
            Theme::Dark,
        )
    }

    fn reading(minute: u8, temp: f64, raining: &str) -> Reading {
        Reading {
            time: datetime!(2024-05-01 10:00 UTC) + time::Duration::minutes(minute.into()),
            temperature: temp,
            humidity: 55.0,
            aqi: 30.0,
            wifi_strength: WifiStrength::Numeric(-58.0),
            heat_index: temp + 0.5,
            raining: RainState::from(raining),
        }
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_tiles_and_ranges_do_not_overlap() {
        let area = Rect::new(0, 0, 140, 40);
        let tiles = tile_rects(area);
        let ranges = range_rects(area);

        assert_eq!(tiles.len(), 7);
        assert_eq!(ranges.len(), 7);
        for (_, t) in &tiles {
            for (_, r) in &ranges {
                assert!(!t.intersects(*r));
            }
        }
    }

    #[test]
    fn test_hit_test() {
        let area = Rect::new(0, 0, 140, 40);
        let (field, rect) = tile_rects(area)[0];
        assert_eq!(hit_test(area, rect.x, rect.y), Some(Hit::Tile(field)));

        let (range, rect) = range_rects(area)[6];
        assert_eq!(hit_test(area, rect.x + 2, rect.y + 1), Some(Hit::Range(range)));

        assert_eq!(hit_test(area, 0, 0), None);
        assert_eq!(hit_test(area, 5, 35), None);
    }

    #[test]
    fn test_render_loading() {
        let app = app();
        let screen = render(&app);
        assert!(screen.contains("Loading readings"));
        assert!(screen.contains("All Time"));
    }

    #[test]
    fn test_render_loaded_with_chart() {
        let mut app = app();
        app.handle_loader_event(LoaderEvent::ReadingsLoaded(vec![
            reading(0, 20.0, "No"),
            reading(5, 21.0, "Yes"),
        ]));
        app.dispatch(Msg::SelectField(Field::Temperature));

        let screen = render(&app);
        assert!(screen.contains("Temperature"));
        assert!(screen.contains("21.000°C"));
        assert!(screen.contains("2 readings"));
    }

    #[test]
    fn test_render_without_field_shows_hint() {
        let mut app = app();
        app.handle_loader_event(LoaderEvent::ReadingsLoaded(vec![reading(0, 20.0, "No")]));
        let screen = render(&app);
        assert!(screen.contains("Select a tile"));
    }

    #[test]
    fn test_render_failure_without_data() {
        let mut app = app();
        app.handle_loader_event(LoaderEvent::FetchFailed("connection refused".to_string()));
        let screen = render(&app);
        assert!(screen.contains("connection refused"));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut app = app();
        app.toggle_help();
        let screen = render(&app);
        assert!(screen.contains("Keyboard Shortcuts"));
    }
}
