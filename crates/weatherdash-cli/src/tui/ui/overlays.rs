//! Help overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use weatherdash_core::{Field, TimeRange};

use super::theme::{AppTheme, BORDER_TYPE};
use crate::tui::input::field_key;

/// Draw help overlay with keyboard shortcuts.
pub(super) fn draw_help_overlay(frame: &mut Frame, theme: &AppTheme) {
    let area = frame.area();
    let width = (area.width * 70 / 100)
        .max(60)
        .min(area.width.saturating_sub(2));
    let height = 20.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;

    let help_area = Rect::new(x, y, width, height);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(Span::styled(" Keyboard Shortcuts ", theme.title_style()))
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_active_style());
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .margin(1)
            .areas(inner);

    let mut left_lines = vec![section_line("--- Fields ---", theme), Line::from("")];
    left_lines.extend(
        Field::ALL
            .iter()
            .map(|f| shortcut_line(&field_key(*f).to_string(), f.title(), theme)),
    );
    left_lines.push(shortcut_line("←/→", "Previous/next field", theme));
    left_lines.push(shortcut_line("Esc/0", "Clear chart", theme));

    let mut right_lines = vec![section_line("--- Ranges ---", theme), Line::from("")];
    right_lines.extend(
        TimeRange::ALL
            .iter()
            .enumerate()
            .map(|(i, r)| shortcut_line(&(i + 1).to_string(), r.label(), theme)),
    );
    right_lines.push(Line::from(""));
    right_lines.push(shortcut_line("R", "Reload", theme));
    right_lines.push(shortcut_line("T", "Toggle theme", theme));
    right_lines.push(shortcut_line("?", "Close help", theme));
    right_lines.push(shortcut_line("q", "Quit", theme));

    frame.render_widget(Paragraph::new(left_lines), left);
    frame.render_widget(Paragraph::new(right_lines), right);
}

fn section_line<'a>(title: &'a str, theme: &AppTheme) -> Line<'a> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    ))
}

fn shortcut_line<'a>(key: &str, desc: &str, theme: &AppTheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>6} ", key), Style::default().fg(theme.warning)),
        Span::styled(desc.to_string(), Style::default().fg(theme.text_secondary)),
    ])
}
