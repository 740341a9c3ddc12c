//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::channel::ChannelStatus;

/// Render the header bar with the ward overview.
///
/// Displays: app name, patient count, monitored patient, broker link state.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (link_icon, link_style) = match app.channel_status() {
        ChannelStatus::Connected => ("●", Style::default().fg(app.theme.good)),
        ChannelStatus::Connecting => ("◌", Style::default().fg(app.theme.warn)),
        ChannelStatus::Disconnected => ("○", Style::default().add_modifier(Modifier::DIM)),
        ChannelStatus::Failed(_) => ("●", Style::default().fg(app.theme.bad)),
    };

    let mut spans = vec![
        Span::styled(" WARDWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{}", app.store().len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" patients │ "),
    ];

    if let Some(patient) = app.current_patient() {
        spans.push(Span::styled(
            format!("{} ", patient.full_name),
            app.theme.phase_style(patient.phase()),
        ));
        spans.push(Span::raw("│ "));
    }

    spans.push(Span::raw("link "));
    spans.push(Span::styled(link_icon, link_style));
    spans.push(Span::styled(
        format!(" {}", short_status(&app.channel_status())),
        Style::default().add_modifier(Modifier::DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Status text kept short enough for the header.
fn short_status(status: &ChannelStatus) -> String {
    match status {
        ChannelStatus::Failed(_) => "failed".to_string(),
        other => other.to_string(),
    }
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = [View::Patients, View::Monitor]
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {}:{} ", i + 1, view.label())))
        .collect();

    let selected = match app.current_view {
        View::Patients => 0,
        View::Monitor => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows available controls for the current view, or a temporary status
/// message (e.g. a delivery warning) while one is fresh.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Patients => " ↑↓:select Enter:monitor Tab:switch ?:help q:quit",
        View::Monitor => {
            if app.compose_active {
                " Type your update | Enter:send Esc:cancel"
            } else {
                " m:new update r:refresh Esc:back Tab:switch ?:help q:quit"
            }
        }
    };

    let paragraph = Paragraph::new(controls).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Select patient"),
        Line::from("  Enter       Open monitor"),
        Line::from("  Tab         Switch views"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Monitor",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  m         Compose care-team update"),
        Line::from("  r         Refresh vitals now"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
