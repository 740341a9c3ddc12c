//! Monitor view rendering: patient card, vitals tiles, care-team feed.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::timefmt;

/// Render the Monitor view for the currently selected patient.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.current_patient().is_none() {
        let msg = Paragraph::new("No patient selected.\nPick one from the Patients view.")
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(msg, area);
        return;
    }

    let columns =
        Layout::horizontal([Constraint::Percentage(38), Constraint::Percentage(62)]).split(area);
    let left =
        Layout::vertical([Constraint::Length(10), Constraint::Min(8)]).split(columns[0]);

    render_patient_card(frame, app, left[0]);
    render_vitals_card(frame, app, left[1]);

    // Feed column, with the compose box pinned underneath while active
    if app.compose_active {
        let right =
            Layout::vertical([Constraint::Min(5), Constraint::Length(3)]).split(columns[1]);
        render_feed(frame, app, right[0]);
        render_compose(frame, app, right[1]);
    } else {
        render_feed(frame, app, columns[1]);
    }
}

fn render_patient_card(frame: &mut Frame, app: &App, area: Rect) {
    let Some(patient) = app.current_patient() else { return };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                patient.full_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                patient.condition.to_uppercase(),
                app.theme.phase_style(patient.phase()),
            ),
        ]),
        Line::from(format!("Room {} │ Age {}", patient.room_number, patient.age)),
        Line::from(format!("Dx: {}", patient.primary_diagnosis)),
    ];

    if !patient.summary.is_empty() {
        lines.push(Line::from(patient.summary.clone()));
    }
    if !patient.doctor_notes.is_empty() {
        lines.push(Line::from(format!("Notes: {}", patient.doctor_notes)));
    }
    if !patient.metrics.medicine_taken.is_empty() {
        lines.push(Line::from(format!(
            "Meds: {}",
            patient.metrics.medicine_taken.join(", ")
        )));
    }
    if let Some(ref updated) = patient.last_update {
        lines.push(Line::from(Span::styled(
            format!("Record updated: {}", timefmt::localize(updated)),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.phase_style(patient.phase()))
        .title(" Patient ");

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}

fn render_vitals_card(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(" Vitals ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(ref vitals) = app.vitals else {
        frame.render_widget(
            Paragraph::new("Waiting for first reading...")
                .style(Style::default().add_modifier(Modifier::DIM)),
            inner,
        );
        return;
    };

    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(inner);
    let top = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(rows[0]);
    let bottom =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(rows[1]);

    let deltas = app.deltas.as_ref();
    render_tile(frame, app, top[0], "Heart rate", &format!("{} bpm", vitals.heart_rate),
        deltas.map(|d| fmt_delta_int(d.heart_rate)));
    render_tile(frame, app, top[1], "SpO₂", &format!("{}%", vitals.spo2),
        deltas.map(|d| fmt_delta_int(d.spo2)));
    render_tile(frame, app, top[2], "Temperature", &format!("{}°C", vitals.temperature),
        deltas.map(|d| fmt_delta_temp(d.temperature)));
    render_tile(frame, app, bottom[0], "Respiratory", &format!("{}/min", vitals.respiratory_rate),
        deltas.map(|d| fmt_delta_int(d.respiratory_rate)));
    render_tile(frame, app, bottom[1], "Blood pressure", &vitals.blood_pressure,
        deltas.map(|d| fmt_delta_int(d.systolic)));

    if let Some(ref at) = app.last_vitals_at {
        frame.render_widget(
            Paragraph::new(format!("Updated {}", at))
                .style(Style::default().add_modifier(Modifier::DIM)),
            rows[2],
        );
    }
}

/// One metric tile: label, value, and an informational delta.
///
/// Deltas render dim. They show drift, not alarms; no threshold logic
/// exists anywhere in this demo.
fn render_tile(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    label: &str,
    value: &str,
    delta: Option<String>,
) {
    let lines = vec![
        Line::from(Span::styled(
            label.to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            delta.unwrap_or_else(|| "–".to_string()),
            app.theme.delta,
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn fmt_delta_int(d: i32) -> String {
    match d {
        0 => "0".to_string(),
        d if d > 0 => format!("▲ +{}", d),
        d => format!("▼ {}", d),
    }
}

fn fmt_delta_temp(d: f64) -> String {
    if d.abs() < 0.05 {
        "0.0".to_string()
    } else if d > 0.0 {
        format!("▲ +{:.1}", d)
    } else {
        format!("▼ {:.1}", d)
    }
}

fn render_feed(frame: &mut Frame, app: &App, area: Rect) {
    let Some(patient) = app.current_patient() else { return };
    let feed = app.log.for_patient(&patient.id);

    let mut lines: Vec<Line> = if feed.is_empty() {
        vec![Line::from(Span::styled(
            "No updates yet.",
            Style::default().add_modifier(Modifier::DIM),
        ))]
    } else {
        feed.iter()
            .map(|msg| {
                Line::from(vec![
                    Span::styled(
                        msg.timestamp.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" — "),
                    Span::raw(msg.text.clone()),
                ])
            })
            .collect()
    };

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Updates are informational only. For urgent questions, contact the care team directly.",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(" Care Team Updates ");

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}

fn render_compose(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(" New update ");

    let input = Line::from(vec![
        Span::raw(app.compose_text.clone()),
        Span::styled("▌", Style::default().fg(app.theme.highlight)),
    ]);

    frame.render_widget(Paragraph::new(input).block(block), area);
}
