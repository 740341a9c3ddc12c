//! Patient selection view rendering.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Render the patient list as a selectable table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let patients = app.store().patients();

    if patients.is_empty() {
        let msg = Paragraph::new("No patient records found.\nCheck the records directory.")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(Block::default().borders(Borders::ALL).title(" Patients "));
        frame.render_widget(msg, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Id"),
        Cell::from("Name"),
        Cell::from("Age"),
        Cell::from("Room"),
        Cell::from("Condition"),
        Cell::from("Diagnosis"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = patients
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.id.clone()),
                Cell::from(p.full_name.clone()),
                Cell::from(p.age.to_string()),
                Cell::from(p.room_number.clone()),
                Cell::from(p.condition.to_uppercase()).style(app.theme.phase_style(p.phase())),
                Cell::from(p.primary_diagnosis.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(18),
            Constraint::Length(4),
            Constraint::Length(8),
            Constraint::Length(11),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .row_highlight_style(app.theme.selected)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border))
            .title(format!(" Patients ({}) ", patients.len())),
    );

    let mut state = TableState::default();
    state.select(Some(app.selected_patient_index));
    frame.render_stateful_widget(table, area, &mut state);
}
