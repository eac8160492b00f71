use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::error::Error;
use crate::models::{Application, NamespaceReplicaTotal, SyncStatus, WorkloadSummary};

pub fn render(f: &mut Frame, app: &App) {
    // 1. Layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    // 2. Header
    let synced_count = match &app.report.apps {
        Ok(section) => section.synced.len().to_string(),
        Err(_) => "?".to_string(),
    };
    let header_text = format!(
        " Argo CD: {} | Workloads: {} | Synced apps: {}",
        app.report.argo_namespace, app.report.namespace, synced_count
    );
    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title(" argoscope "));
    f.render_widget(header, chunks[0]);

    // 3. Body - applications on the left, workloads and totals on the right
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(columns[1]);

    match &app.report.apps {
        Ok(section) => {
            render_apps(f, left[0], " Synced Applications ", &section.synced);
            render_apps(f, left[1], " Unsynced Applications ", &section.unsynced);
            render_totals(f, right[2], &section.totals);
        }
        Err(e) => {
            render_error(f, left[0], " Synced Applications ", e);
            render_error(f, left[1], " Unsynced Applications ", e);
            render_error(f, right[2], " Replicas per Namespace ", e);
        }
    }

    match &app.report.deployments {
        Ok(items) => render_workloads(f, right[0], " Deployments ", items),
        Err(e) => render_error(f, right[0], " Deployments ", e),
    }
    match &app.report.statefulsets {
        Ok(items) => render_workloads(f, right[1], " StatefulSets ", items),
        Err(e) => render_error(f, right[1], " StatefulSets ", e),
    }

    // 4. Footer
    let footer =
        Paragraph::new(" q: quit | r: refresh ").style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[2]);
}

fn table_header<const N: usize>(titles: [&'static str; N]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells).height(1).bottom_margin(1)
}

fn render_apps(f: &mut Frame, area: Rect, title: &'static str, apps: &[Application]) {
    let rows = apps.iter().map(|app| {
        let style = if app.sync_status == SyncStatus::Synced {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        Row::new(vec![
            Cell::from(app.name.clone()),
            Cell::from(app.destination_namespace.clone()),
            Cell::from(app.sync_status.to_string()).style(style),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ],
    )
    .header(table_header(["Name", "Destination", "Status"]))
    .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(table, area);
}

fn render_workloads(f: &mut Frame, area: Rect, title: &'static str, items: &[WorkloadSummary]) {
    let rows = items.iter().map(|w| {
        Row::new(vec![
            Cell::from(w.name.clone()),
            Cell::from(w.replicas.to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [Constraint::Percentage(70), Constraint::Percentage(30)],
    )
    .header(table_header(["Name", "Replicas"]))
    .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(table, area);
}

fn render_totals(f: &mut Frame, area: Rect, totals: &[NamespaceReplicaTotal]) {
    let rows = totals.iter().map(|t| match &t.replicas {
        Ok(n) => Row::new(vec![
            Cell::from(t.namespace.clone()),
            Cell::from(n.to_string()),
        ]),
        Err(_) => Row::new(vec![
            Cell::from(t.namespace.clone()),
            Cell::from("unavailable").style(Style::default().fg(Color::Red)),
        ]),
    });

    let table = Table::new(
        rows,
        [Constraint::Percentage(70), Constraint::Percentage(30)],
    )
    .header(table_header(["Namespace", "Replicas"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Replicas per Namespace "),
    );

    f.render_widget(table, area);
}

fn render_error(f: &mut Frame, area: Rect, title: &'static str, error: &Error) {
    let message = Paragraph::new(error.to_string())
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(message, area);
}
