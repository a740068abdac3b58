//! Patterns view - hourly transaction volume, last 24 hours

use super::{list_body, render_table, CellSpec, TableBody};
use crate::api::PatternPoint;
use crate::app::{App, Loadable};
use crate::format::{format_count, hour_label};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{BarChart, Block, Borders, Paragraph},
    Frame,
};

const HEADERS: [&str; 2] = ["Час", "Транзакций"];

const WIDTHS: [Constraint; 2] = [Constraint::Length(8), Constraint::Min(10)];

pub fn row_cells(point: &PatternPoint) -> Vec<CellSpec> {
    vec![
        CellSpec::plain(hour_label(&point.hour)),
        CellSpec::plain(format_count(point.transaction_count)),
    ]
}

pub fn body(state: &Loadable<Vec<PatternPoint>>) -> TableBody {
    list_body(state, "Нет данных за последние 24 часа", |p| row_cells(p))
}

pub fn render_patterns_view(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(6)])
        .split(area);

    render_volume_chart(f, &app.patterns, chunks[0]);
    render_table(
        f,
        chunks[1],
        "Активность по часам",
        &HEADERS,
        &WIDTHS,
        body(&app.patterns),
        Some(app.selected_row),
    );
}

/// Bar chart over the hourly buckets the server aggregated
pub(crate) fn render_volume_chart(f: &mut Frame, state: &Loadable<Vec<PatternPoint>>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Транзакции за 24 часа");

    let points = match state.data() {
        Some(points) if !points.is_empty() => points,
        _ => {
            let text = match state {
                Loadable::Error(e) => e.clone(),
                _ => super::LOADING_TEXT.to_string(),
            };
            let placeholder = Paragraph::new(text)
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(placeholder, area);
            return;
        }
    };

    let labels: Vec<String> = points.iter().map(|p| hour_label(&p.hour)).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(points.iter())
        .map(|(label, p)| (label.as_str(), p.transaction_count.max(0) as u64))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(&data)
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_rows() {
        let state = Loadable::Loaded(vec![
            PatternPoint {
                hour: "2025-11-02T13:00:00".to_string(),
                transaction_count: 42,
            },
            PatternPoint {
                hour: "2025-11-02T14:00:00".to_string(),
                transaction_count: 1200,
            },
        ]);

        match body(&state) {
            TableBody::Rows(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0][0].text, "13");
                assert_eq!(rows[1][1].text, "1 200");
            }
            other => panic!("expected rows, got {:?}", other),
        }
    }
}
