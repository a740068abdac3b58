//! UI views - per-view tables, the transfer form and placeholder panels

pub mod clients;
pub mod create;
pub mod flagged;
pub mod patterns;
pub mod placeholder;
pub mod transactions;

pub use clients::render_clients_view;
pub use create::render_create_view;
pub use flagged::render_flagged_view;
pub use patterns::render_patterns_view;
pub use placeholder::render_placeholder_view;
pub use transactions::render_transactions_view;

use crate::app::Loadable;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

pub const LOADING_TEXT: &str = "Загрузка...";
pub const NO_DATA_TEXT: &str = "Нет данных";

/// One table cell: text plus an optional accent color
#[derive(Debug, Clone, PartialEq)]
pub struct CellSpec {
    pub text: String,
    pub color: Option<Color>,
}

impl CellSpec {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

/// Table body: data rows, or a single notice row (spinner / empty / error)
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Rows(Vec<Vec<CellSpec>>),
    Notice(String),
}

/// Build a table body from a view's load state. A loaded response with N
/// items yields exactly N rows; an empty one yields a single notice row.
pub fn list_body<T>(
    state: &Loadable<Vec<T>>,
    empty_text: &str,
    row: impl Fn(&T) -> Vec<CellSpec>,
) -> TableBody {
    match state {
        Loadable::Idle | Loadable::Loading => TableBody::Notice(LOADING_TEXT.to_string()),
        Loadable::Error(e) => TableBody::Notice(e.clone()),
        Loadable::Loaded(items) if items.is_empty() => TableBody::Notice(empty_text.to_string()),
        Loadable::Loaded(items) => TableBody::Rows(items.iter().map(row).collect()),
    }
}

/// Render a bordered table with an optional highlighted row
pub(crate) fn render_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    headers: &[&str],
    widths: &[Constraint],
    body: TableBody,
    selected: Option<usize>,
) {
    let header_row = Row::new(
        headers
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)))
            .collect::<Vec<_>>(),
    )
    .height(1);

    let rows: Vec<Row> = match body {
        TableBody::Notice(text) => vec![Row::new(vec![
            Cell::from(text).style(Style::default().fg(Color::DarkGray)),
        ])],
        TableBody::Rows(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| {
                let row = Row::new(
                    cells
                        .into_iter()
                        .map(|c| {
                            let cell = Cell::from(c.text);
                            match c.color {
                                Some(color) => cell.style(Style::default().fg(color)),
                                None => cell,
                            }
                        })
                        .collect::<Vec<_>>(),
                );
                if selected == Some(i) {
                    row.style(Style::default().bg(Color::DarkGray))
                } else {
                    row
                }
            })
            .collect(),
    };

    let table = Table::new(rows, widths.to_vec())
        .header(header_row)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    f.render_widget(table, area);
}
