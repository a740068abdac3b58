//! High-risk clients view

use super::{list_body, render_table, CellSpec, TableBody};
use crate::api::Client;
use crate::app::{App, Loadable};
use crate::format::{format_risk, ScoreTier};
use crate::ui::tier_color;
use ratatui::{
    layout::{Constraint, Rect},
    style::Color,
    Frame,
};

const HEADERS: [&str; 6] = ["ID", "Имя", "Телефон", "Email", "Риск", "Статус"];

const WIDTHS: [Constraint; 6] = [
    Constraint::Length(6),
    Constraint::Min(18),
    Constraint::Length(18),
    Constraint::Min(20),
    Constraint::Length(6),
    Constraint::Length(14),
];

pub fn row_cells(client: &Client) -> Vec<CellSpec> {
    let status = if client.is_blocked {
        CellSpec::colored("Заблокирован", Color::Red)
    } else {
        CellSpec::colored("Активен", Color::Green)
    };

    vec![
        CellSpec::plain(format!("#{}", client.client_id)),
        CellSpec::plain(client.full_name()),
        CellSpec::plain(client.phone_number.as_deref().unwrap_or("—")),
        CellSpec::plain(client.email.as_deref().unwrap_or("—")),
        CellSpec::colored(
            format_risk(client.risk_level),
            tier_color(ScoreTier::from_score(client.risk_level)),
        ),
        status,
    ]
}

pub fn body(state: &Loadable<Vec<Client>>) -> TableBody {
    list_body(state, "Нет клиентов в зоне риска", |c| row_cells(c))
}

pub fn render_clients_view(f: &mut Frame, app: &App, area: Rect) {
    render_table(
        f,
        area,
        "Клиенты в зоне риска",
        &HEADERS,
        &WIDTHS,
        body(&app.clients),
        Some(app.selected_row),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(blocked: bool, risk: f64) -> Client {
        Client {
            client_id: 17,
            first_name: "Ольга".to_string(),
            last_name: "Кузнецова".to_string(),
            phone_number: None,
            email: Some("o.kuznetsova@example.ru".to_string()),
            risk_level: risk,
            is_blocked: blocked,
        }
    }

    #[test]
    fn test_blocked_badge() {
        let cells = row_cells(&client(true, 0.9));
        assert_eq!(cells[5].text, "Заблокирован");
        assert_eq!(cells[5].color, Some(Color::Red));
        assert_eq!(cells[2].text, "—");
    }

    #[test]
    fn test_active_badge_and_risk_percent() {
        let cells = row_cells(&client(false, 0.6));
        assert_eq!(cells[5].text, "Активен");
        assert_eq!(cells[4].text, "60%");
        assert_eq!(cells[4].color, Some(Color::Yellow));
    }
}
