//! Transactions view - unfiltered recent transactions table

use super::{list_body, render_table, CellSpec, TableBody};
use crate::api::Transaction;
use crate::app::{App, Loadable};
use crate::format::{format_date, format_money, format_score, status_text, ScoreTier};
use crate::ui::{status_color, tier_color};
use ratatui::{
    layout::{Constraint, Rect},
    Frame,
};

pub(crate) const HEADERS: [&str; 7] = [
    "ID",
    "Дата",
    "Отправитель",
    "Получатель",
    "Сумма",
    "Статус",
    "Риск",
];

pub(crate) const WIDTHS: [Constraint; 7] = [
    Constraint::Length(8),
    Constraint::Length(18),
    Constraint::Min(14),
    Constraint::Min(14),
    Constraint::Length(16),
    Constraint::Length(15),
    Constraint::Length(6),
];

/// Cells for one transaction row. Flagged rows carry a warning mark in
/// the status column, matching the list presentation everywhere else.
pub fn row_cells(tx: &Transaction) -> Vec<CellSpec> {
    let status = if tx.is_flagged {
        format!("{} ⚠", status_text(&tx.status))
    } else {
        status_text(&tx.status).to_string()
    };

    let score = match tx.fraud_score {
        Some(s) => CellSpec::colored(format_score(s), tier_color(ScoreTier::from_score(s))),
        None => CellSpec::plain("—"),
    };

    vec![
        CellSpec::plain(format!("#{}", tx.transaction_id)),
        CellSpec::plain(format_date(&tx.transaction_date)),
        CellSpec::plain(tx.sender_name()),
        CellSpec::plain(tx.receiver_name()),
        CellSpec::plain(format_money(tx.amount)),
        CellSpec::colored(status, status_color(&tx.status)),
        score,
    ]
}

pub fn body(state: &Loadable<Vec<Transaction>>) -> TableBody {
    list_body(state, "Нет транзакций", |tx| row_cells(tx))
}

pub fn render_transactions_view(f: &mut Frame, app: &App, area: Rect) {
    render_table(
        f,
        area,
        "Все транзакции",
        &HEADERS,
        &WIDTHS,
        body(&app.transactions),
        Some(app.selected_row),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i64, score: Option<f64>, flagged: bool) -> Transaction {
        Transaction {
            transaction_id: id,
            transaction_date: "2025-11-02T14:30:00".to_string(),
            amount: 9800.0,
            currency: Some("RUB".to_string()),
            status: "completed".to_string(),
            is_flagged: flagged,
            fraud_score: score,
            flagged_reason: None,
            sender_account: None,
            receiver_account: None,
            sender_first_name: "Иван".to_string(),
            sender_last_name: "Петров".to_string(),
            receiver_first_name: "Анна".to_string(),
            receiver_last_name: "Сидорова".to_string(),
        }
    }

    #[test]
    fn test_n_items_yield_n_rows() {
        let state = Loadable::Loaded(vec![tx(1, Some(0.2), false), tx(2, Some(0.9), true)]);
        match body(&state) {
            TableBody::Rows(rows) => assert_eq!(rows.len(), 2),
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_list_yields_single_notice() {
        let state: Loadable<Vec<Transaction>> = Loadable::Loaded(vec![]);
        assert_eq!(body(&state), TableBody::Notice("Нет транзакций".to_string()));
    }

    #[test]
    fn test_error_yields_error_notice() {
        let state: Loadable<Vec<Transaction>> =
            Loadable::Error("Ошибка загрузки данных".to_string());
        assert_eq!(
            body(&state),
            TableBody::Notice("Ошибка загрузки данных".to_string())
        );
    }

    #[test]
    fn test_score_tier_colors_rows() {
        use ratatui::style::Color;

        let high = row_cells(&tx(1, Some(0.8), true));
        assert_eq!(high[6].color, Some(Color::Red));

        let medium = row_cells(&tx(2, Some(0.5), false));
        assert_eq!(medium[6].color, Some(Color::Yellow));

        let low = row_cells(&tx(3, Some(0.49), false));
        assert_eq!(low[6].color, Some(Color::Green));

        let unknown = row_cells(&tx(4, None, false));
        assert_eq!(unknown[6].text, "—");
    }

    #[test]
    fn test_flagged_mark_in_status_cell() {
        let cells = row_cells(&tx(1, Some(0.6), true));
        assert!(cells[5].text.contains('⚠'));
        assert_eq!(cells[4].text, "9 800,00 ₽");
    }
}
