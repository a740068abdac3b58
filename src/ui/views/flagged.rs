//! Flagged transactions view - suspicious transfers, highest score first

use super::{list_body, render_table, CellSpec, TableBody};
use crate::api::Transaction;
use crate::app::{App, Loadable};
use crate::format::{format_date, format_money, format_score, status_text, truncate, ScoreTier};
use crate::ui::{status_color, tier_color};
use ratatui::{
    layout::{Constraint, Rect},
    Frame,
};

const HEADERS: [&str; 8] = [
    "ID",
    "Дата",
    "Отправитель",
    "Получатель",
    "Сумма",
    "Риск",
    "Причина",
    "Статус",
];

const WIDTHS: [Constraint; 8] = [
    Constraint::Length(8),
    Constraint::Length(18),
    Constraint::Min(12),
    Constraint::Min(12),
    Constraint::Length(16),
    Constraint::Length(6),
    Constraint::Min(20),
    Constraint::Length(15),
];

pub fn row_cells(tx: &Transaction) -> Vec<CellSpec> {
    let score = match tx.fraud_score {
        Some(s) => CellSpec::colored(format_score(s), tier_color(ScoreTier::from_score(s))),
        None => CellSpec::plain("—"),
    };

    let reason = tx
        .flagged_reason
        .as_deref()
        .map(|r| truncate(r, 40))
        .unwrap_or_else(|| "—".to_string());

    vec![
        CellSpec::plain(format!("#{}", tx.transaction_id)),
        CellSpec::plain(format_date(&tx.transaction_date)),
        CellSpec::plain(tx.sender_name()),
        CellSpec::plain(tx.receiver_name()),
        CellSpec::plain(format_money(tx.amount)),
        score,
        CellSpec::plain(reason),
        CellSpec::colored(status_text(&tx.status), status_color(&tx.status)),
    ]
}

pub fn body(state: &Loadable<Vec<Transaction>>) -> TableBody {
    list_body(state, "Нет подозрительных транзакций", |tx| row_cells(tx))
}

pub fn render_flagged_view(f: &mut Frame, app: &App, area: Rect) {
    render_table(
        f,
        area,
        "Подозрительные транзакции",
        &HEADERS,
        &WIDTHS,
        body(&app.flagged),
        Some(app.selected_row),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_truncated() {
        let tx = Transaction {
            transaction_id: 9,
            transaction_date: "2025-11-02T03:10:00".to_string(),
            amount: 250000.0,
            currency: None,
            status: "blocked".to_string(),
            is_flagged: true,
            fraud_score: Some(0.92),
            flagged_reason: Some(
                "Большая сумма перевода; Транзакция в ночное время; Высокий риск отправителя"
                    .to_string(),
            ),
            sender_account: None,
            receiver_account: None,
            sender_first_name: "А".to_string(),
            sender_last_name: "Б".to_string(),
            receiver_first_name: "В".to_string(),
            receiver_last_name: "Г".to_string(),
        };

        let cells = row_cells(&tx);
        assert!(cells[6].text.chars().count() <= 40);
        assert!(cells[6].text.ends_with("..."));
        assert_eq!(cells[7].text, "Заблокирована");
    }
}
