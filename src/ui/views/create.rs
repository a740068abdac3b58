//! Transfer form view - account selectors, amount/description inputs,
//! submission result card and the recent-transactions side panel

use super::{list_body, render_table, TableBody};
use crate::api::Account;
use crate::app::{App, Loadable};
use crate::form::{FormField, FormOutcome, SubmitState};
use crate::format::{format_money, format_risk, format_score, status_text, ScoreAlert};
use crate::ui::{alert_color, status_color};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Selector entry text, one line per account
pub fn account_option_text(account: &Account) -> String {
    let blocked = if account.is_blocked {
        " [ЗАБЛОКИРОВАН]"
    } else {
        ""
    };
    format!(
        "{} {} - {} ({}){}",
        account.last_name,
        account.first_name,
        account.account_number,
        format_money(account.balance),
        blocked
    )
}

pub fn render_create_view(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_form(f, app, columns[0]);
    render_recent(f, app, columns[1]);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Sender selector
            Constraint::Length(1), // Sender balance/risk line
            Constraint::Length(3), // Receiver selector
            Constraint::Length(1), // Receiver info line
            Constraint::Length(3), // Amount
            Constraint::Length(3), // Description
            Constraint::Length(3), // Submit control
            Constraint::Min(0),    // Result card
        ])
        .split(area);

    let accounts = app.accounts.data().map_or(&[][..], Vec::as_slice);
    let sender = app.form.sender_idx.and_then(|i| accounts.get(i));
    let receiver = app.form.receiver_idx.and_then(|i| accounts.get(i));

    render_selector(
        f,
        chunks[0],
        "Счёт отправителя",
        sender,
        &app.accounts,
        app.form.focus == FormField::Sender,
    );
    render_sender_info(f, chunks[1], sender);
    render_selector(
        f,
        chunks[2],
        "Счёт получателя",
        receiver,
        &app.accounts,
        app.form.focus == FormField::Receiver,
    );
    render_receiver_info(f, chunks[3], receiver);

    render_input(
        f,
        chunks[4],
        "Сумма, ₽",
        &app.form.amount,
        app.form.focus == FormField::Amount,
    );
    render_input(
        f,
        chunks[5],
        "Назначение платежа",
        &app.form.description,
        app.form.focus == FormField::Description,
    );

    render_submit_control(f, chunks[6], app.form.state);

    if let Some(outcome) = &app.form.outcome {
        render_outcome_card(f, chunks[7], outcome);
    }
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string())
}

fn render_selector(
    f: &mut Frame,
    area: Rect,
    title: &str,
    selected: Option<&Account>,
    accounts: &Loadable<Vec<Account>>,
    focused: bool,
) {
    let (text, style) = match (selected, accounts) {
        (Some(account), _) => (account_option_text(account), Style::default()),
        (None, Loadable::Error(_)) => (
            "Ошибка загрузки счетов".to_string(),
            Style::default().fg(Color::Red),
        ),
        (None, Loadable::Loaded(_)) => (
            "Выберите счёт (↑↓)...".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        (None, _) => (
            super::LOADING_TEXT.to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let paragraph = Paragraph::new(text)
        .block(field_block(title, focused))
        .style(style);
    f.render_widget(paragraph, area);
}

fn render_sender_info(f: &mut Frame, area: Rect, sender: Option<&Account>) {
    let line = match sender {
        Some(account) => {
            let mut spans = vec![
                Span::raw(" Доступно: "),
                Span::styled(
                    format_money(account.balance),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ];
            if account.risk_level > 0.5 {
                spans.push(Span::styled(
                    format!("  ⚠ Высокий риск: {}", format_risk(account.risk_level)),
                    Style::default().fg(Color::Red),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(""),
    };

    f.render_widget(Paragraph::new(line), area);
}

fn render_receiver_info(f: &mut Frame, area: Rect, receiver: Option<&Account>) {
    let line = match receiver {
        Some(account) if account.is_blocked => Line::from(Span::styled(
            " 🚫 Клиент заблокирован - перевод будет отклонён",
            Style::default().fg(Color::Red),
        )),
        Some(account) if account.risk_level > 0.5 => Line::from(Span::styled(
            format!(
                " ⚠ Получатель с повышенным риском: {}",
                format_risk(account.risk_level)
            ),
            Style::default().fg(Color::Yellow),
        )),
        Some(_) => Line::from(Span::styled(
            " ✓ Получатель проверен",
            Style::default().fg(Color::Green),
        )),
        None => Line::from(""),
    };

    f.render_widget(Paragraph::new(line), area);
}

fn render_input(f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let text = if focused {
        format!("{}▎", value)
    } else {
        value.to_string()
    };
    let paragraph = Paragraph::new(text).block(field_block(title, focused));
    f.render_widget(paragraph, area);
}

fn render_submit_control(f: &mut Frame, area: Rect, state: SubmitState) {
    let (text, style) = match state {
        SubmitState::Idle => (
            "[ Enter: Выполнить перевод ]",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        SubmitState::Submitting => (
            "⏳ Обработка...",
            Style::default().fg(Color::DarkGray),
        ),
    };

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(paragraph, area);
}

/// Result card under the form, colored by transaction status and score
fn render_outcome_card(f: &mut Frame, area: Rect, outcome: &FormOutcome) {
    if area.height < 3 {
        return;
    }

    let (title, color, lines) = match outcome {
        FormOutcome::Rejected { error, reason } => {
            let mut lines = vec![Line::from(vec![
                Span::styled("Транзакция отклонена: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(error.clone()),
            ])];
            if let Some(reason) = reason {
                lines.push(Line::from(Span::styled(
                    reason.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ("✗ Ошибка".to_string(), Color::Red, lines)
        }
        FormOutcome::Accepted(resp) => {
            let status_col = status_color(&resp.status);
            let check = &resp.fraud_check;
            let score_col = alert_color(ScoreAlert::from_score(check.score));

            let mut lines = vec![
                Line::from(vec![
                    Span::raw("ID транзакции: "),
                    Span::styled(
                        format!("#{}", resp.transaction_id),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("   Статус: "),
                    Span::styled(status_text(&resp.status), Style::default().fg(status_col)),
                ]),
                Line::from(vec![
                    Span::raw("Fraud score: "),
                    Span::styled(format_score(check.score), Style::default().fg(score_col)),
                    Span::raw("   Помечена: "),
                    Span::raw(if check.is_flagged { "Да ⚠" } else { "Нет ✓" }),
                ]),
            ];
            if let Some(reason) = &check.reason {
                lines.push(Line::from(vec![
                    Span::raw("Причины: "),
                    Span::styled(reason.clone(), Style::default().fg(score_col)),
                ]));
            }
            if !check.flags.is_empty() {
                lines.push(Line::from(vec![
                    Span::raw("Сработавшие правила: "),
                    Span::styled(
                        check.flags.join(", "),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
            (resp.message.clone(), status_col, lines)
        }
    };

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(card, area);
}

fn render_recent(f: &mut Frame, app: &App, area: Rect) {
    let body: TableBody = list_body(&app.recent_transactions, "Нет транзакций", |tx| {
        super::transactions::row_cells(tx)
    });

    render_table(
        f,
        area,
        "Последние транзакции",
        &super::transactions::HEADERS,
        &super::transactions::WIDTHS,
        body,
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_option_text() {
        let account = Account {
            account_id: 4,
            account_number: "40817810000000000004".to_string(),
            account_type: None,
            balance: 45200.0,
            currency: Some("RUB".to_string()),
            client_id: 40,
            first_name: "Игорь".to_string(),
            last_name: "Волков".to_string(),
            risk_level: 0.2,
            is_blocked: false,
        };

        assert_eq!(
            account_option_text(&account),
            "Волков Игорь - 40817810000000000004 (45 200,00 ₽)"
        );
    }

    #[test]
    fn test_blocked_account_marked() {
        let account = Account {
            account_id: 5,
            account_number: "40817810000000000005".to_string(),
            account_type: None,
            balance: 0.0,
            currency: None,
            client_id: 50,
            first_name: "Х".to_string(),
            last_name: "У".to_string(),
            risk_level: 0.9,
            is_blocked: true,
        };

        assert!(account_option_text(&account).ends_with("[ЗАБЛОКИРОВАН]"));
    }
}
