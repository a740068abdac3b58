//! Modal popups - detail drill-down, block confirmation, flag reason input

use crate::api::{ClientDetails, TransactionDetail};
use crate::app::{App, Loadable, Popup};
use crate::format::{format_date, format_money, format_risk, format_score, status_text, ScoreTier};
use crate::ui::{status_color, tier_color};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_popup(f: &mut Frame, app: &App) {
    let popup = match &app.popup {
        Some(p) => p,
        None => return,
    };

    match popup {
        Popup::Transaction { id, state } => {
            let area = centered_rect(70, 70, f.area());
            render_frame(f, area, &format!("Транзакция #{}", id));
            render_transaction_body(f, inner(area), state);
        }
        Popup::Client { id, state } => {
            let area = centered_rect(70, 70, f.area());
            render_frame(f, area, &format!("Клиент #{}", id));
            render_client_body(f, inner(area), state);
        }
        Popup::ConfirmBlock { client_name, .. } => {
            let area = centered_rect(50, 20, f.area());
            render_frame(f, area, "Подтверждение");
            let text = vec![
                Line::from(format!("Заблокировать клиента {}?", client_name)),
                Line::from(""),
                Line::from(Span::styled(
                    "Enter/y: Заблокировать │ Esc/n: Отмена",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner(area));
        }
        Popup::FlagReason {
            transaction_id,
            reason,
        } => {
            let area = centered_rect(55, 22, f.area());
            render_frame(f, area, &format!("Пометить транзакцию #{}", transaction_id));
            let text = vec![
                Line::from("Причина пометки:"),
                Line::from(Span::styled(
                    format!("{}▎", reason),
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Enter: Отправить │ Esc: Отмена",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner(area));
        }
    }
}

fn render_frame(f: &mut Frame, area: Rect, title: &str) {
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title.to_string());
    f.render_widget(block, area);
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    }
}

fn render_transaction_body(f: &mut Frame, area: Rect, state: &Loadable<Box<TransactionDetail>>) {
    let lines = match state {
        Loadable::Idle | Loadable::Loading => vec![placeholder_line(super::views::LOADING_TEXT)],
        Loadable::Error(e) => vec![Line::from(Span::styled(
            e.clone(),
            Style::default().fg(Color::Red),
        ))],
        Loadable::Loaded(tx) => transaction_lines(tx),
    };

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn transaction_lines(tx: &TransactionDetail) -> Vec<Line<'static>> {
    let score_span = match tx.fraud_score {
        Some(s) => Span::styled(
            format_score(s),
            Style::default().fg(tier_color(ScoreTier::from_score(s))),
        ),
        None => Span::raw("—"),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Дата: "),
            Span::raw(format_date(&tx.transaction_date)),
            Span::raw("   Тип: "),
            Span::raw(tx.transaction_type.clone().unwrap_or_else(|| "—".to_string())),
        ]),
        Line::from(vec![
            Span::raw("Сумма: "),
            Span::styled(
                format_money(tx.amount),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Статус: "),
            Span::styled(
                status_text(&tx.status).to_string(),
                Style::default().fg(status_color(&tx.status)),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Отправитель: "),
            Span::raw(format!("{} {}", tx.sender_first_name, tx.sender_last_name)),
            Span::styled(
                format!("  {}", tx.sender_phone.clone().unwrap_or_default()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            format!("  счёт {}", tx.sender_account),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::raw("Получатель: "),
            Span::raw(format!(
                "{} {}",
                tx.receiver_first_name, tx.receiver_last_name
            )),
            Span::styled(
                format!("  {}", tx.receiver_phone.clone().unwrap_or_default()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            format!("  счёт {}", tx.receiver_account),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Fraud score: "),
            score_span,
            Span::raw("   Помечена: "),
            Span::raw(if tx.is_flagged { "Да ⚠" } else { "Нет" }),
        ]),
    ];

    if let Some(reason) = &tx.flagged_reason {
        lines.push(Line::from(vec![
            Span::raw("Причина: "),
            Span::styled(reason.clone(), Style::default().fg(Color::Yellow)),
        ]));
    }
    if let Some(description) = &tx.description {
        if !description.is_empty() {
            lines.push(Line::from(format!("Назначение: {}", description)));
        }
    }

    let device = [
        tx.device_type.as_deref(),
        tx.os.as_deref(),
        tx.browser.as_deref(),
    ]
    .iter()
    .flatten()
    .copied()
    .collect::<Vec<_>>()
    .join(" / ");
    if !device.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Устройство: {}", device),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(ip) = &tx.ip_address {
        let geo = [tx.country.as_deref(), tx.city.as_deref()]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let suffix = if geo.is_empty() {
            String::new()
        } else {
            format!(" ({})", geo)
        };
        lines.push(Line::from(Span::styled(
            format!("IP: {}{}", ip, suffix),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(placeholder_line("Esc: Закрыть"));
    lines
}

fn render_client_body(f: &mut Frame, area: Rect, state: &Loadable<Box<ClientDetails>>) {
    match state {
        Loadable::Idle | Loadable::Loading => {
            f.render_widget(
                Paragraph::new(placeholder_line(super::views::LOADING_TEXT)),
                area,
            );
        }
        Loadable::Error(e) => {
            f.render_widget(
                Paragraph::new(Span::styled(e.clone(), Style::default().fg(Color::Red))),
                area,
            );
        }
        Loadable::Loaded(details) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(5), Constraint::Min(3)])
                .split(area);

            let profile = &details.client;
            let blocked_span = if profile.is_blocked {
                Span::styled("Заблокирован", Style::default().fg(Color::Red))
            } else {
                Span::styled("Активен", Style::default().fg(Color::Green))
            };
            let header = vec![
                Line::from(vec![
                    Span::styled(
                        profile.full_name(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("   "),
                    blocked_span,
                    Span::raw(format!(
                        "   Риск: {}",
                        format_risk(profile.risk_level)
                    )),
                ]),
                Line::from(Span::styled(
                    format!(
                        "{} │ {} │ KYC: {}",
                        profile.phone_number.clone().unwrap_or_else(|| "—".to_string()),
                        profile.email.clone().unwrap_or_else(|| "—".to_string()),
                        profile.kyc_status.clone().unwrap_or_else(|| "—".to_string()),
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    format!(
                        "Регистрация: {}",
                        profile
                            .registration_date
                            .as_deref()
                            .map(format_date)
                            .unwrap_or_else(|| "—".to_string())
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            f.render_widget(Paragraph::new(header), chunks[0]);

            let mut lines = vec![Line::from(Span::styled(
                format!("Счета ({})", details.accounts.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            for account in &details.accounts {
                let active = if account.is_active {
                    Span::styled("Активен", Style::default().fg(Color::Green))
                } else {
                    Span::styled("Закрыт", Style::default().fg(Color::DarkGray))
                };
                lines.push(Line::from(vec![
                    Span::raw(format!(
                        "  {} │ {} │ ",
                        account.account_number,
                        format_money(account.balance)
                    )),
                    active,
                ]));
            }

            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Последние переводы ({})", details.transactions.len()),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for tx in details.transactions.iter().take(8) {
                let score = tx
                    .fraud_score
                    .map(format_score)
                    .unwrap_or_else(|| "—".to_string());
                lines.push(Line::from(format!(
                    "  #{} │ {} │ {} → {} {} │ {}",
                    tx.transaction_id,
                    format_date(&tx.transaction_date),
                    format_money(tx.amount),
                    tx.receiver_first_name,
                    tx.receiver_last_name,
                    score,
                )));
            }

            lines.push(Line::from(""));
            lines.push(placeholder_line("Esc: Закрыть"));

            f.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: false }),
                chunks[1],
            );
        }
    }
}

fn placeholder_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Centered sub-rectangle, sized by percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
