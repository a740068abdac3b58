//! Dashboard view - stats tiles, volume charts and the recent flagged strip

use crate::app::{App, Loadable};
use crate::format::{format_count, format_date, format_money, format_score, ScoreTier};
use crate::ui::tier_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Sparkline},
    Frame,
};

pub fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Stat tiles
            Constraint::Length(12), // Charts
            Constraint::Min(6),     // Recent flagged
        ])
        .split(area);

    render_stat_tiles(f, app, chunks[0]);
    render_charts(f, app, chunks[1]);
    render_recent_flagged(f, app, chunks[2]);
}

fn render_stat_tiles(f: &mut Frame, app: &App, area: Rect) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(area);

    let values: [(String, &str, Color); 5] = match &app.stats {
        Loadable::Loaded(s) => [
            (format_count(s.total_transactions), "Всего транзакций", Color::Cyan),
            (format_count(s.today_transactions), "Сегодня", Color::Green),
            (
                format_count(s.flagged_transactions),
                "Подозрительные",
                Color::Yellow,
            ),
            (
                format_count(s.high_risk_clients),
                "Клиенты в зоне риска",
                Color::Red,
            ),
            (format_count(s.blocked_clients), "Заблокированные", Color::Red),
        ],
        Loadable::Error(_) => [
            ("—".to_string(), "Всего транзакций", Color::DarkGray),
            ("—".to_string(), "Сегодня", Color::DarkGray),
            ("—".to_string(), "Подозрительные", Color::DarkGray),
            ("—".to_string(), "Клиенты в зоне риска", Color::DarkGray),
            ("—".to_string(), "Заблокированные", Color::DarkGray),
        ],
        _ => [
            ("…".to_string(), "Всего транзакций", Color::DarkGray),
            ("…".to_string(), "Сегодня", Color::DarkGray),
            ("…".to_string(), "Подозрительные", Color::DarkGray),
            ("…".to_string(), "Клиенты в зоне риска", Color::DarkGray),
            ("…".to_string(), "Заблокированные", Color::DarkGray),
        ],
    };

    for (tile, (value, label, color)) in tiles.iter().zip(values) {
        let lines = vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .centered();
        f.render_widget(paragraph, *tile);
    }
}

fn render_charts(f: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    super::views::patterns::render_volume_chart(f, &app.patterns, halves[0]);
    render_trend_sparkline(f, app, halves[1]);
}

fn render_trend_sparkline(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Динамика");

    match app.patterns.data() {
        Some(points) if !points.is_empty() => {
            let data: Vec<u64> = points
                .iter()
                .map(|p| p.transaction_count.max(0) as u64)
                .collect();
            let sparkline = Sparkline::default()
                .block(block)
                .data(&data)
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(sparkline, area);
        }
        _ => {
            let placeholder = Paragraph::new(super::views::LOADING_TEXT)
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(placeholder, area);
        }
    }
}

fn render_recent_flagged(f: &mut Frame, app: &App, area: Rect) {
    const RECENT_FLAGGED_LIMIT: usize = 5;

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Последние подозрительные транзакции");

    match &app.recent_flagged {
        Loadable::Loaded(rows) if rows.is_empty() => {
            let empty = Paragraph::new("Нет подозрительных транзакций")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(empty, area);
        }
        Loadable::Loaded(rows) => {
            let items: Vec<ListItem> = rows
                .iter()
                .take(RECENT_FLAGGED_LIMIT)
                .map(|tx| {
                    let score_span = match tx.fraud_score {
                        Some(s) => Span::styled(
                            format_score(s),
                            Style::default().fg(tier_color(ScoreTier::from_score(s))),
                        ),
                        None => Span::raw("—"),
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled("⚠ ", Style::default().fg(Color::Yellow)),
                        Span::styled(
                            tx.sender_name(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(" → "),
                        Span::styled(
                            tx.receiver_name(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!(" │ {} │ ", format_money(tx.amount))),
                        score_span,
                        Span::styled(
                            format!("  {}", format_date(&tx.transaction_date)),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();

            f.render_widget(List::new(items).block(block), area);
        }
        Loadable::Error(e) => {
            let error = Paragraph::new(e.clone())
                .block(block)
                .style(Style::default().fg(Color::Red));
            f.render_widget(error, area);
        }
        _ => {
            let loading = Paragraph::new(super::views::LOADING_TEXT)
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(loading, area);
        }
    }
}
