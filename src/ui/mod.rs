//! UI layer - TUI controller and frame composition

mod dashboard;
mod popup;
mod views;

pub use dashboard::render_dashboard;

use crate::app::{App, View};
use crate::format::{ScoreAlert, ScoreTier};
use crate::notifications::NotificationLevel;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame, Terminal,
};
use std::io;

/// Main TUI controller
pub struct TUI {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TUI {
    /// Create a new TUI
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal })
    }

    /// Get mutable reference to terminal
    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TUI {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Render one full frame: nav, active view, footer, overlays
pub fn render_app(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Nav
            Constraint::Min(0),    // Active view
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_nav(f, app, chunks[0]);

    match app.view {
        View::Dashboard => dashboard::render_dashboard(f, app, chunks[1]),
        View::Transactions => views::render_transactions_view(f, app, chunks[1]),
        View::Flagged => views::render_flagged_view(f, app, chunks[1]),
        View::Clients => views::render_clients_view(f, app, chunks[1]),
        View::Patterns => views::render_patterns_view(f, app, chunks[1]),
        View::CreateTransaction => views::render_create_view(f, app, chunks[1]),
        View::Search | View::Reports | View::Alerts => {
            views::render_placeholder_view(f, app.view, chunks[1])
        }
    }

    render_footer(f, app, chunks[2]);
    render_toasts(f, app);

    if app.popup.is_some() {
        popup::render_popup(f, app);
    }
}

fn render_nav(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| Line::from(format!("{} {}", i + 1, v.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.view.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("🛡 Мониторинг мошенничества"),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.view {
        View::CreateTransaction => {
            "Esc: Назад │ Tab: Поле │ ↑↓: Счёт │ Enter: Отправить"
        }
        View::Clients => {
            "q: Выход │ r: Обновить │ ↑↓: Выбор │ Enter: Детали │ b: Блокировать │ Tab/1-9: Вид"
        }
        View::Transactions | View::Flagged => {
            "q: Выход │ r: Обновить │ ↑↓: Выбор │ Enter: Детали │ f: Пометить │ Tab/1-9: Вид"
        }
        _ => "q: Выход │ r: Обновить │ Tab/1-9: Вид",
    };

    let footer = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::DarkGray));

    f.render_widget(footer, area);
}

/// Toast overlay in the top-right corner, newest on top
fn render_toasts(f: &mut Frame, app: &App) {
    let area = f.area();
    let width = 44.min(area.width.saturating_sub(2));
    if width < 10 {
        return;
    }

    for (i, toast) in app.notifications.active().iter().rev().enumerate() {
        let y = 1 + i as u16;
        if y + 1 >= area.height {
            break;
        }
        let rect = Rect::new(area.width.saturating_sub(width + 1), y, width, 1);
        let paragraph = Paragraph::new(crate::format::truncate(&toast.message, width as usize - 2))
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(level_color(toast.level)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(paragraph, rect);
    }
}

// Shared color mappings

pub(crate) fn status_color(status: &str) -> Color {
    match status {
        "completed" => Color::Green,
        "pending" => Color::Blue,
        "review" => Color::Yellow,
        "blocked" => Color::Red,
        "failed" => Color::DarkGray,
        _ => Color::Gray,
    }
}

pub(crate) fn tier_color(tier: ScoreTier) -> Color {
    match tier {
        ScoreTier::High => Color::Red,
        ScoreTier::Medium => Color::Yellow,
        ScoreTier::Low => Color::Green,
    }
}

pub(crate) fn alert_color(alert: ScoreAlert) -> Color {
    match alert {
        ScoreAlert::Danger => Color::Red,
        ScoreAlert::Warning => Color::Yellow,
        ScoreAlert::Info => Color::Cyan,
        ScoreAlert::Success => Color::Green,
    }
}

pub(crate) fn level_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Info => Color::Cyan,
        NotificationLevel::Success => Color::Green,
        NotificationLevel::Warning => Color::Yellow,
        NotificationLevel::Danger => Color::Red,
    }
}
