//! Placeholder panels for views without a data loader

use crate::app::View;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_placeholder_view(f: &mut Frame, view: View, area: Rect) {
    let paragraph = Paragraph::new("Раздел в разработке")
        .block(Block::default().borders(Borders::ALL).title(view.title()))
        .style(Style::default().fg(Color::DarkGray));

    f.render_widget(paragraph, area);
}
