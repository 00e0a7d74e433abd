//! Page header component
//!
//! Fixed title, the application selector in its disabled form, and the agent
//! identifier when an application is present.

use crate::model::NavigationContext;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Page header showing the title and navigation context
pub struct HeaderComponent {
    nav: NavigationContext,
}

impl HeaderComponent {
    pub fn new(nav: NavigationContext) -> Self {
        Self { nav }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(Line::from(header_spans(&self.nav))).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);
    }
}

/// Build the header line content
///
/// Kept separate from drawing so the agent block's presence is testable.
pub fn header_spans(nav: &NavigationContext) -> Vec<Span<'static>> {
    let mut spans = vec![
        Span::styled("◉ ", Style::default().fg(Color::Cyan)),
        Span::styled(
            "Thread Dump",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
    ];

    // Application selector, always rendered disabled and pre-populated
    match &nav.application {
        Some(app) => {
            spans.push(Span::styled(
                format!("[ {} ({}) ▾ ]", app.name, app.service_type),
                Style::default().fg(Color::DarkGray),
            ));
        }
        None => {
            spans.push(Span::styled(
                "[ no application ▾ ]",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    // Agent identifier, only when an application is present
    if nav.application.is_some() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("({})", nav.agent_label()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans
}
