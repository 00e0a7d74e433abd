//! Detail panel component
//!
//! Shows the selected thread dump: metadata header plus the highlighted
//! stack trace. Renders a placeholder until something is selected.

use super::dump_list::state_color;
use super::stack_highlight;
use crate::action::Action;
use crate::component::Component;
use crate::model::thread_dump::ThreadDump;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Detail panel for the selected thread dump
pub struct DumpDetailComponent {
    /// Current scroll offset
    scroll: usize,
    /// Cached content lines
    content: Vec<Line<'static>>,
    /// Identity of the dump the cache was built from
    content_key: Option<(i64, String)>,
}

impl Default for DumpDetailComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DumpDetailComponent {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            content: vec![placeholder_line()],
            content_key: None,
        }
    }

    /// Update content from the current selection
    ///
    /// Rebuilds (and resets scroll) only when the selected dump changes, so
    /// redraws don't clobber the scroll position.
    pub fn set_selection(&mut self, selection: Option<&ThreadDump>) {
        match selection {
            Some(dump) => {
                let key = (dump.thread_id, dump.thread_name.clone());
                if self.content_key.as_ref() == Some(&key) {
                    return;
                }
                self.content = render_dump_detail(dump);
                self.content_key = Some(key);
                self.scroll = 0;
            }
            None => {
                if self.content_key.is_some() || self.content.is_empty() {
                    self.content = vec![placeholder_line()];
                    self.content_key = None;
                    self.scroll = 0;
                }
            }
        }
    }

    pub fn draw_focused(&mut self, frame: &mut Frame, area: Rect, focused: bool) -> Result<()> {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let visible_height = area.height.saturating_sub(2) as usize;

        let paragraph = Paragraph::new(self.content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Thread Dump Detail ")
                    .border_style(Style::default().fg(border_color)),
            )
            .scroll((self.scroll as u16, 0));

        frame.render_widget(paragraph, area);

        // Render scrollbar if content exceeds visible area
        let total = self.content.len();
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }

    #[cfg(test)]
    fn content_text(&self) -> String {
        self.content
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn placeholder_line() -> Line<'static> {
    Line::from(Span::styled(
        "No thread dump selected. Pick a row in the list above.",
        Style::default().fg(Color::DarkGray),
    ))
}

fn render_dump_detail(dump: &ThreadDump) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            format!("{} ", dump.icon()),
            Style::default().fg(state_color(dump.thread_state)),
        ),
        Span::styled(
            dump.thread_name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "═══════════════════════════════════════════════════════════",
        Style::default().fg(Color::DarkGray),
    )));

    lines.push(meta_line(
        "State",
        dump.thread_state.label(),
        state_color(dump.thread_state),
    ));
    lines.push(meta_line("Thread ID", &dump.thread_id.to_string(), Color::White));
    lines.push(meta_line("Started", &dump.start_time_full(), Color::White));
    lines.push(meta_line("Exec Time", &dump.exec_time_display(), Color::Yellow));
    lines.push(meta_line(
        "Sampled",
        if dump.sampled { "yes" } else { "no" },
        Color::White,
    ));

    if let Some(ref txid) = dump.transaction_id {
        lines.push(meta_line("Transaction", txid, Color::White));
    }
    if let Some(ref entry) = dump.entry_point {
        lines.push(meta_line("Entry Point", entry, Color::Green));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Stack Trace:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "═══════════════════════════════════════════════════════════",
        Style::default().fg(Color::DarkGray),
    )));

    if dump.detail_message.is_empty() {
        lines.push(Line::from(Span::styled(
            "No stack trace captured for this thread.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.extend(stack_highlight::highlight_stack(&dump.detail_message));
    }

    lines
}

fn meta_line(label: &str, value: &str, value_color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<12}", format!("{}:", label)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(value.to_string(), Style::default().fg(value_color)),
    ])
}

impl Component for DumpDetailComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let max_scroll = self.content.len().saturating_sub(1);

        match action {
            Action::ScrollDown => {
                if self.scroll < max_scroll {
                    self.scroll += 1;
                }
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            Action::PageDown => {
                self.scroll = (self.scroll + 20).min(max_scroll);
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(20);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_focused(frame, area, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::thread_dump::ThreadState;

    fn dump(id: i64, name: &str, stack: &str) -> ThreadDump {
        ThreadDump {
            thread_id: id,
            thread_name: name.to_string(),
            thread_state: ThreadState::Blocked,
            start_time: 0,
            exec_time: 12_000,
            local_trace_id: None,
            sampled: true,
            transaction_id: Some("order-service^1^7".to_string()),
            entry_point: Some("/api/orders".to_string()),
            detail_message: stack.to_string(),
        }
    }

    #[test]
    fn test_empty_selection_shows_placeholder() {
        let mut detail = DumpDetailComponent::new();
        detail.set_selection(None);
        assert!(detail.content_text().contains("No thread dump selected"));
    }

    #[test]
    fn test_selection_renders_metadata_and_stack() {
        let mut detail = DumpDetailComponent::new();
        let d = dump(21, "exec-1", "\tat com.acme.Repo.lock(Repo.java:31)");
        detail.set_selection(Some(&d));

        let text = detail.content_text();
        assert!(text.contains("exec-1"));
        assert!(text.contains("BLOCKED"));
        assert!(text.contains("order-service^1^7"));
        assert!(text.contains("Repo.java:31"));
    }

    #[test]
    fn test_scroll_survives_redraw_of_same_selection() {
        let mut detail = DumpDetailComponent::new();
        let d = dump(21, "exec-1", "line\nline\nline\nline");
        detail.set_selection(Some(&d));

        detail.update(Action::ScrollDown).unwrap();
        detail.update(Action::ScrollDown).unwrap();
        assert_eq!(detail.scroll, 2);

        // Same selection set again, as happens on every frame
        detail.set_selection(Some(&d));
        assert_eq!(detail.scroll, 2);
    }

    #[test]
    fn test_new_selection_resets_scroll() {
        let mut detail = DumpDetailComponent::new();
        let a = dump(1, "a", "x\ny\nz");
        let b = dump(2, "b", "x");
        detail.set_selection(Some(&a));
        detail.update(Action::ScrollDown).unwrap();
        detail.set_selection(Some(&b));
        assert_eq!(detail.scroll, 0);
        assert!(detail.content_text().contains('b'));
    }

    #[test]
    fn test_missing_stack_notes_absence() {
        let mut detail = DumpDetailComponent::new();
        let d = dump(3, "idle", "");
        detail.set_selection(Some(&d));
        assert!(detail.content_text().contains("No stack trace captured"));
    }
}
