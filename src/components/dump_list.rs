//! Thread dump list component
//!
//! Columnar list of the snapshot's thread dumps. Owns the row focus and the
//! name filter; the page-level selection is passed in for rendering and only
//! changes when a row is activated.

use crate::action::Action;
use crate::component::Component;
use crate::model::thread_dump::{ThreadDump, ThreadState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Color used for a thread state wherever it is rendered
pub fn state_color(state: ThreadState) -> Color {
    match state {
        ThreadState::Runnable => Color::Green,
        ThreadState::Blocked => Color::Red,
        ThreadState::Waiting | ThreadState::TimedWaiting => Color::Yellow,
        ThreadState::New => Color::Cyan,
        ThreadState::Terminated => Color::DarkGray,
        ThreadState::Unknown => Color::Magenta,
    }
}

/// Thread dump list with focus, filtering, and mouse hit-testing
pub struct DumpListComponent {
    /// Row focus state
    pub list_state: ListState,

    /// Name/path filter query
    pub search_query: String,

    /// Whether filter input mode is active
    pub search_mode: bool,

    /// Row area rendered last frame, for resolving mouse clicks
    last_rows_area: Option<Rect>,
}

impl Default for DumpListComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DumpListComponent {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            search_query: String::new(),
            search_mode: false,
            last_rows_area: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filtering & Focus
    // ─────────────────────────────────────────────────────────────────────────

    /// Dumps matching the current filter, in capture order
    pub fn get_filtered_dumps<'a>(&self, dumps: &'a [ThreadDump]) -> Vec<&'a ThreadDump> {
        if self.search_query.is_empty() {
            return dumps.iter().collect();
        }

        let query = self.search_query.to_lowercase();
        dumps
            .iter()
            .filter(|dump| {
                dump.thread_name.to_lowercase().contains(&query)
                    || dump
                        .entry_point
                        .as_deref()
                        .is_some_and(|p| p.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// The dump under the row cursor
    pub fn get_focused_dump<'a>(&self, dumps: &'a [ThreadDump]) -> Option<&'a ThreadDump> {
        let idx = self.list_state.selected()?;
        self.get_filtered_dumps(dumps).get(idx).copied()
    }

    /// Move focus to the next row, wrapping at the end
    pub fn next(&mut self, dumps: &[ThreadDump]) {
        let len = self.get_filtered_dumps(dumps).len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    /// Move focus to the previous row, wrapping at the start
    pub fn previous(&mut self, dumps: &[ThreadDump]) {
        let len = self.get_filtered_dumps(dumps).len();
        if len == 0 {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(prev));
    }

    pub fn select_first(&mut self, dumps: &[ThreadDump]) {
        if self.get_filtered_dumps(dumps).is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self, dumps: &[ThreadDump]) {
        let len = self.get_filtered_dumps(dumps).len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    /// Resolve a terminal coordinate to a filtered-row index
    pub fn row_at(&self, column: u16, row: u16, dumps: &[ThreadDump]) -> Option<usize> {
        let rows_area = self.last_rows_area?;
        if column < rows_area.x
            || column >= rows_area.x + rows_area.width
            || row < rows_area.y
            || row >= rows_area.y + rows_area.height
        {
            return None;
        }

        let index = self.list_state.offset() + (row - rows_area.y) as usize;
        if index < self.get_filtered_dumps(dumps).len() {
            Some(index)
        } else {
            None
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filter input
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn search_input(&mut self, c: char, dumps: &[ThreadDump]) {
        self.search_query.push(c);
        self.select_first(dumps);
    }

    pub fn search_backspace(&mut self, dumps: &[ThreadDump]) {
        self.search_query.pop();
        self.select_first(dumps);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw the list pane
    ///
    /// `selection` is the page-level selection, used only to mark its row.
    pub fn draw_with_dumps(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        dumps: &[ThreadDump],
        selection: Option<&ThreadDump>,
        focused: bool,
    ) -> Result<()> {
        let filtered = self.get_filtered_dumps(dumps);

        let mut title = format!(" Thread Dumps ({}) ", filtered.len());
        if !self.search_query.is_empty() {
            title = format!("{}[filter:{}] ", title, self.search_query);
        }

        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if filtered.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                if dumps.is_empty() {
                    "No thread dumps captured"
                } else {
                    "No threads match the filter"
                },
                Style::default().fg(Color::DarkGray),
            )));
            frame.render_widget(empty, inner);
            self.last_rows_area = None;
            return Ok(());
        }

        let widths = column_widths(&filtered);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(Paragraph::new(header_line(&widths)), chunks[0]);

        let items: Vec<ListItem> = filtered
            .iter()
            .map(|&dump| {
                let is_page_selected = selection.is_some_and(|s| same_dump(s, dump));
                ListItem::new(row_line(dump, &widths, is_page_selected))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        self.last_rows_area = Some(chunks[1]);
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        Ok(())
    }
}

/// Two dumps refer to the same captured thread
pub fn same_dump(a: &ThreadDump, b: &ThreadDump) -> bool {
    a.thread_id == b.thread_id && a.thread_name == b.thread_name
}

/// Column widths: id, name, state, start, exec, sampled
fn column_widths(dumps: &[&ThreadDump]) -> [usize; 6] {
    let mut widths = [
        "ID".width(),
        "NAME".width(),
        "STATE".width(),
        "START".width(),
        "EXEC".width(),
        "SAMPLED".width(),
    ];

    for dump in dumps {
        widths[0] = widths[0].max(dump.thread_id.to_string().width());
        widths[1] = widths[1].max(dump.thread_name.width());
        widths[2] = widths[2].max(dump.thread_state.label().width());
        widths[3] = widths[3].max(dump.start_time_display().width());
        widths[4] = widths[4].max(dump.exec_time_display().width());
    }

    // Cap the name column so long pool names don't push everything else out
    widths[1] = widths[1].min(36);
    widths
}

fn pad(text: &str, width: usize) -> String {
    let truncated = if text.width() > width {
        let mut out = String::new();
        for ch in text.chars() {
            if out.width() + 1 > width.saturating_sub(1) {
                break;
            }
            out.push(ch);
        }
        format!("{}…", out)
    } else {
        text.to_string()
    };
    format!("{:<width$}", truncated, width = width)
}

fn header_line(widths: &[usize; 6]) -> Line<'static> {
    let labels = ["ID", "NAME", "STATE", "START", "EXEC", "SAMPLED"];
    let mut spans = vec![Span::raw("    ")];
    for (label, width) in labels.iter().zip(widths.iter()) {
        spans.push(Span::styled(
            pad(label, *width),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        "PATH",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));
    Line::from(spans)
}

fn row_line(dump: &ThreadDump, widths: &[usize; 6], is_page_selected: bool) -> Line<'static> {
    let marker = if is_page_selected { "● " } else { "  " };
    let marker_style = if is_page_selected {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let sampled = if dump.sampled { "✓" } else { "" };

    let spans = vec![
        Span::styled(marker, marker_style),
        Span::styled(
            pad(&dump.thread_id.to_string(), widths[0]),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(pad(&dump.thread_name, widths[1]), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(
            pad(dump.thread_state.label(), widths[2]),
            Style::default().fg(state_color(dump.thread_state)),
        ),
        Span::raw("  "),
        Span::styled(
            pad(&dump.start_time_display(), widths[3]),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            pad(&dump.exec_time_display(), widths[4]),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(pad(sampled, widths[5]), Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled(
            dump.entry_point.clone().unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    Line::from(spans)
}

impl Component for DumpListComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Enter => Some(Action::ActivateRow),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing goes through draw_with_dumps which takes the snapshot data
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(id: i64, name: &str, entry: Option<&str>) -> ThreadDump {
        ThreadDump {
            thread_id: id,
            thread_name: name.to_string(),
            thread_state: ThreadState::Runnable,
            start_time: 0,
            exec_time: 0,
            local_trace_id: None,
            sampled: false,
            transaction_id: None,
            entry_point: entry.map(|s| s.to_string()),
            detail_message: String::new(),
        }
    }

    fn dumps() -> Vec<ThreadDump> {
        vec![
            dump(1, "http-nio-8080-exec-1", Some("/api/orders")),
            dump(2, "http-nio-8080-exec-2", Some("/api/users")),
            dump(3, "pool-2-thread-1", None),
        ]
    }

    #[test]
    fn test_filter_matches_name_and_entry_point() {
        let dumps = dumps();
        let mut list = DumpListComponent::new();

        list.search_query = "pool".to_string();
        assert_eq!(list.get_filtered_dumps(&dumps).len(), 1);

        list.search_query = "orders".to_string();
        let filtered = list.get_filtered_dumps(&dumps);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].thread_id, 1);
    }

    #[test]
    fn test_navigation_wraps() {
        let dumps = dumps();
        let mut list = DumpListComponent::new();

        list.select_first(&dumps);
        assert_eq!(list.list_state.selected(), Some(0));

        list.previous(&dumps);
        assert_eq!(list.list_state.selected(), Some(2));

        list.next(&dumps);
        assert_eq!(list.list_state.selected(), Some(0));
    }

    #[test]
    fn test_focused_dump_follows_filter() {
        let dumps = dumps();
        let mut list = DumpListComponent::new();
        list.search_query = "pool".to_string();
        list.select_first(&dumps);

        let focused = list.get_focused_dump(&dumps).unwrap();
        assert_eq!(focused.thread_id, 3);
    }

    #[test]
    fn test_select_first_on_empty_filter_clears_focus() {
        let dumps = dumps();
        let mut list = DumpListComponent::new();
        list.search_query = "no-such-thread".to_string();
        list.select_first(&dumps);
        assert_eq!(list.list_state.selected(), None);
    }

    #[test]
    fn test_row_at_requires_rendered_area() {
        let dumps = dumps();
        let list = DumpListComponent::new();
        assert_eq!(list.row_at(5, 5, &dumps), None);
    }

    #[test]
    fn test_same_dump_identity() {
        let a = dump(1, "worker", None);
        let mut b = dump(1, "worker", Some("/x"));
        assert!(same_dump(&a, &b));
        b.thread_id = 2;
        assert!(!same_dump(&a, &b));
    }

    #[test]
    fn test_pad_truncates_wide_names() {
        let padded = pad("a-very-long-thread-name", 8);
        assert_eq!(padded.width(), 8);
        assert!(padded.ends_with('…') || padded.trim_end().width() <= 8);
    }
}
