//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. It owns
//! the page-level selection: the list pane changes it on row activation, the
//! detail pane only reads it.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_page_layout, clamp_split, DumpDetailComponent, DumpListComponent, HeaderComponent,
    HelpDialog, QuitDialog,
};
use crate::model::domain::DomainState;
use crate::model::modal::{Modal, ModalStack};
use crate::model::thread_dump::capture_time_display;
use crate::model::{DumpSelection, FocusPane, NavigationContext};
use crate::services;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// Error Message Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Generate user-friendly error message for a snapshot that failed to load
fn snapshot_load_error(path: &std::path::Path, cause: &str) -> String {
    format!(
        "Could not load snapshot:\n  {}\n\n\
         {}\n\n\
         Press 'R' to retry after fixing the file\n\
         Or press 'q' to quit",
        path.display(),
        cause
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Immutable application/agent identity for this page
    pub nav: NavigationContext,

    /// Domain state (snapshot data)
    pub domain: DomainState,

    /// The page-level selection
    pub selection: DumpSelection,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Which pane receives navigation keys
    pub focus: FocusPane,

    /// List pane share of the vertical split, in percent
    pub list_percent: u16,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub header: HeaderComponent,
    pub dump_list: DumpListComponent,
    pub dump_detail: DumpDetailComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App for the given navigation context and snapshot
    pub fn new(nav: NavigationContext, snapshot_path: Option<PathBuf>) -> App {
        let mut app = App {
            header: HeaderComponent::new(nav.clone()),
            nav,
            domain: DomainState::new(),
            selection: DumpSelection::new(),
            modals: ModalStack::new(),
            focus: FocusPane::List,
            list_percent: 50,
            should_quit: false,
            error: None,
            status_message: None,
            dump_list: DumpListComponent::new(),
            dump_detail: DumpDetailComponent::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        };

        match snapshot_path {
            Some(path) => {
                app.domain.snapshot_path = Some(path);
                app.load_snapshot();
            }
            None => {
                app.status_message =
                    Some("No snapshot configured. Pass a snapshot file as an argument.".to_string());
            }
        }

        app
    }

    /// Load (or re-load) the snapshot file into domain state
    ///
    /// The page selection is left untouched: it owns its copy of the dump.
    fn load_snapshot(&mut self) {
        let path = match &self.domain.snapshot_path {
            Some(p) => p.clone(),
            None => return,
        };

        match services::load_snapshot(&path) {
            Ok(snapshot) => {
                self.error = None;
                self.domain.dumps = snapshot.thread_dump_data;
                self.domain.captured_at = snapshot.captured_at.and_then(capture_time_display);

                let still_valid = self
                    .dump_list
                    .get_focused_dump(&self.domain.dumps)
                    .is_some();
                if !still_valid {
                    self.dump_list.select_first(&self.domain.dumps);
                }

                // A snapshot taken from a different agent is probably a mistake
                let mismatch = match (&snapshot.agent_id, &self.nav.agent_id) {
                    (Some(snap), Some(nav)) => snap != nav,
                    _ => false,
                };
                self.status_message = if mismatch {
                    Some(format!(
                        "Warning: snapshot is from agent '{}'",
                        snapshot.agent_id.as_deref().unwrap_or("")
                    ))
                } else {
                    Some(format!("Loaded {} thread dumps", self.domain.dumps.len()))
                };
            }
            Err(e) => {
                self.error = Some(snapshot_load_error(&path, &e));
            }
        }
    }

    /// Copy the given filtered-row index into the page selection
    fn select_row(&mut self, index: usize) {
        let dump = self
            .dump_list
            .get_filtered_dumps(&self.domain.dumps)
            .get(index)
            .map(|d| (*d).clone());
        if let Some(dump) = dump {
            self.dump_list.list_state.select(Some(index));
            self.selection.select(dump);
        }
    }

    /// Handle key events when in error state (e.g., unreadable snapshot)
    fn handle_error_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('R') => Ok(Some(Action::ReloadSnapshot)),
            KeyCode::Char('q') | KeyCode::Esc => Ok(Some(Action::ForceQuit)),
            _ => Ok(None),
        }
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help { .. } => {
                let action = self.help_dialog.handle_key_event(key)?;
                if let Some(Modal::Help { scroll_offset }) = self.modals.top_mut() {
                    *scroll_offset = self.help_dialog.scroll_offset;
                }
                Ok(action)
            }
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    /// Keys that apply regardless of which pane has focus
    fn handle_global_key_event(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Tab => Some(Action::FocusNextPane),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::GrowListPane),
            KeyCode::Char('-') => Some(Action::ShrinkListPane),
            KeyCode::Char('R') => Some(Action::ReloadSnapshot),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Unrecoverable-state keys (e.g. unreadable snapshot)
        if self.error.is_some() && self.modals.is_empty() {
            return self.handle_error_key_event(key);
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        if self.dump_list.search_mode {
            return self.handle_search_key_event(key);
        }

        if let Some(action) = self.handle_global_key_event(key) {
            return Ok(Some(action));
        }

        match self.focus {
            FocusPane::List => self.dump_list.handle_key_event(key),
            FocusPane::Detail => self.dump_detail.handle_key_event(key),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.error.is_some() || !self.modals.is_empty() {
            return Ok(None);
        }

        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .dump_list
                .row_at(mouse.column, mouse.row, &self.domain.dumps)
                .map(Action::ClickRow),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {}
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // List Navigation (delegate to DumpListComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.dump_list.next(&self.domain.dumps),
            Action::PrevItem => self.dump_list.previous(&self.domain.dumps),
            Action::FirstItem => self.dump_list.select_first(&self.domain.dumps),
            Action::LastItem => self.dump_list.select_last(&self.domain.dumps),

            // ─────────────────────────────────────────────────────────────────
            // Selection
            // ─────────────────────────────────────────────────────────────────
            Action::ActivateRow => {
                if let Some(dump) = self.dump_list.get_focused_dump(&self.domain.dumps) {
                    self.selection.select(dump.clone());
                }
            }
            Action::ClickRow(index) => {
                self.select_row(index);
            }

            // ─────────────────────────────────────────────────────────────────
            // Detail Scrolling (delegate to DumpDetailComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.dump_detail.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Panes
            // ─────────────────────────────────────────────────────────────────
            Action::FocusNextPane => {
                self.focus = self.focus.toggle();
            }
            Action::GrowListPane => {
                self.list_percent = clamp_split(self.list_percent.saturating_add(5));
            }
            Action::ShrinkListPane => {
                self.list_percent = clamp_split(self.list_percent.saturating_sub(5));
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Filter (delegate to DumpListComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.dump_list.enter_search_mode(),
            Action::ExitSearchMode => self.dump_list.exit_search_mode(),
            Action::SearchInput(c) => self.dump_list.search_input(c, &self.domain.dumps),
            Action::SearchBackspace => self.dump_list.search_backspace(&self.domain.dumps),

            // ─────────────────────────────────────────────────────────────────
            // Snapshot
            // ─────────────────────────────────────────────────────────────────
            Action::ReloadSnapshot => {
                self.load_snapshot();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_page_layout(area, self.list_percent);

        self.header.draw(frame, layout.header);

        let selection = self.selection.get().cloned();
        self.dump_list.draw_with_dumps(
            frame,
            layout.list,
            &self.domain.dumps,
            selection.as_ref(),
            self.focus == FocusPane::List,
        )?;

        render_divider(frame, layout.divider);

        self.dump_detail.set_selection(selection.as_ref());
        self.dump_detail
            .draw_focused(frame, layout.detail, self.focus == FocusPane::Detail)?;

        self.render_help_bar(frame, layout.help);

        if let Some(error) = self.error.clone() {
            self.render_error_overlay(frame, area, &error);
        }

        if let Some(modal) = self.modals.top().cloned() {
            match modal {
                Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
                Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
            }
        }

        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Helpers
// ═══════════════════════════════════════════════════════════════════════════════

fn render_divider(frame: &mut Frame, area: Rect) {
    let width = area.width as usize;
    let handle = "╺━━╸";
    let side = width.saturating_sub(handle.chars().count()) / 2;
    let line = Line::from(vec![
        Span::styled("╌".repeat(side), Style::default().fg(Color::DarkGray)),
        Span::styled(handle, Style::default().fg(Color::Cyan)),
        Span::styled(
            "╌".repeat(width.saturating_sub(side + handle.chars().count())),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

impl App {
    fn render_help_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = if self.dump_list.search_mode {
            vec![
                Span::styled(
                    " Esc/Enter ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Done  "),
                Span::styled(
                    format!("Filter: {}_", self.dump_list.search_query),
                    Style::default().fg(Color::Cyan),
                ),
            ]
        } else {
            vec![
                Span::styled(
                    " q ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Quit "),
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Select "),
                Span::styled(
                    " Tab ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("Focus:{} ", self.focus.name())),
                Span::styled(
                    " +/- ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Resize "),
                Span::styled(
                    " / ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Filter "),
                Span::styled(
                    " R ",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Reload "),
                Span::styled(
                    " ? ",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Help "),
            ]
        };

        if let Some(captured) = &self.domain.captured_at {
            spans.push(Span::styled(
                format!("│ captured {} ", captured.format("%Y-%m-%d %H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        if self.selection.is_empty() && !self.domain.dumps.is_empty() {
            spans.push(Span::styled(
                "│ Enter inspects the focused thread ",
                Style::default().fg(Color::DarkGray),
            ));
        }

        if let Some(status) = &self.status_message {
            spans.push(Span::styled(
                format!(" {} ", status),
                Style::default().fg(Color::Yellow),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_error_overlay(&self, frame: &mut Frame, area: Rect, error: &str) {
        use crate::components::centered_popup;
        use ratatui::widgets::{Clear, Wrap};

        let height = (error.lines().count() as u16 + 4).min(area.height);
        let popup_area = centered_popup(area, 64.min(area.width), height);
        frame.render_widget(Clear, popup_area);

        let lines: Vec<Line> = error.lines().map(|l| Line::from(l.to_string())).collect();
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Snapshot Error ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::thread_dump::{ThreadDump, ThreadState};

    fn dump(id: i64, name: &str) -> ThreadDump {
        ThreadDump {
            thread_id: id,
            thread_name: name.to_string(),
            thread_state: ThreadState::Runnable,
            start_time: 0,
            exec_time: 0,
            local_trace_id: None,
            sampled: false,
            transaction_id: None,
            entry_point: None,
            detail_message: String::new(),
        }
    }

    fn app_with_dumps() -> App {
        let mut app = App::new(NavigationContext::default(), None);
        app.domain.dumps = vec![dump(1, "exec-1"), dump(2, "exec-2"), dump(3, "exec-3")];
        app.dump_list.select_first(&app.domain.dumps);
        app
    }

    #[test]
    fn test_initial_selection_is_empty() {
        let app = App::new(NavigationContext::default(), None);
        assert!(app.selection.is_empty());
    }

    #[test]
    fn test_activate_row_selects_focused_dump() {
        let mut app = app_with_dumps();
        app.update(Action::NextItem).unwrap();
        app.update(Action::ActivateRow).unwrap();

        assert_eq!(app.selection.get().unwrap().thread_id, 2);
    }

    #[test]
    fn test_second_activation_overwrites_selection() {
        let mut app = app_with_dumps();
        app.update(Action::ActivateRow).unwrap();
        assert_eq!(app.selection.get().unwrap().thread_id, 1);

        app.update(Action::NextItem).unwrap();
        app.update(Action::NextItem).unwrap();
        app.update(Action::ActivateRow).unwrap();

        assert_eq!(app.selection.get().unwrap().thread_id, 3);
    }

    #[test]
    fn test_click_row_selects_and_focuses() {
        let mut app = app_with_dumps();
        app.update(Action::ClickRow(2)).unwrap();

        assert_eq!(app.dump_list.list_state.selected(), Some(2));
        assert_eq!(app.selection.get().unwrap().thread_id, 3);
    }

    #[test]
    fn test_click_out_of_range_is_ignored() {
        let mut app = app_with_dumps();
        app.update(Action::ClickRow(99)).unwrap();
        assert!(app.selection.is_empty());
    }

    #[test]
    fn test_navigation_alone_does_not_select() {
        let mut app = app_with_dumps();
        app.update(Action::NextItem).unwrap();
        app.update(Action::LastItem).unwrap();
        assert!(app.selection.is_empty());
    }

    #[test]
    fn test_split_resize_stays_clamped() {
        let mut app = app_with_dumps();
        for _ in 0..30 {
            app.update(Action::GrowListPane).unwrap();
        }
        assert_eq!(app.list_percent, 90);

        for _ in 0..30 {
            app.update(Action::ShrinkListPane).unwrap();
        }
        assert_eq!(app.list_percent, 10);
    }

    #[test]
    fn test_focus_toggles_between_panes() {
        let mut app = app_with_dumps();
        assert_eq!(app.focus, FocusPane::List);
        app.update(Action::FocusNextPane).unwrap();
        assert_eq!(app.focus, FocusPane::Detail);
        app.update(Action::FocusNextPane).unwrap();
        assert_eq!(app.focus, FocusPane::List);
    }

    #[test]
    fn test_quit_dialog_flow() {
        let mut app = app_with_dumps();
        app.update(Action::OpenQuitDialog).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));

        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        app.update(Action::OpenQuitDialog).unwrap();
        app.update(Action::ForceQuit).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_filter_narrows_activation_target() {
        let mut app = app_with_dumps();
        app.update(Action::EnterSearchMode).unwrap();
        app.update(Action::SearchInput('3')).unwrap();
        app.update(Action::ExitSearchMode).unwrap();
        app.update(Action::ActivateRow).unwrap();

        assert_eq!(app.selection.get().unwrap().thread_id, 3);
    }
}
