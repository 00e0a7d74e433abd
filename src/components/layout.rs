//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Lower bound for the list pane's share of the split, in percent
pub const MIN_SPLIT_PERCENT: u16 = 10;
/// Upper bound for the list pane's share of the split, in percent
pub const MAX_SPLIT_PERCENT: u16 = 90;

/// Main page layout areas
pub struct PageLayout {
    pub header: Rect,
    pub list: Rect,
    /// One-row divider between the list and detail panes
    pub divider: Rect,
    pub detail: Rect,
    pub help: Rect,
}

/// Clamp a list-pane percentage to the allowed split range
pub fn clamp_split(percent: u16) -> u16 {
    percent.clamp(MIN_SPLIT_PERCENT, MAX_SPLIT_PERCENT)
}

/// Calculate the page layout
///
/// Vertical stack: header, list pane, divider, detail pane, help bar.
/// `list_percent` is the list pane's share of the space between header and
/// help bar; it is clamped to the allowed range before use.
pub fn calculate_page_layout(area: Rect, list_percent: u16) -> PageLayout {
    let list_percent = clamp_split(list_percent);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let panel_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(list_percent),
            Constraint::Length(1),
            Constraint::Percentage(100 - list_percent),
        ])
        .split(main_chunks[1]);

    PageLayout {
        header: main_chunks[0],
        list: panel_chunks[0],
        divider: panel_chunks[1],
        detail: panel_chunks[2],
        help: main_chunks[2],
    }
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_split_bounds() {
        assert_eq!(clamp_split(0), MIN_SPLIT_PERCENT);
        assert_eq!(clamp_split(9), MIN_SPLIT_PERCENT);
        assert_eq!(clamp_split(10), 10);
        assert_eq!(clamp_split(50), 50);
        assert_eq!(clamp_split(90), 90);
        assert_eq!(clamp_split(95), MAX_SPLIT_PERCENT);
    }

    #[test]
    fn test_page_layout_sections_stack() {
        let area = Rect::new(0, 0, 80, 40);
        let layout = calculate_page_layout(area, 50);

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.help.height, 3);
        assert_eq!(layout.divider.height, 1);
        assert!(layout.list.y < layout.divider.y);
        assert!(layout.divider.y < layout.detail.y);
        assert_eq!(layout.header.width, 80);
    }

    #[test]
    fn test_page_layout_respects_clamp() {
        let area = Rect::new(0, 0, 80, 43);
        let layout = calculate_page_layout(area, 100);

        // Clamped to 90%, the detail pane keeps a share of the space
        assert!(layout.detail.height >= 1);
        assert!(layout.list.height > layout.detail.height);

        let layout = calculate_page_layout(area, 0);
        assert!(layout.list.height >= 1);
        assert!(layout.detail.height > layout.list.height);
    }

    #[test]
    fn test_centered_popup_fits_area() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = centered_popup(area, 40, 7);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 7);
        assert_eq!(popup.x, 20);

        let oversized = centered_popup(area, 200, 50);
        assert_eq!(oversized.width, 80);
        assert_eq!(oversized.height, 24);
    }
}
