//! Stack trace highlighting
//!
//! Classifies the lines of a captured JVM stack trace and colors them for
//! the detail pane.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use regex::Regex;
use std::sync::LazyLock;

/// Matches a stack frame: `at com.acme.OrderService.confirm(OrderService.java:88)`
static FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*at\s+(?P<location>[\w$.<>/]+)\((?P<source>[^)]*)\)").unwrap()
});

/// Matches a monitor/lock annotation: `- locked <0x00000000e3c7f2a8> (a java.lang.Object)`
static LOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s+(locked|waiting on|waiting to lock|parking to wait for|eliminated)")
        .unwrap()
});

/// Matches the dump header: `"http-nio-8080-exec-5" #137 daemon prio=5 ...`
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^"[^"]+""#).unwrap());

/// Line categories in a stack trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackLineKind {
    /// Thread header line with name and flags
    Header,
    /// `java.lang.Thread.State: ...` line
    State,
    /// A stack frame
    Frame,
    /// Monitor/lock annotation
    Lock,
    /// Anything else
    Plain,
}

/// Classify a single stack trace line
pub fn classify(line: &str) -> StackLineKind {
    if HEADER_REGEX.is_match(line) {
        StackLineKind::Header
    } else if line.trim_start().starts_with("java.lang.Thread.State:") {
        StackLineKind::State
    } else if FRAME_REGEX.is_match(line) {
        StackLineKind::Frame
    } else if LOCK_REGEX.is_match(line) {
        StackLineKind::Lock
    } else {
        StackLineKind::Plain
    }
}

/// Highlight a full stack trace for rendering
pub fn highlight_stack(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_line).collect()
}

/// Highlight one stack trace line
pub fn highlight_line(line: &str) -> Line<'static> {
    match classify(line) {
        StackLineKind::Header => Line::from(Span::styled(
            line.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        StackLineKind::State => Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        StackLineKind::Frame => highlight_frame(line),
        StackLineKind::Lock => Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::Magenta),
        )),
        StackLineKind::Plain => Line::from(line.to_string()),
    }
}

/// Split a frame line into indent, location, and source spans
fn highlight_frame(line: &str) -> Line<'static> {
    if let Some(caps) = FRAME_REGEX.captures(line) {
        let indent_len = line.len() - line.trim_start().len();
        let indent = " ".repeat(indent_len);
        let location = caps.name("location").map(|m| m.as_str()).unwrap_or("");
        let source = caps.name("source").map(|m| m.as_str()).unwrap_or("");

        return Line::from(vec![
            Span::raw(indent),
            Span::styled("at ", Style::default().fg(Color::DarkGray)),
            Span::styled(location.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled("(", Style::default().fg(Color::DarkGray)),
            Span::styled(source.to_string(), Style::default().fg(Color::Green)),
            Span::styled(")", Style::default().fg(Color::DarkGray)),
        ]);
    }

    Line::from(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_frame() {
        assert_eq!(
            classify("\tat com.acme.OrderService.confirm(OrderService.java:88)"),
            StackLineKind::Frame
        );
        assert_eq!(
            classify("    at java.base/java.lang.Object.wait(Native Method)"),
            StackLineKind::Frame
        );
    }

    #[test]
    fn test_classify_header() {
        assert_eq!(
            classify("\"http-nio-8080-exec-5\" #137 daemon prio=5 os_prio=0"),
            StackLineKind::Header
        );
    }

    #[test]
    fn test_classify_state() {
        assert_eq!(
            classify("   java.lang.Thread.State: TIMED_WAITING (sleeping)"),
            StackLineKind::State
        );
    }

    #[test]
    fn test_classify_lock() {
        assert_eq!(
            classify("\t- locked <0x00000000e3c7f2a8> (a java.lang.Object)"),
            StackLineKind::Lock
        );
        assert_eq!(
            classify("\t- waiting to lock <0x00000000e3c7f2a8> (a java.lang.Object)"),
            StackLineKind::Lock
        );
    }

    #[test]
    fn test_classify_plain() {
        assert_eq!(classify(""), StackLineKind::Plain);
        assert_eq!(classify("Full thread dump OpenJDK 64-Bit"), StackLineKind::Plain);
    }

    #[test]
    fn test_frame_spans_split_location_and_source() {
        let line = highlight_line("\tat com.acme.Repo.lock(Repo.java:31)");
        let contents: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(contents.contains(&"com.acme.Repo.lock"));
        assert!(contents.contains(&"Repo.java:31"));
    }

    #[test]
    fn test_highlight_stack_keeps_line_count() {
        let text = "\"worker\" #1\n   java.lang.Thread.State: RUNNABLE\n\tat a.B.c(B.java:1)";
        assert_eq!(highlight_stack(text).len(), 3);
    }
}
