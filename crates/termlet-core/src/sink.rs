//! Render sink: where scheduled output becomes visible.

use termlet_types::{OutputKind, OutputLine};

/// Receiver for rendered output.
///
/// The scheduler drives one of these; the embedding maps the calls onto
/// its display (DOM nodes, a text grid, a test vector). The sink never
/// sees logical-buffer state, only append/remove/clear operations and
/// typing-animation frames.
pub trait RenderSink {
    /// Append a completed line.
    fn append_line(&mut self, line: &OutputLine);

    /// Show a partial typing frame (`None` removes it). The frame text
    /// already carries the caret marker.
    fn set_partial(&mut self, frame: Option<(&str, OutputKind)>);

    /// Remove the oldest rendered line (retention eviction).
    fn remove_oldest(&mut self);

    /// Remove everything rendered.
    fn clear(&mut self);

    /// Keep the newest output visible.
    fn scroll_to_bottom(&mut self);
}

/// Escape the characters that would otherwise be interpreted as markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// In-memory sink rendering each line to markup via the ANSI parser.
///
/// Reference implementation for embedders without a live display, and
/// the workhorse of the scheduler/executor tests.
#[derive(Debug, Default)]
pub struct BufferSink {
    /// Rendered markup, one entry per visible line.
    pub rendered: Vec<String>,
    /// The current typing frame, if any.
    pub partial: Option<String>,
    /// Number of auto-scroll requests received.
    pub scrolls: usize,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for BufferSink {
    fn append_line(&mut self, line: &OutputLine) {
        self.rendered
            .push(termlet_ansi::render(&line.display(), escape_html));
    }

    fn set_partial(&mut self, frame: Option<(&str, OutputKind)>) {
        self.partial = frame.map(|(text, _)| termlet_ansi::render(text, escape_html));
    }

    fn remove_oldest(&mut self) {
        if !self.rendered.is_empty() {
            self.rendered.remove(0);
        }
    }

    fn clear(&mut self) {
        self.rendered.clear();
        self.partial = None;
    }

    fn scroll_to_bottom(&mut self) {
        self.scrolls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("<i>"), "&lt;i&gt;");
        assert_eq!(escape_html("\"q\" 'q'"), "&quot;q&quot; &#39;q&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn buffer_sink_renders_prompt_and_ansi() {
        let mut sink = BufferSink::new();
        sink.append_line(&OutputLine::command("ls", "$ "));
        sink.append_line(&OutputLine::new(OutputKind::Output, "\u{1b}[32mok\u{1b}[0m"));
        assert_eq!(sink.rendered[0], "$ ls");
        assert_eq!(sink.rendered[1], "<span class=\"ansi-green\">ok</span>");
    }

    #[test]
    fn buffer_sink_remove_oldest() {
        let mut sink = BufferSink::new();
        sink.append_line(&OutputLine::new(OutputKind::Output, "a"));
        sink.append_line(&OutputLine::new(OutputKind::Output, "b"));
        sink.remove_oldest();
        assert_eq!(sink.rendered, vec!["b"]);
        sink.remove_oldest();
        sink.remove_oldest();
        assert!(sink.rendered.is_empty());
    }

    #[test]
    fn buffer_sink_partial_frames() {
        let mut sink = BufferSink::new();
        sink.set_partial(Some(("he▌", OutputKind::Output)));
        assert_eq!(sink.partial.as_deref(), Some("he▌"));
        sink.set_partial(None);
        assert!(sink.partial.is_none());
    }
}
