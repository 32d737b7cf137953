//! The output-line model: what the terminal buffer holds.

use serde::{Deserialize, Serialize};

/// Semantic kind of an output line. Drives styling only, not behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputKind {
    /// An echoed input line (rendered with its prompt).
    Command,
    /// Regular command output.
    Output,
    /// A user-visible failure line.
    Error,
    /// Informational notice.
    Info,
    /// Success notice.
    Success,
}

/// A single renderable unit in the output buffer.
///
/// Immutable once created; evicted oldest-first when the buffer exceeds
/// its configured maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    /// Semantic kind (styling hint for the sink).
    pub kind: OutputKind,
    /// The line text, without any trailing newline.
    pub content: String,
    /// Prompt text captured when the line was entered.
    /// Present only for `Command` lines; the live prompt may change later.
    pub prompt: Option<String>,
}

impl OutputLine {
    /// Create a non-command line of the given kind.
    pub fn new(kind: OutputKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            prompt: None,
        }
    }

    /// Create an echoed command line, capturing the active prompt.
    pub fn command(content: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Command,
            content: content.into(),
            prompt: Some(prompt.into()),
        }
    }

    /// Display form: `prompt + content` for command lines, bare content
    /// for everything else.
    pub fn display(&self) -> String {
        match &self.prompt {
            Some(p) => format!("{p}{}", self.content),
            None => self.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_line_has_no_prompt() {
        let line = OutputLine::new(OutputKind::Output, "hello");
        assert_eq!(line.kind, OutputKind::Output);
        assert_eq!(line.content, "hello");
        assert!(line.prompt.is_none());
    }

    #[test]
    fn command_line_captures_prompt() {
        let line = OutputLine::command("ls", "$ ");
        assert_eq!(line.kind, OutputKind::Command);
        assert_eq!(line.prompt.as_deref(), Some("$ "));
    }

    #[test]
    fn display_prepends_prompt_for_commands() {
        let line = OutputLine::command("ls -la", "user@host:~$ ");
        assert_eq!(line.display(), "user@host:~$ ls -la");
    }

    #[test]
    fn display_is_bare_content_for_output() {
        let line = OutputLine::new(OutputKind::Error, "Error: nope");
        assert_eq!(line.display(), "Error: nope");
    }

    #[test]
    fn kinds_are_distinct() {
        assert_ne!(OutputKind::Command, OutputKind::Output);
        assert_ne!(OutputKind::Error, OutputKind::Info);
        assert_ne!(OutputKind::Info, OutputKind::Success);
    }

    #[test]
    fn line_round_trips_through_json() {
        let line = OutputLine::command("echo hi", "> ");
        let json = serde_json::to_string(&line).unwrap();
        let back: OutputLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }
}
