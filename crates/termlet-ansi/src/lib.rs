//! termlet-ansi: SGR escape-sequence parsing for the terminal widget.
//!
//! Recognizes `ESC [ <codes> m` sequences (colors, bold, italic, underline,
//! reset) and splits text into styled runs. Everything else about the escape
//! universe (cursor addressing, modes) is out of scope and passes through as
//! literal text.

mod parser;
mod style;

pub use parser::{StyledSegment, render, segments};
pub use style::{AnsiColor, StyleState};
