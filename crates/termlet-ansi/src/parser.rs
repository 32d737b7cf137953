//! Scanner: splits SGR-escaped text into styled runs.

use crate::style::StyleState;

const ESC: u8 = 0x1b;

/// A literal run of text tagged with the style active where it appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub style: StyleState,
}

/// Split `text` into styled runs by consuming `ESC [ <codes> m` sequences
/// left to right.
///
/// Style state starts fresh on every call and is discarded at the end.
/// Anything that is not a complete SGR sequence (a bare ESC, `ESC[` with
/// no terminator, non-numeric parameters) stays in the output as literal
/// text. Runs that would be empty are dropped.
pub fn segments(text: &str) -> Vec<StyledSegment> {
    let bytes = text.as_bytes();
    let mut segs: Vec<StyledSegment> = Vec::new();
    let mut style = StyleState::new();
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == ESC
            && let Some((seq_end, params)) = scan_sgr(text, i)
        {
            if run_start < i {
                segs.push(StyledSegment {
                    text: text[run_start..i].to_string(),
                    style,
                });
            }
            for code in params {
                style.apply_code(code);
            }
            i = seq_end;
            run_start = i;
            continue;
        }
        i += 1;
    }

    if run_start < bytes.len() {
        segs.push(StyledSegment {
            text: text[run_start..].to_string(),
            style,
        });
    }

    segs
}

/// Try to consume one SGR sequence starting at byte offset `start` (which
/// must point at ESC). Returns the offset past the `m` plus the parsed
/// parameter list, or `None` if the bytes there are not a complete SGR
/// sequence.
fn scan_sgr(text: &str, start: usize) -> Option<(usize, Vec<u16>)> {
    let bytes = text.as_bytes();
    if bytes.get(start + 1) != Some(&b'[') {
        return None;
    }
    let mut j = start + 2;
    while j < bytes.len() && (bytes[j].is_ascii_digit() || bytes[j] == b';') {
        j += 1;
    }
    if bytes.get(j) != Some(&b'm') {
        return None;
    }

    let raw = &text[start + 2..j];
    let params = if raw.is_empty() {
        // `ESC[m` is shorthand for reset.
        vec![0]
    } else {
        raw.split(';')
            // Empty slots ("1;;4") read as 0; oversized numbers fall out
            // of range and get ignored by `apply_code`.
            .map(|p| if p.is_empty() { 0 } else { p.parse().unwrap_or(u16::MAX) })
            .collect()
    };
    Some((j + 1, params))
}

/// Render SGR-escaped text as markup.
///
/// Literal runs pass through the caller-supplied `escape` so raw text is
/// never interpreted as markup; styled runs are wrapped in a `<span>`
/// carrying the active class list. Text with no ESC byte takes a fast
/// path and comes back as `escape(text)` unchanged.
pub fn render<F: Fn(&str) -> String>(text: &str, escape: F) -> String {
    if !text.contains('\u{1b}') {
        return escape(text);
    }

    let mut out = String::with_capacity(text.len());
    for seg in segments(text) {
        if seg.style.is_plain() {
            out.push_str(&escape(&seg.text));
        } else {
            out.push_str("<span class=\"");
            out.push_str(&seg.style.classes().join(" "));
            out.push_str("\">");
            out.push_str(&escape(&seg.text));
            out.push_str("</span>");
        }
    }
    out
}
