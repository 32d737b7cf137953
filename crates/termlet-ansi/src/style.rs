//! Style state: the set of SGR attributes active at a point in the text.

/// The 16 ANSI palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    /// Map a foreground SGR code (30-37, 90-97) to a color.
    fn from_fg_code(code: u16) -> Option<Self> {
        match code {
            30..=37 => Self::from_base(code - 30),
            90..=97 => Self::from_base(code - 90).map(Self::brighten),
            _ => None,
        }
    }

    /// Map a background SGR code (40-47) to a color.
    fn from_bg_code(code: u16) -> Option<Self> {
        match code {
            40..=47 => Self::from_base(code - 40),
            _ => None,
        }
    }

    fn from_base(offset: u16) -> Option<Self> {
        match offset {
            0 => Some(Self::Black),
            1 => Some(Self::Red),
            2 => Some(Self::Green),
            3 => Some(Self::Yellow),
            4 => Some(Self::Blue),
            5 => Some(Self::Magenta),
            6 => Some(Self::Cyan),
            7 => Some(Self::White),
            _ => None,
        }
    }

    fn brighten(self) -> Self {
        match self {
            Self::Black => Self::BrightBlack,
            Self::Red => Self::BrightRed,
            Self::Green => Self::BrightGreen,
            Self::Yellow => Self::BrightYellow,
            Self::Blue => Self::BrightBlue,
            Self::Magenta => Self::BrightMagenta,
            Self::Cyan => Self::BrightCyan,
            Self::White => Self::BrightWhite,
            other => other,
        }
    }

    /// CSS class for this color used as a foreground.
    pub fn fg_class(self) -> &'static str {
        match self {
            Self::Black => "ansi-black",
            Self::Red => "ansi-red",
            Self::Green => "ansi-green",
            Self::Yellow => "ansi-yellow",
            Self::Blue => "ansi-blue",
            Self::Magenta => "ansi-magenta",
            Self::Cyan => "ansi-cyan",
            Self::White => "ansi-white",
            Self::BrightBlack => "ansi-bright-black",
            Self::BrightRed => "ansi-bright-red",
            Self::BrightGreen => "ansi-bright-green",
            Self::BrightYellow => "ansi-bright-yellow",
            Self::BrightBlue => "ansi-bright-blue",
            Self::BrightMagenta => "ansi-bright-magenta",
            Self::BrightCyan => "ansi-bright-cyan",
            Self::BrightWhite => "ansi-bright-white",
        }
    }

    /// CSS class for this color used as a background.
    pub fn bg_class(self) -> &'static str {
        match self {
            Self::Black => "ansi-bg-black",
            Self::Red => "ansi-bg-red",
            Self::Green => "ansi-bg-green",
            Self::Yellow => "ansi-bg-yellow",
            Self::Blue => "ansi-bg-blue",
            Self::Magenta => "ansi-bg-magenta",
            Self::Cyan => "ansi-bg-cyan",
            Self::White => "ansi-bg-white",
            Self::BrightBlack => "ansi-bg-bright-black",
            Self::BrightRed => "ansi-bg-bright-red",
            Self::BrightGreen => "ansi-bg-bright-green",
            Self::BrightYellow => "ansi-bg-bright-yellow",
            Self::BrightBlue => "ansi-bg-bright-blue",
            Self::BrightMagenta => "ansi-bg-bright-magenta",
            Self::BrightCyan => "ansi-bg-bright-cyan",
            Self::BrightWhite => "ansi-bg-bright-white",
        }
    }
}

/// The set of SGR attributes currently in effect.
///
/// At most one foreground and one background color; bold, italic, and
/// underline are independent flags. A new color replaces the previous one
/// of the same plane only; reset clears everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleState {
    pub fg: Option<AnsiColor>,
    pub bg: Option<AnsiColor>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyleState {
    /// Fresh state with nothing active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one SGR code. Unrecognized codes are ignored.
    pub fn apply_code(&mut self, code: u16) {
        match code {
            0 => *self = Self::default(),
            1 => self.bold = true,
            3 => self.italic = true,
            4 => self.underline = true,
            30..=37 | 90..=97 => self.fg = AnsiColor::from_fg_code(code),
            40..=47 => self.bg = AnsiColor::from_bg_code(code),
            _ => {},
        }
    }

    /// True when no attribute is active (text renders unwrapped).
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// The active CSS class list, foreground first.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if let Some(fg) = self.fg {
            out.push(fg.fg_class());
        }
        if let Some(bg) = self.bg {
            out.push(bg.bg_class());
        }
        if self.bold {
            out.push("ansi-bold");
        }
        if self.italic {
            out.push("ansi-italic");
        }
        if self.underline {
            out.push("ansi-underline");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_plain() {
        let s = StyleState::new();
        assert!(s.is_plain());
        assert!(s.classes().is_empty());
    }

    #[test]
    fn fg_code_sets_color() {
        let mut s = StyleState::new();
        s.apply_code(31);
        assert_eq!(s.fg, Some(AnsiColor::Red));
        assert_eq!(s.classes(), vec!["ansi-red"]);
    }

    #[test]
    fn second_fg_replaces_first() {
        let mut s = StyleState::new();
        s.apply_code(31);
        s.apply_code(32);
        assert_eq!(s.fg, Some(AnsiColor::Green));
        assert_eq!(s.classes(), vec!["ansi-green"]);
    }

    #[test]
    fn fg_change_preserves_flags_and_bg() {
        let mut s = StyleState::new();
        s.apply_code(1);
        s.apply_code(44);
        s.apply_code(31);
        s.apply_code(33);
        assert_eq!(s.fg, Some(AnsiColor::Yellow));
        assert_eq!(s.bg, Some(AnsiColor::Blue));
        assert!(s.bold);
    }

    #[test]
    fn bg_change_preserves_fg() {
        let mut s = StyleState::new();
        s.apply_code(31);
        s.apply_code(42);
        s.apply_code(44);
        assert_eq!(s.fg, Some(AnsiColor::Red));
        assert_eq!(s.bg, Some(AnsiColor::Blue));
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = StyleState::new();
        s.apply_code(1);
        s.apply_code(3);
        s.apply_code(4);
        s.apply_code(91);
        s.apply_code(40);
        s.apply_code(0);
        assert!(s.is_plain());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut s = StyleState::new();
        s.apply_code(0);
        s.apply_code(0);
        assert!(s.is_plain());
    }

    #[test]
    fn bright_fg_codes() {
        let mut s = StyleState::new();
        s.apply_code(92);
        assert_eq!(s.fg, Some(AnsiColor::BrightGreen));
        assert_eq!(s.classes(), vec!["ansi-bright-green"]);
    }

    #[test]
    fn unknown_codes_are_ignored() {
        let mut s = StyleState::new();
        s.apply_code(31);
        s.apply_code(5);
        s.apply_code(7);
        s.apply_code(38);
        s.apply_code(999);
        assert_eq!(s.fg, Some(AnsiColor::Red));
        assert!(s.bg.is_none());
        assert!(!s.bold && !s.italic && !s.underline);
    }

    #[test]
    fn class_order_is_stable() {
        let mut s = StyleState::new();
        s.apply_code(4);
        s.apply_code(1);
        s.apply_code(42);
        s.apply_code(35);
        assert_eq!(
            s.classes(),
            vec!["ansi-magenta", "ansi-bg-green", "ansi-bold", "ansi-underline"]
        );
    }
}
