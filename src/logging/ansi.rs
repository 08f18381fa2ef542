//! ANSI escape sequences: inline color tokens, painting and stripping

use colored::Color;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::LazyLock;
use tracing_subscriber::fmt::MakeWriter;

// CSI sequences (colors, cursor movement) and two-byte Fe escapes
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b(?:\[[0-?]*[ -/]*[@-~]|[@-Z\\-_])").expect("ANSI escape pattern is valid")
});

// `{fg_red}`, `{bg_lightblue_ex}`, `{style_reset_all}`, ...
static COLOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(fg|bg|style)_([a-z_]+)\}").expect("color token pattern is valid")
});

/// SGR sequence resetting every attribute
pub const RESET: &str = "\x1b[0m";

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "lightblack_ex" => Color::BrightBlack,
        "lightred_ex" => Color::BrightRed,
        "lightgreen_ex" => Color::BrightGreen,
        "lightyellow_ex" => Color::BrightYellow,
        "lightblue_ex" => Color::BrightBlue,
        "lightmagenta_ex" => Color::BrightMagenta,
        "lightcyan_ex" => Color::BrightCyan,
        "lightwhite_ex" => Color::BrightWhite,
        _ => return None,
    };
    Some(color)
}

/// SGR parameter for a color token, `None` if the token is unknown
fn token_code(kind: &str, name: &str) -> Option<Cow<'static, str>> {
    match (kind, name) {
        ("fg", "reset") => Some(Cow::Borrowed("39")),
        ("bg", "reset") => Some(Cow::Borrowed("49")),
        ("fg", _) => named_color(name).map(|color| color.to_fg_str()),
        ("bg", _) => named_color(name).map(|color| color.to_bg_str()),
        ("style", "bright") => Some(Cow::Borrowed("1")),
        ("style", "dim") => Some(Cow::Borrowed("2")),
        ("style", "normal") => Some(Cow::Borrowed("22")),
        ("style", "reset_all") => Some(Cow::Borrowed("0")),
        _ => None,
    }
}

/// Replace inline color tokens such as `{fg_red}` with escape sequences
///
/// With `color` off the tokens are removed instead. Unknown tokens are left
/// as written.
#[must_use]
pub fn expand_color_tokens(text: &str, color: bool) -> Cow<'_, str> {
    COLOR_TOKEN.replace_all(text, |caps: &Captures<'_>| {
        match token_code(&caps[1], &caps[2]) {
            Some(code) if color => format!("\x1b[{code}m"),
            Some(_) => String::new(),
            None => caps[0].to_owned(),
        }
    })
}

/// `text` in the foreground `color`, followed by a reset
#[must_use]
pub fn paint(text: &str, color: Color) -> String {
    format!("\x1b[{}m{text}{RESET}", color.to_fg_str())
}

/// Remove ANSI escape sequences from `text`
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

/// Writer that strips ANSI escapes before forwarding to `inner`
#[derive(Debug)]
pub struct StripAnsi<W> {
    inner: W,
}

impl<W: Write> Write for StripAnsi<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.inner.write_all(strip_ansi(&text).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `MakeWriter` wrapper producing [`StripAnsi`] writers
#[derive(Debug, Clone)]
pub struct StripAnsiWriter<M> {
    make_writer: M,
}

impl<M> StripAnsiWriter<M> {
    #[must_use]
    pub const fn new(make_writer: M) -> Self {
        Self { make_writer }
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for StripAnsiWriter<M> {
    type Writer = StripAnsi<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        StripAnsi {
            inner: self.make_writer.make_writer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_colors() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(strip_ansi("\x1b[1;44mbold blue\x1b[0m!"), "bold blue!");
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "I don't do anything.";
        assert!(matches!(strip_ansi(text), Cow::Borrowed(_)));
        assert_eq!(strip_ansi(text), text);
    }

    #[test]
    fn test_strip_cursor_movement() {
        assert_eq!(strip_ansi("a\x1b[2Kb\x1b[10;20Hc"), "abc");
    }

    #[test]
    fn test_color_tokens_expand() {
        assert_eq!(
            expand_color_tokens("{fg_blue}hi{style_reset_all}", true),
            "\x1b[34mhi\x1b[0m"
        );
        assert_eq!(expand_color_tokens("{bg_green}go", true), "\x1b[42mgo");
        assert_eq!(expand_color_tokens("{fg_lightred_ex}!", true), "\x1b[91m!");
    }

    #[test]
    fn test_color_tokens_removed_without_color() {
        assert_eq!(expand_color_tokens("{bg_red}{fg_white}bye", false), "bye");
    }

    #[test]
    fn test_unknown_tokens_left_alone() {
        assert_eq!(expand_color_tokens("{fg_mauve} {name}", true), "{fg_mauve} {name}");
    }

    #[test]
    fn test_paint() {
        assert_eq!(paint("☒", Color::Red), "\x1b[31m☒\x1b[0m");
    }

    #[test]
    fn test_writer_strips() {
        let mut writer = StripAnsi { inner: Vec::new() };
        let written = writer.write(b"\x1b[32mok\x1b[0m\n").unwrap();
        assert_eq!(written, 12);
        assert_eq!(writer.inner, b"ok\n");
    }
}
