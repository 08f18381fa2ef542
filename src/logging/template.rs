//! Log line templates
//!
//! A template is plain text with `{level}`, `{message}`, `{time}`, `{file}`,
//! `{line}` and `{target}` placeholders. Any other braces, including color
//! tokens like `{fg_red}`, are kept as literal text.

use std::mem;

/// Console template: level glyph and message
pub const DEFAULT_LOG_FMT: &str = "{level} {message}";

/// Log file template
pub const DEFAULT_LOG_FILE_FMT: &str = "[{level}] [{time}] [file:{file}] [line:{line}] {message}";

/// strftime-style format for `{time}`
pub const DEFAULT_DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Level,
    Message,
    Time,
    File,
    Line,
    Target,
}

impl Segment {
    fn placeholder(name: &str) -> Option<Self> {
        match name {
            "level" => Some(Self::Level),
            "message" => Some(Self::Message),
            "time" => Some(Self::Time),
            "file" => Some(Self::File),
            "line" => Some(Self::Line),
            "target" => Some(Self::Target),
            _ => None,
        }
    }
}

/// Values substituted into a template for one record
#[derive(Debug, Clone, Copy)]
pub struct RecordFields<'a> {
    pub level: &'a str,
    pub message: &'a str,
    pub time: &'a str,
    pub file: &'a str,
    pub line: u32,
    pub target: &'a str,
}

/// A parsed log line template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTemplate {
    segments: Vec<Segment>,
}

impl LogTemplate {
    /// Parse `template`; unknown placeholders stay literal, so this never fails
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            literal.push_str(&rest[..start]);
            let open = &rest[start..];

            let placeholder = open.find('}').and_then(|end| {
                Segment::placeholder(&open[1..end]).map(|segment| (segment, end))
            });

            match placeholder {
                Some((segment, end)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(mem::take(&mut literal)));
                    }
                    segments.push(segment);
                    rest = &open[end + 1..];
                }
                None => {
                    literal.push('{');
                    rest = &open[1..];
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Whether rendering needs a timestamp
    #[must_use]
    pub fn uses_time(&self) -> bool {
        self.segments.contains(&Segment::Time)
    }

    #[must_use]
    pub fn render(&self, fields: &RecordFields<'_>) -> String {
        let mut line = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Level => line.push_str(fields.level),
                Segment::Message => line.push_str(fields.message),
                Segment::Time => line.push_str(fields.time),
                Segment::File => line.push_str(fields.file),
                Segment::Line => line.push_str(&fields.line.to_string()),
                Segment::Target => line.push_str(fields.target),
            }
        }
        line
    }
}
