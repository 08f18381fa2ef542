//! Template-driven event formatter for the console and the log file

use crate::error::QmkError;
use crate::logging::ansi::{RESET, expand_color_tokens, paint};
use crate::logging::template::{LogTemplate, RecordFields};
use anyhow::Result;
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use colored::Color;
use std::borrow::Cow;
use std::fmt::{self, Write as _};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelStyle {
    /// `☒`, `⚠`, ... colored when color is on
    Glyph,
    /// `ERROR`, `WARN`, ...
    Name,
}

/// Renders each event through a [`LogTemplate`]
///
/// With the default console template an error reads
///
/// ```text
/// ☒ I don't do anything.
/// ```
///
/// Inline color tokens in the rendered line are expanded when color is on
/// and removed otherwise.
#[derive(Debug, Clone)]
pub struct TemplateFormat {
    template: LogTemplate,
    datetime_fmt: String,
    levels: LevelStyle,
    color: bool,
}

impl TemplateFormat {
    /// Console format, level shown as a glyph
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `datetime_fmt` is not a valid
    /// strftime format.
    pub fn console(template: &str, datetime_fmt: &str, color: bool) -> Result<Self> {
        Self::new(template, datetime_fmt, LevelStyle::Glyph, color)
    }

    /// Log file format, level shown by name, never colored
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `datetime_fmt` is not a valid
    /// strftime format.
    pub fn file(template: &str, datetime_fmt: &str) -> Result<Self> {
        Self::new(template, datetime_fmt, LevelStyle::Name, false)
    }

    fn new(template: &str, datetime_fmt: &str, levels: LevelStyle, color: bool) -> Result<Self> {
        validate_datetime_fmt(datetime_fmt)?;
        Ok(Self {
            template: LogTemplate::parse(template),
            datetime_fmt: datetime_fmt.to_owned(),
            levels,
            color,
        })
    }

    #[must_use]
    pub const fn color(&self) -> bool {
        self.color
    }

    /// The glyph standing in for `level`
    #[must_use]
    pub fn glyph(level: Level) -> &'static str {
        match level {
            Level::ERROR => "☒",
            Level::WARN => "⚠",
            Level::INFO => "ℹ",
            Level::DEBUG => "☐",
            _ => r"¯\_(o_o)_/¯",
        }
    }

    fn level_label(&self, level: Level) -> Cow<'static, str> {
        if self.levels == LevelStyle::Name {
            return Cow::Borrowed(level.as_str());
        }

        let glyph = Self::glyph(level);
        if !self.color {
            return Cow::Borrowed(glyph);
        }

        match level {
            Level::ERROR => Cow::Owned(paint(glyph, Color::Red)),
            Level::WARN => Cow::Owned(paint(glyph, Color::Yellow)),
            Level::INFO => Cow::Owned(paint(glyph, Color::Blue)),
            Level::DEBUG => Cow::Owned(paint(glyph, Color::Cyan)),
            _ => Cow::Borrowed(glyph),
        }
    }
}

impl<S, N> FormatEvent<S, N> for TemplateFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        let mut message = String::new();
        ctx.field_format()
            .format_fields(Writer::new(&mut message), event)?;

        let mut time = String::new();
        if self.template.uses_time() {
            write!(time, "{}", Local::now().format(&self.datetime_fmt))?;
        }

        let level = self.level_label(*meta.level());
        let line = self.template.render(&RecordFields {
            level: &level,
            message: &message,
            time: &time,
            file: meta.file().unwrap_or("?"),
            line: meta.line().unwrap_or(0),
            target: meta.target(),
        });

        writer.write_str(&expand_color_tokens(&line, self.color))?;
        if self.color {
            writer.write_str(RESET)?;
        }
        writeln!(writer)
    }
}

/// Reject strftime formats chrono cannot render
///
/// # Errors
///
/// Returns a configuration error naming the bad format.
pub fn validate_datetime_fmt(datetime_fmt: &str) -> Result<()> {
    if StrftimeItems::new(datetime_fmt).any(|item| matches!(item, Item::Error)) {
        return Err(QmkError::configuration(format!(
            "Invalid datetime format '{datetime_fmt}'"
        ))
        .into());
    }
    Ok(())
}
