//! Rendering of the single output line from a format template.
//!
//! Templates mix chrono strftime specifiers, applied to the selected
//! instant, with object fields introduced by `§` (see [`Field`]).

mod formatters;

use formatters::Field;

use crate::compute::ObjectDetails;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset};
use std::fmt::Write as _;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Time(String),
    Field(Field),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(template: &str) -> Result<Self, String> {
        let error = || format!("invalid format: {}", template);
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars();

        while let Some(c) = chars.next() {
            if c != '§' {
                literal.push(c);
                continue;
            }
            let field = chars.next().and_then(Field::from_token).ok_or_else(error)?;
            if !literal.is_empty() {
                segments.push(Segment::Time(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field(field));
        }
        if !literal.is_empty() {
            segments.push(Segment::Time(literal));
        }

        let malformed = segments.iter().any(|segment| match segment {
            Segment::Time(pattern) => {
                StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
            }
            Segment::Field(_) => false,
        });
        if malformed {
            return Err(error());
        }
        Ok(Self { segments })
    }

    pub fn render(
        &self,
        details: &ObjectDetails,
        timezone: Option<FixedOffset>,
    ) -> Result<String, String> {
        let instant: DateTime<FixedOffset> = match timezone {
            Some(offset) => details.instant.with_timezone(&offset),
            None => details.instant,
        };

        let mut line = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Time(pattern) => write!(line, "{}", instant.format(pattern))
                    .map_err(|_| format!("cannot format {} with '{}'", instant, pattern))?,
                Segment::Field(field) => line.push_str(&field.render(details)),
            }
        }
        Ok(line)
    }
}

/// Checks a template without rendering it.
pub fn validate_format(template: &str) -> Result<(), String> {
    Template::parse(template).map(|_| ())
}

pub fn format_result(
    details: &ObjectDetails,
    format: &str,
    timezone: Option<FixedOffset>,
) -> Result<String, String> {
    Template::parse(format)?.render(details, timezone)
}

/// Writes the result line; nothing is written if rendering fails.
pub fn write_result<W: Write>(
    writer: &mut W,
    details: &ObjectDetails,
    format: &str,
    timezone: Option<FixedOffset>,
) -> io::Result<()> {
    let line = format_result(details, format, timezone).map_err(io::Error::other)?;
    writeln!(writer, "{}", line)?;
    writer.flush()
}
