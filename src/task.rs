use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::config::TIMESTAMP_FORMAT;
use crate::error::ParseError;

const DELIMITER: char = '\t';
const FIELD_COUNT: usize = 4;

/// One to-do item, as held in memory and written to one line of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u32,
    pub text: String,
    pub done: bool,
    pub created_at: NaiveDateTime,
}

/// Replace the field delimiter and line breaks with a single space each.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            DELIMITER | '\n' | '\r' => ' ',
            other => other,
        })
        .collect()
}

/// Current local time, cut to whole seconds so it survives a save/load.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

impl Task {
    pub fn new(id: u32, text: &str, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            text: sanitize(text),
            done: false,
            created_at,
        }
    }

    /// Parse one line of the task file.
    ///
    /// Splits into at most four fields: `id`, done flag, timestamp, text.
    /// Anything after the third tab belongs to the text.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = line.splitn(FIELD_COUNT, DELIMITER).collect();
        let [id, done, created_at, text] = fields[..] else {
            return Err(ParseError::MissingFields(fields.len()));
        };

        // ids are positive and must leave room for a successor
        let id = id
            .parse::<u32>()
            .ok()
            .filter(|&n| n != 0 && n != u32::MAX)
            .ok_or_else(|| ParseError::InvalidId(id.to_string()))?;
        let created_at = NaiveDateTime::parse_from_str(created_at, TIMESTAMP_FORMAT)
            .map_err(|_| ParseError::InvalidTimestamp(created_at.to_string()))?;

        Ok(Self {
            id,
            text: text.to_string(),
            done: done == "1",
            created_at,
        })
    }

    /// Serialize to a single tab-separated line, without the line break.
    pub fn serialize(&self) -> String {
        format!(
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            self.id,
            if self.done { "1" } else { "0" },
            self.created_at_display(),
            sanitize(&self.text),
        )
    }

    pub fn toggle(&mut self) {
        self.done = !self.done;
    }

    pub fn status_glyph(&self) -> &'static str {
        if self.done { "✅" } else { "❌" }
    }

    pub fn created_at_display(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }
}
