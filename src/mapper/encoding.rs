//! Purpose: Own the process-wide encoding rule set for temporal values.
//! Exports: `EncodingRules`, `rules`, `compact_date`, `compact_datetime`.
//! Role: Single seam for the compact numeric date and date-time wire shapes.
//! Invariants: Dates are exactly 8 ASCII digits (yyyyMMdd); date-times are exactly 14 (yyyyMMddHHmmss).
//! Invariants: No separators, no timezone suffix, on output and input alike.
//! Invariants: Rules are parsed once per process and identical for every conversion; no per-call overrides.

use std::sync::OnceLock;

use time::format_description::{self, BorrowedFormatItem};
use time::{Date, PrimitiveDateTime};

use crate::mapper::error::{Error, ErrorKind};

const COMPACT_DATE: &str = "[year][month][day]";
const COMPACT_DATE_DIGITS: usize = 8;
const COMPACT_DATETIME: &str = "[year][month][day][hour][minute][second]";
const COMPACT_DATETIME_DIGITS: usize = 14;

/// Parsed format descriptions for the two compact temporal wire shapes.
///
/// Obtained through [`rules`]; the instance is process-wide and immutable, so
/// every conversion in the process observes the same deterministic encodings.
#[derive(Debug)]
pub struct EncodingRules {
    date: Vec<BorrowedFormatItem<'static>>,
    datetime: Vec<BorrowedFormatItem<'static>>,
}

impl EncodingRules {
    fn new() -> Self {
        Self {
            date: format_description::parse(COMPACT_DATE).expect("compact date pattern parses"),
            datetime: format_description::parse(COMPACT_DATETIME)
                .expect("compact date-time pattern parses"),
        }
    }

    pub fn format_date(&self, date: Date) -> Result<String, Error> {
        date.format(&self.date).map_err(|err| {
            Error::new(ErrorKind::Format)
                .with_message("date format failed")
                .with_source(err)
        })
    }

    pub fn parse_date(&self, text: &str) -> Result<Date, Error> {
        require_digits(text, COMPACT_DATE_DIGITS, "date")?;
        Date::parse(text, &self.date).map_err(|err| {
            Error::new(ErrorKind::Parse)
                .with_message("date parse failed")
                .with_source(err)
        })
    }

    pub fn format_datetime(&self, datetime: PrimitiveDateTime) -> Result<String, Error> {
        datetime.format(&self.datetime).map_err(|err| {
            Error::new(ErrorKind::Format)
                .with_message("date-time format failed")
                .with_source(err)
        })
    }

    pub fn parse_datetime(&self, text: &str) -> Result<PrimitiveDateTime, Error> {
        require_digits(text, COMPACT_DATETIME_DIGITS, "date-time")?;
        PrimitiveDateTime::parse(text, &self.datetime).map_err(|err| {
            Error::new(ErrorKind::Parse)
                .with_message("date-time parse failed")
                .with_source(err)
        })
    }
}

fn require_digits(text: &str, expected: usize, what: &str) -> Result<(), Error> {
    if text.len() == expected && text.bytes().all(|byte| byte.is_ascii_digit()) {
        return Ok(());
    }
    Err(Error::new(ErrorKind::Parse).with_message(format!(
        "{what} must be exactly {expected} ASCII digits, got {text:?}"
    )))
}

static RULES: OnceLock<EncodingRules> = OnceLock::new();

/// Shared encoding rule set, built on first use and never rebuilt.
pub fn rules() -> &'static EncodingRules {
    RULES.get_or_init(EncodingRules::new)
}

/// Serde field adapter for `time::Date` in the compact 8-digit shape.
///
/// Use as `#[serde(with = "echomap::mapper::compact_date")]`.
pub mod compact_date {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = super::rules().format_date(*date).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::rules().parse_date(&text).map_err(D::Error::custom)
    }
}

/// Serde field adapter for `time::PrimitiveDateTime` in the compact 14-digit shape.
///
/// Use as `#[serde(with = "echomap::mapper::compact_datetime")]`.
pub mod compact_datetime {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    pub fn serialize<S: Serializer>(
        datetime: &PrimitiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let text = super::rules()
            .format_datetime(*datetime)
            .map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PrimitiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::rules()
            .parse_datetime(&text)
            .map_err(D::Error::custom)
    }
}
