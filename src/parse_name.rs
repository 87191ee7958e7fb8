//! Filename parser: `YYYY[-]MM[-]DD[-author].ext`.
//!
//! Dates are ASCII digits only. Authors are ASCII word characters or CJK
//! ideographs (U+4E00..=U+9FA5).

use regex::Regex;
use std::sync::LazyLock;

static DATED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<year>[0-9]{4})-?(?P<month>[0-9]{2})-?(?P<day>[0-9]{2})(-(?P<author>[A-Za-z0-9_\x{4e00}-\x{9fa5}]*))?\.[A-Za-z0-9_]+",
    )
    .expect("dated filename pattern is valid")
});

/// Date and author extracted from a dated filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedName {
    pub year: String,
    pub month: String,
    pub day: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub author: Option<String>,
}

/// Result of interpreting a filename as an encoded date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedName {
    Valid(DatedName),
    Invalid,
}

impl ParsedName {
    pub fn is_valid(&self) -> bool {
        matches!(self, ParsedName::Valid(_))
    }

    pub fn date(&self) -> Option<&str> {
        match self {
            ParsedName::Valid(name) => Some(&name.date),
            ParsedName::Invalid => None,
        }
    }

    pub fn author(&self) -> Option<&str> {
        match self {
            ParsedName::Valid(name) => name.author.as_deref(),
            ParsedName::Invalid => None,
        }
    }

    pub fn into_dated(self) -> Option<DatedName> {
        match self {
            ParsedName::Valid(name) => Some(name),
            ParsedName::Invalid => None,
        }
    }
}

/// Parse a filename such as `2023-05-01-Alice.jpg` or `20230501.png`.
///
/// Never fails: anything that does not carry a date before its extension is
/// [`ParsedName::Invalid`].
pub fn parse_name(file_name: &str) -> ParsedName {
    let Some(caps) = DATED_NAME.captures(file_name) else {
        return ParsedName::Invalid;
    };

    let year = caps["year"].to_string();
    let month = caps["month"].to_string();
    let day = caps["day"].to_string();
    let date = format!("{year}-{month}-{day}");
    let author = caps
        .name("author")
        .map(|m| m.as_str())
        .filter(|a| !a.is_empty())
        .map(str::to_string);

    ParsedName::Valid(DatedName {
        year,
        month,
        day,
        date,
        author,
    })
}
