use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Longest text a single rich-text segment may carry in the store.
pub const MAX_SEGMENT_CHARS: usize = 2000;

pub type Properties = BTreeMap<String, PropertyValue>;

/// A typed property value, tagged the way the store tags it (`"type": "title"`).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title { title: Vec<RichText> },
    RichText { rich_text: Vec<RichText> },
    Select { select: Option<SelectOption> },
    Number { number: Option<f64> },
    Date { date: Option<DateValue> },
    Url { url: Option<String> },
    #[serde(other)]
    Unsupported,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RichText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl RichText {
    pub fn plain(content: &str) -> Self {
        RichText {
            text: Some(TextContent {
                content: content.to_string(),
            }),
            plain_text: None,
        }
    }

    pub fn content(&self) -> &str {
        self.plain_text
            .as_deref()
            .or_else(|| self.text.as_ref().map(|t| t.content.as_str()))
            .unwrap_or_default()
    }
}

impl PropertyValue {
    pub fn title(content: &str) -> Self {
        PropertyValue::Title {
            title: vec![RichText::plain(content)],
        }
    }

    /// Long text is split into segments the store accepts.
    pub fn rich_text(content: &str) -> Self {
        let chars: Vec<char> = content.chars().collect();
        let rich_text = chars
            .chunks(MAX_SEGMENT_CHARS)
            .map(|chunk| RichText::plain(&chunk.iter().collect::<String>()))
            .collect();
        PropertyValue::RichText { rich_text }
    }

    pub fn select(name: &str) -> Self {
        PropertyValue::Select {
            select: Some(SelectOption {
                name: name.to_string(),
            }),
        }
    }

    pub fn number(value: f64) -> Self {
        PropertyValue::Number {
            number: Some(value),
        }
    }

    pub fn date(day: NaiveDate) -> Self {
        PropertyValue::Date {
            date: Some(DateValue {
                start: day.format("%Y-%m-%d").to_string(),
                end: None,
            }),
        }
    }

    pub fn url(value: &str) -> Self {
        PropertyValue::Url {
            url: Some(value.to_string()),
        }
    }

    /// Concatenated text of title and rich-text values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            PropertyValue::Title { title: segments }
            | PropertyValue::RichText {
                rich_text: segments,
            } => Some(segments.iter().map(RichText::content).collect()),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&str> {
        match self {
            PropertyValue::Select { select } => select.as_ref().map(|s| s.name.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number { number } => number.filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_url(&self) -> Option<&str> {
        match self {
            PropertyValue::Url { url } => url.as_deref(),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            PropertyValue::Date { date } => date.as_ref().and_then(|d| parse_date(&d.start)),
            _ => None,
        }
    }
}

/// Accepts both full timestamps and bare `YYYY-MM-DD` dates.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
