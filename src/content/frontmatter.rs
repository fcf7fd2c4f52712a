//! Front-matter parsing and serialization

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

const DELIMITER: &str = "---";

/// Metadata header of a stored post.
///
/// Only `title` is validated by callers; everything else is optional and
/// unknown keys are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split raw file content into metadata and body.
    ///
    /// Accepts a YAML block between `---` delimiters or a leading JSON
    /// object. A header that is present but malformed is an error; content
    /// without any header parses as an empty front-matter with the whole
    /// input as body.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let trimmed = content.trim_start();

        if let Some(rest) = trimmed.strip_prefix(DELIMITER) {
            return Self::parse_yaml(rest);
        }

        if trimmed.starts_with('{') {
            return Self::parse_json(trimmed);
        }

        Ok((Self::default(), content))
    }

    fn parse_yaml(rest: &str) -> Result<(Self, &str)> {
        let rest = rest.trim_start_matches(['\r', '\n']);
        let end = rest.find("\n---").ok_or(Error::UnclosedFrontmatter)?;

        let header = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\r', '\n']);

        if header.trim().is_empty() {
            return Ok((Self::default(), body));
        }

        let fm = serde_yaml::from_str(header)?;
        Ok((fm, body))
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        // Find the matching closing brace of the leading object
        let mut depth = 0usize;
        let mut end = None;
        for (i, c) in content.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        let end = end.ok_or(Error::UnclosedFrontmatter)?;
        let fm = serde_json::from_str(&content[..end])?;
        let body = content[end..].trim_start_matches(['\r', '\n']);

        Ok((fm, body))
    }

    /// Serialize the stored representation of a new post: a title-only
    /// header, a blank line, then the raw body.
    pub fn serialize(title: &str, body: &str) -> String {
        format!("{DELIMITER}\ntitle: {title}\n{DELIMITER}\n\n{body}")
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in the common front-matter formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d",
        "%Y/%m/%d",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}
