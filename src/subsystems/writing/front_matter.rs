//! Front-matter blocks at the top of a post.
//!
//! Two fences are understood:
//!
//! ```text
//! ---                      +++
//! title: "Hello"           title = "Hello"
//! date: 2025-01-04         date = "2025-01-04"
//! ---                      +++
//! ```
//!
//! The `---` form accepts flat `key: value` scalars only (quoted or bare);
//! the `+++` form is parsed as TOML. A file without an opening fence has no
//! front-matter and its whole text is the body.

use std::collections::BTreeMap;

use super::ContentError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub tagline: Option<String>,
    /// Every other key, as text.
    pub extra: BTreeMap<String, String>,
}

impl FrontMatter {
    fn insert(&mut self, key: &str, value: String) {
        if value.is_empty() {
            return;
        }
        match key {
            "title" => self.title = Some(value),
            "date" => self.date = Some(value),
            "tagline" => self.tagline = Some(value),
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Fence {
    Yaml,
    Toml,
}

impl Fence {
    fn marker(self) -> &'static str {
        match self {
            Fence::Yaml => "---",
            Fence::Toml => "+++",
        }
    }
}

/// Separate the front-matter block from the body.
pub fn split(text: &str) -> Result<(FrontMatter, &str), ContentError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((FrontMatter::default(), text));
    };
    let fence = match first.trim_end() {
        "---" => Fence::Yaml,
        "+++" => Fence::Toml,
        _ => return Ok((FrontMatter::default(), text)),
    };

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        let line_start = offset;
        offset += line.len();
        if line.trim_end() == fence.marker() {
            let header = &text[header_start..line_start];
            let body = &text[offset..];
            let fm = match fence {
                Fence::Yaml => parse_yaml_scalars(header)?,
                Fence::Toml => parse_toml(header)?,
            };
            return Ok((fm, body));
        }
    }

    Err(ContentError::FrontMatter(format!(
        "unterminated front-matter: missing closing `{}`",
        fence.marker()
    )))
}

fn parse_yaml_scalars(header: &str) -> Result<FrontMatter, ContentError> {
    let mut fm = FrontMatter::default();
    for (n, raw) in header.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(ContentError::FrontMatter(format!(
                "line {}: expected `key: value`, got {line:?}",
                n + 2
            )));
        };
        fm.insert(key.trim(), unquote(value.trim()));
    }
    Ok(fm)
}

fn unquote(value: &str) -> String {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

fn parse_toml(header: &str) -> Result<FrontMatter, ContentError> {
    let table: toml::Table =
        toml::from_str(header).map_err(|e| ContentError::FrontMatter(e.to_string()))?;
    let mut fm = FrontMatter::default();
    for (key, value) in table {
        let text = match value {
            toml::Value::String(s) => s,
            other => other.to_string(),
        };
        fm.insert(&key, text);
    }
    Ok(fm)
}
