//! Presentation helpers for reading list entries: link clean-up, domain
//! labels, favicon candidates and date rendering.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use reqwest::Url;
use serde::Serialize;

use super::record::LinkRecord;

const FAVICON_SIZE: u32 = 128;

/// Hostname of `url` without a leading `www.`; empty if `url` does not parse.
pub fn domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(strip_www))
        .unwrap_or_default()
}

/// Last two labels of the hostname (`blog.example.com` → `example.com`).
pub fn base_domain(url: &str) -> String {
    last_two_labels(&domain(url))
}

fn strip_www(host: &str) -> String {
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

fn last_two_labels(host: &str) -> String {
    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() >= 2 {
        parts[parts.len() - 2..].join(".")
    } else {
        host.to_string()
    }
}

/// Point arXiv PDF links at the abstract page instead.
///
/// The first `pdf` that is followed by at least one more character becomes
/// `abs`, then a trailing version suffix (`v2`) is dropped.
pub fn canonical_link(url: &str) -> String {
    let mut out = match url.match_indices("pdf").find(|(i, _)| i + 3 < url.len()) {
        Some((i, _)) => format!("{}abs{}", &url[..i], &url[i + 3..]),
        None => url.to_string(),
    };

    let without_digits = out.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() < out.len() && without_digits.ends_with('v') {
        let cut = without_digits.len() - 1;
        out.truncate(cut);
    }
    out
}

/// Ordered favicon URLs to try for `domain`; empty when there is no domain.
pub fn favicon_candidates(domain: &str) -> Vec<String> {
    if domain.is_empty() {
        return Vec::new();
    }
    let clean = strip_www(domain);
    let base = if clean.split('.').count() >= 3 {
        last_two_labels(&clean)
    } else {
        clean.clone()
    };
    [base.clone(), format!("www.{base}"), clean]
        .into_iter()
        .map(|d| format!("https://www.google.com/s2/favicons?domain={d}&sz={FAVICON_SIZE}"))
        .collect()
}

/// What the favicon slot currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaviconState<'a> {
    Image(&'a str),
    /// Generic globe glyph once every candidate has failed.
    Glyph,
}

/// Walks the candidate list as images fail to load.
///
/// The reading page renders `current()` as the image source and every state
/// reached through `on_error()` as the browser's fallback list.
#[derive(Debug, Clone)]
pub struct FaviconChain {
    candidates: Vec<String>,
    index: usize,
    exhausted: bool,
}

impl FaviconChain {
    pub fn new(candidates: Vec<String>) -> Self {
        let exhausted = candidates.is_empty();
        Self { candidates, index: 0, exhausted }
    }

    pub fn current(&self) -> FaviconState<'_> {
        if self.exhausted {
            return FaviconState::Glyph;
        }
        self.candidates
            .get(self.index)
            .map(|u| FaviconState::Image(u))
            .unwrap_or(FaviconState::Glyph)
    }

    /// The current image failed; move to the next candidate or the glyph.
    pub fn on_error(&mut self) -> FaviconState<'_> {
        if self.index + 1 < self.candidates.len() {
            self.index += 1;
        } else {
            self.exhausted = true;
        }
        self.current()
    }
}

/// Render a record timestamp as `YYYY-MM-DD` on the calendar of `tz`.
///
/// Timestamps without a zone are taken as UTC. Anything unparsable is
/// returned unchanged.
pub fn format_date(timestamp: &str, tz: Tz) -> String {
    let ts = timestamp.trim();

    let instant: Option<DateTime<Utc>> = DateTime::parse_from_rfc3339(ts)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
                .map(|naive| naive.and_utc())
        });

    match instant {
        Some(at) => at.with_timezone(&tz).format("%Y-%m-%d").to_string(),
        None => match NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
            Ok(date) => date.format("%Y-%m-%d").to_string(),
            Err(_) => timestamp.to_string(),
        },
    }
}

/// A record prepared for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingItem {
    pub title: String,
    pub link: String,
    pub domain: String,
    pub base_domain: String,
    pub date: String,
    pub favicons: Vec<String>,
}

impl ReadingItem {
    pub fn from_record(record: &LinkRecord, tz: Tz) -> Self {
        let link = canonical_link(&record.url);
        let domain = domain(&link);
        Self {
            title: record.title.clone(),
            base_domain: base_domain(&link),
            favicons: favicon_candidates(&domain),
            date: format_date(&record.timestamp, tz),
            domain,
            link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_strips_www() {
        assert_eq!(domain("https://www.example.com/a"), "example.com");
        assert_eq!(domain("https://blog.example.co.uk/post"), "blog.example.co.uk");
        assert_eq!(domain("not a url"), "");
    }

    #[test]
    fn base_domain_keeps_last_two_labels() {
        assert_eq!(base_domain("https://blog.example.com/x"), "example.com");
        assert_eq!(base_domain("https://www.example.com"), "example.com");
        assert_eq!(base_domain("http://localhost:8080/"), "localhost");
        assert_eq!(base_domain("garbage"), "");
    }

    #[test]
    fn arxiv_pdf_becomes_abs_without_version() {
        assert_eq!(
            canonical_link("https://arxiv.org/pdf/2401.12345v2"),
            "https://arxiv.org/abs/2401.12345"
        );
        assert_eq!(
            canonical_link("https://arxiv.org/abs/2401.12345"),
            "https://arxiv.org/abs/2401.12345"
        );
    }

    #[test]
    fn trailing_pdf_is_left_alone() {
        assert_eq!(canonical_link("https://x.org/paper.pdf"), "https://x.org/paper.pdf");
    }

    #[test]
    fn version_needs_digits() {
        assert_eq!(canonical_link("https://x.org/v"), "https://x.org/v");
        assert_eq!(canonical_link("https://x.org/page-v12"), "https://x.org/page-");
    }

    #[test]
    fn favicon_candidates_order() {
        assert_eq!(
            favicon_candidates("blog.example.com"),
            [
                "https://www.google.com/s2/favicons?domain=example.com&sz=128",
                "https://www.google.com/s2/favicons?domain=www.example.com&sz=128",
                "https://www.google.com/s2/favicons?domain=blog.example.com&sz=128",
            ]
        );
        assert!(favicon_candidates("").is_empty());
    }

    #[test]
    fn favicon_chain_falls_back_to_glyph() {
        let mut chain = FaviconChain::new(favicon_candidates("example.com"));
        assert_eq!(
            chain.current(),
            FaviconState::Image("https://www.google.com/s2/favicons?domain=example.com&sz=128")
        );
        assert!(matches!(
            chain.on_error(),
            FaviconState::Image(u) if u.contains("www.example.com")
        ));
        assert!(matches!(chain.on_error(), FaviconState::Image(_)));
        assert_eq!(chain.on_error(), FaviconState::Glyph);
        assert_eq!(chain.on_error(), FaviconState::Glyph);
    }

    #[test]
    fn favicon_chain_without_domain_is_glyph() {
        let mut chain = FaviconChain::new(Vec::new());
        assert_eq!(chain.current(), FaviconState::Glyph);
        assert_eq!(chain.on_error(), FaviconState::Glyph);
    }

    const LA: Tz = chrono_tz::America::Los_Angeles;

    #[test]
    fn dates_render_in_zone() {
        // 03:00 UTC is the previous evening in Los Angeles.
        assert_eq!(format_date("2025-03-02T03:00:00+00:00", LA), "2025-03-01");
        assert_eq!(format_date("2025-03-02T03:00:00", chrono_tz::UTC), "2025-03-02");
        assert_eq!(format_date("2025-03-02 23:30:00", chrono_tz::Europe::Paris), "2025-03-03");
        assert_eq!(format_date("2025-03-02", LA), "2025-03-02");
        assert_eq!(format_date("yesterday", LA), "yesterday");
    }

    #[test]
    fn dates_follow_daylight_saving() {
        // PDT is UTC-7, so 07:30 UTC is already 00:30 local.
        assert_eq!(format_date("2025-07-01T07:30:00Z", LA), "2025-07-01");
        assert_eq!(format_date("2025-07-01T06:59:00Z", LA), "2025-06-30");
        // PST is UTC-8 in winter.
        assert_eq!(format_date("2025-01-01T07:30:00Z", LA), "2024-12-31");
    }

    #[test]
    fn reading_item_from_record() {
        let rec = LinkRecord::new(
            "https://arxiv.org/pdf/1706.03762v7",
            "2025-01-10T12:00:00Z",
            "Attention Is All You Need",
        );
        let item = ReadingItem::from_record(&rec, chrono_tz::UTC);
        assert_eq!(item.link, "https://arxiv.org/abs/1706.03762");
        assert_eq!(item.domain, "arxiv.org");
        assert_eq!(item.base_domain, "arxiv.org");
        assert_eq!(item.date, "2025-01-10");
        assert_eq!(item.favicons.len(), 3);
    }
}
