use once_cell::sync::Lazy;
use regex::Regex;

static SHEET_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://character-sheets\.appspot\.com/shinobigami/.+\?key=([^&]+)")
        .expect("sheet url pattern is valid")
});

static JSONP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^[A-Za-z_$][\w$.]*\s*\((.*)\)\s*;?$").expect("jsonp pattern is valid")
});

const JSONP_URL_TEMPLATE: &str =
    "https://character-sheets.appspot.com/shinobigami/display?ajax=1&key={key}";

/// A character sheet URL this crate knows how to import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLocator {
    url: String,
    key: String,
}

impl SheetLocator {
    pub fn parse(url: &str) -> Option<Self> {
        let caps = SHEET_URL_RE.captures(url)?;
        Some(Self {
            url: url.to_string(),
            key: caps[1].to_string(),
        })
    }

    pub fn is_supported(url: &str) -> bool {
        SHEET_URL_RE.is_match(url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Endpoint serving the raw sheet as JSONP.
    pub fn jsonp_url(&self) -> String {
        JSONP_URL_TEMPLATE.replace("{key}", &self.key)
    }
}

/// Strip a `callback(...)` wrapper from a JSONP payload. Plain JSON is
/// returned unchanged (trimmed).
pub fn unwrap_jsonp(payload: &str) -> &str {
    let payload = payload.trim();
    if payload.starts_with('{') || payload.starts_with('[') {
        return payload;
    }
    match JSONP_RE.captures(payload).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => payload,
    }
}
