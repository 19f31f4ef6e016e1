//! History modes and location parsing.
//!
//! # Responsibilities
//! - Translate router paths into the URLs links carry (`href`)
//! - Translate browser URLs back into router locations
//! - Split a full path into path, query and fragment
//!
//! # Design Decisions
//! - Bases are normalized once: leading and trailing '/' always present
//! - Web mode keeps URLs outside the base untouched rather than rejecting them
//! - Hash mode reads the route from the fragment; an empty fragment is `/`
//! - The base is matched case-insensitively, like static route segments
//! - A query key without '=' stays bare when the location is written back

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use url::form_urlencoded;

/// Characters escaped in query keys and values.
const QUERY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`');

/// Decoded query pairs in their original order. `None` marks a bare key (`?flag`).
pub type Query = Vec<(String, Option<String>)>;

/// Navigation strategy used to reflect the active route in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum HistoryMode {
    /// Real URL paths (`/app/about`); the host must serve the shell for deep links.
    Web { base: String },
    /// Route carried in the fragment (`/app/#/about`).
    Hash { base: String },
}

impl HistoryMode {
    /// Web history under `base`.
    pub fn web(base: &str) -> Self {
        HistoryMode::Web {
            base: normalize_base(base),
        }
    }

    /// Hash history under `base`.
    pub fn hash(base: &str) -> Self {
        HistoryMode::Hash {
            base: normalize_base(base),
        }
    }

    /// The normalized base, always with leading and trailing '/'.
    pub fn base(&self) -> &str {
        match self {
            HistoryMode::Web { base } | HistoryMode::Hash { base } => base,
        }
    }

    /// True for hash history.
    pub fn is_hash(&self) -> bool {
        matches!(self, HistoryMode::Hash { .. })
    }

    /// URL a link to `full_path` should carry.
    pub fn href(&self, full_path: &str) -> String {
        match self {
            HistoryMode::Web { base } => format!("{}{}", base.trim_end_matches('/'), full_path),
            HistoryMode::Hash { base } => format!("{}#{}", base, full_path),
        }
    }

    /// Router-internal full path for a browser URL (path, query, fragment).
    pub fn location(&self, url: &str) -> String {
        match self {
            HistoryMode::Web { .. } => self.strip_base(url).unwrap_or_else(|| url.to_string()),
            HistoryMode::Hash { .. } => match url.split_once('#') {
                Some((_, fragment)) if fragment.starts_with('/') => fragment.to_string(),
                Some((_, "")) | None => "/".to_string(),
                Some((_, fragment)) => format!("/{}", fragment),
            },
        }
    }

    /// Remove the base from `url`, or `None` when `url` lies outside it.
    pub fn strip_base(&self, url: &str) -> Option<String> {
        let prefix = self.base().trim_end_matches('/');
        if prefix.is_empty() {
            return Some(url.to_string());
        }

        let head = url.get(..prefix.len())?;
        if !head.eq_ignore_ascii_case(prefix) {
            return None;
        }

        let rest = &url[prefix.len()..];
        if rest.is_empty() {
            Some("/".to_string())
        } else if rest.starts_with('/') {
            Some(rest.to_string())
        } else if rest.starts_with('?') || rest.starts_with('#') {
            Some(format!("/{}", rest))
        } else {
            None
        }
    }
}

impl Default for HistoryMode {
    fn default() -> Self {
        HistoryMode::web("/")
    }
}

/// Normalize a base so it starts and ends with '/'.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// A router location split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Path without query or fragment; always starts with '/'.
    pub path: String,

    /// Decoded query pairs in their original order.
    pub query: Query,

    /// Fragment including the leading '#', or empty.
    pub hash: String,
}

impl Location {
    /// Split `full_path` into path, query and fragment.
    pub fn parse(full_path: &str) -> Self {
        let (rest, hash) = match full_path.split_once('#') {
            Some((rest, fragment)) => (rest, format!("#{}", fragment)),
            None => (full_path, String::new()),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (rest, Vec::new()),
        };

        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self { path, query, hash }
    }

    /// Path, query and fragment joined back together.
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            full.push('?');
            full.push_str(&stringify_query(&self.query));
        }
        full.push_str(&self.hash);
        full
    }
}

/// Parse a raw query string (without '?').
pub fn parse_query(raw: &str) -> Query {
    raw.split('&')
        .filter(|piece| !piece.is_empty())
        .filter_map(|piece| {
            let bare = !piece.contains('=');
            form_urlencoded::parse(piece.as_bytes())
                .next()
                .map(|(key, value)| (key.into_owned(), (!bare).then(|| value.into_owned())))
        })
        .collect()
}

/// Write query pairs back as a query string (without '?').
pub fn stringify_query(query: &Query) -> String {
    query
        .iter()
        .map(|(key, value)| {
            let key = utf8_percent_encode(key, QUERY);
            match value {
                Some(value) => format!("{}={}", key, utf8_percent_encode(value, QUERY)),
                None => key.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
