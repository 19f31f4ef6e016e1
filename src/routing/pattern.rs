//! Path pattern parsing and matching.
//!
//! # Syntax
//! - `/about`: static segments
//! - `/login/:tag`: named parameter, exactly one non-empty segment
//! - `/:catchAll(.*)*`: catch-all, zero or more trailing segments
//!
//! # Design Decisions
//! - Static segments compare case-insensitively unless `sensitive` is set
//! - A trailing slash on the path is tolerated unless `strict` is set
//! - No regex: the only modifier understood is the catch-all `(.*)*`
//! - Parameter values are percent-decoded on match, encoded on build

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Characters escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const CATCH_ALL_MODIFIER: &str = "(.*)*";

/// Error raised when a path pattern is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern `{0}` must start with '/'")]
    MissingLeadingSlash(String),
    #[error("pattern `{0}` has a parameter without a name")]
    EmptyParamName(String),
    #[error("invalid parameter name `{0}`")]
    InvalidParamName(String),
    #[error("unsupported modifier `{modifier}` on parameter `{param}`")]
    UnsupportedModifier { param: String, modifier: String },
    #[error("catch-all parameter `{0}` must be the last segment")]
    CatchAllNotLast(String),
    #[error("parameter `{0}` appears more than once")]
    DuplicateParam(String),
}

/// Error raised when a concrete path cannot be built from a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("missing required parameter `{0}`")]
    MissingParam(String),
    #[error("parameter `{0}` takes a single value")]
    RepeatedParam(String),
}

/// Matching behavior shared by every pattern of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Reject paths with a trailing slash that the pattern lacks.
    pub strict: bool,

    /// Compare static segments case-sensitively.
    pub sensitive: bool,
}

/// Value captured for (or supplied to) a path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Repeated(Vec<String>),
}

impl ParamValue {
    /// The value of a single-segment parameter.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Repeated(values) if values.len() == 1 => Some(&values[0]),
            ParamValue::Repeated(_) => None,
        }
    }

    /// Non-empty path segments carried by this value.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(value) => value.split('/').filter(|s| !s.is_empty()).collect(),
            ParamValue::Repeated(values) => values
                .iter()
                .map(String::as_str)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Repeated(values)
    }
}

/// Navigation parameters keyed by parameter name.
pub type Params = BTreeMap<String, ParamValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

impl Segment {
    fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Param(name) | Segment::CatchAll(name) => Some(name),
        }
    }
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern such as `/login/:tag`.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(raw.to_string()))?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };

        let mut segments: Vec<Segment> = Vec::with_capacity(parts.len());
        for (index, part) in parts.iter().enumerate() {
            let segment = match part.strip_prefix(':') {
                None => Segment::Static((*part).to_string()),
                Some(spec) => parse_param(raw, spec)?,
            };

            if let Segment::CatchAll(name) = &segment {
                if index + 1 != parts.len() {
                    return Err(PatternError::CatchAllNotLast(name.clone()));
                }
            }
            if let Some(name) = segment.param_name() {
                if segments.iter().any(|s| s.param_name() == Some(name)) {
                    return Err(PatternError::DuplicateParam(name.to_string()));
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True when the pattern ends in a catch-all parameter.
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    /// Names of the parameters declared by this pattern, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    /// Match a path (no query or fragment) and capture its parameters.
    pub fn matches(&self, path: &str, options: &MatchOptions) -> Option<Params> {
        let rest = path.strip_prefix('/')?;
        let rest = if options.strict {
            rest
        } else {
            rest.strip_suffix('/').unwrap_or(rest)
        };

        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };

        let mut params = Params::new();
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(text) => {
                    let part = parts.get(index)?;
                    let equal = if options.sensitive {
                        *part == text.as_str()
                    } else {
                        part.eq_ignore_ascii_case(text)
                    };
                    if !equal {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let part = parts.get(index).filter(|p| !p.is_empty())?;
                    params.insert(name.clone(), ParamValue::Single(decode(part)));
                }
                Segment::CatchAll(name) => {
                    let captured = parts
                        .get(index..)
                        .unwrap_or_default()
                        .iter()
                        .filter(|p| !p.is_empty())
                        .map(|p| decode(p))
                        .collect();
                    params.insert(name.clone(), ParamValue::Repeated(captured));
                    return Some(params);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }

    /// Build a concrete path by filling in parameters.
    pub fn build(&self, params: &Params) -> Result<String, BuildError> {
        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => {
                    path.push('/');
                    path.push_str(text);
                }
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .ok_or_else(|| BuildError::MissingParam(name.clone()))?;
                    let value = value
                        .as_single()
                        .ok_or_else(|| BuildError::RepeatedParam(name.clone()))?;
                    if value.is_empty() {
                        return Err(BuildError::MissingParam(name.clone()));
                    }
                    path.push('/');
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
                Segment::CatchAll(name) => {
                    if let Some(value) = params.get(name) {
                        for part in value.segments() {
                            path.push('/');
                            path.extend(utf8_percent_encode(part, SEGMENT));
                        }
                    }
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for PathPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

fn parse_param(raw: &str, spec: &str) -> Result<Segment, PatternError> {
    let (name, modifier) = match spec.find('(') {
        Some(idx) => spec.split_at(idx),
        None => (spec, ""),
    };

    if name.is_empty() {
        return Err(PatternError::EmptyParamName(raw.to_string()));
    }
    if !is_valid_name(name) {
        return Err(PatternError::InvalidParamName(name.to_string()));
    }

    match modifier {
        "" => Ok(Segment::Param(name.to_string())),
        CATCH_ALL_MODIFIER => Ok(Segment::CatchAll(name.to_string())),
        other => Err(PatternError::UnsupportedModifier {
            param: name.to_string(),
            modifier: other.to_string(),
        }),
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
