//! Pattern path segments for wildcard queries

use std::fmt;

/// One level of a query pattern.
///
/// `Any` is distinct from every label, including the label `"*"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Match only the child with this label
    Label(String),
    /// Match every child at this level
    Any,
}

impl PathSegment {
    /// Concrete label segment
    pub fn label(label: impl Into<String>) -> Self {
        PathSegment::Label(label.into())
    }

    /// Returns true for the wildcard
    pub fn is_any(&self) -> bool {
        matches!(self, PathSegment::Any)
    }
}

impl From<&str> for PathSegment {
    fn from(label: &str) -> Self {
        PathSegment::Label(label.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(label: String) -> Self {
        PathSegment::Label(label)
    }
}

/// `None` is the wildcard.
impl<S: Into<String>> From<Option<S>> for PathSegment {
    fn from(label: Option<S>) -> Self {
        label.map_or(PathSegment::Any, |l| PathSegment::Label(l.into()))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Label(label) => write!(f, "{}", label),
            PathSegment::Any => write!(f, "*"),
        }
    }
}

/// Parse the textual pattern syntax: segments split on `separator`, a
/// segment of exactly `*` is the wildcard. Empty input is the empty pattern.
pub fn parse_pattern(text: &str, separator: char) -> Vec<PathSegment> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(separator)
        .map(|segment| match segment {
            "*" => PathSegment::Any,
            label => PathSegment::label(label),
        })
        .collect()
}
