//! Route patterns with segment-prefix matching.
//!
//! A pattern `/a/b` matches `/a/b` and anything below it (`/a/b/c`), but not
//! `/a/bc`. Paths are normalized before comparison: query and fragment are
//! dropped, empty segments (`//`, trailing `/`) are ignored.

use crate::error::{MaxFitError, Result};

/// Compiled route pattern (normalized segments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<String>,
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Result<Self> {
        if !raw.starts_with('/') {
            return Err(MaxFitError::BadRequest(format!(
                "invalid route pattern: {raw} (must start with '/')"
            )));
        }
        if raw.contains(['?', '#', '*']) {
            return Err(MaxFitError::BadRequest(format!(
                "invalid route pattern: {raw} (query, fragment and wildcards are not supported)"
            )));
        }
        Ok(Self {
            raw: raw.to_string(),
            segments: segments(raw).map(str::to_string).collect(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of segments; the longest matching pattern wins.
    pub fn specificity(&self) -> usize {
        self.segments.len()
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut it = segments(path);
        self.segments
            .iter()
            .all(|want| it.next().is_some_and(|got| got == want))
    }

    /// Same normalized segments as another pattern (duplicate detection).
    pub fn same_target(&self, other: &RoutePattern) -> bool {
        self.segments == other.segments
    }
}

/// Split a request path into its non-empty segments, ignoring query/fragment.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty())
}

/// Canonical form of a request path (`/a/b`), used for logging and dedup.
pub fn normalize_path(path: &str) -> String {
    let mut out = String::new();
    for s in segments(path) {
        out.push('/');
        out.push_str(s);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}
