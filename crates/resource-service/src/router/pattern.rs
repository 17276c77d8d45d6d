use super::RouterError;
use std::collections::BTreeMap;
use std::fmt::Display;

/// One segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    /// `{name}`: binds exactly one non-empty path segment.
    Param(String),
}

/// A parsed path pattern such as `/orders/detail/{id}`.
///
/// Empty segments are dropped, so `/orders/`, `orders` and `//orders` are the same
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

/// Values bound to named segments during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(BTreeMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Splits a request path into its non-empty segments, ignoring any query string.
pub fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        let invalid = |reason: &str| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut names: Vec<&str> = Vec::new();
        for raw in pattern.split('/').filter(|s| !s.is_empty()) {
            if let Some(name) = raw.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
                if name.is_empty() || name.contains(['{', '}']) {
                    return Err(invalid("parameter names must be non-empty and unbraced"));
                }
                if names.contains(&name) {
                    return Err(invalid("parameter names must be unique"));
                }
                names.push(name);
                segments.push(Segment::Param(name.to_string()));
            } else if raw.contains(['{', '}', '?', '#']) {
                return Err(invalid("a segment is either a literal or a whole {param}"));
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }
        Ok(Self { segments })
    }

    /// `prefix` followed by `pattern`, e.g. `/api` + `/orders/{id}`.
    pub fn join(prefix: &str, pattern: &str) -> Result<Self, RouterError> {
        Self::parse(&format!("{}/{}", prefix, pattern))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Binds `path` to this pattern, or `None` if it does not match.
    pub fn match_segments(&self, path: &[&str]) -> Option<PathParams> {
        if path.len() != self.segments.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(literal) if literal == value => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), (*value).to_string());
                }
            }
        }
        Some(PathParams(params))
    }

    /// Two patterns have the same shape when they match exactly the same paths,
    /// whatever their parameter names.
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Left to right, the first position where one pattern has a literal and the other a
    /// parameter decides: the literal side is more specific.
    pub fn more_specific_than(&self, other: &PathPattern) -> bool {
        for pair in self.segments.iter().zip(&other.segments) {
            match pair {
                (Segment::Literal(_), Segment::Param(_)) => return true,
                (Segment::Param(_), Segment::Literal(_)) => return false,
                _ => {}
            }
        }
        false
    }
}

impl Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => write!(f, "/{literal}")?,
                Segment::Param(name) => write!(f, "/{{{name}}}")?,
            }
        }
        Ok(())
    }
}
