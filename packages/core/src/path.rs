//! Configuration path type with space-separated segments.

use std::fmt;

/// A path into the configuration tree.
///
/// Paths address nodes the way the device CLI does: named segments joined
/// by single spaces, e.g. `"service https api keys"`. Segment names are
/// defined by the device schema and never contain a space themselves, so
/// splitting on spaces is lossless. This type does not validate segment
/// syntax beyond non-emptiness.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The empty path, addressing the root of the configuration tree.
    pub fn root() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    /// Parse a space-delimited path string.
    ///
    /// Runs of spaces and leading/trailing spaces are normalized away, so
    /// `"system  host-name "` parses the same as `"system host-name"`. The
    /// empty string parses to the root path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vyapi_core::Path;
    ///
    /// let path = Path::parse("service https api keys");
    /// assert_eq!(path.len(), 4);
    ///
    /// assert!(Path::parse("").is_empty());
    /// ```
    pub fn parse(s: &str) -> Self {
        Path {
            segments: s
                .split(' ')
                .filter(|seg| !seg.is_empty())
                .map(|seg| seg.to_string())
                .collect(),
        }
    }

    /// Create a path from pre-split segments.
    pub fn from_segments(segments: Vec<String>) -> Self {
        Path { segments }
    }

    /// Check if this path is empty (the root path).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.segments.iter()
    }

    /// The final segment, or `None` for the root path.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The segments as a slice.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Extend this path with one child segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Path {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Path { segments }
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(" "))
    }
}

impl std::ops::Index<usize> for Path {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

/// Macro for creating paths from literals.
///
/// # Example
///
/// ```rust
/// use vyapi_core::path;
///
/// let p = path!("system host-name");
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_paths() {
        assert_eq!(Path::parse("").len(), 0);
        assert_eq!(Path::parse("system").len(), 1);
        assert_eq!(Path::parse("system host-name").len(), 2);
        assert_eq!(Path::parse("service https api keys").len(), 4);
    }

    #[test]
    fn normalize_spaces() {
        assert_eq!(Path::parse("system  host-name"), Path::parse("system host-name"));
        assert_eq!(Path::parse(" system host-name "), Path::parse("system host-name"));
    }

    #[test]
    fn display_round_trips() {
        let p = path!("service ntp listen-address");
        assert_eq!(p.to_string(), "service ntp listen-address");
        assert_eq!(Path::parse(&p.to_string()), p);
    }

    #[test]
    fn display_empty() {
        assert_eq!(Path::root().to_string(), "");
    }

    #[test]
    fn child_appends_one_segment() {
        let p = path!("system").child("host-name");
        assert_eq!(p.to_string(), "system host-name");
        assert_eq!(Path::root().child("system"), path!("system"));
    }

    #[test]
    fn join_paths() {
        let p = path!("system option").join(&path!("reboot-on-panic"));
        assert_eq!(p.to_string(), "system option reboot-on-panic");

        assert_eq!(path!("system").join(&Path::root()), path!("system"));
        assert_eq!(Path::root().join(&path!("system")), path!("system"));
    }

    #[test]
    fn last_segment() {
        assert_eq!(path!("system host-name").last(), Some("host-name"));
        assert_eq!(Path::root().last(), None);
    }

    #[test]
    fn index_trait() {
        let p = path!("a b c");
        assert_eq!(&p[0], "a");
        assert_eq!(&p[2], "c");
    }

    #[test]
    fn from_segments_keeps_order() {
        let p = Path::from_segments(vec!["interfaces".to_string(), "ethernet".to_string()]);
        assert_eq!(p.to_string(), "interfaces ethernet");
    }
}
