//! Version parsing and total ordering.
//!
//! Installed packages can carry version strings that were hand-edited or
//! written by older tools, so parsing never fails: anything that does not
//! decompose into dotted segments is classified Unknown. Unknown orders
//! below every valid version, which keeps a package with a corrupted
//! version record permanently eligible for upgrade until the record is
//! repaired.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A parsed version string with a total order.
///
/// # Ordering rules
/// - Unknown < any valid version; two Unknowns compare by raw string.
/// - Valid versions compare segment-by-segment; the shorter component list
///   is padded with a sentinel lower than any real segment, so `1.0 < 1.0.1`.
/// - Numeric segments compare numerically and order below textual segments
///   in the same slot; textual segments compare lexically.
///
/// Equality follows the same comparison, so `Eq`/`Ord` are consistent.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    components: Option<Vec<Segment>>,
}

/// One component of a valid version.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Num(u64),
    Text(String),
}

impl Version {
    /// Parse a raw version string. Never fails.
    ///
    /// A string is valid when it has at least two dot-separated parts, the
    /// leading part is purely numeric, and every part splits on `-`/`+` into
    /// non-empty sub-segments whose numeric members carry no leading zeroes.
    /// Everything else (a dotless token, a non-numeric leading part, a
    /// float-ambiguous segment like `0001`) is Unknown.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let components = parse_components(raw.trim());
        Self {
            raw: raw.to_string(),
            components,
        }
    }

    /// The original string this version was parsed from.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the raw string decomposed into comparable components.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.components.is_some()
    }
}

fn parse_components(s: &str) -> Option<Vec<Segment>> {
    if s.is_empty() {
        return None;
    }

    let parts: Vec<&str> = s.split('.').collect();
    // A single dotless token is not a version.
    if parts.len() < 2 {
        return None;
    }
    // The leading slot must be numeric.
    if !parts[0].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut out = Vec::new();
    for part in &parts {
        if part.is_empty() {
            return None;
        }
        // Pre-release/build suffixes attach with '-' or '+'.
        for sub in part.split(['-', '+']) {
            if sub.is_empty() {
                return None;
            }
            if sub.bytes().all(|b| b.is_ascii_digit()) {
                // Leading zeroes make a numeric segment ambiguous
                // ("1.0001" could be 1.0001 the float); reject the string.
                if sub.len() > 1 && sub.starts_with('0') {
                    return None;
                }
                match sub.parse::<u64>() {
                    Ok(n) => out.push(Segment::Num(n)),
                    Err(_) => out.push(Segment::Text((*sub).to_string())),
                }
            } else {
                out.push(Segment::Text((*sub).to_string()));
            }
        }
    }
    Some(out)
}

fn cmp_segments(a: &[Segment], b: &[Segment]) -> Ordering {
    let len = a.len().max(b.len());
    for idx in 0..len {
        // Absent slots are the lowest sentinel: None < Num < Text.
        let ord = match (a.get(idx), b.get(idx)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => cmp_segment(x, y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn cmp_segment(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Num(x), Segment::Num(y)) => x.cmp(y),
        (Segment::Text(x), Segment::Text(y)) => x.cmp(y),
        (Segment::Num(_), Segment::Text(_)) => Ordering::Less,
        (Segment::Text(_), Segment::Num(_)) => Ordering::Greater,
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.components, &other.components) {
            (None, None) => self.raw.cmp(&other.raw),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => cmp_segments(a, b),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
