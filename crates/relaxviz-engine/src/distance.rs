//! Shortest-path estimates with an explicit unreachable value.

use std::fmt;

use crate::graph::Weight;

/// Marker printed in place of an unreachable distance.
pub const UNREACHABLE_MARKER: &str = "∞";

/// Marker printed for a vertex without predecessor.
pub const NO_PREDECESSOR_MARKER: &str = "-";

/// A distance estimate.
///
/// Ordering puts every finite value below `Unreachable`, so `<` matches the
/// relaxation test against an infinite estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Distance {
    /// Length of the best path found so far.
    Finite(Weight),
    /// No path found (yet).
    #[default]
    Unreachable,
}

impl Distance {
    /// Whether a path has been found.
    #[inline]
    pub const fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// The finite value, if any.
    #[inline]
    pub const fn value(&self) -> Option<Weight> {
        match self {
            Distance::Finite(d) => Some(*d),
            Distance::Unreachable => None,
        }
    }
}

impl From<Weight> for Distance {
    fn from(value: Weight) -> Self {
        Distance::Finite(value)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Unreachable => f.write_str(UNREACHABLE_MARKER),
        }
    }
}

/// Render a predecessor the way the distance table shows it.
pub fn predecessor_label(prev: Option<crate::VertexId>) -> String {
    match prev {
        Some(v) => v.to_string(),
        None => NO_PREDECESSOR_MARKER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VertexId;

    #[test]
    fn finite_sorts_below_unreachable() {
        assert!(Distance::Finite(i64::MAX) < Distance::Unreachable);
        assert!(Distance::Finite(-3) < Distance::Finite(2));
    }

    #[test]
    fn display_uses_markers() {
        assert_eq!(Distance::Finite(-2).to_string(), "-2");
        assert_eq!(Distance::Unreachable.to_string(), "∞");
        assert_eq!(predecessor_label(None), "-");
        assert_eq!(predecessor_label(Some(VertexId(0))), "0");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unreachable_serializes_as_null() {
        let json = serde_json::to_string(&[Distance::Finite(4), Distance::Unreachable]).unwrap();
        assert_eq!(json, "[4,null]");
        let back: Vec<Distance> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[1], Distance::Unreachable);
    }
}
