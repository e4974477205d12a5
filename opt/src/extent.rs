//! Access extents.

use serde::Serialize;

/// Offset bounding box of accesses to one field, relative to the iteration
/// point, as `(minus, plus)` per dimension. `minus <= 0 <= plus` holds for
/// every extent built from accesses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Extent {
    pub i: (i64, i64),
    pub j: (i64, i64),
    pub k: (i64, i64),
}

impl Extent {
    /// The pointwise extent: access at the iteration point only.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Extent of a single access at the given (i, j, k) offset.
    pub fn from_offset(offset: [i64; 3]) -> Self {
        let span = |o: i64| (o.min(0), o.max(0));
        Self { i: span(offset[0]), j: span(offset[1]), k: span(offset[2]) }
    }

    /// Union of two extents.
    pub fn merge(&self, other: &Self) -> Self {
        let merge1 = |a: (i64, i64), b: (i64, i64)| (a.0.min(b.0), a.1.max(b.1));
        Self { i: merge1(self.i, other.i), j: merge1(self.j, other.j), k: merge1(self.k, other.k) }
    }

    /// Whether the two offset ranges intersect in every dimension.
    pub fn overlaps(&self, other: &Self) -> bool {
        let overlap1 = |a: (i64, i64), b: (i64, i64)| a.0 <= b.1 && b.0 <= a.1;
        overlap1(self.i, other.i) && overlap1(self.j, other.j) && overlap1(self.k, other.k)
    }

    /// Whether the extent touches only the iteration point.
    pub fn is_pointwise(&self) -> bool {
        *self == Self::zero()
    }

    /// Whether the extent has no horizontal component (vertical-only offsets).
    pub fn is_vertical_only(&self) -> bool {
        self.i == (0, 0) && self.j == (0, 0)
    }
}

impl std::fmt::Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[({}, {}), ({}, {}), ({}, {})]",
            self.i.0, self.i.1, self.j.0, self.j.1, self.k.0, self.k.1
        )
    }
}
