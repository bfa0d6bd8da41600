use core::slice;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Single coordinate axis, signed so that caller-supplied coordinates can be
/// anything and still be rejected by a bounds check instead of a cast.
pub type Coord = i32;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Relative displacement `(d_row, d_col)`.
pub type Offset = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Only meaningful for coordinates that already passed a bounds check.
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

/// Whether `coords` lies inside a grid of `bounds = (height, width)`.
pub const fn in_bounds(coords: Coord2, bounds: Coord2) -> bool {
    coords.0 >= 0 && coords.0 < bounds.0 && coords.1 >= 0 && coords.1 < bounds.1
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = if a < 0 { 0 } else { a as CellCount };
    let b = if b < 0 { 0 } else { b as CellCount };
    a.saturating_mul(b)
}

const MOORE: [Offset; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const VON_NEUMANN: [Offset; 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Ordered set of offsets that decides which cells are neighbors.
///
/// The same mask drives adjacency counts, flood fill and chording, so a zero
/// count always means "no mine among the cells a flood fill will visit".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencyMask {
    offsets: SmallVec<[Offset; 8]>,
}

impl AdjacencyMask {
    /// The 8-connected neighborhood.
    pub fn moore() -> Self {
        Self::from_offsets(MOORE)
    }

    /// The 4-connected neighborhood.
    pub fn von_neumann() -> Self {
        Self::from_offsets(VON_NEUMANN)
    }

    pub fn from_offsets(offsets: impl IntoIterator<Item = Offset>) -> Self {
        Self {
            offsets: offsets.into_iter().collect(),
        }
    }

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Neighbors of `center` under this mask that fall inside `bounds`.
    pub fn iter_neighbors(&self, center: Coord2, bounds: Coord2) -> NeighborIter<'_> {
        NeighborIter {
            center,
            bounds,
            offsets: self.offsets.iter(),
        }
    }
}

impl Default for AdjacencyMask {
    fn default() -> Self {
        Self::moore()
    }
}

impl FromIterator<Offset> for AdjacencyMask {
    fn from_iter<I: IntoIterator<Item = Offset>>(iter: I) -> Self {
        Self::from_offsets(iter)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: Offset, bounds: Coord2) -> Option<Coord2> {
    let next = (
        coords.0.checked_add(delta.0)?,
        coords.1.checked_add(delta.1)?,
    );
    in_bounds(next, bounds).then_some(next)
}

#[derive(Clone, Debug)]
pub struct NeighborIter<'a> {
    center: Coord2,
    bounds: Coord2,
    offsets: slice::Iter<'a, Offset>,
}

impl Iterator for NeighborIter<'_> {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, bounds) = (self.center, self.bounds);
        self.offsets
            .by_ref()
            .find_map(|&delta| apply_delta(center, delta, bounds))
    }
}
