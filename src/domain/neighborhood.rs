//! Neighborhoods: named sets of relative offsets used for alive-neighbor counting.

/// Side length of the square window a neighborhood is drawn in
pub const WINDOW_SIZE: usize = 31;

/// Row/column of the window that maps to offset 0 (the cell itself)
pub const WINDOW_CENTER: i32 = (WINDOW_SIZE / 2) as i32;

/// Relative offset from a cell
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Coordinate {
    pub dx: i32,
    pub dy: i32,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Offset of window cell `(row, col)` relative to the window center
    pub const fn from_window(row: usize, col: usize) -> Self {
        Self {
            dx: col as i32 - WINDOW_CENTER,
            dy: row as i32 - WINDOW_CENTER,
        }
    }

    /// Chebyshev distance from the origin
    pub fn reach(self) -> u32 {
        self.dx.unsigned_abs().max(self.dy.unsigned_abs())
    }
}

/// A dense-indexed set of member offsets. Never contains the origin.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Neighborhood {
    id: usize,
    members: Vec<Coordinate>,
}

impl Neighborhood {
    /// Create an empty neighborhood with the given 0-based index
    pub fn new(id: usize) -> Self {
        Self { id, members: Vec::new() }
    }

    /// Build from offsets, dropping the origin and duplicates
    pub fn with_members(id: usize, members: impl IntoIterator<Item = Coordinate>) -> Self {
        members.into_iter().fold(Self::new(id), |mut nb, c| {
            nb.insert(c);
            nb
        })
    }

    /// Add a member. Returns false if it was the origin or already present.
    pub fn insert(&mut self, coordinate: Coordinate) -> bool {
        if coordinate == Coordinate::ORIGIN || self.members.contains(&coordinate) {
            return false;
        }
        self.members.push(coordinate);
        true
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of member offsets
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Coordinate] {
        &self.members
    }

    /// Largest axis distance of any member (0 for an empty neighborhood)
    pub fn reach(&self) -> u32 {
        self.members.iter().map(|c| c.reach()).max().unwrap_or(0)
    }

    /// The four orthogonal offsets
    pub fn von_neumann(id: usize) -> Self {
        Self::with_members(
            id,
            [
                Coordinate::new(0, -1),
                Coordinate::new(0, 1),
                Coordinate::new(-1, 0),
                Coordinate::new(1, 0),
            ],
        )
    }

    /// The eight surrounding offsets
    pub fn moore(id: usize) -> Self {
        Self::with_members(
            id,
            (-1..=1).flat_map(|dy| (-1..=1).map(move |dx| Coordinate::new(dx, dy))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_center_is_origin() {
        assert_eq!(Coordinate::from_window(15, 15), Coordinate::ORIGIN);
        assert_eq!(Coordinate::from_window(0, 30), Coordinate::new(15, -15));
    }

    #[test]
    fn test_origin_excluded() {
        let mut nb = Neighborhood::new(0);
        assert!(!nb.insert(Coordinate::ORIGIN));
        assert!(nb.is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let nb = Neighborhood::with_members(
            0,
            [Coordinate::new(1, 0), Coordinate::new(1, 0), Coordinate::new(0, 2)],
        );
        assert_eq!(nb.size(), 2);
        assert_eq!(nb.reach(), 2);
    }

    #[test]
    fn test_moore_has_eight() {
        let nb = Neighborhood::moore(3);
        assert_eq!(nb.size(), 8);
        assert_eq!(nb.id(), 3);
        assert!(!nb.members().contains(&Coordinate::ORIGIN));
    }
}
