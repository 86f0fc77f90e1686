use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::rng::RangeRng;

/// A cell on the game grid, addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in `direction`, or `None` if it would leave the
    /// non-negative quadrant. Upper bounds are the grid's business.
    pub fn offset(&self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

/// Occupancy of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Fruit,
    Body,
}

/// Fixed-size playing field with an incrementally maintained index of empty cells
///
/// Empty cells live in a dense vector so that one can be drawn uniformly at
/// random in O(1). `empty_slot` maps each cell index to its position in that
/// vector, which makes removal a swap-remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    empty: Vec<usize>,
    empty_slot: Vec<Option<usize>>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(width: usize, height: usize) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            tiles: vec![TileKind::Empty; cells],
            empty: (0..cells).collect(),
            empty_slot: (0..cells).map(Some).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a coordinate lies within the grid bounds
    pub fn is_legal(&self, coord: Coordinate) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// Tile kind at a legal coordinate
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the grid. Callers check with
    /// [`Grid::is_legal`] first.
    pub fn get(&self, coord: Coordinate) -> TileKind {
        self.tiles[self.index_of(coord)]
    }

    /// Set the tile kind at a legal coordinate, keeping the empty index in sync
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the grid.
    pub fn put(&mut self, coord: Coordinate, kind: TileKind) {
        let idx = self.index_of(coord);
        self.tiles[idx] = kind;

        match (kind, self.empty_slot[idx]) {
            (TileKind::Empty, None) => {
                self.empty_slot[idx] = Some(self.empty.len());
                self.empty.push(idx);
            }
            (TileKind::Fruit | TileKind::Body, Some(slot)) => {
                self.empty.swap_remove(slot);
                if let Some(&moved) = self.empty.get(slot) {
                    self.empty_slot[moved] = Some(slot);
                }
                self.empty_slot[idx] = None;
            }
            // Membership already matches
            _ => {}
        }
    }

    /// True when no empty cell remains
    pub fn is_full(&self) -> bool {
        self.empty.is_empty()
    }

    pub fn empty_count(&self) -> usize {
        self.empty.len()
    }

    /// Pick an empty cell uniformly at random
    ///
    /// Returns `None` when the grid is full. The grid itself is left untouched;
    /// the caller decides what to place there.
    pub fn find_empty<R: RangeRng + ?Sized>(&self, rng: &mut R) -> Option<Coordinate> {
        if self.is_full() {
            return None;
        }
        let pick = rng.pick(0, self.empty.len() - 1);
        let idx = *self.empty.get(pick)?;
        Some(self.coord_of(idx))
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, TileKind)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(idx, &kind)| (self.coord_of(idx), kind))
    }

    fn index_of(&self, coord: Coordinate) -> usize {
        assert!(
            self.is_legal(coord),
            "coordinate ({}, {}) is outside the {}x{} grid",
            coord.row,
            coord.col,
            self.height,
            self.width
        );
        coord.row * self.width + coord.col
    }

    fn coord_of(&self, idx: usize) -> Coordinate {
        Coordinate::new(idx / self.width, idx % self.width)
    }
}
