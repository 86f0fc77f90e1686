use crate::game::{Coordinate, GameEngine, RangeRng, TileChange, TileKind};

/// The renderer's copy of the grid
///
/// Filled once from the engine when a game starts, then kept current by
/// applying each tick's change list. It never reads engine state afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    head: Option<Coordinate>,
}

impl Board {
    /// Snapshot every tile of a freshly created game
    pub fn from_engine<R: RangeRng>(engine: &GameEngine<R>) -> Self {
        let (width, height) = (engine.width(), engine.height());
        let mut tiles = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                tiles.push(engine.get_tile(Coordinate::new(row, col)));
            }
        }

        Self {
            width,
            height,
            tiles,
            head: Some(engine.head()),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Apply one tick's changes in order; the last cell turned to `Body` is the new head
    pub fn apply(&mut self, changes: &[TileChange]) {
        for change in changes {
            let idx = change.coord.row * self.width + change.coord.col;
            self.tiles[idx] = change.kind;
            if change.kind == TileKind::Body {
                self.head = Some(change.coord);
            }
        }
    }

    pub fn tile(&self, coord: Coordinate) -> TileKind {
        self.tiles[coord.row * self.width + coord.col]
    }

    pub fn head(&self) -> Option<Coordinate> {
        self.head
    }
}
