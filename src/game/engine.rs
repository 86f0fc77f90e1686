use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use super::{
    config::GameConfig,
    direction::Direction,
    error::GameError,
    grid::{Coordinate, Grid, TileKind},
    rng::{RandRange, RangeRng},
    snake::Snake,
};

/// A single cell that changed during a tick, with its new tile kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileChange {
    pub coord: Coordinate,
    pub kind: TileKind,
}

impl TileChange {
    pub fn new(coord: Coordinate, kind: TileKind) -> Self {
        Self { coord, kind }
    }
}

/// Result of a game step
///
/// Both fatal variants leave the game untouched. Drivers that only care about
/// "changes or game over" can flatten this with [`StepOutcome::into_changes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved; cells changed in the order listed
    Continued(Vec<TileChange>),
    /// The snake tried to leave the grid
    HitWall,
    /// The snake ran into its own body
    HitSelf,
}

impl StepOutcome {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, StepOutcome::Continued(_))
    }

    /// Changes applied this tick; empty for a fatal move
    pub fn changes(&self) -> &[TileChange] {
        match self {
            StepOutcome::Continued(changes) => changes,
            StepOutcome::HitWall | StepOutcome::HitSelf => &[],
        }
    }

    /// Flatten into a plain change list, where an empty list means game over
    pub fn into_changes(self) -> Vec<TileChange> {
        match self {
            StepOutcome::Continued(changes) => changes,
            StepOutcome::HitWall | StepOutcome::HitSelf => Vec::new(),
        }
    }
}

/// The game engine that owns the grid and the snake and advances them tick by tick
#[derive(Debug, Clone)]
pub struct GameEngine<R = RandRange<StdRng>> {
    grid: Grid,
    snake: Snake,
    growth_rate: u32,
    rng: R,
    fruits_eaten: u32,
    ticks: u64,
}

impl<R: RangeRng> GameEngine<R> {
    /// Create a game with the snake at `snake_origin` and fruit at each of `fruits`
    ///
    /// `rng` is kept for the whole game and used only to place new fruit.
    pub fn new(
        height: usize,
        width: usize,
        snake_origin: Coordinate,
        fruits: impl IntoIterator<Item = Coordinate>,
        growth_rate: u32,
        rng: R,
    ) -> Result<Self, GameError> {
        if height == 0 || width == 0 {
            return Err(GameError::EmptyGrid { height, width });
        }

        let mut grid = Grid::new(width, height);
        if !grid.is_legal(snake_origin) {
            return Err(GameError::IllegalOrigin {
                origin: snake_origin,
                height,
                width,
            });
        }

        for fruit in fruits {
            if !grid.is_legal(fruit) {
                return Err(GameError::IllegalFruit {
                    fruit,
                    height,
                    width,
                });
            }
            if fruit == snake_origin {
                return Err(GameError::FruitOnSnake(fruit));
            }
            grid.put(fruit, TileKind::Fruit);
        }
        grid.put(snake_origin, TileKind::Body);

        info!(
            height,
            width,
            growth_rate,
            fruits = height * width - 1 - grid.empty_count(),
            "new game"
        );

        Ok(Self {
            grid,
            snake: Snake::new(snake_origin),
            growth_rate,
            rng,
            fruits_eaten: 0,
            ticks: 0,
        })
    }

    /// Create a game from `config`: snake centred, fruit scattered at random
    pub fn from_config(config: &GameConfig, rng: R) -> Result<Self, GameError> {
        let origin = Coordinate::new(config.grid_height / 2, config.grid_width / 2);
        let mut engine = Self::new(
            config.grid_height,
            config.grid_width,
            origin,
            [],
            config.growth_rate,
            rng,
        )?;

        for _ in 0..config.initial_fruits {
            if engine.spawn_fruit().is_none() {
                break;
            }
        }

        Ok(engine)
    }

    /// Advance the game by one tick in `direction`
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        let head = self.snake.head();
        let Some(new_head) = head.offset(direction).filter(|c| self.grid.is_legal(*c)) else {
            debug!(?head, ?direction, tick = self.ticks, "snake hit the wall");
            return StepOutcome::HitWall;
        };

        let ate_fruit = match self.grid.get(new_head) {
            TileKind::Body => {
                debug!(?new_head, tick = self.ticks, "snake hit itself");
                return StepOutcome::HitSelf;
            }
            TileKind::Fruit => {
                self.snake.grow(self.growth_rate);
                true
            }
            TileKind::Empty => false,
        };

        let mut changes = Vec::with_capacity(3);
        if let Some(tail) = self.snake.walk(new_head) {
            self.apply(&mut changes, tail, TileKind::Empty);
        }
        self.apply(&mut changes, new_head, TileKind::Body);

        if ate_fruit {
            self.fruits_eaten += 1;
            debug!(?new_head, eaten = self.fruits_eaten, "fruit eaten");
            match self.grid.find_empty(&mut self.rng) {
                Some(fruit) => self.apply(&mut changes, fruit, TileKind::Fruit),
                None => debug!("grid is full, no fruit placed"),
            }
        }

        self.ticks += 1;
        trace!(?direction, ?new_head, changes = changes.len(), "tick");

        StepOutcome::Continued(changes)
    }

    /// Tile kind at a legal coordinate, for out-of-band queries such as the first render
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the grid.
    pub fn get_tile(&self, coord: Coordinate) -> TileKind {
        self.grid.get(coord)
    }

    /// Place one fruit on a random empty cell, if any is left
    fn spawn_fruit(&mut self) -> Option<Coordinate> {
        let fruit = self.grid.find_empty(&mut self.rng)?;
        self.grid.put(fruit, TileKind::Fruit);
        Some(fruit)
    }

    fn apply(&mut self, changes: &mut Vec<TileChange>, coord: Coordinate, kind: TileKind) {
        self.grid.put(coord, kind);
        changes.push(TileChange::new(coord, kind));
    }
}

impl<R> GameEngine<R> {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Coordinate {
        self.snake.head()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn growth_rate(&self) -> u32 {
        self.growth_rate
    }

    /// Fruits eaten so far; the only score the game keeps
    pub fn fruits_eaten(&self) -> u32 {
        self.fruits_eaten
    }

    /// Successful (non-fatal) steps taken
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn first(lo: usize, _hi: usize) -> usize {
        lo
    }

    #[test]
    fn test_new_marks_snake_and_fruit() {
        let engine = GameEngine::new(5, 5, c(2, 2), [c(0, 0), c(4, 4)], 4, first).unwrap();

        assert_eq!(engine.get_tile(c(2, 2)), TileKind::Body);
        assert_eq!(engine.get_tile(c(0, 0)), TileKind::Fruit);
        assert_eq!(engine.get_tile(c(4, 4)), TileKind::Fruit);
        assert_eq!(engine.grid().empty_count(), 22);
        assert_eq!(engine.snake_len(), 1);
        assert_eq!(engine.fruits_eaten(), 0);
        assert_eq!(engine.ticks(), 0);
    }

    #[test]
    fn test_new_rejects_bad_setup() {
        assert_eq!(
            GameEngine::new(0, 5, c(0, 0), [], 1, first).err(),
            Some(GameError::EmptyGrid { height: 0, width: 5 })
        );
        assert!(matches!(
            GameEngine::new(5, 5, c(5, 0), [], 1, first),
            Err(GameError::IllegalOrigin { .. })
        ));
        assert!(matches!(
            GameEngine::new(5, 5, c(0, 0), [c(1, 1), c(0, 9)], 1, first),
            Err(GameError::IllegalFruit { .. })
        ));
        assert_eq!(
            GameEngine::new(5, 5, c(1, 1), [c(1, 1)], 1, first).err(),
            Some(GameError::FruitOnSnake(c(1, 1)))
        );
    }

    #[test]
    fn test_from_config() {
        let config = GameConfig {
            initial_fruits: 3,
            ..GameConfig::small()
        };
        let engine = GameEngine::from_config(&config, RandRange::seeded(1)).unwrap();

        assert_eq!(engine.head(), c(5, 5));
        assert_eq!(engine.get_tile(c(5, 5)), TileKind::Body);
        let fruits = engine
            .grid()
            .iter()
            .filter(|(_, kind)| *kind == TileKind::Fruit)
            .count();
        assert_eq!(fruits, 3);
        assert_eq!(engine.growth_rate(), 4);
    }

    #[test]
    fn test_from_config_stops_when_grid_fills() {
        let config = GameConfig {
            grid_width: 2,
            grid_height: 1,
            initial_fruits: 5,
            ..GameConfig::default()
        };
        let engine = GameEngine::from_config(&config, RandRange::seeded(3)).unwrap();
        assert!(engine.grid().is_full());
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::new(5, 5, c(2, 2), [], 4, first).unwrap();

        let outcome = engine.step(Direction::East);

        assert_eq!(
            outcome,
            StepOutcome::Continued(vec![
                TileChange::new(c(2, 2), TileKind::Empty),
                TileChange::new(c(2, 3), TileKind::Body),
            ])
        );
        assert_eq!(engine.get_tile(c(2, 3)), TileKind::Body);
        assert_eq!(engine.get_tile(c(2, 2)), TileKind::Empty);
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = GameEngine::new(5, 5, c(2, 2), [c(2, 3)], 2, first).unwrap();

        let changes = engine.step(Direction::East).into_changes();

        // Tail retained, so no Empty change; head set, then a new fruit
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0], TileChange::new(c(2, 3), TileKind::Body));
        assert_eq!(changes[1].kind, TileKind::Fruit);
        assert_eq!(engine.get_tile(changes[1].coord), TileKind::Fruit);
        assert_eq!(engine.snake_len(), 2);
        assert_eq!(engine.fruits_eaten(), 1);
        assert_eq!(engine.snake().pending_growth(), 1);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = GameEngine::new(3, 3, c(0, 0), [], 1, first).unwrap();
        let before = engine.grid().clone();

        assert_eq!(engine.step(Direction::North), StepOutcome::HitWall);
        assert_eq!(engine.step(Direction::West), StepOutcome::HitWall);

        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.head(), c(0, 0));
        assert_eq!(engine.ticks(), 0);
    }

    #[test]
    fn test_wall_collision_far_edge() {
        let mut engine = GameEngine::new(3, 4, c(2, 3), [], 1, first).unwrap();
        assert_eq!(engine.step(Direction::South), StepOutcome::HitWall);
        assert_eq!(engine.step(Direction::East), StepOutcome::HitWall);
    }

    #[test]
    fn test_self_collision() {
        // Eat once with growth 3 so the snake reaches length 4
        let mut engine = GameEngine::new(6, 6, c(3, 3), [c(3, 4)], 3, first).unwrap();
        engine.step(Direction::East);
        engine.step(Direction::South);
        engine.step(Direction::West);
        assert_eq!(engine.snake_len(), 4);

        let snake_before = engine.snake().clone();
        let grid_before = engine.grid().clone();

        // (3,3) is the tail-end segment of the body loop
        assert_eq!(engine.step(Direction::North), StepOutcome::HitSelf);
        assert_eq!(engine.snake(), &snake_before);
        assert_eq!(engine.grid(), &grid_before);
    }

    #[test]
    fn test_reversal_into_neck_is_fatal() {
        let mut engine = GameEngine::new(5, 5, c(2, 2), [c(2, 3)], 2, first).unwrap();
        engine.step(Direction::East);
        assert_eq!(engine.step(Direction::West), StepOutcome::HitSelf);
    }

    #[test]
    fn test_outcome_helpers() {
        let change = TileChange::new(c(0, 0), TileKind::Body);
        let continued = StepOutcome::Continued(vec![change]);
        assert!(!continued.is_game_over());
        assert_eq!(continued.changes(), &[change]);

        assert!(StepOutcome::HitWall.is_game_over());
        assert!(StepOutcome::HitSelf.changes().is_empty());
        assert!(StepOutcome::HitSelf.into_changes().is_empty());
    }
}
