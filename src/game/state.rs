use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid, in arena units.
///
/// Valid positions are multiples of the cell size, so with a cell size of 20
/// neighbouring cells are `(0, 0)` and `(20, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }

    /// True if both coordinates are snapped to the cell grid
    pub fn is_on_lattice(&self, cell_size: i32) -> bool {
        self.x.rem_euclid(cell_size) == 0 && self.y.rem_euclid(cell_size) == 0
    }

    /// True if the cell starting here lies inside a square arena, i.e. both
    /// coordinates are in `[0, arena_size - cell_size]`
    pub fn is_within_arena(&self, arena_size: i32, cell_size: i32) -> bool {
        let max = arena_size - cell_size;
        (0..=max).contains(&self.x) && (0..=max).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Heading applied on the most recent advance
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction.
    ///
    /// Segments trail behind the head, one cell apart.
    pub fn new(head: Position, direction: Direction, length: usize, cell_size: i32) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx * cell_size, -dy * cell_size);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Create a snake from explicit head-first segments
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, occupies the position
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head one cell along `heading`.
    ///
    /// The tail stays put; the caller decides between `grow` and `shrink`
    /// once it knows whether the new head landed on food.
    pub fn advance(&mut self, heading: Direction, cell_size: i32) {
        let new_head = self.head().moved_in_direction(heading, cell_size);
        self.body.insert(0, new_head);
        self.direction = heading;
    }

    /// Keep the segment gained by `advance`. Nothing to do.
    pub fn grow(&mut self) {}

    /// Drop the tail segment. Only valid on ticks without growth.
    pub fn shrink(&mut self) {
        self.body.pop();
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Over,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Heading to apply on the next tick, already validated
    pub pending_heading: Option<Direction>,
    pub arena_size: i32,
    pub cell_size: i32,
    pub score: u32,
    /// Current tick interval in milliseconds
    pub interval_ms: u64,
    pub ticks: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        food: Position,
        arena_size: i32,
        cell_size: i32,
        interval_ms: u64,
    ) -> Self {
        Self {
            snake,
            food,
            pending_heading: None,
            arena_size,
            cell_size,
            score: 0,
            interval_ms,
            ticks: 0,
            status: GameStatus::NotStarted,
        }
    }

    /// Number of cells along one side of the arena
    pub fn cells_per_side(&self) -> i32 {
        self.arena_size / self.cell_size
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(100, 100);
        assert_eq!(pos.moved_by(20, 0), Position::new(120, 100));
        assert_eq!(pos.moved_by(-20, 0), Position::new(80, 100));
        assert_eq!(pos.moved_in_direction(Direction::Down, 20), Position::new(100, 120));
        assert_eq!(pos.moved_in_direction(Direction::Up, 20), Position::new(100, 80));
    }

    #[test]
    fn test_lattice() {
        assert!(Position::new(0, 0).is_on_lattice(20));
        assert!(Position::new(-20, 580).is_on_lattice(20));
        assert!(!Position::new(10, 0).is_on_lattice(20));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(160, 200), Direction::Right, 3, 20);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(160, 200));
        assert_eq!(snake.body[1], Position::new(140, 200));
        assert_eq!(snake.body[2], Position::new(120, 200));
    }

    #[test]
    fn test_advance_keeps_tail_until_shrink() {
        let mut snake = Snake::new(Position::new(160, 200), Direction::Right, 3, 20);

        snake.advance(Direction::Right, 20);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(180, 200));
        assert_eq!(snake.body[3], Position::new(120, 200));

        snake.shrink();
        assert_eq!(
            snake.body,
            vec![
                Position::new(180, 200),
                Position::new(160, 200),
                Position::new(140, 200),
            ]
        );
    }

    #[test]
    fn test_grow_retains_extra_segment() {
        let mut snake = Snake::new(Position::new(160, 200), Direction::Right, 3, 20);
        snake.advance(Direction::Down, 20);
        snake.grow();

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(160, 220));
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(100, 100), Direction::Right, 3, 20);
        assert!(!snake.collides_with_body(Position::new(100, 100))); // head
        assert!(snake.collides_with_body(Position::new(80, 100))); // body
        assert!(!snake.collides_with_body(Position::new(200, 200))); // empty
        assert!(snake.occupies(Position::new(100, 100)));
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Position::new(0, 0).is_within_arena(600, 20));
        assert!(Position::new(580, 580).is_within_arena(600, 20));
        assert!(!Position::new(-20, 0).is_within_arena(600, 20));
        assert!(!Position::new(600, 0).is_within_arena(600, 20));
        assert!(!Position::new(0, 600).is_within_arena(600, 20));
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(
            Snake::new(Position::new(100, 100), Direction::Right, 3, 20),
            Position::new(300, 200),
            600,
            20,
            200,
        );

        assert_eq!(state.cells_per_side(), 30);
        assert_eq!(state.status, GameStatus::NotStarted);
    }
}
