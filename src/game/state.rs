use std::collections::HashSet;

use super::action::Direction;
use super::error::EnvError;

/// A position on the game grid
///
/// Signed so that a head stepping off the grid can still be represented
/// for the tick that detects the wall collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current heading
    pub direction: Direction,
    /// Number of segments the snake should occupy
    pub target_length: usize,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
            target_length: 1,
        }
    }

    /// Create a snake from explicit segments, head first
    ///
    /// The length target matches the number of segments given.
    ///
    /// # Arguments
    ///
    /// * `body` - Segments from head to tail; must not be empty
    /// * `direction` - Current heading
    ///
    /// # Example
    ///
    /// ```rust
    /// use grid_snake::game::{Direction, Position, Snake};
    ///
    /// let snake = Snake::from_segments(
    ///     vec![Position::new(5, 5), Position::new(4, 5)],
    ///     Direction::Right,
    /// )
    /// .unwrap();
    /// assert_eq!(snake.target_length, 2);
    ///
    /// assert!(Snake::from_segments(Vec::new(), Direction::Right).is_err());
    /// ```
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Result<Self, EnvError> {
        if body.is_empty() {
            return Err(EnvError::InvalidState(
                "snake needs at least one segment".to_string(),
            ));
        }

        let target_length = body.len();
        Ok(Self {
            body,
            direction,
            target_length,
        })
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

    /// Apply a requested heading unless it reverses the current one
    ///
    /// Returns true if the heading changed.
    pub fn steer(&mut self, requested: Direction) -> bool {
        if self.direction.is_opposite(requested) || self.direction == requested {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Advance one cell along the current heading
    ///
    /// The tail is dropped whenever the body exceeds the length target,
    /// so growth shows up on the tick after the target is raised.
    pub fn advance(&mut self) -> Position {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if self.body.len() > self.target_length {
            self.body.pop();
        }

        new_head
    }

    /// Raise the length target by one segment
    pub fn grow(&mut self) {
        self.target_length += 1;
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

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle of one episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeStatus {
    Active,
    /// Ended by a wall or self collision
    Collided(CollisionType),
    /// Snake covers the whole grid; no free cell is left for food
    Won,
}

impl EpisodeStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, EpisodeStatus::Active)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the episode is won
    pub food: Option<Position>,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    pub status: EpisodeStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid_size: usize) -> Self {
        Self {
            snake,
            food: Some(food),
            grid_size,
            score: 0,
            steps: 0,
            status: EpisodeStatus::Active,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// A cell is lethal if it is off the grid or under any snake segment
    pub fn is_lethal(&self, pos: Position) -> bool {
        !self.is_in_bounds(pos) || self.is_occupied_by_snake(pos)
    }

    pub fn is_alive(&self) -> bool {
        self.status.is_active()
    }

    /// Check the invariants every tick of play preserves
    ///
    /// The snake must be non-empty, within its length target and fully on
    /// the grid. Food must be on a free cell, and may only be missing once
    /// the episode is won. An active snake may not overlap itself.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.snake.is_empty() {
            return Err(EnvError::InvalidState(
                "snake needs at least one segment".to_string(),
            ));
        }

        if self.snake.len() > self.snake.target_length {
            return Err(EnvError::InvalidState(format!(
                "snake has {} segments but a length target of {}",
                self.snake.len(),
                self.snake.target_length
            )));
        }

        if let Some(segment) = self.snake.body.iter().find(|s| !self.is_in_bounds(**s)) {
            return Err(EnvError::InvalidState(format!(
                "segment {:?} is outside the {size}x{size} grid",
                segment,
                size = self.grid_size
            )));
        }

        if self.status.is_active() {
            let mut seen = HashSet::with_capacity(self.snake.len());
            if let Some(segment) = self.snake.body.iter().find(|s| !seen.insert(**s)) {
                return Err(EnvError::InvalidState(format!(
                    "segment {:?} appears twice in an active snake",
                    segment
                )));
            }
        }

        match self.food {
            Some(food) if !self.is_in_bounds(food) => Err(EnvError::InvalidState(format!(
                "food {:?} is outside the {size}x{size} grid",
                food,
                size = self.grid_size
            ))),
            Some(food) if self.is_occupied_by_snake(food) => Err(EnvError::InvalidState(
                format!("food {:?} is under the snake", food),
            )),
            None if self.status != EpisodeStatus::Won => Err(EnvError::InvalidState(
                "food may only be missing once the episode is won".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
