use super::{
    action::{Action, Direction},
    config::GameConfig,
    error::EnvError,
    state::{CollisionType, EpisodeStatus, GameState, Position, Snake},
};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Random draws tried before falling back to enumerating free cells
const MAX_REJECTION_DRAWS: usize = 64;

/// Reward for a tick that ends in a collision
pub const DEATH_REWARD: f32 = -1.0;
/// Reward for a tick whose head lands on the food
pub const FOOD_REWARD: f32 = 1.0;
/// Reward for every other tick
pub const IDLE_REWARD: f32 = 0.0;

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether eating filled the last free cell
    pub won: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step: -1, 0 or +1
    pub reward: f32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn terminal_noop() -> Self {
        Self {
            reward: IDLE_REWARD,
            terminated: true,
            info: StepInfo::default(),
        }
    }
}

/// The game engine that handles all game logic
///
/// Owns the configuration and the random stream; the mutable episode state
/// lives in a separate [`GameState`] so callers can inspect it freely.
///
/// # Example
///
/// ```rust
/// use grid_snake::game::{Direction, GameConfig, GameEngine};
///
/// let mut engine = GameEngine::with_seed(GameConfig::new(12), 42).unwrap();
/// let mut state = engine.reset(None);
/// let heading = state.snake.direction;
///
/// let result = engine.step(&mut state, heading.into());
/// assert_eq!(state.steps, 1);
/// assert!(!result.terminated);
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    rng: ChaCha8Rng,
}

impl GameEngine {
    /// Create a new game engine seeded from OS entropy
    pub fn new(config: GameConfig) -> Result<Self, EnvError> {
        Self::with_seed(config, rand::random())
    }

    /// Create a new game engine with a reproducible random stream
    ///
    /// # Arguments
    ///
    /// * `config` - Grid configuration; rejected if it fails validation
    /// * `seed` - Seed for the ChaCha stream driving headings and food
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, EnvError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    ///
    /// A seed restarts the random stream; without one the current stream
    /// continues, so consecutive episodes differ.
    ///
    /// # Arguments
    ///
    /// * `seed` - Optional seed to restart the random stream with
    ///
    /// # Example
    ///
    /// ```rust
    /// use grid_snake::game::{GameConfig, GameEngine, Position};
    ///
    /// let mut engine = GameEngine::with_seed(GameConfig::new(12), 1).unwrap();
    /// let first = engine.reset(Some(9));
    /// let again = engine.reset(Some(9));
    ///
    /// assert_eq!(first, again);
    /// assert_eq!(first.snake.head(), Position::new(6, 6));
    /// ```
    pub fn reset(&mut self, seed: Option<u64>) -> GameState {
        if let Some(seed) = seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }

        let center = (self.config.grid_size / 2) as i32;
        let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        let snake = Snake::new(Position::new(center, center), direction);
        let food = self.place_food(&snake);

        debug!(
            grid_size = self.config.grid_size,
            ?direction,
            ?food,
            "episode reset"
        );

        GameState {
            snake,
            food,
            grid_size: self.config.grid_size,
            score: 0,
            steps: 0,
            status: if food.is_some() {
                EpisodeStatus::Active
            } else {
                EpisodeStatus::Won
            },
        }
    }

    /// Execute one step of the game
    ///
    /// A terminated state is left untouched and reported as terminated with
    /// a zero reward; resetting is the caller's decision.
    ///
    /// # Arguments
    ///
    /// * `state` - Episode state to advance in place
    /// * `action` - Requested heading; a reversal keeps the current one
    ///
    /// # Example
    ///
    /// ```rust
    /// use grid_snake::game::{Direction, FOOD_REWARD, GameConfig, GameEngine, GameState, Position, Snake};
    ///
    /// let mut engine = GameEngine::with_seed(GameConfig::new(12), 3).unwrap();
    /// let snake = Snake::new(Position::new(6, 6), Direction::Up);
    /// let mut state = GameState::new(snake, Position::new(6, 5), 12);
    ///
    /// let result = engine.step(&mut state, Direction::Up.into());
    /// assert_eq!(result.reward, FOOD_REWARD);
    /// assert_eq!(state.score, 1);
    /// ```
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if state.status.is_terminal() {
            return StepResult::terminal_noop();
        }

        state.snake.steer(action.direction());
        let new_head = state.snake.advance();
        state.steps += 1;

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.status = EpisodeStatus::Collided(collision_type);
            debug!(
                ?collision_type,
                score = state.score,
                steps = state.steps,
                "episode terminated"
            );

            return StepResult {
                reward: DEATH_REWARD,
                terminated: true,
                info: StepInfo {
                    collision_type: Some(collision_type),
                    ..Default::default()
                },
            };
        }

        if state.food != Some(new_head) {
            trace!(head = ?new_head, "moved");
            return StepResult {
                reward: IDLE_REWARD,
                terminated: false,
                info: StepInfo::default(),
            };
        }

        state.snake.grow();
        state.score += 1;
        state.food = self.place_food(&state.snake);

        let won = state.food.is_none();
        if won {
            state.status = EpisodeStatus::Won;
            debug!(score = state.score, steps = state.steps, "grid filled");
        }

        StepResult {
            reward: FOOD_REWARD,
            terminated: won,
            info: StepInfo {
                ate_food: true,
                collision_type: None,
                won,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, head: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a random cell not covered by the snake
    ///
    /// Returns `None` when the snake occupies every cell.
    fn place_food(&mut self, snake: &Snake) -> Option<Position> {
        if snake.len() >= self.config.cell_count() {
            return None;
        }

        let size = self.config.grid_size as i32;
        for _ in 0..MAX_REJECTION_DRAWS {
            let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !snake.occupies(pos) {
                trace!(food = ?pos, "food placed");
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();
        let pos = free.choose(&mut self.rng).copied();
        trace!(food = ?pos, free_cells = free.len(), "food placed from free cells");
        pos
    }
}
