use super::info::Info;
use super::observation::{OBSERVATION_SIZE, Observation, create_observation};
use crate::game::{
    ACTION_SPACE_SIZE, Action, EnvError, EpisodeStatus, GameConfig, GameEngine, GameState,
};
use tracing::debug;

/// Outcome of one environment step, as seen by the controller
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<O> {
    pub observation: O,
    /// -1 on collision, +1 on eating, 0 otherwise
    pub reward: f32,
    pub terminated: bool,
    /// Never set by the environment itself; see [`super::TimeLimit`]
    pub truncated: bool,
    pub info: Info,
}

impl<O> Transition<O> {
    /// Whether the controller should reset before stepping again
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Request/response contract between a controller and an environment
pub trait Environment {
    type Observation;

    /// Start a new episode, optionally re-seeding the random stream
    fn reset(&mut self, seed: Option<u64>) -> (Self::Observation, Info);

    /// Advance one tick with a discrete action index
    fn step(&mut self, action: usize) -> Result<Transition<Self::Observation>, EnvError>;

    /// Number of discrete actions accepted by [`Environment::step`]
    fn action_space(&self) -> usize;

    /// Length of the observation vector
    fn observation_size(&self) -> usize;
}

/// Snake environment for reinforcement learning
///
/// Wraps the game engine and provides the controller-facing interface with:
/// - 9-component feature observations
/// - Discrete action space (4 actions: Left, Right, Up, Down)
/// - reset / step / observe
///
/// Stepping a terminated episode auto-resets: the fresh observation is
/// returned with reward 0 and `terminated = true`.
///
/// # Example
///
/// ```rust
/// use grid_snake::game::GameConfig;
/// use grid_snake::rl::SnakeEnvironment;
///
/// let mut env = SnakeEnvironment::with_seed(GameConfig::small(), 7).unwrap();
/// let (obs, _info) = env.reset(Some(7));
/// assert_eq!(obs.as_slice().len(), 9);
///
/// let transition = env.step(2).unwrap();
/// assert!(!transition.truncated);
/// ```
#[derive(Debug, Clone)]
pub struct SnakeEnvironment {
    engine: GameEngine,
    state: GameState,
}

impl SnakeEnvironment {
    /// Create a new Snake environment seeded from OS entropy
    pub fn new(config: GameConfig) -> Result<Self, EnvError> {
        Self::from_engine(GameEngine::new(config)?)
    }

    /// Create a new Snake environment with a reproducible random stream
    ///
    /// # Arguments
    ///
    /// * `config` - Grid and pacing configuration, validated before use
    /// * `seed` - Seed for food placement and the initial heading
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, EnvError> {
        Self::from_engine(GameEngine::with_seed(config, seed)?)
    }

    fn from_engine(mut engine: GameEngine) -> Result<Self, EnvError> {
        let state = engine.reset(None);
        Ok(Self { engine, state })
    }

    /// Reset the environment and return initial observation
    ///
    /// # Arguments
    ///
    /// * `seed` - Re-seeds the random stream when given; otherwise the
    ///   current stream continues
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        self.state = self.engine.reset(seed);
        (self.observe(), Info::new())
    }

    /// Step the environment with a discrete action
    ///
    /// Actions:
    /// - 0: Left
    /// - 1: Right
    /// - 2: Up
    /// - 3: Down
    ///
    /// Any other index is rejected with [`EnvError::InvalidAction`] and the
    /// state is left unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grid_snake::game::{Direction, EnvError, GameConfig, GameState, Position, Snake};
    /// use grid_snake::rl::SnakeEnvironment;
    ///
    /// let mut env = SnakeEnvironment::with_seed(GameConfig::new(12), 1).unwrap();
    /// let snake = Snake::new(Position::new(4, 4), Direction::Up);
    /// env.load_state(GameState::new(snake, Position::new(5, 4), 12)).unwrap();
    ///
    /// let transition = env.step(1).unwrap();
    /// assert_eq!(transition.reward, 1.0);
    /// assert_eq!(env.score(), 1);
    ///
    /// assert_eq!(env.step(7), Err(EnvError::InvalidAction { action: 7 }));
    /// ```
    pub fn step(&mut self, action_idx: usize) -> Result<Transition<Observation>, EnvError> {
        let action = Action::from_index(action_idx)?;

        if self.state.status.is_terminal() {
            debug!(status = ?self.state.status, "step on finished episode, auto-resetting");
            let (observation, info) = self.reset(None);
            return Ok(Transition {
                observation,
                reward: 0.0,
                terminated: true,
                truncated: false,
                info,
            });
        }

        let result = self.engine.step(&mut self.state, action);

        Ok(Transition {
            observation: self.observe(),
            reward: result.reward,
            terminated: result.terminated,
            truncated: false,
            info: Info::new(),
        })
    }

    /// Get current observation without stepping
    pub fn observe(&self) -> Observation {
        create_observation(&self.state)
    }

    /// Get reference to current game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replace the episode state, e.g. to replay a recorded position
    ///
    /// The state must be on this environment's grid and satisfy
    /// [`GameState::validate`]. A rejected state leaves the current one in
    /// place.
    ///
    /// # Arguments
    ///
    /// * `state` - Snapshot to continue from
    ///
    /// # Example
    ///
    /// ```rust
    /// use grid_snake::game::{Direction, GameConfig, GameState, Position, Snake};
    /// use grid_snake::rl::SnakeEnvironment;
    ///
    /// let mut env = SnakeEnvironment::with_seed(GameConfig::small(), 1).unwrap();
    ///
    /// let snake = Snake::new(Position::new(15, 15), Direction::Right);
    /// let foreign = GameState::new(snake, Position::new(16, 15), 20);
    /// assert!(env.load_state(foreign).is_err());
    ///
    /// let snake = Snake::new(Position::new(2, 2), Direction::Right);
    /// assert!(env.load_state(GameState::new(snake, Position::new(3, 2), 6)).is_ok());
    /// ```
    pub fn load_state(&mut self, state: GameState) -> Result<(), EnvError> {
        let grid_size = self.engine.config().grid_size;
        if state.grid_size != grid_size {
            return Err(EnvError::InvalidState(format!(
                "state is for a {} grid but the environment uses {}",
                state.grid_size, grid_size
            )));
        }
        state.validate()?;

        debug!(head = ?state.snake.head(), food = ?state.food, "loaded episode state");
        self.state = state;
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn status(&self) -> EpisodeStatus {
        self.state.status
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_terminated(&self) -> bool {
        self.state.status.is_terminal()
    }
}

impl Environment for SnakeEnvironment {
    type Observation = Observation;

    fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        SnakeEnvironment::reset(self, seed)
    }

    fn step(&mut self, action: usize) -> Result<Transition<Observation>, EnvError> {
        SnakeEnvironment::step(self, action)
    }

    fn action_space(&self) -> usize {
        ACTION_SPACE_SIZE
    }

    fn observation_size(&self) -> usize {
        OBSERVATION_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Direction, Position, Snake};

    fn env() -> SnakeEnvironment {
        SnakeEnvironment::with_seed(GameConfig::default(), 3).unwrap()
    }

    fn place(env: &mut SnakeEnvironment, snake: Snake, food: Position) {
        let grid_size = env.config().grid_size;
        env.load_state(GameState::new(snake, food, grid_size)).unwrap();
    }

    #[test]
    fn test_environment_creation() {
        let env = env();

        assert!(env.state().is_alive());
        assert_eq!(env.score(), 0);
        assert_eq!(env.state().steps, 0);
        assert_eq!(env.action_space(), 4);
        assert_eq!(env.observation_size(), 9);
    }

    #[test]
    fn test_reset_returns_valid_observation() {
        let mut env = env();
        let (obs, info) = env.reset(Some(11));

        assert_eq!(obs.as_slice().len(), OBSERVATION_SIZE);
        assert!(info.is_empty());
        assert_eq!(obs.heading(), Some(env.state().snake.direction));
        assert_eq!(env.state().snake.head(), Position::new(6, 6));
    }

    #[test]
    fn test_step_straight_on_open_grid() {
        let mut env = env();
        place(
            &mut env,
            Snake::new(Position::new(6, 6), Direction::Right),
            Position::new(0, 0),
        );

        let t = env.step(1).unwrap();

        assert_eq!(env.state().snake.head(), Position::new(7, 6));
        assert_eq!(t.reward, 0.0);
        assert!(!t.terminated);
        assert!(!t.truncated);
        assert!(t.info.is_empty());
    }

    #[test]
    fn test_invalid_action_leaves_state_untouched() {
        let mut env = env();
        let before = env.state().clone();

        let err = env.step(4).unwrap_err();

        assert_eq!(err, EnvError::InvalidAction { action: 4 });
        assert_eq!(env.state(), &before);
    }

    #[test]
    fn test_wall_collision() {
        let mut env = env();
        place(
            &mut env,
            Snake::new(Position::new(0, 6), Direction::Left),
            Position::new(5, 5),
        );

        let t = env.step(0).unwrap();

        assert!(t.terminated);
        assert_eq!(t.reward, -1.0);
        assert_eq!(
            env.status(),
            EpisodeStatus::Collided(CollisionType::Wall)
        );
    }

    #[test]
    fn test_step_after_termination_auto_resets() {
        let mut env = env();
        place(
            &mut env,
            Snake::new(Position::new(0, 6), Direction::Left),
            Position::new(5, 5),
        );
        env.step(0).unwrap();
        assert!(env.is_terminated());

        let t = env.step(2).unwrap();

        assert!(t.terminated);
        assert_eq!(t.reward, 0.0);
        assert!(env.state().is_alive());
        assert_eq!(env.state().steps, 0);
        assert_eq!(env.state().snake.head(), Position::new(6, 6));
        assert_eq!(t.observation, env.observe());
    }

    #[test]
    fn test_food_reward() {
        let mut env = env();
        place(
            &mut env,
            Snake::new(Position::new(6, 6), Direction::Down),
            Position::new(6, 7),
        );

        let t = env.step(3).unwrap();

        assert_eq!(t.reward, 1.0);
        assert!(!t.terminated);
        assert_eq!(env.score(), 1);
        assert_eq!(env.state().snake.target_length, 2);
        let food = env.state().food.unwrap();
        assert!(!env.state().snake.occupies(food));
    }

    #[test]
    fn test_observation_changes_after_step() {
        let mut env = env();
        place(
            &mut env,
            Snake::new(Position::new(1, 6), Direction::Left),
            Position::new(9, 9),
        );

        let obs1 = env.observe();
        env.step(0).unwrap();
        let obs2 = env.observe();

        // Reaching the left edge turns on the straight danger flag
        assert_ne!(obs1, obs2);
    }

    #[test]
    fn test_load_state_rejects_other_grid() {
        let mut env = SnakeEnvironment::with_seed(GameConfig::small(), 3).unwrap();
        let before = env.state().clone();

        let foreign = GameState::new(
            Snake::new(Position::new(15, 15), Direction::Right),
            Position::new(16, 15),
            20,
        );

        assert!(matches!(
            env.load_state(foreign),
            Err(EnvError::InvalidState(_))
        ));
        assert_eq!(env.state(), &before);

        // Stepping still plays on the original 6x6 episode
        let t = env.step(before.snake.direction.index()).unwrap();
        assert!(!t.terminated);
        assert_eq!(env.state().grid_size, 6);
        assert_eq!(
            env.state().snake.head(),
            before.snake.head().moved_in_direction(before.snake.direction)
        );
    }

    #[test]
    fn test_load_state_rejects_broken_states() {
        let mut env = env();
        let before = env.state().clone();

        let food_on_head = GameState::new(
            Snake::new(Position::new(6, 6), Direction::Right),
            Position::new(6, 6),
            12,
        );
        let segment_off_grid = GameState::new(
            Snake::from_segments(
                vec![Position::new(0, 3), Position::new(-1, 3)],
                Direction::Right,
            )
            .unwrap(),
            Position::new(8, 8),
            12,
        );
        let food_off_grid = GameState::new(
            Snake::new(Position::new(6, 6), Direction::Right),
            Position::new(3, 12),
            12,
        );
        let mut over_target = GameState::new(
            Snake::from_segments(
                vec![Position::new(6, 6), Position::new(5, 6), Position::new(4, 6)],
                Direction::Right,
            )
            .unwrap(),
            Position::new(8, 8),
            12,
        );
        over_target.snake.target_length = 2;

        for state in [food_on_head, segment_off_grid, food_off_grid, over_target] {
            assert!(
                matches!(env.load_state(state), Err(EnvError::InvalidState(_))),
                "state was accepted"
            );
            assert_eq!(env.state(), &before);
        }
    }

    #[test]
    fn test_multiple_episodes() {
        let mut env = env();

        for episode in 0..3 {
            env.reset(Some(episode));
            let mut steps = 0;
            let mut done = false;

            while !done && steps < 100 {
                // Always request UP: a lone snake runs into the top wall
                done = env.step(2).unwrap().terminated;
                steps += 1;
            }

            assert!(done);
            assert!(steps <= 7);
        }
    }
}
