//! Feature-vector observation of the game state
//!
//! Layout (9 components, each -1, 0 or 1):
//! - 0..3: danger straight / right / left, relative to the heading
//! - 3..5: food x / y signal (sign of food minus head)
//! - 5..9: heading one-hot over LEFT, RIGHT, UP, DOWN

use crate::game::{Direction, GameState, Turn};

/// Number of components in an observation
pub const OBSERVATION_SIZE: usize = 9;

/// Lower and upper bound of every observation component
pub const OBSERVATION_BOUNDS: (f32, f32) = (-1.0, 1.0);

const DANGER_OFFSET: usize = 0;
const FOOD_OFFSET: usize = 3;
const HEADING_OFFSET: usize = 5;

/// Observation vector handed to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation([f32; OBSERVATION_SIZE]);

impl Observation {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.0.to_vec()
    }

    /// Danger flag for a relative turn
    pub fn danger(&self, turn: Turn) -> bool {
        let idx = match turn {
            Turn::Straight => 0,
            Turn::Right => 1,
            Turn::Left => 2,
        };
        self.0[DANGER_OFFSET + idx] == 1.0
    }

    /// Food direction as (x, y) signs
    pub fn food_signal(&self) -> (f32, f32) {
        (self.0[FOOD_OFFSET], self.0[FOOD_OFFSET + 1])
    }

    /// Heading decoded from the one-hot block
    pub fn heading(&self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|dir| self.0[HEADING_OFFSET + dir.index()] == 1.0)
    }
}

impl From<Observation> for [f32; OBSERVATION_SIZE] {
    fn from(obs: Observation) -> Self {
        obs.0
    }
}

impl AsRef<[f32]> for Observation {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// Create the 9-component observation from game state
pub fn create_observation(state: &GameState) -> Observation {
    let mut data = [0.0; OBSERVATION_SIZE];

    let heading = state.snake.direction;
    for (i, turn) in Turn::SENSING_ORDER.iter().enumerate() {
        if is_danger(state, heading.turned(*turn)) {
            data[DANGER_OFFSET + i] = 1.0;
        }
    }

    if let Some(food) = state.food {
        let head = state.snake.head();
        data[FOOD_OFFSET] = signum(food.x - head.x);
        data[FOOD_OFFSET + 1] = signum(food.y - head.y);
    }

    data[HEADING_OFFSET + heading.index()] = 1.0;

    Observation(data)
}

/// Whether the cell one step from the head in `direction` is lethal
fn is_danger(state: &GameState, direction: Direction) -> bool {
    let next = state.snake.head().moved_in_direction(direction);
    state.is_lethal(next)
}

fn signum(delta: i32) -> f32 {
    delta.signum() as f32
}
