//! Built-in controllers that choose actions from observations

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::game::{ACTION_SPACE_SIZE, Direction, Turn};
use crate::rl::Observation;

/// Anything that maps an observation to an action index
pub trait Controller {
    fn act(&mut self, observation: &Observation) -> usize;

    fn name(&self) -> &'static str;
}

/// Uniformly random actions
#[derive(Debug, Clone)]
pub struct RandomController {
    rng: ChaCha8Rng,
}

impl RandomController {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Controller for RandomController {
    fn act(&mut self, _observation: &Observation) -> usize {
        self.rng.gen_range(0..ACTION_SPACE_SIZE)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Heads for the food while avoiding cells flagged as dangerous
///
/// Only reads the observation, so it sees one cell ahead and can still
/// trap itself in its own body.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyController;

impl GreedyController {
    /// True if moving in `dir` closes the distance to the food
    fn approaches_food(dir: Direction, food: (f32, f32)) -> bool {
        let (dx, dy) = dir.delta();
        (dx != 0 && dx as f32 == food.0) || (dy != 0 && dy as f32 == food.1)
    }
}

impl Controller for GreedyController {
    fn act(&mut self, observation: &Observation) -> usize {
        let Some(heading) = observation.heading() else {
            return 0;
        };
        let food = observation.food_signal();

        let safe: Vec<Direction> = Turn::SENSING_ORDER
            .iter()
            .filter(|turn| !observation.danger(**turn))
            .map(|turn| heading.turned(*turn))
            .collect();

        let choice = safe
            .iter()
            .copied()
            .find(|dir| Self::approaches_food(*dir, food))
            .or_else(|| safe.first().copied())
            .unwrap_or(heading);

        choice.index()
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}
