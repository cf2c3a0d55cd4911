use super::environment::{Environment, Transition};
use super::info::Info;
use crate::game::EnvError;

/// Truncates episodes after a fixed number of steps
///
/// The wrapped environment never truncates on its own. Once `max_steps`
/// steps have been taken without termination, `truncated` is reported on
/// every further step until the next reset.
#[derive(Debug, Clone)]
pub struct TimeLimit<E> {
    inner: E,
    max_steps: usize,
    elapsed: usize,
}

impl<E: Environment> TimeLimit<E> {
    pub fn new(inner: E, max_steps: usize) -> Self {
        Self {
            inner,
            max_steps,
            elapsed: 0,
        }
    }

    pub fn elapsed_steps(&self) -> usize {
        self.elapsed
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Environment> Environment for TimeLimit<E> {
    type Observation = E::Observation;

    fn reset(&mut self, seed: Option<u64>) -> (E::Observation, Info) {
        self.elapsed = 0;
        self.inner.reset(seed)
    }

    fn step(&mut self, action: usize) -> Result<Transition<E::Observation>, EnvError> {
        let mut transition = self.inner.step(action)?;
        self.elapsed += 1;

        if transition.terminated {
            self.elapsed = 0;
        } else if self.elapsed >= self.max_steps {
            transition.truncated = true;
        }

        Ok(transition)
    }

    fn action_space(&self) -> usize {
        self.inner.action_space()
    }

    fn observation_size(&self) -> usize {
        self.inner.observation_size()
    }
}
