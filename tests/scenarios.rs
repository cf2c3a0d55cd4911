use grid_snake::game::{
    CollisionType, Direction, EnvError, EpisodeStatus, GameConfig, GameState, Position, Snake,
};
use grid_snake::rl::{Environment, SnakeEnvironment, TimeLimit};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn env_with(snake: Snake, food: Position) -> SnakeEnvironment {
    let mut env = SnakeEnvironment::with_seed(GameConfig::new(12), 17).unwrap();
    env.load_state(GameState::new(snake, food, 12)).unwrap();
    env
}

#[test]
fn moving_right_from_center() {
    let mut env = env_with(
        Snake::new(Position::new(6, 6), Direction::Right),
        Position::new(0, 11),
    );

    let t = env.step(1).unwrap();

    assert_eq!(env.state().snake.head(), Position::new(7, 6));
    assert_eq!(t.reward, 0.0);
    assert!(!t.terminated);
    assert!(!t.truncated);
}

#[test]
fn leaving_the_grid_terminates() {
    let mut env = env_with(
        Snake::new(Position::new(0, 6), Direction::Left),
        Position::new(8, 8),
    );

    let t = env.step(0).unwrap();

    assert!(t.terminated);
    assert_eq!(t.reward, -1.0);
    assert_eq!(env.state().snake.head(), Position::new(-1, 6));
    assert_eq!(env.status(), EpisodeStatus::Collided(CollisionType::Wall));
}

#[test]
fn eating_grows_and_respawns_food() {
    let mut env = env_with(
        Snake::new(Position::new(4, 4), Direction::Up),
        Position::new(5, 4),
    );

    let t = env.step(1).unwrap();

    assert_eq!(t.reward, 1.0);
    assert!(!t.terminated);
    assert_eq!(env.score(), 1);
    assert_eq!(env.state().snake.target_length, 2);
    let food = env.state().food.unwrap();
    assert!(!env.state().snake.occupies(food));
    assert!(env.state().is_in_bounds(food));
}

#[test]
fn loading_a_foreign_state_is_rejected() {
    let mut env = SnakeEnvironment::with_seed(GameConfig::small(), 17).unwrap();
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

    let mut food_on_head = GameState::new(
        Snake::new(Position::new(2, 2), Direction::Right),
        Position::new(0, 0),
        6,
    );
    food_on_head.food = Some(Position::new(2, 2));
    assert!(matches!(
        env.load_state(food_on_head),
        Err(EnvError::InvalidState(_))
    ));

    assert_eq!(env.state(), &before);
}

#[test]
fn reversal_is_ignored() {
    for dir in Direction::ALL {
        let mut env = env_with(Snake::new(Position::new(6, 6), dir), Position::new(0, 0));
        env.step(dir.opposite().index()).unwrap();

        assert_eq!(env.state().snake.direction, dir);
        assert_eq!(
            env.state().snake.head(),
            Position::new(6, 6).moved_in_direction(dir)
        );
    }
}

#[test]
fn out_of_range_actions_are_rejected() {
    let mut env = SnakeEnvironment::with_seed(GameConfig::default(), 1).unwrap();

    for action in [4, 5, 100, usize::MAX] {
        assert_eq!(env.step(action), Err(EnvError::InvalidAction { action }));
    }
    assert_eq!(env.state().steps, 0);
}

#[test]
fn seeded_resets_are_reproducible() {
    let mut a = SnakeEnvironment::with_seed(GameConfig::default(), 1).unwrap();
    let mut b = SnakeEnvironment::with_seed(GameConfig::default(), 2).unwrap();

    assert_eq!(a.reset(Some(99)), b.reset(Some(99)));
    assert_eq!(a.state(), b.state());

    for action in [0, 2, 2, 1, 3, 3, 0] {
        assert_eq!(a.step(action), b.step(action));
    }
}

/// Random play over many episodes, checking every tick against the rules
#[test]
fn random_play_respects_invariants() {
    let mut env = TimeLimit::new(
        SnakeEnvironment::with_seed(GameConfig::new(8), 5).unwrap(),
        400,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for episode in 0..50 {
        let (obs, info) = env.reset(Some(episode));
        assert!(info.is_empty());
        assert_eq!(obs.as_slice()[5..].iter().sum::<f32>(), 1.0);

        loop {
            let before = env.inner().state().clone();
            let action = rng.gen_range(0..4);
            let t = env.step(action).unwrap();
            let after = env.inner().state();

            assert!(!after.snake.direction.is_opposite(before.snake.direction));

            let obs = t.observation.as_slice();
            assert_eq!(obs.len(), 9);
            assert_eq!(obs[5..].iter().sum::<f32>(), 1.0);
            for &danger in &obs[..3] {
                assert!(danger == 0.0 || danger == 1.0);
            }
            for &value in obs {
                assert!((-1.0..=1.0).contains(&value));
            }

            if t.terminated {
                match after.status {
                    EpisodeStatus::Collided(_) => {
                        assert_eq!(t.reward, -1.0);
                        assert_eq!(after.snake.target_length, before.snake.target_length);
                        assert_eq!(after.score, before.score);
                        assert_eq!(after.food, before.food);
                    }
                    EpisodeStatus::Won => assert_eq!(t.reward, 1.0),
                    EpisodeStatus::Active => unreachable!("terminated while active"),
                }
                break;
            }

            for segment in &after.snake.body {
                assert!(after.is_in_bounds(*segment));
            }
            let food = after.food.unwrap();
            assert!(after.is_in_bounds(food));
            assert!(!after.snake.occupies(food));

            if t.reward == 1.0 {
                assert_eq!(after.snake.target_length, before.snake.target_length + 1);
                assert_eq!(after.score, before.score + 1);
            } else {
                assert_eq!(t.reward, 0.0);
                assert_eq!(after.snake.target_length, before.snake.target_length);
                assert_eq!(after.score, before.score);
            }

            if t.truncated {
                break;
            }
        }
    }
}
