use super::error::EnvError;

/// Number of discrete actions a controller can choose from
pub const ACTION_SPACE_SIZE: usize = 4;

/// Absolute heading of the snake on the grid
///
/// The declaration order doubles as the action index order and the
/// one-hot order of the observation: LEFT, RIGHT, UP, DOWN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Absolute ordering used by action indices and the heading one-hot
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    ///
    /// The y axis grows downwards, so UP decreases y.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Position of this direction in [`Direction::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// Heading reached by applying a relative turn to this one
    pub fn turned(&self, turn: Turn) -> Direction {
        turn.apply(*self)
    }
}

/// A turn relative to the current heading
///
/// Turns walk the clockwise cycle UP -> RIGHT -> DOWN -> LEFT, which is
/// independent of the absolute [`Direction::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Straight,
    Right,
    Left,
}

impl Turn {
    /// Clockwise heading cycle used for relative sensing
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Sensing order of the observation's danger components
    pub const SENSING_ORDER: [Turn; 3] = [Turn::Straight, Turn::Right, Turn::Left];

    pub fn apply(&self, heading: Direction) -> Direction {
        let idx = Self::cycle_position(heading);
        let next = match self {
            Turn::Straight => idx,
            Turn::Right => (idx + 1) % 4,
            Turn::Left => (idx + 3) % 4,
        };
        Self::CLOCKWISE[next]
    }

    fn cycle_position(heading: Direction) -> usize {
        match heading {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }
}

/// A validated controller action
///
/// Wraps the requested absolute heading. Built from a raw index with
/// [`Action::from_index`], which rejects anything outside `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action(Direction);

impl Action {
    /// Map an action index onto LEFT, RIGHT, UP, DOWN
    pub fn from_index(index: usize) -> Result<Self, EnvError> {
        Direction::ALL
            .get(index)
            .copied()
            .map(Action)
            .ok_or(EnvError::InvalidAction { action: index })
    }

    pub fn index(&self) -> usize {
        self.0.index()
    }

    pub fn direction(&self) -> Direction {
        self.0
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action(direction)
    }
}

impl TryFrom<usize> for Action {
    type Error = EnvError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Action::from_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_action_mapping() {
        assert_eq!(Action::from_index(0).unwrap().direction(), Direction::Left);
        assert_eq!(Action::from_index(1).unwrap().direction(), Direction::Right);
        assert_eq!(Action::from_index(2).unwrap().direction(), Direction::Up);
        assert_eq!(Action::from_index(3).unwrap().direction(), Direction::Down);
    }

    #[test]
    fn test_invalid_action_is_rejected() {
        assert!(matches!(
            Action::from_index(4),
            Err(EnvError::InvalidAction { action: 4 })
        ));
        assert!(Action::try_from(usize::MAX).is_err());
    }

    #[test]
    fn test_index_round_trips_through_all() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }

    #[test]
    fn test_turns_follow_clockwise_cycle() {
        assert_eq!(Direction::Up.turned(Turn::Right), Direction::Right);
        assert_eq!(Direction::Right.turned(Turn::Right), Direction::Down);
        assert_eq!(Direction::Down.turned(Turn::Right), Direction::Left);
        assert_eq!(Direction::Left.turned(Turn::Right), Direction::Up);

        assert_eq!(Direction::Up.turned(Turn::Left), Direction::Left);
        assert_eq!(Direction::Left.turned(Turn::Left), Direction::Down);
        assert_eq!(Direction::Down.turned(Turn::Left), Direction::Right);
        assert_eq!(Direction::Right.turned(Turn::Left), Direction::Up);

        for dir in Direction::ALL {
            assert_eq!(dir.turned(Turn::Straight), dir);
        }
    }

    #[test]
    fn test_relative_turns_never_reverse() {
        for dir in Direction::ALL {
            for turn in Turn::SENSING_ORDER {
                assert!(!dir.turned(turn).is_opposite(dir));
            }
        }
    }
}
