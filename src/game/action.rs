use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the unit delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Interprets a raw delta pair as a heading.
    ///
    /// Only the signs matter, so both `(20, 0)` and `(1, 0)` are `Right`.
    /// Zero and diagonal deltas are not headings.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Validates a heading change against the heading the snake is travelling in.
///
/// A reversal would put the head straight into the neck, so it is dropped and
/// the current heading is kept. Perpendicular turns and repeats pass through.
pub fn request_heading(candidate: Direction, current: Direction) -> Direction {
    if current.is_opposite(candidate) {
        current
    } else {
        candidate
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
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_request_heading_rejects_only_reversals() {
        let mut rejected = 0;
        for current in Direction::ALL {
            for candidate in Direction::ALL {
                let result = request_heading(candidate, current);
                if current.is_opposite(candidate) {
                    assert_eq!(result, current);
                    rejected += 1;
                } else {
                    assert_eq!(result, candidate);
                }
            }
        }
        assert_eq!(rejected, 4);
    }

    #[test]
    fn test_request_heading_accepts_repeat() {
        assert_eq!(
            request_heading(Direction::Right, Direction::Right),
            Direction::Right
        );
    }

    #[test]
    fn test_from_delta() {
        assert_eq!(Direction::from_delta(20, 0), Some(Direction::Right));
        assert_eq!(Direction::from_delta(-20, 0), Some(Direction::Left));
        assert_eq!(Direction::from_delta(0, -1), Some(Direction::Up));
        assert_eq!(Direction::from_delta(0, 7), Some(Direction::Down));

        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(20, 20), None);
        assert_eq!(Direction::from_delta(-1, 1), None);
    }

    #[test]
    fn test_from_delta_matches_delta() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }
    }
}
