//! Terminal-condition checks on a settled snake.
//!
//! These run once per tick, after the head has moved and the tail has been
//! dropped or kept, so they see exactly what the player will see.

use super::state::Snake;

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Report the collision the snake is in, if any.
///
/// Self-collision wins when both apply, which can only happen on a snake
/// built by hand since a head outside the arena has no body to overlap.
pub fn detect(snake: &Snake, arena_size: i32, cell_size: i32) -> Option<CollisionType> {
    let head = snake.head();

    if snake.collides_with_body(head) {
        return Some(CollisionType::SelfCollision);
    }

    if !head.is_within_arena(arena_size, cell_size) {
        return Some(CollisionType::Wall);
    }

    None
}

/// True when the snake has run into a wall or into itself
pub fn is_terminal(snake: &Snake, arena_size: i32, cell_size: i32) -> bool {
    detect(snake, arena_size, cell_size).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position};

    fn snake_of(points: &[(i32, i32)]) -> Snake {
        Snake::from_segments(
            points.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            Direction::Right,
        )
    }

    #[test]
    fn test_clear_snake_is_not_terminal() {
        let snake = snake_of(&[(160, 200), (140, 200), (120, 200)]);
        assert_eq!(detect(&snake, 600, 20), None);
        assert!(!is_terminal(&snake, 600, 20));
    }

    #[test]
    fn test_left_wall() {
        let snake = snake_of(&[(-20, 200), (0, 200), (20, 200)]);
        assert_eq!(detect(&snake, 600, 20), Some(CollisionType::Wall));
        assert!(is_terminal(&snake, 600, 20));
    }

    #[test]
    fn test_every_wall() {
        for head in [(-20, 100), (600, 100), (100, -20), (100, 600)] {
            let snake = snake_of(&[head, (300, 300), (320, 300)]);
            assert!(is_terminal(&snake, 600, 20), "head {:?}", head);
        }
    }

    #[test]
    fn test_edges_are_inside() {
        for head in [(0, 0), (580, 0), (0, 580), (580, 580)] {
            let snake = snake_of(&[head, (300, 300), (320, 300)]);
            assert!(!is_terminal(&snake, 600, 20), "head {:?}", head);
        }
    }

    #[test]
    fn test_self_overlap() {
        let snake = snake_of(&[(100, 100), (120, 100), (100, 100)]);
        assert_eq!(detect(&snake, 600, 20), Some(CollisionType::SelfCollision));
        assert!(is_terminal(&snake, 600, 20));
    }

    #[test]
    fn test_body_overlap_without_head_is_ignored() {
        let snake = snake_of(&[(100, 100), (120, 100), (140, 100), (120, 100)]);
        assert!(!is_terminal(&snake, 600, 20));
    }
}
