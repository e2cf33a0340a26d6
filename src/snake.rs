use std::collections::VecDeque;

use crate::grid::{Direction, Pos};

/// The snake's body, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Pos>,
}

impl Snake {
    /// Lays out `length` segments in a straight line, head at `head` and the
    /// rest trailing behind it, opposite to `heading`.
    pub fn new(head: Pos, heading: Direction, length: u16) -> Self {
        let behind = heading.opposite();
        let mut body = VecDeque::with_capacity(length as usize);
        let mut segment = head;
        for _ in 0..length.max(1) {
            body.push_back(segment);
            segment = segment.step(behind);
        }
        Snake { body }
    }

    /// Builds a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty slice since a live snake always has a head.
    pub fn from_segments(segments: &[Pos]) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Snake {
            body: segments.iter().copied().collect(),
        })
    }

    pub fn head(&self) -> Pos {
        self.body[0]
    }

    pub fn tail(&self) -> Pos {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Pos> + '_ {
        self.body.iter().copied()
    }

    /// True if any segment, tail included, sits on `pos`.
    pub fn occupies(&self, pos: Pos) -> bool {
        self.body.contains(&pos)
    }

    pub(crate) fn push_head(&mut self, pos: Pos) {
        self.body.push_front(pos);
    }

    pub(crate) fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(snake: &Snake) -> Vec<Pos> {
        snake.segments().collect()
    }

    #[test]
    fn test_new_snek_trails_behind_head() {
        let snake = Snake::new(Pos::new(10, 10), Direction::Right, 3);

        assert_eq!(
            segments(&snake),
            vec![Pos::new(10, 10), Pos::new(9, 10), Pos::new(8, 10)]
        );
        assert_eq!(snake.head(), Pos::new(10, 10));
        assert_eq!(snake.tail(), Pos::new(8, 10));
    }

    #[test]
    fn test_new_snek_heading_up() {
        let snake = Snake::new(Pos::new(4, 4), Direction::Up, 2);
        assert_eq!(segments(&snake), vec![Pos::new(4, 4), Pos::new(4, 5)]);
    }

    #[test]
    fn test_new_snek_has_at_least_a_head() {
        let snake = Snake::new(Pos::new(1, 1), Direction::Left, 0);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_from_segments() {
        assert!(Snake::from_segments(&[]).is_none());

        let snake = Snake::from_segments(&[Pos::new(0, 10), Pos::new(1, 10)]).unwrap();
        assert_eq!(snake.head(), Pos::new(0, 10));
        assert_eq!(snake.tail(), Pos::new(1, 10));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::from_segments(&[
            Pos::new(5, 5),
            Pos::new(5, 6),
            Pos::new(5, 7),
            Pos::new(6, 7),
        ])
        .unwrap();

        assert!(snake.occupies(Pos::new(5, 5))); // head
        assert!(snake.occupies(Pos::new(5, 6)));
        assert!(snake.occupies(Pos::new(6, 7))); // tail
        assert!(!snake.occupies(Pos::new(4, 6))); // adjacent
    }

    #[test]
    fn test_push_head_and_drop_tail() {
        let mut snake = Snake::new(Pos::new(10, 10), Direction::Right, 3);

        snake.push_head(Pos::new(11, 10));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Pos::new(11, 10));

        snake.drop_tail();
        assert_eq!(
            segments(&snake),
            vec![Pos::new(11, 10), Pos::new(10, 10), Pos::new(9, 10)]
        );
    }

    #[test]
    fn test_drop_tail_never_removes_head() {
        let mut snake = Snake::new(Pos::new(3, 3), Direction::Right, 1);
        snake.drop_tail();
        assert_eq!(snake.len(), 1);
    }
}
