use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::grid::Direction;

/// Filters a requested turn against the direction the snake last moved in.
///
/// A full reversal would drive the head straight into the neck, so it is
/// dropped. Everything else, including repeating the current heading, passes.
pub fn propose_direction(active: Direction, requested: Direction) -> Option<Direction> {
    if requested == active.opposite() {
        None
    } else {
        Some(requested)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Restart,
    /// Restart, but only from the game over overlay
    PlayAgain,
    Quit,
    None,
}

pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            KeyAction::Steer(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            KeyAction::Steer(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            KeyAction::Steer(Direction::Right)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
        KeyCode::Char(' ') | KeyCode::Enter => KeyAction::PlayAgain,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

/// Turns a press/release pair into a direction, the way a touch swipe does.
#[derive(Debug)]
pub struct SwipeTracker {
    threshold: i32,
    start: Option<(i32, i32)>,
}

impl SwipeTracker {
    pub fn new(threshold: u16) -> Self {
        SwipeTracker {
            threshold: threshold as i32,
            start: None,
        }
    }

    pub fn begin(&mut self, x: i32, y: i32) {
        self.start = Some((x, y));
    }

    /// Movement between begin and end carries no direction of its own.
    pub fn track(&mut self, _x: i32, _y: i32) {}

    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Finishes the gesture and classifies it.
    ///
    /// The axis with the larger displacement wins, with ties going to the
    /// vertical axis. The winning displacement must exceed the threshold.
    pub fn end(&mut self, x: i32, y: i32) -> Option<Direction> {
        let (start_x, start_y) = self.start.take()?;
        swipe_direction(x - start_x, y - start_y, self.threshold)
    }
}

pub fn swipe_direction(dx: i32, dy: i32, threshold: i32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx > threshold {
            Some(Direction::Right)
        } else if dx < -threshold {
            Some(Direction::Left)
        } else {
            None
        }
    } else if dy > threshold {
        Some(Direction::Down)
    } else if dy < -threshold {
        Some(Direction::Up)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_reversal_is_rejected() {
        for active in Direction::ALL {
            assert_eq!(propose_direction(active, active.opposite()), None);

            let accepted: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&dir| propose_direction(active, dir).is_some())
                .collect();
            assert_eq!(accepted.len(), 3, "from {:?}", active);
            assert!(!accepted.contains(&active.opposite()));
        }
    }

    #[test]
    fn test_arrow_keys_and_wasd() {
        assert_eq!(map_key(press(KeyCode::Up)), KeyAction::Steer(Direction::Up));
        assert_eq!(map_key(press(KeyCode::Char('s'))), KeyAction::Steer(Direction::Down));
        assert_eq!(map_key(press(KeyCode::Char('A'))), KeyAction::Steer(Direction::Left));
        assert_eq!(map_key(press(KeyCode::Right)), KeyAction::Steer(Direction::Right));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(map_key(press(KeyCode::Char('r'))), KeyAction::Restart);
        assert_eq!(map_key(press(KeyCode::Char(' '))), KeyAction::PlayAgain);
        assert_eq!(map_key(press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(map_key(press(KeyCode::Tab)), KeyAction::None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = press(KeyCode::Up);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), KeyAction::None);
    }

    #[test]
    fn test_swipe_axes() {
        assert_eq!(swipe_direction(30, 5, 10), Some(Direction::Right));
        assert_eq!(swipe_direction(-30, 5, 10), Some(Direction::Left));
        assert_eq!(swipe_direction(4, 25, 10), Some(Direction::Down));
        assert_eq!(swipe_direction(4, -25, 10), Some(Direction::Up));
    }

    #[test]
    fn test_swipe_threshold_is_strict() {
        assert_eq!(swipe_direction(10, 0, 10), None);
        assert_eq!(swipe_direction(11, 0, 10), Some(Direction::Right));
        assert_eq!(swipe_direction(0, -10, 10), None);
        assert_eq!(swipe_direction(0, -11, 10), Some(Direction::Up));
    }

    #[test]
    fn test_swipe_tie_goes_vertical() {
        assert_eq!(swipe_direction(20, 20, 10), Some(Direction::Down));
        assert_eq!(swipe_direction(-20, -20, 10), Some(Direction::Up));
    }

    #[test]
    fn test_short_dominant_axis_ignored() {
        // Horizontal wins but is below threshold; the vertical part is not consulted.
        assert_eq!(swipe_direction(8, 3, 10), None);
    }

    #[test]
    fn test_tracker_needs_a_start() {
        let mut swipe = SwipeTracker::new(10);
        assert_eq!(swipe.end(50, 0), None);

        swipe.begin(0, 0);
        swipe.track(5, 5);
        assert_eq!(swipe.end(40, 2), Some(Direction::Right));

        // Start is consumed by the previous end.
        assert_eq!(swipe.end(80, 2), None);

        swipe.begin(0, 0);
        swipe.cancel();
        assert_eq!(swipe.end(0, 40), None);
    }
}
