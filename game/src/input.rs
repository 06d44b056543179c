use winit::event::VirtualKeyCode;

use crate::grid_core::MoveDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Move(MoveDir),
    NewGame,
}

pub fn map_key_to_event(key: VirtualKeyCode) -> Option<InputEvent> {
    match key {
        VirtualKeyCode::Left => Some(InputEvent::Move(MoveDir::Left)),
        VirtualKeyCode::Right => Some(InputEvent::Move(MoveDir::Right)),
        VirtualKeyCode::Up => Some(InputEvent::Move(MoveDir::Up)),
        VirtualKeyCode::Down => Some(InputEvent::Move(MoveDir::Down)),
        VirtualKeyCode::N | VirtualKeyCode::Return => Some(InputEvent::NewGame),
        _ => None,
    }
}

/// Turns a press/release pair into at most one directional move.
///
/// The dominant displacement axis wins; exact ties go to the horizontal
/// axis. A release with zero displacement is a tap, not a swipe, and emits
/// nothing.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    origin: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub fn on_press(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
    }

    pub fn on_release(&mut self, x: f64, y: f64) -> Option<MoveDir> {
        let (ox, oy) = self.origin.take()?;
        let dx = x - ox;
        let dy = y - oy;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                MoveDir::Right
            } else {
                MoveDir::Left
            }
        } else if dy > 0.0 {
            MoveDir::Down
        } else {
            MoveDir::Up
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(dx: f64, dy: f64) -> Option<MoveDir> {
        let mut tracker = SwipeTracker::default();
        tracker.on_press(100.0, 100.0);
        tracker.on_release(100.0 + dx, 100.0 + dy)
    }

    #[test]
    fn dominant_axis_wins() {
        assert_eq!(swipe(40.0, 10.0), Some(MoveDir::Right));
        assert_eq!(swipe(-40.0, 10.0), Some(MoveDir::Left));
        assert_eq!(swipe(5.0, 40.0), Some(MoveDir::Down));
        assert_eq!(swipe(5.0, -40.0), Some(MoveDir::Up));
    }

    #[test]
    fn diagonal_ties_break_horizontal() {
        assert_eq!(swipe(30.0, 30.0), Some(MoveDir::Right));
        assert_eq!(swipe(-30.0, -30.0), Some(MoveDir::Left));
    }

    #[test]
    fn taps_emit_nothing() {
        assert_eq!(swipe(0.0, 0.0), None);
    }

    #[test]
    fn release_without_press_emits_nothing() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.on_release(50.0, 50.0), None);
    }

    #[test]
    fn keyboard_mapping_covers_arrows_and_restart() {
        assert_eq!(
            map_key_to_event(VirtualKeyCode::Left),
            Some(InputEvent::Move(MoveDir::Left))
        );
        assert_eq!(map_key_to_event(VirtualKeyCode::N), Some(InputEvent::NewGame));
        assert_eq!(map_key_to_event(VirtualKeyCode::A), None);
    }
}
