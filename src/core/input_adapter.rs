use log::warn;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::input::{Direction, InputEvent, InputQueue};

/// Adapter that turns winit key presses into queued nudge events
#[derive(Debug, Clone, Copy, Default)]
pub struct WinitKeyboard;

impl WinitKeyboard {
    pub fn new() -> Self {
        Self
    }

    /// Process a winit WindowEvent, queueing a nudge for each fresh arrow press.
    /// Returns true if an event was queued.
    pub fn process_event(&self, event: &WindowEvent, queue: &mut InputQueue) -> bool {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return false;
        };

        if event.state != ElementState::Pressed {
            return false;
        }

        let PhysicalKey::Code(keycode) = event.physical_key else {
            return false;
        };

        self.key_down(keycode, event.repeat, queue)
    }

    /// Handle a key press already unpacked from winit.
    /// Returns true if an event was queued.
    pub fn key_down(&self, keycode: KeyCode, repeat: bool, queue: &mut InputQueue) -> bool {
        // Key-down edges only; held keys do not auto-repeat a nudge
        if repeat {
            return false;
        }

        match Self::keycode_to_event(keycode) {
            Some(input) => match queue.push(input) {
                Ok(()) => true,
                Err(full) => {
                    warn!("dropping key input: {}", full);
                    false
                }
            },
            None => false,
        }
    }

    /// Map a winit KeyCode to a nudge direction
    pub fn keycode_to_direction(keycode: KeyCode) -> Option<Direction> {
        match keycode {
            KeyCode::ArrowLeft => Some(Direction::Left),
            KeyCode::ArrowRight => Some(Direction::Right),
            KeyCode::ArrowUp => Some(Direction::Up),
            KeyCode::ArrowDown => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn keycode_to_event(keycode: KeyCode) -> Option<InputEvent> {
        Self::keycode_to_direction(keycode).map(|direction| InputEvent::Nudge { direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: winit KeyEvent has private fields, so tests enter through key_down

    #[test]
    fn test_arrow_keys_map_to_directions() {
        assert_eq!(WinitKeyboard::keycode_to_direction(KeyCode::ArrowLeft), Some(Direction::Left));
        assert_eq!(WinitKeyboard::keycode_to_direction(KeyCode::ArrowRight), Some(Direction::Right));
        assert_eq!(WinitKeyboard::keycode_to_direction(KeyCode::ArrowUp), Some(Direction::Up));
        assert_eq!(WinitKeyboard::keycode_to_direction(KeyCode::ArrowDown), Some(Direction::Down));
    }

    #[test]
    fn test_other_keys_ignored() {
        for key in [KeyCode::KeyW, KeyCode::Space, KeyCode::Escape, KeyCode::F5] {
            assert_eq!(WinitKeyboard::keycode_to_event(key), None);
        }
    }

    #[test]
    fn test_keycode_to_event() {
        assert_eq!(
            WinitKeyboard::keycode_to_event(KeyCode::ArrowUp),
            Some(InputEvent::Nudge { direction: Direction::Up })
        );
    }

    #[test]
    fn test_arrow_press_queues_nudge() {
        let keyboard = WinitKeyboard::new();
        let mut queue = InputQueue::with_capacity(4);

        assert!(keyboard.key_down(KeyCode::ArrowLeft, false, &mut queue));
        assert!(keyboard.key_down(KeyCode::ArrowDown, false, &mut queue));

        let queued: Vec<InputEvent> = queue.drain().collect();
        assert_eq!(
            queued,
            vec![
                InputEvent::Nudge { direction: Direction::Left },
                InputEvent::Nudge { direction: Direction::Down },
            ]
        );
    }

    #[test]
    fn test_repeats_and_other_keys_not_queued() {
        let keyboard = WinitKeyboard::new();
        let mut queue = InputQueue::with_capacity(4);

        assert!(!keyboard.key_down(KeyCode::ArrowRight, true, &mut queue));
        assert!(!keyboard.key_down(KeyCode::Space, false, &mut queue));
        assert!(queue.is_empty());
    }

    #[test_log::test]
    fn test_full_queue_drops_press() {
        let keyboard = WinitKeyboard::new();
        let mut queue = InputQueue::with_capacity(1);

        assert!(keyboard.key_down(KeyCode::ArrowUp, false, &mut queue));
        assert!(!keyboard.key_down(KeyCode::ArrowUp, false, &mut queue));
        assert_eq!(queue.len(), 1);
    }
}
