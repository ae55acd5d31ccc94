use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

use super::color::Color;

/// Nudge direction in logical space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// One-unit position delta
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
        }
    }
}

/// Discrete operator request, applied by the session on its next tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Make the named surface the target of later events
    Select { id: String },
    /// Select by listing position
    SelectIndex { index: usize },
    /// Move the selected surface one unit
    Nudge { direction: Direction },
    /// Set the paint color
    PickColor { color: Color },
    /// Set the paint color from hue/saturation/value in [0, 1]
    PickHsv { h: f32, s: f32, v: f32 },
    /// Write one pixel of the selected surface
    SetPixel { x: i32, y: i32, color: Color },
    /// Write one pixel with the paint color
    Paint { x: i32, y: i32 },
    /// Fill the selected surface
    Fill { color: Color },
    /// Fill a rectangle of the selected surface, clipped to its bounds
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("input queue is full ({capacity} events)")]
pub struct QueueFull {
    pub capacity: usize,
    /// The event that was turned away
    pub event: InputEvent,
}

/// Bounded FIFO of input events
#[derive(Debug, Clone)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
    capacity: usize,
}

impl InputQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an event, or hand it back when the queue is full
    pub fn push(&mut self, event: InputEvent) -> Result<(), QueueFull> {
        if self.events.len() >= self.capacity {
            return Err(QueueFull {
                capacity: self.capacity,
                event,
            });
        }
        self.events.push_back(event);
        Ok(())
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, InputEvent> {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::Left.delta(), IVec2::new(-1, 0));
        assert_eq!(Direction::Right.delta(), IVec2::new(1, 0));
        assert_eq!(Direction::Up.delta(), IVec2::new(0, -1));
        assert_eq!(Direction::Down.delta(), IVec2::new(0, 1));
    }

    #[test]
    fn test_queue_drains_in_arrival_order() {
        let mut queue = InputQueue::with_capacity(4);
        queue.push(InputEvent::Nudge { direction: Direction::Left }).unwrap();
        queue.push(InputEvent::Paint { x: 1, y: 2 }).unwrap();

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                InputEvent::Nudge { direction: Direction::Left },
                InputEvent::Paint { x: 1, y: 2 },
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_rejects_when_full() {
        let mut queue = InputQueue::with_capacity(1);
        queue.push(InputEvent::Fill { color: Color::RED }).unwrap();

        let err = queue.push(InputEvent::Fill { color: Color::BLUE }).unwrap_err();
        assert_eq!(err.capacity, 1);
        assert_eq!(err.event, InputEvent::Fill { color: Color::BLUE });
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{"type":"nudge","direction":"up"}"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, InputEvent::Nudge { direction: Direction::Up });

        let json = r#"{"type":"set_pixel","x":3,"y":4,"color":{"r":1,"g":2,"b":3,"a":255}}"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            InputEvent::SetPixel { x: 3, y: 4, color: Color::rgb(1, 2, 3) }
        );
    }
}
