use anyhow::Result;
use log::{debug, info, warn};

use super::buffer::ColorBuffer;
use super::color::Color;
use super::coords::PlacementRect;
use super::error::{SurfaceError, SurfaceResult};
use super::input::{InputEvent, InputQueue};
use super::registry::SurfaceRegistry;

/// Receives surfaces whose placement changed so they can be persisted
pub trait PlacementSink {
    fn persist(&mut self, id: &str, placement: PlacementRect) -> Result<()>;
}

/// Collects moves in memory
impl PlacementSink for Vec<(String, PlacementRect)> {
    fn persist(&mut self, id: &str, placement: PlacementRect) -> Result<()> {
        self.push((id.to_string(), placement));
        Ok(())
    }
}

/// What happened during one tick
#[derive(Debug, Default)]
pub struct TickReport {
    /// Number of events drained
    pub processed: usize,
    /// Final placement of every surface that moved, in order of first move
    pub moved: Vec<(String, PlacementRect)>,
    /// Events that could not be applied, with the reason
    pub rejected: Vec<(InputEvent, SurfaceError)>,
}

/// Operator state: which surface is targeted and which color paints
#[derive(Debug)]
pub struct Session {
    registry: SurfaceRegistry,
    selected: Option<String>,
    color: Color,
}

impl Session {
    /// Start a session with the first surface selected and white paint
    pub fn new(registry: SurfaceRegistry) -> Self {
        let selected = registry.id_at(0).map(str::to_string);
        Self {
            registry,
            selected,
            color: Color::WHITE,
        }
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SurfaceRegistry {
        &mut self.registry
    }

    pub fn into_registry(self) -> SurfaceRegistry {
        self.registry
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Current paint color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Drain the queue and apply every event in arrival order.
    ///
    /// Rejected events are reported and the tick carries on. Moved surfaces
    /// are handed to `sink` once each, after all events ran; a sink failure
    /// aborts the tick.
    pub fn tick(&mut self, queue: &mut InputQueue, sink: &mut dyn PlacementSink) -> Result<TickReport> {
        let mut report = TickReport::default();

        for event in queue.drain() {
            report.processed += 1;

            match self.apply(&event) {
                Ok(Some((id, placement))) => {
                    match report.moved.iter_mut().find(|(moved, _)| *moved == id) {
                        Some(slot) => slot.1 = placement,
                        None => report.moved.push((id, placement)),
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    warn!("rejected {:?}: {}", event, err);
                    report.rejected.push((event, err));
                }
            }
        }

        for (id, placement) in &report.moved {
            info!("surface '{}' moved to ({}, {})", id, placement.x, placement.y);
            sink.persist(id, *placement)?;
        }

        Ok(report)
    }

    /// Apply one event; returns the new placement when a surface moved
    pub fn apply(&mut self, event: &InputEvent) -> SurfaceResult<Option<(String, PlacementRect)>> {
        match event {
            InputEvent::Select { id } => {
                self.registry.entry(id)?;
                self.select(id.clone());
            }
            InputEvent::SelectIndex { index } => {
                let id = self
                    .registry
                    .id_at(*index)
                    .ok_or_else(|| SurfaceError::NotFound(format!("#{}", index)))?
                    .to_string();
                self.select(id);
            }
            InputEvent::Nudge { direction } => {
                let id = self.selected.clone().ok_or(SurfaceError::NoSelection)?;
                let moved = self
                    .registry
                    .entry(&id)?
                    .placement()
                    .offset(direction.delta())
                    .ok_or_else(|| SurfaceError::PositionOverflow(id.clone()))?;
                let placement = self.registry.update_placement(&id, moved.position())?;
                return Ok(Some((id, placement)));
            }
            InputEvent::PickColor { color } => self.color = *color,
            InputEvent::PickHsv { h, s, v } => self.color = Color::from_hsv(*h, *s, *v),
            InputEvent::SetPixel { x, y, color } => self.selected_buffer()?.set(*x, *y, *color)?,
            InputEvent::Paint { x, y } => {
                let color = self.color;
                self.selected_buffer()?.set(*x, *y, color)?;
            }
            InputEvent::Fill { color } => self.selected_buffer()?.fill(*color),
            InputEvent::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => self.selected_buffer()?.fill_rect(*x, *y, *width, *height, *color),
        }

        Ok(None)
    }

    fn select(&mut self, id: String) {
        debug!("selected surface '{}'", id);
        self.selected = Some(id);
    }

    fn selected_buffer(&mut self) -> SurfaceResult<&mut ColorBuffer> {
        let id = self.selected.as_deref().ok_or(SurfaceError::NoSelection)?;
        self.registry.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Direction;

    fn session() -> Session {
        let mut registry = SurfaceRegistry::new();
        registry.add("left", PlacementRect::new(0, 0, 4, 4)).unwrap();
        registry.add("right", PlacementRect::new(10, 0, 4, 4)).unwrap();
        Session::new(registry)
    }

    #[test]
    fn starts_with_first_surface_selected() {
        let session = session();
        assert_eq!(session.selected(), Some("left"));
        assert_eq!(session.color(), Color::WHITE);
    }

    #[test]
    fn empty_registry_has_no_selection() {
        let mut session = Session::new(SurfaceRegistry::new());
        let err = session
            .apply(&InputEvent::Nudge { direction: Direction::Left })
            .unwrap_err();
        assert_eq!(err, SurfaceError::NoSelection);
    }

    #[test]
    fn select_unknown_keeps_previous() {
        let mut session = session();
        let err = session
            .apply(&InputEvent::Select { id: "nope".into() })
            .unwrap_err();

        assert_eq!(err, SurfaceError::NotFound("nope".into()));
        assert_eq!(session.selected(), Some("left"));
    }

    #[test]
    fn select_index_out_of_range() {
        let mut session = session();
        let err = session.apply(&InputEvent::SelectIndex { index: 5 }).unwrap_err();
        assert_eq!(err, SurfaceError::NotFound("#5".into()));
    }

    #[test]
    fn repeated_moves_persist_once() {
        let mut session = session();
        let mut queue = InputQueue::default();
        let mut sink: Vec<(String, PlacementRect)> = Vec::new();

        queue.push(InputEvent::Nudge { direction: Direction::Right }).unwrap();
        queue.push(InputEvent::Nudge { direction: Direction::Right }).unwrap();
        queue.push(InputEvent::Nudge { direction: Direction::Down }).unwrap();

        let report = session.tick(&mut queue, &mut sink).unwrap();

        assert_eq!(report.processed, 3);
        assert_eq!(sink, vec![("left".to_string(), PlacementRect::new(2, 1, 4, 4))]);
        assert_eq!(report.moved, sink);
    }

    #[test]
    fn nudge_past_i32_edge_is_rejected() {
        let mut registry = SurfaceRegistry::new();
        registry.add("edge", PlacementRect::new(i32::MAX, 0, 2, 2)).unwrap();
        let mut session = Session::new(registry);
        let mut queue = InputQueue::default();
        let mut sink: Vec<(String, PlacementRect)> = Vec::new();

        queue.push(InputEvent::Nudge { direction: Direction::Right }).unwrap();
        queue.push(InputEvent::Nudge { direction: Direction::Left }).unwrap();

        let report = session.tick(&mut queue, &mut sink).unwrap();

        assert_eq!(
            report.rejected,
            vec![(
                InputEvent::Nudge { direction: Direction::Right },
                SurfaceError::PositionOverflow("edge".into())
            )]
        );
        assert_eq!(sink, vec![("edge".to_string(), PlacementRect::new(i32::MAX - 1, 0, 2, 2))]);
    }
}
