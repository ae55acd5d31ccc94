use glam::IVec2;
use log::debug;

use super::buffer::ColorBuffer;
use super::coords::PlacementRect;
use super::error::{SurfaceError, SurfaceResult};

/// Named surface with its placement in the composition
#[derive(Debug, Clone)]
pub struct SurfaceEntry {
    id: String,
    placement: PlacementRect,
    buffer: ColorBuffer,
}

impl SurfaceEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn placement(&self) -> PlacementRect {
        self.placement
    }

    pub fn buffer(&self) -> &ColorBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ColorBuffer {
        &mut self.buffer
    }
}

/// Ordered set of surfaces keyed by identifier.
///
/// Lookups are linear; a wall holds a handful of screens and the listing
/// order must match insertion order.
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    entries: Vec<SurfaceEntry>,
}

impl SurfaceRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface with a black buffer sized to its placement
    pub fn add(&mut self, id: impl Into<String>, placement: PlacementRect) -> SurfaceResult<&mut SurfaceEntry> {
        let id = id.into();
        if self.index_of(&id).is_some() {
            return Err(SurfaceError::DuplicateIdentifier(id));
        }

        let buffer = ColorBuffer::new(placement.width, placement.height)?;
        debug!(
            "surface '{}' added at ({}, {}) size {}x{}",
            id, placement.x, placement.y, placement.width, placement.height
        );

        self.entries.push(SurfaceEntry { id, placement, buffer });
        let last = self.entries.len() - 1;
        Ok(&mut self.entries[last])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|entry| entry.id.as_str())
    }

    pub fn entry(&self, id: &str) -> SurfaceResult<&SurfaceEntry> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| SurfaceError::NotFound(id.to_string()))
    }

    pub fn entry_mut(&mut self, id: &str) -> SurfaceResult<&mut SurfaceEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| SurfaceError::NotFound(id.to_string()))
    }

    /// Buffer of the named surface
    pub fn get(&self, id: &str) -> SurfaceResult<&ColorBuffer> {
        self.entry(id).map(SurfaceEntry::buffer)
    }

    pub fn get_mut(&mut self, id: &str) -> SurfaceResult<&mut ColorBuffer> {
        self.entry_mut(id).map(SurfaceEntry::buffer_mut)
    }

    /// Move a surface; its size never changes
    pub fn update_placement(&mut self, id: &str, position: IVec2) -> SurfaceResult<PlacementRect> {
        let entry = self.entry_mut(id)?;
        entry.placement = entry.placement.with_position(position);
        Ok(entry.placement)
    }

    /// (id, placement) pairs in insertion order. The iterator can be cloned
    /// to walk the list again.
    pub fn list(&self) -> impl Iterator<Item = (&str, PlacementRect)> + Clone + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.id.as_str(), entry.placement))
    }

    /// Entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, SurfaceEntry> {
        self.entries.iter()
    }

    /// Drop a surface and its buffer
    pub fn remove(&mut self, id: &str) -> SurfaceResult<SurfaceEntry> {
        let index = self
            .index_of(id)
            .ok_or_else(|| SurfaceError::NotFound(id.to_string()))?;
        debug!("surface '{}' removed", id);
        Ok(self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
