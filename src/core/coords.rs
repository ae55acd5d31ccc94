use glam::IVec2;

/// Map a logical (top-left origin) row to the buffer's storage row
/// (bottom-left origin). Applying it twice returns the original row.
#[inline]
pub fn to_storage_y(logical_y: i32, height: u32) -> i32 {
    height as i32 - 1 - logical_y
}

/// Position and size of a surface inside its parent composition,
/// in logical top-left-origin units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PlacementRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Same size, moved to `position`
    pub fn with_position(self, position: IVec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }

    /// Same size, moved by `delta`; None if the position would leave the i32 range
    pub fn offset(self, delta: IVec2) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(delta.x)?,
            y: self.y.checked_add(delta.y)?,
            ..self
        })
    }

    /// Exclusive bottom-right corner, saturating at the i32 range
    pub fn max(&self) -> IVec2 {
        IVec2::new(
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        )
    }
}
