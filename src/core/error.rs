use thiserror::Error;

/// Failures reported by buffers, the registry and the session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("invalid surface dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: i32, height: i32 },
    #[error("pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("surface '{0}' is already registered")]
    DuplicateIdentifier(String),
    #[error("no surface named '{0}'")]
    NotFound(String),
    #[error("no surface is selected")]
    NoSelection,
    #[error("surface '{0}' cannot move further: position would overflow")]
    PositionOverflow(String),
}

/// Result alias for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Diagnostic produced when a blit had to be clipped to fit its destination.
/// Not an error: the overlapping region was still copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMismatch {
    /// Source dimensions (width, height)
    pub source: (u32, u32),
    /// Destination dimensions (width, height)
    pub destination: (u32, u32),
    /// Requested logical offset in the destination
    pub offset: (i32, i32),
    /// Size of the region that was actually copied
    pub copied: (u32, u32),
}

impl std::fmt::Display for SizeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "source {}x{} at ({}, {}) exceeds destination {}x{}; copied {}x{}",
            self.source.0,
            self.source.1,
            self.offset.0,
            self.offset.1,
            self.destination.0,
            self.destination.1,
            self.copied.0,
            self.copied.1,
        )
    }
}
