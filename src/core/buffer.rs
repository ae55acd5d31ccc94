use log::warn;

use super::color::Color;
use super::coords::to_storage_y;
use super::error::{SizeMismatch, SurfaceError, SurfaceResult};

/// Outcome of copying one buffer into another
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blit {
    /// Every source pixel landed inside the destination
    Complete,
    /// Part of the source fell outside the destination and was dropped
    Clipped(SizeMismatch),
}

impl Blit {
    pub fn is_clipped(&self) -> bool {
        matches!(self, Blit::Clipped(_))
    }

    pub fn size_mismatch(&self) -> Option<&SizeMismatch> {
        match self {
            Blit::Clipped(mismatch) => Some(mismatch),
            Blit::Complete => None,
        }
    }
}

/// Fixed-size pixel surface.
///
/// Public accessors take logical coordinates (origin top-left, y down).
/// Rows are stored bottom-up, the layout texture uploads expect, so row 0 of
/// `raw_pixels()` is the bottom row of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl ColorBuffer {
    /// Create buffer filled with `fill`
    pub fn create(width: i32, height: i32, fill: Color) -> SurfaceResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(SurfaceError::InvalidDimension { width, height });
        }

        Ok(Self {
            pixels: vec![fill; width as usize * height as usize],
            width: width as u32,
            height: height as u32,
        })
    }

    /// Create opaque black buffer
    pub fn new(width: i32, height: i32) -> SurfaceResult<Self> {
        Self::create(width, height, Color::BLACK)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get buffer dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Storage index of a logical pixel
    fn index(&self, x: i32, y: i32) -> SurfaceResult<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Err(SurfaceError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let row = to_storage_y(y, self.height) as usize;
        Ok(row * self.width as usize + x as usize)
    }

    /// Overwrite every pixel
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Reset to opaque black
    pub fn clear(&mut self) {
        self.fill(Color::BLACK);
    }

    /// Read a single pixel
    pub fn get(&self, x: i32, y: i32) -> SurfaceResult<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Write a single pixel
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> SurfaceResult<()> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = color;
        Ok(())
    }

    /// Fill the part of the rectangle that overlaps the buffer. Pixels outside
    /// the buffer are skipped.
    pub fn fill_rect(&mut self, start_x: i32, start_y: i32, width: i32, height: i32, color: Color) {
        let (x0, x1) = clip_span(start_x, width, self.width);
        let (y0, y1) = clip_span(start_y, height, self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = self.width as usize;
        for y in y0..y1 {
            let row = to_storage_y(y as i32, self.height) as usize * stride;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    /// Copy `source` so its top-left pixel lands on logical (`dest_x`, `dest_y`).
    /// Whatever falls outside this buffer is clipped and reported, with a warning.
    pub fn blit(&mut self, source: &ColorBuffer, dest_x: i32, dest_y: i32) -> Blit {
        let outcome = self.blit_region(source, dest_x, dest_y);
        if let Blit::Clipped(mismatch) = &outcome {
            warn!("blit clipped: {}", mismatch);
        }
        outcome
    }

    /// Blit without the clipping diagnostic
    pub(crate) fn blit_region(&mut self, source: &ColorBuffer, dest_x: i32, dest_y: i32) -> Blit {
        if dest_x == 0 && dest_y == 0 && source.dimensions() == self.dimensions() {
            self.pixels.copy_from_slice(&source.pixels);
            return Blit::Complete;
        }

        let (x0, x1) = clip_span(dest_x, source.width as i32, self.width);
        let (y0, y1) = clip_span(dest_y, source.height as i32, self.height);
        let copied = (
            (x1 - x0).max(0) as u32,
            (y1 - y0).max(0) as u32,
        );

        if copied.0 > 0 && copied.1 > 0 {
            let dst_stride = self.width as usize;
            let src_stride = source.width as usize;
            let src_x0 = (x0 - dest_x as i64) as usize;
            let span = copied.0 as usize;

            for y in y0..y1 {
                let src_y = (y - dest_y as i64) as i32;
                let src_row = to_storage_y(src_y, source.height) as usize * src_stride;
                let dst_row = to_storage_y(y as i32, self.height) as usize * dst_stride;

                let src = &source.pixels[src_row + src_x0..src_row + src_x0 + span];
                self.pixels[dst_row + x0 as usize..dst_row + x0 as usize + span].copy_from_slice(src);
            }
        }

        if copied == source.dimensions() {
            Blit::Complete
        } else {
            Blit::Clipped(SizeMismatch {
                source: source.dimensions(),
                destination: self.dimensions(),
                offset: (dest_x, dest_y),
                copied,
            })
        }
    }

    /// Pixels in storage order (bottom row first)
    pub fn raw_pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// RGBA bytes in storage order (bottom row first)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Logical rows, top row first
    pub fn rows_top_down(&self) -> impl DoubleEndedIterator<Item = &[Color]> + '_ {
        self.pixels.chunks_exact(self.width as usize).rev()
    }

    /// RGBA bytes with the top row first, for displays with a top-left origin
    pub fn to_top_down_bytes(&self) -> Vec<u8> {
        self.rows_top_down()
            .flat_map(|row| bytemuck::cast_slice::<Color, u8>(row).iter().copied())
            .collect()
    }
}

/// Clip the half-open span [start, start + len) to [0, limit)
fn clip_span(start: i32, len: i32, limit: u32) -> (i64, i64) {
    let lo = (start as i64).max(0);
    let hi = (start as i64 + len.max(0) as i64).min(limit as i64);
    (lo, hi)
}
