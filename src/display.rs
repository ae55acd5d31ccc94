use anyhow::{Context, Result};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::{
    Color, ColorBuffer, InputQueue, PlacementRect, PlacementSink, Session, SurfaceRegistry,
    SurfaceResult, TickReport,
};

/// Host output for surfaces - uploads a buffer to whatever shows it
pub trait DisplayAdapter {
    /// Show `buffer` for surface `id` at `placement`
    fn present(&mut self, id: &str, placement: PlacementRect, buffer: &ColorBuffer) -> Result<()>;
}

/// Push every surface to the adapter in listing order
pub fn present_all(registry: &SurfaceRegistry, adapter: &mut dyn DisplayAdapter) -> Result<()> {
    for entry in registry.iter() {
        adapter
            .present(entry.id(), entry.placement(), entry.buffer())
            .with_context(|| format!("Failed to present surface '{}'", entry.id()))?;
    }
    Ok(())
}

/// Lay every surface into a new canvas at its placement. Later surfaces draw
/// over earlier ones; anything off-canvas is clipped.
pub fn compose(
    registry: &SurfaceRegistry,
    width: i32,
    height: i32,
    background: Color,
) -> SurfaceResult<ColorBuffer> {
    let mut canvas = ColorBuffer::create(width, height, background)?;

    for entry in registry.iter() {
        let placement = entry.placement();
        if let Some(mismatch) = canvas.blit_region(entry.buffer(), placement.x, placement.y).size_mismatch() {
            debug!("surface '{}' partly off canvas: {}", entry.id(), mismatch);
        }
    }

    Ok(canvas)
}

/// Display combines the operator session with an output adapter
pub struct Display<A: DisplayAdapter> {
    adapter: A,
}

impl<A: DisplayAdapter> Display<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// Full cycle: drain input → apply → present every surface
    pub fn draw(
        &mut self,
        session: &mut Session,
        queue: &mut InputQueue,
        sink: &mut dyn PlacementSink,
    ) -> Result<TickReport> {
        let report = session.tick(queue, sink)?;
        present_all(session.registry(), &mut self.adapter)?;
        Ok(report)
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }
}

/// Last image presented for one surface
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    pub id: String,
    pub placement: PlacementRect,
    pub width: u32,
    pub height: u32,
    /// RGBA bytes, top row first
    pub rgba: Vec<u8>,
}

/// In-memory display that keeps the latest frame of each surface
#[derive(Debug, Default)]
pub struct FrameCapture {
    frames: Vec<CapturedFrame>,
    presents: usize,
}

impl FrameCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self, id: &str) -> Option<&CapturedFrame> {
        self.frames.iter().find(|frame| frame.id == id)
    }

    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    /// Total number of present calls
    pub fn presents(&self) -> usize {
        self.presents
    }
}

impl DisplayAdapter for FrameCapture {
    fn present(&mut self, id: &str, placement: PlacementRect, buffer: &ColorBuffer) -> Result<()> {
        let (width, height) = buffer.dimensions();
        let frame = CapturedFrame {
            id: id.to_string(),
            placement,
            width,
            height,
            rgba: buffer.to_top_down_bytes(),
        };

        match self.frames.iter_mut().find(|f| f.id == id) {
            Some(slot) => *slot = frame,
            None => self.frames.push(frame),
        }
        self.presents += 1;
        Ok(())
    }
}

/// Write a buffer as binary PPM (P6). Alpha is dropped, top row first.
pub fn write_ppm<W: Write>(mut out: W, buffer: &ColorBuffer) -> std::io::Result<()> {
    let (width, height) = buffer.dimensions();
    writeln!(out, "P6")?;
    writeln!(out, "{} {}", width, height)?;
    writeln!(out, "255")?;

    for row in buffer.rows_top_down() {
        for pixel in row {
            out.write_all(&[pixel.r, pixel.g, pixel.b])?;
        }
    }
    out.flush()
}

/// Write a buffer to a PPM file, creating parent directories
pub fn save_ppm(path: impl AsRef<Path>, buffer: &ColorBuffer) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    write_ppm(BufWriter::new(file), buffer).with_context(|| format!("Failed to write {:?}", path))
}

/// Display that dumps each surface to `<dir>/<id>.ppm`
#[derive(Debug, Clone)]
pub struct PpmWriter {
    dir: PathBuf,
}

impl PpmWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.ppm", id))
    }
}

impl DisplayAdapter for PpmWriter {
    fn present(&mut self, id: &str, _placement: PlacementRect, buffer: &ColorBuffer) -> Result<()> {
        save_ppm(self.path_for(id), buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ppm_header_and_row_order() {
        let mut buffer = ColorBuffer::new(2, 2).unwrap();
        buffer.set(0, 0, Color::RED).unwrap();
        buffer.set(1, 1, Color::BLUE).unwrap();

        let mut out = Vec::new();
        write_ppm(&mut out, &buffer).unwrap();

        let header = b"P6\n2 2\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(
            &out[header.len()..],
            &[255, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255]
        );
    }

    #[test]
    fn capture_replaces_frames_per_surface() {
        let mut capture = FrameCapture::new();
        let mut buffer = ColorBuffer::new(1, 1).unwrap();
        let placement = PlacementRect::new(0, 0, 1, 1);

        capture.present("a", placement, &buffer).unwrap();
        buffer.fill(Color::GREEN);
        capture.present("a", placement, &buffer).unwrap();

        assert_eq!(capture.frames().len(), 1);
        assert_eq!(capture.presents(), 2);
        assert_eq!(capture.frame("a").unwrap().rgba, vec![0, 255, 0, 255]);
    }

    #[test]
    fn compose_rejects_empty_canvas() {
        let registry = SurfaceRegistry::new();
        assert!(compose(&registry, 0, 10, Color::BLACK).is_err());
    }
}
