//! Rendering surfaces
//!
//! Minimal buffer types the engine composites through: an alpha-only mask
//! buffer with fallible allocation, an RGBA pixmap for the host surface, and
//! the trait through which the host's content is drawn into a mask.

use tracing::warn;

use crate::utils::color::blend_rgba;

/// Alpha-only offscreen buffer, one byte of coverage per pixel.
///
/// Allocation goes through `try_reserve_exact` so that memory pressure
/// degrades to a skipped pass instead of an abort.
#[derive(Debug)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    /// Allocate a transparent mask, or `None` under memory pressure.
    pub fn try_allocate(width: u32, height: u32) -> Option<Self> {
        let len = width as usize * height as usize;

        let mut data = Vec::new();
        if let Err(e) = data.try_reserve_exact(len) {
            warn!(width, height, "alpha mask allocation failed: {e}");
            return None;
        }
        data.resize(len, 0);

        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to fully transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Coverage at a pixel; out-of-bounds reads as transparent.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Fill a rectangle with the given coverage, clipped to the mask.
    ///
    /// Coordinates are signed so translated content can hang off either edge.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, alpha: u8) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x.saturating_add(w as i32)).clamp(0, self.width as i32) as u32;
        let y1 = (y.saturating_add(h as i32)).clamp(0, self.height as i32) as u32;

        for py in y0..y1 {
            let row = py as usize * self.width as usize;
            for px in x0..x1 {
                self.data[row + px as usize] = alpha;
            }
        }
    }
}

/// Straight-alpha RGBA surface the host hands in for compositing.
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        (self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i] = rgba.0;
        self.data[i + 1] = rgba.1;
        self.data[i + 2] = rgba.2;
        self.data[i + 3] = rgba.3;
    }

    /// Source-over blend a pixel onto the surface; out of bounds is a no-op.
    pub fn blend_pixel(&mut self, x: i32, y: i32, rgba: (u8, u8, u8, u8)) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let blended = blend_rgba(self.pixel(x, y), rgba);
        self.set_pixel(x, y, blended);
    }

    /// Fill the whole surface with one color.
    pub fn fill(&mut self, rgba: (u8, u8, u8, u8)) {
        for chunk in self.data.chunks_exact_mut(4) {
            chunk[0] = rgba.0;
            chunk[1] = rgba.1;
            chunk[2] = rgba.2;
            chunk[3] = rgba.3;
        }
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Host content rendered into an alpha mask.
///
/// The engine calls this once per frame per pass with the mask translated by
/// the negated sweep offset, so that the moving gradient stays aligned with
/// the content underneath it.
pub trait ContentSource {
    fn draw_content(&self, mask: &mut AlphaMask, translate_x: i32);
}
