//! Packed-pixel framebuffer and the disjoint band views workers write into.
//!
//! Storage is row-major with row 0 at the top. Drawing code uses canvas
//! coordinates instead: the origin is the centre of the frame and +y is up.
//! For a `width` x `height` frame, canvas x runs over
//! `-width/2 .. width - width/2` and canvas y over
//! `height/2 - (height - 1) ..= height/2`.

use glint_core::Rgb;

use crate::band::Band;
use crate::error::{FramebufferError, FramebufferResult};

/// A frame of `0x00RRGGBB` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Packed pixels, row-major from the top-left.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Change the frame size. Contents are cleared to black when the size
    /// changes. Returns true if it did.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if (width, height) == (self.width, self.height) {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
        log::debug!("Framebuffer resized to {}x{}", width, height);
        true
    }

    /// Read the pixel at storage position (column, row).
    pub fn get(&self, col: usize, row: usize) -> Option<Rgb> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(Rgb::unpack(self.pixels[row * self.width + col]))
    }

    /// Read the pixel at canvas position (x, y).
    pub fn get_canvas(&self, x: i64, y: i64) -> Option<Rgb> {
        let (col, row) = canvas_to_storage(x, y, self.width, self.height)?;
        self.get(col, row)
    }

    /// Write the pixel at canvas position (x, y).
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgb) -> FramebufferResult<()> {
        let (col, row) = canvas_to_storage(x, y, self.width, self.height)
            .ok_or(FramebufferError::OutOfBounds { x, y })?;
        self.pixels[row * self.width + col] = color.pack();
        Ok(())
    }

    /// Split the frame into one mutable view per band.
    ///
    /// The bands must be contiguous from row 0 and cover the whole height,
    /// as [`crate::generate_bands`] produces. Each view borrows its own rows,
    /// so views can be handed to different threads.
    pub fn split_bands(&mut self, bands: &[Band]) -> FramebufferResult<Vec<BandView<'_>>> {
        let covered: usize = bands.iter().map(|b| b.rows).sum();
        let contiguous = bands
            .iter()
            .try_fold(0, |next, band| (band.y == next).then(|| band.end()))
            .is_some();
        if covered != self.height || !contiguous {
            return Err(FramebufferError::BandMismatch {
                covered,
                height: self.height,
            });
        }

        let (width, height) = (self.width, self.height);
        let mut rest: &mut [u32] = &mut self.pixels;
        let mut views = Vec::with_capacity(bands.len());
        for band in bands {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(band.pixel_count(width));
            views.push(BandView {
                band: *band,
                width,
                height,
                pixels: head,
            });
            rest = tail;
        }
        Ok(views)
    }
}

/// Mutable access to the rows of a single band.
#[derive(Debug)]
pub struct BandView<'a> {
    band: Band,
    width: usize,
    height: usize,
    pixels: &'a mut [u32],
}

impl<'a> BandView<'a> {
    pub fn band(&self) -> Band {
        self.band
    }

    /// Width of the whole frame.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the whole frame.
    pub fn frame_height(&self) -> usize {
        self.height
    }

    /// Canvas x coordinates of every column, left to right.
    pub fn canvas_columns(&self) -> std::ops::Range<i64> {
        let half = (self.width / 2) as i64;
        -half..(self.width as i64 - half)
    }

    /// Canvas y coordinates of this band's rows, top to bottom.
    pub fn canvas_rows(&self) -> std::iter::Rev<std::ops::RangeInclusive<i64>> {
        let half = (self.height / 2) as i64;
        let top = half - self.band.y as i64;
        let bottom = half - self.band.end() as i64 + 1;
        (bottom..=top).rev()
    }

    /// Write the pixel at canvas position (x, y). Positions outside this
    /// band are rejected, even when they are inside the frame.
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgb) -> FramebufferResult<()> {
        let out_of_bounds = FramebufferError::OutOfBounds { x, y };
        let (col, row) = canvas_to_storage(x, y, self.width, self.height).ok_or(out_of_bounds.clone())?;
        if row < self.band.y || row >= self.band.end() {
            return Err(out_of_bounds);
        }
        self.pixels[(row - self.band.y) * self.width + col] = color.pack();
        Ok(())
    }
}

/// Canvas (centre origin, +y up) to storage (top-left origin, +row down).
fn canvas_to_storage(x: i64, y: i64, width: usize, height: usize) -> Option<(usize, usize)> {
    let col = x.checked_add((width / 2) as i64)?;
    let row = ((height / 2) as i64).checked_sub(y)?;
    if col < 0 || row < 0 || col as usize >= width || row as usize >= height {
        return None;
    }
    Some((col as usize, row as usize))
}
