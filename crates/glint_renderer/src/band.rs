//! Band-based frame partitioning.
//!
//! Divides the frame into horizontal stripes (bands) that can be rendered
//! independently and in parallel using rayon.

/// A horizontal stripe of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Index of this band, top to bottom
    pub index: usize,
    /// First storage row (0 = top of the frame)
    pub y: usize,
    /// Number of rows in the band
    pub rows: usize,
}

impl Band {
    /// Create a new band.
    pub fn new(index: usize, y: usize, rows: usize) -> Self {
        Self { index, y, rows }
    }

    /// One past the last row of this band.
    pub fn end(&self) -> usize {
        self.y + self.rows
    }

    /// Get the total number of pixels in this band for a frame `width` wide.
    pub fn pixel_count(&self, width: usize) -> usize {
        self.rows * width
    }
}

/// Default number of bands per frame.
pub const DEFAULT_BAND_COUNT: usize = 10;

/// Split `height` rows into `count` bands.
///
/// Every band gets `height / count` rows and the last one also takes the
/// remainder, so the bands are contiguous, disjoint and cover every row
/// exactly once. When there are fewer rows than bands the leading bands are
/// empty. A count of zero is treated as one.
pub fn generate_bands(height: usize, count: usize) -> Vec<Band> {
    let count = count.max(1);
    let rows_per_band = height / count;

    (0..count)
        .map(|index| {
            let y = index * rows_per_band;
            let rows = if index + 1 == count {
                height - y
            } else {
                rows_per_band
            };
            Band::new(index, y, rows)
        })
        .collect()
}
