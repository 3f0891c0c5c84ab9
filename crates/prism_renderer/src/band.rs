//! Band-based parallel rendering.
//!
//! The image is split into contiguous row bands, one per worker. Each band
//! writes into its own disjoint slice of the framebuffer, so workers never
//! share pixel data.

use prism_core::Color;

use crate::renderer::{render_pixel, FrameSink, RenderError};
use crate::{Camera, World};

/// A contiguous range of image rows (top row first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First row of the band
    pub start_row: u32,
    /// Number of rows in the band
    pub rows: u32,
    /// Index of this band, top to bottom
    pub index: usize,
}

impl Band {
    /// Rows covered by this band.
    pub fn row_range(&self) -> std::ops::Range<u32> {
        self.start_row..self.start_row + self.rows
    }
}

/// Split `height` rows into `count` contiguous bands.
///
/// Bands are equally sized except the last, which also takes the remainder.
/// `count` is clamped to `1..=height` so that no band is empty.
pub fn generate_bands(height: u32, count: usize) -> Vec<Band> {
    if height == 0 {
        return Vec::new();
    }

    let count = count.clamp(1, height as usize) as u32;
    let rows_per_band = height / count;

    (0..count)
        .map(|i| {
            let start_row = i * rows_per_band;
            let rows = if i == count - 1 {
                height - start_row
            } else {
                rows_per_band
            };
            Band {
                start_row,
                rows,
                index: i as usize,
            }
        })
        .collect()
}

/// Render one band into `pixels` (row-major, `band.rows * width` long).
///
/// Each finished row is published to `sink`. Cancellation is checked
/// between rows.
pub fn render_band(
    band: &Band,
    camera: &Camera,
    world: &World,
    width: u32,
    height: u32,
    pixels: &mut [Color],
    sink: &dyn FrameSink,
) -> Result<(), RenderError> {
    for (y, row) in band.row_range().zip(pixels.chunks_mut(width as usize)) {
        if sink.is_cancelled() {
            log::debug!("Band {} cancelled at row {}", band.index, y);
            return Err(RenderError::Cancelled);
        }

        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = render_pixel(camera, world, width, height, x as u32, y);
        }
        sink.row_completed(y, row);
    }

    log::debug!(
        "Band {} finished (rows {}..{})",
        band.index,
        band.start_row,
        band.start_row + band.rows
    );
    Ok(())
}
