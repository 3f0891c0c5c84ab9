//! Core recursive ray tracing renderer.
//!
//! Implements Whitted-style ray tracing with:
//! - One or more camera rays per pixel, averaged (supersampling)
//! - Shading and recursion delegated to the hit material
//! - Parallel band rendering on a fixed-size rayon thread pool

use std::time::Instant;

use prism_core::Color;
use prism_math::Ray;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::band::{generate_bands, render_band};
use crate::hittable::Hittable;
use crate::material::Shade;
use crate::{Camera, World};

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Render cancelled")]
    Cancelled,
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of worker threads, one row band each
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

/// Receives rendered rows as they complete.
///
/// Rows arrive from worker threads in no particular order.
pub trait FrameSink: Sync {
    /// Row `y` (0 is the top row) is finished.
    fn row_completed(&self, y: u32, pixels: &[Color]);

    /// Every row is finished. Called once, after all workers joined.
    fn frame_completed(&self) {}

    /// Polled between rows; returning true stops the render.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn row_completed(&self, _y: u32, _pixels: &[Color]) {}
}

/// Compute the color seen by a camera ray.
pub fn trace(ray: &Ray, world: &World) -> Color {
    match world.hit(ray) {
        Some(hit) => hit.material.color_for(&hit, world, 0),
        None => world.background(),
    }
}

/// Render a single pixel, averaging one sample per pattern offset.
///
/// `y` counts rows from the top of the image and must be below `height`.
pub fn render_pixel(camera: &Camera, world: &World, width: u32, height: u32, x: u32, y: u32) -> Color {
    debug_assert!(y < height, "row {y} outside image of height {height}");
    let samples: Vec<Color> = camera
        .rays_for(width, height, x, height - y - 1)
        .iter()
        .map(|ray| trace(ray, world))
        .collect();

    Color::average(&samples)
}

/// Rendered image, row-major from the top row down.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| {
                let [r, g, b] = color.to_rgb8();
                [r, g, b, 255]
            })
            .collect()
    }
}

/// Render the world through `camera` into an image buffer.
pub fn render(world: &World, camera: &Camera, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    render_with_sink(world, camera, config, &NullSink)
}

/// Render the world, publishing rows to `sink` as bands complete them.
///
/// Rows are split into one band per thread of a fixed-size pool. The call
/// returns once every band has finished or stopped.
pub fn render_with_sink(
    world: &World,
    camera: &Camera,
    config: &RenderConfig,
    sink: &dyn FrameSink,
) -> Result<ImageBuffer, RenderError> {
    let (width, height) = (config.width, config.height);
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidResolution { width, height });
    }

    let bands = generate_bands(height, config.threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(bands.len())
        .thread_name(|i| format!("prism-band-{i}"))
        .build()?;

    log::info!(
        "Rendering {}x{} with {} bands, {} samples per pixel",
        width,
        height,
        bands.len(),
        camera.pattern().len()
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(width, height);
    let mut outcomes: Vec<Result<(), RenderError>> = bands.iter().map(|_| Ok(())).collect();

    pool.scope(|s| {
        let mut rest: &mut [Color] = &mut image.pixels;
        for (band, outcome) in bands.iter().zip(outcomes.iter_mut()) {
            let (pixels, tail) = std::mem::take(&mut rest).split_at_mut(band.rows as usize * width as usize);
            rest = tail;
            s.spawn(move |_| {
                *outcome = render_band(band, camera, world, width, height, pixels, sink);
            });
        }
    });

    if let Some(err) = outcomes.into_iter().find_map(Result::err) {
        log::info!("Render stopped after {:.2?}: {}", start.elapsed(), err);
        return Err(err);
    }

    sink.frame_completed();
    log::info!("Rendered {}x{} in {:.2?}", width, height, start.elapsed());

    Ok(image)
}
