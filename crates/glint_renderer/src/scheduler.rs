//! Frame scheduler: fans bands out to a persistent rayon pool and waits for
//! all of them before handing the frame back.
//!
//! The scene and camera are shared borrows for the whole frame and each band
//! owns a disjoint slice of the framebuffer, so workers never synchronise
//! with each other. The pool outlives frames; only the jobs are per frame.

use std::time::{Duration, Instant};

use glint_core::{Camera, Scene};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::band::generate_bands;
use crate::error::RenderResult;
use crate::framebuffer::{BandView, Framebuffer};
use crate::tracer::{render_pixel, RenderConfig};

/// What one call to [`FrameScheduler::render`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Wall time from dispatch to the last band finishing
    pub duration: Duration,
    pub bands: usize,
    pub pixels: usize,
    /// Pixel writes rejected as out of bounds
    pub dropped_writes: usize,
}

/// Renders frames band by band on a dedicated thread pool.
pub struct FrameScheduler {
    pool: ThreadPool,
    config: RenderConfig,
}

impl FrameScheduler {
    /// Build the worker pool. Threads default to one per logical CPU.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        let threads = config.threads.unwrap_or_else(num_cpus::get).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("glint-band-{}", i))
            .build()?;

        log::info!(
            "Render pool started: {} threads, {} bands per frame, depth {}",
            threads,
            config.band_count,
            config.max_depth
        );

        Ok(Self { pool, config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Render one frame into `framebuffer`.
    ///
    /// Returns once every band is written. The framebuffer may have changed
    /// size since the previous frame; bands are recomputed every call.
    pub fn render(
        &self,
        scene: &Scene,
        camera: &Camera,
        framebuffer: &mut Framebuffer,
    ) -> RenderResult<FrameStats> {
        let start = Instant::now();
        let pixels = framebuffer.width() * framebuffer.height();
        let bands = generate_bands(framebuffer.height(), self.config.band_count);
        let views = framebuffer.split_bands(&bands)?;
        let config = &self.config;

        let dropped_writes: usize = self.pool.install(|| {
            views
                .into_par_iter()
                .map(|mut view| render_band(&mut view, scene, camera, config))
                .sum()
        });

        let stats = FrameStats {
            duration: start.elapsed(),
            bands: bands.len(),
            pixels,
            dropped_writes,
        };
        log::trace!(
            "Frame: {} px in {} bands, {:.2} ms",
            stats.pixels,
            stats.bands,
            stats.duration.as_secs_f64() * 1000.0
        );
        Ok(stats)
    }
}

/// Trace every pixel of one band. Returns the number of writes that had to
/// be dropped.
pub fn render_band(
    view: &mut BandView<'_>,
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
) -> usize {
    let (width, height) = (view.width(), view.frame_height());
    let mut dropped = 0;

    for y in view.canvas_rows() {
        for x in view.canvas_columns() {
            let color = render_pixel(scene, camera, x, y, width, height, config);
            if let Err(e) = view.put_pixel(x, y, color) {
                log::warn!("Band {}: {}", view.band().index, e);
                dropped += 1;
            }
        }
    }

    dropped
}
