//! Glint Renderer - CPU recursive ray tracing of sphere scenes.
//!
//! Each frame is split into horizontal bands that are traced in parallel on
//! a persistent rayon pool. Per pixel the tracer finds the nearest sphere,
//! shades it with ambient, diffuse and specular terms (with shadow rays to
//! every light) and blends in a bounded number of mirror bounces.

mod band;
mod error;
mod framebuffer;
mod intersect;
mod scheduler;
mod shading;
mod tracer;

pub use band::{generate_bands, Band, DEFAULT_BAND_COUNT};
pub use error::{FramebufferError, FramebufferResult, RenderError, RenderResult};
pub use framebuffer::{BandView, Framebuffer};
pub use intersect::{any_intersection, closest_intersection, intersect_ray_sphere, Hit};
pub use scheduler::{render_band, FrameScheduler, FrameStats};
pub use shading::compute_lighting;
pub use tracer::{canvas_to_viewport, render_pixel, trace_ray, RenderConfig};

/// Re-export math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};

/// Offset in ray-parameter space applied to secondary rays so a surface
/// does not shadow or reflect itself.
pub const EPSILON: f64 = 0.001;
