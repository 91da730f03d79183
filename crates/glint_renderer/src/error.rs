//! Error types for the renderer.

use thiserror::Error;

/// Errors from writing into a [`crate::Framebuffer`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramebufferError {
    /// Canvas coordinates (centre origin) that fall outside the frame
    #[error("pixel out of bounds: x: {x}, y: {y}")]
    OutOfBounds { x: i64, y: i64 },

    #[error("bands cover {covered} rows but the frame has {height}")]
    BandMismatch { covered: usize, height: usize },
}

pub type FramebufferResult<T> = Result<T, FramebufferError>;

/// Errors that stop a frame from being scheduled at all.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Framebuffer(#[from] FramebufferError),
}

pub type RenderResult<T> = Result<T, RenderError>;
