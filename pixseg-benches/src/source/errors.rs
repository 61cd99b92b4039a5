//! Error types for synthetic benchmark image generation.

/// Errors that may occur while generating synthetic images.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// The requested width was zero.
    #[error("image width must be greater than zero")]
    ZeroWidth,
    /// The requested height was zero.
    #[error("image height must be greater than zero")]
    ZeroHeight,
    /// The blob pattern asked for no blobs.
    #[error("blob count must be greater than zero")]
    ZeroBlobs,
    /// More blobs were requested than the image has pixels.
    #[error("blob count ({blob_count}) must not exceed pixel count ({pixel_count})")]
    BlobCountExceedsPixelCount {
        /// Number of blobs requested.
        blob_count: usize,
        /// Number of pixels in the image.
        pixel_count: usize,
    },
    /// `width * height` overflowed `usize`.
    #[error("width * height overflows usize")]
    Overflow,
    /// The generated buffer was rejected by the grid constructor.
    #[error("generated grid is invalid: {0}")]
    Grid(#[from] pixseg_core::GridError),
}
