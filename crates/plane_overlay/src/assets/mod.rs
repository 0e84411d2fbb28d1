//! Asset loading for the plane overlay

pub mod grid_texture;

pub use grid_texture::GridTexture;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Failed to read or decode an asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Pixel data does not match the stated dimensions
    #[error("Invalid dimensions: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidDimensions {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
        /// Bytes required for RGBA8
        expected: usize,
        /// Bytes provided
        actual: usize,
    },
}
