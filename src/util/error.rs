//! Error types for the raybake library.
//!
//! The tracing core itself never fails: degenerate geometry, dangling
//! indices and missing environment maps all degrade silently. These errors
//! cover the input-validation and image-loading surface around it.

use thiserror::Error;

/// Main error type for raybake operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Index buffer length is not a multiple of three
    #[error("Index count {0} is not a multiple of 3")]
    IndexCountNotTriangular(usize),

    /// Vertex buffer length is not a multiple of three (unindexed soup)
    #[error("Vertex count {0} is not a multiple of 3")]
    VertexCountNotTriangular(usize),

    /// An index references a vertex past the end of the vertex buffer
    #[error("Index {index} out of bounds (vertex count: {count})")]
    IndexOutOfBounds { index: u32, count: usize },

    /// Pixel buffer does not match the declared dimensions
    #[error("Pixel count {got} does not match {width}x{height}")]
    PixelCountMismatch { got: usize, width: u32, height: u32 },

    /// Image decode failed
    #[error("Image decode failed: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for raybake operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::IndexOutOfBounds { index: 9, count: 6 };
        assert!(e.to_string().contains("9"));
        assert!(e.to_string().contains("6"));

        let e = Error::IndexCountNotTriangular(7);
        assert!(e.to_string().contains("7"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
