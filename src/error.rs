//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and printer operations ([`Error`]).
//!
//! Out-of-range command parameters are never an error: they are clamped or
//! replaced by a documented default so the printer always receives a valid
//! command. The only runtime failures are those of the link itself and
//! in-memory bitmaps too short for the dimensions given.
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during printer operations
//! - [`CanvasError`] - Canvas buffer errors
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level serial and pin errors
//!
//! ## Example
//!
//! ```
//! use pos_printer::{Builder, BuilderError};
//!
//! let result = Builder::new().baud_rate(0).build();
//! assert!(matches!(result, Err(BuilderError::InvalidBaudRate)));
//! ```

use crate::interface::PrinterInterface;

/// Errors that can occur when talking to the printer
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: PrinterInterface> {
    /// Interface error (serial link or ready line)
    ///
    /// Wraps the underlying error from the [`PrinterInterface`] implementation.
    Interface(I::Error),
    /// Bitmap buffer is too small for the dimensions given
    ///
    /// A `width` x `height` bitmap needs `ceil(width / 8) * height` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: PrinterInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: PrinterInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Baud rate of zero
    InvalidBaudRate,
    /// Bitmap chunk height ceiling of zero
    InvalidChunkHeight,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidBaudRate => write!(f, "Baud rate must be non-zero"),
            Self::InvalidChunkHeight => write!(f, "Max chunk height must be at least 1 row"),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors that can occur when creating a canvas
#[derive(Debug, PartialEq, Eq)]
pub enum CanvasError {
    /// Buffer is too small for the raster dimensions
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl core::fmt::Display for CanvasError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Canvas buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl core::error::Error for CanvasError {}
