//! Coordinate rotation for the print raster
//!
//! The raster is stored the way the printer consumes it: row-major, rows
//! padded to whole bytes, MSB leftmost. Drawing in a rotated orientation
//! (e.g. a label printed along the paper) means mapping each logical
//! coordinate to a physical dot before locating its byte and bit.
//!
//! ## Example
//!
//! ```
//! use pos_printer::{rotation::apply_rotation, Rotation};
//!
//! // 10 dots wide: 2 bytes per row, last 6 bits of each row are padding
//! let (idx, bit) = apply_rotation(9, 1, 10, 2, Rotation::Rotate0);
//! assert_eq!(idx, 3);
//! assert_eq!(bit, 0x40);
//! ```

/// Drawing orientation relative to the paper
///
/// Rotate0 draws with x across the print head and y down the paper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Native orientation
    #[default]
    Rotate0,
    /// 90 degrees clockwise
    Rotate90,
    /// 180 degrees
    Rotate180,
    /// 270 degrees clockwise
    Rotate270,
}

impl Rotation {
    /// Whether logical width and height are swapped relative to the raster
    pub const fn is_transposed(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

/// Map a logical coordinate to its byte index and bit mask
///
/// `width` and `height` are the physical raster dimensions in dots; the
/// caller must keep `(x, y)` inside the logical (possibly swapped) bounds.
pub fn apply_rotation(x: u32, y: u32, width: u32, height: u32, rotation: Rotation) -> (usize, u8) {
    let (px, py) = match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (width - 1 - y, x),
        Rotation::Rotate180 => (width - 1 - x, height - 1 - y),
        Rotation::Rotate270 => (y, height - 1 - x),
    };
    let stride = width.div_ceil(8);
    let index = (py * stride + px / 8) as usize;
    let bit = 0x80 >> (px % 8);
    (index, bit)
}
