//! Bitmap chunking
//!
//! The printer buffers only about 256 bytes. A raster larger than that is
//! split into horizontal strips ("chunks"), each sent as one `ESC * h w`
//! command followed by `h * w` pixel bytes. [`ChunkPlan`] computes the strip
//! geometry; [`PixelSource`] abstracts over where the pixel bytes come from
//! so the same transfer loop serves in-memory buffers and push-only streams.
//!
//! ## Raster layout
//!
//! Row-major, one bit per dot, MSB leftmost, a set bit prints. Each row is
//! padded to a whole byte, so the row stride is `ceil(width / 8)`. The print
//! head is 384 dots wide: bytes past the first [`MAX_ROW_BYTES`] of a row are
//! dropped.
//!
//! ## Example
//!
//! ```
//! use pos_printer::bitmap::ChunkPlan;
//!
//! // 384 x 100, no handshake: 48-byte rows, 5 rows fit in 256 bytes
//! let plan = ChunkPlan::new(384, 100, 255, false);
//! assert_eq!(plan.row_bytes(), 48);
//! assert_eq!(plan.chunk_limit(), 5);
//! assert_eq!(plan.chunks().count(), 20);
//! ```

use embedded_io::Read;

/// Widest row the print head accepts, in bytes (384 dots)
pub const MAX_ROW_BYTES: u16 = 48;

/// Assumed size of the printer's receive buffer
pub const RECEIVE_BUFFER_BYTES: u16 = 256;

/// Chunk height when the ready line paces output (largest `ESC *` accepts)
pub const HANDSHAKE_CHUNK_HEIGHT: u8 = 255;

/// Length of the width/height header of a self-describing bitmap stream
pub const HEADER_LEN: usize = 4;

/// Bytes per raster row for a bitmap `width` dots wide
pub const fn row_stride(width: u16) -> u16 {
    width.div_ceil(8)
}

/// Encode the header of a self-describing bitmap stream
///
/// Width then height, each little-endian.
pub const fn encode_header(width: u16, height: u16) -> [u8; HEADER_LEN] {
    let [w0, w1] = width.to_le_bytes();
    let [h0, h1] = height.to_le_bytes();
    [w0, w1, h0, h1]
}

/// Decode the header of a self-describing bitmap stream into `(width, height)`
pub const fn decode_header(header: [u8; HEADER_LEN]) -> (u16, u16) {
    (
        u16::from_le_bytes([header[0], header[1]]),
        u16::from_le_bytes([header[2], header[3]]),
    )
}

/// Strip geometry for one bitmap transfer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkPlan {
    height: u16,
    stride: u16,
    row_bytes: u8,
    chunk_limit: u8,
}

impl ChunkPlan {
    /// Plan a `width` x `height` transfer
    ///
    /// With `handshake` the ready line guards the buffer and every chunk but
    /// the last is [`HANDSHAKE_CHUNK_HEIGHT`] rows; `max_chunk_height` is
    /// ignored. Otherwise as many clipped rows as fit in
    /// [`RECEIVE_BUFFER_BYTES`], capped at `max_chunk_height`, and never fewer
    /// than one.
    pub fn new(width: u16, height: u16, max_chunk_height: u8, handshake: bool) -> Self {
        let stride = row_stride(width);
        let row_bytes = stride.min(MAX_ROW_BYTES);
        let chunk_limit = if handshake {
            HANDSHAKE_CHUNK_HEIGHT
        } else {
            let fit = RECEIVE_BUFFER_BYTES / row_bytes.max(1);
            fit.min(u16::from(max_chunk_height)).max(1) as u8
        };
        Self {
            height,
            stride,
            row_bytes: row_bytes as u8,
            chunk_limit,
        }
    }

    /// Total rows
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Source bytes per row, padding included
    pub fn stride(&self) -> u16 {
        self.stride
    }

    /// Bytes per row actually sent
    pub fn row_bytes(&self) -> u8 {
        self.row_bytes
    }

    /// Source bytes dropped at the end of each row
    pub fn skip_bytes(&self) -> u16 {
        self.stride - u16::from(self.row_bytes)
    }

    /// Tallest chunk this plan emits
    pub fn chunk_limit(&self) -> u8 {
        self.chunk_limit
    }

    /// Whether there is nothing to send
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.row_bytes == 0
    }

    /// Source bytes consumed by the whole transfer
    pub fn source_len(&self) -> usize {
        usize::from(self.stride) * usize::from(self.height)
    }

    /// Heights of the successive chunks
    pub fn chunks(&self) -> Chunks {
        Chunks {
            remaining: if self.is_empty() { 0 } else { self.height },
            limit: self.chunk_limit,
        }
    }
}

/// Iterator over chunk heights, see [`ChunkPlan::chunks`]
#[derive(Clone, Debug)]
pub struct Chunks {
    remaining: u16,
    limit: u8,
}

impl Iterator for Chunks {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        let height = self.remaining.min(u16::from(self.limit));
        self.remaining -= height;
        Some(height as u8)
    }
}

/// Where bitmap pixel bytes come from
///
/// The transfer loop spins on [`poll_byte`](Self::poll_byte) until it yields,
/// so a source that never produces enough bytes stalls the transfer.
pub trait PixelSource {
    /// Next byte, or `None` if none is available yet
    fn poll_byte(&mut self) -> Option<u8>;

    /// Block until a byte is available and return it
    fn next_byte(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.poll_byte() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }
}

/// Random-access source over an in-memory raster
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    /// Read `data` from the start
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }
}

impl PixelSource for SliceSource<'_> {
    fn poll_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.position).copied()?;
        self.position += 1;
        Some(byte)
    }
}

/// Push-only source reading from an [`embedded_io::Read`] stream
///
/// A read of zero bytes or a read error counts as "nothing yet". Only the
/// first error of a run is logged.
pub struct ReaderSource<R> {
    reader: R,
    failing: bool,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            failing: false,
        }
    }

    /// Give back the reader
    pub fn release(self) -> R {
        self.reader
    }
}

impl<R: Read> PixelSource for ReaderSource<R> {
    fn poll_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf) {
            Ok(1) => {
                self.failing = false;
                Some(buf[0])
            }
            Ok(_) => None,
            Err(e) => {
                if !self.failing {
                    log::warn!("bitmap stream read failed: {:?}", e);
                }
                self.failing = true;
                None
            }
        }
    }
}
