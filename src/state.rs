//! Printer state tracked on the host side
//!
//! The printer cannot be asked where its print head is, so the driver keeps
//! its own model: the current column, the character cell size, the active
//! print mode and the last byte sent. The [pacing](crate::pacing) estimator
//! and the [bitmap](crate::bitmap) chunker both read from it.

use crate::command::LF;
use crate::text::Size;

/// Character cell height in dots at normal size
pub const CHAR_HEIGHT: u8 = 24;
/// Character cell height in dots with double height active
pub const DOUBLE_CHAR_HEIGHT: u8 = 48;
/// Characters per line at normal width
pub const COLUMNS: u8 = 32;
/// Characters per line with double width active
pub const DOUBLE_WIDTH_COLUMNS: u8 = 16;
/// Line height in dots after a printer reset
pub const DEFAULT_LINE_HEIGHT: u8 = 30;
/// Barcode height in dots after a printer reset
pub const DEFAULT_BARCODE_HEIGHT: u8 = 50;

/// Print mode mask sent with `ESC !`
///
/// Each attribute is one bit and can be toggled independently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrintMode(u8);

impl PrintMode {
    /// Reverse video (only used when the firmware lacks `GS B`)
    pub const INVERSE: Self = Self(1 << 1);
    /// Rotate 180 degrees
    pub const UPSIDE_DOWN: Self = Self(1 << 2);
    /// Emphasized
    pub const BOLD: Self = Self(1 << 3);
    /// Double height characters
    pub const DOUBLE_HEIGHT: Self = Self(1 << 4);
    /// Double width characters
    pub const DOUBLE_WIDTH: Self = Self(1 << 5);
    /// Strike-through
    pub const STRIKE: Self = Self(1 << 6);

    /// Mode with no attributes set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw mask byte
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the bits of `other`
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the bits of `other`
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl core::ops::BitOr for PrintMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Host-side model of one printer
///
/// Owned by [`Printer`](crate::Printer) and mutated only through it. Created
/// with power-on defaults; [`reset`](Self::reset) restores the text defaults
/// without touching calibration.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceState {
    column: u8,
    max_column: u8,
    char_height: u8,
    line_spacing: u8,
    print_mode: PrintMode,
    prev_byte: u8,
    barcode_height: u8,
    dot_print_time_us: u32,
    dot_feed_time_us: u32,
    max_chunk_height: u8,
    handshake: bool,
}

impl DeviceState {
    /// Create state with power-on defaults and the given calibration
    pub fn new(dot_print_time_us: u32, dot_feed_time_us: u32, max_chunk_height: u8) -> Self {
        Self {
            column: 0,
            max_column: COLUMNS,
            char_height: CHAR_HEIGHT,
            line_spacing: DEFAULT_LINE_HEIGHT - CHAR_HEIGHT,
            print_mode: PrintMode::empty(),
            // Treat the line before power-on as blank
            prev_byte: LF,
            barcode_height: DEFAULT_BARCODE_HEIGHT,
            dot_print_time_us,
            dot_feed_time_us,
            max_chunk_height,
            handshake: false,
        }
    }

    /// Restore text defaults, matching what `ESC @` does on the printer
    ///
    /// Calibration, chunk limit and handshake are left untouched.
    pub fn reset(&mut self) {
        self.column = 0;
        self.max_column = COLUMNS;
        self.char_height = CHAR_HEIGHT;
        self.line_spacing = DEFAULT_LINE_HEIGHT - CHAR_HEIGHT;
        self.print_mode = PrintMode::empty();
        self.prev_byte = LF;
        self.barcode_height = DEFAULT_BARCODE_HEIGHT;
    }

    /// Current column in character cells
    pub fn column(&self) -> u8 {
        self.column
    }

    /// Column at which the printer wraps
    pub fn max_column(&self) -> u8 {
        self.max_column
    }

    /// Character cell height in dots
    pub fn char_height(&self) -> u8 {
        self.char_height
    }

    /// Extra feed between lines in dots
    pub fn line_spacing(&self) -> u8 {
        self.line_spacing
    }

    /// Active print mode mask
    pub fn print_mode(&self) -> PrintMode {
        self.print_mode
    }

    /// Last byte sent on the text path (wraps count as `LF`)
    pub fn prev_byte(&self) -> u8 {
        self.prev_byte
    }

    /// Barcode height in dots
    pub fn barcode_height(&self) -> u8 {
        self.barcode_height
    }

    /// Time for the paper to advance one dot row while printing
    pub fn dot_print_time_us(&self) -> u32 {
        self.dot_print_time_us
    }

    /// Time for the paper to advance one dot row while feeding
    pub fn dot_feed_time_us(&self) -> u32 {
        self.dot_feed_time_us
    }

    /// Ceiling on bitmap chunk height without handshake
    pub fn max_chunk_height(&self) -> u8 {
        self.max_chunk_height
    }

    /// Whether the hardware ready line paces output
    pub fn handshake(&self) -> bool {
        self.handshake
    }

    pub(crate) fn set_times(&mut self, dot_print_time_us: u32, dot_feed_time_us: u32) {
        self.dot_print_time_us = dot_print_time_us;
        self.dot_feed_time_us = dot_feed_time_us;
    }

    pub(crate) fn set_max_chunk_height(&mut self, value: u8) {
        self.max_chunk_height = value;
    }

    pub(crate) fn set_handshake(&mut self, enabled: bool) {
        self.handshake = enabled;
    }

    pub(crate) fn set_barcode_height(&mut self, value: u8) {
        self.barcode_height = value;
    }

    /// Set mode bits and re-derive the character cell
    pub(crate) fn set_mode(&mut self, mask: PrintMode) {
        self.print_mode.insert(mask);
        self.derive_cell();
    }

    /// Clear mode bits and re-derive the character cell
    pub(crate) fn unset_mode(&mut self, mask: PrintMode) {
        self.print_mode.remove(mask);
        self.derive_cell();
    }

    pub(crate) fn clear_mode(&mut self) {
        self.print_mode = PrintMode::empty();
        self.derive_cell();
    }

    fn derive_cell(&mut self) {
        self.char_height = if self.print_mode.contains(PrintMode::DOUBLE_HEIGHT) {
            DOUBLE_CHAR_HEIGHT
        } else {
            CHAR_HEIGHT
        };
        self.max_column = if self.print_mode.contains(PrintMode::DOUBLE_WIDTH) {
            DOUBLE_WIDTH_COLUMNS
        } else {
            COLUMNS
        };
        self.column = self.column.min(self.max_column);
    }

    /// Apply a `GS !` character size
    ///
    /// The printer inserts a line feed when the size changes.
    pub(crate) fn set_size(&mut self, size: Size) {
        self.char_height = size.char_height();
        self.max_column = size.max_column();
        self.column = self.column.min(self.max_column);
        self.prev_byte = LF;
    }

    /// Apply an `ESC 3` line height; values below one cell are raised to it
    pub(crate) fn set_line_height(&mut self, value: u8) -> u8 {
        let value = value.max(CHAR_HEIGHT);
        self.line_spacing = value - CHAR_HEIGHT;
        value
    }

    /// Advance to the next tab stop (every 4 columns)
    pub(crate) fn tab(&mut self) {
        self.column = (self.column.saturating_add(4) & !0b11).min(self.max_column);
    }

    /// Record that the printer is at the start of a fresh line
    pub(crate) fn line_break(&mut self) {
        self.prev_byte = LF;
        self.column = 0;
    }

    /// Record that the last output ended a line without moving the column
    pub(crate) fn mark_newline(&mut self) {
        self.prev_byte = LF;
    }

    pub(crate) fn advance_column(&mut self) {
        self.column = self.column.saturating_add(1).min(self.max_column);
    }

    pub(crate) fn set_prev_byte(&mut self, byte: u8) {
        self.prev_byte = byte;
    }
}
