//! Output pacing
//!
//! The serial link has no flow control and the printer's receive buffer is
//! small, so the driver estimates how long the mechanism will stay busy with
//! what has already been sent. The estimate is a lower bound derived from
//! calibration constants, not a measurement.
//!
//! Nothing in this module sleeps. [`Pacer`] accumulates the estimate and the
//! caller decides whether to block it off
//! ([`Printer::settle`](crate::Printer::settle)) or to schedule work after it
//! elapses ([`Printer::take_pending_delay_us`](crate::Printer::take_pending_delay_us)).
//!
//! ## Example
//!
//! ```
//! use pos_printer::pacing::{byte_transmit_time_us, line_advance_us, BITS_PER_BYTE};
//! use pos_printer::DeviceState;
//!
//! // 11 bits per byte at 19200 baud
//! assert_eq!(byte_transmit_time_us(BITS_PER_BYTE, 19_200), 573);
//!
//! let mut state = DeviceState::new(30_000, 2_100, 255);
//! assert_eq!(line_advance_us(&mut state, b'A'), 0);
//! // 24 dot rows printed, 6 fed
//! assert_eq!(line_advance_us(&mut state, b'\n'), 24 * 30_000 + 6 * 2_100);
//! ```

use crate::command::LF;
use crate::state::DeviceState;

/// Bits on the wire per byte: start, 8 data, stop, and one idle bit
pub const BITS_PER_BYTE: u32 = 11;

/// Time to shift one byte out at `baud_rate`, in microseconds, rounded to nearest
///
/// Saturates at `u32::MAX`.
pub fn byte_transmit_time_us(bits_per_byte: u32, baud_rate: u32) -> u32 {
    let baud = u64::from(baud_rate.max(1));
    let bits = u64::from(bits_per_byte) * 1_000_000;
    u32::try_from((bits + baud / 2) / baud).unwrap_or(u32::MAX)
}

/// Account for one text byte and return the extra time the mechanism needs
///
/// Returns 0 unless `byte` ends a line, either as an explicit `LF` or because
/// the column counter has reached the wrap point. A line that follows a blank
/// line is pure feed; a line with text on it is one cell of printing followed
/// by the line spacing as feed. Afterwards the column is 0 and the byte counts
/// as `LF` for the next call even when the cause was a wrap.
pub fn line_advance_us(state: &mut DeviceState, byte: u8) -> u32 {
    if byte != LF && state.column() < state.max_column() {
        state.advance_column();
        state.set_prev_byte(byte);
        return 0;
    }

    let char_height = u32::from(state.char_height());
    let spacing = u32::from(state.line_spacing());
    let delay = if state.prev_byte() == LF {
        (char_height + spacing).saturating_mul(state.dot_feed_time_us())
    } else {
        char_height
            .saturating_mul(state.dot_print_time_us())
            .saturating_add(spacing.saturating_mul(state.dot_feed_time_us()))
    };
    state.line_break();
    delay
}

/// Running estimate of time the printer still needs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pacer {
    byte_time_us: u32,
    pending_us: u32,
}

impl Pacer {
    /// Create a pacer for a link running at `baud_rate`
    pub fn new(baud_rate: u32) -> Self {
        Self {
            byte_time_us: byte_transmit_time_us(BITS_PER_BYTE, baud_rate),
            pending_us: 0,
        }
    }

    /// Per-byte transmission time
    pub fn byte_time_us(&self) -> u32 {
        self.byte_time_us
    }

    /// Account for `count` raw bytes sent (commands, pixel data)
    pub fn bytes(&mut self, count: usize) {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.add(self.byte_time_us.saturating_mul(count));
    }

    /// Account for one text byte, returning the total delay it costs
    pub fn text_byte(&mut self, state: &mut DeviceState, byte: u8) -> u32 {
        let delay = self.byte_time_us.saturating_add(line_advance_us(state, byte));
        self.add(delay);
        delay
    }

    /// Add an estimate for physical work (feeding, printing a chunk)
    pub fn add(&mut self, us: u32) {
        self.pending_us = self.pending_us.saturating_add(us);
    }

    /// Estimate not yet waited out
    pub fn pending_us(&self) -> u32 {
        self.pending_us
    }

    /// Return the pending estimate and clear it
    pub fn take(&mut self) -> u32 {
        core::mem::take(&mut self.pending_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> DeviceState {
        DeviceState::new(30_000, 2_100, 255)
    }

    #[test]
    fn test_byte_time_saturates() {
        assert_eq!(byte_transmit_time_us(u32::MAX, 1), u32::MAX);
        assert_eq!(byte_transmit_time_us(4_295, 1), u32::MAX);
        assert_eq!(byte_transmit_time_us(4_294, 1), 4_294_000_000);
    }

    #[test]
    fn test_byte_time_formula() {
        for baud in [300u32, 1_200, 9_600, 19_200, 38_400, 115_200, 1_000_000, 7] {
            let expected = (11_000_000 + baud / 2) / baud;
            assert_eq!(byte_transmit_time_us(BITS_PER_BYTE, baud), expected);
        }
        assert_eq!(byte_transmit_time_us(BITS_PER_BYTE, 9_600), 1_146);
    }

    #[test]
    fn test_byte_time_non_increasing_in_baud() {
        let mut last = u32::MAX;
        for baud in 1..5_000u32 {
            let time = byte_transmit_time_us(BITS_PER_BYTE, baud * 37);
            assert!(time <= last);
            last = time;
        }
    }

    #[test]
    fn test_text_line_delay() {
        let mut state = state();
        // Start mid-line so the LF ends a text line
        state.set_prev_byte(b'x');
        assert_eq!(line_advance_us(&mut state, b'A'), 0);
        assert_eq!(line_advance_us(&mut state, b'B'), 0);
        assert_eq!(state.column(), 2);
        assert_eq!(line_advance_us(&mut state, b'\n'), 732_600);
        assert_eq!(state.column(), 0);
    }

    #[test]
    fn test_blank_line_delay_is_all_feed() {
        let mut state = state();
        assert_eq!(line_advance_us(&mut state, b'\n'), 30 * 2_100);
        assert_eq!(line_advance_us(&mut state, b'\n'), 30 * 2_100);
    }

    #[test]
    fn test_wrap_counts_as_newline() {
        let mut state = state();
        for _ in 0..32 {
            assert_eq!(line_advance_us(&mut state, b'x'), 0);
        }
        assert_eq!(state.column(), 32);
        // 33rd byte wraps: text line delay
        assert_eq!(line_advance_us(&mut state, b'x'), 732_600);
        assert_eq!(state.column(), 0);
        assert_eq!(state.prev_byte(), b'\n');
        // An LF right after a wrap feeds a blank line
        assert_eq!(line_advance_us(&mut state, b'\n'), 30 * 2_100);
    }

    #[test]
    fn test_column_never_exceeds_max() {
        let mut state = state();
        let text = b"The quick brown fox jumps over the lazy dog\nand again, and again and again.";
        for &byte in text.iter().cycle().take(500) {
            line_advance_us(&mut state, byte);
            assert!(state.column() <= state.max_column());
        }
    }

    #[test]
    fn test_pacer_accumulates_and_takes() {
        let mut state = state();
        let mut pacer = Pacer::new(19_200);
        assert_eq!(pacer.byte_time_us(), 573);

        pacer.bytes(3);
        assert_eq!(pacer.pending_us(), 3 * 573);

        state.set_prev_byte(b'x');
        assert_eq!(pacer.text_byte(&mut state, b'\n'), 573 + 732_600);
        assert_eq!(pacer.take(), 4 * 573 + 732_600);
        assert_eq!(pacer.pending_us(), 0);
    }
}
