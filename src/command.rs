//! ESC/POS command definitions
//!
//! This module defines the control bytes and command prefixes understood by
//! the printer. Commands are plain byte sequences on the serial link: a
//! control byte (usually `ESC` or `GS`), a command letter, then zero or more
//! parameter bytes.
//!
//! ## Command Structure
//!
//! | Shape                 | Example            |
//! |-----------------------|--------------------|
//! | Single control byte   | `LF`, `FF`, `HT`   |
//! | Prefix, no parameters | `ESC @`            |
//! | Prefix + parameters   | `ESC a n`          |
//! | Prefix + data block   | `GS v 0 m xL xH yL yH d1...dk` |
//!
//! Multi-byte integers are sent low byte first.
//!
//! ## Example
//!
//! ```
//! use pos_printer::command;
//!
//! assert_eq!(command::INITIALIZE, [0x1B, b'@']);
//! assert_eq!(command::JUSTIFY, [0x1B, b'a']);
//! ```

// Control bytes

/// Null, ignored by the printer
pub const NUL: u8 = 0x00;

/// Horizontal tab (0x09)
pub const HT: u8 = b'\t';

/// Line feed (0x0A)
///
/// Prints the line buffer and advances paper by the current line spacing.
pub const LF: u8 = b'\n';

/// Form feed (0x0C)
pub const FF: u8 = 0x0C;

/// Data link escape (0x10), prefix of real-time status requests
pub const DLE: u8 = 0x10;

/// End of transmission (0x04)
pub const EOT: u8 = 0x04;

/// Device control 2 (0x12)
pub const DC2: u8 = 0x12;

/// Byte stripped from the text path without being sent (0x13)
pub const STRIPPED: u8 = 0x13;

/// Escape (0x1B), prefix of most commands
pub const ESC: u8 = 0x1B;

/// Field separator (0x1C), prefix of NV bitmap commands
pub const FS: u8 = 0x1C;

/// Group separator (0x1D), prefix of extended commands
pub const GS: u8 = 0x1D;

/// Wake byte (0xFF)
///
/// Any byte wakes a sleeping printer; 0xFF is otherwise unused.
pub const WAKE: u8 = 0xFF;

// System control commands

/// Initialize printer (ESC @)
///
/// Clears the print buffer and restores power-on text settings.
pub const INITIALIZE: [u8; 2] = [ESC, b'@'];

/// Print settings (ESC 7 n1 n2 n3)
///
/// - `n1`: max heating dots, units of 8 dots minus one
/// - `n2`: heating time, units of 10 us
/// - `n3`: heating interval, units of 10 us
pub const HEAT_SETTINGS: [u8; 2] = [ESC, b'7'];

/// Set sleep timeout (ESC 8 n1 [n2])
///
/// Recent firmware takes a 16-bit seconds value, older firmware a single byte.
/// A timeout of 0 disables sleep.
pub const SLEEP_TIMEOUT: [u8; 2] = [ESC, b'8'];

/// Select peripheral device (ESC = n)
///
/// `n = 1` online, `n = 0` offline (input ignored).
pub const ONLINE: [u8; 2] = [ESC, b'='];

/// Enable automatic status back (GS a n)
///
/// Bit 5 enables the handshake signal on the DTR line.
pub const AUTO_STATUS_BACK: [u8; 2] = [GS, b'a'];

/// Flag for [`AUTO_STATUS_BACK`] that enables the DTR handshake
pub const ASB_HANDSHAKE: u8 = 1 << 5;

/// Print self-test page (DC2 T)
pub const TEST_PAGE: [u8; 2] = [DC2, b'T'];

/// Real-time paper sensor status (DLE EOT 4)
pub const PAPER_STATUS: [u8; 3] = [DLE, EOT, 4];

/// Bit set in the paper status reply when paper is out
pub const PAPER_OUT_MASK: u8 = 0b0000_0100;

// Text formatting commands

/// Select print mode (ESC ! n)
///
/// `n` is the print mode mask, see [`crate::state::PrintMode`].
pub const PRINT_MODE: [u8; 2] = [ESC, b'!'];

/// Reverse (white on black) printing (GS B n)
///
/// Only on firmware with native inverse support.
pub const INVERSE: [u8; 2] = [GS, b'B'];

/// Justification (ESC a n), `n` in {0 left, 1 center, 2 right}
pub const JUSTIFY: [u8; 2] = [ESC, b'a'];

/// Character size (GS ! n), `n` in {0x00, 0x01, 0x11}
pub const CHAR_SIZE: [u8; 2] = [GS, b'!'];

/// Underline (ESC - n), `n` in {0, 1, 2}
pub const UNDERLINE: [u8; 2] = [ESC, b'-'];

/// Line spacing in dots (ESC 3 n)
pub const LINE_SPACING: [u8; 2] = [ESC, b'3'];

/// Right-side character spacing (ESC SP n)
pub const CHAR_SPACING: [u8; 2] = [ESC, b' '];

/// International character set (ESC R n), `n` in 0..=15
pub const CHARSET: [u8; 2] = [ESC, b'R'];

/// Character code table (ESC t n), `n` in 0..=47
pub const CODE_PAGE: [u8; 2] = [ESC, b't'];

/// Horizontal tab positions (ESC D n1...nk NUL)
pub const TAB_STOPS: [u8; 2] = [ESC, b'D'];

/// Tab stops programmed on reset, every 4 columns, NUL terminated
pub const DEFAULT_TAB_STOPS: [u8; 8] = [4, 8, 12, 16, 20, 24, 28, NUL];

// Paper movement commands

/// Print and feed n lines (ESC d n)
pub const FEED_LINES: [u8; 2] = [ESC, b'd'];

/// Print and feed n dot rows (ESC J n)
pub const FEED_ROWS: [u8; 2] = [ESC, b'J'];

/// Full cut (GS V 0)
pub const CUT: [u8; 3] = [GS, b'V', 0];

/// Sound the buzzer (ESC o)
pub const BEEP: [u8; 2] = [ESC, b'o'];

/// Buzzer duration (GS o n)
pub const BEEP_DURATION: [u8; 2] = [GS, b'o'];

// Barcode commands

/// Barcode height in dots (GS h n)
pub const BARCODE_HEIGHT: [u8; 2] = [GS, b'h'];

/// Human readable label position (GS H n), 2 = below
pub const BARCODE_LABEL: [u8; 2] = [GS, b'H'];

/// Label position used for every barcode: below the bars
pub const BARCODE_LABEL_BELOW: u8 = 2;

/// Barcode module width (GS w n)
pub const BARCODE_WIDTH: [u8; 2] = [GS, b'w'];

/// Module width used for every barcode (0.375 mm / 1.0 mm thin/thick)
pub const BARCODE_MODULE_WIDTH: u8 = 3;

/// Print barcode (GS k m ...)
pub const BARCODE_PRINT: [u8; 2] = [GS, b'k'];

// QR code commands (GS ( k pL pH cn fn ...)

/// QR code function prefix (GS ( k)
pub const QR_PREFIX: [u8; 3] = [GS, b'(', b'k'];

/// Symbol type byte `cn` for QR codes
pub const QR_CN: u8 = 49;

/// Function 165: select model
pub const QR_FN_MODEL: u8 = 65;

/// Function 167: module size
pub const QR_FN_MODULE_SIZE: u8 = 67;

/// Function 169: error correction level
pub const QR_FN_ERROR_CORRECTION: u8 = 69;

/// Function 180: store symbol data
pub const QR_FN_STORE: u8 = 80;

/// Function 181: print stored symbol
pub const QR_FN_PRINT: u8 = 81;

/// Trailing `m` parameter for store and print functions
pub const QR_M: u8 = 48;

// Bit image commands

/// Print a raster chunk (ESC * h w d1...dk)
///
/// - `h`: chunk height in rows
/// - `w`: row width in bytes, at most [`crate::bitmap::MAX_ROW_BYTES`]
/// - `k = h * w`
pub const RASTER_CHUNK: [u8; 2] = [ESC, b'*'];

/// Print raster bit image (GS v 0 m xL xH yL yH d1...dk)
pub const RASTER_IMAGE: [u8; 3] = [GS, b'v', b'0'];

/// Define downloaded bit image (GS * x y d1...dk), `k = x * y * 8`
pub const DEFINE_BIT_IMAGE: [u8; 2] = [GS, b'*'];

/// Print downloaded bit image (GS / m)
pub const PRINT_BIT_IMAGE: [u8; 2] = [GS, b'/'];

/// Define NV bit images (FS q n [xL xH yL yH d1...dk]1...[...]n)
pub const DEFINE_NV_BITMAP: [u8; 2] = [FS, b'q'];

/// Print NV bit image (FS p n m)
pub const PRINT_NV_BITMAP: [u8; 2] = [FS, b'p'];
