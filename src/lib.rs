//! Thermal Receipt Printer Driver
//!
//! A driver for ESC/POS-style thermal receipt printers (384 dot head, 58 mm
//! paper) on a serial link with no flow control.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 and `embedded-io` support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Output pacing from per-dot print and feed times, non-blocking by default
//! - Bitmap chunking sized to the printer's receive buffer
//! - Optional ready line handshake
//! - Firmware capability table (2.64 and 2.68 command differences)
//! - Barcodes, QR codes and stored bit images
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use core::fmt::Write as _;
//! use embedded_hal::delay::DelayNs;
//! use pos_printer::{Builder, Interface, Justify, Printer, Size};
//!
//! # struct MockSerial;
//! # impl embedded_io::ErrorType for MockSerial { type Error = Infallible; }
//! # impl embedded_io::Write for MockSerial {
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl embedded_io::Read for MockSerial {
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl embedded_io::ReadReady for MockSerial {
//! #     fn read_ready(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let uart = MockSerial;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(uart);
//! let config = match Builder::new().baud_rate(19_200).firmware(268).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut printer = Printer::new(interface, config);
//! let _ = printer.begin(&mut delay);
//!
//! let _ = printer.justify(Justify::Center);
//! let _ = printer.set_size(Size::Large);
//! let _ = writeln!(printer, "RECEIPT");
//! let _ = printer.feed(2);
//!
//! // Block until the printer has caught up
//! let _ = printer.settle(&mut delay);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Barcode, QR code and stored image parameters
pub mod barcode;
/// Bitmap chunking
pub mod bitmap;
/// Printer command definitions
pub mod command;
/// Printer configuration types and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Output pacing
pub mod pacing;
/// Core printer operations
pub mod printer;
/// Coordinate rotation utilities
pub mod rotation;
/// Printer state tracked on the host side
pub mod state;
/// Text layout parameters
pub mod text;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use barcode::{BarcodeType, BitImageScale, NvBitmap, QrErrorCorrection, QrModel, QrOptions};
pub use bitmap::{ChunkPlan, PixelSource, ReaderSource, SliceSource};
pub use config::{Builder, Capabilities, Config};
pub use error::{BuilderError, CanvasError, Error};
pub use interface::InterfaceError;
pub use interface::{DEFAULT_READY_TIMEOUT_MS, Interface, NoReadyLine, PrinterInterface};
pub use printer::Printer;
pub use rotation::Rotation;
pub use state::{DeviceState, PrintMode};
pub use text::{Justify, Size};

#[cfg(feature = "graphics")]
pub use graphics::Canvas;
