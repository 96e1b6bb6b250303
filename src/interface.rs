//! Hardware interface abstraction
//!
//! This module provides the [`PrinterInterface`] trait and the [`Interface`]
//! struct for talking to the printer over a serial link.
//!
//! ## Hardware Requirements
//!
//! - Serial TX to the printer (RX is only needed for the paper status query)
//! - Optionally, the printer's DTR output on a GPIO input. When present the
//!   printer drives it high while busy, and output is paced by the line
//!   instead of by time estimates.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use pos_printer::{Interface, PrinterInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::InputPin;
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
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // Serial link plus DTR handshake line
//! let mut interface = Interface::with_ready_line(MockSerial, MockPin);
//!
//! // Initialize printer
//! let _ = interface.write(&[0x1B, b'@']);
//!
//! // Wait until the printer can take more data
//! let _ = interface.wait_ready(&mut delay);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_io::{Read, ReadReady, Write};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the hardware link to the printer
///
/// This trait abstracts over different hardware implementations, allowing
/// the [`Printer`](crate::Printer) to work with any transport.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Implement this
/// trait on your own type for transports that are not `embedded-io` streams.
pub trait PrinterInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send bytes to the printer
    ///
    /// # Errors
    ///
    /// Returns an error if the serial link fails.
    fn write(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Whether at least one byte from the printer is waiting to be read
    fn read_ready(&mut self) -> InterfaceResult<bool, Self::Error>;

    /// Read one byte from the printer without blocking
    ///
    /// Returns `None` when nothing is waiting.
    fn read_byte(&mut self) -> InterfaceResult<Option<u8>, Self::Error>;

    /// Whether a ready/busy line is wired
    fn has_ready_line(&self) -> bool;

    /// Wait for the ready line to report ready (with timeout)
    ///
    /// Returns immediately when no ready line is wired.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::Timeout`] if the line stays busy past the
    /// implementation-specific timeout period.
    fn wait_ready<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over serial and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SerialErr, PinErr> {
    /// Serial communication error
    Serial(SerialErr),
    /// GPIO pin error
    Pin(PinErr),
    /// Timeout waiting for the ready line
    Timeout,
}

impl<SerialErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SerialErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Serial(e) => write!(f, "Serial error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::Timeout => write!(f, "Timeout waiting for printer"),
        }
    }
}

impl<SerialErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SerialErr, PinErr> {}

/// Default timeout for the ready line in milliseconds
pub const DEFAULT_READY_TIMEOUT_MS: u32 = 30_000;

/// Interval between ready line samples in microseconds
pub const READY_POLL_INTERVAL_US: u32 = 100;

/// Placeholder pin type for an [`Interface`] without a ready line
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReadyLine;

impl embedded_hal::digital::ErrorType for NoReadyLine {
    type Error = Infallible;
}

impl InputPin for NoReadyLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// Hardware interface implementation over `embedded-io` serial
///
/// ## Type Parameters
///
/// * `SERIAL` - UART implementing [`Write`], [`Read`] and [`ReadReady`]
/// * `RDY` - Ready/busy line implementing [`InputPin`], or [`NoReadyLine`]
pub struct Interface<SERIAL, RDY = NoReadyLine> {
    /// Serial link to the printer
    serial: SERIAL,
    /// Ready/busy line, if wired
    ready: Option<RDY>,
    /// Timeout for the ready line in milliseconds
    ready_timeout_ms: u32,
    /// Busy polarity (true = line high while busy)
    busy_active_high: bool,
}

impl<SERIAL> Interface<SERIAL, NoReadyLine> {
    /// Create an Interface with no ready line
    ///
    /// Output is then paced purely by time estimates.
    pub fn new(serial: SERIAL) -> Self {
        Self {
            serial,
            ready: None,
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            busy_active_high: true,
        }
    }
}

impl<SERIAL, RDY> Interface<SERIAL, RDY> {
    /// Create an Interface with a ready/busy line
    ///
    /// # Arguments
    ///
    /// * `serial` - Serial link to the printer
    /// * `ready` - Printer's DTR output (input, high while busy)
    pub fn with_ready_line(serial: SERIAL, ready: RDY) -> Self {
        Self {
            serial,
            ready: Some(ready),
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            busy_active_high: true,
        }
    }

    /// Set the ready line timeout in milliseconds
    ///
    /// Default is 30,000ms (30 seconds). Set to 0 to disable timeout.
    pub fn set_ready_timeout(&mut self, timeout_ms: u32) -> &mut Self {
        self.ready_timeout_ms = timeout_ms;
        self
    }

    /// Get the current ready line timeout in milliseconds
    pub fn ready_timeout(&self) -> u32 {
        self.ready_timeout_ms
    }

    /// Set busy polarity
    ///
    /// Default is active-high. Set to false for inverted wiring.
    pub fn set_busy_active_high(&mut self, active_high: bool) -> &mut Self {
        self.busy_active_high = active_high;
        self
    }

    /// Get busy polarity (true = active high)
    pub fn busy_active_high(&self) -> bool {
        self.busy_active_high
    }

    /// Give back the serial link and ready line
    pub fn release(self) -> (SERIAL, Option<RDY>) {
        (self.serial, self.ready)
    }
}

impl<SERIAL, RDY> PrinterInterface for Interface<SERIAL, RDY>
where
    SERIAL: Write + Read + ReadReady,
    RDY: InputPin,
{
    type Error = InterfaceError<
        <SERIAL as embedded_io::ErrorType>::Error,
        <RDY as embedded_hal::digital::ErrorType>::Error,
    >;

    fn write(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.serial.write_all(bytes).map_err(InterfaceError::Serial)
    }

    fn read_ready(&mut self) -> InterfaceResult<bool, Self::Error> {
        self.serial.read_ready().map_err(InterfaceError::Serial)
    }

    fn read_byte(&mut self) -> InterfaceResult<Option<u8>, Self::Error> {
        if !self.read_ready()? {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        let count = self.serial.read(&mut buf).map_err(InterfaceError::Serial)?;
        Ok((count > 0).then_some(buf[0]))
    }

    fn has_ready_line(&self) -> bool {
        self.ready.is_some()
    }

    fn wait_ready<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        let Some(ready) = self.ready.as_mut() else {
            return Ok(());
        };
        let timeout_us = u64::from(self.ready_timeout_ms) * 1_000;
        let mut waited_us = 0u64;

        loop {
            let is_busy = if self.busy_active_high {
                ready.is_high()
            } else {
                ready.is_low()
            };

            let is_busy = match is_busy {
                Ok(value) => value,
                Err(e) => return Err(InterfaceError::Pin(e)),
            };

            if !is_busy {
                return Ok(());
            }

            delay.delay_us(READY_POLL_INTERVAL_US);
            waited_us += u64::from(READY_POLL_INTERVAL_US);
            if timeout_us > 0 && waited_us >= timeout_us {
                return Err(InterfaceError::Timeout);
            }
        }
    }
}
