//! Barcode, QR code and stored image parameters
//!
//! Every constructor here is lenient: an out-of-range value maps to a
//! documented fallback instead of failing, so the printer always receives a
//! valid command.

use crate::config::Capabilities;

/// One-dimensional barcode symbologies (GS k)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BarcodeType {
    /// UPC-A, 11 or 12 digits
    UpcA,
    /// UPC-E, 11 or 12 digits
    UpcE,
    /// EAN-13, 12 or 13 digits
    Ean13,
    /// EAN-8, 7 or 8 digits
    Ean8,
    /// Code 39
    Code39,
    /// Interleaved 2 of 5, even number of digits
    Itf,
    /// Codabar
    Codabar,
    /// Code 93
    Code93,
    /// Code 128
    #[default]
    Code128,
}

impl BarcodeType {
    /// Zero-based symbology index
    const fn index(self) -> u8 {
        match self {
            Self::UpcA => 0,
            Self::UpcE => 1,
            Self::Ean13 => 2,
            Self::Ean8 => 3,
            Self::Code39 => 4,
            Self::Itf => 5,
            Self::Codabar => 6,
            Self::Code93 => 7,
            Self::Code128 => 8,
        }
    }

    /// Type byte for `GS k` on a printer with the given capabilities
    ///
    /// Firmware with extended barcode types numbers them from 65, older
    /// firmware from 0.
    pub const fn code(self, capabilities: &Capabilities) -> u8 {
        if capabilities.extended_barcode_types {
            self.index() + 65
        } else {
            self.index()
        }
    }
}

impl From<u8> for BarcodeType {
    /// Accepts either numbering (0..=8 or 65..=73); anything else is Code 128.
    fn from(value: u8) -> Self {
        let index = if value >= 65 { value - 65 } else { value };
        match index {
            0 => Self::UpcA,
            1 => Self::UpcE,
            2 => Self::Ean13,
            3 => Self::Ean8,
            4 => Self::Code39,
            5 => Self::Itf,
            6 => Self::Codabar,
            7 => Self::Code93,
            _ => Self::Code128,
        }
    }
}

/// Longest barcode payload accepted with a length prefix
pub const MAX_BARCODE_LEN: usize = 255;

/// QR code symbol model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum QrModel {
    /// Model 1
    Model1 = 49,
    /// Model 2
    #[default]
    Model2 = 50,
    /// Micro QR
    Micro = 51,
}

impl From<u8> for QrModel {
    /// Values outside 49..=51 select model 2. Some printers ignore the
    /// model entirely.
    fn from(value: u8) -> Self {
        match value {
            49 => Self::Model1,
            51 => Self::Micro,
            _ => Self::Model2,
        }
    }
}

/// QR code error correction level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum QrErrorCorrection {
    /// Recovers 7% of the symbol
    #[default]
    L = 48,
    /// Recovers 15%
    M = 49,
    /// Recovers 25%
    Q = 50,
    /// Recovers 30%
    H = 51,
}

impl From<u8> for QrErrorCorrection {
    /// Values outside 48..=51 select level L.
    fn from(value: u8) -> Self {
        match value {
            49 => Self::M,
            50 => Self::Q,
            51 => Self::H,
            _ => Self::L,
        }
    }
}

/// Smallest QR module size in dots
pub const MIN_QR_MODULE_SIZE: u8 = 1;
/// Largest QR module size in dots
pub const MAX_QR_MODULE_SIZE: u8 = 16;
/// Module size used when the requested one is out of range
pub const DEFAULT_QR_MODULE_SIZE: u8 = 3;

/// Parameters for [`Printer::print_qr_code`](crate::Printer::print_qr_code)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrOptions {
    /// Symbol model
    pub model: QrModel,
    /// Module size in dots
    module_size: u8,
    /// Error correction level
    pub error_correction: QrErrorCorrection,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            model: QrModel::default(),
            module_size: DEFAULT_QR_MODULE_SIZE,
            error_correction: QrErrorCorrection::default(),
        }
    }
}

impl QrOptions {
    /// Options with the given error correction, module size and model
    ///
    /// A module size outside 1..=16 falls back to 3.
    pub fn new(error_correction: QrErrorCorrection, module_size: u8, model: QrModel) -> Self {
        let mut options = Self {
            model,
            module_size: DEFAULT_QR_MODULE_SIZE,
            error_correction,
        };
        options.set_module_size(module_size);
        options
    }

    /// Module size in dots, always within 1..=16
    pub fn module_size(&self) -> u8 {
        self.module_size
    }

    /// Set the module size, falling back to 3 when out of range
    pub fn set_module_size(&mut self, value: u8) {
        self.module_size = if (MIN_QR_MODULE_SIZE..=MAX_QR_MODULE_SIZE).contains(&value) {
            value
        } else {
            DEFAULT_QR_MODULE_SIZE
        };
    }
}

/// Magnification for printing a defined bit image (GS /)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum BitImageScale {
    /// 1x width, 1x height
    #[default]
    Normal = 0,
    /// 2x width
    DoubleWidth = 1,
    /// 2x height
    DoubleHeight = 2,
    /// 2x width and height
    Quadruple = 3,
}

impl From<u8> for BitImageScale {
    /// Only the low two bits are meaningful.
    fn from(value: u8) -> Self {
        match value & 0b11 {
            1 => Self::DoubleWidth,
            2 => Self::DoubleHeight,
            3 => Self::Quadruple,
            _ => Self::Normal,
        }
    }
}

/// One image to store in the printer's non-volatile memory (FS q)
///
/// The data is column-major: each column of `height` dots is packed into
/// `ceil(height / 8)` bytes, MSB on top. `width` is rounded down to a
/// multiple of 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NvBitmap<'a> {
    /// Width in dots
    pub width: u16,
    /// Height in dots
    pub height: u16,
    /// Column-major image bytes
    pub data: &'a [u8],
}

impl<'a> NvBitmap<'a> {
    /// Describe a stored image
    pub fn new(width: u16, height: u16, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in units of 8 dots
    pub fn width_bytes(&self) -> u16 {
        self.width / 8
    }

    /// Height in units of 8 dots
    pub fn height_bytes(&self) -> u16 {
        self.height.div_ceil(8)
    }

    /// Payload length the printer expects
    pub fn payload_len(&self) -> usize {
        usize::from(self.width_bytes()) * usize::from(self.height_bytes()) * 8
    }
}
