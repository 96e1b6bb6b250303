//! Core printer operations

use embedded_hal::delay::DelayNs;

use crate::barcode::{BarcodeType, BitImageScale, MAX_BARCODE_LEN, NvBitmap, QrOptions};
use crate::bitmap::{
    ChunkPlan, HEADER_LEN, MAX_ROW_BYTES, PixelSource, SliceSource, decode_header, row_stride,
};
use crate::command::{
    ASB_HANDSHAKE, AUTO_STATUS_BACK, BARCODE_HEIGHT, BARCODE_LABEL, BARCODE_LABEL_BELOW,
    BARCODE_MODULE_WIDTH, BARCODE_PRINT, BARCODE_WIDTH, BEEP, BEEP_DURATION, CHAR_SIZE,
    CHAR_SPACING, CHARSET, CODE_PAGE, CUT, DEFAULT_TAB_STOPS, DEFINE_BIT_IMAGE, DEFINE_NV_BITMAP,
    FEED_LINES, FEED_ROWS, FF, HEAT_SETTINGS, HT, INITIALIZE, INVERSE, JUSTIFY, LF, LINE_SPACING,
    NUL, ONLINE, PAPER_OUT_MASK, PAPER_STATUS, PRINT_BIT_IMAGE, PRINT_MODE, PRINT_NV_BITMAP,
    QR_CN, QR_FN_ERROR_CORRECTION, QR_FN_MODEL, QR_FN_MODULE_SIZE, QR_FN_PRINT, QR_FN_STORE,
    QR_M, QR_PREFIX, RASTER_CHUNK, RASTER_IMAGE, SLEEP_TIMEOUT, STRIPPED, TAB_STOPS, TEST_PAGE,
    UNDERLINE, WAKE,
};
use crate::config::{Capabilities, Config};
use crate::error::Error;
use crate::interface::PrinterInterface;
use crate::pacing::Pacer;
use crate::state::{DeviceState, PrintMode};
use crate::text::{Justify, MAX_CHARSET, MAX_CODE_PAGE, MAX_UNDERLINE_WEIGHT, Size};

type PrinterResult<I> = core::result::Result<(), Error<I>>;

/// Paper status polls before giving up
pub const PAPER_STATUS_POLLS: u8 = 10;

/// Interval between paper status polls in milliseconds
pub const PAPER_STATUS_POLL_MS: u32 = 100;

/// Settle time after waking recent firmware, in milliseconds
const WAKE_SETTLE_MS: u32 = 50;

/// NULs sent after waking old firmware
const WAKE_NUL_COUNT: usize = 10;

/// Thermal receipt printer driver
///
/// Owns the interface, the configuration, the [`DeviceState`] model and the
/// pacing estimate. Every operation goes through `&mut self`; a host that
/// shares one printer must serialize access itself.
///
/// Text output never blocks: [`write_byte`](Self::write_byte) and friends
/// return the estimated busy time and add it to a pending total. A blocking
/// host calls [`settle`](Self::settle) before it needs the printer idle; an
/// event-driven host calls [`take_pending_delay_us`](Self::take_pending_delay_us)
/// and schedules its next write that far out.
pub struct Printer<I>
where
    I: PrinterInterface,
{
    /// Hardware interface
    interface: I,
    /// Printer configuration
    config: Config,
    /// Host-side model of the printer
    state: DeviceState,
    /// Busy time not yet waited out
    pacer: Pacer,
}

impl<I> Printer<I>
where
    I: PrinterInterface,
{
    /// Create a new Printer instance
    ///
    /// Nothing is sent until [`begin`](Self::begin).
    pub fn new(interface: I, config: Config) -> Self {
        let state = DeviceState::new(
            config.dot_print_time_us,
            config.dot_feed_time_us,
            config.max_chunk_height,
        );
        let pacer = Pacer::new(config.baud_rate);
        Self {
            interface,
            config,
            state,
            pacer,
        }
    }

    /// Wake, configure and reset the printer
    ///
    /// The printer needs about half a second after power-up before it can
    /// receive data; the caller is responsible for that wait.
    pub fn begin<D: DelayNs>(&mut self, delay: &mut D) -> PrinterResult<I> {
        self.wake(delay)?;

        self.send(&HEAT_SETTINGS)?;
        self.send(&[
            self.config.heat_dots,
            self.config.heat_time,
            self.config.heat_interval,
        ])?;

        if self.interface.has_ready_line() {
            self.send(&AUTO_STATUS_BACK)?;
            self.send(&[ASB_HANDSHAKE])?;
            self.state.set_handshake(true);
            log::debug!("ready line handshake enabled");
        }

        self.set_default()?;
        log::debug!(
            "printer initialized: {} baud, {} us/byte",
            self.config.baud_rate,
            self.pacer.byte_time_us()
        );
        Ok(())
    }

    /// Reset the printer and the host-side state to power-on defaults
    pub fn reset(&mut self) -> PrinterResult<I> {
        self.send(&INITIALIZE)?;
        self.state.reset();
        if self.config.capabilities.tab_stops {
            self.send(&TAB_STOPS)?;
            self.send(&DEFAULT_TAB_STOPS)?;
        }
        Ok(())
    }

    /// Restore the configured text formatting defaults
    pub fn set_default(&mut self) -> PrinterResult<I> {
        self.online()?;
        self.justify(Justify::Left)?;
        self.inverse_off()?;
        self.double_height_off()?;
        self.set_line_height(self.config.line_height)?;
        self.bold_off()?;
        self.underline_off()?;
        self.set_barcode_height(self.config.barcode_height)?;
        self.set_size(Size::Small)?;
        self.set_charset(self.config.charset)?;
        self.set_code_page(self.config.code_page)
    }

    /// Wake the printer from sleep and reset it
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> PrinterResult<I> {
        self.send(&[WAKE])?;
        if self.config.capabilities.wide_sleep_timeout {
            delay.delay_ms(WAKE_SETTLE_MS);
            // Sleep off, or the printer dozes again
            self.send(&SLEEP_TIMEOUT)?;
            self.send(&[0, 0])?;
        } else {
            // Plain delay is not enough on old firmware; NULs are no-ops
            self.send(&[NUL; WAKE_NUL_COUNT])?;
        }
        self.reset()
    }

    /// Put the printer to sleep immediately
    pub fn sleep(&mut self) -> PrinterResult<I> {
        // 0 would mean "never sleep"
        self.sleep_after(1)
    }

    /// Put the printer to sleep after `seconds` of inactivity
    ///
    /// Old firmware takes a single byte; longer timeouts are clamped to 255.
    pub fn sleep_after(&mut self, seconds: u16) -> PrinterResult<I> {
        self.send(&SLEEP_TIMEOUT)?;
        if self.config.capabilities.wide_sleep_timeout {
            self.send(&seconds.to_le_bytes())
        } else {
            self.send(&[seconds.min(u16::from(u8::MAX)) as u8])
        }
    }

    /// Obey subsequent commands
    pub fn online(&mut self) -> PrinterResult<I> {
        self.send(&ONLINE)?;
        self.send(&[1])
    }

    /// Ignore subsequent commands until [`online`](Self::online)
    pub fn offline(&mut self) -> PrinterResult<I> {
        self.send(&ONLINE)?;
        self.send(&[0])
    }

    /// Print the built-in test page
    pub fn test_page(&mut self) -> PrinterResult<I> {
        self.send(&TEST_PAGE)
    }

    /// Set print mode bits
    pub fn set_print_mode(&mut self, mask: PrintMode) -> PrinterResult<I> {
        self.state.set_mode(mask);
        self.write_print_mode()
    }

    /// Clear print mode bits
    pub fn unset_print_mode(&mut self, mask: PrintMode) -> PrinterResult<I> {
        self.state.unset_mode(mask);
        self.write_print_mode()
    }

    fn write_print_mode(&mut self) -> PrinterResult<I> {
        self.send(&PRINT_MODE)?;
        self.send(&[self.state.print_mode().bits()])
    }

    /// Clear every print mode attribute
    pub fn normal(&mut self) -> PrinterResult<I> {
        self.state.clear_mode();
        self.write_print_mode()
    }

    /// White on black
    ///
    /// Firmware without `GS B` gets the `ESC !` inverse bit instead.
    pub fn inverse_on(&mut self) -> PrinterResult<I> {
        if self.config.capabilities.native_inverse {
            self.send(&INVERSE)?;
            self.send(&[1])
        } else {
            self.set_print_mode(PrintMode::INVERSE)
        }
    }

    /// Black on white
    pub fn inverse_off(&mut self) -> PrinterResult<I> {
        if self.config.capabilities.native_inverse {
            self.send(&INVERSE)?;
            self.send(&[0])
        } else {
            self.unset_print_mode(PrintMode::INVERSE)
        }
    }

    /// Rotate text 180 degrees
    pub fn upside_down_on(&mut self) -> PrinterResult<I> {
        self.set_print_mode(PrintMode::UPSIDE_DOWN)
    }

    /// Upright text
    pub fn upside_down_off(&mut self) -> PrinterResult<I> {
        self.unset_print_mode(PrintMode::UPSIDE_DOWN)
    }

    /// Double height characters (48 dot cell)
    pub fn double_height_on(&mut self) -> PrinterResult<I> {
        self.set_print_mode(PrintMode::DOUBLE_HEIGHT)
    }

    /// Normal height characters
    pub fn double_height_off(&mut self) -> PrinterResult<I> {
        self.unset_print_mode(PrintMode::DOUBLE_HEIGHT)
    }

    /// Double width characters (16 columns)
    pub fn double_width_on(&mut self) -> PrinterResult<I> {
        self.set_print_mode(PrintMode::DOUBLE_WIDTH)
    }

    /// Normal width characters
    pub fn double_width_off(&mut self) -> PrinterResult<I> {
        self.unset_print_mode(PrintMode::DOUBLE_WIDTH)
    }

    /// Strike-through
    pub fn strike_on(&mut self) -> PrinterResult<I> {
        self.set_print_mode(PrintMode::STRIKE)
    }

    /// No strike-through
    pub fn strike_off(&mut self) -> PrinterResult<I> {
        self.unset_print_mode(PrintMode::STRIKE)
    }

    /// Emphasized text
    pub fn bold_on(&mut self) -> PrinterResult<I> {
        self.set_print_mode(PrintMode::BOLD)
    }

    /// Regular weight text
    pub fn bold_off(&mut self) -> PrinterResult<I> {
        self.unset_print_mode(PrintMode::BOLD)
    }

    /// Set horizontal justification
    pub fn justify(&mut self, justify: Justify) -> PrinterResult<I> {
        self.send(&JUSTIFY)?;
        self.send(&[justify as u8])
    }

    /// Select a character size
    ///
    /// The printer feeds a line when the size changes.
    pub fn set_size(&mut self, size: Size) -> PrinterResult<I> {
        self.send(&CHAR_SIZE)?;
        self.send(&[size.code()])?;
        self.state.set_size(size);
        Ok(())
    }

    /// Underline with the given weight (1 normal, 2 thick)
    pub fn underline_on(&mut self, weight: u8) -> PrinterResult<I> {
        self.send(&UNDERLINE)?;
        self.send(&[weight.min(MAX_UNDERLINE_WEIGHT)])
    }

    /// No underline
    pub fn underline_off(&mut self) -> PrinterResult<I> {
        self.send(&UNDERLINE)?;
        self.send(&[0])
    }

    /// Set the line height in dots
    ///
    /// The printer ignores the character height here, so this really sets
    /// the gap between lines. Values below 24 are raised to 24.
    pub fn set_line_height(&mut self, dots: u8) -> PrinterResult<I> {
        let dots = self.state.set_line_height(dots);
        self.send(&LINE_SPACING)?;
        self.send(&[dots])
    }

    /// Select the international character set (0..=15)
    pub fn set_charset(&mut self, charset: u8) -> PrinterResult<I> {
        self.send(&CHARSET)?;
        self.send(&[charset.min(MAX_CHARSET)])
    }

    /// Select the character code table (0..=47)
    pub fn set_code_page(&mut self, code_page: u8) -> PrinterResult<I> {
        self.send(&CODE_PAGE)?;
        self.send(&[code_page.min(MAX_CODE_PAGE)])
    }

    /// Move to the next tab stop
    pub fn tab(&mut self) -> PrinterResult<I> {
        self.send(&[HT])?;
        self.state.tab();
        Ok(())
    }

    /// Set extra spacing between characters in dots
    pub fn set_char_spacing(&mut self, dots: u8) -> PrinterResult<I> {
        self.send(&CHAR_SPACING)?;
        self.send(&[dots])
    }

    /// Feed `lines` text lines
    ///
    /// Old firmware feeds extra lines with `ESC d`, so it gets plain line
    /// feeds through the text path instead.
    pub fn feed(&mut self, lines: u8) -> PrinterResult<I> {
        if self.config.capabilities.native_feed {
            self.send(&FEED_LINES)?;
            self.send(&[lines])?;
            let line_dots =
                u32::from(self.state.char_height()) + u32::from(self.state.line_spacing());
            self.pacer.add(
                u32::from(lines)
                    .saturating_mul(line_dots)
                    .saturating_mul(self.state.dot_feed_time_us()),
            );
            self.state.line_break();
        } else {
            for _ in 0..lines {
                self.write_byte(LF)?;
            }
        }
        Ok(())
    }

    /// Feed `rows` dot rows
    pub fn feed_rows(&mut self, rows: u8) -> PrinterResult<I> {
        self.send(&FEED_ROWS)?;
        self.send(&[rows])?;
        self.pacer
            .add(u32::from(rows).saturating_mul(self.state.dot_feed_time_us()));
        self.state.line_break();
        Ok(())
    }

    /// Print whatever is in the printer's line buffer
    pub fn flush(&mut self) -> PrinterResult<I> {
        self.send(&[FF])
    }

    /// Cut the paper (units with a cutter only)
    pub fn cut(&mut self) -> PrinterResult<I> {
        self.send(&CUT)
    }

    /// Sound the buzzer
    pub fn beep(&mut self) -> PrinterResult<I> {
        self.send(&BEEP)
    }

    /// Set the buzzer duration
    pub fn set_beep(&mut self, duration: u8) -> PrinterResult<I> {
        self.send(&BEEP_DURATION)?;
        self.send(&[duration])
    }

    /// Set the barcode height in dots (at least 1)
    pub fn set_barcode_height(&mut self, dots: u8) -> PrinterResult<I> {
        let dots = dots.max(1);
        self.send(&BARCODE_HEIGHT)?;
        self.send(&[dots])?;
        self.state.set_barcode_height(dots);
        Ok(())
    }

    /// Print a barcode with its label below
    ///
    /// Recent firmware takes up to 255 length-prefixed bytes. Old firmware
    /// takes NUL-terminated data, so `data` is cut at its first NUL.
    pub fn print_barcode(&mut self, data: &[u8], kind: BarcodeType) -> PrinterResult<I> {
        // Recent firmware won't print a barcode without a feed first
        self.feed(1)?;
        self.send(&BARCODE_LABEL)?;
        self.send(&[BARCODE_LABEL_BELOW])?;
        self.send(&BARCODE_WIDTH)?;
        self.send(&[BARCODE_MODULE_WIDTH])?;
        self.send(&BARCODE_PRINT)?;
        self.send(&[kind.code(&self.config.capabilities)])?;

        if self.config.capabilities.length_prefixed_barcodes {
            let data = &data[..data.len().min(MAX_BARCODE_LEN)];
            self.send(&[data.len() as u8])?;
            self.send(data)?;
        } else {
            let end = data.iter().position(|&b| b == NUL).unwrap_or(data.len());
            self.send(&data[..end])?;
            self.send(&[NUL])?;
        }
        self.state.mark_newline();
        Ok(())
    }

    /// Store `data` in the QR symbol buffer and print it
    pub fn print_qr_code(&mut self, data: &[u8], options: QrOptions) -> PrinterResult<I> {
        self.send(&QR_PREFIX)?;
        self.send(&[4, 0, QR_CN, QR_FN_MODEL, options.model as u8, 0])?;

        self.send(&QR_PREFIX)?;
        self.send(&[3, 0, QR_CN, QR_FN_MODULE_SIZE, options.module_size()])?;

        self.send(&QR_PREFIX)?;
        self.send(&[3, 0, QR_CN, QR_FN_ERROR_CORRECTION, options.error_correction as u8])?;

        // Parameter count covers cn, fn and m as well
        let data = &data[..data.len().min(usize::from(u16::MAX) - 3)];
        let [p_l, p_h] = (data.len() as u16 + 3).to_le_bytes();
        self.send(&QR_PREFIX)?;
        self.send(&[p_l, p_h, QR_CN, QR_FN_STORE, QR_M])?;
        self.send(data)?;

        self.reprint_qr_code()
    }

    /// Print the QR symbol stored by the last [`print_qr_code`](Self::print_qr_code)
    pub fn reprint_qr_code(&mut self) -> PrinterResult<I> {
        self.send(&QR_PREFIX)?;
        self.send(&[3, 0, QR_CN, QR_FN_PRINT, QR_M])?;
        self.state.mark_newline();
        Ok(())
    }

    /// Print an in-memory raster, chunked to fit the receive buffer
    ///
    /// `data` is row-major with rows padded to whole bytes; see
    /// [`bitmap`](crate::bitmap) for the layout.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `data` is shorter than
    /// `ceil(width / 8) * height`. Nothing is sent in that case.
    pub fn print_bitmap<D: DelayNs>(
        &mut self,
        width: u16,
        height: u16,
        data: &[u8],
        delay: &mut D,
    ) -> PrinterResult<I> {
        let plan = self.plan(width, height);
        if data.len() < plan.source_len() {
            return Err(Error::BufferTooSmall {
                required: plan.source_len(),
                provided: data.len(),
            });
        }
        self.transfer(&plan, &mut SliceSource::new(data), delay)
    }

    /// Print a raster pulled byte by byte from `source`
    ///
    /// Blocks on the source for every byte, so a source that runs dry stalls
    /// the transfer.
    pub fn print_bitmap_from<S: PixelSource, D: DelayNs>(
        &mut self,
        width: u16,
        height: u16,
        source: &mut S,
        delay: &mut D,
    ) -> PrinterResult<I> {
        let plan = self.plan(width, height);
        self.transfer(&plan, source, delay)
    }

    /// Print a raster from a stream that starts with its own dimensions
    ///
    /// The first four bytes are width and height, little-endian.
    pub fn print_bitmap_stream<S: PixelSource, D: DelayNs>(
        &mut self,
        source: &mut S,
        delay: &mut D,
    ) -> PrinterResult<I> {
        let mut header = [0u8; HEADER_LEN];
        for byte in &mut header {
            *byte = source.next_byte();
        }
        let (width, height) = decode_header(header);
        self.print_bitmap_from(width, height, source, delay)
    }

    fn plan(&self, width: u16, height: u16) -> ChunkPlan {
        ChunkPlan::new(
            width,
            height,
            self.state.max_chunk_height(),
            self.state.handshake(),
        )
    }

    fn transfer<S: PixelSource, D: DelayNs>(
        &mut self,
        plan: &ChunkPlan,
        source: &mut S,
        delay: &mut D,
    ) -> PrinterResult<I> {
        log::debug!(
            "bitmap: {} rows, {} of {} bytes per row, {} rows per chunk",
            plan.height(),
            plan.row_bytes(),
            plan.stride(),
            plan.chunk_limit()
        );

        let row_bytes = usize::from(plan.row_bytes());
        let mut row = [0u8; MAX_ROW_BYTES as usize];

        for chunk_height in plan.chunks() {
            self.settle(delay)?;
            log::trace!("chunk: {} rows", chunk_height);
            self.send(&RASTER_CHUNK)?;
            self.send(&[chunk_height, plan.row_bytes()])?;

            for _ in 0..chunk_height {
                for byte in &mut row[..row_bytes] {
                    *byte = source.next_byte();
                }
                if self.state.handshake() {
                    for index in 0..row_bytes {
                        self.interface.wait_ready(delay).map_err(Error::Interface)?;
                        self.send(&row[index..=index])?;
                    }
                } else {
                    self.send(&row[..row_bytes])?;
                }
                for _ in 0..plan.skip_bytes() {
                    source.next_byte();
                }
            }

            self.pacer.add(
                u32::from(chunk_height).saturating_mul(self.state.dot_print_time_us()),
            );
        }

        self.state.mark_newline();
        Ok(())
    }

    /// Print an in-memory raster with a single `GS v 0` command
    ///
    /// Not chunked: only safe for images that fit the receive buffer or
    /// with the handshake in use.
    pub fn print_raster(&mut self, width: u16, height: u16, data: &[u8]) -> PrinterResult<I> {
        let stride = row_stride(width);
        let required = usize::from(stride) * usize::from(height);
        if data.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: data.len(),
            });
        }
        let [x_l, x_h] = stride.to_le_bytes();
        let [y_l, y_h] = height.to_le_bytes();
        self.send(&RASTER_IMAGE)?;
        self.send(&[0, x_l, x_h, y_l, y_h])?;
        self.send(&data[..required])?;
        self.pacer
            .add(u32::from(height).saturating_mul(self.state.dot_print_time_us()));
        self.state.mark_newline();
        Ok(())
    }

    /// Download a bit image into the printer's volatile memory
    ///
    /// The image is column-major, `ceil(height / 8)` bytes per column. The
    /// printer expects `ceil(width / 8) * ceil(height / 8) * 8` bytes; a short
    /// `data` is padded with blank bytes and a long one is cut.
    pub fn define_bit_image(&mut self, width: u16, height: u16, data: &[u8]) -> PrinterResult<I> {
        let x = row_stride(width).min(u16::from(u8::MAX)) as u8;
        let y = row_stride(height).min(u16::from(u8::MAX)) as u8;
        let required = usize::from(x) * usize::from(y) * 8;

        self.send(&DEFINE_BIT_IMAGE)?;
        self.send(&[x, y])?;
        let data = &data[..data.len().min(required)];
        self.send(data)?;

        const BLANK: [u8; 64] = [0; 64];
        let mut padding = required - data.len();
        while padding > 0 {
            let count = padding.min(BLANK.len());
            self.send(&BLANK[..count])?;
            padding -= count;
        }
        self.state.mark_newline();
        Ok(())
    }

    /// Print the bit image downloaded by [`define_bit_image`](Self::define_bit_image)
    pub fn print_defined_bit_image(&mut self, scale: BitImageScale) -> PrinterResult<I> {
        self.send(&PRINT_BIT_IMAGE)?;
        self.send(&[scale as u8])?;
        self.state.mark_newline();
        Ok(())
    }

    /// Store images in the printer's non-volatile memory
    ///
    /// Replaces every stored image. At most 255 images are sent. Writing
    /// flash is slow and wears it; do this once, not per receipt.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if any image is shorter than its
    /// [`payload_len`](NvBitmap::payload_len). Nothing is sent in that case.
    pub fn define_nv_bitmaps(&mut self, images: &[NvBitmap<'_>]) -> PrinterResult<I> {
        let images = &images[..images.len().min(usize::from(u8::MAX))];
        if let Some(short) = images.iter().find(|image| image.data.len() < image.payload_len()) {
            return Err(Error::BufferTooSmall {
                required: short.payload_len(),
                provided: short.data.len(),
            });
        }

        self.send(&DEFINE_NV_BITMAP)?;
        self.send(&[images.len() as u8])?;
        for image in images {
            let [x_l, x_h] = image.width_bytes().to_le_bytes();
            let [y_l, y_h] = image.height_bytes().to_le_bytes();
            self.send(&[x_l, x_h, y_l, y_h])?;
            self.send(&image.data[..image.payload_len()])?;
        }
        self.state.mark_newline();
        Ok(())
    }

    /// Print stored image `index` (1-based)
    pub fn print_nv_bitmap(&mut self, index: u8, scale: BitImageScale) -> PrinterResult<I> {
        self.send(&PRINT_NV_BITMAP)?;
        self.send(&[index, scale as u8])?;
        self.state.mark_newline();
        Ok(())
    }

    /// Ask the printer whether it has paper
    ///
    /// Polls for the status reply up to 10 times, 100 ms apart. No reply
    /// counts as no paper. Many clones never answer; do not rely on this.
    pub fn has_paper<D: DelayNs>(&mut self, delay: &mut D) -> Result<bool, Error<I>> {
        self.send(&PAPER_STATUS)?;
        for _ in 0..PAPER_STATUS_POLLS {
            if let Some(status) = self.interface.read_byte().map_err(Error::Interface)? {
                return Ok(status & PAPER_OUT_MASK == 0);
            }
            delay.delay_ms(PAPER_STATUS_POLL_MS);
        }
        log::warn!("no paper status reply, assuming out of paper");
        Ok(false)
    }

    /// Send one text byte without waiting
    ///
    /// Returns the estimated time the printer needs for it, which is also
    /// added to the pending total. `0x13` is dropped and costs nothing.
    pub fn write_byte(&mut self, byte: u8) -> Result<u32, Error<I>> {
        if byte == STRIPPED {
            return Ok(0);
        }
        self.interface.write(&[byte]).map_err(Error::Interface)?;
        Ok(self.pacer.text_byte(&mut self.state, byte))
    }

    /// Send text without waiting, returning its total estimated time
    pub fn write_text(&mut self, text: &[u8]) -> Result<u32, Error<I>> {
        let mut total = 0u32;
        for &byte in text {
            total = total.saturating_add(self.write_byte(byte)?);
        }
        Ok(total)
    }

    /// Send `text` followed by a line feed
    pub fn print_line(&mut self, text: &str) -> Result<u32, Error<I>> {
        let delay = self.write_text(text.as_bytes())?;
        Ok(delay.saturating_add(self.write_byte(LF)?))
    }

    /// Block until the printer should be idle
    ///
    /// With the handshake in use this waits on the ready line; otherwise it
    /// sleeps off the pending estimate.
    pub fn settle<D: DelayNs>(&mut self, delay: &mut D) -> PrinterResult<I> {
        let pending_us = self.pacer.take();
        if self.state.handshake() {
            self.interface.wait_ready(delay).map_err(Error::Interface)
        } else {
            if pending_us > 0 {
                delay.delay_us(pending_us);
            }
            Ok(())
        }
    }

    /// Estimated busy time not yet waited out, in microseconds
    pub fn pending_delay_us(&self) -> u32 {
        self.pacer.pending_us()
    }

    /// Return the pending busy estimate and clear it
    ///
    /// For hosts that schedule the next write instead of sleeping.
    pub fn take_pending_delay_us(&mut self) -> u32 {
        self.pacer.take()
    }

    /// Set per-dot print and feed times in microseconds
    pub fn set_times(&mut self, dot_print_time_us: u32, dot_feed_time_us: u32) {
        self.config.dot_print_time_us = dot_print_time_us;
        self.config.dot_feed_time_us = dot_feed_time_us;
        self.state.set_times(dot_print_time_us, dot_feed_time_us);
    }

    /// Set the bitmap chunk height ceiling used without the handshake
    ///
    /// A ceiling of 0 is raised to 1 row.
    pub fn set_max_chunk_height(&mut self, rows: u8) {
        let rows = rows.max(1);
        self.config.max_chunk_height = rows;
        self.state.set_max_chunk_height(rows);
    }

    /// Host-side printer state
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Get the printer configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Firmware capabilities in use
    pub fn capabilities(&self) -> &Capabilities {
        &self.config.capabilities
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    fn send(&mut self, bytes: &[u8]) -> PrinterResult<I> {
        self.interface.write(bytes).map_err(Error::Interface)?;
        self.pacer.bytes(bytes.len());
        Ok(())
    }
}

impl<I> core::fmt::Write for Printer<I>
where
    I: PrinterInterface,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_text(s.as_bytes())
            .map(|_| ())
            .map_err(|_| core::fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::{QrErrorCorrection, QrModel};
    use crate::bitmap::{ReaderSource, encode_header};
    use crate::command::ESC;
    use crate::config::Builder;
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;
    use crate::interface::InterfaceError;
    use core::fmt::Write as _;

    #[derive(Debug, Default)]
    struct MockInterface {
        written: Vec<u8>,
        replies: VecDeque<u8>,
        ready_line: bool,
        ready_waits: usize,
        fail_writes: bool,
        ready_timeout: bool,
    }

    impl PrinterInterface for MockInterface {
        type Error = InterfaceError<(), ()>;

        fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            if self.fail_writes {
                return Err(InterfaceError::Serial(()));
            }
            self.written.extend_from_slice(bytes);
            Ok(())
        }

        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.replies.is_empty())
        }

        fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            Ok(self.replies.pop_front())
        }

        fn has_ready_line(&self) -> bool {
            self.ready_line
        }

        fn wait_ready<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            self.ready_waits += 1;
            if self.ready_timeout {
                return Err(InterfaceError::Timeout);
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn printer_with(firmware: u16) -> Printer<MockInterface> {
        let config = Builder::new().firmware(firmware).build().unwrap();
        Printer::new(MockInterface::default(), config)
    }

    fn test_printer() -> Printer<MockInterface> {
        printer_with(268)
    }

    fn take_written(printer: &mut Printer<MockInterface>) -> Vec<u8> {
        core::mem::take(&mut printer.interface.written)
    }

    fn concat(parts: &[&[u8]]) -> Vec<u8> {
        parts.iter().flat_map(|part| part.iter().copied()).collect()
    }

    #[test]
    fn test_begin_sequence() {
        let mut printer = test_printer();
        let mut delay = MockDelay::default();
        printer.begin(&mut delay).unwrap();

        let expected = concat(&[
            &[0xFF, ESC, b'8', 0, 0],
            &[ESC, b'@', ESC, b'D', 4, 8, 12, 16, 20, 24, 28, 0],
            &[ESC, b'7', 11, 120, 40],
            &[ESC, b'=', 1],
            &[ESC, b'a', 0],
            &[0x1D, b'B', 0],
            &[ESC, b'!', 0],
            &[ESC, b'3', 30],
            &[ESC, b'!', 0],
            &[ESC, b'-', 0],
            &[0x1D, b'h', 50],
            &[0x1D, b'!', 0],
            &[ESC, b'R', 4],
            &[ESC, b't', 23],
        ]);
        assert_eq!(printer.interface.written, expected);
        assert_eq!(delay.total_ns, 50_000_000);
        assert!(!printer.state().handshake());
    }

    #[test]
    fn test_begin_with_ready_line_enables_handshake() {
        let mut printer = test_printer();
        printer.interface.ready_line = true;
        printer.begin(&mut MockDelay::default()).unwrap();

        let written = &printer.interface.written;
        let heat = [ESC, b'7', 11, 120, 40, 0x1D, b'a', 0x20];
        assert!(written.windows(heat.len()).any(|w| w == heat));
        assert!(printer.state().handshake());
    }

    #[test]
    fn test_wake_old_firmware_sends_nuls() {
        let mut printer = printer_with(260);
        let mut delay = MockDelay::default();
        printer.wake(&mut delay).unwrap();

        let expected = concat(&[&[0xFF], &[0; 10], &[ESC, b'@']]);
        assert_eq!(printer.interface.written, expected);
        assert_eq!(delay.total_ns, 0);
    }

    #[test]
    fn test_sleep_after_by_firmware() {
        let mut printer = test_printer();
        printer.sleep_after(600).unwrap();
        assert_eq!(take_written(&mut printer), [ESC, b'8', 0x58, 0x02]);

        let mut printer = printer_with(260);
        printer.sleep_after(600).unwrap();
        assert_eq!(take_written(&mut printer), [ESC, b'8', 255]);
        printer.sleep().unwrap();
        assert_eq!(take_written(&mut printer), [ESC, b'8', 1]);
    }

    #[test]
    fn test_inverse_native() {
        let mut printer = test_printer();
        printer.inverse_on().unwrap();
        assert_eq!(take_written(&mut printer), [0x1D, b'B', 1]);
        assert!(!printer.state().print_mode().contains(PrintMode::INVERSE));
    }

    #[test]
    fn test_inverse_through_print_mode_on_old_firmware() {
        let mut printer = printer_with(264);
        printer.inverse_on().unwrap();
        assert_eq!(take_written(&mut printer), [ESC, b'!', 1 << 1]);
        printer.bold_on().unwrap();
        assert_eq!(take_written(&mut printer), [ESC, b'!', (1 << 1) | (1 << 3)]);
        printer.inverse_off().unwrap();
        assert_eq!(take_written(&mut printer), [ESC, b'!', 1 << 3]);
    }

    #[test]
    fn test_double_width_halves_columns() {
        let mut printer = test_printer();
        printer.double_width_on().unwrap();
        assert_eq!(take_written(&mut printer), [ESC, b'!', 1 << 5]);
        assert_eq!(printer.state().max_column(), 16);
        printer.normal().unwrap();
        assert_eq!(take_written(&mut printer), [ESC, b'!', 0]);
        assert_eq!(printer.state().max_column(), 32);
    }

    #[test]
    fn test_set_size_and_justify() {
        let mut printer = test_printer();
        printer.justify(Justify::from('c')).unwrap();
        printer.set_size(Size::Large).unwrap();
        assert_eq!(
            take_written(&mut printer),
            [ESC, b'a', 1, 0x1D, b'!', 0x11]
        );
        assert_eq!(printer.state().char_height(), 48);
        assert_eq!(printer.state().prev_byte(), LF);
    }

    #[test]
    fn test_parameters_are_clamped() {
        let mut printer = test_printer();
        printer.underline_on(5).unwrap();
        printer.set_charset(99).unwrap();
        printer.set_code_page(99).unwrap();
        printer.set_line_height(3).unwrap();
        printer.set_barcode_height(0).unwrap();
        assert_eq!(
            take_written(&mut printer),
            [
                ESC, b'-', 2, ESC, b'R', 15, ESC, b't', 47, ESC, b'3', 24, 0x1D, b'h', 1
            ]
        );
        assert_eq!(printer.state().line_spacing(), 0);
        assert_eq!(printer.state().barcode_height(), 1);
    }

    #[test]
    fn test_text_pacing() {
        let mut printer = test_printer();
        assert_eq!(printer.write_byte(b'A').unwrap(), 573);
        assert_eq!(printer.write_byte(b'B').unwrap(), 573);
        assert_eq!(printer.write_byte(b'\n').unwrap(), 573 + 732_600);
        assert_eq!(printer.pending_delay_us(), 3 * 573 + 732_600);
        assert_eq!(printer.take_pending_delay_us(), 3 * 573 + 732_600);
        assert_eq!(printer.pending_delay_us(), 0);
        assert_eq!(printer.interface.written, b"AB\n");
    }

    #[test]
    fn test_stripped_byte_is_dropped() {
        let mut printer = test_printer();
        assert_eq!(printer.write_text(&[b'a', 0x13, b'b']).unwrap(), 2 * 573);
        assert_eq!(printer.interface.written, b"ab");
        assert_eq!(printer.state().column(), 2);
    }

    #[test]
    fn test_fmt_write_uses_text_path() {
        let mut printer = test_printer();
        write!(printer, "{}-{}", 4, 2).unwrap();
        assert_eq!(printer.interface.written, b"4-2");
        assert_eq!(printer.state().column(), 3);
    }

    #[test]
    fn test_settle_sleeps_off_pending() {
        let mut printer = test_printer();
        printer.print_line("hi").unwrap();
        let pending = printer.pending_delay_us();
        let mut delay = MockDelay::default();
        printer.settle(&mut delay).unwrap();
        assert_eq!(delay.total_ns, u64::from(pending) * 1_000);
        assert_eq!(printer.pending_delay_us(), 0);
    }

    #[test]
    fn test_settle_waits_on_ready_line_with_handshake() {
        let mut printer = test_printer();
        printer.state.set_handshake(true);
        printer.write_text(b"x\n").unwrap();
        let mut delay = MockDelay::default();
        printer.settle(&mut delay).unwrap();
        assert_eq!(delay.total_ns, 0);
        assert_eq!(printer.interface.ready_waits, 1);
        assert_eq!(printer.pending_delay_us(), 0);
    }

    #[test]
    fn test_feed_native() {
        let mut printer = test_printer();
        printer.write_text(b"ab").unwrap();
        printer.take_pending_delay_us();
        take_written(&mut printer);
        printer.feed(2).unwrap();
        assert_eq!(take_written(&mut printer), [ESC, b'd', 2]);
        assert_eq!(printer.pending_delay_us(), 3 * 573 + 2 * 30 * 2_100);
        assert_eq!(printer.state().column(), 0);
        assert_eq!(printer.state().prev_byte(), LF);
    }

    #[test]
    fn test_feed_old_firmware_uses_line_feeds() {
        let mut printer = printer_with(260);
        printer.feed(3).unwrap();
        assert_eq!(take_written(&mut printer), b"\n\n\n");
        assert_eq!(printer.pending_delay_us(), 3 * (573 + 30 * 2_100));
    }

    #[test]
    fn test_feed_rows() {
        let mut printer = test_printer();
        printer.feed_rows(10).unwrap();
        assert_eq!(take_written(&mut printer), [ESC, b'J', 10]);
        assert_eq!(printer.pending_delay_us(), 3 * 573 + 10 * 2_100);
    }

    #[test]
    fn test_tab_advances_column() {
        let mut printer = test_printer();
        printer.write_text(b"ab").unwrap();
        printer.tab().unwrap();
        assert_eq!(printer.state().column(), 4);
        assert_eq!(printer.interface.written, b"ab\t");
    }

    #[test]
    fn test_barcode_recent_firmware() {
        let mut printer = test_printer();
        printer.print_barcode(b"123", BarcodeType::Code128).unwrap();
        let expected = concat(&[
            &[ESC, b'd', 1],
            &[0x1D, b'H', 2, 0x1D, b'w', 3, 0x1D, b'k', 73],
            &[3, b'1', b'2', b'3'],
        ]);
        assert_eq!(printer.interface.written, expected);
        assert_eq!(printer.state().prev_byte(), LF);
    }

    #[test]
    fn test_barcode_old_firmware_is_nul_terminated() {
        let mut printer = printer_with(260);
        printer.print_barcode(b"12\x0034", BarcodeType::Ean8).unwrap();
        let expected = concat(&[
            b"\n",
            &[0x1D, b'H', 2, 0x1D, b'w', 3, 0x1D, b'k', 3],
            &[b'1', b'2', 0],
        ]);
        assert_eq!(printer.interface.written, expected);
    }

    #[test]
    fn test_barcode_length_is_capped() {
        let mut printer = test_printer();
        let data = [b'7'; 300];
        printer.print_barcode(&data, BarcodeType::Code39).unwrap();
        let written = &printer.interface.written;
        // feed (3) + label/width/type (9) + length byte + data
        assert_eq!(written.len(), 3 + 9 + 1 + 255);
        assert_eq!(written[12], 255);
    }

    #[test]
    fn test_qr_code_sequence() {
        let mut printer = test_printer();
        let options = QrOptions::new(QrErrorCorrection::from(99), 20, QrModel::from(7));
        printer.print_qr_code(b"hi", options).unwrap();
        let expected = concat(&[
            &[0x1D, b'(', b'k', 4, 0, 49, 65, 50, 0],
            &[0x1D, b'(', b'k', 3, 0, 49, 67, 3],
            &[0x1D, b'(', b'k', 3, 0, 49, 69, 48],
            &[0x1D, b'(', b'k', 5, 0, 49, 80, 48, b'h', b'i'],
            &[0x1D, b'(', b'k', 3, 0, 49, 81, 48],
        ]);
        assert_eq!(printer.interface.written, expected);
        assert_eq!(printer.state().prev_byte(), LF);
    }

    #[test]
    fn test_bitmap_full_width_chunks() {
        let mut printer = test_printer();
        let data: Vec<u8> = (0..4_800u32).map(|i| i as u8).collect();
        printer
            .print_bitmap(384, 100, &data, &mut MockDelay::default())
            .unwrap();

        let mut expected = Vec::new();
        for chunk in data.chunks(5 * 48) {
            expected.extend_from_slice(&[ESC, b'*', 5, 48]);
            expected.extend_from_slice(chunk);
        }
        assert_eq!(printer.interface.written, expected);
        assert_eq!(printer.state().prev_byte(), LF);
    }

    #[test]
    fn test_bitmap_wide_rows_drop_padding() {
        let mut printer = test_printer();
        // Each byte holds its column index within a 50 byte row
        let data: Vec<u8> = (0..7 * 50u32).map(|i| (i % 50) as u8).collect();
        printer
            .print_bitmap(400, 7, &data, &mut MockDelay::default())
            .unwrap();

        let row: Vec<u8> = (0..48).collect();
        let mut expected = Vec::new();
        for height in [5u8, 2] {
            expected.extend_from_slice(&[ESC, b'*', height, 48]);
            for _ in 0..height {
                expected.extend_from_slice(&row);
            }
        }
        assert_eq!(printer.interface.written, expected);
    }

    #[test]
    fn test_bitmap_settles_between_chunks() {
        let mut printer = test_printer();
        let data = [0u8; 48 * 6];
        let mut delay = MockDelay::default();
        printer.print_bitmap(384, 6, &data, &mut delay).unwrap();

        // Before the second chunk: first header, 5 rows and their print time
        let first_chunk_us = (4 + 5 * 48) * 573 + 5 * 30_000;
        assert_eq!(delay.total_ns, first_chunk_us * 1_000);
        assert_eq!(printer.pending_delay_us(), (4 + 48) * 573 + 30_000);
    }

    #[test]
    fn test_bitmap_buffer_too_small() {
        let mut printer = test_printer();
        let result = printer.print_bitmap(384, 100, &[0; 10], &mut MockDelay::default());
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 4_800,
                provided: 10
            })
        ));
        assert!(printer.interface.written.is_empty());
    }

    #[test]
    fn test_bitmap_zero_size_sends_nothing() {
        let mut printer = test_printer();
        printer.write_byte(b'x').unwrap();
        take_written(&mut printer);
        printer
            .print_bitmap(0, 10, &[], &mut MockDelay::default())
            .unwrap();
        printer
            .print_bitmap(16, 0, &[], &mut MockDelay::default())
            .unwrap();
        assert!(printer.interface.written.is_empty());
        assert_eq!(printer.state().prev_byte(), LF);
    }

    #[test]
    fn test_bitmap_handshake_waits_per_byte() {
        let mut printer = test_printer();
        printer.state.set_handshake(true);
        printer.set_max_chunk_height(1);
        let data = [0xAA; 6];
        printer
            .print_bitmap(16, 3, &data, &mut MockDelay::default())
            .unwrap();

        let expected = concat(&[&[ESC, b'*', 3, 2], &data]);
        assert_eq!(printer.interface.written, expected);
        // One settle for the chunk, one wait per pixel byte
        assert_eq!(printer.interface.ready_waits, 1 + 6);
    }

    #[test]
    fn test_bitmap_ready_timeout_stops_transfer() {
        let mut printer = test_printer();
        printer.state.set_handshake(true);
        printer.interface.ready_timeout = true;
        let result = printer.print_bitmap(16, 3, &[0xAA; 6], &mut MockDelay::default());

        assert!(matches!(
            result,
            Err(Error::Interface(InterfaceError::Timeout))
        ));
        assert!(printer.interface.written.is_empty());
        assert_eq!(printer.interface.ready_waits, 1);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut printer = test_printer();
        printer.interface.fail_writes = true;

        assert!(matches!(
            printer.write_text(b"abc"),
            Err(Error::Interface(InterfaceError::Serial(())))
        ));
        assert!(matches!(
            printer.feed(1),
            Err(Error::Interface(InterfaceError::Serial(())))
        ));
        assert!(printer.write_str("abc").is_err());
        assert_eq!(printer.pending_delay_us(), 0);
    }

    #[test]
    fn test_max_chunk_height_zero_is_one_row() {
        let mut printer = test_printer();
        printer.set_max_chunk_height(0);
        assert_eq!(printer.config().max_chunk_height, 1);
        assert_eq!(printer.state().max_chunk_height(), 1);

        printer
            .print_bitmap(8, 2, &[0x01, 0x02], &mut MockDelay::default())
            .unwrap();
        let expected = concat(&[&[ESC, b'*', 1, 1, 0x01], &[ESC, b'*', 1, 1, 0x02]]);
        assert_eq!(printer.interface.written, expected);
    }

    #[test]
    fn test_bitmap_stream_reads_header() {
        let mut printer = test_printer();
        let stream = concat(&[&encode_header(8, 2), &[0x0F, 0xF0], &[0x99]]);
        let mut source = SliceSource::new(&stream);
        printer
            .print_bitmap_stream(&mut source, &mut MockDelay::default())
            .unwrap();
        assert_eq!(printer.interface.written, [ESC, b'*', 2, 1, 0x0F, 0xF0]);
        assert_eq!(source.position(), HEADER_LEN + 2);
    }

    #[test]
    fn test_bitmap_from_reader_skips_padding() {
        let mut printer = test_printer();
        // 392 dots: 49 byte stride, 1 byte dropped per row
        let data: Vec<u8> = (0..2 * 49u32).map(|i| (i % 49) as u8).collect();
        let mut source = ReaderSource::new(data.as_slice());
        printer
            .print_bitmap_from(392, 2, &mut source, &mut MockDelay::default())
            .unwrap();

        let row: Vec<u8> = (0..48).collect();
        let expected = concat(&[&[ESC, b'*', 2, 48], &row, &row]);
        assert_eq!(printer.interface.written, expected);
    }

    #[test]
    fn test_print_raster() {
        let mut printer = test_printer();
        printer.print_raster(10, 2, &[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(
            printer.interface.written,
            [0x1D, b'v', b'0', 0, 2, 0, 2, 0, 1, 2, 3, 4]
        );
        let result = printer.print_raster(10, 3, &[0; 5]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 6,
                provided: 5
            })
        ));
    }

    #[test]
    fn test_define_bit_image_pads_payload() {
        let mut printer = test_printer();
        printer.define_bit_image(8, 8, &[0xAA]).unwrap();
        let expected = concat(&[&[0x1D, b'*', 1, 1, 0xAA], &[0; 7]]);
        assert_eq!(take_written(&mut printer), expected);

        printer
            .print_defined_bit_image(BitImageScale::Quadruple)
            .unwrap();
        assert_eq!(take_written(&mut printer), [0x1D, b'/', 3]);
    }

    #[test]
    fn test_define_nv_bitmaps() {
        let mut printer = test_printer();
        let first = [0x11; 8];
        let second = [0x22; 16];
        printer
            .define_nv_bitmaps(&[NvBitmap::new(8, 8, &first), NvBitmap::new(16, 3, &second)])
            .unwrap();
        let expected = concat(&[
            &[0x1C, b'q', 2],
            &[1, 0, 1, 0],
            &first,
            &[2, 0, 1, 0],
            &second,
        ]);
        assert_eq!(take_written(&mut printer), expected);

        let result = printer.define_nv_bitmaps(&[NvBitmap::new(8, 16, &first)]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 16,
                provided: 8
            })
        ));
        assert!(printer.interface.written.is_empty());

        printer.print_nv_bitmap(1, BitImageScale::Normal).unwrap();
        assert_eq!(take_written(&mut printer), [0x1C, b'p', 1, 0]);
    }

    #[test]
    fn test_has_paper() {
        let mut printer = test_printer();
        printer.interface.replies.push_back(0x00);
        assert!(printer.has_paper(&mut MockDelay::default()).unwrap());
        assert_eq!(take_written(&mut printer), [0x10, 0x04, 4]);

        printer.interface.replies.push_back(0x0C);
        assert!(!printer.has_paper(&mut MockDelay::default()).unwrap());
    }

    #[test]
    fn test_has_paper_times_out_closed() {
        let mut printer = test_printer();
        let mut delay = MockDelay::default();
        assert!(!printer.has_paper(&mut delay).unwrap());
        assert_eq!(delay.total_ns, 10 * 100 * 1_000_000);
    }

    #[test]
    fn test_simple_commands() {
        let mut printer = test_printer();
        printer.online().unwrap();
        printer.offline().unwrap();
        printer.test_page().unwrap();
        printer.flush().unwrap();
        printer.cut().unwrap();
        printer.beep().unwrap();
        printer.set_beep(3).unwrap();
        printer.set_char_spacing(2).unwrap();
        let expected = concat(&[
            &[ESC, b'=', 1, ESC, b'=', 0],
            &[0x12, b'T', 0x0C],
            &[0x1D, b'V', 0, ESC, b'o', 0x1D, b'o', 3],
            &[ESC, b' ', 2],
        ]);
        assert_eq!(printer.interface.written, expected);
    }

    #[test]
    fn test_set_times_updates_state() {
        let mut printer = test_printer();
        printer.set_times(1_000, 100);
        assert_eq!(printer.state().dot_print_time_us(), 1_000);
        assert_eq!(printer.config().dot_feed_time_us, 100);
        printer.write_text(b"a\n").unwrap();
        assert_eq!(printer.pending_delay_us(), 2 * 573 + 24 * 1_000 + 6 * 100);
    }
}
