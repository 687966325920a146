//! A simple Driver for IL0373 based E-Ink Displays via SPI
//!
//! The IL0373 drives the black/white/red panels used on the Adafruit
//! ThinkInk breakouts and FeatherWings. Unlike a fixed-size module this
//! driver takes a [Panel] record at construction time, since the same chip
//! sits behind several product SKUs that only differ in dimensions and
//! (sometimes) init/waveform tables. The known SKUs live in
//! [thinkink](crate::thinkink).
//!
//! The RAM-write model is two data channels: `DataStartTransmission1`
//! carries the black/white plane, `DataStartTransmission2` the red plane.
//! Both planes are written with inverted polarity (1 = white / no red).
//!
//! Plane data can come from host memory or be streamed out of an external
//! [Sram23k256](crate::sram::Sram23k256) sharing the SPI bus, see
//! [Il0373::update_color_frame_from_sram].

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

use crate::buffer_len;
use crate::color::TriColor;
use crate::interface::DisplayInterface;
use crate::sram::Sram23k256;
use crate::thinkink::Panel;
use crate::traits::{InternalWiAdditions, ThinkInkDisplay, ThinkInkThreeColorDisplay};

pub(crate) mod command;
pub use self::command::Command;

mod constants;
use self::constants::DEFAULT_INIT_SEQUENCE;

/// Default background color (white) of the panels
pub const DEFAULT_BACKGROUND_COLOR: TriColor = TriColor::White;

/// Busy is low active
const IS_BUSY_LOW: bool = true;

const SINGLE_BYTE_WRITE: bool = false;

/// Fixed wait used instead of a missing busy pin, except after a refresh
/// where the panel's own (much longer) fallback applies
const BUSY_FALLBACK_MS: u32 = 500;

/// Chunk size for streaming plane data out of the external SRAM
const SRAM_CHUNK: usize = 64;

/// Il0373 driver
pub struct Il0373<SPI, BUSY, DC, RST, DELAY> {
    /// Connection Interface
    interface: DisplayInterface<SPI, BUSY, DC, RST, DELAY, SINGLE_BYTE_WRITE>,
    /// SKU bindings (dimensions, sequence overrides, refresh fallback)
    panel: Panel,
    /// Background Color
    color: TriColor,
}

impl<SPI, BUSY, DC, RST, DELAY> InternalWiAdditions<SPI, BUSY, DC, RST, DELAY>
    for Il0373<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn init(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.interface.reset(delay, 10_000, 10_000);

        // A SKU can replace the built-in power-up list
        let sequence = self.panel.init_sequence.unwrap_or(DEFAULT_INIT_SEQUENCE);
        self.interface
            .run_sequence(spi, delay, sequence, IS_BUSY_LOW, BUSY_FALLBACK_MS)?;

        // Extra waveform tables for panels that don't use the factory OTP ones
        if let Some(lut_sequence) = self.panel.lut_sequence {
            self.interface
                .run_sequence(spi, delay, lut_sequence, IS_BUSY_LOW, BUSY_FALLBACK_MS)?;
        }

        self.send_resolution(spi)
    }
}

impl<SPI, BUSY, DC, RST, DELAY> ThinkInkThreeColorDisplay<SPI, BUSY, DC, RST, DELAY>
    for Il0373<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn update_color_frame(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        black: &[u8],
        chromatic: &[u8],
    ) -> Result<(), SPI::Error> {
        self.update_achromatic_frame(spi, delay, black)?;
        self.update_chromatic_frame(spi, delay, chromatic)
    }

    /// Update only the black/white data of the display.
    ///
    /// Finish by calling `update_chromatic_frame`.
    fn update_achromatic_frame(
        &mut self,
        spi: &mut SPI,
        _delay: &mut DELAY,
        black: &[u8],
    ) -> Result<(), SPI::Error> {
        self.command(spi, Command::DataStartTransmission1)?;
        self.send_data(spi, black)
    }

    /// Update only chromatic data of the display.
    ///
    /// This data takes precedence over the black/white data.
    fn update_chromatic_frame(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        chromatic: &[u8],
    ) -> Result<(), SPI::Error> {
        self.command(spi, Command::DataStartTransmission2)?;
        self.send_data(spi, chromatic)?;

        self.wait_until_idle(spi, delay)
    }
}

impl<SPI, BUSY, DC, RST, DELAY> ThinkInkDisplay<SPI, BUSY, DC, RST, DELAY>
    for Il0373<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    type DisplayColor = TriColor;

    fn new(
        spi: &mut SPI,
        busy: Option<BUSY>,
        dc: DC,
        rst: RST,
        delay: &mut DELAY,
        panel: Panel,
        delay_us: Option<u32>,
    ) -> Result<Self, SPI::Error> {
        let interface = DisplayInterface::new(busy, dc, rst, delay_us);
        let color = DEFAULT_BACKGROUND_COLOR;

        let mut epd = Il0373 {
            interface,
            panel,
            color,
        };

        epd.init(spi, delay)?;

        Ok(epd)
    }

    fn sleep(&mut self, spi: &mut SPI, _delay: &mut DELAY) -> Result<(), SPI::Error> {
        // Raise the VCOM data interval before cutting power, then leave the
        // boosters off. A hardware reset (wake_up) returns to standby.
        self.cmd_with_data(spi, Command::VcomAndDataIntervalSetting, &[0x17])?;
        self.command(spi, Command::VcmDcSetting)?;
        self.command(spi, Command::PowerOff)
    }

    fn wake_up(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.init(spi, delay)
    }

    fn set_background_color(&mut self, color: TriColor) {
        self.color = color;
    }

    fn background_color(&self) -> &TriColor {
        &self.color
    }

    fn width(&self) -> u32 {
        self.panel.width
    }

    fn height(&self) -> u32 {
        self.panel.height
    }

    fn update_frame(
        &mut self,
        spi: &mut SPI,
        buffer: &[u8],
        delay: &mut DELAY,
    ) -> Result<(), SPI::Error> {
        self.command(spi, Command::DataStartTransmission1)?;
        self.send_data(spi, buffer)?;

        // Clear the chromatic layer
        let color = self.color.get_byte_value();

        self.command(spi, Command::DataStartTransmission2)?;
        self.interface
            .data_x_times(spi, color, self.plane_bytes())?;

        self.wait_until_idle(spi, delay)
    }

    fn display_frame(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.command(spi, Command::DisplayRefresh)?;

        // Give the controller time to pull busy low before polling;
        // without a busy pin the panel's own refresh fallback applies
        delay.delay_ms(100);
        self.interface
            .wait_until_idle(delay, IS_BUSY_LOW, self.panel.refresh_delay_ms);
        Ok(())
    }

    fn update_and_display_frame(
        &mut self,
        spi: &mut SPI,
        buffer: &[u8],
        delay: &mut DELAY,
    ) -> Result<(), SPI::Error> {
        self.update_frame(spi, buffer, delay)?;
        self.display_frame(spi, delay)
    }

    fn clear_frame(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.send_resolution(spi)?;

        let color = self.color.get_byte_value();

        // Clear the black
        self.command(spi, Command::DataStartTransmission1)?;
        self.interface
            .data_x_times(spi, color, self.plane_bytes())?;

        // Clear the chromatic
        self.command(spi, Command::DataStartTransmission2)?;
        self.interface
            .data_x_times(spi, color, self.plane_bytes())?;

        self.wait_until_idle(spi, delay)
    }

    fn wait_until_idle(&mut self, _spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.interface
            .wait_until_idle(delay, IS_BUSY_LOW, BUSY_FALLBACK_MS);
        Ok(())
    }
}

impl<SPI, BUSY, DC, RST, DELAY> Il0373<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Transmit both color planes out of the external SRAM.
    ///
    /// `black_addr` and `chromatic_addr` are byte offsets into the SRAM; each
    /// plane is [buffer_len](crate::buffer_len) bytes long. The SRAM has to
    /// sit on the same bus as the display, which is how the ThinkInk
    /// breakouts are wired.
    pub fn update_color_frame_from_sram<S>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        sram: &mut Sram23k256<S>,
        sram_spi: &mut S,
        black_addr: u16,
        chromatic_addr: u16,
    ) -> Result<(), SPI::Error>
    where
        S: SpiDevice<Error = SPI::Error>,
    {
        self.command(spi, Command::DataStartTransmission1)?;
        self.send_data_from_sram(spi, sram, sram_spi, black_addr)?;

        self.command(spi, Command::DataStartTransmission2)?;
        self.send_data_from_sram(spi, sram, sram_spi, chromatic_addr)?;

        self.wait_until_idle(spi, delay)
    }

    /// Transmit the black/white plane out of the external SRAM.
    pub fn update_achromatic_frame_from_sram<S>(
        &mut self,
        spi: &mut SPI,
        sram: &mut Sram23k256<S>,
        sram_spi: &mut S,
        black_addr: u16,
    ) -> Result<(), SPI::Error>
    where
        S: SpiDevice<Error = SPI::Error>,
    {
        self.command(spi, Command::DataStartTransmission1)?;
        self.send_data_from_sram(spi, sram, sram_spi, black_addr)
    }

    /// Transmit the red plane out of the external SRAM.
    pub fn update_chromatic_frame_from_sram<S>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        sram: &mut Sram23k256<S>,
        sram_spi: &mut S,
        chromatic_addr: u16,
    ) -> Result<(), SPI::Error>
    where
        S: SpiDevice<Error = SPI::Error>,
    {
        self.command(spi, Command::DataStartTransmission2)?;
        self.send_data_from_sram(spi, sram, sram_spi, chromatic_addr)?;

        self.wait_until_idle(spi, delay)
    }

    /// Checks if the display is still busy refreshing
    ///
    /// Always false without a busy pin
    pub fn is_busy(&mut self) -> bool {
        self.interface.is_busy(IS_BUSY_LOW)
    }

    fn command(&mut self, spi: &mut SPI, command: Command) -> Result<(), SPI::Error> {
        self.interface.cmd(spi, command)
    }

    fn send_data(&mut self, spi: &mut SPI, data: &[u8]) -> Result<(), SPI::Error> {
        self.interface.data(spi, data)
    }

    fn cmd_with_data(
        &mut self,
        spi: &mut SPI,
        command: Command,
        data: &[u8],
    ) -> Result<(), SPI::Error> {
        self.interface.cmd_with_data(spi, command, data)
    }

    fn send_resolution(&mut self, spi: &mut SPI) -> Result<(), SPI::Error> {
        let w = self.width();
        let h = self.height();

        // one byte horizontal resolution, two bytes vertical
        self.cmd_with_data(
            spi,
            Command::ResolutionSetting,
            &[w as u8, (h >> 8) as u8, h as u8],
        )
    }

    fn plane_bytes(&self) -> u32 {
        buffer_len(self.panel.width as usize, self.panel.height as usize) as u32
    }

    fn send_data_from_sram<S>(
        &mut self,
        spi: &mut SPI,
        sram: &mut Sram23k256<S>,
        sram_spi: &mut S,
        addr: u16,
    ) -> Result<(), SPI::Error>
    where
        S: SpiDevice<Error = SPI::Error>,
    {
        let mut chunk = [0u8; SRAM_CHUNK];
        let mut remaining = self.plane_bytes() as usize;
        let mut addr = addr;

        while remaining > 0 {
            let len = remaining.min(SRAM_CHUNK);
            sram.read(sram_spi, addr, &mut chunk[..len])?;
            self.send_data(spi, &chunk[..len])?;

            addr = addr.wrapping_add(len as u16);
            remaining -= len;
        }
        Ok(())
    }
}
