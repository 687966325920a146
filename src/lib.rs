//! A simple Driver for IL0373 based E-Ink Displays via SPI
//!
//! Covers the Adafruit ThinkInk tri-color (black/white/red) panels and
//! breakouts built around the IL0373 controller. This driver was built
//! using [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - SPI_MODE_0 is used (CPHL = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//!
//! ### Other....
//!
//! - Buffersize: Wherever a buffer is used it always needs to be of the size
//!   [`buffer_len`], one bit per pixel per color plane
//! - The BUSY pin is optional: without it the driver falls back to fixed
//!   delays, including a long conservative wait after a refresh
//!
//! # Examples
//!
//! ```rust,no_run
//!# use embedded_hal_mock::eh1::*;
//!# fn main() -> Result<(), embedded_hal::spi::ErrorKind> {
//!use epd_il0373::{il0373::Il0373, prelude::*};
//!
//!# let expectations = [];
//!# let mut spi = spi::Mock::new(&expectations);
//!# let expectations = [];
//!# let busy_in = digital::Mock::new(&expectations);
//!# let dc = digital::Mock::new(&expectations);
//!# let rst = digital::Mock::new(&expectations);
//!# let mut delay = delay::NoopDelay::new();
//!// Setup the 2.13" tri-color FeatherWing
//!let mut epd = Il0373::new(
//!    &mut spi,
//!    Some(busy_in),
//!    dc,
//!    rst,
//!    &mut delay,
//!    THINKINK_213_TRICOLOR_RW,
//!    None,
//!)?;
//!
//!// One bit per pixel and plane, 1 = white / no red
//!let black = [0xFF_u8; 104 * 212 / 8];
//!let red = [0xFF_u8; 104 * 212 / 8];
//!
//!epd.update_color_frame(&mut spi, &mut delay, &black, &red)?;
//!epd.display_frame(&mut spi, &mut delay)?;
//!
//!// Set the EPD to sleep
//!epd.sleep(&mut spi, &mut delay)?;
//!# Ok(())
//!# }
//! ```
#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod color;

mod traits;

/// Interface for the physical connection between display and the controlling device
mod interface;

pub mod sequence;

pub mod sram;

pub mod il0373;

pub mod thinkink;

/// Computes the needed buffer length for one color plane. Takes care of rounding up
/// in case width is not divisible by 8.
pub const fn buffer_len(width: usize, height: usize) -> usize {
    (width + 7) / 8 * height
}

/// Useful exports of everything needed to drive a panel
pub mod prelude {
    pub use crate::color::{Color, TriColor};
    pub use crate::sequence::SequenceOp;
    pub use crate::thinkink::{
        Panel, THINKINK_154_TRICOLOR_Z17, THINKINK_213_TRICOLOR_RW, THINKINK_270_TRICOLOR_C44,
        THINKINK_290_TRICOLOR_Z10,
    };
    pub use crate::traits::{ThinkInkDisplay, ThinkInkThreeColorDisplay};
    pub use crate::{buffer_len, SPI_MODE};
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};
