//! Panel records for the IL0373 based Adafruit ThinkInk SKUs
//!
//! The same driver chip sits behind several products that only differ in
//! their dimensions and occasionally in their init or waveform tables, so a
//! SKU is just a [Panel] record handed to
//! [Il0373::new](crate::traits::ThinkInkDisplay::new). For a board that is
//! not listed here, start from [Panel::new] with the dimensions from the
//! datasheet.

use crate::il0373::Command;
use crate::sequence::SequenceOp;

/// Fallback wait after a refresh when no busy pin is wired.
///
/// Tri-color refreshes are slow, the upstream drivers wait 15s blind
const DEFAULT_REFRESH_DELAY_MS: u32 = 15_000;

/// Static configuration of one panel SKU
#[derive(Debug, Copy, Clone)]
pub struct Panel {
    /// Width in pixels, the short axis with one source line per pixel
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Replaces the chip's built-in power-up sequence when set
    pub init_sequence: Option<&'static [SequenceOp<Command>]>,
    /// Extra waveform tables sent after the power-up sequence
    pub lut_sequence: Option<&'static [SequenceOp<Command>]>,
    /// Fixed wait after a refresh for boards without a busy pin
    pub refresh_delay_ms: u32,
}

impl Panel {
    /// A panel with the given dimensions, the default sequences and the
    /// conservative refresh fallback
    pub const fn new(width: u32, height: u32) -> Self {
        Panel {
            width,
            height,
            init_sequence: None,
            lut_sequence: None,
            refresh_delay_ms: DEFAULT_REFRESH_DELAY_MS,
        }
    }
}

/// 1.54" tri-color breakout (Z17), 152x152
pub const THINKINK_154_TRICOLOR_Z17: Panel = Panel::new(152, 152);

/// 2.13" tri-color FeatherWing (RW), 104x212
pub const THINKINK_213_TRICOLOR_RW: Panel = Panel::new(104, 212);

/// 2.7" tri-color Shield (C44), 176x264
pub const THINKINK_270_TRICOLOR_C44: Panel = Panel::new(176, 264);

/// 2.9" tri-color breakout (Z10), 128x296
pub const THINKINK_290_TRICOLOR_Z10: Panel = Panel::new(128, 296);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer_len;

    #[test]
    fn panel_sizes() {
        assert_eq!(THINKINK_154_TRICOLOR_Z17.width, 152);
        assert_eq!(THINKINK_154_TRICOLOR_Z17.height, 152);
        assert_eq!(THINKINK_213_TRICOLOR_RW.width, 104);
        assert_eq!(THINKINK_213_TRICOLOR_RW.height, 212);
        assert_eq!(THINKINK_270_TRICOLOR_C44.width, 176);
        assert_eq!(THINKINK_270_TRICOLOR_C44.height, 264);
        assert_eq!(THINKINK_290_TRICOLOR_Z10.width, 128);
        assert_eq!(THINKINK_290_TRICOLOR_Z10.height, 296);
    }

    #[test]
    fn plane_buffer_lengths() {
        // one bit per pixel per plane
        assert_eq!(buffer_len(104, 212), 104 * 212 / 8);
        assert_eq!(buffer_len(152, 152), 152 * 152 / 8);
        // widths that are not byte aligned round up per row
        assert_eq!(buffer_len(100, 10), 130);
    }

    #[test]
    fn panel_with_overrides_is_debug_formattable() {
        const QUIRKY_INIT: &[SequenceOp<Command>] =
            &[SequenceOp::Send(Command::PowerOn, &[]), SequenceOp::Wait(200)];

        let mut panel = Panel::new(104, 212);
        panel.init_sequence = Some(QUIRKY_INIT);

        // the record (and through it the opcode enum) must format for logs
        let formatted = format!("{:?}", panel);
        assert!(formatted.contains("PowerOn"));
        assert!(formatted.contains("Wait(200)"));
    }

    #[test]
    fn skus_use_default_sequences() {
        for panel in [
            THINKINK_154_TRICOLOR_Z17,
            THINKINK_213_TRICOLOR_RW,
            THINKINK_270_TRICOLOR_C44,
            THINKINK_290_TRICOLOR_Z10,
        ] {
            assert!(panel.init_sequence.is_none());
            assert!(panel.lut_sequence.is_none());
            assert_eq!(panel.refresh_delay_ms, 15_000);
        }
    }
}
