//! SPI Commands for the IL0373 driver chip
use crate::traits;

/// IL0373 commands
///
/// Should rarely (never?) be needed directly, except for building a custom
/// init or LUT sequence for a panel with factory-programmed quirks.
///
/// For more infos about the addresses and what they are doing look into the datasheet
#[allow(dead_code)]
#[derive(Debug, Copy, Clone)]
pub enum Command {
    /// Panel configuration: resolution source, gate scan direction, booster switch
    PanelSetting = 0x00,

    /// Internal power selection and VDH/VDL/VDHR voltage levels
    PowerSetting = 0x01,
    /// Turn off the internal DC/DC converters, keep register state
    PowerOff = 0x02,
    /// Turn on the internal DC/DC converters, needs a [Wait](crate::sequence::SequenceOp::Wait) afterwards
    PowerOn = 0x04,
    /// Booster soft start periods and driving strength
    BoosterSoftStart = 0x06,
    /// Deep sleep, only a hardware reset returns to standby
    DeepSleep = 0x07,
    /// Start writing the black/white RAM channel
    DataStartTransmission1 = 0x10,
    /// Run the waveform and update the panel with the RAM contents
    DisplayRefresh = 0x12,
    /// Start writing the red RAM channel
    DataStartTransmission2 = 0x13,

    /// VCOM waveform lookup table
    LutForVcom = 0x20,
    /// White-to-white waveform lookup table
    LutWhiteToWhite = 0x21,
    /// Black-to-white waveform lookup table
    LutBlackToWhite = 0x22,
    /// White-to-black waveform lookup table
    LutWhiteToBlack = 0x23,
    /// Black-to-black waveform lookup table
    LutBlackToBlack = 0x24,

    /// Frame rate control
    PllControl = 0x30,
    /// VCOM level and data polarity between frames, also sets the border color
    VcomAndDataIntervalSetting = 0x50,
    /// Panel resolution, one byte horizontal and two bytes vertical
    ResolutionSetting = 0x61,
    /// VCOM DC level
    VcmDcSetting = 0x82,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::Command;
    use crate::traits::Command as CommandTrait;

    #[test]
    fn command_addr() {
        assert_eq!(Command::PanelSetting.address(), 0x00);

        assert_eq!(Command::DataStartTransmission2.address(), 0x13);

        assert_eq!(Command::VcmDcSetting.address(), 0x82);
    }
}
