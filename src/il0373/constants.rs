//! Default sequences and waveform tables for the IL0373
//!
//! Values taken from the Adafruit EPD sample code for the ThinkInk boards.

use super::command::Command;
use crate::sequence::SequenceOp;

/// Power-up sequence used when the panel doesn't bring its own
pub(crate) const DEFAULT_INIT_SEQUENCE: &[SequenceOp<Command>] = &[
    SequenceOp::Send(Command::PowerSetting, &[0x03, 0x00, 0x2B, 0x2B, 0x09]),
    SequenceOp::Send(Command::BoosterSoftStart, &[0x17, 0x17, 0x17]),
    SequenceOp::Send(Command::PowerOn, &[]),
    SequenceOp::Wait(200),
    SequenceOp::Send(Command::PanelSetting, &[0xCF]),
    SequenceOp::Send(Command::VcomAndDataIntervalSetting, &[0x37]),
    SequenceOp::Send(Command::PllControl, &[0x29]),
    SequenceOp::Send(Command::VcmDcSetting, &[0x0A]),
    SequenceOp::Wait(20),
];
