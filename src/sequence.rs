//! Declarative command sequences
//!
//! The upstream C driver encodes its power-up list as a flat byte table with
//! in-band markers (a `0xFF` pseudo command for waits, `0xFE` as terminator).
//! Here a sequence is a slice of [SequenceOp] values instead, so the
//! terminator goes away and a malformed table can't be expressed.
//!
//! Panels with factory-programmed quirks carry their own sequence in their
//! [Panel](crate::thinkink::Panel) record and the driver runs that one
//! instead of the chip default.

/// One step of a command sequence.
///
/// The command type is the chip-specific opcode enum, e.g.
/// [il0373::Command](crate::il0373::Command).
#[derive(Debug, Copy, Clone)]
pub enum SequenceOp<T> {
    /// Send a command with the given data bytes
    Send(T, &'static [u8]),
    /// Wait for the busy line to clear, then delay for the given amount of ms
    Wait(u32),
}
