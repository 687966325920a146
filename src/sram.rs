//! Driver for the 23K256-style external SPI SRAM
//!
//! The larger ThinkInk breakouts carry a Microchip 23K256 SRAM on the same
//! SPI bus as the display (behind its own chip select), so hosts without
//! enough memory for two full color planes can keep the framebuffers off
//! chip. Planes stored here are addressed by a 16-bit byte offset and can be
//! streamed straight into the display RAM, see
//! [Il0373::update_color_frame_from_sram](crate::il0373::Il0373::update_color_frame_from_sram).

use bit_field::BitField;
use core::marker::PhantomData;
use embedded_hal::spi::{Operation, SpiDevice};

/// Read data from memory, starting at the given address
const READ: u8 = 0x03;
/// Write data to memory, starting at the given address
const WRITE: u8 = 0x02;
/// Read the status register
const RDSR: u8 = 0x05;
/// Write the status register
const WRSR: u8 = 0x01;

/// Sequential access mode, the address counter rolls through the whole array
const SEQUENTIAL_MODE: u8 = 0b01;

/// Driver for the 23K256 SPI SRAM
pub struct Sram23k256<SPI> {
    /// SPI
    _spi: PhantomData<SPI>,
}

impl<SPI> Sram23k256<SPI>
where
    SPI: SpiDevice,
{
    /// Creates a new `Sram23k256` driver
    pub fn new() -> Self {
        Sram23k256 { _spi: PhantomData }
    }

    /// Puts the chip into sequential access mode.
    ///
    /// Needed once after power-up before multi-byte reads and writes.
    pub fn init(&mut self, spi: &mut SPI) -> Result<(), SPI::Error> {
        let mut status = 0u8;
        status.set_bits(6..8, SEQUENTIAL_MODE);
        self.write_status(spi, status)
    }

    /// Reads `buffer.len()` bytes starting at `addr`
    pub fn read(&mut self, spi: &mut SPI, addr: u16, buffer: &mut [u8]) -> Result<(), SPI::Error> {
        spi.transaction(&mut [
            Operation::Write(&[READ, (addr >> 8) as u8, addr as u8]),
            Operation::Read(buffer),
        ])
    }

    /// Writes `data` starting at `addr`
    pub fn write(&mut self, spi: &mut SPI, addr: u16, data: &[u8]) -> Result<(), SPI::Error> {
        spi.transaction(&mut [
            Operation::Write(&[WRITE, (addr >> 8) as u8, addr as u8]),
            Operation::Write(data),
        ])
    }

    /// Fills `len` bytes starting at `addr` with `value`, e.g. to blank a
    /// color plane without a host-side buffer
    pub fn fill(&mut self, spi: &mut SPI, addr: u16, len: u16, value: u8) -> Result<(), SPI::Error> {
        let chunk = [value; 16];
        let mut addr = addr;
        let mut remaining = len;

        while remaining > 0 {
            let part = remaining.min(chunk.len() as u16);
            self.write(spi, addr, &chunk[..part as usize])?;
            addr = addr.wrapping_add(part);
            remaining -= part;
        }
        Ok(())
    }

    /// Reads the status register
    pub fn read_status(&mut self, spi: &mut SPI) -> Result<u8, SPI::Error> {
        let mut status = [0u8];
        spi.transaction(&mut [Operation::Write(&[RDSR]), Operation::Read(&mut status)])?;
        Ok(status[0])
    }

    /// Writes the status register
    pub fn write_status(&mut self, spi: &mut SPI, status: u8) -> Result<(), SPI::Error> {
        spi.transaction(&mut [Operation::Write(&[WRSR, status])])
    }
}

impl<SPI> Default for Sram23k256<SPI>
where
    SPI: SpiDevice,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn init_selects_sequential_mode() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x01, 0x40]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = SpiMock::new(&expectations);

        Sram23k256::new().init(&mut spi).unwrap();

        spi.done();
    }

    #[test]
    fn read_sends_opcode_and_big_endian_address() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x03, 0x12, 0x34]),
            SpiTransaction::read_vec(vec![0xAB, 0xCD]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = SpiMock::new(&expectations);

        let mut buffer = [0u8; 2];
        Sram23k256::new()
            .read(&mut spi, 0x1234, &mut buffer)
            .unwrap();
        assert_eq!(buffer, [0xAB, 0xCD]);

        spi.done();
    }

    #[test]
    fn write_sends_opcode_address_and_payload() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x02, 0x00, 0x10]),
            SpiTransaction::write_vec(vec![0xDE, 0xAD, 0xBE, 0xEF]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = SpiMock::new(&expectations);

        Sram23k256::new()
            .write(&mut spi, 0x0010, &[0xDE, 0xAD, 0xBE, 0xEF])
            .unwrap();

        spi.done();
    }

    #[test]
    fn fill_chunks_the_write() {
        // 20 bytes fill at a 16 byte chunk size -> two writes
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x02, 0x00, 0x00]),
            SpiTransaction::write_vec(vec![0xFF; 16]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x02, 0x00, 0x10]),
            SpiTransaction::write_vec(vec![0xFF; 4]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = SpiMock::new(&expectations);

        Sram23k256::new().fill(&mut spi, 0x0000, 20, 0xFF).unwrap();

        spi.done();
    }
}
