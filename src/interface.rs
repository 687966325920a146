use crate::sequence::SequenceOp;
use crate::traits::Command;
use core::marker::PhantomData;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// The Connection Interface of all IL0373 boards
///
/// SINGLE_BYTE_WRITE defines if a data block is written bytewise
/// or blockwise to the spi device
pub(crate) struct DisplayInterface<SPI, BUSY, DC, RST, DELAY, const SINGLE_BYTE_WRITE: bool> {
    /// SPI
    _spi: PhantomData<SPI>,
    /// DELAY
    _delay: PhantomData<DELAY>,
    /// Low for busy, Wait until display is ready!
    ///
    /// Optional because some boards don't route the busy line; waiting then
    /// falls back to fixed delays
    busy: Option<BUSY>,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Resetting
    rst: RST,
    /// number of us the busy poll loop should sleep on
    delay_us: u32,
}

impl<SPI, BUSY, DC, RST, DELAY, const SINGLE_BYTE_WRITE: bool>
    DisplayInterface<SPI, BUSY, DC, RST, DELAY, SINGLE_BYTE_WRITE>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new `DisplayInterface` struct
    ///
    /// If no poll delay is given, a default delay of 10ms is used.
    pub fn new(busy: Option<BUSY>, dc: DC, rst: RST, delay_us: Option<u32>) -> Self {
        // default poll delay of 10ms
        let delay_us = delay_us.unwrap_or(10_000);
        DisplayInterface {
            _spi: PhantomData,
            _delay: PhantomData,
            busy,
            dc,
            rst,
            delay_us,
        }
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// Enables direct interaction with the device with the help of [data()](DisplayInterface::data())
    pub(crate) fn cmd<T: Command>(&mut self, spi: &mut SPI, command: T) -> Result<(), SPI::Error> {
        // low for commands
        let _ = self.dc.set_low();

        // Transfer the command over spi
        self.write(spi, &[command.address()])
    }

    /// Basic function for sending an array of u8-values of data over spi
    ///
    /// Enables direct interaction with the device with the help of [cmd()](DisplayInterface::cmd())
    pub(crate) fn data(&mut self, spi: &mut SPI, data: &[u8]) -> Result<(), SPI::Error> {
        // high for data
        let _ = self.dc.set_high();

        if SINGLE_BYTE_WRITE {
            for val in data.iter().copied() {
                // Transfer data one u8 at a time over spi
                self.write(spi, &[val])?;
            }
        } else {
            self.write(spi, data)?;
        }

        Ok(())
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    pub(crate) fn cmd_with_data<T: Command>(
        &mut self,
        spi: &mut SPI,
        command: T,
        data: &[u8],
    ) -> Result<(), SPI::Error> {
        self.cmd(spi, command)?;
        self.data(spi, data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    ///
    /// Used to fill a whole RAM channel with the background color without
    /// needing a host-side buffer
    pub(crate) fn data_x_times(
        &mut self,
        spi: &mut SPI,
        val: u8,
        repetitions: u32,
    ) -> Result<(), SPI::Error> {
        // high for data
        let _ = self.dc.set_high();
        // Transfer data (u8) over spi
        for _ in 0..repetitions {
            self.write(spi, &[val])?;
        }
        Ok(())
    }

    /// Executes a declarative command sequence like the chip's power-up list.
    ///
    /// [SequenceOp::Wait] waits for the busy line (or the `fallback_ms` fixed
    /// delay without one) and then delays for the given amount of ms.
    pub(crate) fn run_sequence<T: Command>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        sequence: &[SequenceOp<T>],
        is_busy_low: bool,
        fallback_ms: u32,
    ) -> Result<(), SPI::Error> {
        for op in sequence.iter().copied() {
            match op {
                SequenceOp::Send(command, data) => {
                    self.cmd(spi, command)?;
                    // some commands (e.g. power on) carry no data bytes
                    if !data.is_empty() {
                        self.data(spi, data)?;
                    }
                }
                SequenceOp::Wait(ms) => {
                    self.wait_until_idle(delay, is_busy_low, fallback_ms);
                    delay.delay_ms(ms);
                }
            }
        }
        Ok(())
    }

    // spi write helper/abstraction function
    fn write(&mut self, spi: &mut SPI, data: &[u8]) -> Result<(), SPI::Error> {
        // transfer spi data
        // Be careful!! Linux has a default limit of 4096 bytes per spi transfer
        // see https://raspberrypi.stackexchange.com/questions/65595/spi-transfer-fails-with-buffer-size-greater-than-4096
        if cfg!(target_os = "linux") {
            for data_chunk in data.chunks(4096) {
                spi.write(data_chunk)?;
            }
            Ok(())
        } else {
            spi.write(data)
        }
    }

    /// Waits until device isn't busy anymore (busy == HIGH)
    ///
    /// Without a busy pin this waits for the fixed `fallback_ms` instead,
    /// which for a display refresh needs to be conservative (several seconds)
    pub(crate) fn wait_until_idle(&mut self, delay: &mut DELAY, is_busy_low: bool, fallback_ms: u32) {
        if self.busy.is_some() {
            while self.is_busy(is_busy_low) {
                if self.delay_us > 0 {
                    delay.delay_us(self.delay_us);
                }
            }
        } else {
            delay.delay_ms(fallback_ms);
        }
    }

    /// Checks if device is still busy
    ///
    /// This is normally handled by the more complicated commands themselves,
    /// but in the case you send data and commands directly you might need to check
    /// if the device is still busy
    ///
    /// Always false without a busy pin
    pub(crate) fn is_busy(&mut self, is_busy_low: bool) -> bool {
        match self.busy.as_mut() {
            Some(busy) => {
                (is_busy_low && busy.is_low().unwrap_or(false))
                    || (!is_busy_low && busy.is_high().unwrap_or(false))
            }
            None => false,
        }
    }

    /// Resets the device.
    ///
    /// Often used to awake the module from deep sleep. See [Il0373::sleep()](crate::il0373::Il0373::sleep())
    ///
    /// The timing of keeping the reset pin low seems to be important and different per device.
    /// The IL0373 boards reset reliably with 10ms
    pub(crate) fn reset(&mut self, delay: &mut DELAY, initial_delay: u32, duration: u32) {
        let _ = self.rst.set_high();
        delay.delay_us(initial_delay);

        let _ = self.rst.set_low();
        delay.delay_us(duration);
        let _ = self.rst.set_high();
        delay.delay_us(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayInterface;
    use crate::sequence::SequenceOp;
    use crate::traits::Command;
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, State, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
    };

    #[derive(Copy, Clone)]
    enum TestCommand {
        PowerOn = 0x04,
        DisplayRefresh = 0x12,
    }

    impl Command for TestCommand {
        fn address(self) -> u8 {
            self as u8
        }
    }

    type TestInterface =
        DisplayInterface<SpiMock<u8>, PinMock, PinMock, PinMock, NoopDelay, false>;

    fn interface(
        spi_expectations: &[SpiTransaction<u8>],
        dc_expectations: &[PinTransaction],
    ) -> (TestInterface, SpiMock<u8>, [PinMock; 3]) {
        let spi = SpiMock::new(spi_expectations);
        let busy = PinMock::new(&[]);
        let dc = PinMock::new(dc_expectations);
        let rst = PinMock::new(&[]);
        let interface =
            DisplayInterface::new(Some(busy.clone()), dc.clone(), rst.clone(), Some(0));
        (interface, spi, [busy, dc, rst])
    }

    fn spi_write(bytes: &[u8]) -> [SpiTransaction<u8>; 3] {
        [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(bytes.to_vec()),
            SpiTransaction::transaction_end(),
        ]
    }

    #[test]
    fn cmd_pulls_dc_low() {
        let (mut interface, mut spi, mut pins) = interface(
            &spi_write(&[0x04]),
            &[PinTransaction::set(State::Low)],
        );

        interface.cmd(&mut spi, TestCommand::PowerOn).unwrap();

        spi.done();
        pins.iter_mut().for_each(|pin| pin.done());
    }

    #[test]
    fn data_pulls_dc_high() {
        let (mut interface, mut spi, mut pins) = interface(
            &spi_write(&[0xDE, 0xAD]),
            &[PinTransaction::set(State::High)],
        );

        interface.data(&mut spi, &[0xDE, 0xAD]).unwrap();

        spi.done();
        pins.iter_mut().for_each(|pin| pin.done());
    }

    #[test]
    fn data_x_times_repeats_fill_byte() {
        let mut expectations = vec![];
        for _ in 0..3 {
            expectations.extend_from_slice(&spi_write(&[0xFF]));
        }
        let (mut interface, mut spi, mut pins) =
            interface(&expectations, &[PinTransaction::set(State::High)]);

        interface.data_x_times(&mut spi, 0xFF, 3).unwrap();

        spi.done();
        pins.iter_mut().for_each(|pin| pin.done());
    }

    #[test]
    fn sequence_sends_commands_in_order() {
        let mut expectations = vec![];
        expectations.extend_from_slice(&spi_write(&[0x04]));
        expectations.extend_from_slice(&spi_write(&[0x12]));
        expectations.extend_from_slice(&spi_write(&[0xAA]));
        let dc_expectations = [
            PinTransaction::set(State::Low),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ];
        let (mut interface, mut spi, mut pins) = interface(&expectations, &dc_expectations);

        let sequence: &[SequenceOp<TestCommand>] = &[
            SequenceOp::Send(TestCommand::PowerOn, &[]),
            SequenceOp::Send(TestCommand::DisplayRefresh, &[0xAA]),
        ];
        interface
            .run_sequence(&mut spi, &mut NoopDelay::new(), sequence, true, 0)
            .unwrap();

        spi.done();
        pins.iter_mut().for_each(|pin| pin.done());
    }

    #[test]
    fn wait_until_idle_polls_busy_pin() {
        let busy = PinMock::new(&[
            PinTransaction::get(State::Low),
            PinTransaction::get(State::Low),
            PinTransaction::get(State::High),
        ]);
        let dc = PinMock::new(&[]);
        let rst = PinMock::new(&[]);
        let mut interface: TestInterface =
            DisplayInterface::new(Some(busy.clone()), dc.clone(), rst.clone(), Some(0));

        // busy is low-active: polls until the line reads high
        interface.wait_until_idle(&mut NoopDelay::new(), true, 500);

        for mut pin in [busy, dc, rst] {
            pin.done();
        }
    }

    #[test]
    fn wait_until_idle_without_busy_pin_uses_fallback_delay() {
        let dc = PinMock::new(&[]);
        let rst = PinMock::new(&[]);
        let mut interface: TestInterface =
            DisplayInterface::new(None, dc.clone(), rst.clone(), Some(0));

        assert!(!interface.is_busy(true));
        interface.wait_until_idle(&mut NoopDelay::new(), true, 500);

        for mut pin in [dc, rst] {
            pin.done();
        }
    }
}
