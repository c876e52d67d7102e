//! The nRF24L01 implementation of the [`prelude`](mod@crate::radio::prelude) traits,
//! and the SPI framing they are built on.
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};
pub(crate) mod bit_fields;
mod channel;
mod constants;
mod fifo;
mod init;
mod pipe;
mod power;
mod radio;
mod status;
pub use constants::{mnemonics, Command, Register};

use super::prelude::{EsbInit, EsbPower};
use crate::types::{Address, StatusFlags, MAX_PAYLOAD_LENGTH};

/// An collection of error types to describe hardware malfunctions
/// and rejected requests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// A payload (or read length) exceeded the 32 byte FIFO width.
    /// Nothing was sent to the radio.
    PayloadTooLong(usize),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO)
    BinaryCorruption,
}

#[cfg(feature = "defmt")]
impl<SPI, DO> defmt::Format for Nrf24Error<SPI, DO> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Nrf24Error::Spi(_) => defmt::write!(fmt, "SPI error"),
            Nrf24Error::Gpo(_) => defmt::write!(fmt, "GPIO error"),
            Nrf24Error::PayloadTooLong(len) => {
                defmt::write!(fmt, "payload of {} bytes is too long", len)
            }
            Nrf24Error::BinaryCorruption => defmt::write!(fmt, "binary corruption"),
        }
    }
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// The driver owns the SPI bus and the radio's CSN (chip select) pin, so
/// every SPI frame is delimited by the driver itself. All operations take
/// `&mut self`, which keeps a single frame in flight at a time. Sharing a
/// radio between threads requires an external lock.
pub struct Nrf24<SPI, DO, DI, DELAY> {
    /// The CE pin for the radio.
    ///
    /// This really only exposed for advanced manipulation of active RX/TX mode.
    /// It is strongly recommended to use [`EsbPipe::listen()`](fn@crate::radio::prelude::EsbPipe::listen)
    /// and [`EsbRadio::transmit()`](fn@crate::radio::prelude::EsbRadio::transmit)
    /// because those methods guarantee proper radio usage.
    pub ce_pin: DO,
    /// The radio's IRQ pin (active low).
    ///
    /// The driver never waits on it. It is kept here so applications can
    /// poll it or hook it up to their own interrupt handling.
    pub irq_pin: DI,
    _spi: SPI,
    _csn_pin: DO,
    _delay_impl: DELAY,
    _buf: [u8; MAX_PAYLOAD_LENGTH + 1],
    _status: StatusFlags,
    _pipe0_rx_addr: Option<Address>,
    _tx_addr: Option<Address>,
}

impl<SPI, DO, DI, DELAY> Nrf24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`Nrf24`] object for use on the specified `spi` bus.
    ///
    /// Nothing is sent to the radio until
    /// [`init()`](fn@crate::radio::prelude::EsbInit::init) is called.
    pub fn new(
        ce_pin: DO,
        csn_pin: DO,
        irq_pin: DI,
        spi: SPI,
        delay_impl: DELAY,
    ) -> Nrf24<SPI, DO, DI, DELAY> {
        Nrf24 {
            ce_pin,
            irq_pin,
            _spi: spi,
            _csn_pin: csn_pin,
            _delay_impl: delay_impl,
            _buf: [0u8; MAX_PAYLOAD_LENGTH + 1],
            _status: StatusFlags::from_bits(0),
            _pipe0_rx_addr: None,
            _tx_addr: None,
        }
    }

    /// Give back the SPI bus, the CE, CSN and IRQ pins, and the delay
    /// implementation. Nothing is sent to the radio.
    ///
    /// Use [`EsbPower::power_down()`] (or [`Nrf24::session()`])
    /// beforehand to leave the radio in a low power state.
    pub fn release(self) -> (SPI, DO, DO, DI, DELAY) {
        (
            self._spi,
            self.ce_pin,
            self._csn_pin,
            self.irq_pin,
            self._delay_impl,
        )
    }

    /// Run `f` on an initialized radio, then power the radio down.
    ///
    /// The radio is powered down on every exit path, including when
    /// [`init()`](fn@crate::radio::prelude::EsbInit::init) or `f` fail.
    /// The first error encountered is returned.
    pub fn session<T, F>(&mut self, f: F) -> Result<T, Nrf24Error<SPI::Error, DO::Error>>
    where
        F: FnOnce(&mut Self) -> Result<T, Nrf24Error<SPI::Error, DO::Error>>,
    {
        let result = self.init().and_then(|_| f(self));
        let powered_down = self.power_down();
        let value = result?;
        powered_down?;
        Ok(value)
    }

    /// Is the radio's IRQ pin asserted (driven low)?
    pub fn is_irq_asserted(&mut self) -> Result<bool, DI::Error> {
        self.irq_pin.is_low()
    }

    /// Run one SPI frame on the internal buffer.
    ///
    /// The first `head` bytes are exchanged, then the next `tail` bytes
    /// (if any) are exchanged separately while CSN stays asserted.
    /// CSN is released even if the bus failed.
    fn spi_frame(
        &mut self,
        head: usize,
        tail: usize,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._csn_pin.set_low().map_err(Nrf24Error::Gpo)?;
        let (first, rest) = self._buf.split_at_mut(head);
        let mut exchanged = self._spi.transfer_in_place(first);
        if exchanged.is_ok() && tail > 0 {
            exchanged = self._spi.transfer_in_place(&mut rest[..tail]);
        }
        if exchanged.is_ok() {
            exchanged = self._spi.flush();
        }
        self._csn_pin.set_high().map_err(Nrf24Error::Gpo)?;
        exchanged.map_err(Nrf24Error::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        trace!(
            "SPI frame {:#x} ({} bytes), status {:#x}",
            self._buf[0],
            head + tail,
            self._status.into_bits()
        );
        Ok(())
    }

    /// Send a 1 byte `command`.
    ///
    /// ```ignore
    /// self.send_command(Command::Nop)?;
    /// // STATUS register is now stored in self._status
    /// ```
    pub fn send_command(
        &mut self,
        command: Command,
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command.opcode();
        self.spi_frame(1, 0)?;
        Ok(self._status)
    }

    /// Send a `command` followed by 1 byte of data in a single exchange.
    pub fn send_command_value(
        &mut self,
        command: Command,
        value: u8,
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command.opcode();
        self._buf[1] = value;
        self.spi_frame(2, 0)?;
        Ok(self._status)
    }

    /// Send a `command`, then `payload` as a second exchange within the same frame.
    pub fn send_command_payload(
        &mut self,
        command: Command,
        payload: &[u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error>> {
        let len = payload.len();
        if len > MAX_PAYLOAD_LENGTH {
            return Err(Nrf24Error::PayloadTooLong(len));
        }
        self._buf[0] = command.opcode();
        self._buf[1..=len].copy_from_slice(payload);
        self.spi_frame(1, len)?;
        Ok(self._status)
    }

    /// Send a `command` and return the 1 byte of data that follows the STATUS byte.
    pub fn receive_byte(
        &mut self,
        command: Command,
    ) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command.opcode();
        self._buf[1] = 0;
        self.spi_frame(2, 0)?;
        Ok(self._buf[1])
    }

    /// Send a `command`, then clock in `buf.len()` bytes of data
    /// as a second exchange within the same frame.
    pub fn receive_bytes(
        &mut self,
        command: Command,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = buf.len();
        if len > MAX_PAYLOAD_LENGTH {
            return Err(Nrf24Error::PayloadTooLong(len));
        }
        self._buf[0] = command.opcode();
        self._buf[1..=len].fill(0);
        self.spi_frame(1, len)?;
        buf.copy_from_slice(&self._buf[1..=len]);
        Ok(())
    }

    /// Read the 1 byte value of `register`.
    pub fn read_register(
        &mut self,
        register: Register,
    ) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        self.receive_byte(Command::ReadRegister(register))
    }

    /// Read `buf.len()` bytes from a multi-byte register (like an address).
    pub fn read_register_into(
        &mut self,
        register: Register,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.receive_bytes(Command::ReadRegister(register), buf)
    }

    /// Write a 1 byte `value` to `register`.
    pub fn write_register(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error>> {
        self.send_command_value(Command::WriteRegister(register), value)
    }

    /// Write `bytes` to a multi-byte register (like an address).
    pub fn write_register_bytes(
        &mut self,
        register: Register,
        bytes: &[u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error>> {
        self.send_command_payload(Command::WriteRegister(register), bytes)
    }

    /// Was a signal above -64 dBm detected on the current channel?
    ///
    /// The radio only measures this while listening.
    pub fn received_power_detected(
        &mut self,
    ) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        Ok(self.read_register(Register::Rpd)? & 1 == 1)
    }

    /// Set bits in EN_RXADDR.
    fn enable_rx_pipes(&mut self, mask: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let enabled = self.read_register(Register::EnRxAddr)?;
        self.write_register(Register::EnRxAddr, enabled | mask)?;
        Ok(())
    }

    /// Clear bits in EN_RXADDR.
    fn disable_rx_pipes(&mut self, mask: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let enabled = self.read_register(Register::EnRxAddr)?;
        self.write_register(Register::EnRxAddr, enabled & !mask)?;
        Ok(())
    }

    /// Read-modify-write the PRIM_RX bit of the CONFIG register.
    fn set_prim_rx(&mut self, is_rx: bool) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let config = bit_fields::Config::from_bits(self.read_register(Register::Config)?);
        self.write_register(Register::Config, config.with_prim_rx(is_rx).into_bits())?;
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{Command, Nrf24, Nrf24Error, Register};
    use crate::{
        radio::prelude::*,
        spi_test_expects,
        test::{init_preamble, mk_radio, mk_radio_with_irq, r, w, MockRadio},
        Address, StatusFlags,
    };
    use embedded_hal::spi::{ErrorKind, ErrorType, SpiBus};
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::vec;

    /// A bus whose every exchange fails.
    struct BrokenBus;

    impl ErrorType for BrokenBus {
        type Error = ErrorKind;
    }

    impl SpiBus for BrokenBus {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn flush(&mut self) -> Result<(), ErrorKind> {
            Ok(())
        }
    }

    #[test]
    fn status_starts_at_zero() {
        let mut mocks = mk_radio(&[], &spi_test_expects![]);
        assert_eq!(mocks.0.status().into_bits(), 0);
        mocks.done();
    }

    #[test]
    fn every_frame_updates_status() {
        let spi_expectations = spi_test_expects![
            (vec![0xFFu8], vec![0x0Eu8]),
            (vec![r(Register::RfCh), 0u8], vec![0x40u8, 2u8]),
            (vec![w(Register::RfCh), 5u8], vec![0x2Eu8, 0u8]),
        ];
        let mut mocks = mk_radio(&[], &spi_expectations);
        let radio = &mut mocks.0;
        assert_eq!(radio.send_command(Command::Nop).unwrap().into_bits(), 0x0E);
        assert_eq!(radio.read_register(Register::RfCh).unwrap(), 2);
        assert_eq!(radio.status().into_bits(), 0x40);
        let status = radio.write_register(Register::RfCh, 5).unwrap();
        assert_eq!(status, StatusFlags::from_bits(0x2E));
        assert_eq!(radio.status(), status);
        mocks.done();
    }

    #[test]
    fn payload_frames_are_split() {
        let address = [0x31u8, 0x14, 0x15, 0x26, 0x53];
        let spi_expectations = spi_test_expects![
            // opcode, then the address bytes, under one CSN assertion
            [
                (vec![w(Register::TxAddr)], vec![0x0Eu8]),
                (address.to_vec(), vec![0u8; 5]),
            ],
            [
                (vec![r(Register::TxAddr)], vec![0x1Eu8]),
                (vec![0u8; 5], address.to_vec()),
            ],
            (vec![Command::ReadRxPayloadWidth.opcode(), 0u8], vec![0x0Eu8, 3u8]),
        ];
        let mut mocks = mk_radio(&[], &spi_expectations);
        let radio = &mut mocks.0;
        radio.write_register_bytes(Register::TxAddr, &address).unwrap();
        let mut readback = [0u8; 5];
        radio
            .read_register_into(Register::TxAddr, &mut readback)
            .unwrap();
        assert_eq!(readback, address);
        assert_eq!(radio.status().into_bits(), 0x1E);
        assert_eq!(radio.receive_byte(Command::ReadRxPayloadWidth).unwrap(), 3);
        mocks.done();
    }

    #[test]
    fn oversized_frames_are_rejected() {
        let mut mocks = mk_radio(&[], &spi_test_expects![]);
        let radio = &mut mocks.0;
        assert_eq!(
            radio.send_command_payload(Command::WriteTxPayload, &[0u8; 33]),
            Err(Nrf24Error::PayloadTooLong(33))
        );
        let mut buf = [0u8; 40];
        assert_eq!(
            radio.receive_bytes(Command::ReadRxPayload, &mut buf),
            Err(Nrf24Error::PayloadTooLong(40))
        );
        assert_eq!(radio.status().into_bits(), 0);
        mocks.done();
    }

    #[test]
    fn rpd() {
        let spi_expectations = spi_test_expects![
            // get the RPD register value
            (vec![r(Register::Rpd), 0u8], vec![0xEu8, 0xFFu8]),
        ];
        let mut mocks = mk_radio(&[], &spi_expectations);
        assert!(mocks.0.received_power_detected().unwrap());
        mocks.done();
    }

    #[test]
    fn irq_pin_is_active_low() {
        let irq_expectations = [
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::Low),
        ];
        let mocks = mk_radio_with_irq(&[], &irq_expectations, &spi_test_expects![]);
        let MockRadio(mut radio, mut spi, mut ce_pin, mut csn_pin, _) = mocks;
        assert!(!radio.is_irq_asserted().unwrap());
        assert!(radio.is_irq_asserted().unwrap());
        let (_, _, _, mut irq_pin, _) = radio.release();
        irq_pin.done();
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    fn session_powers_down_after_failed_init() {
        let ce_expectations = [
            // init()
            PinTransaction::set(PinState::Low),
            // power_down()
            PinTransaction::set(PinState::Low),
        ];
        let mut spi_expectations = init_preamble();
        spi_expectations.extend(spi_test_expects![
            // CONFIG reads back garbage
            (vec![r(Register::Config), 0u8], vec![0xFFu8, 0xFFu8]),
            // power_down()
            (vec![w(Register::Config), 0x08u8], vec![0x0Eu8, 0u8]),
        ]);
        let mut mocks = mk_radio(&ce_expectations, &spi_expectations);
        let mut ran = false;
        let result = mocks.0.session(|_| {
            ran = true;
            Ok(())
        });
        assert_eq!(result, Err(Nrf24Error::BinaryCorruption));
        assert!(!ran);
        mocks.done();
    }

    #[test]
    fn session_powers_down_after_work() {
        let ce_expectations = [
            // init()
            PinTransaction::set(PinState::Low),
            // power_down()
            PinTransaction::set(PinState::Low),
        ];
        let mut spi_expectations = init_preamble();
        spi_expectations.extend(spi_test_expects![
            (vec![r(Register::Config), 0u8], vec![0x0Eu8, 0x0Fu8]),
            (vec![w(Register::RfCh), 2u8], vec![0x0Eu8, 0u8]),
            (vec![w(Register::SetupAw), 3u8], vec![0x0Eu8, 0u8]),
            (vec![w(Register::SetupRetr), 0x34u8], vec![0x0Eu8, 0u8]),
            (vec![w(Register::RfSetup), 0x0Fu8], vec![0x0Eu8, 0u8]),
            (vec![w(Register::EnAa), 0x3Fu8], vec![0x0Eu8, 0u8]),
            (vec![w(Register::Dynpd), 0x3Fu8], vec![0x0Eu8, 0u8]),
            (vec![w(Register::Feature), 0x04u8], vec![0x0Eu8, 0u8]),
            (vec![w(Register::EnRxAddr), 0u8], vec![0x0Eu8, 0u8]),
            // work done in the session
            (vec![r(Register::RfCh), 0u8], vec![0x0Eu8, 2u8]),
            // power_down()
            (vec![w(Register::Config), 0x08u8], vec![0x0Eu8, 0u8]),
        ]);
        let mut mocks = mk_radio(&ce_expectations, &spi_expectations);
        let channel = mocks.0.session(|radio| radio.channel());
        assert_eq!(channel, Ok(2));
        mocks.done();
    }

    #[test]
    fn bus_error_releases_csn() {
        let csn_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut ce_pin = PinMock::new(&[]);
        let mut csn_pin = PinMock::new(&csn_expectations);
        let mut irq_pin = PinMock::new(&[]);
        let mut radio = Nrf24::new(
            ce_pin.clone(),
            csn_pin.clone(),
            irq_pin.clone(),
            BrokenBus,
            NoopDelay,
        );
        let address = Address::new([0xB3; 5]);
        assert_eq!(
            radio.transmit(&address, &[1, 2, 3]),
            Err(Nrf24Error::Spi(ErrorKind::Other))
        );
        assert_eq!(radio.status().into_bits(), 0);
        ce_pin.done();
        csn_pin.done();
        irq_pin.done();
    }
}
