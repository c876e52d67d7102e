use super::{bit_fields::FifoStatus, Command, Nrf24, Nrf24Error, Register};
use crate::{radio::prelude::EsbFifo, FifoState};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

impl<SPI, DO, DI, DELAY> EsbFifo for Nrf24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn flush_transmit_buffer(&mut self) -> Result<(), Self::FifoErrorType> {
        self.send_command(Command::FlushTx)?;
        Ok(())
    }

    fn flush_receive_buffer(&mut self) -> Result<(), Self::FifoErrorType> {
        self.send_command(Command::FlushRx)?;
        Ok(())
    }

    fn fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let fifo = FifoStatus::from_bits(self.read_register(Register::FifoStatus)?);
        let (full, empty) = if about_tx {
            (fifo.tx_full(), fifo.tx_empty())
        } else {
            (fifo.rx_full(), fifo.rx_empty())
        };
        Ok(match (full, empty) {
            (true, _) => FifoState::Full,
            (false, true) => FifoState::Empty,
            (false, false) => FifoState::Occupied,
        })
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::EsbFifo;
    use crate::{radio::rf24::Register, spi_test_expects, test::mk_radio, test::r, FifoState};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn flush_buffers() {
        let spi_expectations = spi_test_expects![
            (vec![0xE1u8], vec![0x0Fu8]),
            (vec![0xE2u8], vec![0x0Eu8]),
        ];
        let mut mocks = mk_radio(&[], &spi_expectations);
        mocks.0.flush_transmit_buffer().unwrap();
        mocks.0.flush_receive_buffer().unwrap();
        mocks.done();
    }

    #[test]
    fn get_fifo_state() {
        let spi_expectations = spi_test_expects![
            // TX empty, RX empty
            (vec![r(Register::FifoStatus), 0u8], vec![0x0Eu8, 0x11u8]),
            (vec![r(Register::FifoStatus), 0u8], vec![0x0Eu8, 0x11u8]),
            // TX full, RX occupied
            (vec![r(Register::FifoStatus), 0u8], vec![0x0Eu8, 0x20u8]),
            (vec![r(Register::FifoStatus), 0u8], vec![0x0Eu8, 0x20u8]),
            // TX occupied, RX full
            (vec![r(Register::FifoStatus), 0u8], vec![0x0Eu8, 0x02u8]),
            (vec![r(Register::FifoStatus), 0u8], vec![0x0Eu8, 0x02u8]),
        ];
        let mut mocks = mk_radio(&[], &spi_expectations);
        let radio = &mut mocks.0;
        assert_eq!(radio.fifo_state(true), Ok(FifoState::Empty));
        assert_eq!(radio.fifo_state(false), Ok(FifoState::Empty));
        assert_eq!(radio.fifo_state(true), Ok(FifoState::Full));
        assert_eq!(radio.fifo_state(false), Ok(FifoState::Occupied));
        assert_eq!(radio.fifo_state(true), Ok(FifoState::Occupied));
        assert_eq!(radio.fifo_state(false), Ok(FifoState::Full));
        mocks.done();
    }
}
