use super::{mnemonics, Command, Nrf24, Nrf24Error, Register};
use crate::{radio::prelude::EsbStatus, StatusFlags};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

impl<SPI, DO, DI, DELAY> EsbStatus for Nrf24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn status(&self) -> StatusFlags {
        self._status
    }

    fn update(&mut self) -> Result<StatusFlags, Self::StatusErrorType> {
        self.send_command(Command::Nop)
    }

    /// Flags are cleared by writing 1 to them.
    fn clear_interrupts(&mut self) -> Result<(), Self::StatusErrorType> {
        self.write_register(Register::Status, StatusFlags::IRQ_MASK)?;
        Ok(())
    }

    fn clear_transmit_interrupts(&mut self) -> Result<(), Self::StatusErrorType> {
        self.write_register(
            Register::Status,
            mnemonics::MASK_TX_DS | mnemonics::MASK_MAX_RT,
        )?;
        Ok(())
    }

    fn clear_receive_interrupt(&mut self) -> Result<(), Self::StatusErrorType> {
        self.write_register(Register::Status, mnemonics::MASK_RX_DR)?;
        Ok(())
    }
}
