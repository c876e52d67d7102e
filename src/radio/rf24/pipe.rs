use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{Nrf24, Nrf24Error};
use crate::{radio::prelude::EsbPipe, Address, Pipe};

impl<SPI, DO, DI, DELAY> EsbPipe for Nrf24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type PipeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn listen(&mut self, pipe: Pipe, address: &Address) -> Result<(), Self::PipeErrorType> {
        let register = pipe.rx_address_register();
        let width = register.width();
        if width > 1 {
            self.write_register_bytes(register, &address.raw_value()[..width])?;
        } else {
            // For pipes 2-5, only write the LSB
            self.write_register(register, address.raw_value()[0])?;
        }

        // transmit() overwrites the pipe 0 address, so
        // transmit_status() will have to restore it.
        if pipe == Pipe::P0 {
            self._pipe0_rx_addr = Some(*address);
        }

        self.enable_rx_pipes(pipe.mask())?;
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        debug!("listening on {}", pipe);
        Ok(())
    }

    fn close_pipe(&mut self, pipe: Pipe) -> Result<(), Self::PipeErrorType> {
        self.disable_rx_pipes(pipe.mask())?;
        if pipe == Pipe::P0 {
            self._pipe0_rx_addr = None;
        }
        Ok(())
    }
}
