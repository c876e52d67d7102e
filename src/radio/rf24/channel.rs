use super::{Nrf24, Nrf24Error, Register};
use crate::radio::prelude::EsbChannel;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

/// The highest channel the radio supports (2525 MHz).
const MAX_CHANNEL: u8 = 125;

impl<SPI, DO, DI, DELAY> EsbChannel for Nrf24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type ChannelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Writing RF_CH also resets the lost packet count.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        self.write_register(Register::RfCh, channel.min(MAX_CHANNEL))?;
        Ok(())
    }

    fn channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        self.read_register(Register::RfCh)
    }
}
