use super::{bit_fields::Config, Nrf24, Nrf24Error, Register};
use crate::radio::prelude::EsbPower;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

impl<SPI, DO, DI, DELAY> EsbPower for Nrf24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// In full power down mode (a sleep state), the radio will consume approximately
    /// 900nA (.0009mA). All registers keep their values, except CONFIG which is
    /// reset.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?; // Guarantee CE is low on power down
        self.write_register(Register::Config, Config::new().with_en_crc(true).into_bits())?;
        debug!("radio powered down");
        Ok(())
    }

    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType> {
        let config = Config::from_bits(self.read_register(Register::Config)?);
        if config.pwr_up() {
            return Ok(());
        }
        self.write_register(Register::Config, config.with_pwr_up(true).into_bits())?;

        // For nRF24L01+ to go from power down mode to TX or RX mode it must first pass through stand-by mode.
        // There must be a delay of Tpd2stby (see Table 16.) after the nRF24L01+ leaves power down mode before
        // the CE is set high. - Tpd2stby can be up to 5ms per the 1.0 datasheet
        match delay {
            Some(0) => {}
            Some(us) => self._delay_impl.delay_us(us),
            None => self._delay_impl.delay_us(5000),
        }
        Ok(())
    }

    fn is_powered(&mut self) -> Result<bool, Self::PowerErrorType> {
        Ok(Config::from_bits(self.read_register(Register::Config)?).pwr_up())
    }
}
