use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{bit_fields::Config, mnemonics, Command, Nrf24, Nrf24Error, Register};
use crate::radio::{
    prelude::{EsbFifo, EsbInit, EsbStatus},
    RadioConfig,
};

/// The width code SETUP_AW holds for 5 byte addresses.
const ADDRESS_WIDTH_5: u8 = 3;

impl<SPI, DO, DI, DELAY> EsbInit for Nrf24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type ConfigErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        self.with_config(&RadioConfig::default())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;

        self.flush_receive_buffer()?;
        self.flush_transmit_buffer()?;
        self.clear_interrupts()?;
        // older non-plus variants need this to accept R_RX_PL_WID, W_ACK_PAYLOAD
        // and W_TX_PAYLOAD_NOACK. Plus variants ignore it.
        self.send_command_value(Command::Activate, mnemonics::ACTIVATE_KEY)?;

        let config_reg = config.config_reg.with_pwr_up(true).with_prim_rx(true);
        self.write_register(Register::Config, config_reg.into_bits())?;
        // Tpd2stby can be up to 5ms per the datasheet
        self._delay_impl.delay_us(5000);

        // if CONFIG doesn't read back what was written, the SPI lines are miswired
        // (or nothing is connected).
        let read_back = Config::from_bits(self.read_register(Register::Config)?);
        if read_back != config_reg {
            warn!(
                "CONFIG read back {:#x}, expected {:#x}",
                read_back.into_bits(),
                config_reg.into_bits()
            );
            return Err(Nrf24Error::BinaryCorruption);
        }

        self.write_register(Register::RfCh, config.channel())?;
        self.write_register(Register::SetupAw, ADDRESS_WIDTH_5)?;
        self.write_register(Register::SetupRetr, config.auto_retries.into_bits())?;
        self.write_register(Register::RfSetup, config.rf_setup.into_bits())?;
        self.write_register(Register::EnAa, config.auto_ack())?;
        self.write_register(Register::Dynpd, mnemonics::ALL_PIPES)?;
        self.write_register(Register::Feature, config.feature.into_bits())?;
        self.write_register(Register::EnRxAddr, 0)?;
        self._pipe0_rx_addr = None;
        self._tx_addr = None;
        debug!("radio initialized on channel {}", config.channel());
        Ok(())
    }
}
