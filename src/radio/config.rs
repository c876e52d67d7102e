use crate::radio::rf24::bit_fields::{Config, Feature, RfSetup, SetupRetry};
use crate::radio::rf24::mnemonics;
use crate::{CrcLength, DataRate, PaLevel};

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use nrf24::radio::RadioConfig;
///
/// let config = RadioConfig::default().with_channel(42);
/// assert_eq!(config.channel(), 42);
/// ```
///
/// Dynamic payload lengths are always enabled on all pipes because
/// received messages are sized by the radio's reported payload width.
/// Addresses are always 5 bytes long.
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    pub(crate) rf_setup: RfSetup,
    pub(crate) feature: Feature,
    channel: u8,
    auto_ack: u8,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `2` |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] |
    /// | [`RadioConfig::lna_enable()`] | `true` |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit16`] |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps2`] |
    /// | [`RadioConfig::auto_ack()`] | `0x3F` (enabled for pipes 0 - 5) |
    /// | [`RadioConfig::ack_payloads()`] | `false` |
    /// | [`RadioConfig::ask_no_ack()`] | `false` |
    /// | [`RadioConfig::auto_retry_delay()`] | `3` (1000 microseconds) |
    /// | [`RadioConfig::auto_retry_count()`] | `4` |
    /// | [`RadioConfig::rx_dr()`] | `true` |
    /// | [`RadioConfig::tx_ds()`] | `true` |
    /// | [`RadioConfig::max_rt()`] | `true` |
    fn default() -> Self {
        Self {
            config_reg: Config::new().with_crc_length(CrcLength::Bit16),
            auto_retries: SetupRetry::new().with_ard(3).with_arc(4),
            rf_setup: RfSetup::new()
                .with_data_rate(DataRate::Mbps2)
                .with_pa_level(PaLevel::Max)
                .with_lna_hcurr(true),
            feature: Feature::new().with_en_dpl(true),
            channel: 2,
            auto_ack: mnemonics::ALL_PIPES,
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        self.config_reg.crc_length()
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    ///
    /// The radio forces 8 bit CRC while auto-ack is enabled on any pipe.
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        Self {
            config_reg: self.config_reg.with_crc_length(length),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.rf_setup.data_rate()
    }

    /// Set the data rate used for over the air transmissions.
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self {
            rf_setup: self.rf_setup.with_data_rate(data_rate),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.rf_setup.pa_level()
    }

    /// Set the power amplifier level.
    pub fn with_pa_level(self, level: PaLevel) -> Self {
        Self {
            rf_setup: self.rf_setup.with_pa_level(level),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_lna_enable()`].
    pub const fn lna_enable(&self) -> bool {
        self.rf_setup.lna_hcurr()
    }

    /// Enable or disable the LNA gain of older non-plus variants.
    ///
    /// This has no effect on nRF24L01+ modules.
    pub fn with_lna_enable(self, enable: bool) -> Self {
        Self {
            rf_setup: self.rf_setup.with_lna_hcurr(enable),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// The channel (or frequency) used for transmissions.
    ///
    /// The actual frequency is `2400 + channel` MHz.
    /// The `channel` is clamped to the range [0, 125].
    pub fn with_channel(self, channel: u8) -> Self {
        Self {
            channel: channel.min(125),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// Enable or disable auto-ack per pipe (bit `n` is pipe `n`).
    ///
    /// Bits above pipe 5 are ignored.
    pub fn with_auto_ack(self, pipes: u8) -> Self {
        Self {
            auto_ack: pipes & mnemonics::ALL_PIPES,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_ack_payloads()`].
    pub const fn ack_payloads(&self) -> bool {
        self.feature.en_ack_pay()
    }

    /// Allow payloads to be attached to ACK packets.
    ///
    /// Required before using
    /// [`EsbRadio::write_ack_payload()`](fn@crate::radio::prelude::EsbRadio::write_ack_payload).
    pub fn with_ack_payloads(self, enable: bool) -> Self {
        Self {
            feature: self.feature.with_en_ack_pay(enable),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_ask_no_ack()`].
    pub const fn ask_no_ack(&self) -> bool {
        self.feature.en_dyn_ack()
    }

    /// Allow transmissions that do not ask for an ACK.
    ///
    /// Required before using
    /// [`EsbRadio::transmit_no_ack()`](fn@crate::radio::prelude::EsbRadio::transmit_no_ack).
    pub fn with_ask_no_ack(self, enable: bool) -> Self {
        Self {
            feature: self.feature.with_en_dyn_ack(enable),
            ..self
        }
    }

    /// Returns the auto-retry delay set by [`RadioConfig::with_auto_retries()`].
    pub const fn auto_retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    /// Returns the auto-retry count set by [`RadioConfig::with_auto_retries()`].
    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// Set the auto-retry feature's `delay` and `count`.
    ///
    /// The `delay` is in steps of 250 microseconds: `(delay + 1) * 250` us.
    /// Both values are clamped to the range [0, 15].
    pub fn with_auto_retries(self, delay: u8, count: u8) -> Self {
        Self {
            auto_retries: SetupRetry::new()
                .with_ard(delay.min(15))
                .with_arc(count.min(15)),
            ..self
        }
    }

    /// Is the "RX Data Ready" event reflected on the IRQ pin?
    pub const fn rx_dr(&self) -> bool {
        !self.config_reg.mask_rx_dr()
    }

    /// Reflect the "RX Data Ready" event on the IRQ pin.
    pub fn with_rx_dr(self, enable: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_mask_rx_dr(!enable),
            ..self
        }
    }

    /// Is the "TX Data Sent" event reflected on the IRQ pin?
    pub const fn tx_ds(&self) -> bool {
        !self.config_reg.mask_tx_ds()
    }

    /// Reflect the "TX Data Sent" event on the IRQ pin.
    pub fn with_tx_ds(self, enable: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_mask_tx_ds(!enable),
            ..self
        }
    }

    /// Is the "max retries" event reflected on the IRQ pin?
    pub const fn max_rt(&self) -> bool {
        !self.config_reg.mask_max_rt()
    }

    /// Reflect the "max retries" event on the IRQ pin.
    pub fn with_max_rt(self, enable: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_mask_max_rt(!enable),
            ..self
        }
    }
}
