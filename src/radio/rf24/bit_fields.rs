//! Named fields of the registers the driver reads or composes.
//!
//! The STATUS register is modeled by the public [`StatusFlags`](crate::StatusFlags).
use bitfield_struct::bitfield;

use crate::{CrcLength, DataRate, PaLevel};

#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    /// Hide the "RX Data Ready" event from the IRQ pin.
    pub mask_rx_dr: bool,

    /// Hide the "TX Data Sent" event from the IRQ pin.
    pub mask_tx_ds: bool,

    /// Hide the "max retries" event from the IRQ pin.
    pub mask_max_rt: bool,

    pub en_crc: bool,

    /// 2 byte CRC when set.
    pub crco: bool,

    pub pwr_up: bool,

    /// RX mode when set, TX mode when clear.
    pub prim_rx: bool,
}

impl Config {
    pub const fn crc_length(&self) -> CrcLength {
        match (self.en_crc(), self.crco()) {
            (false, _) => CrcLength::Disabled,
            (true, false) => CrcLength::Bit8,
            (true, true) => CrcLength::Bit16,
        }
    }

    pub const fn with_crc_length(self, length: CrcLength) -> Self {
        match length {
            CrcLength::Disabled => self.with_en_crc(false).with_crco(false),
            CrcLength::Bit8 => self.with_en_crc(true).with_crco(false),
            CrcLength::Bit16 => self.with_en_crc(true).with_crco(true),
        }
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry delay, in steps of 250 microseconds (0 means 250 us).
    #[bits(4)]
    pub ard: u8,

    /// The auto-retry count.
    #[bits(4)]
    pub arc: u8,
}

#[bitfield(u8, order = Msb)]
pub(crate) struct RfSetup {
    pub cont_wave: bool,

    #[bits(1)]
    _padding: u8,

    pub rf_dr_low: bool,

    pub pll_lock: bool,

    pub rf_dr_high: bool,

    #[bits(2)]
    pub rf_pwr: u8,

    /// LNA gain on older non-plus variants. Ignored by nRF24L01+ chips.
    pub lna_hcurr: bool,
}

impl RfSetup {
    pub const fn data_rate(&self) -> DataRate {
        match (self.rf_dr_low(), self.rf_dr_high()) {
            (true, _) => DataRate::Kbps250,
            (false, true) => DataRate::Mbps2,
            (false, false) => DataRate::Mbps1,
        }
    }

    pub const fn with_data_rate(self, data_rate: DataRate) -> Self {
        match data_rate {
            DataRate::Mbps1 => self.with_rf_dr_low(false).with_rf_dr_high(false),
            DataRate::Mbps2 => self.with_rf_dr_low(false).with_rf_dr_high(true),
            DataRate::Kbps250 => self.with_rf_dr_low(true).with_rf_dr_high(false),
        }
    }

    pub const fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.rf_pwr())
    }

    pub const fn with_pa_level(self, level: PaLevel) -> Self {
        self.with_rf_pwr(level.into_bits())
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct ObserveTx {
    /// Lost packets since the last RF_CH write. Saturates at 15.
    #[bits(4)]
    pub plos_cnt: u8,

    /// Retransmissions of the current (or last) payload.
    #[bits(4)]
    pub arc_cnt: u8,
}

#[bitfield(u8, order = Msb)]
pub(crate) struct FifoStatus {
    #[bits(1)]
    _padding: u8,

    pub tx_reuse: bool,

    pub tx_full: bool,

    pub tx_empty: bool,

    #[bits(2)]
    _reserved: u8,

    pub rx_full: bool,

    pub rx_empty: bool,
}

#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct Feature {
    #[bits(5)]
    _padding: u8,

    /// Dynamic payload lengths.
    pub en_dpl: bool,

    /// Payloads attached to ACK packets.
    pub en_ack_pay: bool,

    /// Allows W_TX_PAYLOAD_NOACK.
    pub en_dyn_ack: bool,
}
