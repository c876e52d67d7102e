//! This module defines the value types exchanged with the driver.
//! Apart from [`StatusFlags`], none of these types touch the bus themselves.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// The maximum number of bytes the radio's FIFOs hold per payload.
pub const MAX_PAYLOAD_LENGTH: usize = 32;

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl PaLevel {
    /// The value of the 2-bit `RF_PWR` field.
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 1,
            PaLevel::High => 2,
            PaLevel::Max => 3,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & 3 {
            0 => PaLevel::Min,
            1 => PaLevel::Low,
            2 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Min => defmt::write!(fmt, "Min"),
            PaLevel::Low => defmt::write!(fmt, "Low"),
            PaLevel::High => defmt::write!(fmt, "High"),
            PaLevel::Max => defmt::write!(fmt, "Max"),
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Min => write!(f, "Min"),
            PaLevel::Low => write!(f, "Low"),
            PaLevel::High => write!(f, "High"),
            PaLevel::Max => write!(f, "Max"),
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
    /// represents 250 Kbps
    Kbps250,
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// The length of a CRC checksum that is used (if any).
///
/// Cyclical Redundancy Checking (CRC) is commonly used to ensure data integrity.
/// Auto-acknowledgement forces the radio to use at least [`CrcLength::Bit8`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrcLength {
    /// represents no CRC checksum is used
    Disabled,
    /// represents CRC 8 bit checksum is used
    Bit8,
    /// represents CRC 16 bit checksum is used
    Bit16,
}

#[cfg(feature = "defmt")]
impl defmt::Format for CrcLength {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CrcLength::Disabled => defmt::write!(fmt, "disabled"),
            CrcLength::Bit8 => defmt::write!(fmt, "8 bit"),
            CrcLength::Bit16 => defmt::write!(fmt, "16 bit"),
        }
    }
}

impl Display for CrcLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcLength::Disabled => write!(f, "disabled"),
            CrcLength::Bit8 => write!(f, "8 bit"),
            CrcLength::Bit16 => write!(f, "16 bit"),
        }
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The STATUS byte that the radio clocks out first in every SPI frame.
///
/// The driver keeps the most recent one; see
/// [`EsbStatus::status()`](fn@crate::radio::prelude::EsbStatus::status).
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if the auto-retry limit was reached without an ACK.
    #[bits(1, access = RO)]
    pub max_rt: bool,

    /// The pipe number of the payload at the top of the RX FIFO.
    ///
    /// Values 6 and 7 mean the RX FIFO is empty (or unused).
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// A flag to describe if the TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.rx_pipe()
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// The decoded pipe of the next available payload, if any.
    pub fn pipe(&self) -> Option<Pipe> {
        Pipe::try_from(self.rx_pipe()).ok()
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.rx_pipe()
        )
    }
}

/// The outcome of the last transmission, as reported by the radio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxStatus {
    /// The payload was sent (and acknowledged if auto-ack is enabled).
    Complete,
    /// The auto-retry limit was reached without receiving an ACK.
    Timeout,
    /// Neither outcome has been flagged yet.
    Inactive,
}

impl From<StatusFlags> for TxStatus {
    /// [`TxStatus::Complete`] wins if both TX flags are set.
    fn from(flags: StatusFlags) -> Self {
        if flags.tx_ds() {
            TxStatus::Complete
        } else if flags.max_rt() {
            TxStatus::Timeout
        } else {
            TxStatus::Inactive
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TxStatus {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TxStatus::Complete => defmt::write!(fmt, "complete"),
            TxStatus::Timeout => defmt::write!(fmt, "timeout"),
            TxStatus::Inactive => defmt::write!(fmt, "inactive"),
        }
    }
}

impl Display for TxStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TxStatus::Complete => write!(f, "complete"),
            TxStatus::Timeout => write!(f, "timeout"),
            TxStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// One of the six RX data pipes.
///
/// Register lookups for a pipe are implemented next to
/// [`Register`](enum@crate::radio::rf24::Register).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Pipe {
    P0 = 0,
    P1 = 1,
    P2 = 2,
    P3 = 3,
    P4 = 4,
    P5 = 5,
}

impl Pipe {
    /// All pipes in ascending order.
    pub const ALL: [Pipe; 6] = [Pipe::P0, Pipe::P1, Pipe::P2, Pipe::P3, Pipe::P4, Pipe::P5];

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// This pipe's bit in the EN_AA, EN_RXADDR and DYNPD registers.
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

impl TryFrom<u8> for Pipe {
    type Error = u8;

    /// Fails with the given value if it is not in range [0, 5].
    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Pipe::P0),
            1 => Ok(Pipe::P1),
            2 => Ok(Pipe::P2),
            3 => Ok(Pipe::P3),
            4 => Ok(Pipe::P4),
            5 => Ok(Pipe::P5),
            _ => Err(value),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Pipe {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "pipe {}", self.index())
    }
}

impl Display for Pipe {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "pipe {}", self.index())
    }
}

/// A 5 byte radio address.
///
/// The bytes are kept in the order they are written to the radio
/// (least significant byte first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address([u8; 5]);

impl Address {
    /// The only address length this driver configures.
    pub const LENGTH: usize = 5;

    pub const fn new(raw: [u8; Address::LENGTH]) -> Self {
        Self(raw)
    }

    pub const fn raw_value(&self) -> &[u8; Address::LENGTH] {
        &self.0
    }
}

impl From<[u8; Address::LENGTH]> for Address {
    fn from(raw: [u8; Address::LENGTH]) -> Self {
        Self(raw)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = InvalidAddressLength;

    fn try_from(raw: &[u8]) -> core::result::Result<Self, Self::Error> {
        let raw: [u8; Address::LENGTH] = raw
            .try_into()
            .map_err(|_| InvalidAddressLength(raw.len()))?;
        Ok(Self(raw))
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Address {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=[u8]:#x}", self.0[..])
    }
}

/// Returned when building an [`Address`] from a slice that is not 5 bytes long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidAddressLength(pub usize);

#[cfg(feature = "defmt")]
impl defmt::Format for InvalidAddressLength {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "address must be 5 bytes, got {}", self.0)
    }
}

impl Display for InvalidAddressLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "address must be 5 bytes, got {}", self.0)
    }
}

/// A payload taken from the RX FIFO along with the pipe it arrived on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message {
    pipe: Pipe,
    len: u8,
    buf: [u8; MAX_PAYLOAD_LENGTH],
}

impl Message {
    /// `payload` is truncated to [`MAX_PAYLOAD_LENGTH`] bytes.
    pub(crate) fn new(pipe: Pipe, payload: &[u8]) -> Self {
        let len = payload.len().min(MAX_PAYLOAD_LENGTH);
        let mut buf = [0u8; MAX_PAYLOAD_LENGTH];
        buf[..len].copy_from_slice(&payload[..len]);
        Self {
            pipe,
            len: len as u8,
            buf,
        }
    }

    pub fn pipe(&self) -> Pipe {
        self.pipe
    }

    pub fn payload(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Message {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Message from pipe {}: {=[u8]:#x}",
            self.pipe.index(),
            self.payload()
        )
    }
}

#[cfg(test)]
mod test {
    use super::{
        Address, CrcLength, DataRate, FifoState, InvalidAddressLength, Message, PaLevel, Pipe,
        StatusFlags, TxStatus,
    };
    extern crate std;
    use std::{format, string::String};

    fn display_crc(param: CrcLength, expected: String) -> bool {
        format!("{param}") == expected
    }

    #[test]
    fn crc_16bit() {
        assert!(display_crc(CrcLength::Bit16, String::from("16 bit")));
    }

    #[test]
    fn crc_disable() {
        assert!(display_crc(CrcLength::Disabled, String::from("disabled")));
    }

    #[test]
    fn fifo_state_occupied() {
        assert_eq!(format!("{}", FifoState::Occupied), "Occupied");
    }

    #[test]
    fn data_rate_250kbps() {
        assert_eq!(format!("{}", DataRate::Kbps250), "250 Kbps");
    }

    #[test]
    fn pa_level_bits() {
        for level in [PaLevel::Min, PaLevel::Low, PaLevel::High, PaLevel::Max] {
            assert_eq!(PaLevel::from_bits(level.into_bits()), level);
        }
        assert_eq!(format!("{}", PaLevel::High), "High");
    }

    #[test]
    fn address_from_five_bytes() {
        let raw = [0x31u8, 0x14, 0x15, 0x26, 0x53];
        let address = Address::try_from(&raw[..]).unwrap();
        assert_eq!(address.raw_value(), &raw);
        assert_eq!(address, Address::new(raw));
        assert_eq!(address.as_ref(), &raw[..]);
    }

    #[test]
    fn address_rejects_other_lengths() {
        let raw = [0xE7u8; 6];
        for len in [0usize, 1, 4, 6] {
            assert_eq!(
                Address::try_from(&raw[..len]),
                Err(InvalidAddressLength(len))
            );
        }
        assert_eq!(
            format!("{}", InvalidAddressLength(4)),
            "address must be 5 bytes, got 4"
        );
    }

    #[test]
    fn pipe_from_number() {
        for (i, pipe) in Pipe::ALL.iter().enumerate() {
            assert_eq!(Pipe::try_from(i as u8), Ok(*pipe));
            assert_eq!(pipe.mask(), 1 << i);
        }
        assert_eq!(Pipe::try_from(6u8), Err(6));
        assert_eq!(Pipe::try_from(7u8), Err(7));
    }

    #[test]
    fn status_flags_fields() {
        // RX_DR set, payload waiting on pipe 3, TX FIFO full
        let flags = StatusFlags::from_bits(0x40 | (3 << 1) | 1);
        assert!(flags.rx_dr());
        assert!(!flags.tx_ds());
        assert!(!flags.max_rt());
        assert_eq!(flags.rx_pipe(), 3);
        assert_eq!(flags.pipe(), Some(Pipe::P3));
        assert!(flags.tx_full());
        // RX FIFO empty
        assert_eq!(StatusFlags::from_bits(0x0E).pipe(), None);
    }

    #[test]
    fn display_flags() {
        assert_eq!(
            format!("{}", StatusFlags::from_bits(0x0E)),
            String::from("StatusFlags rx_dr: false, tx_ds: false, max_rt: false, rx_pipe: 7")
        );
    }

    #[test]
    fn tx_status_priority() {
        assert_eq!(TxStatus::from(StatusFlags::from_bits(0x0E)), TxStatus::Inactive);
        assert_eq!(TxStatus::from(StatusFlags::from_bits(0x1E)), TxStatus::Timeout);
        assert_eq!(TxStatus::from(StatusFlags::from_bits(0x2E)), TxStatus::Complete);
        // both flags asserted: complete takes precedence
        assert_eq!(TxStatus::from(StatusFlags::from_bits(0x3E)), TxStatus::Complete);
        assert_eq!(format!("{}", TxStatus::Timeout), "timeout");
    }

    #[test]
    fn message_payload() {
        let message = Message::new(Pipe::P2, &[1, 2, 3]);
        assert_eq!(message.pipe(), Pipe::P2);
        assert_eq!(message.payload(), &[1, 2, 3]);
        assert_eq!(message.len(), 3);
        assert!(!message.is_empty());
        assert!(Message::new(Pipe::P0, &[]).is_empty());
    }
}
