//! This module defines the traits that group the radio's operations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use nrf24::radio::prelude::*;
//! ```

use crate::types::{Address, FifoState, Message, Pipe, StatusFlags, TxStatus};

use super::RadioConfig;

/// A trait to represent manipulation of data pipes
/// for an ESB capable transceiver.
pub trait EsbPipe {
    type PipeErrorType;

    /// Listen for payloads sent to `address` on the given `pipe`.
    ///
    /// This writes the pipe's RX address, enables the pipe and
    /// asserts the radio's CE pin. Calling it again for an enabled
    /// pipe only rewrites the address.
    ///
    /// ### About pipe addresses
    /// Pipes 0 and 1 store a full 5-byte address. Pipes 2-5 only store
    /// the first byte of `address`; the other 4 bytes are shared with pipe 1.
    ///
    /// <div class="warning">
    ///
    /// Pipe 0 doubles as the channel for receiving auto-ack packets
    /// during [`EsbRadio::transmit()`]. The address given here for pipe 0
    /// is remembered and restored by [`EsbRadio::transmit_status()`].
    ///
    /// </div>
    fn listen(&mut self, pipe: Pipe, address: &Address) -> Result<(), Self::PipeErrorType>;

    /// Stop receiving on the given `pipe`.
    ///
    /// Closing pipe 0 also forgets the address given to [`EsbPipe::listen()`].
    fn close_pipe(&mut self, pipe: Pipe) -> Result<(), Self::PipeErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the radio's currently selected channel.
    ///
    /// The `channel` is clamped to the range [0, 125].
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the radio's currently selected channel.
    fn channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// A trait to represent manipulation of the radio's status byte
/// and its interrupt flags.
pub trait EsbStatus {
    type StatusErrorType;

    /// The STATUS byte returned by the most recent SPI frame.
    ///
    /// This is `0` until the first SPI frame completes.
    fn status(&self) -> StatusFlags;

    /// Refresh [`EsbStatus::status()`] with a NOP command.
    fn update(&mut self) -> Result<StatusFlags, Self::StatusErrorType>;

    /// Clear the RX_DR, TX_DS and MAX_RT flags.
    fn clear_interrupts(&mut self) -> Result<(), Self::StatusErrorType>;

    /// Clear the TX_DS and MAX_RT flags.
    fn clear_transmit_interrupts(&mut self) -> Result<(), Self::StatusErrorType>;

    /// Clear the RX_DR flag.
    fn clear_receive_interrupt(&mut self) -> Result<(), Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Discard any payloads that have not been transmitted yet.
    fn flush_transmit_buffer(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Discard any received payloads that have not been read yet.
    fn flush_receive_buffer(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the specified FIFO.
    ///
    /// - Pass `true` to `about_tx` parameter to get the state of the TX FIFO.
    /// - Pass `false` to `about_tx` parameter to get the state of the RX FIFO.
    fn fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;
}

/// A trait to represent manipulation of the power state
/// for an ESB capable transceiver.
pub trait EsbPower {
    type PowerErrorType;

    /// Power down the radio and deactivate its CE pin.
    ///
    /// The CONFIG register is written back to its post-reset value
    /// (CRC enabled, everything else cleared).
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power up the radio, then wait `delay` microseconds
    /// (5000 if `None`) for its oscillator to settle.
    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType>;

    /// Is the radio powered up?
    fn is_powered(&mut self) -> Result<bool, Self::PowerErrorType>;
}

/// A trait to represent the radio's initial setup.
pub trait EsbInit {
    type ConfigErrorType;

    /// Initialize the radio with [`RadioConfig::default()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Flush both FIFOs, clear all interrupts, power up in RX mode,
    /// and apply the given `config`.
    ///
    /// No pipes are listening afterwards.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent sending and receiving payloads
/// with an ESB capable transceiver.
pub trait EsbRadio {
    type RadioErrorType;

    /// Start transmitting `payload` to `address`.
    ///
    /// Payloads longer than 32 bytes are rejected before any SPI traffic.
    ///
    /// This leaves the radio in TX mode with pipe 0's RX address set to
    /// `address` (so auto-ack packets are received). Call
    /// [`EsbRadio::transmit_status()`] exactly once afterward to get the
    /// outcome and return to RX mode.
    fn transmit(&mut self, address: &Address, payload: &[u8])
        -> Result<(), Self::RadioErrorType>;

    /// Like [`EsbRadio::transmit()`] but the receiver will not send an ACK.
    ///
    /// This requires [`RadioConfig::with_ask_no_ack()`]. The outcome is
    /// always [`TxStatus::Complete`] once the payload is sent.
    fn transmit_no_ack(
        &mut self,
        address: &Address,
        payload: &[u8],
    ) -> Result<(), Self::RadioErrorType>;

    /// Get the outcome of the last transmission, then clear the TX
    /// interrupt flags and return the radio to RX mode.
    ///
    /// Pipe 0 is closed again unless an address was given to it with
    /// [`EsbPipe::listen()`], in which case that address is restored.
    fn transmit_status(&mut self) -> Result<TxStatus, Self::RadioErrorType>;

    /// Poll the radio until the last transmission finished or failed, or until
    /// `timeout_us` microseconds passed. Then behave like
    /// [`EsbRadio::transmit_status()`].
    fn await_transmit_status(&mut self, timeout_us: u32)
        -> Result<TxStatus, Self::RadioErrorType>;

    /// Retry the payload left in the TX FIFO after a [`TxStatus::Timeout`].
    ///
    /// This enters TX mode and leaves the radio's CE pin active.
    fn retry_transmit(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Queue a payload to attach to the next ACK packet sent from `pipe`.
    ///
    /// This requires [`RadioConfig::with_ack_payloads()`].
    fn write_ack_payload(&mut self, pipe: Pipe, payload: &[u8])
        -> Result<(), Self::RadioErrorType>;

    /// Is there a received payload waiting?
    ///
    /// This deactivates the radio's CE pin so the RX FIFO can be drained.
    /// Use [`EsbPipe::listen()`] to resume receiving.
    fn has_received_data(&mut self) -> Result<bool, Self::RadioErrorType>;

    /// Take the next received payload from the RX FIFO.
    ///
    /// Returns `None` if nothing was received.
    fn received_message(&mut self) -> Result<Option<Message>, Self::RadioErrorType>;

    /// Get the auto-retry count of the last transmission.
    fn last_retransmit_count(&mut self) -> Result<u8, Self::RadioErrorType>;

    /// Get the number of packets lost since the channel was last set.
    ///
    /// This count saturates at 15.
    fn lost_packet_count(&mut self) -> Result<u8, Self::RadioErrorType>;
}
