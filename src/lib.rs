#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`Nrf24::new()`](fn@crate::radio::Nrf24::new)
//! - [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init)
//! - [`EsbPipe::listen()`](fn@crate::radio::prelude::EsbPipe::listen)
//! - [`EsbPipe::close_pipe()`](fn@crate::radio::prelude::EsbPipe::close_pipe)
//! - [`EsbRadio::has_received_data()`](fn@crate::radio::prelude::EsbRadio::has_received_data)
//! - [`EsbRadio::received_message()`](fn@crate::radio::prelude::EsbRadio::received_message)
//! - [`EsbRadio::transmit()`](fn@crate::radio::prelude::EsbRadio::transmit)
//! - [`EsbRadio::transmit_status()`](fn@crate::radio::prelude::EsbRadio::transmit_status)
//! - [`EsbRadio::await_transmit_status()`](fn@crate::radio::prelude::EsbRadio::await_transmit_status)
//! - [`EsbRadio::retry_transmit()`](fn@crate::radio::prelude::EsbRadio::retry_transmit)
//! - [`EsbFifo::flush_transmit_buffer()`](fn@crate::radio::prelude::EsbFifo::flush_transmit_buffer)
//! - [`Nrf24::session()`](fn@crate::radio::Nrf24::session)
//!
//! ## Advanced API
//!
//! - [`EsbRadio::transmit_no_ack()`](fn@crate::radio::prelude::EsbRadio::transmit_no_ack)
//! - [`EsbRadio::write_ack_payload()`](fn@crate::radio::prelude::EsbRadio::write_ack_payload)
//! - [`EsbStatus::status()`](fn@crate::radio::prelude::EsbStatus::status)
//! - [`EsbStatus::update()`](fn@crate::radio::prelude::EsbStatus::update)
//! - [`EsbStatus::clear_interrupts()`](fn@crate::radio::prelude::EsbStatus::clear_interrupts)
//! - [`EsbFifo::fifo_state()`](fn@crate::radio::prelude::EsbFifo::fifo_state)
//! - [`EsbFifo::flush_receive_buffer()`](fn@crate::radio::prelude::EsbFifo::flush_receive_buffer)
//! - [`EsbRadio::last_retransmit_count()`](fn@crate::radio::prelude::EsbRadio::last_retransmit_count)
//! - [`EsbRadio::lost_packet_count()`](fn@crate::radio::prelude::EsbRadio::lost_packet_count)
//! - [`Nrf24::received_power_detected()`](fn@crate::radio::Nrf24::received_power_detected)
//! - [`Nrf24::is_irq_asserted()`](fn@crate::radio::Nrf24::is_irq_asserted)
//!
//! ## Low level API
//!
//! - [`Nrf24::send_command()`](fn@crate::radio::Nrf24::send_command)
//! - [`Nrf24::send_command_value()`](fn@crate::radio::Nrf24::send_command_value)
//! - [`Nrf24::send_command_payload()`](fn@crate::radio::Nrf24::send_command_payload)
//! - [`Nrf24::receive_byte()`](fn@crate::radio::Nrf24::receive_byte)
//! - [`Nrf24::receive_bytes()`](fn@crate::radio::Nrf24::receive_bytes)
//! - [`Nrf24::read_register()`](fn@crate::radio::Nrf24::read_register)
//! - [`Nrf24::read_register_into()`](fn@crate::radio::Nrf24::read_register_into)
//! - [`Nrf24::write_register()`](fn@crate::radio::Nrf24::write_register)
//! - [`Nrf24::write_register_bytes()`](fn@crate::radio::Nrf24::write_register_bytes)
//!
//! ## Configuration API
//!
//! - [`EsbInit::with_config()`](fn@crate::radio::prelude::EsbInit::with_config)
//! - [`RadioConfig`](struct@crate::radio::RadioConfig)
//! - [`EsbChannel::set_channel()`](fn@crate::radio::prelude::EsbChannel::set_channel)
//! - [`EsbChannel::channel()`](fn@crate::radio::prelude::EsbChannel::channel)
//! - [`EsbPower::power_up()`](fn@crate::radio::prelude::EsbPower::power_up)
//! - [`EsbPower::power_down()`](fn@crate::radio::prelude::EsbPower::power_down)
//! - [`EsbPower::is_powered()`](fn@crate::radio::prelude::EsbPower::is_powered)
//!
#![no_std]

#[macro_use]
mod fmt;

mod types;
pub use types::{
    Address, CrcLength, DataRate, FifoState, InvalidAddressLength, Message, PaLevel, Pipe,
    StatusFlags, TxStatus, MAX_PAYLOAD_LENGTH,
};
pub mod radio;
