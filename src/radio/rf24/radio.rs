use super::{bit_fields::ObserveTx, Command, Nrf24, Nrf24Error, Register};
use crate::{
    radio::prelude::{EsbFifo, EsbRadio, EsbStatus},
    Address, Message, Pipe, TxStatus, MAX_PAYLOAD_LENGTH,
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

/// The minimum CE pulse (in microseconds) that reliably starts a transmission.
const CE_PULSE_US: u32 = 20;

/// How often [`EsbRadio::await_transmit_status()`] polls the STATUS byte.
const POLL_INTERVAL_US: u32 = 10;

impl<SPI, DO, DI, DELAY> Nrf24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Load `payload` with the given `command` and pulse CE to send it to `address`.
    fn start_transmit(
        &mut self,
        address: &Address,
        payload: &[u8],
        command: Command,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if payload.len() > MAX_PAYLOAD_LENGTH {
            warn!("refusing to transmit {} bytes", payload.len());
            return Err(Nrf24Error::PayloadTooLong(payload.len()));
        }
        self.clear_transmit_interrupts()?;

        // pipe 0 receives the auto-ack packets
        self.write_register_bytes(Register::TxAddr, address.raw_value())?;
        self.write_register_bytes(Register::RxAddrP0, address.raw_value())?;
        self._tx_addr = Some(*address);

        self.send_command_payload(command, payload)?;
        self.enable_rx_pipes(Pipe::P0.mask())?;
        self.set_prim_rx(false)?;

        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._delay_impl.delay_us(CE_PULSE_US);
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        debug!("transmitting {} bytes", payload.len());
        Ok(())
    }
}

impl<SPI, DO, DI, DELAY> EsbRadio for Nrf24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type RadioErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn transmit(&mut self, address: &Address, payload: &[u8]) -> Result<(), Self::RadioErrorType> {
        self.start_transmit(address, payload, Command::WriteTxPayload)
    }

    fn transmit_no_ack(
        &mut self,
        address: &Address,
        payload: &[u8],
    ) -> Result<(), Self::RadioErrorType> {
        self.start_transmit(address, payload, Command::WriteTxPayloadNoAck)
    }

    /// The radio's CE pin is left as is. After [`EsbRadio::transmit()`] it is
    /// inactive, so use [`EsbPipe::listen()`](fn@crate::radio::prelude::EsbPipe::listen)
    /// to resume receiving. After [`EsbRadio::retry_transmit()`] it is still
    /// active and the radio goes back to listening.
    fn transmit_status(&mut self) -> Result<TxStatus, Self::RadioErrorType> {
        let outcome = TxStatus::from(self.update()?);
        self.clear_transmit_interrupts()?;

        if let Some(address) = self._pipe0_rx_addr {
            self.write_register_bytes(Register::RxAddrP0, address.raw_value())?;
        } else {
            self.disable_rx_pipes(Pipe::P0.mask())?;
        }
        self.set_prim_rx(true)?;
        debug!("transmission {}", outcome);
        Ok(outcome)
    }

    fn await_transmit_status(&mut self, timeout_us: u32) -> Result<TxStatus, Self::RadioErrorType> {
        let mut waited = 0u32;
        loop {
            let status = self.update()?;
            if status.tx_ds() || status.max_rt() {
                break;
            }
            if waited >= timeout_us {
                warn!("no transmission outcome after {} us", waited);
                break;
            }
            self._delay_impl.delay_us(POLL_INTERVAL_US);
            waited = waited.saturating_add(POLL_INTERVAL_US);
        }
        self.transmit_status()
    }

    /// Pipe 0 is pointed back at the last transmission's address
    /// (undoing [`EsbRadio::transmit_status()`]) so the ACK can be received.
    fn retry_transmit(&mut self) -> Result<(), Self::RadioErrorType> {
        if let Some(address) = self._tx_addr {
            self.write_register_bytes(Register::RxAddrP0, address.raw_value())?;
            self.enable_rx_pipes(Pipe::P0.mask())?;
        }
        self.set_prim_rx(false)?;
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)
    }

    fn write_ack_payload(&mut self, pipe: Pipe, payload: &[u8]) -> Result<(), Self::RadioErrorType> {
        self.send_command_payload(Command::WriteAckPayload(pipe), payload)?;
        Ok(())
    }

    fn has_received_data(&mut self) -> Result<bool, Self::RadioErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        Ok(self.update()?.rx_dr())
    }

    fn received_message(&mut self) -> Result<Option<Message>, Self::RadioErrorType> {
        if !self.has_received_data()? {
            return Ok(None);
        }
        self.clear_receive_interrupt()?;

        let Some(pipe) = self._status.pipe() else {
            warn!("RX FIFO reported empty (pipe {})", self._status.rx_pipe());
            return Ok(None);
        };

        let len = self.receive_byte(Command::ReadRxPayloadWidth)? as usize;
        if len > MAX_PAYLOAD_LENGTH {
            // the datasheet says to discard a corrupted payload
            warn!("discarding payload with width {}", len);
            self.flush_receive_buffer()?;
            return Ok(None);
        }

        let mut payload = [0u8; MAX_PAYLOAD_LENGTH];
        self.receive_bytes(Command::ReadRxPayload, &mut payload[..len])?;
        Ok(Some(Message::new(pipe, &payload[..len])))
    }

    fn last_retransmit_count(&mut self) -> Result<u8, Self::RadioErrorType> {
        Ok(ObserveTx::from_bits(self.read_register(Register::ObserveTx)?).arc_cnt())
    }

    fn lost_packet_count(&mut self) -> Result<u8, Self::RadioErrorType> {
        Ok(ObserveTx::from_bits(self.read_register(Register::ObserveTx)?).plos_cnt())
    }
}
