use crate::types::Pipe;

/// The register map of the nRF24L01.
///
/// Every address fits in the lower 5 bits so it can be OR'd into the
/// R_REGISTER and W_REGISTER opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    Config = 0x00,
    EnAa = 0x01,
    EnRxAddr = 0x02,
    SetupAw = 0x03,
    SetupRetr = 0x04,
    RfCh = 0x05,
    RfSetup = 0x06,
    Status = 0x07,
    ObserveTx = 0x08,
    Rpd = 0x09,
    RxAddrP0 = 0x0A,
    RxAddrP1 = 0x0B,
    RxAddrP2 = 0x0C,
    RxAddrP3 = 0x0D,
    RxAddrP4 = 0x0E,
    RxAddrP5 = 0x0F,
    TxAddr = 0x10,
    RxPwP0 = 0x11,
    RxPwP1 = 0x12,
    RxPwP2 = 0x13,
    RxPwP3 = 0x14,
    RxPwP4 = 0x15,
    RxPwP5 = 0x16,
    FifoStatus = 0x17,
    Dynpd = 0x1C,
    Feature = 0x1D,
}

impl Register {
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// The number of bytes this register holds.
    ///
    /// RX_ADDR_P2 through RX_ADDR_P5 only store their least significant byte;
    /// the other bytes are shared with RX_ADDR_P1.
    pub const fn width(self) -> usize {
        match self {
            Register::RxAddrP0 | Register::RxAddrP1 | Register::TxAddr => 5,
            _ => 1,
        }
    }
}

impl Pipe {
    /// The RX_ADDR_Px register that holds this pipe's address.
    pub const fn rx_address_register(self) -> Register {
        match self {
            Pipe::P0 => Register::RxAddrP0,
            Pipe::P1 => Register::RxAddrP1,
            Pipe::P2 => Register::RxAddrP2,
            Pipe::P3 => Register::RxAddrP3,
            Pipe::P4 => Register::RxAddrP4,
            Pipe::P5 => Register::RxAddrP5,
        }
    }

    /// The RX_PW_Px register that holds this pipe's static payload length.
    pub const fn rx_payload_width_register(self) -> Register {
        match self {
            Pipe::P0 => Register::RxPwP0,
            Pipe::P1 => Register::RxPwP1,
            Pipe::P2 => Register::RxPwP2,
            Pipe::P3 => Register::RxPwP3,
            Pipe::P4 => Register::RxPwP4,
            Pipe::P5 => Register::RxPwP5,
        }
    }
}

/// SPI commands understood by the nRF24L01.
///
/// Register access commands carry the register they address,
/// so a register opcode can never be sent without one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `000A AAAA`, followed by 1 to 5 data bytes read back.
    ReadRegister(Register),
    /// `001A AAAA`, followed by 1 to 5 data bytes.
    WriteRegister(Register),
    /// Followed by 1 to 32 bytes read back.
    ReadRxPayload,
    /// Followed by 1 to 32 bytes.
    WriteTxPayload,
    FlushTx,
    FlushRx,
    ReuseTxPayload,
    /// Followed by [`mnemonics::ACTIVATE_KEY`]. Only needed by non-plus variants.
    Activate,
    /// Followed by 1 byte read back.
    ReadRxPayloadWidth,
    /// Followed by 1 to 32 bytes.
    WriteAckPayload(Pipe),
    /// Followed by 1 to 32 bytes.
    WriteTxPayloadNoAck,
    /// Used to read the STATUS byte.
    Nop,
}

impl Command {
    pub const fn opcode(self) -> u8 {
        match self {
            Command::ReadRegister(register) => register.address(),
            Command::WriteRegister(register) => mnemonics::W_REGISTER | register.address(),
            Command::ReadRxPayload => 0x61,
            Command::WriteTxPayload => 0xA0,
            Command::FlushTx => 0xE1,
            Command::FlushRx => 0xE2,
            Command::ReuseTxPayload => 0xE3,
            Command::Activate => 0x50,
            Command::ReadRxPayloadWidth => 0x60,
            Command::WriteAckPayload(pipe) => 0xA8 | pipe.index(),
            Command::WriteTxPayloadNoAck => 0xB0,
            Command::Nop => 0xFF,
        }
    }
}

/// Raw bit masks that are used directly on the wire.
///
/// Register fields with named accessors live in
/// the `bit_fields` module instead.
pub mod mnemonics {
    pub const W_REGISTER: u8 = 0x20;
    pub const ACTIVATE_KEY: u8 = 0x73;
    pub const MASK_RX_DR: u8 = 1 << 6;
    pub const MASK_TX_DS: u8 = 1 << 5;
    pub const MASK_MAX_RT: u8 = 1 << 4;
    /// All pipes (as in EN_AA, EN_RXADDR, DYNPD).
    pub const ALL_PIPES: u8 = 0x3F;
}

#[cfg(test)]
mod test {
    use super::{mnemonics, Command, Register};
    use crate::types::Pipe;

    #[test]
    fn register_opcodes() {
        assert_eq!(Command::ReadRegister(Register::Config).opcode(), 0x00);
        assert_eq!(Command::ReadRegister(Register::Feature).opcode(), 0x1D);
        assert_eq!(Command::WriteRegister(Register::Config).opcode(), 0x20);
        assert_eq!(Command::WriteRegister(Register::EnRxAddr).opcode(), 0x22);
        assert_eq!(Command::WriteRegister(Register::TxAddr).opcode(), 0x30);
        assert_eq!(Command::WriteRegister(Register::Feature).opcode(), 0x3D);
        assert_eq!(mnemonics::W_REGISTER | Register::Status.address(), 0x27);
    }

    #[test]
    fn payload_opcodes() {
        let expected = [
            (Command::ReadRxPayload, 0x61u8),
            (Command::WriteTxPayload, 0xA0),
            (Command::FlushTx, 0xE1),
            (Command::FlushRx, 0xE2),
            (Command::ReuseTxPayload, 0xE3),
            (Command::Activate, 0x50),
            (Command::ReadRxPayloadWidth, 0x60),
            (Command::WriteTxPayloadNoAck, 0xB0),
            (Command::Nop, 0xFF),
        ];
        for (command, opcode) in expected {
            assert_eq!(command.opcode(), opcode);
        }
        for pipe in Pipe::ALL {
            assert_eq!(Command::WriteAckPayload(pipe).opcode(), 0xA8 + pipe.index());
        }
    }

    #[test]
    fn pipe_registers() {
        for pipe in Pipe::ALL {
            assert_eq!(pipe.rx_address_register().address(), 0x0A + pipe.index());
            assert_eq!(
                pipe.rx_payload_width_register().address(),
                0x11 + pipe.index()
            );
        }
    }

    #[test]
    fn register_widths() {
        assert_eq!(Register::RxAddrP0.width(), 5);
        assert_eq!(Register::RxAddrP1.width(), 5);
        assert_eq!(Register::TxAddr.width(), 5);
        assert_eq!(Register::RxAddrP2.width(), 1);
        assert_eq!(Register::Config.width(), 1);
    }
}
