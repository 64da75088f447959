//! Status registers and the chip status byte
//!
//! Status registers are read-only and are always read with single-read
//! framing. Their addresses carry the burst bit (0xF0-0xFD) to tell them
//! apart from the command strobes sharing 0x30-0x3D.

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::{register, FromByteArray, ReadableRegister};

/// Main radio control state machine state (MARCSTATE, address: 0xF5)
///
/// Only the low five bits are meaningful. The driver never writes this
/// state, it follows from the strobes that were issued.
#[register(0xF5u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MarcState {
    Sleep,
    Idle,
    Xoff,
    VcoonMc,
    RegonMc,
    Mancal,
    Vcoon,
    Regon,
    Startcal,
    Bwboost,
    FsLock,
    Ifadcon,
    Endcal,
    Rx,
    RxEnd,
    RxRst,
    TxrxSwitch,
    /// RX FIFO overflowed, only SFRX leaves this state
    RxFifoOverflow,
    Fstxon,
    Tx,
    TxEnd,
    RxtxSwitch,
    /// TX FIFO underflowed, only SFTX leaves this state
    TxFifoUnderflow,
    /// A value the datasheet does not define
    Unknown(u8),
}

impl MarcState {
    pub const MASK: u8 = 0x1F;

    /// Decodes a raw MARCSTATE value, masking it to five bits first
    pub const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x00 => Self::Sleep,
            0x01 => Self::Idle,
            0x02 => Self::Xoff,
            0x03 => Self::VcoonMc,
            0x04 => Self::RegonMc,
            0x05 => Self::Mancal,
            0x06 => Self::Vcoon,
            0x07 => Self::Regon,
            0x08 => Self::Startcal,
            0x09 => Self::Bwboost,
            0x0A => Self::FsLock,
            0x0B => Self::Ifadcon,
            0x0C => Self::Endcal,
            0x0D => Self::Rx,
            0x0E => Self::RxEnd,
            0x0F => Self::RxRst,
            0x10 => Self::TxrxSwitch,
            0x11 => Self::RxFifoOverflow,
            0x12 => Self::Fstxon,
            0x13 => Self::Tx,
            0x14 => Self::TxEnd,
            0x15 => Self::RxtxSwitch,
            0x16 => Self::TxFifoUnderflow,
            other => Self::Unknown(other),
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            Self::Sleep => 0x00,
            Self::Idle => 0x01,
            Self::Xoff => 0x02,
            Self::VcoonMc => 0x03,
            Self::RegonMc => 0x04,
            Self::Mancal => 0x05,
            Self::Vcoon => 0x06,
            Self::Regon => 0x07,
            Self::Startcal => 0x08,
            Self::Bwboost => 0x09,
            Self::FsLock => 0x0A,
            Self::Ifadcon => 0x0B,
            Self::Endcal => 0x0C,
            Self::Rx => 0x0D,
            Self::RxEnd => 0x0E,
            Self::RxRst => 0x0F,
            Self::TxrxSwitch => 0x10,
            Self::RxFifoOverflow => 0x11,
            Self::Fstxon => 0x12,
            Self::Tx => 0x13,
            Self::TxEnd => 0x14,
            Self::RxtxSwitch => 0x15,
            Self::TxFifoUnderflow => 0x16,
            Self::Unknown(other) => other & Self::MASK,
        }
    }

    /// True while a packet is still being sent
    pub const fn is_transmitting(self) -> bool {
        matches!(self, Self::Tx | Self::TxEnd)
    }
}

impl FromByteArray for MarcState {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self::from_bits(bytes[0]))
    }
}

// RXBYTES and TXBYTES: bit 7 flags overflow/underflow, bits 6:0 count the bytes
const FIFO_ERROR: u8 = 0x80;
const FIFO_COUNT_MASK: u8 = 0x7F;

/// RX FIFO status (RXBYTES, address: 0xFB)
#[register(0xFBu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxBytes {
    /// RXFIFO_OVERFLOW flag
    pub overflow: bool,
    /// Number of bytes waiting in the RX FIFO
    pub count: u8,
}

impl FromByteArray for RxBytes {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            overflow: bytes[0] & FIFO_ERROR != 0,
            count: bytes[0] & FIFO_COUNT_MASK,
        })
    }
}

/// TX FIFO status (TXBYTES, address: 0xFA)
#[register(0xFAu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxBytes {
    /// TXFIFO_UNDERFLOW flag
    pub underflow: bool,
    /// Number of bytes left in the TX FIFO
    pub count: u8,
}

impl FromByteArray for TxBytes {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            underflow: bytes[0] & FIFO_ERROR != 0,
            count: bytes[0] & FIFO_COUNT_MASK,
        })
    }
}

/// Part number (PARTNUM, address: 0xF0). Reads 0x00 on a CC1101.
#[register(0xF0u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PartNumber {
    pub value: u8,
}

impl FromByteArray for PartNumber {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

/// Chip version (VERSION, address: 0xF1). 0x14 on current silicon.
#[register(0xF1u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipVersion {
    pub value: u8,
}

impl FromByteArray for ChipVersion {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

/// Received signal strength (RSSI, address: 0xF4)
///
/// Two's complement value in half dB steps, relative to an offset that
/// depends on data rate and band (typically 74 dB).
#[register(0xF4u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rssi {
    pub raw: u8,
}

impl Rssi {
    pub const OFFSET_DB: i16 = 74;

    pub fn dbm(&self) -> i16 {
        (self.raw as i8) as i16 / 2 - Self::OFFSET_DB
    }
}

impl FromByteArray for Rssi {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { raw: bytes[0] })
    }
}

/// Link quality indicator (LQI, address: 0xF3)
#[register(0xF3u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lqi {
    /// CRC_OK of the last received packet
    pub crc_ok: bool,
    /// Link quality estimate, lower is better
    pub quality: u8,
}

impl FromByteArray for Lqi {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            crc_ok: bytes[0] & 0x80 != 0,
            quality: bytes[0] & 0x7F,
        })
    }
}

bitflags! {
    /// Current GDOx status and packet status (PKTSTATUS, address: 0xF8)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PacketStatus: u8 {
        /// Last CRC comparison matched
        const CRC_OK = 1 << 7;
        /// Carrier sense
        const CARRIER_SENSE = 1 << 6;
        /// Preamble quality reached
        const PQT_REACHED = 1 << 5;
        /// Channel is clear
        const CCA = 1 << 4;
        /// Start of frame delimiter, sync word found
        const SFD = 1 << 3;
        /// Current GDO2 value
        const GDO2 = 1 << 2;
        /// Current GDO0 value
        const GDO0 = 1;
    }
}

/// State field of the chip status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipState {
    Idle,
    Rx,
    Tx,
    Fstxon,
    Calibrate,
    Settling,
    RxFifoOverflow,
    TxFifoUnderflow,
}

/// Status byte the chip shifts out while receiving a header byte
///
/// # Status Byte Format
/// - Bit 7: CHIP_RDYn, low once power and crystal are stable
/// - Bits 6:4: main state machine mode
/// - Bits 3:0: FIFO bytes available (RX FIFO for reads, free TX FIFO
///   space for writes), saturated at 15
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipStatus(pub u8);

impl ChipStatus {
    pub fn is_ready(self) -> bool {
        self.0 & 0x80 == 0
    }

    pub fn state(self) -> ChipState {
        match (self.0 >> 4) & 0x07 {
            0 => ChipState::Idle,
            1 => ChipState::Rx,
            2 => ChipState::Tx,
            3 => ChipState::Fstxon,
            4 => ChipState::Calibrate,
            5 => ChipState::Settling,
            6 => ChipState::RxFifoOverflow,
            _ => ChipState::TxFifoUnderflow,
        }
    }

    pub fn fifo_bytes_available(self) -> u8 {
        self.0 & 0x0F
    }
}
