//! Transmitter front end registers
//!
//! - FREND0 selects which PA table entry drives the power amplifier
//! - PATABLE holds up to eight PA power settings
//!
//! With FSK modulations only entry 0 is used. With OOK entry 0 is used for
//! '0' symbols and entry 1 for '1' symbols, so FREND0.PA_POWER is set to 1.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::error::InvalidArgument;
use crate::registers::{ModulationType, PA_TABLE_SIZE};

/// Front end TX configuration register FREND0 (address: 0x22)
///
/// # Field Layout
/// - Bits 5:4: LODIV_BUF_CURRENT_TX, keep at the recommended value 1
/// - Bits 2:0: PA_POWER, index of the PA table entry in use
#[register(0x22u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrontEndTx {
    /// TX LO buffer current (2 bits)
    pub lodiv_buf_current: u8,
    /// PA table index (3 bits)
    pub pa_power: u8,
}

impl Default for FrontEndTx {
    fn default() -> Self {
        Self {
            lodiv_buf_current: 1,
            pa_power: 0,
        }
    }
}

impl FrontEndTx {
    /// PA table index 0, used by every FSK modulation
    pub const PA_INDEX_0: Self = Self {
        lodiv_buf_current: 1,
        pa_power: 0,
    };

    /// PA table index 1, used as the '1' level with OOK
    pub const PA_INDEX_1: Self = Self {
        lodiv_buf_current: 1,
        pa_power: 1,
    };

    /// Front end setting matching a modulation format
    pub const fn for_modulation(modulation: ModulationType) -> Self {
        match modulation {
            ModulationType::Ook => Self::PA_INDEX_1,
            _ => Self::PA_INDEX_0,
        }
    }

    pub const fn bits(&self) -> u8 {
        ((self.lodiv_buf_current & 0x03) << 4) | (self.pa_power & 0x07)
    }
}

impl FromByteArray for FrontEndTx {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            lodiv_buf_current: (bytes[0] >> 4) & 0x03,
            pa_power: bytes[0] & 0x07,
        })
    }
}

impl ToByteArray for FrontEndTx {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits()])
    }
}

/// PA power table (address: 0x3E)
///
/// Always written in full. Entries that are not in use are zero so the PA
/// never ramps to a stale power setting.
#[register(0x3Eu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PaTable {
    pub entries: [u8; PA_TABLE_SIZE],
}

impl PaTable {
    /// Table with `level` at index 0 and every other entry zeroed
    pub const fn single(level: u8) -> Self {
        let mut entries = [0u8; PA_TABLE_SIZE];
        entries[0] = level;
        Self { entries }
    }
}

impl FromByteArray for PaTable {
    type Error = Infallible;
    type Array = [u8; PA_TABLE_SIZE];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { entries: bytes })
    }
}

impl ToByteArray for PaTable {
    type Error = Infallible;
    type Array = [u8; PA_TABLE_SIZE];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(self.entries)
    }
}

/// PA table settings for the 433 MHz band (datasheet table 39)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerLevel {
    /// +10 dBm, the maximum
    Dbm10,
    /// +7 dBm
    Dbm7,
    /// +5 dBm
    Dbm5,
    /// 0 dBm
    Dbm0,
    /// -10 dBm
    DbmMinus10,
    /// -30 dBm, the minimum
    DbmMinus30,
}

impl PowerLevel {
    pub fn from_dbm(dbm: i8) -> Result<Self, InvalidArgument> {
        match dbm {
            10 => Ok(Self::Dbm10),
            7 => Ok(Self::Dbm7),
            5 => Ok(Self::Dbm5),
            0 => Ok(Self::Dbm0),
            -10 => Ok(Self::DbmMinus10),
            -30 => Ok(Self::DbmMinus30),
            invalid => Err(InvalidArgument::PowerLevel(invalid)),
        }
    }

    /// PA table entry for this level
    pub const fn pa_setting(self) -> u8 {
        match self {
            Self::Dbm10 => 0xC0,
            Self::Dbm7 => 0xC8,
            Self::Dbm5 => 0x84,
            Self::Dbm0 => 0x60,
            Self::DbmMinus10 => 0x34,
            Self::DbmMinus30 => 0x12,
        }
    }
}
