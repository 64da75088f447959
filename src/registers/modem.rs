//! Modem configuration registers
//!
//! This module contains the registers that shape the over-the-air signal:
//! - Modulation format, Manchester coding and sync word qualifier (MDMCFG2)
//! - Carrier frequency (FREQ2..FREQ0)
//! - Sync word (SYNC1, SYNC0)

use core::convert::Infallible;
use core::str::FromStr;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::error::InvalidArgument;

/// Modulation format (MDMCFG2.MOD_FORMAT, bits 6:4)
///
/// The discriminant is the field value already shifted into place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ModulationType {
    /// Binary frequency shift keying
    #[default]
    Fsk2 = 0x00,
    /// Gaussian shaped FSK
    Gfsk = 0x10,
    /// ASK / on-off keying
    Ook = 0x30,
    /// Four level FSK
    Fsk4 = 0x40,
    /// Minimum shift keying. Only above 26 kBaud
    Msk = 0x70,
}

impl ModulationType {
    pub const MASK: u8 = 0x70;

    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode MOD_FORMAT from a full MDMCFG2 value
    pub fn from_bits(value: u8) -> Result<Self, InvalidArgument> {
        match value & Self::MASK {
            0x00 => Ok(Self::Fsk2),
            0x10 => Ok(Self::Gfsk),
            0x30 => Ok(Self::Ook),
            0x40 => Ok(Self::Fsk4),
            0x70 => Ok(Self::Msk),
            _ => Err(InvalidArgument::ModulationType),
        }
    }
}

impl FromStr for ModulationType {
    type Err = InvalidArgument;

    /// Parses "2FSK", "GFSK", "OOK", "4FSK" or "MSK" (ASCII case-insensitive)
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, ModulationType); 5] = [
            ("2FSK", ModulationType::Fsk2),
            ("GFSK", ModulationType::Gfsk),
            ("OOK", ModulationType::Ook),
            ("4FSK", ModulationType::Fsk4),
            ("MSK", ModulationType::Msk),
        ];

        NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, modulation)| *modulation)
            .ok_or(InvalidArgument::ModulationType)
    }
}

/// Sync word qualifier mode (MDMCFG2.SYNC_MODE, bits 2:0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SyncMode {
    /// No preamble/sync
    None = 0x00,
    /// 15/16 sync word bits detected
    Bits15Of16 = 0x01,
    /// 16/16 sync word bits detected
    #[default]
    Bits16Of16 = 0x02,
    /// 30/32 sync word bits detected
    Bits30Of32 = 0x03,
    /// No preamble/sync, carrier-sense above threshold
    CarrierSense = 0x04,
    /// 15/16 + carrier-sense above threshold
    Bits15Of16CarrierSense = 0x05,
    /// 16/16 + carrier-sense above threshold
    Bits16Of16CarrierSense = 0x06,
    /// 30/32 + carrier-sense above threshold
    Bits30Of32CarrierSense = 0x07,
}

impl SyncMode {
    pub const MASK: u8 = 0x07;

    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SyncMode {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::None),
            0x01 => Ok(Self::Bits15Of16),
            0x02 => Ok(Self::Bits16Of16),
            0x03 => Ok(Self::Bits30Of32),
            0x04 => Ok(Self::CarrierSense),
            0x05 => Ok(Self::Bits15Of16CarrierSense),
            0x06 => Ok(Self::Bits16Of16CarrierSense),
            0x07 => Ok(Self::Bits30Of32CarrierSense),
            invalid => Err(InvalidArgument::SyncMode(invalid)),
        }
    }
}

/// Modem configuration register MDMCFG2 (address: 0x12)
///
/// # Field Layout
/// - Bit 7: DEM_DCFILT_OFF, disables the digital DC blocking filter
/// - Bits 6:4: MOD_FORMAT
/// - Bit 3: MANCHESTER_EN
/// - Bits 2:0: SYNC_MODE
///
/// The default is the chip's reset value, 0x02.
#[register(0x12u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModemConfig2 {
    /// Disable the DC blocking filter before the demodulator
    pub dc_filter_off: bool,
    /// Modulation format
    pub modulation: ModulationType,
    /// Manchester encoding/decoding
    pub manchester: bool,
    /// Sync word qualifier mode
    pub sync_mode: SyncMode,
}

impl ModemConfig2 {
    const DC_FILTER_OFF: u8 = 0x80;
    const MANCHESTER_EN: u8 = 0x08;

    /// Packs the four fields into the register byte
    pub const fn bits(&self) -> u8 {
        let dc_filter_off = if self.dc_filter_off {
            Self::DC_FILTER_OFF
        } else {
            0
        };
        let manchester = if self.manchester {
            Self::MANCHESTER_EN
        } else {
            0
        };

        (dc_filter_off & 0x80)
            | (self.modulation.bits() & ModulationType::MASK)
            | (manchester & 0x08)
            | (self.sync_mode.bits() & SyncMode::MASK)
    }

    pub fn from_bits(value: u8) -> Result<Self, InvalidArgument> {
        Ok(Self {
            dc_filter_off: value & Self::DC_FILTER_OFF != 0,
            modulation: ModulationType::from_bits(value)?,
            manchester: value & Self::MANCHESTER_EN != 0,
            sync_mode: SyncMode::try_from(value & SyncMode::MASK)?,
        })
    }
}

impl FromByteArray for ModemConfig2 {
    type Error = InvalidArgument;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Self::from_bits(bytes[0])
    }
}

impl ToByteArray for ModemConfig2 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits()])
    }
}

/// Frequency control word FREQ2, FREQ1, FREQ0 (address: 0x0D-0x0F)
///
/// The carrier frequency is `f_carrier = f_xosc / 2^16 * FREQ`, so one LSB is
/// roughly 397 Hz with a 26 MHz crystal. The word is 24 bits wide and is
/// always accessed as a three byte burst, high byte first.
#[register(0x0Du8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frequency {
    word: u32,
}

impl Frequency {
    pub const MAX_WORD: u32 = 0x00FF_FFFF;

    /// Builds the frequency word for `mhz` with the given crystal frequency.
    ///
    /// `FREQ = round(mhz * 10^6 * 2^16 / f_xosc)`
    pub fn from_mhz(mhz: f64, crystal_hz: u32) -> Result<Self, InvalidArgument> {
        if !mhz.is_finite() || mhz <= 0.0 || crystal_hz == 0 {
            return Err(InvalidArgument::Frequency);
        }

        let exact = mhz * 1_000_000.0 * 65_536.0 / crystal_hz as f64;
        if exact + 0.5 > Self::MAX_WORD as f64 {
            return Err(InvalidArgument::Frequency);
        }

        Ok(Self {
            word: (exact + 0.5) as u32,
        })
    }

    /// Wraps a raw word. Bits above 23 are dropped.
    pub const fn from_word(word: u32) -> Self {
        Self {
            word: word & Self::MAX_WORD,
        }
    }

    pub const fn word(&self) -> u32 {
        self.word
    }

    /// Carrier frequency in MHz
    pub fn to_mhz(&self, crystal_hz: u32) -> f64 {
        self.word as f64 * crystal_hz as f64 / 65_536.0 / 1_000_000.0
    }
}

impl FromByteArray for Frequency {
    type Error = Infallible;
    type Array = [u8; 3];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            word: u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]),
        })
    }
}

impl ToByteArray for Frequency {
    type Error = Infallible;
    type Array = [u8; 3];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let [_, freq2, freq1, freq0] = self.word.to_be_bytes();
        Ok([freq2, freq1, freq0])
    }
}

/// Sync word SYNC1, SYNC0 (address: 0x04-0x05)
///
/// Reset value 0xD391. Checked according to [`SyncMode`].
#[register(0x04u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncWord {
    pub word: u16,
}

impl Default for SyncWord {
    fn default() -> Self {
        Self { word: 0xD391 }
    }
}

impl FromByteArray for SyncWord {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            word: u16::from_be_bytes(bytes),
        })
    }
}

impl ToByteArray for SyncWord {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(self.word.to_be_bytes())
    }
}
