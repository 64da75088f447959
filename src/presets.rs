//! Ready-made register configurations
//!
//! Both presets target OOK in the 433 MHz band with the common 26 MHz
//! crystal. They leave the carrier frequency and the PA table alone, so
//! follow up with [`Device::set_frequency`] and [`Device::set_tx_power`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::device::Device;
use crate::error::Error;
use crate::registers::{ConfigRegister, ModemConfig2};

use crate::registers::ConfigRegister::*;

/// A complete register configuration applied by [`Device::configure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Preset {
    /// Packet mode: variable length with CRC, 4 preamble bytes, sync word
    /// 0x1234, about 10 kBaud
    OokPacket,
    /// Asynchronous serial mode with infinite packet length and no sync word.
    /// GDO0 carries the demodulated data.
    OokCarrier,
}

impl Preset {
    /// Register writes in the order they are applied
    pub fn registers(self) -> &'static [(ConfigRegister, u8)] {
        match self {
            Self::OokPacket => &OOK_PACKET,
            Self::OokCarrier => &OOK_CARRIER,
        }
    }

    /// MDMCFG2 as left by the preset
    pub fn modem_config(self) -> Option<u8> {
        self.registers()
            .iter()
            .rev()
            .find(|(register, _)| *register == Mdmcfg2)
            .map(|(_, value)| *value)
    }
}

const OOK_PACKET: [(ConfigRegister, u8); 31] = [
    // CRC enabled, variable packet length
    (Pktctrl0, 0x05),
    // Append RSSI/LQI, no address check
    (Pktctrl1, 0x04),
    (Pktlen, 0xFF),
    // DRATE_E = 7, DRATE_M = 131: ~10 kBaud
    (Mdmcfg4, 0xF7),
    (Mdmcfg3, 0x83),
    // OOK, 16/16 sync bits
    (Mdmcfg2, 0x32),
    // 4 preamble bytes
    (Mdmcfg1, 0x22),
    (Sync1, 0x12),
    (Sync0, 0x34),
    (Mdmcfg0, 0xF8),
    (Deviatn, 0x15),
    (Mcsm2, 0x07),
    // Stay in RX after a packet
    (Mcsm1, 0x30),
    // Calibrate going from IDLE to RX or TX
    (Mcsm0, 0x18),
    (Foccfg, 0x16),
    (Bscfg, 0x6C),
    (Agcctrl2, 0x03),
    (Agcctrl1, 0x40),
    (Agcctrl0, 0x91),
    (Worctrl, 0xFB),
    (Frend1, 0x56),
    (Frend0, 0x10),
    (Fscal3, 0xE9),
    (Fscal2, 0x2A),
    (Fscal1, 0x00),
    (Fscal0, 0x1F),
    (Rcctrl1, 0x41),
    (Rcctrl0, 0x00),
    (Test2, 0x81),
    (Test1, 0x35),
    (Test0, 0x09),
];

const OOK_CARRIER: [(ConfigRegister, u8); 34] = [
    // GDO2 asserts CHIP_RDYn
    (Iocfg2, 0x29),
    // GDO0 outputs the serial data
    (Iocfg0, 0x0D),
    (Pktctrl1, 0x04),
    // Asynchronous serial mode, infinite packet length
    (Pktctrl0, 0x32),
    (Pktlen, 0xFF),
    // TX FIFO threshold 33 bytes, RX FIFO threshold 32 bytes
    (Fifothr, 0x47),
    (Sync1, 0xD3),
    (Sync0, 0x91),
    // 58 kHz RX filter bandwidth, ~4.8 kBaud
    (Mdmcfg4, 0xC8),
    (Mdmcfg3, 0x93),
    // OOK, sync mode 2 (ignored in asynchronous mode)
    (Mdmcfg2, 0x32),
    (Mdmcfg1, 0x22),
    (Mdmcfg0, 0xF8),
    (Deviatn, 0x15),
    (Mcsm2, 0x07),
    (Mcsm1, 0x30),
    (Mcsm0, 0x18),
    (Foccfg, 0x16),
    (Bscfg, 0x6C),
    (Agcctrl2, 0x03),
    (Agcctrl1, 0x40),
    (Agcctrl0, 0x91),
    (Worctrl, 0xFB),
    (Frend1, 0x56),
    (Frend0, 0x10),
    (Fscal3, 0xE9),
    (Fscal2, 0x2A),
    (Fscal1, 0x00),
    (Fscal0, 0x1F),
    (Rcctrl1, 0x41),
    (Rcctrl0, 0x00),
    (Test2, 0x81),
    (Test1, 0x35),
    (Test0, 0x09),
];

impl<SPI, CS, READY, D, SpiE, PinE> Device<SPI, CS, READY, D>
where
    SPI: SpiBus<u8, Error = SpiE>,
    CS: OutputPin<Error = PinE>,
    READY: InputPin<Error = PinE>,
    D: DelayNs,
{
    /// Resets the chip and applies a preset.
    ///
    /// The MDMCFG2 fields held by the handle are updated to the preset's
    /// value, so later modem setters build on it.
    pub fn configure(&mut self, preset: Preset) -> Result<(), Error<SpiE, PinE>> {
        self.reset()?;

        #[cfg(feature = "defmt")]
        defmt::info!("applying preset {}", preset);

        for &(register, value) in preset.registers() {
            self.write_single(register.addr(), value)?;
        }

        if let Some(bits) = preset.modem_config() {
            self.modem = ModemConfig2::from_bits(bits)
                .map_err(|_| Error::InvalidRegisterValue(Mdmcfg2.addr()))?;
        }

        Ok(())
    }
}
