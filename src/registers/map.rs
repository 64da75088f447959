//! Register address map
//!
//! Addresses from the CC1101 datasheet (SWRS061), section 29.
//!
//! The header byte of every SPI access carries the address in bits 5:0 and
//! two access modifiers, see [`Access`]. Status registers share the address
//! range of the command strobes and are told apart by the burst bit, so they
//! are listed here with both modifier bits already set (0xF0-0xFD).

use bitflags::bitflags;

/// Size of both the TX and the RX FIFO in bytes
pub const FIFO_SIZE: usize = 64;

/// Number of entries in the PA power table
pub const PA_TABLE_SIZE: usize = 8;

/// FIFO access address. Writes go to the TX FIFO, reads come from the RX FIFO.
pub const FIFO: u8 = 0x3F;

/// PA power table address
pub const PATABLE: u8 = 0x3E;

bitflags! {
    /// Access modifiers OR'd into the header byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Access: u8 {
        /// R/W bit. Set for reads.
        const READ = 0x80;
        /// Burst bit. Set for burst access, and for status register reads.
        const BURST = 0x40;
    }
}

impl Access {
    pub const READ_SINGLE: Self = Self::READ;
    pub const READ_BURST: Self = Self::READ.union(Self::BURST);
    pub const WRITE_BURST: Self = Self::BURST;

    /// Header byte for accessing `addr` with these modifiers
    pub const fn header(self, addr: u8) -> u8 {
        addr | self.bits()
    }
}

/// Configuration registers (0x00-0x2E)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ConfigRegister {
    /// GDO2 output pin configuration
    Iocfg2 = 0x00,
    /// GDO1 output pin configuration
    Iocfg1 = 0x01,
    /// GDO0 output pin configuration
    Iocfg0 = 0x02,
    /// RX FIFO and TX FIFO thresholds
    Fifothr = 0x03,
    /// Sync word, high byte
    Sync1 = 0x04,
    /// Sync word, low byte
    Sync0 = 0x05,
    /// Packet length
    Pktlen = 0x06,
    /// Packet automation control
    Pktctrl1 = 0x07,
    /// Packet automation control
    Pktctrl0 = 0x08,
    /// Device address
    Addr = 0x09,
    /// Channel number
    Channr = 0x0A,
    /// Frequency synthesizer control
    Fsctrl1 = 0x0B,
    /// Frequency synthesizer control
    Fsctrl0 = 0x0C,
    /// Frequency control word, high byte
    Freq2 = 0x0D,
    /// Frequency control word, middle byte
    Freq1 = 0x0E,
    /// Frequency control word, low byte
    Freq0 = 0x0F,
    /// Modem configuration
    Mdmcfg4 = 0x10,
    /// Modem configuration
    Mdmcfg3 = 0x11,
    /// Modem configuration
    Mdmcfg2 = 0x12,
    /// Modem configuration
    Mdmcfg1 = 0x13,
    /// Modem configuration
    Mdmcfg0 = 0x14,
    /// Modem deviation setting
    Deviatn = 0x15,
    /// Main radio control state machine configuration
    Mcsm2 = 0x16,
    /// Main radio control state machine configuration
    Mcsm1 = 0x17,
    /// Main radio control state machine configuration
    Mcsm0 = 0x18,
    /// Frequency offset compensation configuration
    Foccfg = 0x19,
    /// Bit synchronization configuration
    Bscfg = 0x1A,
    /// AGC control
    Agcctrl2 = 0x1B,
    /// AGC control
    Agcctrl1 = 0x1C,
    /// AGC control
    Agcctrl0 = 0x1D,
    /// High byte event 0 timeout
    Worevt1 = 0x1E,
    /// Low byte event 0 timeout
    Worevt0 = 0x1F,
    /// Wake on radio control
    Worctrl = 0x20,
    /// Front end RX configuration
    Frend1 = 0x21,
    /// Front end TX configuration
    Frend0 = 0x22,
    /// Frequency synthesizer calibration
    Fscal3 = 0x23,
    /// Frequency synthesizer calibration
    Fscal2 = 0x24,
    /// Frequency synthesizer calibration
    Fscal1 = 0x25,
    /// Frequency synthesizer calibration
    Fscal0 = 0x26,
    /// RC oscillator configuration
    Rcctrl1 = 0x27,
    /// RC oscillator configuration
    Rcctrl0 = 0x28,
    /// Frequency synthesizer calibration control
    Fstest = 0x29,
    /// Production test
    Ptest = 0x2A,
    /// AGC test
    Agctest = 0x2B,
    /// Various test settings
    Test2 = 0x2C,
    /// Various test settings
    Test1 = 0x2D,
    /// Various test settings
    Test0 = 0x2E,
}

impl ConfigRegister {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Read-only status registers, addressed with the burst bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StatusRegister {
    /// Part number
    Partnum = 0xF0,
    /// Current version number
    Version = 0xF1,
    /// Frequency offset estimate
    Freqest = 0xF2,
    /// Demodulator estimate for link quality
    Lqi = 0xF3,
    /// Received signal strength indication
    Rssi = 0xF4,
    /// Main radio control state machine state
    Marcstate = 0xF5,
    /// High byte of WOR timer
    Wortime1 = 0xF6,
    /// Low byte of WOR timer
    Wortime0 = 0xF7,
    /// Current GDOx status and packet status
    Pktstatus = 0xF8,
    /// Current setting from PLL calibration module
    VcoVcDac = 0xF9,
    /// Underflow and number of bytes in the TX FIFO
    Txbytes = 0xFA,
    /// Overflow and number of bytes in the RX FIFO
    Rxbytes = 0xFB,
    /// Last RC oscillator calibration result
    Rcctrl1Status = 0xFC,
    /// Last RC oscillator calibration result
    Rcctrl0Status = 0xFD,
}

impl StatusRegister {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_bytes() {
        assert_eq!(Access::READ_SINGLE.header(ConfigRegister::Mdmcfg2.addr()), 0x92);
        assert_eq!(Access::READ_BURST.header(ConfigRegister::Freq2.addr()), 0xCD);
        assert_eq!(Access::WRITE_BURST.header(FIFO), 0x7F);
        assert_eq!(Access::READ_BURST.header(FIFO), 0xFF);
        assert_eq!(Access::WRITE_BURST.header(PATABLE), 0x7E);
    }

    #[test]
    fn status_registers_keep_their_address_on_single_reads() {
        let addr = StatusRegister::Marcstate.addr();
        assert_eq!(Access::READ_SINGLE.header(addr), addr);
    }
}
