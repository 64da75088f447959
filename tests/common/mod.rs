//! Simulated CC1101 behind the embedded-hal traits
//!
//! The bus, the chip select and the ready line are three views on one shared
//! [`Chip`]. The chip decodes header bytes the way the silicon does, keeps a
//! register file, both FIFOs and the PA table, applies strobes to its state
//! machine and records every chip select window for inspection.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use cc1101::{Config, Device, PollBudget};
use embedded_hal::digital::{self, ErrorType as PinErrorType, InputPin, OutputPin};
use embedded_hal::spi::{self, ErrorType as SpiErrorType, SpiBus};
use embedded_hal_mock::eh1::delay::NoopDelay;

pub const MARC_IDLE: u8 = 0x01;
pub const MARC_RX: u8 = 0x0D;
pub const MARC_RX_OVERFLOW: u8 = 0x11;
pub const MARC_TX: u8 = 0x13;
pub const MARC_TX_END: u8 = 0x14;
pub const MARC_TX_UNDERFLOW: u8 = 0x16;

pub const SRES: u8 = 0x30;
pub const SCAL: u8 = 0x33;
pub const SRX: u8 = 0x34;
pub const STX: u8 = 0x35;
pub const SIDLE: u8 = 0x36;
pub const SFRX: u8 = 0x3A;
pub const SFTX: u8 = 0x3B;

const FIFO: u8 = 0x3F;
const PATABLE: u8 = 0x3E;

const PARTNUM: u8 = 0x30;
const VERSION: u8 = 0x31;
const RSSI: u8 = 0x34;
const LQI: u8 = 0x33;
const MARCSTATE: u8 = 0x35;
const PKTSTATUS: u8 = 0x38;
const TXBYTES: u8 = 0x3A;
const RXBYTES: u8 = 0x3B;

/// Configuration register reset values (0x00-0x2E)
const RESET_VALUES: [u8; 0x2F] = [
    0x29, 0x2E, 0x3F, 0x07, 0xD3, 0x91, 0xFF, 0x04, 0x45, 0x00, 0x00, 0x0F, 0x00, 0x1E, 0xC4,
    0xEC, 0x8C, 0x22, 0x02, 0x22, 0xF8, 0x47, 0x07, 0x30, 0x04, 0x76, 0x6C, 0x03, 0x40, 0x91,
    0x87, 0x6B, 0xF8, 0x56, 0x10, 0xA9, 0x0A, 0x20, 0x0D, 0x41, 0x00, 0x59, 0x7F, 0x3F, 0x88,
    0x31, 0x0B,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiFault;

impl spi::Error for SpiFault {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Next byte is a header
    Header,
    /// Data phase of a register access
    Data {
        addr: u8,
        read: bool,
        burst: bool,
        offset: usize,
    },
    /// Data phase of a status register read
    Status(u8),
}

#[derive(Debug)]
pub struct Chip {
    pub registers: [u8; 0x2F],
    pub pa_table: [u8; 8],
    pub tx_fifo: Vec<u8>,
    pub rx_fifo: VecDeque<u8>,
    /// Current MARCSTATE
    pub marc: u8,
    /// MARCSTATE values returned by the next reads, before `marc`
    pub marc_script: VecDeque<u8>,
    /// State entered on SRX
    pub rx_state: u8,
    /// State entered on STX. A packet is sent instantly by default.
    pub tx_state: u8,
    /// RXBYTES value forced regardless of the RX FIFO content
    pub rx_bytes: Option<u8>,
    pub part_number: u8,
    pub version: u8,
    pub rssi: u8,
    pub lqi: u8,
    pub pkt_status: u8,

    /// Completed chip select windows, MOSI bytes only
    pub frames: Vec<Vec<u8>>,
    /// Strobes in the order they were received
    pub strobes: Vec<u8>,
    /// Chip select levels as driven, `true` = high
    pub cs_levels: Vec<bool>,
    /// Ready polls answered with SO high before reporting ready
    pub busy_polls: u32,
    pub never_ready: bool,
    pub fail_spi: bool,

    window: Option<Vec<u8>>,
    phase: Phase,
}

impl Default for Chip {
    fn default() -> Self {
        Self {
            registers: RESET_VALUES,
            pa_table: [0xC6, 0, 0, 0, 0, 0, 0, 0],
            tx_fifo: Vec::new(),
            rx_fifo: VecDeque::new(),
            marc: MARC_IDLE,
            marc_script: VecDeque::new(),
            rx_state: MARC_RX,
            tx_state: MARC_IDLE,
            rx_bytes: None,
            part_number: 0x00,
            version: 0x14,
            rssi: 0x80,
            lqi: 0x80,
            pkt_status: 0x00,
            frames: Vec::new(),
            strobes: Vec::new(),
            cs_levels: Vec::new(),
            busy_polls: 0,
            never_ready: false,
            fail_spi: false,
            window: None,
            phase: Phase::Header,
        }
    }
}

impl Chip {
    pub fn selected(&self) -> bool {
        self.window.is_some()
    }

    pub fn mdmcfg2(&self) -> u8 {
        self.registers[0x12]
    }

    pub fn frend0(&self) -> u8 {
        self.registers[0x22]
    }

    /// Frames that wrote a configuration register, the PA table or the TX FIFO
    pub fn write_frames(&self) -> Vec<&Vec<u8>> {
        self.frames
            .iter()
            .filter(|frame| frame.len() > 1 && frame[0] & 0x80 == 0)
            .collect()
    }

    /// Frames that carry a burst read of `addr`
    pub fn burst_reads_of(&self, addr: u8) -> usize {
        self.frames
            .iter()
            .filter(|frame| frame[0] == addr | 0xC0)
            .count()
    }

    fn status_byte(&self) -> u8 {
        let state = match self.marc {
            MARC_IDLE => 0,
            MARC_RX => 1,
            MARC_TX | MARC_TX_END => 2,
            MARC_RX_OVERFLOW => 6,
            MARC_TX_UNDERFLOW => 7,
            _ => 5,
        };
        (state << 4) | (self.rx_fifo.len().min(15) as u8)
    }

    fn is_ready(&mut self) -> bool {
        if self.never_ready {
            return false;
        }
        if self.busy_polls > 0 {
            self.busy_polls -= 1;
            return false;
        }
        true
    }

    fn strobe(&mut self, command: u8) {
        self.strobes.push(command);
        match command {
            SRES => {
                let fresh = Self::default();
                self.registers = fresh.registers;
                self.pa_table = fresh.pa_table;
                self.tx_fifo.clear();
                self.rx_fifo.clear();
                self.marc = MARC_IDLE;
            }
            SCAL | SIDLE => self.marc = MARC_IDLE,
            SRX => self.marc = self.rx_state,
            STX => self.marc = self.tx_state,
            SFRX => {
                self.rx_fifo.clear();
                self.marc = MARC_IDLE;
            }
            SFTX => {
                self.tx_fifo.clear();
                if self.marc == MARC_TX_UNDERFLOW {
                    self.marc = MARC_IDLE;
                }
            }
            _ => {}
        }
    }

    fn read_status(&mut self, addr: u8) -> u8 {
        match addr {
            PARTNUM => self.part_number,
            VERSION => self.version,
            RSSI => self.rssi,
            LQI => self.lqi,
            MARCSTATE => self.marc_script.pop_front().unwrap_or(self.marc),
            PKTSTATUS => self.pkt_status,
            TXBYTES => self.tx_fifo.len() as u8,
            RXBYTES => self.rx_bytes.unwrap_or_else(|| {
                let overflow = if self.marc == MARC_RX_OVERFLOW { 0x80 } else { 0 };
                overflow | self.rx_fifo.len() as u8
            }),
            _ => 0,
        }
    }

    fn register(&mut self, addr: u8, read: bool, offset: usize, mosi: u8) -> u8 {
        match addr {
            FIFO if read => self.rx_fifo.pop_front().unwrap_or(0),
            FIFO => {
                self.tx_fifo.push(mosi);
                0
            }
            PATABLE => {
                let entry = &mut self.pa_table[offset % 8];
                if !read {
                    *entry = mosi;
                }
                *entry
            }
            _ => {
                let index = addr as usize + offset;
                match self.registers.get_mut(index) {
                    Some(value) if read => *value,
                    Some(value) => {
                        *value = mosi;
                        0
                    }
                    None => 0,
                }
            }
        }
    }

    fn shift(&mut self, mosi: u8) -> Result<u8, SpiFault> {
        if self.fail_spi {
            return Err(SpiFault);
        }

        self.window
            .as_mut()
            .expect("SPI clocked with chip select deasserted")
            .push(mosi);

        let miso = match self.phase {
            Phase::Header => {
                let addr = mosi & 0x3F;
                let read = mosi & 0x80 != 0;
                let burst = mosi & 0x40 != 0;
                let status = self.status_byte();

                if (0x30..=0x3D).contains(&addr) {
                    if burst {
                        self.phase = Phase::Status(addr);
                    } else {
                        self.strobe(addr);
                    }
                } else {
                    self.phase = Phase::Data {
                        addr,
                        read,
                        burst,
                        offset: 0,
                    };
                }
                status
            }
            Phase::Status(addr) => {
                self.phase = Phase::Header;
                self.read_status(addr)
            }
            Phase::Data {
                addr,
                read,
                burst,
                offset,
            } => {
                let miso = self.register(addr, read, offset, mosi);
                self.phase = if burst {
                    Phase::Data {
                        addr,
                        read,
                        burst,
                        offset: offset + 1,
                    }
                } else {
                    Phase::Header
                };
                miso
            }
        };

        Ok(miso)
    }

    fn select(&mut self) {
        self.cs_levels.push(false);
        self.window = Some(Vec::new());
        self.phase = Phase::Header;
    }

    fn deselect(&mut self) {
        self.cs_levels.push(true);
        if let Some(frame) = self.window.take() {
            if !frame.is_empty() {
                self.frames.push(frame);
            }
        }
    }
}

pub type Shared = Rc<RefCell<Chip>>;

pub struct SimSpi(Shared);
pub struct SimCs(Shared);
pub struct SimReady(Shared);

impl SpiErrorType for SimSpi {
    type Error = SpiFault;
}

impl SpiBus for SimSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut chip = self.0.borrow_mut();
        for word in words {
            *word = chip.shift(0x00)?;
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut chip = self.0.borrow_mut();
        for &word in words {
            chip.shift(word)?;
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let mut chip = self.0.borrow_mut();
        for i in 0..read.len().max(write.len()) {
            let miso = chip.shift(write.get(i).copied().unwrap_or(0x00))?;
            if let Some(word) = read.get_mut(i) {
                *word = miso;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut chip = self.0.borrow_mut();
        for word in words {
            *word = chip.shift(*word)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl PinErrorType for SimCs {
    type Error = PinFault;
}

impl OutputPin for SimCs {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().select();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().deselect();
        Ok(())
    }
}

impl PinErrorType for SimReady {
    type Error = PinFault;
}

impl InputPin for SimReady {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.borrow_mut().is_ready())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.borrow_mut().is_ready())
    }
}

pub type SimDevice = Device<SimSpi, SimCs, SimReady, NoopDelay>;

/// Short poll budgets so timeouts trigger quickly
pub fn test_config() -> Config {
    Config::default()
        .set_ready_poll(PollBudget::new(8, 1))
        .set_mode_poll(PollBudget::new(8, 1))
        .set_tx_poll(PollBudget::new(8, 1))
}

pub fn setup() -> (SimDevice, Shared) {
    setup_with(Chip::default())
}

pub fn setup_with(chip: Chip) -> (SimDevice, Shared) {
    let chip = Rc::new(RefCell::new(chip));
    let device = Device::with_config(
        SimSpi(chip.clone()),
        SimCs(chip.clone()),
        SimReady(chip.clone()),
        NoopDelay::new(),
        test_config(),
    );
    (device, chip)
}

/// Drops everything recorded so far
pub fn clear_log(chip: &Shared) {
    let mut chip = chip.borrow_mut();
    chip.frames.clear();
    chip.strobes.clear();
    chip.cs_levels.clear();
}
