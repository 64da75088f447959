#![cfg_attr(not(test), no_std)]
//! CC1101 Radio Driver
//!
//! This crate provides a type-safe interface for the Texas Instruments CC1101
//! low-power sub-1 GHz RF transceiver. The CC1101 targets the 315, 433, 868
//! and 915 MHz ISM/SRD bands and is driven entirely over a 4-wire SPI
//! interface.
//!
//! # Features
//! - Frequency bands: 300-348, 387-464 and 779-928 MHz
//! - Modulation support: 2-FSK, GFSK, 4-FSK, MSK and ASK/OOK
//! - Data rate: 0.6 to 600 kBaud
//! - Output power up to +12 dBm
//! - 64 byte TX and RX FIFOs with hardware packet handling
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: Main device interface for hardware interaction
//!   - Chip select framing and the SO/MISO ready handshake
//!   - Single, burst and typed register access, command strobes
//!
//! - [`registers`]: Register definitions for direct hardware access
//!   - Address map and access modifiers
//!   - Modem configuration (MDMCFG2, frequency word, sync word)
//!   - Transmitter front end and PA table
//!   - Read-only status registers
//!
//! - [`commands`]: Command strobes
//!   - State machine control (reset, idle, RX, TX, calibration)
//!   - FIFO flushes
//!
//! - [`modem`]: Modulation, sync mode, Manchester coding and frequency setup
//! - [`radio`]: Mode transitions, packet TX/RX, output power and status
//! - [`presets`]: Complete register configurations
//!
//! # Usage
//! The driver uses the `regiface` crate to model registers and strobes. The
//! main entry point is the [`Device`] struct which takes an SPI bus, the
//! chip select pin, the SO/MISO line read as an input pin and a delay
//! provider.
//!
//! Configuration follows a specific sequence:
//!
//! 1. Create a new [`Device`] instance
//! 2. Reset the chip, or apply a [`Preset`] which resets it first
//! 3. Set the carrier frequency and modulation
//! 4. Set the output power
//! 5. Send packets, or enter RX and poll for received packets
//!
//! # Important Notes
//! - The SO line doubles as MISO. The ready input must sample the same pin.
//! - Configuration registers should only be written in IDLE
//! - Every wait on the chip is bounded by the poll budgets in [`Config`]
//!
//! # Example
//! ```no_run
//! use embedded_hal::{delay::DelayNs, digital::{InputPin, OutputPin}, spi::SpiBus};
//! use cc1101::{Device, Error, Preset};
//!
//! fn beacon<SPI, CS, SO, D>(
//!     spi: SPI,
//!     cs: CS,
//!     so: SO,
//!     delay: D,
//! ) -> Result<(), Error<SPI::Error, CS::Error>>
//! where
//!     SPI: SpiBus,
//!     CS: OutputPin,
//!     SO: InputPin<Error = CS::Error>,
//!     D: DelayNs,
//! {
//!     let mut device = Device::new(spi, cs, so, delay);
//!
//!     device.configure(Preset::OokPacket)?;
//!     device.set_frequency(433.92)?;
//!     device.set_tx_power_dbm(10)?;
//!     device.send_packet(b"hello")
//! }
//! ```

use regiface::*;

pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod modem;
pub mod presets;
pub mod radio;
pub mod registers;

pub use commands::*;
pub use config::{Config, PollBudget, DEFAULT_CRYSTAL_HZ};
pub use device::Device;
pub use error::{Error, InvalidArgument};
pub use presets::Preset;
pub use radio::{Packet, PartInfo, MAX_PAYLOAD_LEN};
pub use registers::*;
