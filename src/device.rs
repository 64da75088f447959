//! CC1101 Device Interface
//!
//! This module provides the bus level interface to the CC1101. It owns the
//! SPI bus together with the chip select and ready lines and implements the
//! chip's framing:
//! - Every access is one chip select window: assert CSn, wait for SO to go
//!   low (chip ready), shift the header byte and the data phase, deassert CSn
//! - The header byte carries the address plus the read and burst bits
//! - The chip answers every header byte with its status byte
//!
//! On top of that it provides single and burst register access, command
//! strobes and typed access to the registers defined in [`registers`](crate::registers).
//!
//! # Example
//! ```no_run
//! use embedded_hal::{delay::DelayNs, digital::{InputPin, OutputPin}, spi::SpiBus};
//! use cc1101::{Device, ModemConfig2};
//!
//! fn modem_config<SPI, CS, SO, D>(spi: SPI, cs: CS, so: SO, delay: D) -> Option<ModemConfig2>
//! where
//!     SPI: SpiBus,
//!     CS: OutputPin,
//!     SO: InputPin<Error = CS::Error>,
//!     D: DelayNs,
//! {
//!     let mut device = Device::new(spi, cs, so, delay);
//!     device.reset().ok()?;
//!     device.read_register::<ModemConfig2>().ok()
//! }
//! ```

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::{Operation, SpiBus};
use regiface::{ByteArray, Command, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::commands::Reset;
use crate::config::Config;
use crate::error::Error;
use crate::registers::{Access, ChipStatus, ModemConfig2, StatusRegister};
use crate::NoParameters;

// Reset framing, datasheet section 19.1.2
const RESET_CS_HIGH_US: u32 = 40;
const RESET_CS_LOW_US: u32 = 10;

/// Main device interface for the CC1101 radio.
///
/// Wraps the SPI bus, the active low chip select output, the SO/MISO line
/// sampled as an input (low = chip ready) and a delay provider. The handle
/// also owns the MDMCFG2 fields set through the modem configuration methods,
/// so several handles never share configuration.
///
/// All methods take `&mut self`. A handle shared between threads must be
/// wrapped in a lock held for the whole operation.
pub struct Device<SPI, CS, READY, D> {
    spi: SPI,
    cs: CS,
    ready: READY,
    pub(crate) delay: D,
    pub(crate) config: Config,
    pub(crate) modem: ModemConfig2,
}

impl<SPI, CS, READY, D> Device<SPI, CS, READY, D> {
    /// Creates a new Device with the default [`Config`].
    ///
    /// # Arguments
    /// * `spi` - SPI bus in mode 0, not shared with other devices
    /// * `cs` - Chip select output (CSn)
    /// * `ready` - The SO/MISO line read back as a digital input
    /// * `delay` - Delay provider used for polling and reset timing
    pub fn new(spi: SPI, cs: CS, ready: READY, delay: D) -> Self {
        Self::with_config(spi, cs, ready, delay, Config::default())
    }

    /// Creates a new Device with an explicit [`Config`].
    pub fn with_config(spi: SPI, cs: CS, ready: READY, delay: D, config: Config) -> Self {
        Self {
            spi,
            cs,
            ready,
            delay,
            config,
            modem: ModemConfig2::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Releases the bus, the pins and the delay provider.
    pub fn release(self) -> (SPI, CS, READY, D) {
        (self.spi, self.cs, self.ready, self.delay)
    }
}

impl<SPI, CS, READY, D, SpiE, PinE> Device<SPI, CS, READY, D>
where
    SPI: SpiBus<u8, Error = SpiE>,
    CS: OutputPin<Error = PinE>,
    READY: InputPin<Error = PinE>,
    D: DelayNs,
{
    /// Executes a sequence of SPI operations inside one chip select window.
    ///
    /// Chip select is asserted, the chip ready handshake is awaited, the
    /// operations run in order and the bus is flushed. Chip select is
    /// deasserted on every path. When several steps fail the first error is
    /// returned.
    ///
    /// # Errors
    /// * `Error::Pin` - Chip select or the ready line failed
    /// * `Error::ChipNotReady` - SO stayed high for the whole ready poll budget
    /// * `Error::Spi` - SPI communication failed
    pub fn transaction(
        &mut self,
        operations: &mut [Operation<'_, u8>],
    ) -> Result<(), Error<SpiE, PinE>> {
        self.cs.set_low().map_err(Error::Pin)?;

        let result = self
            .wait_ready()
            .and_then(|()| self.exchange(operations));
        let released = self.cs.set_high().map_err(Error::Pin);

        result.and(released)
    }

    fn exchange(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Error<SpiE, PinE>> {
        for op in operations {
            match op {
                Operation::Read(words) => self.spi.read(words),
                Operation::Write(words) => self.spi.write(words),
                Operation::Transfer(read, write) => self.spi.transfer(read, write),
                Operation::TransferInPlace(words) => self.spi.transfer_in_place(words),
                Operation::DelayNs(ns) => {
                    let flushed = self.spi.flush();
                    self.delay.delay_ns(*ns);
                    flushed
                }
            }
            .map_err(Error::Spi)?;
        }

        self.spi.flush().map_err(Error::Spi)
    }

    /// Busily wait for SO to go low, bounded by `Config::ready_poll`
    fn wait_ready(&mut self) -> Result<(), Error<SpiE, PinE>> {
        let budget = self.config.ready_poll;

        for _ in 0..budget.attempts {
            if self.ready.is_low().map_err(Error::Pin)? {
                return Ok(());
            }
            self.delay.delay_us(budget.interval_us);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("chip not ready after {} polls", budget.attempts);

        Err(Error::ChipNotReady)
    }

    /// Resets the chip with the manual power-up sequence.
    ///
    /// Deasserts chip select, asserts it again, waits for the chip to be
    /// ready, strobes SRES, waits for ready again and deasserts. The driver
    /// then waits `Config::reset_settle_us` before returning.
    ///
    /// The MDMCFG2 fields held by the handle return to the reset value.
    pub fn reset(&mut self) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("reset");

        self.cs.set_high().map_err(Error::Pin)?;
        self.delay.delay_us(RESET_CS_HIGH_US);
        self.cs.set_low().map_err(Error::Pin)?;
        self.delay.delay_us(RESET_CS_LOW_US);

        let mut command = [Reset::id()];
        let result = self
            .wait_ready()
            .and_then(|()| self.spi.transfer_in_place(&mut command).map_err(Error::Spi))
            .and_then(|()| self.spi.flush().map_err(Error::Spi))
            .and_then(|()| self.wait_ready());
        let released = self.cs.set_high().map_err(Error::Pin);
        result.and(released)?;

        self.delay.delay_us(self.config.reset_settle_us);
        self.modem = ModemConfig2::default();

        Ok(())
    }

    /// Reads a single register.
    ///
    /// The header is `addr | 0x80`, followed by one dummy byte clocking out
    /// the value.
    pub fn read_single(&mut self, addr: u8) -> Result<u8, Error<SpiE, PinE>> {
        let mut header = [Access::READ_SINGLE.header(addr)];
        let mut value = [0u8];

        self.transaction(&mut [
            Operation::TransferInPlace(&mut header),
            Operation::Read(&mut value),
        ])?;

        Ok(value[0])
    }

    /// Reads `bytes.len()` consecutive registers starting at `addr`.
    ///
    /// The header is `addr | 0xC0`. The chip increments the address after
    /// every byte, except on the FIFO address which drains the RX FIFO.
    pub fn read_burst(&mut self, addr: u8, bytes: &mut [u8]) -> Result<(), Error<SpiE, PinE>> {
        let mut header = [Access::READ_BURST.header(addr)];

        self.transaction(&mut [
            Operation::TransferInPlace(&mut header),
            Operation::Read(bytes),
        ])
    }

    /// Writes a single register: header `addr`, then `value`.
    pub fn write_single(&mut self, addr: u8, value: u8) -> Result<(), Error<SpiE, PinE>> {
        let mut header = [addr];

        self.transaction(&mut [
            Operation::TransferInPlace(&mut header),
            Operation::Write(&[value]),
        ])
    }

    /// Writes consecutive registers starting at `addr`, header `addr | 0x40`.
    pub fn write_burst(&mut self, addr: u8, values: &[u8]) -> Result<(), Error<SpiE, PinE>> {
        let mut header = [Access::WRITE_BURST.header(addr)];

        self.transaction(&mut [
            Operation::TransferInPlace(&mut header),
            Operation::Write(values),
        ])
    }

    /// Issues a command strobe.
    ///
    /// Only the command byte is sent. Returns the status byte the chip
    /// shifted out while receiving it.
    pub fn strobe<C>(&mut self, _command: C) -> Result<ChipStatus, Error<SpiE, PinE>>
    where
        C: Command<IdType = u8, CommandParameters = NoParameters>,
    {
        #[cfg(feature = "defmt")]
        defmt::trace!("strobe {=u8:#04x}", C::id());

        let mut header = [C::id()];
        self.transaction(&mut [Operation::TransferInPlace(&mut header)])?;

        Ok(ChipStatus(header[0]))
    }

    /// Reads a status register. Status registers always use single-read framing.
    pub fn read_status(&mut self, register: StatusRegister) -> Result<u8, Error<SpiE, PinE>> {
        self.read_single(register.addr())
    }

    /// Reads a register value from the device.
    ///
    /// One byte registers use single-read framing, wider ones a burst read.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing ReadableRegister with u8 ID
    ///
    /// # Errors
    /// * `Error::InvalidRegisterValue` - Failed to parse register value
    pub fn read_register<R>(&mut self) -> Result<R, Error<SpiE, PinE>>
    where
        R: ReadableRegister<IdType = u8>,
    {
        let mut raw_value = R::Array::new();
        let bytes = raw_value.as_mut();

        if bytes.len() == 1 {
            bytes[0] = self.read_single(R::id())?;
        } else {
            self.read_burst(R::id(), bytes)?;
        }

        R::from_bytes(raw_value).map_err(|_| Error::InvalidRegisterValue(R::id()))
    }

    /// Writes a value to a device register.
    ///
    /// One byte registers use single-write framing, wider ones a burst write.
    pub fn write_register<R>(&mut self, register: R) -> Result<(), Error<SpiE, PinE>>
    where
        R: WritableRegister<IdType = u8, Error = Infallible>,
    {
        let raw_value = register.to_bytes().unwrap_or_else(|never| match never {});
        let bytes = raw_value.as_ref();

        if bytes.len() == 1 {
            self.write_single(R::id(), bytes[0])
        } else {
            self.write_burst(R::id(), bytes)
        }
    }
}
