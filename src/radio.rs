//! Radio control
//!
//! Mode transitions, packet transmission and reception through the FIFOs,
//! output power and the read-only status registers.
//!
//! Every wait on MARCSTATE is a bounded poll: the state is read, and when it
//! does not match yet the driver sleeps for the budget's interval and reads
//! again. An exhausted budget is reported as
//! [`Error::StateTransitionTimeout`] with the last state seen.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::commands::{Calibrate, EnableRx, EnableTx, FlushRx, FlushTx, Idle};
use crate::config::PollBudget;
use crate::device::Device;
use crate::error::Error;
use crate::registers::{
    ChipVersion, FrontEndTx, Lqi, MarcState, PaTable, PacketStatus, PartNumber, PowerLevel, Rssi,
    RxBytes, StatusRegister, TxBytes, FIFO, FIFO_SIZE,
};

/// Bytes drained from the RX FIFO by [`Device::receive_packet`]
pub type Packet = heapless::Vec<u8, FIFO_SIZE>;

/// Largest payload accepted by [`Device::send_packet`]. The TX FIFO also
/// holds the length byte.
pub const MAX_PAYLOAD_LEN: usize = FIFO_SIZE - 1;

/// Chip identification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PartInfo {
    /// PARTNUM, 0x00 for the CC1101
    pub part_number: u8,
    /// VERSION
    pub version: u8,
}

impl<SPI, CS, READY, D, SpiE, PinE> Device<SPI, CS, READY, D>
where
    SPI: SpiBus<u8, Error = SpiE>,
    CS: OutputPin<Error = PinE>,
    READY: InputPin<Error = PinE>,
    D: DelayNs,
{
    /// Current main radio control state
    pub fn marc_state(&mut self) -> Result<MarcState, Error<SpiE, PinE>> {
        self.read_register()
    }

    fn wait_for_state(
        &mut self,
        budget: PollBudget,
        target: MarcState,
    ) -> Result<(), Error<SpiE, PinE>> {
        let mut last = MarcState::Unknown(0xFF);

        for _ in 0..budget.attempts {
            last = self.marc_state()?;
            if last == target {
                return Ok(());
            }
            self.delay.delay_us(budget.interval_us);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("timeout waiting for {}, last state {}", target, last);

        Err(Error::StateTransitionTimeout { target, last })
    }

    /// Strobes SRX and waits for MARCSTATE to report RX.
    ///
    /// # Errors
    /// * `Error::StateTransitionTimeout` - RX was not reached within `Config::mode_poll`
    pub fn enter_receive(&mut self) -> Result<(), Error<SpiE, PinE>> {
        self.strobe(EnableRx)?;
        self.wait_for_state(self.config.mode_poll, MarcState::Rx)
    }

    /// Strobes STX and waits for MARCSTATE to report TX.
    ///
    /// # Errors
    /// * `Error::StateTransitionTimeout` - TX was not reached within `Config::mode_poll`
    pub fn enter_transmit(&mut self) -> Result<(), Error<SpiE, PinE>> {
        self.strobe(EnableTx)?;
        self.wait_for_state(self.config.mode_poll, MarcState::Tx)
    }

    /// Strobes SIDLE and waits for MARCSTATE to report IDLE.
    pub fn enter_idle(&mut self) -> Result<(), Error<SpiE, PinE>> {
        self.strobe(Idle)?;
        self.wait_for_state(self.config.mode_poll, MarcState::Idle)
    }

    /// Calibrates the frequency synthesizer.
    ///
    /// Must be issued from IDLE. The chip returns to IDLE once calibration
    /// is done, which this waits for.
    pub fn calibrate(&mut self) -> Result<(), Error<SpiE, PinE>> {
        self.strobe(Calibrate)?;
        self.wait_for_state(self.config.mode_poll, MarcState::Idle)
    }

    /// Transmits one variable length packet.
    ///
    /// The radio is put in IDLE and the TX FIFO flushed, then the length byte
    /// and the payload are written to the TX FIFO in one burst and STX is
    /// strobed. Returns once MARCSTATE has left TX and TX_END.
    ///
    /// # Errors
    /// * `Error::PayloadTooLarge` - More than [`MAX_PAYLOAD_LEN`] bytes. Nothing is sent on the bus.
    /// * `Error::TxUnderflow` - The TX FIFO underflowed. It has been flushed.
    /// * `Error::StateTransitionTimeout` - Still transmitting after `Config::tx_poll`
    pub fn send_packet(&mut self, payload: &[u8]) -> Result<(), Error<SpiE, PinE>> {
        let len = payload.len();
        if len > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadTooLarge {
                len,
                max: MAX_PAYLOAD_LEN,
            });
        }

        let mut frame = [0u8; FIFO_SIZE];
        frame[0] = len as u8;
        frame[1..=len].copy_from_slice(payload);

        self.strobe(Idle)?;
        self.strobe(FlushTx)?;
        self.write_burst(FIFO, &frame[..=len])?;
        self.strobe(EnableTx)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("sending {} byte packet", len);

        let budget = self.config.tx_poll;
        let mut last = MarcState::Tx;

        for _ in 0..budget.attempts {
            last = self.marc_state()?;
            match last {
                MarcState::TxFifoUnderflow => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("TX FIFO underflow");

                    self.strobe(FlushTx)?;
                    return Err(Error::TxUnderflow);
                }
                state if !state.is_transmitting() => return Ok(()),
                _ => self.delay.delay_us(budget.interval_us),
            }
        }

        Err(Error::StateTransitionTimeout {
            target: MarcState::Idle,
            last,
        })
    }

    /// Drains whatever the RX FIFO holds.
    ///
    /// Returns `None` when the FIFO is empty. After an RX FIFO overflow the
    /// FIFO is flushed, RX is re-entered and `None` is returned.
    ///
    /// With variable length packets and status appending the returned bytes
    /// are the length byte, the payload, RSSI and LQI/CRC_OK.
    pub fn receive_packet(&mut self) -> Result<Option<Packet>, Error<SpiE, PinE>> {
        if self.marc_state()? == MarcState::RxFifoOverflow {
            #[cfg(feature = "defmt")]
            defmt::warn!("RX FIFO overflow, flushing");

            self.strobe(FlushRx)?;
            self.strobe(EnableRx)?;
            return Ok(None);
        }

        let available: RxBytes = self.read_register()?;
        let count = usize::from(available.count).min(FIFO_SIZE);
        if count == 0 {
            return Ok(None);
        }

        let mut packet: Packet = core::iter::repeat(0).take(count).collect();
        self.read_burst(FIFO, &mut packet)?;

        Ok(Some(packet))
    }

    /// Loads `level` into PA table entry 0, zeroes the other entries and
    /// points FREND0 at entry 0.
    pub fn set_tx_power(&mut self, level: u8) -> Result<(), Error<SpiE, PinE>> {
        self.write_register(PaTable::single(level))?;
        self.write_register(FrontEndTx::PA_INDEX_0)
    }

    /// Sets the output power from one of the 433 MHz PA table presets
    /// (10, 7, 5, 0, -10 or -30 dBm).
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - No preset for `dbm`, nothing is written
    pub fn set_tx_power_dbm(&mut self, dbm: i8) -> Result<(), Error<SpiE, PinE>> {
        let level = PowerLevel::from_dbm(dbm)?;
        self.set_tx_power(level.pa_setting())
    }

    pub fn rssi_dbm(&mut self) -> Result<i16, Error<SpiE, PinE>> {
        let rssi: Rssi = self.read_register()?;
        Ok(rssi.dbm())
    }

    pub fn lqi(&mut self) -> Result<Lqi, Error<SpiE, PinE>> {
        self.read_register()
    }

    pub fn packet_status(&mut self) -> Result<PacketStatus, Error<SpiE, PinE>> {
        let raw = self.read_status(StatusRegister::Pktstatus)?;
        Ok(PacketStatus::from_bits_retain(raw))
    }

    pub fn tx_fifo_bytes(&mut self) -> Result<TxBytes, Error<SpiE, PinE>> {
        self.read_register()
    }

    pub fn part_info(&mut self) -> Result<PartInfo, Error<SpiE, PinE>> {
        let part_number: PartNumber = self.read_register()?;
        let version: ChipVersion = self.read_register()?;

        Ok(PartInfo {
            part_number: part_number.value,
            version: version.value,
        })
    }

    /// A VERSION of 0x00 or 0xFF means the bus is floating or stuck.
    pub fn is_connected(&mut self) -> Result<bool, Error<SpiE, PinE>> {
        let version: ChipVersion = self.read_register()?;
        Ok(!matches!(version.value, 0x00 | 0xFF))
    }
}
