//! Driver error types

use crate::registers::MarcState;

/// Reason a caller-supplied value was rejected before touching the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidArgument {
    /// The modulation name or MDMCFG2.MOD_FORMAT value is not supported
    ModulationType,
    /// Sync mode selector outside 0..=7
    SyncMode(u8),
    /// No PA table preset exists for this output power (dBm)
    PowerLevel(i8),
    /// Frequency does not fit the 24-bit frequency word
    Frequency,
}

/// Errors returned by the CC1101 driver.
///
/// `SpiE` and `PinE` are the error types of the SPI bus and of the
/// chip-select / ready pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<SpiE, PinE> {
    /// SPI exchange failed. Chip select has been released.
    Spi(SpiE),
    /// Chip select could not be driven or the ready line could not be sampled
    Pin(PinE),
    /// SO/MISO stayed high for the whole ready poll budget
    ChipNotReady,
    /// Rejected before any register write
    InvalidArgument(InvalidArgument),
    /// Payload does not fit in the TX FIFO together with its length byte
    PayloadTooLarge {
        /// Requested payload length
        len: usize,
        /// Largest accepted payload length
        max: usize,
    },
    /// MARCSTATE never reached (or left) the expected state within the poll budget
    StateTransitionTimeout {
        /// State the driver was waiting for
        target: MarcState,
        /// Last state reported by the chip
        last: MarcState,
    },
    /// The TX FIFO underflowed during transmission. The FIFO has been flushed.
    TxUnderflow,
    /// A register value could not be decoded (register address)
    InvalidRegisterValue(u8),
}

impl<SpiE, PinE> From<InvalidArgument> for Error<SpiE, PinE> {
    fn from(e: InvalidArgument) -> Self {
        Error::InvalidArgument(e)
    }
}
