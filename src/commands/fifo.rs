//! FIFO commands

use crate::{Command, NoParameters};

/// SFRX command strobe (0x3A)
///
/// Flushes the RX FIFO buffer.
///
/// # Important Notes
/// - Only issue in IDLE or RXFIFO_OVERFLOW
/// - Leaves RXFIFO_OVERFLOW for IDLE
#[derive(Debug, Clone, Copy)]
pub struct FlushRx;

impl Command for FlushRx {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x3A
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SFTX command strobe (0x3B)
///
/// Flushes the TX FIFO buffer.
///
/// # Important Notes
/// - Only issue in IDLE or TXFIFO_UNDERFLOW
/// - Leaves TXFIFO_UNDERFLOW for IDLE
#[derive(Debug, Clone, Copy)]
pub struct FlushTx;

impl Command for FlushTx {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x3B
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}
