//! Command strobe implementations
//!
//! Command strobes are single byte instructions in the 0x30-0x3D address
//! range. They carry no data phase: the chip acts on the header byte alone
//! and answers with its status byte.
//!
//! # Command Categories
//! - [`operational`]: state machine control
//!   - Reset, idle, power down and crystal off
//!   - Frequency synthesizer calibration
//!   - Enter RX / TX
//!   - Wake-on-radio control
//!
//! - [`fifo`]: FIFO maintenance
//!   - Flush the RX FIFO
//!   - Flush the TX FIFO
//!
//! # Important Notes
//! - SRX and STX only take effect from the IDLE state or from a mode that
//!   already has the synthesizer running
//! - SFRX and SFTX must only be issued in IDLE or in the matching
//!   overflow/underflow state
//! - SPWD and SXOFF take effect when chip select is deasserted

mod fifo;
mod operational;

pub use fifo::*;
pub use operational::*;
