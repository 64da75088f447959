//! Operational mode commands
//!
//! This module contains the strobes driving the main radio control state
//! machine:
//! - Chip reset
//! - IDLE, power down and crystal off
//! - Frequency synthesizer calibration and start-up
//! - Receive and transmit
//! - Wake-on-radio
//!
//! The resulting state can be followed in MARCSTATE. Transitions involving
//! calibration take several hundred microseconds.

use crate::{Command, NoParameters};

/// SRES command strobe (0x30)
///
/// Resets the chip. All registers return to their reset values.
///
/// # Important Notes
/// - Wait for SO to go low after the strobe before issuing anything else
/// - Prefer [`Device::reset`](crate::Device::reset), which also performs the
///   chip select sequence required after power-up
#[derive(Debug, Clone, Copy)]
pub struct Reset;

impl Command for Reset {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x30
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SFSTXON command strobe (0x31)
///
/// Enables and calibrates the frequency synthesizer (if MCSM0.FS_AUTOCAL=1).
/// In RX with CCA, goes to a wait state where only the synthesizer runs.
#[derive(Debug, Clone, Copy)]
pub struct EnableSynthesizer;

impl Command for EnableSynthesizer {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x31
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SXOFF command strobe (0x32)
///
/// Turns off the crystal oscillator once chip select is deasserted.
#[derive(Debug, Clone, Copy)]
pub struct CrystalOff;

impl Command for CrystalOff {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x32
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SCAL command strobe (0x33)
///
/// Calibrates the frequency synthesizer and turns it off.
///
/// # Important Notes
/// - Must be issued from IDLE
/// - Can be strobed without MCSM0.FS_AUTOCAL set for manual calibration
#[derive(Debug, Clone, Copy)]
pub struct Calibrate;

impl Command for Calibrate {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x33
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SRX command strobe (0x34)
///
/// Enables RX. Performs calibration first if coming from IDLE and
/// MCSM0.FS_AUTOCAL=1.
#[derive(Debug, Clone, Copy)]
pub struct EnableRx;

impl Command for EnableRx {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x34
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// STX command strobe (0x35)
///
/// Enables TX. In IDLE, performs calibration first if MCSM0.FS_AUTOCAL=1.
/// In RX with CCA enabled, only goes to TX if the channel is clear.
#[derive(Debug, Clone, Copy)]
pub struct EnableTx;

impl Command for EnableTx {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x35
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SIDLE command strobe (0x36)
///
/// Exits RX/TX, turns off the frequency synthesizer and exits wake-on-radio
/// mode if applicable.
#[derive(Debug, Clone, Copy)]
pub struct Idle;

impl Command for Idle {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x36
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SWOR command strobe (0x38)
///
/// Starts the automatic RX polling sequence (wake-on-radio) if
/// WORCTRL.RC_PD=0.
#[derive(Debug, Clone, Copy)]
pub struct WakeOnRadio;

impl Command for WakeOnRadio {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x38
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SPWD command strobe (0x39)
///
/// Enters power down mode when chip select is deasserted.
///
/// # Important Notes
/// - PATABLE content is lost in power down, except entry 0
/// - A [`Device::reset`](crate::Device::reset) is not needed to wake up,
///   asserting chip select is enough
#[derive(Debug, Clone, Copy)]
pub struct PowerDown;

impl Command for PowerDown {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x39
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SWORRST command strobe (0x3C)
#[derive(Debug, Clone, Copy)]
pub struct ResetWorTimer;

impl Command for ResetWorTimer {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x3C
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SNOP command strobe (0x3D)
///
/// No operation. Useful to read the chip status byte.
#[derive(Debug, Clone, Copy)]
pub struct Nop;

impl Command for Nop {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x3D
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}
