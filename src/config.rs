//! Driver configuration
//!
//! Timing and crystal parameters used by the [`Device`](crate::Device). These
//! do not touch the chip; radio settings are applied through the device
//! methods or a [`Preset`](crate::Preset).

/// Crystal frequency of the common CC1101 modules (26 MHz)
pub const DEFAULT_CRYSTAL_HZ: u32 = 26_000_000;

/// A bounded busy-wait: at most `attempts` polls, `interval_us` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollBudget {
    /// Maximum number of polls before giving up
    pub attempts: u32,
    /// Delay between two polls in microseconds
    pub interval_us: u32,
}

impl PollBudget {
    pub const fn new(attempts: u32, interval_us: u32) -> Self {
        Self {
            attempts,
            interval_us,
        }
    }
}

/// Configuration parameters of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Crystal frequency in Hz, used by the frequency word conversion
    pub crystal_hz: u32,
    /// Wait for SO/MISO to go low after asserting chip select
    pub ready_poll: PollBudget,
    /// Wait for a strobed mode transition (RX, TX, IDLE) to show in MARCSTATE
    pub mode_poll: PollBudget,
    /// Wait for a packet transmission to leave the TX states
    pub tx_poll: PollBudget,
    /// Time the chip needs after SRES before it accepts commands
    pub reset_settle_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crystal_hz: DEFAULT_CRYSTAL_HZ,
            ready_poll: PollBudget::new(1_000, 1),
            mode_poll: PollBudget::new(1_000, 10),
            // 64 bytes at 1.2 kBaud take ~450 ms on air
            tx_poll: PollBudget::new(2_000, 1_000),
            reset_settle_us: 1_000,
        }
    }
}

impl Config {
    pub fn set_crystal_hz(mut self, crystal_hz: u32) -> Self {
        debug_assert!(crystal_hz > 0);
        self.crystal_hz = crystal_hz;
        self
    }

    pub fn set_ready_poll(mut self, ready_poll: PollBudget) -> Self {
        self.ready_poll = ready_poll;
        self
    }

    pub fn set_mode_poll(mut self, mode_poll: PollBudget) -> Self {
        self.mode_poll = mode_poll;
        self
    }

    pub fn set_tx_poll(mut self, tx_poll: PollBudget) -> Self {
        self.tx_poll = tx_poll;
        self
    }

    pub fn set_reset_settle_us(mut self, reset_settle_us: u32) -> Self {
        self.reset_settle_us = reset_settle_us;
        self
    }
}
