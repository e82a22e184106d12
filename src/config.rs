//! # Driver configuration
//!
//! All long fixed delays of the modem protocol are explicit configuration
//! instead of buried sleeps. Delays run through the injected timer, so a
//! timer implementation remains free to cancel them on shutdown.

/// Configuration of [GprsModem](crate::modem::GprsModem) timing and retry
/// behavior. The defaults match the SIM900 reference firmware.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Config {
    /// Boot time of the modem after power-on in ms
    pub(crate) boot_delay_ms: u32,

    /// Spacing of the bare "AT" handshake probes in ms
    pub(crate) handshake_interval_ms: u32,

    /// Pause between connection status query and transmission start in ms
    pub(crate) command_pause_ms: u32,

    /// Pause between transmission start and the first payload byte in ms
    pub(crate) transmission_pause_ms: u32,

    /// Settle time after failure recovery, letting pending serial events
    /// drain before the next command, in ms
    pub(crate) settle_delay_ms: u32,

    /// Width of the power-toggle pulse in ms
    pub(crate) power_pulse_ms: u32,

    /// Total checks of the TCP connect result before giving up the attempt
    pub(crate) connect_checks: u32,

    /// Wait per connect result check in ms
    pub(crate) connect_wait_ms: u32,

    /// Wait for the modem's send confirmation after the end-of-data
    /// terminator in ms
    pub(crate) confirmation_wait_ms: u32,

    /// Attempts for a single POST before reporting retries as exhausted
    pub(crate) post_attempts: u32,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            boot_delay_ms: 15_000,
            handshake_interval_ms: 1_000,
            command_pause_ms: 1_000,
            transmission_pause_ms: 500,
            settle_delay_ms: 1_000,
            power_pulse_ms: 2_500,
            connect_checks: 3,
            connect_wait_ms: 5_000,
            confirmation_wait_ms: 5_000,
            post_attempts: 10,
        }
    }

    pub const fn boot_delay_ms(mut self, ms: u32) -> Self {
        self.boot_delay_ms = ms;
        self
    }

    pub const fn handshake_interval_ms(mut self, ms: u32) -> Self {
        self.handshake_interval_ms = ms;
        self
    }

    pub const fn command_pause_ms(mut self, ms: u32) -> Self {
        self.command_pause_ms = ms;
        self
    }

    pub const fn transmission_pause_ms(mut self, ms: u32) -> Self {
        self.transmission_pause_ms = ms;
        self
    }

    pub const fn settle_delay_ms(mut self, ms: u32) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    pub const fn power_pulse_ms(mut self, ms: u32) -> Self {
        self.power_pulse_ms = ms;
        self
    }

    pub const fn connect_checks(mut self, checks: u32) -> Self {
        self.connect_checks = checks;
        self
    }

    pub const fn connect_wait_ms(mut self, ms: u32) -> Self {
        self.connect_wait_ms = ms;
        self
    }

    pub const fn confirmation_wait_ms(mut self, ms: u32) -> Self {
        self.confirmation_wait_ms = ms;
        self
    }

    pub const fn post_attempts(mut self, attempts: u32) -> Self {
        self.post_attempts = attempts;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
