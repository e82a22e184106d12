//! # SIM900 GPRS driver
//!
//! Half-duplex AT command/response session manager for SIM900 class GPRS
//! modems behind an asynchronous, line-oriented serial channel. Provides
//! network attach, TCP based HTTP POST, SMS send, IMEI query and hard power
//! cycling on top of a small marker-matching protocol engine.
//!
//! The platform pieces are injected:
//! * a serial writer implementing [embedded_io::Write], opened by the caller
//!   at 19200 baud, 8N1, RTS/CTS flow control
//! * a [fugit_timer::Timer] used for response timeouts and fixed delays
//! * an [embedded_hal::digital::OutputPin] driving the modem power line
//! * an interrupt or callback context feeding received bytes into
//!   [ingress::Ingress]
//!
//! Received bytes are accumulated until a line feed is seen, then published
//! to a single-slot mailbox ([response_slot::ResponseSlot]) shared with the
//! foreground [client::Client]. Responses are matched by substring markers
//! ("OK", "ERROR", "CONNECT OK", ...) only; no response grammar is parsed.
#![cfg_attr(not(test), no_std)]
#![cfg_attr(feature = "strict", deny(warnings))]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($($arg)*);
    }};
}

macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($($arg)*);
    }};
}

pub(crate) mod commands;
pub(crate) mod helpers;

pub mod client;
pub mod config;
pub mod ingress;
pub mod modem;
pub mod response_slot;

#[cfg(feature = "examples")]
pub mod example;

#[cfg(test)]
mod tests;

/// Driver errors. Response timeouts are not errors: a command that received
/// no terminated response within its deadline simply leaves the last result
/// empty or stale.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Writing to the serial transport failed
    Write,

    /// Upstream timer error
    Timer,

    /// Driving the power control line failed
    Power,

    /// A command or message does not fit its transmission buffer
    Overflow,

    /// Given APN is longer than the max. size of 32 chars
    InvalidApnLength,

    /// All POST attempts failed
    RetriesExhausted,
}
