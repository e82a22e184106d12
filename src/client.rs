//! # Session engine
//!
//! [Client] owns the single outstanding-command slot of the half-duplex
//! protocol: it writes command bytes to the serial transport, then blocks
//! the calling thread until the transport listener signals a completed
//! response line or the timeout elapses. Timeouts are not errors; callers
//! inspect [Client::last_result] afterwards.
//!
//! Single-flight is enforced structurally: every send takes `&mut self` and
//! runs to completion before returning, so no second command can be issued
//! while one is in flight.
use crate::helpers::LossyStr;
use crate::response_slot::ResponseSlot;
use crate::Error;
use embedded_io::Write;
use fugit::TimerDurationU32;
use fugit_timer::Timer;
use heapless::String;

/// Control byte ending a CIPSEND data block or SMS body
const END_OF_DATA: u8 = 0x1a;

/// Default wait for a command response in ms
const DEFAULT_RESPONSE_TIMEOUT_MS: u32 = 1_000;

/// Blocking AT command client.
///
/// RES_SIZE: Capacity of the response slot, must match the slot this client
/// was created with.
pub struct Client<'a, W: Write, T: Timer<TIMER_HZ>, const TIMER_HZ: u32, const RES_SIZE: usize> {
    /// Serial writer
    pub(crate) writer: W,

    /// Mailbox filled by the transport listener
    slot: &'a ResponseSlot<RES_SIZE>,

    /// Timer used for timeout measurement and fixed delays
    timer: T,

    /// Wait applied by [Client::send]
    response_timeout: TimerDurationU32<TIMER_HZ>,
}

impl<'a, W: Write, T: Timer<TIMER_HZ>, const TIMER_HZ: u32, const RES_SIZE: usize>
    Client<'a, W, T, TIMER_HZ, RES_SIZE>
{
    pub fn new(writer: W, slot: &'a ResponseSlot<RES_SIZE>, timer: T) -> Self {
        Self {
            writer,
            slot,
            timer,
            response_timeout: TimerDurationU32::millis(DEFAULT_RESPONSE_TIMEOUT_MS),
        }
    }

    /// Sets the wait applied by [Client::send] in ms
    pub fn set_response_timeout_ms(&mut self, timeout: u32) {
        self.response_timeout = TimerDurationU32::millis(timeout);
    }

    /// Sends a command and waits up to the default response timeout
    pub fn send(&mut self, command: &[u8]) -> Result<(), Error> {
        let timeout = self.response_timeout;
        self.send_timeout(command, timeout)
    }

    /// Sends a command and waits up to the given timeout for a completed
    /// response. Returns without error if no response arrived in time.
    pub fn send_timeout(
        &mut self,
        command: &[u8],
        timeout: TimerDurationU32<TIMER_HZ>,
    ) -> Result<(), Error> {
        self.transmit(command)?;
        self.wait_event(timeout)?;
        Ok(())
    }

    /// Sends a command and returns immediately without inspecting the
    /// transport for a reply
    pub fn send_no_wait(&mut self, command: &[u8]) -> Result<(), Error> {
        self.transmit(command)
    }

    /// Blocks until the completion signal fires or the timeout elapses,
    /// consuming the signal. Returns false on timeout.
    pub fn wait_event(&mut self, timeout: TimerDurationU32<TIMER_HZ>) -> Result<bool, Error> {
        self.timer.start(timeout).map_err(|_| Error::Timer)?;

        loop {
            if self.slot.take_signal() {
                return Ok(true);
            }

            match self.timer.wait() {
                Ok(()) => return Ok(false),
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(_)) => return Err(Error::Timer),
            }
        }
    }

    /// Copy of the last completed response line. Empty or stale if the
    /// preceding command timed out.
    pub fn last_result(&self) -> String<RES_SIZE> {
        self.slot.last()
    }

    /// Sends the 0x1a end-of-data byte submitting a CIPSEND block or SMS
    /// body, waits up to the default timeout and logs the reply.
    pub fn end_of_data(&mut self) -> Result<(), Error> {
        self.transmit(&[END_OF_DATA])?;
        let timeout = self.response_timeout;
        self.wait_event(timeout)?;

        let reply = self.last_result();
        debug!("End of data reply: {:?}", LossyStr(reply.as_bytes()));
        Ok(())
    }

    /// Runs the timer to expiry. All fixed pauses of the modem protocol go
    /// through here, so a timer implementation may cancel them on shutdown.
    pub fn delay(&mut self, duration: TimerDurationU32<TIMER_HZ>) -> Result<(), Error> {
        self.timer.start(duration).map_err(|_| Error::Timer)?;
        nb::block!(self.timer.wait()).map_err(|_| Error::Timer)
    }

    /// Resets the slot and writes the command bytes. The reset-before-send
    /// order is what keeps a stale response from being misread as the reply
    /// to this command.
    fn transmit(&mut self, command: &[u8]) -> Result<(), Error> {
        self.slot.reset();

        debug!("Sending command: {:?}", LossyStr(command));

        self.writer.write_all(command).map_err(|_| Error::Write)?;
        self.writer.flush().map_err(|_| Error::Write)?;
        Ok(())
    }
}
