//! # Transport listener
//!
//! [Ingress] consumes the raw bytes the serial interrupt delivers and
//! detects response completion. The modem terminates every response with
//! CRLF, so a delivery whose final byte is a line feed completes the
//! currently buffered line; anything else is retained until the next
//! delivery. Completed lines are published to the shared
//! [ResponseSlot] and logged for diagnostics.
//!
//! The listener has no timeout notion. If a terminator never arrives, the
//! waiting client times out on its own deadline.
use crate::helpers::LossyStr;
use crate::response_slot::ResponseSlot;
use heapless::Vec;

/// Line terminator completing a response
const LINE_FEED: u8 = 10;

/// Accumulates serial deliveries into complete response lines.
///
/// BUF_SIZE: Capacity of the line accumulation buffer. Must hold the longest
/// expected response line including its CRLF terminator.
pub struct Ingress<'a, const BUF_SIZE: usize, const RES_SIZE: usize> {
    /// Line accumulation buffer, cleared once a terminator is seen
    buf: Vec<u8, BUF_SIZE>,

    /// Mailbox shared with the foreground client
    slot: &'a ResponseSlot<RES_SIZE>,
}

impl<'a, const BUF_SIZE: usize, const RES_SIZE: usize> Ingress<'a, BUF_SIZE, RES_SIZE> {
    pub fn new(slot: &'a ResponseSlot<RES_SIZE>) -> Self {
        Self { buf: Vec::new(), slot }
    }

    /// Ingests newly available bytes. Called from the platform's
    /// data-received interrupt or callback with all currently pending bytes.
    pub fn write(&mut self, data: &[u8]) {
        if self.buf.extend_from_slice(data).is_err() {
            error!("Ingress buffer overflow, dropping {} bytes", self.buf.len() + data.len());
            self.buf.clear();
            return;
        }

        trace!("Ingress buffered: {:?}", LossyStr(&self.buf));

        if self.buf.last() != Some(&LINE_FEED) {
            return;
        }

        match core::str::from_utf8(&self.buf) {
            Ok(line) => {
                debug!("Received response: {:?}", LossyStr(self.buf.as_slice()));
                self.slot.publish(line);
            }
            Err(_) => {
                warn!("Dropping non UTF-8 response: {:?}", LossyStr(&self.buf));
            }
        }

        self.buf.clear();
    }

    /// Current length of the accumulation buffer
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no partial line is buffered
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Capacity of the accumulation buffer
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}
