//! # Shared response mailbox
//!
//! The slot is the only state shared between the interrupt context feeding
//! [Ingress](crate::ingress::Ingress) and the foreground
//! [Client](crate::client::Client). It holds the last completed response
//! line and a one-shot completion flag, mirroring the half-duplex protocol:
//! the foreground resets the slot before sending a command and the listener
//! publishes at most one line per command cycle.
//!
//! The slot deliberately has a capacity of one. A new terminated line
//! arriving before the previous one was consumed silently overwrites it.
use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::String;

struct Slot<const N: usize> {
    /// Last completed response line
    line: String<N>,

    /// True if a line was published and not consumed yet
    signaled: bool,
}

/// Single-slot mailbox carrying complete response lines from the serial
/// interrupt context to the foreground client.
pub struct ResponseSlot<const N: usize> {
    state: Mutex<CriticalSectionRawMutex, RefCell<Slot<N>>>,
}

impl<const N: usize> ResponseSlot<N> {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(Slot {
                line: String::new(),
                signaled: false,
            })),
        }
    }

    /// Returns a copy of the last completed response line. May be empty or
    /// stale if the previous command timed out.
    pub fn last(&self) -> String<N> {
        self.state.lock(|state| state.borrow().line.clone())
    }

    /// Clears the line and the completion flag. Called by the client before
    /// each command, so a stale response is never misread as the new one.
    pub(crate) fn reset(&self) {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            state.line.clear();
            state.signaled = false;
        });
    }

    /// Consumes the completion flag. Returns false if no line was published
    /// since the last consume or reset.
    pub(crate) fn take_signal(&self) -> bool {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let signaled = state.signaled;
            state.signaled = false;
            signaled
        })
    }

    /// Overwrites the line and raises the completion flag. Lines longer than
    /// the slot capacity are truncated.
    pub(crate) fn publish(&self, line: &str) {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            state.line.clear();
            for character in line.chars() {
                if state.line.push(character).is_err() {
                    break;
                }
            }
            state.signaled = true;
        });
    }
}

impl<const N: usize> Default for ResponseSlot<N> {
    fn default() -> Self {
        Self::new()
    }
}
