use crate::ingress::Ingress;
use crate::response_slot::ResponseSlot;
use fugit::{TimerDurationU32, TimerInstantU32};
use fugit_timer::Timer as FugitTimer;
use mockall::mock;
use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

pub const TEST_RES_SIZE: usize = 256;
pub const TEST_BUF_SIZE: usize = 256;

pub type TestSlot = ResponseSlot<TEST_RES_SIZE>;

/// Serial mock feeding scripted modem replies through a real [Ingress].
///
/// Each `write()` call is recorded as one command and consumes one scripted
/// entry: either a raw reply delivery or silence. An empty script means
/// silence for all remaining writes.
pub struct MockSerial<'a> {
    /// Sent commands in write order
    commands: Vec<Vec<u8>>,

    /// Scripted reply per write, delivered in insertion order
    replies: VecDeque<Option<&'static [u8]>>,

    /// Transport listener fed by the scripted replies
    ingress: Ingress<'a, TEST_BUF_SIZE, TEST_RES_SIZE>,

    /// flush() call count
    flush_count: usize,
}

impl<'a> MockSerial<'a> {
    pub fn new(slot: &'a TestSlot) -> Self {
        Self {
            commands: Vec::new(),
            replies: VecDeque::new(),
            ingress: Ingress::new(slot),
            flush_count: 0,
        }
    }

    /// Scripts a raw reply delivery for the next unscripted write
    pub fn reply(&mut self, reply: &'static [u8]) {
        self.replies.push_back(Some(reply));
    }

    /// Scripts silence for the next unscripted write
    pub fn no_reply(&mut self) {
        self.replies.push_back(None);
    }

    /// Returns a copy of the sent commands
    pub fn commands_as_strings(&self) -> Vec<String> {
        self.commands
            .iter()
            .map(|command| String::from_utf8(command.clone()).unwrap())
            .collect()
    }

    /// Returns the sent commands in the given index range concatenated to
    /// one byte vector
    pub fn sent_bytes(&self, range: core::ops::Range<usize>) -> Vec<u8> {
        self.commands[range].concat()
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count
    }
}

impl embedded_io::ErrorType for MockSerial<'_> {
    type Error = core::convert::Infallible;
}

impl embedded_io::Write for MockSerial<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.commands.push(buf.to_vec());

        if let Some(Some(reply)) = self.replies.pop_front() {
            self.ingress.write(reply);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flush_count += 1;
        Ok(())
    }
}

mock! {
    pub Timer{}

    impl FugitTimer<1_000_000> for Timer {
        type Error = u32;

        fn now(&mut self) -> TimerInstantU32<1000000>;
        fn start(&mut self, duration: TimerDurationU32<1000000>) -> Result<(), u32>;
        fn cancel(&mut self) -> Result<(), u32>;
        fn wait(&mut self) -> nb::Result<(), u32>;
    }
}

impl MockTimer {
    /// Timer expiring instantly: every wait acts as an elapsed timeout and
    /// every delay returns immediately
    pub fn expired() -> Self {
        let mut timer = MockTimer::new();
        timer.expect_start().returning(|_| Ok(()));
        timer.expect_wait().returning(|| Ok(()));
        timer
    }

    /// Short hand helper for returning a milliseconds duration
    pub fn duration_ms(duration: u32) -> TimerDurationU32<1_000_000> {
        TimerDurationU32::millis(duration)
    }
}

/// Power pin mock recording the driven levels
#[derive(Default)]
pub struct MockPowerPin {
    /// Levels in write order, true = high
    pub levels: Vec<bool>,
}

impl embedded_hal::digital::ErrorType for MockPowerPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPowerPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}
