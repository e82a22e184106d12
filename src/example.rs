//! Mocks for doc examples
use crate::response_slot::ResponseSlot;
use fugit::{TimerDurationU32, TimerInstantU32};
use fugit_timer::Timer;

/// Serial mock answering every command positively
pub struct ExampleSerial<'a, const RES_SIZE: usize> {
    slot: &'a ResponseSlot<RES_SIZE>,
}

impl<'a, const RES_SIZE: usize> ExampleSerial<'a, RES_SIZE> {
    pub fn new(slot: &'a ResponseSlot<RES_SIZE>) -> Self {
        Self { slot }
    }
}

impl<const RES_SIZE: usize> embedded_io::ErrorType for ExampleSerial<'_, RES_SIZE> {
    type Error = core::convert::Infallible;
}

impl<const RES_SIZE: usize> embedded_io::Write for ExampleSerial<'_, RES_SIZE> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if buf.starts_with(b"AT+CIPSTART") {
            self.slot.publish("CONNECT OK\r\n");
        } else if buf == [0x1a].as_slice() {
            self.slot.publish("SEND OK\r\n");
        } else {
            self.slot.publish("\r\nOK\r\n");
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Timer mock expiring instantly
#[derive(Default)]
pub struct ExampleTimer {}

impl Timer<1_000_000> for ExampleTimer {
    type Error = u32;

    fn now(&mut self) -> TimerInstantU32<1000000> {
        unimplemented!()
    }

    fn start(&mut self, _duration: TimerDurationU32<1000000>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), Self::Error> {
        unimplemented!()
    }

    fn wait(&mut self) -> nb::Result<(), Self::Error> {
        nb::Result::Ok(())
    }
}

/// Power pin mock
#[derive(Default)]
pub struct ExamplePowerPin {}

impl embedded_hal::digital::ErrorType for ExamplePowerPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for ExamplePowerPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
