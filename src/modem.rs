//! # GPRS modem operations
//!
//! Network attach, HTTP POST over a raw TCP connection, SMS send, IMEI
//! query and hard power cycling.
//!
//! Failures reported by the modem (a response containing "ERROR", or a TCP
//! connect that never confirms) are handled by alternating recovery: every
//! odd failure merely closes the socket, every even failure fully resets
//! the PDP context and reruns the attach sequence. A POST is retried after
//! each recovery up to the configured attempt budget.
//!
//! ## Example
//!
//! ````
//! # use sim900_gprs::client::Client;
//! # use sim900_gprs::config::Config;
//! # use sim900_gprs::example::{ExamplePowerPin, ExampleSerial, ExampleTimer};
//! # use sim900_gprs::modem::GprsModem;
//! # use sim900_gprs::response_slot::ResponseSlot;
//! #
//! let slot: ResponseSlot<256> = ResponseSlot::new();
//! let client: Client<_, _, 1_000_000, 256> =
//!     Client::new(ExampleSerial::new(&slot), &slot, ExampleTimer::default());
//!
//! let mut modem =
//!     GprsModem::new(client, ExamplePowerPin::default(), "internet", Config::new()).unwrap();
//!
//! // Boot handshake and network attach
//! modem.start().unwrap();
//!
//! // Best-effort telemetry uplink
//! modem
//!     .post("example.com", 80, "/telemetry", "application/json", b"{}")
//!     .unwrap();
//!
//! modem.sms("+15551234567", "hello").unwrap();
//! ````
use crate::client::Client;
use crate::commands::{self, marker};
use crate::config::Config;
use crate::Error;
use embedded_hal::digital::OutputPin;
use embedded_io::Write;
use fugit::TimerDurationU32;
use fugit_timer::Timer;
use heapless::String;

/// Max. APN length accepted by the SIM900
const APN_SIZE: usize = 32;

/// Result of a single POST attempt
#[derive(Copy, Clone, PartialEq, Eq)]
enum PostOutcome {
    /// Request was transmitted and the socket closed cleanly
    Sent,

    /// Modem-level failure, recover and retry
    Retry,
}

/// Central driver for a SIM900 class GPRS modem.
pub struct GprsModem<'a, W, T, P, const TIMER_HZ: u32, const RES_SIZE: usize>
where
    W: Write,
    T: Timer<TIMER_HZ>,
    P: OutputPin,
{
    /// Session engine
    pub(crate) client: Client<'a, W, T, TIMER_HZ, RES_SIZE>,

    /// Modem power control line
    pub(crate) power: P,

    /// Access point name of the carrier
    apn: String<APN_SIZE>,

    /// Timing and retry configuration
    config: Config,

    /// Consecutive failure count, alternating the recovery strategy.
    /// Reset to zero by a fully successful POST.
    failures: u32,
}

impl<'a, W, T, P, const TIMER_HZ: u32, const RES_SIZE: usize>
    GprsModem<'a, W, T, P, TIMER_HZ, RES_SIZE>
where
    W: Write,
    T: Timer<TIMER_HZ>,
    P: OutputPin,
{
    pub fn new(
        client: Client<'a, W, T, TIMER_HZ, RES_SIZE>,
        power: P,
        apn: &str,
        config: Config,
    ) -> Result<Self, Error> {
        let apn = String::try_from(apn).map_err(|_| Error::InvalidApnLength)?;

        Ok(Self {
            client,
            power,
            apn,
            config,
            failures: 0,
        })
    }

    /// Boot handshake and initial attach. Waits for the modem to boot, then
    /// probes with a bare "AT" every second until a response containing
    /// "OK" arrives, resets to factory defaults and runs [Self::initialize].
    pub fn start(&mut self) -> Result<(), Error> {
        self.client.delay(Self::millis(self.config.boot_delay_ms))?;

        while !self.client.last_result().contains(marker::OK) {
            self.client
                .delay(Self::millis(self.config.handshake_interval_ms))?;
            self.client.send(commands::PROBE)?;
        }

        self.client.send_no_wait(commands::FACTORY_DEFAULTS)?;
        self.initialize()
    }

    /// Idempotent attach sequence. Configures SMS and connection modes,
    /// sets the APN, brings up the PDP context and queries the IP status.
    /// If the status query errors, polls the connection state machine until
    /// the modem accepts the sequence: on "IP INITIAL" the APN start command
    /// is reissued, on "IP START" the bring-up command.
    ///
    /// The attach loop has no iteration cap. A modem that never attaches
    /// keeps this call busy until the process is externally restarted.
    pub fn initialize(&mut self) -> Result<(), Error> {
        self.client.send(commands::ECHO_OFF)?;
        self.client.send(commands::TEXT_MODE)?;
        self.client.send_no_wait(commands::GSM_CHARSET)?;
        self.client.send(commands::ATTACH_GPRS)?;
        self.client.send(commands::SINGLE_CONNECTION)?;
        self.client.send(commands::NORMAL_TRANSFER_MODE)?;

        let apn_start = commands::apn_start(&self.apn)?;
        self.client.send(apn_start.as_bytes())?;
        self.client.send(commands::BRING_UP_WIRELESS)?;
        self.client.send(commands::QUERY_IP_ADDRESS)?;

        while self.client.last_result().contains(marker::ERROR) {
            self.client.send(commands::CONNECTION_STATUS)?;
            let status = self.client.last_result();

            if status.contains(marker::IP_INITIAL) {
                self.client.send(apn_start.as_bytes())?;
            }

            if status.contains(marker::IP_START) {
                self.client.send(commands::BRING_UP_WIRELESS)?;
            }

            self.client.send(commands::QUERY_IP_ADDRESS)?;
        }

        Ok(())
    }

    /// Posts the body to `http://host:port/path` over a raw TCP connection.
    ///
    /// Every failed attempt runs one recovery pass ([Self::handle_failure])
    /// and retries with identical arguments, up to the configured attempt
    /// budget. Returns [Error::RetriesExhausted] once the budget is spent.
    /// A successful POST resets the failure counter to zero.
    pub fn post(
        &mut self,
        host: &str,
        port: u16,
        path: &str,
        content_type: &str,
        body: &[u8],
    ) -> Result<(), Error> {
        for attempt in 1..=self.config.post_attempts {
            if self.try_post(host, port, path, content_type, body)? == PostOutcome::Sent {
                self.failures = 0;
                return Ok(());
            }

            warn!("POST attempt {} to {}:{} failed", attempt, host, port);
            self.handle_failure()?;
        }

        Err(Error::RetriesExhausted)
    }

    /// Sends the SMS to the given number, submitting it with the
    /// end-of-data terminator
    pub fn sms(&mut self, number: &str, message: &str) -> Result<(), Error> {
        self.client.send(commands::TEXT_MODE)?;

        let open = commands::sms_open(number)?;
        self.client.send(open.as_bytes())?;

        let body = commands::sms_body(message)?;
        self.client.send_no_wait(body.as_bytes())?;

        self.client.end_of_data()
    }

    /// Queries the IMEI and returns the raw response line
    pub fn imei(&mut self) -> Result<String<RES_SIZE>, Error> {
        self.client.send(commands::QUERY_IMEI)?;
        Ok(self.client.last_result())
    }

    /// Pulses the power control line, hard power-cycling the module. Not
    /// response-gated.
    pub fn toggle_power(&mut self) -> Result<(), Error> {
        self.power.set_high().map_err(|_| Error::Power)?;
        self.client.delay(Self::millis(self.config.power_pulse_ms))?;
        self.power.set_low().map_err(|_| Error::Power)
    }

    /// Current consecutive failure count
    pub fn failure_count(&self) -> u32 {
        self.failures
    }

    /// Single POST attempt: connect, start transmission, write the framed
    /// request, submit and close.
    fn try_post(
        &mut self,
        host: &str,
        port: u16,
        path: &str,
        content_type: &str,
        body: &[u8],
    ) -> Result<PostOutcome, Error> {
        let connect = commands::tcp_connect(host, port)?;
        self.client.send(connect.as_bytes())?;

        let mut checks = 1;
        while !self.connection_open() && checks <= self.config.connect_checks {
            self.client
                .wait_event(Self::millis(self.config.connect_wait_ms))?;
            checks += 1;
        }

        if !self.connection_open() {
            warn!("Failed to open connection to {}:{}", host, port);
            return Ok(PostOutcome::Retry);
        }

        self.client.send(commands::CONNECTION_STATUS)?;
        self.client.delay(Self::millis(self.config.command_pause_ms))?;
        self.client.send(commands::START_TRANSMISSION)?;

        if self.client.last_result().contains(marker::ERROR) {
            return Ok(PostOutcome::Retry);
        }

        self.client
            .delay(Self::millis(self.config.transmission_pause_ms))?;

        self.client
            .send_no_wait(commands::http_request_line(path)?.as_bytes())?;
        self.client.send_no_wait(commands::http_host(host)?.as_bytes())?;
        self.client
            .send_no_wait(commands::http_content_length(body.len())?.as_bytes())?;
        self.client
            .send_no_wait(commands::http_content_type(content_type)?.as_bytes())?;
        self.client.send_no_wait(body)?;
        self.client.send_no_wait(b"\r")?;

        self.client.end_of_data()?;
        self.client
            .wait_event(Self::millis(self.config.confirmation_wait_ms))?;

        self.client.send(commands::CLOSE_CONNECTION)?;

        if self.client.last_result().contains(marker::ERROR) {
            return Ok(PostOutcome::Retry);
        }

        Ok(PostOutcome::Sent)
    }

    /// Recovery after a modem-level failure, alternating strictly by
    /// parity: odd failure counts close the socket only, even counts reset
    /// the PDP context and rerun the attach sequence. A full reset is
    /// expensive and often unnecessary, so it is only paid every other
    /// failure. Ends with a settle delay letting pending serial events
    /// drain before the next command.
    pub(crate) fn handle_failure(&mut self) -> Result<(), Error> {
        self.failures += 1;
        debug!("Handling failure {}", self.failures);

        if self.failures % 2 == 0 {
            self.client.send(commands::SHUT_CONTEXT)?;
            self.initialize()?;
        } else {
            self.client.send(commands::CLOSE_CONNECTION)?;
        }

        self.client.delay(Self::millis(self.config.settle_delay_ms))
    }

    /// Returns true if the last response confirmed the TCP connection
    fn connection_open(&self) -> bool {
        let result = self.client.last_result();
        result.contains(marker::CONNECT_OK) || result.contains(marker::ALREADY_CONNECT)
    }

    fn millis(value: u32) -> TimerDurationU32<TIMER_HZ> {
        TimerDurationU32::millis(value)
    }
}
