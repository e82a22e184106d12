//! AT command vocabulary of the SIM900 firmware. All commands are fixed
//! strings terminated with a carriage return; the parameterised ones are
//! assembled into stack buffers.
use crate::Error;
use core::fmt::Write;
use heapless::String;

/// Max. encoded length of a parameterised command
pub(crate) const COMMAND_SIZE: usize = 128;

/// Max. encoded length of an SMS body (160 GSM chars plus terminator)
pub(crate) const MESSAGE_SIZE: usize = 192;

/// Bare handshake probe sent until the modem answers after boot
pub(crate) const PROBE: &[u8] = b"AT\r";

/// Reset to factory defaults
pub(crate) const FACTORY_DEFAULTS: &[u8] = b"AT&F0\r";

/// Disable command echo
pub(crate) const ECHO_OFF: &[u8] = b"ATE0\r";

/// SMS text mode
pub(crate) const TEXT_MODE: &[u8] = b"AT+CMGF=1\r";

/// GSM character set
pub(crate) const GSM_CHARSET: &[u8] = b"AT+CSCS=\"GSM\"\r";

/// Force GPRS attach
pub(crate) const ATTACH_GPRS: &[u8] = b"AT+CGATT=1\r";

/// Single IP connection mode
pub(crate) const SINGLE_CONNECTION: &[u8] = b"AT+CIPMUX=0\r";

/// Normal (non-transparent) transfer mode
pub(crate) const NORMAL_TRANSFER_MODE: &[u8] = b"AT+CIPMODE=0\r";

/// Bring up the wireless connection (PDP context)
pub(crate) const BRING_UP_WIRELESS: &[u8] = b"AT+CIICR\r";

/// Query the local IP address; errors until the context is up
pub(crate) const QUERY_IP_ADDRESS: &[u8] = b"AT+CIFSR\r";

/// Query the connection state machine
pub(crate) const CONNECTION_STATUS: &[u8] = b"AT+CIPSTATUS\r";

/// Start a raw data transmission on the open connection
pub(crate) const START_TRANSMISSION: &[u8] = b"AT+CIPSEND\r";

/// Close the TCP connection
pub(crate) const CLOSE_CONNECTION: &[u8] = b"AT+CIPCLOSE\r";

/// Deactivate the PDP context entirely
pub(crate) const SHUT_CONTEXT: &[u8] = b"AT+CIPSHUT\r";

/// Query the IMEI
pub(crate) const QUERY_IMEI: &[u8] = b"AT+GSN\r";

/// Response markers the driver recognizes. Matching is substring presence
/// only.
pub(crate) mod marker {
    pub(crate) const OK: &str = "OK";
    pub(crate) const ERROR: &str = "ERROR";
    pub(crate) const CONNECT_OK: &str = "CONNECT OK";
    pub(crate) const ALREADY_CONNECT: &str = "ALREADY CONNECT";
    pub(crate) const IP_INITIAL: &str = "IP INITIAL";
    pub(crate) const IP_START: &str = "IP START";
}

fn format<const N: usize>(args: core::fmt::Arguments) -> Result<String<N>, Error> {
    let mut buffer = String::new();
    buffer.write_fmt(args).map_err(|_| Error::Overflow)?;
    Ok(buffer)
}

/// Task start command setting the access point name
pub(crate) fn apn_start(apn: &str) -> Result<String<COMMAND_SIZE>, Error> {
    format(format_args!("AT+CSTT=\"{}\"\r", apn))
}

/// TCP connect. The SIM900 expects the port quoted like the host.
pub(crate) fn tcp_connect(host: &str, port: u16) -> Result<String<COMMAND_SIZE>, Error> {
    format(format_args!("AT+CIPSTART=\"TCP\",\"{}\",\"{}\"\r", host, port))
}

/// Opens an SMS send session for the given number
pub(crate) fn sms_open(number: &str) -> Result<String<COMMAND_SIZE>, Error> {
    format(format_args!("AT+CMGS=\"{}\"\r", number))
}

/// SMS body followed by the carriage return preceding the end-of-data byte
pub(crate) fn sms_body(message: &str) -> Result<String<MESSAGE_SIZE>, Error> {
    format(format_args!("{}\r", message))
}

/// HTTP request line of the POST
pub(crate) fn http_request_line(path: &str) -> Result<String<COMMAND_SIZE>, Error> {
    format(format_args!("POST {} HTTP/1.1\r\n", path))
}

/// HTTP Host header
pub(crate) fn http_host(host: &str) -> Result<String<COMMAND_SIZE>, Error> {
    format(format_args!("Host: {}\r\n", host))
}

/// HTTP Content-Length header carrying the body byte length
pub(crate) fn http_content_length(length: usize) -> Result<String<COMMAND_SIZE>, Error> {
    format(format_args!("Content-Length: {}\r\n", length))
}

/// HTTP Content-Type header including the blank line ending the head
pub(crate) fn http_content_type(content_type: &str) -> Result<String<COMMAND_SIZE>, Error> {
    format(format_args!("Content-Type: {}\r\n\r\n", content_type))
}
