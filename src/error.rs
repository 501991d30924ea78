use std::fmt::{Display, Formatter};

use crate::exception::ExceptionCode;
use crate::function::FunctionCode;

/// Top-level error type for all fallible operations in the library
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// the connection settings failed validation
    BadSettings(SettingsError),
    /// the endpoint is already in use with different connection settings
    SettingsMismatch,
    /// the process already committed to the other of managed/unmanaged client usage
    ModeConflict,
    /// the request failed validation
    BadRequest(InvalidRequest),
    /// the handle has been closed and can no longer send
    HandleClosed,
    /// close was called on a handle that was already closed
    HandleAlreadyClosed,
    /// an I/O error occurred on the underlying transport
    Io(std::io::ErrorKind),
    /// no response was received within the configured timeout
    ResponseTimeout,
    /// the response frame violated the transport framing rules
    BadFrame(FrameError),
    /// the response ADU failed validation against the request
    BadResponse(AduParseError),
    /// the device responded with a Modbus exception
    Exception(ExceptionCode),
    /// the tasks serving the link have shut down
    Shutdown,
}

impl std::error::Error for RequestError {}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            RequestError::BadSettings(err) => write!(f, "invalid connection settings: {err}"),
            RequestError::SettingsMismatch => f.write_str(
                "endpoint is already in use with different connection settings",
            ),
            RequestError::ModeConflict => f.write_str(
                "managed and unmanaged clients cannot be mixed within one process",
            ),
            RequestError::BadRequest(err) => write!(f, "invalid request: {err}"),
            RequestError::HandleClosed => f.write_str("handle has been closed"),
            RequestError::HandleAlreadyClosed => f.write_str("handle was already closed"),
            RequestError::Io(kind) => write!(f, "I/O error: {kind}"),
            RequestError::ResponseTimeout => {
                f.write_str("no response received within the configured timeout")
            }
            RequestError::BadFrame(err) => write!(f, "bad frame: {err}"),
            RequestError::BadResponse(err) => write!(f, "bad response: {err}"),
            RequestError::Exception(code) => write!(f, "Modbus exception: {code}"),
            RequestError::Shutdown => f.write_str("link has shut down"),
        }
    }
}

impl From<SettingsError> for RequestError {
    fn from(err: SettingsError) -> Self {
        RequestError::BadSettings(err)
    }
}

impl From<InvalidRequest> for RequestError {
    fn from(err: InvalidRequest) -> Self {
        RequestError::BadRequest(err)
    }
}

impl From<FrameError> for RequestError {
    fn from(err: FrameError) -> Self {
        RequestError::BadFrame(err)
    }
}

impl From<AduParseError> for RequestError {
    fn from(err: AduParseError) -> Self {
        RequestError::BadResponse(err)
    }
}

impl From<ExceptionCode> for RequestError {
    fn from(code: ExceptionCode) -> Self {
        RequestError::Exception(code)
    }
}

impl From<std::io::Error> for RequestError {
    fn from(err: std::io::Error) -> Self {
        RequestError::Io(err.kind())
    }
}

impl From<tokio::time::error::Elapsed> for RequestError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        RequestError::ResponseTimeout
    }
}

/// Errors that occur while validating [`crate::types::ConnectionSettings`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// the mode string did not name a supported connection mode
    InvalidMode,
    /// the endpoint string is empty
    EmptyEndpoint,
    /// a TCP endpoint did not have the `host:port` form
    MissingPort,
    /// a serial mode requires a non-zero baud rate
    InvalidBaudRate,
    /// the response timeout must be non-zero
    ZeroTimeout,
}

impl std::error::Error for SettingsError {}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            SettingsError::InvalidMode => f.write_str("mode must be one of TCP, RTU, ASCII"),
            SettingsError::EmptyEndpoint => f.write_str("endpoint must not be empty"),
            SettingsError::MissingPort => {
                f.write_str("TCP endpoints must have the form host:port")
            }
            SettingsError::InvalidBaudRate => {
                f.write_str("serial modes require a non-zero baud rate")
            }
            SettingsError::ZeroTimeout => f.write_str("response timeout must be non-zero"),
        }
    }
}

/// Errors that result from a malformed request
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidRequest {
    /// the raw value does not name a supported function code
    UnknownFunction(u8),
    /// the function is not one of the read functions
    NotARead(FunctionCode),
    /// the function is not one of the single-write functions
    NotASingleWrite(FunctionCode),
    /// the function is not one of the multiple-write functions
    NotAMultipleWrite(FunctionCode),
    /// the request contains a quantity of zero
    CountOfZero,
    /// the quantity exceeds the maximum allowed for the function
    CountTooBig { count: u16, max: u16 },
    /// address + quantity exceeds the addressable range for the function
    AddressOverflow { address: u16, count: u16, max: u16 },
    /// the values sequence has the wrong length for the function and quantity
    WrongValueCount { expected: usize, actual: usize },
    /// slave id 0 (broadcast) is not supported on serial links
    BroadcastNotSupported,
}

impl std::error::Error for InvalidRequest {}

impl Display for InvalidRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            InvalidRequest::UnknownFunction(value) => {
                write!(f, "unsupported function code: {value:#04X}")
            }
            InvalidRequest::NotARead(function) => {
                write!(f, "{function} is not a read function")
            }
            InvalidRequest::NotASingleWrite(function) => {
                write!(f, "{function} is not a single-write function")
            }
            InvalidRequest::NotAMultipleWrite(function) => {
                write!(f, "{function} is not a multiple-write function")
            }
            InvalidRequest::CountOfZero => f.write_str("request contains a quantity of zero"),
            InvalidRequest::CountTooBig { count, max } => write!(
                f,
                "quantity of {count} exceeds the maximum of {max} for this function"
            ),
            InvalidRequest::AddressOverflow {
                address,
                count,
                max,
            } => write!(
                f,
                "address {address} + quantity {count} exceeds the limit of {max}"
            ),
            InvalidRequest::WrongValueCount { expected, actual } => write!(
                f,
                "request requires {expected} value(s) but {actual} were supplied"
            ),
            InvalidRequest::BroadcastNotSupported => {
                f.write_str("slave id 0 is not supported on serial links")
            }
        }
    }
}

/// Errors that occur while stripping the transport framing off a response
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// the response did not carry the expected frame delimiters
    BadFraming,
    /// the CRC or LRC did not match the frame contents
    BadChecksum,
    /// the transaction id in a TCP response did not match the request
    TxIdMismatch { expected: u16, received: u16 },
}

impl std::error::Error for FrameError {}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            FrameError::BadFraming => f.write_str("response framing is invalid"),
            FrameError::BadChecksum => f.write_str("response checksum is invalid"),
            FrameError::TxIdMismatch { expected, received } => write!(
                f,
                "expected transaction id {expected:#06X} but received {received:#06X}"
            ),
        }
    }
}

/// Errors that occur while validating a response ADU against its request
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AduParseError {
    /// the response contains no bytes
    EmptyResponse,
    /// the slave id in the response does not match the request
    SlaveIdMismatch { expected: u8, received: u8 },
    /// the echoed write data does not match the request
    WriteDataMismatch,
    /// the response byte-count field does not match the requested quantity
    BadResponseLength { expected: usize, received: usize },
    /// the response payload length does not match its byte-count field
    ResponseLengthMismatch { expected: usize, received: usize },
    /// the response carries a function code matching neither the request nor its error form
    UnknownFunction(u8),
}

impl std::error::Error for AduParseError {}

impl Display for AduParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            AduParseError::EmptyResponse => f.write_str("response is empty"),
            AduParseError::SlaveIdMismatch { expected, received } => write!(
                f,
                "expected response from slave {expected} but received one from {received}"
            ),
            AduParseError::WriteDataMismatch => {
                f.write_str("echoed write data does not match the request")
            }
            AduParseError::BadResponseLength { expected, received } => write!(
                f,
                "expected byte count of {expected} but response declares {received}"
            ),
            AduParseError::ResponseLengthMismatch { expected, received } => write!(
                f,
                "response declares {expected} payload byte(s) but carries {received}"
            ),
            AduParseError::UnknownFunction(value) => write!(
                f,
                "response function code {value:#04X} matches neither the request nor its error form"
            ),
        }
    }
}
