use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use crate::error::SettingsError;

/// Modbus unit identifier (slave id), a type-safe wrapper around `u8`
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId {
    /// underlying raw value
    pub value: u8,
}

impl UnitId {
    pub const fn new(value: u8) -> Self {
        UnitId { value }
    }

    /// unit id 0 addresses every device on a serial bus
    pub const fn is_broadcast(self) -> bool {
        self.value == 0
    }
}

impl Display for UnitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{:#04X}", self.value)
    }
}

/// The connection mode of a link
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Modbus TCP: MBAP header over a TCP stream
    Tcp,
    /// Modbus RTU: binary frames with CRC-16 over a serial line
    Rtu,
    /// Modbus ASCII: hex-encoded frames with LRC over a serial line
    Ascii,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Tcp => "TCP",
            Mode::Rtu => "RTU",
            Mode::Ascii => "ASCII",
        }
    }

    pub const fn is_serial(self) -> bool {
        matches!(self, Mode::Rtu | Mode::Ascii)
    }
}

impl FromStr for Mode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TCP" => Ok(Mode::Tcp),
            "RTU" => Ok(Mode::Rtu),
            "ASCII" => Ok(Mode::Ascii),
            _ => Err(SettingsError::InvalidMode),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(self.as_str())
    }
}

/// Everything required to open one physical link.
///
/// Links are identified by their endpoint string: the `host:port` of the
/// device for [`Mode::Tcp`], or the path of the serial device for the serial
/// modes. The baud rate is meaningful only for serial modes. The timeout is
/// the per-operation response timeout applied on the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionSettings {
    pub mode: Mode,
    pub endpoint: String,
    pub baud_rate: u32,
    pub timeout: Duration,
}

impl ConnectionSettings {
    /// settings for a Modbus TCP link to `host:port`
    pub fn tcp(endpoint: impl Into<String>, timeout: Duration) -> Self {
        ConnectionSettings {
            mode: Mode::Tcp,
            endpoint: endpoint.into(),
            baud_rate: 0,
            timeout,
        }
    }

    /// settings for a Modbus RTU link on a serial device
    pub fn rtu(device: impl Into<String>, baud_rate: u32, timeout: Duration) -> Self {
        ConnectionSettings {
            mode: Mode::Rtu,
            endpoint: device.into(),
            baud_rate,
            timeout,
        }
    }

    /// settings for a Modbus ASCII link on a serial device
    pub fn ascii(device: impl Into<String>, baud_rate: u32, timeout: Duration) -> Self {
        ConnectionSettings {
            mode: Mode::Ascii,
            endpoint: device.into(),
            baud_rate,
            timeout,
        }
    }

    /// check the invariants that must hold before a link can be opened
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.endpoint.is_empty() {
            return Err(SettingsError::EmptyEndpoint);
        }
        match self.mode {
            Mode::Tcp => {
                let port = self.endpoint.rsplit(':').next();
                match port {
                    Some(p) if !self.endpoint.starts_with(':') && p.parse::<u16>().is_ok() => {}
                    _ => return Err(SettingsError::MissingPort),
                }
            }
            Mode::Rtu | Mode::Ascii => {
                if self.baud_rate == 0 {
                    return Err(SettingsError::InvalidBaudRate);
                }
            }
        }
        if self.timeout.is_zero() {
            return Err(SettingsError::ZeroTimeout);
        }
        Ok(())
    }
}
