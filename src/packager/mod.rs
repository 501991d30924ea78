pub(crate) mod ascii;
pub(crate) mod rtu;
pub(crate) mod tcp;

use std::time::Duration;

use crate::common::phys::PhysLayer;
use crate::error::RequestError;
use crate::request::Request;
use crate::types::{ConnectionSettings, Mode};

/// Owns a connected transport and performs one request/response exchange at a
/// time with the mode-specific framing applied.
pub(crate) struct Packager {
    framing: Framing,
    phys: PhysLayer,
    timeout: Duration,
}

enum Framing {
    Tcp(tcp::TcpFraming),
    Rtu(rtu::RtuFraming),
    Ascii(ascii::AsciiFraming),
}

impl Packager {
    /// Open the transport described by the settings and wrap it in the
    /// matching framing. Settings are expected to be validated by the caller.
    pub(crate) async fn connect(settings: &ConnectionSettings) -> Result<Self, RequestError> {
        let (phys, framing) = match settings.mode {
            Mode::Tcp => (
                tcp::connect(&settings.endpoint, settings.timeout).await?,
                Framing::Tcp(tcp::TcpFraming::new()),
            ),
            Mode::Rtu => (
                open_serial(settings)?,
                Framing::Rtu(rtu::RtuFraming),
            ),
            Mode::Ascii => (
                open_serial(settings)?,
                Framing::Ascii(ascii::AsciiFraming),
            ),
        };
        Ok(Packager {
            framing,
            phys,
            timeout: settings.timeout,
        })
    }

    #[cfg(test)]
    pub(crate) fn mock(mode: Mode, io: tokio_test::io::Mock, timeout: Duration) -> Self {
        let framing = match mode {
            Mode::Tcp => Framing::Tcp(tcp::TcpFraming::new()),
            Mode::Rtu => Framing::Rtu(rtu::RtuFraming),
            Mode::Ascii => Framing::Ascii(ascii::AsciiFraming),
        };
        Packager {
            framing,
            phys: PhysLayer::Mock(io),
            timeout,
        }
    }

    /// Validate, frame, transmit, await the response, strip the framing, and
    /// validate the response against the request. Returns the payload bytes.
    pub(crate) async fn send(&mut self, request: &Request) -> Result<Vec<u8>, RequestError> {
        match &mut self.framing {
            Framing::Tcp(framing) => framing.send(&mut self.phys, self.timeout, request).await,
            Framing::Rtu(framing) => framing.send(&mut self.phys, self.timeout, request).await,
            Framing::Ascii(framing) => framing.send(&mut self.phys, self.timeout, request).await,
        }
    }
}

fn open_serial(settings: &ConnectionSettings) -> Result<PhysLayer, RequestError> {
    use tokio_serial::SerialPortBuilderExt;

    let stream = tokio_serial::new(&settings.endpoint, settings.baud_rate)
        .open_native_async()
        .map_err(|err| RequestError::Io(serial_error_kind(&err)))?;
    Ok(PhysLayer::Serial(stream))
}

fn serial_error_kind(err: &tokio_serial::Error) -> std::io::ErrorKind {
    match &err.kind {
        tokio_serial::ErrorKind::Io(kind) => *kind,
        tokio_serial::ErrorKind::NoDevice => std::io::ErrorKind::NotFound,
        _ => std::io::ErrorKind::Other,
    }
}
