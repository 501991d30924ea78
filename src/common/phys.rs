use std::fmt::Write as _;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Encapsulates all possible physical layers as an enum
pub(crate) enum PhysLayer {
    Tcp(tokio::net::TcpStream),
    Serial(tokio_serial::SerialStream),
    #[cfg(test)]
    Mock(tokio_test::io::Mock),
}

impl std::fmt::Debug for PhysLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PhysLayer::Tcp(_) => f.write_str("Tcp"),
            PhysLayer::Serial(_) => f.write_str("Serial"),
            #[cfg(test)]
            PhysLayer::Mock(_) => f.write_str("Mock"),
        }
    }
}

impl PhysLayer {
    pub(crate) async fn read(&mut self, buffer: &mut [u8]) -> Result<usize, std::io::Error> {
        let length = match self {
            PhysLayer::Tcp(x) => x.read(buffer).await?,
            PhysLayer::Serial(x) => x.read(buffer).await?,
            #[cfg(test)]
            PhysLayer::Mock(x) => x.read(buffer).await?,
        };

        if let Some(x) = buffer.get(0..length) {
            tracing::trace!("PHYS RX - {}", PhysDisplay(x));
        }

        Ok(length)
    }

    pub(crate) async fn write_all(&mut self, data: &[u8]) -> Result<(), std::io::Error> {
        tracing::trace!("PHYS TX - {}", PhysDisplay(data));

        match self {
            PhysLayer::Tcp(x) => x.write_all(data).await,
            PhysLayer::Serial(x) => x.write_all(data).await,
            #[cfg(test)]
            PhysLayer::Mock(x) => x.write_all(data).await,
        }
    }
}

pub(crate) struct PhysDisplay<'a>(pub(crate) &'a [u8]);

impl std::fmt::Display for PhysDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} bytes", self.0.len())?;
        let mut first = true;
        for byte in self.0 {
            f.write_char(if first { ' ' } else { '-' })?;
            first = false;
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}
