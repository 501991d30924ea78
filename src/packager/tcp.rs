use std::time::Duration;

use tokio::time::timeout;

use crate::common::phys::PhysLayer;
use crate::constants::MAX_TCP_SIZE;
use crate::error::{AduParseError, FrameError, RequestError};
use crate::request::Request;

const MBAP_HEADER_LENGTH: usize = 7;
/// the ADU handed to response validation starts at the unit id byte
const MBAP_ADU_OFFSET: usize = 6;

/// Transaction id sequence: starts at 0, increments per request, wraps
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) struct TxId {
    value: u16,
}

impl TxId {
    pub(crate) fn next(&mut self) -> u16 {
        let ret = self.value;
        self.value = self.value.wrapping_add(1);
        ret
    }
}

/// Opens the TCP stream with the connect attempt bounded by the response
/// timeout, and keep-alive enabled on the socket.
pub(crate) async fn connect(endpoint: &str, limit: Duration) -> Result<PhysLayer, RequestError> {
    let stream = timeout(limit, tokio::net::TcpStream::connect(endpoint)).await??;
    socket2::SockRef::from(&stream).set_keepalive(true)?;
    Ok(PhysLayer::Tcp(stream))
}

pub(crate) struct TcpFraming {
    tx_id: TxId,
}

impl TcpFraming {
    pub(crate) fn new() -> Self {
        TcpFraming {
            tx_id: TxId::default(),
        }
    }

    pub(crate) async fn send(
        &mut self,
        phys: &mut PhysLayer,
        limit: Duration,
        request: &Request,
    ) -> Result<Vec<u8>, RequestError> {
        let body = request.body()?;
        let tx_id = self.tx_id.next();

        let mut frame = Vec::with_capacity(MBAP_HEADER_LENGTH + 1 + body.len());
        frame.extend_from_slice(&tx_id.to_be_bytes());
        frame.extend_from_slice(&[0x00, 0x00]); // protocol id
        frame.extend_from_slice(&((body.len() as u16 + 2).to_be_bytes()));
        frame.push(request.unit_id.value);
        frame.push(request.function.get_value());
        frame.extend_from_slice(&body);

        timeout(limit, phys.write_all(&frame)).await??;

        let mut response = [0u8; MAX_TCP_SIZE];
        let count = timeout(limit, phys.read(&mut response)).await??;

        if count < 2 {
            return Err(AduParseError::EmptyResponse.into());
        }
        let received = u16::from_be_bytes([response[0], response[1]]);
        if received != tx_id {
            return Err(FrameError::TxIdMismatch {
                expected: tx_id,
                received,
            }
            .into());
        }

        let adu = response.get(MBAP_ADU_OFFSET..count).unwrap_or_default();
        request.check_response(adu).map(<[u8]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::ExceptionCode;

    fn framed(tx_id: u16, adu: &[u8]) -> Vec<u8> {
        let mut frame = Vec::new();
        frame.extend_from_slice(&tx_id.to_be_bytes());
        frame.extend_from_slice(&[0x00, 0x00]);
        frame.extend_from_slice(&((adu.len() as u16).to_be_bytes()));
        frame.extend_from_slice(adu);
        frame
    }

    #[tokio::test]
    async fn exchanges_a_read_coils_transaction() {
        let request = Request::read_coils(1, 1, 1).unwrap();
        let io = tokio_test::io::Builder::new()
            .write(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x06, 0x01, 0x01, 0x00, 0x01, 0x00, 0x01])
            .read(&framed(0, &[0x01, 0x01, 0x01, 0x01]))
            .build();
        let mut phys = PhysLayer::Mock(io);
        let mut framing = TcpFraming::new();
        let payload = framing
            .send(&mut phys, Duration::from_secs(1), &request)
            .await
            .unwrap();
        assert_eq!(payload, vec![0x01, 0x01]);
    }

    #[tokio::test]
    async fn transaction_ids_increment_per_request() {
        let request = Request::write_single_register(1, 1, 1).unwrap();
        let adu = [0x01, 0x06, 0x00, 0x01, 0x00, 0x01];
        let io = tokio_test::io::Builder::new()
            .write(&framed(0, &adu))
            .read(&framed(0, &adu))
            .write(&framed(1, &adu))
            .read(&framed(1, &adu))
            .build();
        let mut phys = PhysLayer::Mock(io);
        let mut framing = TcpFraming::new();
        for _ in 0..2 {
            let payload = framing
                .send(&mut phys, Duration::from_secs(1), &request)
                .await
                .unwrap();
            assert_eq!(payload, vec![0x00, 0x01, 0x00, 0x01]);
        }
    }

    #[tokio::test]
    async fn mismatched_transaction_id_is_an_error() {
        let request = Request::read_coils(1, 1, 1).unwrap();
        let io = tokio_test::io::Builder::new()
            .write(&framed(0, &[0x01, 0x01, 0x00, 0x01, 0x00, 0x01]))
            .read(&framed(7, &[0x01, 0x01, 0x01, 0x01]))
            .build();
        let mut phys = PhysLayer::Mock(io);
        let mut framing = TcpFraming::new();
        assert_eq!(
            framing
                .send(&mut phys, Duration::from_secs(1), &request)
                .await,
            Err(FrameError::TxIdMismatch {
                expected: 0,
                received: 7
            }
            .into())
        );
    }

    #[tokio::test]
    async fn exception_response_surfaces_the_code() {
        let request = Request::read_coils(1, 1, 1).unwrap();
        let io = tokio_test::io::Builder::new()
            .write(&framed(0, &[0x01, 0x01, 0x00, 0x01, 0x00, 0x01]))
            .read(&framed(0, &[0x01, 0x81, 0x02]))
            .build();
        let mut phys = PhysLayer::Mock(io);
        let mut framing = TcpFraming::new();
        assert_eq!(
            framing
                .send(&mut phys, Duration::from_secs(1), &request)
                .await,
            Err(RequestError::Exception(ExceptionCode::IllegalDataAddress))
        );
    }

    #[test]
    fn tx_id_wraps_at_u16_max() {
        let mut tx_id = TxId { value: u16::MAX };
        assert_eq!(tx_id.next(), u16::MAX);
        assert_eq!(tx_id.next(), 0);
    }
}
