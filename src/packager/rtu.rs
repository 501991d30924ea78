use std::time::Duration;

use tokio::time::{sleep, timeout};

use crate::common::phys::PhysLayer;
use crate::constants::MAX_RTU_SIZE;
use crate::error::{AduParseError, FrameError, InvalidRequest, RequestError};
use crate::request::Request;

pub(crate) const CRC16: crc::Crc<u16> = crc::Crc::<u16>::new(&crc::CRC_16_MODBUS);

/// Fixed pause between transmitting a frame and reading the reply, standing
/// in for the 3.5 character times of inter-frame silence RTU requires.
const INTER_FRAME_DELAY: Duration = Duration::from_millis(20);

pub(crate) struct RtuFraming;

impl RtuFraming {
    pub(crate) async fn send(
        &mut self,
        phys: &mut PhysLayer,
        limit: Duration,
        request: &Request,
    ) -> Result<Vec<u8>, RequestError> {
        if request.unit_id.is_broadcast() {
            return Err(InvalidRequest::BroadcastNotSupported.into());
        }
        let body = request.body()?;

        let mut frame = Vec::with_capacity(body.len() + 4);
        frame.push(request.unit_id.value);
        frame.push(request.function.get_value());
        frame.extend_from_slice(&body);
        let crc = CRC16.checksum(&frame);
        frame.extend_from_slice(&crc.to_le_bytes());

        timeout(limit, phys.write_all(&frame)).await??;

        sleep(INTER_FRAME_DELAY).await;

        let mut response = [0u8; MAX_RTU_SIZE];
        let count = timeout(limit, phys.read(&mut response)).await??;
        if count < 3 {
            return Err(AduParseError::EmptyResponse.into());
        }

        let (adu, suffix) = response[..count].split_at(count - 2);
        let received = u16::from_le_bytes([suffix[0], suffix[1]]);
        if CRC16.checksum(adu) != received {
            return Err(FrameError::BadChecksum.into());
        }

        request.check_response(adu).map(<[u8]>::to_vec)
    }
}
