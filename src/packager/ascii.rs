use std::time::Duration;

use tokio::time::timeout;

use crate::common::phys::PhysLayer;
use crate::constants::MAX_ASCII_SIZE;
use crate::error::{FrameError, InvalidRequest, RequestError};
use crate::request::Request;

const FRAME_START: u8 = b':';
const FRAME_END: &[u8] = b"\r\n";

/// Longitudinal redundancy check: the two's complement of the 8-bit sum of
/// the raw frame bytes.
pub(crate) fn lrc(data: &[u8]) -> u8 {
    data.iter()
        .fold(0u8, |sum, byte| sum.wrapping_add(*byte))
        .wrapping_neg()
}

pub(crate) struct AsciiFraming;

impl AsciiFraming {
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

        let mut raw = Vec::with_capacity(body.len() + 3);
        raw.push(request.unit_id.value);
        raw.push(request.function.get_value());
        raw.extend_from_slice(&body);
        raw.push(lrc(&raw));

        let mut frame = Vec::with_capacity(2 * raw.len() + 3);
        frame.push(FRAME_START);
        frame.extend_from_slice(hex::encode_upper(&raw).as_bytes());
        frame.extend_from_slice(FRAME_END);

        timeout(limit, phys.write_all(&frame)).await??;

        let mut response = [0u8; MAX_ASCII_SIZE];
        let count = timeout(limit, phys.read(&mut response)).await??;
        if count < 3
            || response[0] != FRAME_START
            || &response[count - 2..count] != FRAME_END
        {
            return Err(FrameError::BadFraming.into());
        }

        let raw = hex::decode(&response[1..count - 2]).map_err(|_| FrameError::BadFraming)?;
        let (received, adu) = match raw.split_last() {
            Some(split) => split,
            None => return Err(FrameError::BadFraming.into()),
        };
        if lrc(adu) != *received {
            return Err(FrameError::BadChecksum.into());
        }

        request.check_response(adu).map(<[u8]>::to_vec)
    }
}
