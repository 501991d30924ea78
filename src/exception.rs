use std::fmt::{Display, Formatter};

use crate::constants::exceptions;

/// Exception codes defined in the Modbus specification, reported by the
/// responding device in an error response
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExceptionCode {
    /// The function code received in the query is not an allowable action for the device
    IllegalFunction,
    /// The data address received in the query is not an allowable address for the device
    IllegalDataAddress,
    /// A value contained in the query is not an allowable value for the device
    IllegalDataValue,
    /// An unrecoverable error occurred while the device was attempting to perform the
    /// requested action
    SlaveDeviceFailure,
    /// The device has accepted the request and is processing it
    Acknowledge,
    /// The device is engaged in processing a long-duration command, try again later
    SlaveDeviceBusy,
    /// The device attempted to read record data but detected a parity error in memory
    MemoryParityError,
    /// The gateway was unable to allocate an internal communication path for the request
    GatewayPathUnavailable,
    /// No response was obtained from the target device behind a gateway
    GatewayTargetFailedToRespond,
    /// The exception code received is not defined in the standard
    Unknown(u8),
}

impl ExceptionCode {
    pub fn from_u8(value: u8) -> ExceptionCode {
        match value {
            exceptions::ILLEGAL_FUNCTION => ExceptionCode::IllegalFunction,
            exceptions::ILLEGAL_DATA_ADDRESS => ExceptionCode::IllegalDataAddress,
            exceptions::ILLEGAL_DATA_VALUE => ExceptionCode::IllegalDataValue,
            exceptions::SLAVE_DEVICE_FAILURE => ExceptionCode::SlaveDeviceFailure,
            exceptions::ACKNOWLEDGE => ExceptionCode::Acknowledge,
            exceptions::SLAVE_DEVICE_BUSY => ExceptionCode::SlaveDeviceBusy,
            exceptions::MEMORY_PARITY_ERROR => ExceptionCode::MemoryParityError,
            exceptions::GATEWAY_PATH_UNAVAILABLE => ExceptionCode::GatewayPathUnavailable,
            exceptions::GATEWAY_TARGET_FAILED_TO_RESPOND => {
                ExceptionCode::GatewayTargetFailedToRespond
            }
            _ => ExceptionCode::Unknown(value),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            ExceptionCode::IllegalFunction => exceptions::ILLEGAL_FUNCTION,
            ExceptionCode::IllegalDataAddress => exceptions::ILLEGAL_DATA_ADDRESS,
            ExceptionCode::IllegalDataValue => exceptions::ILLEGAL_DATA_VALUE,
            ExceptionCode::SlaveDeviceFailure => exceptions::SLAVE_DEVICE_FAILURE,
            ExceptionCode::Acknowledge => exceptions::ACKNOWLEDGE,
            ExceptionCode::SlaveDeviceBusy => exceptions::SLAVE_DEVICE_BUSY,
            ExceptionCode::MemoryParityError => exceptions::MEMORY_PARITY_ERROR,
            ExceptionCode::GatewayPathUnavailable => exceptions::GATEWAY_PATH_UNAVAILABLE,
            ExceptionCode::GatewayTargetFailedToRespond => {
                exceptions::GATEWAY_TARGET_FAILED_TO_RESPOND
            }
            ExceptionCode::Unknown(value) => value,
        }
    }
}

impl std::error::Error for ExceptionCode {}

impl Display for ExceptionCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            ExceptionCode::IllegalFunction => f.write_str("Illegal Function (0x01)"),
            ExceptionCode::IllegalDataAddress => f.write_str("Illegal Data Address (0x02)"),
            ExceptionCode::IllegalDataValue => f.write_str("Illegal Data Value (0x03)"),
            ExceptionCode::SlaveDeviceFailure => f.write_str("Slave Device Failure (0x04)"),
            ExceptionCode::Acknowledge => f.write_str("Acknowledge (0x05)"),
            ExceptionCode::SlaveDeviceBusy => f.write_str("Slave Device Busy (0x06)"),
            ExceptionCode::MemoryParityError => f.write_str("Memory Parity Error (0x08)"),
            ExceptionCode::GatewayPathUnavailable => {
                f.write_str("Gateway Path Unavailable (0x0A)")
            }
            ExceptionCode::GatewayTargetFailedToRespond => {
                f.write_str("Gateway Target Device Failed to Respond (0x0B)")
            }
            ExceptionCode::Unknown(code) => write!(f, "Unknown Exception ({code:#04X})"),
        }
    }
}
