use std::fmt::{Display, Formatter};

use crate::error::InvalidRequest;

mod constants {
    pub(crate) const READ_COILS: u8 = 0x01;
    pub(crate) const READ_DISCRETE_INPUTS: u8 = 0x02;
    pub(crate) const READ_HOLDING_REGISTERS: u8 = 0x03;
    pub(crate) const READ_INPUT_REGISTERS: u8 = 0x04;
    pub(crate) const WRITE_SINGLE_COIL: u8 = 0x05;
    pub(crate) const WRITE_SINGLE_REGISTER: u8 = 0x06;
    pub(crate) const WRITE_MULTIPLE_COILS: u8 = 0x0F;
    pub(crate) const WRITE_MULTIPLE_REGISTERS: u8 = 0x10;
    pub(crate) const MASK_WRITE_REGISTER: u8 = 0x16;
}

/// The subset of Modbus function codes supported by this library
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FunctionCode {
    ReadCoils = constants::READ_COILS,
    ReadDiscreteInputs = constants::READ_DISCRETE_INPUTS,
    ReadHoldingRegisters = constants::READ_HOLDING_REGISTERS,
    ReadInputRegisters = constants::READ_INPUT_REGISTERS,
    WriteSingleCoil = constants::WRITE_SINGLE_COIL,
    WriteSingleRegister = constants::WRITE_SINGLE_REGISTER,
    WriteMultipleCoils = constants::WRITE_MULTIPLE_COILS,
    WriteMultipleRegisters = constants::WRITE_MULTIPLE_REGISTERS,
    MaskWriteRegister = constants::MASK_WRITE_REGISTER,
}

impl FunctionCode {
    /// All supported function codes, in ascending code order
    pub const ALL: [FunctionCode; 9] = [
        FunctionCode::ReadCoils,
        FunctionCode::ReadDiscreteInputs,
        FunctionCode::ReadHoldingRegisters,
        FunctionCode::ReadInputRegisters,
        FunctionCode::WriteSingleCoil,
        FunctionCode::WriteSingleRegister,
        FunctionCode::WriteMultipleCoils,
        FunctionCode::WriteMultipleRegisters,
        FunctionCode::MaskWriteRegister,
    ];

    /// raw function code value as it appears on the wire
    pub const fn get_value(self) -> u8 {
        self as u8
    }

    /// function code value with the error bit set
    pub(crate) const fn as_error(self) -> u8 {
        self.get_value() | 0x80
    }

    /// lookup a [`FunctionCode`] from its raw value
    pub fn get(value: u8) -> Option<Self> {
        match value {
            constants::READ_COILS => Some(FunctionCode::ReadCoils),
            constants::READ_DISCRETE_INPUTS => Some(FunctionCode::ReadDiscreteInputs),
            constants::READ_HOLDING_REGISTERS => Some(FunctionCode::ReadHoldingRegisters),
            constants::READ_INPUT_REGISTERS => Some(FunctionCode::ReadInputRegisters),
            constants::WRITE_SINGLE_COIL => Some(FunctionCode::WriteSingleCoil),
            constants::WRITE_SINGLE_REGISTER => Some(FunctionCode::WriteSingleRegister),
            constants::WRITE_MULTIPLE_COILS => Some(FunctionCode::WriteMultipleCoils),
            constants::WRITE_MULTIPLE_REGISTERS => Some(FunctionCode::WriteMultipleRegisters),
            constants::MASK_WRITE_REGISTER => Some(FunctionCode::MaskWriteRegister),
            _ => None,
        }
    }

    /// canonical name of the function
    pub fn name(self) -> &'static str {
        match self {
            FunctionCode::ReadCoils => "ReadCoils",
            FunctionCode::ReadDiscreteInputs => "ReadDiscreteInputs",
            FunctionCode::ReadHoldingRegisters => "ReadHoldingRegisters",
            FunctionCode::ReadInputRegisters => "ReadInputRegisters",
            FunctionCode::WriteSingleCoil => "WriteSingleCoil",
            FunctionCode::WriteSingleRegister => "WriteSingleRegister",
            FunctionCode::WriteMultipleCoils => "WriteMultipleCoils",
            FunctionCode::WriteMultipleRegisters => "WriteMultipleRegisters",
            FunctionCode::MaskWriteRegister => "MaskWriteRegister",
        }
    }

    /// lookup a [`FunctionCode`] from its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        FunctionCode::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// true for the four read functions
    pub fn is_read(self) -> bool {
        matches!(
            self,
            FunctionCode::ReadCoils
                | FunctionCode::ReadDiscreteInputs
                | FunctionCode::ReadHoldingRegisters
                | FunctionCode::ReadInputRegisters
        )
    }

    /// true for the five write functions
    pub fn is_write(self) -> bool {
        !self.is_read()
    }

    pub(crate) fn is_single_write(self) -> bool {
        matches!(
            self,
            FunctionCode::WriteSingleCoil | FunctionCode::WriteSingleRegister
        )
    }

    pub(crate) fn is_multiple_write(self) -> bool {
        matches!(
            self,
            FunctionCode::WriteMultipleCoils | FunctionCode::WriteMultipleRegisters
        )
    }
}

impl TryFrom<u8> for FunctionCode {
    type Error = InvalidRequest;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        FunctionCode::get(value).ok_or(InvalidRequest::UnknownFunction(value))
    }
}

impl Display for FunctionCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{} ({:#04X})", self.name(), self.get_value())
    }
}
