use crate::constants::{coil, limits};
use crate::error::{AduParseError, InvalidRequest, RequestError};
use crate::exception::ExceptionCode;
use crate::function::FunctionCode;
use crate::types::UnitId;

/// One Modbus request: target device, function, addressing, and any values
/// to be written.
///
/// A `Request` is a plain value. It can be kept around, mutated, and sent
/// again; validation happens on every send. The `values` field carries the
/// data words for write functions and is ignored by reads. For
/// `WriteMultipleCoils` the words are interpreted big-endian and truncated to
/// the packed coil bytes; for `MaskWriteRegister` they are the AND-mask and
/// OR-mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub unit_id: UnitId,
    pub function: FunctionCode,
    pub address: u16,
    pub quantity: u16,
    pub values: Vec<u16>,
}

impl Request {
    /// build a request for any of the four read functions
    pub fn read(
        unit_id: u8,
        function: FunctionCode,
        address: u16,
        quantity: u16,
    ) -> Result<Self, InvalidRequest> {
        if !function.is_read() {
            return Err(InvalidRequest::NotARead(function));
        }
        let request = Request {
            unit_id: UnitId::new(unit_id),
            function,
            address,
            quantity,
            values: Vec::new(),
        };
        request.validate()?;
        Ok(request)
    }

    /// build a request for either of the single-write functions
    pub fn write_single(
        unit_id: u8,
        function: FunctionCode,
        address: u16,
        value: u16,
    ) -> Result<Self, InvalidRequest> {
        if !function.is_single_write() {
            return Err(InvalidRequest::NotASingleWrite(function));
        }
        let request = Request {
            unit_id: UnitId::new(unit_id),
            function,
            address,
            quantity: 0,
            values: vec![value],
        };
        request.validate()?;
        Ok(request)
    }

    /// build a request for either of the multiple-write functions
    pub fn write_multiple(
        unit_id: u8,
        function: FunctionCode,
        address: u16,
        quantity: u16,
        values: Vec<u16>,
    ) -> Result<Self, InvalidRequest> {
        if !function.is_multiple_write() {
            return Err(InvalidRequest::NotAMultipleWrite(function));
        }
        let request = Request {
            unit_id: UnitId::new(unit_id),
            function,
            address,
            quantity,
            values,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn read_coils(unit_id: u8, address: u16, quantity: u16) -> Result<Self, InvalidRequest> {
        Self::read(unit_id, FunctionCode::ReadCoils, address, quantity)
    }

    pub fn read_discrete_inputs(
        unit_id: u8,
        address: u16,
        quantity: u16,
    ) -> Result<Self, InvalidRequest> {
        Self::read(unit_id, FunctionCode::ReadDiscreteInputs, address, quantity)
    }

    pub fn read_holding_registers(
        unit_id: u8,
        address: u16,
        quantity: u16,
    ) -> Result<Self, InvalidRequest> {
        Self::read(unit_id, FunctionCode::ReadHoldingRegisters, address, quantity)
    }

    pub fn read_input_registers(
        unit_id: u8,
        address: u16,
        quantity: u16,
    ) -> Result<Self, InvalidRequest> {
        Self::read(unit_id, FunctionCode::ReadInputRegisters, address, quantity)
    }

    /// `true` is transmitted as 0xFF00, `false` as 0x0000
    pub fn write_single_coil(unit_id: u8, address: u16, value: bool) -> Result<Self, InvalidRequest> {
        let value = if value { coil::ON } else { coil::OFF };
        Self::write_single(unit_id, FunctionCode::WriteSingleCoil, address, value)
    }

    pub fn write_single_register(
        unit_id: u8,
        address: u16,
        value: u16,
    ) -> Result<Self, InvalidRequest> {
        Self::write_single(unit_id, FunctionCode::WriteSingleRegister, address, value)
    }

    /// `values` holds the coil states packed big-endian, `quantity` bits of it used
    pub fn write_multiple_coils(
        unit_id: u8,
        address: u16,
        quantity: u16,
        values: Vec<u16>,
    ) -> Result<Self, InvalidRequest> {
        Self::write_multiple(
            unit_id,
            FunctionCode::WriteMultipleCoils,
            address,
            quantity,
            values,
        )
    }

    pub fn write_multiple_registers(
        unit_id: u8,
        address: u16,
        quantity: u16,
        values: Vec<u16>,
    ) -> Result<Self, InvalidRequest> {
        Self::write_multiple(
            unit_id,
            FunctionCode::WriteMultipleRegisters,
            address,
            quantity,
            values,
        )
    }

    pub fn mask_write_register(
        unit_id: u8,
        address: u16,
        and_mask: u16,
        or_mask: u16,
    ) -> Result<Self, InvalidRequest> {
        let request = Request {
            unit_id: UnitId::new(unit_id),
            function: FunctionCode::MaskWriteRegister,
            address,
            quantity: 0,
            values: vec![and_mask, or_mask],
        };
        request.validate()?;
        Ok(request)
    }

    /// Check the per-function validity constraints: quantity range, address
    /// range, and required values length.
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        match self.function {
            FunctionCode::ReadCoils | FunctionCode::ReadDiscreteInputs => {
                self.check_range(limits::MAX_READ_BITS_COUNT)
            }
            FunctionCode::ReadHoldingRegisters | FunctionCode::ReadInputRegisters => {
                self.check_range(limits::MAX_READ_REGISTERS_COUNT)
            }
            FunctionCode::WriteSingleCoil | FunctionCode::WriteSingleRegister => {
                self.check_values(1)
            }
            FunctionCode::WriteMultipleCoils => {
                self.check_range(limits::MAX_WRITE_BITS_COUNT)?;
                // one 16-bit word covers 16 coils
                self.check_values((self.quantity as usize + 15) / 16)
            }
            FunctionCode::WriteMultipleRegisters => {
                self.check_range(limits::MAX_WRITE_REGISTERS_COUNT)?;
                self.check_values(self.quantity as usize)
            }
            FunctionCode::MaskWriteRegister => self.check_values(2),
        }
    }

    fn check_range(&self, max: u16) -> Result<(), InvalidRequest> {
        if self.quantity == 0 {
            return Err(InvalidRequest::CountOfZero);
        }
        if self.quantity > max {
            return Err(InvalidRequest::CountTooBig {
                count: self.quantity,
                max,
            });
        }
        if self.address as u32 + self.quantity as u32 > max as u32 {
            return Err(InvalidRequest::AddressOverflow {
                address: self.address,
                count: self.quantity,
                max,
            });
        }
        Ok(())
    }

    fn check_values(&self, expected: usize) -> Result<(), InvalidRequest> {
        if self.values.len() != expected {
            return Err(InvalidRequest::WrongValueCount {
                expected,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    /// Validate the request and produce the function-specific PDU body,
    /// without any unit id, function code, or transport framing.
    pub(crate) fn body(&self) -> Result<Vec<u8>, InvalidRequest> {
        self.validate()?;
        let mut body = Vec::with_capacity(5 + 2 * self.values.len());
        match self.function {
            FunctionCode::ReadCoils
            | FunctionCode::ReadDiscreteInputs
            | FunctionCode::ReadHoldingRegisters
            | FunctionCode::ReadInputRegisters => {
                body.extend_from_slice(&self.address.to_be_bytes());
                body.extend_from_slice(&self.quantity.to_be_bytes());
            }
            FunctionCode::WriteSingleCoil => {
                let value = if self.values[0] != 0 { coil::ON } else { coil::OFF };
                body.extend_from_slice(&self.address.to_be_bytes());
                body.extend_from_slice(&value.to_be_bytes());
            }
            FunctionCode::WriteSingleRegister => {
                body.extend_from_slice(&self.address.to_be_bytes());
                body.extend_from_slice(&self.values[0].to_be_bytes());
            }
            FunctionCode::WriteMultipleCoils => {
                let byte_count = (self.quantity as usize + 7) / 8;
                body.extend_from_slice(&self.address.to_be_bytes());
                body.extend_from_slice(&self.quantity.to_be_bytes());
                body.push(byte_count as u8);
                let packed = self
                    .values
                    .iter()
                    .flat_map(|value| value.to_be_bytes())
                    .take(byte_count);
                body.extend(packed);
            }
            FunctionCode::WriteMultipleRegisters => {
                body.extend_from_slice(&self.address.to_be_bytes());
                body.extend_from_slice(&self.quantity.to_be_bytes());
                body.push((2 * self.quantity) as u8);
                for value in &self.values {
                    body.extend_from_slice(&value.to_be_bytes());
                }
            }
            FunctionCode::MaskWriteRegister => {
                body.extend_from_slice(&self.address.to_be_bytes());
                body.extend_from_slice(&self.values[0].to_be_bytes());
                body.extend_from_slice(&self.values[1].to_be_bytes());
            }
        }
        Ok(body)
    }

    /// byte count a well-formed read response must declare
    fn expected_byte_count(&self) -> usize {
        match self.function {
            FunctionCode::ReadCoils | FunctionCode::ReadDiscreteInputs => {
                (self.quantity as usize + 7) / 8
            }
            _ => 2 * self.quantity as usize,
        }
    }

    /// Validate a response ADU (`[unit id][function][..]`, framing already
    /// stripped) against this request and return the payload slice handed to
    /// the caller: everything after the unit id and function code bytes.
    pub(crate) fn check_response<'a>(&self, adu: &'a [u8]) -> Result<&'a [u8], RequestError> {
        if adu.is_empty() {
            return Err(AduParseError::EmptyResponse.into());
        }
        if adu[0] != self.unit_id.value {
            return Err(AduParseError::SlaveIdMismatch {
                expected: self.unit_id.value,
                received: adu[0],
            }
            .into());
        }
        let function = adu
            .get(1)
            .copied()
            .ok_or(AduParseError::EmptyResponse)?;
        if function == self.function.as_error() {
            let code = adu.get(2).copied().ok_or(AduParseError::BadResponseLength {
                expected: 3,
                received: adu.len(),
            })?;
            return Err(ExceptionCode::from_u8(code).into());
        }
        if function != self.function.get_value() {
            return Err(AduParseError::UnknownFunction(function).into());
        }

        if self.function.is_write() {
            // the device echoes address/quantity or address/value
            if adu.len() < 6 {
                return Err(AduParseError::BadResponseLength {
                    expected: 6,
                    received: adu.len(),
                }
                .into());
            }
            let body = self.body()?;
            if adu[2..6] != body[..4] {
                return Err(AduParseError::WriteDataMismatch.into());
            }
        } else {
            let expected = self.expected_byte_count();
            let declared = match adu.get(2) {
                Some(count) => *count as usize,
                None => {
                    return Err(AduParseError::BadResponseLength {
                        expected,
                        received: 0,
                    }
                    .into())
                }
            };
            if declared != expected {
                return Err(AduParseError::BadResponseLength {
                    expected,
                    received: declared,
                }
                .into());
            }
            let payload = adu.len() - 3;
            if payload != declared {
                return Err(AduParseError::ResponseLengthMismatch {
                    expected: declared,
                    received: payload,
                }
                .into());
            }
        }

        Ok(&adu[2..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCase {
        name: &'static str,
        request: Request,
        valid: bool,
        body: &'static [u8],
    }

    fn case(
        name: &'static str,
        valid: bool,
        function: FunctionCode,
        address: u16,
        quantity: u16,
        values: &[u16],
        body: &'static [u8],
    ) -> TestCase {
        TestCase {
            name,
            request: Request {
                unit_id: UnitId::new(1),
                function,
                address,
                quantity,
                values: values.to_vec(),
            },
            valid,
            body,
        }
    }

    fn cases() -> Vec<TestCase> {
        use FunctionCode::*;
        vec![
            // read coils
            case("ReadCoils/quantity=0", false, ReadCoils, 0, 0, &[], &[]),
            case(
                "ReadCoils/min quantity=1",
                true,
                ReadCoils,
                1,
                1,
                &[],
                &[0, 1, 0, 1],
            ),
            case(
                "ReadCoils/max quantity=2000",
                true,
                ReadCoils,
                0,
                2000,
                &[],
                &[0, 0, 0x07, 0xD0],
            ),
            case(
                "ReadCoils/address=1 quantity=2000 overflows",
                false,
                ReadCoils,
                1,
                2000,
                &[],
                &[],
            ),
            case(
                "ReadCoils/quantity=2001 too big",
                false,
                ReadCoils,
                0,
                2001,
                &[],
                &[],
            ),
            // read discrete inputs
            case(
                "ReadDiscreteInputs/quantity=0",
                false,
                ReadDiscreteInputs,
                0,
                0,
                &[],
                &[],
            ),
            case(
                "ReadDiscreteInputs/min quantity=1",
                true,
                ReadDiscreteInputs,
                1,
                1,
                &[],
                &[0, 1, 0, 1],
            ),
            case(
                "ReadDiscreteInputs/max quantity=2000",
                true,
                ReadDiscreteInputs,
                0,
                2000,
                &[],
                &[0, 0, 0x07, 0xD0],
            ),
            case(
                "ReadDiscreteInputs/quantity=2001 too big",
                false,
                ReadDiscreteInputs,
                0,
                2001,
                &[],
                &[],
            ),
            // read holding registers
            case(
                "ReadHoldingRegisters/quantity=0",
                false,
                ReadHoldingRegisters,
                0,
                0,
                &[],
                &[],
            ),
            case(
                "ReadHoldingRegisters/min quantity=1",
                true,
                ReadHoldingRegisters,
                1,
                1,
                &[],
                &[0, 1, 0, 1],
            ),
            case(
                "ReadHoldingRegisters/max quantity=125",
                true,
                ReadHoldingRegisters,
                0,
                125,
                &[],
                &[0, 0, 0, 125],
            ),
            case(
                "ReadHoldingRegisters/address=1 quantity=125 overflows",
                false,
                ReadHoldingRegisters,
                1,
                125,
                &[],
                &[],
            ),
            case(
                "ReadHoldingRegisters/quantity=126 too big",
                false,
                ReadHoldingRegisters,
                0,
                126,
                &[],
                &[],
            ),
            // read input registers
            case(
                "ReadInputRegisters/min quantity=1",
                true,
                ReadInputRegisters,
                1,
                1,
                &[],
                &[0, 1, 0, 1],
            ),
            case(
                "ReadInputRegisters/max quantity=125",
                true,
                ReadInputRegisters,
                0,
                125,
                &[],
                &[0, 0, 0, 125],
            ),
            case(
                "ReadInputRegisters/quantity=126 too big",
                false,
                ReadInputRegisters,
                0,
                126,
                &[],
                &[],
            ),
            // write single coil
            case(
                "WriteSingleCoil/no values",
                false,
                WriteSingleCoil,
                0,
                0,
                &[],
                &[],
            ),
            case(
                "WriteSingleCoil/value=0",
                true,
                WriteSingleCoil,
                1,
                0,
                &[0],
                &[0, 1, 0, 0],
            ),
            case(
                "WriteSingleCoil/nonzero coerces to 0xFF00",
                true,
                WriteSingleCoil,
                1,
                0,
                &[1],
                &[0, 1, 0xFF, 0],
            ),
            case(
                "WriteSingleCoil/two values",
                false,
                WriteSingleCoil,
                0,
                0,
                &[0, 0],
                &[],
            ),
            // write single register
            case(
                "WriteSingleRegister/no values",
                false,
                WriteSingleRegister,
                0,
                0,
                &[],
                &[],
            ),
            case(
                "WriteSingleRegister/one value",
                true,
                WriteSingleRegister,
                1,
                0,
                &[1],
                &[0, 1, 0, 1],
            ),
            case(
                "WriteSingleRegister/two values",
                false,
                WriteSingleRegister,
                0,
                0,
                &[0, 0],
                &[],
            ),
            // write multiple coils
            case(
                "WriteMultipleCoils/quantity=0",
                false,
                WriteMultipleCoils,
                0,
                0,
                &[0],
                &[],
            ),
            case(
                "WriteMultipleCoils/no values",
                false,
                WriteMultipleCoils,
                0,
                1,
                &[],
                &[],
            ),
            case(
                "WriteMultipleCoils/min quantity=1",
                true,
                WriteMultipleCoils,
                1,
                1,
                &[0x8000],
                &[0, 1, 0, 1, 1, 0x80],
            ),
            case(
                "WriteMultipleCoils/quantity=16",
                true,
                WriteMultipleCoils,
                1,
                16,
                &[0x8180],
                &[0, 1, 0, 16, 2, 0x81, 0x80],
            ),
            case(
                "WriteMultipleCoils/quantity=17 one value",
                false,
                WriteMultipleCoils,
                0,
                17,
                &[0],
                &[],
            ),
            case(
                "WriteMultipleCoils/quantity=17 two values",
                true,
                WriteMultipleCoils,
                1,
                17,
                &[0x8182, 0x8000],
                &[0, 1, 0, 17, 3, 0x81, 0x82, 0x80],
            ),
            case(
                "WriteMultipleCoils/quantity=17 three values",
                false,
                WriteMultipleCoils,
                0,
                17,
                &[0, 0, 0],
                &[],
            ),
            // write multiple registers
            case(
                "WriteMultipleRegisters/quantity=0",
                false,
                WriteMultipleRegisters,
                0,
                0,
                &[0],
                &[],
            ),
            case(
                "WriteMultipleRegisters/no values",
                false,
                WriteMultipleRegisters,
                0,
                1,
                &[],
                &[],
            ),
            case(
                "WriteMultipleRegisters/min quantity=1",
                true,
                WriteMultipleRegisters,
                1,
                1,
                &[0x8081],
                &[0, 1, 0, 1, 2, 0x80, 0x81],
            ),
            case(
                "WriteMultipleRegisters/quantity=2 one value",
                false,
                WriteMultipleRegisters,
                0,
                2,
                &[0],
                &[],
            ),
            case(
                "WriteMultipleRegisters/quantity=2",
                true,
                WriteMultipleRegisters,
                1,
                2,
                &[0x8081, 0x7071],
                &[0, 1, 0, 2, 4, 0x80, 0x81, 0x70, 0x71],
            ),
            case(
                "WriteMultipleRegisters/quantity=2 three values",
                false,
                WriteMultipleRegisters,
                0,
                2,
                &[0, 0, 0],
                &[],
            ),
            case(
                "WriteMultipleRegisters/address=1 quantity=123 overflows",
                false,
                WriteMultipleRegisters,
                1,
                123,
                &[0; 123],
                &[],
            ),
            case(
                "WriteMultipleRegisters/quantity=124 too big",
                false,
                WriteMultipleRegisters,
                0,
                124,
                &[0; 124],
                &[],
            ),
            // mask write register
            case(
                "MaskWriteRegister/no values",
                false,
                MaskWriteRegister,
                0,
                0,
                &[],
                &[],
            ),
            case(
                "MaskWriteRegister/one value",
                false,
                MaskWriteRegister,
                0,
                0,
                &[0],
                &[],
            ),
            case(
                "MaskWriteRegister/two values",
                true,
                MaskWriteRegister,
                1,
                0,
                &[0x1112, 0x2122],
                &[0, 1, 0x11, 0x12, 0x21, 0x22],
            ),
            case(
                "MaskWriteRegister/three values",
                false,
                MaskWriteRegister,
                0,
                0,
                &[0, 0, 0],
                &[],
            ),
        ]
    }

    #[test]
    fn validity_matches_the_function_tables() {
        for case in cases() {
            assert_eq!(
                case.request.validate().is_ok(),
                case.valid,
                "case: {}",
                case.name
            );
        }
    }

    #[test]
    fn valid_requests_produce_the_expected_body_bytes() {
        for case in cases() {
            match case.request.body() {
                Ok(body) => {
                    assert!(case.valid, "case: {}", case.name);
                    assert_eq!(body, case.body, "case: {}", case.name);
                }
                Err(_) => assert!(!case.valid, "case: {}", case.name),
            }
        }
    }

    #[test]
    fn max_quantity_write_multiple_registers_is_accepted() {
        let request = Request::write_multiple_registers(1, 0, 123, vec![0; 123]).unwrap();
        let body = request.body().unwrap();
        assert_eq!(&body[..5], &[0, 0, 0, 123, 246]);
        assert_eq!(body.len(), 5 + 246);
    }

    #[test]
    fn generic_constructors_check_the_function_kind() {
        for function in FunctionCode::ALL {
            assert_eq!(
                Request::read(1, function, 0, 1).is_ok(),
                function.is_read(),
                "read: {function}"
            );
            assert_eq!(
                Request::write_single(1, function, 0, 0).is_ok(),
                function.is_single_write(),
                "write_single: {function}"
            );
            assert_eq!(
                Request::write_multiple(1, function, 0, 1, vec![0]).is_ok(),
                function.is_multiple_write(),
                "write_multiple: {function}"
            );
        }
    }

    #[test]
    fn write_single_coil_coerces_booleans() {
        let on = Request::write_single_coil(1, 0, true).unwrap();
        assert_eq!(on.values, vec![coil::ON]);
        let off = Request::write_single_coil(1, 0, false).unwrap();
        assert_eq!(off.values, vec![coil::OFF]);
    }

    fn read_coils_request() -> Request {
        Request::read_coils(1, 1, 1).unwrap()
    }

    #[test]
    fn empty_response_is_rejected() {
        assert_eq!(
            read_coils_request().check_response(&[]),
            Err(AduParseError::EmptyResponse.into())
        );
    }

    #[test]
    fn slave_id_mismatch_is_rejected() {
        assert_eq!(
            read_coils_request().check_response(&[2, 0x81, 0x01]),
            Err(AduParseError::SlaveIdMismatch {
                expected: 1,
                received: 2
            }
            .into())
        );
    }

    #[test]
    fn exception_responses_map_to_their_codes() {
        let request = read_coils_request();
        for (value, code) in [
            (0x01, ExceptionCode::IllegalFunction),
            (0x02, ExceptionCode::IllegalDataAddress),
            (0x03, ExceptionCode::IllegalDataValue),
            (0x04, ExceptionCode::SlaveDeviceFailure),
            (0x05, ExceptionCode::Acknowledge),
            (0x06, ExceptionCode::SlaveDeviceBusy),
            (0x08, ExceptionCode::MemoryParityError),
            (0x0A, ExceptionCode::GatewayPathUnavailable),
            (0x0B, ExceptionCode::GatewayTargetFailedToRespond),
            (0xAA, ExceptionCode::Unknown(0xAA)),
        ] {
            assert_eq!(
                request.check_response(&[1, 0x81, value]),
                Err(RequestError::Exception(code))
            );
        }
    }

    #[test]
    fn unrelated_function_code_is_rejected() {
        assert_eq!(
            read_coils_request().check_response(&[1, 0x96, 0xAA]),
            Err(AduParseError::UnknownFunction(0x96).into())
        );
    }

    #[test]
    fn read_byte_count_mismatch_is_rejected() {
        let request = read_coils_request();
        // declares zero coil bytes
        assert_eq!(
            request.check_response(&[1, 0x01, 0]),
            Err(AduParseError::BadResponseLength {
                expected: 1,
                received: 0
            }
            .into())
        );
        // declares two coil bytes for a one-coil read
        assert_eq!(
            request.check_response(&[1, 0x01, 2, 1, 1]),
            Err(AduParseError::BadResponseLength {
                expected: 1,
                received: 2
            }
            .into())
        );
        let registers = Request::read_holding_registers(1, 1, 1).unwrap();
        assert_eq!(
            registers.check_response(&[1, 0x03, 1, 0]),
            Err(AduParseError::BadResponseLength {
                expected: 2,
                received: 1
            }
            .into())
        );
    }

    #[test]
    fn read_payload_length_mismatch_is_rejected() {
        let request = read_coils_request();
        assert_eq!(
            request.check_response(&[1, 0x01, 1]),
            Err(AduParseError::ResponseLengthMismatch {
                expected: 1,
                received: 0
            }
            .into())
        );
        assert_eq!(
            request.check_response(&[1, 0x01, 1, 1, 1]),
            Err(AduParseError::ResponseLengthMismatch {
                expected: 1,
                received: 2
            }
            .into())
        );
    }

    #[test]
    fn write_echo_mismatch_is_rejected() {
        for request in [
            Request::write_single_coil(1, 1, true).unwrap(),
            Request::write_single_register(1, 1, 1).unwrap(),
            Request::write_multiple_coils(1, 1, 16, vec![0x8180]).unwrap(),
            Request::write_multiple_registers(1, 1, 2, vec![0x8081, 0x7071]).unwrap(),
            Request::mask_write_register(1, 1, 0x1112, 0x2122).unwrap(),
        ] {
            let mut adu = vec![1, request.function.get_value()];
            let mut body = request.body().unwrap();
            body[2] = 0xFE;
            adu.extend_from_slice(&body);
            assert_eq!(
                request.check_response(&adu),
                Err(AduParseError::WriteDataMismatch.into()),
                "function: {}",
                request.function
            );
        }
    }

    // the literal end-to-end scenarios

    #[test]
    fn scenario_read_coils_payload() {
        let request = Request::read_coils(1, 1, 1).unwrap();
        assert_eq!(request.body().unwrap(), [0x00, 0x01, 0x00, 0x01]);
        let response = [0x01, 0x01, 0x01, 0x01];
        assert_eq!(
            request.check_response(&response).unwrap(),
            &[0x01, 0x01][..]
        );
    }

    #[test]
    fn scenario_write_multiple_coils_payload() {
        let request = Request::write_multiple_coils(1, 1, 16, vec![0x8180]).unwrap();
        assert_eq!(
            request.body().unwrap(),
            [0x00, 0x01, 0x00, 0x10, 0x02, 0x81, 0x80]
        );
        let response = [0x01, 0x0F, 0x00, 0x01, 0x00, 0x10];
        assert_eq!(
            request.check_response(&response).unwrap(),
            &[0x00, 0x01, 0x00, 0x10][..]
        );
    }

    #[test]
    fn scenario_write_multiple_registers_payload() {
        let request = Request::write_multiple_registers(1, 1, 2, vec![0x8081, 0x7071]).unwrap();
        assert_eq!(
            request.body().unwrap(),
            [0x00, 0x01, 0x00, 0x02, 0x04, 0x80, 0x81, 0x70, 0x71]
        );
        let response = [0x01, 0x10, 0x00, 0x01, 0x00, 0x02];
        assert_eq!(
            request.check_response(&response).unwrap(),
            &[0x00, 0x01, 0x00, 0x02][..]
        );
    }

    #[test]
    fn scenario_mask_write_register_payload() {
        let request = Request::mask_write_register(1, 1, 0x1112, 0x2122).unwrap();
        assert_eq!(
            request.body().unwrap(),
            [0x00, 0x01, 0x11, 0x12, 0x21, 0x22]
        );
        let response = [0x01, 0x16, 0x00, 0x01, 0x11, 0x12, 0x21, 0x22];
        assert_eq!(
            request.check_response(&response).unwrap(),
            &[0x00, 0x01, 0x11, 0x12, 0x21, 0x22][..]
        );
    }

    #[test]
    fn scenario_write_single_coil_payload() {
        let request = Request::write_single_coil(1, 1, true).unwrap();
        assert_eq!(request.body().unwrap(), [0x00, 0x01, 0xFF, 0x00]);
        let response = [0x01, 0x05, 0x00, 0x01, 0xFF, 0x00];
        assert_eq!(
            request.check_response(&response).unwrap(),
            &[0x00, 0x01, 0xFF, 0x00][..]
        );
    }
}
