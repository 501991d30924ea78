/// Maximum size in bytes of a Modbus TCP frame (MBAP header + PDU)
pub const MAX_TCP_SIZE: usize = 260;
/// Maximum size in bytes of a Modbus RTU frame
pub const MAX_RTU_SIZE: usize = 512;
/// Maximum size in bytes of a Modbus ASCII frame
pub const MAX_ASCII_SIZE: usize = 512;

/// Default port number for Modbus TCP
pub const DEFAULT_TCP_PORT: u16 = 502;

pub mod coil {
    /// u16 representation of COIL == ON when performing write single coil
    pub const ON: u16 = 0xFF00;
    /// u16 representation of COIL == OFF when performing write single coil
    pub const OFF: u16 = 0x0000;
}

pub mod limits {
    /// Maximum count allowed in a read coils/discrete inputs request
    pub const MAX_READ_BITS_COUNT: u16 = 2000;
    /// Maximum count allowed in a read holding/input registers request
    pub const MAX_READ_REGISTERS_COUNT: u16 = 125;
    /// Maximum count allowed in a write multiple coils request
    pub const MAX_WRITE_BITS_COUNT: u16 = 2000;
    /// Maximum count allowed in a write multiple registers request
    pub const MAX_WRITE_REGISTERS_COUNT: u16 = 123;
}

pub mod exceptions {
    pub const ILLEGAL_FUNCTION: u8 = 0x01;
    pub const ILLEGAL_DATA_ADDRESS: u8 = 0x02;
    pub const ILLEGAL_DATA_VALUE: u8 = 0x03;
    pub const SLAVE_DEVICE_FAILURE: u8 = 0x04;
    pub const ACKNOWLEDGE: u8 = 0x05;
    pub const SLAVE_DEVICE_BUSY: u8 = 0x06;
    pub const MEMORY_PARITY_ERROR: u8 = 0x08;
    pub const GATEWAY_PATH_UNAVAILABLE: u8 = 0x0A;
    pub const GATEWAY_TARGET_FAILED_TO_RESPOND: u8 = 0x0B;
}
