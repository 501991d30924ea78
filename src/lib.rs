//! A thread-safe Modbus master (client) library that multiplexes concurrent
//! callers onto a single physical link per endpoint, over TCP, RTU, or ASCII
//! transports.
//!
//! # Features
//!
//! * One physical link per endpoint, shared by any number of independent
//!   callers, with requests serialized on the half-duplex medium
//! * Process-wide registry that deduplicates links by endpoint and enforces
//!   matching connection settings, or unmanaged per-client links
//! * The nine common function codes: read coils / discrete inputs / holding
//!   registers / input registers, write single coil / register, write
//!   multiple coils / registers, mask write register
//! * Bit-exact MBAP, CRC-16, and LRC framing with full response validation
//! * Per-request timeouts applied on the transport
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use modbus_mux::{registry, ConnectionSettings, Request};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ConnectionSettings::tcp("10.0.0.7:502", Duration::from_millis(500));
//!     let mut handle = registry()?.acquire(settings).await?;
//!
//!     let request = Request::read_holding_registers(1, 0, 4)?;
//!     let payload = handle.send(&request).await?;
//!     println!("payload: {payload:02X?}");
//!
//!     handle.close()?;
//!     Ok(())
//! }
//! ```
//!
//! Handles are cheap: acquire one per task that needs to talk to a device and
//! close it when done. The link itself connects when its first handle is
//! acquired and shuts down when its last handle closes.

#![forbid(unsafe_code)]
#![deny(
    non_camel_case_types,
    non_snake_case,
    non_upper_case_globals,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_import_braces,
    unused_qualifications,
    bare_trait_objects
)]

/// client API: the registry, unmanaged clients, and handles
pub mod client;
/// public constant values related to the Modbus specification
pub mod constants;
/// error types surfaced to callers
pub mod error;
/// device-reported Modbus exception codes
pub mod exception;
/// supported function codes and their names
pub mod function;
/// request values and the frame codec behind them
pub mod request;
/// connection settings and primitive protocol types
pub mod types;

// internal modules
mod common;
mod packager;

pub use client::{registry, Client, ClientRegistry, Handle};
pub use error::RequestError;
pub use exception::ExceptionCode;
pub use function::FunctionCode;
pub use request::Request;
pub use types::{ConnectionSettings, Mode, UnitId};
