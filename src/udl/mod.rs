//! Outbound side: the UDL filedrop endpoints.

mod client;
mod error;
pub mod timestamp;

pub use client::{EphemerisParams, HttpClient, UdlClient};
pub use error::TransportError;

pub const AIS_PATH: &str = "filedrop/udl-ais";
pub const ELSET_PATH: &str = "filedrop/udl-elset";
pub const EPHEMERIS_PATH: &str = "filedrop/ephem";
