//! Spire maritime and space data to Unified Data Library (UDL) connector.

pub mod ais;
pub mod config;
pub mod destination;
pub mod elset;
pub mod ephemeris;
pub mod record;
pub mod udl;

pub use config::{Config, ConfigError, DataMode, DataType};
pub use destination::{Destination, ErrorKind, WriteError};
pub use record::{Change, Data, Record};
