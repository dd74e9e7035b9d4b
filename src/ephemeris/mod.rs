mod convert;
mod error;
pub mod flight_modules;
mod report;
pub mod sp3;

pub use convert::{fixed_width_float, to_udl_ephemeris, to_udl_report};
pub use error::{EphemerisError, Sp3Error};
pub use report::{UdlEntry, UdlPosition, UdlReport, UdlVelocity};
pub use sp3::{Entry, Position, Report, Velocity};
