use thiserror::Error;

#[derive(Debug, Error)]
pub enum Sp3Error {
    #[error("invalid input: expected at least {expected} header lines, found {found}")]
    InvalidInput { expected: usize, found: usize },
    #[error("input is not valid UTF-8")]
    NotUtf8(#[from] std::str::Utf8Error),
    #[error("line {line}: missing satellite name marker")]
    MissingSatelliteName { line: usize },
    #[error("line {line}: invalid epoch '{content}': {message}")]
    InvalidEpoch {
        line: usize,
        content: String,
        message: String,
    },
    #[error("line {line}: invalid position line ({components} components)")]
    InvalidPositionLine { line: usize, components: usize },
    #[error("line {line}: invalid velocity line ({components} components)")]
    InvalidVelocityLine { line: usize, components: usize },
    #[error("line {line}: invalid flight module number: {source}")]
    InvalidFlightModule {
        line: usize,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("line {line}: entry is missing its {missing} line")]
    TruncatedEntry { line: usize, missing: &'static str },
}

#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("sp3c parse error: {0}")]
    Parse(#[from] Sp3Error),
    #[error("report contains no entries")]
    EmptyReport,
    #[error("report contains multiple flight modules (expected {expected}, found {found} in entry {entry})")]
    MultipleFlightModules {
        expected: u32,
        found: u32,
        entry: usize,
    },
    #[error("invalid velocity component '{value}': {source}")]
    InvalidVelocity {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("no norad mapping for flight ID {0}")]
    UnmappedFlightModule(u32),
}
