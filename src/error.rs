use crate::data::Body;
use std::fmt;
use thiserror::Error;

#[derive(Debug)]
pub enum CliError {
    /// Print message to stdout and exit with code 0 (help/version).
    Exit(String),
    /// Print every diagnostic plus usage to stderr and exit with code 1.
    Usage(Vec<String>),
    /// The requested event does not happen today; exit with code 2.
    Circumpolar,
    /// Print message to stderr and exit with code 1.
    Message(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Exit(msg) | CliError::Message(msg) => write!(f, "{}", msg),
            CliError::Usage(diagnostics) => write!(f, "{}", diagnostics.join("\n")),
            CliError::Circumpolar => write!(f, "object is circumpolar"),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("solar calculation failed: {0}")]
    Solar(#[from] solar_positioning::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeError {
    #[cfg(feature = "geonames")]
    #[error("request failed: {0}")]
    Transport(String),
    #[cfg(feature = "geonames")]
    #[error("service answered with status {0}")]
    Status(u16),
    #[cfg(feature = "geonames")]
    #[error("service error: {0}")]
    Service(String),
    #[cfg(feature = "geonames")]
    #[error("no match")]
    NotFound,
    #[cfg(feature = "geonames")]
    #[error("invalid coordinates in answer: {0}")]
    InvalidCoordinates(String),
    #[error("geocoding is not available in this build")]
    Unavailable,
}

#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("object is circumpolar")]
    Circumpolar(Body),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
