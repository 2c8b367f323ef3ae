pub mod config;
pub mod time_utils;
pub mod types;
pub mod validation;

pub use config::{Parameters, Request, resolve_horizon};
pub use time_utils::{calendar_timezone, parse_local_datetime, parse_timezone_hours};
pub use types::*;
pub use validation::*;
