use super::types::{Body, Moment, Observer};
use chrono::{DateTime, FixedOffset};
use solar_positioning::Horizon;

pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: String,
    /// Offset for time-valued output fields; `None` keeps the calendar timezone.
    pub timezone: Option<FixedOffset>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            timezone: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Parameters {
    pub body: Option<Body>,
    pub horizon: Option<Horizon>,
    /// Reference instant given with `--time`; `None` means now.
    pub time: Option<DateTime<FixedOffset>>,
    pub moment: Moment,
    pub output: OutputOptions,
}

/// A fully resolved calculation request.
#[derive(Debug, Clone)]
pub struct Request {
    pub body: Body,
    pub horizon: Horizon,
    pub instant: DateTime<FixedOffset>,
    pub moment: Moment,
    pub observer: Observer,
    pub output: OutputOptions,
}

impl Request {
    pub fn horizon_angle(&self) -> f64 {
        self.horizon.elevation_angle()
    }
}

/// Maps a twilight keyword or a number of degrees to a horizon.
pub fn resolve_horizon(value: &str) -> Result<Horizon, String> {
    match value {
        "civil" => Ok(Horizon::CivilTwilight),
        "nautic" => Ok(Horizon::NauticalTwilight),
        "astronomical" => Ok(Horizon::AstronomicalTwilight),
        other => other
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|degrees| degrees.is_finite())
            .map(Horizon::Custom)
            .ok_or_else(|| format!("invalid twilight: {}", value)),
    }
}
