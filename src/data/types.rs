use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Names accepted for `--object` and for the invocation alias.
const ALIASES: &[(&str, Body)] = &[
    ("sun", Body::Sun),
    ("sol", Body::Sun),
    ("moon", Body::Moon),
    ("luna", Body::Moon),
    ("mercury", Body::Mercury),
    ("venus", Body::Venus),
    ("mars", Body::Mars),
    ("jupiter", Body::Jupiter),
    ("saturn", Body::Saturn),
    ("uranus", Body::Uranus),
    ("neptune", Body::Neptune),
    ("pluto", Body::Pluto),
];

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }

    /// Resolves an alias such as the name the binary was invoked under.
    pub fn from_alias(alias: &str) -> Option<Body> {
        let alias = alias.trim();
        ALIASES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(alias))
            .map(|(_, body)| *body)
    }

    /// Elevation of the body's centre at rise/set when no horizon is given.
    pub fn standard_horizon(&self) -> f64 {
        match self {
            Body::Sun => solar_positioning::Horizon::SunriseSunset.elevation_angle(),
            Body::Moon => 0.125,
            _ => -0.5667,
        }
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::from_alias(s).ok_or_else(|| format!("invalid object: {}", s))
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Moment {
    #[default]
    Now,
    Rise,
    Set,
    Transit,
}

impl FromStr for Moment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "now" => Ok(Moment::Now),
            "rise" => Ok(Moment::Rise),
            "set" => Ok(Moment::Set),
            "transit" => Ok(Moment::Transit),
            _ => Err(format!("invalid moment: {}", s)),
        }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Moment::Now => "now",
            Moment::Rise => "rise",
            Moment::Set => "set",
            Moment::Transit => "transit",
        };
        f.write_str(name)
    }
}

/// Geographic observer position in degrees, longitude positive east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        Ok(Self {
            latitude: super::validate_latitude(latitude)?,
            longitude: super::validate_longitude(longitude)?,
        })
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}°, {:.5}°", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationSource {
    Coordinates(f64, f64),
    Query(String),
}
