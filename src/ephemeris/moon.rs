//! Low-precision lunar position.
//!
//! Series from the Astronomical Almanac ("low precision formulae for the
//! Moon"): about 0.3° in longitude, 0.2° in latitude, valid 1900-2100.

use super::math::{cos_deg, normalize_degrees, sin_deg};

const EARTH_RADIUS_KM: f64 = 6_378.14;

/// Geocentric ecliptic coordinates of date.
#[derive(Debug, Clone, Copy)]
pub struct LunarPosition {
    pub longitude: f64,
    pub latitude: f64,
    /// Horizontal parallax in degrees.
    pub parallax: f64,
}

impl LunarPosition {
    pub fn distance_km(&self) -> f64 {
        EARTH_RADIUS_KM / sin_deg(self.parallax)
    }
}

/// `t` is in Julian centuries (TT) from J2000.
pub fn lunar_position(t: f64) -> LunarPosition {
    let longitude = 218.32 + 481_267.881 * t + 6.29 * sin_deg(135.0 + 477_198.87 * t)
        - 1.27 * sin_deg(259.3 - 413_335.36 * t)
        + 0.66 * sin_deg(235.7 + 890_534.22 * t)
        + 0.21 * sin_deg(269.9 + 954_397.74 * t)
        - 0.19 * sin_deg(357.5 + 35_999.05 * t)
        - 0.11 * sin_deg(186.5 + 966_404.03 * t);

    let latitude = 5.13 * sin_deg(93.3 + 483_202.02 * t)
        + 0.28 * sin_deg(228.2 + 960_400.89 * t)
        - 0.28 * sin_deg(318.3 + 6_003.15 * t)
        - 0.17 * sin_deg(217.6 - 407_332.21 * t);

    let parallax = 0.9508
        + 0.0518 * cos_deg(135.0 + 477_198.87 * t)
        + 0.0095 * cos_deg(259.3 - 413_335.36 * t)
        + 0.0078 * cos_deg(235.7 + 890_534.22 * t)
        + 0.0028 * cos_deg(269.9 + 954_397.74 * t);

    LunarPosition {
        longitude: normalize_degrees(longitude),
        latitude,
        parallax,
    }
}
