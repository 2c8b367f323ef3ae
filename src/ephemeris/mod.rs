//! Analytical low-precision ephemeris for the sun, moon and planets.

pub mod math;
pub mod moon;
pub mod planets;
pub mod riseset;

use crate::data::Body;
use math::{ecliptic_to_equatorial, julian_centuries, obliquity};
use planets::Planet;

/// Geocentric equatorial coordinates of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension in degrees (0-360).
    pub right_ascension: f64,
    pub declination: f64,
    /// AU for the sun and planets, kilometres for the moon.
    pub distance: f64,
}

fn planet_of(body: Body) -> Option<Planet> {
    match body {
        Body::Mercury => Some(Planet::Mercury),
        Body::Venus => Some(Planet::Venus),
        Body::Mars => Some(Planet::Mars),
        Body::Jupiter => Some(Planet::Jupiter),
        Body::Saturn => Some(Planet::Saturn),
        Body::Uranus => Some(Planet::Uranus),
        Body::Neptune => Some(Planet::Neptune),
        Body::Pluto => Some(Planet::Pluto),
        Body::Sun | Body::Moon => None,
    }
}

/// Position of `body` at Julian ephemeris day `jde`.
pub fn geocentric(body: Body, jde: f64) -> Equatorial {
    let t = julian_centuries(jde);
    let (longitude, latitude, distance) = if let Some(planet) = planet_of(body) {
        let p = planets::planet_position(planet, t);
        (p.longitude, p.latitude, p.distance)
    } else if body == Body::Moon {
        let moon = moon::lunar_position(t);
        (moon.longitude, moon.latitude, moon.distance_km())
    } else {
        let sun = planets::sun_position(t);
        (sun.longitude, sun.latitude, sun.distance)
    };

    let (right_ascension, declination) = ecliptic_to_equatorial(longitude, latitude, obliquity(t));
    Equatorial {
        right_ascension,
        declination,
        distance,
    }
}
