//! Renderers for the individual `§` fields.

use crate::compute::ObjectDetails;
use crate::ephemeris::math::{julian_day, normalize_degrees};

/// Object fields available after `§` in a format template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Azimuth,
    Altitude,
    Zenith,
    RightAscension,
    RightAscensionHms,
    Declination,
    Distance,
    JulianDay,
    Latitude,
    Longitude,
    Name,
    Section,
}

impl Field {
    pub fn from_token(token: char) -> Option<Field> {
        let field = match token {
            'a' => Field::Azimuth,
            'h' => Field::Altitude,
            'z' => Field::Zenith,
            'r' => Field::RightAscension,
            'R' => Field::RightAscensionHms,
            'd' => Field::Declination,
            'D' => Field::Distance,
            'j' => Field::JulianDay,
            'l' => Field::Latitude,
            'o' => Field::Longitude,
            'n' => Field::Name,
            '§' => Field::Section,
            _ => return None,
        };
        Some(field)
    }

    pub fn render(&self, details: &ObjectDetails) -> String {
        let position = &details.position;
        match self {
            Field::Azimuth => format_angle(position.azimuth),
            Field::Altitude => format_angle(position.altitude),
            Field::Zenith => format_angle(position.zenith_angle()),
            Field::RightAscension => format_angle(position.right_ascension),
            Field::RightAscensionHms => format_hours(position.right_ascension),
            Field::Declination => format_angle(position.declination),
            Field::Distance => format_angle(position.distance),
            Field::JulianDay => format!("{:.5}", julian_day(&details.instant)),
            Field::Latitude => format_angle(details.observer.latitude),
            Field::Longitude => format_angle(details.observer.longitude),
            Field::Name => details.body.to_string(),
            Field::Section => "§".to_string(),
        }
    }
}

fn format_angle(value: f64) -> String {
    format!("{:.4}", value)
}

/// Degrees of right ascension as `HHhMMmSS.Ss`.
fn format_hours(degrees: f64) -> String {
    let tenths = (normalize_degrees(degrees) / 15.0 * 36_000.0).round() as u64 % 864_000;
    let hours = tenths / 36_000;
    let minutes = tenths / 600 % 60;
    let seconds = tenths % 600;
    format!(
        "{:02}h{:02}m{:02}.{}s",
        hours,
        minutes,
        seconds / 10,
        seconds % 10
    )
}
