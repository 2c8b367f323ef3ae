//! Angle helpers and frame conversions shared by the ephemeris modules.

use chrono::{DateTime, TimeZone};

pub const J2000: f64 = 2_451_545.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    if d >= 360.0 { 0.0 } else { d }
}

/// Wraps an angle difference into (-180, 180].
pub fn wrap_degrees(degrees: f64) -> f64 {
    let d = normalize_degrees(degrees);
    if d > 180.0 { d - 360.0 } else { d }
}

pub fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

pub fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Julian day (UT) of an instant.
pub fn julian_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}

/// Mean obliquity of the ecliptic in degrees.
pub fn obliquity(t: f64) -> f64 {
    23.439_291 - 0.013_004_2 * t
}

/// Greenwich mean sidereal time in degrees (Meeus 12.4).
pub fn greenwich_sidereal_time(jd_ut: f64) -> f64 {
    let t = julian_centuries(jd_ut);
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Converts ecliptic longitude/latitude to right ascension/declination.
pub fn ecliptic_to_equatorial(lambda: f64, beta: f64, epsilon: f64) -> (f64, f64) {
    let (l, b, e) = (lambda.to_radians(), beta.to_radians(), epsilon.to_radians());
    let alpha = (l.sin() * e.cos() - b.tan() * e.sin()).atan2(l.cos());
    let delta = (b.sin() * e.cos() + b.cos() * e.sin() * l.sin()).asin();
    (normalize_degrees(alpha.to_degrees()), delta.to_degrees())
}

/// Azimuth (from north, clockwise) and altitude for a local hour angle.
pub fn equatorial_to_horizontal(hour_angle: f64, delta: f64, latitude: f64) -> (f64, f64) {
    let (h, d, phi) = (
        hour_angle.to_radians(),
        delta.to_radians(),
        latitude.to_radians(),
    );
    let altitude = (phi.sin() * d.sin() + phi.cos() * d.cos() * h.cos()).asin();
    let azimuth_south = h.sin().atan2(h.cos() * phi.sin() - d.tan() * phi.cos());
    (
        normalize_degrees(azimuth_south.to_degrees() + 180.0),
        altitude.to_degrees(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn j2000_epoch() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_day(&dt) - J2000).abs() < 1e-9);
    }

    #[test]
    fn sidereal_time_matches_meeus_example() {
        // Meeus example 12.a: 1987-04-10 0h UT
        let gmst = greenwich_sidereal_time(2_446_895.5);
        assert!((gmst - 197.693_195).abs() < 1e-4, "{gmst}");
    }

    #[test]
    fn wrapping() {
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(wrap_degrees(350.0), -10.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
    }

    #[test]
    fn object_on_meridian_is_due_south_from_north_latitudes() {
        let (azimuth, altitude) = equatorial_to_horizontal(0.0, 10.0, 50.0);
        assert!((azimuth - 180.0).abs() < 1e-9);
        assert!((altitude - 50.0).abs() < 1e-9);
    }
}
