//! Rise, transit and set times for any body.
//!
//! Same method the SPA uses for the sun (NREL SPA appendix A.2): positions
//! for the previous, current and next day are interpolated and the first
//! guesses are corrected against the computed altitude. The correction step
//! is repeated because the moon moves too fast for a single pass.

use super::Equatorial;
use super::math::{cos_deg, greenwich_sidereal_time, julian_day, sin_deg, wrap_degrees};
use chrono::{DateTime, Duration, FixedOffset};
use solar_positioning::SunriseResult;

const SIDEREAL_DEGREES_PER_DAY: f64 = 360.985_647;
const CORRECTION_PASSES: usize = 3;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy)]
enum PolarType {
    AllDay,
    AllNight,
}

fn polar_type(latitude: f64, elevation_angle: f64, declination: f64) -> Option<PolarType> {
    let arg = hour_angle_cosine(latitude, elevation_angle, declination);
    if arg < -1.0 {
        Some(PolarType::AllDay)
    } else if arg > 1.0 {
        Some(PolarType::AllNight)
    } else {
        None
    }
}

fn hour_angle_cosine(latitude: f64, elevation_angle: f64, declination: f64) -> f64 {
    (sin_deg(elevation_angle) - sin_deg(latitude) * sin_deg(declination))
        / (cos_deg(latitude) * cos_deg(declination))
}

fn normalize_to_unit_range(value: f64) -> f64 {
    value.rem_euclid(1.0)
}

/// Quadratic interpolation between the three daily positions, `n` in days from the middle one.
fn interpolate(positions: &[Equatorial; 3], n: f64) -> (f64, f64) {
    let a = wrap_degrees(positions[1].right_ascension - positions[0].right_ascension);
    let b = wrap_degrees(positions[2].right_ascension - positions[1].right_ascension);
    let a_prime = positions[1].declination - positions[0].declination;
    let b_prime = positions[2].declination - positions[1].declination;
    let c = b - a;
    let c_prime = b_prime - a_prime;

    (
        positions[1].right_ascension + n * (a + b + c * n) / 2.0,
        positions[1].declination + n * (a_prime + b_prime + c_prime * n) / 2.0,
    )
}

fn add_fraction_of_day(day: DateTime<FixedOffset>, fraction: f64) -> DateTime<FixedOffset> {
    day + Duration::milliseconds((fraction * MILLIS_PER_DAY).round() as i64)
}

/// Computes events for the day starting at `day_start`.
///
/// `position` returns geocentric coordinates for a Julian ephemeris day,
/// `elevation_angle` is the altitude of the body's centre at rise/set.
pub fn rise_set_transit<F>(
    day_start: DateTime<FixedOffset>,
    latitude: f64,
    longitude: f64,
    delta_t: f64,
    elevation_angle: f64,
    position: F,
) -> SunriseResult<DateTime<FixedOffset>>
where
    F: Fn(f64) -> Equatorial,
{
    let jd = julian_day(&day_start);
    let nu = greenwich_sidereal_time(jd);
    let delta_t_days = delta_t / 86_400.0;

    let positions: [Equatorial; 3] =
        std::array::from_fn(|i| position(jd + (i as f64) - 1.0 + delta_t_days));

    let m0 = (positions[1].right_ascension - longitude - nu) / 360.0;
    let polar = polar_type(latitude, elevation_angle, positions[1].declination);

    let h0 = hour_angle_cosine(latitude, elevation_angle, positions[1].declination)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees();

    let mut m = [
        normalize_to_unit_range(m0),
        normalize_to_unit_range(m0 - h0 / 360.0),
        normalize_to_unit_range(m0 + h0 / 360.0),
    ];
    let events = if polar.is_some() { 1 } else { 3 };

    for _ in 0..CORRECTION_PASSES {
        for (i, m_i) in m.iter_mut().enumerate().take(events) {
            let sidereal = nu + SIDEREAL_DEGREES_PER_DAY * *m_i;
            let (alpha, delta) = interpolate(&positions, *m_i + delta_t_days);
            let hour_angle = wrap_degrees(sidereal + longitude - alpha);

            if i == 0 {
                *m_i -= hour_angle / 360.0;
                continue;
            }

            let altitude = (sin_deg(latitude) * sin_deg(delta)
                + cos_deg(latitude) * cos_deg(delta) * cos_deg(hour_angle))
            .asin()
            .to_degrees();
            let denominator = 360.0 * cos_deg(delta) * cos_deg(latitude) * sin_deg(hour_angle);
            if denominator.abs() > f64::EPSILON {
                *m_i += (altitude - elevation_angle) / denominator;
            }
        }
    }

    let transit = add_fraction_of_day(day_start, m[0]);
    match polar {
        Some(PolarType::AllDay) => SunriseResult::AllDay { transit },
        Some(PolarType::AllNight) => SunriseResult::AllNight { transit },
        None => SunriseResult::RegularDay {
            sunrise: add_fraction_of_day(day_start, m[1]),
            transit,
            sunset: add_fraction_of_day(day_start, m[2]),
        },
    }
}
