//! Astronomy engine interface and the bundled implementation.
//!
//! The sun goes through solar-positioning's SPA; the moon and planets use the
//! analytical ephemeris in [`crate::ephemeris`].

use crate::data::{Body, Observer};
use crate::ephemeris::{
    self,
    math::{equatorial_to_horizontal, greenwich_sidereal_time, julian_day},
};
use crate::error::EngineError;
use chrono::{DateTime, FixedOffset, NaiveTime, Offset, TimeZone, Utc};
use solar_positioning::{Horizon, SunriseResult, spa, time::DeltaT};

pub type RiseSetTransit = SunriseResult<DateTime<FixedOffset>>;

/// Apparent place of a body for an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Degrees from north, clockwise.
    pub azimuth: f64,
    pub altitude: f64,
    pub right_ascension: f64,
    pub declination: f64,
    /// AU, or kilometres for the moon.
    pub distance: f64,
}

impl Coordinates {
    pub fn zenith_angle(&self) -> f64 {
        90.0 - self.altitude
    }
}

pub trait Ephemeris {
    /// Rise, transit and set of `body` on the UT day containing `day`, in its offset.
    fn rise_set_transit(
        &self,
        body: Body,
        day: DateTime<FixedOffset>,
        horizon: f64,
        observer: &Observer,
    ) -> Result<RiseSetTransit, EngineError>;

    fn position(
        &self,
        body: Body,
        instant: DateTime<FixedOffset>,
        observer: &Observer,
    ) -> Result<Coordinates, EngineError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Almanac;

fn estimate_delta_t(dt: DateTime<FixedOffset>) -> f64 {
    DeltaT::estimate_from_date_like(dt).unwrap_or_else(|err| {
        tracing::warn!(%dt, %err, "delta T estimate failed, using 0");
        0.0
    })
}

/// 0h UT of the instant's UT date, in the instant's offset.
fn start_of_ut_day(day: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let midnight = day.naive_utc().date().and_time(NaiveTime::MIN);
    day.offset().from_utc_datetime(&midnight)
}

fn in_offset(events: RiseSetTransit, offset: FixedOffset) -> RiseSetTransit {
    let shift = |t: DateTime<FixedOffset>| t.with_timezone(&offset);
    match events {
        SunriseResult::RegularDay {
            sunrise,
            transit,
            sunset,
        } => SunriseResult::RegularDay {
            sunrise: shift(sunrise),
            transit: shift(transit),
            sunset: shift(sunset),
        },
        SunriseResult::AllDay { transit } => SunriseResult::AllDay {
            transit: shift(transit),
        },
        SunriseResult::AllNight { transit } => SunriseResult::AllNight {
            transit: shift(transit),
        },
    }
}

impl Ephemeris for Almanac {
    fn rise_set_transit(
        &self,
        body: Body,
        day: DateTime<FixedOffset>,
        horizon: f64,
        observer: &Observer,
    ) -> Result<RiseSetTransit, EngineError> {
        let delta_t = estimate_delta_t(day);
        tracing::debug!(%body, %day, horizon, %observer, delta_t, "computing rise/set/transit");

        let ut_day = start_of_ut_day(day);
        if body == Body::Sun {
            // SPA picks the calendar day of its input's offset, so hand it UT.
            return spa::sunrise_sunset_for_horizon(
                ut_day.with_timezone(&Utc.fix()),
                observer.latitude,
                observer.longitude,
                delta_t,
                Horizon::Custom(horizon),
            )
            .map(|events| in_offset(events, *day.offset()))
            .map_err(EngineError::from);
        }

        Ok(ephemeris::riseset::rise_set_transit(
            ut_day,
            observer.latitude,
            observer.longitude,
            delta_t,
            horizon,
            |jde| ephemeris::geocentric(body, jde),
        ))
    }

    fn position(
        &self,
        body: Body,
        instant: DateTime<FixedOffset>,
        observer: &Observer,
    ) -> Result<Coordinates, EngineError> {
        let delta_t = estimate_delta_t(instant);
        let jd = julian_day(&instant);
        let equatorial = ephemeris::geocentric(body, jd + delta_t / 86_400.0);
        tracing::debug!(%body, %instant, jd, ?equatorial, "computing position");

        let (azimuth, altitude) = if body == Body::Sun {
            let position = spa::solar_position(
                instant,
                observer.latitude,
                observer.longitude,
                0.0,
                delta_t,
                None,
            )?;
            (position.azimuth(), position.elevation_angle())
        } else {
            let local_sidereal = greenwich_sidereal_time(jd) + observer.longitude;
            equatorial_to_horizontal(
                local_sidereal - equatorial.right_ascension,
                equatorial.declination,
                observer.latitude,
            )
        };

        Ok(Coordinates {
            azimuth,
            altitude,
            right_ascension: equatorial.right_ascension,
            declination: equatorial.declination,
            distance: equatorial.distance,
        })
    }
}
