//! Moment selection and the two engine queries behind a single run.

use crate::data::{Body, Moment, Observer, Request};
use crate::engine::{Coordinates, Ephemeris, RiseSetTransit};
use crate::error::ComputeError;
use chrono::{DateTime, FixedOffset};
use solar_positioning::SunriseResult;

#[derive(Debug, Clone)]
pub struct ObjectDetails {
    pub body: Body,
    pub instant: DateTime<FixedOffset>,
    pub observer: Observer,
    pub position: Coordinates,
}

/// Picks the instant to report for `moment`.
///
/// A circumpolar day has no rise or set, so only `now` can be answered.
pub fn select_instant(
    body: Body,
    moment: Moment,
    reference: DateTime<FixedOffset>,
    events: &RiseSetTransit,
) -> Result<DateTime<FixedOffset>, ComputeError> {
    match (moment, events) {
        (Moment::Now, _) => Ok(reference),
        (_, SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. }) => {
            Err(ComputeError::Circumpolar(body))
        }
        (
            moment,
            SunriseResult::RegularDay {
                sunrise,
                transit,
                sunset,
            },
        ) => Ok(match moment {
            Moment::Rise => *sunrise,
            Moment::Set => *sunset,
            _ => *transit,
        }),
    }
}

pub fn calculate<E: Ephemeris>(engine: &E, request: &Request) -> Result<ObjectDetails, ComputeError> {
    let events = engine.rise_set_transit(
        request.body,
        request.instant,
        request.horizon_angle(),
        &request.observer,
    )?;
    tracing::debug!(?events, "rise/set/transit");

    let instant = select_instant(request.body, request.moment, request.instant, &events)?;
    tracing::debug!(moment = %request.moment, %instant, "selected instant");

    let position = engine.position(request.body, instant, &request.observer)?;

    Ok(ObjectDetails {
        body: request.body,
        instant,
        observer: request.observer,
        position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::config::OutputOptions;
    use crate::error::EngineError;
    use chrono::Duration;
    use solar_positioning::Horizon;
    use std::cell::RefCell;

    fn reference() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2023-06-21T12:00:00+02:00").unwrap()
    }

    fn regular_day() -> RiseSetTransit {
        let noon = reference();
        SunriseResult::RegularDay {
            sunrise: noon - Duration::hours(7),
            transit: noon + Duration::minutes(8),
            sunset: noon + Duration::hours(9),
        }
    }

    /// Engine stub returning canned events and recording position queries.
    struct StubEngine {
        events: RiseSetTransit,
        queried: RefCell<Vec<DateTime<FixedOffset>>>,
    }

    impl StubEngine {
        fn new(events: RiseSetTransit) -> Self {
            Self {
                events,
                queried: RefCell::new(Vec::new()),
            }
        }
    }

    impl Ephemeris for StubEngine {
        fn rise_set_transit(
            &self,
            _body: Body,
            _day: DateTime<FixedOffset>,
            _horizon: f64,
            _observer: &Observer,
        ) -> Result<RiseSetTransit, EngineError> {
            Ok(self.events.clone())
        }

        fn position(
            &self,
            _body: Body,
            instant: DateTime<FixedOffset>,
            _observer: &Observer,
        ) -> Result<Coordinates, EngineError> {
            self.queried.borrow_mut().push(instant);
            Ok(Coordinates {
                azimuth: 180.0,
                altitude: 45.0,
                right_ascension: 90.0,
                declination: 23.4,
                distance: 1.0,
            })
        }
    }

    fn request(moment: Moment) -> Request {
        Request {
            body: Body::Sun,
            horizon: Horizon::SunriseSunset,
            instant: reference(),
            moment,
            observer: Observer::new(78.2, 15.6).unwrap(),
            output: OutputOptions::default(),
        }
    }

    #[test]
    fn regular_day_selects_each_event() {
        let events = regular_day();
        let SunriseResult::RegularDay {
            sunrise,
            transit,
            sunset,
        } = events.clone()
        else {
            unreachable!()
        };
        let pick = |moment| select_instant(Body::Sun, moment, reference(), &events).unwrap();
        assert_eq!(pick(Moment::Now), reference());
        assert_eq!(pick(Moment::Rise), sunrise);
        assert_eq!(pick(Moment::Set), sunset);
        assert_eq!(pick(Moment::Transit), transit);
    }

    #[test]
    fn circumpolar_rejects_every_moment_but_now() {
        let transit = reference();
        for events in [
            SunriseResult::AllDay { transit },
            SunriseResult::AllNight { transit },
        ] {
            for moment in [Moment::Rise, Moment::Set, Moment::Transit] {
                let result = select_instant(Body::Moon, moment, reference(), &events);
                assert!(matches!(result, Err(ComputeError::Circumpolar(Body::Moon))));
            }
            assert_eq!(
                select_instant(Body::Moon, Moment::Now, reference(), &events).unwrap(),
                reference()
            );
        }
    }

    #[test]
    fn circumpolar_rise_skips_the_position_query() {
        let engine = StubEngine::new(SunriseResult::AllDay {
            transit: reference(),
        });
        let result = calculate(&engine, &request(Moment::Rise));
        assert!(matches!(result, Err(ComputeError::Circumpolar(Body::Sun))));
        assert!(engine.queried.borrow().is_empty());
    }

    #[test]
    fn circumpolar_now_reports_position_at_reference() {
        let engine = StubEngine::new(SunriseResult::AllDay {
            transit: reference(),
        });
        let details = calculate(&engine, &request(Moment::Now)).unwrap();
        assert_eq!(details.instant, reference());
        assert_eq!(*engine.queried.borrow(), vec![reference()]);
    }

    #[test]
    fn position_is_queried_at_selected_event() {
        let engine = StubEngine::new(regular_day());
        let details = calculate(&engine, &request(Moment::Set)).unwrap();
        assert_eq!(details.instant, reference() + Duration::hours(9));
        assert_eq!(*engine.queried.borrow(), vec![details.instant]);
        assert_eq!(details.position.altitude, 45.0);
    }
}
