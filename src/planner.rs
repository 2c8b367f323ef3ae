//! Execution planning: turn parsed options into a resolved request.

use crate::data::{LocationSource, Observer, Parameters, Request, calendar_timezone};
use crate::error::{CliError, GeocodeError};
use crate::geocode::Geocoder;

fn resolve_observer(
    source: LocationSource,
    geocoder: Option<&dyn Geocoder>,
) -> Result<Observer, CliError> {
    match source {
        LocationSource::Coordinates(latitude, longitude) => {
            Observer::new(latitude, longitude).map_err(|message| CliError::Usage(vec![message]))
        }
        LocationSource::Query(query) => geocoder
            .ok_or(GeocodeError::Unavailable)
            .and_then(|geocoder| geocoder.geocode(&query))
            .map_err(|err| {
                tracing::warn!(%query, error = %err, "geocoding failed");
                CliError::Usage(vec![format!("failed to lookup location: {}", query)])
            }),
    }
}

pub fn build_request(
    source: LocationSource,
    params: Parameters,
    geocoder: Option<&dyn Geocoder>,
) -> Result<Request, CliError> {
    let body = params
        .body
        .ok_or_else(|| CliError::Usage(vec!["invalid object".to_string()]))?;
    let observer = resolve_observer(source, geocoder)?;

    let horizon = params
        .horizon
        .unwrap_or(solar_positioning::Horizon::Custom(body.standard_horizon()));
    let instant = params.time.unwrap_or_else(|| calendar_timezone().now());

    let request = Request {
        body,
        horizon,
        instant,
        moment: params.moment,
        observer,
        output: params.output,
    };
    tracing::debug!(?request, "resolved request");
    Ok(request)
}
