//! Place-name lookup for `--query`.

use crate::data::Observer;
use crate::error::GeocodeError;

pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Observer, GeocodeError>;
}

/// The geocoder compiled into this build, if any.
#[cfg(feature = "geonames")]
pub fn default_geocoder() -> Option<Box<dyn Geocoder>> {
    Some(Box::new(geonames::GeoNames::from_env()))
}

#[cfg(not(feature = "geonames"))]
pub fn default_geocoder() -> Option<Box<dyn Geocoder>> {
    None
}

#[cfg(feature = "geonames")]
pub mod geonames {
    use super::Geocoder;
    use crate::data::Observer;
    use crate::error::GeocodeError;
    use reqwest::blocking::Client;
    use serde::Deserialize;
    use std::env;
    use std::time::Duration;

    pub const DEFAULT_BASE_URL: &str = "http://api.geonames.org";
    pub const DEFAULT_USERNAME: &str = "calcelestial";
    const BASE_URL_ENV: &str = "CALCELESTIAL_GEONAMES_URL";
    const USERNAME_ENV: &str = "CALCELESTIAL_GEONAMES_USER";
    const TIMEOUT: Duration = Duration::from_secs(10);

    #[derive(Debug, Deserialize)]
    struct SearchResponse {
        #[serde(default)]
        geonames: Vec<Place>,
        status: Option<ServiceStatus>,
    }

    #[derive(Debug, Deserialize)]
    struct Place {
        lat: String,
        lng: String,
        #[serde(default)]
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct ServiceStatus {
        message: String,
    }

    /// GeoNames `searchJSON` client.
    #[derive(Debug, Clone)]
    pub struct GeoNames {
        base_url: String,
        username: String,
    }

    impl GeoNames {
        pub fn new(base_url: impl Into<String>, username: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into(),
                username: username.into(),
            }
        }

        pub fn from_env() -> Self {
            let non_empty = |name: &str| env::var(name).ok().filter(|v: &String| !v.trim().is_empty());
            Self::new(
                non_empty(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                non_empty(USERNAME_ENV).unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            )
        }

        fn search_url(&self) -> String {
            format!("{}/searchJSON", self.base_url.trim_end_matches('/'))
        }
    }

    impl Geocoder for GeoNames {
        fn geocode(&self, query: &str) -> Result<Observer, GeocodeError> {
            let client = Client::builder()
                .timeout(TIMEOUT)
                .build()
                .map_err(|e| GeocodeError::Transport(e.to_string()))?;

            let url = self.search_url();
            tracing::debug!(%url, query, username = %self.username, "geocoding");

            let response = client
                .get(&url)
                .query(&[
                    ("q", query),
                    ("maxRows", "1"),
                    ("username", self.username.as_str()),
                ])
                .send()
                .map_err(|e| GeocodeError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(GeocodeError::Status(status.as_u16()));
            }

            let body: SearchResponse = response
                .json()
                .map_err(|e| GeocodeError::Transport(e.to_string()))?;
            first_match(body)
        }
    }

    fn first_match(response: SearchResponse) -> Result<Observer, GeocodeError> {
        if let Some(status) = response.status {
            return Err(GeocodeError::Service(status.message));
        }
        let place = response
            .geonames
            .into_iter()
            .next()
            .ok_or(GeocodeError::NotFound)?;

        let invalid = || GeocodeError::InvalidCoordinates(format!("{}, {}", place.lat, place.lng));
        let latitude = place.lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let longitude = place.lng.trim().parse::<f64>().map_err(|_| invalid())?;
        let observer = Observer::new(latitude, longitude).map_err(|_| invalid())?;

        tracing::info!(place = %place.name, %observer, "found location");
        Ok(observer)
    }

}
