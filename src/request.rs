use std::fmt;

use reqwest::Method;
use reqwest::blocking::{Body, Request as HttpRequest};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};

/// Forecast model requested from the API.
pub const MODEL: &str = "gfs";

/// Atmospheric quantities requested, in wire order.
pub const PARAMETERS: [&str; 15] = [
    "temp",
    "dewpoint",
    "precip",
    "convPrecip",
    "snowPrecip",
    "wind",
    "windGust",
    "cape",
    "ptype",
    "lclouds",
    "mclouds",
    "hclouds",
    "rh",
    "gh",
    "pressure",
];

/// Levels requested, in wire order.
pub const LEVELS: [&str; 5] = ["surface", "1000h", "800h", "400h", "200h"];

/// Point-forecast request body.
///
/// Fields are declared in lexicographic order so the serialized body is
/// byte-identical to what the API has always received:
/// `{"key":..,"lat":..,"levels":[..],"lon":..,"model":"gfs","parameters":[..]}`.
#[derive(Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    key: String,
    lat: f64,
    levels: &'static [&'static str],
    lon: f64,
    model: &'static str,
    parameters: &'static [&'static str],
}

impl ForecastRequest {
    /// Validate the inputs and build the request body.
    pub fn new(latitude: f64, longitude: f64, api_key: impl Into<String>) -> Result<Self> {
        let key = api_key.into();
        validate(latitude, longitude, &key)?;
        Ok(Self {
            key,
            lat: latitude,
            levels: &LEVELS,
            lon: longitude,
            model: MODEL,
            parameters: &PARAMETERS,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.lat
    }

    pub fn longitude(&self) -> f64 {
        self.lon
    }

    pub fn model(&self) -> &str {
        self.model
    }

    pub fn parameters(&self) -> &[&'static str] {
        self.parameters
    }

    pub fn levels(&self) -> &[&'static str] {
        self.levels
    }

    /// Canonical JSON encoding of the body.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Error::Encode)
    }
}

// Keeps the API key out of logs and panic messages.
impl fmt::Debug for ForecastRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastRequest")
            .field("key", &"<redacted>")
            .field("lat", &self.lat)
            .field("lon", &self.lon)
            .field("model", &self.model)
            .field("parameters", &self.parameters)
            .field("levels", &self.levels)
            .finish()
    }
}

/// Check coordinates and key before anything touches the network.
///
/// Non-finite coordinates are rejected along with out-of-range ones.
pub fn validate(latitude: f64, longitude: f64, api_key: &str) -> Result<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::InvalidLatitude(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::InvalidLongitude(longitude));
    }
    if api_key.trim().is_empty() {
        return Err(Error::MissingApiKey);
    }
    Ok(())
}

/// Build a POST request for `endpoint` carrying the canonical JSON body.
///
/// Nothing is sent; the caller hands the request to a transport.
pub fn build(latitude: f64, longitude: f64, api_key: &str, endpoint: &str) -> Result<HttpRequest> {
    let body = ForecastRequest::new(latitude, longitude, api_key)?.to_json()?;
    let url = Url::parse(endpoint)?;

    let mut request = HttpRequest::new(Method::POST, url);
    request
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    *request.body_mut() = Some(Body::from(body));
    Ok(request)
}
