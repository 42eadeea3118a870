use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::report::Report;
use crate::request;
use crate::response;
use crate::sources::{is_http_url, source_to_endpoint};

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Endpoint alias (`windy`) or a full `http(s)` URL.
    pub endpoint: String,
    /// Default per-request timeout. `None` leaves the transport default.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    pub verify_tls: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: "windy".to_string(),
            timeout: None,
            user_agent: concat!("windy-forecast-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            verify_tls: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    endpoint: Url,
    http: HttpClient,
}

impl Client {
    pub fn new(opts: ClientOptions) -> Result<Self> {
        let endpoint = if is_http_url(&opts.endpoint) {
            opts.endpoint.clone()
        } else {
            source_to_endpoint(&opts.endpoint)
                .ok_or_else(|| Error::InvalidEndpoint(format!("unknown endpoint: {}", opts.endpoint)))?
                .to_string()
        };
        let endpoint = Url::parse(&endpoint)?;

        let mut builder = HttpClient::builder().user_agent(opts.user_agent.as_str());
        if let Some(timeout) = opts.timeout {
            builder = builder.timeout(timeout);
        }
        if !opts.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build().map_err(Error::ClientBuild)?;

        Ok(Self { endpoint, http })
    }

    /// Client for the endpoint named in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(ClientOptions {
            endpoint: config.endpoint.clone(),
            ..ClientOptions::default()
        })
    }

    /// Convenience constructor for the public Windy endpoint.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientOptions::default())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the point forecast for one coordinate.
    pub fn fetch(&self, latitude: f64, longitude: f64, api_key: &str) -> Result<Report> {
        self.fetch_with_deadline(latitude, longitude, api_key, None)
    }

    /// Like [`Client::fetch`], with a deadline handed to the transport as the
    /// request timeout.
    #[instrument(level = "debug", skip(self, api_key), fields(endpoint = %self.endpoint))]
    pub fn fetch_with_deadline(
        &self,
        latitude: f64,
        longitude: f64,
        api_key: &str,
        deadline: Option<Duration>,
    ) -> Result<Report> {
        let mut req = request::build(latitude, longitude, api_key, self.endpoint.as_str())?;
        if deadline.is_some() {
            *req.timeout_mut() = deadline;
        }

        debug!("sending point-forecast request");
        let resp = self.http.execute(req)?;
        let status = resp.status();

        let body = response::check_status(resp).inspect_err(|_| {
            warn!(%status, "point-forecast request rejected");
        })?;
        debug!(bytes = body.len(), "received point-forecast response");

        response::decode(&body)
    }
}

/// One-shot fetch using the endpoint and key from `config`.
pub fn fetch_forecast(latitude: f64, longitude: f64, config: &Config) -> Result<Report> {
    Client::from_config(config)?.fetch(latitude, longitude, &config.api_key)
}
