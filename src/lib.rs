#![forbid(unsafe_code)]

//! Rust client for the Windy point-forecast API.
//!
//! A forecast is fetched in one synchronous round trip: coordinates and key are
//! validated, a canonical JSON `POST` body is built, the response must be
//! `200 OK`, and the body is decoded into a [`Report`] of time-aligned series
//! (`temp-surface`, `wind_u-800h`, ...) keyed by parameter and level.
//!
//! **Quick start**
//! ```no_run
//! use windy_forecast::{Client, ClientOptions, TableFormatter, Formatter};
//!
//! let client = Client::new(ClientOptions::default())?;
//! let report = client.fetch(53.19, -112.25, "your-api-key")?;
//! println!("{}", TableFormatter::default().format(&report)?);
//! # Ok::<(), windy_forecast::Error>(())
//! ```
//!
//! **Building blocks**
//!
//! The request and response halves are usable without [`Client`], e.g. with a
//! transport of your own:
//! ```no_run
//! use windy_forecast::{request, response, WINDY_ENDPOINT};
//!
//! let req = request::build(53.19, -112.25, "your-api-key", WINDY_ENDPOINT)?;
//! let resp = reqwest::blocking::Client::new().execute(req)?;
//! let report = response::decode(&response::check_status(resp)?)?;
//! println!("{} steps", report.len());
//! # Ok::<(), windy_forecast::Error>(())
//! ```
//!
//! Notes:
//! - Nothing is retried or cached; every error goes straight back to the caller.
//! - Only the API key you pass in is used. The process environment is read by
//!   [`Config::with_env`] on request and never written.

mod client;
mod config;
mod error;
mod report;
pub mod render;
pub mod request;
pub mod response;
mod sources;
pub mod store;
mod units;

pub use crate::client::{Client, ClientOptions, fetch_forecast};
pub use crate::config::{API_KEY_VAR, Config, ENDPOINT_VAR};
pub use crate::error::{Error, Result};
pub use crate::render::{Formatter, JsonFormatter, TableFormatter};
pub use crate::report::Report;
pub use crate::request::{ForecastRequest, LEVELS, MODEL, PARAMETERS};
pub use crate::sources::WINDY_ENDPOINT;
pub use crate::units::{
    CALM_SPEED, compass_point, kelvin_to_celsius, metres_to_millimetres, pascal_to_hectopascal,
    precipitation_label, wind_direction, wind_speed,
};
