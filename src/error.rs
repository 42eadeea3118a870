use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("latitude must be a numeric value (between -90 and 90)")]
    InvalidLatitude(f64),

    #[error("longitude must be a numeric value (between -180 and 180)")]
    InvalidLongitude(f64),

    #[error("api key is required")]
    MissingApiKey,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),

    /// Non-200 response. Displays as the bare HTTP status line, e.g. `404 Not Found`.
    #[error("{status_text}")]
    UnexpectedStatus { code: u16, status_text: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("series {field} has {found} values but ts has {expected}")]
    MisalignedSeries {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config parse error: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),

    /// The HTTP client could not be set up from [`crate::ClientOptions`].
    #[error("cannot build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid report tag: {0:?}")]
    InvalidTag(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidEndpoint(err.to_string())
    }
}
