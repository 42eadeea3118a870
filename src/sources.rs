/// Current Windy point-forecast endpoint.
pub const WINDY_ENDPOINT: &str = "https://api.windy.com/api/point-forecast/v2";

/// Built-in endpoint aliases.
///
/// If `source` is already an `http(s)` URL, it is used as-is.
pub fn source_to_endpoint(source: &str) -> Option<&'static str> {
    match source {
        "windy" | "windy-v2" => Some(WINDY_ENDPOINT),
        _ => None,
    }
}

pub fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
