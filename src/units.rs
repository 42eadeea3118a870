//! Label and unit helpers used when presenting a [`crate::Report`].

const KELVIN_OFFSET: f64 = 273.15;

/// Below this speed, in m/s, the wind has no meaningful direction.
pub const CALM_SPEED: f64 = 0.05;

/// Human-readable label for a `ptype-surface` code.
///
/// Unknown codes, negative ones included, read as no precipitation. The
/// strings are kept byte-for-byte compatible with earlier output.
pub fn precipitation_label(code: i64) -> &'static str {
    match code {
        1 => "Rain",
        3 => "Freeezing Rain",
        5 => "Snow",
        7 => "Mixture of Rain and snow",
        8 => "Ice Pellets",
        _ => "No Precipitation",
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

pub fn metres_to_millimetres(metres: f64) -> f64 {
    metres * 1000.0
}

pub fn pascal_to_hectopascal(pascal: f64) -> f64 {
    pascal / 100.0
}

/// Wind speed from its eastward (`u`) and northward (`v`) components.
pub fn wind_speed(u: f64, v: f64) -> f64 {
    u.hypot(v)
}

/// Direction the wind blows from, in degrees clockwise from north (0..360).
///
/// `None` for calm wind (slower than [`CALM_SPEED`]) and for missing components.
pub fn wind_direction(u: f64, v: f64) -> Option<f64> {
    let speed = wind_speed(u, v);
    if !speed.is_finite() || speed < CALM_SPEED {
        return None;
    }
    Some((270.0 - v.atan2(u).to_degrees()).rem_euclid(360.0))
}

/// 8-point compass name for a direction in degrees.
pub fn compass_point(degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let idx = ((degrees.rem_euclid(360.0) + 22.5) / 45.0) as usize % POINTS.len();
    POINTS[idx]
}
