//! Pluggable text renderings of a [`Report`].

use std::fmt::Write as _;

use chrono::DateTime;

use crate::error::{Error, Result};
use crate::report::Report;
use crate::units::{
    compass_point, kelvin_to_celsius, metres_to_millimetres, pascal_to_hectopascal,
    precipitation_label, wind_direction, wind_speed,
};

pub trait Formatter {
    fn format(&self, report: &Report) -> Result<String>;
}

/// Report as JSON, in the same shape the API returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let out = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        out.map_err(Error::Encode)
    }
}

/// Fixed-width table of surface conditions, one row per forecast step.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFormatter {
    /// Maximum number of rows; `None` prints every step.
    pub limit: Option<usize>,
}

const MISSING: &str = "-";

/// One formatted value; absent steps and `NaN` gaps print as [`MISSING`].
fn cell(values: &[f64], i: usize, convert: impl Fn(f64) -> f64) -> String {
    values
        .get(i)
        .filter(|v| v.is_finite())
        .map(|v| format!("{:.1}", convert(*v)))
        .unwrap_or_else(|| MISSING.to_string())
}

impl TableFormatter {
    fn row(report: &Report, i: usize) -> String {
        let time = report
            .ts
            .get(i)
            .and_then(|ms| DateTime::from_timestamp_millis(*ms))
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| MISSING.to_string());

        let wind = report
            .wind_u_surface
            .get(i)
            .zip(report.wind_v_surface.get(i))
            .map(|(u, v)| (*u, *v))
            .filter(|(u, v)| u.is_finite() && v.is_finite());
        let (speed, dir) = match wind {
            Some((u, v)) => (
                format!("{:.1}", wind_speed(u, v)),
                wind_direction(u, v).map_or(MISSING, compass_point).to_string(),
            ),
            None => (MISSING.to_string(), MISSING.to_string()),
        };

        let ptype = report
            .ptype_surface
            .get(i)
            .map(|code| precipitation_label(*code))
            .unwrap_or(MISSING);

        let clouds = format!(
            "{}/{}/{}",
            cell(&report.lclouds_surface, i, |v| v),
            cell(&report.mclouds_surface, i, |v| v),
            cell(&report.hclouds_surface, i, |v| v),
        );

        format!(
            "{:<16} {:>7} {:>7} {:>6} {:>3} {:>6} {:>7} {:<24} {:>17} {:>8}",
            time,
            cell(&report.temp_surface, i, kelvin_to_celsius),
            cell(&report.dewpoint_surface, i, kelvin_to_celsius),
            speed,
            dir,
            cell(&report.gust_surface, i, |v| v),
            cell(&report.past3hprecip_surface, i, metres_to_millimetres),
            ptype,
            clouds,
            cell(&report.pressure_surface, i, pascal_to_hectopascal),
        )
    }
}

impl Formatter for TableFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut out = String::new();
        if let Some(warning) = &report.warning {
            let _ = writeln!(out, "warning: {warning}");
        }

        let header = format!(
            "{:<16} {:>7} {:>7} {:>6} {:>3} {:>6} {:>7} {:<24} {:>17} {:>8}",
            "Time (UTC)",
            "Temp°C",
            "Dew°C",
            "Wind",
            "Dir",
            "Gust",
            "Precip",
            "Type",
            "Clouds L/M/H %",
            "hPa"
        );
        let _ = writeln!(out, "{header}");
        let _ = writeln!(out, "{}", "-".repeat(header.chars().count()));

        let rows = self.limit.unwrap_or(usize::MAX).min(report.len());
        for i in 0..rows {
            let _ = writeln!(out, "{}", Self::row(report, i));
        }
        Ok(out)
    }
}
