use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Declares the numeric series of [`Report`] together with their JSON keys,
/// so the struct and the series table cannot drift apart.
macro_rules! report_series {
    ($( $(#[$doc:meta])* $field:ident => $key:literal, )*) => {
        /// Decoded point forecast.
        ///
        /// `ts` holds epoch milliseconds; every non-empty series is aligned with it
        /// by index. Series the API did not return, or returned as `null`, are
        /// empty. A `null` step inside a float series decodes as `NaN`, inside
        /// `ptype-surface` as `0`.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct Report {
            #[serde(default, deserialize_with = "null_as_default")]
            pub ts: Vec<i64>,

            /// Unit label per field. Informational only.
            #[serde(
                default,
                deserialize_with = "null_as_default",
                skip_serializing_if = "BTreeMap::is_empty"
            )]
            pub units: BTreeMap<String, Option<String>>,

            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub warning: Option<String>,

            /// Integer-coded precipitation type, see [`crate::precipitation_label`].
            #[serde(
                default,
                rename = "ptype-surface",
                deserialize_with = "code_series",
                skip_serializing_if = "Vec::is_empty"
            )]
            pub ptype_surface: Vec<i64>,

            $(
                $(#[$doc])*
                #[serde(
                    default,
                    rename = $key,
                    deserialize_with = "float_values",
                    skip_serializing_if = "Vec::is_empty"
                )]
                pub $field: Vec<f64>,
            )*
        }

        impl Report {
            /// JSON keys of the floating-point series, in declaration order.
            pub const SERIES_KEYS: &'static [&'static str] = &[$($key),*];

            /// Every floating-point series paired with its JSON key.
            pub fn float_series(&self) -> impl Iterator<Item = (&'static str, &[f64])> + '_ {
                [$(($key, self.$field.as_slice())),*].into_iter()
            }
        }
    };
}

/// A missing key and an explicit `null` both mean "not returned".
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn float_values<'de, D>(deserializer: D) -> std::result::Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Option<f64>> = null_as_default(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

fn code_series<'de, D>(deserializer: D) -> std::result::Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Option<i64>> = null_as_default(deserializer)?;
    Ok(values.into_iter().map(Option::unwrap_or_default).collect())
}

report_series! {
    /// Air temperature, K.
    temp_surface => "temp-surface",
    temp_1000h => "temp-1000h",
    temp_800h => "temp-800h",
    temp_400h => "temp-400h",
    temp_200h => "temp-200h",

    /// Dewpoint, K.
    dewpoint_surface => "dewpoint-surface",
    dewpoint_1000h => "dewpoint-1000h",
    dewpoint_800h => "dewpoint-800h",
    dewpoint_400h => "dewpoint-400h",
    dewpoint_200h => "dewpoint-200h",

    /// Accumulated precipitation over the previous 3 hours, m.
    past3hprecip_surface => "past3hprecip-surface",
    past3hconvprecip_surface => "past3hconvprecip-surface",
    past3hsnowprecip_surface => "past3hsnowprecip-surface",

    /// Eastward wind component, m/s.
    wind_u_surface => "wind_u-surface",
    wind_u_1000h => "wind_u-1000h",
    wind_u_800h => "wind_u-800h",
    wind_u_400h => "wind_u-400h",
    wind_u_200h => "wind_u-200h",

    /// Northward wind component, m/s.
    wind_v_surface => "wind_v-surface",
    wind_v_1000h => "wind_v-1000h",
    wind_v_800h => "wind_v-800h",
    wind_v_400h => "wind_v-400h",
    wind_v_200h => "wind_v-200h",

    /// Wind gust, m/s.
    gust_surface => "gust-surface",

    /// Convective available potential energy, J/kg.
    cape_surface => "cape-surface",

    /// Cloud cover by layer, %.
    lclouds_surface => "lclouds-surface",
    mclouds_surface => "mclouds-surface",
    hclouds_surface => "hclouds-surface",

    /// Relative humidity, %.
    rh_surface => "rh-surface",
    rh_1000h => "rh-1000h",
    rh_800h => "rh-800h",
    rh_400h => "rh-400h",
    rh_200h => "rh-200h",

    /// Geopotential height, m.
    gh_surface => "gh-surface",
    gh_1000h => "gh-1000h",
    gh_800h => "gh-800h",
    gh_400h => "gh-400h",
    gh_200h => "gh-200h",

    /// Air pressure, Pa.
    pressure_surface => "pressure-surface",
}

impl Report {
    /// Number of forecast steps.
    pub fn len(&self) -> usize {
        self.ts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ts.is_empty()
    }

    /// Look a floating-point series up by its JSON key, e.g. `"temp-800h"`.
    pub fn series(&self, key: &str) -> Option<&[f64]> {
        self.float_series()
            .find(|(k, _)| *k == key)
            .map(|(_, values)| values)
    }

    /// Step timestamps as UTC datetimes. Out-of-range values are skipped.
    pub fn times(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.ts
            .iter()
            .filter_map(|ms| DateTime::from_timestamp_millis(*ms))
    }

    /// Check that every non-empty series has one value per timestamp.
    pub fn check_alignment(&self) -> Result<()> {
        let expected = self.ts.len();
        let ptype = ("ptype-surface", self.ptype_surface.len());
        let lengths = self
            .float_series()
            .map(|(key, values)| (key, values.len()))
            .chain(std::iter::once(ptype));

        for (field, found) in lengths {
            if found != 0 && found != expected {
                return Err(Error::MisalignedSeries {
                    field,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}
