use chrono::{ DateTime, Utc };
use serde::Deserialize;

/// Envelope returned by the sunrise-sunset api when called with `formatted=0`.
#[derive(Debug, Deserialize)]
pub struct SunResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Option<SunTimings>,
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct SunTimings {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,

    #[serde(default)]
    pub solar_noon: Option<DateTime<Utc>>,
    /// seconds
    #[serde(default)]
    pub day_length: Option<u64>,
}
