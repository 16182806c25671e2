use std::time::Duration;

use serde::{ Deserialize, Deserializer, de::Unexpected };
use url::Url;

#[derive(Debug, Deserialize)]
pub struct General {
    #[serde(deserialize_with = "deserialize_timeout")]
    pub timeout: Duration,

    #[serde(deserialize_with = "deserialize_sun_api")]
    pub sun_api: Url,
}

fn deserialize_timeout<'de, D>(d: D) -> Result<Duration, D::Error> where D: Deserializer<'de> {
    let value = f64::deserialize(d)?;
    if value.is_finite() && value > 0.0 { Ok(Duration::from_secs_f64(value)) }
    else { Err(serde::de::Error::invalid_value(Unexpected::Float(value), &"greater than zero (general.timeout)")) }
}

fn deserialize_sun_api<'de, D>(d: D) -> Result<Url, D::Error> where D: Deserializer<'de> {
    let s = String::deserialize(d)?;
    match Url::parse(&s) {
        Ok(u) if u.has_host() => Ok(u),
        Ok(_) => Err(serde::de::Error::invalid_value(Unexpected::Str(&s), &"to have a host. (general.sun_api)")),
        Err(e) => Err(serde::de::Error::invalid_value(Unexpected::Str(&s), &format!("to be valid url. (general.sun_api) {e}").as_str())),
    }
}
