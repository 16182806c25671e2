use serde::{ Deserialize, Deserializer };

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "deserialize_latitude")]
    pub latitude: f64,

    #[serde(deserialize_with = "deserialize_longitude")]
    pub longitude: f64,
}

fn deserialize_latitude<'de, D>(d: D) -> Result<f64, D::Error> where D: Deserializer<'de> {
    let value = f64::deserialize(d)?;
    if value.is_finite() && (-90.0..=90.0).contains(&value) { Ok(value) }
    else { Err(serde::de::Error::invalid_value(serde::de::Unexpected::Float(value), &"to be -90.0 <= x <= 90.0 (location.latitude)")) }
}

fn deserialize_longitude<'de, D>(d: D) -> Result<f64, D::Error> where D: Deserializer<'de> {
    let value = f64::deserialize(d)?;
    if value.is_finite() && (-180.0..=180.0).contains(&value) { Ok(value) }
    else { Err(serde::de::Error::invalid_value(serde::de::Unexpected::Float(value), &"to be -180.0 <= x <= 180.0 (location.longitude)")) }
}
