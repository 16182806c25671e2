use serde::{ Deserialize, Deserializer, de::Unexpected };

#[derive(Deserialize)]
pub struct Camera {
    /// base url of the camera's web interface, e.g. `http://192.168.1.64`
    #[serde(deserialize_with = "deserialize_non_empty")]
    pub host: String,
    pub username: String,
    /// sent as is. the camera expects the hash its own web ui would send.
    #[serde(deserialize_with = "deserialize_non_empty")]
    pub hashed_password: String,
}

impl std::fmt::Debug for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Camera")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("hashed_password", &"***")
            .finish()
    }
}

fn deserialize_non_empty<'de, D>(d: D) -> Result<String, D::Error> where D: Deserializer<'de> {
    let s = String::deserialize(d)?;
    if s.trim().is_empty() {
        Err(serde::de::Error::invalid_value(Unexpected::Str(&s), &"to be non empty (camera)"))
    } else { Ok(s) }
}
