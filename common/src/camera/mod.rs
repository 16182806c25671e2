pub mod settings;
pub mod timezone;

use serde::Deserialize;

pub use settings::ImageSettings;
pub use settings::schedule::Schedule;
pub use timezone::{ Timezone, Timezones, TimezoneError };

/// Body of `action=get&cmd=systime`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SystemTime {
    pub timezone: u32,
    #[serde(default)]
    pub time_sec: i64,
}

/// Body the camera answers any `action=set` request with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl SetResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
