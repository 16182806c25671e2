use chrono::Timelike;
use serde::{ Deserialize, Deserializer, Serialize };

/// One of the two points of the camera's day/night schedule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(deserialize_with = "deserialize_hour")]
    pub hour: u32,
    #[serde(deserialize_with = "deserialize_minute")]
    pub minute: u32,
    #[serde(deserialize_with = "deserialize_second")]
    pub second: u32,
    pub reserve: i64,
}

impl Schedule {
    /// Moves the schedule to the wall clock hour and minute of `time`.
    /// `second` and `reserve` stay whatever the camera last reported.
    pub fn set<T: Timelike>(&mut self, time: &T) {
        self.hour = time.hour();
        self.minute = time.minute();
    }
}

fn deserialize_hour<'de, D>(d: D) -> Result<u32, D::Error> where D: Deserializer<'de> {
    let value = u32::deserialize(d)?;
    if value < 24 { Ok(value) }
    else { Err(serde::de::Error::invalid_value(serde::de::Unexpected::Unsigned(value as u64), &"to be 0 <= x < 24 (hour)")) }
}

fn deserialize_minute<'de, D>(d: D) -> Result<u32, D::Error> where D: Deserializer<'de> {
    let value = u32::deserialize(d)?;
    if value < 60 { Ok(value) }
    else { Err(serde::de::Error::invalid_value(serde::de::Unexpected::Unsigned(value as u64), &"to be 0 <= x < 60 (minute)")) }
}

fn deserialize_second<'de, D>(d: D) -> Result<u32, D::Error> where D: Deserializer<'de> {
    let value = u32::deserialize(d)?;
    if value < 60 { Ok(value) }
    else { Err(serde::de::Error::invalid_value(serde::de::Unexpected::Unsigned(value as u64), &"to be 0 <= x < 60 (second)")) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn set_keeps_second_and_reserve() {
        let mut s = Schedule { hour: 7, minute: 30, second: 42, reserve: 3 };
        s.set(&NaiveTime::from_hms_opt(6, 12, 59).unwrap());
        assert_eq!(s, Schedule { hour: 6, minute: 12, second: 42, reserve: 3 });
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(serde_json::from_str::<Schedule>(r#"{"hour":24,"minute":0,"second":0,"reserve":0}"#).is_err());
        assert!(serde_json::from_str::<Schedule>(r#"{"hour":0,"minute":60,"second":0,"reserve":0}"#).is_err());
        assert!(serde_json::from_str::<Schedule>(r#"{"hour":0,"minute":0,"second":60,"reserve":0}"#).is_err());
        assert!(serde_json::from_str::<Schedule>(r#"{"hour":-1,"minute":0,"second":0,"reserve":0}"#).is_err());
        assert!(serde_json::from_str::<Schedule>(r#"{"hour":23,"minute":59,"second":59,"reserve":-7}"#).is_ok());
    }
}
