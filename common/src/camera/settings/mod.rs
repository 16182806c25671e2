pub mod schedule;

use schedule::Schedule;
use serde::{ Serialize, Deserialize };
use serde_json::{ Map, Value };

/// The camera's `cmd=image` record. Only `day_begin` and `day_end` are ever
/// changed, every other field is sent back exactly as it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    pub brightness: i64,
    pub saturation: i64,
    pub contrast: i64,
    pub sharpness: i64,
    pub exposure: i64,
    pub day_night_mode: i64,

    pub day_begin: Schedule,
    pub day_end: Schedule,

    pub mirror: i64,
    pub flip: i64,
    pub wdr_enable: i64,
    pub ircut_delay: i64,
    pub anti_flicker_enable: i64,
    pub backlight_enable: i64,
    pub tv_standard: i64,
    #[serde(rename = "drc_strenght")]
    pub drc_strength: i64,
    pub nr_enable: i64,
    pub led_brightness: i64,
    pub max_led_brightness: i64,
    pub led_brightness_mode: i64,
    pub day_night_lux: i64,
    pub face_mode: i64,
    pub smart_face_mode: i64,
    pub night_fps_select: i64,
    pub ldc_enable: i64,
    pub rotation: i64,
    pub day_to_night_brightness: i64,
    pub night_to_day_brightness: i64,

    /// keys newer firmware sends that are not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: &str = r#"{
        "brightness": 50, "saturation": 52, "contrast": 48, "sharpness": 60, "exposure": 1,
        "day_night_mode": 2,
        "day_begin": { "hour": 7, "minute": 0, "second": 15, "reserve": 1 },
        "day_end": { "hour": 19, "minute": 30, "second": 45, "reserve": 2 },
        "mirror": 0, "flip": 1, "wdr_enable": 1, "ircut_delay": 5, "anti_flicker_enable": 0,
        "backlight_enable": 0, "tv_standard": 1, "drc_strenght": 3, "nr_enable": 1,
        "led_brightness": 80, "max_led_brightness": 100, "led_brightness_mode": 1,
        "day_night_lux": 12, "face_mode": 0, "smart_face_mode": 0, "night_fps_select": 2,
        "ldc_enable": 0, "rotation": 180, "day_to_night_brightness": 20, "night_to_day_brightness": 40
    }"#;

    #[test]
    fn decode_encode_keeps_every_field() {
        let settings: ImageSettings = serde_json::from_str(IMAGE).unwrap();
        assert_eq!(settings.drc_strength, 3);
        assert_eq!(settings.day_end.second, 45);

        let original: Value = serde_json::from_str(IMAGE).unwrap();
        assert_eq!(serde_json::to_value(&settings).unwrap(), original);
    }

    #[test]
    fn unknown_keys_are_carried_along() {
        let mut original: Value = serde_json::from_str(IMAGE).unwrap();
        original["hdr_mode"] = Value::from(1);
        original["osd"] = serde_json::json!({ "enable": true });

        let settings: ImageSettings = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(settings.extra.len(), 2);
        assert_eq!(serde_json::to_value(&settings).unwrap(), original);
    }

    #[test]
    fn any_day_night_mode_is_passed_through() {
        let mut original: Value = serde_json::from_str(IMAGE).unwrap();
        original["day_night_mode"] = Value::from(4);

        let settings: ImageSettings = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(settings.day_night_mode, 4);
        assert_eq!(serde_json::to_value(&settings).unwrap(), original);
    }

    #[test]
    fn rejects_missing_schedule() {
        let mut original: Value = serde_json::from_str(IMAGE).unwrap();
        original.as_object_mut().unwrap().remove("day_end");
        assert!(serde_json::from_value::<ImageSettings>(original).is_err());
    }
}
