pub mod general;
pub mod logging;
pub mod camera;
pub mod location;

use serde::Deserialize;
use config_rs::{ builder::DefaultState, ConfigBuilder, ConfigError };

use general::General;
use logging::Logging;
use camera::Camera;
use location::Location;

const CONFIGS: &[&str] = &["updater.toml"];
const ENV_FILE: &str = ".env";
const ENV_PREFIX: &str = "UPDATER";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub general: General,
    pub logging: Logging,
    pub camera: Camera,
    pub location: Location,
}

impl Config {
    /// Embedded defaults, then `updater.toml`, then `UPDATER_<SECTION>__<KEY>`
    /// variables. A `.env` file, if present, is loaded into the environment first.
    pub fn load() -> Result<Config, ConfigError> {
        dotenv::from_path(ENV_FILE).ok();

        let mut config_rs_builder = defaults();
        for s in CONFIGS {
            config_rs_builder = config_rs_builder.add_source(config_rs::File::with_name(s).required(false));
        }
        config_rs_builder
            .add_source(
                config_rs::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Config>()
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    config_rs::Config::builder()
        .add_source(config_rs::File::from_str(include_str!("defaults/general.toml"), config_rs::FileFormat::Toml))
        .add_source(config_rs::File::from_str(include_str!("defaults/logging.toml"), config_rs::FileFormat::Toml))
        .add_source(config_rs::File::from_str(include_str!("defaults/camera.toml"), config_rs::FileFormat::Toml))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ::log::LevelFilter;

    use super::*;

    const REQUIRED: &str = r#"
        [camera]
        host = "http://192.168.1.64"
        hashed_password = "a1b2c3"

        [location]
        latitude = 52.37
        longitude = 4.89
    "#;

    fn from_toml(overrides: &[&str]) -> Result<Config, ConfigError> {
        let mut builder = defaults();
        for s in overrides {
            builder = builder.add_source(config_rs::File::from_str(s, config_rs::FileFormat::Toml));
        }
        builder.build()?.try_deserialize::<Config>()
    }

    #[test]
    fn defaults_fill_the_optional_parts() {
        let c = from_toml(&[REQUIRED]).unwrap();
        assert_eq!(c.general.timeout, Duration::from_secs(10));
        assert_eq!(c.general.sun_api.as_str(), "https://api.sunrise-sunset.org/json");
        assert_eq!(c.logging.level, LevelFilter::Info);
        assert_eq!(c.logging.format, logging::Format::Pattern);
        assert_eq!(c.logging.size, 10);
        assert_eq!(c.camera.username, "admin");
        assert_eq!(c.location, Location { latitude: 52.37, longitude: 4.89 });
    }

    #[test]
    fn camera_and_location_are_required() {
        assert!(from_toml(&[]).is_err());
        assert!(from_toml(&["[location]\nlatitude = 1.0\nlongitude = 1.0"]).is_err());
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert!(from_toml(&[REQUIRED, "[location]\nlatitude = 90.5"]).is_err());
        assert!(from_toml(&[REQUIRED, "[location]\nlongitude = -180.1"]).is_err());
        assert!(from_toml(&[REQUIRED, "[location]\nlatitude = -90.0\nlongitude = 180.0"]).is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(from_toml(&[REQUIRED, "[general]\ntimeout = 0.0"]).is_err());
        assert!(from_toml(&[REQUIRED, "[general]\nsun_api = \"not a url\""]).is_err());
        assert!(from_toml(&[REQUIRED, "[logging]\nlevel = \"loud\""]).is_err());
        assert!(from_toml(&[REQUIRED, "[logging]\nformat = \"xml\""]).is_err());
        assert!(from_toml(&[REQUIRED, "[logging]\ncount = \"0\""]).is_err());
        assert!(from_toml(&[REQUIRED, "[camera]\nhost = \" \""]).is_err());
    }

    #[test]
    fn password_is_hidden_from_debug_output() {
        let c = from_toml(&[REQUIRED]).unwrap();
        let debug = format!("{:?}", c.camera);
        assert!(!debug.contains("a1b2c3"));
        assert!(debug.contains("192.168.1.64"));
    }
}
