mod timezone;

use std::sync::Arc;

use chrono::{ DateTime, Utc };
use common::camera::{ ImageSettings, SetResponse };
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ Error, Op };
use crate::http::{ redact, Fetch };
use crate::logging::Scope;

const CGI: &str = "cgi-bin/web.cgi";

/// Client of the camera's `cgi-bin/web.cgi` interface. Every request carries
/// the credentials as plain `username`/`password` query values.
pub struct CameraClient {
    fetch: Arc<dyn Fetch>,
    log: Scope,
    base: Url,
    username: String,
    hashed_password: String,
}

impl CameraClient {
    pub fn new(fetch: Arc<dyn Fetch>, log: Scope, base: &str, username: &str, hashed_password: &str) -> Result<Self, Error> {
        let mut url = Url::parse(base).map_err(|e| {
            log.with("base", base).error(format_args!("invalid base url. {e}"));
            Error::InvalidConfiguration(format!("invalid camera url {base:?}. {e}"))
        })?;

        if url.host_str().map_or(true, str::is_empty) {
            log.with("base", base).error("base url must have a domain or ip address");
            return Err(Error::InvalidConfiguration(format!("camera url {base:?} has no host")));
        }

        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        Ok(CameraClient {
            fetch,
            log,
            base: url,
            username: username.to_string(),
            hashed_password: hashed_password.to_string(),
        })
    }

    /// `<base>/<path>`, `path` given without a leading slash.
    fn page_url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("{}/{path}", self.base.path().trim_end_matches('/')));
        url
    }

    pub fn build_request_url(&self, action: &str, cmd: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.page_url(CGI);
        url.query_pairs_mut()
            .append_pair("action", action)
            .append_pair("cmd", cmd)
            .extend_pairs(extra)
            .append_pair("username", &self.username)
            .append_pair("password", &self.hashed_password);
        url
    }

    async fn get_text(&self, log: &Scope, url: &Url) -> Result<String, Error> {
        log.debug(format_args!("GET {}", redact(url)));
        self.fetch.get(url).await.map_err(|e| {
            log.error(format_args!("request failed. {e}"));
            Error::from(e)
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, log: &Scope, url: &Url) -> Result<T, Error> {
        let body = self.get_text(log, url).await?;
        serde_json::from_str(&body).map_err(|e| {
            log.error(format_args!("failed to parse json. {e}"));
            Error::from(e)
        })
    }

    pub async fn get_image_settings(&self) -> Result<ImageSettings, Error> {
        let log = self.log.with("method", "get_image_settings");
        log.debug("get camera's image settings");

        let url = self.build_request_url("get", "image", &[]);
        self.get_json(&log, &url).await.op("get_image_settings")
    }

    pub async fn set_image_settings(&self, settings: &ImageSettings) -> Result<(), Error> {
        self.try_set_image_settings(settings).await.op("set_image_settings")
    }

    async fn try_set_image_settings(&self, settings: &ImageSettings) -> Result<(), Error> {
        let log = self.log.with("method", "set_image_settings");
        let param = serde_json::to_string(settings)?;
        log.debug(format_args!("set image settings {param}"));

        let url = self.build_request_url("set", "image", &[("param", &param)]);
        match self.get_json::<Option<SetResponse>>(&log, &url).await? {
            Some(res) if res.is_ok() => Ok(()),
            Some(res) => {
                log.with("status", &res.status).error("refused to change image settings");
                Err(Error::DeviceRejected(Some(res.status)))
            },
            None => {
                log.error("refused to change image settings, empty response");
                Err(Error::DeviceRejected(None))
            },
        }
    }

    /// Moves the camera's day begin and day end to `sunrise` and `sunset`, as
    /// wall clock time in the camera's own timezone. Only hour and minute of
    /// the two schedules change; the rest of the image settings are written
    /// back as read.
    pub async fn update_day_timings(&self, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Result<(), Error> {
        self.try_update_day_timings(sunrise, sunset).await.op("update_day_timings")
    }

    async fn try_update_day_timings(&self, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Result<(), Error> {
        let log = self.log.with("method", "update_day_timings");
        log.debug(format_args!("update time of day light. sunrise={sunrise} sunset={sunset}"));

        let timezone = self.current_timezone().await.map_err(|e| {
            log.error("failed to get camera's timezone");
            e
        })?;
        log.with("timezone", &timezone).info("camera's timezone fetched");

        let mut settings = self.get_image_settings().await.map_err(|e| {
            log.error("failed to get camera's image settings");
            e
        })?;
        log.info("camera's day light settings fetched");
        log.debug(format_args!("current day_begin={:?} day_end={:?}", settings.day_begin, settings.day_end));

        let sunrise = sunrise.with_timezone(&timezone.offset);
        let sunset = sunset.with_timezone(&timezone.offset);
        settings.day_begin.set(&sunrise);
        settings.day_end.set(&sunset);
        log.debug(format_args!("new day_begin={:?} day_end={:?}", settings.day_begin, settings.day_end));

        self.set_image_settings(&settings).await.map_err(|e| {
            log.error("failed to update camera's image settings");
            e
        })?;

        log.with("day_begin", sunrise.format("%H:%M"))
            .with("day_end", sunset.format("%H:%M"))
            .info("camera's time of day light updated");
        Ok(())
    }
}
