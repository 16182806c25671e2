use common::camera::{ SystemTime, Timezone, Timezones };

use super::CameraClient;
use crate::error::{ Error, Op };

const TIME_SETTINGS_PAGE: &str = "view/time_setting.html";

impl CameraClient {
    /// Timezone table scraped from the camera's time settings page. The camera
    /// has no json endpoint for it.
    pub async fn list_timezones(&self) -> Result<Timezones, Error> {
        self.try_list_timezones().await.op("list_timezones")
    }

    async fn try_list_timezones(&self) -> Result<Timezones, Error> {
        let log = self.log.with("method", "list_timezones");
        log.debug("get camera's timezones list");

        let url = self.page_url(TIME_SETTINGS_PAGE);
        let html = self.get_text(&log, &url).await?;
        log.with("bytes", html.len()).debug("html with timezones fetched");

        let timezones = Timezones::from_html(&html).map_err(|e| {
            log.error(format_args!("unable to parse timezones. {e}"));
            Error::from(e)
        })?;
        if timezones.is_empty() {
            log.warn("no timezone options found on the page");
        }
        log.with("count", timezones.len()).debug("timezones parsed");
        Ok(timezones)
    }

    pub async fn current_timezone_id(&self) -> Result<u32, Error> {
        self.try_current_timezone_id().await.op("current_timezone_id")
    }

    async fn try_current_timezone_id(&self) -> Result<u32, Error> {
        let log = self.log.with("method", "current_timezone_id");
        log.debug("get timezone id");

        let url = self.build_request_url("get", "systime", &[]);
        match self.get_json::<Option<SystemTime>>(&log, &url).await? {
            Some(time) => {
                log.with("timezone_id", time.timezone).with("time_sec", time.time_sec).debug("fetched timezone id");
                Ok(time.timezone)
            },
            None => {
                log.error("no timezone info in response");
                Err(Error::MalformedResponse("empty systime response".to_string()))
            },
        }
    }

    pub async fn current_timezone(&self) -> Result<Timezone, Error> {
        self.try_current_timezone().await.op("current_timezone")
    }

    async fn try_current_timezone(&self) -> Result<Timezone, Error> {
        let log = self.log.with("method", "current_timezone");
        log.debug("get camera's current timezone offset");

        let timezones = self.list_timezones().await?;
        let id = self.current_timezone_id().await?;

        match timezones.get(id) {
            Some(tz) => Ok(tz.clone()),
            None => {
                log.with("id", id).error("the timezone is unknown");
                Err(Error::UnknownTimezoneId(id))
            },
        }
    }
}
