use std::sync::Arc;

use common::sun::{ SunResponse, SunTimings };
use url::Url;

use crate::config::location::Location;
use crate::error::{ Error, Op };
use crate::http::Fetch;
use crate::logging::Scope;

/// Client of the sunrise-sunset.org style api.
pub struct SunClient {
    fetch: Arc<dyn Fetch>,
    api: Url,
    log: Scope,
}

impl SunClient {
    pub fn new(fetch: Arc<dyn Fetch>, api: Url, log: Scope) -> Self {
        SunClient { fetch, api, log }
    }

    fn build_url(&self, location: &Location) -> Url {
        let mut url = self.api.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("lat", &format!("{:.6}", location.latitude))
            .append_pair("lng", &format!("{:.6}", location.longitude))
            .append_pair("formatted", "0");
        url
    }

    /// Today's sunrise and sunset at `location`, in UTC.
    pub async fn fetch_timings(&self, location: &Location) -> Result<SunTimings, Error> {
        self.try_fetch_timings(location).await.op("fetch_timings")
    }

    async fn try_fetch_timings(&self, location: &Location) -> Result<SunTimings, Error> {
        let log = self.log.with("method", "fetch_timings");
        log.debug(format_args!("get sunrise and sunset for latitude={} longitude={}", location.latitude, location.longitude));

        let url = self.build_url(location);
        let body = self.fetch.get(&url).await.map_err(|e| {
            log.error(format_args!("failed to get sun timings. {e}"));
            Error::from(e)
        })?;

        let response: SunResponse = serde_json::from_str(&body).map_err(|e| {
            log.error(format_args!("failed to parse json. {e}"));
            Error::from(e)
        })?;

        let status = response.status.unwrap_or_default();
        match response.results {
            Some(timings) => {
                log.with("status", &status).debug(format_args!(
                    "sunrise={} sunset={} solar_noon={:?} day_length={:?}",
                    timings.sunrise, timings.sunset, timings.solar_noon, timings.day_length
                ));
                Ok(timings)
            },
            None => {
                log.with("status", &status).error("results are empty");
                Err(Error::MalformedResponse(format!("no results in response (status {status:?})")))
            },
        }
    }
}
