use std::time::Duration;

use async_trait::async_trait;
use reqwest::{ Client, StatusCode };
use thiserror::Error;
use url::Url;

use crate::error::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed. {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("{url} answered with {status}")]
    Status { url: String, status: StatusCode },
}

/// Plain GET returning the body as text. Both adapters share one instance.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &Url) -> Result<String, FetchError>;
}

pub struct HttpFetch {
    client: Client,
}

impl HttpFetch {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::InvalidConfiguration(format!("cannot build http client. {e}")))?;
        Ok(HttpFetch { client })
    }
}

#[async_trait]
impl Fetch for HttpFetch {
    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        let request = |source: reqwest::Error| FetchError::Request { url: redact(url), source };

        let response = self.client.get(url.clone()).send().await.map_err(request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: redact(url), status });
        }
        response.text().await.map_err(request)
    }
}

/// `url` with the password query value masked, for errors and logs.
pub fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "password") {
        return url.to_string();
    }
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url.query_pairs()
        .map(|(k, v)| {
            let v = if k == "password" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

#[cfg(test)]
pub mod canned {
    use std::sync::Mutex;

    use super::*;

    /// Answers requests from a fixed table keyed by path plus the
    /// `action`/`cmd` query values, and remembers every url it was asked for.
    #[derive(Default)]
    pub struct Canned {
        routes: Vec<(String, String)>,
        requests: Mutex<Vec<Url>>,
    }

    impl Canned {
        pub fn new() -> Self {
            Self::default()
        }

        /// `key` is either a bare path (`/view/time_setting.html`) or a path
        /// with its `action`/`cmd` (`/cgi-bin/web.cgi?get&image`).
        pub fn respond(mut self, key: &str, body: &str) -> Self {
            self.routes.push((key.to_string(), body.to_string()));
            self
        }

        pub fn requests(&self) -> Vec<Url> {
            self.requests.lock().unwrap().clone()
        }

        pub fn count(&self, key: &str) -> usize {
            self.requests().iter().filter(|u| route_key(u) == key).count()
        }
    }

    pub fn route_key(url: &Url) -> String {
        let value = |name: &str| url.query_pairs().find(|(k, _)| k == name).map(|(_, v)| v.into_owned());
        match (value("action"), value("cmd")) {
            (Some(action), Some(cmd)) => format!("{}?{action}&{cmd}", url.path()),
            _ => url.path().to_string(),
        }
    }

    #[async_trait]
    impl Fetch for Canned {
        async fn get(&self, url: &Url) -> Result<String, FetchError> {
            self.requests.lock().unwrap().push(url.clone());
            let key = route_key(url);
            self.routes.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, body)| body.clone())
                .ok_or_else(|| FetchError::Status { url: url.to_string(), status: StatusCode::NOT_FOUND })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_masks_only_the_password() {
        let url = Url::parse("http://cam/cgi-bin/web.cgi?action=get&cmd=image&username=admin&password=secret").unwrap();
        let masked = redact(&url);
        assert!(!masked.contains("secret"));
        assert!(masked.contains("username=admin"));
        assert!(masked.contains("password=***") || masked.contains("password=%2A%2A%2A"));
    }

    #[test]
    fn redact_leaves_other_urls_alone() {
        let url = Url::parse("https://api.sunrise-sunset.org/json?lat=1.000000&lng=2.000000&formatted=0").unwrap();
        assert_eq!(redact(&url), url.as_str());
    }
}
